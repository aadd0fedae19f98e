//! Configuration section definitions.
//!
//! Each module corresponds to a section in `seoroute.toml`:
//!
//! | Module   | TOML Section | Purpose                                  |
//! |----------|--------------|------------------------------------------|
//! | `route`  | `[route]`    | Fallback template, key and reserved params |
//! | `serve`  | `[serve]`    | HTTP front                               |
//! | `store`  | `[store]`    | Document file, watching                  |

mod route;
mod serve;
mod store;

pub use route::RouteConfig;
pub use serve::ServeConfig;
pub use store::StoreConfig;
