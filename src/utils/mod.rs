//! Small shared helpers.

mod plural;

pub use plural::plural_s;
