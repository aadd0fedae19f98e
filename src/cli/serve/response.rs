//! HTTP response handlers.

use anyhow::Result;
use serde::Serialize;
use tiny_http::{Header, Method, Request, Response, StatusCode};

/// MIME types written by the server.
pub mod types {
    pub const PLAIN: &str = "text/plain; charset=utf-8";
    pub const JSON: &str = "application/json";
}

/// Response decided for one request, independent of the socket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub status: u16,
    pub content_type: &'static str,
    pub body: Vec<u8>,
    /// Wire-form `Location` header for redirects
    pub location: Option<String>,
}

#[derive(Serialize)]
struct DocumentBody<'a> {
    document_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    seo_key: Option<&'a str>,
}

impl Reply {
    fn text(status: u16, body: &str) -> Self {
        Self {
            status,
            content_type: types::PLAIN,
            body: body.as_bytes().to_vec(),
            location: None,
        }
    }

    /// 200 with `{"document_id", "seo_key"}`.
    pub fn document(document_id: &str, seo_key: Option<&str>) -> Self {
        let body = DocumentBody {
            document_id,
            seo_key,
        };
        match serde_json::to_vec(&body) {
            Ok(body) => Self {
                status: 200,
                content_type: types::JSON,
                body,
                location: None,
            },
            Err(e) => Self::text(500, &format!("500 Internal Server Error: {e}")),
        }
    }

    /// 301 to `location`, non-ASCII percent-encoded for the header.
    pub fn redirect(location: &str) -> Self {
        let wire = url::Url::parse(location)
            .map(String::from)
            .unwrap_or_else(|_| location.to_string());
        Self {
            location: Some(wire),
            ..Self::text(301, "301 Moved Permanently")
        }
    }

    pub fn not_found() -> Self {
        Self::text(404, "404 Not Found")
    }

    pub fn bad_request(reason: &str) -> Self {
        Self::text(400, &format!("400 Bad Request: {reason}"))
    }

    pub fn method_not_allowed() -> Self {
        Self::text(405, "405 Method Not Allowed")
    }
}

/// Write `reply` to the client. HEAD requests get headers only.
pub fn send_reply(request: Request, reply: Reply) -> Result<()> {
    let body = if is_head_request(&request) {
        Vec::new()
    } else {
        reply.body
    };

    let mut response = Response::from_data(body)
        .with_status_code(StatusCode(reply.status))
        .with_header(make_header("Content-Type", reply.content_type)?);
    if let Some(location) = &reply.location {
        response = response.with_header(make_header("Location", location)?);
    }
    if reply.status == 405 {
        response = response.with_header(make_header("Allow", "GET, HEAD")?);
    }

    request.respond(response)?;
    Ok(())
}

/// Respond with 503 Service Unavailable (server shutting down).
pub fn respond_unavailable(request: Request) -> Result<()> {
    send_reply(request, Reply::text(503, "503 Service Unavailable"))
}

fn is_head_request(request: &Request) -> bool {
    request.method() == &Method::Head
}

fn make_header(key: &str, value: &str) -> Result<Header> {
    Header::from_bytes(key.as_bytes(), value.as_bytes())
        .map_err(|()| anyhow::anyhow!("invalid header {key}: {value}"))
}
