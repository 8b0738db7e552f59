//! Outgoing response representation passed through the chain.
//!
//! Filters and the terminal handler write into the same [`Response`]. A
//! filter can set headers before calling `next` and inspect or override the
//! result after it returns.

use bytes::Bytes;
use http::StatusCode;

// ── ContentType ───────────────────────────────────────────────────────────────

/// Common content-type values for use with [`Response::set_body`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    Csv,          // text/csv
    EventStream,  // text/event-stream  (SSE)
    Html,         // text/html; charset=utf-8
    Json,         // application/json
    OctetStream,  // application/octet-stream
    Text,         // text/plain; charset=utf-8
    Xml,          // application/xml
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Csv         => "text/csv",
            Self::EventStream => "text/event-stream",
            Self::Html        => "text/html; charset=utf-8",
            Self::Json        => "application/json",
            Self::OctetStream => "application/octet-stream",
            Self::Text        => "text/plain; charset=utf-8",
            Self::Xml         => "application/xml",
        }
    }
}

// ── Response ─────────────────────────────────────────────────────────────────

/// An outgoing HTTP response under construction.
///
/// Starts as `200 OK` with no headers and no body.
///
/// ```rust
/// use sluice::{ContentType, Response};
/// use http::StatusCode;
///
/// let mut res = Response::new();
/// res.set_status(StatusCode::CREATED);
/// res.set_header("location", "/users/42");
/// res.set_body(ContentType::Json, br#"{"id":42}"#.to_vec());
///
/// assert_eq!(res.header("content-type"), Some("application/json"));
/// ```
#[derive(Debug, Clone)]
pub struct Response {
    status: StatusCode,
    headers: Vec<(String, String)>,
    body: Bytes,
}

impl Response {
    pub fn new() -> Self {
        Self { status: StatusCode::OK, headers: Vec::new(), body: Bytes::new() }
    }

    pub fn status(&self) -> StatusCode { self.status }
    pub fn headers(&self) -> &[(String, String)] { &self.headers }
    pub fn body(&self) -> &Bytes { &self.body }

    pub fn has_body(&self) -> bool { !self.body.is_empty() }

    pub fn set_status(&mut self, status: StatusCode) {
        self.status = status;
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Replaces every header called `name` with a single `name: value`.
    pub fn set_header(&mut self, name: &str, value: impl Into<String>) {
        self.headers.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
        self.headers.push((name.to_owned(), value.into()));
    }

    /// Writes a typed body, replacing any previous body and content type.
    pub fn set_body(&mut self, content_type: ContentType, body: impl Into<Bytes>) {
        self.set_header("content-type", content_type.as_str());
        self.body = body.into();
    }

    /// `text/plain; charset=utf-8` shortcut for [`set_body`](Self::set_body).
    pub fn set_text(&mut self, body: impl Into<String>) {
        let body: String = body.into();
        self.set_body(ContentType::Text, body);
    }

    /// Resets status, headers and body, e.g. before writing an error page.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for Response {
    fn default() -> Self { Self::new() }
}
