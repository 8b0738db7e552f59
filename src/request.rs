//! Incoming request representation passed through the chain.

use std::collections::HashMap;

use bytes::Bytes;
use http::Method;

/// An incoming HTTP request as a filter sees it.
///
/// The host fills it in before calling
/// [`FilterChain::handle`](crate::FilterChain::handle). Filters may rewrite
/// headers and leave attributes for the links after them.
#[derive(Debug, Clone)]
pub struct Request {
    method: Method,
    uri: String,
    context_path: String,
    headers: Vec<(String, String)>,
    body: Bytes,
    attributes: HashMap<String, String>,
}

impl Request {
    /// A body-less request for `uri`, mounted at the root context.
    pub fn new(method: Method, uri: impl Into<String>) -> Self {
        Self {
            method,
            uri: uri.into(),
            context_path: String::new(),
            headers: Vec::new(),
            body: Bytes::new(),
            attributes: HashMap::new(),
        }
    }

    /// Sets the prefix the application is mounted under, e.g. `/sonar`.
    pub fn with_context_path(mut self, context_path: impl Into<String>) -> Self {
        self.context_path = context_path.into();
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    pub fn method(&self) -> &Method { &self.method }
    pub fn uri(&self) -> &str { &self.uri }
    pub fn context_path(&self) -> &str { &self.context_path }
    pub fn headers(&self) -> &[(String, String)] { &self.headers }
    pub fn body(&self) -> &Bytes { &self.body }

    /// The request URI with the leading context path removed.
    ///
    /// This is what [`UrlPattern`](crate::UrlPattern)s are matched against.
    /// The context path only counts when it ends at a `/` or at the end of
    /// the URI; otherwise the full URI is returned.
    pub fn path_within_context(&self) -> &str {
        match self.uri.strip_prefix(self.context_path.as_str()) {
            Some(rest) if rest.is_empty() || rest.starts_with('/') => rest,
            _ => &self.uri,
        }
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

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(key.into(), value.into());
    }
}
