//! The [`Filter`] trait and the [`Next`] continuation.
//!
//! A filter sees every request whose context-relative path matches its
//! [`pattern`](Filter::pattern). It may inspect or rewrite the request and
//! the response, then decide whether the rest of the chain runs:
//!
//! ```text
//! FilterChain::handle(req, res, terminal)
//!        ↓
//! filter[0].handle(req, res, next) ── returns early? ──▶ short-circuit
//!        ↓ next.run(req, res)
//! filter[1].handle(req, res, next)
//!        ↓ next.run(req, res)
//! terminal.call(req, res)
//! ```
//!
//! # Example
//!
//! ```rust
//! use sluice::{BoxFuture, Error, Filter, Next, Request, Response, UrlPattern};
//! use http::StatusCode;
//!
//! struct RequireToken;
//!
//! impl Filter for RequireToken {
//!     fn pattern(&self) -> UrlPattern {
//!         UrlPattern::parse("/api/*").expect("valid pattern")
//!     }
//!
//!     fn handle<'a>(
//!         &'a self,
//!         req: &'a mut Request,
//!         res: &'a mut Response,
//!         next: Next<'a>,
//!     ) -> BoxFuture<'a, Result<(), Error>> {
//!         Box::pin(async move {
//!             if req.header("authorization").is_none() {
//!                 res.set_status(StatusCode::UNAUTHORIZED);
//!                 return Ok(());
//!             }
//!             next.run(req, res).await
//!         })
//!     }
//! }
//! ```

use std::future::Future;
use std::pin::Pin;

use crate::config::FilterConfig;
use crate::error::Error;
use crate::pattern::UrlPattern;
use crate::request::Request;
use crate::response::Response;
use crate::terminal::Terminal;

/// A heap-allocated, type-erased future borrowed for `'a`.
///
/// Filters borrow the request and response mutably for the whole traversal,
/// so unlike a route handler's future this one cannot be `'static`.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A unit of request-processing logic inside a [`FilterChain`](crate::FilterChain).
///
/// Only [`handle`](Filter::handle) is required. Filters are shared across
/// concurrent requests, so any state they keep needs interior mutability.
pub trait Filter: Send + Sync + 'static {
    /// Called once, in registration order, when the chain is initialized.
    fn init(&self, _config: &FilterConfig) -> Result<(), Error> {
        Ok(())
    }

    /// Processes one request. Call `next.run(req, res)` to continue the
    /// chain; return without calling it to short-circuit.
    fn handle<'a>(
        &'a self,
        req: &'a mut Request,
        res: &'a mut Response,
        next: Next<'a>,
    ) -> BoxFuture<'a, Result<(), Error>>;

    /// Called once, in registration order, when the chain is torn down.
    fn destroy(&self) -> Result<(), Error> {
        Ok(())
    }

    /// Requests this filter applies to. Defaults to `/*`.
    fn pattern(&self) -> UrlPattern {
        UrlPattern::default()
    }

    /// Name used in logs.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// The rest of the chain after the current filter.
///
/// Consumed by [`run`](Next::run), so a filter can continue the chain at
/// most once.
pub struct Next<'a> {
    filters: &'a [&'a dyn Filter],
    terminal: &'a dyn Terminal,
}

impl<'a> Next<'a> {
    pub(crate) fn new(filters: &'a [&'a dyn Filter], terminal: &'a dyn Terminal) -> Self {
        Self { filters, terminal }
    }

    /// Invokes the next filter, or the terminal handler once every filter
    /// has delegated onward.
    pub fn run(self, req: &'a mut Request, res: &'a mut Response) -> BoxFuture<'a, Result<(), Error>> {
        match self.filters.split_first() {
            Some((filter, rest)) => filter.handle(req, res, Next::new(rest, self.terminal)),
            None => self.terminal.call(req, res),
        }
    }

    /// Number of filters still ahead of the terminal handler.
    pub fn remaining(&self) -> usize {
        self.filters.len()
    }
}
