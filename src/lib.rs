//! # sluice
//!
//! Ordered request-filter chains for HTTP services.
//! Call each filter in order, then call the handler. That is the whole job.
//!
//! ## The contract
//!
//! A [`FilterChain`] holds filters in the order you registered them. It
//! initializes them, runs every request through them, and tears them down.
//! The server, HTTP parsing, and routing belong to the host. sluice sits
//! between whatever accepted the request and whatever answers it.
//!
//! - **Order is registration order**: for `init`, for every request, and
//!   for `destroy`
//! - **Filters decide**: a filter that does not call `next` short-circuits
//!   the rest of the chain, terminal included
//! - **Errors are not rewritten**: what a filter returns is what the caller
//!   gets; the first failing `init` or `destroy` stops the loop
//! - **Patterns pick requests**: each filter declares a [`UrlPattern`]
//!   matched against the context-relative path; `/*` by default
//!
//! ## Quick start
//!
//! ```rust
//! use std::sync::Arc;
//! use sluice::{
//!     BoxFuture, Error, Filter, FilterChain, FilterConfig, Next, Request, Response,
//!     terminal_fn,
//! };
//! use http::Method;
//!
//! struct PoweredBy;
//!
//! impl Filter for PoweredBy {
//!     fn handle<'a>(
//!         &'a self,
//!         req: &'a mut Request,
//!         res: &'a mut Response,
//!         next: Next<'a>,
//!     ) -> BoxFuture<'a, Result<(), Error>> {
//!         res.set_header("x-powered-by", "sluice");
//!         next.run(req, res)
//!     }
//! }
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Error> {
//! let mut chain = FilterChain::new();
//! let filters: Vec<Arc<dyn Filter>> = vec![Arc::new(PoweredBy)];
//! chain.init(&FilterConfig::new("web"), filters)?;
//!
//! let hello = terminal_fn(|_req, res| Box::pin(async move {
//!     res.set_text("hello");
//!     Ok(())
//! }));
//!
//! let mut req = Request::new(Method::GET, "/hello");
//! let mut res = Response::new();
//! chain.handle(&mut req, &mut res, &hello).await?;
//! assert_eq!(res.header("x-powered-by"), Some("sluice"));
//!
//! chain.destroy()?;
//! # Ok(())
//! # }
//! ```

mod chain;
mod config;
mod error;
mod filter;
mod pattern;
mod request;
mod response;
mod terminal;

pub mod middleware;

pub use chain::FilterChain;
pub use config::FilterConfig;
pub use error::Error;
pub use filter::{BoxFuture, Filter, Next};
pub use pattern::UrlPattern;
pub use request::Request;
pub use response::{ContentType, Response};
pub use terminal::{Terminal, terminal_fn};
