//! The terminal handler at the end of every chain.
//!
//! # How terminals are passed in
//!
//! [`FilterChain::handle`](crate::FilterChain::handle) takes `&dyn Terminal`
//! so one chain can front any number of different handlers without being
//! generic over them. Two ways to get one:
//!
//! ```text
//! struct Dispatch;  impl Terminal for Dispatch { … }   ← named type
//!
//! terminal_fn(|req, res| Box::pin(async move { … }))   ← closure
//! ```
//!
//! The closure form needs [`terminal_fn`]: a bare closure has no signature
//! until something tells the compiler that its future borrows `req` and
//! `res` for the same lifetime. The helper's bound does exactly that and
//! returns the closure unchanged.

use crate::error::Error;
use crate::filter::BoxFuture;
use crate::request::Request;
use crate::response::Response;

/// The final request processor, invoked once every matching filter has
/// delegated onward.
pub trait Terminal: Send + Sync {
    fn call<'a>(&'a self, req: &'a mut Request, res: &'a mut Response) -> BoxFuture<'a, Result<(), Error>>;
}

impl<F> Terminal for F
where
    F: for<'a> Fn(&'a mut Request, &'a mut Response) -> BoxFuture<'a, Result<(), Error>> + Send + Sync,
{
    fn call<'a>(&'a self, req: &'a mut Request, res: &'a mut Response) -> BoxFuture<'a, Result<(), Error>> {
        (self)(req, res)
    }
}

/// Pins a closure to the [`Terminal`] signature.
///
/// ```rust
/// use sluice::terminal_fn;
///
/// let hello = terminal_fn(|_req, res| Box::pin(async move {
///     res.set_text("hello");
///     Ok(())
/// }));
/// ```
pub fn terminal_fn<F>(f: F) -> F
where
    F: for<'a> Fn(&'a mut Request, &'a mut Response) -> BoxFuture<'a, Result<(), Error>> + Send + Sync,
{
    f
}
