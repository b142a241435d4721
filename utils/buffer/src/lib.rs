//! Buffer plumbing for the hsp codec.
//!
//! [`ByteCursor`] accumulates a connection's received bytes and hands them to
//! the decoder through non blocking, peekable reads. Payloads leave it as
//! [`Slice`] values: zero copy views that share the cursor's storage and keep
//! it alive through a reference count until every holder has released.
#![no_std]

extern crate alloc;

mod cursor;
mod slice;

pub use cursor::ByteCursor;
pub use slice::{ReleaseError, SharedState, Slice};
