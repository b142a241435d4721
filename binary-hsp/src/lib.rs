//! Wire primitives for the hsp protocol.
//!
//! Everything on the wire that is not a raw payload byte is a varint: seven
//! payload bits per byte, least significant group first, most significant bit
//! of every byte but the last set as a continuation marker. The [`varint`]
//! module covers both numeric use (type codes, payload lengths) and opaque
//! use (message id runs that are never interpreted as a machine integer).
#![no_std]

extern crate alloc;

pub mod varint;

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The input ended before a terminating byte, but the bound allows more.
    Incomplete,
    /// The run terminated but the value does not fit the allowed capacity.
    Overflow,
    /// The byte bound passed without a terminating byte. Carries the bound.
    TooLong(usize),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Error::*;
        match self {
            Incomplete => {
                write!(f, "varint run ended before its terminating byte")
            }
            Overflow => {
                write!(f, "varint does not fit the allowed integer capacity")
            }
            TooLong(max_bytes) => {
                write!(f, "varint run not terminated within `{}` bytes", max_bytes)
            }
        }
    }
}
