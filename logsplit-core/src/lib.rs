//! Incremental boundary detection for log byte streams
//!
//! This crate decides where one log record ends and the next begins in an
//! arbitrarily chunked byte stream. A reader owns a growing buffer and calls
//! a strategy with the unconsumed bytes; the strategy either returns a record
//! plus the number of bytes it consumed, or asks for more data.
//!
//! # Strategies
//!
//! - [`NewlineSplit`]: records end at an encoded newline
//! - [`LineStartSplit`]: records begin at a pattern match
//! - [`LineEndSplit`]: records end at a pattern match
//! - [`NoSplit`]: raw fixed-size chunks for unencoded streams
//!
//! Every strategy applies a [`Trim`] policy to the records it emits.
//!
//! # Example
//!
//! ```rust
//! use logsplit_core::{NewlineSplit, Split, SplitFunc, Trim};
//!
//! let split = NewlineSplit::new(b"\n", b"\r", true, Trim::Both).unwrap();
//!
//! assert_eq!(split.split(b"first\r\nsecond", false), Split::token(7, b"first"));
//! assert_eq!(split.split(b"second", false), Split::Pending);
//! assert_eq!(split.split(b"second", true), Split::token(6, b"second"));
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod split;
pub mod trim;

pub use error::{CoreError, Result};
pub use split::{
    split_all, LineEndSplit, LineStartSplit, NewlineSplit, NoSplit, Split, SplitFunc, Strategy,
    Tokenize, MAX_EMPTY_TOKENS,
};
pub use trim::Trim;
