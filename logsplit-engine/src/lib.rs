//! Stream splitting for log readers
//!
//! This crate turns a byte source into log records. It resolves encodings,
//! selects a boundary strategy from a multiline policy, wraps it with idle
//! flushing and drives it with a buffered read loop.
//!
//! # Example
//!
//! ```rust
//! use logsplit_engine::LogProcessorBuilder;
//!
//! let processor = LogProcessorBuilder::new()
//!     .line_start_pattern(r"^\[")
//!     .build()
//!     .unwrap();
//!
//! let records = processor
//!     .process_text("[INFO] started\n[ERROR] failed\n  caused by: timeout\n")
//!     .unwrap();
//! assert_eq!(records, vec!["[INFO] started", "[ERROR] failed\n  caused by: timeout"]);
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod encoding;
pub mod error;
pub mod flusher;
pub mod input;
pub mod multiline;
pub mod processor;
pub mod scanner;
pub mod splitter;

// Re-export key types
pub use config::{ReaderConfig, DEFAULT_MAX_LOG_SIZE, DEFAULT_READ_SIZE};
pub use encoding::{lookup_encoding, Delimiters, Encoding, COMMON_ENCODINGS};
pub use error::{EngineError, Result};
pub use flusher::{Flusher, FlusherConfig, DEFAULT_FLUSH_PERIOD};
pub use input::Input;
pub use multiline::MultilineConfig;
pub use processor::{LogProcessor, LogProcessorBuilder, Output, ProcessingMetadata};
pub use scanner::{Record, Scanner};
pub use splitter::{Splitter, SplitterConfig};

// Re-export from core for convenience
pub use logsplit_core::{Split, SplitFunc, Strategy, Tokenize, Trim};
