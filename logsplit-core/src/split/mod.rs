//! Boundary strategies
//!
//! Each strategy is an incremental tokenizer: given the not-yet-consumed bytes
//! of a stream and whether the stream has ended, it either reports a record
//! and how many leading bytes it consumed, or asks for more data. Strategies
//! borrow the buffer, never own or grow it, and keep no state between calls.

mod newline;
mod no_split;
mod pattern;

pub use newline::NewlineSplit;
pub use no_split::NoSplit;
pub use pattern::{LineEndSplit, LineStartSplit};

/// Outcome of a single tokenizer call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Split<'a> {
    /// Not enough data to decide a boundary; re-invoke with a larger buffer
    Pending,
    /// A record was found
    Token {
        /// Number of leading bytes of the buffer consumed by this record
        advance: usize,
        /// The trimmed record payload, borrowed from the buffer
        token: &'a [u8],
    },
}

impl<'a> Split<'a> {
    /// Token constructor
    pub fn token(advance: usize, token: &'a [u8]) -> Self {
        Split::Token { advance, token }
    }

    /// Whether this outcome asks for more data
    pub fn is_pending(&self) -> bool {
        matches!(self, Split::Pending)
    }

    /// The emitted token, if any
    pub fn as_token(&self) -> Option<&'a [u8]> {
        match self {
            Split::Token { token, .. } => Some(token),
            Split::Pending => None,
        }
    }

    /// The advance count; zero when pending
    pub fn advance(&self) -> usize {
        match self {
            Split::Token { advance, .. } => *advance,
            Split::Pending => 0,
        }
    }
}

/// A pure boundary-detection function over a byte buffer
///
/// Implementations must be deterministic: identical `(data, at_eof)` inputs
/// give identical outputs. They are safe to share across threads.
pub trait SplitFunc: Send + Sync {
    /// Find the next record in `data`
    ///
    /// `at_eof` is true only once the source is exhausted and no further
    /// bytes will ever arrive.
    fn split<'a>(&self, data: &'a [u8], at_eof: bool) -> Split<'a>;

    /// Human-readable strategy name
    fn name(&self) -> &'static str;
}

/// A tokenizer driven by a read loop
///
/// Unlike [`SplitFunc`] this may keep per-stream state, such as the idle
/// timer of a flush wrapper.
pub trait Tokenize {
    /// Find the next record in `data`
    fn tokenize<'a>(&mut self, data: &'a [u8], at_eof: bool) -> Split<'a>;
}

/// The strategy selected for a stream
#[derive(Debug, Clone)]
pub enum Strategy {
    /// Raw fixed-size chunking
    NoSplit(NoSplit),
    /// Records end at an encoded newline
    Newline(NewlineSplit),
    /// Records begin at a pattern match
    LineStart(LineStartSplit),
    /// Records end at a pattern match
    LineEnd(LineEndSplit),
}

impl SplitFunc for Strategy {
    fn split<'a>(&self, data: &'a [u8], at_eof: bool) -> Split<'a> {
        match self {
            Strategy::NoSplit(s) => s.split(data, at_eof),
            Strategy::Newline(s) => s.split(data, at_eof),
            Strategy::LineStart(s) => s.split(data, at_eof),
            Strategy::LineEnd(s) => s.split(data, at_eof),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Strategy::NoSplit(s) => s.name(),
            Strategy::Newline(s) => s.name(),
            Strategy::LineStart(s) => s.name(),
            Strategy::LineEnd(s) => s.name(),
        }
    }
}

impl Tokenize for Strategy {
    fn tokenize<'a>(&mut self, data: &'a [u8], at_eof: bool) -> Split<'a> {
        self.split(data, at_eof)
    }
}

impl From<NoSplit> for Strategy {
    fn from(s: NoSplit) -> Self {
        Strategy::NoSplit(s)
    }
}

impl From<NewlineSplit> for Strategy {
    fn from(s: NewlineSplit) -> Self {
        Strategy::Newline(s)
    }
}

impl From<LineStartSplit> for Strategy {
    fn from(s: LineStartSplit) -> Self {
        Strategy::LineStart(s)
    }
}

impl From<LineEndSplit> for Strategy {
    fn from(s: LineEndSplit) -> Self {
        Strategy::LineEnd(s)
    }
}

/// Flush the whole buffer when the stream ended and flushing is enabled
#[inline]
pub(crate) fn flush_remaining<'a>(
    data: &'a [u8],
    at_eof: bool,
    flush_at_eof: bool,
    trim: crate::Trim,
) -> Split<'a> {
    if !data.is_empty() && at_eof && flush_at_eof {
        return Split::token(data.len(), trim.apply(data));
    }
    Split::Pending
}

/// Run a tokenizer over a complete in-memory input
///
/// Feeds the whole input as if it had arrived in a single read, drains every
/// record available before the end of the stream, then repeats the
/// end-of-stream call until the tokenizer stops producing records. Intended
/// for tests and small inputs.
pub fn split_all<T: Tokenize>(tokenizer: &mut T, input: &[u8]) -> Vec<Vec<u8>> {
    let mut records = Vec::new();
    let mut rest = input;

    for at_eof in [false, true] {
        let mut stalled = 0;
        loop {
            match tokenizer.tokenize(rest, at_eof) {
                Split::Pending => break,
                Split::Token { advance, token } => {
                    records.push(token.to_vec());
                    if advance == 0 {
                        stalled += 1;
                        if stalled > MAX_EMPTY_TOKENS {
                            return records;
                        }
                    } else {
                        stalled = 0;
                    }
                    rest = &rest[advance.min(rest.len())..];
                }
            }
        }
    }

    records
}

/// Consecutive zero-advance tokens tolerated before a read loop gives up
pub const MAX_EMPTY_TOKENS: usize = 100;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Trim;

    #[test]
    fn test_split_accessors() {
        let pending = Split::Pending;
        assert!(pending.is_pending());
        assert_eq!(pending.as_token(), None);
        assert_eq!(pending.advance(), 0);

        let token = Split::token(4, b"abc");
        assert!(!token.is_pending());
        assert_eq!(token.as_token(), Some(&b"abc"[..]));
        assert_eq!(token.advance(), 4);
    }

    #[test]
    fn test_flush_remaining() {
        assert_eq!(
            flush_remaining(b" a ", true, true, Trim::Both),
            Split::token(3, b"a")
        );
        assert!(flush_remaining(b" a ", false, true, Trim::Both).is_pending());
        assert!(flush_remaining(b" a ", true, false, Trim::Both).is_pending());
        assert!(flush_remaining(b"", true, true, Trim::Both).is_pending());
    }

    #[test]
    fn test_strategy_dispatch() {
        let mut strategy: Strategy = NewlineSplit::new(b"\n", b"\r", true, Trim::Both)
            .unwrap()
            .into();
        assert_eq!(strategy.name(), "newline");
        assert_eq!(strategy.split(b"a\nb", false), Split::token(2, b"a"));
        assert_eq!(strategy.tokenize(b"a\nb", false), Split::token(2, b"a"));

        let strategy: Strategy = NoSplit::new(4).unwrap().into();
        assert_eq!(strategy.name(), "no_split");
    }

    #[test]
    fn test_split_all() {
        let mut strategy: Strategy = NewlineSplit::new(b"\n", b"\r", true, Trim::Both)
            .unwrap()
            .into();
        let records = split_all(&mut strategy, b"one\ntwo\r\nthree");
        assert_eq!(records, vec![b"one".to_vec(), b"two".to_vec(), b"three".to_vec()]);
    }
}
