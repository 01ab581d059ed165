use core::fmt;
use core::ops::Range;

use crate::env::Size;

/// Error raised by a custom parser, see [`crate::from_input!`].
pub type BoxedError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug)]
#[non_exhaustive]
pub enum ErrorKind {
    NotInteger(&'static str),
    NotUtf8,
    ExpectedLine,
    ExpectedTuple(usize),
    UnexpectedEof,
    Boxed(BoxedError),
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::NotInteger(word) => write!(f, "not an integer or integer overflow `{word}`"),
            ErrorKind::NotUtf8 => write!(f, "not utf-8"),
            ErrorKind::ExpectedLine => write!(f, "expected line"),
            ErrorKind::ExpectedTuple(len) => write!(f, "expected tuple of length `{len}`"),
            ErrorKind::UnexpectedEof => write!(f, "unexpected eof"),
            ErrorKind::Boxed(error) => error.fmt(f),
        }
    }
}

/// An error at a span of the loaded input.
#[derive(Debug)]
pub struct IStrError {
    span: Range<Size>,
    kind: ErrorKind,
}

impl IStrError {
    #[inline]
    pub fn new(span: Range<Size>, kind: ErrorKind) -> Self {
        Self { span, kind }
    }

    #[inline]
    pub fn span(&self) -> Range<Size> {
        self.span.clone()
    }

    #[inline]
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }
}

impl fmt::Display for IStrError {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.kind.fmt(f)
    }
}

impl std::error::Error for IStrError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            // The boxed error is displayed in place, so skip over it.
            ErrorKind::Boxed(error) => error.source(),
            _ => None,
        }
    }
}
