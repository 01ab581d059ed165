use core::fmt;

use crate::input::{IStr, IStrError};

/// Attach the position of `error` in `input` as context, formatted as
/// `path:line:col`.
///
/// The position comes from the first [IStrError] in the chain of causes, or
/// is the start of the input if there is none.
pub fn error_context<E>(path: &'static str, input: IStr, error: E) -> anyhow::Error
where
    anyhow::Error: From<E>,
{
    let error = anyhow::Error::from(error);

    let pos = error
        .chain()
        .find_map(|cause| cause.downcast_ref::<IStrError>())
        .map_or(LineCol::EMPTY, |e| {
            crate::env::pos_from(input.as_data(), e.span())
        });

    error.context(Position { path, pos })
}

/// A zero-based line together with a column range on it.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineCol {
    line: usize,
    start: usize,
    end: usize,
}

impl LineCol {
    pub(crate) const EMPTY: Self = Self::new(0, 0, 0);

    pub(crate) const fn new(line: usize, start: usize, end: usize) -> Self {
        Self { line, start, end }
    }
}

/// Lines are printed one-based, which is what editors expect.
impl fmt::Display for LineCol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.start)?;

        if self.end > self.start {
            write!(f, "-{}", self.end)?;
        }

        Ok(())
    }
}

#[derive(Debug)]
struct Position {
    path: &'static str,
    pos: LineCol,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.path, self.pos)
    }
}
