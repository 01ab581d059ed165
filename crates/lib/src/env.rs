//! Loading of puzzle input.

use core::fmt;
use core::ops::Range;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::cli::error::LineCol;
use crate::input::{IStr, NL};

/// A byte offset into the loaded input.
#[repr(transparent)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Size(usize);

impl Size {
    pub const ZERO: Self = Self(0);

    #[inline]
    pub(crate) fn new(n: usize) -> Self {
        Self(n)
    }

    #[inline]
    pub(crate) fn saturating_add(self, other: Size) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

/// Translate a span of `data` into a line and columns.
///
/// A span covering multiple lines is cut short at the end of the first one.
pub(crate) fn pos_from(data: &[u8], span: Range<Size>) -> LineCol {
    let Range { start, end } = span;

    let Some(before) = data.get(..start.0) else {
        return LineCol::EMPTY;
    };

    let line = memchr::memchr_iter(NL, before).count();
    let line_start = memchr::memrchr(NL, before).map_or(0, |at| at + 1);
    let col = start.0 - line_start;

    let len = data
        .get(start.0..end.0)
        .map_or(0, |span| memchr::memchr(NL, span).unwrap_or(span.len()));

    LineCol::new(line, col, col + len)
}

/// Failure to load an input file.
#[derive(Debug)]
pub struct ReadError {
    path: PathBuf,
    error: io::Error,
}

impl ReadError {
    /// The path which failed to load.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl fmt::Display for ReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: failed to read input: {}", self.path.display(), self.error)
    }
}

impl std::error::Error for ReadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

/// Load input into `storage`.
///
/// `name` is how the default input at `default_path` is referred to in
/// errors. If `override_path` is set it's loaded instead and names itself.
pub fn input(
    name: &'static str,
    default_path: &str,
    override_path: Option<&Path>,
    storage: &'static mut Vec<u8>,
) -> Result<(IStr, &'static str), ReadError> {
    let (path, name) = match override_path {
        Some(path) => {
            // Leaked once per process, like the input itself.
            let name: &'static str = Box::leak(path.display().to_string().into_boxed_str());
            (path, name)
        }
        None => (Path::new(default_path), name),
    };

    *storage = read(path)?;
    let data: &'static Vec<u8> = storage;
    Ok((IStr::new(data, Size::ZERO), name))
}

fn read(path: &Path) -> Result<Vec<u8>, ReadError> {
    fs::read(path).map_err(|error| ReadError {
        path: path.to_owned(),
        error,
    })
}

/// Load the input file `inputs/<name>` of the calling package, or the one
/// given with `--input`.
///
/// The input is kept in static storage, which saves us from threading
/// lifetimes through every solver. It is only freed when the process exits.
#[macro_export]
macro_rules! input {
    ($name:literal, $opts:expr) => {{
        static mut STORAGE: Vec<u8> = Vec::new();

        $crate::env::input(
            concat!("inputs/", $name),
            concat!(env!("CARGO_MANIFEST_DIR"), "/inputs/", $name),
            $opts.input_path(),
            // SAFETY: the macro expands once per `main`, which runs once.
            unsafe { &mut *core::ptr::addr_of_mut!(STORAGE) },
        )?
    }};
}
