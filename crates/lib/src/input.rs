//! Parsing of puzzle input.
//!
//! Input is consumed through an [IStr] cursor. The cursor remembers where it
//! is in the loaded input, so errors can later be mapped to a line and
//! column.

mod error;
mod iter;

use core::ops::Range;
use std::str;

use bstr::BStr;

pub use self::error::{BoxedError, ErrorKind, IStrError};
pub use self::iter::Lines;

use crate::env::Size;

type Result<T, E = IStrError> = core::result::Result<T, E>;

pub(crate) const NL: u8 = b'\n';
const CR: u8 = b'\r';

/// A cursor over loaded input.
#[derive(Debug, Clone, Copy)]
pub struct IStr {
    data: &'static [u8],
    /// Offset of `data` in the loaded input.
    index: Size,
}

impl IStr {
    #[inline]
    pub fn new(data: &'static [u8], index: Size) -> Self {
        Self { data, index }
    }

    /// Offset of the cursor in the loaded input.
    #[inline]
    pub fn index(&self) -> Size {
        self.index
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// The bytes which have not been consumed yet.
    #[inline]
    pub fn as_data(&self) -> &'static [u8] {
        self.data
    }

    /// Construct an error covering `range`, which is relative to the start
    /// of this cursor.
    pub fn error<E>(&self, range: Range<usize>, error: E) -> IStrError
    where
        E: Into<BoxedError>,
    {
        let start = self.index.saturating_add(Size::new(range.start));
        let end = self.index.saturating_add(Size::new(range.end));
        IStrError::new(start..end, ErrorKind::Boxed(error.into()))
    }

    /// Iterate over the remaining lines, parsing each as `T`.
    #[inline]
    pub fn lines<T>(&mut self) -> Lines<'_, T> {
        Lines::new(self)
    }

    /// Parse a `T`, erroring if the input is exhausted.
    #[inline]
    #[allow(clippy::should_implement_trait)]
    pub fn next<T>(&mut self) -> Result<T>
    where
        T: FromInput,
    {
        T::from_input(self)
    }

    /// Parse a `T`, returning `None` if the input is exhausted.
    #[inline]
    pub fn try_next<T>(&mut self) -> Result<Option<T>>
    where
        T: FromInput,
    {
        T::try_from_input(self)
    }

    /// Parse the next line as `T`, erroring if there are no more lines.
    pub fn line<T>(&mut self) -> Result<T>
    where
        T: FromInput,
    {
        let start = self.index;

        match self.try_line()? {
            Some(value) => Ok(value),
            None => Err(IStrError::new(start..self.index, ErrorKind::ExpectedLine)),
        }
    }

    /// Parse the next line as `T`, or `None` if there are no more lines.
    ///
    /// The line ending, including a carriage return before it, is not part
    /// of the line.
    pub fn try_line<T>(&mut self) -> Result<Option<T>>
    where
        T: FromInput,
    {
        let Some(mut line) = self.take_until(NL) else {
            return Ok(None);
        };

        if let [rest @ .., CR] = line.data {
            line.data = rest;
        }

        line.try_next()
    }

    /// Parse the next whitespace-delimited word as `T`, together with the
    /// offset where the word starts.
    pub fn try_next_word<T>(&mut self) -> Result<Option<(Size, T)>>
    where
        T: FromInput,
    {
        let start = self.count_while(0, u8::is_ascii_whitespace);
        let end = start + self.count_while(start, |b| !b.is_ascii_whitespace());

        let Some(data) = self.data.get(start..end).filter(|d| !d.is_empty()) else {
            return Ok(None);
        };

        let mut word = IStr::new(data, self.index.saturating_add(Size::new(start)));

        let Some(value) = T::try_from_input(&mut word)? else {
            return Ok(None);
        };

        self.skip(end);
        Ok(Some((Size::new(start), value)))
    }

    /// Take everything up to the next `byte` and step over it. Takes the
    /// rest of the input if there's no `byte` left.
    fn take_until(&mut self, byte: u8) -> Option<IStr> {
        if self.data.is_empty() {
            return None;
        }

        let Some(at) = memchr::memchr(byte, self.data) else {
            let rest = *self;
            self.skip(self.data.len());
            return Some(rest);
        };

        let (head, _) = self.data.split_at(at);
        let head = IStr::new(head, self.index);
        self.skip(at + 1);
        Some(head)
    }

    fn count_while(&self, from: usize, predicate: impl Fn(&u8) -> bool) -> usize {
        self.data
            .get(from..)
            .map_or(0, |data| data.iter().take_while(|&b| predicate(b)).count())
    }

    #[inline]
    fn skip(&mut self, n: usize) {
        self.data = self.data.get(n..).unwrap_or_default();
        self.index = self.index.saturating_add(Size::new(n));
    }
}

/// Chunks of input separated by a byte, see [Split].
struct Splits<'a> {
    input: &'a mut IStr,
    byte: u8,
}

impl Iterator for Splits<'_> {
    type Item = IStr;

    #[inline]
    fn next(&mut self) -> Option<IStr> {
        self.input.take_until(self.byte)
    }
}

/// A value that can be parsed from input.
pub trait FromInput: Sized {
    /// What to report when the input is exhausted.
    #[inline]
    fn error_kind() -> ErrorKind {
        ErrorKind::UnexpectedEof
    }

    /// Parse a value, or `None` if the input is exhausted.
    fn try_from_input(p: &mut IStr) -> Result<Option<Self>>;

    #[inline]
    fn from_input(p: &mut IStr) -> Result<Self> {
        let start = p.index;

        match Self::try_from_input(p)? {
            Some(value) => Ok(value),
            None => Err(IStrError::new(start..p.index, Self::error_kind())),
        }
    }
}

/// A value that can be parsed from a sequence of chunks, see [Split].
pub trait FromInputIter: Sized {
    /// Parse from the given chunks, or `None` if they run out.
    fn from_input_iter<I>(inputs: I) -> Result<Option<Self>>
    where
        I: Iterator<Item = IStr>;
}

macro_rules! tuple {
    ($len:literal => $($ty:ident $var:ident),+) => {
        impl<$($ty,)+> FromInput for ($($ty,)+)
        where
            $($ty: FromInput,)+
        {
            #[inline]
            fn error_kind() -> ErrorKind {
                ErrorKind::ExpectedTuple($len)
            }

            #[inline]
            fn try_from_input(p: &mut IStr) -> Result<Option<Self>> {
                $(
                    let Some($var) = p.try_next::<$ty>()? else {
                        return Ok(None);
                    };
                )+

                Ok(Some(($($var,)+)))
            }
        }

        /// Each element is parsed from its own chunk.
        impl<$($ty,)+> FromInputIter for ($($ty,)+)
        where
            $($ty: FromInput,)+
        {
            #[inline]
            fn from_input_iter<I>(mut inputs: I) -> Result<Option<Self>>
            where
                I: Iterator<Item = IStr>,
            {
                $(
                    let Some(mut chunk) = inputs.next() else {
                        return Ok(None);
                    };

                    let Some($var) = chunk.try_next::<$ty>()? else {
                        return Ok(None);
                    };
                )+

                Ok(Some(($($var,)+)))
            }
        }
    };
}

tuple!(2 => A a, B b);
tuple!(3 => A a, B b, C c);

macro_rules! integer {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FromInput for $ty {
                #[inline]
                fn try_from_input(p: &mut IStr) -> Result<Option<Self>> {
                    let index = p.index;

                    let Some((offset, word)) = p.try_next_word::<&'static str>()? else {
                        return Ok(None);
                    };

                    match word.parse() {
                        Ok(n) => Ok(Some(n)),
                        Err(..) => {
                            let start = index.saturating_add(offset);
                            Err(IStrError::new(start..p.index, ErrorKind::NotInteger(word)))
                        }
                    }
                }
            }
        )*
    };
}

integer!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

/// The rest of the input as a cursor of its own.
impl FromInput for IStr {
    #[inline]
    fn try_from_input(p: &mut IStr) -> Result<Option<Self>> {
        let rest = *p;
        p.skip(p.data.len());
        Ok(Some(rest))
    }
}

impl FromInput for &'static [u8] {
    #[inline]
    fn try_from_input(p: &mut IStr) -> Result<Option<Self>> {
        let data = p.data;
        p.skip(data.len());
        Ok(Some(data))
    }
}

impl FromInput for &'static str {
    #[inline]
    fn try_from_input(p: &mut IStr) -> Result<Option<Self>> {
        let start = p.index;
        let data = p.next::<&[u8]>()?;

        match str::from_utf8(data) {
            Ok(string) => Ok(Some(string)),
            Err(..) => Err(IStrError::new(start..p.index, ErrorKind::NotUtf8)),
        }
    }
}

impl FromInput for &'static BStr {
    #[inline]
    fn try_from_input(p: &mut IStr) -> Result<Option<Self>> {
        Ok(Some(BStr::new(p.next::<&[u8]>()?)))
    }
}

/// Parses elements until the input is exhausted.
impl<T> FromInput for Vec<T>
where
    T: FromInput,
{
    #[inline]
    fn try_from_input(p: &mut IStr) -> Result<Option<Self>> {
        let mut output = Vec::new();

        while let Some(element) = p.try_next::<T>()? {
            output.push(element);
        }

        Ok(Some(output))
    }
}

/// Split on the character `D`, parsing the chunks into `T`.
///
/// Each element gets the chunk up to the next `D` or the end of input. Input
/// after the last element's chunk is left as is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Split<const D: char, T>(pub T);

impl<const D: char, T> FromInput for Split<D, T>
where
    T: FromInputIter,
{
    #[inline]
    fn try_from_input(p: &mut IStr) -> Result<Option<Self>> {
        let chunks = Splits {
            input: p,
            byte: D as u8,
        };

        Ok(T::from_input_iter(chunks)?.map(Self))
    }
}

/// Parse nothing, see [W].
#[non_exhaustive]
pub struct Skip;

impl FromInput for Skip {
    #[inline]
    fn try_from_input(_: &mut IStr) -> Result<Option<Self>> {
        Ok(Some(Self))
    }
}

/// A single whitespace-delimited word, parsed as `T`.
pub struct W<T = Skip>(pub T);

impl<T> FromInput for W<T>
where
    T: FromInput,
{
    #[inline]
    fn try_from_input(p: &mut IStr) -> Result<Option<Self>> {
        Ok(p.try_next_word::<T>()?.map(|(_, value)| Self(value)))
    }
}
