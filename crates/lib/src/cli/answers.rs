use core::fmt;
use std::io;

/// Callback receiving answers one at a time.
pub type Visitor<'a> = dyn FnMut(&dyn fmt::Display) -> io::Result<()> + 'a;

/// The answers a solver returns, printed in order.
pub trait Answers {
    fn visit(&self, visitor: &mut Visitor<'_>) -> io::Result<()>;
}

impl<A, B> Answers for (A, B)
where
    A: Answers,
    B: Answers,
{
    #[inline]
    fn visit(&self, visitor: &mut Visitor<'_>) -> io::Result<()> {
        self.0.visit(visitor)?;
        self.1.visit(visitor)
    }
}

/// A missing answer is printed as `-`.
impl<A> Answers for Option<A>
where
    A: Answers,
{
    #[inline]
    fn visit(&self, visitor: &mut Visitor<'_>) -> io::Result<()> {
        match self {
            Some(answer) => answer.visit(visitor),
            None => visitor(&"-"),
        }
    }
}

macro_rules! integer {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Answers for $ty {
                #[inline]
                fn visit(&self, visitor: &mut Visitor<'_>) -> io::Result<()> {
                    visitor(self)
                }
            }
        )*
    };
}

integer!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);
