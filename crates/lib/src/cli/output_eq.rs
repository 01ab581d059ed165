/// Equality between what a solver returns and what it's expected to return.
///
/// Expectations are written as plain literals, while solvers return
/// whichever integer types suit them. This lets the literal take on the type
/// of the answer it's compared against.
pub trait OutputEq<Expected = Self>
where
    Expected: ?Sized,
{
    fn output_eq(&self, expected: &Expected) -> bool;
}

impl<A, B, X, Y> OutputEq<(X, Y)> for (A, B)
where
    A: OutputEq<X>,
    B: OutputEq<Y>,
{
    #[inline]
    fn output_eq(&self, (x, y): &(X, Y)) -> bool {
        self.0.output_eq(x) && self.1.output_eq(y)
    }
}

impl<A, X> OutputEq<Option<X>> for Option<A>
where
    A: OutputEq<X>,
{
    #[inline]
    fn output_eq(&self, expected: &Option<X>) -> bool {
        match (self, expected) {
            (Some(value), Some(expected)) => value.output_eq(expected),
            (value, expected) => value.is_none() && expected.is_none(),
        }
    }
}

macro_rules! integer {
    ($($ty:ty),* $(,)?) => {
        $(
            impl OutputEq for $ty {
                #[inline]
                fn output_eq(&self, expected: &$ty) -> bool {
                    self == expected
                }
            }
        )*
    };
}

integer!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);
