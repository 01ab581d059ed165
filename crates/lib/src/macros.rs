/// Implement [`FromInput`] for a type by converting from another parsed
/// value.
///
/// [`FromInput`]: crate::input::FromInput
///
/// ```
/// use lib::prelude::*;
///
/// struct Digits(u32);
///
/// lib::from_input! {
///     |value: &'static str| -> Digits {
///         Ok(Digits(value.bytes().filter(u8::is_ascii_digit).count() as u32))
///     }
/// }
///
/// let mut input = IStr::new(b"a1b22\n", lib::env::Size::ZERO);
/// let Digits(n) = input.line::<Digits>()?;
/// assert_eq!(n, 3);
/// # Ok::<_, lib::IStrError>(())
/// ```
#[macro_export]
macro_rules! from_input {
    (|$($value:ident)? $(($pat:pat))?: $ty:ty| -> $($rest:tt)*) => {
        $crate::from_input!(|[$($value)? $(($pat))?]: $ty| -> $($rest)*);
    };

    (|[$($pat:tt)*]: $ty:ty| -> $out:ident $block:block) => {
        impl $crate::input::FromInput for $out {
            fn try_from_input(
                p: &mut $crate::input::IStr,
            ) -> ::core::result::Result<Option<Self>, $crate::input::IStrError> {
                let start = *p;

                let Some(value) = p.try_next::<$ty>()? else {
                    return Ok(None);
                };

                let build = |$($pat)*: $ty| -> ::core::result::Result<$out, $crate::macro_support::Error> { $block };

                match build(value) {
                    Ok(output) => Ok(Some(output)),
                    Err(error) => {
                        // The error covers all input the value was parsed from.
                        let span = start.index()..p.index();
                        *p = start;

                        Err($crate::input::IStrError::new(
                            span,
                            $crate::input::ErrorKind::Boxed(error.into()),
                        ))
                    }
                }
            }
        }
    };
}

/// Declare the `main` function of a solver.
///
/// The solver is a function taking the loaded [`IStr`] input and returning
/// its answers. `labels` name the answers in order when they're printed, and
/// `expect` is what the answers must be for the default input.
///
/// [`IStr`]: crate::input::IStr
///
/// ```no_run
/// use lib::prelude::*;
///
/// lib::entry!(solve, input = "d01.txt", labels = ["first", "second"], expect = (1, 2));
///
/// fn solve(mut input: IStr) -> Result<(u32, u32)> {
///     Ok((input.next()?, input.next()?))
/// }
/// ```
#[macro_export]
macro_rules! entry {
    (
        $solve:path,
        input = $input:literal
        $(, labels = [$($label:literal),* $(,)?])?,
        expect = $expect:expr
        $(,)?
    ) => {
        fn main() -> $crate::prelude::Result<()> {
            let opts = $crate::cli::Opts::parse()?;
            let (input, path) = $crate::input!($input, opts);
            let labels: &[&str] = &[$($($label),*)?];
            $crate::cli::run(&opts, path, input, labels, Some($expect), $solve)
        }
    };
}
