//! Support library for the solvers: input parsing, loading and the command
//! line every solver shares.

pub mod cli;
pub mod env;
pub mod input;
mod macros;

pub use self::input::{FromInput, IStr, IStrError};

#[doc(hidden)]
pub mod macro_support {
    pub use anyhow::Error;
}

pub mod prelude {
    //! Imports used by most solvers.
    pub use crate::input::{IStr, Split, W};
    pub use anyhow::{anyhow, bail, ensure, Context, Result};
    pub use bstr::{BStr, BString, ByteSlice};
}
