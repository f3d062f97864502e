/*!
Errors returned before any scanning begins.

Matching itself never fails. Every error here is detected up-front, and when one is
returned the caller's results are left untouched.
*/

use std::{error, fmt};

use crate::Algorithm;

/**
The outcome of a matching call, as a stable numeric code.

These codes are shared with the C ABI in [`crate::ffi`].
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum Status {
    Ok = 0,
    BadArgs = 1,
    UnsupportedAlgorithm = 2,
    UnknownAlgorithm = 3,
}

impl Status {
    #[inline]
    pub fn code(self) -> i32 {
        self as i32
    }
}

/**
An error detected while validating the inputs to a matching call.
*/
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /**
    A required input was missing or malformed.
    */
    BadArgs(BadArgs),
    /**
    The requested algorithm isn't available in this build or on this CPU.

    Callers should fall back to [`Algorithm::Scalar`] or [`Algorithm::TeddyBaseline`].
    */
    UnsupportedAlgorithm(Algorithm),
    /**
    The algorithm selector didn't name a known algorithm.
    */
    UnknownAlgorithm(UnknownAlgorithm),
}

/**
The specific precondition that a call violated.
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadArgs {
    NoKeys,
    TooManyKeys,
    EmptyKey { key_id: usize },
    NullInput,
    NullKeys,
    NullKey { key_id: usize },
    NullOutput,
}

/**
An algorithm selector that couldn't be resolved.
*/
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnknownAlgorithm {
    Code(u32),
    Name(String),
}

impl Error {
    /**
    The status code that corresponds to this error.
    */
    #[inline]
    pub fn status(&self) -> Status {
        match self {
            Error::BadArgs(_) => Status::BadArgs,
            Error::UnsupportedAlgorithm(_) => Status::UnsupportedAlgorithm,
            Error::UnknownAlgorithm(_) => Status::UnknownAlgorithm,
        }
    }
}

impl From<BadArgs> for Error {
    #[inline]
    fn from(err: BadArgs) -> Self {
        Error::BadArgs(err)
    }
}

impl error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::BadArgs(err) => write!(f, "bad arguments: {}", err),
            Error::UnsupportedAlgorithm(algorithm) => write!(
                f,
                "the `{}` algorithm is not supported by this build or CPU",
                algorithm
            ),
            Error::UnknownAlgorithm(UnknownAlgorithm::Code(code)) => {
                write!(f, "unknown algorithm selector `{}`", code)
            }
            Error::UnknownAlgorithm(UnknownAlgorithm::Name(name)) => {
                write!(f, "unknown algorithm `{}`", name)
            }
        }
    }
}

impl fmt::Display for BadArgs {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BadArgs::NoKeys => f.write_str("the key list is empty"),
            BadArgs::TooManyKeys => f.write_str("the key list has too many keys"),
            BadArgs::EmptyKey { key_id } => write!(f, "key {} is empty", key_id),
            BadArgs::NullInput => f.write_str("the input buffer is null but has a non-zero length"),
            BadArgs::NullKeys => f.write_str("the key list is null"),
            BadArgs::NullKey { key_id } => write!(f, "key {} is null", key_id),
            BadArgs::NullOutput => f.write_str("the result buffer is null"),
        }
    }
}
