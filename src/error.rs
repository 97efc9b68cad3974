use std::io;
use std::string;

use thiserror::Error;

/// Error type for `nested_qs`.
///
/// Parsing never fails, so every variant here originates in the encoder.
#[derive(Debug, Error)]
pub enum Error {
    /// A mapping was reached a second time while it was still being
    /// stringified, i.e. it (indirectly) contains itself.
    #[error("cyclic reference: a mapping contains itself")]
    CyclicReference,

    /// The writer passed to `stringify_to_writer` failed.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// The output buffer was not valid UTF-8.
    #[error(transparent)]
    FromUtf8(#[from] string::FromUtf8Error),
}

impl Error {
    /// Returns `true` if this error was caused by a cyclic structure.
    pub fn is_cyclic(&self) -> bool {
        matches!(self, Error::CyclicReference)
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
