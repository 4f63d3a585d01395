use derive_more::derive::{Display, Error};

/// A specialized `Result` where the error is this crate's `Error` type.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Define a unified error type for this crate.
#[derive(Debug, Display, Error)]
pub enum Error {
    // `#[error(not(source))]` below tells `derive_more` that `embassy_executor::SpawnError` does
    // not implement Rust's `core::error::Error` trait.
    #[cfg(any(feature = "pico1", feature = "pico2"))]
    #[display("{_0:?}")]
    TaskSpawn(#[error(not(source))] embassy_executor::SpawnError),

    #[display("Text is longer than the panel's 3 digits")]
    TextTooLong,

    #[display("No glyph for character {_0:?}")]
    UnsupportedCharacter(#[error(not(source))] char),
}

#[cfg(any(feature = "pico1", feature = "pico2"))]
impl From<embassy_executor::SpawnError> for Error {
    fn from(err: embassy_executor::SpawnError) -> Self {
        Self::TaskSpawn(err)
    }
}
