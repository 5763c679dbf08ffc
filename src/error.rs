use derive_more::derive::{Display, Error};

/// A specialized `Result` where the error is this crate's `Error` type.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Define a unified error type for this crate.
#[derive(Debug, Display, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// A display sink could not push a frame to its LEDs.
    #[display("Display sink failed to write frame")]
    SinkWrite,

    /// Writing a host preview image failed.
    #[cfg(feature = "host")]
    #[display("Preview image could not be written: {_0}")]
    Preview(#[error(not(source))] PreviewFailure),
}

/// Why a host preview image could not be written.
#[cfg(feature = "host")]
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PreviewFailure {
    /// Creating the file or its parent directory failed.
    #[display("file I/O")]
    Io,
    /// The PNG encoder rejected the image.
    #[display("PNG encoding")]
    Encoding,
}

#[cfg(feature = "host")]
impl From<std::io::Error> for Error {
    fn from(_: std::io::Error) -> Self {
        Self::Preview(PreviewFailure::Io)
    }
}

#[cfg(feature = "host")]
impl From<png::EncodingError> for Error {
    fn from(err: png::EncodingError) -> Self {
        match err {
            png::EncodingError::IoError(_) => Self::Preview(PreviewFailure::Io),
            _ => Self::Preview(PreviewFailure::Encoding),
        }
    }
}
