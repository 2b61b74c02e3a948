use std::{ffi::NulError, io};

use thiserror::Error;
use widestring::error::ContainsNul;

/// Error enum for errors while resolving a path name.
#[derive(Debug, Error)]
pub enum PathNameError {
    /// Variant representing an illegal interior nul value in a wide path.
    #[error("interior nul found")]
    Nul(#[from] ContainsNul<u16>),
    /// Variant representing an illegal interior nul value in a narrow path.
    #[error("interior nul found")]
    AnsiNul(#[from] NulError),
    /// Variant representing a windows api error.
    #[error("io error: {}", _0)]
    Io(#[from] io::Error),
}

impl PathNameError {
    /// Returns the underlying io error if this error originated from the operating system.
    #[must_use]
    pub fn as_io(&self) -> Option<&io::Error> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }

    /// Returns the [`io::ErrorKind`] this error corresponds to.
    ///
    /// Interior nul errors are reported as [`io::ErrorKind::InvalidInput`].
    #[must_use]
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            Self::Nul(_) | Self::AnsiNul(_) => io::ErrorKind::InvalidInput,
            Self::Io(err) => err.kind(),
        }
    }
}

impl From<PathNameError> for io::Error {
    fn from(err: PathNameError) -> Self {
        match err {
            PathNameError::Io(err) => err,
            err => io::Error::new(io::ErrorKind::InvalidInput, err),
        }
    }
}

#[cfg(test)]
mod tests {
    use widestring::U16CString;

    use super::*;

    #[test]
    fn nul_error_converts_to_invalid_input() {
        let err: PathNameError = U16CString::from_str("a\0b").unwrap_err().into();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        assert!(err.as_io().is_none());

        let io_err: io::Error = err.into();
        assert_eq!(io_err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn io_error_is_passed_through() {
        let err = PathNameError::from(io::Error::from_raw_os_error(3));
        assert_eq!(err.kind(), io::ErrorKind::NotFound);

        let io_err: io::Error = err.into();
        assert_eq!(io_err.raw_os_error(), Some(3));
    }
}
