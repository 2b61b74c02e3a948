use std::{
    ffi::{OsStr, OsString},
    io,
    path::{Path, PathBuf},
    ptr,
};

use tracing::instrument;
use widestring::{U16CStr, U16CString, U16Str};

use crate::{
    buffer::{capacity_of, clear_last_error, fill_buffer, BufferFill},
    error::PathNameError,
    sys::{self, LPWSTR},
};

/// The absolute form of a path as returned by `GetFullPathNameW`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FullPathName {
    path: PathBuf,
    file_part: Option<OsString>,
}

impl FullPathName {
    /// Returns the absolute path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the final component of the path.
    ///
    /// This is `None` if the path ends in a separator.
    #[must_use]
    pub fn file_part(&self) -> Option<&OsStr> {
        self.file_part.as_deref()
    }

    /// Consumes this instance and returns the absolute path.
    #[must_use]
    pub fn into_path_buf(self) -> PathBuf {
        self.path
    }
}

impl AsRef<Path> for FullPathName {
    fn as_ref(&self) -> &Path {
        self.path()
    }
}

impl From<FullPathName> for PathBuf {
    fn from(full: FullPathName) -> Self {
        full.into_path_buf()
    }
}

/// Retrieves the absolute form of the given path.
///
/// Relative paths are resolved against the current directory and `.`/`..` components are
/// collapsed. The path does not have to exist.
pub fn full_path_name(path: impl AsRef<Path>) -> Result<FullPathName, PathNameError> {
    let path = U16CString::from_os_str(path.as_ref())?;
    Ok(full_path_name_wstr(&path)?)
}

#[instrument(
    level = "debug",
    err(level = "debug"),
    skip_all,
    fields(path = %path.to_string_lossy())
)]
pub(crate) fn full_path_name_wstr(path: &U16CStr) -> io::Result<FullPathName> {
    let mut file_part_offset = None;
    let buf = fill_buffer(|buf_ptr: *mut u16, capacity| {
        let mut file_part: LPWSTR = ptr::null_mut();
        clear_last_error();
        let ret = unsafe {
            sys::GetFullPathNameW(path.as_ptr(), capacity as _, buf_ptr, &mut file_part)
        };
        let fill = BufferFill::from_return(ret, capacity)?;
        file_part_offset = if file_part.is_null() {
            None
        } else {
            Some(unsafe { file_part.offset_from(buf_ptr) } as usize)
        };
        Ok(fill)
    })?;

    let file_part = file_part_offset
        .filter(|&offset| offset < buf.len())
        .map(|offset| U16Str::from_slice(&buf[offset..]).to_os_string());
    Ok(FullPathName {
        path: U16Str::from_slice(&buf).to_os_string().into(),
        file_part,
    })
}

/// Calls `GetFullPathNameW` with a caller supplied buffer.
///
/// On [`BufferFill::Written`] the buffer contains the nul-terminated absolute path.
pub fn full_path_name_into(path: &U16CStr, buf: &mut [u16]) -> io::Result<BufferFill> {
    let (capacity, len) = capacity_of(buf);
    clear_last_error();
    let ret = unsafe {
        sys::GetFullPathNameW(path.as_ptr(), capacity, buf.as_mut_ptr(), ptr::null_mut())
    };
    BufferFill::from_return(ret, len)
}

#[cfg(feature = "ansi")]
mod ansi {
    use std::{
        ffi::{c_char, CStr, CString},
        io, ptr,
    };

    use tracing::instrument;

    use crate::{
        buffer::{capacity_of, clear_last_error, fill_buffer, BufferFill},
        error::PathNameError,
        sys::{self, LPSTR},
    };

    /// The absolute form of a path as returned by `GetFullPathNameA`.
    ///
    /// The path is encoded in the active code page of the process.
    #[derive(Debug, Clone, PartialEq, Eq, Hash)]
    pub struct AnsiFullPathName {
        path: CString,
        file_part_offset: Option<usize>,
    }

    impl AnsiFullPathName {
        /// Returns the absolute path.
        #[must_use]
        pub fn path(&self) -> &CStr {
            &self.path
        }

        /// Returns the final component of the path.
        ///
        /// This is `None` if the path ends in a separator.
        #[must_use]
        pub fn file_part(&self) -> Option<&CStr> {
            let offset = self.file_part_offset?;
            CStr::from_bytes_with_nul(&self.path.as_bytes_with_nul()[offset..]).ok()
        }

        /// Consumes this instance and returns the absolute path.
        #[must_use]
        pub fn into_c_string(self) -> CString {
            self.path
        }
    }

    /// Narrow variant of [`full_path_name`](crate::full_path_name).
    #[instrument(
        level = "debug",
        err(level = "debug"),
        skip_all,
        fields(path = %path.to_string_lossy())
    )]
    pub fn full_path_name_ansi(path: &CStr) -> Result<AnsiFullPathName, PathNameError> {
        let mut file_part_offset = None;
        let buf = fill_buffer(|buf_ptr: *mut u8, capacity| {
            let mut file_part: LPSTR = ptr::null_mut();
            clear_last_error();
            let ret = unsafe {
                sys::GetFullPathNameA(
                    path.as_ptr(),
                    capacity as _,
                    buf_ptr.cast::<c_char>(),
                    &mut file_part,
                )
            };
            let fill = BufferFill::from_return(ret, capacity)?;
            file_part_offset = if file_part.is_null() {
                None
            } else {
                Some(unsafe { file_part.cast::<u8>().offset_from(buf_ptr) } as usize)
            };
            Ok(fill)
        })?;

        let len = buf.len();
        Ok(AnsiFullPathName {
            path: CString::new(buf)?,
            file_part_offset: file_part_offset.filter(|&offset| offset < len),
        })
    }

    /// Narrow variant of [`full_path_name`](crate::full_path_name) taking raw code page bytes.
    pub fn full_path_name_ansi_bytes(
        path: impl Into<Vec<u8>>,
    ) -> Result<AnsiFullPathName, PathNameError> {
        let path = CString::new(path)?;
        full_path_name_ansi(&path)
    }

    /// Calls `GetFullPathNameA` with a caller supplied buffer.
    pub fn full_path_name_ansi_into(path: &CStr, buf: &mut [u8]) -> io::Result<BufferFill> {
        let (capacity, len) = capacity_of(buf);
        clear_last_error();
        let ret = unsafe {
            sys::GetFullPathNameA(
                path.as_ptr(),
                capacity,
                buf.as_mut_ptr().cast::<c_char>(),
                ptr::null_mut(),
            )
        };
        BufferFill::from_return(ret, len)
    }
}

#[cfg(feature = "ansi")]
pub use ansi::*;
