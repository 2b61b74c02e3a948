use std::{cmp, io, mem::MaybeUninit, slice};

use tracing::trace;
use winapi::{shared::winerror::ERROR_SUCCESS, um::errhandlingapi::SetLastError};

use crate::sys::{DWORD, MAX_EXTENDED_PATH, MAX_PATH};

const MAX_CAPACITY: usize = MAX_EXTENDED_PATH + 1;

/// Outcome of a single call filling a caller supplied buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferFill {
    /// The result was written. `len` excludes the nul terminator.
    Written {
        /// Number of characters written, excluding the terminator.
        len: usize,
    },
    /// The buffer was too small and nothing usable was written.
    TooSmall {
        /// Required capacity in characters, including the terminator.
        required: usize,
    },
}

impl BufferFill {
    /// Interprets the return value of one of the path name apis called with a buffer of `capacity`.
    ///
    /// Has to be called directly after the api call as it may read the last error, which has to
    /// be cleared with [`clear_last_error`] before the call.
    pub(crate) fn from_return(ret: DWORD, capacity: usize) -> io::Result<Self> {
        if ret == 0 {
            let err = io::Error::last_os_error();
            return if err.raw_os_error() == Some(ERROR_SUCCESS as i32) {
                Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    "path name api failed without setting an error",
                ))
            } else {
                Err(err)
            };
        }

        let ret = ret as usize;
        if ret < capacity {
            Ok(Self::Written { len: ret })
        } else {
            Ok(Self::TooSmall { required: ret })
        }
    }

    /// Returns the number of written characters or `None` if the buffer was too small.
    #[must_use]
    pub fn written(self) -> Option<usize> {
        match self {
            Self::Written { len } => Some(len),
            Self::TooSmall { .. } => None,
        }
    }
}

/// Resets the last error of the calling thread so a zero return can't pick up a stale code.
pub(crate) fn clear_last_error() {
    unsafe { SetLastError(ERROR_SUCCESS) };
}

/// Clamps a slice length to something the apis accept as a buffer length.
pub(crate) fn capacity_of<T>(buf: &[T]) -> (DWORD, usize) {
    let capacity = DWORD::try_from(buf.len()).unwrap_or(DWORD::MAX);
    (capacity, capacity as usize)
}

fn path_too_long(required: usize) -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidInput,
        format!("path requires a buffer of {required} characters which exceeds the maximum of {MAX_CAPACITY}"),
    )
}

/// Calls `fill` with a buffer pointer and its capacity until the result fits.
///
/// The first attempt uses a `MAX_PATH` sized stack buffer, later attempts use a heap buffer
/// which grows to at least the reported required size.
pub(crate) fn fill_buffer<T: Copy>(
    mut fill: impl FnMut(*mut T, usize) -> io::Result<BufferFill>,
) -> io::Result<Vec<T>> {
    let mut stack_buf = [const { MaybeUninit::<T>::uninit() }; MAX_PATH];
    let mut required = match fill(stack_buf.as_mut_ptr().cast(), stack_buf.len())? {
        BufferFill::Written { len } => {
            let len = cmp::min(len, stack_buf.len());
            let written = unsafe { slice::from_raw_parts(stack_buf.as_ptr().cast::<T>(), len) };
            return Ok(written.to_vec());
        }
        BufferFill::TooSmall { required } => required,
    };

    let mut capacity = stack_buf.len();
    let mut heap_buf = Vec::<T>::new();
    loop {
        if required > MAX_CAPACITY || capacity >= MAX_CAPACITY {
            return Err(path_too_long(required));
        }
        capacity = cmp::min(
            cmp::max(capacity.saturating_mul(2), required),
            MAX_CAPACITY,
        );
        trace!(capacity, required, "growing path buffer");

        heap_buf.clear();
        heap_buf.reserve_exact(capacity);
        match fill(heap_buf.as_mut_ptr(), capacity)? {
            BufferFill::Written { len } => {
                unsafe { heap_buf.set_len(cmp::min(len, capacity)) };
                return Ok(heap_buf);
            }
            BufferFill::TooSmall {
                required: new_required,
            } => required = new_required,
        }
    }
}
