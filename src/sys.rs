#![allow(non_snake_case, clippy::upper_case_acronyms)]

use core::ffi::c_char;

/// 32-bit unsigned integer used for buffer lengths and return codes.
pub type DWORD = u32;
/// Pointer to a nul-terminated read-only wide (UTF-16) string.
pub type LPCWSTR = *const u16;
/// Pointer to a mutable wide (UTF-16) string buffer.
pub type LPWSTR = *mut u16;
/// Pointer to a nul-terminated read-only narrow (ANSI code page) string.
pub type LPCSTR = *const c_char;
/// Pointer to a mutable narrow (ANSI code page) string buffer.
pub type LPSTR = *mut c_char;

/// Maximum length of a path in characters without the `\\?\` prefix, including the terminator.
pub const MAX_PATH: usize = 260;

/// Maximum length of an extended-length path in characters, excluding the terminator.
pub const MAX_EXTENDED_PATH: usize = 32_767;

#[link(name = "kernel32")]
extern "system" {
    /// Retrieves the full path and file name of the specified file.
    ///
    /// Returns the number of characters written excluding the terminator, the required
    /// buffer size including the terminator if `nBufferLength` is too small, or `0` on failure.
    pub fn GetFullPathNameW(
        lpFileName: LPCWSTR,
        nBufferLength: DWORD,
        lpBuffer: LPWSTR,
        lpFilePart: *mut LPWSTR,
    ) -> DWORD;

    /// Narrow variant of [`GetFullPathNameW`] operating in the active code page.
    pub fn GetFullPathNameA(
        lpFileName: LPCSTR,
        nBufferLength: DWORD,
        lpBuffer: LPSTR,
        lpFilePart: *mut LPSTR,
    ) -> DWORD;

    /// Converts the specified path to its long form.
    ///
    /// Same return convention as [`GetFullPathNameW`]. The path has to exist.
    pub fn GetLongPathNameW(lpszShortPath: LPCWSTR, lpszLongPath: LPWSTR, cchBuffer: DWORD)
        -> DWORD;
}
