#![cfg(windows)]
#![warn(
    unsafe_op_in_unsafe_fn,
    missing_docs,
    missing_debug_implementations,
    missing_copy_implementations,
    rust_2018_idioms,
    clippy::todo,
    clippy::manual_assert,
    clippy::must_use_candidate,
    clippy::inconsistent_struct_constructor,
    clippy::wrong_self_convention,
    rustdoc::broken_intra_doc_links,
    rustdoc::private_intra_doc_links
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::borrow_as_ptr
)]
//! Bindings for `GetFullPathNameW`, `GetFullPathNameA` and `GetLongPathNameW`
//! together with safe wrappers that manage the output buffers.
//!
//! ```no_run
//! let full = win_long_path::full_path_name("foo\\..\\bar.txt")?;
//! println!("{} (file part: {:?})", full.path().display(), full.file_part());
//!
//! let long = win_long_path::resolve("C:\\PROGRA~1")?;
//! assert_eq!(long, std::path::Path::new("C:\\Program Files"));
//! # Ok::<(), win_long_path::error::PathNameError>(())
//! ```

/// Raw declarations of the path name apis and the types they use.
pub mod sys;

/// Module containing the error enums used in this crate.
pub mod error;

mod buffer;
pub use buffer::BufferFill;

mod full_path;
pub use full_path::*;

mod long_path;
pub use long_path::*;
