use std::{
    io,
    path::{Path, PathBuf},
};

use tracing::{debug, instrument};
use widestring::{U16CStr, U16CString, U16Str};

use crate::{
    buffer::{capacity_of, clear_last_error, fill_buffer, BufferFill},
    error::PathNameError,
    full_path::full_path_name_wstr,
    sys,
};

/// Converts the given path to its long form, expanding 8.3 short names.
///
/// The path has to exist. Relative paths stay relative.
pub fn long_path_name(path: impl AsRef<Path>) -> Result<PathBuf, PathNameError> {
    let path = U16CString::from_os_str(path.as_ref())?;
    Ok(long_path_name_wstr(&path)?)
}

#[instrument(
    level = "debug",
    err(level = "debug"),
    skip_all,
    fields(path = %path.to_string_lossy())
)]
fn long_path_name_wstr(path: &U16CStr) -> io::Result<PathBuf> {
    let buf = fill_buffer(|buf_ptr: *mut u16, capacity| {
        clear_last_error();
        let ret = unsafe { sys::GetLongPathNameW(path.as_ptr(), buf_ptr, capacity as _) };
        BufferFill::from_return(ret, capacity)
    })?;
    Ok(U16Str::from_slice(&buf).to_os_string().into())
}

/// Calls `GetLongPathNameW` with a caller supplied buffer.
///
/// On [`BufferFill::Written`] the buffer contains the nul-terminated long path.
pub fn long_path_name_into(path: &U16CStr, buf: &mut [u16]) -> io::Result<BufferFill> {
    let (capacity, len) = capacity_of(buf);
    clear_last_error();
    let ret = unsafe { sys::GetLongPathNameW(path.as_ptr(), buf.as_mut_ptr(), capacity) };
    BufferFill::from_return(ret, len)
}

/// Returns the absolute long form of the given path.
///
/// The path is made absolute first and then converted to its long form.
/// If the path does not exist, the absolute form is returned as is.
pub fn resolve(path: impl AsRef<Path>) -> Result<PathBuf, PathNameError> {
    let path = U16CString::from_os_str(path.as_ref())?;
    let full = full_path_name_wstr(&path)?.into_path_buf();

    let full_wide = U16CString::from_os_str(&full)?;
    match long_path_name_wstr(&full_wide) {
        Ok(long) => Ok(long),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            debug!(path = %full.display(), "path does not exist, keeping absolute form");
            Ok(full)
        }
        Err(err) => Err(err.into()),
    }
}

#[cfg(test)]
mod tests {
    use std::{
        ffi::OsStr,
        fs,
        sync::{
            atomic::{AtomicUsize, Ordering},
            Arc,
        },
    };

    use tracing::{Event, Level, Subscriber};
    use tracing_subscriber::{
        layer::{Context, SubscriberExt},
        Layer,
    };

    use super::*;

    #[derive(Default)]
    struct LevelCounter {
        errors: AtomicUsize,
        debugs: AtomicUsize,
    }

    struct CountingLayer(Arc<LevelCounter>);

    impl<S: Subscriber> Layer<S> for CountingLayer {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            match *event.metadata().level() {
                Level::ERROR => self.0.errors.fetch_add(1, Ordering::SeqCst),
                Level::DEBUG => self.0.debugs.fetch_add(1, Ordering::SeqCst),
                _ => 0,
            };
        }
    }

    #[test]
    fn long_path_name_of_missing_path_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = long_path_name(dir.path().join("does-not-exist")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn resolve_falls_back_to_absolute_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("a").join("..").join("missing.txt");
        let resolved = resolve(&missing).unwrap();
        assert!(resolved.is_absolute());
        assert!(resolved.ends_with("missing.txt"));
        assert!(!resolved.components().any(|c| c.as_os_str() == ".."));
    }

    #[test]
    fn resolve_of_missing_path_logs_no_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.txt");

        let counter = Arc::new(LevelCounter::default());
        let subscriber = tracing_subscriber::registry().with(CountingLayer(counter.clone()));
        tracing::subscriber::with_default(subscriber, || {
            resolve(&missing).unwrap();
        });

        assert_eq!(counter.errors.load(Ordering::SeqCst), 0);
        assert!(counter.debugs.load(Ordering::SeqCst) > 0);
    }

    #[test]
    fn resolve_existing_file_keeps_long_name() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("a file with a long name.txt");
        fs::write(&file, b"").unwrap();

        let resolved = resolve(&file).unwrap();
        assert!(same_file::is_same_file(&resolved, &file).unwrap());
        assert_eq!(
            resolved.file_name(),
            Some(OsStr::new("a file with a long name.txt"))
        );
    }

    #[test]
    fn long_path_name_into_reports_required_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = U16CString::from_os_str(dir.path()).unwrap();
        let mut buf = [0u16; 1];
        match long_path_name_into(&path, &mut buf).unwrap() {
            BufferFill::TooSmall { required } => assert!(required > 1),
            fill => panic!("unexpected fill result {fill:?}"),
        }
    }
}
