//! Unix library loading via `dlopen`

use std::ffi::{CStr, CString};
use std::os::unix::ffi::OsStrExt;
use std::path::Path;

use crate::native::NativeError;

/// Load a shared library for the rest of the process lifetime.
///
/// A bare file name is searched on the dynamic linker path.
pub fn open_library(path: &Path) -> Result<(), NativeError> {
    let c_path =
        CString::new(path.as_os_str().as_bytes()).map_err(|_| NativeError::InvalidPath {
            path: path.display().to_string(),
        })?;

    unsafe {
        let handle = libc::dlopen(c_path.as_ptr(), libc::RTLD_NOW | libc::RTLD_GLOBAL);
        if handle.is_null() {
            let message = libc::dlerror();
            let reason = if message.is_null() {
                "unknown dlopen error".to_string()
            } else {
                CStr::from_ptr(message).to_string_lossy().into_owned()
            };
            return Err(NativeError::LoadFailed {
                library: path.display().to_string(),
                reason,
            });
        }
    }

    // The handle is never closed; the library stays mapped.
    Ok(())
}
