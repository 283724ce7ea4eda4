//! Windows library loading via `LoadLibraryW`

use std::ffi::OsStr;
use std::os::windows::ffi::OsStrExt;
use std::path::Path;

use crate::native::NativeError;

/// Load a DLL for the rest of the process lifetime
pub fn open_library(path: &Path) -> Result<(), NativeError> {
    use winapi::um::errhandlingapi::GetLastError;
    use winapi::um::libloaderapi::LoadLibraryW;

    let wide_path: Vec<u16> = OsStr::new(path)
        .encode_wide()
        .chain(std::iter::once(0))
        .collect();

    unsafe {
        let handle = LoadLibraryW(wide_path.as_ptr());
        if handle.is_null() {
            return Err(NativeError::LoadFailed {
                library: path.display().to_string(),
                reason: format!("LoadLibraryW failed with error {}", GetLastError()),
            });
        }
    }

    // The module handle is never freed; the DLL stays loaded.
    Ok(())
}
