// ── Platform layer ────────────────────────────────────────────────────────────
//
// The only place that knows which OS we are on.  Everything above this module
// talks to COM through the `Runtime` trait; the native implementation is only
// compiled on Windows.

#[cfg(windows)]
pub mod win32;

#[cfg(windows)]
pub use win32::ole32::Ole32;

use crate::hresult::HResult;

/// System message text for `code`, when the OS can provide one.
pub fn message(code: HResult) -> Option<String> {
    #[cfg(windows)]
    {
        win32::message(code)
    }
    #[cfg(not(windows))]
    {
        let _ = code;
        None
    }
}
