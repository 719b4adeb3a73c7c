// ── Win32 platform implementation ─────────────────────────────────────────────
//
// One of the modules in the crate where `unsafe` code is permitted.  Every
// `unsafe` block MUST carry a `// SAFETY:` comment that states:
//   • which invariant makes the operation sound, and
//   • what the caller is responsible for maintaining.

#![allow(unsafe_code)]

pub mod ole32;

use crate::hresult::HResult;

/// System message text for `code` (`FormatMessageW` via the windows crate).
///
/// `None` when the system has no text for the code.
pub(crate) fn message(code: HResult) -> Option<String> {
    let text = windows::core::HRESULT(code.0).message().to_string();
    let text = text.trim_end();
    if text.is_empty() {
        None
    } else {
        Some(text.to_owned())
    }
}
