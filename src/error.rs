// ── Central error type ────────────────────────────────────────────────────────
//
// All fallible operations in comshim return `error::Result<T>`.  Native
// failures carry the HRESULT exactly as the OS produced it; nothing is
// retried or translated.

use crate::hresult::HResult;

/// Every error that comshim can produce.
#[derive(Debug)]
pub enum ComError {
    /// A COM entry point returned a failure code.
    Call {
        /// The name of the failing function, for display purposes.
        function: &'static str,
        /// The result code, unchanged.
        code: HResult,
    },

    /// Instance creation was asked for a type that is not an interface.
    ///
    /// This is a caller bug, not an OS result: it is raised before any
    /// native call is made.
    NotAnInterface { name: String },

    /// Text that should have been a GUID.
    InvalidGuid(String),

    /// Text that should have been a result code.
    InvalidHResult(String),

    /// Native activation is not available on this target.
    Unsupported,

    /// A profile file declared a format version we do not understand.
    ProfileVersion(u32),

    /// A standard I/O error (profile read or write).
    Io(std::io::Error),

    /// Malformed profile JSON.
    Json(serde_json::Error),
}

impl ComError {
    /// The HRESULT behind a `Call` error.
    pub fn code(&self) -> Option<HResult> {
        match self {
            Self::Call { code, .. } => Some(*code),
            _ => None,
        }
    }
}

impl std::fmt::Display for ComError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Call { function, code } => write!(f, "{function} failed: {code}"),
            Self::NotAnInterface { name } => {
                write!(f, "`{name}` is not an interface type")
            }
            Self::InvalidGuid(text) => write!(f, "invalid GUID {text:?}"),
            Self::InvalidHResult(text) => write!(f, "invalid result code {text:?}"),
            Self::Unsupported => f.write_str("native COM activation requires Windows"),
            Self::ProfileVersion(v) => write!(f, "unsupported profile version {v}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Json(e) => write!(f, "profile parse error: {e}"),
        }
    }
}

impl std::error::Error for ComError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ComError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for ComError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ComError>;
