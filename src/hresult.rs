// ── Result codes ──────────────────────────────────────────────────────────────
//
// `HResult` is the 32-bit status every COM entry point returns.  Success and
// failure are decided by the sign bit alone; the named constants below are
// copied from the Windows SDK headers (winerror.h) and are part of the ABI.
// No `unsafe` here.

use std::fmt;

/// A COM result code.
///
/// `#[repr(transparent)]` so it can appear directly in `extern "system"`
/// signatures in place of the native `HRESULT`.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct HResult(pub i32);

// Helper for writing the SDK values as they appear in the headers.
const fn hr(bits: u32) -> HResult {
    HResult(bits as i32)
}

// ── Named values ──────────────────────────────────────────────────────────────

/// Operation successful.
pub const S_OK: HResult = hr(0x0000_0000);
/// Success, but nothing was done (e.g. COM already initialized on this thread).
pub const S_FALSE: HResult = hr(0x0000_0001);

pub const E_NOTIMPL: HResult = hr(0x8000_4001);
/// The object does not support the requested interface.
pub const E_NOINTERFACE: HResult = hr(0x8000_4002);
pub const E_POINTER: HResult = hr(0x8000_4003);
pub const E_ABORT: HResult = hr(0x8000_4004);
pub const E_FAIL: HResult = hr(0x8000_4005);
pub const E_UNEXPECTED: HResult = hr(0x8000_FFFF);
pub const E_ACCESSDENIED: HResult = hr(0x8007_0005);
pub const E_HANDLE: HResult = hr(0x8007_0006);
pub const E_OUTOFMEMORY: HResult = hr(0x8007_000E);
/// One or more arguments are invalid.  Returned for conflicting flag sets.
pub const E_INVALIDARG: HResult = hr(0x8007_0057);

/// The class does not support aggregation.
pub const CLASS_E_NOAGGREGATION: HResult = hr(0x8004_0110);
pub const CLASS_E_CLASSNOTAVAILABLE: HResult = hr(0x8004_0111);
/// The class is not registered.
pub const REGDB_E_CLASSNOTREG: HResult = hr(0x8004_0154);

/// `CoInitialize` has not been called on this thread.
pub const CO_E_NOTINITIALIZED: HResult = hr(0x8004_01F0);
pub const CO_E_APPNOTFOUND: HResult = hr(0x8004_01F5);
pub const CO_E_DLLNOTFOUND: HResult = hr(0x8004_01F8);
pub const CO_E_SERVER_EXEC_FAILURE: HResult = hr(0x8008_0005);

/// The thread was already initialized with a different concurrency model.
pub const RPC_E_CHANGED_MODE: HResult = hr(0x8001_0106);

/// Every named code, in the order above.  Drives `name()` and the CLI listing.
pub const NAMED: &[(HResult, &str)] = &[
    (S_OK, "S_OK"),
    (S_FALSE, "S_FALSE"),
    (E_NOTIMPL, "E_NOTIMPL"),
    (E_NOINTERFACE, "E_NOINTERFACE"),
    (E_POINTER, "E_POINTER"),
    (E_ABORT, "E_ABORT"),
    (E_FAIL, "E_FAIL"),
    (E_UNEXPECTED, "E_UNEXPECTED"),
    (E_ACCESSDENIED, "E_ACCESSDENIED"),
    (E_HANDLE, "E_HANDLE"),
    (E_OUTOFMEMORY, "E_OUTOFMEMORY"),
    (E_INVALIDARG, "E_INVALIDARG"),
    (CLASS_E_NOAGGREGATION, "CLASS_E_NOAGGREGATION"),
    (CLASS_E_CLASSNOTAVAILABLE, "CLASS_E_CLASSNOTAVAILABLE"),
    (REGDB_E_CLASSNOTREG, "REGDB_E_CLASSNOTREG"),
    (CO_E_NOTINITIALIZED, "CO_E_NOTINITIALIZED"),
    (CO_E_APPNOTFOUND, "CO_E_APPNOTFOUND"),
    (CO_E_DLLNOTFOUND, "CO_E_DLLNOTFOUND"),
    (CO_E_SERVER_EXEC_FAILURE, "CO_E_SERVER_EXEC_FAILURE"),
    (RPC_E_CHANGED_MODE, "RPC_E_CHANGED_MODE"),
];

/// Facility used when a Win32 error code is wrapped as an HRESULT.
pub const FACILITY_WIN32: u16 = 7;

impl HResult {
    /// `true` when the sign bit is clear.  `S_FALSE` counts as success.
    pub const fn is_success(self) -> bool {
        self.0 >= 0
    }

    pub const fn is_failure(self) -> bool {
        self.0 < 0
    }

    /// The raw bits, as shown in SDK headers and debuggers.
    pub const fn bits(self) -> u32 {
        self.0 as u32
    }

    /// Facility field (bits 16..=28), as `HRESULT_FACILITY` extracts it.
    pub const fn facility(self) -> u16 {
        ((self.bits() >> 16) & 0x1FFF) as u16
    }

    /// Code field (low 16 bits).
    pub const fn code(self) -> u16 {
        (self.bits() & 0xFFFF) as u16
    }

    /// Wrap a Win32 error code (`GetLastError()` value) the way
    /// `HRESULT_FROM_WIN32` does.  Zero and values that already look like
    /// HRESULTs pass through unchanged.
    pub const fn from_win32(error: u32) -> Self {
        if error as i32 <= 0 {
            HResult(error as i32)
        } else {
            hr((error & 0xFFFF) | ((FACILITY_WIN32 as u32) << 16) | 0x8000_0000)
        }
    }

    /// Symbolic name, if this is one of the well-known codes.
    pub fn name(self) -> Option<&'static str> {
        NAMED
            .iter()
            .find(|(code, _)| *code == self)
            .map(|(_, name)| *name)
    }

    /// `Ok(self)` for success codes, `Err(self)` for failures.
    pub const fn ok(self) -> std::result::Result<HResult, HResult> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(self)
        }
    }

    /// Parse `0x8007000E`, a signed decimal like `-2147024882`, or the same
    /// bits as an unsigned decimal.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        let hex = text
            .strip_prefix("0x")
            .or_else(|| text.strip_prefix("0X"));
        if let Some(hex) = hex {
            // `from_str_radix` would accept a sign here.
            if hex.starts_with(['+', '-']) {
                return None;
            }
            return u32::from_str_radix(hex, 16).ok().map(hr);
        }
        if let Ok(dec) = text.parse::<i32>() {
            return Some(HResult(dec));
        }
        text.parse::<u32>().ok().map(hr)
    }
}

impl From<i32> for HResult {
    fn from(v: i32) -> Self {
        HResult(v)
    }
}

impl fmt::Display for HResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{name} ({:#010x})", self.bits()),
            None => write!(f, "{:#010x}", self.bits()),
        }
    }
}

impl fmt::Debug for HResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "HResult({name})"),
            None => write!(f, "HResult({:#010x})", self.bits()),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
