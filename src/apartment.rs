// ── Library lifecycle ─────────────────────────────────────────────────────────
//
// Thread participation in the COM runtime: `initialize`, `initialize_ex`,
// `uninitialize`, and the `Apartment` guard that pairs them.
//
// Pairing contract (enforced by the OS, documented here):
//   • every successful initialize, `S_FALSE` included, needs exactly one
//     `uninitialize` on the same thread;
//   • a failed initialize (e.g. `RPC_E_CHANGED_MODE`) needs none.
// The free functions cannot check this.  `Apartment` can, because it is
// neither `Send` nor `Sync` and uninitializes exactly once on drop.

use std::marker::PhantomData;

use log::{debug, trace};

use crate::{
    error::{ComError, Result},
    flags::CoInit,
    hresult::{HResult, S_FALSE},
    runtime::Runtime,
};

/// Join a single-threaded apartment (`CoInitialize`).
///
/// Returns `S_OK`, `S_FALSE` if this thread was already initialized, or
/// `RPC_E_CHANGED_MODE` if it was initialized as multi-threaded.
pub fn initialize<R: Runtime + ?Sized>(rt: &R) -> HResult {
    let hr = rt.initialize();
    trace!("CoInitialize -> {hr}");
    hr
}

/// Initialize COM on this thread with explicit options (`CoInitializeEx`).
///
/// A flag set the OS would reject returns `E_INVALIDARG` without making the
/// call; every other result is the OS's, unchanged.
pub fn initialize_ex<R: Runtime + ?Sized>(rt: &R, flags: CoInit) -> HResult {
    if let Err(hr) = flags.validate() {
        debug!("CoInitializeEx rejected flags {:#x}: {hr}", flags.bits());
        return hr;
    }
    let hr = rt.initialize_ex(flags);
    trace!("CoInitializeEx({:#x}) -> {hr}", flags.bits());
    hr
}

/// Release one balanced initialization (`CoUninitialize`).
///
/// Has no result: it is treated as always succeeding.
pub fn uninitialize<R: Runtime + ?Sized>(rt: &R) {
    rt.uninitialize();
    trace!("CoUninitialize");
}

// ── Apartment guard ───────────────────────────────────────────────────────────

/// RAII proof that COM is initialized on the current thread.
///
/// Dropping the guard issues the matching `uninitialize`.  The raw pointer
/// marker keeps the guard on the thread that created it.
pub struct Apartment<'r, R: Runtime + ?Sized> {
    rt: &'r R,
    flags: CoInit,
    already_initialized: bool,
    _thread_bound: PhantomData<*const ()>,
}

impl<'r, R: Runtime + ?Sized> Apartment<'r, R> {
    /// Initialize COM with `flags` and return a guard for it.
    ///
    /// Fails with the OS result for `RPC_E_CHANGED_MODE`, `E_INVALIDARG`
    /// and any other failure; no uninitialize is owed in that case.
    pub fn enter(rt: &'r R, flags: CoInit) -> Result<Self> {
        let hr = initialize_ex(rt, flags);
        if hr.is_failure() {
            return Err(ComError::Call {
                function: "CoInitializeEx",
                code: hr,
            });
        }
        debug!(
            "entered {:?} apartment (flags {:#x}, {hr})",
            flags.concurrency(),
            flags.bits()
        );
        Ok(Self {
            rt,
            flags,
            already_initialized: hr == S_FALSE,
            _thread_bound: PhantomData,
        })
    }

    /// Join a single-threaded apartment via `CoInitialize`.
    pub fn enter_sta(rt: &'r R) -> Result<Self> {
        let hr = initialize(rt);
        if hr.is_failure() {
            return Err(ComError::Call {
                function: "CoInitialize",
                code: hr,
            });
        }
        Ok(Self {
            rt,
            flags: CoInit::default(),
            already_initialized: hr == S_FALSE,
            _thread_bound: PhantomData,
        })
    }

    /// `true` if the thread was already initialized before this guard
    /// (the OS returned `S_FALSE`).
    pub fn was_already_initialized(&self) -> bool {
        self.already_initialized
    }

    pub fn flags(&self) -> CoInit {
        self.flags
    }

    pub fn runtime(&self) -> &'r R {
        self.rt
    }
}

impl<R: Runtime + ?Sized> Drop for Apartment<'_, R> {
    fn drop(&mut self) {
        uninitialize(self.rt);
        debug!("left {:?} apartment", self.flags.concurrency());
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
