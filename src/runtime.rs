// ── Runtime seam ──────────────────────────────────────────────────────────────
//
// The four ole32 entry points (plus `IUnknown::Release`) behind one trait.
// The lifecycle and activation modules are written against `Runtime`; the
// native implementation lives in `platform::win32::ole32`.
//
// Implementations do no validation of their own: they make the call and
// return whatever the OS returned.

#![allow(unsafe_code)]

use std::{ffi::c_void, ptr::NonNull};

use crate::{
    flags::{ClsCtx, CoInit},
    guid::Guid,
    hresult::HResult,
};

/// An interface pointer as the OS hands it out.  Never null.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct RawUnknown(NonNull<c_void>);

impl RawUnknown {
    /// `None` for a null pointer.
    pub fn new(ptr: *mut c_void) -> Option<Self> {
        NonNull::new(ptr).map(Self)
    }

    pub fn as_ptr(self) -> *mut c_void {
        self.0.as_ptr()
    }
}

/// The native COM entry points.
///
/// Every method is one synchronous call into the COM runtime.
pub trait Runtime {
    /// `CoInitialize(NULL)`.
    fn initialize(&self) -> HResult;

    /// `CoInitializeEx(NULL, flags)`.
    fn initialize_ex(&self, flags: CoInit) -> HResult;

    /// `CoUninitialize()`.
    fn uninitialize(&self);

    /// `CoCreateInstance(clsid, outer, context, iid, &out)`.
    ///
    /// Returns the call's result and the pointer written to `ppv`, which the
    /// OS sets to null on failure.
    fn create_instance(
        &self,
        clsid: &Guid,
        outer: Option<RawUnknown>,
        context: ClsCtx,
        iid: &Guid,
    ) -> (HResult, *mut c_void);

    /// `IUnknown::Release` on `unknown`.  Returns the new reference count.
    ///
    /// # Safety
    ///
    /// `unknown` must be a live interface pointer produced by this runtime,
    /// and the caller gives up its reference.
    unsafe fn release(&self, unknown: RawUnknown) -> u32;
}

// ── Fake runtime ──────────────────────────────────────────────────────────────
