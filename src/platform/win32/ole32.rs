// ── ole32 bindings ────────────────────────────────────────────────────────────
//
// Direct imports of the four COM lifecycle/activation entry points from
// `ole32.dll`, `system` calling convention, parameters in SDK order:
//
//   HRESULT CoInitialize(LPVOID pvReserved);
//   HRESULT CoInitializeEx(LPVOID pvReserved, DWORD dwCoInit);
//   void    CoUninitialize(void);
//   HRESULT CoCreateInstance(REFCLSID rclsid, LPUNKNOWN pUnkOuter,
//                            DWORD dwClsContext, REFIID riid, LPVOID *ppv);
//
// `HResult` and `Guid` are layout-compatible with HRESULT and GUID, so they
// appear in the signatures directly.

#![allow(unsafe_code)]

use std::{ffi::c_void, ptr};

use crate::{
    flags::{ClsCtx, CoInit},
    guid::Guid,
    hresult::HResult,
    runtime::{RawUnknown, Runtime},
};

mod api {
    use std::ffi::c_void;

    use crate::{guid::Guid, hresult::HResult};

    windows_link::link!("ole32.dll" "system" fn CoInitialize(pvreserved: *const c_void) -> HResult);
    windows_link::link!("ole32.dll" "system" fn CoInitializeEx(pvreserved: *const c_void, dwcoinit: u32) -> HResult);
    windows_link::link!("ole32.dll" "system" fn CoUninitialize());
    windows_link::link!("ole32.dll" "system" fn CoCreateInstance(rclsid: *const Guid, punkouter: *mut c_void, dwclscontext: u32, riid: *const Guid, ppv: *mut *mut c_void) -> HResult);
}

/// First three slots of every COM vtable.
#[repr(C)]
struct IUnknownVtbl {
    _query_interface:
        unsafe extern "system" fn(*mut c_void, *const Guid, *mut *mut c_void) -> HResult,
    _add_ref: unsafe extern "system" fn(*mut c_void) -> u32,
    release: unsafe extern "system" fn(*mut c_void) -> u32,
}

/// The operating system's COM runtime.
#[derive(Clone, Copy, Debug, Default)]
pub struct Ole32;

impl Runtime for Ole32 {
    fn initialize(&self) -> HResult {
        // SAFETY: pvReserved must be NULL.  Pairing with CoUninitialize is the
        // caller's contract (see `apartment`).
        unsafe { api::CoInitialize(ptr::null()) }
    }

    fn initialize_ex(&self, flags: CoInit) -> HResult {
        // SAFETY: pvReserved must be NULL; the flag bits are passed verbatim.
        unsafe { api::CoInitializeEx(ptr::null(), flags.bits()) }
    }

    fn uninitialize(&self) {
        // SAFETY: no arguments.  Unbalanced calls are the caller's problem and
        // are not memory-unsafe.
        unsafe { api::CoUninitialize() }
    }

    fn create_instance(
        &self,
        clsid: &Guid,
        outer: Option<RawUnknown>,
        context: ClsCtx,
        iid: &Guid,
    ) -> (HResult, *mut c_void) {
        let mut out: *mut c_void = ptr::null_mut();
        let outer = outer.map_or(ptr::null_mut(), RawUnknown::as_ptr);
        // SAFETY: clsid and iid are valid GUID references for the duration of
        // the call; `outer` is null or a live IUnknown supplied by the caller;
        // `out` is a valid pointer slot that the OS writes exactly once.
        let hr = unsafe { api::CoCreateInstance(clsid, outer, context.bits(), iid, &mut out) };
        (hr, out)
    }

    unsafe fn release(&self, unknown: RawUnknown) -> u32 {
        let this = unknown.as_ptr();
        // SAFETY: the caller guarantees `this` is a live interface pointer.
        // Every COM interface pointer points at a vtable pointer whose first
        // three slots are the IUnknown methods.
        unsafe {
            let vtbl = *(this as *const *const IUnknownVtbl);
            ((*vtbl).release)(this)
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
//
// The constant checks compare our values with the windows crate's SDK
// metadata.  The live tests talk to the real COM runtime; each test runs on
// its own thread, so apartment state does not leak between them.

#[cfg(test)]
mod tests {
    use windows::Win32::{Foundation as F, System::Com as C};

    use super::*;
    use crate::{
        activation::{create, create_instance, IUnknown, TypeDesc},
        apartment::{initialize_ex, uninitialize, Apartment},
        hresult::{self as hr},
    };

    #[test]
    fn coinit_values_match_sdk() {
        assert_eq!(CoInit::MULTITHREADED.bits(), C::COINIT_MULTITHREADED.0 as u32);
        assert_eq!(CoInit::APARTMENTTHREADED.bits(), C::COINIT_APARTMENTTHREADED.0 as u32);
        assert_eq!(CoInit::DISABLE_OLE1DDE.bits(), C::COINIT_DISABLE_OLE1DDE.0 as u32);
        assert_eq!(CoInit::SPEED_OVER_MEMORY.bits(), C::COINIT_SPEED_OVER_MEMORY.0 as u32);
    }

    #[test]
    fn clsctx_values_match_sdk() {
        let pairs = [
            (ClsCtx::INPROC_SERVER, C::CLSCTX_INPROC_SERVER),
            (ClsCtx::INPROC_HANDLER, C::CLSCTX_INPROC_HANDLER),
            (ClsCtx::LOCAL_SERVER, C::CLSCTX_LOCAL_SERVER),
            (ClsCtx::REMOTE_SERVER, C::CLSCTX_REMOTE_SERVER),
            (ClsCtx::NO_CODE_DOWNLOAD, C::CLSCTX_NO_CODE_DOWNLOAD),
            (ClsCtx::NO_CUSTOM_MARSHAL, C::CLSCTX_NO_CUSTOM_MARSHAL),
            (ClsCtx::ENABLE_CODE_DOWNLOAD, C::CLSCTX_ENABLE_CODE_DOWNLOAD),
            (ClsCtx::NO_FAILURE_LOG, C::CLSCTX_NO_FAILURE_LOG),
            (ClsCtx::DISABLE_AAA, C::CLSCTX_DISABLE_AAA),
            (ClsCtx::ENABLE_AAA, C::CLSCTX_ENABLE_AAA),
            (ClsCtx::FROM_DEFAULT_CONTEXT, C::CLSCTX_FROM_DEFAULT_CONTEXT),
            (ClsCtx::ACTIVATE_X86_SERVER, C::CLSCTX_ACTIVATE_X86_SERVER),
            (ClsCtx::ACTIVATE_32_BIT_SERVER, C::CLSCTX_ACTIVATE_32_BIT_SERVER),
            (ClsCtx::ACTIVATE_64_BIT_SERVER, C::CLSCTX_ACTIVATE_64_BIT_SERVER),
            (ClsCtx::ENABLE_CLOAKING, C::CLSCTX_ENABLE_CLOAKING),
            (ClsCtx::APPCONTAINER, C::CLSCTX_APPCONTAINER),
            (ClsCtx::ACTIVATE_AAA_AS_IU, C::CLSCTX_ACTIVATE_AAA_AS_IU),
            (ClsCtx::ACTIVATE_ARM32_SERVER, C::CLSCTX_ACTIVATE_ARM32_SERVER),
            (ClsCtx::PS_DLL, C::CLSCTX_PS_DLL),
            (ClsCtx::ALL, C::CLSCTX_ALL),
        ];
        for (ours, sdk) in pairs {
            assert_eq!(ours.bits(), sdk.0, "{ours:?}");
        }
    }

    #[test]
    fn hresult_values_match_sdk() {
        let pairs = [
            (hr::S_FALSE, F::S_FALSE),
            (hr::E_NOTIMPL, F::E_NOTIMPL),
            (hr::E_NOINTERFACE, F::E_NOINTERFACE),
            (hr::E_POINTER, F::E_POINTER),
            (hr::E_FAIL, F::E_FAIL),
            (hr::E_UNEXPECTED, F::E_UNEXPECTED),
            (hr::E_ACCESSDENIED, F::E_ACCESSDENIED),
            (hr::E_OUTOFMEMORY, F::E_OUTOFMEMORY),
            (hr::E_INVALIDARG, F::E_INVALIDARG),
            (hr::CLASS_E_NOAGGREGATION, F::CLASS_E_NOAGGREGATION),
            (hr::CLASS_E_CLASSNOTAVAILABLE, F::CLASS_E_CLASSNOTAVAILABLE),
            (hr::REGDB_E_CLASSNOTREG, F::REGDB_E_CLASSNOTREG),
            (hr::CO_E_NOTINITIALIZED, F::CO_E_NOTINITIALIZED),
            (hr::CO_E_SERVER_EXEC_FAILURE, F::CO_E_SERVER_EXEC_FAILURE),
            (hr::RPC_E_CHANGED_MODE, F::RPC_E_CHANGED_MODE),
        ];
        for (ours, sdk) in pairs {
            assert_eq!(ours.0, sdk.0, "{ours}");
        }
    }

    #[test]
    fn second_initialize_reports_already_initialized() {
        let apt = Apartment::enter(&Ole32, CoInit::MULTITHREADED).expect("first init");
        assert_eq!(initialize_ex(&Ole32, CoInit::MULTITHREADED), hr::S_FALSE);
        uninitialize(&Ole32);
        drop(apt);
    }

    #[test]
    fn switching_model_reports_changed_mode() {
        let _apt = Apartment::enter(&Ole32, CoInit::MULTITHREADED).expect("mta");
        let err = Apartment::enter(&Ole32, CoInit::APARTMENTTHREADED)
            .err()
            .expect("sta after mta");
        assert_eq!(err.code(), Some(hr::RPC_E_CHANGED_MODE));
    }

    #[test]
    fn unregistered_class_is_classnotreg() {
        let _apt = Apartment::enter(&Ole32, CoInit::MULTITHREADED).expect("mta");
        let clsid = Guid::parse("{B0C2F4A1-7D3E-4F59-9A8B-2C6D1E0F3A57}").expect("guid");
        let err = create::<_, IUnknown>(&Ole32, &clsid, None, ClsCtx::INPROC_SERVER)
            .err()
            .expect("nothing registered under this CLSID");
        assert_eq!(err.code(), Some(hr::REGDB_E_CLASSNOTREG));
    }

    #[test]
    fn class_type_never_reaches_ole32() {
        // No apartment: a native call would return CO_E_NOTINITIALIZED.
        let clsid = Guid::parse("{B0C2F4A1-7D3E-4F59-9A8B-2C6D1E0F3A57}").expect("guid");
        let ty = TypeDesc::class("Widget", clsid);
        let err = create_instance(&Ole32, &clsid, None, ClsCtx::ALL, &ty)
            .err()
            .expect("precondition");
        assert_eq!(err.code(), None);
    }

    #[test]
    fn message_text_is_available() {
        let text = crate::platform::message(hr::E_INVALIDARG).expect("system text");
        assert!(!text.is_empty());
    }
}
