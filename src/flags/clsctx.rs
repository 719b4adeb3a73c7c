// ── CLSCTX ────────────────────────────────────────────────────────────────────
//
// Source of truth: wtypesbase.h.  Passed as `dwClsContext` to
// `CoCreateInstance`; selects in-process, local-server or remote-server
// activation and a handful of behavioral switches.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::hresult::{HResult, E_INVALIDARG};

bitflags! {
    /// Execution contexts in which a newly created object may run.
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct ClsCtx: u32 {
        /// DLL loaded into the caller's process.
        const INPROC_SERVER                  = 0x1;
        const INPROC_HANDLER                 = 0x2;
        /// EXE server on the same machine.
        const LOCAL_SERVER                   = 0x4;
        const INPROC_SERVER16                = 0x8;
        /// Server on another machine.
        const REMOTE_SERVER                  = 0x10;
        const INPROC_HANDLER16               = 0x20;
        const RESERVED1                      = 0x40;
        const RESERVED2                      = 0x80;
        const RESERVED3                      = 0x100;
        const RESERVED4                      = 0x200;
        const NO_CODE_DOWNLOAD               = 0x400;
        const RESERVED5                      = 0x800;
        const NO_CUSTOM_MARSHAL              = 0x1000;
        const ENABLE_CODE_DOWNLOAD           = 0x2000;
        const NO_FAILURE_LOG                 = 0x4000;
        const DISABLE_AAA                    = 0x8000;
        const ENABLE_AAA                     = 0x10000;
        const FROM_DEFAULT_CONTEXT           = 0x20000;
        /// Run the server as 32-bit.  Excludes `ACTIVATE_64_BIT_SERVER`.
        const ACTIVATE_X86_SERVER            = 0x40000;
        const ACTIVATE_32_BIT_SERVER         = 0x40000;
        /// Run the server as 64-bit.  Excludes `ACTIVATE_32_BIT_SERVER`.
        const ACTIVATE_64_BIT_SERVER         = 0x80000;
        const ENABLE_CLOAKING                = 0x100000;
        const APPCONTAINER                   = 0x400000;
        const ACTIVATE_AAA_AS_IU             = 0x800000;
        const RESERVED6                      = 0x1000000;
        const ACTIVATE_ARM32_SERVER          = 0x2000000;
        const ALLOW_LOWER_TRUST_REGISTRATION = 0x4000000;
        const PS_DLL                         = 0x80000000;

        // Composites from the SDK.
        const INPROC = Self::INPROC_SERVER.bits() | Self::INPROC_HANDLER.bits();
        const SERVER = Self::INPROC_SERVER.bits()
            | Self::LOCAL_SERVER.bits()
            | Self::REMOTE_SERVER.bits();
        const ALL = Self::INPROC_SERVER.bits()
            | Self::INPROC_HANDLER.bits()
            | Self::LOCAL_SERVER.bits()
            | Self::REMOTE_SERVER.bits();
    }
}

impl ClsCtx {
    const BITNESS: Self = Self::ACTIVATE_32_BIT_SERVER.union(Self::ACTIVATE_64_BIT_SERVER);

    /// Reject the flag sets `CoCreateInstance` rejects, with the code it
    /// returns.  The two bitness selectors are mutually exclusive.
    pub const fn validate(self) -> Result<(), HResult> {
        if self.contains(Self::BITNESS) {
            Err(E_INVALIDARG)
        } else {
            Ok(())
        }
    }

    /// Whether this context can load a DLL into the calling process.
    pub const fn allows_in_process(self) -> bool {
        self.intersects(Self::INPROC)
    }
}

impl Default for ClsCtx {
    fn default() -> Self {
        Self::ALL
    }
}
