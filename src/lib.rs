//! Caller-side bindings for the Windows COM lifecycle and activation entry
//! points: `CoInitialize`, `CoInitializeEx`, `CoUninitialize` and
//! `CoCreateInstance`, plus the `COINIT_*` / `CLSCTX_*` flag sets and the
//! `HRESULT` vocabulary they use.
//!
//! Every behavior is the operating system's.  The crate passes arguments
//! through, classifies result codes, checks two caller-side preconditions and
//! owns the interface pointers it hands back.

// ── Safety policy ────────────────────────────────────────────────────────────
// Unsafe code is forbidden everywhere except:
//   • `platform::win32` – ole32 FFI
//   • `runtime`         – declares the unsafe `release` contract
//   • `activation`      – releases owned interface pointers on drop
// Each unsafe block in those modules MUST carry a `// SAFETY:` comment.
#![deny(unsafe_code)]

pub mod activation;
pub mod apartment;
pub mod error;
pub mod flags;
pub mod guid;
pub mod hresult;
pub mod platform;
pub mod profile;
pub mod runtime;

pub use activation::{
    create, create_instance, IDispatch, IUnknown, Instance, Interface, TypeDesc, TypeKind, Typed,
};
pub use apartment::{initialize, initialize_ex, uninitialize, Apartment};
pub use error::{ComError, Result};
pub use flags::{ClsCtx, CoInit, Concurrency};
pub use guid::Guid;
pub use hresult::HResult;
pub use runtime::{RawUnknown, Runtime};
