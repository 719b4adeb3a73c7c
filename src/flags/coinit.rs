// ── COINIT ────────────────────────────────────────────────────────────────────
//
// Source of truth: objbase.h / combaseapi.h.  Passed as `dwCoInit` to
// `CoInitializeEx`.

use bitflags::bitflags;
use serde::{ser, Deserialize, Serialize, Serializer};

use crate::hresult::{HResult, E_INVALIDARG};

bitflags! {
    /// Concurrency model and initialization options for `CoInitializeEx`.
    ///
    /// `MULTITHREADED` is zero: the apartment/multi-threaded choice is a single
    /// bit, so the two models cannot both be requested.  Any bit outside the
    /// defined set makes the OS fail the call with `E_INVALIDARG`.
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Deserialize)]
    #[serde(transparent)]
    pub struct CoInit: u32 {
        /// Multi-threaded apartment (`COINIT_MULTITHREADED`).
        const MULTITHREADED     = 0x0;
        /// Single-threaded apartment (`COINIT_APARTMENTTHREADED`).
        const APARTMENTTHREADED = 0x2;
        /// Disable DDE for OLE1 support.
        const DISABLE_OLE1DDE   = 0x4;
        /// Trade memory for speed.
        const SPEED_OVER_MEMORY = 0x8;
    }
}

/// The two apartment models, for building a `CoInit` without touching bits.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Concurrency {
    /// Single-threaded apartment.
    Apartment,
    /// Multi-threaded apartment.
    Multi,
}

impl CoInit {
    pub const fn new(model: Concurrency) -> Self {
        match model {
            Concurrency::Apartment => Self::APARTMENTTHREADED,
            Concurrency::Multi => Self::MULTITHREADED,
        }
    }

    pub const fn concurrency(self) -> Concurrency {
        if self.contains(Self::APARTMENTTHREADED) {
            Concurrency::Apartment
        } else {
            Concurrency::Multi
        }
    }

    /// Reject the flag sets `CoInitializeEx` rejects, with the code it returns.
    pub const fn validate(self) -> Result<(), HResult> {
        if self.bits() & !Self::all().bits() != 0 {
            Err(E_INVALIDARG)
        } else {
            Ok(())
        }
    }
}

// The bitflags text writer skips zero-valued flags, which would drop
// `MULTITHREADED`.  Always lead with the model, then the options.
impl Serialize for CoInit {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        let mut text = match self.concurrency() {
            Concurrency::Apartment => "APARTMENTTHREADED",
            Concurrency::Multi => "MULTITHREADED",
        }
        .to_owned();
        let options = self.difference(Self::APARTMENTTHREADED);
        if !options.is_empty() {
            text.push_str(" | ");
            bitflags::parser::to_writer(&options, &mut text).map_err(ser::Error::custom)?;
        }
        s.serialize_str(&text)
    }
}

impl Default for CoInit {
    /// What `CoInitialize` requests.
    fn default() -> Self {
        Self::APARTMENTTHREADED
    }
}
