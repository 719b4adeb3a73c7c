// ── Flag enumerations ─────────────────────────────────────────────────────────
//
// `CoInit` (COINIT_*) and `ClsCtx` (CLSCTX_*) mirror the Windows SDK constant
// sets bit for bit.  The numeric values are part of the ABI: they are passed
// straight through to ole32 and must never be renumbered.
//
// Both types serialize as flag-name text ("INPROC_SERVER | LOCAL_SERVER") so
// activation profiles stay readable.

mod clsctx;
mod coinit;

pub use clsctx::ClsCtx;
pub use coinit::{CoInit, Concurrency};

use bitflags::Flags;

/// Every named flag of `F` with its numeric value, in declaration order.
///
/// Zero-valued flags (`COINIT_MULTITHREADED`) are included.
pub fn named_values<F: Flags>() -> impl Iterator<Item = (&'static str, F::Bits)> {
    F::FLAGS.iter().map(|f| (f.name(), f.value().bits()))
}
