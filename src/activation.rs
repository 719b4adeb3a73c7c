// ── Generic instance creation ─────────────────────────────────────────────────
//
// `create_instance` wraps `CoCreateInstance`: one class id, an optional
// aggregation outer, an activation context and the requested interface in;
// an owning `Instance` bound to that interface out.
//
// Order of checks:
//   1. requested type must be an interface (caller bug otherwise, no call);
//   2. activation context must not request both bitness selectors
//      (`E_INVALIDARG`, no call);
//   3. the native call; its result is returned unchanged on failure.
// The returned pointer is only looked at when the result is a success code.

#![allow(unsafe_code)]

use std::{fmt, marker::PhantomData, ops::Deref};

use log::{debug, trace};

use crate::{
    error::{ComError, Result},
    flags::ClsCtx,
    guid::{Guid, IID_IDISPATCH, IID_IUNKNOWN},
    hresult::{HResult, E_POINTER},
    runtime::{RawUnknown, Runtime},
};

// ── Requested types ───────────────────────────────────────────────────────────

/// A statically known COM interface.
pub trait Interface {
    const IID: Guid;
    const NAME: &'static str;
}

/// Marker for `IUnknown`.
pub enum IUnknown {}

impl Interface for IUnknown {
    const IID: Guid = IID_IUNKNOWN;
    const NAME: &'static str = "IUnknown";
}

/// Marker for `IDispatch`.
pub enum IDispatch {}

impl Interface for IDispatch {
    const IID: Guid = IID_IDISPATCH;
    const NAME: &'static str = "IDispatch";
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TypeKind {
    Interface,
    /// A concrete (coclass) type.  Cannot be requested from `CoCreateInstance`.
    Class,
}

/// Runtime description of the type an instance is requested as.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct TypeDesc<'a> {
    pub name: &'a str,
    pub guid: Guid,
    pub kind: TypeKind,
}

impl<'a> TypeDesc<'a> {
    pub const fn interface(name: &'a str, iid: Guid) -> Self {
        Self {
            name,
            guid: iid,
            kind: TypeKind::Interface,
        }
    }

    pub const fn class(name: &'a str, clsid: Guid) -> Self {
        Self {
            name,
            guid: clsid,
            kind: TypeKind::Class,
        }
    }
}

impl TypeDesc<'static> {
    pub const fn of<I: Interface>() -> Self {
        Self::interface(I::NAME, I::IID)
    }
}

// ── Instance ──────────────────────────────────────────────────────────────────

/// An owned interface pointer obtained from `create_instance`.
///
/// Holds one reference, released through the producing runtime on drop.
pub struct Instance<'r, R: Runtime + ?Sized> {
    raw: RawUnknown,
    iid: Guid,
    code: HResult,
    rt: &'r R,
}

impl<'r, R: Runtime + ?Sized> Instance<'r, R> {
    /// The interface this pointer was requested as.
    pub fn iid(&self) -> Guid {
        self.iid
    }

    /// The success code `CoCreateInstance` returned (`S_OK` in practice,
    /// but any non-negative code is passed through).
    pub fn code(&self) -> HResult {
        self.code
    }

    /// Borrow the raw pointer, e.g. to pass as an aggregation outer.
    pub fn as_raw(&self) -> RawUnknown {
        self.raw
    }

    /// Give up ownership without releasing.  The caller now owes the
    /// `Release`.
    pub fn into_raw(self) -> RawUnknown {
        let raw = self.raw;
        std::mem::forget(self);
        raw
    }
}

impl<R: Runtime + ?Sized> fmt::Debug for Instance<'_, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("ptr", &self.raw.as_ptr())
            .field("iid", &self.iid)
            .field("code", &self.code)
            .finish()
    }
}

impl<R: Runtime + ?Sized> Drop for Instance<'_, R> {
    fn drop(&mut self) {
        // SAFETY: `raw` came from a successful `create_instance` on `rt` and
        // this is the only owner; `into_raw` forgets `self` so this never
        // runs twice for one reference.
        let remaining = unsafe { self.rt.release(self.raw) };
        trace!("released {:?} (refcount now {remaining})", self.raw.as_ptr());
    }
}

/// An `Instance` statically known to implement `I`.
pub struct Typed<'r, R: Runtime + ?Sized, I: Interface> {
    inner: Instance<'r, R>,
    _interface: PhantomData<I>,
}

impl<'r, R: Runtime + ?Sized, I: Interface> Typed<'r, R, I> {
    pub fn into_instance(self) -> Instance<'r, R> {
        self.inner
    }
}

impl<'r, R: Runtime + ?Sized, I: Interface> Deref for Typed<'r, R, I> {
    type Target = Instance<'r, R>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

// ── Creation ──────────────────────────────────────────────────────────────────

/// Create one instance of `clsid` and obtain `requested` on it.
///
/// `outer` is the controlling unknown for aggregation; pass `None` for an
/// ordinary object.  Loading a DLL or launching a server is up to the OS and
/// the class registration, as selected by `context`.
pub fn create_instance<'r, R: Runtime + ?Sized>(
    rt: &'r R,
    clsid: &Guid,
    outer: Option<RawUnknown>,
    context: ClsCtx,
    requested: &TypeDesc<'_>,
) -> Result<Instance<'r, R>> {
    if requested.kind != TypeKind::Interface {
        return Err(ComError::NotAnInterface {
            name: requested.name.to_owned(),
        });
    }

    let fail = |code: HResult| ComError::Call {
        function: "CoCreateInstance",
        code,
    };

    if let Err(hr) = context.validate() {
        debug!("CoCreateInstance rejected context {:#x}: {hr}", context.bits());
        return Err(fail(hr));
    }

    let iid = requested.guid;
    let (hr, ptr) = rt.create_instance(clsid, outer, context, &iid);
    debug!("CoCreateInstance({clsid}, {}) -> {hr}", requested.name);

    if hr.is_failure() {
        return Err(fail(hr));
    }
    let raw = RawUnknown::new(ptr).ok_or_else(|| fail(E_POINTER))?;
    Ok(Instance {
        raw,
        iid,
        code: hr,
        rt,
    })
}

/// Statically typed `create_instance`.
pub fn create<'r, R: Runtime + ?Sized, I: Interface>(
    rt: &'r R,
    clsid: &Guid,
    outer: Option<RawUnknown>,
    context: ClsCtx,
) -> Result<Typed<'r, R, I>> {
    let inner = create_instance(rt, clsid, outer, context, &TypeDesc::of::<I>())?;
    Ok(Typed {
        inner,
        _interface: PhantomData,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
