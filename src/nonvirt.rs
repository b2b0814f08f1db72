//! The hierarchy whose base destructor is *not* virtual: [`BaseA`] and
//! [`SubA`].
//!
//! `normal_method` is an inherent method on both types, so the declared type
//! of the handle a call is made through picks the implementation (static
//! binding). `virtual_method` and `virtual_method2` indirect through the
//! object's dispatch table, so the most-derived type picks the implementation
//! whatever the handle's declared type is (dynamic binding).
//!
//! Because `~BaseA` is not virtual, the table has no destructor slot: an
//! owning [`Handle<BaseA>`](crate::Handle) referencing a `SubA` runs only
//! `~BaseA` on destruction. That incomplete teardown is the behavior under
//! test, not a bug.

use crate::subclass;
use crate::trace::{self, Event};

/// Dispatch table for hierarchy A. One slot per virtual method, shared slot
/// order for base and derived tables. No teardown slot: the destructor is not
/// virtual.
pub(crate) struct AVTable {
    pub(crate) virtual_method: fn(&BaseA),
    pub(crate) virtual_method2: fn(&BaseA),
}

static BASE_A_VTABLE: AVTable = AVTable {
    virtual_method: base_a_virtual_method,
    virtual_method2: base_a_virtual_method2,
};

static SUB_A_VTABLE: AVTable = AVTable {
    virtual_method: sub_a_virtual_method,
    virtual_method2: sub_a_virtual_method2,
};

fn base_a_virtual_method(_this: &BaseA) {
    trace::record(Event::Method("BaseA", "virtual_method"));
}

fn base_a_virtual_method2(_this: &BaseA) {
    trace::record(Event::Method("BaseA", "virtual_method2"));
}

// The overriding slots receive the base subobject. SubA adds no fields, so
// there is no derived state to recover through a downcast.

fn sub_a_virtual_method(_this: &BaseA) {
    trace::record(Event::Method("SubA", "virtual_method"));
}

fn sub_a_virtual_method2(_this: &BaseA) {
    trace::record(Event::Method("SubA", "virtual_method2"));
}

/// Root of the non-virtual-destructor hierarchy.
///
/// Carries no state beyond its dispatch-table reference; every constructor,
/// destructor and method body emits one [`Event`].
pub struct BaseA {
    pub(crate) vtable: &'static AVTable,
}

impl BaseA {
    pub fn new() -> BaseA {
        trace::record(Event::Construct("BaseA"));
        BaseA {
            vtable: &BASE_A_VTABLE,
        }
    }

    /// Not virtual: always resolves here when called through a `BaseA`-typed
    /// handle, even when the object is really a [`SubA`].
    pub fn normal_method(&self) {
        trace::record(Event::Method("BaseA", "normal_method"));
    }

    /// Virtual: resolves through the object's dispatch table.
    pub fn virtual_method(&self) {
        (self.vtable.virtual_method)(self);
    }

    /// Virtual: resolves through the object's dispatch table.
    pub fn virtual_method2(&self) {
        (self.vtable.virtual_method2)(self);
    }
}

impl Drop for BaseA {
    fn drop(&mut self) {
        trace::record(Event::Destroy("BaseA"));
    }
}

/// Subclass of [`BaseA`], overriding all three methods.
#[subclass(BaseA)]
pub struct SubA;

impl SubA {
    pub fn new() -> SubA {
        let mut base = BaseA::new();
        // The most-derived constructor installs its own dispatch table, the
        // way a C++ constructor rewrites the vtable pointer.
        base.vtable = &SUB_A_VTABLE;
        trace::record(Event::Construct("SubA"));
        SubA { base }
    }

    /// Shadows [`BaseA::normal_method`]: resolves here only when the call is
    /// made through a `SubA`-typed handle.
    pub fn normal_method(&self) {
        trace::record(Event::Method("SubA", "normal_method"));
    }
}

impl Drop for SubA {
    fn drop(&mut self) {
        // The embedded base drops right after this body, giving the
        // derived-then-base destructor order.
        trace::record(Event::Destroy("SubA"));
    }
}
