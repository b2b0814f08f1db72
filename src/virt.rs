//! The hierarchy whose base destructor *is* virtual: [`BaseB`] and [`SubB`].
//!
//! Method binding works exactly as in [`nonvirt`](crate::nonvirt): inherent
//! `normal_method` (static binding), table-dispatched `virtual_method` and
//! `virtual_method2` (dynamic binding). The difference is the `teardown` slot
//! in [`BVTable`]: destruction through a `BaseB`-typed handle looks the chain
//! up by the object's dynamic type, so the full `~SubB` then `~BaseB`
//! sequence always runs.

use std::ptr::{self, NonNull};

use crate::subclass;
use crate::trace::{self, Event};

/// Dispatch table for hierarchy B. Same slot order as hierarchy A, plus the
/// virtual-destructor slot.
pub(crate) struct BVTable {
    pub(crate) virtual_method: fn(&BaseB),
    pub(crate) virtual_method2: fn(&BaseB),
    /// Runs the destructor chain of the most-derived type in place. The
    /// caller owns the allocation and frees it afterwards.
    pub(crate) teardown: unsafe fn(NonNull<BaseB>),
}

static BASE_B_VTABLE: BVTable = BVTable {
    virtual_method: base_b_virtual_method,
    virtual_method2: base_b_virtual_method2,
    teardown: base_b_teardown,
};

static SUB_B_VTABLE: BVTable = BVTable {
    virtual_method: sub_b_virtual_method,
    virtual_method2: sub_b_virtual_method2,
    teardown: sub_b_teardown,
};

fn base_b_virtual_method(_this: &BaseB) {
    trace::record(Event::Method("BaseB", "virtual_method"));
}

fn base_b_virtual_method2(_this: &BaseB) {
    trace::record(Event::Method("BaseB", "virtual_method2"));
}

unsafe fn base_b_teardown(this: NonNull<BaseB>) {
    ptr::drop_in_place(this.as_ptr());
}

fn sub_b_virtual_method(_this: &BaseB) {
    trace::record(Event::Method("SubB", "virtual_method"));
}

fn sub_b_virtual_method2(_this: &BaseB) {
    trace::record(Event::Method("SubB", "virtual_method2"));
}

unsafe fn sub_b_teardown(this: NonNull<BaseB>) {
    // Installed only by SubB::new, so the allocation is a SubB and the base
    // subobject sits at offset zero of its repr(C) layout.
    ptr::drop_in_place(this.cast::<SubB>().as_ptr());
}

/// Root of the virtual-destructor hierarchy.
pub struct BaseB {
    pub(crate) vtable: &'static BVTable,
}

impl BaseB {
    pub fn new() -> BaseB {
        trace::record(Event::Construct("BaseB"));
        BaseB {
            vtable: &BASE_B_VTABLE,
        }
    }

    /// Not virtual: the handle's declared type picks the implementation.
    pub fn normal_method(&self) {
        trace::record(Event::Method("BaseB", "normal_method"));
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

impl Drop for BaseB {
    fn drop(&mut self) {
        trace::record(Event::Destroy("BaseB"));
    }
}

/// Subclass of [`BaseB`], overriding all three methods.
#[subclass(BaseB)]
pub struct SubB;

impl SubB {
    pub fn new() -> SubB {
        let mut base = BaseB::new();
        base.vtable = &SUB_B_VTABLE;
        trace::record(Event::Construct("SubB"));
        SubB { base }
    }

    /// Shadows [`BaseB::normal_method`].
    pub fn normal_method(&self) {
        trace::record(Event::Method("SubB", "normal_method"));
    }
}

impl Drop for SubB {
    fn drop(&mut self) {
        trace::record(Event::Destroy("SubB"));
    }
}
