//! Owning, statically typed handles and the teardown dispatcher.
//!
//! [`Handle<T>`] is the fixture's stand-in for `T*` ownership across the
//! library boundary: method calls through the handle bind statically to `T`
//! (virtual calls still indirect through the object's dispatch table), and
//! dropping the handle performs the deletion a `delete`-through-`T*` would.
//!
//! Which destructor chain runs on deletion is the property under test, and it
//! is decided by [`Teardown`]: hierarchy A looks teardown up by the handle's
//! *static* type (so a [`Handle<BaseA>`] referencing a [`SubA`] runs only
//! `~BaseA`), hierarchy B looks it up through the object's dispatch table (so
//! the full derived-then-base chain always runs).

use std::alloc::{dealloc, Layout};
use std::mem::ManuallyDrop;
use std::ops::{Deref, DerefMut};
use std::ptr::{self, NonNull};

use crate::nonvirt::{BaseA, SubA};
use crate::virt::{BaseB, SubB};

/// Per-type teardown policy: the destructor chain a deletion through a
/// `Self`-typed pointer runs.
pub trait Teardown {
    /// Runs the destructor chain for the allocation behind `this`. The caller
    /// still owns the allocation and is responsible for freeing it.
    ///
    /// # Safety
    /// `this` must point to a valid, fully constructed object reachable
    /// through a `Self`-typed handle, and the pointee must never be used
    /// again after the call.
    unsafe fn teardown(this: NonNull<Self>);
}

impl Teardown for BaseA {
    unsafe fn teardown(this: NonNull<Self>) {
        // ~BaseA is not virtual: only the base destructor runs, even when the
        // allocation is really a SubA. SubA adds no fields beyond the base
        // subobject, so nothing else needed dropping.
        ptr::drop_in_place(this.as_ptr());
    }
}

impl Teardown for SubA {
    unsafe fn teardown(this: NonNull<Self>) {
        ptr::drop_in_place(this.as_ptr());
    }
}

impl Teardown for BaseB {
    unsafe fn teardown(this: NonNull<Self>) {
        // ~BaseB is virtual: the object's dispatch table decides which chain
        // runs, whatever the static type of the deleting handle is.
        let teardown = this.as_ref().vtable.teardown;
        teardown(this);
    }
}

impl Teardown for SubB {
    unsafe fn teardown(this: NonNull<Self>) {
        ptr::drop_in_place(this.as_ptr());
    }
}

/// An owning handle whose statically declared type is `T`.
///
/// Calls made through the handle deref to `T`, so non-virtual methods bind to
/// `T`'s implementation while virtual ones dispatch dynamically. Dropping the
/// handle deletes the object per `T`'s [`Teardown`] policy.
pub struct Handle<T: Teardown> {
    ptr: NonNull<T>,
    // Layout of the original allocation. The allocator knows the true size
    // even when the static type no longer does, so upcast handles stay sound.
    layout: Layout,
}

impl<T: Teardown> Handle<T> {
    /// Moves `value` onto the heap and takes ownership of it.
    pub fn new(value: T) -> Handle<T> {
        Handle {
            ptr: NonNull::from(Box::leak(Box::new(value))),
            layout: Layout::new::<T>(),
        }
    }
}

impl Handle<SubA> {
    /// Upcasts into a handle whose static type is [`BaseA`], without running
    /// any destructor.
    ///
    /// Deleting through the returned handle runs only `~BaseA`: the classic
    /// hazard of deleting a polymorphic object through a base class with a
    /// non-virtual destructor, reproduced on purpose.
    pub fn into_base(self) -> Handle<BaseA> {
        let this = ManuallyDrop::new(self);
        // SubA is repr(C) with the base subobject first, so the pointer cast
        // is an upcast.
        Handle {
            ptr: this.ptr.cast(),
            layout: this.layout,
        }
    }
}

impl Handle<SubB> {
    /// Upcasts into a handle whose static type is [`BaseB`], without running
    /// any destructor.
    ///
    /// Deleting through the returned handle still runs the full `~SubB` then
    /// `~BaseB` chain, since `~BaseB` is virtual.
    pub fn into_base(self) -> Handle<BaseB> {
        let this = ManuallyDrop::new(self);
        Handle {
            ptr: this.ptr.cast(),
            layout: this.layout,
        }
    }
}

impl<T: Teardown> Deref for Handle<T> {
    type Target = T;

    #[inline]
    fn deref(&self) -> &T {
        // SAFETY: ptr is valid and exclusively owned until drop
        unsafe { self.ptr.as_ref() }
    }
}

impl<T: Teardown> DerefMut for Handle<T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut T {
        // SAFETY: same as Deref, plus &mut self guarantees exclusivity
        unsafe { self.ptr.as_mut() }
    }
}

impl<T: Teardown> Drop for Handle<T> {
    fn drop(&mut self) {
        // Run the destructor chain first, then return the original
        // allocation. The stored layout is the one the allocation was made
        // with, whatever chain T's policy ran.
        unsafe {
            T::teardown(self.ptr);
            dealloc(self.ptr.as_ptr().cast(), self.layout);
        }
    }
}
