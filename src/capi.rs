//! C ABI export surface.
//!
//! Every member of the fixture is callable across the library boundary, so a
//! binding generator or foreign test harness can construct, call and delete
//! without going through Rust. Deletion routes through [`Teardown`], so the
//! destructor-virtuality asymmetry is observable at the ABI boundary too:
//! `fixture_base_a_delete` on an upcast `SubA` pointer emits only `~BaseA`,
//! while `fixture_base_b_delete` on an upcast `SubB` pointer emits the full
//! chain.
//!
//! All shims are null-tolerant no-ops. Trace access from C goes through
//! [`fixture_trace_len`], [`fixture_trace_event`] and
//! [`fixture_trace_clear`].

#![allow(clippy::missing_safety_doc)]

use std::alloc::{dealloc, Layout};
use std::mem::{align_of, size_of};
use std::os::raw::c_char;
use std::ptr::NonNull;

use crate::handle::Teardown;
use crate::nonvirt::{BaseA, SubA};
use crate::trace;
use crate::virt::{BaseB, SubB};

// Deleters recover the allocation layout from the deleted pointer's static
// type. Sound only because each subclass adds no fields of its own, so base
// and derived layouts coincide.
const _: () = {
    assert!(size_of::<SubA>() == size_of::<BaseA>());
    assert!(align_of::<SubA>() == align_of::<BaseA>());
    assert!(size_of::<SubB>() == size_of::<BaseB>());
    assert!(align_of::<SubB>() == align_of::<BaseB>());
};

macro_rules! alloc_shims {
    ($($new:ident, $delete:ident => $ty:ty : $ctor:expr;)*) => {
        $(
        #[no_mangle]
        pub extern "C" fn $new() -> *mut $ty {
            Box::into_raw(Box::new($ctor))
        }

        /// Deletes an allocation through a pointer statically typed as the
        /// shim's type, running that type's teardown policy.
        #[no_mangle]
        pub unsafe extern "C" fn $delete(this: *mut $ty) {
            let Some(this) = NonNull::new(this) else { return };
            <$ty as Teardown>::teardown(this);
            dealloc(this.as_ptr().cast(), Layout::new::<$ty>());
        }
        )*
    };
}

alloc_shims! {
    fixture_base_a_new, fixture_base_a_delete => BaseA: BaseA::new();
    fixture_sub_a_new, fixture_sub_a_delete => SubA: SubA::new();
    fixture_base_b_new, fixture_base_b_delete => BaseB: BaseB::new();
    fixture_sub_b_new, fixture_sub_b_delete => SubB: SubB::new();
}

macro_rules! method_shims {
    ($($shim:ident => $ty:ty , $method:ident;)*) => {
        $(
        #[no_mangle]
        pub unsafe extern "C" fn $shim(this: *const $ty) {
            if let Some(this) = this.as_ref() {
                this.$method();
            }
        }
        )*
    };
}

method_shims! {
    fixture_base_a_normal_method => BaseA, normal_method;
    fixture_base_a_virtual_method => BaseA, virtual_method;
    fixture_base_a_virtual_method2 => BaseA, virtual_method2;
    fixture_sub_a_normal_method => SubA, normal_method;
    fixture_sub_a_virtual_method => SubA, virtual_method;
    fixture_sub_a_virtual_method2 => SubA, virtual_method2;
    fixture_base_b_normal_method => BaseB, normal_method;
    fixture_base_b_virtual_method => BaseB, virtual_method;
    fixture_base_b_virtual_method2 => BaseB, virtual_method2;
    fixture_sub_b_normal_method => SubB, normal_method;
    fixture_sub_b_virtual_method => SubB, virtual_method;
    fixture_sub_b_virtual_method2 => SubB, virtual_method2;
}

/// Upcasts a `SubA` pointer to its `BaseA` subobject, which sits at offset
/// zero of the repr(C) layout.
#[no_mangle]
pub extern "C" fn fixture_sub_a_upcast(this: *mut SubA) -> *mut BaseA {
    this.cast()
}

/// Upcasts a `SubB` pointer to its `BaseB` subobject.
#[no_mangle]
pub extern "C" fn fixture_sub_b_upcast(this: *mut SubB) -> *mut BaseB {
    this.cast()
}

/// Number of events currently in the calling thread's trace, or 0 if the
/// trace is inaccessible.
#[no_mangle]
pub extern "C" fn fixture_trace_len() -> usize {
    trace::snapshot().map_or(0, |events| events.len())
}

/// Writes the label of the event at `index` into `buf` as a NUL-terminated
/// string, truncating to `cap` bytes (terminator included).
///
/// Returns the full label length in bytes (terminator excluded), or 0 if the
/// index is out of range. A null `buf` or zero `cap` queries the length
/// without writing.
#[no_mangle]
pub unsafe extern "C" fn fixture_trace_event(index: usize, buf: *mut c_char, cap: usize) -> usize {
    let Ok(events) = trace::snapshot() else {
        return 0;
    };
    let Some(event) = events.get(index) else {
        return 0;
    };

    let label = event.to_string();
    if !buf.is_null() && cap > 0 {
        let len = label.len().min(cap - 1);
        std::ptr::copy_nonoverlapping(label.as_ptr(), buf.cast::<u8>(), len);
        *buf.add(len) = 0;
    }
    label.len()
}

/// Discards every event in the calling thread's trace.
#[no_mangle]
pub extern "C" fn fixture_trace_clear() {
    let _ = trace::clear();
}
