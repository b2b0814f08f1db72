#![deny(rustdoc::broken_intra_doc_links)]

//! A minimal fixture for observing single-inheritance method dispatch and
//! destructor semantics across a library boundary.
//!
//! Two parallel two-level hierarchies differ only in destructor virtuality:
//! [`BaseA`]/[`SubA`] (non-virtual destructor) and [`BaseB`]/[`SubB`]
//! (virtual destructor). Each type exposes `normal_method` (statically bound
//! to the handle's declared type), `virtual_method` and `virtual_method2`
//! (dynamically bound to the object's most-derived type). Nothing computes
//! anything: every constructor, destructor and method body appends one
//! [`Event`] to the [`trace`] sink, which is the only thing a harness can
//! (and should) assert against.
//!
//! ```rust
//! use dispatch_fixture::{trace, Event, Handle, SubB};
//!
//! trace::clear().unwrap();
//!
//! let handle = Handle::new(SubB::new()).into_base();
//! handle.virtual_method2();
//! drop(handle);
//!
//! let labels: Vec<String> = trace::take()
//!     .unwrap()
//!     .iter()
//!     .map(Event::to_string)
//!     .collect();
//! assert_eq!(
//!     labels,
//!     ["BaseB", "SubB", "SubB::virtual_method2", "~SubB", "~BaseB"]
//! );
//! ```
//!
//! Destroying a [`SubA`] through a [`Handle<BaseA>`] instead emits only
//! `~BaseA`: the slicing hazard of deleting through a non-virtual base
//! destructor, reproduced on purpose (see [`handle`] module docs).

#[cfg(test)]
mod tests;

mod derives;
pub mod handle;
mod nonvirt;
mod virt;

pub mod capi;
pub mod trace;

pub use derives::subclass;
pub use handle::{Handle, Teardown};
pub use nonvirt::{BaseA, SubA};
pub use trace::Event;
pub use virt::{BaseB, SubB};
