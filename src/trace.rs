//! The trace sink, the only observable side effect of the fixture.
//!
//! Every constructor, destructor and method body appends exactly one
//! [`Event`] to a per-thread ordered log. A test harness drives the fixture,
//! then drains the log with [`take`] and asserts on the exact sequence.
//!
//! The sink is thread-local: ordering is guaranteed within a single logical
//! call chain, and concurrently running tests cannot contaminate each other's
//! traces.

use std::cell::{BorrowMutError, RefCell};
use std::fmt;
use std::thread::AccessError;

use thiserror::Error;

thread_local! {
    static TRACE: RefCell<Vec<Event>> = RefCell::new(Vec::new());
}

/// A single trace record.
///
/// The [`Display`](fmt::Display) form matches the labels emitted by the
/// fixture's C++ ancestor: `"BaseA"` for a constructor, `"~BaseA"` for a
/// destructor and `"BaseA::normal_method"` for a method body.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Event {
    /// A constructor body ran for the named type.
    Construct(&'static str),
    /// A destructor body ran for the named type.
    Destroy(&'static str),
    /// A method body ran; the first name identifies the type whose
    /// implementation was resolved, not the handle the call was made through.
    Method(&'static str, &'static str),
}

impl Event {
    /// The type whose constructor, destructor or method produced this event.
    #[inline]
    pub fn type_name(&self) -> &'static str {
        match *self {
            Event::Construct(name) | Event::Destroy(name) | Event::Method(name, _) => name,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Event::Construct(name) => f.write_str(name),
            Event::Destroy(name) => write!(f, "~{}", name),
            Event::Method(name, method) => write!(f, "{}::{}", name, method),
        }
    }
}

#[non_exhaustive]
#[derive(Error, Debug)]
pub enum TraceAccessError {
    #[error(transparent)]
    AccessError(#[from] AccessError),
    #[error(transparent)]
    BorrowMutError(#[from] BorrowMutError),
}

/// Appends an event to the current thread's trace.
///
/// Drop implementations record too, so failures during thread teardown are
/// swallowed instead of propagated.
#[inline]
pub(crate) fn record(event: Event) {
    let _ = try_record(event);
}

#[inline]
fn try_record(event: Event) -> Result<(), TraceAccessError> {
    TRACE.try_with(|trace| {
        trace.try_borrow_mut()?.push(event);
        Ok(())
    })?
}

/// Drains the current thread's trace, leaving it empty.
pub fn take() -> Result<Vec<Event>, TraceAccessError> {
    TRACE.try_with(|trace| Ok(std::mem::take(&mut *trace.try_borrow_mut()?)))?
}

/// Returns a copy of the current thread's trace without clearing it.
pub fn snapshot() -> Result<Vec<Event>, TraceAccessError> {
    TRACE.try_with(|trace| Ok(trace.try_borrow_mut()?.clone()))?
}

/// Discards every recorded event. Harnesses call this between scenarios to
/// keep them independent.
pub fn clear() -> Result<(), TraceAccessError> {
    TRACE.try_with(|trace| {
        trace.try_borrow_mut()?.clear();
        Ok(())
    })?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_labels() {
        assert_eq!(Event::Construct("BaseA").to_string(), "BaseA");
        assert_eq!(Event::Destroy("SubB").to_string(), "~SubB");
        assert_eq!(
            Event::Method("SubA", "virtual_method2").to_string(),
            "SubA::virtual_method2"
        );
    }

    #[test]
    fn test_take_drains() {
        clear().unwrap();

        record(Event::Construct("BaseA"));
        record(Event::Destroy("BaseA"));

        assert_eq!(
            snapshot().unwrap(),
            vec![Event::Construct("BaseA"), Event::Destroy("BaseA")]
        );
        // snapshot must not consume
        assert_eq!(
            take().unwrap(),
            vec![Event::Construct("BaseA"), Event::Destroy("BaseA")]
        );
        assert!(take().unwrap().is_empty());
    }

    #[test]
    fn test_type_name() {
        assert_eq!(Event::Method("BaseB", "normal_method").type_name(), "BaseB");
        assert_eq!(Event::Destroy("SubA").type_name(), "SubA");
    }
}
