//! Attribute macro documentation.

/// Attribute macro giving a struct single-inheritance layout under a base
/// class.
///
/// Inserts a `base` field of the given type as the first field, marks the
/// struct `#[repr(C)]` (the base subobject sits at offset zero, so derived
/// pointers can be upcast by a plain cast) and emits `Deref`/`DerefMut`
/// impls targeting the base, so methods the subclass doesn't shadow fall
/// through to the base implementation.
///
/// # Example
/// ```rust
///# use dispatch_fixture::subclass;
/// struct Engine {
///     rpm: u32,
/// }
///
/// #[subclass(Engine)]
/// struct TurboEngine;
///
/// let turbo = TurboEngine { base: Engine { rpm: 7000 } };
/// assert_eq!(turbo.rpm, 7000); // falls through to the base field
/// ```
pub use dispatch_fixture_derive::subclass;
