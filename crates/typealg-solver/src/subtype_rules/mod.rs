//! Subtyping rules, one module per family of type shapes.
//!
//! Each module adds methods to [`SubtypeChecker`](crate::SubtypeChecker)
//! and only handles its shape on the left-hand side; the dispatcher in
//! `subtype.rs` flips comparisons as needed.

mod generics;
mod unions;
