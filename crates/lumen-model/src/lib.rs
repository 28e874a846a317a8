//! Declaration and produced-type model.
//!
//! The model is built by earlier front-end phases (or directly by a host) and
//! queried by the checkers. It uses:
//!
//! - **Arena ids** (`DeclId`, `PackageId`): declaration identity is the id,
//!   never the name.
//! - **Interned types** (`TypeId`): O(1) type equality; structurally equal
//!   produced types share an id.
//! - **Explicit graph walks** for recursion detection, bounded by
//!   [`recursion::RecursionGuard`].
//!
//! Only supertype lists are ever mutated after construction, and only through
//! the repair methods on [`TypeModel`].

pub mod decl;
mod error;
mod format;
mod inheritance;
mod intern;
mod model;
pub mod recursion;
mod self_type;
pub mod types;
mod variance;

pub use decl::{DeclFlags, DeclId, DeclKind, Declaration, Package, PackageId, Variance};
pub use error::ModelError;
pub use intern::TypeInterner;
pub use model::{ANYTHING_NAME, BASIC_NAME, TypeModel};
pub use types::{TypeData, TypeId, TypeList};

/// The set of declarations currently being defined, passed to the recursion
/// and self-type queries.
pub type DefiningSet = rustc_hash::FxHashSet<DeclId>;
