//! Arena AST for the lumen semantic checkers.
//!
//! The parser and name resolver are external; they (or a test) populate a
//! [`NodeArena`] with nodes whose declarations and references already carry
//! their [`DeclId`](lumen_model::DeclId). Type clauses carry the produced
//! [`TypeId`](lumen_model::TypeId) they resolved to.
//!
//! Diagnostics are attached to nodes with [`NodeArena::add_diagnostic`].

mod arena;
pub mod node;

pub use arena::NodeArena;
pub use node::{FunctionBody, Node, NodeIndex, NodeKind, Qualifier};
