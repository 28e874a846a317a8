//! Semantic checks for the lumen front end.
//!
//! - `definite_assignment` - use-before-declaration, use-before-assignment
//!   and double specification of local non-reassignable values
//! - `flow_state` - the flow record and its merge functions
//! - `decidability` - circular inheritance, self types and variance in
//!   supertype clauses, with in-place repair of the type model
//! - `unit_checker` - runs both over a compilation unit
//! - `options` - `CheckerOptions`

pub mod decidability;
pub mod definite_assignment;
pub mod flow_state;
pub mod options;
pub mod unit_checker;

pub use decidability::DecidabilityChecker;
pub use definite_assignment::DefiniteAssignmentChecker;
pub use flow_state::FlowState;
pub use options::{CheckerOptions, OptionsError};
pub use unit_checker::UnitChecker;

/// A diagnostic and the node it belongs to.
pub type NodeDiagnostic = (lumen_ast::NodeIndex, lumen_common::Diagnostic);
