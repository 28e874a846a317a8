//! Common types and utilities for the lumen semantic analyzer.
//!
//! This crate provides foundational types used across all lumen crates:
//! - Diagnostics (`Diagnostic`, codes, message templates)
//! - Source spans (`Span`)
//! - Analysis limits and thresholds
//! - Tracing subscriber setup for debugging checker runs

// Diagnostic codes, message table and the `Diagnostic` record
pub mod diagnostics;
pub use diagnostics::{Diagnostic, DiagnosticCategory, format_message};

// Span - Source location tracking (byte offsets)
pub mod span;
pub use span::Span;

// Centralized limits and thresholds
pub mod limits;

// Opt-in tracing output (LUMEN_LOG / LUMEN_LOG_FORMAT)
pub mod tracing_config;
