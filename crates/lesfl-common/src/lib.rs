//! Shared types for the lesfl frontend.
//!
//! This crate provides foundational types used across the frontend crates:
//! - Source positions (`Position`, `SourceId`)
//! - Dense opaque id newtypes (`KeyIdent`, `LocalIndex`, `TypeParamIndex`, `FieldIndex`)
//! - The error accumulator (`Error`, `ErrorSink`) and the fatal internal error type
//!   (`FrontendError`)

pub mod error;
pub mod ids;
pub mod position;

pub use error::{Error, ErrorCategory, ErrorSink, FrontendError};
pub use ids::{FieldIndex, KeyIdent, LocalIndex, TypeParamIndex};
pub use position::{Position, SourceId};
