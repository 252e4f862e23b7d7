//! Foundation types for the support assistant.
//!
//! This crate provides the shared vocabulary used by rules and issues.
//! It has zero external dependencies, making it suitable as a foundation layer.
//!
//! # Type Categories
//!
//! - **Severity types**: [`Severity`]
//! - **Classification types**: [`Audience`], [`Category`]

mod classification;
mod severity;

pub use classification::{Audience, Category};
pub use severity::{Severity, UnknownVariant};
