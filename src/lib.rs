//! Core library exports for the Laopu Gold intelligence dashboard.
//!
//! The `data` feature exposes the pure pipeline: domain types, the
//! classifier, summarizer, popularity parser, merge/dedupe engine and the
//! discount model. The `cli` feature adds the source adapters, rendering,
//! export and the run orchestration used by the `laopu-intel` binary.

#[cfg(feature = "data")]
pub mod domain;
#[cfg(feature = "data")]
pub mod services;

#[cfg(feature = "cli")]
pub mod catalog;
#[cfg(feature = "cli")]
pub mod export;
#[cfg(feature = "cli")]
pub mod models;
#[cfg(feature = "cli")]
pub mod render;
#[cfg(feature = "cli")]
pub mod sources;
