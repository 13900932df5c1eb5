pub mod classifier;
pub mod merge;
pub mod normalize;
pub mod popularity;
pub mod pricing;
pub mod summarizer;

#[cfg(feature = "cli")]
pub mod dashboard;
#[cfg(feature = "cli")]
pub mod errors;

#[cfg(feature = "cli")]
pub use errors::{DashboardError, DashboardResult};
