//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish the two
//! halves of a run: collecting answers and materializing the manifest.

pub mod collector;
pub mod scaffold_service;

pub use collector::{CollectOptions, Collector};
pub use scaffold_service::{MaterializeReport, PlannedFile, ScaffoldService};
