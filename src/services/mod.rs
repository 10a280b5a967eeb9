//! Business logic services for the knowledge map.
//!
//! Services orchestrate the sanitizer, layout engine and generator and
//! handle the expansion flow rules, using the `FromContext` derive macro
//! for dependency injection.

mod expansion;

pub use expansion::{ExpandOutcome, ExpansionService};
