#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Triage heuristics: priority classification and location resolution.
//!
//! Both functions are pure and total — identical input always yields
//! identical output, and neither can fail. The fallback chains are ordered
//! data tables rather than nested conditionals so each rule is
//! independently testable.

pub mod location;
pub mod priority;

pub use location::resolve_location;
pub use priority::classify;
