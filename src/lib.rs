//! Course Outcome (CO) attainment calculator.
//!
//! An exam is defined once ([`exam::validate`]) and marks are then
//! aggregated per course outcome as often as needed ([`marks::aggregate`]).
//! Both are pure functions; persistence, export and terminal output live in
//! their own modules and are only used by the CLI.

pub mod config;
pub mod error;
pub mod exam;
pub mod export;
pub mod logging;
pub mod marks;
pub mod output;
pub mod store;
pub mod wizard;

pub use error::{MarksError, SetupError};
