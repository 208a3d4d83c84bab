//! Property-based fuzz testing library for the Task Trader program
//!
//! Simulates task and application lifecycles off-chain, driving the
//! program's own transition functions and settlement math.
//!
//! # Usage
//!
//! ```bash
//! # Run all property-based tests
//! cargo test --release
//!
//! # Run the fuzz test runner
//! cargo run --release
//!
//! # Run with more iterations
//! PROPTEST_CASES=10000 cargo test --release
//! ```

pub mod arbitrary;
pub mod invariants;
pub mod scenarios;

pub use arbitrary::*;
pub use invariants::*;
pub use scenarios::*;

pub use task_trader::state::{AcceptanceFlow, ApplicationState, TaskState};

// Include fuzz targets as test modules
#[cfg(test)]
#[path = "../fuzz_targets/approve_application.rs"]
mod approve_application_tests;

#[cfg(test)]
#[path = "../fuzz_targets/withdraw.rs"]
mod withdraw_tests;

#[cfg(test)]
#[path = "../fuzz_targets/application_lifecycle.rs"]
mod application_lifecycle_tests;
