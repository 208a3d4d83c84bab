//! Instruction handlers for the Task Trader program

pub mod constants;
pub mod settlement_helpers;
pub mod token_helpers;

pub mod apply_task;
pub mod approve_application;
pub mod create_task;
pub mod initialize;
pub mod reject_application;
pub mod set_task_state;
pub mod submit_acceptance;
pub mod update_acceptance_flow;
pub mod update_admin;
pub mod update_task_support_coin;
pub mod verify_task_application;
pub mod withdraw;

#[allow(ambiguous_glob_reexports)]
pub use apply_task::*;
#[allow(ambiguous_glob_reexports)]
pub use approve_application::*;
#[allow(ambiguous_glob_reexports)]
pub use create_task::*;
#[allow(ambiguous_glob_reexports)]
pub use initialize::*;
#[allow(ambiguous_glob_reexports)]
pub use reject_application::*;
#[allow(ambiguous_glob_reexports)]
pub use set_task_state::*;
#[allow(ambiguous_glob_reexports)]
pub use submit_acceptance::*;
#[allow(ambiguous_glob_reexports)]
pub use update_acceptance_flow::*;
#[allow(ambiguous_glob_reexports)]
pub use update_admin::*;
#[allow(ambiguous_glob_reexports)]
pub use update_task_support_coin::*;
#[allow(ambiguous_glob_reexports)]
pub use verify_task_application::*;
#[allow(ambiguous_glob_reexports)]
pub use withdraw::*;
