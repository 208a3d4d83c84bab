//! Instruction handlers for the SBT Minter program

pub mod constants;
pub mod mint_helpers;

pub mod create_sbt_token_mint;
pub mod mint_sbt_token;
pub mod update_sbt_admin;
pub mod update_sbt_info;

#[allow(ambiguous_glob_reexports)]
pub use create_sbt_token_mint::*;
#[allow(ambiguous_glob_reexports)]
pub use mint_sbt_token::*;
#[allow(ambiguous_glob_reexports)]
pub use update_sbt_admin::*;
#[allow(ambiguous_glob_reexports)]
pub use update_sbt_info::*;
