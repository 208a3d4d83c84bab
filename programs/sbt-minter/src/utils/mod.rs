pub mod profile;
pub mod signature;
