//! Shared utilities for the Task Trader program

pub mod validation;
