//! CLI command handlers

pub mod get;
pub mod ls;
pub mod rm;
pub mod serve;
