//! CLI command implementations

pub mod init;
pub mod migrate;
pub mod status;
pub mod translate;
pub mod validate;
