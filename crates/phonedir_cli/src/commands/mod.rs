//! CLI command implementations.

pub mod add;
pub mod fetch;
pub mod import;
pub mod list;
pub mod logs;
pub mod replace;
