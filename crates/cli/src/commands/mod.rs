//! Subcommand implementations

pub mod ask;
pub mod estimate;
pub mod health;
pub mod schema;
