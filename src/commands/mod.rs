//! CLI subcommands

pub mod admin;
pub mod list;
pub mod render;
pub mod show;
pub mod stats;
