//! Migrate legacy HTML sidebar navigation into document front matter.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod export;
pub mod header;
pub mod logging;
pub mod nav;
pub mod normalize;
pub mod pipeline;
pub mod reconcile;
pub mod tree;
pub mod types;
pub mod utils;
