//! Command construction and subprocess execution

pub mod options;
pub mod runner;

pub use options::{Options, Pages};
pub use runner::ToolRunner;
