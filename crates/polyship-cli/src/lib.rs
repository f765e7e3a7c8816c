//! polyship CLI library
//!
//! This crate exposes the CLI internals as a library so the orchestrator and
//! report formatting can be tested without spawning the binary.

pub mod cli;
pub mod commands;
pub mod error;
pub mod logger;
pub mod orchestrator;
pub mod ui;

pub use error::{CliError, Result};
pub use orchestrator::{Orchestrator, Reporter, RunOutcome, Stage, TargetError, TargetFailure};
