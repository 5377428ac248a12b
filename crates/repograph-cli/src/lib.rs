//! Repograph CLI - file and function dependency graphs for whole repositories.
//!
//! The binary is a thin shell around `repograph-analysis`: it reads a
//! directory into memory, loads path aliases from `tsconfig.json` /
//! `jsconfig.json`, runs the pipeline with a progress bar, and prints or
//! writes the result.
//!
//! - [`provider`] - directory walk into an in-memory file map
//! - [`aliases`] - `compilerOptions.paths` loader
//! - [`config`] - layered configuration (defaults, `repograph.json`, env, flags)
//! - [`logger`] - tracing setup
//! - [`ui`] - progress bar and status messages

pub mod aliases;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logger;
pub mod provider;
pub mod ui;

pub use error::{CliError, Result};
