//! Common test utilities for docwatch CLI tests.
//!
//! This module provides:
//! - `TestEnv`: Isolated project directory plus helpers to run the binary
//! - Assertion macros: `assert_built!`, `assert_output_contains!`
//! - Fixtures: Templates, data files and fake engine scripts

#![allow(dead_code)]

pub mod assertions;
pub mod env;
pub mod fixtures;

pub use assertions::*;
pub use env::*;
pub use fixtures::*;
