//! Presentation Layer
//!
//! This layer handles:
//! - Creating use cases with infrastructure dependencies
//! - Output formatting (text/NDJSON)
//!
//! ## Structure
//!
//! - `factory` - Creates use cases with proper dependencies (dependency injection)
//! - `output` - Build and watch event reporters
//!
//! ## Usage
//!
//! ```ignore
//! use docwatch::presentation::factory;
//!
//! let runner = Arc::new(factory::create_template_build(&config, &base));
//! let orchestrator = factory::create_orchestrator(&config, runner)?;
//! let result = orchestrator.execute_parallel(config.tasks(&base));
//! ```

pub mod factory;
pub mod output;

pub use factory::{create_orchestrator, create_template_build, create_watch_engine};
pub use output::{create_reporter, BuildReporter, OutputFormat};
