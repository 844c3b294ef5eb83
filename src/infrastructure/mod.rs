//! Infrastructure Layer
//!
//! Concrete implementations of domain and application ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `compiler/` - Engine process and template rendering adapters
//! - `notify_source` - OS file notifications via `notify`

pub mod compiler;
pub mod notify_source;

// Re-export for convenience
pub use compiler::{ProcessCompiler, TomlTemplateRenderer};
pub use notify_source::NotifySource;
