//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod change_processor;
pub mod compiler;
pub mod task_runner;
pub mod template_renderer;

pub use change_processor::ChangeProcessor;
pub use compiler::{CompileError, Compiler};
pub use task_runner::TaskRunner;
pub use template_renderer::{PassthroughRenderer, RenderError, TemplateRenderer};
