//! Domain Layer
//!
//! This is the core of docwatch - build and watch rules without I/O dependencies.
//!
//! ## Structure
//!
//! - `entities/` - Change events, compilation tasks and their outcomes
//! - `value_objects/` - Watch configuration
//! - `services/` - Pattern matching and debouncing
//! - `ports/` - Interface definitions for infrastructure
//!
//! ## Design Principles
//!
//! 1. **No I/O** - This layer never touches the file system or spawns processes
//! 2. **Thread-safe services** - Matcher and debounce gate are shared across threads
//! 3. **Ports & Adapters** - Compilation and rendering go through trait-defined ports

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
