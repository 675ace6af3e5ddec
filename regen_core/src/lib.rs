// regen - random strings that match a regular expression

pub mod alphabet;
pub mod config;
pub mod error;
pub mod generator;
pub mod tree;

// Re-export commonly used items for convenience
pub use config::{CapturePolicy, GeneratorConfig};
pub use error::{RegenError, Result};
pub use generator::{CaptureStore, Generator};
pub use tree::Node;

/// Generates a single string for `pattern` with the default configuration.
pub fn generate(pattern: &str) -> Result<String> {
    Ok(Generator::new(pattern)?.generate())
}
