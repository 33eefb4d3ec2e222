//! Application services: prompt assembly and generation orchestration.

mod generation;
mod prompt;

pub use generation::{GenerationError, GenerationService};
pub use prompt::{build_prompt, TEMPLATE_EXCERPT_CHARS};
