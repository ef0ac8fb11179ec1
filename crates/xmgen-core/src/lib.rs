#![warn(missing_docs)]

//! Arity-dispatching expansion engine for synchronized multi-artifact code
//! generation.
//!
//! From one declarative spec and one call site's argument list, the engine
//! emits several textual artifacts that stay in lockstep: the variadic tail
//! is split into fixed-size groups exactly once, and every declared output
//! template renders its repeated bodies against that single grouping, so
//! the k-th unit of each artifact always describes the same group. Malformed
//! call sites (no variadic arguments, or a tail that does not split into
//! whole groups) fail generation with the spec's configured diagnostic text
//! instead of producing partial output.

pub mod classify;
pub mod error;
pub mod generator;
pub mod ladder;
pub mod render;
pub mod spec;
pub mod template;
pub mod writer;

// Re-export public API
pub use classify::{classify, Classification, Group};
pub use error::{GenError, SpecError};
pub use generator::{Generator, Invocation};
pub use ladder::{ExpansionRule, Ladder};
pub use render::{render_fallback, render_normal, FallbackKind};
pub use spec::{CompiledOutput, GeneratorSpec};
pub use template::{resolve_constants, RenderContext, Template, TemplateToken};
pub use writer::{FileWriteResult, OutputWriter, OutputWriterConfig};
