//! Error types for spec loading and generation

use std::path::PathBuf;

use thiserror::Error;

/// Errors detected while loading or validating a generator spec.
///
/// All of these are authoring mistakes in the spec document. They are fatal:
/// generation never starts from a spec that failed to load.
#[derive(Debug, Error)]
pub enum SpecError {
    /// Spec file could not be read
    #[error("failed to read spec file {path}")]
    Io {
        /// Path that failed to read
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Spec document is not valid TOML or misses required sections
    #[error("failed to parse spec document: {0}")]
    Parse(#[from] toml::de::Error),

    /// Malformed placeholder syntax inside a template string
    #[error("invalid template syntax at line {line}: {message}")]
    Syntax {
        /// Line within the template string where the problem sits
        line: usize,
        /// What went wrong
        message: String,
    },

    /// `common.max_repeats` was zero
    #[error("`common.max_repeats` must be at least 1")]
    ZeroMaxRepeats,

    /// `core.group_size` was zero
    #[error("`core.group_size` must be at least 1")]
    ZeroGroupSize,

    /// The same key appears twice in `core.named_args`
    #[error("duplicate named argument key `{0}`")]
    DuplicateArgument(String),

    /// The same constant key is declared twice (or shadows `prefix`)
    #[error("duplicate constant key `{0}`")]
    DuplicateConstant(String),

    /// A template references a constant that is not declared
    #[error("unknown constant key `{0}`")]
    UnknownConstant(String),

    /// Constant cross-references do not form a DAG
    #[error("constant `{0}` participates in a reference cycle")]
    CyclicConstant(String),

    /// A template references a named argument that is not declared
    #[error("unknown named argument key `{0}`")]
    UnknownArgument(String),

    /// A positional reference points past the end of a group
    #[error("positional reference {{{{{index}}}}} is out of range for group size {group_size}")]
    PositionOutOfRange {
        /// The offending 0-based index
        index: usize,
        /// The declared group size
        group_size: usize,
    },

    /// A positional reference appears where no group is in scope
    #[error("positional reference {{{{{index}}}}} is not allowed in `{section}`")]
    PositionOutsideBody {
        /// The offending 0-based index
        index: usize,
        /// The spec field the reference was found in
        section: String,
    },

    /// A constant expansion references invocation state
    #[error("constant `{key}` may not reference invocation arguments or group members")]
    ArgumentInConstant {
        /// Key of the offending constant
        key: String,
    },
}

/// Errors produced while generating for one invocation.
///
/// [`GenError::EmptyInvocation`] and [`GenError::Unparity`] are expected
/// call-site mistakes and carry the spec's fallback text rendered for every
/// declared output; the remaining variants are configuration or environment
/// faults.
#[derive(Debug, Error)]
pub enum GenError {
    /// The invocation supplied the wrong number of named arguments
    #[error("expected {expected} named arguments, got {actual}")]
    NamedArgumentCount {
        /// Arity declared by `core.named_args`
        expected: usize,
        /// Arity actually supplied
        actual: usize,
    },

    /// More groups were supplied than the ladder was built for
    #[error(
        "{groups} groups exceed the configured ceiling of {max_repeats}; \
         raise `common.max_repeats`"
    )]
    ArityExceeded {
        /// Number of groups implied by the variadic tail
        groups: usize,
        /// The ladder's upper bound
        max_repeats: usize,
    },

    /// The variadic tail was empty
    #[error("no variadic arguments were supplied:\n{diagnostic}")]
    EmptyInvocation {
        /// Every output's `fallbacks.empty` text, rendered and aggregated
        diagnostic: String,
    },

    /// The variadic tail length is not a multiple of the group size
    #[error(
        "variadic tail length {len} is not a multiple of group size {group_size}:\n{diagnostic}"
    )]
    Unparity {
        /// Length of the supplied tail
        len: usize,
        /// The declared group size
        group_size: usize,
        /// Every output's `fallbacks.unparity` text, rendered and aggregated
        diagnostic: String,
    },

    /// A spec-level fault surfaced at render time
    #[error(transparent)]
    Spec(#[from] SpecError),

    /// The emitted artifact could not be written
    #[error("failed to write output to {path}")]
    Write {
        /// Destination path
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },
}
