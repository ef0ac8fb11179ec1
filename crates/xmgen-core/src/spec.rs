//! Generator spec loading and validation
//!
//! The spec document is TOML. Loading does all the expensive and fallible
//! work up front: constants are resolved to a fixed point, every template
//! string is compiled to its token stream, and every reference is checked
//! against the declared arguments, constants, and group size. A
//! [`GeneratorSpec`] that loaded successfully renders without authoring
//! errors for the lifetime of the process.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::SpecError;
use crate::template::parser::TemplateToken;
use crate::template::{resolve_constants, Template};

#[derive(Debug, Deserialize)]
struct SpecDocument {
    common: CommonSection,
    core: CoreSection,
    #[serde(default)]
    constants: Vec<ConstantDecl>,
    #[serde(default)]
    outputs: Vec<OutputDecl>,
}

#[derive(Debug, Deserialize)]
struct CommonSection {
    prefix: String,
    max_repeats: usize,
    output: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
struct CoreSection {
    invocation: String,
    named_args: Vec<String>,
    group_size: usize,
}

#[derive(Debug, Deserialize)]
struct ConstantDecl {
    key: String,
    expansion: String,
}

#[derive(Debug, Deserialize)]
struct OutputDecl {
    preamble: String,
    body: String,
    separator: String,
    postamble: String,
    fallbacks: FallbacksDecl,
}

#[derive(Debug, Deserialize)]
struct FallbacksDecl {
    empty: String,
    unparity: String,
}

/// One output template with every template string compiled.
#[derive(Debug, Clone)]
pub struct CompiledOutput {
    /// Rendered once, before the bodies; no group in scope
    pub preamble: Template,
    /// Rendered once per group
    pub body: Template,
    /// Literal text between consecutive bodies; never template-expanded
    pub separator: String,
    /// Rendered once, after the bodies; no group in scope
    pub postamble: Template,
    /// Diagnostic body for an empty variadic tail
    pub empty_fallback: Template,
    /// Diagnostic body for a tail that does not split into whole groups
    pub unparity_fallback: Template,
}

/// A loaded, validated generator spec. Immutable for the life of the
/// process and safe to share across threads.
#[derive(Debug, Clone)]
pub struct GeneratorSpec {
    invocation: String,
    named_args: Vec<String>,
    group_size: usize,
    max_repeats: usize,
    output: Option<PathBuf>,
    constants: HashMap<String, String>,
    outputs: Vec<CompiledOutput>,
}

impl GeneratorSpec {
    /// Load and validate a spec document from disk.
    pub fn load(path: &Path) -> Result<Self, SpecError> {
        let text = fs::read_to_string(path).map_err(|source| SpecError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    /// Parse and validate a spec document.
    ///
    /// # Errors
    /// Any [`SpecError`]: the document shape, the common/core invariants,
    /// the constant graph, and every template reference are all checked
    /// here.
    pub fn parse(text: &str) -> Result<Self, SpecError> {
        let document: SpecDocument = toml::from_str(text)?;

        if document.common.max_repeats == 0 {
            return Err(SpecError::ZeroMaxRepeats);
        }
        if document.core.group_size == 0 {
            return Err(SpecError::ZeroGroupSize);
        }

        let mut seen = HashSet::new();
        for key in &document.core.named_args {
            if !seen.insert(key.clone()) {
                return Err(SpecError::DuplicateArgument(key.clone()));
            }
        }

        let declarations: Vec<(String, String)> = document
            .constants
            .into_iter()
            .map(|decl| (decl.key, decl.expansion))
            .collect();
        let constants = resolve_constants(&document.common.prefix, &declarations)?;

        let mut outputs = Vec::with_capacity(document.outputs.len());
        for decl in document.outputs {
            outputs.push(compile_output(
                decl,
                document.core.group_size,
                &document.core.named_args,
                &constants,
            )?);
        }

        debug!(
            invocation = %document.core.invocation,
            outputs = outputs.len(),
            constants = constants.len(),
            max_repeats = document.common.max_repeats,
            "spec loaded"
        );

        Ok(Self {
            invocation: document.core.invocation,
            named_args: document.core.named_args,
            group_size: document.core.group_size,
            max_repeats: document.common.max_repeats,
            output: document.common.output,
            constants,
            outputs,
        })
    }

    /// Call-site name, used in logs and diagnostics.
    pub fn invocation(&self) -> &str {
        &self.invocation
    }

    /// Declared named-argument keys, in order.
    pub fn named_args(&self) -> &[String] {
        &self.named_args
    }

    /// Arguments per repetition unit.
    pub fn group_size(&self) -> usize {
        self.group_size
    }

    /// The ladder ceiling.
    pub fn max_repeats(&self) -> usize {
        self.max_repeats
    }

    /// Destination path from `common.output`, if configured.
    pub fn output(&self) -> Option<&Path> {
        self.output.as_deref()
    }

    /// Resolved constants, including the built-in `prefix`.
    pub fn constants(&self) -> &HashMap<String, String> {
        &self.constants
    }

    /// Compiled output templates, in declaration order.
    pub fn outputs(&self) -> &[CompiledOutput] {
        &self.outputs
    }
}

fn compile_output(
    decl: OutputDecl,
    group_size: usize,
    named_args: &[String],
    constants: &HashMap<String, String>,
) -> Result<CompiledOutput, SpecError> {
    let body = Template::parse(&decl.body)?;
    check_references(&body, named_args, constants)?;
    for token in body.tokens() {
        if let TemplateToken::Position(index) = token {
            if *index >= group_size {
                return Err(SpecError::PositionOutOfRange {
                    index: *index,
                    group_size,
                });
            }
        }
    }

    let preamble = compile_groupless(&decl.preamble, "preamble", named_args, constants)?;
    let postamble = compile_groupless(&decl.postamble, "postamble", named_args, constants)?;
    let empty_fallback =
        compile_groupless(&decl.fallbacks.empty, "fallbacks.empty", named_args, constants)?;
    let unparity_fallback = compile_groupless(
        &decl.fallbacks.unparity,
        "fallbacks.unparity",
        named_args,
        constants,
    )?;

    Ok(CompiledOutput {
        preamble,
        body,
        separator: decl.separator,
        postamble,
        empty_fallback,
        unparity_fallback,
    })
}

/// Compile a template field that renders with no group in scope.
fn compile_groupless(
    content: &str,
    section: &str,
    named_args: &[String],
    constants: &HashMap<String, String>,
) -> Result<Template, SpecError> {
    let template = Template::parse(content)?;
    check_references(&template, named_args, constants)?;
    for token in template.tokens() {
        if let TemplateToken::Position(index) = token {
            return Err(SpecError::PositionOutsideBody {
                index: *index,
                section: section.to_string(),
            });
        }
    }
    Ok(template)
}

fn check_references(
    template: &Template,
    named_args: &[String],
    constants: &HashMap<String, String>,
) -> Result<(), SpecError> {
    for token in template.tokens() {
        match token {
            TemplateToken::Argument(key) => {
                if !named_args.iter().any(|declared| declared == key) {
                    return Err(SpecError::UnknownArgument(key.clone()));
                }
            }
            TemplateToken::Constant(key) => {
                if !constants.contains_key(key) {
                    return Err(SpecError::UnknownConstant(key.clone()));
                }
            }
            TemplateToken::Text(_) | TemplateToken::Position(_) => {}
        }
    }
    Ok(())
}
