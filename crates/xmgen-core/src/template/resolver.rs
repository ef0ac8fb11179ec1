//! Placeholder resolution
//!
//! Rendering is a pure function of (compiled template, context): named
//! arguments and constants are plain map lookups, positional references
//! index into the context's current group. Constant cross-references are
//! resolved to a fixed point once, at spec load, so no recursive expansion
//! happens at render time.

use std::collections::{HashMap, HashSet};

use crate::error::SpecError;
use crate::template::parser::{Template, TemplateToken};

/// Ephemeral resolution scope for one (invocation, output, group) triple.
///
/// Holds borrowed views only; contexts are built per rendered unit and
/// dropped immediately after.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    named: &'a HashMap<String, String>,
    constants: &'a HashMap<String, String>,
    group: Option<&'a [String]>,
}

impl<'a> RenderContext<'a> {
    /// Context with no group in scope (preambles, postambles, fallbacks).
    pub fn new(
        named: &'a HashMap<String, String>,
        constants: &'a HashMap<String, String>,
    ) -> Self {
        Self {
            named,
            constants,
            group: None,
        }
    }

    /// Context scoped to one group (body rendering).
    pub fn with_group(
        named: &'a HashMap<String, String>,
        constants: &'a HashMap<String, String>,
        group: &'a [String],
    ) -> Self {
        Self {
            named,
            constants,
            group: Some(group),
        }
    }

    /// Render a compiled template against this context.
    ///
    /// Substituted values are emitted verbatim; they are never re-scanned
    /// for placeholders.
    ///
    /// # Errors
    /// [`SpecError::UnknownArgument`], [`SpecError::UnknownConstant`], and
    /// [`SpecError::PositionOutOfRange`] for dangling references. A spec
    /// that passed load-time validation cannot hit these.
    pub fn render(&self, template: &Template) -> Result<String, SpecError> {
        let mut out = String::new();
        for token in template.tokens() {
            match token {
                TemplateToken::Text(text) => out.push_str(text),
                TemplateToken::Argument(key) => {
                    let value = self
                        .named
                        .get(key)
                        .ok_or_else(|| SpecError::UnknownArgument(key.clone()))?;
                    out.push_str(value);
                }
                TemplateToken::Constant(key) => {
                    let value = self
                        .constants
                        .get(key)
                        .ok_or_else(|| SpecError::UnknownConstant(key.clone()))?;
                    out.push_str(value);
                }
                TemplateToken::Position(index) => {
                    let group = self.group.unwrap_or(&[]);
                    let value =
                        group
                            .get(*index)
                            .ok_or_else(|| SpecError::PositionOutOfRange {
                                index: *index,
                                group_size: group.len(),
                            })?;
                    out.push_str(value);
                }
            }
        }
        Ok(out)
    }
}

/// Resolve the declared constants (plus the built-in `prefix`) to final
/// strings.
///
/// Cross-references are walked depth-first over the reference graph with an
/// in-progress set, so resolution is bounded and deterministic regardless of
/// declaration order. Expansions may reference other constants only.
///
/// # Errors
/// [`SpecError::DuplicateConstant`] for a key declared twice or shadowing
/// `prefix`, [`SpecError::ArgumentInConstant`] for an expansion that touches
/// invocation state, [`SpecError::UnknownConstant`] for a dangling
/// reference, [`SpecError::CyclicConstant`] when the graph has a cycle.
pub fn resolve_constants(
    prefix: &str,
    declarations: &[(String, String)],
) -> Result<HashMap<String, String>, SpecError> {
    const PREFIX_KEY: &str = "prefix";

    let mut templates: HashMap<String, Template> = HashMap::new();
    let mut order: Vec<String> = Vec::new();

    for (key, expansion) in declarations {
        if key == PREFIX_KEY || templates.contains_key(key) {
            return Err(SpecError::DuplicateConstant(key.clone()));
        }
        let template = Template::parse(expansion)?;
        for token in template.tokens() {
            match token {
                TemplateToken::Argument(_) | TemplateToken::Position(_) => {
                    return Err(SpecError::ArgumentInConstant { key: key.clone() });
                }
                TemplateToken::Text(_) | TemplateToken::Constant(_) => {}
            }
        }
        templates.insert(key.clone(), template);
        order.push(key.clone());
    }

    let mut resolved: HashMap<String, String> = HashMap::new();
    resolved.insert(PREFIX_KEY.to_string(), prefix.to_string());

    let mut in_progress = HashSet::new();
    for key in &order {
        resolve_key(key, &templates, &mut resolved, &mut in_progress)?;
    }

    Ok(resolved)
}

fn resolve_key(
    key: &str,
    templates: &HashMap<String, Template>,
    resolved: &mut HashMap<String, String>,
    in_progress: &mut HashSet<String>,
) -> Result<(), SpecError> {
    if resolved.contains_key(key) {
        return Ok(());
    }
    let Some(template) = templates.get(key) else {
        return Err(SpecError::UnknownConstant(key.to_string()));
    };
    if !in_progress.insert(key.to_string()) {
        return Err(SpecError::CyclicConstant(key.to_string()));
    }

    let mut value = String::new();
    for token in template.tokens() {
        match token {
            TemplateToken::Text(text) => value.push_str(text),
            TemplateToken::Constant(reference) => {
                resolve_key(reference, templates, resolved, in_progress)?;
                value.push_str(&resolved[reference]);
            }
            // Rejected before resolution starts.
            TemplateToken::Argument(_) | TemplateToken::Position(_) => unreachable!(),
        }
    }

    in_progress.remove(key);
    resolved.insert(key.to_string(), value);
    Ok(())
}
