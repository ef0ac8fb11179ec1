//! Output template rendering
//!
//! One output is rendered either normally (preamble, N bodies joined by the
//! separator, postamble) or as a diagnostic fallback (preamble, fallback
//! text, postamble). Which path runs is decided by the driver from the
//! single per-invocation classification; the renderer never re-classifies.

use std::collections::HashMap;

use crate::classify::Group;
use crate::error::SpecError;
use crate::ladder::ExpansionRule;
use crate::spec::CompiledOutput;
use crate::template::RenderContext;

/// Which malformed-input diagnostic to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackKind {
    /// The variadic tail was empty
    Empty,
    /// The variadic tail does not split into whole groups
    Unparity,
}

/// Render one output for a normal classification.
pub fn render_normal(
    output: &CompiledOutput,
    named: &HashMap<String, String>,
    constants: &HashMap<String, String>,
    groups: &[Group],
    rule: &ExpansionRule,
) -> Result<String, SpecError> {
    let ctx = RenderContext::new(named, constants);
    let mut text = ctx.render(&output.preamble)?;
    text.push_str(&rule.expand(&output.body, &output.separator, named, constants, groups)?);
    text.push_str(&ctx.render(&output.postamble)?);
    Ok(text)
}

/// Render one output's diagnostic fallback in place of its bodies.
///
/// The result is wrapped in the same preamble and postamble as a normal
/// artifact so the diagnostic shows where the bodies would have gone, but
/// it is never a valid artifact: the driver marks the whole generation
/// failed.
pub fn render_fallback(
    output: &CompiledOutput,
    named: &HashMap<String, String>,
    constants: &HashMap<String, String>,
    kind: FallbackKind,
) -> Result<String, SpecError> {
    let fallback = match kind {
        FallbackKind::Empty => &output.empty_fallback,
        FallbackKind::Unparity => &output.unparity_fallback,
    };
    let ctx = RenderContext::new(named, constants);
    let mut text = ctx.render(&output.preamble)?;
    text.push_str(&ctx.render(fallback)?);
    text.push_str(&ctx.render(&output.postamble)?);
    Ok(text)
}
