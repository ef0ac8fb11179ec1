//! The arity ladder
//!
//! A closed table of expansion rules, one per possible repeat count from 0
//! to `max_repeats`, built once when the spec is loaded. The original
//! mechanism this models enumerated the whole arity space ahead of time
//! instead of recursing, which is why the ceiling is a real, load-time
//! limit: a tail that implies more groups than the table holds misses the
//! lookup and the invocation fails hard, it is never truncated.

use std::collections::HashMap;

use crate::classify::Group;
use crate::error::SpecError;
use crate::template::{RenderContext, Template};

/// The rendering rule for exactly one repeat count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpansionRule {
    repeats: usize,
}

impl ExpansionRule {
    /// The repeat count this rule was specialized for.
    pub fn repeats(&self) -> usize {
        self.repeats
    }

    /// Render `body` once per group and join with `separator`.
    ///
    /// The separator lands strictly between rendered bodies, never leading
    /// or trailing. `groups` must hold exactly [`ExpansionRule::repeats`]
    /// entries; the ladder lookup that produced this rule guarantees it.
    pub fn expand(
        &self,
        body: &Template,
        separator: &str,
        named: &HashMap<String, String>,
        constants: &HashMap<String, String>,
        groups: &[Group],
    ) -> Result<String, SpecError> {
        debug_assert_eq!(groups.len(), self.repeats);

        let mut out = String::new();
        for (index, group) in groups.iter().enumerate() {
            if index > 0 {
                out.push_str(separator);
            }
            let ctx = RenderContext::with_group(named, constants, group);
            out.push_str(&ctx.render(body)?);
        }
        Ok(out)
    }
}

/// The finite family of arity-specialized rules, indexed by repeat count.
#[derive(Debug, Clone)]
pub struct Ladder {
    rules: Vec<ExpansionRule>,
}

impl Ladder {
    /// Build the table for repeat counts `0..=max_repeats`.
    ///
    /// The 0 slot exists for completeness but is only reachable through the
    /// empty-invocation fallback path, never through a normal
    /// classification.
    pub fn build(max_repeats: usize) -> Self {
        let rules = (0..=max_repeats)
            .map(|repeats| ExpansionRule { repeats })
            .collect();
        Self { rules }
    }

    /// Look up the rule for a repeat count. `None` means the count exceeds
    /// the ceiling the ladder was built for.
    pub fn rule(&self, repeats: usize) -> Option<&ExpansionRule> {
        self.rules.get(repeats)
    }

    /// The ceiling this ladder was built for.
    pub fn max_repeats(&self) -> usize {
        self.rules.len() - 1
    }
}
