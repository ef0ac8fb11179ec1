//! Group splitting and arity classification
//!
//! The variadic tail of an invocation is classified exactly once per
//! invocation; every declared output is then rendered against that single
//! classification, which is what makes the cross-artifact parity invariant
//! structural rather than incidental.

/// One repetition unit: `group_size` consecutive tail elements, in original
/// order.
pub type Group = Vec<String>;

/// Outcome of classifying a variadic tail.
///
/// The mapping is total: every tail length lands in exactly one variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// The tail was empty
    Empty,
    /// The tail length is nonzero and not a multiple of the group size;
    /// the whole call is rejected, not just the trailing remainder
    Unparity {
        /// Length of the offending tail
        len: usize,
    },
    /// The tail splits evenly into one or more groups
    Normal {
        /// The groups, in tail order
        groups: Vec<Group>,
    },
}

impl Classification {
    /// Number of groups, for logging and ladder lookup. `None` unless
    /// [`Classification::Normal`].
    pub fn group_count(&self) -> Option<usize> {
        match self {
            Classification::Normal { groups } => Some(groups.len()),
            _ => None,
        }
    }
}

/// Split a variadic tail into groups of `group_size`, or report why it
/// cannot be split.
///
/// `group_size` must be positive; spec validation guarantees this before
/// any tail reaches the classifier.
pub fn classify(tail: &[String], group_size: usize) -> Classification {
    debug_assert!(group_size > 0, "group_size is validated at spec load");

    if tail.is_empty() {
        return Classification::Empty;
    }
    if tail.len() % group_size != 0 {
        return Classification::Unparity { len: tail.len() };
    }
    let groups = tail
        .chunks(group_size)
        .map(|chunk| chunk.to_vec())
        .collect();
    Classification::Normal { groups }
}
