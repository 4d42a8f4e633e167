//! Error types for path operations
//!
//! These errors belong to the programming-error tier: they mean a pass asked for a
//! position that does not exist. They are never turned into document problems.

use std::fmt;

/// Which neighbour a sibling operation looked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiblingDirection {
    Previous,
    Next,
}

impl fmt::Display for SiblingDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiblingDirection::Previous => write!(f, "previous"),
            SiblingDirection::Next => write!(f, "next"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    /// A robust path step needed more filter-matching children than the node has,
    /// or the node at the step does not match the filter at all.
    #[error(
        "filter mismatch at depth {depth}: required rank {rank} but only {matching} matching children"
    )]
    FilterMismatch {
        depth: usize,
        rank: usize,
        matching: usize,
    },

    #[error("treepath must have a minimum length of {required}, got {actual}")]
    PathTooShort { required: usize, actual: usize },

    #[error("no {direction} sibling")]
    NoSibling { direction: SiblingDirection },

    #[error("illegal distance {distance} for treepath of length {length}")]
    IllegalDistance { distance: usize, length: usize },

    #[error("unsupported index: {index} (child count: {child_count})")]
    IndexOutOfRange { index: usize, child_count: usize },
}

/// Result alias for path operations.
pub type TreeResult<T> = Result<T, TreeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TreeError::NoSibling {
            direction: SiblingDirection::Previous,
        };
        assert_eq!(err.to_string(), "no previous sibling");

        let err = TreeError::PathTooShort {
            required: 2,
            actual: 1,
        };
        assert_eq!(
            err.to_string(),
            "treepath must have a minimum length of 2, got 1"
        );
    }

    #[test]
    fn test_filter_mismatch_display() {
        let err = TreeError::FilterMismatch {
            depth: 3,
            rank: 1,
            matching: 0,
        };
        assert!(err.to_string().contains("depth 3"));
        assert!(err.to_string().contains("rank 1"));
    }
}
