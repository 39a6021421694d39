//! Tree mutation errors.

use thiserror::Error;

use crate::NodeId;

/// Errors returned by structural mutations on a [`Document`](crate::Document).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomError {
    /// The node id does not belong to this document.
    #[error("node {0:?} does not exist in this document")]
    UnknownNode(NodeId),

    /// `insert_before` was given a reference node that is not a child of the parent.
    #[error("node {reference:?} is not a child of {parent:?}")]
    NotAChild {
        /// The intended parent.
        parent: NodeId,
        /// The reference node that was expected to be one of its children.
        reference: NodeId,
    },

    /// The insertion would create a cycle, move the root or attach under a text node.
    #[error("cannot place {node:?} under {parent:?}")]
    InvalidPlacement {
        /// The node being moved.
        node: NodeId,
        /// The rejected parent.
        parent: NodeId,
    },
}
