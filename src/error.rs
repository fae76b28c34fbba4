//! Error types shared by the document model, configuration and wiring.

use thiserror::Error;

use crate::dom::NodeId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckerError {
    #[error("Unsupported selector: {0:?} (expected `.class` or `#id`)")]
    InvalidSelector(String),
    #[error("Password group {group:?} has no element matching {selector}")]
    MissingElement { group: NodeId, selector: String },
    #[error("Node {0:?} does not belong to this document")]
    UnknownNode(NodeId),
    #[error("Node {0:?} was requested more than once")]
    AliasedNode(NodeId),
    #[error("Node {child:?} cannot be appended to {parent:?}")]
    NotAChild { parent: NodeId, child: NodeId },
}
