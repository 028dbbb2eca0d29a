//! Toolkit error types.

use thiserror::Error;

use crate::component::ComponentId;

#[derive(Debug, Error)]
pub enum Error {
    #[error("malformed layout constraint {constraint:?}: {reason}")]
    MalformedConstraint { constraint: String, reason: String },

    #[error("unknown component: {0}")]
    UnknownComponent(ComponentId),

    #[error("{child} is not a child of {parent}")]
    NotAChild {
        parent: ComponentId,
        child: ComponentId,
    },

    #[error("tree error: {0}")]
    Tree(#[from] indextree::NodeError),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn malformed(constraint: &str, reason: impl Into<String>) -> Self {
        Error::MalformedConstraint {
            constraint: constraint.to_string(),
            reason: reason.into(),
        }
    }
}
