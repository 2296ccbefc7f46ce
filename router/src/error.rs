//! Errors raised while building the route table or navigating.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    #[error("route {name} has an empty path")]
    EmptyPath { name: String },

    #[error("duplicate route path: {0}")]
    DuplicatePath(String),

    #[error("duplicate route name: {0}")]
    DuplicateName(String),

    #[error("no route named {0}")]
    UnknownName(String),

    #[error("location must start with '/': {0}")]
    InvalidLocation(String),
}
