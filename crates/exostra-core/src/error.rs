//! Error type shared by every fallible window manager operation.

use thiserror_no_std::Error;

use crate::window::WindowId;

/// Contract violations and resource failures reported by the window manager.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WmError {
    #[error("window id {0} is reserved")]
    ReservedId(WindowId),

    #[error("window id {0} already exists in this scope")]
    DuplicateId(WindowId),

    #[error("child window {0} requires a parent")]
    MissingParent(WindowId),

    #[error("top-level window {0} cannot have a parent")]
    UnexpectedParent(WindowId),

    #[error("invalid style for window {id}: {reason}")]
    InvalidStyle { id: WindowId, reason: &'static str },

    #[error("window handle is stale or unknown")]
    StaleHandle,

    #[error("container is full (max: {max})")]
    ContainerFull { max: usize },

    #[error("message queue is full (max: {max})")]
    QueueFull { max: usize },

    #[error("text exceeds {max} bytes")]
    TextTooLong { max: usize },

    #[error("pre-create hook failed for window {0}")]
    HookFailed(WindowId),

    #[error("window {0} rejected its create message")]
    CreateRejected(WindowId),

    #[error("failed to allocate {bytes} bytes for a drawing context")]
    OutOfMemory { bytes: usize },

    #[error("invalid operation '{op}': {reason}")]
    InvalidOperation {
        op: &'static str,
        reason: &'static str,
    },

    #[error("config could not be encoded or decoded")]
    Config,
}

/// Result alias used across the crate.
pub type WmResult<T> = Result<T, WmError>;
