//! Errors surfaced while configuring and mounting.

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("mount target `{0}` not found in document")]
    MissingMountTarget(String),

    #[error("mount target id must not be empty")]
    EmptyMountTarget,

    #[error("tick interval must be greater than zero")]
    ZeroTickInterval,
}
