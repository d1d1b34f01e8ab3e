//! Error types for the Squall engine.
//!
//! Registry misuse and lifecycle violations are programmer errors: they
//! signal immediately at the call site with a precise variant instead of
//! corrupting frame state. Query misses (empty views, absent optional
//! components, name-lookup misses) are normal control flow and are
//! represented with `Option`/empty iterators, never with these errors.

use std::fmt;

/// Result type for Squall engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Squall engine errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Entity cap reached; no more entities can be created
    CapacityExceeded(u32),

    /// Stale, destroyed, or never-created entity handle
    InvalidEntity,

    /// Requested component type is not attached to the entity
    ComponentNotFound(&'static str),

    /// Component type is already attached to the entity
    DuplicateComponent(&'static str),

    /// Fatal resource acquisition failure (scene load, render target)
    ResourceAllocation(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::CapacityExceeded(cap) => {
                write!(f, "Entity capacity exceeded (max {})", cap)
            }
            Error::InvalidEntity => write!(f, "Invalid or destroyed entity handle"),
            Error::ComponentNotFound(ty) => write!(f, "Component not found: {}", ty),
            Error::DuplicateComponent(ty) => write!(f, "Duplicate component: {}", ty),
            Error::ResourceAllocation(msg) => write!(f, "Resource allocation failed: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
