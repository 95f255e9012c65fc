//! Error types for the Galaxy3D culling engine
//!
//! The geometric core never fails: degenerate inputs collapse to the identity
//! bounding volume. Errors are reserved for misuse of the scene graph
//! (unknown handles, structural violations) and for cameras that cannot
//! produce a frustum.

use std::fmt;

/// Result type for Galaxy3D engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Galaxy3D engine errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A scene node handle does not refer to a live node
    InvalidNode(String),

    /// An operation would break the tree invariant (cycle, orphaned root, ...)
    StructuralError(String),

    /// Camera cannot build a frustum (unknown node, singular world matrix, ...)
    InvalidCamera(String),

    /// Invalid resource (geometry, renderable, ...)
    InvalidResource(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidNode(msg) => write!(f, "Invalid node: {}", msg),
            Error::StructuralError(msg) => write!(f, "Structural error: {}", msg),
            Error::InvalidCamera(msg) => write!(f, "Invalid camera: {}", msg),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

// ===== ERROR MACROS =====

/// Build an `Error` of the given variant and log it at ERROR severity.
///
/// # Example
///
/// ```ignore
/// let err = engine_err!("galaxy3d::SceneGraph", InvalidNode, "node {:?} not found", key);
/// ```
#[macro_export]
macro_rules! engine_err {
    ($source:expr, $variant:ident, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::engine_error!($source, "{}", message);
        $crate::galaxy3d::Error::$variant(message)
    }};
}

/// Log an error and return it from the enclosing function.
///
/// # Example
///
/// ```ignore
/// engine_bail!("galaxy3d::SceneGraph", StructuralError, "cannot remove the root node");
/// ```
#[macro_export]
macro_rules! engine_bail {
    ($source:expr, $variant:ident, $($arg:tt)*) => {
        return Err($crate::engine_err!($source, $variant, $($arg)*))
    };
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
