//! Error handling and result types for BPlusTreeSet operations.
//!
//! Duplicate inserts are not errors; they are reported as `Ok(false)` by
//! `add`. Everything here is either a construction mistake, a capability gap
//! on the generic container surface, or structural corruption.

use thiserror::Error;

/// Error type for B+ tree operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BPlusTreeError {
    /// The requested node order cannot build a valid tree.
    #[error("Invalid order: {0}")]
    InvalidOrder(String),
    /// The container operation is not part of this tree's capability set.
    #[error("BPlusTreeSet: operation '{operation}' is not supported")]
    Unsupported { operation: &'static str },
    /// Arena lookup failed.
    #[error("Arena error: {0}")]
    ArenaError(String),
    /// Node operation failed.
    #[error("Node error: {0}")]
    NodeError(String),
    /// Tree corruption detected.
    #[error("Corrupted tree: {0}")]
    CorruptedTree(String),
    /// Arena slot allocation failed.
    #[error("Allocation error: {0}")]
    AllocationError(String),
}

impl BPlusTreeError {
    /// Create an InvalidOrder error with context
    pub fn invalid_order(order: usize, reason: &str) -> Self {
        Self::InvalidOrder(format!("order {} is invalid ({})", order, reason))
    }

    /// Create an Unsupported error for the named operation
    pub fn unsupported(operation: &'static str) -> Self {
        Self::Unsupported { operation }
    }

    /// Create an ArenaError with context
    pub fn arena_error(operation: &str, details: &str) -> Self {
        Self::ArenaError(format!("{} failed: {}", operation, details))
    }

    /// Create a NodeError with context
    pub fn node_error(node_type: &str, node_id: u32, details: &str) -> Self {
        Self::NodeError(format!("{} node {}: {}", node_type, node_id, details))
    }

    /// Create a CorruptedTree error with context
    pub fn corrupted_tree(component: &str, details: &str) -> Self {
        Self::CorruptedTree(format!("{} corruption: {}", component, details))
    }

    /// Create an AllocationError with context
    pub fn allocation_error(resource: &str, reason: &str) -> Self {
        Self::AllocationError(format!("Failed to allocate {}: {}", resource, reason))
    }

    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported { .. })
    }

    pub fn is_order_error(&self) -> bool {
        matches!(self, Self::InvalidOrder(_))
    }

    /// True for errors that mean the structure itself is broken.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::ArenaError(_) | Self::NodeError(_) | Self::CorruptedTree(_)
        )
    }
}

/// Internal result type for tree operations
pub(crate) type TreeResult<T> = Result<T, BPlusTreeError>;

/// Public result type for tree operations that may fail
pub type BTreeResult<T> = Result<T, BPlusTreeError>;

/// Result type for tree modification operations
pub type ModifyResult<T> = Result<T, BPlusTreeError>;

/// Result type for tree construction and validation
pub type InitResult<T> = Result<T, BPlusTreeError>;

/// Result type for the generic container surface
pub type ContainerResult<T> = Result<T, BPlusTreeError>;

/// Result extension trait for attaching context to errors
pub trait BTreeResultExt<T> {
    /// Prefix the error message with `context`
    fn with_context(self, context: &str) -> BTreeResult<T>;

    /// Prefix the error message with the operation name
    fn with_operation(self, operation: &str) -> BTreeResult<T>;
}

impl<T> BTreeResultExt<T> for Result<T, BPlusTreeError> {
    fn with_context(self, context: &str) -> BTreeResult<T> {
        self.map_err(|e| match e {
            BPlusTreeError::Unsupported { operation } => BPlusTreeError::Unsupported { operation },
            BPlusTreeError::InvalidOrder(msg) => {
                BPlusTreeError::InvalidOrder(format!("{}: {}", context, msg))
            }
            BPlusTreeError::ArenaError(msg) => BPlusTreeError::arena_error(context, &msg),
            BPlusTreeError::NodeError(msg) => {
                BPlusTreeError::NodeError(format!("{}: {}", context, msg))
            }
            BPlusTreeError::CorruptedTree(msg) => BPlusTreeError::corrupted_tree(context, &msg),
            BPlusTreeError::AllocationError(msg) => BPlusTreeError::allocation_error(context, &msg),
        })
    }

    fn with_operation(self, operation: &str) -> BTreeResult<T> {
        self.with_context(&format!("Operation '{}'", operation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BPlusTreeError::unsupported("min");
        assert_eq!(
            err.to_string(),
            "BPlusTreeSet: operation 'min' is not supported"
        );

        let err = BPlusTreeError::invalid_order(3, "must be even");
        assert_eq!(err.to_string(), "Invalid order: order 3 is invalid (must be even)");
    }

    #[test]
    fn test_error_classification() {
        assert!(BPlusTreeError::unsupported("max").is_unsupported());
        assert!(BPlusTreeError::invalid_order(0, "too small").is_order_error());
        assert!(BPlusTreeError::corrupted_tree("Sibling chain", "gap").is_structural());
        assert!(!BPlusTreeError::unsupported("remove").is_structural());
    }

    #[test]
    fn test_with_operation_keeps_unsupported_intact() {
        let result: BTreeResult<()> = Err(BPlusTreeError::unsupported("apply"));
        let err = result.with_operation("container").unwrap_err();
        assert_eq!(err, BPlusTreeError::unsupported("apply"));
    }

    #[test]
    fn test_with_context_prefixes_message() {
        let result: BTreeResult<()> = Err(BPlusTreeError::NodeError("missing child".into()));
        let err = result.with_context("add").unwrap_err();
        assert_eq!(err, BPlusTreeError::NodeError("add: missing child".into()));
    }
}
