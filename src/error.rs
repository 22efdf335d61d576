use std::alloc::Layout;

use thiserror::Error;

/// The global allocator refused to hand out memory for a list node.
///
/// Carries the [`Layout`] that was requested so callers that want the usual abort behaviour can forward it to [`std::alloc::handle_alloc_error`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to allocate a list node of {} bytes (align {})", .layout.size(), .layout.align())]
pub struct AllocError {
    layout: Layout,
}

impl AllocError {
    pub(crate) fn new(layout: Layout) -> AllocError {
        AllocError { layout }
    }

    /// the layout of the node that could not be allocated
    pub fn layout(&self) -> Layout {
        self.layout
    }
}

/// Errors reported by positional operations on a [`LinkedList`](crate::LinkedList).
///
/// Misuse of a position is always checked: instead of reading past the end of the chain the operation fails with one of these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListError {
    /// a node could not be allocated, the list is unchanged
    #[error(transparent)]
    Alloc(#[from] AllocError),
    /// the position is the end marker, which can neither be advanced nor used as an anchor
    #[error("position is past the end of the list")]
    PastTheEnd,
    /// `erase_after` was called on the last position of the list
    #[error("no node follows this position")]
    NoSuccessor,
}
