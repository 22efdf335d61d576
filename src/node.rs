use std::alloc::{self, Layout};

use crate::{diagnostics, error::AllocError};

/// an owning link to the next node, `None` terminates the chain
pub(crate) type Link<T> = Option<Box<Node<T>>>;

pub(crate) struct Node<T> {
    pub(crate) value: T,
    pub(crate) next: Link<T>,
}

impl<T> Node<T> {
    /// Allocates an unlinked node holding `value`.
    ///
    /// Goes through the global allocator directly so that a refused allocation comes back as an [`AllocError`] instead of aborting.
    /// On failure `value` is dropped and nothing else is touched.
    pub(crate) fn alloc(value: T) -> Result<Box<Node<T>>, AllocError> {
        let layout = Layout::new::<Node<T>>();

        #[cfg(test)]
        if fault::should_fail() {
            diagnostics::allocation_failed(layout);
            return Err(AllocError::new(layout));
        }

        // SAFETY: `Node<T>` always contains a `Link<T>`, so `layout` has a non-zero size.
        let ptr = unsafe { alloc::alloc(layout) } as *mut Node<T>;
        if ptr.is_null() {
            diagnostics::allocation_failed(layout);
            return Err(AllocError::new(layout));
        }
        // SAFETY: `ptr` is non-null, was returned by the global allocator for exactly
        // `Layout::new::<Node<T>>()` and is fully initialised by the write, which is what
        // `Box::from_raw` requires.
        unsafe {
            ptr.write(Node { value, next: None });
            Ok(Box::from_raw(ptr))
        }
    }
}

/// Makes `node` the successor of whatever owns `slot`.
pub(crate) fn link_after<T>(slot: &mut Link<T>, mut node: Box<Node<T>>) -> &mut Node<T> {
    node.next = slot.take();
    slot.insert(node)
}

/// Detaches the successor of whatever owns `slot`, handing the rest of the chain back to `slot`.
pub(crate) fn unlink_after<T>(slot: &mut Link<T>) -> Option<T> {
    let node = slot.take()?;
    let Node { value, next } = *node;
    *slot = next;
    Some(value)
}
