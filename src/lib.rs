//! A singly linked list with value semantics.
//!
//! [`LinkedList`] owns a chain of heap-allocated nodes. Positions are expressed with cursors: [`Cursor`] for reading,
//! [`CursorMut`] for reading and splicing. Editing always happens *after* a position, and the list exposes a
//! before-begin position so that the front of the list is edited the same way as the middle.
//!
//! ```
//! use single_linked_list::LinkedList;
//!
//! let mut list = LinkedList::from([2, 3]);
//! list.before_begin_mut().insert_after(1).unwrap();
//! assert_eq!(list, LinkedList::from([1, 2, 3]));
//!
//! let mut cursor = list.begin_mut();
//! assert_eq!(cursor.erase_after(), Ok(2));
//! assert_eq!(list.len(), 2);
//! ```
//!
//! Misusing a position is never undefined: operations on the end marker or past the last node fail with [`ListError`].
//! Node allocation failures can be observed through the `try_` methods as [`AllocError`].

mod cursor;
mod diagnostics;
mod error;
mod iter;
mod linked_list;
mod node;

pub use cursor::{Cursor, CursorMut};
pub use error::{AllocError, ListError};
pub use iter::{IntoIter, Iter, IterMut};
pub use linked_list::LinkedList;

/// Exchanges the contents of two lists in O(1), same as [`LinkedList::swap`].
pub fn swap<T>(lhs: &mut LinkedList<T>, rhs: &mut LinkedList<T>) {
    lhs.swap(rhs);
}
