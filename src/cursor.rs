//! Positions inside a [`LinkedList`](crate::LinkedList).
//!
//! A cursor sits on one of three kinds of position:
//! - before-begin, the list's sentinel slot, which holds no value but owns the link to the first node
//! - a real node
//! - the end marker, one past the last node
//!
//! Insertion and removal are always relative to the position *after* the cursor, which is why the
//! sentinel is needed: anchoring on before-begin reaches the front of the list without a special case.
//!
//! A [`Cursor`] borrows its list shared, a [`CursorMut`] borrows it exclusively, so a position can
//! neither outlive the node it points at nor be used on a different list.

use std::{fmt, mem, ptr};

use crate::{
    error::ListError,
    node::{self, Link, Node},
};

enum Position<'a, T> {
    BeforeBegin(&'a Link<T>),
    At(&'a Node<T>),
    End,
}

impl<T> Clone for Position<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Position<'_, T> {}

impl<'a, T> Position<'a, T> {
    fn from_link(link: &'a Link<T>) -> Self {
        match link.as_deref() {
            Some(node) => Position::At(node),
            None => Position::End,
        }
    }

    fn successor(&self) -> Option<&'a Node<T>> {
        match *self {
            Position::BeforeBegin(head) => head.as_deref(),
            Position::At(node) => node.next.as_deref(),
            Position::End => None,
        }
    }

    /// the address the position refers to, null for the end marker
    fn identity(&self) -> *const () {
        match *self {
            Position::BeforeBegin(head) => head as *const Link<T> as *const (),
            Position::At(node) => node as *const Node<T> as *const (),
            Position::End => ptr::null(),
        }
    }
}

/// A read-only position in a [`LinkedList`](crate::LinkedList).
///
/// Two cursors are equal when they sit on the same sentinel or node, or when both are at the end marker.
/// A [`Cursor`] also compares against a [`CursorMut`] by the same rule.
pub struct Cursor<'a, T> {
    position: Position<'a, T>,
}

impl<'a, T> Cursor<'a, T> {
    pub(crate) fn before_begin(head: &'a Link<T>) -> Self {
        Cursor {
            position: Position::BeforeBegin(head),
        }
    }

    pub(crate) fn first(head: &'a Link<T>) -> Self {
        Cursor {
            position: Position::from_link(head),
        }
    }

    pub(crate) fn end() -> Self {
        Cursor {
            position: Position::End,
        }
    }

    /// the value at this position, `None` for before-begin and end
    pub fn current(&self) -> Option<&'a T> {
        match self.position {
            Position::At(node) => Some(&node.value),
            Position::BeforeBegin(_) | Position::End => None,
        }
    }

    /// the value right after this position, `None` if this is the last position or the end marker
    pub fn peek_next(&self) -> Option<&'a T> {
        self.position.successor().map(|node| &node.value)
    }

    /// Advances to the following position.
    ///
    /// Moving off the last node lands on the end marker; moving off the end marker is an error and leaves the cursor where it is.
    pub fn move_next(&mut self) -> Result<(), ListError> {
        self.position = match self.position {
            Position::BeforeBegin(head) => Position::from_link(head),
            Position::At(node) => Position::from_link(&node.next),
            Position::End => return Err(ListError::PastTheEnd),
        };
        Ok(())
    }

    pub fn is_before_begin(&self) -> bool {
        matches!(self.position, Position::BeforeBegin(_))
    }

    pub fn is_end(&self) -> bool {
        matches!(self.position, Position::End)
    }

    fn identity(&self) -> *const () {
        self.position.identity()
    }
}

impl<T> Clone for Cursor<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Cursor<'_, T> {}

impl<T> PartialEq for Cursor<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.identity() == other.identity()
    }
}

impl<T> Eq for Cursor<'_, T> {}

impl<'b, T> PartialEq<CursorMut<'b, T>> for Cursor<'_, T> {
    fn eq(&self, other: &CursorMut<'b, T>) -> bool {
        self.identity() == other.identity()
    }
}

impl<T: fmt::Debug> fmt::Debug for Cursor<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.position {
            Position::BeforeBegin(_) => f.write_str("Cursor(before-begin)"),
            Position::At(node) => f.debug_tuple("Cursor").field(&node.value).finish(),
            Position::End => f.write_str("Cursor(end)"),
        }
    }
}

enum PositionMut<'a, T> {
    BeforeBegin(&'a mut Link<T>),
    At(&'a mut Node<T>),
    End,
}

impl<'a, T> PositionMut<'a, T> {
    fn from_link(link: &'a mut Link<T>) -> Self {
        match link.as_deref_mut() {
            Some(node) => PositionMut::At(node),
            None => PositionMut::End,
        }
    }

    /// the slot holding the successor, which is where insert-after and erase-after operate
    fn successor_slot(&mut self) -> Result<&mut Link<T>, ListError> {
        match self {
            PositionMut::BeforeBegin(head) => Ok(&mut **head),
            PositionMut::At(node) => Ok(&mut node.next),
            PositionMut::End => Err(ListError::PastTheEnd),
        }
    }

    fn as_position(&self) -> Position<'_, T> {
        match self {
            PositionMut::BeforeBegin(head) => Position::BeforeBegin(&**head),
            PositionMut::At(node) => Position::At(&**node),
            PositionMut::End => Position::End,
        }
    }
}

/// A mutable position in a [`LinkedList`](crate::LinkedList).
///
/// Besides reading and writing the current value it can splice nodes in and out right after itself.
/// Those edits keep the list's element count up to date.
pub struct CursorMut<'a, T> {
    position: PositionMut<'a, T>,
    len: &'a mut usize,
}

impl<'a, T> CursorMut<'a, T> {
    pub(crate) fn before_begin(head: &'a mut Link<T>, len: &'a mut usize) -> Self {
        CursorMut {
            position: PositionMut::BeforeBegin(head),
            len,
        }
    }

    pub(crate) fn first(head: &'a mut Link<T>, len: &'a mut usize) -> Self {
        CursorMut {
            position: PositionMut::from_link(head),
            len,
        }
    }

    pub(crate) fn end(len: &'a mut usize) -> Self {
        CursorMut {
            position: PositionMut::End,
            len,
        }
    }

    pub fn current(&self) -> Option<&T> {
        self.as_cursor().current()
    }

    pub fn current_mut(&mut self) -> Option<&mut T> {
        match &mut self.position {
            PositionMut::At(node) => Some(&mut node.value),
            PositionMut::BeforeBegin(_) | PositionMut::End => None,
        }
    }

    pub fn peek_next(&self) -> Option<&T> {
        self.as_cursor().peek_next()
    }

    /// Advances to the following position, see [`Cursor::move_next`].
    pub fn move_next(&mut self) -> Result<(), ListError> {
        self.position = match mem::replace(&mut self.position, PositionMut::End) {
            PositionMut::BeforeBegin(head) => PositionMut::from_link(head),
            PositionMut::At(node) => PositionMut::from_link(&mut node.next),
            PositionMut::End => return Err(ListError::PastTheEnd),
        };
        Ok(())
    }

    /// Inserts `value` right after this position and moves the cursor onto the new node.
    ///
    /// Fails with [`ListError::PastTheEnd`] on the end marker and with [`ListError::Alloc`] if the node cannot be allocated.
    /// In both cases the list and the cursor are unchanged.
    pub fn insert_after(&mut self, value: T) -> Result<(), ListError> {
        let slot = self.position.successor_slot()?;
        let node = Node::alloc(value)?;
        node::link_after(slot, node);
        *self.len += 1;
        self.move_next()
    }

    /// Removes the node right after this position and returns its value.
    ///
    /// The cursor stays where it is, so its successor is now the node that followed the removed one.
    pub fn erase_after(&mut self) -> Result<T, ListError> {
        let slot = self.position.successor_slot()?;
        let value = node::unlink_after(slot).ok_or(ListError::NoSuccessor)?;
        *self.len -= 1;
        Ok(value)
    }

    /// a read-only view of this position, comparing equal to it
    pub fn as_cursor(&self) -> Cursor<'_, T> {
        Cursor {
            position: self.position.as_position(),
        }
    }

    pub fn is_before_begin(&self) -> bool {
        matches!(self.position, PositionMut::BeforeBegin(_))
    }

    pub fn is_end(&self) -> bool {
        matches!(self.position, PositionMut::End)
    }

    fn identity(&self) -> *const () {
        self.position.as_position().identity()
    }
}

impl<'a, T> From<CursorMut<'a, T>> for Cursor<'a, T> {
    fn from(cursor: CursorMut<'a, T>) -> Self {
        let position = match cursor.position {
            PositionMut::BeforeBegin(head) => Position::BeforeBegin(&*head),
            PositionMut::At(node) => Position::At(&*node),
            PositionMut::End => Position::End,
        };
        Cursor { position }
    }
}

impl<'b, T> PartialEq<CursorMut<'b, T>> for CursorMut<'_, T> {
    fn eq(&self, other: &CursorMut<'b, T>) -> bool {
        self.identity() == other.identity()
    }
}

impl<'b, T> PartialEq<Cursor<'b, T>> for CursorMut<'_, T> {
    fn eq(&self, other: &Cursor<'b, T>) -> bool {
        self.identity() == other.identity()
    }
}

impl<T: fmt::Debug> fmt::Debug for CursorMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.position {
            PositionMut::BeforeBegin(_) => f.write_str("CursorMut(before-begin)"),
            PositionMut::At(node) => f.debug_tuple("CursorMut").field(&node.value).finish(),
            PositionMut::End => f.write_str("CursorMut(end)"),
        }
    }
}
