use std::{
    alloc,
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
    mem,
};

use crate::{
    cursor::{Cursor, CursorMut},
    diagnostics,
    error::AllocError,
    iter::{Iter, IterMut},
    node::{self, Link, Node},
};

/// A singly linked list that owns its nodes.
///
/// The list keeps a sentinel slot in place of a before-the-first node: it stores no value, only the link to the first real node.
/// Every insertion and removal is phrased relative to the position *before* it, and the sentinel lets that position exist for the
/// front of the list too, so [`CursorMut::insert_after`] on [`before_begin_mut`](LinkedList::before_begin_mut) is exactly [`push_front`](LinkedList::push_front).
///
/// The element count is cached and kept current by every mutation, so [`len`](LinkedList::len) is O(1).
///
/// # Examples
/// ```
/// use single_linked_list::LinkedList;
///
/// let mut list = LinkedList::from([1, 3]);
/// let mut cursor = list.begin_mut();
/// cursor.insert_after(2).unwrap();
/// assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
/// ```
pub struct LinkedList<T> {
    head: Link<T>,
    len: usize,
}

impl<T> LinkedList<T> {
    pub const fn new() -> LinkedList<T> {
        LinkedList { head: None, len: 0 }
    }

    /// number of elements, O(1)
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn front(&self) -> Option<&T> {
        self.head.as_deref().map(|node| &node.value)
    }

    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.head.as_deref_mut().map(|node| &mut node.value)
    }

    /// Prepends `value` in O(1).
    ///
    /// If the node cannot be allocated this aborts through [`handle_alloc_error`](std::alloc::handle_alloc_error), like the std collections do.
    /// Use [`try_push_front`](LinkedList::try_push_front) to get the failure back instead.
    pub fn push_front(&mut self, value: T) {
        if let Err(err) = self.try_push_front(value) {
            alloc::handle_alloc_error(err.layout());
        }
    }

    /// Prepends `value` in O(1), leaving the list untouched if the node cannot be allocated.
    pub fn try_push_front(&mut self, value: T) -> Result<(), AllocError> {
        let node = Node::alloc(value)?;
        node::link_after(&mut self.head, node);
        self.len += 1;
        Ok(())
    }

    /// Removes the first element and returns it, or `None` if the list is empty.
    pub fn pop_front(&mut self) -> Option<T> {
        let value = node::unlink_after(&mut self.head)?;
        self.len -= 1;
        Some(value)
    }

    /// Drops every element, front to back.
    ///
    /// The nodes are released one at a time in a loop, so even very long lists never recurse.
    /// If dropping an element panics the rest of the chain is still released and the list is left empty.
    pub fn clear(&mut self) {
        self.len = 0;
        let mut rest = ReleaseGuard(self.head.take());
        while let Some(mut node) = rest.0.take() {
            rest.0 = node.next.take();
            drop(node);
        }
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            next: self.head.as_deref(),
            remaining: self.len,
        }
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut {
            next: self.head.as_deref_mut(),
            remaining: self.len,
        }
    }

    /// position of the first element, equal to [`end`](LinkedList::end) when the list is empty
    pub fn begin(&self) -> Cursor<'_, T> {
        Cursor::first(&self.head)
    }

    /// the end marker, one past the last element
    pub fn end(&self) -> Cursor<'_, T> {
        Cursor::end()
    }

    /// the sentinel position in front of the first element
    ///
    /// It has no value, but anything can be inserted or erased after it.
    pub fn before_begin(&self) -> Cursor<'_, T> {
        Cursor::before_begin(&self.head)
    }

    pub fn begin_mut(&mut self) -> CursorMut<'_, T> {
        CursorMut::first(&mut self.head, &mut self.len)
    }

    pub fn end_mut(&mut self) -> CursorMut<'_, T> {
        CursorMut::end(&mut self.len)
    }

    pub fn before_begin_mut(&mut self) -> CursorMut<'_, T> {
        CursorMut::before_begin(&mut self.head, &mut self.len)
    }

    /// Exchanges the contents of two lists in O(1), without touching any node.
    pub fn swap(&mut self, other: &mut LinkedList<T>) {
        mem::swap(&mut self.head, &mut other.head);
        mem::swap(&mut self.len, &mut other.len);
    }
}

impl<T: Clone> LinkedList<T> {
    /// Deep-copies the list in order, returning the allocation failure instead of aborting.
    ///
    /// When a node cannot be allocated the nodes copied so far are released before the error is returned.
    /// The same happens if `T::clone` panics part-way through.
    pub fn try_clone(&self) -> Result<LinkedList<T>, AllocError> {
        let mut copy = LinkedList::new();
        let mut tail = &mut copy.head;
        for value in self {
            match Node::alloc(value.clone()) {
                Ok(node) => {
                    tail = &mut tail.insert(node).next;
                    copy.len += 1;
                }
                Err(err) => {
                    diagnostics::partial_copy_released(copy.len, self.len);
                    return Err(err);
                }
            }
        }
        Ok(copy)
    }

    /// Replaces the contents of `self` with a copy of `source`.
    ///
    /// The copy is built completely before `self` is touched and then swapped in, so on failure `self` still holds its old contents.
    pub fn try_clone_from(&mut self, source: &LinkedList<T>) -> Result<(), AllocError> {
        let mut replacement = source.try_clone()?;
        self.swap(&mut replacement);
        Ok(())
    }
}

impl<T: Ord> LinkedList<T> {
    /// Conventional lexicographic order, element by element with `T`'s own ordering.
    ///
    /// The [`Ord`] impl of [`LinkedList`] inverts the element comparison, this is the non-inverted counterpart.
    pub fn lexicographic_cmp(&self, other: &LinkedList<T>) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

/// Releases a detached chain node by node, also while unwinding out of [`LinkedList::clear`].
struct ReleaseGuard<T>(Link<T>);

impl<T> Drop for ReleaseGuard<T> {
    fn drop(&mut self) {
        while let Some(mut node) = self.0.take() {
            self.0 = node.next.take();
        }
    }
}

impl<T> Drop for LinkedList<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T> Default for LinkedList<T> {
    fn default() -> Self {
        LinkedList::new()
    }
}

impl<T: Clone> Clone for LinkedList<T> {
    fn clone(&self) -> Self {
        match self.try_clone() {
            Ok(copy) => copy,
            Err(err) => alloc::handle_alloc_error(err.layout()),
        }
    }

    /// copy-then-swap, `self` is left as it was if copying panics
    fn clone_from(&mut self, source: &Self) {
        let mut replacement = source.clone();
        self.swap(&mut replacement);
    }
}

/// Builds the list by pushing the array's elements to the front in reverse, so it iterates in array order.
impl<T, const N: usize> From<[T; N]> for LinkedList<T> {
    fn from(values: [T; N]) -> Self {
        let mut list = LinkedList::new();
        for value in values.into_iter().rev() {
            list.push_front(value);
        }
        list
    }
}

impl<T> FromIterator<T> for LinkedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = LinkedList::new();
        let mut tail = &mut list.head;
        for value in iter {
            let node = match Node::alloc(value) {
                Ok(node) => node,
                Err(err) => alloc::handle_alloc_error(err.layout()),
            };
            tail = &mut tail.insert(node).next;
            list.len += 1;
        }
        list
    }
}

impl<T: PartialEq> PartialEq for LinkedList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for LinkedList<T> {}

/// Lexicographic with the element comparison inverted: at the first position where the lists differ, the list holding the
/// *greater* element is the lesser list. When one list is a prefix of the other the shorter one is less.
///
/// `[1, 3] < [1, 2]` and `[1] < [1, 0]`. Use [`LinkedList::lexicographic_cmp`] for the conventional order.
impl<T: PartialOrd> PartialOrd for LinkedList<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        let mut lhs = self.iter();
        let mut rhs = other.iter();
        loop {
            match (lhs.next(), rhs.next()) {
                (None, None) => return Some(Ordering::Equal),
                (None, Some(_)) => return Some(Ordering::Less),
                (Some(_), None) => return Some(Ordering::Greater),
                (Some(a), Some(b)) => match b.partial_cmp(a)? {
                    Ordering::Equal => continue,
                    ordering => return Some(ordering),
                },
            }
        }
    }
}

impl<T: Ord> Ord for LinkedList<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        let mut lhs = self.iter();
        let mut rhs = other.iter();
        loop {
            match (lhs.next(), rhs.next()) {
                (None, None) => return Ordering::Equal,
                (None, Some(_)) => return Ordering::Less,
                (Some(_), None) => return Ordering::Greater,
                (Some(a), Some(b)) => match b.cmp(a) {
                    Ordering::Equal => continue,
                    ordering => return ordering,
                },
            }
        }
    }
}

impl<T: Hash> Hash for LinkedList<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len.hash(state);
        for value in self {
            value.hash(state);
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for LinkedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self).finish()
    }
}

#[cfg(test)]
mod tests {
    use std::{
        cell::Cell,
        collections::hash_map::DefaultHasher,
        panic::{self, AssertUnwindSafe},
        rc::Rc,
    };

    use super::*;
    use crate::node::fault;

    fn values<T: Clone>(list: &LinkedList<T>) -> Vec<T> {
        list.iter().cloned().collect()
    }

    /// counts live instances through a shared counter
    #[derive(Debug)]
    struct Tracked {
        id: u32,
        live: Rc<Cell<usize>>,
    }

    impl Tracked {
        fn new(id: u32, live: &Rc<Cell<usize>>) -> Tracked {
            live.set(live.get() + 1);
            Tracked {
                id,
                live: live.clone(),
            }
        }
    }

    impl Clone for Tracked {
        fn clone(&self) -> Self {
            Tracked::new(self.id, &self.live)
        }
    }

    impl Drop for Tracked {
        fn drop(&mut self) {
            self.live.set(self.live.get() - 1);
        }
    }

    fn tracked_list(ids: &[u32], live: &Rc<Cell<usize>>) -> LinkedList<Tracked> {
        ids.iter().map(|id| Tracked::new(*id, live)).collect()
    }

    fn ids(list: &LinkedList<Tracked>) -> Vec<u32> {
        list.iter().map(|t| t.id).collect()
    }

    #[test]
    fn new_list_is_empty() {
        let list: LinkedList<String> = LinkedList::new();
        assert_eq!(list.len(), 0);
        assert!(list.is_empty());
        assert_eq!(list.front(), None);
        assert_eq!(list.begin(), list.end());
        assert_eq!(LinkedList::<String>::default(), list);
    }

    #[test]
    fn from_array_keeps_order() {
        let list = LinkedList::from(["x", "y", "z"]);
        assert_eq!(list.len(), 3);
        assert_eq!(values(&list), vec!["x", "y", "z"]);
        let empty: LinkedList<u8> = LinkedList::from([]);
        assert!(empty.is_empty());
    }

    #[test]
    fn push_and_pop_front() {
        let mut list = LinkedList::from([2, 3]);
        list.push_front(1);
        assert_eq!(list.front(), Some(&1));
        assert_eq!(list.len(), 3);
        assert_eq!(list.pop_front(), Some(1));
        assert_eq!(list.pop_front(), Some(2));
        assert_eq!(list.pop_front(), Some(3));
        assert_eq!(list.pop_front(), None);
        assert!(list.is_empty());
    }

    #[test]
    fn front_mut_changes_first_element() {
        let mut list = LinkedList::from([1, 2]);
        *list.front_mut().unwrap() = 5;
        assert_eq!(values(&list), vec![5, 2]);
    }

    #[test]
    fn clear_releases_everything() {
        let live = Rc::new(Cell::new(0));
        let mut list = tracked_list(&[1, 2, 3, 4], &live);
        assert_eq!(live.get(), 4);
        list.clear();
        assert_eq!(live.get(), 0);
        assert_eq!(list.len(), 0);
        assert!(list.is_empty());
        assert_eq!(list.begin(), list.end());
        list.push_front(Tracked::new(9, &live));
        assert_eq!(ids(&list), vec![9]);
    }

    #[test]
    fn clear_finishes_when_an_element_panics_on_drop() {
        #[derive(Debug)]
        struct Bomb {
            explode: bool,
            dropped: Rc<Cell<usize>>,
        }

        impl Drop for Bomb {
            fn drop(&mut self) {
                self.dropped.set(self.dropped.get() + 1);
                if self.explode {
                    panic!("element drop failed");
                }
            }
        }

        let dropped = Rc::new(Cell::new(0));
        let bomb = |explode| Bomb {
            explode,
            dropped: dropped.clone(),
        };
        let mut list = LinkedList::from([bomb(false), bomb(true), bomb(false)]);

        let result = panic::catch_unwind(AssertUnwindSafe(|| list.clear()));

        assert!(result.is_err());
        assert_eq!(dropped.get(), 3);
        assert_eq!(list.len(), 0);
        assert!(list.is_empty());
        assert_eq!(list.begin(), list.end());
        list.push_front(bomb(false));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn drop_releases_every_node() {
        let live = Rc::new(Cell::new(0));
        let list = tracked_list(&[1, 2, 3], &live);
        drop(list);
        assert_eq!(live.get(), 0);
    }

    #[test]
    fn long_list_drops_without_recursion() {
        let list: LinkedList<u32> = (0..500_000).collect();
        assert_eq!(list.len(), 500_000);
        drop(list);
    }

    #[test]
    fn swap_exchanges_contents() {
        let mut a = LinkedList::from([1, 2, 3]);
        let mut b = LinkedList::from([9]);
        a.swap(&mut b);
        assert_eq!(values(&a), vec![9]);
        assert_eq!(a.len(), 1);
        assert_eq!(values(&b), vec![1, 2, 3]);
        assert_eq!(b.len(), 3);
        crate::swap(&mut a, &mut b);
        assert_eq!(values(&a), vec![1, 2, 3]);
        assert_eq!(values(&b), vec![9]);
    }

    #[test]
    fn clone_is_deep() {
        let original = LinkedList::from([1, 2, 3]);
        let mut copy = original.clone();
        assert_eq!(copy, original);
        let original_nodes: Vec<*const i32> = original.iter().map(|v| v as *const i32).collect();
        assert!(copy
            .iter()
            .all(|v| !original_nodes.contains(&(v as *const i32))));
        *copy.front_mut().unwrap() = 10;
        assert_eq!(values(&original), vec![1, 2, 3]);
    }

    #[test]
    fn clone_from_replaces_contents() {
        let live = Rc::new(Cell::new(0));
        let mut target = tracked_list(&[1, 2], &live);
        let source = tracked_list(&[7, 8, 9], &live);
        target.clone_from(&source);
        assert_eq!(ids(&target), vec![7, 8, 9]);
        assert_eq!(target.len(), 3);
        // the old contents of target were released
        assert_eq!(live.get(), 6);
    }

    #[test]
    fn try_clone_rolls_back_on_allocation_failure() {
        let live = Rc::new(Cell::new(0));
        let source = tracked_list(&[1, 2, 3, 4, 5], &live);
        fault::fail_after(3);
        let result = source.try_clone();
        fault::reset();
        let err = result.err().unwrap();
        assert_eq!(err.layout(), std::alloc::Layout::new::<Node<Tracked>>());
        // partial copy released, source intact
        assert_eq!(live.get(), 5);
        assert_eq!(ids(&source), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn try_clone_from_keeps_target_on_failure() {
        let live = Rc::new(Cell::new(0));
        let mut target = tracked_list(&[1, 2], &live);
        let source = tracked_list(&[7, 8, 9], &live);
        fault::fail_after(2);
        let result = target.try_clone_from(&source);
        fault::reset();
        assert!(result.is_err());
        assert_eq!(ids(&target), vec![1, 2]);
        assert_eq!(target.len(), 2);
        assert_eq!(live.get(), 5);
    }

    #[test]
    fn try_push_front_failure_leaves_list_unchanged() {
        let mut list = LinkedList::from([2, 3]);
        fault::fail_after(0);
        let result = list.try_push_front(1);
        fault::reset();
        assert!(result.is_err());
        assert_eq!(values(&list), vec![2, 3]);
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn panicking_clone_leaks_nothing() {
        thread_local! {
            static CLONES_LEFT: Cell<usize> = const { Cell::new(usize::MAX) };
        }

        struct Fragile(Tracked);

        impl Clone for Fragile {
            fn clone(&self) -> Self {
                CLONES_LEFT.with(|left| {
                    if left.get() == 0 {
                        panic!("clone budget exhausted");
                    }
                    left.set(left.get() - 1);
                });
                Fragile(self.0.clone())
            }
        }

        let live = Rc::new(Cell::new(0));
        let source: LinkedList<Fragile> = (1..=4).map(|id| Fragile(Tracked::new(id, &live))).collect();
        let mut target: LinkedList<Fragile> = LinkedList::from([Fragile(Tracked::new(0, &live))]);

        CLONES_LEFT.with(|left| left.set(2));
        let result = panic::catch_unwind(AssertUnwindSafe(|| target.clone_from(&source)));
        CLONES_LEFT.with(|left| left.set(usize::MAX));

        assert!(result.is_err());
        assert_eq!(live.get(), 5);
        assert_eq!(target.iter().map(|f| f.0.id).collect::<Vec<_>>(), vec![0]);
    }

    #[test]
    fn equality_is_by_length_and_elements() {
        assert_eq!(LinkedList::from([1, 2, 3]), LinkedList::from([1, 2, 3]));
        assert_ne!(LinkedList::from([1, 2, 3]), LinkedList::from([1, 2]));
        assert_ne!(LinkedList::from([1, 2]), LinkedList::from([1, 2, 3]));
        assert_ne!(LinkedList::from([1, 2, 4]), LinkedList::from([1, 2, 3]));
        assert_eq!(LinkedList::<i32>::new(), LinkedList::new());
    }

    #[test]
    fn ordering_inverts_element_comparison() {
        // the greater element at the first difference makes the lesser list
        assert!(LinkedList::from([1, 3]) < LinkedList::from([1, 2]));
        assert!(LinkedList::from([1, 2]) > LinkedList::from([1, 3]));
        assert!(LinkedList::from([1, 3]) <= LinkedList::from([1, 2]));
        assert!(LinkedList::from([1, 2]) >= LinkedList::from([1, 3]));
        // prefixes still sort first
        assert!(LinkedList::from([1]) < LinkedList::from([1, 0]));
        assert!(LinkedList::<i32>::new() < LinkedList::from([5]));
        assert!(LinkedList::from([1, 2]) <= LinkedList::from([1, 2]));
        assert!(LinkedList::from([1, 2]) >= LinkedList::from([1, 2]));
        assert_eq!(
            LinkedList::from([1, 2]).cmp(&LinkedList::from([1, 2])),
            Ordering::Equal
        );

        let mut lists = vec![
            LinkedList::from([1, 2]),
            LinkedList::from([3]),
            LinkedList::from([1, 5]),
        ];
        lists.sort();
        assert_eq!(
            lists.iter().map(values).collect::<Vec<_>>(),
            vec![vec![3], vec![1, 5], vec![1, 2]]
        );
    }

    #[test]
    fn partial_ordering_of_incomparable_elements() {
        assert_eq!(
            LinkedList::from([1.0, f64::NAN]).partial_cmp(&LinkedList::from([1.0, 2.0])),
            None
        );
        assert!(LinkedList::from([2.0]) < LinkedList::from([1.5]));
    }

    #[test]
    fn lexicographic_cmp_is_conventional() {
        assert_eq!(
            LinkedList::from([1, 3]).lexicographic_cmp(&LinkedList::from([1, 2])),
            Ordering::Greater
        );
        assert_eq!(
            LinkedList::from([1]).lexicographic_cmp(&LinkedList::from([1, 0])),
            Ordering::Less
        );
    }

    #[test]
    fn equal_lists_hash_equally() {
        fn hash_of(list: &LinkedList<&str>) -> u64 {
            let mut hasher = DefaultHasher::new();
            list.hash(&mut hasher);
            hasher.finish()
        }
        let a = LinkedList::from(["a", "b"]);
        let b: LinkedList<&str> = ["a", "b"].into_iter().collect();
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn debug_prints_like_a_slice() {
        assert_eq!(format!("{:?}", LinkedList::from([1, 2])), "[1, 2]");
    }
}
