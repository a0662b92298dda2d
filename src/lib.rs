//! An intrusive splay tree with a pluggable per-node augmentation.
//!
//! Every operation that touches existing nodes finishes by splaying the last node it reached to
//! the root, so recently used keys stay shallow and the tree is balanced in the amortized sense.
//!
// Conventions used in comments follow Sleator and Tarjan:
// - `x` is the node being splayed, `y` its parent and `z` its grandparent.
// - A zig step rotates `x` once. A zig-zig step rotates `y` and then `x` when both are children
//   on the same side. A zig-zag step rotates `x` twice when they are on opposite sides.
//
// The invariants that hold whenever control is returned to the caller:
// 1. In-order traversal yields keys in strictly increasing order under the tree's comparator.
// 2. Each child's parent link points at the node holding it; the root has no parent.
// 3. Each node's augmentation equals `pushup` applied to its children's current augmentation.
//
// Only `rotate` changes the shape of the tree, apart from the splices in `remove` and `join`
// which happen at the root and recompute its augmentation immediately afterwards.

use core::{
    cell::UnsafeCell, cmp::Ordering, fmt, marker::PhantomPinned, mem, ops::Not, pin::Pin,
    ptr::NonNull,
};

use cordyceps::Linked;

mod debug;
mod error;
mod iter;
#[cfg(any(test, feature = "model"))]
pub mod model;
mod order;
mod size;
pub mod timeline;

pub use error::JoinError;
pub use iter::Iter;
pub use order::{Compare, Natural};
pub use size::{SizeNode, SubtreeSize};

/// A node that can be stored in a [`SplayTree`].
///
/// # Safety
///
/// [`pushup`](SplayNode::pushup) may only update the node's augmented state. Implementations must
/// not move or replace `self`, and must not modify the node's [`Links`].
pub unsafe trait SplayNode<L>: Linked<L> {
    type Key;

    /// Allocates a fresh node holding `key`.
    ///
    /// The tree calls this whenever an insertion finds no node with an equal key.
    fn from_key(key: Self::Key) -> Self::Handle;

    fn key(&self) -> &Self::Key;

    /// Recomputes the augmented state of this node from its current children.
    ///
    /// Called after every rotation and splice, children before parents.
    fn pushup(&mut self, left: Option<&Self>, right: Option<&Self>);
}

/// An intrusive splay tree.
///
/// Nodes are ordered by the comparator `C`, which defaults to the key's [`Ord`] implementation.
pub struct SplayTree<T, C = Natural>
where
    T: SplayNode<Links<T>>,
{
    root: Link<T>,
    len: usize,
    compare: C,
}

pub struct Links<T: ?Sized> {
    inner: UnsafeCell<LinksInner<T>>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Dir {
    Left = 0,
    Right = 1,
}

impl Not for Dir {
    type Output = Dir;

    fn not(self) -> Self::Output {
        match self {
            Dir::Left => Dir::Right,
            Dir::Right => Dir::Left,
        }
    }
}

#[repr(C)]
struct LinksInner<T: ?Sized> {
    parent: Link<T>,
    children: [Link<T>; 2],
    _unpin: PhantomPinned,
}

type Link<T> = Option<NonNull<T>>;

impl<T> SplayTree<T, Natural>
where
    T: SplayNode<Links<T>>,
{
    /// Returns a new empty tree ordered by `T::Key`'s [`Ord`] implementation.
    pub const fn new() -> SplayTree<T, Natural> {
        SplayTree {
            root: None,
            len: 0,
            compare: Natural,
        }
    }
}

impl<T, C> Default for SplayTree<T, C>
where
    T: SplayNode<Links<T>>,
    C: Default,
{
    fn default() -> Self {
        SplayTree::with_comparator(C::default())
    }
}

impl<T, C> SplayTree<T, C>
where
    T: SplayNode<Links<T>>,
{
    /// Returns a new empty tree ordered by `compare`.
    pub const fn with_comparator(compare: C) -> SplayTree<T, C> {
        SplayTree {
            root: None,
            len: 0,
            compare,
        }
    }

    /// Returns `true` if the tree contains no elements.
    pub fn is_empty(&self) -> bool {
        debug_assert_eq!(self.len == 0, self.root.is_none());

        self.root.is_none()
    }

    /// Returns the number of elements in the tree.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns the comparator ordering this tree.
    pub const fn comparator(&self) -> &C {
        &self.compare
    }

    /// Returns the root node, if any.
    pub fn root(&self) -> Option<Pin<&T>> {
        self.root.map(|root| unsafe { Pin::new_unchecked(root.as_ref()) })
    }

    /// Returns the left child of `node`.
    pub fn left<'a>(&'a self, node: Pin<&'a T>) -> Option<Pin<&'a T>> {
        self.neighbor(node, |links| links.left())
    }

    /// Returns the right child of `node`.
    pub fn right<'a>(&'a self, node: Pin<&'a T>) -> Option<Pin<&'a T>> {
        self.neighbor(node, |links| links.right())
    }

    /// Returns the parent of `node`, or `None` if it is the root.
    pub fn parent<'a>(&'a self, node: Pin<&'a T>) -> Option<Pin<&'a T>> {
        self.neighbor(node, |links| links.parent())
    }

    fn neighbor<'a>(
        &'a self,
        node: Pin<&'a T>,
        link: impl FnOnce(&Links<T>) -> Link<T>,
    ) -> Option<Pin<&'a T>> {
        let ptr = NonNull::from(node.get_ref());

        unsafe {
            let next = link(T::links(ptr).as_ref())?;
            Some(Pin::new_unchecked(next.as_ref()))
        }
    }

    /// Returns an in-order iterator over the elements of the tree.
    ///
    /// Iteration only reads the tree; it does not splay.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self.root, self.len)
    }

    /// Clears the tree, removing all elements.
    ///
    /// Runs in linear time and constant stack space.
    pub fn clear(&mut self) {
        let cleared = self.len;
        let mut opt_cur = self.root;

        while let Some(cur) = opt_cur {
            unsafe {
                // Descend to the minimum node.
                let cur = min_in_subtree(cur);
                let parent = T::links(cur).as_ref().parent();
                let right = T::links(cur).as_ref().right();

                // Elevate the node's right child (which may be None).
                self.replace_child_or_set_root(parent, cur, right);
                self.maybe_set_parent(right, parent);

                // Drop the node.
                T::links(cur).as_mut().clear();
                drop(T::from_ptr(cur));
                self.len -= 1;

                // If the node had no right child, climb to the parent. If the node had no parent,
                // the tree is empty.
                opt_cur = right.or(parent);
            }
        }

        debug_assert!(self.root.is_none());
        debug_assert_eq!(self.len(), 0);

        if cleared > 0 {
            tracing::trace!(cleared, "cleared splay tree");
        }
    }

    // Rotates `x` above its parent `y`.
    //
    // `x` takes `y`'s place under the grandparent `z`, or becomes the root if `y` was the root.
    // The augmentation of `y` is recomputed before that of `x`, which now holds `y` as a child.
    unsafe fn rotate(&mut self, x: NonNull<T>) {
        unsafe {
            let y = T::links(x)
                .as_ref()
                .parent()
                .expect("rotated node must have a parent");
            let z = T::links(y).as_ref().parent();

            // - `y` becomes the `!dir` child of `x`.
            // - `across` goes from the `!dir` child of `x` to the `dir` child of `y`.
            let dir = which_child(y, x);
            let across = T::links(x).as_ref().child(!dir);

            T::links(y).as_mut().set_child(dir, across);
            self.maybe_set_parent(across, Some(y));

            T::links(x).as_mut().set_child(!dir, Some(y));
            T::links(y).as_mut().set_parent(Some(x));
            T::links(x).as_mut().set_parent(z);

            self.replace_child_or_set_root(z, y, Some(x));

            self.pushup(y);
            self.pushup(x);
        }
    }

    // Rotates `x` upwards until its parent is `target`, or until it is the root if `target` is
    // `None`.
    //
    // # Safety
    //
    // `target` must be `None` or a proper ancestor of `x` in this tree.
    unsafe fn splay(&mut self, x: NonNull<T>, target: Link<T>) {
        unsafe {
            while T::links(x).as_ref().parent() != target {
                let y = T::links(x)
                    .as_ref()
                    .parent()
                    .expect("splay target must be an ancestor");
                let z = T::links(y).as_ref().parent();

                if z != target {
                    let z = z.expect("splay target must be an ancestor");

                    if which_child(y, x) == which_child(z, y) {
                        // Zig-zig.
                        self.rotate(y);
                    } else {
                        // Zig-zag.
                        self.rotate(x);
                    }
                }

                self.rotate(x);
            }
        }

        if target.is_none() {
            self.root = Some(x);
        }
    }

    // Recomputes the augmentation of `node` from its children.
    unsafe fn pushup(&mut self, node: NonNull<T>) {
        unsafe {
            let left = T::links(node).as_ref().left();
            let right = T::links(node).as_ref().right();

            let left = left.map(|l| l.as_ref());
            let right = right.map(|r| r.as_ref());

            (*node.as_ptr()).pushup(left, right);
        }
    }

    // Allocates a detached node for `key` with its augmentation initialized.
    fn new_node(&mut self, key: T::Key) -> NonNull<T> {
        let ptr = T::into_ptr(T::from_key(key));

        unsafe {
            T::links(ptr).as_mut().clear();
            self.pushup(ptr);
        }

        ptr
    }

    unsafe fn maybe_set_parent(&mut self, opt_node: Link<T>, parent: Link<T>) {
        let Some(node) = opt_node else {
            return;
        };

        unsafe { T::links(node).as_mut().set_parent(parent) };
    }

    #[inline]
    unsafe fn replace_child_or_set_root(
        &mut self,
        parent: Link<T>,
        old_child: NonNull<T>,
        new_child: Link<T>,
    ) {
        match parent {
            Some(parent) => self.replace_child(parent, old_child, new_child),
            None => self.root = new_child,
        }
    }

    // Replaces the child pointer of `parent` pointing at `old_child` with `new_child`.
    //
    // `new_child`'s parent pointer is not updated.
    //
    // # Safety
    //
    // The caller must ensure that `old_child` is a child node of `parent`.
    #[inline]
    unsafe fn replace_child(
        &mut self,
        parent: NonNull<T>,
        old_child: NonNull<T>,
        new_child: Link<T>,
    ) {
        unsafe {
            let dir = which_child(parent, old_child);

            debug_assert_eq!(
                T::links(parent).as_ref().child(dir),
                Some(old_child),
                "`old_child` must be a child of `parent`"
            );

            T::links(parent).as_mut().set_child(dir, new_child);
        }
    }
}

impl<T, C> SplayTree<T, C>
where
    T: SplayNode<Links<T>>,
    C: Compare<T::Key>,
{
    #[doc(hidden)]
    pub fn assert_invariants(&self) {
        let Some(root) = self.root else {
            assert_eq!(self.len, 0, "empty tree must have length 0");
            return;
        };

        unsafe {
            assert_eq!(T::links(root).as_ref().parent(), None, "root must not have a parent");

            let mut count = 0;
            let mut stack = vec![root];

            while let Some(node) = stack.pop() {
                count += 1;

                for dir in [Dir::Left, Dir::Right] {
                    if let Some(child) = T::links(node).as_ref().child(dir) {
                        // Ensure child's parent link points to this node.
                        let parent = T::links(child)
                            .as_ref()
                            .parent()
                            .expect("child parent pointer not set");
                        assert_eq!(node, parent);

                        stack.push(child);
                    }
                }
            }

            assert_eq!(count, self.len, "node count must match tree length");
        }

        let mut keys = self.iter().map(T::key);
        if let Some(mut prev) = keys.next() {
            for key in keys {
                assert_eq!(
                    self.compare.compare(prev, key),
                    Ordering::Less,
                    "in-order keys must be strictly increasing"
                );
                prev = key;
            }
        }
    }

    /// Inserts `key` into the tree and returns the node holding it, now the root.
    ///
    /// If a node with an equal key already exists, no node is created; the existing node is
    /// splayed to the root and returned instead.
    pub fn insert(&mut self, key: T::Key) -> Pin<&T> {
        let ptr = self.insert_raw(key);

        unsafe { Pin::new_unchecked(ptr.as_ref()) }
    }

    fn insert_raw(&mut self, key: T::Key) -> NonNull<T> {
        let Some(mut cur) = self.root else {
            // Tree is empty. The new node becomes the root.
            let ptr = self.new_node(key);
            self.root = Some(ptr);
            self.len += 1;
            return ptr;
        };

        // Descend the tree, looking for an equal key or a free slot.
        loop {
            let dir = match self.compare.compare(&key, unsafe { cur.as_ref().key() }) {
                Ordering::Less => Dir::Left,
                Ordering::Equal => {
                    unsafe { self.splay(cur, None) };
                    return cur;
                }
                Ordering::Greater => Dir::Right,
            };

            match unsafe { T::links(cur).as_ref().child(dir) } {
                // Descend.
                Some(child) => cur = child,

                // Set the new node as child.
                None => {
                    let ptr = self.new_node(key);

                    unsafe {
                        T::links(cur).as_mut().set_child(dir, Some(ptr));
                        T::links(ptr).as_mut().set_parent(Some(cur));
                        self.splay(ptr, None);
                    }

                    self.len += 1;
                    return ptr;
                }
            }
        }
    }

    /// Returns the node holding `key` after splaying it to the root.
    ///
    /// On a miss the last node visited during the descent is splayed instead, so the root changes
    /// even when `None` is returned.
    pub fn find(&mut self, key: &T::Key) -> Option<Pin<&T>> {
        let ptr = self.find_raw(key)?;

        unsafe { Some(Pin::new_unchecked(ptr.as_ref())) }
    }

    /// Returns `true` if the tree holds a node with a key equal to `key`.
    ///
    /// Splays exactly like [`find`](SplayTree::find).
    pub fn contains(&mut self, key: &T::Key) -> bool {
        self.find_raw(key).is_some()
    }

    fn find_raw(&mut self, key: &T::Key) -> Link<T> {
        let mut cur = self.root?;

        loop {
            let next = unsafe {
                match self.compare.compare(key, cur.as_ref().key()) {
                    Ordering::Less => T::links(cur).as_ref().left(),
                    Ordering::Equal => {
                        self.splay(cur, None);
                        return Some(cur);
                    }
                    Ordering::Greater => T::links(cur).as_ref().right(),
                }
            };

            match next {
                Some(next) => cur = next,
                None => {
                    unsafe { self.splay(cur, None) };
                    return None;
                }
            }
        }
    }

    /// Returns the minimum element of the tree after splaying it to the root.
    pub fn find_min(&mut self) -> Option<Pin<&T>> {
        let min = min_in_subtree(self.root?);
        unsafe {
            self.splay(min, None);
            Some(Pin::new_unchecked(min.as_ref()))
        }
    }

    /// Returns the maximum element of the tree after splaying it to the root.
    pub fn find_max(&mut self) -> Option<Pin<&T>> {
        let max = max_in_subtree(self.root?);
        unsafe {
            self.splay(max, None);
            Some(Pin::new_unchecked(max.as_ref()))
        }
    }

    /// Removes the node holding `key` and returns `true`, or returns `false` if there is none.
    pub fn delete(&mut self, key: &T::Key) -> bool {
        self.remove(key).is_some()
    }

    /// Removes the node holding `key` from the tree and returns it.
    pub fn remove(&mut self, key: &T::Key) -> Option<T::Handle> {
        // A successful find leaves the node at the root.
        let node = self.find_raw(key)?;
        debug_assert_eq!(self.root, Some(node));

        unsafe {
            let left = T::links(node).as_ref().left();
            let right = T::links(node).as_ref().right();

            match (left, right) {
                (Some(left), Some(right)) => {
                    // Cut off both subtrees and make the left one the tree.
                    T::links(left).as_mut().set_parent(None);
                    T::links(right).as_mut().set_parent(None);
                    self.root = Some(left);

                    // The maximum of the left subtree has no right child once it is the root, so
                    // the right subtree can hang there.
                    let max = max_in_subtree(left);
                    self.splay(max, None);

                    T::links(max).as_mut().set_right(Some(right));
                    T::links(right).as_mut().set_parent(Some(max));
                    self.pushup(max);
                }

                (Some(child), None) | (None, Some(child)) => {
                    T::links(child).as_mut().set_parent(None);
                    self.root = Some(child);
                }

                (None, None) => self.root = None,
            }

            T::links(node).as_mut().clear();
            self.len -= 1;

            tracing::trace!(len = self.len, "removed node from splay tree");

            Some(T::from_ptr(node))
        }
    }

    /// Returns the rank of `key`: one more than the number of keys strictly less than it.
    ///
    /// Returns `0` if the tree is empty or `key` is not present. Like [`find`](SplayTree::find),
    /// this splays the tree either way.
    pub fn rank(&mut self, key: &T::Key) -> usize
    where
        T: SubtreeSize,
    {
        let Some(node) = self.find_raw(key) else {
            return 0;
        };

        unsafe { subtree_size(T::links(node).as_ref().left()) + 1 }
    }

    /// Returns the `k`-th smallest element (1-based) after splaying it to the root.
    ///
    /// Returns `None` if `k` is `0` or greater than the number of elements; the tree is not
    /// restructured in that case.
    pub fn kth(&mut self, k: usize) -> Option<Pin<&T>>
    where
        T: SubtreeSize,
    {
        let mut k = k;
        let mut opt_cur = self.root;

        while let Some(cur) = opt_cur {
            unsafe {
                let left = T::links(cur).as_ref().left();
                let left_size = subtree_size(left);

                match k.cmp(&(left_size + 1)) {
                    Ordering::Less => opt_cur = left,
                    Ordering::Equal => {
                        self.splay(cur, None);
                        return Some(Pin::new_unchecked(cur.as_ref()));
                    }
                    Ordering::Greater => {
                        k -= left_size + 1;
                        opt_cur = T::links(cur).as_ref().right();
                    }
                }
            }
        }

        None
    }

    /// Returns the largest element strictly less than `key` after splaying it to the root.
    pub fn prev(&mut self, key: &T::Key) -> Option<Pin<&T>> {
        self.closest(key, Ordering::Less)
    }

    /// Returns the smallest element strictly greater than `key` after splaying it to the root.
    pub fn next(&mut self, key: &T::Key) -> Option<Pin<&T>> {
        self.closest(key, Ordering::Greater)
    }

    // Finds the closest node whose key compares to `key` as `side`.
    fn closest(&mut self, key: &T::Key, side: Ordering) -> Option<Pin<&T>> {
        // Moving towards `key` from a candidate on the `side` side.
        let (toward, away) = match side {
            Ordering::Less => (Dir::Right, Dir::Left),
            _ => (Dir::Left, Dir::Right),
        };

        let mut best = None;
        let mut opt_cur = self.root;

        while let Some(cur) = opt_cur {
            unsafe {
                if self.compare.compare(cur.as_ref().key(), key) == side {
                    best = Some(cur);
                    opt_cur = T::links(cur).as_ref().child(toward);
                } else {
                    opt_cur = T::links(cur).as_ref().child(away);
                }
            }
        }

        let best = best?;
        unsafe {
            self.splay(best, None);
            Some(Pin::new_unchecked(best.as_ref()))
        }
    }

    /// Moves every element of `other` into `self`, leaving `other` empty.
    ///
    /// Every key in `self` must compare less than every key in `other`. This is only checked when
    /// debug assertions are enabled; violating it otherwise leaves `self` out of order. See
    /// [`try_join`](SplayTree::try_join) for a checked variant.
    ///
    /// This operation completes in amortized _O(log(n))_ time.
    pub fn join(&mut self, other: &mut SplayTree<T, C>) {
        let Some(other_root) = other.root.take() else {
            return;
        };
        let other_len = mem::take(&mut other.len);

        debug_assert!(
            self.precedes(other_root),
            "joined tree must hold strictly greater keys"
        );

        match self.root {
            None => self.root = Some(other_root),
            Some(root) => {
                // Once the maximum is the root, it has no right child.
                let max = max_in_subtree(root);

                unsafe {
                    self.splay(max, None);

                    T::links(max).as_mut().set_right(Some(other_root));
                    T::links(other_root).as_mut().set_parent(Some(max));
                    self.pushup(max);
                }
            }
        }

        self.len += other_len;

        tracing::trace!(joined = other_len, len = self.len, "joined splay trees");
    }

    /// Like [`join`](SplayTree::join), but first checks that every key in `self` is less than
    /// every key in `other`.
    ///
    /// On failure neither tree gains or loses elements, though both may have been splayed.
    pub fn try_join(&mut self, other: &mut SplayTree<T, C>) -> Result<(), JoinError> {
        if let (Some(root), Some(other_root)) = (self.root, other.root) {
            let max = max_in_subtree(root);
            let min = min_in_subtree(other_root);

            let ordering = unsafe {
                self.splay(max, None);
                other.splay(min, None);

                self.compare.compare(max.as_ref().key(), min.as_ref().key())
            };

            if ordering != Ordering::Less {
                tracing::trace!(
                    len = self.len,
                    other_len = other.len,
                    "refused to join overlapping splay trees"
                );
                return Err(JoinError::Overlap);
            }
        }

        self.join(other);
        Ok(())
    }

    /// Inserts a copy of every key of `other` into `self`, then empties `other`.
    ///
    /// Unlike [`join`](SplayTree::join), the key ranges may overlap. Keys present in both trees
    /// end up in a single node. This operation completes in _O(m log(n + m))_ time, where `m` is
    /// the length of `other`.
    pub fn merge(&mut self, other: &mut SplayTree<T, C>)
    where
        T::Key: Clone,
    {
        let Some(other_root) = other.root else {
            return;
        };

        let donated = other.len;
        let mut stack = vec![other_root];

        while let Some(node) = stack.pop() {
            unsafe {
                stack.extend(T::links(node).as_ref().right());
                stack.extend(T::links(node).as_ref().left());

                self.insert_raw(node.as_ref().key().clone());
            }
        }

        other.clear();

        tracing::trace!(donated, len = self.len, "merged splay trees");
    }

    // Returns `true` if every key in `self` is less than every key in the subtree at `other`.
    //
    // Read-only; neither tree is splayed.
    fn precedes(&self, other: NonNull<T>) -> bool {
        let Some(root) = self.root else {
            return true;
        };

        unsafe {
            let max = max_in_subtree(root);
            let min = min_in_subtree(other);

            self.compare.compare(max.as_ref().key(), min.as_ref().key()) == Ordering::Less
        }
    }
}

impl<T, C> fmt::Debug for SplayTree<T, C>
where
    T: SplayNode<Links<T>>,
    T::Key: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter().map(T::key)).finish()
    }
}

impl<T, C> Drop for SplayTree<T, C>
where
    T: SplayNode<Links<T>>,
{
    fn drop(&mut self) {
        self.clear();
    }
}

// Returns the side of `parent` on which `child` hangs.
unsafe fn which_child<T>(parent: NonNull<T>, child: NonNull<T>) -> Dir
where
    T: Linked<Links<T>> + ?Sized,
{
    if unsafe { T::links(parent).as_ref().left() } == Some(child) {
        Dir::Left
    } else {
        Dir::Right
    }
}

// Returns the minimum node in the subtree.
fn min_in_subtree<T>(root: NonNull<T>) -> NonNull<T>
where
    T: Linked<Links<T>> + ?Sized,
{
    let mut cur = root;

    while let Some(left) = unsafe { T::links(cur).as_ref().left() } {
        cur = left;
    }

    cur
}

// Returns the maximum node in the subtree.
fn max_in_subtree<T>(root: NonNull<T>) -> NonNull<T>
where
    T: Linked<Links<T>> + ?Sized,
{
    let mut cur = root;

    while let Some(right) = unsafe { T::links(cur).as_ref().right() } {
        cur = right;
    }

    cur
}

unsafe fn subtree_size<T: SubtreeSize>(node: Link<T>) -> usize {
    node.map_or(0, |n| unsafe { n.as_ref().size() })
}

impl<T: ?Sized> Links<T> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            inner: UnsafeCell::new(LinksInner {
                parent: None,
                children: [None; 2],
                _unpin: PhantomPinned,
            }),
        }
    }

    #[inline]
    fn parent(&self) -> Link<T> {
        unsafe { (*self.inner.get()).parent }
    }

    #[inline]
    fn child(&self, dir: Dir) -> Link<T> {
        unsafe { (*self.inner.get()).children[dir as usize] }
    }

    #[inline]
    fn left(&self) -> Link<T> {
        self.child(Dir::Left)
    }

    #[inline]
    fn right(&self) -> Link<T> {
        self.child(Dir::Right)
    }

    #[inline]
    fn set_parent(&mut self, parent: Link<T>) -> Link<T> {
        mem::replace(&mut self.inner.get_mut().parent, parent)
    }

    #[inline]
    fn set_child(&mut self, dir: Dir, child: Link<T>) -> Link<T> {
        mem::replace(&mut self.inner.get_mut().children[dir as usize], child)
    }

    #[inline]
    fn set_right(&mut self, right: Link<T>) -> Link<T> {
        self.set_child(Dir::Right, right)
    }

    #[inline]
    fn clear(&mut self) {
        let inner = self.inner.get_mut();
        inner.parent = None;
        inner.children = [None; 2];
    }
}

impl<T: ?Sized> Default for Links<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> fmt::Debug for Links<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Links")
            .field("parent", &self.parent())
            .field("left", &self.left())
            .field("right", &self.right())
            .finish()
    }
}
