//! Interval stabbing queries on a splay tree.
//!
//! Each [`TimelineNode`] keeps the largest right endpoint found in its subtree. A query for the
//! intervals covering a point `t` skips every subtree whose largest right endpoint lies before
//! `t`. Because intervals are ordered by their left endpoint first, it also skips the right
//! subtree of any interval starting after `t`.

extern crate alloc;

use alloc::{boxed::Box, rc::Rc, vec::Vec};
use core::{cmp::Ordering, fmt, ptr::NonNull};

use cordyceps::Linked;

use crate::{Compare, Links, SplayNode, SplayTree};

/// Invoked by [`Interval::fire`] with the interval it belongs to.
pub type Callback = Rc<dyn Fn(&Interval)>;

/// A closed interval `[left, right]` tagged with an id.
#[derive(Clone)]
pub struct Interval {
    pub left: i64,
    pub right: i64,
    pub id: u64,
    pub callback: Option<Callback>,
}

impl Interval {
    pub fn new(left: i64, right: i64, id: u64) -> Self {
        Interval {
            left,
            right,
            id,
            callback: None,
        }
    }

    pub fn with_callback<F>(mut self, callback: F) -> Self
    where
        F: Fn(&Interval) + 'static,
    {
        self.callback = Some(Rc::new(callback));
        self
    }

    /// Returns `true` if `left <= t <= right`.
    #[inline]
    pub fn contains(&self, t: i64) -> bool {
        self.left <= t && t <= self.right
    }

    /// Invokes the callback, if any. Returns whether there was one.
    pub fn fire(&self) -> bool {
        match &self.callback {
            Some(callback) => {
                callback(self);
                true
            }
            None => false,
        }
    }
}

impl fmt::Debug for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interval")
            .field("left", &self.left)
            .field("right", &self.right)
            .field("id", &self.id)
            .field("callback", &self.callback.is_some())
            .finish()
    }
}

/// Orders intervals by left endpoint, then right endpoint, then id.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct IntervalOrder;

impl Compare<Interval> for IntervalOrder {
    fn compare(&self, a: &Interval, b: &Interval) -> Ordering {
        a.left
            .cmp(&b.left)
            .then(a.right.cmp(&b.right))
            .then(a.id.cmp(&b.id))
    }
}

/// A splay tree node holding an interval and the largest right endpoint of its subtree.
#[derive(Debug)]
pub struct TimelineNode {
    links: Links<TimelineNode>,
    interval: Interval,
    max_right: i64,
}

impl TimelineNode {
    pub fn interval(&self) -> &Interval {
        &self.interval
    }

    /// Returns the largest right endpoint among the intervals in this node's subtree.
    pub fn max_right(&self) -> i64 {
        self.max_right
    }
}

unsafe impl Linked<Links<TimelineNode>> for TimelineNode {
    type Handle = Box<Self>;

    fn into_ptr(r: Self::Handle) -> NonNull<Self> {
        Box::leak(r).into()
    }

    unsafe fn from_ptr(ptr: NonNull<Self>) -> Self::Handle {
        unsafe { Box::from_raw(ptr.as_ptr()) }
    }

    unsafe fn links(ptr: NonNull<Self>) -> NonNull<Links<TimelineNode>> {
        let ptr = ptr.as_ptr();
        unsafe { NonNull::new_unchecked(core::ptr::addr_of_mut!((*ptr).links)) }
    }
}

unsafe impl SplayNode<Links<TimelineNode>> for TimelineNode {
    type Key = Interval;

    fn from_key(interval: Interval) -> Self::Handle {
        Box::new(TimelineNode {
            links: Links::new(),
            max_right: interval.right,
            interval,
        })
    }

    fn key(&self) -> &Interval {
        &self.interval
    }

    fn pushup(&mut self, left: Option<&Self>, right: Option<&Self>) {
        let mut max = self.interval.right;
        if let Some(left) = left {
            max = max.max(left.max_right);
        }
        if let Some(right) = right {
            max = max.max(right.max_right);
        }
        self.max_right = max;
    }
}

/// A splay tree of intervals supporting stabbing queries.
pub type Timeline = SplayTree<TimelineNode, IntervalOrder>;

/// Returns every interval in `tree` containing `t`.
///
/// Intervals are returned in the order the walk reaches them, which is not sorted. The last node
/// visited is splayed to the root afterwards, so a query returning `k` intervals costs amortized
/// _O(log(n) + k)_.
pub fn query_intervals(tree: &mut Timeline, t: i64) -> Vec<Interval> {
    let mut found = Vec::new();
    let mut last = None;
    let mut stack: Vec<NonNull<TimelineNode>> = tree.root.into_iter().collect();

    while let Some(node) = stack.pop() {
        last = Some(node);

        let (left, right) = unsafe {
            let links = TimelineNode::links(node).as_ref();
            (links.left(), links.right())
        };
        let node = unsafe { node.as_ref() };

        // Nothing in this subtree reaches `t`.
        if node.max_right < t {
            continue;
        }

        // Everything to the right starts after `t` as well.
        if node.interval.left > t {
            stack.extend(left);
            continue;
        }

        if node.interval.right >= t {
            found.push(node.interval.clone());
        }

        // Left is pushed last so it is walked first.
        stack.extend(right);
        stack.extend(left);
    }

    if let Some(last) = last {
        unsafe { tree.splay(last, None) };
    }

    found
}

/// Fires the callback of every interval in `tree` containing `t`.
///
/// Returns the number of intervals containing `t`, whether or not they carry a callback.
pub fn fire_at(tree: &mut Timeline, t: i64) -> usize {
    let hits = query_intervals(tree, t);

    for interval in &hits {
        interval.fire();
    }

    hits.len()
}

#[cfg(test)]
mod tests {
    extern crate std;

    use core::cell::RefCell;
    use std::prelude::v1::*;

    use super::*;

    fn sample() -> Timeline {
        let mut tree = Timeline::default();

        for (left, right, id) in [
            (1, 5, 1),
            (2, 8, 2),
            (10, 15, 3),
            (6, 10, 4),
            (4, 4, 5),
            (1, 100, 6),
        ] {
            tree.insert(Interval::new(left, right, id));
            tree.assert_invariants();
        }

        tree
    }

    fn ids(intervals: &[Interval]) -> Vec<u64> {
        let mut ids: Vec<u64> = intervals.iter().map(|i| i.id).collect();
        ids.sort_unstable();
        ids
    }

    // Recomputes every node's augmentation from scratch and compares it to the stored value.
    fn assert_max_right(tree: &Timeline) {
        fn check(tree: &Timeline, node: core::pin::Pin<&TimelineNode>) -> i64 {
            let mut max = node.interval().right;
            if let Some(left) = tree.left(node) {
                max = max.max(check(tree, left));
            }
            if let Some(right) = tree.right(node) {
                max = max.max(check(tree, right));
            }
            assert_eq!(node.max_right(), max, "stale max_right at {:?}", node.interval());
            max
        }

        if let Some(root) = tree.root() {
            check(tree, root);
        }
    }

    #[test]
    fn stabbing_queries() {
        let mut tree = sample();

        assert_eq!(ids(&query_intervals(&mut tree, 4)), [1, 2, 5, 6]);
        assert_eq!(ids(&query_intervals(&mut tree, 9)), [4, 6]);
        assert!(query_intervals(&mut tree, 0).is_empty());
        assert!(query_intervals(&mut tree, 200).is_empty());

        tree.assert_invariants();
        assert_max_right(&tree);
    }

    #[test]
    fn endpoints_are_inclusive() {
        let mut tree = sample();

        assert_eq!(ids(&query_intervals(&mut tree, 10)), [3, 4, 6]);
        assert_eq!(ids(&query_intervals(&mut tree, 100)), [6]);
        assert_eq!(ids(&query_intervals(&mut tree, 1)), [1, 6]);
    }

    #[test]
    fn max_right_survives_restructuring() {
        let mut tree = sample();
        assert_eq!(tree.root().unwrap().max_right(), 100);

        assert!(tree.delete(&Interval::new(1, 100, 6)));
        tree.assert_invariants();
        assert_max_right(&tree);
        assert_eq!(tree.find_max().unwrap().max_right(), 15);

        assert_eq!(ids(&query_intervals(&mut tree, 9)), [4]);
        assert!(query_intervals(&mut tree, 50).is_empty());
        assert_max_right(&tree);
    }

    #[test]
    fn query_splays_last_visited() {
        let mut tree = sample();
        let before = tree.root().unwrap().interval().id;

        // The root, inserted last, covers 9 and has children on both sides, so the walk
        // continues below it.
        assert_eq!(before, 6);
        query_intervals(&mut tree, 9);
        tree.assert_invariants();
        assert_max_right(&tree);

        let after = tree.root().unwrap().interval().id;
        assert_ne!(before, after);
    }

    #[test]
    fn empty_timeline() {
        let mut tree = Timeline::default();
        assert!(query_intervals(&mut tree, 3).is_empty());
        assert_eq!(fire_at(&mut tree, 3), 0);
    }

    #[test]
    fn callbacks_fire_for_covering_intervals() {
        let fired = Rc::new(RefCell::new(Vec::new()));
        let mut tree = Timeline::default();

        for (left, right, id) in [(0, 10, 1), (5, 15, 2), (20, 30, 3)] {
            let fired = Rc::clone(&fired);
            tree.insert(
                Interval::new(left, right, id).with_callback(move |i| fired.borrow_mut().push(i.id)),
            );
        }
        tree.insert(Interval::new(7, 8, 4));

        assert_eq!(fire_at(&mut tree, 7), 3);

        let mut seen = fired.borrow().clone();
        seen.sort_unstable();
        assert_eq!(seen, [1, 2]);
    }

    #[test]
    fn merged_timelines_answer_queries() {
        let mut a = Timeline::default();
        let mut b = Timeline::default();

        a.insert(Interval::new(0, 3, 1));
        a.insert(Interval::new(4, 9, 2));
        b.insert(Interval::new(2, 6, 3));
        b.insert(Interval::new(4, 9, 2));

        a.merge(&mut b);
        a.assert_invariants();
        assert!(b.is_empty());
        assert_eq!(a.len(), 3);
        assert_max_right(&a);

        assert_eq!(ids(&query_intervals(&mut a, 5)), [2, 3]);
    }

    #[test]
    fn interval_order_breaks_ties() {
        let order = IntervalOrder;
        let a = Interval::new(1, 5, 1);

        assert_eq!(order.compare(&a, &Interval::new(2, 3, 0)), Ordering::Less);
        assert_eq!(order.compare(&a, &Interval::new(1, 4, 9)), Ordering::Greater);
        assert_eq!(order.compare(&a, &Interval::new(1, 5, 2)), Ordering::Less);
        assert_eq!(order.compare(&a, &Interval::new(1, 5, 1)), Ordering::Equal);
    }
}
