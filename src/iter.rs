use core::{marker::PhantomData, ptr::NonNull};

use crate::{which_child, Dir, Link, Links, SplayNode};

enum CameFrom {
    Parent,
    LeftChild,
    Here,
    RightChild,
}

/// An in-order iterator over the elements of a [`SplayTree`](crate::SplayTree).
pub struct Iter<'tree, T: SplayNode<Links<T>>> {
    cur: Link<T>,
    from: CameFrom,
    remaining: usize,
    _tree: PhantomData<&'tree T>,
}

impl<'tree, T: SplayNode<Links<T>>> Iter<'tree, T> {
    pub(crate) fn new(root: Link<T>, len: usize) -> Self {
        Iter {
            cur: root,
            from: CameFrom::Parent,
            remaining: len,
            _tree: PhantomData,
        }
    }

    // Climbs from `node` until the first ancestor holding it in its left subtree.
    fn ascend_from_right(node: NonNull<T>) -> Link<T> {
        let mut cur = node;

        while let Some(parent) = unsafe { T::links(cur).as_ref().parent() } {
            match unsafe { which_child(parent, cur) } {
                Dir::Left => return Some(parent),
                Dir::Right => cur = parent,
            }
        }

        None
    }
}

impl<'tree, T: SplayNode<Links<T>>> Iterator for Iter<'tree, T> {
    type Item = &'tree T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let mut cur = self.cur?;

        loop {
            match self.from {
                CameFrom::Parent => {
                    // Entering a subtree: its minimum is the next element.
                    while let Some(left) = unsafe { T::links(cur).as_ref().left() } {
                        cur = left;
                    }

                    self.from = CameFrom::LeftChild;
                }

                CameFrom::LeftChild => {
                    self.cur = Some(cur);
                    self.from = CameFrom::Here;
                    self.remaining -= 1;

                    return Some(unsafe { cur.as_ref() });
                }

                CameFrom::Here => match unsafe { T::links(cur).as_ref().right() } {
                    Some(right) => {
                        self.from = CameFrom::Parent;
                        cur = right;
                    }
                    None => self.from = CameFrom::RightChild,
                },

                CameFrom::RightChild => {
                    // The subtree at `cur` is exhausted.
                    cur = Self::ascend_from_right(cur)?;
                    self.from = CameFrom::LeftChild;
                }
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'tree, T: SplayNode<Links<T>>> ExactSizeIterator for Iter<'tree, T> {}
