extern crate alloc;

use alloc::boxed::Box;
use core::ptr::NonNull;

use cordyceps::Linked;

use crate::{Links, SplayNode};

/// A node whose augmentation counts the elements of its subtree.
///
/// Order-statistic queries ([`rank`] and [`kth`]) are only available on trees of nodes
/// implementing this trait.
///
/// [`rank`]: crate::SplayTree::rank
/// [`kth`]: crate::SplayTree::kth
pub trait SubtreeSize {
    /// Returns the number of nodes in the subtree rooted at this node, itself included.
    fn size(&self) -> usize;
}

/// A splay tree node holding a key and the size of its subtree.
#[derive(Debug)]
pub struct SizeNode<K> {
    links: Links<SizeNode<K>>,
    key: K,
    size: usize,
}

impl<K> SizeNode<K> {
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Consumes the node and returns its key.
    pub fn into_key(self) -> K {
        self.key
    }
}

unsafe impl<K> Linked<Links<SizeNode<K>>> for SizeNode<K> {
    type Handle = Box<Self>;

    fn into_ptr(r: Self::Handle) -> NonNull<Self> {
        Box::leak(r).into()
    }

    unsafe fn from_ptr(ptr: NonNull<Self>) -> Self::Handle {
        unsafe { Box::from_raw(ptr.as_ptr()) }
    }

    unsafe fn links(ptr: NonNull<Self>) -> NonNull<Links<SizeNode<K>>> {
        let ptr = ptr.as_ptr();
        unsafe { NonNull::new_unchecked(core::ptr::addr_of_mut!((*ptr).links)) }
    }
}

unsafe impl<K> SplayNode<Links<SizeNode<K>>> for SizeNode<K> {
    type Key = K;

    fn from_key(key: K) -> Self::Handle {
        Box::new(SizeNode {
            links: Links::new(),
            key,
            size: 1,
        })
    }

    fn key(&self) -> &K {
        &self.key
    }

    fn pushup(&mut self, left: Option<&Self>, right: Option<&Self>) {
        self.size = 1 + left.map_or(0, |l| l.size) + right.map_or(0, |r| r.size);
    }
}

impl<K> SubtreeSize for SizeNode<K> {
    #[inline]
    fn size(&self) -> usize {
        self.size
    }
}
