use std::fmt;
use std::marker::PhantomData;
use std::ops::Not;
use std::ptr::NonNull;

/// One of the two child directions of a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Branch {
    Left,
    Right,
}

impl Branch {
    /// Returns the other direction.
    #[inline]
    pub fn opposite(self) -> Branch {
        match self {
            Branch::Left => Branch::Right,
            Branch::Right => Branch::Left,
        }
    }

    #[inline]
    fn index(self) -> usize {
        match self {
            Branch::Left => 0,
            Branch::Right => 1,
        }
    }
}

impl Not for Branch {
    type Output = Branch;

    fn not(self) -> Self::Output {
        self.opposite()
    }
}

pub(crate) type NodePtr<K> = NonNull<Node<K>>;
pub(crate) type Link<K> = Option<NodePtr<K>>;

pub(crate) struct Node<K> {
    pub(crate) key: K,
    pub(crate) parent: Link<K>,
    children: [Link<K>; 2],
    pub(crate) height: usize,
}

impl<K> Node<K> {
    pub(crate) fn create(parent: Link<K>, key: K) -> NodePtr<K> {
        let boxed = Box::new(Node {
            key,
            parent,
            children: [None, None],
            height: 0,
        });
        // Box::into_raw never returns null
        unsafe { NodePtr::new_unchecked(Box::into_raw(boxed)) }
    }

    /// Frees a node that is no longer linked into any tree and hands back its key.
    pub(crate) unsafe fn destroy(node_ptr: NodePtr<K>) -> K {
        let node = *Box::from_raw(node_ptr.as_ptr());
        node.key
    }

    #[inline]
    pub(crate) fn child(&self, branch: Branch) -> Link<K> {
        self.children[branch.index()]
    }

    #[inline]
    pub(crate) fn left(&self) -> Link<K> {
        self.children[0]
    }

    #[inline]
    pub(crate) fn right(&self) -> Link<K> {
        self.children[1]
    }

    #[inline]
    pub(crate) fn set_child(&mut self, branch: Branch, child: Link<K>) {
        self.children[branch.index()] = child;
    }
}

/// Returns the branch `node_ptr` occupies below its parent, or `None` for the root.
pub(crate) fn branch_of<K>(node_ptr: NodePtr<K>) -> Option<Branch> {
    unsafe {
        let parent_ptr = node_ptr.as_ref().parent?;
        if parent_ptr.as_ref().left() == Some(node_ptr) {
            Some(Branch::Left)
        } else {
            debug_assert!(parent_ptr.as_ref().right() == Some(node_ptr));
            Some(Branch::Right)
        }
    }
}

/// Points `parent_ptr`'s `branch` link at `child` and re-parents `child`.
pub(crate) fn relink<K>(mut parent_ptr: NodePtr<K>, child: Link<K>, branch: Branch) {
    unsafe {
        parent_ptr.as_mut().set_child(branch, child);
        if let Some(mut child_ptr) = child {
            child_ptr.as_mut().parent = Some(parent_ptr);
        }
    }
}

/// Makes `replacement` take `node_ptr`'s place below `node_ptr`'s parent,
/// or in `root` when `node_ptr` is the root.
/// `node_ptr`'s own links are left untouched.
pub(crate) fn replace_in_parent<K>(root: &mut Link<K>, node_ptr: NodePtr<K>, replacement: Link<K>) {
    unsafe {
        let parent = node_ptr.as_ref().parent;
        match (parent, branch_of(node_ptr)) {
            (Some(parent_ptr), Some(branch)) => relink(parent_ptr, replacement, branch),
            _ => {
                *root = replacement;
                if let Some(mut replacement_ptr) = replacement {
                    replacement_ptr.as_mut().parent = None;
                }
            }
        }
    }
}

/// Walks down `branch` links as far as possible.
pub(crate) fn extreme<K>(mut node_ptr: NodePtr<K>, branch: Branch) -> NodePtr<K> {
    while let Some(child_ptr) = unsafe { node_ptr.as_ref().child(branch) } {
        node_ptr = child_ptr;
    }
    node_ptr
}

/// Returns the in-order neighbour of `node_ptr` in direction `toward`:
/// the successor for `Right`, the predecessor for `Left`.
pub(crate) fn neighbor<K>(node_ptr: NodePtr<K>, toward: Branch) -> Link<K> {
    unsafe {
        if let Some(child_ptr) = node_ptr.as_ref().child(toward) {
            return Some(extreme(child_ptr, !toward));
        }
        let mut current = node_ptr;
        while let Some(parent_ptr) = current.as_ref().parent {
            if parent_ptr.as_ref().child(toward) != Some(current) {
                return Some(parent_ptr);
            }
            current = parent_ptr;
        }
        None
    }
}

/// A shared view of a node inside a tree.
///
/// Handles are returned by insertion, removal and search so callers can
/// inspect where a key landed and how the tree is shaped around it.
/// A handle borrows the tree, so the tree cannot change while it is alive.
pub struct NodeRef<'a, K> {
    node_ptr: NodePtr<K>,
    marker: PhantomData<&'a Node<K>>,
}

impl<'a, K> NodeRef<'a, K> {
    pub(crate) fn new(node_ptr: NodePtr<K>) -> Self {
        Self {
            node_ptr,
            marker: PhantomData,
        }
    }

    fn node(&self) -> &'a Node<K> {
        unsafe { &*self.node_ptr.as_ptr() }
    }

    /// Returns the stored key.
    pub fn key(&self) -> &'a K {
        &self.node().key
    }

    /// Returns the cached height; a childless node has height 0.
    pub fn height(&self) -> usize {
        self.node().height
    }

    /// Returns `height(right) - height(left)`, counting an absent child as -1.
    pub fn balance_factor(&self) -> isize {
        crate::balance::balance_factor(self.node_ptr)
    }

    pub fn parent(&self) -> Option<NodeRef<'a, K>> {
        self.node().parent.map(NodeRef::new)
    }

    pub fn left(&self) -> Option<NodeRef<'a, K>> {
        self.child(Branch::Left)
    }

    pub fn right(&self) -> Option<NodeRef<'a, K>> {
        self.child(Branch::Right)
    }

    pub fn child(&self, branch: Branch) -> Option<NodeRef<'a, K>> {
        self.node().child(branch).map(NodeRef::new)
    }

    /// Returns the branch this node occupies below its parent, or `None` for the root.
    pub fn branch(&self) -> Option<Branch> {
        branch_of(self.node_ptr)
    }
}

// Auto derived clone seems to have an invalid type bound of K: Clone
impl<K> Clone for NodeRef<'_, K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for NodeRef<'_, K> {}

/// Handles are equal when they refer to the same node.
impl<K> PartialEq for NodeRef<'_, K> {
    fn eq(&self, other: &Self) -> bool {
        self.node_ptr == other.node_ptr
    }
}

impl<K> Eq for NodeRef<'_, K> {}

impl<K: fmt::Debug> fmt::Debug for NodeRef<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("key", self.key())
            .field("height", &self.height())
            .finish()
    }
}
