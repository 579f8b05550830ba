//! Read-only views of single nodes.
//!
//! A [`NodeRef`] lets callers walk parent and child links and look at what each node holds. It
//! never yields more than one node at a time and is not an iterator over the tree.

use std::fmt;

use crate::arena::{Node, NodeId};
use crate::tree::Tree;

/// A borrowed view of one node in a [`Tree`].
///
/// # Examples
///
/// ```
/// use ordered_tree::Tree;
///
/// let mut tree = Tree::new();
/// tree.insert(2, "two");
/// tree.insert(1, "one");
///
/// let root = tree.root();
/// let left = root.left().unwrap();
///
/// assert_eq!(root.key(), Some(&2));
/// assert_eq!(left.value(), Some(&"one"));
/// assert_eq!(left.parent().map(|p| p.id()), Some(root.id()));
/// assert!(root.right().is_none());
/// ```
pub struct NodeRef<'a, K, V> {
    tree: &'a Tree<K, V>,
    id: NodeId,
}

impl<K, V> Clone for NodeRef<'_, K, V> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<K, V> Copy for NodeRef<'_, K, V> {}

impl<'a, K, V> NodeRef<'a, K, V> {
    pub(crate) fn new(tree: &'a Tree<K, V>, id: NodeId) -> Self {
        Self { tree, id }
    }

    fn node(&self) -> &'a Node<K, V> {
        self.tree.arena().node(self.id)
    }

    fn at(&self, id: Option<NodeId>) -> Option<Self> {
        id.map(|id| Self::new(self.tree, id))
    }

    /// The id of this node. The root's id stays the same for the tree's whole life.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// This node's key, or `None` if this is the root of an empty tree.
    pub fn key(&self) -> Option<&'a K> {
        self.node().key()
    }

    /// This node's value, or `None` if this is the root of an empty tree.
    pub fn value(&self) -> Option<&'a V> {
        self.node().entry.as_ref().map(|e| &e.value)
    }

    /// The node owning this one, or `None` for the root.
    pub fn parent(&self) -> Option<Self> {
        self.at(self.node().parent)
    }

    /// The left child.
    pub fn left(&self) -> Option<Self> {
        self.at(self.node().left)
    }

    /// The right child.
    pub fn right(&self) -> Option<Self> {
        self.at(self.node().right)
    }

    /// Whether this node has no parent.
    pub fn is_root(&self) -> bool {
        self.node().parent.is_none()
    }
}

/// Prints this node's entry and the ids of its neighbours. Children are not expanded, so
/// formatting one node never walks the tree.
impl<K, V> fmt::Debug for NodeRef<'_, K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let node = self.node();
        f.debug_struct("Node")
            .field("id", &self.id)
            .field("key", &self.key())
            .field("value", &self.value())
            .field("parent", &node.parent)
            .field("left", &node.left)
            .field("right", &node.right)
            .finish()
    }
}

/// Every node of a tree in pre-order, printed as a flat list.
pub(crate) struct Preorder<'a, K, V>(pub(crate) &'a Tree<K, V>);

impl<K, V> fmt::Debug for Preorder<'_, K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut list = f.debug_list();
        let mut stack = vec![self.0.root()];
        while let Some(node) = stack.pop() {
            list.entry(&node);
            // Right first so the left subtree is printed first.
            stack.extend(node.right());
            stack.extend(node.left());
        }
        list.finish()
    }
}
