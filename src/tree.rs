//! A plain Binary Search Tree with parent links and in-place repair on removal. The root node
//! _is_ the tree: it is allocated once, when the tree is built, and keeps its [`NodeId`] for as
//! long as the tree lives. Removing the root overwrites its contents instead of moving the tree's
//! entry point somewhere else.
//!
//! There is no rebalancing. Inserting keys in sorted order builds a tree as tall as it has
//! entries.
//!
//! # Examples
//!
//! ```
//! use ordered_tree::{Tree, TreeError};
//!
//! let mut tree = Tree::new();
//!
//! // Nothing in here yet.
//! assert_eq!(tree.find(&1), Err(TreeError::KeyNotFound));
//!
//! tree.insert(1, 2);
//! assert_eq!(tree.find(&1), Ok(&2));
//!
//! // Removing a key hands back its value.
//! assert_eq!(tree.remove(&1), Ok(2));
//! assert_eq!(tree.remove(&1), Err(TreeError::KeyNotFound));
//! assert!(tree.is_empty());
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::mem;

use tracing::{debug, trace};

use crate::arena::{Arena, Entry, Node, NodeId};
use crate::config::{Duplicates, TreeConfig};
use crate::error::{Result, TreeError, Violation};
use crate::node::{NodeRef, Preorder};
use crate::util::Side;

/// An unbalanced Binary Search Tree. This can be used for inserting, finding, and removing keys
/// and values.
#[derive(Clone)]
pub struct Tree<K, V> {
    arena: Arena<K, V>,
    // Allocated in `with_config` and never freed.
    root: NodeId,
    len: usize,
    config: TreeConfig,
}

impl<K, V> Default for Tree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> fmt::Debug for Tree<K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree")
            .field("len", &self.len)
            .field("root", &self.root)
            .field("nodes", &Preorder(self))
            .finish()
    }
}

impl<K, V> Tree<K, V> {
    /// Generate a new, empty `Tree`.
    pub fn new() -> Self {
        Self::with_config(TreeConfig::default())
    }

    /// Generate a new, empty `Tree` that follows the given policy.
    pub fn with_config(config: TreeConfig) -> Self {
        if config != TreeConfig::default() {
            debug!(?config, "tree.new.configured");
        }
        let mut arena = Arena::new();
        let root = arena.alloc(Node::empty());
        Self {
            arena,
            root,
            len: 0,
            config,
        }
    }

    /// Generate a `Tree` whose root holds the given entry.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::Tree;
    ///
    /// let tree = Tree::with_entry("k", 1);
    /// assert_eq!(tree.find(&"k"), Ok(&1));
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn with_entry(key: K, value: V) -> Self {
        let mut tree = Self::new();
        tree.arena.node_mut(tree.root).entry = Some(Entry { key, value });
        tree.len = 1;
        tree
    }

    /// The policy this tree was built with.
    pub fn config(&self) -> TreeConfig {
        self.config
    }

    /// Number of entries in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree holds no entries. An empty tree still has its root node.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The root node. It exists even when the tree is empty, in which case it has no key.
    pub fn root(&self) -> NodeRef<'_, K, V> {
        NodeRef::new(self, self.root)
    }

    /// The node with the given id, if that slot currently holds one.
    pub fn node(&self, id: NodeId) -> Option<NodeRef<'_, K, V>> {
        self.arena.get(id).map(|_| NodeRef::new(self, id))
    }

    pub(crate) fn arena(&self) -> &Arena<K, V> {
        &self.arena
    }

    /// The number of nodes on the longest path from the root to a leaf, or 0 for an empty tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::Tree;
    ///
    /// let mut tree = Tree::new();
    /// assert_eq!(tree.height(), 0);
    ///
    /// // Sorted inserts make a list.
    /// for k in 0..5 {
    ///     tree.insert(k, ());
    /// }
    /// assert_eq!(tree.height(), 5);
    /// ```
    pub fn height(&self) -> usize {
        if self.is_empty() {
            return 0;
        }

        let mut tallest = 0;
        let mut stack = vec![(self.root, 1)];
        while let Some((id, depth)) = stack.pop() {
            tallest = tallest.max(depth);
            let node = self.arena.node(id);
            stack.extend(node.left.map(|left| (left, depth + 1)));
            stack.extend(node.right.map(|right| (right, depth + 1)));
        }
        tallest
    }

    /// Removes every entry. The root keeps its id and goes back to being empty.
    pub fn clear(&mut self) {
        debug!(entries = self.len, "tree.clear");
        self.arena.retain_only(self.root);
        *self.arena.node_mut(self.root) = Node::empty();
        self.len = 0;
    }

    /// Finds the value associated with the given key in this tree. If several nodes hold the
    /// key, the one closest to the root wins.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::{Tree, TreeError};
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(1, 2);
    ///
    /// assert_eq!(tree.find(&1), Ok(&2));
    /// assert_eq!(tree.find(&42), Err(TreeError::KeyNotFound));
    /// ```
    pub fn find(&self, key: &K) -> Result<&V>
    where
        K: Ord,
    {
        let id = self.locate(key).ok_or(TreeError::KeyNotFound)?;
        self.arena
            .node(id)
            .entry
            .as_ref()
            .map(|e| &e.value)
            .ok_or(TreeError::KeyNotFound)
    }

    /// Like [`Tree::find`] but hands out the value mutably. The tree's shape can't change through
    /// the returned reference.
    pub fn find_mut(&mut self, key: &K) -> Result<&mut V>
    where
        K: Ord,
    {
        let id = self.locate(key).ok_or(TreeError::KeyNotFound)?;
        self.arena
            .node_mut(id)
            .entry
            .as_mut()
            .map(|e| &mut e.value)
            .ok_or(TreeError::KeyNotFound)
    }

    /// Whether some node holds the key.
    pub fn contains_key(&self, key: &K) -> bool
    where
        K: Ord,
    {
        self.locate(key).is_some()
    }

    /// Inserts the given value into the tree stored at the given key. An empty tree stores it in
    /// the root. Otherwise a new leaf is hung off the node where the search runs out.
    ///
    /// With the default [`Duplicates::RouteRight`] policy, a key that is already present is
    /// treated as greater than itself and gets its own node in the right subtree. With
    /// [`Duplicates::Overwrite`] the existing value is replaced instead.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::Tree;
    ///
    /// let mut tree = Tree::new();
    ///
    /// tree.insert(1, "first");
    /// tree.insert(1, "second");
    ///
    /// // Both are kept. The older one sits closer to the root so it's found first.
    /// assert_eq!(tree.len(), 2);
    /// assert_eq!(tree.find(&1), Ok(&"first"));
    /// ```
    pub fn insert(&mut self, key: K, value: V)
    where
        K: Ord,
    {
        let overwrite = self.config.duplicates == Duplicates::Overwrite;
        let mut cursor = self.root;
        loop {
            let node = self.arena.node_mut(cursor);
            let side = match node.entry.as_mut() {
                None => {
                    debug_assert!(node.parent.is_none(), "only the root may be empty");
                    node.entry = Some(Entry { key, value });
                    self.len += 1;
                    trace!(node = cursor.index(), "tree.insert.fill_root");
                    return;
                }
                Some(entry) => match key.cmp(&entry.key) {
                    Ordering::Equal if overwrite => {
                        entry.value = value;
                        trace!(node = cursor.index(), "tree.insert.overwrite");
                        return;
                    }
                    ordering => Side::of(ordering),
                },
            };

            match node.child(side) {
                Some(child) => cursor = child,
                None => {
                    let leaf = self.arena.alloc(Node::leaf(key, value, cursor));
                    self.arena.node_mut(cursor).set_child(side, Some(leaf));
                    self.len += 1;
                    trace!(
                        parent = cursor.index(),
                        node = leaf.index(),
                        %side,
                        "tree.insert.attach"
                    );

                    if cfg!(debug_assertions) {
                        self.assert_local_order(cursor);
                    }
                    return;
                }
            }
        }
    }

    /// Removes the node holding the given key and returns its value.
    ///
    /// A node with two children is not unlinked. It takes over the key and value of its
    /// successor (the smallest node in its right subtree), and the successor, which has at most
    /// one child, is unlinked in its place. Removing the root never changes the root's id.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::{Tree, TreeError};
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(2, "two");
    /// tree.insert(1, "one");
    /// tree.insert(3, "three");
    ///
    /// let root = tree.root().id();
    /// assert_eq!(tree.remove(&2), Ok("two"));
    ///
    /// // Same root, new contents.
    /// assert_eq!(tree.root().id(), root);
    /// assert_eq!(tree.root().key(), Some(&3));
    /// assert_eq!(tree.remove(&2), Err(TreeError::KeyNotFound));
    /// ```
    pub fn remove(&mut self, key: &K) -> Result<V>
    where
        K: Ord,
    {
        let target = self.locate(key).ok_or(TreeError::KeyNotFound)?;
        let node = self.arena.node(target);
        let removed = match (node.left, node.right) {
            (Some(_), Some(right)) => {
                let successor = self.min_of(right);
                trace!(
                    node = target.index(),
                    successor = successor.index(),
                    "tree.remove.promote_successor"
                );
                // Unlink the successor first: with the same key copied into `target`, the two
                // would be indistinguishable by search.
                let promoted = self.excise(successor);
                mem::replace(&mut self.arena.node_mut(target).entry, Some(promoted))
                    .expect("located node holds an entry")
            }
            (Some(child), None) | (None, Some(child)) => self.replace_with(target, Some(child)),
            (None, None) => self.replace_with(target, None),
        };

        self.len -= 1;
        Ok(removed.value)
    }

    /// Walks down from the root the same way for lookups and removals.
    fn locate(&self, key: &K) -> Option<NodeId>
    where
        K: Ord,
    {
        let mut cursor = Some(self.root);
        while let Some(id) = cursor {
            let node = self.arena.node(id);
            // An empty root matches nothing.
            let ordering = key.cmp(node.key()?);
            if ordering == Ordering::Equal {
                return Some(id);
            }
            cursor = node.child(Side::of(ordering));
        }
        None
    }

    /// The leftmost node of the subtree rooted at `id`. It never has a left child.
    fn min_of(&self, mut id: NodeId) -> NodeId {
        while let Some(left) = self.arena.node(id).left {
            id = left;
        }
        id
    }

    /// Unlinks a node with at most one child, moving that child up into its place.
    fn excise(&mut self, id: NodeId) -> Entry<K, V> {
        let node = self.arena.node(id);
        debug_assert!(node.left.is_none() || node.right.is_none());
        let child = node.left.or(node.right);
        self.replace_with(id, child)
    }

    /// Puts `replacement` (or nothing) where `this` was and returns `this`'s entry. `this` must
    /// have no children other than `replacement`.
    ///
    /// A node with a parent is simply swapped out of its parent's child slot and freed. The root
    /// has no slot to swap, so it absorbs the replacement's contents instead, or resets to
    /// empty when there is no replacement.
    fn replace_with(&mut self, this: NodeId, replacement: Option<NodeId>) -> Entry<K, V> {
        let parent = self.arena.node(this).parent;
        match parent {
            Some(parent) => {
                let side = self.side_of(parent, this);
                self.arena.node_mut(parent).set_child(side, replacement);
                self.adopt(parent, replacement);
                trace!(
                    node = this.index(),
                    parent = parent.index(),
                    %side,
                    "tree.replace.rewire"
                );

                let removed = self.arena.free(this);
                debug_assert_eq!(removed.left.or(removed.right), replacement);
                removed.entry.expect("only the root may be empty")
            }
            None => {
                let (entry, left, right) = match replacement {
                    Some(replacement) => {
                        let absorbed = self.arena.free(replacement);
                        trace!(
                            node = this.index(),
                            absorbed = replacement.index(),
                            "tree.replace.absorb_into_root"
                        );
                        (absorbed.entry, absorbed.left, absorbed.right)
                    }
                    None => {
                        trace!(node = this.index(), "tree.replace.reset_root");
                        (None, None, None)
                    }
                };

                let root = self.arena.node_mut(this);
                root.left = left;
                root.right = right;
                let removed = mem::replace(&mut root.entry, entry);
                // The absorbed node's children still point at its freed slot.
                self.adopt(this, left);
                self.adopt(this, right);
                removed.expect("located root holds an entry")
            }
        }
    }

    fn adopt(&mut self, parent: NodeId, child: Option<NodeId>) {
        if let Some(child) = child {
            self.arena.node_mut(child).parent = Some(parent);
        }
    }

    /// Which of `parent`'s slots holds `child`.
    fn side_of(&self, parent: NodeId, child: NodeId) -> Side {
        let parent = self.arena.node(parent);
        if parent.left == Some(child) {
            Side::Left
        } else {
            debug_assert_eq!(parent.right, Some(child));
            Side::Right
        }
    }

    fn assert_local_order(&self, id: NodeId)
    where
        K: Ord,
    {
        let node = self.arena.node(id);
        let Some(key) = node.key() else {
            return;
        };
        if let Some(left) = node.left.and_then(|l| self.arena.node(l).key()) {
            assert!(left < key);
        }
        if let Some(right) = node.right.and_then(|r| self.arena.node(r).key()) {
            assert!(right >= key);
        }
    }

    /// Walks the whole tree and checks its structural invariants:
    ///
    /// 1. Every key in a node's left subtree is less than its key, and every key in its right
    ///    subtree is greater than or equal to it.
    /// 2. Every child links back to the node owning it.
    /// 3. Only the root has no parent, and only a childless root may be empty.
    /// 4. The number of reachable entries matches [`Tree::len`].
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::Tree;
    ///
    /// let mut tree = Tree::new();
    /// for k in [5, 3, 8, 1, 4, 7, 9] {
    ///     tree.insert(k, ());
    /// }
    /// tree.remove(&5).unwrap();
    ///
    /// assert_eq!(tree.validate(), Ok(()));
    /// ```
    pub fn validate(&self) -> std::result::Result<(), Violation>
    where
        K: Ord,
    {
        let root = self.arena.node(self.root);
        if root.parent.is_some() {
            return Err(Violation::ParentedRoot(self.root));
        }
        if root.entry.is_none() {
            if root.left.is_some() || root.right.is_some() {
                return Err(Violation::MisplacedEmpty(self.root));
            }
            if self.len != 0 {
                return Err(Violation::LengthMismatch {
                    tracked: self.len,
                    reachable: 0,
                });
            }
            return Ok(());
        }

        // Each entry carries the tightest inclusive lower and exclusive upper bound set by its
        // ancestors.
        type Bound<'a, T> = Option<(NodeId, &'a T)>;
        let mut stack: Vec<(NodeId, Bound<'_, K>, Bound<'_, K>)> = vec![(self.root, None, None)];
        let mut reachable = 0;
        while let Some((id, lower, upper)) = stack.pop() {
            let node = self.arena.node(id);
            let key = node.key().ok_or(Violation::MisplacedEmpty(id))?;

            reachable += 1;
            if reachable > self.arena.live() {
                // Only a cycle revisits nodes.
                return Err(Violation::LengthMismatch {
                    tracked: self.len,
                    reachable,
                });
            }

            match (lower, upper) {
                (Some((ancestor, bound)), _) if key < bound => {
                    return Err(Violation::OutOfOrder { node: id, ancestor })
                }
                (_, Some((ancestor, bound))) if key >= bound => {
                    return Err(Violation::OutOfOrder { node: id, ancestor })
                }
                _ => {}
            }

            for child in [node.left, node.right].into_iter().flatten() {
                let parent = self.arena.node(child).parent;
                if parent != Some(id) {
                    return Err(Violation::BrokenBackLink {
                        child,
                        owner: id,
                        parent,
                    });
                }
            }
            if let Some(left) = node.left {
                stack.push((left, lower, Some((id, key))));
            }
            if let Some(right) = node.right {
                stack.push((right, Some((id, key)), upper));
            }
        }

        if reachable != self.len {
            return Err(Violation::LengthMismatch {
                tracked: self.len,
                reachable,
            });
        }
        Ok(())
    }
}
