//! Node storage. Every link in the tree (children and parent alike) is a [`NodeId`] into an
//! [`Arena`], so a node's back-link to its parent is just another index and never an ownership
//! edge.

use crate::util::Side;

/// A stable handle to a node slot.
///
/// Ids of removed nodes are recycled by later inserts, so an id is only meaningful while the
/// node it was taken from is still in the tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    /// The position of this node's slot in the arena.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A key and the value stored with it.
#[derive(Clone, Debug)]
pub(crate) struct Entry<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
}

#[derive(Clone, Debug)]
pub(crate) struct Node<K, V> {
    /// `None` only for the root of an empty tree.
    pub(crate) entry: Option<Entry<K, V>>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) left: Option<NodeId>,
    pub(crate) right: Option<NodeId>,
}

impl<K, V> Node<K, V> {
    /// The empty-tree sentinel. Only valid as a root.
    pub(crate) fn empty() -> Self {
        Self {
            entry: None,
            parent: None,
            left: None,
            right: None,
        }
    }

    pub(crate) fn leaf(key: K, value: V, parent: NodeId) -> Self {
        Self {
            entry: Some(Entry { key, value }),
            parent: Some(parent),
            left: None,
            right: None,
        }
    }

    pub(crate) fn child(&self, side: Side) -> Option<NodeId> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub(crate) fn set_child(&mut self, side: Side, child: Option<NodeId>) {
        match side {
            Side::Left => self.left = child,
            Side::Right => self.right = child,
        }
    }

    pub(crate) fn key(&self) -> Option<&K> {
        self.entry.as_ref().map(|e| &e.key)
    }
}

/// Slot storage with a free list so removed nodes give their slots back.
#[derive(Clone, Debug)]
pub(crate) struct Arena<K, V> {
    slots: Vec<Option<Node<K, V>>>,
    free_list: Vec<u32>,
}

impl<K, V> Arena<K, V> {
    pub(crate) fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_list: Vec::new(),
        }
    }

    pub(crate) fn alloc(&mut self, node: Node<K, V>) -> NodeId {
        match self.free_list.pop() {
            Some(idx) => {
                debug_assert!(self.slots[idx as usize].is_none());
                self.slots[idx as usize] = Some(node);
                NodeId(idx)
            }
            None => {
                let idx =
                    u32::try_from(self.slots.len()).expect("arena exceeded u32::MAX nodes");
                self.slots.push(Some(node));
                NodeId(idx)
            }
        }
    }

    /// Takes the node out of its slot and puts the slot on the free list.
    ///
    /// ## Panics
    ///
    /// When the slot is already free.
    pub(crate) fn free(&mut self, id: NodeId) -> Node<K, V> {
        let node = self.slots[id.index()]
            .take()
            .expect("freeing a slot that is already free");
        self.free_list.push(id.0);
        node
    }

    pub(crate) fn get(&self, id: NodeId) -> Option<&Node<K, V>> {
        self.slots.get(id.index()).and_then(Option::as_ref)
    }

    /// ## Panics
    ///
    /// When `id` does not name a live node. Every id reachable from the root is live.
    pub(crate) fn node(&self, id: NodeId) -> &Node<K, V> {
        self.get(id).expect("link to a freed node")
    }

    /// See [`Arena::node`].
    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node<K, V> {
        self.slots
            .get_mut(id.index())
            .and_then(Option::as_mut)
            .expect("link to a freed node")
    }

    /// Drops every node except `keep`, which stays in its slot.
    pub(crate) fn retain_only(&mut self, keep: NodeId) {
        self.free_list.clear();
        for (idx, slot) in self.slots.iter_mut().enumerate() {
            if idx != keep.index() {
                *slot = None;
            }
        }
        // Hand out low slots first, like a fresh arena would.
        self.free_list.extend(
            (0..self.slots.len() as u32)
                .rev()
                .filter(|&idx| idx != keep.0),
        );
    }

    /// Number of occupied slots.
    pub(crate) fn live(&self) -> usize {
        self.slots.len() - self.free_list.len()
    }
}
