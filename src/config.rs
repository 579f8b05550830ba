//! Construction-time policy for a [`Tree`][crate::Tree].

/// What [`Tree::insert`][crate::Tree::insert] does with a key that is already present.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Duplicates {
    /// Equal keys compare as "greater" and descend right, so the tree ends up holding one node
    /// per insert. Lookups and removals hit the shallowest matching node first.
    #[default]
    RouteRight,
    /// Equal keys overwrite the stored value in place and no node is created.
    Overwrite,
}

/// Options for building a [`Tree`][crate::Tree].
///
/// # Examples
///
/// ```
/// use ordered_tree::{Duplicates, Tree, TreeConfig};
///
/// let mut tree = Tree::with_config(TreeConfig::default().with_duplicates(Duplicates::Overwrite));
///
/// tree.insert(1, "a");
/// tree.insert(1, "b");
///
/// assert_eq!(tree.len(), 1);
/// assert_eq!(tree.find(&1), Ok(&"b"));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TreeConfig {
    /// Policy for inserting a key that already exists.
    pub duplicates: Duplicates,
}

impl TreeConfig {
    /// Returns this config with the given duplicate-key policy.
    pub fn with_duplicates(self, duplicates: Duplicates) -> Self {
        Self { duplicates }
    }
}
