use ordered_tree::{Duplicates, Tree, TreeConfig, TreeError};
use quickcheck_macros::quickcheck;

use std::collections::{HashMap, HashSet};

use crate::Op;

/// Applies a set of operations to a tree and a hashmap.
/// This way we can ensure that after a random smattering of inserts
/// and deletes we have the same set of keys in the map.
fn do_ops<K, V>(ops: &[Op<K, V>], bst: &mut Tree<K, V>, map: &mut HashMap<K, V>)
where
    K: std::hash::Hash + Eq + Clone + Ord,
    V: std::fmt::Debug + PartialEq + Clone,
{
    for op in ops {
        match op {
            Op::Insert(k, v) => {
                bst.insert(k.clone(), v.clone());
                map.insert(k.clone(), v.clone());
            }
            Op::Remove(k) => {
                assert_eq!(bst.remove(k), map.remove(k).ok_or(TreeError::KeyNotFound));
            }
        }
    }
}

#[quickcheck]
fn fuzz_multiple_operations_i8(ops: Vec<Op<i8, i8>>) -> bool {
    let mut tree = Tree::with_config(TreeConfig::default().with_duplicates(Duplicates::Overwrite));
    let mut map = HashMap::new();

    do_ops(&ops, &mut tree, &mut map);
    tree.len() == map.len() && map.keys().all(|key| tree.find(key) == Ok(&map[key]))
}

#[quickcheck]
fn order_and_links_hold(ops: Vec<Op<i16, u8>>) -> bool {
    let mut tree = Tree::new();
    // How many nodes hold each key. Duplicates each get their own node.
    let mut counts: HashMap<i16, usize> = HashMap::new();
    for op in &ops {
        match op {
            Op::Insert(k, v) => {
                tree.insert(*k, *v);
                *counts.entry(*k).or_default() += 1;
            }
            Op::Remove(k) => {
                let count = counts.entry(*k).or_default();
                assert_eq!(tree.remove(k).is_ok(), *count > 0);
                *count = count.saturating_sub(1);
            }
        }
        if tree.validate().is_err() {
            return false;
        }
    }
    true
}

#[quickcheck]
fn contains(xs: Vec<i8>) -> bool {
    let mut tree = Tree::new();
    for x in &xs {
        tree.insert(*x, *x);
    }

    tree.len() == xs.len() && xs.iter().all(|x| tree.find(x) == Ok(x))
}

#[quickcheck]
fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    let mut tree = Tree::new();
    for x in &xs {
        tree.insert(*x, *x);
    }
    let added: HashSet<_> = xs.into_iter().collect();
    let nots: HashSet<_> = nots.into_iter().collect();
    let mut nots = nots.difference(&added);

    nots.all(|x| tree.find(x) == Err(TreeError::KeyNotFound))
}

#[quickcheck]
fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
    let mut tree = Tree::new();
    for x in &xs {
        tree.insert(*x, *x);
    }
    for delete in &deletes {
        // We may have inserted the same value multiple times - delete each one.
        while tree.remove(delete).is_ok() {}
    }

    let mut still_present = xs;
    still_present.retain(|x| !deletes.contains(x));

    deletes.iter().all(|x| tree.find(x).is_err())
        && still_present.iter().all(|x| tree.find(x).is_ok())
        && tree.len() == still_present.len()
}

#[quickcheck]
fn root_survives_everything(xs: Vec<i8>) -> bool {
    let mut tree = Tree::new();
    let root = tree.root().id();
    for x in &xs {
        tree.insert(*x, ());
    }
    for x in &xs {
        if tree.remove(x).is_err() || tree.root().id() != root {
            return false;
        }
    }

    tree.is_empty() && tree.root().key().is_none() && tree.height() == 0
}
