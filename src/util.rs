use std::cmp::Ordering;

/// Which child slot of a node a link lives in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Side {
    /// Keys strictly less than the node's key.
    Left,
    /// Keys greater than or equal to the node's key.
    Right,
}

impl Side {
    /// The side a search key descends to. Equal keys go right.
    pub(crate) fn of(ordering: Ordering) -> Self {
        match ordering {
            Ordering::Less => Side::Left,
            Ordering::Equal | Ordering::Greater => Side::Right,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Side::Left => "left",
            Side::Right => "right",
        })
    }
}
