use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Identifier of a tree item.
///
/// Ids are handed out in increasing order and never reused by the generator
/// that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemId(u64);

impl ItemId {
    /// Wraps a raw value. The result need not name a live item.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where a tree draws its ids from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdScope {
    /// One counter for every tree in the process; ids never collide across
    /// trees.
    #[default]
    Shared,
    /// Each tree counts from zero on its own.
    PerInstance,
}

static NEXT_SHARED_ID: AtomicU64 = AtomicU64::new(0);

#[derive(Debug)]
pub(crate) enum IdGenerator {
    Shared,
    Local(u64),
}

impl IdGenerator {
    pub(crate) fn new(scope: IdScope) -> Self {
        match scope {
            IdScope::Shared => Self::Shared,
            IdScope::PerInstance => Self::Local(0),
        }
    }

    pub(crate) fn next_id(&mut self) -> ItemId {
        match self {
            Self::Shared => ItemId(NEXT_SHARED_ID.fetch_add(1, Ordering::Relaxed)),
            Self::Local(next) => {
                let id = ItemId(*next);
                *next += 1;
                id
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_counts_from_zero() {
        let mut ids = IdGenerator::new(IdScope::PerInstance);
        assert_eq!(ids.next_id(), ItemId::from_raw(0));
        assert_eq!(ids.next_id(), ItemId::from_raw(1));
    }

    #[test]
    fn shared_never_repeats() {
        let mut a = IdGenerator::new(IdScope::Shared);
        let mut b = IdGenerator::new(IdScope::Shared);
        let first = a.next_id();
        let second = b.next_id();
        let third = a.next_id();
        assert!(first < second && second < third);
    }
}
