use super::ItemId;

/// Single-item selection.
///
/// Writes are stored as given, even when the id names nothing; only an
/// unset selection falls back to the root on read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    selected: Option<ItemId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// The stored id, or `root` if nothing was ever set.
    pub fn get(&self, root: ItemId) -> ItemId {
        self.selected.unwrap_or(root)
    }

    pub fn set(&mut self, id: ItemId) {
        self.selected = Some(id);
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    pub fn is_selected(&self, id: ItemId) -> bool {
        self.selected == Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_reads_root() {
        let root = ItemId::from_raw(5);
        let mut sel = Selection::new();
        assert_eq!(sel.get(root), root);
        assert!(!sel.is_selected(root));

        sel.set(ItemId::from_raw(9));
        assert_eq!(sel.get(root), ItemId::from_raw(9));

        sel.clear();
        assert_eq!(sel.get(root), root);
        assert!(!sel.is_selected(ItemId::from_raw(9)));
    }
}
