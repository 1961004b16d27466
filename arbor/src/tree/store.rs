//! Arena-backed item tree.
//!
//! Items live in a [`SlotMap`], so the id index can hold slot keys that stay
//! valid for as long as the item lives and never alias a later item. Children
//! of an item form an intrusive doubly linked list threaded through the
//! slots: appending, taking the first child, and unlinking a known child are
//! all O(1).

use std::collections::HashMap;

use slotmap::{SlotMap, new_key_type};

use super::id::IdGenerator;
use super::{IdScope, ItemId};

new_key_type! {
    /// Position of an item in the arena.
    struct Slot;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Links {
    parent: Option<Slot>,
    first_child: Option<Slot>,
    last_child: Option<Slot>,
    prev_sibling: Option<Slot>,
    next_sibling: Option<Slot>,
}

#[derive(Debug)]
struct Item {
    id: ItemId,
    text: String,
    links: Links,
}

/// Owner of every item of one tree.
///
/// Exactly one root exists from construction on; it cannot be removed.
/// Neither building nor removing items recurses, so depth is bounded only by
/// memory.
#[derive(Debug)]
pub struct ItemStore {
    slots: SlotMap<Slot, Item>,
    index: HashMap<ItemId, Slot>,
    root: Slot,
    root_id: ItemId,
    ids: IdGenerator,
}

impl ItemStore {
    /// Creates a store holding only the root item, which takes the first id.
    pub fn new(scope: IdScope) -> Self {
        let mut ids = IdGenerator::new(scope);
        let mut slots = SlotMap::with_key();
        let mut index = HashMap::new();

        let root_id = ids.next_id();
        let root = slots.insert(Item {
            id: root_id,
            text: String::new(),
            links: Links::default(),
        });
        index.insert(root_id, root);

        Self {
            slots,
            index,
            root,
            root_id,
            ids,
        }
    }

    pub fn root_id(&self) -> ItemId {
        self.root_id
    }

    /// Number of live items, root included.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// True when nothing but the root is left.
    pub fn is_empty(&self) -> bool {
        self.index.len() <= 1
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn get(&self, id: ItemId) -> Option<ItemRef<'_>> {
        let slot = *self.index.get(&id)?;
        ItemRef::new(self, slot)
    }

    pub fn text(&self, id: ItemId) -> Option<&str> {
        self.get(id).map(|item| item.text())
    }

    /// Parent of `id`; `None` for the root and for unknown ids.
    pub fn parent(&self, id: ItemId) -> Option<ItemId> {
        self.get(id).and_then(|item| item.parent_id())
    }

    /// Ids of the children of `id` in insertion order; empty if unknown.
    pub fn children(&self, id: ItemId) -> Vec<ItemId> {
        self.get(id)
            .map(|item| item.children().map(|child| child.id()).collect())
            .unwrap_or_default()
    }

    pub fn has_children(&self, id: ItemId) -> bool {
        self.get(id).is_some_and(|item| item.has_children())
    }

    /// Appends a new item under `parent`, or under the root if `parent`
    /// names no live item.
    pub fn add_item(&mut self, parent: ItemId, text: impl Into<String>) -> ItemId {
        let parent_slot = match self.index.get(&parent) {
            Some(&slot) => slot,
            None => {
                log::debug!("[tree] unknown parent {parent}, attaching under root");
                self.root
            }
        };

        let id = self.ids.next_id();
        let slot = self.slots.insert(Item {
            id,
            text: text.into(),
            links: Links::default(),
        });
        self.append_child(parent_slot, slot);
        self.index.insert(id, slot);

        log::debug!("[tree] added item {id}");
        id
    }

    /// Removes `id` and its whole subtree. Unknown ids and the root are
    /// ignored.
    pub fn remove_item(&mut self, id: ItemId) {
        if id == self.root_id {
            log::debug!("[tree] ignoring removal of root item {id}");
            return;
        }
        // Unregister first so nothing below can resolve a half-removed item.
        let Some(slot) = self.index.remove(&id) else {
            return;
        };

        // Descend into the current first child until reaching an item with no
        // children left; freeing it unlinks it, so its parent's next first
        // child comes up on the following pass.
        let mut pending = vec![slot];
        let mut removed = 0usize;
        while let Some(&top) = pending.last() {
            match self.first_child(top) {
                Some(child) => {
                    if let Some(item) = self.slots.get(child) {
                        self.index.remove(&item.id);
                    }
                    pending.push(child);
                }
                None => {
                    pending.pop();
                    self.unlink(top);
                    self.slots.remove(top);
                    removed += 1;
                }
            }
        }

        log::debug!("[tree] removed item {id} ({removed} items freed)");
    }

    fn item(&self, slot: Slot) -> Option<&Item> {
        self.slots.get(slot)
    }

    fn links(&self, slot: Slot) -> Option<Links> {
        self.item(slot).map(|item| item.links)
    }

    fn links_mut(&mut self, slot: Slot) -> Option<&mut Links> {
        self.slots.get_mut(slot).map(|item| &mut item.links)
    }

    /// First child of `slot` that is still allocated.
    fn first_child(&self, slot: Slot) -> Option<Slot> {
        self.links(slot)?
            .first_child
            .filter(|&child| self.slots.contains_key(child))
    }

    fn append_child(&mut self, parent: Slot, child: Slot) {
        let last = self.links(parent).and_then(|links| links.last_child);

        if let Some(links) = self.links_mut(child) {
            links.parent = Some(parent);
            links.prev_sibling = last;
            links.next_sibling = None;
        }
        match last {
            Some(last) => {
                if let Some(links) = self.links_mut(last) {
                    links.next_sibling = Some(child);
                }
            }
            None => {
                if let Some(links) = self.links_mut(parent) {
                    links.first_child = Some(child);
                }
            }
        }
        if let Some(links) = self.links_mut(parent) {
            links.last_child = Some(child);
        }
    }

    /// Detaches `slot` from its parent and siblings. Its own children are
    /// left untouched.
    fn unlink(&mut self, slot: Slot) {
        let Some(links) = self.links(slot) else {
            return;
        };

        match links.prev_sibling {
            Some(prev) => {
                if let Some(prev) = self.links_mut(prev) {
                    prev.next_sibling = links.next_sibling;
                }
            }
            None => {
                if let Some(parent) = links.parent.and_then(|p| self.links_mut(p)) {
                    parent.first_child = links.next_sibling;
                }
            }
        }
        match links.next_sibling {
            Some(next) => {
                if let Some(next) = self.links_mut(next) {
                    next.prev_sibling = links.prev_sibling;
                }
            }
            None => {
                if let Some(parent) = links.parent.and_then(|p| self.links_mut(p)) {
                    parent.last_child = links.prev_sibling;
                }
            }
        }

        if let Some(own) = self.links_mut(slot) {
            own.parent = None;
            own.prev_sibling = None;
            own.next_sibling = None;
        }
    }
}

impl Default for ItemStore {
    fn default() -> Self {
        Self::new(IdScope::default())
    }
}

/// Borrowed view of a live item.
#[derive(Debug, Clone, Copy)]
pub struct ItemRef<'a> {
    store: &'a ItemStore,
    item: &'a Item,
}

impl<'a> ItemRef<'a> {
    fn new(store: &'a ItemStore, slot: Slot) -> Option<Self> {
        let item = store.item(slot)?;
        Some(Self { store, item })
    }

    pub fn id(&self) -> ItemId {
        self.item.id
    }

    pub fn text(&self) -> &'a str {
        &self.item.text
    }

    pub fn parent_id(&self) -> Option<ItemId> {
        let parent = self.item.links.parent?;
        self.store.item(parent).map(|item| item.id)
    }

    pub fn has_children(&self) -> bool {
        self.item.links.first_child.is_some()
    }

    pub fn children(&self) -> Children<'a> {
        Children {
            store: self.store,
            next: self.item.links.first_child,
        }
    }
}

/// Iterator over the children of an item, in insertion order.
#[derive(Debug, Clone)]
pub struct Children<'a> {
    store: &'a ItemStore,
    next: Option<Slot>,
}

impl<'a> Iterator for Children<'a> {
    type Item = ItemRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = ItemRef::new(self.store, self.next?)?;
        self.next = current.item.links.next_sibling;
        Some(current)
    }
}
