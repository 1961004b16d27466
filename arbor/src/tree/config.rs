use super::IdScope;

/// Per-tree configuration.
#[derive(Debug, Clone, Default)]
pub struct TreeViewConfig {
    /// Counter the tree's item ids come from.
    pub id_scope: IdScope,
}

impl TreeViewConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number items independently of every other tree.
    pub fn per_instance_ids(mut self) -> Self {
        self.id_scope = IdScope::PerInstance;
        self
    }

    pub fn id_scope(mut self, scope: IdScope) -> Self {
        self.id_scope = scope;
        self
    }
}
