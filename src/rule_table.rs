//! Maps rule ids to the `Head` node of their body, with enumeration support
//! for public inspection of the grammar's rule set.

use ahash::AHashMap;
use slotmap::DefaultKey;

#[derive(Default)]
pub struct RuleTable {
    heads: AHashMap<u32, DefaultKey>,
}

impl RuleTable {
    pub(crate) fn new() -> Self {
        Self {
            heads: AHashMap::new(),
        }
    }

    pub(crate) fn insert(&mut self, rule_id: u32, head: DefaultKey) {
        self.heads.insert(rule_id, head);
    }

    pub(crate) fn remove(&mut self, rule_id: u32) -> Option<DefaultKey> {
        self.heads.remove(&rule_id)
    }

    pub(crate) fn get(&self, rule_id: u32) -> Option<DefaultKey> {
        self.heads.get(&rule_id).copied()
    }

    pub fn len(&self) -> usize {
        self.heads.len()
    }

    /// Enumerates `(rule_id, head)` pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, DefaultKey)> + '_ {
        self.heads.iter().map(|(id, head)| (*id, *head))
    }
}
