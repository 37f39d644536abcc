use std::collections::BTreeSet;

/// The set of item ids picked on the form.
///
/// Membership is unique and iteration is in ascending id order, so the
/// submitted list does not depend on the order of clicks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemSelection {
    ids: BTreeSet<i64>,
}

impl ItemSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `id` if absent, remove it if present.  Returns whether `id` is
    /// selected afterwards.
    pub fn toggle(&mut self, id: i64) -> bool {
        if self.ids.remove(&id) {
            false
        } else {
            self.ids.insert(id)
        }
    }

    pub fn contains(&self, id: i64) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = i64> + '_ {
        self.ids.iter().copied()
    }

    pub fn to_vec(&self) -> Vec<i64> {
        self.iter().collect()
    }
}
