use returnshield_core::LineItemId;
use serde::{Deserialize, Serialize};

/// Ordered set of selected line-item ids.
///
/// Insertion order is kept so the submission lists items in the order the
/// shopper picked them. Duplicates are impossible: selecting twice toggles off.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectedItems(Vec<LineItemId>);

impl SelectedItems {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &LineItemId) -> bool {
        self.0.iter().any(|selected| selected == id)
    }

    /// Add `id` if absent, remove it otherwise. Returns whether it is now selected.
    pub fn toggle(&mut self, id: LineItemId) -> bool {
        if let Some(pos) = self.0.iter().position(|selected| selected == &id) {
            self.0.remove(pos);
            false
        } else {
            self.0.push(id);
            true
        }
    }

    pub(crate) fn insert(&mut self, id: LineItemId) {
        if !self.contains(&id) {
            self.0.push(id);
        }
    }

    pub(crate) fn remove(&mut self, id: &LineItemId) {
        self.0.retain(|selected| selected != id);
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LineItemId> + Clone {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[LineItemId] {
        &self.0
    }
}

impl<'a> IntoIterator for &'a SelectedItems {
    type Item = &'a LineItemId;
    type IntoIter = core::slice::Iter<'a, LineItemId>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_adds_then_removes() {
        let mut items = SelectedItems::new();

        assert!(items.toggle(LineItemId::new("a")));
        assert!(items.toggle(LineItemId::new("b")));
        assert!(!items.toggle(LineItemId::new("a")));

        assert_eq!(items.as_slice(), &[LineItemId::new("b")]);
    }

    #[test]
    fn insert_keeps_ids_unique_and_ordered() {
        let mut items = SelectedItems::new();
        items.insert(LineItemId::new("b"));
        items.insert(LineItemId::new("a"));
        items.insert(LineItemId::new("b"));

        assert_eq!(items.len(), 2);
        assert_eq!(
            serde_json::to_value(&items).unwrap(),
            serde_json::json!(["b", "a"])
        );
    }
}
