//! Visibility and ordering projection over a descriptor list.
//!
//! The projection only stores keys. Resolving keys back to descriptors
//! happens on read, so a projection stays valid (if partially dangling)
//! when it is applied to a descriptor list it was not built from.

use std::collections::{HashMap, HashSet};

use super::item::ColumnDescriptor;

/// Per-column visibility plus an optional explicit order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnProjection {
    visibility: HashMap<String, bool>,
    /// Empty, or a permutation of the descriptor keys.
    order: Vec<String>,
}

impl ColumnProjection {
    /// Every descriptor visible, declared order.
    pub fn new(descriptors: &[ColumnDescriptor]) -> Self {
        Self {
            visibility: descriptors
                .iter()
                .map(|d| (d.key.clone(), true))
                .collect(),
            order: Vec::new(),
        }
    }

    /// A key without an entry counts as visible.
    pub fn is_visible(&self, key: &str) -> bool {
        self.visibility.get(key).copied().unwrap_or(true)
    }

    /// Flip one key's visibility, inserting it when unknown. Returns the new
    /// visibility.
    pub fn toggle(&mut self, key: &str) -> bool {
        let visible = !self.is_visible(key);
        self.visibility.insert(key.to_string(), visible);
        visible
    }

    pub fn set_visible(&mut self, key: &str, visible: bool) {
        self.visibility.insert(key.to_string(), visible);
    }

    /// Mark every known key visible.
    pub fn show_all(&mut self) {
        for visible in self.visibility.values_mut() {
            *visible = true;
        }
    }

    /// Number of keys currently marked hidden.
    pub fn hidden_count(&self) -> usize {
        self.visibility.values().filter(|v| !**v).count()
    }

    /// The stored explicit order (empty when none was established).
    pub fn order(&self) -> &[String] {
        &self.order
    }

    pub fn has_explicit_order(&self) -> bool {
        !self.order.is_empty()
    }

    pub fn clear_order(&mut self) {
        self.order.clear();
    }

    /// The stored order, or the declared order when none was established.
    pub fn effective_order(&self, descriptors: &[ColumnDescriptor]) -> Vec<String> {
        if self.order.is_empty() {
            descriptors.iter().map(|d| d.key.clone()).collect()
        } else {
            self.order.clone()
        }
    }

    /// Store `keys` as the explicit order, sanitized to a permutation of the
    /// descriptor keys.
    pub fn set_order<S: AsRef<str>>(&mut self, keys: &[S], descriptors: &[ColumnDescriptor]) {
        self.order = sanitize_order(keys, descriptors);
    }

    /// Move `key` to `to_index` within the effective order. Returns false when
    /// the key is unknown or already there.
    pub fn move_key(&mut self, key: &str, to_index: usize, descriptors: &[ColumnDescriptor]) -> bool {
        let current = self.effective_order(descriptors);
        let mut order = sanitize_order(current.as_slice(), descriptors);
        let Some(from) = order.iter().position(|k| k == key) else {
            return false;
        };
        let to = to_index.min(order.len().saturating_sub(1));
        if from == to {
            return false;
        }
        let moved = order.remove(from);
        order.insert(to, moved);
        self.order = order;
        true
    }

    /// Visible descriptors in display order.
    ///
    /// A non-empty `explicit_order` is the base order; otherwise the stored
    /// order, else the declared order. Unresolvable keys, hidden keys and
    /// repeated keys are dropped; relative order is preserved.
    pub fn visible_ordered<S: AsRef<str>>(
        &self,
        descriptors: &[ColumnDescriptor],
        explicit_order: &[S],
    ) -> Vec<ColumnDescriptor> {
        if !explicit_order.is_empty() {
            self.resolve(descriptors, explicit_order.iter().map(|k| k.as_ref()))
        } else if !self.order.is_empty() {
            self.resolve(descriptors, self.order.iter().map(String::as_str))
        } else {
            descriptors
                .iter()
                .filter(|d| self.is_visible(&d.key))
                .cloned()
                .collect()
        }
    }

    fn resolve<'a>(
        &self,
        descriptors: &[ColumnDescriptor],
        keys: impl Iterator<Item = &'a str>,
    ) -> Vec<ColumnDescriptor> {
        let mut seen = HashSet::new();
        keys.filter(|key| seen.insert(*key))
            .filter(|key| self.is_visible(key))
            .filter_map(|key| descriptors.iter().find(|d| d.key == key).cloned())
            .collect()
    }
}

/// Reduce `keys` to a permutation of the descriptor keys: unknown and repeated
/// keys are dropped, missing keys are appended in declared order.
pub fn sanitize_order<S: AsRef<str>>(keys: &[S], descriptors: &[ColumnDescriptor]) -> Vec<String> {
    let known: HashSet<&str> = descriptors.iter().map(|d| d.key.as_str()).collect();
    let mut seen = HashSet::new();
    let mut order: Vec<String> = keys
        .iter()
        .map(|k| k.as_ref())
        .filter(|key| known.contains(key) && seen.insert(*key))
        .map(str::to_string)
        .collect();
    for d in descriptors {
        if seen.insert(d.key.as_str()) {
            order.push(d.key.clone());
        }
    }
    order
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abc() -> Vec<ColumnDescriptor> {
        ["a", "b", "c"]
            .into_iter()
            .map(|k| ColumnDescriptor::new(k, k.to_uppercase()))
            .collect()
    }

    #[test]
    fn sanitize_drops_unknown_and_repeats_and_appends_missing() {
        let order = sanitize_order(&["c", "x", "c", "a"], &abc());
        assert_eq!(order, vec!["c", "a", "b"]);
    }

    #[test]
    fn move_key_shifts_others() {
        let descriptors = abc();
        let mut projection = ColumnProjection::new(&descriptors);
        assert!(projection.move_key("c", 0, &descriptors));
        assert_eq!(projection.order(), ["c", "a", "b"]);
        assert!(!projection.move_key("c", 0, &descriptors));
        assert!(!projection.move_key("zzz", 1, &descriptors));
    }
}
