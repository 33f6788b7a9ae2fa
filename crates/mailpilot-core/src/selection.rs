use std::collections::BTreeSet;

/// Ids of the result items a user has confirmed.
///
/// Tracked beside the result list rather than on the items themselves.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfirmationSet {
    ids: BTreeSet<String>,
}

impl ConfirmationSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips membership of `id`; returns whether it is confirmed afterwards.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.ids.remove(id) {
            false
        } else {
            self.ids.insert(id.to_string());
            true
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn remove(&mut self, id: &str) -> bool {
        self.ids.remove(id)
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Drops every id for which `exists` returns false.
    pub fn retain_existing(&mut self, exists: impl Fn(&str) -> bool) {
        self.ids.retain(|id| exists(id));
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }
}

/// Picking the active filter value again clears the filter.
pub fn toggle_filter<K: PartialEq>(current: Option<K>, chosen: K) -> Option<K> {
    match current {
        Some(active) if active == chosen => None,
        _ => Some(chosen),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flips_membership() {
        let mut confirmed = ConfirmationSet::new();
        assert!(confirmed.toggle("1-0"));
        assert!(confirmed.contains("1-0"));
        assert!(!confirmed.toggle("1-0"));
        assert!(confirmed.is_empty());
    }

    #[test]
    fn retain_existing_purges_stale_ids() {
        let mut confirmed = ConfirmationSet::new();
        confirmed.toggle("1-0");
        confirmed.toggle("2-1");

        confirmed.retain_existing(|id| id == "2-1");
        assert_eq!(confirmed.iter().collect::<Vec<_>>(), vec!["2-1"]);
    }

    #[test]
    fn choosing_the_active_filter_clears_it() {
        assert_eq!(toggle_filter(None, 3), Some(3));
        assert_eq!(toggle_filter(Some(3), 3), None);
        assert_eq!(toggle_filter(Some(3), 4), Some(4));
    }
}
