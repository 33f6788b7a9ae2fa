use crate::{ActionItem, Category, ClassifiedEmail, Priority};
use std::collections::BTreeMap;

/// Returns the items matching `filter`, in their original order.
///
/// `None` selects everything. The input is never modified.
pub fn project<'a, T, K, F>(items: &'a [T], filter: Option<K>, key: F) -> Vec<&'a T>
where
    K: PartialEq,
    F: Fn(&T) -> K,
{
    match filter {
        Some(wanted) => items.iter().filter(|item| key(item) == wanted).collect(),
        None => items.iter().collect(),
    }
}

pub fn filter_by_category(
    emails: &[ClassifiedEmail],
    filter: Option<Category>,
) -> Vec<&ClassifiedEmail> {
    project(emails, filter, |email| email.category)
}

pub fn filter_by_priority(items: &[ActionItem], filter: Option<Priority>) -> Vec<&ActionItem> {
    project(items, filter, |item| item.priority)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tally<K: Ord> {
    pub total: usize,
    pub counts: BTreeMap<K, usize>,
}

impl<K: Ord> Tally<K> {
    pub fn count(&self, key: &K) -> usize {
        self.counts.get(key).copied().unwrap_or(0)
    }
}

/// Counts items per key. Every key in `keys` is present, even at zero.
pub fn tally<T, K, F>(items: &[T], keys: &[K], key: F) -> Tally<K>
where
    K: Ord + Copy,
    F: Fn(&T) -> K,
{
    let mut counts: BTreeMap<K, usize> = keys.iter().map(|k| (*k, 0)).collect();
    for item in items {
        *counts.entry(key(item)).or_insert(0) += 1;
    }

    Tally {
        total: items.len(),
        counts,
    }
}

pub fn category_counts(emails: &[ClassifiedEmail]) -> Tally<Category> {
    tally(emails, &Category::ALL, |email| email.category)
}

pub fn priority_counts(items: &[ActionItem]) -> Tally<Priority> {
    tally(items, &Priority::ALL, |item| item.priority)
}
