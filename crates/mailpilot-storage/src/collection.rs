use crate::KeyValueStore;
use chrono::Utc;
use mailpilot_core::{ItemId, SourceItem, WorkflowError};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Key under which the summarizer's thread list is mirrored.
pub const THREADS_KEY: &str = "emailThreads";

struct Mirror {
    store: Arc<dyn KeyValueStore>,
    key: String,
}

/// Ordered source items with unique ids and an optional durable mirror.
///
/// With a mirror attached, every mutation rewrites the whole list under the
/// mirror key. Mirror failures are logged and never fail the mutation.
pub struct CollectionStore {
    items: Vec<SourceItem>,
    mirror: Option<Mirror>,
}

impl CollectionStore {
    pub fn in_memory(items: Vec<SourceItem>) -> Self {
        Self {
            items: dedupe(items),
            mirror: None,
        }
    }

    /// Loads the list mirrored under `key`, falling back to `seed` when the
    /// slot is empty, unreadable or corrupt. The seed is then written back.
    pub async fn hydrate(
        store: Arc<dyn KeyValueStore>,
        key: impl Into<String>,
        seed: Vec<SourceItem>,
    ) -> Self {
        let key = key.into();
        let stored = match store.get_value(&key).await {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<SourceItem>>(&raw) {
                Ok(items) => Some(items),
                Err(err) => {
                    tracing::warn!(key = %key, "discarding corrupt collection mirror: {err}");
                    None
                }
            },
            Ok(None) => None,
            Err(err) => {
                tracing::warn!(key = %key, "collection mirror unreadable: {err}");
                None
            }
        };

        let from_seed = stored.is_none();
        let collection = Self {
            items: dedupe(stored.unwrap_or(seed)),
            mirror: Some(Mirror { store, key }),
        };

        if from_seed {
            collection.persist().await;
        }

        collection
    }

    pub fn list(&self) -> &[SourceItem] {
        &self.items
    }

    pub fn get(&self, id: ItemId) -> Option<&SourceItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Max existing id + 1, or 1 for an empty collection.
    pub fn next_id(&self) -> ItemId {
        self.items
            .iter()
            .map(|item| item.id)
            .max()
            .map(ItemId::next_after)
            .unwrap_or(ItemId(1))
    }

    pub async fn add(&mut self, item: SourceItem) -> Result<(), WorkflowError> {
        if self.contains(item.id) {
            return Err(WorkflowError::DuplicateId(item.id));
        }

        self.items.push(item);
        self.persist().await;
        Ok(())
    }

    /// Creates an item from user input under a freshly synthesized id.
    pub async fn create(
        &mut self,
        subject: &str,
        sender: &str,
        content: &str,
    ) -> Result<ItemId, WorkflowError> {
        let subject = subject.trim();
        let content = content.trim();
        if subject.is_empty() || content.is_empty() {
            return Err(WorkflowError::InvalidInput(
                "subject and content are both required".to_string(),
            ));
        }

        let id = self.next_id();
        self.add(SourceItem {
            id,
            subject: subject.to_string(),
            sender: sender.trim().to_string(),
            content: content.to_string(),
            timestamp: Utc::now().to_rfc3339(),
        })
        .await?;

        Ok(id)
    }

    pub async fn remove(&mut self, id: ItemId) -> Option<SourceItem> {
        let index = self.items.iter().position(|item| item.id == id)?;
        let removed = self.items.remove(index);
        self.persist().await;
        Some(removed)
    }

    pub async fn replace_all(&mut self, items: Vec<SourceItem>) {
        self.items = dedupe(items);
        self.persist().await;
    }

    async fn persist(&self) {
        let Some(mirror) = &self.mirror else {
            return;
        };

        let raw = match serde_json::to_string(&self.items) {
            Ok(raw) => raw,
            Err(err) => {
                tracing::warn!(key = %mirror.key, "failed to serialize collection: {err}");
                return;
            }
        };

        if let Err(err) = mirror.store.put_value(&mirror.key, &raw).await {
            tracing::warn!(key = %mirror.key, "failed to write collection mirror: {err}");
        }
    }
}

fn dedupe(items: Vec<SourceItem>) -> Vec<SourceItem> {
    let mut seen = BTreeSet::new();
    items
        .into_iter()
        .filter(|item| {
            let fresh = seen.insert(item.id);
            if !fresh {
                tracing::warn!(id = %item.id, "dropping duplicate collection item");
            }
            fresh
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MemoryStore, StorageError};
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;

    fn item(id: u64, subject: &str) -> SourceItem {
        SourceItem {
            id: ItemId(id),
            subject: subject.to_string(),
            sender: String::new(),
            content: format!("{subject} body"),
            timestamp: String::new(),
        }
    }

    fn ids(store: &CollectionStore) -> Vec<u64> {
        store.list().iter().map(|item| item.id.0).collect()
    }

    #[tokio::test]
    async fn hydrate_seeds_and_writes_back() {
        let kv = Arc::new(MemoryStore::new());
        let store = CollectionStore::hydrate(kv.clone(), THREADS_KEY, vec![item(1, "a")]).await;
        assert_eq!(ids(&store), vec![1]);

        let raw = kv.get_value(THREADS_KEY).await.expect("get").expect("seed written");
        let mirrored: Vec<SourceItem> = serde_json::from_str(&raw).expect("valid json");
        assert_eq!(mirrored, vec![item(1, "a")]);
    }

    #[tokio::test]
    async fn hydrate_prefers_the_mirror_over_the_seed() {
        let kv = Arc::new(MemoryStore::new());
        {
            let mut store = CollectionStore::hydrate(kv.clone(), THREADS_KEY, vec![item(1, "a")]).await;
            store.add(item(5, "added")).await.expect("add");
        }

        let store = CollectionStore::hydrate(kv, THREADS_KEY, vec![item(1, "a")]).await;
        assert_eq!(ids(&store), vec![1, 5]);
    }

    #[tokio::test]
    async fn corrupt_mirror_falls_back_to_seed() {
        let kv = Arc::new(MemoryStore::new());
        kv.put_value(THREADS_KEY, "{not json").await.expect("put");

        let store = CollectionStore::hydrate(kv.clone(), THREADS_KEY, vec![item(2, "seed")]).await;
        assert_eq!(ids(&store), vec![2]);
        let raw = kv.get_value(THREADS_KEY).await.expect("get").expect("rewritten");
        assert!(raw.starts_with('['));
    }

    struct BrokenStore;

    #[async_trait]
    impl KeyValueStore for BrokenStore {
        async fn get_value(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Io(std::io::Error::other("disk gone")))
        }

        async fn put_value(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Io(std::io::Error::other("disk gone")))
        }
    }

    #[tokio::test]
    async fn unavailable_mirror_does_not_block_mutations() {
        let mut store =
            CollectionStore::hydrate(Arc::new(BrokenStore), THREADS_KEY, vec![item(1, "a")]).await;
        store.add(item(2, "b")).await.expect("add still works");
        assert_eq!(ids(&store), vec![1, 2]);
    }

    #[tokio::test]
    async fn next_id_is_max_plus_one() {
        let mut store = CollectionStore::in_memory(Vec::new());
        assert_eq!(store.next_id(), ItemId(1));

        store.add(item(4, "x")).await.expect("add");
        store.add(item(2, "y")).await.expect("add");
        assert_eq!(store.next_id(), ItemId(5));

        let created = store.create("New", "me@example.com", "Hello").await.expect("create");
        assert_eq!(created, ItemId(5));
        let stamp = &store.get(created).expect("created item").timestamp;
        assert!(chrono::DateTime::parse_from_rfc3339(stamp).is_ok(), "got {stamp:?}");
        assert_eq!(ids(&store), vec![4, 2, 5]);
    }

    #[tokio::test]
    async fn add_rejects_id_collisions() {
        let mut store = CollectionStore::in_memory(vec![item(1, "a")]);
        assert_eq!(
            store.add(item(1, "again")).await,
            Err(WorkflowError::DuplicateId(ItemId(1)))
        );
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn create_rejects_blank_input() {
        let mut store = CollectionStore::in_memory(Vec::new());
        let result = store.create("  ", "", "content").await;
        assert!(matches!(result, Err(WorkflowError::InvalidInput(_))));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn remove_and_replace_are_mirrored() {
        let kv = Arc::new(MemoryStore::new());
        let mut store =
            CollectionStore::hydrate(kv.clone(), THREADS_KEY, vec![item(1, "a"), item(2, "b")]).await;

        let removed = store.remove(ItemId(1)).await.expect("removed");
        assert_eq!(removed.subject, "a");
        assert!(store.remove(ItemId(1)).await.is_none());

        store.replace_all(vec![item(8, "h"), item(8, "dup"), item(9, "i")]).await;
        assert_eq!(ids(&store), vec![8, 9]);

        let reloaded = CollectionStore::hydrate(kv, THREADS_KEY, Vec::new()).await;
        assert_eq!(ids(&reloaded), vec![8, 9]);
    }
}
