//! Persistence collaborator for bento items.
//!
//! [`ItemStore`] is the narrow interface the rest of the crate persists
//! through: list, create, update, delete. [`MemoryStore`] implements it with
//! an `Arc<RwLock<HashMap>>` so a single store can be cloned into background
//! write tasks, and broadcasts an [`ItemUpdate`] for every change so a
//! renderer can follow along.

use crate::{BentoItem, ItemPatch, NewItem, StoreError, Workspace};
use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};

#[cfg(test)]
mod tests;

mod items;
mod workspaces;

/// Capacity of the change notification channel.
const DEFAULT_SUBSCRIBER_CHANNEL_CAPACITY: usize = 256;

/// Record store the layout is persisted to.
///
/// Callers never get retries or transactions from this interface; a failed
/// call is reported once and the caller decides what to do.
pub trait ItemStore: Send + Sync {
    /// All items of a workspace, in creation order.
    fn list_items(
        &self,
        workspace_id: &str,
    ) -> impl Future<Output = Result<Vec<BentoItem>, StoreError>> + Send;

    /// Stores a new item and returns it with its assigned id.
    fn create_item(
        &self,
        item: NewItem,
    ) -> impl Future<Output = Result<BentoItem, StoreError>> + Send;

    /// Applies a partial update and returns the updated item.
    fn update_item(
        &self,
        id: &str,
        patch: ItemPatch,
    ) -> impl Future<Output = Result<BentoItem, StoreError>> + Send;

    /// Deletes an item. Returns `false` if it did not exist.
    fn delete_item(&self, id: &str) -> impl Future<Output = Result<bool, StoreError>> + Send;
}

/// Change notification sent to [`MemoryStore::subscribe`] receivers.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemUpdate {
    /// An item was created.
    Created(BentoItem),
    /// An item was modified.
    Updated(BentoItem),
    /// An item was removed.
    Deleted {
        /// Id of the removed item.
        id: String,
        /// Workspace it belonged to.
        workspace_id: String,
    },
}

/// Stored item plus the sequence number that fixes its list position.
#[derive(Debug, Clone)]
struct StoredItem {
    seq: u64,
    item: BentoItem,
}

/// Thread-safe in-memory store for workspaces and their items.
///
/// Cloning is cheap and every clone shares the same data.
///
/// # Example
///
/// ```
/// use bento_grid::store::{ItemStore, MemoryStore};
/// use bento_grid::grid::Rect;
/// use bento_grid::widgets::WidgetKind;
/// use bento_grid::NewItem;
///
/// #[tokio::main]
/// async fn main() {
///     let store = MemoryStore::new();
///     let ws = store.create_workspace("Home", "user-1").await;
///     let item = store
///         .create_item(NewItem::new(&ws.id, WidgetKind::Photo, Rect::new(0, 0, 1, 1)))
///         .await
///         .expect("workspace exists");
///     let items = store.list_items(&ws.id).await.expect("workspace exists");
///     assert_eq!(items, vec![item]);
/// }
/// ```
#[derive(Clone)]
pub struct MemoryStore {
    /// Items keyed by id.
    items: Arc<RwLock<HashMap<String, StoredItem>>>,
    /// Workspace records in creation order.
    workspaces: Arc<RwLock<Vec<Workspace>>>,
    /// Source of ids and creation order, shared by items and workspaces.
    next_seq: Arc<AtomicU64>,
    /// Broadcast channel sender for change notifications.
    update_tx: broadcast::Sender<ItemUpdate>,
}

impl std::fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryStore")
            .field("items", &self.items)
            .field("workspaces", &self.workspaces)
            .field("subscriber_count", &self.update_tx.receiver_count())
            .finish()
    }
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        let (update_tx, _rx) = broadcast::channel(DEFAULT_SUBSCRIBER_CHANNEL_CAPACITY);
        Self {
            items: Arc::new(RwLock::new(HashMap::new())),
            workspaces: Arc::new(RwLock::new(Vec::new())),
            next_seq: Arc::new(AtomicU64::new(1)),
            update_tx,
        }
    }

    /// Subscribes to change notifications.
    ///
    /// Receivers only see changes made after they subscribed.
    pub fn subscribe(&self) -> broadcast::Receiver<ItemUpdate> {
        self.update_tx.subscribe()
    }

    /// Returns the number of active subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.update_tx.receiver_count()
    }

    /// Retrieves an item by id.
    pub async fn get(&self, id: &str) -> Option<BentoItem> {
        let items = self.items.read().await;
        items.get(id).map(|stored| stored.item.clone())
    }

    /// Total number of stored items across all workspaces.
    pub async fn item_count(&self) -> usize {
        self.items.read().await.len()
    }

    fn next_seq(&self) -> u64 {
        self.next_seq.fetch_add(1, Ordering::Relaxed)
    }

    fn broadcast(&self, update: ItemUpdate) {
        match self.update_tx.send(update) {
            Ok(count) => {
                tracing::trace!("Broadcast item update sent to {} subscribers", count);
            }
            Err(_) => {
                tracing::trace!("No subscribers for item update broadcast");
            }
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}
