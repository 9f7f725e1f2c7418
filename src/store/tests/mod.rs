//! Tests for the MemoryStore.
//!
//! Tests are organized into categories:
//! - `basic`: get, counts and listing order
//! - `items`: create/update/delete through the `ItemStore` trait
//! - `workspaces`: workspace records
//! - `subscriber`: change notifications
//! - `concurrent`: shared access from many tasks

mod subscriber;

use super::{ItemStore, MemoryStore};
use crate::grid::Rect;
use crate::widgets::WidgetKind;
use crate::{BentoItem, NewItem};

/// Creates a store holding one workspace and returns both.
pub(super) async fn store_with_workspace() -> (MemoryStore, String) {
    let store = MemoryStore::new();
    let ws = store.create_workspace("Home", "user-1").await;
    (store, ws.id)
}

/// Adds a photo item at `rect` to the workspace.
pub(super) async fn add_photo(store: &MemoryStore, workspace_id: &str, rect: Rect) -> BentoItem {
    store
        .create_item(NewItem::new(workspace_id, WidgetKind::Photo, rect))
        .await
        .expect("workspace exists")
}
