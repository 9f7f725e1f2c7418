//! Item operations of the MemoryStore.

use super::{ItemStore, ItemUpdate, MemoryStore, StoredItem};
use crate::widgets::{ContentError, ItemContent, WidgetKind};
use crate::{BentoItem, ItemPatch, NewItem, StoreError};

/// Validates `content` for an item of `kind`.
fn check_content(kind: WidgetKind, content: &ItemContent) -> Result<(), StoreError> {
    if content.kind() != kind {
        return Err(ContentError::KindMismatch {
            expected: kind,
            found: content.kind(),
        }
        .into());
    }
    content.validate()?;
    Ok(())
}

impl ItemStore for MemoryStore {
    async fn list_items(&self, workspace_id: &str) -> Result<Vec<BentoItem>, StoreError> {
        if !self.has_workspace(workspace_id).await {
            return Err(StoreError::WorkspaceNotFound(workspace_id.to_string()));
        }
        let items = self.items.read().await;
        let mut stored: Vec<&StoredItem> = items
            .values()
            .filter(|s| s.item.workspace_id == workspace_id)
            .collect();
        stored.sort_by_key(|s| s.seq);
        Ok(stored.into_iter().map(|s| s.item.clone()).collect())
    }

    async fn create_item(&self, new: NewItem) -> Result<BentoItem, StoreError> {
        if !self.has_workspace(&new.workspace_id).await {
            return Err(StoreError::WorkspaceNotFound(new.workspace_id));
        }
        check_content(new.kind, &new.content)?;

        let seq = self.next_seq();
        let item = BentoItem {
            id: format!("item-{seq}"),
            workspace_id: new.workspace_id,
            kind: new.kind,
            title: new.title,
            content: new.content,
            position: new.position,
            locked: new.locked,
        };

        let mut items = self.items.write().await;
        items.insert(
            item.id.clone(),
            StoredItem {
                seq,
                item: item.clone(),
            },
        );
        drop(items);

        tracing::debug!(id = %item.id, kind = %item.kind, "created item");
        self.broadcast(ItemUpdate::Created(item.clone()));
        Ok(item)
    }

    async fn update_item(&self, id: &str, patch: ItemPatch) -> Result<BentoItem, StoreError> {
        let mut items = self.items.write().await;
        let stored = items
            .get_mut(id)
            .ok_or_else(|| StoreError::ItemNotFound(id.to_string()))?;
        if patch.is_empty() {
            return Ok(stored.item.clone());
        }

        if let Some(content) = &patch.content {
            check_content(stored.item.kind, content)?;
        }

        let item = &mut stored.item;
        if let Some(position) = patch.position {
            item.position = position;
        }
        if let Some(locked) = patch.locked {
            item.locked = locked;
        }
        if let Some(title) = patch.title {
            item.title = Some(title).filter(|t| !t.trim().is_empty());
        }
        if let Some(content) = patch.content {
            item.content = content;
        }
        let updated = item.clone();
        drop(items);

        self.broadcast(ItemUpdate::Updated(updated.clone()));
        Ok(updated)
    }

    async fn delete_item(&self, id: &str) -> Result<bool, StoreError> {
        let removed = self.items.write().await.remove(id);
        match removed {
            Some(stored) => {
                tracing::debug!(id, "deleted item");
                self.broadcast(ItemUpdate::Deleted {
                    id: stored.item.id,
                    workspace_id: stored.item.workspace_id,
                });
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
