//! Workspace sessions.
//!
//! A [`WorkspaceSession`] pairs the [`GridController`] of the open workspace
//! with the [`ItemStore`] it persists to. Layout changes are applied in memory
//! first; the resulting position writes are queued to one writer task per
//! session, so rendering never waits on the store and batches land in the
//! order the interactions happened.

use crate::config::GridConfig;
use crate::controller::{ControllerError, GridController, InteractionEvent, Outcome, PositionChange};
use crate::store::ItemStore;
use crate::widgets::{ItemContent, WidgetKind};
use crate::{BentoItem, ItemPatch, NewItem, StoreError};
use tokio::sync::{mpsc, oneshot};

/// A position write that the store rejected.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistFailure {
    pub id: String,
    pub error: StoreError,
}

/// Summary of one batch of position writes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PersistReport {
    /// Number of successful writes.
    pub written: usize,
    /// Writes that failed. They are not retried.
    pub failures: Vec<PersistFailure>,
}

impl PersistReport {
    pub fn is_ok(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Receives the report of a queued batch once the writer has applied it.
pub type PersistHandle = oneshot::Receiver<PersistReport>;

/// Result of a completed drag or resize.
#[derive(Debug)]
pub struct InteractionReport {
    pub outcome: Outcome,
    /// Queued writes of the changed positions. `None` when nothing moved.
    /// Dropping the handle does not cancel the writes.
    pub persist: Option<PersistHandle>,
}

/// One batch of position writes queued to the writer task.
#[derive(Debug)]
struct WriteBatch {
    changes: Vec<PositionChange>,
    reply: oneshot::Sender<PersistReport>,
}

/// Applies queued batches one at a time until every sender is dropped.
async fn run_writer<S: ItemStore>(store: S, mut rx: mpsc::UnboundedReceiver<WriteBatch>) {
    while let Some(batch) = rx.recv().await {
        let report = write_positions(&store, batch.changes).await;
        // The caller may have dropped its handle.
        let _ = batch.reply.send(report);
    }
    tracing::debug!("position writer stopped");
}

/// Writes each changed position once, in order.
async fn write_positions<S: ItemStore>(store: &S, changes: Vec<PositionChange>) -> PersistReport {
    let mut report = PersistReport::default();
    for change in changes {
        match store.update_item(&change.id, ItemPatch::position(change.to)).await {
            Ok(_) => report.written += 1,
            Err(error) => {
                tracing::warn!(item = %change.id, to = %change.to, %error, "failed to persist position");
                report.failures.push(PersistFailure {
                    id: change.id,
                    error,
                });
            }
        }
    }
    report
}

/// The open workspace of one user.
#[derive(Debug)]
pub struct WorkspaceSession<S> {
    store: S,
    controller: GridController,
    writes: mpsc::UnboundedSender<WriteBatch>,
}

impl<S> WorkspaceSession<S>
where
    S: ItemStore + Clone + 'static,
{
    /// Loads a workspace and settles any overlaps it was stored with.
    ///
    /// Positions moved while settling are written back before this returns;
    /// failed writes are logged and the settled layout is kept.
    pub async fn open(store: S, workspace_id: &str, grid: &GridConfig) -> Result<Self, StoreError> {
        let (writes, rx) = mpsc::unbounded_channel();
        tokio::spawn(run_writer(store.clone(), rx));
        let controller = Self::load(&store, &writes, workspace_id, grid.columns, grid.scan_rows).await?;
        Ok(Self {
            store,
            controller,
            writes,
        })
    }

    async fn load(
        store: &S,
        writes: &mpsc::UnboundedSender<WriteBatch>,
        workspace_id: &str,
        columns: u32,
        scan_rows: u32,
    ) -> Result<GridController, StoreError> {
        let items = store.list_items(workspace_id).await?;
        let count = items.len();
        let mut controller = GridController::load(workspace_id, items, columns, scan_rows);

        let changes = controller.settle();
        let settled = changes.len();
        if let Some(persist) = queue_writes(writes, changes) {
            if persist.await.is_err() {
                tracing::warn!(workspace = workspace_id, "position writer gone, settled layout not persisted");
            }
        }
        tracing::info!(workspace = workspace_id, items = count, settled, "loaded workspace");
        Ok(controller)
    }

    /// Discards the current layout and loads another workspace.
    ///
    /// On error the current workspace stays open.
    pub async fn switch(&mut self, workspace_id: &str) -> Result<(), StoreError> {
        let columns = self.controller.columns();
        let scan_rows = self.controller.scan_rows();
        self.controller = Self::load(&self.store, &self.writes, workspace_id, columns, scan_rows).await?;
        Ok(())
    }

    pub fn workspace_id(&self) -> &str {
        self.controller.workspace_id()
    }

    pub fn controller(&self) -> &GridController {
        &self.controller
    }

    /// Items of the open workspace, as they should be rendered.
    pub fn items(&self) -> &[BentoItem] {
        self.controller.items()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Handles a completed drag or resize.
    ///
    /// The layout is updated synchronously; one write per moved item is
    /// queued behind the writes of earlier interactions.
    pub fn handle(&mut self, event: &InteractionEvent) -> Result<InteractionReport, ControllerError> {
        let outcome = self.controller.handle(event)?;
        let persist = queue_writes(&self.writes, outcome.changes().to_vec());
        Ok(InteractionReport { outcome, persist })
    }

    /// Adds a widget at the first free spot for its default span.
    pub async fn add_item(&mut self, kind: WidgetKind, title: Option<String>) -> Result<BentoItem, StoreError> {
        let position = self.controller.placement_for(kind);
        let new = NewItem::new(self.workspace_id(), kind, position).with_title(title);
        let item = self.store.create_item(new).await?;
        if let Err(error) = self.controller.insert(item.clone()) {
            tracing::warn!(%error, "store returned an item already in the layout");
        }
        tracing::info!(id = %item.id, kind = %kind, position = %item.position, "added item");
        Ok(item)
    }

    /// Deletes a widget. Returns `false` if the store did not have it.
    pub async fn delete_item(&mut self, id: &str) -> Result<bool, StoreError> {
        let deleted = self.store.delete_item(id).await?;
        self.controller.remove(id);
        Ok(deleted)
    }

    /// Fails without touching the store when `id` is not in the open
    /// workspace.
    fn ensure_in_layout(&self, id: &str) -> Result<(), StoreError> {
        match self.controller.get(id) {
            Some(_) => Ok(()),
            None => Err(StoreError::ItemNotFound(id.to_string())),
        }
    }

    /// Pins or unpins a widget.
    pub async fn set_locked(&mut self, id: &str, locked: bool) -> Result<BentoItem, StoreError> {
        self.ensure_in_layout(id)?;
        let item = self.store.update_item(id, ItemPatch::locked(locked)).await?;
        self.controller
            .set_locked(id, locked)
            .map_err(|_| StoreError::ItemNotFound(id.to_string()))?;
        Ok(item)
    }

    /// Replaces a widget's content. Content is validated by the store.
    pub async fn update_content(&mut self, id: &str, content: ItemContent) -> Result<BentoItem, StoreError> {
        self.ensure_in_layout(id)?;
        let item = self.store.update_item(id, ItemPatch::content(content.clone())).await?;
        self.controller
            .set_content(id, content)
            .map_err(|_| StoreError::ItemNotFound(id.to_string()))?;
        Ok(item)
    }

    /// Renames a widget. A blank title removes it.
    pub async fn rename_item(&mut self, id: &str, title: &str) -> Result<BentoItem, StoreError> {
        self.ensure_in_layout(id)?;
        let patch = ItemPatch {
            title: Some(title.to_string()),
            ..ItemPatch::default()
        };
        let item = self.store.update_item(id, patch).await?;
        self.controller
            .refresh(item.clone())
            .map_err(|_| StoreError::ItemNotFound(id.to_string()))?;
        Ok(item)
    }
}

/// Queues `changes` to the writer. `None` when there is nothing to write.
fn queue_writes(writes: &mpsc::UnboundedSender<WriteBatch>, changes: Vec<PositionChange>) -> Option<PersistHandle> {
    if changes.is_empty() {
        return None;
    }
    let (reply, persist) = oneshot::channel();
    if writes.send(WriteBatch { changes, reply }).is_err() {
        tracing::warn!("position writer gone, changes not persisted");
    }
    Some(persist)
}
