//! Layout ownership for one workspace.
//!
//! A [`GridController`] holds the item list of a single workspace and is the
//! only thing that mutates it. Drags and resizes arrive as
//! [`InteractionEvent`]s once they complete; the controller checks the lock
//! state, applies the proposed rectangle, runs the resolver once and reports
//! which items ended up somewhere else.
//!
//! # Example
//!
//! ```
//! use bento_grid::controller::{GridController, InteractionEvent, Outcome};
//! use bento_grid::grid::Rect;
//! # use bento_grid::widgets::{ItemContent, WidgetKind};
//! # use bento_grid::BentoItem;
//!
//! let mut controller = GridController::new("ws-1", 4, 20);
//! # for (id, x) in [("a", 0), ("b", 1)] {
//! #     controller.insert(BentoItem {
//! #         id: id.to_string(),
//! #         workspace_id: "ws-1".to_string(),
//! #         kind: WidgetKind::Photo,
//! #         title: None,
//! #         content: ItemContent::empty(WidgetKind::Photo),
//! #         position: Rect::new(x, 0, 1, 1),
//! #         locked: false,
//! #     }).expect("unique id");
//! # }
//! // Drop `a` onto `b`: `b` yields to the right.
//! let outcome = controller
//!     .handle(&InteractionEvent::drag_end("a", Rect::new(1, 0, 1, 1)))
//!     .expect("known item");
//! let Outcome::Applied(changes) = outcome else { panic!("a is not locked") };
//! assert_eq!(changes.len(), 2);
//! assert_eq!(changes[1].to, Rect::new(2, 0, 1, 1));
//! ```

use crate::grid::{first_fit, resolve, GridItem, Rect, MAX_COLUMNS, MAX_SCAN_ROWS};
use crate::widgets::{ItemContent, WidgetKind};
use crate::BentoItem;
use std::collections::HashMap;

/// Errors raised by [`GridController`] operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ControllerError {
    /// No item with this id in the controlled workspace.
    #[error("Item not found: {0}")]
    ItemNotFound(String),

    /// An item with this id is already in the workspace.
    #[error("Duplicate item: {0}")]
    DuplicateItem(String),
}

/// Which interaction completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionKind {
    /// The item was dragged; only the proposed origin is used.
    DragEnd,
    /// The item was resized; only the proposed span is used.
    ResizeEnd,
}

/// A completed drag or resize reported by the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteractionEvent {
    pub kind: InteractionKind,
    pub item_id: String,
    pub proposed: Rect,
}

impl InteractionEvent {
    pub fn drag_end(item_id: impl Into<String>, proposed: Rect) -> Self {
        Self {
            kind: InteractionKind::DragEnd,
            item_id: item_id.into(),
            proposed,
        }
    }

    pub fn resize_end(item_id: impl Into<String>, proposed: Rect) -> Self {
        Self {
            kind: InteractionKind::ResizeEnd,
            item_id: item_id.into(),
            proposed,
        }
    }
}

/// Answer to an in-progress drag or resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    Allowed,
    Vetoed,
}

/// An item whose position differs from before the interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionChange {
    pub id: String,
    pub from: Rect,
    pub to: Rect,
}

/// Result of handling a completed interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The item is locked; nothing changed.
    Vetoed,
    /// The interaction was applied and resolved. Empty when nothing moved.
    Applied(Vec<PositionChange>),
}

impl Outcome {
    /// Position changes to persist. Empty for a vetoed interaction.
    pub fn changes(&self) -> &[PositionChange] {
        match self {
            Outcome::Vetoed => &[],
            Outcome::Applied(changes) => changes,
        }
    }
}

/// Owner of one workspace's item list.
#[derive(Debug, Clone)]
pub struct GridController {
    workspace_id: String,
    columns: u32,
    scan_rows: u32,
    items: Vec<BentoItem>,
}

impl GridController {
    /// Creates a controller for an empty workspace.
    ///
    /// `columns` is clamped to `1..=MAX_COLUMNS` and `scan_rows` to
    /// `1..=MAX_SCAN_ROWS`.
    pub fn new(workspace_id: impl Into<String>, columns: u32, scan_rows: u32) -> Self {
        Self {
            workspace_id: workspace_id.into(),
            columns: columns.clamp(1, MAX_COLUMNS),
            scan_rows: scan_rows.clamp(1, MAX_SCAN_ROWS),
            items: Vec::new(),
        }
    }

    /// Creates a controller holding `items` exactly as stored.
    ///
    /// Positions are neither fitted nor resolved; call
    /// [`settle`](Self::settle) for that.
    pub fn load(
        workspace_id: impl Into<String>,
        items: Vec<BentoItem>,
        columns: u32,
        scan_rows: u32,
    ) -> Self {
        let mut controller = Self::new(workspace_id, columns, scan_rows);
        controller.items = items;
        controller
    }

    pub fn workspace_id(&self) -> &str {
        &self.workspace_id
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    pub fn scan_rows(&self) -> u32 {
        self.scan_rows
    }

    /// Items in insertion order.
    pub fn items(&self) -> &[BentoItem] {
        &self.items
    }

    pub fn get(&self, id: &str) -> Option<&BentoItem> {
        self.items.iter().find(|item| item.id == id)
    }

    fn get_mut(&mut self, id: &str) -> Result<&mut BentoItem, ControllerError> {
        self.items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or_else(|| ControllerError::ItemNotFound(id.to_string()))
    }

    fn grid_items(&self) -> Vec<GridItem> {
        self.items.iter().map(BentoItem::grid_item).collect()
    }

    /// Decides whether an in-progress drag or resize of `id` may continue.
    pub fn gate(&self, id: &str) -> Result<Gate, ControllerError> {
        let item = self
            .get(id)
            .ok_or_else(|| ControllerError::ItemNotFound(id.to_string()))?;
        Ok(if item.locked {
            Gate::Vetoed
        } else {
            Gate::Allowed
        })
    }

    /// Applies a completed interaction and resolves the layout once.
    ///
    /// A locked item is vetoed and no item is touched. Otherwise the returned
    /// changes list every item whose position differs from before the
    /// interaction, the interacted item included.
    pub fn handle(&mut self, event: &InteractionEvent) -> Result<Outcome, ControllerError> {
        if self.gate(&event.item_id)? == Gate::Vetoed {
            tracing::debug!(item = %event.item_id, "vetoed interaction on locked item");
            return Ok(Outcome::Vetoed);
        }

        let before: HashMap<String, Rect> = self
            .items
            .iter()
            .map(|item| (item.id.clone(), item.position))
            .collect();

        let columns = self.columns;
        let item = self.get_mut(&event.item_id)?;
        let current = item.position;
        let proposed = match event.kind {
            InteractionKind::DragEnd => {
                Rect::new(event.proposed.x, event.proposed.y, current.w, current.h)
            }
            InteractionKind::ResizeEnd => {
                Rect::new(current.x, current.y, event.proposed.w, event.proposed.h)
            }
        };
        item.position = proposed.fit_columns(columns);

        self.apply_resolution();
        Ok(Outcome::Applied(self.diff(&before)))
    }

    /// Fits unlocked items to the column count and resolves the layout,
    /// e.g. right after loading.
    ///
    /// Locked items keep their stored position even when they overhang the
    /// grid. Every fitted or displaced item is reported.
    pub fn settle(&mut self) -> Vec<PositionChange> {
        let before: HashMap<String, Rect> = self
            .items
            .iter()
            .map(|item| (item.id.clone(), item.position))
            .collect();
        let columns = self.columns;
        for item in self.items.iter_mut().filter(|item| !item.locked) {
            item.position = item.position.fit_columns(columns);
        }
        self.apply_resolution();
        self.diff(&before)
    }

    fn apply_resolution(&mut self) {
        let resolved = resolve(&self.grid_items(), self.columns);
        for (item, grid_item) in self.items.iter_mut().zip(resolved) {
            item.position = grid_item.position;
        }
    }

    fn diff(&self, before: &HashMap<String, Rect>) -> Vec<PositionChange> {
        self.items
            .iter()
            .filter_map(|item| {
                let from = *before.get(&item.id)?;
                (from != item.position).then(|| PositionChange {
                    id: item.id.clone(),
                    from,
                    to: item.position,
                })
            })
            .collect()
    }

    /// First free rectangle for a new widget of `kind`, at its default span.
    pub fn placement_for(&self, kind: WidgetKind) -> Rect {
        let (w, h) = kind.default_span();
        let w = w.min(self.columns);
        let (x, y) = first_fit(&self.grid_items(), w, h, self.columns, self.scan_rows);
        Rect::new(x, y, w, h)
    }

    /// Adds a stored item to the layout at its stored position.
    pub fn insert(&mut self, item: BentoItem) -> Result<(), ControllerError> {
        if self.get(&item.id).is_some() {
            return Err(ControllerError::DuplicateItem(item.id));
        }
        self.items.push(item);
        Ok(())
    }

    /// Removes an item, freeing its cells. Other items stay where they are.
    pub fn remove(&mut self, id: &str) -> Option<BentoItem> {
        let index = self.items.iter().position(|item| item.id == id)?;
        Some(self.items.remove(index))
    }

    pub fn set_locked(&mut self, id: &str, locked: bool) -> Result<(), ControllerError> {
        self.get_mut(id)?.locked = locked;
        Ok(())
    }

    pub fn set_content(&mut self, id: &str, content: ItemContent) -> Result<(), ControllerError> {
        self.get_mut(id)?.content = content;
        Ok(())
    }

    /// Replaces the in-memory copy of an item with a fresher record.
    ///
    /// The layout keeps its own position for the item.
    pub fn refresh(&mut self, item: BentoItem) -> Result<(), ControllerError> {
        let current = self.get_mut(&item.id)?;
        let position = current.position;
        *current = item;
        current.position = position;
        Ok(())
    }
}
