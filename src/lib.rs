//! Bento grid library
//!
//! This crate provides the layout engine behind bento workspaces: named
//! collections of small widgets arranged on a fixed-width integer grid.
//!
//! The pieces, from the inside out:
//! - [`grid`]: pure geometry, overlap resolution and first-fit placement
//! - [`widgets`]: widget kinds, default spans and typed content payloads
//! - [`controller`]: the owner of one workspace's layout, gating drags and
//!   resizes on lock state
//! - [`store`]: the persistence collaborator and an in-memory implementation
//! - [`workspace`]: a session tying a controller to a store
//!
//! # Example
//!
//! ```
//! use bento_grid::grid::{resolve, GridItem, Rect};
//!
//! let items = vec![
//!     GridItem::new("a", Rect::new(0, 0, 2, 1)),
//!     GridItem::new("b", Rect::new(1, 0, 2, 1)),
//! ];
//! let resolved = resolve(&items, 4);
//! assert_eq!(resolved[1].position, Rect::new(2, 0, 2, 1));
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Configuration loading and the TOML schema.
pub mod config;

/// Per-workspace layout ownership and interaction gating.
pub mod controller;

/// Grid geometry and the layout engine.
pub mod grid;

/// Logging initialization.
pub mod logging;

/// Persistence collaborator trait and in-memory store.
pub mod store;

/// Widget catalogue and content payloads.
pub mod widgets;

/// Workspace sessions: controller plus store.
pub mod workspace;

use grid::{GridItem, Rect};
use widgets::{ContentError, ItemContent, WidgetKind};

/// A widget placed in a workspace, as persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BentoItem {
    /// Unique item identifier assigned by the store.
    pub id: String,
    /// Workspace the item belongs to.
    pub workspace_id: String,
    /// Widget kind.
    pub kind: WidgetKind,
    /// Optional user-facing title.
    #[serde(default)]
    pub title: Option<String>,
    /// Kind-specific payload.
    pub content: ItemContent,
    /// Occupied grid cells.
    pub position: Rect,
    /// Whether the item is pinned in place.
    #[serde(default)]
    pub locked: bool,
}

impl BentoItem {
    /// Projects the item onto the unit the layout engine works with.
    pub fn grid_item(&self) -> GridItem {
        GridItem {
            id: self.id.clone(),
            position: self.position,
            locked: self.locked,
        }
    }
}

/// An item that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewItem {
    /// Workspace to add the item to.
    pub workspace_id: String,
    /// Widget kind.
    pub kind: WidgetKind,
    /// Optional title.
    pub title: Option<String>,
    /// Initial payload.
    pub content: ItemContent,
    /// Initial cells.
    pub position: Rect,
    /// Initial lock state.
    pub locked: bool,
}

impl NewItem {
    /// Creates an unlocked, untitled item with empty content.
    pub fn new(workspace_id: impl Into<String>, kind: WidgetKind, position: Rect) -> Self {
        Self {
            workspace_id: workspace_id.into(),
            kind,
            title: None,
            content: ItemContent::empty(kind),
            position,
            locked: false,
        }
    }

    /// Sets the title. Blank titles are dropped.
    pub fn with_title(mut self, title: Option<String>) -> Self {
        self.title = title.filter(|t| !t.trim().is_empty());
        self
    }
}

/// Partial update of a stored item. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemPatch {
    /// New cells.
    pub position: Option<Rect>,
    /// New lock state.
    pub locked: Option<bool>,
    /// New title.
    pub title: Option<String>,
    /// New payload; must match the item's kind.
    pub content: Option<ItemContent>,
}

impl ItemPatch {
    /// Patch that only moves the item.
    pub fn position(position: Rect) -> Self {
        Self {
            position: Some(position),
            ..Self::default()
        }
    }

    /// Patch that only changes the lock state.
    pub fn locked(locked: bool) -> Self {
        Self {
            locked: Some(locked),
            ..Self::default()
        }
    }

    /// Patch that only replaces the content.
    pub fn content(content: ItemContent) -> Self {
        Self {
            content: Some(content),
            ..Self::default()
        }
    }

    /// Returns `true` if the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.position.is_none()
            && self.locked.is_none()
            && self.title.is_none()
            && self.content.is_none()
    }
}

/// A named collection of bento items owned by one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workspace {
    /// Unique workspace identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Owning user.
    pub user_id: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}

/// Errors that can occur during store operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StoreError {
    /// Item was not found in the store.
    #[error("Item not found: {0}")]
    ItemNotFound(String),

    /// Workspace was not found in the store.
    #[error("Workspace not found: {0}")]
    WorkspaceNotFound(String),

    /// Content failed validation at the store boundary.
    #[error("Invalid content: {0}")]
    InvalidContent(#[from] ContentError),

    /// The backing service rejected or dropped the request.
    #[error("Store backend error: {0}")]
    Backend(String),
}

#[cfg(test)]
mod tests;
