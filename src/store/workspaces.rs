//! Workspace records of the MemoryStore.

use super::MemoryStore;
use crate::Workspace;
use chrono::Utc;

impl MemoryStore {
    /// Creates a workspace owned by `user_id`.
    ///
    /// Names are not required to be unique.
    pub async fn create_workspace(&self, name: &str, user_id: &str) -> Workspace {
        let now = Utc::now();
        let workspace = Workspace {
            id: format!("ws-{}", self.next_seq()),
            name: name.trim().to_string(),
            user_id: user_id.to_string(),
            created_at: now,
            updated_at: now,
        };
        self.workspaces.write().await.push(workspace.clone());
        tracing::info!(id = %workspace.id, name = %workspace.name, "created workspace");
        workspace
    }

    /// Workspaces owned by `user_id`, oldest first.
    pub async fn list_workspaces(&self, user_id: &str) -> Vec<Workspace> {
        let workspaces = self.workspaces.read().await;
        workspaces
            .iter()
            .filter(|w| w.user_id == user_id)
            .cloned()
            .collect()
    }

    /// Retrieves a workspace by id.
    pub async fn get_workspace(&self, id: &str) -> Option<Workspace> {
        let workspaces = self.workspaces.read().await;
        workspaces.iter().find(|w| w.id == id).cloned()
    }

    pub(super) async fn has_workspace(&self, id: &str) -> bool {
        self.workspaces.read().await.iter().any(|w| w.id == id)
    }
}
