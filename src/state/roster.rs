use super::AppState;

impl AppState {
    /// Add a participant. Rejected adds (blank, duplicate, at capacity, or
    /// mid-spin) are silent no-ops; the returned roster is the source of truth.
    pub async fn add_player(&self, name: &str) -> Vec<String> {
        if self.spin.read().await.spinning {
            return self.player_names().await;
        }

        let mut roster = self.roster.write().await;
        if roster.add(name) {
            tracing::debug!(player = name.trim(), count = roster.len(), "participant added");
        }
        roster.names().to_vec()
    }

    /// Remove a participant by exact name. No-op if absent or mid-spin.
    pub async fn remove_player(&self, name: &str) -> Vec<String> {
        if self.spin.read().await.spinning {
            return self.player_names().await;
        }

        let mut roster = self.roster.write().await;
        if roster.remove(name) {
            tracing::debug!(player = name, count = roster.len(), "participant removed");
        }
        roster.names().to_vec()
    }

    pub async fn player_names(&self) -> Vec<String> {
        self.roster.read().await.names().to_vec()
    }
}
