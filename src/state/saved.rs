use super::{AppState, SAVED_KEY};
use crate::types::GeneratedQuestion;

impl AppState {
    /// Toggle-save keyed by text equality: an already-saved text is removed,
    /// anything else is prepended. Returns the new saved list.
    pub async fn toggle_save(&self, question: GeneratedQuestion) -> Vec<GeneratedQuestion> {
        let mut saved = self.saved.write().await;
        match saved.iter().position(|q| q.text == question.text) {
            Some(pos) => {
                saved.remove(pos);
            }
            None => saved.insert(0, question),
        }
        self.persist_saved(&saved);
        saved.clone()
    }

    /// Remove a saved question by id. No-op if absent.
    pub async fn remove_saved(&self, id: &str) -> Vec<GeneratedQuestion> {
        let mut saved = self.saved.write().await;
        saved.retain(|q| q.id != id);
        self.persist_saved(&saved);
        saved.clone()
    }

    fn persist_saved(&self, saved: &[GeneratedQuestion]) {
        if let Err(e) = self.store.set(SAVED_KEY, &saved) {
            tracing::error!("failed to persist saved questions: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::{AppConfig, AppState};
    use crate::types::{ChaosLevel, ContextType, GeneratedQuestion, PromptConfig};

    fn question(text: &str) -> GeneratedQuestion {
        let cfg = PromptConfig {
            context: ContextType::FriendHangout,
            chaos_level: ChaosLevel::default(),
            filters: vec![],
        };
        GeneratedQuestion::new(text.to_string(), &cfg, None)
    }

    fn config_in(dir: &tempfile::TempDir) -> AppConfig {
        AppConfig {
            spin_duration_ms: 10,
            data_dir: dir.path().to_path_buf(),
            port: 0,
        }
    }

    #[tokio::test]
    async fn test_toggle_save_is_keyed_by_text() {
        let dir = tempfile::tempdir().unwrap();
        let state = AppState::new(config_in(&dir));

        let saved = state.toggle_save(question("What's your go-to karaoke song?")).await;
        assert_eq!(saved.len(), 1);

        // Same text, different id: still treated as a duplicate and removed.
        let saved = state.toggle_save(question("What's your go-to karaoke song?")).await;
        assert!(saved.is_empty());
    }

    #[tokio::test]
    async fn test_most_recent_save_comes_first() {
        let dir = tempfile::tempdir().unwrap();
        let state = AppState::new(config_in(&dir));

        state.toggle_save(question("First?")).await;
        let saved = state.toggle_save(question("Second?")).await;
        assert_eq!(saved[0].text, "Second?");
        assert_eq!(saved[1].text, "First?");
    }

    #[tokio::test]
    async fn test_remove_saved_by_id() {
        let dir = tempfile::tempdir().unwrap();
        let state = AppState::new(config_in(&dir));

        let saved = state.toggle_save(question("Keep or toss?")).await;
        let id = saved[0].id.clone();

        let saved = state.remove_saved(&id).await;
        assert!(saved.is_empty());

        // Absent id is a no-op.
        let saved = state.remove_saved("no-such-id").await;
        assert!(saved.is_empty());
    }

    #[tokio::test]
    async fn test_saved_questions_survive_restart() {
        let dir = tempfile::tempdir().unwrap();

        {
            let state = AppState::new(config_in(&dir));
            state.toggle_save(question("Persist me?")).await;
        }

        let reloaded = AppState::new(config_in(&dir));
        let saved = reloaded.saved.read().await;
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].text, "Persist me?");
    }
}
