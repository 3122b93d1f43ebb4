mod roster;
mod saved;
mod spin;

pub use spin::{SpinStarted, StartSpinError};

use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::llm::LlmManager;
use crate::questions::{self, LIST_FAILED_MESSAGE, NOT_CONFIGURED_MESSAGE};
use crate::roster::Roster;
use crate::store::KvStore;
use crate::types::{GeneratedQuestion, PromptConfig};

/// Storage key for the saved-questions collection
pub const SAVED_KEY: &str = "icebreaker_saved";

/// Runtime knobs loaded from the environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Wheel animation duration; the completion timer fires after this long
    pub spin_duration_ms: u64,
    /// Directory holding the persistent store file
    pub data_dir: PathBuf,
    /// HTTP listen port
    pub port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            spin_duration_ms: crate::spin::SPIN_DURATION_MS,
            data_dir: PathBuf::from("data"),
            // 7366 is ascii for "IB"
            port: 7366,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(dir) = std::env::var("ICEBREAKER_DATA_DIR") {
            let trimmed = dir.trim();
            if !trimmed.is_empty() {
                config.data_dir = PathBuf::from(trimmed);
            }
        }
        if let Some(port) = std::env::var("PORT").ok().and_then(|s| s.parse().ok()) {
            config.port = port;
        }

        config
    }
}

/// Rotation angle plus the in-flight flag for the bottle wheel
#[derive(Debug, Clone, Default)]
pub struct SpinState {
    /// Cumulative rotation in degrees, congruent to the winner's segment
    /// center mod 360 once a spin has been committed
    pub rotation: f64,
    /// True for the animation duration after a spin starts
    pub spinning: bool,
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub roster: Arc<RwLock<Roster>>,
    pub spin: Arc<RwLock<SpinState>>,
    /// Last batch of list-mode questions
    pub questions: Arc<RwLock<Vec<GeneratedQuestion>>>,
    /// Result of the most recently completed spin
    pub targeted: Arc<RwLock<Option<GeneratedQuestion>>>,
    /// Saved questions, most recently saved first
    pub saved: Arc<RwLock<Vec<GeneratedQuestion>>>,
    /// True while a generation request is outstanding
    pub generating: Arc<RwLock<bool>>,
    /// Last user-visible failure, cleared when a new action starts
    pub last_error: Arc<RwLock<Option<String>>>,
    pub store: Arc<KvStore>,
    pub llm: Option<Arc<LlmManager>>,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let store = KvStore::new(config.data_dir.join("store.json"));
        let saved: Vec<GeneratedQuestion> = store.get_or(SAVED_KEY, Vec::new());
        if !saved.is_empty() {
            tracing::info!("loaded {} saved questions", saved.len());
        }

        Self {
            roster: Arc::new(RwLock::new(Roster::new())),
            spin: Arc::new(RwLock::new(SpinState::default())),
            questions: Arc::new(RwLock::new(Vec::new())),
            targeted: Arc::new(RwLock::new(None)),
            saved: Arc::new(RwLock::new(saved)),
            generating: Arc::new(RwLock::new(false)),
            last_error: Arc::new(RwLock::new(None)),
            store: Arc::new(store),
            llm: None,
            config,
        }
    }

    pub fn with_llm(mut self, llm: Option<LlmManager>) -> Self {
        self.llm = llm.map(Arc::new);
        self
    }

    /// Everything the view needs to render, in one read
    pub async fn snapshot(&self) -> StateSnapshot {
        let spin = self.spin.read().await.clone();
        StateSnapshot {
            players: self.roster.read().await.names().to_vec(),
            rotation: spin.rotation,
            spinning: spin.spinning,
            generating: *self.generating.read().await,
            questions: self.questions.read().await.clone(),
            targeted: self.targeted.read().await.clone(),
            saved: self.saved.read().await.clone(),
            error: self.last_error.read().await.clone(),
        }
    }

    /// Run a list-mode generation and replace the displayed batch.
    /// Only one generation or spin may be in flight at a time.
    pub async fn generate_list(
        &self,
        cfg: PromptConfig,
    ) -> Result<Vec<GeneratedQuestion>, GenerateListError> {
        {
            let spin = self.spin.read().await;
            let mut generating = self.generating.write().await;
            if spin.spinning || *generating {
                return Err(GenerateListError::Busy);
            }
            *generating = true;
        }

        *self.last_error.write().await = None;
        // Switching back to list mode discards any spin result on display.
        *self.targeted.write().await = None;

        let result = match &self.llm {
            Some(llm) => questions::generate_question_list(llm, &cfg)
                .await
                .map_err(|e| {
                    tracing::error!("list generation failed: {}", e);
                    LIST_FAILED_MESSAGE.to_string()
                }),
            None => Err(NOT_CONFIGURED_MESSAGE.to_string()),
        };

        let outcome = match result {
            Ok(texts) => {
                let batch: Vec<GeneratedQuestion> = texts
                    .into_iter()
                    .map(|text| GeneratedQuestion::new(text, &cfg, None))
                    .collect();
                *self.questions.write().await = batch.clone();
                tracing::info!(count = batch.len(), context = %cfg.context, "question batch ready");
                Ok(batch)
            }
            Err(message) => {
                *self.questions.write().await = Vec::new();
                *self.last_error.write().await = Some(message.clone());
                Err(GenerateListError::Failed(message))
            }
        };

        *self.generating.write().await = false;
        outcome
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GenerateListError {
    #[error("another request is in progress")]
    Busy,

    #[error("{0}")]
    Failed(String),
}

/// Serializable view of the whole session state
#[derive(Debug, Clone, Serialize)]
pub struct StateSnapshot {
    pub players: Vec<String>,
    pub rotation: f64,
    pub spinning: bool,
    pub generating: bool,
    pub questions: Vec<GeneratedQuestion>,
    pub targeted: Option<GeneratedQuestion>,
    pub saved: Vec<GeneratedQuestion>,
    pub error: Option<String>,
}
