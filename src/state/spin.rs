use serde::Serialize;
use std::time::Duration;

use super::AppState;
use crate::questions::{self, NOT_CONFIGURED_MESSAGE, TARGETED_FAILED_MESSAGE};
use crate::spin::{normalize, plan_spin, SpinError};
use crate::types::{GeneratedQuestion, PromptConfig};

/// What the view needs to run the wheel animation
#[derive(Debug, Clone, Serialize)]
pub struct SpinStarted {
    /// New cumulative rotation angle to animate to, in degrees
    pub rotation: f64,
    /// Animation duration the completion timer is synchronized with
    pub duration_ms: u64,
}

#[derive(Debug, thiserror::Error)]
pub enum StartSpinError {
    #[error(transparent)]
    Spin(#[from] SpinError),

    #[error("a spin is already in progress")]
    AlreadySpinning,

    #[error("a question request is still in progress")]
    Busy,
}

impl AppState {
    /// Start a spin: pick the winner, commit the new rotation synchronously,
    /// and resolve the winner's question after the animation delay. The
    /// winner is captured here, never recomputed, so the completion always
    /// reports who was selected at spin start.
    pub async fn start_spin(&self, cfg: PromptConfig) -> Result<SpinStarted, StartSpinError> {
        let plan = {
            let roster = self.roster.read().await;
            // Same lock order as generate_list (spin, then generating): holding
            // the spin lock across the generating check and the commit keeps a
            // concurrent generation from slipping in between them.
            let mut spin = self.spin.write().await;
            if spin.spinning {
                return Err(StartSpinError::AlreadySpinning);
            }
            if *self.generating.read().await {
                return Err(StartSpinError::Busy);
            }

            let mut rng = rand::rng();
            let plan = plan_spin(&mut rng, roster.names(), spin.rotation)?;
            spin.spinning = true;
            spin.rotation = plan.rotation;
            plan
        };

        *self.last_error.write().await = None;
        *self.targeted.write().await = None;
        tracing::info!(winner = %plan.winner, rotation = plan.rotation, "spin started");

        let state = self.clone();
        let duration = Duration::from_millis(self.config.spin_duration_ms);
        tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            state.finish_spin(plan.winner, cfg).await;
        });

        Ok(SpinStarted {
            rotation: plan.rotation,
            duration_ms: self.config.spin_duration_ms,
        })
    }

    /// Runs exactly once per spin, after the animation timer elapses
    async fn finish_spin(&self, winner: String, cfg: PromptConfig) {
        // Become "generating" before the spinning flag drops so there is no
        // window in which a second spin could slip through.
        *self.generating.write().await = true;
        {
            let mut spin = self.spin.write().await;
            spin.spinning = false;
            // Fold the resting angle back into [0, 360) so the cumulative
            // value cannot grow into float-precision territory.
            spin.rotation = normalize(spin.rotation);
        }

        let result = match &self.llm {
            Some(llm) => questions::generate_targeted_question(llm, &winner, &cfg)
                .await
                .map_err(|e| {
                    tracing::error!("targeted generation failed: {}", e);
                    TARGETED_FAILED_MESSAGE.to_string()
                }),
            None => Err(NOT_CONFIGURED_MESSAGE.to_string()),
        };

        match result {
            Ok(text) => {
                let question = GeneratedQuestion::new(text, &cfg, Some(winner.clone()));
                *self.targeted.write().await = Some(question);
                tracing::info!(winner = %winner, "targeted question ready");
            }
            Err(message) => {
                *self.last_error.write().await = Some(message);
            }
        }

        *self.generating.write().await = false;
    }
}
