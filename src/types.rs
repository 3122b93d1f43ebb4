use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque ID type for generated questions
pub type QuestionId = String;

/// Social setting that frames the generated questions
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ContextType {
    FirstDate,
    FriendHangout,
    Classmates,
    Networking,
    GroupParty,
}

impl ContextType {
    /// Display label as shown in the view and in prompts
    pub fn label(&self) -> &'static str {
        match self {
            ContextType::FirstDate => "First Date 💘",
            ContextType::FriendHangout => "Friend Hangout 🧋",
            ContextType::Classmates => "New Classmates 🏫",
            ContextType::Networking => "Networking 👔",
            ContextType::GroupParty => "Group Party 🎉",
        }
    }
}

impl fmt::Display for ContextType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Tone intensity from 1 (wholesome) to 5 (maximally provocative-but-safe)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(try_from = "u8", into = "u8")]
pub struct ChaosLevel(u8);

impl ChaosLevel {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(level: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&level).then_some(Self(level))
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for ChaosLevel {
    fn default() -> Self {
        Self(3)
    }
}

impl TryFrom<u8> for ChaosLevel {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("chaos level must be 1-5, got {}", value))
    }
}

impl From<ChaosLevel> for u8 {
    fn from(level: ChaosLevel) -> u8 {
        level.0
    }
}

/// Optional tag further constraining question style
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum VibeFilter {
    SmallTalk,
    Deep,
    Silly,
    Unhinged,
    Philosophical,
}

impl VibeFilter {
    pub fn label(&self) -> &'static str {
        match self {
            VibeFilter::SmallTalk => "Small Talk",
            VibeFilter::Deep => "Deep",
            VibeFilter::Silly => "Silly",
            VibeFilter::Unhinged => "Unhinged",
            VibeFilter::Philosophical => "Philosophical",
        }
    }
}

impl fmt::Display for VibeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Parameter bundle for both generation operations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptConfig {
    pub context: ContextType,
    #[serde(default)]
    pub chaos_level: ChaosLevel,
    #[serde(default)]
    pub filters: Vec<VibeFilter>,
}

/// A single generated icebreaker question
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedQuestion {
    pub id: QuestionId,
    pub text: String,
    pub context: ContextType,
    pub chaos_level: ChaosLevel,
    pub filters: Vec<VibeFilter>,
    /// ISO8601 creation timestamp
    pub created_at: String,
    /// Set only for spin-mode results
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_person: Option<String>,
}

impl GeneratedQuestion {
    /// Create a question from generated text and the parameters that produced it
    pub fn new(text: String, cfg: &PromptConfig, target_person: Option<String>) -> Self {
        Self {
            id: ulid::Ulid::new().to_string(),
            text,
            context: cfg.context,
            chaos_level: cfg.chaos_level,
            filters: cfg.filters.clone(),
            created_at: chrono::Utc::now().to_rfc3339(),
            target_person,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chaos_level_bounds() {
        assert!(ChaosLevel::new(0).is_none());
        assert!(ChaosLevel::new(6).is_none());
        assert_eq!(ChaosLevel::new(1).unwrap().get(), 1);
        assert_eq!(ChaosLevel::new(5).unwrap().get(), 5);
        assert_eq!(ChaosLevel::default().get(), 3);
    }

    #[test]
    fn test_chaos_level_deserialization_rejects_out_of_range() {
        let ok: Result<ChaosLevel, _> = serde_json::from_str("4");
        assert_eq!(ok.unwrap().get(), 4);

        let err: Result<ChaosLevel, _> = serde_json::from_str("9");
        assert!(err.is_err());
    }

    #[test]
    fn test_prompt_config_defaults() {
        let cfg: PromptConfig = serde_json::from_str(r#"{"context":"first_date"}"#).unwrap();
        assert_eq!(cfg.context, ContextType::FirstDate);
        assert_eq!(cfg.chaos_level.get(), 3);
        assert!(cfg.filters.is_empty());
    }

    #[test]
    fn test_question_round_trips_target_person() {
        let cfg = PromptConfig {
            context: ContextType::GroupParty,
            chaos_level: ChaosLevel::default(),
            filters: vec![VibeFilter::Silly],
        };
        let q = GeneratedQuestion::new(
            "Who here would survive a zombie apocalypse?".into(),
            &cfg,
            Some("Bob".into()),
        );

        let json = serde_json::to_string(&q).unwrap();
        let back: GeneratedQuestion = serde_json::from_str(&json).unwrap();
        assert_eq!(back.target_person.as_deref(), Some("Bob"));
        assert_eq!(back.id, q.id);
    }
}
