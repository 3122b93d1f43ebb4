//! Participant roster for spin mode: ordered, de-duplicated, bounded.

/// Maximum number of participants in the circle
pub const MAX_PLAYERS: usize = 12;
/// Minimum roster size for a spin
pub const MIN_PLAYERS: usize = 2;
/// Longest accepted display name, in characters
pub const MAX_NAME_CHARS: usize = 15;

/// Insertion-ordered list of distinct participant names.
///
/// Never persisted; it lives for the duration of the session. Rejected
/// mutations are silent no-ops, matching the view's disabled-control
/// enforcement rather than an error channel.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    players: Vec<String>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a trimmed name. Returns false (leaving the roster unchanged)
    /// if the name is blank, too long, already present, or the roster is full.
    pub fn add(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() || name.chars().count() > MAX_NAME_CHARS {
            return false;
        }
        if self.players.len() >= MAX_PLAYERS {
            return false;
        }
        if self.players.iter().any(|p| p == name) {
            return false;
        }
        self.players.push(name.to_string());
        true
    }

    /// Remove the entry exactly equal to `name`. No-op if absent.
    pub fn remove(&mut self, name: &str) -> bool {
        match self.players.iter().position(|p| p == name) {
            Some(pos) => {
                self.players.remove(pos);
                true
            }
            None => false,
        }
    }

    pub fn names(&self) -> &[String] {
        &self.players
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Whether a spin is allowed to start
    pub fn can_spin(&self) -> bool {
        self.players.len() >= MIN_PLAYERS
    }
}
