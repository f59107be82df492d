use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Expansion state
// ---------------------------------------------------------------------------

/// Which folder and subfolder rows are currently expanded.
///
/// Pure UI state owned and persisted by the host -- the availability engine
/// and the project aggregator never consult it. It lives here only so every
/// consumer shares one key format and one serialized shape.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExpansionState {
    expanded: BTreeSet<String>,
}

/// Key for a group or subgroup row: `"Mixers"` or `"Mixers/Digital Mixers"`.
pub fn group_key(main_group: &str, sub_group: Option<&str>) -> String {
    match sub_group {
        Some(sub) => format!("{main_group}/{sub}"),
        None => main_group.to_string(),
    }
}

impl ExpansionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn expand(&mut self, key: impl Into<String>) {
        self.expanded.insert(key.into());
    }

    pub fn collapse(&mut self, key: &str) {
        self.expanded.remove(key);
    }

    /// Flip a row and return its new state.
    pub fn toggle(&mut self, key: &str) -> bool {
        if self.expanded.remove(key) {
            false
        } else {
            self.expanded.insert(key.to_string());
            true
        }
    }

    pub fn is_expanded(&self, key: &str) -> bool {
        self.expanded.contains(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.expanded.iter().map(String::as_str)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_use_slash_separated_paths() {
        assert_eq!(group_key("Mixers", None), "Mixers");
        assert_eq!(group_key("Mixers", Some("Digital Mixers")), "Mixers/Digital Mixers");
    }

    #[test]
    fn toggle_flips_and_reports_new_state() {
        let mut state = ExpansionState::new();
        assert!(state.toggle("Mixers"));
        assert!(state.is_expanded("Mixers"));
        assert!(!state.toggle("Mixers"));
        assert!(!state.is_expanded("Mixers"));
    }

    #[test]
    fn collapse_is_idempotent() {
        let mut state = ExpansionState::new();
        state.expand("Sound");
        state.collapse("Sound");
        state.collapse("Sound");
        assert!(!state.is_expanded("Sound"));
    }

    #[test]
    fn serde_round_trip_preserves_keys() {
        let mut state = ExpansionState::new();
        state.expand("Mixers");
        state.expand("Mixers/Digital Mixers");

        let json = serde_json::to_string(&state).unwrap();
        let restored: ExpansionState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, restored);
        assert_eq!(restored.keys().count(), 2);
    }
}
