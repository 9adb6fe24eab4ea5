use serde::{Deserialize, Serialize};

/// Configuration for a book player session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(default)]
pub struct PlayerConfig {
    /// Pending navigation requests kept before new ones are dropped
    pub navigation_queue_capacity: usize,

    /// Hide prev/next buttons while an activity absorbs drag or typing input
    pub hide_navigation_for_self_navigating: bool,

    /// Clear pages shown when the reader comes back to the first page after
    /// reaching the last numbered page
    pub reset_on_restart: bool,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            navigation_queue_capacity: 16,
            hide_navigation_for_self_navigating: true,
            reset_on_restart: true,
        }
    }
}

impl PlayerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_navigation_queue_capacity(mut self, capacity: usize) -> Self {
        self.navigation_queue_capacity = capacity;
        self
    }

    pub fn with_navigation_hiding(mut self, hide: bool) -> Self {
        self.hide_navigation_for_self_navigating = hide;
        self
    }

    pub fn with_reset_on_restart(mut self, reset: bool) -> Self {
        self.reset_on_restart = reset;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PlayerConfig::default();
        assert_eq!(config.navigation_queue_capacity, 16);
        assert!(config.hide_navigation_for_self_navigating);
        assert!(config.reset_on_restart);
    }

    #[test]
    fn test_builders() {
        let config = PlayerConfig::new()
            .with_navigation_queue_capacity(4)
            .with_navigation_hiding(false)
            .with_reset_on_restart(false);

        assert_eq!(config.navigation_queue_capacity, 4);
        assert!(!config.hide_navigation_for_self_navigating);
        assert!(!config.reset_on_restart);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: PlayerConfig =
            serde_json::from_value(serde_json::json!({ "reset_on_restart": false })).unwrap();

        assert_eq!(config.navigation_queue_capacity, 16);
        assert!(!config.reset_on_restart);
    }
}
