use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Sum window worth two points.
    pub sum_range: (u32, u32),
    /// Wider sum window worth one point.
    pub loose_sum_range: (u32, u32),
    /// Historical mean sum; `all` recommends the candidate closest to it.
    pub reference_sum: u32,
    pub target_evens: usize,
    /// Draws considered "recent" when deriving a table from history.
    pub recent_window: usize,
    /// Length of every hot/cold list.
    pub list_len: usize,
    pub max_high_numbers: usize,
    pub min_hot_hits: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            sum_range: (120, 180),
            loose_sum_range: (100, 200),
            reference_sum: 149,
            target_evens: 3,
            recent_window: 100,
            list_len: 10,
            max_high_numbers: 1,
            min_hot_hits: 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GeneratorConfig::default();
        assert_eq!(config.sum_range, (120, 180));
        assert_eq!(config.loose_sum_range, (100, 200));
        assert_eq!(config.target_evens, 3);
        assert_eq!(config.reference_sum, 149);
    }

    #[test]
    fn test_config_from_partial_json_fails() {
        assert!(serde_json::from_str::<GeneratorConfig>(r#"{"target_evens": 3}"#).is_err());
    }
}
