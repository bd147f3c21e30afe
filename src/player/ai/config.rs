use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::time::Duration;

static GLOBAL_CONFIG: Lazy<AIConfig> = Lazy::new(AIConfig::load_or_default);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AIConfig {
    pub version: String,
    pub evaluation: EvaluationConfig,
    pub search: SearchConfig,
}

/// Weights of the three evaluation components.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationConfig {
    pub score_weight: i32,
    pub divercite_weight: i32,
    pub center_weight: i32,
}

/// Depth policy: the remaining clock is bucketed into three depths. First
/// matching threshold wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    pub high_time_secs: u64,
    pub medium_time_secs: u64,
    pub high_depth: u32,
    pub medium_depth: u32,
    pub low_depth: u32,
}

impl SearchConfig {
    /// Map the remaining clock to a maximum search depth. Consulted once
    /// per move, never mid-search.
    pub fn depth_for(&self, remaining: Duration) -> u32 {
        let secs = remaining.as_secs_f64();
        if secs >= self.high_time_secs as f64 {
            self.high_depth
        } else if secs >= self.medium_time_secs as f64 {
            self.medium_depth
        } else {
            self.low_depth
        }
    }
}

impl AIConfig {
    pub fn load() -> anyhow::Result<Self> {
        let config_str = std::fs::read_to_string("ai_config.json")?;
        let config: AIConfig = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|_| Self::default())
    }

    /// Cached process-wide copy. Constructors clone from it, so each AI
    /// instance owns its configuration and tuned variants can coexist.
    pub fn get() -> &'static AIConfig {
        &GLOBAL_CONFIG
    }
}

impl Default for AIConfig {
    fn default() -> Self {
        AIConfig {
            version: "1.0".to_string(),
            evaluation: EvaluationConfig {
                score_weight: 10,
                divercite_weight: 5,
                center_weight: 5,
            },
            search: SearchConfig {
                high_time_secs: 600,
                medium_time_secs: 300,
                high_depth: 4,
                medium_depth: 3,
                low_depth: 2,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn depth(secs: u64) -> u32 {
        AIConfig::default()
            .search
            .depth_for(Duration::from_secs(secs))
    }

    #[test]
    fn depth_thresholds() {
        assert_eq!(depth(600), 4);
        assert_eq!(depth(599), 3);
        assert_eq!(depth(300), 3);
        assert_eq!(depth(299), 2);
        assert_eq!(depth(0), 2);
        assert_eq!(depth(3600), 4);
    }

    #[test]
    fn depth_is_monotone_in_time() {
        let mut last = 0;
        for secs in 0..1200 {
            let d = depth(secs);
            assert!(d >= last, "depth dropped at {}s", secs);
            last = d;
        }
    }

    #[test]
    fn default_weights() {
        let config = AIConfig::default();
        assert_eq!(config.evaluation.score_weight, 10);
        assert_eq!(config.evaluation.divercite_weight, 5);
        assert_eq!(config.evaluation.center_weight, 5);
    }
}
