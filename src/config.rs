use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::Duration;

/// How the focused region is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FocusMode {
    /// Weighted size / top-left / cursor model
    #[default]
    Weighted,
    /// Distance to the top-left corner only, clicks override
    Simple,
}

/// Configuration for focus scoring and event handling
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FocusConfig {
    /// Weight of the size relation
    #[serde(default = "default_size_weight")]
    pub size_weight: f64,

    /// Weight of the proximity to the viewport's top-left corner
    #[serde(default = "default_top_left_weight")]
    pub top_left_weight: f64,

    /// Weight of the proximity to the pointer
    #[serde(default = "default_cursor_weight")]
    pub cursor_weight: f64,

    /// Cursor weight reported between a scroll and the next qualifying pointer
    /// burst. The pointer is cleared on scroll, so cursor proximity is 0 during
    /// that time and this value does not change any attention score.
    #[serde(default = "default_reduced_cursor_weight")]
    pub reduced_cursor_weight: f64,

    /// Quiescence interval for scroll, resize and pointer bursts
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Pointer samples a burst must exceed before the pointer counts again
    #[serde(default = "default_min_pointer_samples")]
    pub min_pointer_samples: usize,

    #[serde(default)]
    pub mode: FocusMode,
}

/// Configuration for the fallback keyword ranker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankerConfig {
    /// Upper bound on propagation rounds
    #[serde(default = "default_max_iter")]
    pub max_iter: usize,

    #[serde(default = "default_damping")]
    pub damping: f64,

    /// Convergence budget, divided by the node count
    #[serde(default = "default_delta")]
    pub delta: f64,

    /// Co-occurrence window in tokens (a token links to the next `window - 1`)
    #[serde(default = "default_window")]
    pub window: usize,

    /// Number of ranked terms taken when the caller does not say
    #[serde(default = "default_k")]
    pub default_k: usize,

    /// Candidate lists up to this size are returned without ranking
    #[serde(default = "default_listing_threshold")]
    pub listing_threshold: usize,

    /// Ranked results smaller than this fall back to the full candidate list
    #[serde(default = "default_min_mapped_keywords")]
    pub min_mapped_keywords: usize,

    /// Minimum length of the first token of a candidate
    #[serde(default = "default_min_head_len")]
    pub min_head_len: usize,

    /// Minimum length of the following tokens of a compound candidate
    #[serde(default = "default_min_tail_len")]
    pub min_tail_len: usize,

    /// Minimum length of a (compound) candidate to be kept
    #[serde(default = "default_min_compound_len")]
    pub min_compound_len: usize,

    /// Minimum length of a token to become a graph node
    #[serde(default = "default_min_node_len")]
    pub min_node_len: usize,

    /// Texts with fewer pieces than this become a single keyword
    #[serde(default = "default_short_text_tokens")]
    pub short_text_tokens: usize,

    /// How many raw tokens the last-resort dump emits
    #[serde(default = "default_token_dump_count")]
    pub token_dump_count: usize,

    /// Minimum length of a raw token in the last-resort dump
    #[serde(default = "default_token_dump_min_len")]
    pub token_dump_min_len: usize,
}

/// Top-level configuration file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub focus: FocusConfig,

    #[serde(default)]
    pub ranker: RankerConfig,
}

impl Config {
    /// Load configuration from a file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.focus.validate()?;
        self.ranker.validate()
    }
}

impl FocusConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn validate(&self) -> Result<()> {
        let weights = [
            ("size_weight", self.size_weight),
            ("top_left_weight", self.top_left_weight),
            ("cursor_weight", self.cursor_weight),
            ("reduced_cursor_weight", self.reduced_cursor_weight),
        ];
        for (name, value) in weights {
            if !(value.is_finite() && value >= 0.0) {
                return Err(Error::InvalidConfig(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }
        Ok(())
    }
}

impl RankerConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.damping > 0.0 && self.damping < 1.0) {
            return Err(Error::InvalidConfig(format!(
                "damping must be in (0, 1), got {}",
                self.damping
            )));
        }
        if self.window < 2 {
            return Err(Error::InvalidConfig(format!(
                "window must be at least 2, got {}",
                self.window
            )));
        }
        if self.max_iter == 0 {
            return Err(Error::InvalidConfig("max_iter must be at least 1".into()));
        }
        if !(self.delta.is_finite() && self.delta > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "delta must be positive, got {}",
                self.delta
            )));
        }
        Ok(())
    }
}

impl Default for FocusConfig {
    fn default() -> Self {
        Self {
            size_weight: default_size_weight(),
            top_left_weight: default_top_left_weight(),
            cursor_weight: default_cursor_weight(),
            reduced_cursor_weight: default_reduced_cursor_weight(),
            debounce_ms: default_debounce_ms(),
            min_pointer_samples: default_min_pointer_samples(),
            mode: FocusMode::default(),
        }
    }
}

impl Default for RankerConfig {
    fn default() -> Self {
        Self {
            max_iter: default_max_iter(),
            damping: default_damping(),
            delta: default_delta(),
            window: default_window(),
            default_k: default_k(),
            listing_threshold: default_listing_threshold(),
            min_mapped_keywords: default_min_mapped_keywords(),
            min_head_len: default_min_head_len(),
            min_tail_len: default_min_tail_len(),
            min_compound_len: default_min_compound_len(),
            min_node_len: default_min_node_len(),
            short_text_tokens: default_short_text_tokens(),
            token_dump_count: default_token_dump_count(),
            token_dump_min_len: default_token_dump_min_len(),
        }
    }
}

fn default_size_weight() -> f64 {
    0.1
}

fn default_top_left_weight() -> f64 {
    1.0
}

fn default_cursor_weight() -> f64 {
    3.0
}

fn default_reduced_cursor_weight() -> f64 {
    0.2
}

fn default_debounce_ms() -> u64 {
    100
}

fn default_min_pointer_samples() -> usize {
    10
}

fn default_max_iter() -> usize {
    100
}

fn default_damping() -> f64 {
    0.85
}

fn default_delta() -> f64 {
    0.5
}

fn default_window() -> usize {
    3
}

fn default_k() -> usize {
    10
}

fn default_listing_threshold() -> usize {
    10
}

fn default_min_mapped_keywords() -> usize {
    4
}

fn default_min_head_len() -> usize {
    3
}

fn default_min_tail_len() -> usize {
    2
}

fn default_min_compound_len() -> usize {
    5
}

fn default_min_node_len() -> usize {
    4
}

fn default_short_text_tokens() -> usize {
    5
}

fn default_token_dump_count() -> usize {
    10
}

fn default_token_dump_min_len() -> usize {
    4
}
