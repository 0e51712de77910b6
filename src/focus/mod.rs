// Weighted focus scoring over visible regions

pub mod debounce;
pub mod simple;
pub mod tracker;

use crate::config::FocusConfig;
use crate::region::{Point, TextRegion, Viewport};
use crate::utils::{distance, proximity};
use serde::{Deserialize, Serialize};

/// Weights of the three attention signals
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FocusWeights {
    pub size: f64,
    pub top_left: f64,
    pub cursor: f64,
}

impl Default for FocusWeights {
    fn default() -> Self {
        Self {
            size: 0.1,
            top_left: 1.0,
            cursor: 3.0,
        }
    }
}

impl From<&FocusConfig> for FocusWeights {
    fn from(config: &FocusConfig) -> Self {
        Self {
            size: config.size_weight,
            top_left: config.top_left_weight,
            cursor: config.cursor_weight,
        }
    }
}

/// Live signals a scoring pass is computed against
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Signals {
    pub viewport: Viewport,
    /// Last known pointer position in page coordinates, if recent
    pub pointer: Option<Point>,
}

impl Signals {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            pointer: None,
        }
    }

    pub fn with_pointer(mut self, pointer: Point) -> Self {
        self.pointer = Some(pointer);
        self
    }
}

/// Per-region result of one scoring pass
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionScore {
    /// Position of the region in the scored slice
    #[serde(skip)]
    pub index: usize,
    pub id: String,
    /// Area relative to the largest visible region
    pub size_relation: f64,
    /// Inverse normalized distance from the viewport's top-left corner
    pub top_left_proximity: f64,
    /// Inverse normalized distance from the pointer, 0 when unknown
    pub cursor_proximity: f64,
    pub attention_score: f64,
}

impl RegionScore {
    /// Weighted sum of the three signals
    pub fn weighted(&self, weights: &FocusWeights) -> f64 {
        weights.size * self.size_relation
            + weights.top_left * self.top_left_proximity
            + weights.cursor * self.cursor_proximity
    }
}

/// Weighted attention model over a set of regions
#[derive(Debug, Clone, Default)]
pub struct FocusScorer {
    weights: FocusWeights,
}

impl FocusScorer {
    pub fn new(weights: FocusWeights) -> Self {
        Self { weights }
    }

    pub fn from_config(config: &FocusConfig) -> Self {
        Self::new(FocusWeights::from(config))
    }

    pub fn weights(&self) -> &FocusWeights {
        &self.weights
    }

    /// Change the pointer weight, e.g. while the pointer position is stale
    pub fn set_cursor_weight(&mut self, weight: f64) {
        self.weights.cursor = weight;
    }

    /// Score every visible region, in input order
    pub fn score(&self, regions: &[TextRegion], signals: &Signals) -> Vec<RegionScore> {
        let viewport = &signals.viewport;
        let diagonal = viewport.diagonal();

        let visible: Vec<(usize, &TextRegion)> = regions
            .iter()
            .enumerate()
            .filter(|(_, region)| region.is_visible(viewport))
            .collect();

        let biggest_area = visible
            .iter()
            .map(|(_, region)| region.area())
            .fold(0.0, f64::max);

        visible
            .into_iter()
            .map(|(index, region)| {
                let size_relation = if biggest_area > 0.0 {
                    region.area() / biggest_area
                } else {
                    0.0
                };
                let top_left_proximity = proximity(top_left_distance(region, viewport), diagonal);
                let cursor_proximity = signals
                    .pointer
                    .map(|pointer| proximity(distance(region.bottom_left(), pointer), diagonal))
                    .unwrap_or(0.0);

                let mut score = RegionScore {
                    index,
                    id: region.id.clone(),
                    size_relation,
                    top_left_proximity,
                    cursor_proximity,
                    attention_score: 0.0,
                };
                score.attention_score = score.weighted(&self.weights);
                score
            })
            .collect()
    }

    /// The visible region with the highest attention score, first one on ties
    pub fn select<'a>(&self, regions: &'a [TextRegion], signals: &Signals) -> Option<&'a TextRegion> {
        let scores = self.score(regions, signals);
        best(&scores).map(|score| &regions[score.index])
    }
}

/// Highest-scoring entry; the earliest wins ties
pub fn best(scores: &[RegionScore]) -> Option<&RegionScore> {
    let mut best: Option<&RegionScore> = None;
    for score in scores {
        if best.is_none_or(|current| score.attention_score > current.attention_score) {
            best = Some(score);
        }
    }
    best
}

/// Distance from the viewport's top-left corner to the region's top-left corner.
///
/// A region whose top was already scrolled past is treated as a full viewport
/// height away vertically.
pub(crate) fn top_left_distance(region: &TextRegion, viewport: &Viewport) -> f64 {
    let left = region.geometry.left - viewport.scroll_left;
    let mut top = region.geometry.top - viewport.scroll_top;
    if top < 0.0 {
        top = viewport.height;
    }
    left.hypot(top)
}

/// Score the regions with the default weights and return the focused region's id
pub fn score_and_select<'a>(regions: &'a [TextRegion], signals: &Signals) -> Option<&'a str> {
    FocusScorer::default()
        .select(regions, signals)
        .map(|region| region.id.as_str())
}
