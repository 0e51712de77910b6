use crate::config::{FocusConfig, FocusMode};
use crate::focus::debounce::Debounce;
use crate::focus::simple::SimpleFocus;
use crate::focus::{FocusScorer, RegionScore, Signals};
use crate::region::{Point, TextRegion, Viewport};
use serde::{Deserialize, Serialize};
use tokio::time::Instant;

/// Input events from the page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PageEvent {
    /// A detection pass produced a new region set, replacing the old one
    Regions { regions: Vec<TextRegion> },
    /// The page was scrolled to a new offset
    Scroll { scroll_left: f64, scroll_top: f64 },
    /// The viewport changed size
    Resize { width: f64, height: f64 },
    /// The pointer moved to a page position
    PointerMove { x: f64, y: f64 },
    /// The user clicked inside a region
    Click { region_id: String },
}

/// Notification that a different region is now in focus
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttentionChange {
    pub region: TextRegion,
}

/// Tracks the focused region of one page session.
///
/// Scroll, resize and pointer events are coalesced through one debounce slot
/// each; a recomputation runs when a slot fires. Notifications are only
/// produced when the focused region changes identity.
#[derive(Debug)]
pub struct AttentionTracker {
    config: FocusConfig,
    scorer: FocusScorer,
    regions: Vec<TextRegion>,
    viewport: Viewport,
    pointer: Option<Point>,
    pointer_samples: usize,
    scroll: Debounce<(f64, f64)>,
    resize: Debounce<(f64, f64)>,
    pointer_move: Debounce<Point>,
    focused: Option<String>,
}

impl AttentionTracker {
    pub fn new(config: FocusConfig, viewport: Viewport) -> Self {
        let delay = config.debounce();
        Self {
            scorer: FocusScorer::from_config(&config),
            config,
            regions: Vec::new(),
            viewport,
            pointer: None,
            pointer_samples: 0,
            scroll: Debounce::new(delay),
            resize: Debounce::new(delay),
            pointer_move: Debounce::new(delay),
            focused: None,
        }
    }

    /// Feed one page event; region replacements and clicks take effect at once,
    /// everything else is deferred until [`poll`](Self::poll) fires it
    pub fn handle(&mut self, event: PageEvent, now: Instant) -> Option<AttentionChange> {
        match event {
            PageEvent::Regions { regions } => {
                ::log::debug!("Region set replaced: {} regions", regions.len());
                self.regions = regions;
                self.recompute()
            }
            PageEvent::Scroll {
                scroll_left,
                scroll_top,
            } => {
                self.scroll.schedule(now, (scroll_left, scroll_top));
                None
            }
            PageEvent::Resize { width, height } => {
                self.resize.schedule(now, (width, height));
                None
            }
            PageEvent::PointerMove { x, y } => {
                if self.config.mode == FocusMode::Weighted {
                    self.pointer_samples += 1;
                    self.pointer_move.schedule(now, Point::new(x, y));
                }
                None
            }
            PageEvent::Click { region_id } => self.click(&region_id),
        }
    }

    /// Fire every debounce slot whose deadline has passed
    pub fn poll(&mut self, now: Instant) -> Vec<AttentionChange> {
        let mut changes = Vec::new();

        if let Some((scroll_left, scroll_top)) = self.scroll.fire(now) {
            ::log::debug!("Scroll settled at ({}, {})", scroll_left, scroll_top);
            self.viewport.scroll_left = scroll_left;
            self.viewport.scroll_top = scroll_top;
            // the pointer position is stale until it moves again
            self.pointer = None;
            self.set_cursor_weight(self.config.reduced_cursor_weight);
            changes.extend(self.recompute());
        }

        if let Some((width, height)) = self.resize.fire(now) {
            ::log::debug!("Viewport resized to {}x{}", width, height);
            self.viewport.width = width;
            self.viewport.height = height;
            self.pointer = None;
            changes.extend(self.recompute());
        }

        if let Some(point) = self.pointer_move.fire(now) {
            let samples = std::mem::take(&mut self.pointer_samples);
            if samples > self.config.min_pointer_samples {
                ::log::debug!("Pointer settled at ({}, {}) after {} samples", point.x, point.y, samples);
                self.pointer = Some(point);
                self.set_cursor_weight(self.config.cursor_weight);
                changes.extend(self.recompute());
            } else {
                ::log::debug!("Ignoring pointer burst of {} samples", samples);
            }
        }

        changes
    }

    /// Earliest pending debounce deadline
    pub fn next_deadline(&self) -> Option<Instant> {
        [
            self.scroll.deadline(),
            self.resize.deadline(),
            self.pointer_move.deadline(),
        ]
        .into_iter()
        .flatten()
        .min()
    }

    pub fn focused(&self) -> Option<&TextRegion> {
        let id = self.focused.as_deref()?;
        self.regions.iter().find(|region| region.id == id)
    }

    pub fn regions(&self) -> &[TextRegion] {
        &self.regions
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn cursor_weight(&self) -> f64 {
        self.scorer.weights().cursor
    }

    /// Scores of the current visible regions under the current signals
    pub fn scores(&self) -> Vec<RegionScore> {
        self.scorer.score(&self.regions, &self.signals())
    }

    fn signals(&self) -> Signals {
        Signals {
            viewport: self.viewport,
            pointer: self.pointer,
        }
    }

    fn set_cursor_weight(&mut self, weight: f64) {
        if self.scorer.weights().cursor != weight {
            ::log::debug!("Cursor weight {} -> {}", self.scorer.weights().cursor, weight);
            self.scorer.set_cursor_weight(weight);
        }
    }

    fn click(&mut self, region_id: &str) -> Option<AttentionChange> {
        if self.config.mode != FocusMode::Simple {
            ::log::debug!("Ignoring click on {} in weighted mode", region_id);
            return None;
        }
        let index = self.regions.iter().position(|region| region.id == region_id);
        match index {
            Some(index) => self.focus(index),
            None => {
                ::log::warn!("Click on unknown region {}", region_id);
                None
            }
        }
    }

    fn recompute(&mut self) -> Option<AttentionChange> {
        let selected = match self.config.mode {
            FocusMode::Weighted => self.scorer.select(&self.regions, &self.signals()),
            FocusMode::Simple => SimpleFocus.select(&self.regions, &self.viewport),
        };
        let index = selected.and_then(|region| {
            self.regions
                .iter()
                .position(|candidate| std::ptr::eq(candidate, region))
        });

        match index {
            Some(index) => self.focus(index),
            None => {
                if self.focused.take().is_some() {
                    ::log::debug!("No visible regions, focus cleared");
                }
                None
            }
        }
    }

    fn focus(&mut self, index: usize) -> Option<AttentionChange> {
        let region = &self.regions[index];
        if self.focused.as_deref() == Some(region.id.as_str()) {
            return None;
        }
        ::log::info!("Attention moved to {}", region.id);
        self.focused = Some(region.id.clone());
        Some(AttentionChange {
            region: region.clone(),
        })
    }
}
