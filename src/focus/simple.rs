use crate::region::{TextRegion, Viewport};

/// Focus by position alone: the visible region closest to the viewport's
/// top-left corner is the one being read.
///
/// Used for click-driven selection, where an explicit click on a region
/// overrides whatever this computes (see [`super::tracker::AttentionTracker`]).
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleFocus;

impl SimpleFocus {
    /// Raw distance of the region's top-left corner from the viewport's.
    ///
    /// Regions whose top was scrolled past are pushed a further viewport height
    /// up, so they lose against anything still on screen.
    pub fn distance(region: &TextRegion, viewport: &Viewport) -> f64 {
        let left = region.geometry.left - viewport.scroll_left;
        let mut top = region.geometry.top - viewport.scroll_top;
        if top < 0.0 {
            top -= viewport.height;
        }
        left.hypot(top)
    }

    /// Closest visible region, first one on ties
    pub fn select<'a>(&self, regions: &'a [TextRegion], viewport: &Viewport) -> Option<&'a TextRegion> {
        let mut best: Option<(&TextRegion, f64)> = None;
        for region in regions.iter().filter(|r| r.is_visible(viewport)) {
            let distance = Self::distance(region, viewport);
            if best.is_none_or(|(_, closest)| distance < closest) {
                best = Some((region, distance));
            }
        }
        best.map(|(region, _)| region)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::Rect;

    #[test]
    fn test_closest_to_top_left_wins() {
        let regions = vec![
            TextRegion::new("wide", "x", Rect::new(0.0, 400.0, 900.0, 300.0)),
            TextRegion::new("small", "x", Rect::new(50.0, 20.0, 100.0, 40.0)),
        ];
        let viewport = Viewport::new(1000.0, 800.0);
        assert_eq!(SimpleFocus.select(&regions, &viewport).unwrap().id, "small");
    }

    #[test]
    fn test_scrolled_past_loses() {
        let viewport = Viewport::new(1000.0, 800.0).scrolled_to(0.0, 1000.0);
        let regions = vec![
            // 10 units above the viewport top
            TextRegion::new("past", "x", Rect::new(0.0, 990.0, 500.0, 400.0)),
            TextRegion::new("below", "x", Rect::new(0.0, 1500.0, 500.0, 100.0)),
        ];
        assert_eq!(SimpleFocus::distance(&regions[0], &viewport), 810.0);
        assert_eq!(SimpleFocus::distance(&regions[1], &viewport), 500.0);
        assert_eq!(SimpleFocus.select(&regions, &viewport).unwrap().id, "below");
    }

    #[test]
    fn test_nothing_visible() {
        let regions = vec![TextRegion::new("a", "x", Rect::new(0.0, 3000.0, 10.0, 10.0))];
        assert!(SimpleFocus.select(&regions, &Viewport::new(100.0, 100.0)).is_none());
        assert!(SimpleFocus.select(&[], &Viewport::new(100.0, 100.0)).is_none());
    }
}
