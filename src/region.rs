use serde::{Deserialize, Serialize};

/// Axis-aligned box in page coordinates (device-independent units)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// A point in page coordinates, e.g. the pointer position
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// The visible window onto the page
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Viewport {
    #[serde(default)]
    pub scroll_left: f64,
    #[serde(default)]
    pub scroll_top: f64,
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            scroll_left: 0.0,
            scroll_top: 0.0,
            width,
            height,
        }
    }

    pub fn scrolled_to(mut self, scroll_left: f64, scroll_top: f64) -> Self {
        self.scroll_left = scroll_left;
        self.scroll_top = scroll_top;
        self
    }

    /// Length of the viewport diagonal, the normalizer for all distances
    pub fn diagonal(&self) -> f64 {
        self.width.hypot(self.height)
    }

    /// Bottom edge of the viewport in page coordinates
    pub fn scroll_bottom(&self) -> f64 {
        self.scroll_top + self.height
    }
}

/// A candidate block of page text, as produced by the page's detection layer.
///
/// Regions are read-only to this crate and a detection pass replaces the whole
/// set at once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRegion {
    /// Stable identifier, unique within one detection pass
    pub id: String,

    /// Text content of the region
    pub content: String,

    /// Nearest preceding headline (may be empty)
    #[serde(default)]
    pub headline: String,

    /// Bounding box of the first element of the region
    pub geometry: Rect,

    /// Boxes of the individual elements when the region spans several of them
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parts: Vec<Rect>,

    /// Whether the region is composed of several page elements
    #[serde(default)]
    pub multi_part: bool,
}

impl TextRegion {
    /// Create a single-element region
    pub fn new(id: impl Into<String>, content: impl Into<String>, geometry: Rect) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            headline: String::new(),
            geometry,
            parts: Vec::new(),
            multi_part: false,
        }
    }

    pub fn with_headline(mut self, headline: impl Into<String>) -> Self {
        self.headline = headline.into();
        self
    }

    /// Attach the element boxes of a multi-element region
    pub fn with_parts(mut self, parts: Vec<Rect>) -> Self {
        self.multi_part = parts.len() > 1;
        self.parts = parts;
        self
    }

    fn boxes(&self) -> &[Rect] {
        if self.parts.is_empty() {
            std::slice::from_ref(&self.geometry)
        } else {
            &self.parts
        }
    }

    /// Widest element width
    pub fn width(&self) -> f64 {
        self.boxes().iter().map(|r| r.width).fold(0.0, f64::max)
    }

    /// Sum of the element heights
    pub fn height(&self) -> f64 {
        self.boxes().iter().map(|r| r.height).sum()
    }

    /// Widest element width times summed element heights
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Whether the vertical extent intersects the viewport
    pub fn is_visible(&self, viewport: &Viewport) -> bool {
        let top = self.geometry.top;
        let bottom = top + self.height();
        top <= viewport.scroll_bottom() && bottom >= viewport.scroll_top
    }

    /// Bottom-left corner of the stacked elements, used as the cursor anchor
    pub fn bottom_left(&self) -> Point {
        Point::new(self.geometry.left, self.geometry.top + self.height())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multi_part_area() {
        let region = TextRegion::new("p", "text", Rect::new(0.0, 0.0, 100.0, 20.0)).with_parts(vec![
            Rect::new(0.0, 0.0, 100.0, 20.0),
            Rect::new(0.0, 20.0, 300.0, 30.0),
        ]);
        assert!(region.multi_part);
        assert_eq!(region.width(), 300.0);
        assert_eq!(region.height(), 50.0);
        assert_eq!(region.area(), 15000.0);
        assert_eq!(region.bottom_left(), Point::new(0.0, 50.0));
    }

    #[test]
    fn test_visibility() {
        let viewport = Viewport::new(800.0, 600.0).scrolled_to(0.0, 1000.0);
        let above = TextRegion::new("a", "x", Rect::new(0.0, 100.0, 100.0, 100.0));
        let straddling = TextRegion::new("b", "x", Rect::new(0.0, 950.0, 100.0, 100.0));
        let inside = TextRegion::new("c", "x", Rect::new(0.0, 1200.0, 100.0, 100.0));
        let below = TextRegion::new("d", "x", Rect::new(0.0, 1700.0, 100.0, 100.0));

        assert!(!above.is_visible(&viewport));
        assert!(straddling.is_visible(&viewport));
        assert!(inside.is_visible(&viewport));
        assert!(!below.is_visible(&viewport));
    }

    #[test]
    fn test_region_deserializes_with_defaults() {
        let json = r#"{"id":"eexcess_par_0","content":"Some text.","geometry":{"left":1,"top":2,"width":3,"height":4}}"#;
        let region: TextRegion = serde_json::from_str(json).unwrap();
        assert_eq!(region.headline, "");
        assert!(region.parts.is_empty());
        assert!(!region.multi_part);
        assert_eq!(region.area(), 12.0);
    }
}
