use crate::region::Point;

/// All non-overlapping character offsets at which `needle` occurs in `haystack`.
///
/// Matching is exact and case-sensitive. An empty needle has no offsets.
pub fn find_offsets(haystack: &str, needle: &str) -> Vec<usize> {
    if needle.is_empty() {
        return Vec::new();
    }
    let mut chars = 0;
    let mut scanned = 0;
    haystack
        .match_indices(needle)
        .map(|(byte_idx, _)| {
            chars += haystack[scanned..byte_idx].chars().count();
            scanned = byte_idx;
            chars
        })
        .collect()
}

/// The `len` characters of `text` starting at character `offset`
pub fn char_slice(text: &str, offset: usize, len: usize) -> String {
    text.chars().skip(offset).take(len).collect()
}

/// Euclidean distance between two points
pub fn distance(a: Point, b: Point) -> f64 {
    (a.x - b.x).hypot(a.y - b.y)
}

/// `1 - distance / diagonal`, clamped to [0, 1]
pub fn proximity(distance: f64, diagonal: f64) -> f64 {
    if diagonal <= 0.0 {
        return 0.0;
    }
    (1.0 - distance / diagonal).clamp(0.0, 1.0)
}
