//! Display-width helpers.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Terminal columns needed to display `s`.
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Longest prefix of `s` that fits in `width` columns, cut on a
/// grapheme boundary.
pub fn truncate_to_width(s: &str, width: usize) -> &str {
    let mut used = 0;
    for (offset, grapheme) in s.grapheme_indices(true) {
        let w = UnicodeWidthStr::width(grapheme);
        if used + w > width {
            return &s[..offset];
        }
        used += w;
    }
    s
}

/// Convert a column count to `u16`, saturating.
#[allow(clippy::cast_possible_truncation)]
pub const fn clamp_u16(value: usize) -> u16 {
    if value > u16::MAX as usize {
        u16::MAX
    } else {
        value as u16
    }
}
