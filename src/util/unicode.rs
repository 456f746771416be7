use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Display width in terminal cells
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Truncate to at most `max_cells` terminal cells, ending with `…` when cut.
pub fn truncate_to_width(s: &str, max_cells: usize) -> String {
    if max_cells == 0 {
        return String::new();
    }
    if display_width(s) <= max_cells {
        return s.to_string();
    }
    let budget = max_cells - 1; // room for '…'
    let mut width = 0;
    let mut out = String::new();
    for g in s.graphemes(true) {
        let gw = display_width(g);
        if width + gw > budget {
            break;
        }
        width += gw;
        out.push_str(g);
    }
    out.push('\u{2026}');
    out
}

/// The part of `s` starting at display column `skip`, snapped forward to a
/// grapheme boundary. Used to scroll a long input horizontally.
pub fn skip_columns(s: &str, skip: usize) -> &str {
    let mut col = 0;
    for (i, g) in s.grapheme_indices(true) {
        if col >= skip {
            return &s[i..];
        }
        col += display_width(g);
    }
    ""
}
