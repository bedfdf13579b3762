//! Width-aware label fitting.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Terminal cells `s` occupies.
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Shorten `s` to at most `max_width` cells, ending it with `tail` when cut.
/// Wide characters are never split.
pub fn fit(s: &str, max_width: usize, tail: &str) -> String {
    if display_width(s) <= max_width {
        return s.to_string();
    }

    let tail_width = display_width(tail);
    let (body, budget) = if tail_width >= max_width {
        (tail, max_width)
    } else {
        (s, max_width - tail_width)
    };

    let mut out = String::new();
    let mut width = 0;
    for c in body.chars() {
        let cw = UnicodeWidthChar::width(c).unwrap_or(0);
        if width + cw > budget {
            break;
        }
        out.push(c);
        width += cw;
    }
    if tail_width < max_width {
        out.push_str(tail);
    }
    out
}
