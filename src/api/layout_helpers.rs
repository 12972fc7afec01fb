pub(crate) fn estimate_label_text_width_px(text: &str, font_size_px: f64) -> f64 {
    // Deterministic and backend-independent; real glyph metrics are up to the backend.
    let units = text.chars().fold(0.0, |acc, ch| {
        acc + match ch {
            '0'..='9' => 0.62,
            '.' | ',' => 0.34,
            '-' | '+' | '%' | '±' => 0.42,
            ' ' => 0.33,
            'A'..='Z' => 0.66,
            _ => 0.54,
        }
    });
    (units * font_size_px).max(font_size_px)
}

/// Greedy word wrap against the width estimate.
///
/// A single word wider than `max_width_px` gets a line of its own.
pub(crate) fn wrap_text(text: &str, font_size_px: f64, max_width_px: f64) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }
        let candidate = format!("{current} {word}");
        if estimate_label_text_width_px(&candidate, font_size_px) <= max_width_px {
            current = candidate;
        } else {
            lines.push(std::mem::replace(&mut current, word.to_owned()));
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Keeps a box of `size` starting at `start` inside `[min, max]`.
///
/// The right edge is applied last, so a box wider than the range ends flush
/// with `max`.
pub(crate) fn clamp_span(start: f64, size: f64, min: f64, max: f64) -> f64 {
    let start = start.max(min);
    if start + size > max { max - size } else { start }
}

#[cfg(test)]
mod tests {
    use super::{clamp_span, estimate_label_text_width_px, wrap_text};

    #[test]
    fn width_never_drops_below_font_size() {
        assert_eq!(estimate_label_text_width_px(".", 9.0), 9.0);
        assert!(estimate_label_text_width_px("327,680 px analyzed", 12.0) > 100.0);
    }

    #[test]
    fn wrap_keeps_every_word_in_order() {
        let text = "Field health is moderate. Mean NDVI of 0.55 with 3.1% in concern zones.";
        let lines = wrap_text(text, 14.0, 200.0);
        assert!(lines.len() > 1);
        assert_eq!(lines.join(" "), text);
        for line in &lines[..lines.len() - 1] {
            assert!(estimate_label_text_width_px(line, 14.0) <= 200.0);
        }
    }

    #[test]
    fn wrap_of_blank_text_is_empty() {
        assert!(wrap_text("   ", 12.0, 100.0).is_empty());
    }

    #[test]
    fn clamp_span_applies_right_edge_last() {
        assert_eq!(clamp_span(10.0, 90.0, 32.0, 492.0), 32.0);
        assert_eq!(clamp_span(450.0, 90.0, 32.0, 492.0), 402.0);
        assert_eq!(clamp_span(200.0, 90.0, 32.0, 492.0), 200.0);
        assert_eq!(clamp_span(0.0, 500.0, 32.0, 492.0), -8.0);
    }
}
