use serde::{Deserialize, Serialize};
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextStyle {
    pub font_family: Option<String>,
    pub font_size: f64,
    pub font_weight: Option<String>,
}

impl TextStyle {
    pub fn sized(font_size: f64) -> Self {
        Self {
            font_family: None,
            font_size,
            font_weight: None,
        }
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self::sized(14.0)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TextMetrics {
    pub width: f64,
    pub height: f64,
    pub line_count: usize,
}

/// Text measurement seam. Hosts with real font metrics implement this; the
/// deterministic default keeps layout reproducible in headless runs.
pub trait TextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics;
}

#[derive(Debug, Clone, Default)]
pub struct DeterministicTextMeasurer {
    pub char_width_factor: f64,
    pub line_height_factor: f64,
}

impl TextMeasurer for DeterministicTextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics {
        let char_width_factor = if self.char_width_factor == 0.0 {
            0.6
        } else {
            self.char_width_factor
        };
        let line_height_factor = if self.line_height_factor == 0.0 {
            1.2
        } else {
            self.line_height_factor
        };

        let font_size = style.font_size.max(1.0);
        let mut max_cols = 0usize;
        let mut line_count = 0usize;
        for line in text.split('\n') {
            max_cols = max_cols.max(UnicodeWidthStr::width(line));
            line_count += 1;
        }
        if line_count == 0 {
            line_count = 1;
        }

        TextMetrics {
            width: max_cols as f64 * font_size * char_width_factor,
            height: line_count as f64 * font_size * line_height_factor,
            line_count,
        }
    }
}

/// Greedy word wrap into lines that fit `max_width` pixels under the given
/// measurer. A single word wider than the limit gets a line of its own
/// rather than being split mid-word.
pub fn wrap_text(
    text: &str,
    style: &TextStyle,
    measurer: &dyn TextMeasurer,
    max_width: f64,
) -> Vec<String> {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() {
        return vec![String::new()];
    }

    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    for word in words {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };
        if measurer.measure(&candidate, style).width <= max_width || current.is_empty() {
            current = candidate;
        } else {
            lines.push(std::mem::take(&mut current));
            current = word.to_string();
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn measure_uses_widest_line() {
        let m = DeterministicTextMeasurer::default();
        let style = TextStyle::sized(10.0);
        let metrics = m.measure("abc\nabcdef", &style);
        assert_eq!(metrics.line_count, 2);
        assert_eq!(metrics.width, 6.0 * 10.0 * 0.6);
    }

    #[test]
    fn wrap_respects_pixel_width() {
        let m = DeterministicTextMeasurer::default();
        let style = TextStyle::sized(10.0);
        // 0.6 * 10px per column: 10 columns fit in 60px.
        let lines = wrap_text("alpha beta gamma", &style, &m, 60.0);
        assert_eq!(lines, vec!["alpha beta", "gamma"]);
    }

    #[test]
    fn wrap_keeps_overlong_word_whole() {
        let m = DeterministicTextMeasurer::default();
        let style = TextStyle::sized(10.0);
        let lines = wrap_text("supercalifragilistic no", &style, &m, 30.0);
        assert_eq!(lines, vec!["supercalifragilistic", "no"]);
    }

    #[test]
    fn wrap_empty_text_is_one_empty_line() {
        let m = DeterministicTextMeasurer::default();
        let lines = wrap_text("  ", &TextStyle::default(), &m, 100.0);
        assert_eq!(lines, vec![String::new()]);
    }
}
