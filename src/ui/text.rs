//! Text layout helpers

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Wrap text to fit within a maximum width (in terminal cells).
///
/// Paragraph breaks (`\n`) are kept, blank paragraphs stay as empty lines and
/// words wider than the line are split.
pub fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    let max_width = max_width.max(1);
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        if paragraph.trim().is_empty() {
            lines.push(String::new());
            continue;
        }

        let mut current_line = String::new();
        let mut current_len = 0;
        for word in paragraph.split_whitespace() {
            let mut word = word.to_string();

            while width_of(&word) > max_width {
                if current_len > 0 {
                    lines.push(std::mem::take(&mut current_line));
                    current_len = 0;
                }
                let (head, rest) = split_at_width(&word, max_width);
                lines.push(head.to_string());
                word = rest.to_string();
            }

            let word_len = width_of(&word);
            if current_len + word_len + 1 > max_width && current_len > 0 {
                lines.push(std::mem::take(&mut current_line));
                current_len = 0;
            }
            if current_len > 0 {
                current_line.push(' ');
                current_len += 1;
            }
            current_len += word_len;
            current_line.push_str(&word);
        }
        if current_len > 0 {
            lines.push(current_line);
        }
    }

    if lines.is_empty() {
        lines.push(String::new());
    }

    lines
}

/// Display width in terminal cells
pub fn width_of(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

/// Longest suffix of `text` that fits in `max_width` cells
pub fn tail_fitting(text: &str, max_width: usize) -> &str {
    let mut used = 0;
    let mut start = text.len();
    for (index, c) in text.char_indices().rev() {
        used += c.width().unwrap_or(0);
        if used > max_width {
            break;
        }
        start = index;
    }
    &text[start..]
}

/// Split so the head fits in `max_width` cells; the head keeps at least one char
fn split_at_width(text: &str, max_width: usize) -> (&str, &str) {
    let mut used = 0;
    for (index, c) in text.char_indices() {
        used += c.width().unwrap_or(0);
        if used > max_width && index > 0 {
            return text.split_at(index);
        }
    }
    (text, "")
}
