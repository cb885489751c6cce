//! Text measurement, truncation and word wrapping for mono fonts.

use embedded_graphics::mono_font::MonoFont;
use heapless::{String, Vec};

use super::TextFlags;
use crate::config::{MAX_TEXT_LEN, MAX_TEXT_LINES};
use crate::geometry::Extent;

/// One rendered line of text.
pub type TextLine = String<MAX_TEXT_LEN>;

/// Lines produced by [`wrap`].
pub type TextLines = Vec<TextLine, MAX_TEXT_LINES>;

const ELLIPSIS: &str = "...";

/// Horizontal distance between the starts of two adjacent glyphs.
pub fn char_advance(font: &MonoFont<'_>) -> Extent {
    font.character_size.width + font.character_spacing
}

/// Rendered width of `text` in pixels.
pub fn text_width(font: &MonoFont<'_>, text: &str) -> Extent {
    let chars = text.chars().count() as Extent;
    if chars == 0 {
        return 0;
    }
    chars * font.character_size.width + (chars - 1) * font.character_spacing
}

/// How many glyphs fit in `width` pixels.
pub fn chars_that_fit(font: &MonoFont<'_>, width: Extent) -> usize {
    let advance = char_advance(font);
    if advance == 0 {
        return 0;
    }
    // The last glyph needs no trailing spacing
    ((width + font.character_spacing) / advance) as usize
}

/// Fit `text` on one line of at most `max_chars` glyphs.
///
/// With [`TextFlags::ELLIPSIS`] an overlong line ends in "..."; otherwise it
/// is cut at the limit.
pub fn fit_line(text: &str, max_chars: usize, flags: TextFlags) -> TextLine {
    let mut line = TextLine::new();
    let count = text.chars().count();
    if count <= max_chars {
        push_chars(&mut line, text, count);
        return line;
    }

    if flags.contains(TextFlags::ELLIPSIS) && max_chars >= ELLIPSIS.len() {
        push_chars(&mut line, text, max_chars - ELLIPSIS.len());
        line.push_str(ELLIPSIS).ok();
    } else {
        push_chars(&mut line, text, max_chars);
    }
    line
}

/// Greedy word wrap at `max_chars` glyphs per line. Explicit newlines start
/// a new line; words longer than a line are split.
pub fn wrap(text: &str, max_chars: usize) -> TextLines {
    let mut lines = TextLines::new();
    if max_chars == 0 {
        return lines;
    }

    for paragraph in text.split('\n') {
        let mut current = TextLine::new();
        let mut current_len = 0;

        for word in paragraph.split_whitespace() {
            let mut word = word;
            let mut word_len = word.chars().count();

            if current_len > 0 && current_len + 1 + word_len > max_chars {
                lines.push(core::mem::take(&mut current)).ok();
                current_len = 0;
            }

            while word_len > max_chars {
                let split = word
                    .char_indices()
                    .nth(max_chars)
                    .map_or(word.len(), |(idx, _)| idx);
                let mut piece = TextLine::new();
                piece.push_str(&word[..split]).ok();
                lines.push(piece).ok();
                word = &word[split..];
                word_len -= max_chars;
            }

            if word_len == 0 {
                continue;
            }
            if current_len > 0 {
                current.push(' ').ok();
                current_len += 1;
            }
            current.push_str(word).ok();
            current_len += word_len;
        }

        if current_len > 0 || paragraph.trim().is_empty() {
            lines.push(current).ok();
        }
    }

    lines
}

fn push_chars(line: &mut TextLine, text: &str, count: usize) {
    for c in text.chars().take(count) {
        if line.push(c).is_err() {
            break;
        }
    }
}
