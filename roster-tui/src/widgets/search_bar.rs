//! Single-line filter input.

use crate::hit::{HitMap, Target};
use crate::theme;
use crate::ui::text::display_width;
use crate::ui::{Buffer, Rect, Style};

const PLACEHOLDER: &str = "Search...";

/// Draws the filter input in `area` (one row).
///
/// Long input keeps its tail visible so the caret stays on screen.
pub fn render_search_bar(buf: &mut Buffer, area: Rect, text: &str, focused: bool, hits: &mut HitMap) {
    let field = Style::new().bg(theme::SURFACE);
    buf.fill(area, field);
    hits.push(area, Target::Search);

    let inner = area.width.saturating_sub(2);
    let x = area.x + 1;

    if text.is_empty() {
        let style = theme::muted().italic();
        let w = buf.put_str(x, area.y, PLACEHOLDER, inner, style);
        if focused {
            buf.put_str(x + w, area.y, "▏", inner.saturating_sub(w), theme::focused());
        }
        return;
    }

    let room = inner.saturating_sub(1) as usize;
    let visible = tail_within(text, room);
    let style = if focused { Style::new().fg(theme::TEXT).bold() } else { Style::new().fg(theme::TEXT) };
    let w = buf.put_str(x, area.y, visible, inner, style);
    if focused {
        buf.put_str(x + w, area.y, "▏", inner.saturating_sub(w), theme::focused());
    }
}

fn tail_within(text: &str, width: usize) -> &str {
    let mut start = 0;
    while display_width(&text[start..]) > width {
        match text[start..].chars().next() {
            Some(c) => start += c.len_utf8(),
            None => break,
        }
    }
    &text[start..]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_when_empty() {
        let mut buf = Buffer::new(20, 1);
        let mut hits = HitMap::new();
        let area = buf.area();
        render_search_bar(&mut buf, area, "", false, &mut hits);
        assert_eq!(buf.row_text(0).trim_end(), " Search...");
        assert_eq!(hits.hit(15, 0), Some(Target::Search));
    }

    #[test]
    fn test_shows_text_with_caret_when_focused() {
        let mut buf = Buffer::new(20, 1);
        let mut hits = HitMap::new();
        let area = buf.area();
        render_search_bar(&mut buf, area, "ann", true, &mut hits);
        assert_eq!(buf.row_text(0).trim_end(), " ann▏");
    }

    #[test]
    fn test_long_text_keeps_tail() {
        assert_eq!(tail_within("abcdef", 3), "def");
        assert_eq!(tail_within("abc", 3), "abc");
        assert_eq!(tail_within("日本語", 4), "本語");
    }
}
