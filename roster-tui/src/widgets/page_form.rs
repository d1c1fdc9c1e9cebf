//! Page navigation: `‹ [page] / count ›`.
//!
//! The page number can be typed. Typed digits are kept here until committed
//! with Enter; the table state decides whether the number is usable.

use crate::hit::{HitMap, Target};
use crate::theme;
use crate::ui::{Buffer, Rect, Style};

#[derive(Debug, Default)]
pub struct PageForm {
    editing: Option<String>,
}

impl PageForm {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    /// Adds a typed character. Only digits are accepted.
    pub fn push(&mut self, c: char) -> bool {
        if !c.is_ascii_digit() {
            return false;
        }
        self.editing.get_or_insert_with(String::new).push(c);
        true
    }

    pub fn backspace(&mut self) {
        if let Some(input) = &mut self.editing {
            input.pop();
        }
    }

    /// Ends editing and returns what was typed.
    pub fn commit(&mut self) -> Option<String> {
        self.editing.take()
    }

    pub fn cancel(&mut self) {
        self.editing = None;
    }

    pub fn render(
        &self,
        buf: &mut Buffer,
        x: u16,
        y: u16,
        page: usize,
        count: usize,
        focused: bool,
        hits: &mut HitMap,
    ) {
        let enabled = Style::new().fg(theme::PRIMARY).bold();
        let disabled = theme::muted();
        let mut col = x;

        let prev_style = if page > 1 { enabled } else { disabled };
        let w = buf.put_str(col, y, " ‹ ", 3, prev_style);
        hits.push(Rect::new(col, y, w, 1), Target::PreviousPage);
        col += w + 1;

        let shown = match &self.editing {
            Some(input) => format!("[{}▏]", input),
            None => format!("[{}]", page),
        };
        let input_style = if focused { theme::focused() } else { Style::new().fg(theme::TEXT) };
        let w = buf.put_str(col, y, &shown, buf.width().saturating_sub(col), input_style);
        hits.push(Rect::new(col, y, w, 1), Target::PageInput);
        col += w;

        let total = format!(" / {} ", count);
        col += buf.put_str(col, y, &total, buf.width().saturating_sub(col), theme::muted());

        let next_style = if page < count { enabled } else { disabled };
        let w = buf.put_str(col, y, " › ", 3, next_style);
        hits.push(Rect::new(col, y, w, 1), Target::NextPage);
    }
}
