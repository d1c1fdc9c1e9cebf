//! Sort mode selector.
//!
//! A closed control showing the current mode; when open, a menu listing every
//! mode below it. While open the dropdown holds a click-outside
//! [`Subscription`], which is what closes it when the user clicks elsewhere.
//! Closing drops the subscription.

use roster_lib::query::SortMode;

use crate::hit::{HitMap, Target};
use crate::listeners::{ClickListeners, ListenerId, Subscription};
use crate::theme;
use crate::ui::text::fit;
use crate::ui::{Buffer, Rect, Style};

const LABEL: &str = "Sort: ";
const OPTION_WIDTH: u16 = 10;

#[derive(Debug, Default)]
pub struct SortDropdown {
    highlighted: usize,
    subscription: Option<Subscription>,
    control: Rect,
    menu: Rect,
}

impl SortDropdown {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.subscription.is_some()
    }

    /// Opens the menu with `current` highlighted.
    pub fn open(&mut self, current: SortMode, listeners: &ClickListeners) {
        if self.is_open() {
            return;
        }
        self.highlighted = current.index();
        self.menu = Self::menu_area(self.control);
        self.subscription = Some(listeners.subscribe(self.bounds()));
    }

    pub fn close(&mut self) {
        self.subscription = None;
    }

    pub fn toggle(&mut self, current: SortMode, listeners: &ClickListeners) {
        if self.is_open() {
            self.close();
        } else {
            self.open(current, listeners);
        }
    }

    /// Moves the highlight, stopping at the first and last option.
    pub fn move_highlight(&mut self, delta: isize) {
        let last = SortMode::ALL.len() - 1;
        self.highlighted = self.highlighted.saturating_add_signed(delta).min(last);
    }

    pub fn highlighted(&self) -> SortMode {
        SortMode::from_index(self.highlighted).unwrap_or_default()
    }

    /// Picks the highlighted mode and closes the menu.
    pub fn choose(&mut self) -> SortMode {
        let mode = self.highlighted();
        self.close();
        mode
    }

    /// Closes the menu if its listener is among `fired`. Returns `true` if it closed.
    pub fn handle_click_outside(&mut self, fired: &[ListenerId]) -> bool {
        let hit = self
            .subscription
            .as_ref()
            .is_some_and(|sub| fired.contains(&sub.id()));
        if hit {
            self.close();
        }
        hit
    }

    /// Draws the closed control at (`x`, `y`).
    pub fn render_control(
        &mut self,
        buf: &mut Buffer,
        x: u16,
        y: u16,
        current: SortMode,
        focused: bool,
        hits: &mut HitMap,
    ) {
        let label_style = if focused { theme::focused() } else { theme::muted() };
        let mut col = x + buf.put_str(x, y, LABEL, LABEL.len() as u16, label_style);

        let arrow = if self.is_open() { "▴" } else { "▾" };
        let text = format!("[{} {}]", fit(current.label(), OPTION_WIDTH as usize - 2), arrow);
        let value_style = if focused { theme::focused() } else { Style::new().fg(theme::TEXT) };
        let width = buf.put_str(col, y, &text, buf.width().saturating_sub(col), value_style);
        col += width;

        self.control = Rect::new(x, y, col - x, 1);
        hits.push(self.control, Target::SortToggle);
    }

    /// Draws the open menu below the control. Call after everything it
    /// may cover so it paints and hit-tests on top.
    pub fn render_menu(&mut self, buf: &mut Buffer, current: SortMode, hits: &mut HitMap) {
        if !self.is_open() {
            return;
        }
        self.menu = Self::menu_area(self.control);
        if let Some(sub) = &self.subscription {
            sub.set_bounds(self.bounds());
        }

        buf.fill(self.menu, Style::new().bg(theme::SURFACE));
        buf.draw_border(self.menu, Style::new().fg(theme::INTERACT));

        for (i, mode) in SortMode::ALL.iter().enumerate() {
            let y = self.menu.y + 1 + i as u16;
            let marker = if *mode == current { "•" } else { " " };
            let text = format!("{} {}", marker, fit(mode.label(), OPTION_WIDTH as usize - 2));
            let style = if i == self.highlighted {
                Style::new().fg(theme::BACKGROUND).bg(theme::INTERACT).bold()
            } else {
                Style::new().fg(theme::TEXT)
            };
            let row = Rect::new(self.menu.x + 1, y, self.menu.width.saturating_sub(2), 1);
            buf.fill(row, style);
            buf.put_str(row.x, y, &text, row.width, style);
            hits.push(row, Target::SortOption(*mode));
        }
    }

    fn menu_area(control: Rect) -> Rect {
        let x = control.x + LABEL.len() as u16;
        Rect::new(x, control.y + 1, OPTION_WIDTH + 2, SortMode::ALL.len() as u16 + 2)
    }

    fn bounds(&self) -> Rect {
        let x = self.control.x.min(self.menu.x);
        let y = self.control.y.min(self.menu.y);
        let right = self.control.right().max(self.menu.right());
        let bottom = self.control.bottom().max(self.menu.bottom());
        Rect::new(x, y, right - x, bottom - y)
    }
}
