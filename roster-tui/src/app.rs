//! The user browser: event handling and rendering.
//!
//! [`App`] holds the view state and the data source. [`App::handle`] and
//! [`App::render`] never touch the terminal; [`App::run`] wires them to
//! crossterm events, fetch completion and a spinner tick.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::EventStream;
use futures::StreamExt;
use log::debug;
use log::info;
use roster_lib::model::User;
use roster_lib::query::SortMode;
use roster_lib::source::LoadState;
use roster_lib::source::UserSource;
use roster_lib::table::TableState;

use crate::hit::{HitMap, Target};
use crate::listeners::ClickListeners;
use crate::theme;
use crate::ui::{Buffer, Input, Key, Modifiers, Rect, Terminal};
use crate::widgets::{
    PageForm, SortDropdown, Spinner, render_detail, render_search_bar, render_user_table,
};

const TICK: Duration = Duration::from_millis(120);

const SEARCH_WIDTH: u16 = 32;
const BANNER_ROW: u16 = 1;
const CONTROLS_ROW: u16 = 2;
const TABLE_ROW: u16 = 4;
const RETRY: &str = "[ Retry ]";

/// Which control receives key input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Search,
    Sort,
    Table,
    Page,
}

impl Focus {
    const ORDER: [Focus; 4] = [Focus::Search, Focus::Sort, Focus::Table, Focus::Page];

    fn next(self) -> Self {
        let i = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(i + 1) % Self::ORDER.len()]
    }

    fn previous(self) -> Self {
        let i = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(i + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

pub struct App {
    source: UserSource,
    table: TableState,
    focus: Focus,
    cursor: usize,
    dropdown: SortDropdown,
    page_form: PageForm,
    listeners: ClickListeners,
    hits: HitMap,
    spinner: Spinner,
    should_quit: bool,
    empty: Arc<[User]>,
}

impl App {
    pub fn new(source: UserSource, table: TableState) -> Self {
        Self {
            source,
            table,
            focus: Focus::default(),
            cursor: 0,
            dropdown: SortDropdown::new(),
            page_form: PageForm::new(),
            listeners: ClickListeners::new(),
            hits: HitMap::new(),
            spinner: Spinner::new(),
            should_quit: false,
            empty: Vec::<User>::new().into(),
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Runs until the user quits or the event stream ends.
    pub async fn run(&mut self, terminal: &mut Terminal) -> io::Result<()> {
        let mut events = EventStream::new();
        let mut tick = tokio::time::interval(TICK);

        self.source.start();

        while !self.should_quit() {
            terminal.draw(|buf| self.render(buf))?;

            tokio::select! {
                event = events.next() => match event {
                    Some(Ok(event)) => {
                        if let Some(input) = Input::from_crossterm(event) {
                            self.handle(input);
                        }
                    }
                    Some(Err(e)) => return Err(e),
                    None => break,
                },
                Some(outcome) = self.source.recv() => self.source.apply(outcome),
                _ = tick.tick(), if self.source.is_pending() => self.spinner.advance(),
            }
        }

        info!("quitting");
        self.source.cancel();
        Ok(())
    }

    // =========================================================================
    // Input
    // =========================================================================

    pub fn handle(&mut self, input: Input) {
        match input {
            Input::Key { key, modifiers } => self.handle_key(key, modifiers),
            Input::Click { x, y } => self.handle_click(x, y),
            Input::Scroll { delta } => {
                if self.table.selected_id().is_some() {
                    return;
                }
                if delta < 0 {
                    self.previous_page();
                } else {
                    self.next_page();
                }
            }
            Input::Resize { width, height } => debug!("resized to {}x{}", width, height),
        }
    }

    fn handle_key(&mut self, key: Key, modifiers: Modifiers) {
        if modifiers.ctrl && matches!(key, Key::Char('q') | Key::Char('c')) {
            self.should_quit = true;
            return;
        }

        // The detail overlay is modal
        if self.table.selected_id().is_some() {
            if matches!(key, Key::Escape | Key::Enter) {
                self.table.clear_selection();
            }
            return;
        }

        if self.dropdown.is_open() {
            match key {
                Key::Up => self.dropdown.move_highlight(-1),
                Key::Down => self.dropdown.move_highlight(1),
                Key::Enter | Key::Char(' ') => {
                    let mode = self.dropdown.choose();
                    self.set_sort(mode);
                }
                Key::Escape => self.dropdown.close(),
                Key::Tab => self.set_focus(self.focus.next()),
                Key::BackTab => self.set_focus(self.focus.previous()),
                _ => {}
            }
            return;
        }

        match key {
            Key::Tab => return self.set_focus(self.focus.next()),
            Key::BackTab => return self.set_focus(self.focus.previous()),
            Key::PageUp => return self.previous_page(),
            Key::PageDown => return self.next_page(),
            // Nothing is loaded to filter, so the search field gives up `r`
            Key::Char('r') if !modifiers.ctrl && self.source.state().error().is_some() => {
                return self.source.refetch();
            }
            _ => {}
        }

        match self.focus {
            Focus::Search => match key {
                Key::Char(c) if !modifiers.ctrl && !modifiers.alt => {
                    self.table.push_filter_char(c);
                    self.cursor = 0;
                }
                Key::Backspace => {
                    self.table.pop_filter_char();
                    self.cursor = 0;
                }
                Key::Escape => {
                    self.table.set_filter("");
                    self.cursor = 0;
                }
                Key::Down | Key::Enter => self.set_focus(Focus::Table),
                _ => self.handle_common(key),
            },
            Focus::Sort => match key {
                Key::Enter | Key::Char(' ') | Key::Down => {
                    self.dropdown.open(self.table.sort(), &self.listeners);
                }
                _ => self.handle_common(key),
            },
            Focus::Table => match key {
                Key::Up => self.cursor = self.cursor.saturating_sub(1),
                Key::Down => {
                    let rows = self.page_rows();
                    if self.cursor + 1 < rows {
                        self.cursor += 1;
                    }
                }
                Key::Home => self.cursor = 0,
                Key::End => self.cursor = self.page_rows().saturating_sub(1),
                Key::Enter => self.open_cursor_row(),
                _ => self.handle_common(key),
            },
            Focus::Page => match key {
                Key::Char(c) if c.is_ascii_digit() => {
                    self.page_form.push(c);
                }
                Key::Backspace => self.page_form.backspace(),
                Key::Enter => {
                    if let Some(input) = self.page_form.commit() {
                        if self.table.set_page_input(&input) {
                            self.cursor = 0;
                        }
                    }
                }
                Key::Escape => self.page_form.cancel(),
                _ => self.handle_common(key),
            },
        }
    }

    /// Paging keys shared by every control.
    fn handle_common(&mut self, key: Key) {
        match key {
            Key::Left => self.previous_page(),
            Key::Right => self.next_page(),
            _ => {}
        }
    }

    fn handle_click(&mut self, x: u16, y: u16) {
        let fired = self.listeners.dispatch(x, y);
        self.dropdown.handle_click_outside(&fired);

        let Some(target) = self.hits.hit(x, y) else { return };
        debug!("click at ({}, {}) on {:?}", x, y, target);

        match target {
            Target::Search => self.set_focus(Focus::Search),
            Target::SortToggle => {
                self.set_focus(Focus::Sort);
                self.dropdown.toggle(self.table.sort(), &self.listeners);
            }
            Target::SortOption(mode) => {
                self.dropdown.close();
                self.set_sort(mode);
            }
            Target::Row { id, index } => {
                self.set_focus(Focus::Table);
                self.cursor = index;
                self.table.select(id);
            }
            Target::PreviousPage => self.previous_page(),
            Target::NextPage => self.next_page(),
            Target::PageInput => self.set_focus(Focus::Page),
            Target::CloseDetail => self.table.clear_selection(),
            Target::DetailBody => {}
            Target::Retry => self.source.refetch(),
        }
    }

    fn set_focus(&mut self, focus: Focus) {
        if focus != Focus::Sort {
            self.dropdown.close();
        }
        if focus != Focus::Page {
            self.page_form.cancel();
        }
        self.focus = focus;
    }

    fn set_sort(&mut self, mode: SortMode) {
        debug!("sort: {}", mode);
        self.table.set_sort(mode);
        self.cursor = 0;
    }

    fn previous_page(&mut self) {
        self.table.previous_page();
        self.cursor = 0;
    }

    fn next_page(&mut self) {
        let users = self.users();
        self.table.next_page(&users);
        self.cursor = 0;
    }

    fn open_cursor_row(&mut self) {
        let users = self.users();
        let view = self.table.view(&users);
        let id = view.rows.get(self.cursor).map(|user| user.id);
        if let Some(id) = id {
            self.table.select(id);
        }
    }

    fn page_rows(&mut self) -> usize {
        let users = self.users();
        self.table.view(&users).rows.len()
    }

    fn users(&self) -> Arc<[User]> {
        self.source
            .state()
            .users()
            .cloned()
            .unwrap_or_else(|| self.empty.clone())
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    /// Draws the whole screen and records this frame's click targets.
    pub fn render(&mut self, buf: &mut Buffer) {
        let screen = buf.area();
        buf.fill(screen, theme::base());
        self.hits.clear();

        let users = self.users();
        let view = self.table.view(&users);
        let width = screen.width.saturating_sub(2);

        // Title and status
        buf.put_str(1, 0, "Users", width, theme::title());
        let status = if self.source.is_pending() {
            format!("{} Loading...", self.spinner.glyph())
        } else if matches!(self.source.state(), LoadState::Loaded(_)) {
            format!("{} of {}", view.matched, view.total)
        } else {
            String::new()
        };
        let status_width = crate::ui::text::display_width(&status) as u16;
        buf.put_str(
            screen.right().saturating_sub(status_width + 1),
            0,
            &status,
            status_width,
            theme::muted(),
        );

        // Error banner
        if let Some(message) = self.source.state().error() {
            let text = format!("Failed to load users: {}", message);
            let room = width.saturating_sub(RETRY.len() as u16 + 2);
            let w = buf.put_str(1, BANNER_ROW, &text, room, theme::error());
            let x = 1 + w + 2;
            let retry = buf.put_str(x, BANNER_ROW, RETRY, RETRY.len() as u16, theme::focused());
            self.hits.push(Rect::new(x, BANNER_ROW, retry, 1), Target::Retry);
        }

        // Search and sort
        let search = Rect::new(1, CONTROLS_ROW, SEARCH_WIDTH.min(width), 1);
        render_search_bar(
            buf,
            search,
            self.table.filter().text(),
            self.focus == Focus::Search,
            &mut self.hits,
        );
        self.dropdown.render_control(
            buf,
            search.right() + 2,
            CONTROLS_ROW,
            self.table.sort(),
            self.focus == Focus::Sort,
            &mut self.hits,
        );

        // Table
        let table_height = self.table.page_size() as u16 + 1;
        let table_area = Rect::new(1, TABLE_ROW, width, table_height);
        if self.focus == Focus::Table {
            self.cursor = self.cursor.min(view.rows.len().saturating_sub(1));
        }
        let cursor = (self.focus == Focus::Table && !view.rows.is_empty()).then_some(self.cursor);
        let empty_message = match self.source.state() {
            LoadState::Idle | LoadState::Loading => "Loading users...",
            LoadState::Failed(_) => "No users loaded.",
            LoadState::Loaded(_) => "No users match the search.",
        };
        render_user_table(buf, table_area, &view.rows, cursor, empty_message, &mut self.hits);

        // Pagination
        self.page_form.render(
            buf,
            1,
            table_area.bottom() + 1,
            view.page,
            view.page_count,
            self.focus == Focus::Page,
            &mut self.hits,
        );

        // Hints
        let hints = if self.source.state().error().is_some() {
            "Tab focus · ←/→ page · Enter open · r retry · Ctrl+Q quit"
        } else {
            "Tab focus · ←/→ page · Enter open · Ctrl+Q quit"
        };
        buf.put_str(1, screen.bottom().saturating_sub(1), hints, width, theme::muted());

        // Overlays last so they paint and hit-test on top
        self.dropdown.render_menu(buf, self.table.sort(), &mut self.hits);

        if let Some(user) = self.table.selected(&users) {
            buf.dim(screen);
            render_detail(buf, screen, user, &mut self.hits);
        }
    }
}
