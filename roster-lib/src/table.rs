//! View state of the user table.
//!
//! [`TableState`] holds everything the user can change (filter text, sort
//! mode, page number, selected user) and derives the rows to show from the
//! loaded list. It never touches a terminal, so the paging policy is tested
//! here rather than through the UI.
//!
//! Paging policy: changing the filter resets to page 1, and the page number
//! is clamped into `[1, page_count]` every time the view is derived, where
//! `page_count` is at least 1. An empty result therefore shows page 1 of 1.

use std::sync::Arc;

use crate::model::User;
use crate::query::page_count;
use crate::query::paginate;
use crate::query::SortMode;
use crate::query::TextFilter;
use crate::query::TransformCache;
use crate::query::PAGE_SIZE;

/// Rows and paging info for one render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView<'a> {
    /// Users on the current page, in display order.
    pub rows: Vec<&'a User>,
    /// Current page, 1-based.
    pub page: usize,
    /// Number of pages, at least 1.
    pub page_count: usize,
    /// Users passing the filter.
    pub matched: usize,
    /// Users loaded.
    pub total: usize,
}

/// User-controlled state of the table.
#[derive(Debug)]
pub struct TableState {
    filter: TextFilter,
    sort: SortMode,
    page: usize,
    page_size: usize,
    selected: Option<u64>,
    cache: TransformCache,
}

impl Default for TableState {
    fn default() -> Self {
        Self::new(PAGE_SIZE)
    }
}

impl TableState {
    /// Creates a state showing `page_size` rows per page (at least 1).
    pub fn new(page_size: usize) -> Self {
        Self {
            filter: TextFilter::default(),
            sort: SortMode::default(),
            page: 1,
            page_size: page_size.max(1),
            selected: None,
            cache: TransformCache::new(),
        }
    }

    pub fn filter(&self) -> &TextFilter {
        &self.filter
    }

    pub fn sort(&self) -> SortMode {
        self.sort
    }

    /// Requested page; may exceed the page count until the next [`view`](Self::view).
    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Replaces the filter text and goes back to page 1.
    pub fn set_filter(&mut self, text: impl Into<String>) {
        let filter = TextFilter::new(text);
        if filter != self.filter {
            self.filter = filter;
            self.page = 1;
        }
    }

    /// Appends a character to the filter text.
    pub fn push_filter_char(&mut self, c: char) {
        let mut text = self.filter.text().to_string();
        text.push(c);
        self.set_filter(text);
    }

    /// Removes the last character of the filter text.
    pub fn pop_filter_char(&mut self) {
        let mut text = self.filter.text().to_string();
        if text.pop().is_some() {
            self.set_filter(text);
        }
    }

    /// Selects a sort mode. The page is kept and clamped on the next view.
    pub fn set_sort(&mut self, sort: SortMode) {
        self.sort = sort;
    }

    /// Requests a page. Values below 1 become 1.
    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    /// Requests a page from typed input.
    ///
    /// Returns `false` and leaves the page unchanged if the text is not a
    /// number.
    pub fn set_page_input(&mut self, input: &str) -> bool {
        match input.trim().parse::<usize>() {
            Ok(page) => {
                self.set_page(page);
                true
            }
            Err(_) => false,
        }
    }

    /// Moves one page back, stopping at page 1.
    pub fn previous_page(&mut self) {
        if self.page > 1 {
            self.page -= 1;
        }
    }

    /// Moves one page forward, stopping at the last page.
    pub fn next_page(&mut self, users: &Arc<[User]>) {
        let count = self.page_count(users);
        if self.page < count {
            self.page += 1;
        } else {
            self.page = count;
        }
    }

    /// Number of users passing the current filter.
    pub fn matched(&mut self, users: &Arc<[User]>) -> usize {
        self.cache.get(users, &self.filter, self.sort).len()
    }

    /// Number of pages for the current filter.
    pub fn page_count(&mut self, users: &Arc<[User]>) -> usize {
        page_count(self.matched(users), self.page_size)
    }

    /// Marks a user as selected, opening its detail view.
    pub fn select(&mut self, id: u64) {
        self.selected = Some(id);
    }

    /// Clears the selection, closing the detail view.
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn selected_id(&self) -> Option<u64> {
        self.selected
    }

    /// Returns the selected user, if it is still in `users`.
    pub fn selected<'a>(&self, users: &'a [User]) -> Option<&'a User> {
        let id = self.selected?;
        users.iter().find(|user| user.id == id)
    }

    /// Derives the rows of the current page, clamping the page number.
    pub fn view<'a>(&mut self, users: &'a Arc<[User]>) -> TableView<'a> {
        let all: &'a [User] = users;
        let indices = self.cache.get(users, &self.filter, self.sort);
        let page = paginate(indices, self.page, self.page_size);
        self.page = page.number();

        TableView {
            rows: page.items().iter().map(|&i| &all[i]).collect(),
            page: page.number(),
            page_count: page.count(),
            matched: page.total(),
            total: all.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::named;

    fn ten() -> Arc<[User]> {
        named(&[
            "Leanne", "Ervin", "Clementine", "Patricia", "Chelsey", "Dennis", "Kurtis", "Nicholas",
            "Glenna", "Clementina",
        ])
        .into()
    }

    fn ids(view: &TableView<'_>) -> Vec<u64> {
        view.rows.iter().map(|u| u.id).collect()
    }

    #[test]
    fn test_first_page_of_ten() {
        let users = ten();
        let mut state = TableState::default();
        let view = state.view(&users);
        assert_eq!(ids(&view), [1, 2, 3, 4]);
        assert_eq!(view.page_count, 3);
        assert_eq!(view.matched, 10);
    }

    #[test]
    fn test_next_and_previous_are_bounded() {
        let users = ten();
        let mut state = TableState::default();
        state.previous_page();
        assert_eq!(state.page(), 1);

        state.next_page(&users);
        state.next_page(&users);
        state.next_page(&users);
        assert_eq!(state.page(), 3);
        assert_eq!(ids(&state.view(&users)), [9, 10]);

        state.previous_page();
        assert_eq!(ids(&state.view(&users)), [5, 6, 7, 8]);
    }

    #[test]
    fn test_filter_change_resets_page() {
        let users = ten();
        let mut state = TableState::default();
        state.set_page(3);
        state.set_filter("clem");
        assert_eq!(state.page(), 1);
        let view = state.view(&users);
        assert_eq!(ids(&view), [3, 10]);
        assert_eq!(view.page_count, 1);
    }

    #[test]
    fn test_same_filter_keeps_page() {
        let users = ten();
        let mut state = TableState::default();
        state.set_filter("e");
        state.set_page(2);
        state.set_filter("e");
        assert_eq!(state.view(&users).page, 2);
    }

    #[test]
    fn test_no_match_is_empty_first_page() {
        let users = ten();
        let mut state = TableState::default();
        state.set_page(2);
        state.set_filter("zzz");
        let view = state.view(&users);
        assert!(view.rows.is_empty());
        assert_eq!(view.page, 1);
        assert_eq!(view.page_count, 1);
        assert_eq!(view.matched, 0);
    }

    #[test]
    fn test_out_of_range_page_is_clamped_on_view() {
        let users = ten();
        let mut state = TableState::default();
        state.set_page(42);
        let view = state.view(&users);
        assert_eq!(view.page, 3);
        assert_eq!(state.page(), 3);
        state.set_page(0);
        assert_eq!(state.page(), 1);
    }

    #[test]
    fn test_page_input() {
        let users = ten();
        let mut state = TableState::default();
        assert!(state.set_page_input("2"));
        assert_eq!(ids(&state.view(&users)), [5, 6, 7, 8]);
        assert!(!state.set_page_input("two"));
        assert_eq!(state.page(), 2);
        assert!(!state.set_page_input(""));
    }

    #[test]
    fn test_sort_keeps_page() {
        let users = ten();
        let mut state = TableState::default();
        state.set_page(2);
        state.set_sort(SortMode::Ascending);
        let view = state.view(&users);
        let names: Vec<&str> = view.rows.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, ["Ervin", "Glenna", "Kurtis", "Leanne"]);
    }

    #[test]
    fn test_filter_editing() {
        let mut state = TableState::default();
        state.push_filter_char('a');
        state.push_filter_char('b');
        assert_eq!(state.filter().text(), "ab");
        state.pop_filter_char();
        assert_eq!(state.filter().text(), "a");
        state.pop_filter_char();
        state.pop_filter_char();
        assert!(state.filter().is_empty());
    }

    #[test]
    fn test_selection() {
        let users = ten();
        let mut state = TableState::default();
        assert!(state.selected(&users).is_none());
        state.select(4);
        assert_eq!(state.selected(&users).map(|u| u.name.as_str()), Some("Patricia"));
        state.clear_selection();
        assert_eq!(state.selected_id(), None);
        state.select(99);
        assert!(state.selected(&users).is_none());
    }

    #[test]
    fn test_repeated_views_hit_cache() {
        let users = ten();
        let mut state = TableState::default();
        state.view(&users);
        state.next_page(&users);
        state.view(&users);
        assert_eq!(state.cache.misses(), 1);
    }

    #[test]
    fn test_empty_list() {
        let users: Arc<[User]> = Vec::<User>::new().into();
        let mut state = TableState::new(0);
        assert_eq!(state.page_size(), 1);
        let view = state.view(&users);
        assert_eq!(view.page_count, 1);
        assert!(view.rows.is_empty());
        assert_eq!(view.total, 0);
    }
}
