//! Widgets drawn by the app.

mod detail;
mod page_form;
mod search_bar;
mod sort_dropdown;
mod spinner;
mod user_table;

pub use detail::render_detail;
pub use page_form::PageForm;
pub use search_bar::render_search_bar;
pub use sort_dropdown::SortDropdown;
pub use spinner::Spinner;
pub use user_table::render_user_table;
