//! Free-text filter over users.

use crate::model::User;

/// A free-text filter matching users by name or email.
///
/// A user matches when the text is a case-insensitive substring of either
/// field. The text is used literally: surrounding whitespace is significant
/// and an empty filter matches every user.
///
/// # Example
///
/// ```
/// use roster_lib::query::TextFilter;
///
/// let filter = TextFilter::new("GRAHAM");
/// assert_eq!(filter.text(), "GRAHAM");
/// assert!(TextFilter::default().is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextFilter {
    text: String,
    needle: String,
}

impl TextFilter {
    /// Creates a filter for the given text.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let needle = text.to_lowercase();
        Self { text, needle }
    }

    /// Returns the filter text as entered.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns `true` if the filter matches everything.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Returns `true` if `user` passes the filter.
    pub fn matches(&self, user: &User) -> bool {
        if self.needle.is_empty() {
            return true;
        }
        user.name.to_lowercase().contains(&self.needle)
            || user.email.to_lowercase().contains(&self.needle)
    }

    /// Keeps the users that pass the filter, in their original order.
    pub fn apply<'a>(&self, users: &'a [User]) -> Vec<&'a User> {
        users.iter().filter(|user| self.matches(user)).collect()
    }
}
