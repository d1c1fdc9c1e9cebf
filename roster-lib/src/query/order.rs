//! Sort modes for the user list.

use std::cmp::Ordering;
use std::fmt;

use crate::model::User;

/// How the filtered list is ordered.
///
/// The mode only changes on explicit selection; there are no automatic
/// transitions and no terminal state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortMode {
    /// Keep the fetch order.
    #[default]
    Unsorted,
    /// By name, A-Z.
    Ascending,
    /// By name, Z-A.
    Descending,
}

impl SortMode {
    /// Every mode, in the order a selector lists them.
    pub const ALL: [SortMode; 3] = [SortMode::Unsorted, SortMode::Ascending, SortMode::Descending];

    /// Human-readable label for selectors.
    pub fn label(self) -> &'static str {
        match self {
            SortMode::Unsorted => "No sort",
            SortMode::Ascending => "Name A-Z",
            SortMode::Descending => "Name Z-A",
        }
    }

    /// Position of this mode in [`SortMode::ALL`].
    pub fn index(self) -> usize {
        match self {
            SortMode::Unsorted => 0,
            SortMode::Ascending => 1,
            SortMode::Descending => 2,
        }
    }

    /// Mode at `index` in [`SortMode::ALL`], if any.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Sorts `users` in place.
    ///
    /// The sort is stable, so users with equal names keep their relative
    /// order in both directions.
    pub fn apply(self, users: &mut [&User]) {
        if self != SortMode::Unsorted {
            users.sort_by(|a, b| self.compare(a, b));
        }
    }

    /// Compares two users under this mode.
    ///
    /// [`SortMode::Unsorted`] treats every pair as equal, which a stable sort
    /// turns into "keep the current order".
    pub fn compare(self, a: &User, b: &User) -> Ordering {
        match self {
            SortMode::Unsorted => Ordering::Equal,
            SortMode::Ascending => compare_names(&a.name, &b.name),
            SortMode::Descending => compare_names(&b.name, &a.name),
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Compares two names the way a human-facing collation would.
///
/// Letters compare case-insensitively first; when two names only differ in
/// case, the lowercase form sorts first. Remaining ties fall back to code
/// point order so the result is a total order.
///
/// Accents are not folded: "Émile" sorts after every name starting with "Z"
/// instead of next to the other "E" names.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
        .then_with(|| case_order(a, b))
        .then_with(|| a.cmp(b))
}

fn case_order(a: &str, b: &str) -> Ordering {
    a.chars()
        .zip(b.chars())
        .find(|(x, y)| x != y)
        .map_or(Ordering::Equal, |(x, y)| x.is_uppercase().cmp(&y.is_uppercase()))
}
