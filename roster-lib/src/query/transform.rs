//! Filter + sort pipeline and its memoized form.

use std::sync::Arc;

use log::trace;

use super::SortMode;
use super::TextFilter;
use crate::model::User;

/// Filters then sorts `users`, returning them in display order.
///
/// Never fails; an empty input gives an empty output.
pub fn transform<'a>(users: &'a [User], filter: &TextFilter, sort: SortMode) -> Vec<&'a User> {
    let mut kept = filter.apply(users);
    sort.apply(&mut kept);
    kept
}

fn transform_indices(users: &[User], filter: &TextFilter, sort: SortMode) -> Vec<usize> {
    let mut indices: Vec<usize> = users
        .iter()
        .enumerate()
        .filter(|(_, user)| filter.matches(user))
        .map(|(i, _)| i)
        .collect();
    if sort != SortMode::Unsorted {
        indices.sort_by(|&a, &b| sort.compare(&users[a], &users[b]));
    }
    indices
}

/// The inputs a cached result was computed from.
#[derive(Debug)]
struct CacheKey {
    users: Arc<[User]>,
    filter: TextFilter,
    sort: SortMode,
}

impl CacheKey {
    fn matches(&self, users: &Arc<[User]>, filter: &TextFilter, sort: SortMode) -> bool {
        Arc::ptr_eq(&self.users, users) && self.filter == *filter && self.sort == sort
    }
}

/// Remembers the last transform result.
///
/// The result is recomputed only when the user list, the filter text or the
/// sort mode changes. The list is compared by identity (the same shared
/// allocation), not by content, which matches how the list is produced: it
/// is replaced wholesale on every successful fetch.
///
/// Results are indices into the user list so the cache does not borrow it.
#[derive(Debug, Default)]
pub struct TransformCache {
    key: Option<CacheKey>,
    indices: Vec<usize>,
    hits: u64,
    misses: u64,
}

impl TransformCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the display-ordered indices for these inputs.
    pub fn get(&mut self, users: &Arc<[User]>, filter: &TextFilter, sort: SortMode) -> &[usize] {
        let fresh = self
            .key
            .as_ref()
            .is_some_and(|key| key.matches(users, filter, sort));

        if fresh {
            self.hits += 1;
        } else {
            self.misses += 1;
            self.indices = transform_indices(users, filter, sort);
            trace!(
                "transform recomputed: {} of {} users, filter {:?}, {}",
                self.indices.len(),
                users.len(),
                filter.text(),
                sort
            );
            self.key = Some(CacheKey {
                users: Arc::clone(users),
                filter: filter.clone(),
                sort,
            });
        }

        &self.indices
    }

    /// Number of lookups answered from the cache.
    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// Number of lookups that recomputed the transform.
    pub fn misses(&self) -> u64 {
        self.misses
    }
}
