//! Page type for the paginated user list.

/// Rows shown per page unless configured otherwise.
pub const PAGE_SIZE: usize = 4;

/// Number of pages needed to show `len` items, `size` per page.
///
/// An empty list still has one (empty) page, so page 1 is always valid.
/// A `size` of 0 is treated as 1.
pub fn page_count(len: usize, size: usize) -> usize {
    len.div_ceil(size.max(1)).max(1)
}

/// Slices one page out of `items`.
///
/// `number` is 1-based and is clamped into `[1, page_count]`, so an
/// out-of-range request returns the nearest valid page instead of an empty
/// one.
///
/// # Example
///
/// ```
/// use roster_lib::query::paginate;
///
/// let items: Vec<u32> = (0..10).collect();
/// let page = paginate(&items, 3, 4);
/// assert_eq!(page.items(), &[8, 9]);
/// assert_eq!(page.count(), 3);
/// assert!(!page.has_next());
/// ```
pub fn paginate<T>(items: &[T], number: usize, size: usize) -> Page<'_, T> {
    let size = size.max(1);
    let count = page_count(items.len(), size);
    let number = number.clamp(1, count);
    let start = ((number - 1) * size).min(items.len());
    let end = (start + size).min(items.len());

    Page {
        items: &items[start..end],
        number,
        count,
        size,
        total: items.len(),
    }
}

/// One page of a list with pagination information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<'a, T> {
    items: &'a [T],
    number: usize,
    count: usize,
    size: usize,
    total: usize,
}

impl<'a, T> Page<'a, T> {
    /// Returns the items on this page.
    pub fn items(&self) -> &'a [T] {
        self.items
    }

    /// Returns the 1-based page number after clamping.
    pub fn number(&self) -> usize {
        self.number
    }

    /// Returns the total number of pages (at least 1).
    pub fn count(&self) -> usize {
        self.count
    }

    /// Returns the page size.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the length of the whole list.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Returns `true` if this page has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of items on this page.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if a page precedes this one.
    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    /// Returns `true` if a page follows this one.
    pub fn has_next(&self) -> bool {
        self.number < self.count
    }
}
