//! Text search over the ledger and pagination of the filtered results.

use moneta_domain::Expense;

/// A contiguous page sliced out of a filtered sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    pub page_index: usize,
    pub total_items: usize,
    /// Always at least 1, even for an empty sequence.
    pub total_pages: usize,
}

/// Keeps records whose description or category label contains `query`,
/// case-insensitively. An empty query matches everything.
pub fn filter(expenses: &[Expense], query: &str) -> Vec<Expense> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return expenses.to_vec();
    }
    expenses
        .iter()
        .filter(|expense| {
            expense.description.to_lowercase().contains(&needle)
                || expense.category.label().to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

/// Slices `[page_index·page_size, page_index·page_size + page_size)` out of
/// `items`, clipped to bounds. A page beyond the end yields an empty slice,
/// not an error.
pub fn paginate<T>(items: &[T], page_index: usize, page_size: usize) -> Page<'_, T> {
    let page_size = page_size.max(1);
    let start = page_index.saturating_mul(page_size).min(items.len());
    let end = start.saturating_add(page_size).min(items.len());
    Page {
        items: &items[start..end],
        page_index,
        total_items: items.len(),
        total_pages: total_pages(items.len(), page_size),
    }
}

/// Number of pages needed for `count` items, minimum 1.
pub fn total_pages(count: usize, page_size: usize) -> usize {
    let page_size = page_size.max(1);
    count.div_ceil(page_size).max(1)
}

/// Pulls a requested page index back into range.
///
/// Pagination is recomputed from the filtered sequence, so when a query
/// shrinks the result set below the current page's start the caller clamps
/// the index instead of silently showing an out-of-range empty page.
pub fn clamped_page(count: usize, page_size: usize, requested: usize) -> usize {
    requested.min(total_pages(count, page_size) - 1)
}
