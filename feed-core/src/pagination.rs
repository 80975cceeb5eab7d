/// Number of posts per page in the articles screen.
pub const DEFAULT_PAGE_SIZE: usize = 6;

/// Total page count for a filtered list. An empty list still has one
/// (empty) page so `page = 1` is always valid.
pub fn total_pages(len: usize, page_size: usize) -> usize {
    debug_assert!(page_size > 0);
    std::cmp::max(1, len.div_ceil(page_size))
}

/// Slice for a 1-based page number, clipped to the list bounds. Pure
/// function of its inputs; the caller owns the current-page state.
pub fn page_slice<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    debug_assert!(page >= 1);
    let start = (page - 1).saturating_mul(page_size).min(items.len());
    let end = (start + page_size).min(items.len());
    &items[start..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thirteen_items_at_six_per_page() {
        let items: Vec<i32> = (0..13).collect();
        assert_eq!(total_pages(items.len(), 6), 3);
        assert_eq!(page_slice(&items, 1, 6).len(), 6);
        assert_eq!(page_slice(&items, 2, 6).len(), 6);
        assert_eq!(page_slice(&items, 3, 6), &[12]);
    }

    #[test]
    fn evenly_divisible_has_full_last_page() {
        let items: Vec<i32> = (0..12).collect();
        assert_eq!(total_pages(items.len(), 6), 2);
        assert_eq!(page_slice(&items, 2, 6).len(), 6);
    }

    #[test]
    fn empty_list_has_one_empty_page() {
        let items: Vec<i32> = vec![];
        assert_eq!(total_pages(0, 6), 1);
        assert!(page_slice(&items, 1, 6).is_empty());
    }

    #[test]
    fn page_past_the_end_is_empty_not_panic() {
        let items: Vec<i32> = (0..5).collect();
        assert!(page_slice(&items, 3, 6).is_empty());
    }

    #[test]
    fn pages_cover_the_list_without_overlap() {
        let items: Vec<i32> = (0..13).collect();
        let mut seen = Vec::new();
        for page in 1..=total_pages(items.len(), 6) {
            seen.extend_from_slice(page_slice(&items, page, 6));
        }
        assert_eq!(seen, items);
    }
}
