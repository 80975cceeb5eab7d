use std::collections::HashSet;

use crate::expansion::ExpansionTracker;
use crate::filter::filter_posts;
use crate::pagination::{page_slice, total_pages, DEFAULT_PAGE_SIZE};
use crate::post::{order_by_published, Post};

/// Why the visible list is empty, so the screen can tell "nothing
/// published yet" apart from "nothing matches your search".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyReason {
    NoPosts,
    NoMatches,
}

/// Screen-local feed state: the full fetched batch plus the derived
/// search/pagination/expansion view over it. One instance per mounted
/// screen; dropped with it.
#[derive(Debug, Clone)]
pub struct FeedState {
    all_posts: Vec<Post>,
    visible: Vec<Post>,
    query: String,
    page: usize,
    page_size: usize,
    expansion: ExpansionTracker,
}

impl FeedState {
    pub fn new(page_size: usize) -> Self {
        assert!(page_size > 0, "page size must be positive");
        Self {
            all_posts: Vec::new(),
            visible: Vec::new(),
            query: String::new(),
            page: 1,
            page_size,
            expansion: ExpansionTracker::new(),
        }
    }

    /// Replaces the batch wholesale after a successful fetch. The batch is
    /// reordered most-recent-first, the visible list recomputed against the
    /// current query, the page reset, and expansion flags for vanished
    /// posts pruned. A failed fetch must simply not call this.
    pub fn apply_fetch(&mut self, mut posts: Vec<Post>) {
        order_by_published(&mut posts);
        self.all_posts = posts;
        tracing::debug!(count = self.all_posts.len(), "feed batch replaced");

        let live: HashSet<i64> = self.all_posts.iter().map(|p| p.id).collect();
        self.expansion.retain_ids(&live);
        self.recompute_visible();
    }

    /// Live search input. Any change recomputes the visible list and puts
    /// the reader back on page 1.
    pub fn set_query(&mut self, query: impl Into<String>) {
        let query = query.into();
        if query == self.query {
            return;
        }
        self.query = query;
        self.recompute_visible();
    }

    /// Moves to a 1-based page. Out-of-range requests are rejected and
    /// return `false`; the screen should already disable the affordance at
    /// the boundaries.
    pub fn set_page(&mut self, page: usize) -> bool {
        if page < 1 || page > self.total_pages() {
            return false;
        }
        self.page = page;
        true
    }

    pub fn toggle_expanded(&mut self, id: i64) {
        self.expansion.toggle(id);
    }

    pub fn is_expanded(&self, id: i64) -> bool {
        self.expansion.is_expanded(id)
    }

    fn recompute_visible(&mut self) {
        self.visible = filter_posts(&self.all_posts, &self.query);
        self.page = 1;
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.visible.len(), self.page_size)
    }

    pub fn all_posts(&self) -> &[Post] {
        &self.all_posts
    }

    /// Ordered + filtered feed, before pagination.
    pub fn visible_posts(&self) -> &[Post] {
        &self.visible
    }

    /// The slice the screen actually renders.
    pub fn current_page(&self) -> &[Post] {
        page_slice(&self.visible, self.page, self.page_size)
    }

    /// The `n` most recent posts regardless of query, for the home screen.
    pub fn recent(&self, n: usize) -> &[Post] {
        &self.all_posts[..n.min(self.all_posts.len())]
    }

    /// `None` while there is something to show.
    pub fn empty_reason(&self) -> Option<EmptyReason> {
        if !self.visible.is_empty() {
            None
        } else if self.all_posts.is_empty() {
            Some(EmptyReason::NoPosts)
        } else {
            Some(EmptyReason::NoMatches)
        }
    }
}

impl Default for FeedState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn batch(n: i64) -> Vec<Post> {
        let now = Utc::now();
        (1..=n)
            .map(|id| Post {
                id,
                title: format!("Post {}", id),
                body: format!("body of post {}", id),
                image: None,
                author_id: 1,
                published_at: now - Duration::hours(id),
            })
            .collect()
    }

    #[test]
    fn thirteen_posts_paginate_into_three_pages() {
        let mut state = FeedState::new(6);
        state.apply_fetch(batch(13));

        assert_eq!(state.total_pages(), 3);
        assert_eq!(state.current_page().len(), 6);
        assert!(state.set_page(2));
        assert_eq!(state.current_page().len(), 6);
        assert!(state.set_page(3));
        assert_eq!(state.current_page().len(), 1);
    }

    #[test]
    fn out_of_range_pages_are_rejected() {
        let mut state = FeedState::new(6);
        state.apply_fetch(batch(13));
        state.set_page(2);

        assert!(!state.set_page(0));
        assert!(!state.set_page(4));
        assert_eq!(state.page(), 2);
    }

    #[test]
    fn query_change_resets_page() {
        let mut state = FeedState::new(6);
        state.apply_fetch(batch(13));
        state.set_page(3);

        state.set_query("post 1");
        assert_eq!(state.page(), 1);
    }

    #[test]
    fn empty_query_shows_everything_in_order() {
        let mut state = FeedState::new(6);
        state.apply_fetch(batch(5));

        assert_eq!(state.visible_posts(), state.all_posts());
        // Свежие посты первыми
        let ids: Vec<i64> = state.all_posts().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn search_matches_title_or_body() {
        let now = Utc::now();
        let mut state = FeedState::new(6);
        state.apply_fetch(vec![
            Post {
                id: 1,
                title: "Go basics".into(),
                body: "...".into(),
                image: None,
                author_id: 1,
                published_at: now,
            },
            Post {
                id: 2,
                title: "Rust intro".into(),
                body: "...".into(),
                image: None,
                author_id: 1,
                published_at: now - Duration::hours(1),
            },
        ]);

        state.set_query("go");
        let ids: Vec<i64> = state.visible_posts().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn refetch_replaces_batch_and_prunes_expansion() {
        let mut state = FeedState::new(6);
        state.apply_fetch(batch(3));
        state.toggle_expanded(1);
        state.toggle_expanded(3);

        // Пост 3 исчез из новой выборки
        state.apply_fetch(batch(2));
        assert!(state.is_expanded(1));
        assert!(!state.is_expanded(3));
    }

    #[test]
    fn failed_refresh_keeps_last_known_good_batch() {
        let mut state = FeedState::new(6);
        state.apply_fetch(batch(10));

        // Протокол обновления: при ошибке выборки apply_fetch не вызывается
        let refresh: Result<Vec<Post>, &str> = Err("network down");
        if let Ok(posts) = refresh {
            state.apply_fetch(posts);
        }

        assert_eq!(state.all_posts().len(), 10);
        assert_eq!(state.empty_reason(), None);
    }

    #[test]
    fn empty_states_are_distinguished() {
        let mut state = FeedState::new(6);
        assert_eq!(state.empty_reason(), Some(EmptyReason::NoPosts));

        state.apply_fetch(batch(2));
        assert_eq!(state.empty_reason(), None);

        state.set_query("no such thing");
        assert_eq!(state.empty_reason(), Some(EmptyReason::NoMatches));
    }

    #[test]
    fn recent_returns_newest_prefix() {
        let mut state = FeedState::new(6);
        state.apply_fetch(batch(10));

        let ids: Vec<i64> = state.recent(4).iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
        assert_eq!(state.recent(99).len(), 10);
    }
}
