use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One blog article as seen by the feed. The backend resolves authors
/// separately; here `author_id` stays an opaque reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub body: String,
    /// Base64 payload or URL. `None` means the post has no image and the
    /// screen renders nothing in its place, not a placeholder.
    pub image: Option<String>,
    pub author_id: i64,
    pub published_at: DateTime<Utc>,
}

impl Post {
    pub fn new(id: i64, title: String, body: String, author_id: i64) -> Self {
        Self {
            id,
            title,
            body,
            image: None,
            author_id,
            published_at: Utc::now(),
        }
    }
}

/// Sorts a fetched batch most-recent-first. Equal timestamps fall back to
/// `id` descending so the same batch always renders in the same order.
pub fn order_by_published(posts: &mut [Post]) {
    posts.sort_by(|a, b| {
        b.published_at
            .cmp(&a.published_at)
            .then_with(|| b.id.cmp(&a.id))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn post_at(id: i64, ts: &str) -> Post {
        let published_at = NaiveDateTime::parse_from_str(ts, "%Y-%m-%d %H:%M:%S")
            .unwrap()
            .and_utc();
        Post {
            id,
            title: format!("post {}", id),
            body: String::new(),
            image: None,
            author_id: 1,
            published_at,
        }
    }

    #[test]
    fn orders_most_recent_first() {
        let mut posts = vec![
            post_at(1, "2024-01-01 10:00:00"),
            post_at(2, "2024-03-01 10:00:00"),
            post_at(3, "2024-02-01 10:00:00"),
        ];
        order_by_published(&mut posts);

        let ids: Vec<i64> = posts.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
        for pair in posts.windows(2) {
            assert!(pair[0].published_at >= pair[1].published_at);
        }
    }

    #[test]
    fn equal_timestamps_break_ties_by_id_descending() {
        let mut posts = vec![
            post_at(5, "2024-01-01 10:00:00"),
            post_at(9, "2024-01-01 10:00:00"),
            post_at(7, "2024-01-01 10:00:00"),
        ];
        order_by_published(&mut posts);
        let ids: Vec<i64> = posts.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![9, 7, 5]);

        // Повторная сортировка не меняет порядок
        let before = posts.clone();
        order_by_published(&mut posts);
        assert_eq!(before, posts);
    }
}
