use crate::post::Post;

/// Keeps the posts whose title or body contains `query` as a
/// case-insensitive substring. An empty query keeps everything. The input
/// order is preserved, so running this after `order_by_published` leaves
/// the feed most-recent-first.
pub fn filter_posts(posts: &[Post], query: &str) -> Vec<Post> {
    if query.is_empty() {
        return posts.to_vec();
    }

    let needle = query.to_lowercase();
    posts
        .iter()
        .filter(|p| {
            p.title.to_lowercase().contains(&needle) || p.body.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(id: i64, title: &str, body: &str) -> Post {
        Post::new(id, title.to_string(), body.to_string(), 1)
    }

    #[test]
    fn empty_query_is_identity() {
        let posts = vec![post(1, "Go basics", "intro"), post(2, "Rust intro", "text")];
        assert_eq!(filter_posts(&posts, ""), posts);
    }

    #[test]
    fn matches_title_or_body_case_insensitive() {
        let posts = vec![
            post(1, "Go basics", "learning the language"),
            post(2, "Rust intro", "ownership and borrowing"),
            post(3, "Weekly digest", "news about GO conferences"),
        ];

        let hits = filter_posts(&posts, "go");
        let ids: Vec<i64> = hits.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 3]);

        // Непрошедшие посты действительно не содержат запрос
        for p in &posts {
            if !ids.contains(&p.id) {
                assert!(!p.title.to_lowercase().contains("go"));
                assert!(!p.body.to_lowercase().contains("go"));
            }
        }
    }

    #[test]
    fn preserves_input_order() {
        let posts = vec![
            post(9, "alpha", "x"),
            post(4, "beta alpha", "y"),
            post(7, "gamma", "alpha z"),
        ];
        let ids: Vec<i64> = filter_posts(&posts, "alpha").iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![9, 4, 7]);
    }

    #[test]
    fn no_match_yields_empty() {
        let posts = vec![post(1, "Go basics", "intro")];
        assert!(filter_posts(&posts, "kubernetes").is_empty());
    }
}
