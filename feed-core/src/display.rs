use chrono::{DateTime, Utc};

/// Per-position truncation thresholds. The first (featured) item in a
/// screen gets more room than the rest; both limits come from the screen
/// configuration instead of being baked into the render loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TruncationPolicy {
    pub featured_max: usize,
    pub regular_max: usize,
}

impl TruncationPolicy {
    /// Thresholds of the home screen: a larger featured card first.
    pub const HOME: Self = Self {
        featured_max: 120,
        regular_max: 80,
    };

    /// The flat articles list treats every card the same.
    pub const ARTICLES: Self = Self {
        featured_max: 120,
        regular_max: 120,
    };

    pub fn max_for_position(&self, index: usize) -> usize {
        if index == 0 {
            self.featured_max
        } else {
            self.regular_max
        }
    }
}

/// Whether a post body needs a "read more" affordance at all.
pub fn needs_truncation(text: &str, max_len: usize) -> bool {
    text.chars().count() > max_len
}

/// First `max_len` characters plus an ellipsis. Counts `char`s, not bytes,
/// so multi-byte text never splits mid-character.
pub fn truncate(text: &str, max_len: usize) -> String {
    if !needs_truncation(text, max_len) {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_len).collect();
    out.push_str("...");
    out
}

/// Relative age for the post footer: hours for anything under a day,
/// a short date beyond that.
pub fn format_relative_age(published_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(published_at);
    let hours = elapsed.num_hours();
    if (0..24).contains(&hours) {
        format!("{}h ago", hours)
    } else {
        published_at.format("%d %b").to_string()
    }
}
