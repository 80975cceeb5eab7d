use std::collections::HashSet;

/// Tracks which posts are shown in full rather than truncated. Purely a
/// screen-local flag set; nothing here survives an app restart.
#[derive(Debug, Clone, Default)]
pub struct ExpansionTracker {
    expanded: HashSet<i64>,
}

impl ExpansionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Expands a collapsed post, collapses an expanded one.
    pub fn toggle(&mut self, id: i64) {
        if !self.expanded.insert(id) {
            self.expanded.remove(&id);
        }
    }

    pub fn is_expanded(&self, id: i64) -> bool {
        self.expanded.contains(&id)
    }

    /// Drops entries for posts that are no longer in the feed. Called
    /// after a refetch replaces the batch wholesale.
    pub fn retain_ids(&mut self, live: &HashSet<i64>) {
        let before = self.expanded.len();
        self.expanded.retain(|id| live.contains(id));
        let pruned = before - self.expanded.len();
        if pruned > 0 {
            tracing::debug!(pruned, "dropped expansion flags for posts gone from the feed");
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_is_its_own_inverse() {
        let mut tracker = ExpansionTracker::new();
        assert!(!tracker.is_expanded(7));

        tracker.toggle(7);
        assert!(tracker.is_expanded(7));

        tracker.toggle(7);
        assert!(!tracker.is_expanded(7));
    }

    #[test]
    fn toggling_one_post_leaves_others_alone() {
        let mut tracker = ExpansionTracker::new();
        tracker.toggle(1);
        tracker.toggle(2);

        tracker.toggle(1);
        assert!(!tracker.is_expanded(1));
        assert!(tracker.is_expanded(2));
    }

    #[test]
    fn retain_ids_prunes_stale_entries() {
        let mut tracker = ExpansionTracker::new();
        tracker.toggle(1);
        tracker.toggle(2);
        tracker.toggle(3);

        let live: HashSet<i64> = [2, 3].into_iter().collect();
        tracker.retain_ids(&live);

        assert!(!tracker.is_expanded(1));
        assert!(tracker.is_expanded(2));
        assert!(tracker.is_expanded(3));
    }
}
