//! Prefetch trigger: asks for the next page when the cursor nears the end.

/// Default number of items from the end that triggers a fetch.
pub const DEFAULT_LOAD_THRESHOLD: usize = 2;

/// A request for more items, emitted at most once per in-flight window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadRequest {
    /// Total item count at the time of the request; used as the page offset.
    pub offset: usize,
}

/// In-flight guard plus proximity threshold.
///
/// The guard is set when a request is emitted and cleared by [`settle`]
/// whenever a batch is merged or a fetch fails, whether or not the batch
/// grew the feed.  If the list did not grow, the very next qualifying
/// navigation fires again.
///
/// [`settle`]: PaginationTrigger::settle
#[derive(Debug, Clone)]
pub struct PaginationTrigger {
    in_flight: bool,
    load_threshold: usize,
}

impl PaginationTrigger {
    pub fn new(load_threshold: usize) -> Self {
        Self {
            in_flight: false,
            load_threshold,
        }
    }

    /// Emit a request if `current_index >= len - threshold` and nothing is
    /// outstanding.
    pub fn check(&mut self, current_index: usize, len: usize) -> Option<LoadRequest> {
        // `len - threshold` can underflow for short lists; compare additively.
        let near_end = current_index.saturating_add(self.load_threshold) >= len;
        if !near_end || self.in_flight {
            return None;
        }
        self.in_flight = true;
        tracing::debug!(current_index, len, "pagination: requesting more");
        Some(LoadRequest { offset: len })
    }

    /// Clear the in-flight guard.
    pub fn settle(&mut self) {
        self.in_flight = false;
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }
}

impl Default for PaginationTrigger {
    fn default() -> Self {
        Self::new(DEFAULT_LOAD_THRESHOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_inside_threshold() {
        let mut trigger = PaginationTrigger::new(2);
        assert_eq!(trigger.check(0, 3), None);
        assert_eq!(trigger.check(1, 3), Some(LoadRequest { offset: 3 }));
        assert!(trigger.is_in_flight());
    }

    #[test]
    fn never_fires_while_in_flight() {
        let mut trigger = PaginationTrigger::new(2);
        assert!(trigger.check(4, 5).is_some());
        for _ in 0..10 {
            assert_eq!(trigger.check(4, 5), None);
        }
        trigger.settle();
        assert_eq!(trigger.check(4, 5), Some(LoadRequest { offset: 5 }));
    }

    #[test]
    fn threshold_larger_than_list_always_qualifies() {
        let mut trigger = PaginationTrigger::new(5);
        assert!(trigger.check(0, 2).is_some());
    }

    #[test]
    fn huge_threshold_does_not_overflow() {
        let mut trigger = PaginationTrigger::new(usize::MAX);
        assert_eq!(trigger.check(1, 3), Some(LoadRequest { offset: 3 }));
    }

    #[test]
    fn zero_threshold_only_fires_past_last_item() {
        let mut trigger = PaginationTrigger::new(0);
        assert_eq!(trigger.check(3, 4), None);
        assert!(trigger.check(0, 0).is_some());
    }
}
