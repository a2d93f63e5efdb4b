//! Data providers: the seam between the feed and wherever pages come from.
//!
//! The bundled [`MockProvider`] synthesises items locally so the feed can be
//! driven without a backend.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::error::FeedError;
use super::item::VideoItem;

/// Produces pages of items.  Ids must be unique within a page and should be
/// unique across the session; the feed de-duplicates either way.
pub trait FeedProvider: Send + Sync + 'static {
    fn provide_more(&self, offset: usize, count: usize) -> Result<Vec<VideoItem>, FeedError>;
}

/// Colours cycled through for generated cards.
const PALETTE: &[&str] = &["orange", "green", "blue", "skyblue", "purple", "crimson", "teal"];

/// Randomised but reproducible pages: the RNG is re-seeded per offset, so the
/// same `(seed, offset)` always yields the same page.
#[derive(Debug, Clone)]
pub struct MockProvider {
    seed: u64,
    /// Probability in `[0, 1]` that a fetch fails.
    fail_rate: f64,
}

impl MockProvider {
    pub fn new(seed: u64, fail_rate: f64) -> Self {
        Self {
            seed,
            fail_rate: if fail_rate.is_finite() {
                fail_rate.clamp(0.0, 1.0)
            } else {
                0.0
            },
        }
    }
}

impl FeedProvider for MockProvider {
    fn provide_more(&self, offset: usize, count: usize) -> Result<Vec<VideoItem>, FeedError> {
        let mut rng = StdRng::seed_from_u64(self.seed.wrapping_add(offset as u64));

        if self.fail_rate > 0.0 && rng.gen_bool(self.fail_rate) {
            return Err(FeedError::ProviderUnavailable {
                offset,
                reason: "simulated network failure".into(),
            });
        }

        let items = (0..count)
            .map(|i| {
                let id = (offset + i + 1).to_string();
                VideoItem {
                    video_url: format!("https://example.com/video{id}.mp4"),
                    color: PALETTE[rng.gen_range(0..PALETTE.len())].to_string(),
                    username: format!("user{id}"),
                    description: format!("This is auto-loaded video #{id} #tiktok #viral"),
                    likes: rng.gen_range(500..10_500),
                    comments: rng.gen_range(50..550),
                    shares: rng.gen_range(20..320),
                    id,
                }
            })
            .collect();
        Ok(items)
    }
}

/// The hand-written items the feed opens with.
pub fn seed_items() -> Vec<VideoItem> {
    let seed = |id: &str, color: &str, description: &str, counts: (u64, u64, u64)| VideoItem {
        id: id.to_string(),
        video_url: format!("https://example.com/video{id}.mp4"),
        color: color.to_string(),
        username: format!("user{id}"),
        description: description.to_string(),
        likes: counts.0,
        comments: counts.1,
        shares: counts.2,
    };

    vec![
        seed(
            "1",
            "green",
            "Check out this amazing video! #trending #viral",
            (1204, 85, 42),
        ),
        seed(
            "2",
            "blue",
            "This is how I make my favorite recipe 🍕 #food #cooking",
            (3621, 128, 76),
        ),
        seed(
            "3",
            "skyblue",
            "Morning routine 🌞 #lifestyle #morning",
            (8902, 342, 156),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn ids_continue_from_offset() {
        let provider = MockProvider::new(7, 0.0);
        let page = provider.provide_more(3, 5).unwrap();
        let ids: Vec<_> = page.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, ["4", "5", "6", "7", "8"]);
        assert_eq!(page[0].username, "user4");
        assert_eq!(page[0].video_url, "https://example.com/video4.mp4");
    }

    #[test]
    fn counters_stay_in_range() {
        let provider = MockProvider::new(42, 0.0);
        for item in provider.provide_more(0, 50).unwrap() {
            assert!((500..10_500).contains(&item.likes));
            assert!((50..550).contains(&item.comments));
            assert!((20..320).contains(&item.shares));
        }
    }

    #[test]
    fn same_seed_and_offset_repeat() {
        let a = MockProvider::new(9, 0.0).provide_more(10, 3).unwrap();
        let b = MockProvider::new(9, 0.0).provide_more(10, 3).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn certain_failure_reports_offset() {
        let provider = MockProvider::new(1, 1.0);
        let err = provider.provide_more(12, 5).unwrap_err();
        assert_eq!(
            err,
            FeedError::ProviderUnavailable {
                offset: 12,
                reason: "simulated network failure".into()
            }
        );
    }

    #[test]
    fn seed_items_are_unique() {
        let items = seed_items();
        assert_eq!(items.len(), 3);
        let ids: HashSet<_> = items.iter().map(|v| &v.id).collect();
        assert_eq!(ids.len(), items.len());
    }
}
