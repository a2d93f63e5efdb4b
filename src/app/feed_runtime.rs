//! Background page fetches so the UI keeps handling gestures while a page
//! is in flight.
//!
//! Results carry the session generation they were requested under; the
//! handler drops anything from a session that has since been torn down.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;

use crate::core::{
    error::FeedError, item::VideoItem, mock::FeedProvider, pagination::LoadRequest,
};

#[derive(Debug)]
pub enum FeedUpdate {
    Loaded {
        generation: u64,
        offset: usize,
        items: Vec<VideoItem>,
    },
    Failed {
        generation: u64,
        error: FeedError,
    },
}

impl FeedUpdate {
    pub fn generation(&self) -> u64 {
        match self {
            Self::Loaded { generation, .. } | Self::Failed { generation, .. } => *generation,
        }
    }
}

/// Fetch one page after `delay`.  Fire-and-forget: there is no cancellation,
/// and a send into a dropped receiver is silently discarded.
pub fn spawn_fetch(
    tx: mpsc::UnboundedSender<FeedUpdate>,
    provider: Arc<dyn FeedProvider>,
    generation: u64,
    request: LoadRequest,
    page_size: usize,
    delay: Duration,
) {
    tracing::debug!(offset = request.offset, page_size, "fetch: start");
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        let update = match provider.provide_more(request.offset, page_size) {
            Ok(items) => FeedUpdate::Loaded {
                generation,
                offset: request.offset,
                items,
            },
            Err(error) => FeedUpdate::Failed { generation, error },
        };
        let _ = tx.send(update);
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::mock::MockProvider;

    #[tokio::test]
    async fn delivers_a_page_tagged_with_generation() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let provider: Arc<dyn FeedProvider> = Arc::new(MockProvider::new(3, 0.0));
        spawn_fetch(tx, provider, 4, LoadRequest { offset: 3 }, 5, Duration::ZERO);

        match rx.recv().await {
            Some(FeedUpdate::Loaded {
                generation,
                offset,
                items,
            }) => {
                assert_eq!(generation, 4);
                assert_eq!(offset, 3);
                assert_eq!(items.len(), 5);
                assert_eq!(items[0].id, "4");
            }
            other => panic!("unexpected update: {other:?}"),
        }
    }

    #[tokio::test]
    async fn provider_errors_become_failed_updates() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let provider: Arc<dyn FeedProvider> = Arc::new(MockProvider::new(3, 1.0));
        spawn_fetch(tx, provider, 1, LoadRequest { offset: 8 }, 5, Duration::ZERO);

        let update = rx.recv().await.expect("an update");
        assert_eq!(update.generation(), 1);
        assert!(matches!(
            update,
            FeedUpdate::Failed {
                error: FeedError::ProviderUnavailable { offset: 8, .. },
                ..
            }
        ));
    }

    #[tokio::test]
    async fn dropped_receiver_is_harmless() {
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        let provider: Arc<dyn FeedProvider> = Arc::new(MockProvider::new(3, 0.0));
        spawn_fetch(tx, provider, 1, LoadRequest { offset: 0 }, 2, Duration::ZERO);
        tokio::task::yield_now().await;
    }
}
