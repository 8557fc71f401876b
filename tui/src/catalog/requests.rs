//! Request tickets for in-flight catalog operations.
//!
//! Every request is issued a [`RequestTicket`]. A newer request for the same
//! [`RequestKey`] supersedes the older one, whose result is then dropped on
//! arrival. All spawned requests race the tracker's cancellation token so a
//! torn-down manager receives nothing.

use std::collections::HashMap;
use std::future::Future;

use catalog_client::{CatalogError, Product, ProductId};
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) enum RequestKey {
    List,
    /// Creates never supersede each other; each gets its own key.
    Create(u64),
    /// Update and delete of the same product share a key.
    Product(ProductId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RequestTicket {
    key: RequestKey,
    generation: u64,
}

impl RequestTicket {
    pub(crate) fn key(&self) -> &RequestKey {
        &self.key
    }
}

/// What a finished request produced.
#[derive(Debug)]
pub(crate) enum CatalogOutcome {
    Listed(Result<Vec<Product>, CatalogError>),
    /// `session` is the form session that submitted the draft.
    Created {
        session: u64,
        result: Result<Product, CatalogError>,
    },
    Updated {
        session: u64,
        result: Result<Product, CatalogError>,
    },
    Deleted {
        id: ProductId,
        result: Result<(), CatalogError>,
    },
}

#[derive(Debug)]
pub(crate) struct CatalogResponse {
    pub ticket: RequestTicket,
    pub outcome: CatalogOutcome,
}

#[derive(Debug)]
pub(crate) struct RequestTracker {
    next_generation: u64,
    in_flight: HashMap<RequestKey, u64>,
    cancel: CancellationToken,
}

impl Default for RequestTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestTracker {
    pub(crate) fn new() -> Self {
        Self {
            next_generation: 0,
            in_flight: HashMap::new(),
            cancel: CancellationToken::new(),
        }
    }

    pub(crate) fn issue_list(&mut self) -> RequestTicket {
        self.issue(RequestKey::List)
    }

    pub(crate) fn issue_create(&mut self) -> RequestTicket {
        let key = RequestKey::Create(self.next_generation + 1);
        self.issue(key)
    }

    pub(crate) fn issue_for_product(&mut self, id: ProductId) -> RequestTicket {
        self.issue(RequestKey::Product(id))
    }

    fn issue(&mut self, key: RequestKey) -> RequestTicket {
        self.next_generation += 1;
        let generation = self.next_generation;
        if let Some(previous) = self.in_flight.insert(key.clone(), generation) {
            tracing::debug!(?key, previous, generation, "request superseded");
        }
        RequestTicket { key, generation }
    }

    /// Returns true exactly once for the current ticket of a key, and false
    /// for superseded tickets or after cancellation.
    pub(crate) fn settle(&mut self, ticket: &RequestTicket) -> bool {
        if self.cancel.is_cancelled() {
            return false;
        }
        match self.in_flight.get(&ticket.key) {
            Some(&current) if current == ticket.generation => {
                self.in_flight.remove(&ticket.key);
                true
            }
            _ => false,
        }
    }

    pub(crate) fn is_pending(&self, key: &RequestKey) -> bool {
        self.in_flight.contains_key(key)
    }

    pub(crate) fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    pub(crate) fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub(crate) fn cancel_all(&mut self) {
        if self.in_flight() > 0 {
            tracing::debug!(count = self.in_flight(), "cancelling in-flight requests");
        }
        self.cancel.cancel();
        self.in_flight.clear();
    }
}

/// Returned by [`or_cancel`] when the token fired first.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct Cancelled;

/// Race `future` against `token`.
pub(crate) async fn or_cancel<F>(future: F, token: &CancellationToken) -> Result<F::Output, Cancelled>
where
    F: Future,
{
    tokio::select! {
        _ = token.cancelled() => Err(Cancelled),
        res = future => Ok(res),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::time::Duration;
    use tokio::time::sleep;

    #[test]
    fn newer_list_supersedes_older() {
        let mut tracker = RequestTracker::new();
        let first = tracker.issue_list();
        let second = tracker.issue_list();

        assert!(!tracker.settle(&first));
        assert!(tracker.settle(&second));
        assert!(!tracker.is_pending(&RequestKey::List));
    }

    #[test]
    fn settle_is_one_shot() {
        let mut tracker = RequestTracker::new();
        let ticket = tracker.issue_list();
        assert!(tracker.settle(&ticket));
        assert!(!tracker.settle(&ticket));
    }

    #[test]
    fn creates_are_independent() {
        let mut tracker = RequestTracker::new();
        let a = tracker.issue_create();
        let b = tracker.issue_create();

        assert_ne!(a.key(), b.key());
        assert_eq!(tracker.in_flight(), 2);
        assert!(tracker.settle(&a));
        assert!(tracker.settle(&b));
    }

    #[test]
    fn delete_supersedes_pending_update_of_same_product() {
        let mut tracker = RequestTracker::new();
        let update = tracker.issue_for_product(ProductId::from(1));
        let other = tracker.issue_for_product(ProductId::from(2));
        let delete = tracker.issue_for_product(ProductId::from(1));

        assert!(!tracker.settle(&update));
        assert!(tracker.settle(&other));
        assert!(tracker.settle(&delete));
    }

    #[test]
    fn cancel_all_discards_everything() {
        let mut tracker = RequestTracker::new();
        let ticket = tracker.issue_list();
        tracker.cancel_all();

        assert!(!tracker.settle(&ticket));
        assert!(tracker.cancellation_token().is_cancelled());
        assert_eq!(tracker.in_flight(), 0);
    }

    #[tokio::test]
    async fn or_cancel_returns_output_when_future_completes_first() {
        let token = CancellationToken::new();
        assert_eq!(or_cancel(async { 42 }, &token).await, Ok(42));
    }

    #[tokio::test]
    async fn or_cancel_returns_err_when_token_cancelled_first() {
        let token = CancellationToken::new();
        let token_clone = token.clone();
        let cancel_handle = tokio::spawn(async move {
            sleep(Duration::from_millis(10)).await;
            token_clone.cancel();
        });

        let result = or_cancel(
            async {
                sleep(Duration::from_millis(200)).await;
                7
            },
            &token,
        )
        .await;

        cancel_handle.await.expect("cancel task panicked");
        assert_eq!(result, Err(Cancelled));
    }
}
