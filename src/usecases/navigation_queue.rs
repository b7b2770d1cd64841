use std::sync::{
    atomic::{AtomicU64, Ordering},
    Mutex as StdMutex,
};

use anyhow::Result;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::{
    domain::navigation::{MessageAnchor, NavigationDecision, NavigationRequest},
    infra::config::NavigationPrefs,
    usecases::{
        contracts::{ConversationDirectory, MessageSliceLoader, PendingPayloadStore, ViewPort},
        resolve_navigation,
    },
};

/// How a submitted navigation request ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigateOutcome {
    Committed(NavigationDecision),
    /// A newer request for a different target won the race; this one was
    /// abandoned before touching view state.
    Superseded,
}

#[derive(Debug, Clone, Copy, Default)]
struct LatestRequest {
    seq: u64,
    chat_id: i64,
}

/// Serializes navigation commits against one displayed-view slot.
///
/// Requests may resolve their target concurrently, but only one at a time
/// may mutate the view; waiters queue in FIFO order on the view lock with no
/// silent drops. A request superseded by a newer one for a different target
/// abandons at the commit boundary.
pub struct NavigationCoordinator<D, L, P, V>
where
    D: ConversationDirectory,
    L: MessageSliceLoader,
    P: PendingPayloadStore,
    V: ViewPort,
{
    directory: D,
    loader: L,
    payloads: P,
    view: Mutex<V>,
    prefs: NavigationPrefs,
    submitted: AtomicU64,
    latest: StdMutex<LatestRequest>,
}

impl<D, L, P, V> NavigationCoordinator<D, L, P, V>
where
    D: ConversationDirectory,
    L: MessageSliceLoader,
    P: PendingPayloadStore,
    V: ViewPort,
{
    pub fn new(directory: D, loader: L, payloads: P, view: V, prefs: NavigationPrefs) -> Self {
        Self {
            directory,
            loader,
            payloads,
            view: Mutex::new(view),
            prefs,
            submitted: AtomicU64::new(0),
            latest: StdMutex::new(LatestRequest::default()),
        }
    }

    /// The displayed-view slot, for hosts that need direct read access.
    pub fn view(&self) -> &Mutex<V> {
        &self.view
    }

    /// Resolves and commits one navigation request targeting `chat_id`.
    pub async fn navigate(
        &self,
        chat_id: i64,
        mut request: NavigationRequest,
    ) -> Result<NavigateOutcome> {
        let seq = self.begin(chat_id);

        if request.target.is_none() {
            // Suspension point: the view may move on while we resolve.
            request.target = self.directory.resolve_conversation(chat_id).await;
        }

        let mut view = self.view.lock().await;

        if self.is_superseded(seq, chat_id) {
            debug!(chat_id, seq, "navigation superseded before commit");
            return Ok(NavigateOutcome::Superseded);
        }

        let before = view.snapshot();
        let decision = resolve_navigation::resolve(&request, &before, &self.directory, &self.prefs);

        let decision = match decision {
            NavigationDecision::ReuseInPlace { refresh } => {
                let slice = self.load_slice(chat_id, &refresh).await?;

                let fresh = view.snapshot();
                if fresh == before {
                    let payload = self.payloads.take(chat_id);
                    view.refresh_in_place(&refresh, slice, payload).await?;
                    NavigationDecision::ReuseInPlace { refresh }
                } else {
                    // The displayed view changed under the awaited slice
                    // load; the reuse decision must not be applied against a
                    // view that no longer exists. Recompute, skipping the
                    // reuse rule.
                    debug!(chat_id, "reuse target went stale, recomputing");
                    let mut retry = request.clone();
                    retry.force_new_view = true;
                    let fallback =
                        resolve_navigation::resolve(&retry, &fresh, &self.directory, &self.prefs);
                    self.commit(&mut view, &fallback)?;
                    fallback
                }
            }
            other => {
                self.commit(&mut view, &other)?;
                other
            }
        };

        Ok(NavigateOutcome::Committed(decision))
    }

    fn begin(&self, chat_id: i64) -> u64 {
        let seq = self.submitted.fetch_add(1, Ordering::SeqCst) + 1;
        let mut latest = self.latest.lock().expect("latest-request lock");
        *latest = LatestRequest { seq, chat_id };
        seq
    }

    fn is_superseded(&self, seq: u64, chat_id: i64) -> bool {
        let latest = self.latest.lock().expect("latest-request lock");
        latest.seq > seq && latest.chat_id != chat_id
    }

    async fn load_slice(
        &self,
        chat_id: i64,
        anchor: &MessageAnchor,
    ) -> Result<Vec<crate::domain::message_record::MessageRecord>> {
        match anchor {
            MessageAnchor::JumpTo(message_id) => {
                self.loader.load_around_message(chat_id, *message_id).await
            }
            MessageAnchor::MostRecent => self.loader.load_most_recent(chat_id).await,
        }
    }

    fn commit(&self, view: &mut V, decision: &NavigationDecision) -> Result<()> {
        match decision {
            NavigationDecision::Replace { .. } | NavigationDecision::OpenSecondary { .. } => {
                view.apply(decision)
            }
            NavigationDecision::Denied { reason } => {
                warn!(?reason, "navigation denied");
                Ok(())
            }
            NavigationDecision::ReuseInPlace { .. } | NavigationDecision::NoOp => Ok(()),
        }
    }
}
