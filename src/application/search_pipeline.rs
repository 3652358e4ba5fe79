use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{Instant, sleep_until};
use tracing::debug;

use crate::application::hero_service::HeroService;
use crate::domain::hero::Hero;

/// Turns a bursty stream of raw query strings into a well-paced stream of
/// result lists.
///
/// Terms pushed via [`search`](Self::search) are debounced (the timer
/// restarts on every keystroke), deduplicated against the last term actually
/// dispatched, and resolved through the hero service. When dispatches
/// overlap, only the most recent one may emit: each dispatch carries a
/// generation token, and a result arriving with a stale token is discarded.
/// The underlying request is never aborted, only its result is dropped.
///
/// Dropping the pipeline handle closes the input and stops the worker task.
pub struct SearchPipeline {
    terms: mpsc::UnboundedSender<String>,
}

impl SearchPipeline {
    /// Spawns the pipeline worker. Returns the input handle and the stream
    /// of result lists, one list per settled, deduplicated term.
    pub fn spawn(
        service: Arc<HeroService>,
        debounce: Duration,
    ) -> (Self, mpsc::UnboundedReceiver<Vec<Hero>>) {
        let (term_tx, term_rx) = mpsc::unbounded_channel();
        let (result_tx, result_rx) = mpsc::unbounded_channel();
        tokio::spawn(run(service, debounce, term_rx, result_tx));
        (Self { terms: term_tx }, result_rx)
    }

    /// Push a search term into the pipeline. Safe to call on every
    /// keystroke.
    pub fn search(&self, term: impl Into<String>) {
        // A closed channel means the subscription ended; late terms are
        // simply dropped.
        let _ = self.terms.send(term.into());
    }
}

struct Dispatched {
    generation: u64,
    heroes: Vec<Hero>,
}

async fn run(
    service: Arc<HeroService>,
    debounce: Duration,
    mut terms: mpsc::UnboundedReceiver<String>,
    results: mpsc::UnboundedSender<Vec<Hero>>,
) {
    let (done_tx, mut done_rx) = mpsc::unbounded_channel::<Dispatched>();

    // Single-slot debounce state: the latest raw term and its deadline.
    let mut pending: Option<(String, Instant)> = None;
    let mut last_dispatched: Option<String> = None;
    let mut generation: u64 = 0;

    loop {
        let deadline = pending.as_ref().map(|(_, deadline)| *deadline);
        let timer = async move {
            match deadline {
                Some(deadline) => sleep_until(deadline).await,
                None => std::future::pending().await,
            }
        };

        tokio::select! {
            term = terms.recv() => {
                let Some(term) = term else { break };
                pending = Some((term, Instant::now() + debounce));
            }
            _ = timer => {
                let Some((term, _)) = pending.take() else { continue };
                if last_dispatched.as_deref() == Some(term.as_str()) {
                    continue;
                }
                generation += 1;
                last_dispatched = Some(term.clone());
                let service = Arc::clone(&service);
                let done = done_tx.clone();
                let token = generation;
                tokio::spawn(async move {
                    let heroes = service.search_heroes(&term).await.into_value();
                    let _ = done.send(Dispatched {
                        generation: token,
                        heroes,
                    });
                });
            }
            Some(dispatched) = done_rx.recv() => {
                if dispatched.generation != generation {
                    debug!(
                        stale = dispatched.generation,
                        latest = generation,
                        "discarding result of superseded search"
                    );
                    continue;
                }
                if results.send(dispatched.heroes).is_err() {
                    break;
                }
            }
        }
    }
}
