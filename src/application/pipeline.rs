//! Lookup pipeline: fetch one record, turn it into a card, report back.
//!
//! Each request runs on its own worker thread so the terminal event loop
//! keeps handling keys while a request is in flight. Completions are sent
//! back over a channel tagged with the token they were issued under; the
//! application state decides whether a completion is still current.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;

use crate::domain::{build_card, CardConfig, CreatureCard, CreatureSource, LookupResult, Query};

/// A search the application has committed to, waiting to be executed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    pub token: u64,
    pub query: Query,
}

/// The result of executing a [`LookupRequest`].
#[derive(Debug, Clone, PartialEq)]
pub struct LookupCompletion {
    pub token: u64,
    pub outcome: LookupResult<CreatureCard>,
}

/// Fetches and transforms synchronously. Single attempt, no retries.
pub fn run_lookup(
    source: &dyn CreatureSource,
    config: &CardConfig,
    query: &Query,
) -> LookupResult<CreatureCard> {
    let record = source.fetch(query)?;
    Ok(build_card(&record, config))
}

/// Executes lookups off the UI thread.
pub struct LookupWorker {
    source: Arc<dyn CreatureSource>,
    config: Arc<CardConfig>,
    sender: Sender<LookupCompletion>,
}

impl LookupWorker {
    /// Creates a worker and the receiving end its completions arrive on.
    pub fn new(
        source: Arc<dyn CreatureSource>,
        config: Arc<CardConfig>,
    ) -> (Self, Receiver<LookupCompletion>) {
        let (sender, receiver) = mpsc::channel();
        (Self { source, config, sender }, receiver)
    }

    /// Runs `request` on a fresh thread and returns immediately.
    ///
    /// The completion is sent even if a newer request has been issued in
    /// the meantime; discarding stale results is the receiver's job.
    pub fn dispatch(&self, request: LookupRequest) {
        let source = Arc::clone(&self.source);
        let config = Arc::clone(&self.config);
        let sender = self.sender.clone();

        tracing::info!(token = request.token, query = %request.query, "lookup dispatched");

        thread::spawn(move || {
            let outcome = run_lookup(source.as_ref(), &config, &request.query);
            match &outcome {
                Ok(card) => {
                    tracing::info!(token = request.token, name = %card.name, "lookup succeeded")
                }
                Err(err) => tracing::warn!(token = request.token, error = %err, "lookup failed"),
            }
            let completion = LookupCompletion { token: request.token, outcome };
            if sender.send(completion).is_err() {
                tracing::debug!(token = request.token, "receiver gone, completion dropped");
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CreatureRecord, LookupError, Sprites};
    use std::sync::Mutex;
    use std::time::Duration;

    /// Answers from a fixed table and records every query it sees.
    struct FakeSource {
        calls: Mutex<Vec<String>>,
    }

    impl FakeSource {
        fn new() -> Self {
            Self { calls: Mutex::new(Vec::new()) }
        }
    }

    impl CreatureSource for FakeSource {
        fn fetch(&self, query: &Query) -> LookupResult<CreatureRecord> {
            self.calls.lock().unwrap().push(query.to_string());
            match query.as_str() {
                "pikachu" | "25" => Ok(CreatureRecord {
                    id: 25,
                    name: "pikachu".into(),
                    sprites: Sprites::default(),
                    types: vec![],
                    abilities: vec![],
                    height: 4,
                    weight: 60,
                    base_experience: Some(112),
                    stats: vec![],
                }),
                "broken" => Err(LookupError::ParseFailed("unexpected EOF".into())),
                _ => Err(LookupError::NotFound),
            }
        }
    }

    #[test]
    fn test_run_lookup_success() {
        let source = FakeSource::new();
        let query = Query::normalize("pikachu");
        let card = run_lookup(&source, &CardConfig::default(), &query).unwrap();
        assert_eq!(card.name, "Pikachu");
        assert_eq!(card.number, "025");
        assert_eq!(source.calls.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_run_lookup_propagates_errors() {
        let source = FakeSource::new();
        let config = CardConfig::default();

        let err = run_lookup(&source, &config, &Query::normalize("notapokemon")).unwrap_err();
        assert_eq!(err, LookupError::NotFound);

        let err = run_lookup(&source, &config, &Query::normalize("broken")).unwrap_err();
        assert!(matches!(err, LookupError::ParseFailed(_)));
    }

    #[test]
    fn test_worker_reports_completion_with_token() {
        let source = Arc::new(FakeSource::new());
        let (worker, receiver) = LookupWorker::new(source.clone(), Arc::new(CardConfig::default()));

        worker.dispatch(LookupRequest { token: 7, query: Query::normalize("25") });

        let completion = receiver.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(completion.token, 7);
        assert_eq!(completion.outcome.unwrap().name, "Pikachu");
        assert_eq!(source.calls.lock().unwrap().as_slice(), ["25".to_string()]);
    }

    #[test]
    fn test_worker_runs_requests_independently() {
        let (worker, receiver) =
            LookupWorker::new(Arc::new(FakeSource::new()), Arc::new(CardConfig::default()));

        worker.dispatch(LookupRequest { token: 1, query: Query::normalize("missing") });
        worker.dispatch(LookupRequest { token: 2, query: Query::normalize("pikachu") });

        let mut tokens: Vec<u64> = (0..2)
            .map(|_| receiver.recv_timeout(Duration::from_secs(5)).unwrap().token)
            .collect();
        tokens.sort();
        assert_eq!(tokens, vec![1, 2]);
    }
}
