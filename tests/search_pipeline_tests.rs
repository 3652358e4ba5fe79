use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use herodex::{
    Hero, HeroService, MessageLog, Request, Response, SearchPipeline, Transport, TransportError,
};
use tokio::sync::mpsc::error::TryRecvError;
use tokio::time::sleep;

const DEBOUNCE: Duration = Duration::from_millis(300);

/// Answers `?name=` searches from a fixed catalog, with a configurable
/// per-term delay, and records every term it was asked for.
struct ScriptedSearch {
    catalog: Vec<Hero>,
    delays: HashMap<String, Duration>,
    terms: Mutex<Vec<String>>,
}

impl ScriptedSearch {
    fn new(names: &[&str]) -> Self {
        Self {
            catalog: names
                .iter()
                .enumerate()
                .map(|(index, name)| Hero {
                    id: 11 + index as u64,
                    name: name.to_string(),
                })
                .collect(),
            delays: HashMap::new(),
            terms: Mutex::new(Vec::new()),
        }
    }

    fn delayed(mut self, term: &str, delay: Duration) -> Self {
        self.delays.insert(term.to_string(), delay);
        self
    }

    fn terms(&self) -> Vec<String> {
        self.terms.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for ScriptedSearch {
    async fn send(&self, request: Request) -> Result<Response, TransportError> {
        let term = request
            .path
            .split_once("?name=")
            .map(|(_, term)| term.to_string())
            .unwrap_or_default();

        self.terms.lock().unwrap().push(term.clone());

        if let Some(delay) = self.delays.get(&term) {
            sleep(*delay).await;
        }

        let needle = term.to_lowercase();
        let matches = self
            .catalog
            .iter()
            .filter(|hero| hero.name.to_lowercase().contains(&needle))
            .cloned()
            .collect::<Vec<_>>();
        Ok(Response::json(serde_json::to_value(matches)?))
    }
}

fn pipeline_over(
    transport: Arc<ScriptedSearch>,
) -> (SearchPipeline, tokio::sync::mpsc::UnboundedReceiver<Vec<Hero>>) {
    let service = Arc::new(HeroService::new(transport, Arc::new(MessageLog::new())));
    SearchPipeline::spawn(service, DEBOUNCE)
}

fn names(heroes: &[Hero]) -> Vec<&str> {
    heroes.iter().map(|hero| hero.name.as_str()).collect()
}

#[tokio::test(start_paused = true)]
async fn a_burst_inside_the_window_dispatches_only_the_last_term() {
    let transport = Arc::new(ScriptedSearch::new(&["Magneta", "Magma", "Tornado"]));
    let (pipeline, mut results) = pipeline_over(Arc::clone(&transport));

    pipeline.search("ma");
    sleep(Duration::from_millis(100)).await;
    pipeline.search("mag");
    sleep(Duration::from_millis(150)).await;
    pipeline.search("magn");

    let emitted = results.recv().await.unwrap();

    assert_eq!(transport.terms(), vec!["magn"]);
    assert_eq!(names(&emitted), vec!["Magneta"]);
}

#[tokio::test(start_paused = true)]
async fn a_superseded_request_never_reaches_the_output() {
    let transport = Arc::new(
        ScriptedSearch::new(&["Slowpoke", "Fastball"])
            .delayed("slow", Duration::from_millis(5_000))
            .delayed("fast", Duration::from_millis(10)),
    );
    let (pipeline, mut results) = pipeline_over(Arc::clone(&transport));

    pipeline.search("slow");
    // Let "slow" settle and go out on the wire before the next keystroke.
    sleep(Duration::from_millis(350)).await;
    pipeline.search("fast");

    let emitted = results.recv().await.unwrap();
    assert_eq!(names(&emitted), vec!["Fastball"]);

    // The slow request eventually completes; its result must be discarded.
    sleep(Duration::from_millis(6_000)).await;
    assert!(matches!(results.try_recv(), Err(TryRecvError::Empty)));
    assert_eq!(transport.terms(), vec!["slow", "fast"]);
}

#[tokio::test(start_paused = true)]
async fn re_settling_the_same_term_dispatches_nothing_new() {
    let transport = Arc::new(ScriptedSearch::new(&["Magneta"]));
    let (pipeline, mut results) = pipeline_over(Arc::clone(&transport));

    pipeline.search("magneta");
    let first = results.recv().await.unwrap();
    assert_eq!(names(&first), vec!["Magneta"]);

    pipeline.search("magneta");
    sleep(Duration::from_millis(1_000)).await;

    assert_eq!(transport.terms().len(), 1);
    assert!(matches!(results.try_recv(), Err(TryRecvError::Empty)));
}

#[tokio::test(start_paused = true)]
async fn spaced_terms_emit_results_in_input_order() {
    let transport = Arc::new(ScriptedSearch::new(&["Magneta", "Magma", "Tornado"]));
    let (pipeline, mut results) = pipeline_over(Arc::clone(&transport));

    pipeline.search("mag");
    let first = results.recv().await.unwrap();
    pipeline.search("tor");
    let second = results.recv().await.unwrap();

    assert_eq!(names(&first), vec!["Magneta", "Magma"]);
    assert_eq!(names(&second), vec!["Tornado"]);
    assert_eq!(transport.terms(), vec!["mag", "tor"]);
}

#[tokio::test(start_paused = true)]
async fn a_blank_settled_term_emits_an_empty_list_without_a_request() {
    let transport = Arc::new(ScriptedSearch::new(&["Magneta"]));
    let (pipeline, mut results) = pipeline_over(Arc::clone(&transport));

    pipeline.search("");

    let emitted = results.recv().await.unwrap();

    assert!(emitted.is_empty());
    assert!(transport.terms().is_empty());
}
