use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::hero::{Hero, NewHero};
use crate::infrastructure::transport::{Method, Request, Response, Transport, TransportError};

/// Development/test stand-in for a remote collection store.
///
/// Routes HTTP-shaped requests against `/heroes`, assigns ids on create, and
/// optionally sleeps a fixed latency per request to simulate the network.
pub struct InMemoryBackend {
    heroes: RwLock<Vec<Hero>>,
    latency: Option<Duration>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::with_heroes(Vec::new())
    }

    pub fn with_heroes(heroes: Vec<Hero>) -> Self {
        Self {
            heroes: RwLock::new(heroes),
            latency: None,
        }
    }

    /// Fixed round-trip delay applied to every request.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// The stock demo catalog.
    pub fn seed() -> Vec<Hero> {
        [
            (12, "Dr. Nice"),
            (13, "Bombasto"),
            (14, "Celeritas"),
            (15, "Magneta"),
            (16, "RubberMan"),
            (17, "Dynama"),
            (18, "Dr. IQ"),
            (19, "Magma"),
            (20, "Tornado"),
        ]
        .into_iter()
        .map(|(id, name)| Hero {
            id,
            name: name.to_string(),
        })
        .collect()
    }

    /// Next id: highest existing id + 1, or 11 for an empty collection.
    fn gen_id(heroes: &[Hero]) -> u64 {
        heroes.iter().map(|hero| hero.id).max().map_or(11, |id| id + 1)
    }

    async fn list(&self) -> Result<Response, TransportError> {
        let heroes = self.heroes.read().await;
        Ok(Response::json(serde_json::to_value(&*heroes)?))
    }

    async fn search(&self, term: &str) -> Result<Response, TransportError> {
        let needle = term.to_lowercase();
        let matches = self
            .heroes
            .read()
            .await
            .iter()
            .filter(|hero| hero.name.to_lowercase().contains(&needle))
            .cloned()
            .collect::<Vec<_>>();
        Ok(Response::json(serde_json::to_value(matches)?))
    }

    async fn get_by_id(&self, id: u64) -> Result<Response, TransportError> {
        let heroes = self.heroes.read().await;
        let Some(hero) = heroes.iter().find(|hero| hero.id == id) else {
            return Err(TransportError::not_found(format!("hero {id} not found")));
        };
        Ok(Response::json(serde_json::to_value(hero)?))
    }

    async fn create(&self, body: Option<serde_json::Value>) -> Result<Response, TransportError> {
        let new_hero: NewHero = decode_body(body)?;
        let mut heroes = self.heroes.write().await;
        let hero = Hero {
            id: Self::gen_id(&heroes),
            name: new_hero.name,
        };
        heroes.push(hero.clone());
        debug!(id = hero.id, "created hero");
        Ok(Response::json(serde_json::to_value(hero)?))
    }

    async fn update(&self, body: Option<serde_json::Value>) -> Result<Response, TransportError> {
        let hero: Hero = decode_body(body)?;
        let mut heroes = self.heroes.write().await;
        let Some(slot) = heroes.iter_mut().find(|existing| existing.id == hero.id) else {
            return Err(TransportError::not_found(format!(
                "hero {} not found",
                hero.id
            )));
        };
        *slot = hero.clone();
        Ok(Response::json(serde_json::to_value(hero)?))
    }

    // Deleting an id that is already gone still acks; the caller's goal
    // state is reached either way.
    async fn delete(&self, id: u64) -> Result<Response, TransportError> {
        self.heroes.write().await.retain(|hero| hero.id != id);
        Ok(Response::ack())
    }
}

impl Default for InMemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for InMemoryBackend {
    async fn send(&self, request: Request) -> Result<Response, TransportError> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        let (path, query) = match request.path.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (request.path.as_str(), None),
        };
        let path = path.trim_end_matches('/');

        let Some(rest) = path.strip_prefix("/heroes") else {
            return Err(TransportError::not_found(format!(
                "no route for {}",
                request.path
            )));
        };

        match (request.method, rest) {
            (Method::Get, "") => match query.and_then(|query| query_param(query, "name")) {
                Some(term) => self.search(term).await,
                None => self.list().await,
            },
            (Method::Get, item) => self.get_by_id(parse_id(item)?).await,
            (Method::Post, "") => self.create(request.body).await,
            (Method::Put, "") => self.update(request.body).await,
            (Method::Delete, item) if !item.is_empty() => self.delete(parse_id(item)?).await,
            _ => Err(TransportError::not_found(format!(
                "no route for {}",
                request.path
            ))),
        }
    }
}

fn parse_id(item: &str) -> Result<u64, TransportError> {
    item.strip_prefix('/')
        .and_then(|id| id.parse::<u64>().ok())
        .ok_or_else(|| TransportError::bad_request(format!("invalid hero id in path: {item}")))
}

fn query_param<'a>(query: &'a str, key: &str) -> Option<&'a str> {
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(name, _)| *name == key)
        .map(|(_, value)| value)
}

fn decode_body<T: serde::de::DeserializeOwned>(
    body: Option<serde_json::Value>,
) -> Result<T, TransportError> {
    let body = body.ok_or_else(|| TransportError::bad_request("missing request body"))?;
    serde_json::from_value(body).map_err(|err| TransportError::bad_request(err.to_string()))
}
