use std::future::Future;
use std::sync::Arc;

use tracing::error;

use crate::application::outcome::Outcome;
use crate::domain::hero::{Hero, NewHero};
use crate::infrastructure::transport::{Request, Transport, TransportError};
use crate::messages::MessageLog;

const HEROES_URL: &str = "/heroes";

/// Data access for the hero catalog.
///
/// Translates CRUD intents into transport calls and applies one uniform
/// policy to every operation: log the outcome to the message log, report
/// failures to the operator channel, and resolve with a fallback instead of
/// returning an error. Callers never have to handle a raised failure; see
/// [`Outcome`] for how degraded results stay distinguishable.
pub struct HeroService {
    transport: Arc<dyn Transport>,
    messages: Arc<MessageLog>,
}

impl HeroService {
    pub fn new(transport: Arc<dyn Transport>, messages: Arc<MessageLog>) -> Self {
        Self {
            transport,
            messages,
        }
    }

    /// GET the full catalog. Fallback: empty list.
    pub async fn get_heroes(&self) -> Outcome<Vec<Hero>> {
        self.run("getHeroes", Vec::new(), async {
            let heroes = self.fetch_heroes(Request::get(HEROES_URL)).await?;
            self.log("fetched heroes").await;
            Ok(heroes)
        })
        .await
    }

    /// GET one hero by id. Fallback: `None`. A missing id surfaces as a
    /// degraded outcome like any other transport failure.
    pub async fn get_hero(&self, id: u64) -> Outcome<Option<Hero>> {
        let operation = format!("getHero id={id}");
        self.run(&operation, None, async {
            let hero = self
                .fetch_hero(Request::get(format!("{HEROES_URL}/{id}")))
                .await?;
            self.log(&format!("fetched hero id={id}")).await;
            Ok(Some(hero))
        })
        .await
    }

    /// POST a new hero. The backend assigns the id and returns the full
    /// record. Fallback: `None`.
    pub async fn add_hero(&self, new_hero: NewHero) -> Outcome<Option<Hero>> {
        self.run("addHero", None, async {
            let body = serde_json::to_value(&new_hero)?;
            let hero = self.fetch_hero(Request::post(HEROES_URL, body)).await?;
            self.log(&format!("added hero w/ id={}", hero.id)).await;
            Ok(Some(hero))
        })
        .await
    }

    /// PUT the modified hero. The collection URL is addressed; the body's id
    /// selects the record to replace.
    pub async fn update_hero(&self, hero: &Hero) -> Outcome<()> {
        self.run("updateHero", (), async {
            let body = serde_json::to_value(hero)?;
            self.transport.send(Request::put(HEROES_URL, body)).await?;
            self.log(&format!("updated hero id={}", hero.id)).await;
            Ok(())
        })
        .await
    }

    /// DELETE by id.
    pub async fn delete_hero(&self, id: u64) -> Outcome<()> {
        self.run("deleteHero", (), async {
            self.transport
                .send(Request::delete(format!("{HEROES_URL}/{id}")))
                .await?;
            self.log(&format!("deleted hero id={id}")).await;
            Ok(())
        })
        .await
    }

    /// GET heroes whose name contains the term. A blank term resolves to an
    /// empty list without touching the transport. Fallback: empty list.
    pub async fn search_heroes(&self, term: &str) -> Outcome<Vec<Hero>> {
        if term.trim().is_empty() {
            return Outcome::Ok(Vec::new());
        }
        self.run("searchHeroes", Vec::new(), async {
            let heroes = self
                .fetch_heroes(Request::get(format!("{HEROES_URL}/?name={term}")))
                .await?;
            if heroes.is_empty() {
                self.log(&format!("no heroes matching \"{term}\"")).await;
            } else {
                self.log(&format!("found heroes matching \"{term}\"")).await;
            }
            Ok(heroes)
        })
        .await
    }

    /// Failure interception shared by every operation: report the raw error
    /// to the operator channel, append a readable entry to the message log,
    /// and resolve with the fallback instead of raising.
    async fn run<T, F>(&self, operation: &str, fallback: T, call: F) -> Outcome<T>
    where
        F: Future<Output = Result<T, TransportError>>,
    {
        match call.await {
            Ok(value) => Outcome::Ok(value),
            Err(cause) => {
                error!(operation, error = %cause, "substituting fallback");
                self.log(&format!("{operation} failed: {cause}")).await;
                Outcome::Degraded { fallback, cause }
            }
        }
    }

    async fn fetch_heroes(&self, request: Request) -> Result<Vec<Hero>, TransportError> {
        let response = self.transport.send(request).await?;
        Ok(serde_json::from_value(response.body)?)
    }

    async fn fetch_hero(&self, request: Request) -> Result<Hero, TransportError> {
        let response = self.transport.send(request).await?;
        Ok(serde_json::from_value(response.body)?)
    }

    async fn log(&self, message: &str) {
        self.messages.add(format!("HeroService: {message}")).await;
    }
}
