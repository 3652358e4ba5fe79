use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use herodex::{
    AppConfig, Hero, HeroService, InMemoryBackend, MessageLog, NewHero, SearchPipeline,
};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Scripted walkthrough of the catalog client: list, add, rename, delete,
/// then a bursty search, followed by a dump of the message log.
#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let config = AppConfig::from_env().context("failed to load configuration")?;

    let messages = Arc::new(MessageLog::new());
    let backend = Arc::new(
        InMemoryBackend::with_heroes(InMemoryBackend::seed())
            .with_latency(config.backend_latency),
    );
    let service = Arc::new(HeroService::new(backend, Arc::clone(&messages)));

    let heroes = service.get_heroes().await.into_value();
    println!("{} heroes in the catalog:", heroes.len());
    for hero in &heroes {
        println!("  {:>3}  {}", hero.id, hero.name);
    }

    if let Some(added) = service.add_hero(NewHero::named("Stormwind")).await.into_value() {
        println!("\nadded {:?} as id {}", added.name, added.id);

        let renamed = Hero {
            id: added.id,
            name: "Stormcaller".to_string(),
        };
        service.update_hero(&renamed).await.into_value();
        service.delete_hero(renamed.id).await.into_value();
    }

    // Keystroke burst: only the settled term reaches the backend.
    let (pipeline, mut results) = SearchPipeline::spawn(Arc::clone(&service), config.debounce);
    for term in ["m", "ma", "mag", "magn"] {
        pipeline.search(term);
        tokio::time::sleep(Duration::from_millis(80)).await;
    }
    if let Some(found) = results.recv().await {
        println!("\nsearch settled on {} match(es):", found.len());
        for hero in &found {
            println!("  {:>3}  {}", hero.id, hero.name);
        }
    }

    println!("\nmessage log:");
    for line in messages.messages().await {
        println!("  {line}");
    }

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("herodex=info")))
        .with(tracing_subscriber::fmt::layer())
        .init();
}
