use serde::{Deserialize, Serialize};

/// A catalog entry. Identity is `id`: the backend assigns it on create and
/// two records with the same id refer to the same entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hero {
    pub id: u64,
    pub name: String,
}

/// Creation payload. Carries no id; the backend generates one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewHero {
    pub name: String,
}

impl NewHero {
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
