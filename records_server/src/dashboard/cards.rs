//! One card per registry entry, with a live record count.

use serde::Serialize;

use crate::entity::EntityKind;
use crate::error::AppError;
use crate::registry::{page_config, RegistryError};
use crate::routes::reverse;
use crate::store::RecordStore;

#[derive(Debug, Clone, Serialize)]
pub struct Card {
    pub entity: EntityKind,
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub cta: &'static str,
    pub url: &'static str,
    pub list_url: &'static str,
    pub list_label: &'static str,
    pub count: i64,
}

/// Cards in registry order.
pub async fn cards(store: &dyn RecordStore) -> Result<Vec<Card>, AppError> {
    let mut cards = Vec::with_capacity(EntityKind::ALL.len());

    for kind in EntityKind::ALL {
        let config = page_config(kind);
        let resolve = |name: &'static str| {
            reverse(name).ok_or(RegistryError::UnknownRoute { entity: kind, name })
        };

        cards.push(Card {
            entity: kind,
            title: config.title,
            description: config.description,
            icon: config.icon,
            cta: config.cta,
            url: resolve(config.url_name)?,
            list_url: resolve(config.list_url_name)?,
            list_label: config.list_label,
            count: store.count(kind).await?,
        });
    }

    Ok(cards)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[tokio::test]
    async fn every_kind_gets_a_card() {
        let store = MemoryStore::new();
        let cards = cards(&store).await.unwrap();

        let kinds: Vec<_> = cards.iter().map(|card| card.entity).collect();
        assert_eq!(kinds, EntityKind::ALL);
        assert!(cards.iter().all(|card| card.count == 0));
        assert_eq!(cards[1].url, "/next-of-kin/");
        assert_eq!(cards[1].list_url, "/next-of-kin/records/");
    }
}
