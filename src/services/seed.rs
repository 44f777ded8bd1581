//! Bulk loader for the builtin reference catalog.
//!
//! Every row is written through [`AdminService`], so seeded data passes the
//! same validation and the same current-holder rule as admin edits.

mod dataset;

use std::collections::HashMap;

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use sea_orm::ActiveEnum;
use serde::Serialize;
use tracing::info;

use crate::db::Store;
use crate::entities::{arcs, episodes};
use crate::models::catalog::{
    ArcInput, CharacterInput, CrewInput, DevilFruitInput, EpisodeInput, HolderInput,
};
use crate::services::admin_service::AdminService;
use crate::services::admin_service_impl::SeaOrmAdminService;

/// Episodes eligible as a character's first appearance.
const FIRST_APPEARANCE_POOL: usize = 100;

#[derive(Debug, Clone)]
pub struct SeedOptions {
    /// Wipe the catalog first
    pub reset: bool,
    /// 0 loads the whole builtin list
    pub characters: usize,
    pub crews: usize,
    pub fruits: usize,
    pub arcs: usize,
    pub episodes: usize,
    /// Fixed seed for the random optional fields
    pub rng_seed: Option<u64>,
}

impl Default for SeedOptions {
    fn default() -> Self {
        Self {
            reset: false,
            characters: 0,
            crews: 0,
            fruits: 0,
            arcs: 0,
            episodes: 200,
            rng_seed: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub arcs: usize,
    pub episodes: usize,
    pub devil_fruits: usize,
    pub crews: usize,
    pub characters: usize,
    pub memberships: usize,
    pub fruit_holders: usize,
}

fn take<T>(items: &[T], count: usize) -> &[T] {
    if count == 0 || count >= items.len() {
        items
    } else {
        &items[..count]
    }
}

pub struct Seeder {
    store: Store,
    admin: SeaOrmAdminService,
    rng: StdRng,
}

impl Seeder {
    #[must_use]
    pub fn new(store: Store, rng_seed: Option<u64>) -> Self {
        let rng = rng_seed.map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
        Self {
            admin: SeaOrmAdminService::new(store.clone()),
            store,
            rng,
        }
    }

    /// Loads the builtin catalog and returns how many rows were created.
    ///
    /// Stops at the first failing row. Without `reset`, seeding over an
    /// existing catalog fails on the first duplicate name.
    pub async fn run(&mut self, options: &SeedOptions) -> Result<SeedReport> {
        if options.reset {
            info!("Deleting all catalog data");
            self.store.catalog().reset().await?;
        }

        let mut report = SeedReport::default();

        let arcs = self.seed_arcs(options.arcs).await?;
        report.arcs = arcs.len();

        let episodes = self.seed_episodes(options.episodes, &arcs).await?;
        report.episodes = episodes.len();

        let fruits = self.seed_fruits(options.fruits, &arcs).await?;
        report.devil_fruits = fruits.len();

        let characters = self.seed_characters(options.characters, &episodes).await?;
        report.characters = characters.len();

        let crews = self.seed_crews(options.crews, &characters).await?;
        report.crews = crews.len();

        report.memberships = self.seed_members(&crews, &characters).await?;
        report.fruit_holders = self.seed_holders(&fruits, &characters).await?;

        info!(
            arcs = report.arcs,
            episodes = report.episodes,
            devil_fruits = report.devil_fruits,
            crews = report.crews,
            characters = report.characters,
            "Seed complete"
        );

        Ok(report)
    }

    async fn seed_arcs(&self, count: usize) -> Result<Vec<arcs::Model>> {
        let mut created = Vec::new();
        for seed in take(dataset::ARCS, count) {
            let arc = self
                .admin
                .create_arc(ArcInput {
                    name: seed.name.to_string(),
                    saga: seed.saga.to_string(),
                    start_episode_number: seed.start,
                    end_episode_number: seed.end,
                    description: format!("Arc {} de la saga {}", seed.name, seed.saga),
                })
                .await
                .with_context(|| format!("Failed to create arc {}", seed.name))?;
            created.push(arc);
        }
        Ok(created)
    }

    async fn seed_episodes(
        &self,
        count: usize,
        arcs: &[arcs::Model],
    ) -> Result<Vec<episodes::Model>> {
        let mut created = Vec::with_capacity(count);
        for number in 1..=i32::try_from(count)? {
            let arc_id = arcs
                .iter()
                .find(|arc| (arc.start_episode_number..=arc.end_episode_number).contains(&number))
                .map(|arc| arc.id);

            let episode = self
                .admin
                .create_episode(EpisodeInput {
                    number,
                    title: format!("Épisode {number}"),
                    air_date: None,
                    arc_id,
                })
                .await
                .with_context(|| format!("Failed to create episode {number}"))?;
            created.push(episode);
        }
        Ok(created)
    }

    async fn seed_fruits(
        &mut self,
        count: usize,
        arcs: &[arcs::Model],
    ) -> Result<HashMap<&'static str, i32>> {
        let mut created = HashMap::new();
        for seed in take(dataset::FRUITS, count) {
            let weaknesses = if self.rng.random_bool(0.7) {
                "Eau de mer".to_string()
            } else {
                String::new()
            };
            let first_appearance_arc_id = if self.rng.random_bool(0.5) {
                arcs.choose(&mut self.rng).map(|arc| arc.id)
            } else {
                None
            };

            let fruit = self
                .admin
                .create_fruit(DevilFruitInput {
                    name: seed.name.to_string(),
                    romanji: seed.romanji.to_string(),
                    fruit_type: seed.fruit_type,
                    ability: seed.ability.to_string(),
                    weaknesses,
                    rarity: seed.rarity,
                    status: crate::entities::devil_fruits::FruitStatus::Active,
                    first_appearance_arc_id,
                    description: format!("Fruit du démon de type {}", seed.fruit_type.to_value()),
                })
                .await
                .with_context(|| format!("Failed to create devil fruit {}", seed.name))?;
            created.insert(seed.name, fruit.id);
        }
        Ok(created)
    }

    async fn seed_characters(
        &mut self,
        count: usize,
        episodes: &[episodes::Model],
    ) -> Result<HashMap<&'static str, i32>> {
        let pool = &episodes[..episodes.len().min(FIRST_APPEARANCE_POOL)];
        let mut created = HashMap::new();
        for seed in take(dataset::CHARACTERS, count) {
            let first_appearance_episode_id = if self.rng.random_bool(0.7) {
                pool.choose(&mut self.rng).map(|episode| episode.id)
            } else {
                None
            };

            let character = self
                .admin
                .create_character(CharacterInput {
                    name: seed.name.to_string(),
                    epithet: seed.epithet.to_string(),
                    role: seed.role,
                    bounty: seed.bounty,
                    origin: seed.origin.to_string(),
                    status: seed.status,
                    first_appearance_episode_id,
                    description: "Personnage de One Piece".to_string(),
                    image_url: String::new(),
                })
                .await
                .with_context(|| format!("Failed to create character {}", seed.name))?;
            created.insert(seed.name, character.id);
        }
        Ok(created)
    }

    async fn seed_crews(
        &self,
        count: usize,
        characters: &HashMap<&'static str, i32>,
    ) -> Result<HashMap<&'static str, i32>> {
        let mut created = HashMap::new();
        for seed in take(dataset::CREWS, count) {
            let captain_id = dataset::CAPTAINS
                .iter()
                .find(|(crew, _)| *crew == seed.name)
                .and_then(|(_, captain)| characters.get(captain).copied());

            let crew = self
                .admin
                .create_crew(CrewInput {
                    name: seed.name.to_string(),
                    ship_name: seed.ship_name.to_string(),
                    base_location: seed.base_location.to_string(),
                    description: "Équipage de pirates célèbre".to_string(),
                    captain_id,
                })
                .await
                .with_context(|| format!("Failed to create crew {}", seed.name))?;
            created.insert(seed.name, crew.id);
        }
        Ok(created)
    }

    async fn seed_members(
        &self,
        crews: &HashMap<&'static str, i32>,
        characters: &HashMap<&'static str, i32>,
    ) -> Result<usize> {
        let mut total = 0;
        for (crew_name, member_names) in dataset::MEMBERS {
            let Some(&crew_id) = crews.get(crew_name) else {
                continue;
            };
            let member_ids: Vec<i32> = member_names
                .iter()
                .filter_map(|name| characters.get(name).copied())
                .collect();
            if member_ids.is_empty() {
                continue;
            }

            self.admin
                .set_crew_members(crew_id, &member_ids)
                .await
                .with_context(|| format!("Failed to assign members of {crew_name}"))?;
            info!(crew = %crew_name, members = member_ids.len(), "Assigned crew members");
            total += member_ids.len();
        }
        Ok(total)
    }

    async fn seed_holders(
        &self,
        fruits: &HashMap<&'static str, i32>,
        characters: &HashMap<&'static str, i32>,
    ) -> Result<usize> {
        let mut total = 0;
        for (fruit_name, holder_name) in dataset::HOLDERS {
            let (Some(&devil_fruit_id), Some(&character_id)) =
                (fruits.get(fruit_name), characters.get(holder_name))
            else {
                continue;
            };

            self.admin
                .create_holder(HolderInput {
                    devil_fruit_id,
                    character_id,
                    from_date: None,
                    to_date: None,
                    is_current: true,
                })
                .await
                .with_context(|| format!("Failed to assign {fruit_name} to {holder_name}"))?;
            total += 1;
        }
        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_zero_means_everything() {
        assert_eq!(take(dataset::ARCS, 0).len(), 27);
        assert_eq!(take(dataset::ARCS, 3).len(), 3);
        assert_eq!(take(dataset::ARCS, 500).len(), 27);
    }

    #[test]
    fn test_builtin_dataset_sizes() {
        assert_eq!(dataset::FRUITS.len(), 20);
        assert_eq!(dataset::CREWS.len(), 13);
        assert_eq!(dataset::CHARACTERS.len(), 30);
    }

    #[test]
    fn test_builtin_references_resolve() {
        let character = |name: &str| dataset::CHARACTERS.iter().any(|c| c.name == name);
        let crew = |name: &str| dataset::CREWS.iter().any(|c| c.name == name);

        for (crew_name, captain) in dataset::CAPTAINS {
            assert!(crew(crew_name), "{crew_name}");
            assert!(character(captain), "{captain}");
        }
        for (crew_name, members) in dataset::MEMBERS {
            assert!(crew(crew_name), "{crew_name}");
            assert!(members.iter().all(|m| character(m)));
        }
    }

    #[test]
    fn test_builtin_rarities_are_valid() {
        for fruit in dataset::FRUITS {
            assert!(crate::models::catalog::validate_rarity(fruit.rarity).is_ok());
        }
    }

    #[tokio::test]
    async fn test_seed_small_catalog() {
        let store = Store::new("sqlite::memory:").await.unwrap();
        let mut seeder = Seeder::new(store.clone(), Some(7));
        let options = SeedOptions {
            characters: 5,
            crews: 2,
            fruits: 3,
            arcs: 2,
            episodes: 10,
            ..SeedOptions::default()
        };

        let report = seeder.run(&options).await.unwrap();
        assert_eq!(report.arcs, 2);
        assert_eq!(report.episodes, 10);
        assert_eq!(report.devil_fruits, 3);
        assert_eq!(report.characters, 5);
        assert_eq!(report.crews, 2);
        // Only Luffy's Gomu Gomu no Mi has both ends inside the subset.
        assert_eq!(report.fruit_holders, 1);

        // Episodes 1..=3 belong to Romance Dawn, 4..=8 to Orange Town, 9.. to none.
        let (episode, arc) = store.episodes().get_with_arc(9).await.unwrap().unwrap();
        assert_eq!(episode.number, 9);
        assert!(arc.is_none());
        let (_, arc) = store.episodes().get_with_arc(2).await.unwrap().unwrap();
        assert_eq!(arc.unwrap().name, "Romance Dawn");

        let fruits = store.devil_fruits().all().await.unwrap();
        let gomu = fruits.iter().find(|f| f.name == "Gomu Gomu no Mi").unwrap();
        assert_eq!(gomu.description, "Fruit du démon de type PARAMECIA");
    }
}
