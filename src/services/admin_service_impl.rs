//! `SeaORM` implementation of the `AdminService` trait.

use crate::api::types::{DashboardStats, LabelCount};
use crate::db::Store;
use crate::entities::devil_fruits::FruitType;
use crate::entities::{arcs, characters, crews, devil_fruits, episodes, fruit_holders};
use crate::models::catalog::{
    ArcInput, CharacterInput, CrewInput, DevilFruitInput, EpisodeInput, HolderInput,
    InlineHolderInput,
};
use crate::services::admin_service::{AdminError, AdminService};
use crate::services::export::{
    self, CHARACTERS_CSV_FILENAME, CSV_CONTENT_TYPE, CharacterSheet, ExportFile,
    FRUITS_CSV_FILENAME, FruitSheet, PDF_CONTENT_TYPE,
};
use async_trait::async_trait;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{info, warn};

/// Number of crews in the dashboard bar chart.
const TOP_CREWS: usize = 10;

pub struct SeaOrmAdminService {
    store: Store,
}

impl SeaOrmAdminService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    async fn require_arc(&self, field: &str, id: Option<i32>) -> Result<(), AdminError> {
        if let Some(id) = id
            && self.store.arcs().get(id).await?.is_none()
        {
            return Err(AdminError::missing_reference(field, id));
        }
        Ok(())
    }

    async fn require_episode(&self, field: &str, id: Option<i32>) -> Result<(), AdminError> {
        if let Some(id) = id
            && self.store.episodes().get(id).await?.is_none()
        {
            return Err(AdminError::missing_reference(field, id));
        }
        Ok(())
    }

    async fn require_character(&self, field: &str, id: Option<i32>) -> Result<(), AdminError> {
        if let Some(id) = id
            && self.store.characters().get(id).await?.is_none()
        {
            return Err(AdminError::missing_reference(field, id));
        }
        Ok(())
    }

    async fn require_fruit(&self, field: &str, id: Option<i32>) -> Result<(), AdminError> {
        if let Some(id) = id
            && self.store.devil_fruits().get(id).await?.is_none()
        {
            return Err(AdminError::missing_reference(field, id));
        }
        Ok(())
    }

    async fn save_holder(
        &self,
        id: Option<i32>,
        input: &HolderInput,
    ) -> Result<fruit_holders::Model, AdminError> {
        self.require_fruit("devil_fruit", Some(input.devil_fruit_id))
            .await?;
        self.require_character("character", Some(input.character_id))
            .await?;

        let saved = self.store.fruit_holders().save(id, input).await?;
        saved.ok_or_else(|| AdminError::not_found("Fruit holder", id.unwrap_or_default()))
    }

    /// The single id of a one-record export.
    fn single_id(ids: &[i32], message: &str) -> Result<i32, AdminError> {
        let mut unique = ids.iter().copied().collect::<BTreeSet<i32>>().into_iter();
        match (unique.next(), unique.next()) {
            (Some(id), None) => Ok(id),
            _ => Err(AdminError::ExportPrecondition(message.to_string())),
        }
    }

    fn deleted(found: bool, resource: &str, id: i32) -> Result<(), AdminError> {
        if found {
            Ok(())
        } else {
            Err(AdminError::not_found(resource, id))
        }
    }
}

#[async_trait]
impl AdminService for SeaOrmAdminService {
    async fn create_arc(&self, input: ArcInput) -> Result<arcs::Model, AdminError> {
        input.validate()?;
        Ok(self.store.arcs().create(&input).await?)
    }

    async fn update_arc(&self, id: i32, input: ArcInput) -> Result<arcs::Model, AdminError> {
        input.validate()?;
        self.store
            .arcs()
            .update(id, &input)
            .await?
            .ok_or_else(|| AdminError::not_found("Arc", id))
    }

    async fn delete_arc(&self, id: i32) -> Result<(), AdminError> {
        Self::deleted(self.store.arcs().delete(id).await?, "Arc", id)
    }

    async fn create_episode(&self, input: EpisodeInput) -> Result<episodes::Model, AdminError> {
        input.validate()?;
        self.require_arc("arc", input.arc_id).await?;
        Ok(self.store.episodes().create(&input).await?)
    }

    async fn update_episode(
        &self,
        id: i32,
        input: EpisodeInput,
    ) -> Result<episodes::Model, AdminError> {
        input.validate()?;
        self.require_arc("arc", input.arc_id).await?;
        self.store
            .episodes()
            .update(id, &input)
            .await?
            .ok_or_else(|| AdminError::not_found("Episode", id))
    }

    async fn delete_episode(&self, id: i32) -> Result<(), AdminError> {
        Self::deleted(self.store.episodes().delete(id).await?, "Episode", id)
    }

    async fn add_arc_episode(
        &self,
        arc_id: i32,
        mut input: EpisodeInput,
    ) -> Result<episodes::Model, AdminError> {
        if self.store.arcs().get(arc_id).await?.is_none() {
            return Err(AdminError::not_found("Arc", arc_id));
        }

        input.arc_id = Some(arc_id);
        self.create_episode(input).await
    }

    async fn create_crew(&self, input: CrewInput) -> Result<crews::Model, AdminError> {
        input.validate()?;
        self.require_character("captain", input.captain_id).await?;
        Ok(self.store.crews().create(&input).await?)
    }

    async fn update_crew(&self, id: i32, input: CrewInput) -> Result<crews::Model, AdminError> {
        input.validate()?;
        self.require_character("captain", input.captain_id).await?;
        self.store
            .crews()
            .update(id, &input)
            .await?
            .ok_or_else(|| AdminError::not_found("Crew", id))
    }

    async fn delete_crew(&self, id: i32) -> Result<(), AdminError> {
        Self::deleted(self.store.crews().delete(id).await?, "Crew", id)
    }

    async fn set_crew_members(
        &self,
        crew_id: i32,
        character_ids: &[i32],
    ) -> Result<(), AdminError> {
        if self.store.crews().get(crew_id).await?.is_none() {
            return Err(AdminError::not_found("Crew", crew_id));
        }

        let known = self.store.characters().get_many(character_ids).await?;
        if let Some(missing) = character_ids.iter().find(|id| !known.contains_key(*id)) {
            return Err(AdminError::missing_reference("character_ids", *missing));
        }

        self.store
            .crews()
            .set_members(crew_id, character_ids)
            .await?;
        Ok(())
    }

    async fn create_character(
        &self,
        input: CharacterInput,
    ) -> Result<characters::Model, AdminError> {
        input.validate()?;
        self.require_episode("first_appearance_episode", input.first_appearance_episode_id)
            .await?;
        Ok(self.store.characters().create(&input).await?)
    }

    async fn update_character(
        &self,
        id: i32,
        input: CharacterInput,
    ) -> Result<characters::Model, AdminError> {
        input.validate()?;
        self.require_episode("first_appearance_episode", input.first_appearance_episode_id)
            .await?;
        self.store
            .characters()
            .update(id, &input)
            .await?
            .ok_or_else(|| AdminError::not_found("Character", id))
    }

    async fn delete_character(&self, id: i32) -> Result<(), AdminError> {
        Self::deleted(self.store.characters().delete(id).await?, "Character", id)
    }

    async fn create_fruit(
        &self,
        input: DevilFruitInput,
    ) -> Result<devil_fruits::Model, AdminError> {
        input.validate()?;
        self.require_arc("first_appearance_arc", input.first_appearance_arc_id)
            .await?;
        Ok(self.store.devil_fruits().create(&input).await?)
    }

    async fn update_fruit(
        &self,
        id: i32,
        input: DevilFruitInput,
    ) -> Result<devil_fruits::Model, AdminError> {
        input.validate()?;
        self.require_arc("first_appearance_arc", input.first_appearance_arc_id)
            .await?;
        self.store
            .devil_fruits()
            .update(id, &input)
            .await?
            .ok_or_else(|| AdminError::not_found("Devil fruit", id))
    }

    async fn delete_fruit(&self, id: i32) -> Result<(), AdminError> {
        Self::deleted(self.store.devil_fruits().delete(id).await?, "Devil fruit", id)
    }

    async fn create_holder(
        &self,
        input: HolderInput,
    ) -> Result<fruit_holders::Model, AdminError> {
        self.save_holder(None, &input).await
    }

    async fn update_holder(
        &self,
        id: i32,
        input: HolderInput,
    ) -> Result<fruit_holders::Model, AdminError> {
        self.save_holder(Some(id), &input).await
    }

    async fn delete_holder(&self, id: i32) -> Result<(), AdminError> {
        Self::deleted(self.store.fruit_holders().delete(id).await?, "Fruit holder", id)
    }

    async fn add_fruit_holder(
        &self,
        devil_fruit_id: i32,
        input: InlineHolderInput,
    ) -> Result<fruit_holders::Model, AdminError> {
        if self.store.devil_fruits().get(devil_fruit_id).await?.is_none() {
            return Err(AdminError::not_found("Devil fruit", devil_fruit_id));
        }

        let input = input.for_fruit(devil_fruit_id)?;
        self.save_holder(None, &input).await
    }

    async fn add_character_holder(
        &self,
        character_id: i32,
        input: InlineHolderInput,
    ) -> Result<fruit_holders::Model, AdminError> {
        if self.store.characters().get(character_id).await?.is_none() {
            return Err(AdminError::not_found("Character", character_id));
        }

        let input = input.for_character(character_id)?;
        self.save_holder(None, &input).await
    }

    async fn export_character_pdf(&self, ids: &[i32]) -> Result<ExportFile, AdminError> {
        let id = Self::single_id(ids, "Veuillez sélectionner exactement un personnage.")
            .inspect_err(|_| warn!("Character PDF export needs one selection, got {:?}", ids))?;

        let character = self
            .store
            .characters()
            .get(id)
            .await?
            .ok_or_else(|| AdminError::not_found("Character", id))?;

        let first_appearance = match character.first_appearance_episode_id {
            Some(episode_id) => self.store.episodes().get(episode_id).await?,
            None => None,
        };

        let crews = self
            .store
            .characters()
            .crews_for(&[id])
            .await?
            .remove(&id)
            .unwrap_or_default();

        let fruits: Vec<_> = self
            .store
            .fruit_holders()
            .for_character(id)
            .await?
            .into_iter()
            .filter_map(|(holder, fruit)| fruit.map(|fruit| (holder, fruit)))
            .collect();

        let sheet = CharacterSheet {
            character: &character,
            first_appearance: first_appearance.as_ref(),
            crews: &crews,
            fruits: &fruits,
        };
        let bytes = export::character_pdf(&sheet, chrono::Local::now().naive_local());

        info!("Exported PDF sheet for character {}", character.name);
        Ok(ExportFile {
            filename: export::pdf_filename("character", &character.name),
            content_type: PDF_CONTENT_TYPE,
            bytes,
        })
    }

    async fn export_fruit_pdf(&self, ids: &[i32]) -> Result<ExportFile, AdminError> {
        let id = Self::single_id(ids, "Veuillez sélectionner exactement un fruit du démon.")
            .inspect_err(|_| warn!("Devil fruit PDF export needs one selection, got {:?}", ids))?;

        let (fruit, arc) = self
            .store
            .devil_fruits()
            .get_with_arc(id)
            .await?
            .ok_or_else(|| AdminError::not_found("Devil fruit", id))?;

        let holders: Vec<_> = self
            .store
            .fruit_holders()
            .for_fruit(id)
            .await?
            .into_iter()
            .filter_map(|(holder, character)| character.map(|character| (holder, character)))
            .collect();

        let sheet = FruitSheet {
            fruit: &fruit,
            first_appearance: arc.as_ref(),
            holders: &holders,
        };
        let bytes = export::fruit_pdf(&sheet, chrono::Local::now().naive_local());

        info!("Exported PDF sheet for devil fruit {}", fruit.name);
        Ok(ExportFile {
            filename: export::pdf_filename("fruit", &fruit.name),
            content_type: PDF_CONTENT_TYPE,
            bytes,
        })
    }

    async fn export_characters_csv(&self, ids: &[i32]) -> Result<ExportFile, AdminError> {
        let mut characters: Vec<characters::Model> = self
            .store
            .characters()
            .get_many(ids)
            .await?
            .into_values()
            .collect();
        characters.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));

        let episode_ids: Vec<i32> = characters
            .iter()
            .filter_map(|c| c.first_appearance_episode_id)
            .collect();
        let episodes = self.store.episodes().get_many_with_arc(&episode_ids).await?;

        let rows: Vec<_> = characters
            .into_iter()
            .map(|c| {
                let episode = c
                    .first_appearance_episode_id
                    .and_then(|id| episodes.get(&id).map(|(episode, _)| episode.clone()));
                (c, episode)
            })
            .collect();

        Ok(ExportFile {
            filename: CHARACTERS_CSV_FILENAME.to_string(),
            content_type: CSV_CONTENT_TYPE,
            bytes: export::characters_csv(&rows).into_bytes(),
        })
    }

    async fn export_fruits_csv(&self, ids: &[i32]) -> Result<ExportFile, AdminError> {
        let rows = self.store.devil_fruits().get_many_with_arc(ids).await?;

        Ok(ExportFile {
            filename: FRUITS_CSV_FILENAME.to_string(),
            content_type: CSV_CONTENT_TYPE,
            bytes: export::fruits_csv(&rows).into_bytes(),
        })
    }

    async fn dashboard(&self) -> Result<DashboardStats, AdminError> {
        let mut by_type: BTreeMap<FruitType, u64> = BTreeMap::new();
        for fruit in self.store.devil_fruits().all().await? {
            *by_type.entry(fruit.fruit_type).or_default() += 1;
        }
        let fruit_types = by_type
            .into_iter()
            .map(|(fruit_type, count)| LabelCount {
                label: fruit_type.label().to_string(),
                count,
            })
            .collect();

        let mut crews = self.store.crews().member_counts().await?;
        crews.sort_by(|(a, a_count), (b, b_count)| {
            b_count.cmp(a_count).then_with(|| a.name.cmp(&b.name))
        });
        let top_crews = crews
            .into_iter()
            .take(TOP_CREWS)
            .map(|(crew, count)| LabelCount {
                label: crew.name,
                count,
            })
            .collect();

        let totals = self.store.counts().await?;

        Ok(DashboardStats {
            fruit_types,
            top_crews,
            totals,
        })
    }
}
