//! `SeaORM` implementation of the `CatalogService` trait.
//!
//! Related records are loaded in batches per page (one query per relation),
//! never per row.

use crate::api::types::{
    ArcDetailDto, ArcListDto, CharacterDetailDto, CharacterListDto, CrewDetailDto, CrewListDto,
    CrewMemberDto, EpisodeDetailDto, EpisodeListDto, FirstAppearanceDto, FruitDetailDto,
    FruitHistoryDto, FruitHolderDto, FruitListDto, HeldFruitDto, PageDto, RefDto,
};
use crate::db::{ListParams, Page, Store};
use crate::entities::{characters, crews};
use crate::services::catalog_service::{CatalogError, CatalogService};
use async_trait::async_trait;

pub struct SeaOrmCatalogService {
    store: Store,
}

impl SeaOrmCatalogService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    fn to_page_dto<T, U>(
        page: Page<T>,
        params: &ListParams,
        f: impl FnMut(T) -> U,
    ) -> Result<PageDto<U>, CatalogError> {
        if params.page > 1 && params.page > page.total_pages {
            return Err(CatalogError::NotFound("Invalid page.".to_string()));
        }

        let page = page.map(f);
        Ok(PageDto {
            count: page.count,
            page: params.page,
            page_size: params.page_size,
            total_pages: page.total_pages,
            results: page.items,
        })
    }

    /// Detail shape of several crews: captain and members resolved.
    async fn crew_details(
        &self,
        crews: Vec<crews::Model>,
    ) -> Result<Vec<CrewDetailDto>, CatalogError> {
        let crew_ids: Vec<i32> = crews.iter().map(|c| c.id).collect();
        let captain_ids: Vec<i32> = crews.iter().filter_map(|c| c.captain_id).collect();

        let mut members = self.store.crews().members_for(&crew_ids).await?;
        let captains = self.store.characters().get_many(&captain_ids).await?;

        Ok(crews
            .into_iter()
            .map(|crew| {
                let captain = crew
                    .captain_id
                    .and_then(|id| captains.get(&id))
                    .map(|c| RefDto {
                        id: c.id,
                        name: c.name.clone(),
                    });
                let members = members
                    .remove(&crew.id)
                    .unwrap_or_default()
                    .into_iter()
                    .map(CrewMemberDto::from)
                    .collect();

                CrewDetailDto {
                    id: crew.id,
                    name: crew.name,
                    ship_name: crew.ship_name,
                    base_location: crew.base_location,
                    description: crew.description,
                    captain,
                    members,
                }
            })
            .collect())
    }

    async fn character_list_dtos(
        &self,
        characters: Vec<characters::Model>,
    ) -> Result<Vec<CharacterListDto>, CatalogError> {
        let ids: Vec<i32> = characters.iter().map(|c| c.id).collect();
        let mut crews = self.store.characters().crews_for(&ids).await?;
        let mut fruits = self.store.fruit_holders().current_fruits_for(&ids).await?;

        Ok(characters
            .into_iter()
            .map(|c| CharacterListDto {
                crews: crews
                    .remove(&c.id)
                    .unwrap_or_default()
                    .into_iter()
                    .map(CrewListDto::from)
                    .collect(),
                current_fruits: fruits
                    .remove(&c.id)
                    .unwrap_or_default()
                    .into_iter()
                    .map(|f| RefDto {
                        id: f.id,
                        name: f.name,
                    })
                    .collect(),
                id: c.id,
                name: c.name,
                epithet: c.epithet,
                role: c.role,
                bounty: c.bounty,
                origin: c.origin,
                status: c.status,
            })
            .collect())
    }
}

#[async_trait]
impl CatalogService for SeaOrmCatalogService {
    async fn list_characters(
        &self,
        params: &ListParams,
    ) -> Result<PageDto<CharacterListDto>, CatalogError> {
        let page = self.store.characters().list(params).await?;
        let items = self.character_list_dtos(page.items).await?;

        let page = Page {
            items,
            count: page.count,
            total_pages: page.total_pages,
        };
        Self::to_page_dto(page, params, |dto| dto)
    }

    async fn get_character(&self, id: i32) -> Result<CharacterDetailDto, CatalogError> {
        let character = self
            .store
            .characters()
            .get(id)
            .await?
            .ok_or_else(|| CatalogError::not_found("Character", id))?;

        let first_appearance_episode = match character.first_appearance_episode_id {
            Some(episode_id) => self
                .store
                .episodes()
                .get_with_arc(episode_id)
                .await?
                .map(|(episode, arc)| FirstAppearanceDto {
                    number: episode.number,
                    title: episode.title,
                    arc: arc.map(|a| a.name),
                }),
            None => None,
        };

        let crews = self
            .store
            .characters()
            .crews_for(&[character.id])
            .await?
            .remove(&character.id)
            .unwrap_or_default();
        let crews = self.crew_details(crews).await?;

        let fruits_history = self
            .store
            .fruit_holders()
            .for_character(character.id)
            .await?
            .into_iter()
            .filter_map(|(holder, fruit)| {
                fruit.map(|fruit| FruitHistoryDto {
                    id: holder.id,
                    devil_fruit: HeldFruitDto {
                        id: fruit.id,
                        name: fruit.name,
                        fruit_type: fruit.fruit_type,
                    },
                    from_date: holder.from_date,
                    to_date: holder.to_date,
                    is_current: holder.is_current,
                })
            })
            .collect();

        Ok(CharacterDetailDto {
            id: character.id,
            name: character.name,
            epithet: character.epithet,
            role: character.role,
            bounty: character.bounty,
            origin: character.origin,
            status: character.status,
            first_appearance_episode,
            description: character.description,
            image_url: character.image_url,
            crews,
            fruits_history,
        })
    }

    async fn list_crews(&self, params: &ListParams) -> Result<PageDto<CrewListDto>, CatalogError> {
        let page = self.store.crews().list(params).await?;
        Self::to_page_dto(page, params, CrewListDto::from)
    }

    async fn get_crew(&self, id: i32) -> Result<CrewDetailDto, CatalogError> {
        let crew = self
            .store
            .crews()
            .get(id)
            .await?
            .ok_or_else(|| CatalogError::not_found("Crew", id))?;

        self.crew_details(vec![crew])
            .await?
            .pop()
            .ok_or_else(|| CatalogError::not_found("Crew", id))
    }

    async fn list_fruits(
        &self,
        params: &ListParams,
    ) -> Result<PageDto<FruitListDto>, CatalogError> {
        let page = self.store.devil_fruits().list(params).await?;
        Self::to_page_dto(page, params, FruitListDto::from)
    }

    async fn get_fruit(&self, id: i32) -> Result<FruitDetailDto, CatalogError> {
        let (fruit, arc) = self
            .store
            .devil_fruits()
            .get_with_arc(id)
            .await?
            .ok_or_else(|| CatalogError::not_found("Devil fruit", id))?;

        let holders = self
            .store
            .fruit_holders()
            .for_fruit(fruit.id)
            .await?
            .into_iter()
            .filter_map(|(holder, character)| {
                character.map(|character| FruitHolderDto {
                    id: holder.id,
                    character: RefDto {
                        id: character.id,
                        name: character.name,
                    },
                    from_date: holder.from_date,
                    to_date: holder.to_date,
                    is_current: holder.is_current,
                })
            })
            .collect();

        Ok(FruitDetailDto {
            id: fruit.id,
            name: fruit.name,
            romanji: fruit.romanji,
            fruit_type: fruit.fruit_type,
            ability: fruit.ability,
            weaknesses: fruit.weaknesses,
            rarity: fruit.rarity,
            status: fruit.status,
            first_appearance_arc: arc.map(|a| RefDto {
                id: a.id,
                name: a.name,
            }),
            description: fruit.description,
            holders,
        })
    }

    async fn list_arcs(&self, params: &ListParams) -> Result<PageDto<ArcListDto>, CatalogError> {
        let page = self.store.arcs().list(params).await?;
        Self::to_page_dto(page, params, ArcListDto::from)
    }

    async fn get_arc(&self, id: i32) -> Result<ArcDetailDto, CatalogError> {
        let arc = self
            .store
            .arcs()
            .get(id)
            .await?
            .ok_or_else(|| CatalogError::not_found("Arc", id))?;

        let episodes = self
            .store
            .arcs()
            .episodes(&arc)
            .await?
            .into_iter()
            .map(EpisodeListDto::from)
            .collect();

        Ok(ArcDetailDto {
            id: arc.id,
            name: arc.name,
            saga: arc.saga,
            start_episode_number: arc.start_episode_number,
            end_episode_number: arc.end_episode_number,
            description: arc.description,
            episodes,
        })
    }

    async fn list_episodes(
        &self,
        params: &ListParams,
    ) -> Result<PageDto<EpisodeListDto>, CatalogError> {
        let page = self.store.episodes().list(params).await?;
        Self::to_page_dto(page, params, EpisodeListDto::from)
    }

    async fn get_episode(&self, id: i32) -> Result<EpisodeDetailDto, CatalogError> {
        let (episode, arc) = self
            .store
            .episodes()
            .get_with_arc(id)
            .await?
            .ok_or_else(|| CatalogError::not_found("Episode", id))?;

        Ok(EpisodeDetailDto {
            id: episode.id,
            number: episode.number,
            title: episode.title,
            air_date: episode.air_date,
            arc: arc.map(|a| a.name),
        })
    }
}
