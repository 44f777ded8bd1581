use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::entities::characters::{CharacterStatus, Role};
use crate::entities::devil_fruits::{FruitStatus, FruitType};
use crate::entities::{arcs, characters, crews, devil_fruits, episodes};

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// One page of a collection.
#[derive(Debug, Serialize)]
pub struct PageDto<T> {
    pub count: u64,
    pub page: u64,
    pub page_size: u64,
    pub total_pages: u64,
    pub results: Vec<T>,
}

/// `{id, name}` reference to another record.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RefDto {
    pub id: i32,
    pub name: String,
}

// ---------------------------------------------------------------------------
// Episodes and arcs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct EpisodeListDto {
    pub id: i32,
    pub number: i32,
    pub title: String,
    pub air_date: Option<NaiveDate>,
}

impl From<episodes::Model> for EpisodeListDto {
    fn from(model: episodes::Model) -> Self {
        Self {
            id: model.id,
            number: model.number,
            title: model.title,
            air_date: model.air_date,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct EpisodeDetailDto {
    pub id: i32,
    pub number: i32,
    pub title: String,
    pub air_date: Option<NaiveDate>,
    /// Name of the arc
    pub arc: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ArcListDto {
    pub id: i32,
    pub name: String,
    pub saga: String,
    pub start_episode_number: i32,
    pub end_episode_number: i32,
}

impl From<arcs::Model> for ArcListDto {
    fn from(model: arcs::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            saga: model.saga,
            start_episode_number: model.start_episode_number,
            end_episode_number: model.end_episode_number,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ArcDetailDto {
    pub id: i32,
    pub name: String,
    pub saga: String,
    pub start_episode_number: i32,
    pub end_episode_number: i32,
    pub description: String,
    pub episodes: Vec<EpisodeListDto>,
}

// ---------------------------------------------------------------------------
// Crews
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct CrewListDto {
    pub id: i32,
    pub name: String,
    pub ship_name: String,
}

impl From<crews::Model> for CrewListDto {
    fn from(model: crews::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            ship_name: model.ship_name,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CrewMemberDto {
    pub id: i32,
    pub name: String,
    pub bounty: i64,
}

impl From<characters::Model> for CrewMemberDto {
    fn from(model: characters::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            bounty: model.bounty,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CrewDetailDto {
    pub id: i32,
    pub name: String,
    pub ship_name: String,
    pub base_location: String,
    pub description: String,
    pub captain: Option<RefDto>,
    pub members: Vec<CrewMemberDto>,
}

// ---------------------------------------------------------------------------
// Devil fruits
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct FruitListDto {
    pub id: i32,
    pub name: String,
    pub romanji: String,
    pub fruit_type: FruitType,
    pub rarity: i32,
}

impl From<devil_fruits::Model> for FruitListDto {
    fn from(model: devil_fruits::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            romanji: model.romanji,
            fruit_type: model.fruit_type,
            rarity: model.rarity,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FruitHolderDto {
    pub id: i32,
    pub character: RefDto,
    pub from_date: Option<NaiveDate>,
    pub to_date: Option<NaiveDate>,
    pub is_current: bool,
}

#[derive(Debug, Serialize)]
pub struct FruitDetailDto {
    pub id: i32,
    pub name: String,
    pub romanji: String,
    pub fruit_type: FruitType,
    pub ability: String,
    pub weaknesses: String,
    pub rarity: i32,
    pub status: FruitStatus,
    pub first_appearance_arc: Option<RefDto>,
    pub description: String,
    pub holders: Vec<FruitHolderDto>,
}

// ---------------------------------------------------------------------------
// Characters
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct CharacterListDto {
    pub id: i32,
    pub name: String,
    pub epithet: String,
    pub role: Role,
    pub bounty: i64,
    pub origin: String,
    pub status: CharacterStatus,
    pub crews: Vec<CrewListDto>,
    pub current_fruits: Vec<RefDto>,
}

#[derive(Debug, Serialize)]
pub struct FirstAppearanceDto {
    pub number: i32,
    pub title: String,
    pub arc: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HeldFruitDto {
    pub id: i32,
    pub name: String,
    pub fruit_type: FruitType,
}

#[derive(Debug, Clone, Serialize)]
pub struct FruitHistoryDto {
    pub id: i32,
    pub devil_fruit: HeldFruitDto,
    pub from_date: Option<NaiveDate>,
    pub to_date: Option<NaiveDate>,
    pub is_current: bool,
}

#[derive(Debug, Serialize)]
pub struct CharacterDetailDto {
    pub id: i32,
    pub name: String,
    pub epithet: String,
    pub role: Role,
    pub bounty: i64,
    pub origin: String,
    pub status: CharacterStatus,
    pub first_appearance_episode: Option<FirstAppearanceDto>,
    pub description: String,
    pub image_url: String,
    pub crews: Vec<CrewDetailDto>,
    pub fruits_history: Vec<FruitHistoryDto>,
}

// ---------------------------------------------------------------------------
// Admin
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct CrewMembersRequest {
    #[serde(default)]
    pub character_ids: Vec<i32>,
}

#[derive(Debug, Deserialize)]
pub struct ExportRequest {
    #[serde(default)]
    pub ids: Vec<i32>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct LabelCount {
    pub label: String,
    pub count: u64,
}

/// Chart series of the admin dashboard.
#[derive(Debug, Serialize)]
pub struct DashboardStats {
    /// Devil fruits per type (pie chart)
    pub fruit_types: Vec<LabelCount>,
    /// Ten largest crews by member count (bar chart)
    pub top_crews: Vec<LabelCount>,
    pub totals: crate::db::CatalogCounts,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}
