//! Write-side inputs for the catalog, shared by the admin API and the seeder.
//!
//! Every input carries its own field validation; persistence-level failures
//! (unique names, dangling foreign keys) are detected by the store.

use chrono::NaiveDate;
use serde::Deserialize;
use std::fmt;

use crate::entities::characters::{CharacterStatus, Role};
use crate::entities::devil_fruits::{FruitStatus, FruitType, MAX_RARITY, MIN_RARITY};

/// A constraint violation scoped to one input field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for FieldError {}

fn require_name(field: &'static str, value: &str) -> Result<(), FieldError> {
    if value.trim().is_empty() {
        return Err(FieldError::new(field, "This field may not be blank"));
    }
    if value.chars().count() > 200 {
        return Err(FieldError::new(
            field,
            "Ensure this field has no more than 200 characters",
        ));
    }
    Ok(())
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArcInput {
    pub name: String,
    #[serde(default)]
    pub saga: String,
    #[serde(default = "default_episode_number")]
    pub start_episode_number: i32,
    #[serde(default = "default_episode_number")]
    pub end_episode_number: i32,
    #[serde(default)]
    pub description: String,
}

const fn default_episode_number() -> i32 {
    1
}

impl ArcInput {
    pub fn validate(&self) -> Result<(), FieldError> {
        require_name("name", &self.name)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct EpisodeInput {
    pub number: i32,
    pub title: String,
    #[serde(default)]
    pub air_date: Option<NaiveDate>,
    #[serde(default)]
    pub arc_id: Option<i32>,
}

impl EpisodeInput {
    pub fn validate(&self) -> Result<(), FieldError> {
        if self.title.trim().is_empty() {
            return Err(FieldError::new("title", "This field may not be blank"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CrewInput {
    pub name: String,
    #[serde(default)]
    pub ship_name: String,
    #[serde(default)]
    pub base_location: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub captain_id: Option<i32>,
}

impl CrewInput {
    pub fn validate(&self) -> Result<(), FieldError> {
        require_name("name", &self.name)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CharacterInput {
    pub name: String,
    #[serde(default)]
    pub epithet: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub bounty: i64,
    #[serde(default)]
    pub origin: String,
    #[serde(default)]
    pub status: CharacterStatus,
    #[serde(default)]
    pub first_appearance_episode_id: Option<i32>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_url: String,
}

impl CharacterInput {
    pub fn validate(&self) -> Result<(), FieldError> {
        require_name("name", &self.name)?;
        if self.bounty < 0 {
            return Err(FieldError::new(
                "bounty",
                "Ensure this value is greater than or equal to 0",
            ));
        }
        if !self.image_url.is_empty()
            && !(self.image_url.starts_with("http://") || self.image_url.starts_with("https://"))
        {
            return Err(FieldError::new("image_url", "Enter a valid URL"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DevilFruitInput {
    pub name: String,
    #[serde(default)]
    pub romanji: String,
    #[serde(default)]
    pub fruit_type: FruitType,
    pub ability: String,
    #[serde(default)]
    pub weaknesses: String,
    #[serde(default = "default_rarity")]
    pub rarity: i32,
    #[serde(default)]
    pub status: FruitStatus,
    #[serde(default)]
    pub first_appearance_arc_id: Option<i32>,
    #[serde(default)]
    pub description: String,
}

const fn default_rarity() -> i32 {
    3
}

impl DevilFruitInput {
    pub fn validate(&self) -> Result<(), FieldError> {
        require_name("name", &self.name)?;
        if self.ability.trim().is_empty() {
            return Err(FieldError::new("ability", "This field may not be blank"));
        }
        validate_rarity(self.rarity)
    }
}

pub fn validate_rarity(rarity: i32) -> Result<(), FieldError> {
    if !(MIN_RARITY..=MAX_RARITY).contains(&rarity) {
        return Err(FieldError::new(
            "rarity",
            format!("Rarity must be between {MIN_RARITY} and {MAX_RARITY}"),
        ));
    }
    Ok(())
}

#[derive(Debug, Clone, Deserialize)]
pub struct HolderInput {
    pub devil_fruit_id: i32,
    pub character_id: i32,
    #[serde(default)]
    pub from_date: Option<NaiveDate>,
    #[serde(default)]
    pub to_date: Option<NaiveDate>,
    #[serde(default)]
    pub is_current: bool,
}

/// Holder row edited inline from its fruit or character; the parent id is
/// taken from the route.
#[derive(Debug, Clone, Deserialize)]
pub struct InlineHolderInput {
    #[serde(default)]
    pub devil_fruit_id: Option<i32>,
    #[serde(default)]
    pub character_id: Option<i32>,
    #[serde(default)]
    pub from_date: Option<NaiveDate>,
    #[serde(default)]
    pub to_date: Option<NaiveDate>,
    #[serde(default)]
    pub is_current: bool,
}

impl InlineHolderInput {
    pub fn for_fruit(self, devil_fruit_id: i32) -> Result<HolderInput, FieldError> {
        let character_id = self
            .character_id
            .ok_or_else(|| FieldError::new("character", "This field is required"))?;
        Ok(HolderInput {
            devil_fruit_id,
            character_id,
            from_date: self.from_date,
            to_date: self.to_date,
            is_current: self.is_current,
        })
    }

    pub fn for_character(self, character_id: i32) -> Result<HolderInput, FieldError> {
        let devil_fruit_id = self
            .devil_fruit_id
            .ok_or_else(|| FieldError::new("devil_fruit", "This field is required"))?;
        Ok(HolderInput {
            devil_fruit_id,
            character_id,
            from_date: self.from_date,
            to_date: self.to_date,
            is_current: self.is_current,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fruit(rarity: i32) -> DevilFruitInput {
        DevilFruitInput {
            name: "Gomu Gomu no Mi".to_string(),
            romanji: String::new(),
            fruit_type: FruitType::Paramecia,
            ability: "Corps élastique".to_string(),
            weaknesses: String::new(),
            rarity,
            status: FruitStatus::Active,
            first_appearance_arc_id: None,
            description: String::new(),
        }
    }

    #[test]
    fn test_rarity_boundaries() {
        assert!(fruit(1).validate().is_ok());
        assert!(fruit(5).validate().is_ok());

        let err = fruit(0).validate().unwrap_err();
        assert_eq!(err.field, "rarity");
        let err = fruit(6).validate().unwrap_err();
        assert_eq!(err.field, "rarity");
    }

    #[test]
    fn test_fruit_requires_ability() {
        let mut input = fruit(3);
        input.ability = "   ".to_string();
        assert_eq!(input.validate().unwrap_err().field, "ability");
    }

    #[test]
    fn test_character_bounty_must_be_positive() {
        let input: CharacterInput =
            serde_json::from_str(r#"{"name": "Buggy", "bounty": -1}"#).unwrap();
        let err = input.validate().unwrap_err();
        assert_eq!(err.field, "bounty");
        assert_eq!(err.to_string(), "bounty: Ensure this value is greater than or equal to 0");
    }

    #[test]
    fn test_character_defaults() {
        let input: CharacterInput = serde_json::from_str(r#"{"name": "Koby"}"#).unwrap();
        assert_eq!(input.role, Role::Other);
        assert_eq!(input.status, CharacterStatus::Alive);
        assert_eq!(input.bounty, 0);
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_inline_holder_requires_counterpart() {
        let inline: InlineHolderInput = serde_json::from_str(r#"{"is_current": true}"#).unwrap();
        let err = inline.for_fruit(1).unwrap_err();
        assert_eq!(err.field, "character");

        let inline: InlineHolderInput =
            serde_json::from_str(r#"{"character_id": 4, "from_date": "1999-10-20"}"#).unwrap();
        let holder = inline.for_fruit(2).unwrap();
        assert_eq!(holder.devil_fruit_id, 2);
        assert_eq!(holder.character_id, 4);
        assert!(!holder.is_current);
        assert_eq!(holder.from_date, NaiveDate::from_ymd_opt(1999, 10, 20));
    }
}
