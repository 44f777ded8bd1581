//! Full catalog dump to a timestamped JSON file.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use serde::Serialize;
use serde_json::{Map, Value, json};
use tracing::info;

use crate::db::{CatalogCounts, Store};

#[derive(Debug, Clone)]
pub struct DumpReport {
    pub path: PathBuf,
    pub counts: CatalogCounts,
}

#[must_use]
pub fn dump_filename(now: NaiveDateTime) -> String {
    format!("opkb_export_{}.json", now.format("%Y%m%d_%H%M%S"))
}

/// Turns a serialized row into a `{model, pk, fields}` record. Foreign key
/// columns lose their `_id` suffix.
fn record<T: Serialize>(model: &str, row: &T) -> Result<Value> {
    let Value::Object(columns) = serde_json::to_value(row)? else {
        anyhow::bail!("{model} row did not serialize to an object");
    };

    let mut pk = Value::Null;
    let mut fields = Map::new();
    for (key, value) in columns {
        if key == "id" {
            pk = value;
        } else if let Some(reference) = key.strip_suffix("_id") {
            fields.insert(reference.to_string(), value);
        } else {
            fields.insert(key, value);
        }
    }

    Ok(json!({ "model": model, "pk": pk, "fields": fields }))
}

fn records<T: Serialize>(model: &str, rows: &[T]) -> Result<Vec<Value>> {
    rows.iter().map(|row| record(model, row)).collect()
}

/// Writes every catalog table into `<dir>/opkb_export_<timestamp>.json`.
pub async fn export_json(store: &Store, dir: &Path, now: NaiveDateTime) -> Result<DumpReport> {
    let arcs = store.arcs().all().await?;
    let episodes = store.episodes().all().await?;
    let crews = store.crews().all().await?;
    let characters = store.characters().all().await?;
    let devil_fruits = store.devil_fruits().all().await?;
    let fruit_holders = store.fruit_holders().all().await?;

    let mut crews_by_character: HashMap<i32, Vec<i32>> = HashMap::new();
    for membership in store.crews().all_memberships().await? {
        crews_by_character
            .entry(membership.character_id)
            .or_default()
            .push(membership.crew_id);
    }

    let mut character_records = Vec::with_capacity(characters.len());
    for character in &characters {
        let mut value = record("knowledge.character", character)?;
        let mut crew_ids = crews_by_character
            .remove(&character.id)
            .unwrap_or_default();
        crew_ids.sort_unstable();
        value["fields"]["crews"] = json!(crew_ids);
        character_records.push(value);
    }

    let document = json!({
        "arcs": records("knowledge.arc", &arcs)?,
        "episodes": records("knowledge.episode", &episodes)?,
        "crews": records("knowledge.crew", &crews)?,
        "characters": character_records,
        "devil_fruits": records("knowledge.devilfruit", &devil_fruits)?,
        "fruit_holders": records("knowledge.fruitholder", &fruit_holders)?,
    });

    tokio::fs::create_dir_all(dir)
        .await
        .with_context(|| format!("Failed to create export directory: {}", dir.display()))?;

    let path = dir.join(dump_filename(now));
    let content = serde_json::to_vec_pretty(&document)?;
    tokio::fs::write(&path, content)
        .await
        .with_context(|| format!("Failed to write export file: {}", path.display()))?;

    let counts = CatalogCounts {
        arcs: arcs.len() as u64,
        episodes: episodes.len() as u64,
        crews: crews.len() as u64,
        characters: characters.len() as u64,
        devil_fruits: devil_fruits.len() as u64,
        fruit_holders: fruit_holders.len() as u64,
    };

    info!(path = %path.display(), "Catalog exported");

    Ok(DumpReport { path, counts })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[derive(Serialize)]
    struct Row {
        id: i32,
        name: &'static str,
        arc_id: Option<i32>,
    }

    #[test]
    fn test_dump_filename() {
        let now = NaiveDate::from_ymd_opt(2025, 3, 2)
            .unwrap()
            .and_hms_opt(14, 5, 9)
            .unwrap();
        assert_eq!(dump_filename(now), "opkb_export_20250302_140509.json");
    }

    #[test]
    fn test_record_shape() {
        let value = record(
            "knowledge.episode",
            &Row {
                id: 4,
                name: "Épisode 4",
                arc_id: Some(2),
            },
        )
        .unwrap();

        assert_eq!(value["model"], "knowledge.episode");
        assert_eq!(value["pk"], 4);
        assert_eq!(value["fields"]["arc"], 2);
        assert_eq!(value["fields"]["name"], "Épisode 4");
        assert!(value["fields"].get("id").is_none());
        assert!(value["fields"].get("arc_id").is_none());
    }
}
