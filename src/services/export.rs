//! Printable record sheets (PDF) and spreadsheet exports (CSV).

use chrono::{NaiveDate, NaiveDateTime};

use crate::entities::{arcs, characters, crews, devil_fruits, episodes, fruit_holders};
use crate::services::pdf::{PdfDocument, Style};

pub const PDF_CONTENT_TYPE: &str = "application/pdf";
pub const CSV_CONTENT_TYPE: &str = "text/csv; charset=utf-8";

pub const CHARACTERS_CSV_FILENAME: &str = "characters_export.csv";
pub const FRUITS_CSV_FILENAME: &str = "devil_fruits_export.csv";

const CHARACTERS_CSV_HEADER: [&str; 7] = [
    "Nom",
    "Surnom",
    "Rôle",
    "Prime",
    "Origine",
    "Statut",
    "Épisode première apparition",
];

const FRUITS_CSV_HEADER: [&str; 7] = [
    "Nom",
    "Romanji",
    "Type",
    "Capacité",
    "Rareté",
    "Statut",
    "Arc première apparition",
];

/// Longest ability text written to the fruits CSV.
const CSV_ABILITY_MAX_CHARS: usize = 100;

const NOT_AVAILABLE: &str = "N/A";

/// A rendered file ready to be sent as an attachment.
#[derive(Debug, Clone)]
pub struct ExportFile {
    pub filename: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

/// `character_Monkey_D._Luffy.pdf`
#[must_use]
pub fn pdf_filename(prefix: &str, name: &str) -> String {
    let name: String = name
        .chars()
        .filter(|c| !matches!(*c, '"' | '/' | '\\') && !c.is_control())
        .map(|c| if c == ' ' { '_' } else { c })
        .collect();
    format!("{prefix}_{name}.pdf")
}

/// `1,500,000,000 Berries`, or `Aucune` without a bounty.
#[must_use]
pub fn format_bounty(bounty: i64) -> String {
    if bounty <= 0 {
        return "Aucune".to_string();
    }

    let digits = bounty.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    format!("{grouped} Berries")
}

fn format_date(date: Option<NaiveDate>) -> String {
    date.map_or_else(|| NOT_AVAILABLE.to_string(), |d| d.format("%Y-%m-%d").to_string())
}

fn yes_no(value: bool) -> String {
    let text = if value { "Oui" } else { "Non" };
    text.to_string()
}

fn or_na(value: &str) -> &str {
    if value.is_empty() { NOT_AVAILABLE } else { value }
}

fn generated_line(at: NaiveDateTime) -> String {
    format!("Généré le {}", at.format("%d/%m/%Y à %H:%M:%S"))
}

/// Everything printed on a character sheet.
pub struct CharacterSheet<'a> {
    pub character: &'a characters::Model,
    pub first_appearance: Option<&'a episodes::Model>,
    pub crews: &'a [crews::Model],
    pub fruits: &'a [(fruit_holders::Model, devil_fruits::Model)],
}

#[must_use]
pub fn character_pdf(sheet: &CharacterSheet<'_>, generated_at: NaiveDateTime) -> Vec<u8> {
    let c = sheet.character;
    let mut doc = PdfDocument::new(format!("Fiche Personnage: {}", c.name));

    doc.text(Style::Title, &format!("Fiche Personnage: {}", c.name));
    if !c.epithet.is_empty() {
        doc.text(Style::Italic, &c.epithet);
    }
    doc.space(16.0);

    doc.field("Nom", &c.name);
    doc.field("Surnom", or_na(&c.epithet));
    doc.field("Rôle", c.role.label());
    doc.field("Prime", &format_bounty(c.bounty));
    doc.field("Origine", or_na(&c.origin));
    doc.field("Statut", c.status.label());
    if let Some(episode) = sheet.first_appearance {
        doc.field(
            "Première apparition",
            &format!("Épisode #{}: {}", episode.number, episode.title),
        );
    }
    doc.space(16.0);

    if !c.description.is_empty() {
        doc.text(Style::Heading, "Description");
        doc.text(Style::Body, &c.description);
        doc.space(10.0);
    }

    if !sheet.crews.is_empty() {
        doc.text(Style::Heading, "Équipages");
        let names: Vec<&str> = sheet.crews.iter().map(|crew| crew.name.as_str()).collect();
        doc.text(Style::Body, &names.join(", "));
        doc.space(10.0);
    }

    if !sheet.fruits.is_empty() {
        doc.text(Style::Heading, "Fruits du démon");
        let rows: Vec<Vec<String>> = sheet
            .fruits
            .iter()
            .map(|(holder, fruit)| {
                vec![
                    fruit.name.clone(),
                    format_date(holder.from_date),
                    format_date(holder.to_date),
                    yes_no(holder.is_current),
                ]
            })
            .collect();
        doc.table(
            &["Fruit", "Date début", "Date fin", "Actuel"],
            &rows,
            &[200.0, 110.0, 110.0, 60.0],
        );
        doc.space(10.0);
    }

    doc.space(16.0);
    doc.text(Style::Italic, &generated_line(generated_at));

    doc.finish()
}

/// Everything printed on a devil fruit sheet.
pub struct FruitSheet<'a> {
    pub fruit: &'a devil_fruits::Model,
    pub first_appearance: Option<&'a arcs::Model>,
    pub holders: &'a [(fruit_holders::Model, characters::Model)],
}

#[must_use]
pub fn fruit_pdf(sheet: &FruitSheet<'_>, generated_at: NaiveDateTime) -> Vec<u8> {
    let f = sheet.fruit;
    let mut doc = PdfDocument::new(format!("Fiche Fruit du Démon: {}", f.name));

    doc.text(Style::Title, &format!("Fiche Fruit du Démon: {}", f.name));
    doc.space(16.0);

    doc.field("Nom", &f.name);
    doc.field("Romanji", or_na(&f.romanji));
    doc.field("Type", f.fruit_type.label());
    doc.field("Rareté", &format!("{}/5", f.rarity));
    doc.field("Statut", f.status.label());
    if let Some(arc) = sheet.first_appearance {
        doc.field("Première apparition", &arc.name);
    }
    doc.space(16.0);

    doc.text(Style::Heading, "Capacité");
    doc.text(Style::Body, &f.ability);
    doc.space(10.0);

    if !f.weaknesses.is_empty() {
        doc.text(Style::Heading, "Faiblesses");
        doc.text(Style::Body, &f.weaknesses);
        doc.space(10.0);
    }

    if !f.description.is_empty() {
        doc.text(Style::Heading, "Description");
        doc.text(Style::Body, &f.description);
        doc.space(10.0);
    }

    if !sheet.holders.is_empty() {
        doc.text(Style::Heading, "Détenteurs");
        let rows: Vec<Vec<String>> = sheet
            .holders
            .iter()
            .map(|(holder, character)| {
                vec![
                    character.name.clone(),
                    format_date(holder.from_date),
                    format_date(holder.to_date),
                    yes_no(holder.is_current),
                ]
            })
            .collect();
        doc.table(
            &["Personnage", "Date début", "Date fin", "Actuel"],
            &rows,
            &[180.0, 110.0, 110.0, 80.0],
        );
        doc.space(10.0);
    }

    doc.space(16.0);
    doc.text(Style::Italic, &generated_line(generated_at));

    doc.finish()
}

fn csv_escape(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn csv_line(out: &mut String, fields: &[String]) {
    let escaped: Vec<String> = fields.iter().map(|f| csv_escape(f)).collect();
    out.push_str(&escaped.join(","));
    out.push_str("\r\n");
}

fn csv_header(out: &mut String, header: &[&str]) {
    let fields: Vec<String> = header.iter().map(|h| (*h).to_string()).collect();
    csv_line(out, &fields);
}

#[must_use]
pub fn characters_csv(rows: &[(characters::Model, Option<episodes::Model>)]) -> String {
    let mut out = String::new();
    csv_header(&mut out, &CHARACTERS_CSV_HEADER);

    for (c, episode) in rows {
        csv_line(
            &mut out,
            &[
                c.name.clone(),
                c.epithet.clone(),
                c.role.label().to_string(),
                c.bounty.to_string(),
                c.origin.clone(),
                c.status.label().to_string(),
                episode
                    .as_ref()
                    .map(|e| e.number.to_string())
                    .unwrap_or_default(),
            ],
        );
    }

    out
}

#[must_use]
pub fn fruits_csv(rows: &[(devil_fruits::Model, Option<arcs::Model>)]) -> String {
    let mut out = String::new();
    csv_header(&mut out, &FRUITS_CSV_HEADER);

    for (f, arc) in rows {
        csv_line(
            &mut out,
            &[
                f.name.clone(),
                f.romanji.clone(),
                f.fruit_type.label().to_string(),
                f.ability.chars().take(CSV_ABILITY_MAX_CHARS).collect(),
                f.rarity.to_string(),
                f.status.label().to_string(),
                arc.as_ref().map(|a| a.name.clone()).unwrap_or_default(),
            ],
        );
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::characters::{CharacterStatus, Role};
    use crate::entities::devil_fruits::{FruitStatus, FruitType};

    fn luffy() -> characters::Model {
        characters::Model {
            id: 1,
            name: "Monkey D. Luffy".to_string(),
            epithet: "Chapeau de Paille".to_string(),
            role: Role::Pirate,
            bounty: 3_000_000_000,
            origin: "East Blue, Fuschia".to_string(),
            status: CharacterStatus::Alive,
            first_appearance_episode_id: None,
            description: "Capitaine de l'équipage du Chapeau de Paille".to_string(),
            image_url: String::new(),
        }
    }

    fn gomu() -> devil_fruits::Model {
        devil_fruits::Model {
            id: 1,
            name: "Gomu Gomu no Mi".to_string(),
            romanji: "Gomu Gomu no Mi".to_string(),
            fruit_type: FruitType::Paramecia,
            ability: "x".repeat(150),
            weaknesses: "Eau de mer".to_string(),
            rarity: 5,
            status: FruitStatus::Active,
            first_appearance_arc_id: None,
            description: String::new(),
        }
    }

    fn at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(14, 5, 7)
            .unwrap()
    }

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    #[test]
    fn test_format_bounty() {
        assert_eq!(format_bounty(0), "Aucune");
        assert_eq!(format_bounty(999), "999 Berries");
        assert_eq!(format_bounty(1_000), "1,000 Berries");
        assert_eq!(format_bounty(3_000_000_000), "3,000,000,000 Berries");
    }

    #[test]
    fn test_pdf_filename() {
        assert_eq!(
            pdf_filename("character", "Monkey D. Luffy"),
            "character_Monkey_D._Luffy.pdf"
        );
        assert_eq!(pdf_filename("fruit", "Mera \"Mera\""), "fruit_Mera_Mera.pdf");
    }

    #[test]
    fn test_character_pdf_content() {
        let character = luffy();
        let holder = fruit_holders::Model {
            id: 1,
            devil_fruit_id: 1,
            character_id: 1,
            from_date: None,
            to_date: None,
            is_current: true,
        };
        let fruits = vec![(holder, gomu())];
        let sheet = CharacterSheet {
            character: &character,
            first_appearance: None,
            crews: &[],
            fruits: &fruits,
        };

        let bytes = character_pdf(&sheet, at());
        assert!(bytes.starts_with(b"%PDF-1.4"));
        assert!(contains(&bytes, b"(Fiche Personnage: Monkey D. Luffy) Tj"));
        assert!(contains(&bytes, b"(3,000,000,000 Berries) Tj"));
        assert!(contains(&bytes, b"(Oui) Tj"));
        assert!(contains(&bytes, b"(G\xe9n\xe9r\xe9 le 09/03/2024 \xe0 14:05:07) Tj"));
    }

    #[test]
    fn test_fruit_pdf_without_holders() {
        let fruit = gomu();
        let sheet = FruitSheet {
            fruit: &fruit,
            first_appearance: None,
            holders: &[],
        };

        let bytes = fruit_pdf(&sheet, at());
        assert!(contains(&bytes, b"(5/5) Tj"));
        assert!(contains(&bytes, b"(Paramecia) Tj"));
        assert!(!contains(&bytes, b"(D\xe9tenteurs) Tj"));
    }

    #[test]
    fn test_characters_csv_quotes_and_labels() {
        let csv = characters_csv(&[(luffy(), None)]);
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("Nom,Surnom,Rôle,Prime,Origine,Statut,Épisode première apparition")
        );
        assert_eq!(
            lines.next(),
            Some("Monkey D. Luffy,Chapeau de Paille,Pirate,3000000000,\"East Blue, Fuschia\",Vivant,")
        );
    }

    #[test]
    fn test_fruits_csv_truncates_ability() {
        let csv = fruits_csv(&[(gomu(), None)]);
        let row = csv.lines().nth(1).unwrap();
        assert!(row.contains(&"x".repeat(100)));
        assert!(!row.contains(&"x".repeat(101)));
        assert!(row.starts_with("Gomu Gomu no Mi,Gomu Gomu no Mi,Paramecia,"));
    }

    #[test]
    fn test_csv_escape() {
        assert_eq!(csv_escape("plain"), "plain");
        assert_eq!(csv_escape("a,b"), "\"a,b\"");
        assert_eq!(csv_escape("say \"hi\""), "\"say \"\"hi\"\"\"");
    }
}
