use serde::Serialize;

use crate::io::recovery::RecoveryEntry;
use crate::model::plant::Plant;
use crate::ops::seed::SeedReport;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct ListJson<'a> {
    pub showing: usize,
    pub total: usize,
    pub plants: Vec<&'a Plant>,
}

#[derive(Serialize)]
pub struct SeedJson {
    pub seeded: bool,
    pub created: usize,
    pub failed: Vec<SeedFailureJson>,
}

#[derive(Serialize)]
pub struct SeedFailureJson {
    pub name: String,
    pub error: String,
}

pub fn seed_to_json(report: Option<&SeedReport>) -> SeedJson {
    match report {
        Some(r) => SeedJson {
            seeded: true,
            created: r.created,
            failed: r
                .failed
                .iter()
                .map(|(name, error)| SeedFailureJson {
                    name: name.clone(),
                    error: error.clone(),
                })
                .collect(),
        },
        None => SeedJson {
            seeded: false,
            created: 0,
            failed: Vec::new(),
        },
    }
}

pub fn recovery_to_json(entries: &[RecoveryEntry]) -> serde_json::Value {
    serde_json::Value::Array(entries.iter().map(RecoveryEntry::to_json).collect())
}

// ---------------------------------------------------------------------------
// Human-readable formatting
// ---------------------------------------------------------------------------

fn favorite_mark(plant: &Plant) -> char {
    if plant.is_favorite() { '\u{2605}' } else { ' ' }
}

/// Format a plant as a one-line summary
pub fn format_plant_line(plant: &Plant) -> String {
    format!(
        "{:<8} {} {} ({}) [{}]",
        plant.id.short(),
        favorite_mark(plant),
        plant.name(),
        plant.scientific_name(),
        plant
            .fields
            .difficulty
            .map_or(crate::model::plant::UNKNOWN, |d| d.as_str()),
    )
}

/// The projection followed by the "Showing X of Y" summary
pub fn format_plant_listing(visible: &[&Plant], total: usize, filtered: bool) -> Vec<String> {
    let mut lines = Vec::new();
    if visible.is_empty() {
        lines.push("No plants found".to_string());
        lines.push(if filtered {
            "Try adjusting your search or filters".to_string()
        } else {
            "Add your first plant with `frond add`".to_string()
        });
    } else {
        lines.extend(visible.iter().map(|p| format_plant_line(p)));
    }
    lines.push(String::new());
    lines.push(format!("Showing {} of {} plants", visible.len(), total));
    lines
}

/// Format the detailed plant view
pub fn format_plant_detail(plant: &Plant, placeholder_image: &str) -> Vec<String> {
    let f = &plant.fields;
    let mut lines = Vec::new();

    let star = if plant.is_favorite() { " \u{2605}" } else { "" };
    lines.push(format!("{}{}", plant.name(), star));
    lines.push(format!("  {}", plant.scientific_name()));
    lines.push(String::new());
    lines.push(format!("id: {}", plant.id));
    lines.push(format!("difficulty: {}", plant.difficulty_label()));
    lines.push(format!("sun: {} {}", plant.sun_icon(), plant.sun_label()));
    lines.push(format!(
        "water: {} {}",
        plant.water_icon(),
        plant.water_label()
    ));
    if let Some(h) = &f.height {
        lines.push(format!("height: {}", h));
    }
    if let Some(h) = &f.habitat {
        lines.push(format!("habitat: {}", h));
    }
    lines.push(format!("image: {}", plant.image_or(placeholder_image)));
    if let Some(d) = &f.description {
        lines.push("description:".to_string());
        for line in d.lines() {
            lines.push(format!("  {}", line));
        }
    }
    lines
}

pub fn format_seed_report(report: Option<&SeedReport>) -> Vec<String> {
    let Some(report) = report else {
        return vec!["Catalog already has plants; nothing seeded".to_string()];
    };
    let mut lines = vec![report.summary()];
    for (name, error) in &report.failed {
        lines.push(format!("  failed: {} ({})", name, error));
    }
    lines
}
