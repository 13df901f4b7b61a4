use std::path::Path;

use tracing::{info, warn};

use crate::io::recovery::{self, RecoveryEntry};
use crate::io::store::{PlantStore, StoreError};
use crate::model::plant::{Difficulty, PlantFields, SunRequirement, WaterRequirement};

/// Outcome of a seeding pass. Seeding is best effort: each sample is created
/// independently and failures are counted, not rolled back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub created: usize,
    /// (plant name, error message) for each sample that was not created
    pub failed: Vec<(String, String)>,
}

impl SeedReport {
    pub fn summary(&self) -> String {
        if self.failed.is_empty() {
            format!("Added {} sample plants", self.created)
        } else {
            format!(
                "Added {} of {} sample plants",
                self.created,
                self.created + self.failed.len()
            )
        }
    }
}

/// The fixed set of example plants added to an empty catalog
pub fn sample_plants() -> Vec<PlantFields> {
    vec![
        PlantFields {
            name: "Boston Fern".into(),
            scientific_name: "Nephrolepis exaltata".into(),
            description: Some(
                "A popular houseplant with graceful, arching fronds. Perfect for hanging baskets and humid environments."
                    .into(),
            ),
            habitat: Some("Tropical and subtropical regions".into()),
            sun_requirement: Some(SunRequirement::PartialShade),
            water_requirement: Some(WaterRequirement::High),
            difficulty: Some(Difficulty::Easy),
            height: Some("1-3 feet".into()),
            image_url: Some(
                "https://images.unsplash.com/photo-1586771107445-d3ca888129ff?w=400&h=300&fit=crop"
                    .into(),
            ),
            is_favorite: false,
        },
        PlantFields {
            name: "Maidenhair Fern".into(),
            scientific_name: "Adiantum raddianum".into(),
            description: Some(
                "Delicate, lacy fronds with thin black stems. Requires consistent moisture and humidity."
                    .into(),
            ),
            habitat: Some("Moist, shaded forest floors".into()),
            sun_requirement: Some(SunRequirement::Shade),
            water_requirement: Some(WaterRequirement::High),
            difficulty: Some(Difficulty::Hard),
            height: Some("1-2 feet".into()),
            image_url: Some(
                "https://images.unsplash.com/photo-1545558014-8692077e9b5c?w=400&h=300&fit=crop"
                    .into(),
            ),
            is_favorite: true,
        },
        PlantFields {
            name: "Bird's Nest Fern".into(),
            scientific_name: "Asplenium nidus".into(),
            description: Some(
                "Broad, glossy fronds that form a nest-like rosette. Great for low-light conditions."
                    .into(),
            ),
            habitat: Some("Tropical rainforest epiphyte".into()),
            sun_requirement: Some(SunRequirement::Shade),
            water_requirement: Some(WaterRequirement::Medium),
            difficulty: Some(Difficulty::Easy),
            height: Some("2-3 feet".into()),
            image_url: Some(
                "https://images.unsplash.com/photo-1631205750770-7762de17d9fe?w=400&h=300&fit=crop"
                    .into(),
            ),
            is_favorite: false,
        },
    ]
}

/// Create every sample plant, continuing past failures.
/// Failures go to the recovery log when `recovery_dir` is given.
pub fn seed_samples<S: PlantStore + ?Sized>(store: &S, recovery_dir: Option<&Path>) -> SeedReport {
    let mut report = SeedReport::default();
    for fields in sample_plants() {
        let name = fields.name.clone();
        match store.create(fields.clone()) {
            Ok(_) => report.created += 1,
            Err(e) => {
                warn!(plant = %name, error = %e, "could not create sample plant");
                if let Some(dir) = recovery_dir {
                    recovery::log_recovery(dir, RecoveryEntry::failed_seed(&fields, &e.to_string()));
                }
                report.failed.push((name, e.to_string()));
            }
        }
    }
    info!(created = report.created, failed = report.failed.len(), "seeding finished");
    report
}

/// Seed only when the store currently holds no plants.
/// Returns `None` when the catalog already had plants.
pub fn seed_if_empty<S: PlantStore + ?Sized>(
    store: &S,
    recovery_dir: Option<&Path>,
) -> Result<Option<SeedReport>, StoreError> {
    let listed = store.list()?;
    if !listed.success {
        return Err(StoreError::Unavailable(
            "store reported an unsuccessful list".into(),
        ));
    }
    if !listed.data.is_empty() {
        return Ok(None);
    }
    Ok(Some(seed_samples(store, recovery_dir)))
}
