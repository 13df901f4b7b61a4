use std::fmt;
use std::str::FromStr;

use crate::model::plant::{Difficulty, ParseEnumError, Plant};

/// Difficulty filter: a specific difficulty, or `All` to disable the predicate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DifficultyFilter {
    #[default]
    All,
    Only(Difficulty),
}

impl DifficultyFilter {
    /// all → easy → medium → hard → all
    pub fn cycle(self) -> Self {
        match self {
            DifficultyFilter::All => DifficultyFilter::Only(Difficulty::Easy),
            DifficultyFilter::Only(Difficulty::Easy) => DifficultyFilter::Only(Difficulty::Medium),
            DifficultyFilter::Only(Difficulty::Medium) => DifficultyFilter::Only(Difficulty::Hard),
            DifficultyFilter::Only(Difficulty::Hard) => DifficultyFilter::All,
        }
    }

    pub fn admits(self, difficulty: Option<Difficulty>) -> bool {
        match self {
            DifficultyFilter::All => true,
            DifficultyFilter::Only(wanted) => difficulty == Some(wanted),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DifficultyFilter::All => "All Levels",
            DifficultyFilter::Only(d) => d.label(),
        }
    }
}

impl FromStr for DifficultyFilter {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(DifficultyFilter::All);
        }
        s.parse::<Difficulty>()
            .map(DifficultyFilter::Only)
            .map_err(|e| ParseEnumError {
                expected: "all, easy, medium, hard",
                ..e
            })
    }
}

impl fmt::Display for DifficultyFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DifficultyFilter::All => f.write_str("all"),
            DifficultyFilter::Only(d) => write!(f, "{}", d),
        }
    }
}

/// The filter inputs that select the projection from the collection
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterState {
    /// Free-text search; blank means no search predicate
    pub search: String,
    pub difficulty: DifficultyFilter,
    pub favorites_only: bool,
}

impl FilterState {
    /// Whether any predicate is enabled
    pub fn is_active(&self) -> bool {
        !self.search.trim().is_empty()
            || self.difficulty != DifficultyFilter::All
            || self.favorites_only
    }

    /// All active predicates, ANDed
    pub fn matches(&self, plant: &Plant) -> bool {
        self.matcher().matches(plant)
    }

    fn matcher(&self) -> Matcher<'_> {
        let needle = if self.search.trim().is_empty() {
            None
        } else {
            Some(self.search.to_lowercase())
        };
        Matcher {
            needle,
            filter: self,
        }
    }
}

/// A filter with the search needle lowercased once
struct Matcher<'a> {
    needle: Option<String>,
    filter: &'a FilterState,
}

impl Matcher<'_> {
    fn matches(&self, plant: &Plant) -> bool {
        if let Some(needle) = &self.needle
            && !search_hit(plant, needle)
        {
            return false;
        }
        if !self.filter.difficulty.admits(plant.fields.difficulty) {
            return false;
        }
        if self.filter.favorites_only && !plant.fields.is_favorite {
            return false;
        }
        true
    }
}

/// Case-insensitive substring match on name, scientific name, or description.
/// `needle` must already be lowercase.
fn search_hit(plant: &Plant, needle: &str) -> bool {
    [
        plant.name(),
        plant.scientific_name(),
        plant.description(),
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(needle))
}

/// The plants that pass `filter`, in collection order
pub fn filter_plants<'a>(plants: &'a [Plant], filter: &FilterState) -> Vec<&'a Plant> {
    let matcher = filter.matcher();
    plants.iter().filter(|p| matcher.matches(p)).collect()
}

/// Like [`filter_plants`], but returns indices into `plants`
pub fn project_indices(plants: &[Plant], filter: &FilterState) -> Vec<usize> {
    let matcher = filter.matcher();
    plants
        .iter()
        .enumerate()
        .filter(|(_, p)| matcher.matches(p))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::plant::{PlantFields, PlantId};
    use pretty_assertions::assert_eq;

    fn plant(id: &str, name: &str, difficulty: Option<Difficulty>, fav: bool) -> Plant {
        Plant::new(
            PlantId::new(id),
            PlantFields {
                name: name.into(),
                scientific_name: format!("{} sp.", name),
                difficulty,
                is_favorite: fav,
                ..Default::default()
            },
        )
    }

    fn ferns() -> Vec<Plant> {
        vec![
            plant("1", "Boston Fern", Some(Difficulty::Easy), false),
            plant("2", "Maidenhair Fern", Some(Difficulty::Hard), true),
        ]
    }

    fn names(plants: &[&Plant]) -> Vec<String> {
        plants.iter().map(|p| p.name().to_string()).collect()
    }

    #[test]
    fn favorites_only_scenario() {
        let plants = ferns();
        let filter = FilterState {
            favorites_only: true,
            ..Default::default()
        };
        assert_eq!(names(&filter_plants(&plants, &filter)), vec!["Maidenhair Fern"]);
    }

    #[test]
    fn search_scenario() {
        let plants = ferns();
        let filter = FilterState {
            search: "boston".into(),
            ..Default::default()
        };
        assert_eq!(names(&filter_plants(&plants, &filter)), vec!["Boston Fern"]);
    }

    #[test]
    fn search_is_case_insensitive() {
        let plants = ferns();
        let upper = FilterState {
            search: "FERN".into(),
            ..Default::default()
        };
        let lower = FilterState {
            search: "fern".into(),
            ..Default::default()
        };
        assert_eq!(
            filter_plants(&plants, &upper),
            filter_plants(&plants, &lower)
        );
        assert_eq!(filter_plants(&plants, &upper).len(), 2);
    }

    #[test]
    fn blank_search_is_a_no_op() {
        let plants = ferns();
        let blank = FilterState {
            search: "   ".into(),
            ..Default::default()
        };
        assert_eq!(
            filter_plants(&plants, &blank),
            filter_plants(&plants, &FilterState::default())
        );
        assert!(!blank.is_active());
    }

    #[test]
    fn search_checks_scientific_name_and_description() {
        let mut plants = ferns();
        plants[0].fields.description = Some("Graceful, ARCHING fronds".into());
        let by_description = FilterState {
            search: "arching".into(),
            ..Default::default()
        };
        assert_eq!(
            names(&filter_plants(&plants, &by_description)),
            vec!["Boston Fern"]
        );

        let by_scientific = FilterState {
            search: "maidenhair fern sp".into(),
            ..Default::default()
        };
        assert_eq!(
            names(&filter_plants(&plants, &by_scientific)),
            vec!["Maidenhair Fern"]
        );
    }

    #[test]
    fn absent_description_does_not_match_or_panic() {
        let plants = ferns();
        let filter = FilterState {
            search: "humid".into(),
            ..Default::default()
        };
        assert!(filter_plants(&plants, &filter).is_empty());
    }

    #[test]
    fn difficulty_all_is_no_filter() {
        let mut plants = ferns();
        plants.push(plant("3", "Mystery Fern", None, false));
        let all = FilterState {
            difficulty: DifficultyFilter::All,
            ..Default::default()
        };
        assert_eq!(filter_plants(&plants, &all).len(), 3);

        let hard = FilterState {
            difficulty: DifficultyFilter::Only(Difficulty::Hard),
            ..Default::default()
        };
        assert_eq!(names(&filter_plants(&plants, &hard)), vec!["Maidenhair Fern"]);
    }

    #[test]
    fn favorites_only_without_favorites_is_empty() {
        let plants = vec![plant("1", "Boston Fern", Some(Difficulty::Easy), false)];
        let filter = FilterState {
            favorites_only: true,
            ..Default::default()
        };
        assert!(filter_plants(&plants, &filter).is_empty());
    }

    #[test]
    fn predicates_are_anded_and_order_preserved() {
        let plants = vec![
            plant("1", "Holly Fern", Some(Difficulty::Easy), true),
            plant("2", "Staghorn Fern", Some(Difficulty::Medium), true),
            plant("3", "Bird's Nest Fern", Some(Difficulty::Easy), false),
            plant("4", "Asparagus Fern", Some(Difficulty::Easy), true),
        ];
        let filter = FilterState {
            search: "fern".into(),
            difficulty: DifficultyFilter::Only(Difficulty::Easy),
            favorites_only: true,
        };
        assert_eq!(
            names(&filter_plants(&plants, &filter)),
            vec!["Holly Fern", "Asparagus Fern"]
        );
        assert_eq!(project_indices(&plants, &filter), vec![0, 3]);
    }

    #[test]
    fn filtering_is_idempotent() {
        let plants = ferns();
        let filter = FilterState {
            search: "fern".into(),
            ..Default::default()
        };
        let first = filter_plants(&plants, &filter);
        let second = filter_plants(&plants, &filter);
        assert_eq!(first, second);
    }

    #[test]
    fn difficulty_filter_cycles_and_parses() {
        let mut f = DifficultyFilter::All;
        let mut seen = Vec::new();
        for _ in 0..4 {
            f = f.cycle();
            seen.push(f.to_string());
        }
        assert_eq!(seen, vec!["easy", "medium", "hard", "all"]);
        assert_eq!("ALL".parse::<DifficultyFilter>(), Ok(DifficultyFilter::All));
        assert_eq!(
            "medium".parse::<DifficultyFilter>(),
            Ok(DifficultyFilter::Only(Difficulty::Medium))
        );
        let err = "impossible".parse::<DifficultyFilter>().unwrap_err();
        assert_eq!(err.expected, "all, easy, medium, hard");
    }
}
