use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

/// Opaque plant identifier assigned by the store on create
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlantId(pub String);

impl PlantId {
    pub fn new(id: impl Into<String>) -> Self {
        PlantId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First 8 characters, for compact listings
    pub fn short(&self) -> &str {
        match self.0.char_indices().nth(8) {
            Some((idx, _)) => &self.0[..idx],
            None => &self.0,
        }
    }
}

impl fmt::Display for PlantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Error for an enum value that is not one of the known spellings
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} \"{value}\" (expected one of: {expected})")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
    pub expected: &'static str,
}

/// Normalize an enum spelling: lowercase, spaces and underscores become hyphens
fn normalize(s: &str) -> String {
    s.trim()
        .to_lowercase()
        .chars()
        .map(|c| if c == ' ' || c == '_' { '-' } else { c })
        .collect()
}

/// How much direct sun a plant wants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SunRequirement {
    FullSun,
    PartialShade,
    Shade,
}

impl SunRequirement {
    pub const ALL: [SunRequirement; 3] = [
        SunRequirement::FullSun,
        SunRequirement::PartialShade,
        SunRequirement::Shade,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SunRequirement::FullSun => "full-sun",
            SunRequirement::PartialShade => "partial-shade",
            SunRequirement::Shade => "shade",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SunRequirement::FullSun => "Full Sun",
            SunRequirement::PartialShade => "Partial Shade",
            SunRequirement::Shade => "Shade",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            SunRequirement::FullSun => "\u{2600}\u{fe0f}",
            SunRequirement::PartialShade => "\u{26c5}",
            SunRequirement::Shade => "\u{1f32b}\u{fe0f}",
        }
    }
}

impl FromStr for SunRequirement {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "full-sun" => Ok(SunRequirement::FullSun),
            "partial-shade" => Ok(SunRequirement::PartialShade),
            "shade" => Ok(SunRequirement::Shade),
            _ => Err(ParseEnumError {
                kind: "sun requirement",
                value: s.to_string(),
                expected: "full-sun, partial-shade, shade",
            }),
        }
    }
}

impl fmt::Display for SunRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How much water a plant wants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum WaterRequirement {
    Low,
    Medium,
    High,
}

impl WaterRequirement {
    pub const ALL: [WaterRequirement; 3] = [
        WaterRequirement::Low,
        WaterRequirement::Medium,
        WaterRequirement::High,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            WaterRequirement::Low => "low",
            WaterRequirement::Medium => "medium",
            WaterRequirement::High => "high",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            WaterRequirement::Low => "Low",
            WaterRequirement::Medium => "Medium",
            WaterRequirement::High => "High",
        }
    }

    /// One droplet per level
    pub fn icon(self) -> &'static str {
        match self {
            WaterRequirement::Low => "\u{1f4a7}",
            WaterRequirement::Medium => "\u{1f4a7}\u{1f4a7}",
            WaterRequirement::High => "\u{1f4a7}\u{1f4a7}\u{1f4a7}",
        }
    }
}

impl FromStr for WaterRequirement {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "low" => Ok(WaterRequirement::Low),
            "medium" => Ok(WaterRequirement::Medium),
            "high" => Ok(WaterRequirement::High),
            _ => Err(ParseEnumError {
                kind: "water requirement",
                value: s.to_string(),
                expected: "low, medium, high",
            }),
        }
    }
}

impl fmt::Display for WaterRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Care difficulty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

impl FromStr for Difficulty {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(ParseEnumError {
                kind: "difficulty",
                value: s.to_string(),
                expected: "easy, medium, hard",
            }),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Deserialize an optional enum, mapping unknown spellings to `None`
/// instead of failing the whole record.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|s| s.parse().ok()))
}

/// Deserialize a field whose explicit `null` means the same as a missing key
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Every plant field except the id. This is what forms package and what
/// the store's create/update take.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlantFields {
    /// Display name
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Formal (scientific) name
    #[serde(default, deserialize_with = "null_as_default")]
    pub scientific_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub habitat: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub sun_requirement: Option<SunRequirement>,
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub water_requirement: Option<WaterRequirement>,
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub difficulty: Option<Difficulty>,
    /// Mature height, free text ("1-3 feet")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_favorite: bool,
}

/// Shown for absent or unrecognized enum values
pub const UNKNOWN: &str = "unknown";
const NEUTRAL_SUN_ICON: &str = "\u{1f324}\u{fe0f}";
const NEUTRAL_WATER_ICON: &str = "\u{1f4a7}";

/// A catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plant {
    pub id: PlantId,
    #[serde(flatten)]
    pub fields: PlantFields,
}

impl Plant {
    pub fn new(id: PlantId, fields: PlantFields) -> Self {
        Plant { id, fields }
    }

    pub fn name(&self) -> &str {
        &self.fields.name
    }

    pub fn scientific_name(&self) -> &str {
        &self.fields.scientific_name
    }

    pub fn description(&self) -> &str {
        self.fields.description.as_deref().unwrap_or("")
    }

    pub fn is_favorite(&self) -> bool {
        self.fields.is_favorite
    }

    pub fn sun_icon(&self) -> &'static str {
        self.fields
            .sun_requirement
            .map_or(NEUTRAL_SUN_ICON, SunRequirement::icon)
    }

    pub fn water_icon(&self) -> &'static str {
        self.fields
            .water_requirement
            .map_or(NEUTRAL_WATER_ICON, WaterRequirement::icon)
    }

    pub fn sun_label(&self) -> &'static str {
        self.fields
            .sun_requirement
            .map_or(UNKNOWN, SunRequirement::label)
    }

    pub fn water_label(&self) -> &'static str {
        self.fields
            .water_requirement
            .map_or(UNKNOWN, WaterRequirement::label)
    }

    pub fn difficulty_label(&self) -> &'static str {
        self.fields.difficulty.map_or(UNKNOWN, Difficulty::label)
    }

    /// The image to show, or `placeholder` when none is set
    pub fn image_or<'a>(&'a self, placeholder: &'a str) -> &'a str {
        match self.fields.image_url.as_deref() {
            Some(url) if !url.trim().is_empty() => url,
            _ => placeholder,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parse_accepts_spaces_and_case() {
        assert_eq!(
            "partial shade".parse::<SunRequirement>(),
            Ok(SunRequirement::PartialShade)
        );
        assert_eq!(
            "Full_Sun".parse::<SunRequirement>(),
            Ok(SunRequirement::FullSun)
        );
        assert_eq!("HIGH".parse::<WaterRequirement>(), Ok(WaterRequirement::High));
        assert_eq!(" hard ".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert!("extreme".parse::<Difficulty>().is_err());
    }

    #[test]
    fn parse_error_names_the_kind() {
        let err = "wet".parse::<WaterRequirement>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "unknown water requirement \"wet\" (expected one of: low, medium, high)"
        );
    }

    #[test]
    fn deserialize_camel_case_record() {
        let json = r#"{
            "id": "abc",
            "name": "Boston Fern",
            "scientificName": "Nephrolepis exaltata",
            "sunRequirement": "partial shade",
            "waterRequirement": "high",
            "difficulty": "easy",
            "isFavorite": true
        }"#;
        let plant: Plant = serde_json::from_str(json).unwrap();
        assert_eq!(plant.id, PlantId::new("abc"));
        assert_eq!(plant.name(), "Boston Fern");
        assert_eq!(
            plant.fields.sun_requirement,
            Some(SunRequirement::PartialShade)
        );
        assert_eq!(plant.fields.difficulty, Some(Difficulty::Easy));
        assert!(plant.is_favorite());
        assert_eq!(plant.fields.description, None);
    }

    #[test]
    fn unknown_enum_values_degrade_to_none() {
        let json = r#"{"id":"x","name":"A","scientificName":"B","difficulty":"legendary","sunRequirement":null}"#;
        let plant: Plant = serde_json::from_str(json).unwrap();
        assert_eq!(plant.fields.difficulty, None);
        assert_eq!(plant.fields.sun_requirement, None);
        assert!(!plant.is_favorite());
    }

    #[test]
    fn null_required_fields_load_as_empty() {
        let json = r#"{"id":"b","name":null,"scientificName":null,"description":null,"isFavorite":null}"#;
        let plant: Plant = serde_json::from_str(json).unwrap();
        assert_eq!(plant.name(), "");
        assert_eq!(plant.scientific_name(), "");
        assert_eq!(plant.description(), "");
        assert!(!plant.is_favorite());
    }

    #[test]
    fn serialize_omits_absent_fields() {
        let plant = Plant::new(
            PlantId::new("p1"),
            PlantFields {
                name: "Holly Fern".into(),
                scientific_name: "Cyrtomium falcatum".into(),
                sun_requirement: Some(SunRequirement::PartialShade),
                ..Default::default()
            },
        );
        let value = serde_json::to_value(&plant).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "id": "p1",
                "name": "Holly Fern",
                "scientificName": "Cyrtomium falcatum",
                "sunRequirement": "partial-shade",
                "isFavorite": false
            })
        );
    }

    #[test]
    fn image_falls_back_to_placeholder() {
        let mut plant = Plant::new(PlantId::new("p"), PlantFields::default());
        assert_eq!(plant.image_or("ph"), "ph");
        plant.fields.image_url = Some("  ".into());
        assert_eq!(plant.image_or("ph"), "ph");
        plant.fields.image_url = Some("https://x/y.jpg".into());
        assert_eq!(plant.image_or("ph"), "https://x/y.jpg");
    }

    #[test]
    fn absent_enums_present_neutrally() {
        let plant = Plant::new(PlantId::new("p"), PlantFields::default());
        assert_eq!(plant.difficulty_label(), "unknown");
        assert_eq!(plant.sun_label(), "unknown");
        assert_eq!(plant.sun_icon(), "\u{1f324}\u{fe0f}");
        assert_eq!(plant.water_icon(), "\u{1f4a7}");

        let mut shady = plant.clone();
        shady.fields.sun_requirement = Some(SunRequirement::Shade);
        shady.fields.water_requirement = Some(WaterRequirement::High);
        assert_eq!(shady.sun_label(), "Shade");
        assert_eq!(shady.water_icon(), "\u{1f4a7}\u{1f4a7}\u{1f4a7}");
    }

    #[test]
    fn short_id() {
        assert_eq!(PlantId::new("0123456789").short(), "01234567");
        assert_eq!(PlantId::new("abc").short(), "abc");
    }
}
