use std::fmt;

use crate::model::plant::{
    Difficulty, Plant, PlantFields, PlantId, SunRequirement, WaterRequirement,
};

/// Whether a form creates a new plant or edits an existing one
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(PlantId),
}

/// Every editable field, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Name,
    ScientificName,
    Description,
    Habitat,
    Height,
    Sun,
    Water,
    Difficulty,
    ImageUrl,
    Favorite,
}

impl FormField {
    pub const ALL: [FormField; 10] = [
        FormField::Name,
        FormField::ScientificName,
        FormField::Description,
        FormField::Habitat,
        FormField::Height,
        FormField::Sun,
        FormField::Water,
        FormField::Difficulty,
        FormField::ImageUrl,
        FormField::Favorite,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FormField::Name => "Common Name",
            FormField::ScientificName => "Scientific Name",
            FormField::Description => "Description",
            FormField::Habitat => "Natural Habitat",
            FormField::Height => "Mature Height",
            FormField::Sun => "Sun Requirement",
            FormField::Water => "Water Requirement",
            FormField::Difficulty => "Care Difficulty",
            FormField::ImageUrl => "Image URL (optional)",
            FormField::Favorite => "Mark as Favorite",
        }
    }

    pub fn is_text(self) -> bool {
        matches!(
            self,
            FormField::Name
                | FormField::ScientificName
                | FormField::Description
                | FormField::Habitat
                | FormField::Height
                | FormField::ImageUrl
        )
    }

    pub fn is_required(self) -> bool {
        matches!(self, FormField::Name | FormField::ScientificName)
    }

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A field's value as read from or written to the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Sun(Option<SunRequirement>),
    Water(Option<WaterRequirement>),
    Difficulty(Option<Difficulty>),
    Flag(bool),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("{field} does not accept a {given} value")]
    FieldKind { field: FormField, given: &'static str },
}

impl FieldValue {
    fn kind(&self) -> &'static str {
        match self {
            FieldValue::Text(_) => "text",
            FieldValue::Sun(_) => "sun requirement",
            FieldValue::Water(_) => "water requirement",
            FieldValue::Difficulty(_) => "difficulty",
            FieldValue::Flag(_) => "on/off",
        }
    }
}

/// A failed required-field check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: FormField,
    pub message: String,
}

/// All field errors from one validation pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(pub Vec<FieldError>);

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.0.iter().map(|e| e.message.as_str()).collect();
        f.write_str(&messages.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

impl ValidationErrors {
    pub fn for_field(&self, field: FormField) -> Option<&str> {
        self.0
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }
}

/// Where a validated submission should go
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitTarget {
    Create,
    Update(PlantId),
}

/// Field values of a plant being created or edited.
///
/// Built with [`FormState::from_target`]: an existing plant gives edit mode
/// with every field copied from it; `None` gives create mode with fixed
/// defaults. [`FormState::reset`] re-derives everything from a new target, so
/// nothing from a previous target survives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    mode: FormMode,
    name: String,
    scientific_name: String,
    description: String,
    habitat: String,
    height: String,
    sun: Option<SunRequirement>,
    water: Option<WaterRequirement>,
    difficulty: Option<Difficulty>,
    image_url: String,
    is_favorite: bool,
    errors: Vec<FieldError>,
}

impl FormState {
    /// Create mode with the default configuration
    pub fn for_create() -> Self {
        FormState {
            mode: FormMode::Create,
            name: String::new(),
            scientific_name: String::new(),
            description: String::new(),
            habitat: String::new(),
            height: String::new(),
            sun: Some(SunRequirement::PartialShade),
            water: Some(WaterRequirement::Medium),
            difficulty: Some(Difficulty::Easy),
            image_url: String::new(),
            is_favorite: false,
            errors: Vec::new(),
        }
    }

    /// Edit mode, initialized from the plant's current values
    pub fn for_edit(plant: &Plant) -> Self {
        let f = &plant.fields;
        FormState {
            mode: FormMode::Edit(plant.id.clone()),
            name: f.name.clone(),
            scientific_name: f.scientific_name.clone(),
            description: f.description.clone().unwrap_or_default(),
            habitat: f.habitat.clone().unwrap_or_default(),
            height: f.height.clone().unwrap_or_default(),
            sun: f.sun_requirement,
            water: f.water_requirement,
            difficulty: f.difficulty,
            image_url: f.image_url.clone().unwrap_or_default(),
            is_favorite: f.is_favorite,
            errors: Vec::new(),
        }
    }

    pub fn from_target(target: Option<&Plant>) -> Self {
        match target {
            Some(plant) => Self::for_edit(plant),
            None => Self::for_create(),
        }
    }

    /// Re-derive the whole form from a new target
    pub fn reset(&mut self, target: Option<&Plant>) {
        *self = Self::from_target(target);
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn is_edit(&self) -> bool {
        matches!(self.mode, FormMode::Edit(_))
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn error_for(&self, field: FormField) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn get(&self, field: FormField) -> FieldValue {
        match field {
            FormField::Name => FieldValue::Text(self.name.clone()),
            FormField::ScientificName => FieldValue::Text(self.scientific_name.clone()),
            FormField::Description => FieldValue::Text(self.description.clone()),
            FormField::Habitat => FieldValue::Text(self.habitat.clone()),
            FormField::Height => FieldValue::Text(self.height.clone()),
            FormField::ImageUrl => FieldValue::Text(self.image_url.clone()),
            FormField::Sun => FieldValue::Sun(self.sun),
            FormField::Water => FieldValue::Water(self.water),
            FormField::Difficulty => FieldValue::Difficulty(self.difficulty),
            FormField::Favorite => FieldValue::Flag(self.is_favorite),
        }
    }

    /// Borrow a text field's buffer. Returns `None` for non-text fields.
    pub fn text(&self, field: FormField) -> Option<&str> {
        match field {
            FormField::Name => Some(&self.name),
            FormField::ScientificName => Some(&self.scientific_name),
            FormField::Description => Some(&self.description),
            FormField::Habitat => Some(&self.habitat),
            FormField::Height => Some(&self.height),
            FormField::ImageUrl => Some(&self.image_url),
            _ => None,
        }
    }

    /// Set a field. Clears that field's validation error.
    pub fn set(&mut self, field: FormField, value: FieldValue) -> Result<(), FormError> {
        match (field, value) {
            (FormField::Name, FieldValue::Text(s)) => self.name = s,
            (FormField::ScientificName, FieldValue::Text(s)) => self.scientific_name = s,
            (FormField::Description, FieldValue::Text(s)) => self.description = s,
            (FormField::Habitat, FieldValue::Text(s)) => self.habitat = s,
            (FormField::Height, FieldValue::Text(s)) => self.height = s,
            (FormField::ImageUrl, FieldValue::Text(s)) => self.image_url = s,
            (FormField::Sun, FieldValue::Sun(v)) => self.sun = v,
            (FormField::Water, FieldValue::Water(v)) => self.water = v,
            (FormField::Difficulty, FieldValue::Difficulty(v)) => self.difficulty = v,
            (FormField::Favorite, FieldValue::Flag(v)) => self.is_favorite = v,
            (field, value) => {
                return Err(FormError::FieldKind {
                    field,
                    given: value.kind(),
                });
            }
        }
        self.errors.retain(|e| e.field != field);
        Ok(())
    }

    /// Step an enum field forward (or back) through its values; toggles the
    /// favorite flag. No-op on text fields.
    pub fn cycle(&mut self, field: FormField, forward: bool) {
        match field {
            FormField::Sun => self.sun = Some(step(&SunRequirement::ALL, self.sun, forward)),
            FormField::Water => {
                self.water = Some(step(&WaterRequirement::ALL, self.water, forward))
            }
            FormField::Difficulty => {
                self.difficulty = Some(step(&Difficulty::ALL, self.difficulty, forward))
            }
            FormField::Favorite => self.is_favorite = !self.is_favorite,
            _ => return,
        }
        self.errors.retain(|e| e.field != field);
    }

    /// Check required fields and package the values (without id).
    ///
    /// Text is trimmed and blank optional text becomes absent. On failure the
    /// field errors are also kept on the form for display.
    pub fn validate(&mut self) -> Result<PlantFields, ValidationErrors> {
        let mut errors = Vec::new();
        if self.name.trim().is_empty() {
            errors.push(FieldError {
                field: FormField::Name,
                message: "Please enter the plant name".to_string(),
            });
        }
        if self.scientific_name.trim().is_empty() {
            errors.push(FieldError {
                field: FormField::ScientificName,
                message: "Please enter the scientific name".to_string(),
            });
        }
        self.errors = errors.clone();
        if !errors.is_empty() {
            return Err(ValidationErrors(errors));
        }

        Ok(PlantFields {
            name: self.name.trim().to_string(),
            scientific_name: self.scientific_name.trim().to_string(),
            description: optional_text(&self.description),
            habitat: optional_text(&self.habitat),
            sun_requirement: self.sun,
            water_requirement: self.water,
            difficulty: self.difficulty,
            height: optional_text(&self.height),
            image_url: optional_text(&self.image_url),
            is_favorite: self.is_favorite,
        })
    }

    /// Create vs update, decided by the mode the form was opened in
    pub fn submit_target(&self) -> SubmitTarget {
        match &self.mode {
            FormMode::Create => SubmitTarget::Create,
            FormMode::Edit(id) => SubmitTarget::Update(id.clone()),
        }
    }
}

fn optional_text(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn step<T: Copy + PartialEq>(all: &[T], current: Option<T>, forward: bool) -> T {
    let len = all.len();
    match current.and_then(|c| all.iter().position(|v| *v == c)) {
        Some(idx) if forward => all[(idx + 1) % len],
        Some(idx) => all[(idx + len - 1) % len],
        None if forward => all[0],
        None => all[len - 1],
    }
}
