use std::collections::VecDeque;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::io::recovery::{self, RecoveryEntry};
use crate::io::store::PlantStore;
use crate::model::plant::{Plant, PlantFields, PlantId};
use crate::ops::filter::{DifficultyFilter, FilterState, project_indices};
use crate::ops::form::{FieldValue, FormField, FormState, SubmitTarget};
use crate::ops::seed::{self, SeedReport};

pub const LOAD_FAILED: &str = "Failed to load plants";
pub const SAVE_FAILED: &str = "Failed to save plant";
pub const FAVORITE_FAILED: &str = "Failed to update favorite status";
pub const CREATED: &str = "Plant added successfully!";
pub const UPDATED: &str = "Plant updated successfully!";

/// Identifies one submission so a late reply can be matched to its form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// The latest user-facing message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Notice {
            kind: NoticeKind::Info,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Notice {
            kind: NoticeKind::Error,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormPhase {
    Editing,
    Submitting(Ticket),
}

/// Lifecycle of the create/edit form
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FormSession {
    #[default]
    Closed,
    Open { form: FormState, phase: FormPhase },
}

/// A create or update handed to the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveRequest {
    pub ticket: Ticket,
    pub target: SubmitTarget,
    pub fields: PlantFields,
}

impl SaveRequest {
    fn target_label(&self) -> String {
        match &self.target {
            SubmitTarget::Create => "create".to_string(),
            SubmitTarget::Update(id) => format!("update {}", id),
        }
    }
}

/// Inputs to [`Catalog::apply`]
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Ask for a full re-fetch (startup, `r`, or an external file change)
    Reload,
    /// Reply to [`Effect::FetchAll`]. `Err` carries the store's message.
    Loaded(Result<Vec<Plant>, String>),
    SetSearch(String),
    SetDifficulty(DifficultyFilter),
    SetFavoritesOnly(bool),
    OpenCreate,
    OpenEdit(PlantId),
    Cancel,
    EditField(FormField, FieldValue),
    CycleField { field: FormField, forward: bool },
    Submit,
    /// Reply to [`Effect::Save`]
    SaveFinished {
        request: SaveRequest,
        result: Result<Plant, String>,
    },
    ToggleFavorite(PlantId),
    /// Reply to [`Effect::ToggleFavorite`]
    FavoriteFinished(Result<Plant, String>),
    /// Reply to [`Effect::Seed`]
    Seeded(SeedReport),
}

/// Persistence work the driver must run; each produces at most one [`Event`]
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    FetchAll,
    Save(SaveRequest),
    ToggleFavorite { id: PlantId, fields: PlantFields },
    Seed,
    /// Append a failed submission to the recovery log
    RecordUnsaved { request: SaveRequest, error: String },
}

/// Everything the browser shows: the collection, the filter inputs, the
/// projection derived from them, the form session, and the latest notice.
///
/// All changes go through [`Catalog::apply`], which recomputes the
/// projection after every mutation and returns the effects to run.
#[derive(Debug, Clone)]
pub struct Catalog {
    plants: Vec<Plant>,
    filter: FilterState,
    visible: Vec<usize>,
    session: FormSession,
    notice: Option<Notice>,
    loading: bool,
    seed_on_empty: bool,
    seed_attempted: bool,
    next_ticket: u64,
}

impl Default for Catalog {
    fn default() -> Self {
        Catalog::new(false)
    }
}

impl Catalog {
    pub fn new(seed_on_empty: bool) -> Self {
        Catalog {
            plants: Vec::new(),
            filter: FilterState::default(),
            visible: Vec::new(),
            session: FormSession::Closed,
            notice: None,
            loading: false,
            seed_on_empty,
            seed_attempted: false,
            next_ticket: 1,
        }
    }

    pub fn with_filter(mut self, filter: FilterState) -> Self {
        self.filter = filter;
        self.recompute();
        self
    }

    // -----------------------------------------------------------------------
    // Read access
    // -----------------------------------------------------------------------

    pub fn plants(&self) -> &[Plant] {
        &self.plants
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    /// The projection, in collection order
    pub fn visible(&self) -> impl Iterator<Item = &Plant> + '_ {
        self.visible.iter().filter_map(|&i| self.plants.get(i))
    }

    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    pub fn visible_at(&self, index: usize) -> Option<&Plant> {
        self.visible.get(index).and_then(|&i| self.plants.get(i))
    }

    /// Position of a plant within the projection
    pub fn visible_position(&self, id: &PlantId) -> Option<usize> {
        self.visible
            .iter()
            .position(|&i| self.plants.get(i).is_some_and(|p| &p.id == id))
    }

    pub fn find(&self, id: &PlantId) -> Option<&Plant> {
        self.plants.iter().find(|p| &p.id == id)
    }

    /// "Showing X of Y plants"
    pub fn summary(&self) -> String {
        format!(
            "Showing {} of {} plants",
            self.visible.len(),
            self.plants.len()
        )
    }

    pub fn session(&self) -> &FormSession {
        &self.session
    }

    pub fn form(&self) -> Option<&FormState> {
        match &self.session {
            FormSession::Open { form, .. } => Some(form),
            FormSession::Closed => None,
        }
    }

    pub fn is_submitting(&self) -> bool {
        matches!(
            self.session,
            FormSession::Open {
                phase: FormPhase::Submitting(_),
                ..
            }
        )
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn clear_notice(&mut self) {
        self.notice = None;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    // -----------------------------------------------------------------------
    // Update
    // -----------------------------------------------------------------------

    /// Apply one event and return the effects it requires.
    pub fn apply(&mut self, event: Event) -> Vec<Effect> {
        let effects = match event {
            Event::Reload => {
                self.loading = true;
                vec![Effect::FetchAll]
            }
            Event::Loaded(result) => self.on_loaded(result),
            Event::SetSearch(search) => {
                self.filter.search = search;
                Vec::new()
            }
            Event::SetDifficulty(difficulty) => {
                self.filter.difficulty = difficulty;
                Vec::new()
            }
            Event::SetFavoritesOnly(on) => {
                self.filter.favorites_only = on;
                Vec::new()
            }
            Event::OpenCreate => {
                self.open_form(None);
                Vec::new()
            }
            Event::OpenEdit(id) => {
                match self.find(&id).cloned() {
                    Some(plant) => self.open_form(Some(&plant)),
                    None => debug!(%id, "edit requested for a plant not in the collection"),
                }
                Vec::new()
            }
            Event::Cancel => {
                self.session = FormSession::Closed;
                Vec::new()
            }
            Event::EditField(field, value) => {
                if let Some(form) = self.editable_form()
                    && let Err(e) = form.set(field, value)
                {
                    warn!(error = %e, "rejected form edit");
                }
                Vec::new()
            }
            Event::CycleField { field, forward } => {
                if let Some(form) = self.editable_form() {
                    form.cycle(field, forward);
                }
                Vec::new()
            }
            Event::Submit => self.on_submit(),
            Event::SaveFinished { request, result } => self.on_save_finished(request, result),
            Event::ToggleFavorite(id) => match self.find(&id) {
                Some(plant) => {
                    let mut fields = plant.fields.clone();
                    fields.is_favorite = !fields.is_favorite;
                    vec![Effect::ToggleFavorite { id, fields }]
                }
                None => Vec::new(),
            },
            Event::FavoriteFinished(result) => match result {
                Ok(_) => vec![Effect::FetchAll],
                Err(e) => {
                    warn!(error = %e, "favorite toggle failed");
                    self.notice = Some(Notice::error(FAVORITE_FAILED));
                    Vec::new()
                }
            },
            Event::Seeded(report) => {
                if report.failed.is_empty() {
                    info!(created = report.created, "seeded sample plants");
                } else {
                    self.notice = Some(Notice::error(report.summary()));
                }
                self.loading = true;
                vec![Effect::FetchAll]
            }
        };
        self.recompute();
        effects
    }

    /// Re-derive the projection from the collection and filter inputs
    pub fn recompute(&mut self) {
        self.visible = project_indices(&self.plants, &self.filter);
    }

    fn on_loaded(&mut self, result: Result<Vec<Plant>, String>) -> Vec<Effect> {
        self.loading = false;
        match result {
            Ok(plants) => {
                self.plants = plants;
                if self.plants.is_empty() && self.seed_on_empty && !self.seed_attempted {
                    self.seed_attempted = true;
                    self.loading = true;
                    return vec![Effect::Seed];
                }
                Vec::new()
            }
            Err(e) => {
                warn!(error = %e, "loading plants failed");
                self.plants.clear();
                self.notice = Some(Notice::error(LOAD_FAILED));
                Vec::new()
            }
        }
    }

    fn open_form(&mut self, target: Option<&Plant>) {
        self.session = FormSession::Open {
            form: FormState::from_target(target),
            phase: FormPhase::Editing,
        };
    }

    /// The open form, unless a submission is in flight
    fn editable_form(&mut self) -> Option<&mut FormState> {
        match &mut self.session {
            FormSession::Open {
                form,
                phase: FormPhase::Editing,
            } => Some(form),
            _ => None,
        }
    }

    fn on_submit(&mut self) -> Vec<Effect> {
        let ticket = Ticket(self.next_ticket);
        let FormSession::Open { form, phase } = &mut self.session else {
            return Vec::new();
        };
        if let FormPhase::Submitting(pending) = phase {
            debug!(ticket = pending.0, "submit ignored while saving");
            return Vec::new();
        }
        let fields = match form.validate() {
            Ok(fields) => fields,
            Err(errors) => {
                debug!(%errors, "form validation failed");
                return Vec::new();
            }
        };
        self.next_ticket += 1;
        *phase = FormPhase::Submitting(ticket);
        vec![Effect::Save(SaveRequest {
            ticket,
            target: form.submit_target(),
            fields,
        })]
    }

    fn on_save_finished(
        &mut self,
        request: SaveRequest,
        result: Result<Plant, String>,
    ) -> Vec<Effect> {
        let current = matches!(
            &self.session,
            FormSession::Open { phase: FormPhase::Submitting(t), .. } if *t == request.ticket
        );
        match result {
            Ok(plant) => {
                let text = match request.target {
                    SubmitTarget::Create => CREATED,
                    SubmitTarget::Update(_) => UPDATED,
                };
                info!(id = %plant.id, ticket = request.ticket.0, "save finished");
                if current {
                    self.session = FormSession::Closed;
                }
                self.notice = Some(Notice::info(text));
                vec![Effect::FetchAll]
            }
            Err(error) => {
                warn!(%error, ticket = request.ticket.0, stale = !current, "save failed");
                if current && let FormSession::Open { phase, .. } = &mut self.session {
                    *phase = FormPhase::Editing;
                }
                self.notice = Some(Notice::error(SAVE_FAILED));
                vec![Effect::RecordUnsaved { request, error }]
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Synchronous driver
// ---------------------------------------------------------------------------

/// Run one effect against the store and return the reply event, if any.
///
/// `recovery_dir` is where failed submissions and seeding failures are
/// logged; `None` disables the recovery log.
pub fn run_effect<S: PlantStore + ?Sized>(
    store: &S,
    effect: Effect,
    recovery_dir: Option<&Path>,
) -> Option<Event> {
    match effect {
        Effect::FetchAll => Some(Event::Loaded(fetch_all(store))),
        Effect::Save(request) => {
            let result = match &request.target {
                SubmitTarget::Create => store.create(request.fields.clone()),
                SubmitTarget::Update(id) => store.update(id, request.fields.clone()),
            };
            Some(Event::SaveFinished {
                request,
                result: result.map_err(|e| e.to_string()),
            })
        }
        Effect::ToggleFavorite { id, fields } => Some(Event::FavoriteFinished(
            store.update(&id, fields).map_err(|e| e.to_string()),
        )),
        Effect::Seed => Some(Event::Seeded(seed::seed_samples(store, recovery_dir))),
        Effect::RecordUnsaved { request, error } => {
            if let Some(dir) = recovery_dir {
                recovery::log_recovery(
                    dir,
                    RecoveryEntry::failed_save(&request.target_label(), &request.fields, &error),
                );
            }
            None
        }
    }
}

/// Fetch the collection. `success: false` counts as a failure.
pub fn fetch_all<S: PlantStore + ?Sized>(store: &S) -> Result<Vec<Plant>, String> {
    match store.list() {
        Ok(response) if response.success => Ok(response.data),
        Ok(_) => Err("store reported an unsuccessful list".to_string()),
        Err(e) => Err(e.to_string()),
    }
}

/// Apply `event` and run every resulting effect to completion, inline.
pub fn dispatch<S: PlantStore + ?Sized>(
    catalog: &mut Catalog,
    store: &S,
    event: Event,
    recovery_dir: Option<&Path>,
) {
    let mut queue = VecDeque::from([event]);
    while let Some(event) = queue.pop_front() {
        for effect in catalog.apply(event) {
            if let Some(reply) = run_effect(store, effect, recovery_dir) {
                queue.push_back(reply);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::memory_store::{FailureSwitches, MemoryStore};
    use crate::model::plant::Difficulty;
    use pretty_assertions::assert_eq;

    fn fields(name: &str, difficulty: Option<Difficulty>, fav: bool) -> PlantFields {
        PlantFields {
            name: name.into(),
            scientific_name: format!("{} sp.", name),
            difficulty,
            is_favorite: fav,
            ..Default::default()
        }
    }

    fn loaded(store: &MemoryStore) -> Catalog {
        let mut catalog = Catalog::new(false);
        dispatch(&mut catalog, store, Event::Reload, None);
        catalog
    }

    fn names(catalog: &Catalog) -> Vec<&str> {
        catalog.visible().map(|p| p.name()).collect()
    }

    fn type_text(catalog: &mut Catalog, field: FormField, text: &str) {
        catalog.apply(Event::EditField(field, FieldValue::Text(text.into())));
    }

    #[test]
    fn reload_fetches_and_projects() {
        let store = MemoryStore::new();
        store.create(fields("Boston Fern", Some(Difficulty::Easy), false)).unwrap();
        store.create(fields("Maidenhair Fern", Some(Difficulty::Hard), true)).unwrap();
        let mut catalog = loaded(&store);
        assert_eq!(names(&catalog), vec!["Boston Fern", "Maidenhair Fern"]);
        assert!(!catalog.is_loading());

        catalog.apply(Event::SetFavoritesOnly(true));
        assert_eq!(names(&catalog), vec!["Maidenhair Fern"]);
        assert_eq!(catalog.summary(), "Showing 1 of 2 plants");
    }

    #[test]
    fn fetch_failure_empties_the_collection() {
        let store = MemoryStore::new();
        store.create(fields("A", None, false)).unwrap();
        let mut catalog = loaded(&store);
        assert_eq!(catalog.visible_len(), 1);

        store.set_failures(FailureSwitches {
            list: true,
            ..Default::default()
        });
        dispatch(&mut catalog, &store, Event::Reload, None);
        assert!(catalog.plants().is_empty());
        assert_eq!(catalog.visible_len(), 0);
        assert_eq!(catalog.notice(), Some(&Notice::error(LOAD_FAILED)));
    }

    #[test]
    fn unsuccessful_list_is_a_fetch_failure() {
        let store = MemoryStore::new();
        store.set_failures(FailureSwitches {
            list_unsuccessful: true,
            ..Default::default()
        });
        let catalog = loaded(&store);
        assert_eq!(catalog.notice().map(|n| n.text.as_str()), Some(LOAD_FAILED));
    }

    #[test]
    fn create_success_closes_form_and_refetches() {
        let store = MemoryStore::new();
        let mut catalog = loaded(&store);
        catalog.apply(Event::OpenCreate);
        type_text(&mut catalog, FormField::Name, "Holly Fern");
        type_text(&mut catalog, FormField::ScientificName, "Cyrtomium falcatum");
        dispatch(&mut catalog, &store, Event::Submit, None);

        assert_eq!(catalog.session(), &FormSession::Closed);
        assert_eq!(names(&catalog), vec!["Holly Fern"]);
        assert_eq!(catalog.notice(), Some(&Notice::info(CREATED)));
        assert_eq!(store.calls().list, 2);
        assert_eq!(store.calls().create, 1);
        // create-mode defaults reach the store
        assert_eq!(catalog.plants()[0].fields.difficulty, Some(Difficulty::Easy));
    }

    #[test]
    fn save_failure_keeps_form_open_with_values() {
        let store = MemoryStore::new();
        let mut catalog = loaded(&store);
        store.set_failures(FailureSwitches {
            create: true,
            ..Default::default()
        });
        catalog.apply(Event::OpenCreate);
        type_text(&mut catalog, FormField::Name, "Holly Fern");
        type_text(&mut catalog, FormField::ScientificName, "Cyrtomium falcatum");
        dispatch(&mut catalog, &store, Event::Submit, None);

        let form = catalog.form().unwrap();
        assert!(!catalog.is_submitting());
        assert_eq!(form.text(FormField::Name), Some("Holly Fern"));
        assert_eq!(catalog.notice(), Some(&Notice::error(SAVE_FAILED)));
        assert!(catalog.plants().is_empty());
    }

    #[test]
    fn save_failure_is_written_to_the_recovery_log() {
        let tmp = tempfile::TempDir::new().unwrap();
        let store = MemoryStore::new();
        store.set_failures(FailureSwitches {
            create: true,
            ..Default::default()
        });
        let mut catalog = Catalog::new(false);
        catalog.apply(Event::OpenCreate);
        type_text(&mut catalog, FormField::Name, "Holly Fern");
        type_text(&mut catalog, FormField::ScientificName, "Cyrtomium falcatum");
        dispatch(&mut catalog, &store, Event::Submit, Some(tmp.path()));

        let entries = recovery::read_recovery_entries(tmp.path(), None);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].description, "\"Holly Fern\" not saved");
    }

    #[test]
    fn validation_failure_never_reaches_the_store() {
        let store = MemoryStore::new();
        let mut catalog = loaded(&store);
        catalog.apply(Event::OpenCreate);
        type_text(&mut catalog, FormField::Name, "   ");
        let effects = catalog.apply(Event::Submit);
        assert!(effects.is_empty());
        assert!(!catalog.is_submitting());
        let form = catalog.form().unwrap();
        assert_eq!(
            form.error_for(FormField::Name),
            Some("Please enter the plant name")
        );
        assert_eq!(store.calls().create, 0);
    }

    #[test]
    fn double_submit_issues_one_save() {
        let mut catalog = Catalog::new(false);
        catalog.apply(Event::OpenCreate);
        type_text(&mut catalog, FormField::Name, "A");
        type_text(&mut catalog, FormField::ScientificName, "B");
        let first = catalog.apply(Event::Submit);
        let second = catalog.apply(Event::Submit);
        assert_eq!(first.len(), 1);
        assert!(second.is_empty());
        assert!(catalog.is_submitting());
    }

    #[test]
    fn edits_are_locked_while_submitting() {
        let mut catalog = Catalog::new(false);
        catalog.apply(Event::OpenCreate);
        type_text(&mut catalog, FormField::Name, "A");
        type_text(&mut catalog, FormField::ScientificName, "B");
        catalog.apply(Event::Submit);
        type_text(&mut catalog, FormField::Name, "changed");
        assert_eq!(catalog.form().unwrap().text(FormField::Name), Some("A"));
    }

    #[test]
    fn stale_reply_never_touches_a_newer_form() {
        let mut catalog = Catalog::new(false);
        catalog.apply(Event::OpenCreate);
        type_text(&mut catalog, FormField::Name, "First");
        type_text(&mut catalog, FormField::ScientificName, "F");
        let Some(Effect::Save(first)) = catalog.apply(Event::Submit).pop() else {
            panic!("expected a save effect");
        };

        catalog.apply(Event::Cancel);
        catalog.apply(Event::OpenCreate);
        type_text(&mut catalog, FormField::Name, "Second");

        let effects = catalog.apply(Event::SaveFinished {
            request: first.clone(),
            result: Err("boom".into()),
        });
        let form = catalog.form().unwrap();
        assert_eq!(form.text(FormField::Name), Some("Second"));
        assert!(!catalog.is_submitting());
        assert_eq!(
            effects,
            vec![Effect::RecordUnsaved {
                request: first.clone(),
                error: "boom".into()
            }]
        );

        let plant = Plant::new(PlantId::new("x"), first.fields.clone());
        let effects = catalog.apply(Event::SaveFinished {
            request: first,
            result: Ok(plant),
        });
        assert_eq!(effects, vec![Effect::FetchAll]);
        assert_eq!(catalog.form().unwrap().text(FormField::Name), Some("Second"));
    }

    #[test]
    fn edit_cancel_then_create_shows_defaults() {
        let store = MemoryStore::new();
        let x = store.create(fields("X", Some(Difficulty::Hard), false)).unwrap();
        let mut catalog = loaded(&store);

        catalog.apply(Event::OpenEdit(x.id.clone()));
        assert_eq!(
            catalog.form().unwrap().get(FormField::Difficulty),
            FieldValue::Difficulty(Some(Difficulty::Hard))
        );
        catalog.apply(Event::Cancel);
        assert!(catalog.form().is_none());
        catalog.apply(Event::OpenCreate);
        let form = catalog.form().unwrap();
        assert_eq!(
            form.get(FormField::Difficulty),
            FieldValue::Difficulty(Some(Difficulty::Easy))
        );
        assert_eq!(form.text(FormField::Name), Some(""));
    }

    #[test]
    fn edit_submits_full_replace_with_same_id() {
        let store = MemoryStore::new();
        let mut original = fields("X", Some(Difficulty::Hard), false);
        original.habitat = Some("Bog".into());
        let x = store.create(original).unwrap();
        let mut catalog = loaded(&store);

        catalog.apply(Event::OpenEdit(x.id.clone()));
        type_text(&mut catalog, FormField::Habitat, "  ");
        dispatch(&mut catalog, &store, Event::Submit, None);

        assert_eq!(catalog.notice(), Some(&Notice::info(UPDATED)));
        let stored = &store.snapshot()[0];
        assert_eq!(stored.id, x.id);
        assert_eq!(stored.fields.habitat, None);
        assert_eq!(store.calls().update, 1);
    }

    #[test]
    fn toggle_favorite_updates_and_refetches() {
        let store = MemoryStore::new();
        let a = store.create(fields("A", None, false)).unwrap();
        let mut catalog = loaded(&store);
        catalog.apply(Event::SetFavoritesOnly(true));
        assert_eq!(catalog.visible_len(), 0);

        dispatch(&mut catalog, &store, Event::ToggleFavorite(a.id.clone()), None);
        assert_eq!(names(&catalog), vec!["A"]);
        assert!(store.snapshot()[0].is_favorite());
    }

    #[test]
    fn toggle_favorite_failure_sets_notice() {
        let store = MemoryStore::new();
        let a = store.create(fields("A", None, false)).unwrap();
        let mut catalog = loaded(&store);
        store.set_failures(FailureSwitches {
            update: true,
            ..Default::default()
        });
        dispatch(&mut catalog, &store, Event::ToggleFavorite(a.id), None);
        assert_eq!(catalog.notice(), Some(&Notice::error(FAVORITE_FAILED)));
        assert!(!catalog.plants()[0].is_favorite());
    }

    #[test]
    fn empty_catalog_seeds_once() {
        let store = MemoryStore::new();
        let mut catalog = Catalog::new(true);
        dispatch(&mut catalog, &store, Event::Reload, None);
        assert_eq!(catalog.plants().len(), 3);
        assert_eq!(store.calls().create, 3);

        // A later empty load does not seed again
        let empty = MemoryStore::new();
        dispatch(&mut catalog, &empty, Event::Reload, None);
        assert!(catalog.plants().is_empty());
        assert_eq!(empty.calls().create, 0);
    }

    #[test]
    fn failing_store_does_not_loop_seeding() {
        let store = MemoryStore::new();
        store.set_failures(FailureSwitches {
            create: true,
            ..Default::default()
        });
        let mut catalog = Catalog::new(true);
        dispatch(&mut catalog, &store, Event::Reload, None);
        assert_eq!(store.calls().create, 3);
        assert_eq!(store.calls().list, 2);
        assert_eq!(catalog.notice().map(|n| n.kind), Some(NoticeKind::Error));
    }

    #[test]
    fn projection_recomputed_after_reload() {
        let store = MemoryStore::new();
        store.create(fields("Boston Fern", None, false)).unwrap();
        let mut catalog = loaded(&store);
        catalog.apply(Event::SetSearch("holly".into()));
        assert_eq!(catalog.visible_len(), 0);

        store.create(fields("Holly Fern", None, false)).unwrap();
        dispatch(&mut catalog, &store, Event::Reload, None);
        assert_eq!(names(&catalog), vec!["Holly Fern"]);
        assert_eq!(catalog.visible_position(&catalog.plants()[1].id), Some(0));
    }
}
