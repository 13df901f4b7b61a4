mod init;
pub use init::cmd_init;

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::catalog_io;
use crate::io::json_store::JsonFileStore;
use crate::io::recovery::{self, RecoveryEntry};
use crate::io::store::{PlantStore, resolve_id};
use crate::model::catalog_dir::CatalogDir;
use crate::model::plant::{Difficulty, Plant, PlantFields, SunRequirement, WaterRequirement};
use crate::ops::catalog::{FAVORITE_FAILED, LOAD_FAILED, SAVE_FAILED, fetch_all};
use crate::ops::filter::{DifficultyFilter, FilterState, filter_plants};
use crate::ops::form::{FieldValue, FormField, FormState, SubmitTarget};
use crate::ops::seed;

type CmdResult = Result<(), Box<dyn std::error::Error>>;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> CmdResult {
    let json = cli.json;
    let explicit = resolve_catalog_arg(cli.catalog_dir.as_deref())?;

    let Some(cmd) = cli.command else {
        return Ok(());
    };

    // Init is the only command that runs without an existing catalog
    let cmd = match cmd {
        Commands::Init(args) => return cmd_init(args, explicit.as_deref()),
        other => other,
    };

    let catalog = catalog_io::open_catalog(explicit.as_deref())?;
    crate::logging::init_stderr("warn");
    debug!(dir = %catalog.dir.display(), "opened catalog");
    let store = JsonFileStore::new(&catalog.dir);

    match cmd {
        // handled above
        Commands::Init(_) => Ok(()),

        // Read commands
        Commands::List(args) => cmd_list(&store, args, json),
        Commands::Show(args) => cmd_show(&catalog, &store, args, json),
        Commands::Recovery(args) => cmd_recovery(&catalog, args, json),

        // Write commands
        Commands::Add(args) => cmd_add(&catalog, &store, args, json),
        Commands::Edit(args) => cmd_edit(&catalog, &store, args, json),
        Commands::Fav(args) => cmd_fav(&store, args, json),
        Commands::Seed => cmd_seed(&catalog, &store, json),
    }
}

/// Canonicalize the `-C` argument, if any
pub fn resolve_catalog_arg(dir: Option<&str>) -> Result<Option<PathBuf>, String> {
    dir.map(|d| {
        std::fs::canonicalize(d).map_err(|e| format!("cannot resolve -C path '{}': {}", d, e))
    })
    .transpose()
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn load_plants<S: PlantStore + ?Sized>(store: &S) -> Result<Vec<Plant>, String> {
    fetch_all(store).map_err(|e| format!("{}: {}", LOAD_FAILED, e))
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> CmdResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Blank means "clear the field"
fn parse_optional<T>(raw: &str) -> Result<Option<T>, T::Err>
where
    T: std::str::FromStr,
{
    if raw.trim().is_empty() {
        Ok(None)
    } else {
        raw.parse().map(Some)
    }
}

/// Apply command-line field flags on top of a form
fn apply_field_args(form: &mut FormState, name: Option<String>, args: FieldArgs) -> CmdResult {
    let mut edits: Vec<(FormField, FieldValue)> = Vec::new();
    let texts = [
        (FormField::Name, name),
        (FormField::ScientificName, args.scientific_name),
        (FormField::Description, args.description),
        (FormField::Habitat, args.habitat),
        (FormField::Height, args.height),
        (FormField::ImageUrl, args.image_url),
    ];
    for (field, value) in texts {
        if let Some(v) = value {
            edits.push((field, FieldValue::Text(v)));
        }
    }
    if let Some(raw) = args.sun {
        edits.push((FormField::Sun, FieldValue::Sun(parse_optional::<SunRequirement>(&raw)?)));
    }
    if let Some(raw) = args.water {
        edits.push((
            FormField::Water,
            FieldValue::Water(parse_optional::<WaterRequirement>(&raw)?),
        ));
    }
    if let Some(raw) = args.difficulty {
        edits.push((
            FormField::Difficulty,
            FieldValue::Difficulty(parse_optional::<Difficulty>(&raw)?),
        ));
    }
    if let Some(fav) = args.favorite {
        edits.push((FormField::Favorite, FieldValue::Flag(fav)));
    }
    for (field, value) in edits {
        form.set(field, value)?;
    }
    Ok(())
}

/// Hand packaged values to the store; on failure keep them in the recovery log
fn save(
    catalog: &CatalogDir,
    store: &JsonFileStore,
    form: &mut FormState,
) -> Result<Plant, Box<dyn std::error::Error>> {
    let fields: PlantFields = form.validate()?;
    let target = form.submit_target();
    let result = match &target {
        SubmitTarget::Create => store.create(fields.clone()),
        SubmitTarget::Update(id) => store.update(id, fields.clone()),
    };
    result.map_err(|e| {
        let label = match &target {
            SubmitTarget::Create => "create".to_string(),
            SubmitTarget::Update(id) => format!("update {}", id),
        };
        recovery::log_recovery(
            &catalog.dir,
            RecoveryEntry::failed_save(&label, &fields, &e.to_string()),
        );
        format!("{}: {}", SAVE_FAILED, e).into()
    })
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_list(store: &JsonFileStore, args: ListArgs, json: bool) -> CmdResult {
    let filter = FilterState {
        search: args.search.unwrap_or_default(),
        difficulty: args.difficulty.parse::<DifficultyFilter>()?,
        favorites_only: args.favorites,
    };
    let plants = load_plants(store)?;
    let visible = filter_plants(&plants, &filter);

    if json {
        return print_json(&ListJson {
            showing: visible.len(),
            total: plants.len(),
            plants: visible,
        });
    }
    for line in format_plant_listing(&visible, plants.len(), filter.is_active()) {
        println!("{}", line);
    }
    Ok(())
}

fn cmd_show(catalog: &CatalogDir, store: &JsonFileStore, args: IdArg, json: bool) -> CmdResult {
    let plants = load_plants(store)?;
    let plant = resolve_id(&plants, &args.id)?;
    if json {
        return print_json(plant);
    }
    for line in format_plant_detail(plant, &catalog.config.ui.placeholder_image) {
        println!("{}", line);
    }
    Ok(())
}

fn cmd_recovery(catalog: &CatalogDir, args: RecoveryArgs, json: bool) -> CmdResult {
    let entries = recovery::read_recovery_entries(&catalog.dir, Some(args.limit.unwrap_or(10)));
    if json {
        return print_json(&recovery_to_json(&entries));
    }
    if entries.is_empty() {
        println!("No recovery entries");
        return Ok(());
    }
    for entry in &entries {
        print!("{}", entry.to_display_markdown());
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

fn cmd_add(catalog: &CatalogDir, store: &JsonFileStore, args: AddArgs, json: bool) -> CmdResult {
    let mut form = FormState::for_create();
    apply_field_args(&mut form, Some(args.name), args.fields)?;
    let plant = save(catalog, store, &mut form)?;
    if json {
        return print_json(&plant);
    }
    println!("Added {} ({})", plant.name(), plant.id.short());
    Ok(())
}

fn cmd_edit(catalog: &CatalogDir, store: &JsonFileStore, args: EditArgs, json: bool) -> CmdResult {
    let plants = load_plants(store)?;
    let existing = resolve_id(&plants, &args.id)?;
    let mut form = FormState::for_edit(existing);
    apply_field_args(&mut form, args.name, args.fields)?;
    let plant = save(catalog, store, &mut form)?;
    if json {
        return print_json(&plant);
    }
    println!("Updated {} ({})", plant.name(), plant.id.short());
    Ok(())
}

fn cmd_fav(store: &JsonFileStore, args: IdArg, json: bool) -> CmdResult {
    let plants = load_plants(store)?;
    let existing = resolve_id(&plants, &args.id)?;
    let mut fields = existing.fields.clone();
    fields.is_favorite = !fields.is_favorite;
    let plant = store
        .update(&existing.id, fields)
        .map_err(|e| format!("{}: {}", FAVORITE_FAILED, e))?;
    if json {
        return print_json(&plant);
    }
    let verb = if plant.is_favorite() {
        "Favorited"
    } else {
        "Unfavorited"
    };
    println!("{} {} ({})", verb, plant.name(), plant.id.short());
    Ok(())
}

fn cmd_seed(catalog: &CatalogDir, store: &JsonFileStore, json: bool) -> CmdResult {
    let report = seed::seed_if_empty(store, Some(&catalog.dir))?;
    print_seed_report(report.as_ref(), json)
}

fn print_seed_report(report: Option<&seed::SeedReport>, json: bool) -> CmdResult {
    if json {
        return print_json(&seed_to_json(report));
    }
    for line in format_seed_report(report) {
        println!("{}", line);
    }
    Ok(())
}

/// Used by `init --seed`
fn seed_new_catalog(dir: &Path, json: bool) -> CmdResult {
    let store = JsonFileStore::new(dir);
    let report = seed::seed_samples(&store, Some(dir));
    print_seed_report(Some(&report), json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_args_override_form_values() {
        let mut form = FormState::for_create();
        let args = FieldArgs {
            scientific_name: Some("Cyrtomium falcatum".into()),
            sun: Some("full sun".into()),
            difficulty: Some("".into()),
            favorite: Some(true),
            ..Default::default()
        };
        apply_field_args(&mut form, Some("Holly Fern".into()), args).unwrap();
        let fields = form.validate().unwrap();
        assert_eq!(fields.name, "Holly Fern");
        assert_eq!(fields.sun_requirement, Some(SunRequirement::FullSun));
        assert_eq!(fields.difficulty, None);
        // untouched create-mode default
        assert_eq!(fields.water_requirement, Some(WaterRequirement::Medium));
        assert!(fields.is_favorite);
    }

    #[test]
    fn bad_enum_flag_is_an_error() {
        let mut form = FormState::for_create();
        let args = FieldArgs {
            water: Some("soggy".into()),
            ..Default::default()
        };
        let err = apply_field_args(&mut form, None, args).unwrap_err();
        assert!(err.to_string().contains("unknown water requirement \"soggy\""));
    }

    #[test]
    fn resolve_catalog_arg_reports_missing_dir() {
        let err = resolve_catalog_arg(Some("/definitely/not/here")).unwrap_err();
        assert!(err.starts_with("cannot resolve -C path"));
        assert_eq!(resolve_catalog_arg(None), Ok(None));
    }
}
