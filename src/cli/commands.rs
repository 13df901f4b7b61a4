use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "frond", about = concat!("frond v", env!("CARGO_PKG_VERSION"), " - a plant catalog for your terminal"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Run against a different catalog directory
    #[arg(short = 'C', long = "catalog-dir", global = true)]
    pub catalog_dir: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new catalog in the current directory
    Init(InitArgs),
    /// List plants, optionally filtered
    List(ListArgs),
    /// Show every field of one plant
    Show(IdArg),
    /// Add a plant
    Add(AddArgs),
    /// Edit a plant (fields not given keep their current value)
    Edit(EditArgs),
    /// Toggle a plant's favorite flag
    Fav(IdArg),
    /// Add the sample plants if the catalog is empty
    Seed,
    /// Show entries from the recovery log
    Recovery(RecoveryArgs),
}

// ---------------------------------------------------------------------------
// Init args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct InitArgs {
    /// Catalog name (default: inferred from directory name)
    #[arg(long)]
    pub name: Option<String>,
    /// Add the sample plants
    #[arg(long)]
    pub seed: bool,
}

// ---------------------------------------------------------------------------
// Read command args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct ListArgs {
    /// Case-insensitive match on name, scientific name, or description
    #[arg(long, short)]
    pub search: Option<String>,
    /// Filter by difficulty (easy, medium, hard, all)
    #[arg(long, short, default_value = "all")]
    pub difficulty: String,
    /// Only favorites
    #[arg(long, short)]
    pub favorites: bool,
}

#[derive(Args)]
pub struct IdArg {
    /// Plant id (any unique prefix)
    pub id: String,
}

// ---------------------------------------------------------------------------
// Write command args
// ---------------------------------------------------------------------------

/// Optional field values shared by `add` and `edit`
#[derive(Args, Default)]
pub struct FieldArgs {
    /// Scientific name
    #[arg(long)]
    pub scientific_name: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub habitat: Option<String>,
    /// full-sun, partial-shade, or shade
    #[arg(long)]
    pub sun: Option<String>,
    /// low, medium, or high
    #[arg(long)]
    pub water: Option<String>,
    /// easy, medium, or hard
    #[arg(long)]
    pub difficulty: Option<String>,
    /// Free text, e.g. "1-3 feet"
    #[arg(long)]
    pub height: Option<String>,
    #[arg(long)]
    pub image_url: Option<String>,
    /// Mark as favorite
    #[arg(long, value_name = "BOOL")]
    pub favorite: Option<bool>,
}

#[derive(Args)]
pub struct AddArgs {
    /// Display name
    #[arg(long)]
    pub name: String,
    #[command(flatten)]
    pub fields: FieldArgs,
}

#[derive(Args)]
pub struct EditArgs {
    /// Plant id (any unique prefix)
    pub id: String,
    /// Display name
    #[arg(long)]
    pub name: Option<String>,
    #[command(flatten)]
    pub fields: FieldArgs,
}

// ---------------------------------------------------------------------------
// Recovery log
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct RecoveryArgs {
    /// Maximum number of entries to show (default: 10)
    #[arg(long)]
    pub limit: Option<usize>,
}
