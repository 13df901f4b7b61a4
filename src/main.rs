use clap::Parser;
use frond::cli::commands::Cli;
use frond::cli::handlers;

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        // No subcommand → launch TUI
        None => handlers::resolve_catalog_arg(cli.catalog_dir.as_deref())
            .map_err(Into::into)
            .and_then(|dir| frond::tui::run(dir.as_deref())),
        Some(_) => handlers::dispatch(cli),
    };

    if let Err(e) = result {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
