//! Metafilter CLI application entry point
//!
//! Manages saved filter presets for UI views from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Save (or update) a preset on a view
//! metafilter --user alice save late --view sale.order.grid --title "Late orders" --shared
//!
//! # List presets visible to the user on a view
//! metafilter --user bob list --view sale.order.grid
//!
//! # Remove a preset (only its owner may)
//! metafilter --user alice remove late --view sale.order.grid
//!
//! # Export the visible presets of a view
//! metafilter --user alice export --view sale.order.grid -o presets.toml
//! ```
//!
//! # Configuration
//!
//! Settings live in `~/.config/metafilter/config.toml` (Linux) and can be
//! changed with `metafilter config set KEY=VALUE`. Logging is controlled by
//! `RUST_LOG`.

use metafilter::{
    MetaFilterError,
    cli::{Cli, Commands},
    commands,
    config::MetaFilterConfig,
    db::Database,
    filters::FilterService,
    i18n::Catalog,
    output, session,
};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

type Result<T> = std::result::Result<T, MetaFilterError>;

fn init_logging(quiet: bool) {
    let default_level = if quiet { "error" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli, mut config: MetaFilterConfig) -> Result<()> {
    let quiet = cli.quiet || config.quiet;

    if let Commands::Config { command } = &cli.command {
        return commands::config(command, &mut config, quiet);
    }

    let user = session::resolve_user(cli.user.as_deref(), &config)?;

    let db_path = match &cli.db {
        Some(path) => path.clone(),
        None => config.database_path()?,
    };
    let db = Database::open(&db_path)?;
    let messages = Catalog::load(&config.locale)?;
    let service = FilterService::new(&db, &messages);

    match &cli.command {
        Commands::Save(args) => commands::filter::save(&service, &user, args, quiet)?,
        Commands::Remove { name, view } => {
            commands::filter::remove(&service, &user, name, &view.view, quiet)?;
        }
        Commands::List { view, format } => {
            commands::filter::list(&service, &user, &view.view, *format, quiet)?;
        }
        Commands::Show { name, view } => {
            commands::filter::show(&service, &user, name, &view.view, quiet)?;
        }
        Commands::Export { view, output } => {
            commands::filter::export(&service, &user, &view.view, output.as_deref(), quiet)?;
        }
        // handled before the database is opened
        Commands::Config { .. } => {}
    }

    db.flush()?;
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse_args();

    let config = match MetaFilterConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", output::error(&MetaFilterError::from(e).to_string()));
            return ExitCode::FAILURE;
        }
    };

    init_logging(cli.quiet || config.quiet);

    match run(cli, config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", output::error(&e.to_string()));
            ExitCode::FAILURE
        }
    }
}
