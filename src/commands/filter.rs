//! Filter command implementations
//!
//! Thin wrappers that run a `FilterService` operation for the acting user
//! and print the result.

use crate::cli::{OutputFormat, SaveArgs};
use crate::filters::{Filter, FilterService, FilterStorage};
use crate::output;
use crate::session::UserCode;
use crate::MetaFilterError;
use std::fs;
use std::path::Path;

type Result<T> = std::result::Result<T, MetaFilterError>;

/// Save a preset from the command line arguments
///
/// # Errors
///
/// Returns `MetaFilterError` if the candidate is invalid or the store fails.
pub fn save(service: &FilterService<'_>, user: &UserCode, args: &SaveArgs, quiet: bool) -> Result<()> {
    let candidate = args.to_candidate();
    let saved = service.save_filter(user, &candidate)?;

    if !quiet {
        let id = saved.id.map(|id| id.to_string()).unwrap_or_default();
        println!(
            "{}",
            output::success(&format!(
                "Filter '{}' saved on view '{}' (id {id})",
                saved.name, saved.filter_view
            ))
        );
        if saved.shared != candidate.shared {
            println!(
                "  Sharing unchanged: only the owner ({}) can change it",
                saved.owner.as_ref().map_or("unknown", UserCode::as_str)
            );
        }
    }

    Ok(())
}

/// Remove a preset
///
/// # Errors
///
/// Returns `MetaFilterError` if the preset belongs to someone else or the store fails.
pub fn remove(service: &FilterService<'_>, user: &UserCode, name: &str, view: &str, quiet: bool) -> Result<()> {
    let removed = service.remove_matching(user, &Filter::new(name, view))?;

    if !quiet {
        if removed.is_some() {
            println!("{}", output::success(&format!("Filter '{name}' removed")));
        } else {
            println!("No filter '{name}' on view '{view}'");
        }
    }

    Ok(())
}

/// List presets visible on a view
///
/// # Errors
///
/// Returns `MetaFilterError` if the store fails or the output cannot be serialized.
pub fn list(
    service: &FilterService<'_>,
    user: &UserCode,
    view: &str,
    format: OutputFormat,
    quiet: bool,
) -> Result<()> {
    let filters = service.get_filters(user, view)?;

    match format {
        OutputFormat::Text => {
            if filters.is_empty() {
                if !quiet {
                    println!("No filters on view '{view}'.");
                    println!("Create one with: metafilter save <name> --view {view}");
                }
                return Ok(());
            }

            if !quiet {
                println!("Filters on '{view}':");
                println!();
            }
            let width = output::name_width(&filters);
            for filter in &filters {
                println!("{}", output::filter_row(filter, user, width, quiet));
            }
        }
        OutputFormat::Json | OutputFormat::Toml => {
            println!("{}", render(filters, format)?);
        }
    }

    Ok(())
}

/// Show a single preset
///
/// # Errors
///
/// Returns `MetaFilterError::InvalidInput` if no such preset is visible, or
/// another error if the store fails.
pub fn show(service: &FilterService<'_>, user: &UserCode, name: &str, view: &str, quiet: bool) -> Result<()> {
    let filter = service
        .find_filter(user, name, view)?
        .ok_or_else(|| MetaFilterError::InvalidInput(format!("No filter '{name}' on view '{view}'")))?;

    if quiet {
        println!("{}", filter.name);
    } else {
        print!("{filter}");
    }

    Ok(())
}

/// Export the presets visible on a view as TOML
///
/// # Errors
///
/// Returns `MetaFilterError` if the store fails or the file cannot be written.
pub fn export(
    service: &FilterService<'_>,
    user: &UserCode,
    view: &str,
    output_path: Option<&Path>,
    quiet: bool,
) -> Result<()> {
    let filters = service.get_filters(user, view)?;
    let count = filters.len();
    let toml = render(filters, OutputFormat::Toml)?;

    if let Some(path) = output_path {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;

        if !quiet {
            println!(
                "Exported {} filter{} to {}",
                count,
                if count == 1 { "" } else { "s" },
                path.display()
            );
        }
    } else {
        println!("{toml}");
    }

    Ok(())
}

/// Serialize filters in a machine readable format
///
/// # Errors
///
/// Returns `MetaFilterError::SerializationError` if serialization fails.
pub fn render(filters: Vec<Filter>, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&filters)?),
        OutputFormat::Toml => Ok(toml::to_string_pretty(&FilterStorage { filters })?),
        OutputFormat::Text => Ok(filters
            .iter()
            .map(|f| f.name.as_str())
            .collect::<Vec<_>>()
            .join("\n")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Catalog;
    use crate::testing::{TestDb, owned_filter};

    #[test]
    fn test_render_json() {
        let filters = vec![owned_filter("late", "orders", "alice", true)];
        let json = render(filters, OutputFormat::Json).unwrap();

        let parsed: Vec<Filter> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].name, "late");
        assert!(parsed[0].shared);
    }

    #[test]
    fn test_render_toml() {
        let filters = vec![
            owned_filter("late", "orders", "alice", false),
            owned_filter("open", "orders", "bob", true),
        ];
        let toml = render(filters, OutputFormat::Toml).unwrap();

        let parsed: FilterStorage = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.filters.len(), 2);
        assert_eq!(parsed.filters[1].name, "open");
    }

    #[test]
    fn test_render_text() {
        let filters = vec![
            owned_filter("a", "v", "alice", false),
            owned_filter("b", "v", "alice", false),
        ];
        assert_eq!(render(filters, OutputFormat::Text).unwrap(), "a\nb");
    }

    #[test]
    fn test_export_writes_visible_filters() {
        let test_db = TestDb::new();
        let messages = Catalog::default();
        let service = FilterService::new(test_db.db(), &messages);
        let alice = UserCode::new("alice");

        test_db.insert(owned_filter("mine", "orders", "alice", false));
        test_db.insert(owned_filter("hidden", "orders", "bob", false));
        test_db.insert(owned_filter("public", "orders", "bob", true));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("orders.toml");
        export(&service, &alice, "orders", Some(&path), true).unwrap();

        let parsed: FilterStorage = toml::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        let names: Vec<&str> = parsed.filters.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["mine", "public"]);
    }

    #[test]
    fn test_show_missing_filter() {
        let test_db = TestDb::new();
        let messages = Catalog::default();
        let service = FilterService::new(test_db.db(), &messages);

        let err = show(&service, &UserCode::new("alice"), "nope", "orders", true).unwrap_err();
        assert!(matches!(err, MetaFilterError::InvalidInput(_)));
    }

    #[test]
    fn test_remove_refused_propagates() {
        let test_db = TestDb::new();
        let messages = Catalog::default();
        let service = FilterService::new(test_db.db(), &messages);
        test_db.insert(owned_filter("public", "orders", "bob", true));

        let err = remove(&service, &UserCode::new("alice"), "public", "orders", true).unwrap_err();
        assert!(matches!(
            err,
            MetaFilterError::FilterError(crate::filters::FilterError::NotAllowed(_))
        ));
        assert_eq!(test_db.db().count(), 1);
    }

    #[test]
    fn test_remove_own_and_missing() {
        let test_db = TestDb::new();
        let messages = Catalog::default();
        let service = FilterService::new(test_db.db(), &messages);
        let alice = UserCode::new("alice");
        test_db.insert(owned_filter("mine", "orders", "alice", false));

        remove(&service, &alice, "mine", "orders", true).unwrap();
        assert_eq!(test_db.db().count(), 0);

        remove(&service, &alice, "mine", "orders", true).unwrap();
    }
}
