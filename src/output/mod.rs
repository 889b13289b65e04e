//! Output formatting for CLI display

use crate::filters::Filter;
use crate::session::UserCode;
use colored::Colorize;

/// Format one row of a filter listing
///
/// Presets owned by someone else are marked with their owner, and shared
/// presets are flagged.
#[must_use]
pub fn filter_row(filter: &Filter, user: &UserCode, name_width: usize, quiet: bool) -> String {
    if quiet {
        return filter.name.clone();
    }

    let id = filter
        .id
        .map_or_else(|| "-".to_string(), |id| id.to_string());
    let mut row = format!(
        "  {:>4}  {:<width$}  {}",
        id.dimmed(),
        filter.name.bold(),
        filter.title,
        width = name_width
    );

    if filter.shared {
        row.push_str(&format!(" {}", "[shared]".cyan()));
    }
    if let Some(owner) = filter.owner.as_ref().filter(|owner| *owner != user) {
        row.push_str(&format!(" {}", format!("(by {owner})").yellow()));
    }

    row
}

/// Width of the name column for `filters`
#[must_use]
pub fn name_width(filters: &[Filter]) -> usize {
    filters
        .iter()
        .map(|f| f.name.chars().count())
        .max()
        .unwrap_or(0)
        .max(4)
}

/// Format a success message
#[must_use]
pub fn success(message: &str) -> String {
    format!("{} {}", "✓".green(), message)
}

/// Format an error message
#[must_use]
pub fn error(message: &str) -> String {
    format!("{} {}", "✗".red(), message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::FilterId;

    fn stored(name: &str, owner: &str, shared: bool) -> Filter {
        let mut filter = Filter::new(name, "orders")
            .with_title(format!("{name} title"))
            .with_shared(shared);
        filter.id = Some(FilterId(3));
        filter.owner = Some(UserCode::new(owner));
        filter
    }

    #[test]
    fn test_quiet_row_is_name_only() {
        let row = filter_row(&stored("late", "alice", true), &UserCode::new("alice"), 4, true);
        assert_eq!(row, "late");
    }

    #[test]
    fn test_row_marks_shared_and_foreign_owner() {
        colored::control::set_override(false);

        let alice = UserCode::new("alice");
        let own = filter_row(&stored("late", "alice", false), &alice, 4, false);
        assert!(own.contains("late title"));
        assert!(!own.contains("[shared]"));
        assert!(!own.contains("(by"));

        let foreign = filter_row(&stored("open", "bob", true), &alice, 4, false);
        assert!(foreign.contains("[shared]"));
        assert!(foreign.contains("(by bob)"));
        assert!(foreign.contains('3'));
    }

    #[test]
    fn test_name_width() {
        let filters = vec![stored("ab", "a", false), stored("abcdefg", "a", false)];
        assert_eq!(name_width(&filters), 7);
        assert_eq!(name_width(&[]), 4);
    }
}
