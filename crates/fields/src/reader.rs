//! Reader for the flat kiosk file format.
//!
//! ```text
//! # comment
//! ; also a comment
//! device=pi5
//! swap_size=4
//! ```
//!
//! Problems are collected per line rather than aborting at the first one, so
//! a user fixing a hand-edited file sees every mistake at once.

use crate::error::TextFileError;
use crate::set::Fields;
use std::collections::HashSet;
use std::path::Path;

/// Relaxations of the default, strict load rules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadPolicy {
    /// Accept a field being assigned more than once (the last one wins)
    pub allow_redefinitions: bool,
    /// Accept files that leave some fields unassigned (defaults are kept)
    pub allow_partial: bool,
}

impl LoadPolicy {
    /// Strict rules: every field exactly once.
    pub fn strict() -> Self {
        Self::default()
    }
}

/// Load a kiosk file into `fields`.
pub fn parse_file(fields: &mut Fields, path: &Path, policy: LoadPolicy) -> Vec<TextFileError> {
    match std::fs::read_to_string(path) {
        Ok(content) => parse_string(fields, path, &content, policy),
        Err(e) => vec![TextFileError::new(
            path,
            0,
            format!("Unable to read file: {e}"),
        )],
    }
}

/// Load kiosk file content into `fields`; `path` is only used in errors.
pub fn parse_string(
    fields: &mut Fields,
    path: &Path,
    content: &str,
    policy: LoadPolicy,
) -> Vec<TextFileError> {
    let mut errors = Vec::new();
    // Named on some line, valid or not; only these escape the closure check
    let mut mentioned: HashSet<String> = HashSet::new();
    // Successfully parsed; a later line for one of these is a redefinition
    let mut assigned: HashSet<String> = HashSet::new();

    fields.reset_assigned();

    for (line_num, line) in content.lines().enumerate() {
        let line_num = line_num + 1;
        let line = line.trim_end();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }

        if line.starts_with('[') && line.ends_with(']') {
            errors.push(TextFileError::new(
                path,
                line_num,
                "Sections not supported in kiosk files",
            ));
            continue;
        }

        let Some((name, value)) = line.split_once('=') else {
            errors.push(TextFileError::new(
                path,
                line_num,
                "Missing delimiter (=) in line",
            ));
            continue;
        };
        let name = name.trim();
        let value = value.trim();

        let Some(field) = fields.field_mut(name) else {
            errors.push(TextFileError::new(
                path,
                line_num,
                format!("Unknown field ignored: {name}"),
            ));
            continue;
        };

        mentioned.insert(name.to_string());
        if assigned.contains(name) && !policy.allow_redefinitions {
            errors.push(TextFileError::new(
                path,
                line_num,
                format!("Illegal redefinition of field '{name}'"),
            ));
            continue;
        }

        match field.parse(value) {
            Ok(()) => {
                assigned.insert(name.to_string());
            }
            Err(e) => errors.push(TextFileError::new(path, line_num, e.message)),
        }
    }

    if !policy.allow_partial {
        for field in fields.iter() {
            if !mentioned.contains(field.name()) {
                errors.push(TextFileError::new(
                    path,
                    0,
                    format!("Field '{}' was never assigned", field.name()),
                ));
            }
        }
    }

    if errors.is_empty() {
        fields.mark_clean();
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{Field, FieldKind};
    use crate::version::Version;

    fn sample() -> Fields {
        let mut fields = Fields::new(Version::new("Test", "test", "1.0"));
        fields
            .add(Field::new("swap_size", "4", FieldKind::natural(0, 128), "Swap.").unwrap())
            .unwrap();
        fields
            .add(Field::new("mouse", "false", FieldKind::Boolean, "Mouse.").unwrap())
            .unwrap();
        fields
    }

    fn load(fields: &mut Fields, content: &str, policy: LoadPolicy) -> Vec<TextFileError> {
        parse_string(fields, Path::new("test.kiosk"), content, policy)
    }

    #[test]
    fn test_parse_clean_file() {
        let mut fields = sample();
        let content = "# header\n; other comment\n\nswap_size = 8\nmouse=yes   \n";
        let errors = load(&mut fields, content, LoadPolicy::strict());
        assert!(errors.is_empty(), "{errors:?}");
        assert_eq!(fields.get("swap_size").unwrap().as_natural(), Some(8));
        assert_eq!(fields.get("mouse").unwrap().as_bool(), Some(true));
    }

    #[test]
    fn test_value_split_on_first_delimiter() {
        let mut fields = Fields::new(Version::new("Test", "test", "1.0"));
        fields
            .add(Field::new("command", "x", FieldKind::String, "").unwrap())
            .unwrap();
        let errors = load(
            &mut fields,
            "command=https://example.com/?a=b",
            LoadPolicy::strict(),
        );
        assert!(errors.is_empty());
        assert_eq!(
            fields.get("command").unwrap().as_text(),
            Some("https://example.com/?a=b")
        );
    }

    #[test]
    fn test_structural_errors_are_collected() {
        let mut fields = sample();
        let content = "[kiosk]\nswap_size\nswap_size=8\nmouse=false\ncolour=blue\n";
        let errors = load(&mut fields, content, LoadPolicy::strict());

        let lines: Vec<(usize, &str)> = errors
            .iter()
            .map(|e| (e.line, e.message.as_str()))
            .collect();
        assert_eq!(
            lines,
            vec![
                (1, "Sections not supported in kiosk files"),
                (2, "Missing delimiter (=) in line"),
                (5, "Unknown field ignored: colour"),
            ]
        );
    }

    #[test]
    fn test_closure_reports_each_missing_field() {
        let mut fields = sample();
        let errors = load(&mut fields, "# nothing here\n", LoadPolicy::strict());
        let messages: Vec<_> = errors.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "Field 'swap_size' was never assigned",
                "Field 'mouse' was never assigned",
            ]
        );
        assert!(errors.iter().all(|e| e.line == 0));
    }

    #[test]
    fn test_partial_load_keeps_defaults() {
        let mut fields = sample();
        let policy = LoadPolicy {
            allow_redefinitions: false,
            allow_partial: true,
        };
        let errors = load(&mut fields, "mouse=true\n", policy);
        assert!(errors.is_empty());
        assert_eq!(fields.get("swap_size").unwrap().as_natural(), Some(4));
    }

    #[test]
    fn test_redefinition_rejected() {
        let mut fields = sample();
        let content = "swap_size=8\nmouse=false\nswap_size=16\n";
        let errors = load(&mut fields, content, LoadPolicy::strict());
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].line, 3);
        assert_eq!(errors[0].message, "Illegal redefinition of field 'swap_size'");
        assert_eq!(fields.get("swap_size").unwrap().as_natural(), Some(8));
    }

    #[test]
    fn test_redefinition_allowed() {
        let mut fields = sample();
        let policy = LoadPolicy {
            allow_redefinitions: true,
            allow_partial: false,
        };
        let errors = load(&mut fields, "swap_size=8\nmouse=false\nswap_size=16\n", policy);
        assert!(errors.is_empty());
        assert_eq!(fields.get("swap_size").unwrap().as_natural(), Some(16));
    }

    #[test]
    fn test_invalid_value_reported_with_line() {
        let mut fields = sample();
        let errors = load(&mut fields, "swap_size=-5\nmouse=false\n", LoadPolicy::strict());
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].line, 1);
        assert!(errors[0].message.contains("swap_size"));
        assert_eq!(fields.get("swap_size").unwrap().as_natural(), Some(4));
    }

    #[test]
    fn test_corrected_value_after_invalid_one_is_accepted() {
        let mut fields = sample();
        let content = "swap_size=-5\nmouse=false\nswap_size=16\n";
        let errors = load(&mut fields, content, LoadPolicy::strict());
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].line, 1);
        assert_eq!(fields.get("swap_size").unwrap().as_natural(), Some(16));
    }

    #[test]
    fn test_failed_load_keeps_edited_flags() {
        let mut fields = sample();
        fields.assign("mouse", "true").unwrap();
        let errors = load(&mut fields, "swap_size=8\n", LoadPolicy::strict());
        assert_eq!(errors.len(), 1);
        assert!(fields.get("mouse").unwrap().is_edited());

        let errors = load(&mut fields, "swap_size=8\nmouse=true\n", LoadPolicy::strict());
        assert!(errors.is_empty());
        assert!(!fields.get("mouse").unwrap().is_edited());
    }

    #[test]
    fn test_unreadable_file() {
        let mut fields = sample();
        let errors = parse_file(
            &mut fields,
            Path::new("/nonexistent/dir/x.kiosk"),
            LoadPolicy::strict(),
        );
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].line, 0);
        assert!(errors[0].message.starts_with("Unable to read file"));
    }
}
