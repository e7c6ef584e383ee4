//! Ordered collection of fields.

use crate::error::{Error, Result, TextFileError};
use crate::field::Field;
use crate::reader::{self, LoadPolicy};
use crate::version::Version;
use crate::writer;
use indexmap::IndexMap;
use std::path::Path;

/// All fields of one configuration, in declaration order.
///
/// Declaration order is also the order fields are written in, so a saved
/// file always reads the same way regardless of how it was loaded.
#[derive(Debug, Clone)]
pub struct Fields {
    version: Version,
    fields: IndexMap<String, Field>,
}

impl Fields {
    /// Create an empty set; `version` is written into file headers.
    pub fn new(version: Version) -> Self {
        Self {
            version,
            fields: IndexMap::new(),
        }
    }

    /// Declare a field. Names must be unique.
    pub fn add(&mut self, field: Field) -> Result<()> {
        if self.fields.contains_key(field.name()) {
            return Err(Error::DuplicateField(field.name().to_string()));
        }
        self.fields.insert(field.name().to_string(), field);
        Ok(())
    }

    /// Look up a field by name.
    pub fn get(&self, name: &str) -> Result<&Field> {
        self.fields
            .get(name)
            .ok_or_else(|| Error::UnknownField(name.to_string()))
    }

    /// Whether a field with this name is declared.
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Iterate over fields in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Field> {
        self.fields.values()
    }

    /// Number of declared fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether no fields are declared.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Product descriptor used in file headers.
    pub fn version(&self) -> &Version {
        &self.version
    }

    /// Parse `raw` into the named field and mark it edited.
    pub fn assign(&mut self, name: &str, raw: &str) -> Result<()> {
        let field = self
            .fields
            .get_mut(name)
            .ok_or_else(|| Error::UnknownField(name.to_string()))?;
        field.parse(raw)?;
        field.set_edited(true);
        Ok(())
    }

    /// Whether any field changed since the last load or save.
    pub fn is_edited(&self) -> bool {
        self.fields.values().any(Field::is_edited)
    }

    /// Names of the fields changed since the last load or save.
    pub fn edited_names(&self) -> Vec<&str> {
        self.fields
            .values()
            .filter(|f| f.is_edited())
            .map(Field::name)
            .collect()
    }

    /// Load a kiosk file with strict rules.
    pub fn load(&mut self, path: &Path) -> Vec<TextFileError> {
        reader::parse_file(self, path, LoadPolicy::strict())
    }

    /// Load a kiosk file with the given rules.
    pub fn load_with(&mut self, path: &Path, policy: LoadPolicy) -> Vec<TextFileError> {
        reader::parse_file(self, path, policy)
    }

    /// Load a kiosk file, handing every problem to `report` and failing if
    /// there was at least one.
    pub fn load_safe<F>(&mut self, path: &Path, policy: LoadPolicy, mut report: F) -> Result<()>
    where
        F: FnMut(&TextFileError),
    {
        let errors = self.load_with(path, policy);
        if errors.is_empty() {
            return Ok(());
        }

        for error in &errors {
            report(error);
        }
        Err(Error::LoadFailed {
            path: path.to_path_buf(),
            count: errors.len(),
        })
    }

    /// Text that [`save`](Self::save) writes.
    pub fn render(&self) -> String {
        writer::write_string(self)
    }

    /// Write all fields to `path` and clear the edited flags.
    pub fn save(&mut self, path: &Path) -> Result<()> {
        writer::write_file(self, path)?;
        self.mark_clean();
        Ok(())
    }

    /// Replace the values of the named fields with the redaction sentinel.
    ///
    /// Either every name is redacted or, on error, none is.
    pub fn redact(&mut self, names: &[&str]) -> Result<()> {
        for name in names {
            if !self.get(name)?.is_redactable() {
                return Err(Error::NotRedactable((*name).to_string()));
            }
        }
        for name in names {
            if let Some(field) = self.fields.get_mut(*name) {
                field.redact()?;
            }
        }
        Ok(())
    }

    pub(crate) fn field_mut(&mut self, name: &str) -> Option<&mut Field> {
        self.fields.get_mut(name)
    }

    pub(crate) fn reset_assigned(&mut self) {
        for field in self.fields.values_mut() {
            field.reset_assigned();
        }
    }

    pub(crate) fn mark_clean(&mut self) {
        for field in self.fields.values_mut() {
            field.set_edited(false);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{FieldKind, FieldValue, REDACTED};

    fn sample() -> Fields {
        let mut fields = Fields::new(Version::new("KioskForge", "kioskforge", "0.26"));
        let declared = [
            Field::new("comment", "", FieldKind::OptionalString, "Free text."),
            Field::new("device", "pi4b", FieldKind::choice(["pi4b", "pi5"]), "Device."),
            Field::new("mouse", "false", FieldKind::Boolean, "Mouse."),
            Field::new("user_code", "hunter22", FieldKind::Password, "Password."),
            Field::new("swap_size", "4", FieldKind::natural(0, 128), "Swap in GB."),
            Field::new("idle_timeout", "0", FieldKind::natural(0, 86400), "Idle."),
            Field::new("upgrade_time", "05:00", FieldKind::OptionalTime, "When."),
        ];
        for field in declared {
            fields.add(field.unwrap()).unwrap();
        }
        fields
    }

    #[test]
    fn test_add_rejects_duplicates() {
        let mut fields = sample();
        let dup = Field::new("mouse", "true", FieldKind::Boolean, "").unwrap();
        assert!(matches!(fields.add(dup), Err(Error::DuplicateField(_))));
        assert_eq!(fields.len(), 7);
    }

    #[test]
    fn test_get_unknown_field() {
        let fields = sample();
        assert!(matches!(fields.get("nope"), Err(Error::UnknownField(_))));
    }

    #[test]
    fn test_assign_marks_edited() {
        let mut fields = sample();
        assert!(!fields.is_edited());
        fields.assign("mouse", "yes").unwrap();
        assert_eq!(fields.edited_names(), vec!["mouse"]);

        assert!(matches!(
            fields.assign("swap_size", "999"),
            Err(Error::Field(_))
        ));
        assert_eq!(fields.edited_names(), vec!["mouse"]);
        assert!(matches!(
            fields.assign("bogus", "1"),
            Err(Error::UnknownField(_))
        ));
    }

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("round.kiosk");

        let mut original = sample();
        original.assign("comment", "Lobby = main hall").unwrap();
        original.assign("device", "pi5").unwrap();
        original.assign("mouse", "t").unwrap();
        original.assign("swap_size", "16").unwrap();
        original.assign("upgrade_time", "").unwrap();
        original.save(&path).unwrap();

        let mut loaded = sample();
        let errors = loaded.load(&path);
        assert!(errors.is_empty(), "{errors:?}");

        let pairs = |f: &Fields| -> Vec<(String, FieldValue)> {
            f.iter()
                .map(|field| (field.name().to_string(), field.value().clone()))
                .collect()
        };
        assert_eq!(pairs(&original), pairs(&loaded));
    }

    #[test]
    fn test_unstorable_values_never_reach_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("edges.kiosk");

        let mut original = sample();
        original.assign("comment", "kept").unwrap();
        for (name, raw) in [
            ("comment", "  padded  "),
            ("comment", "line1\nline2"),
            ("user_code", "secret\r"),
            ("upgrade_time", " 1:00"),
            ("upgrade_time", "01: 5"),
        ] {
            assert!(original.assign(name, raw).is_err(), "{name}={raw:?}");
        }
        original.save(&path).unwrap();

        let mut loaded = sample();
        let errors = loaded.load(&path);
        assert!(errors.is_empty(), "{errors:?}");
        assert_eq!(loaded.get("comment").unwrap().as_text(), Some("kept"));
        assert_eq!(loaded.get("user_code").unwrap().as_text(), Some("hunter22"));
        assert_eq!(loaded.get("upgrade_time").unwrap().as_text(), Some("05:00"));
    }

    #[test]
    fn test_save_is_clean_and_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("first.kiosk");
        let second = dir.path().join("second.kiosk");

        let mut fields = sample();
        fields.assign("idle_timeout", "30").unwrap();
        assert!(fields.is_edited());

        fields.save(&first).unwrap();
        assert!(fields.iter().all(|f| !f.is_edited()));
        fields.save(&second).unwrap();

        assert_eq!(
            std::fs::read(&first).unwrap(),
            std::fs::read(&second).unwrap()
        );
    }

    #[test]
    fn test_load_then_mutate_scenario() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scenario.kiosk");
        std::fs::write(
            &path,
            "comment=\ndevice=pi4b\nmouse=false\nuser_code=secret99\n\
             swap_size=4\nidle_timeout=30\nupgrade_time=05:00\n",
        )
        .unwrap();

        let mut fields = sample();
        assert!(fields.load(&path).is_empty());
        assert_eq!(fields.get("swap_size").unwrap().as_natural(), Some(4));
        assert_eq!(fields.get("idle_timeout").unwrap().as_natural(), Some(30));
        assert!(!fields.is_edited());

        assert!(fields.assign("idle_timeout", "-5").is_err());
        assert_eq!(fields.get("idle_timeout").unwrap().as_natural(), Some(30));
    }

    #[test]
    fn test_load_safe_reports_and_aggregates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.kiosk");
        std::fs::write(&path, "mouse=perhaps\n").unwrap();

        let mut fields = sample();
        let mut reported = Vec::new();
        let result = fields.load_safe(&path, LoadPolicy::strict(), |e| {
            reported.push(e.to_string());
        });

        // One bad value plus six fields never assigned
        assert_eq!(reported.len(), 7);
        match result {
            Err(Error::LoadFailed { count, .. }) => assert_eq!(count, 7),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_redaction_does_not_leak() {
        let mut fields = sample();
        fields.assign("user_code", "TopSecret!42").unwrap();
        fields.redact(&["user_code"]).unwrap();

        let text = fields.render();
        assert!(!text.contains("TopSecret!42"));
        assert!(text.contains(&format!("user_code={REDACTED}\n")));
    }

    #[test]
    fn test_redact_is_all_or_nothing() {
        let mut fields = sample();
        fields.assign("comment", "hello").unwrap();
        fields.save(&tempfile::tempdir().unwrap().path().join("x.kiosk")).unwrap();

        assert!(fields.redact(&["comment", "mouse"]).is_err());
        assert_eq!(fields.get("comment").unwrap().as_text(), Some("hello"));
        assert!(fields.redact(&["comment", "nope"]).is_err());
        assert!(!fields.is_edited());
    }
}
