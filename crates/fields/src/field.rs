//! Typed configuration cells.
//!
//! A [`Field`] couples a name and a help text with a [`FieldKind`] that
//! decides which raw strings are acceptable. Parsing never leaves a field in
//! an invalid state: a rejected value leaves the previous value untouched.

use crate::error::{Error, FieldError, Result};
use chrono::NaiveTime;
use regex::Regex;
use std::fmt;

/// Longest password accepted, in bytes (bcrypt input limit).
pub const PASSWORD_MAX_LEN: usize = 72;

/// Value written in place of a redacted field.
pub const REDACTED: &str = "REDACTED";

/// Raw tokens accepted as `true` by boolean fields (compared lowercase).
const TRUE_TOKENS: &[&str] = &["1", "t", "true", "y", "yes"];

/// Raw tokens accepted as `false` by boolean fields (compared lowercase).
const FALSE_TOKENS: &[&str] = &["0", "f", "false", "n", "no"];

/// The validation rule of a field.
#[derive(Debug, Clone)]
pub enum FieldKind {
    /// `true`/`false` and their common spellings
    Boolean,
    /// Unsigned integer within an inclusive range
    Natural {
        /// Smallest accepted value
        lower: u64,
        /// Largest accepted value
        upper: u64,
    },
    /// Non-empty text
    String,
    /// Any text, including empty
    OptionalString,
    /// Text that fully matches a pattern
    Regex {
        /// Anchored pattern
        pattern: Regex,
    },
    /// Empty text or text that fully matches a pattern
    OptionalRegex {
        /// Anchored pattern
        pattern: Regex,
    },
    /// One value out of a fixed list
    Choice {
        /// Accepted values
        choices: Vec<String>,
    },
    /// Plain-text password suitable for hashing
    Password,
    /// Time of day as `HH:MM`
    Time,
    /// Empty text or time of day as `HH:MM`
    OptionalTime,
}

impl FieldKind {
    /// Create a natural number kind with inclusive bounds.
    pub fn natural(lower: u64, upper: u64) -> Self {
        Self::Natural { lower, upper }
    }

    /// Create a regex kind; the pattern must match the whole value.
    pub fn regex(pattern: &str) -> Result<Self> {
        Ok(Self::Regex {
            pattern: anchored(pattern)?,
        })
    }

    /// Create an optional regex kind; the pattern must match the whole value.
    pub fn optional_regex(pattern: &str) -> Result<Self> {
        Ok(Self::OptionalRegex {
            pattern: anchored(pattern)?,
        })
    }

    /// Create a choice kind from a list of accepted values.
    pub fn choice<I, S>(choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Choice {
            choices: choices.into_iter().map(Into::into).collect(),
        }
    }

    /// Short description of the accepted values, used in generated files.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Boolean => "boolean value: 'true' or 'false'",
            Self::Natural { .. } => "natural number: integer without a sign",
            Self::String => "mandatory, non-empty string",
            Self::OptionalString => "optional, possibly empty string",
            Self::Regex { .. } => "mandatory regular expression: a valid pattern",
            Self::OptionalRegex { .. } => "optional, possibly empty regular expression",
            Self::Choice { .. } => "mandatory value from list of valid values",
            Self::Password => "mandatory, non-empty password",
            Self::Time => "time string of the form HH:MM",
            Self::OptionalTime => "optional, possibly empty time string of the form HH:MM",
        }
    }

    /// Whether values of this kind are stored as text.
    pub fn is_text(&self) -> bool {
        !matches!(self, Self::Boolean | Self::Natural { .. })
    }

    /// Validate a raw value for the field `name`.
    pub fn validate(&self, name: &str, raw: &str) -> std::result::Result<FieldValue, FieldError> {
        if self.is_text() {
            storable(name, raw)?;
        }
        match self {
            Self::Boolean => parse_boolean(name, raw).map(FieldValue::Boolean),
            Self::Natural { lower, upper } => {
                parse_natural(name, raw, *lower, *upper).map(FieldValue::Natural)
            }
            Self::String => {
                require(name, raw)?;
                Ok(FieldValue::Text(raw.to_string()))
            }
            Self::OptionalString => Ok(FieldValue::Text(raw.to_string())),
            Self::Regex { pattern } => {
                require(name, raw)?;
                match_pattern(name, raw, pattern)
            }
            Self::OptionalRegex { pattern } => {
                if raw.is_empty() {
                    return Ok(FieldValue::Text(String::new()));
                }
                match_pattern(name, raw, pattern)
            }
            Self::Choice { choices } => {
                require(name, raw)?;
                if choices.iter().any(|choice| choice == raw) {
                    Ok(FieldValue::Text(raw.to_string()))
                } else {
                    Err(FieldError::new(
                        name,
                        format!(
                            "Invalid value in field '{name}': {raw} (valid: {})",
                            choices.join(", ")
                        ),
                    ))
                }
            }
            Self::Password => parse_password(name, raw).map(FieldValue::Text),
            Self::Time => {
                require(name, raw)?;
                parse_time(name, raw)
            }
            Self::OptionalTime => {
                if raw.is_empty() {
                    return Ok(FieldValue::Text(String::new()));
                }
                parse_time(name, raw)
            }
        }
    }
}

/// The current value of a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Value of a boolean field
    Boolean(bool),
    /// Value of a natural field
    Natural(u64),
    /// Value of any text-valued field
    Text(String),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean(value) => write!(f, "{value}"),
            Self::Natural(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
        }
    }
}

/// One named, typed, validated configuration value.
#[derive(Debug, Clone)]
pub struct Field {
    name: String,
    hint: String,
    kind: FieldKind,
    value: FieldValue,
    assigned: bool,
    edited: bool,
}

impl Field {
    /// Declare a field with a default value.
    ///
    /// The default goes through the same validation as any other value, but
    /// does not count as an assignment.
    pub fn new(
        name: impl Into<String>,
        default: &str,
        kind: FieldKind,
        hint: impl Into<String>,
    ) -> Result<Self> {
        let name = name.into();
        let value = kind
            .validate(&name, default)
            .map_err(|e| Error::InvalidDefault {
                field: name.clone(),
                message: e.message,
            })?;

        Ok(Self {
            name,
            hint: hint.into(),
            kind,
            value,
            assigned: false,
            edited: false,
        })
    }

    /// Validate `raw` and store it as the new value.
    pub fn parse(&mut self, raw: &str) -> std::result::Result<(), FieldError> {
        self.value = self.kind.validate(&self.name, raw)?;
        self.assigned = true;
        Ok(())
    }

    /// Field name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Help text shown to users editing the field.
    pub fn hint(&self) -> &str {
        &self.hint
    }

    /// Validation rule.
    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    /// Current value.
    pub fn value(&self) -> &FieldValue {
        &self.value
    }

    /// Canonical text form of the current value.
    pub fn text(&self) -> String {
        self.value.to_string()
    }

    /// Description of the accepted values.
    pub fn description(&self) -> &'static str {
        self.kind.description()
    }

    /// The value as a boolean, if this is a boolean field.
    pub fn as_bool(&self) -> Option<bool> {
        match self.value {
            FieldValue::Boolean(value) => Some(value),
            _ => None,
        }
    }

    /// The value as a number, if this is a natural field.
    pub fn as_natural(&self) -> Option<u64> {
        match self.value {
            FieldValue::Natural(value) => Some(value),
            _ => None,
        }
    }

    /// The value as text, if this is a text-valued field.
    pub fn as_text(&self) -> Option<&str> {
        match &self.value {
            FieldValue::Text(value) => Some(value),
            _ => None,
        }
    }

    /// Whether `parse` has succeeded since the last reset.
    pub fn is_assigned(&self) -> bool {
        self.assigned
    }

    /// Whether the value changed since the last load or save.
    pub fn is_edited(&self) -> bool {
        self.edited
    }

    pub(crate) fn reset_assigned(&mut self) {
        self.assigned = false;
    }

    pub(crate) fn set_edited(&mut self, edited: bool) {
        self.edited = edited;
    }

    /// Whether the redaction sentinel is a valid value of this field.
    pub(crate) fn is_redactable(&self) -> bool {
        self.kind.is_text() && self.kind.validate(&self.name, REDACTED).is_ok()
    }

    pub(crate) fn redact(&mut self) -> Result<()> {
        if !self.is_redactable() {
            return Err(Error::NotRedactable(self.name.clone()));
        }
        self.value = FieldValue::Text(REDACTED.to_string());
        self.edited = true;
        Ok(())
    }
}

fn anchored(pattern: &str) -> std::result::Result<Regex, regex::Error> {
    Regex::new(&format!("^(?:{pattern})$"))
}

/// Text values are written as one `name=value` line and trimmed on load.
fn storable(name: &str, raw: &str) -> std::result::Result<(), FieldError> {
    if raw.contains(['\n', '\r']) {
        return Err(FieldError::new(
            name,
            format!("Line breaks are not allowed in field '{name}'"),
        ));
    }
    if raw.trim() != raw {
        return Err(FieldError::new(
            name,
            format!("Leading or trailing whitespace is not allowed in field '{name}'"),
        ));
    }
    Ok(())
}

fn require(name: &str, raw: &str) -> std::result::Result<(), FieldError> {
    if raw.is_empty() {
        Err(FieldError::missing(name))
    } else {
        Ok(())
    }
}

fn match_pattern(
    name: &str,
    raw: &str,
    pattern: &Regex,
) -> std::result::Result<FieldValue, FieldError> {
    if pattern.is_match(raw) {
        Ok(FieldValue::Text(raw.to_string()))
    } else {
        Err(FieldError::new(
            name,
            format!("Invalid value in field '{name}': {raw}"),
        ))
    }
}

fn parse_boolean(name: &str, raw: &str) -> std::result::Result<bool, FieldError> {
    require(name, raw)?;
    let lower = raw.to_lowercase();
    if TRUE_TOKENS.contains(&lower.as_str()) {
        Ok(true)
    } else if FALSE_TOKENS.contains(&lower.as_str()) {
        Ok(false)
    } else {
        Err(FieldError::new(
            name,
            format!("Invalid boolean value in field '{name}': {raw}"),
        ))
    }
}

fn parse_natural(
    name: &str,
    raw: &str,
    lower: u64,
    upper: u64,
) -> std::result::Result<u64, FieldError> {
    require(name, raw)?;

    // Checked before parsing so that "-0" is not accepted as zero
    if raw.starts_with('-') {
        return Err(FieldError::new(
            name,
            format!("Invalid positive integer in field '{name}': {raw}"),
        ));
    }

    let value = if raw.bytes().all(|b| b.is_ascii_digit()) {
        raw.parse::<u64>().ok()
    } else {
        None
    };
    let Some(value) = value else {
        return Err(FieldError::new(
            name,
            format!("Invalid integer in field '{name}': {raw}"),
        ));
    };

    if value < lower || value > upper {
        return Err(FieldError::new(
            name,
            format!("Value outside bounds ({lower}..{upper}) in field '{name}': {raw}"),
        ));
    }

    Ok(value)
}

fn parse_password(name: &str, raw: &str) -> std::result::Result<String, FieldError> {
    if raw.is_empty() {
        return Err(FieldError::new(name, "Password cannot be empty"));
    }
    if raw.starts_with('$') {
        return Err(FieldError::new(
            name,
            "Password cannot begin with a dollar sign ($)",
        ));
    }
    if raw.len() > PASSWORD_MAX_LEN {
        return Err(FieldError::new(
            name,
            format!("Password too long - cannot exceed {PASSWORD_MAX_LEN} characters"),
        ));
    }
    Ok(raw.to_string())
}

fn parse_time(name: &str, raw: &str) -> std::result::Result<FieldValue, FieldError> {
    let well_formed = matches!(
        raw.as_bytes(),
        [h1, h2, b':', m1, m2] if [h1, h2, m1, m2].iter().all(|b| b.is_ascii_digit())
    );
    if well_formed && NaiveTime::parse_from_str(raw, "%H:%M").is_ok() {
        Ok(FieldValue::Text(raw.to_string()))
    } else {
        Err(FieldError::new(
            name,
            format!("Invalid time specification in field '{name}': {raw}"),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(kind: FieldKind, default: &str) -> Field {
        Field::new("test", default, kind, "A test field.").unwrap()
    }

    #[test]
    fn test_boolean_tokens() {
        let mut f = field(FieldKind::Boolean, "false");
        for raw in ["y", "YES", "1", "True", "t"] {
            f.parse(raw).unwrap();
            assert_eq!(f.as_bool(), Some(true), "{raw}");
            assert_eq!(f.text(), "true");
        }
        for raw in ["n", "No", "0", "FALSE", "f"] {
            f.parse(raw).unwrap();
            assert_eq!(f.as_bool(), Some(false), "{raw}");
            assert_eq!(f.text(), "false");
        }
    }

    #[test]
    fn test_boolean_rejects_unknown_token() {
        let mut f = field(FieldKind::Boolean, "true");
        let err = f.parse("maybe").unwrap_err();
        assert_eq!(err.message, "Invalid boolean value in field 'test': maybe");
        assert_eq!(f.as_bool(), Some(true));
    }

    #[test]
    fn test_empty_is_missing_not_invalid() {
        let mut f = field(FieldKind::Boolean, "true");
        assert_eq!(
            f.parse("").unwrap_err().message,
            "Missing value in field 'test'"
        );

        let mut n = field(FieldKind::natural(0, 10), "5");
        assert_eq!(
            n.parse("").unwrap_err().message,
            "Missing value in field 'test'"
        );
    }

    #[test]
    fn test_natural_bounds() {
        let mut f = field(FieldKind::natural(1, 10), "5");
        f.parse("10").unwrap();
        assert_eq!(f.as_natural(), Some(10));

        let err = f.parse("11").unwrap_err();
        assert_eq!(err.message, "Value outside bounds (1..10) in field 'test': 11");
        assert!(f.parse("0").is_err());
        assert_eq!(f.as_natural(), Some(10));
    }

    #[test]
    fn test_natural_rejects_signs() {
        let mut f = field(FieldKind::natural(0, 100), "30");
        let err = f.parse("-0").unwrap_err();
        assert!(err.message.starts_with("Invalid positive integer"));
        let err = f.parse("-5").unwrap_err();
        assert!(err.message.starts_with("Invalid positive integer"));
        let err = f.parse("+5").unwrap_err();
        assert!(err.message.starts_with("Invalid integer"));
        let err = f.parse("abc").unwrap_err();
        assert!(err.message.starts_with("Invalid integer"));
        assert_eq!(f.as_natural(), Some(30));
    }

    #[test]
    fn test_string_kinds() {
        let mut f = field(FieldKind::String, "x");
        assert!(f.parse("").is_err());
        f.parse("https://example.com").unwrap();
        assert_eq!(f.as_text(), Some("https://example.com"));

        let mut o = field(FieldKind::OptionalString, "");
        o.parse("").unwrap();
        assert_eq!(o.as_text(), Some(""));
    }

    #[test]
    fn test_regex_is_full_match() {
        let mut f = field(FieldKind::regex("[A-Z]{2}").unwrap(), "US");
        f.parse("DK").unwrap();
        assert!(f.parse("DKK").is_err());
        assert!(f.parse("xDK").is_err());
        assert!(f.parse("").is_err());
        assert_eq!(f.text(), "DK");
    }

    #[test]
    fn test_regex_alternation_is_anchored_as_a_whole() {
        let mut f = field(FieldKind::regex("a|b").unwrap(), "a");
        assert!(f.parse("ab").is_err());
        f.parse("b").unwrap();
    }

    #[test]
    fn test_optional_regex_accepts_empty() {
        let mut f = field(FieldKind::optional_regex("[a-z0-9-]{1,63}").unwrap(), "");
        f.parse("").unwrap();
        f.parse("kiosk-1").unwrap();
        assert!(f.parse("Kiosk One").is_err());
        assert_eq!(f.text(), "kiosk-1");
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(matches!(FieldKind::regex("(["), Err(Error::Pattern(_))));
    }

    #[test]
    fn test_choice() {
        let mut f = field(FieldKind::choice(["pi4b", "pi5"]), "pi4b");
        f.parse("pi5").unwrap();
        let err = f.parse("pi3").unwrap_err();
        assert_eq!(
            err.message,
            "Invalid value in field 'test': pi3 (valid: pi4b, pi5)"
        );
        assert_eq!(f.text(), "pi5");
    }

    #[test]
    fn test_password_rules() {
        let mut f = field(FieldKind::Password, "secret");
        assert_eq!(f.parse("").unwrap_err().message, "Password cannot be empty");
        assert_eq!(
            f.parse("$6$hash").unwrap_err().message,
            "Password cannot begin with a dollar sign ($)"
        );
        assert!(f.parse(&"x".repeat(73)).is_err());
        f.parse(&"x".repeat(72)).unwrap();
        assert_eq!(f.text().len(), 72);
    }

    #[test]
    fn test_time_kinds() {
        let mut f = field(FieldKind::OptionalTime, "05:00");
        f.parse("23:59").unwrap();
        f.parse("").unwrap();
        assert!(f.parse("24:00").is_err());
        assert!(f.parse("5:00").is_err());
        assert!(f.parse("12:60").is_err());

        let mut t = field(FieldKind::Time, "00:00");
        assert!(t.parse("").is_err());
        t.parse("07:30").unwrap();
        assert_eq!(t.text(), "07:30");
    }

    #[test]
    fn test_default_does_not_count_as_assignment() {
        let mut f = field(FieldKind::natural(0, 10), "4");
        assert!(!f.is_assigned());
        f.parse("5").unwrap();
        assert!(f.is_assigned());
    }

    #[test]
    fn test_invalid_default_rejected() {
        let result = Field::new("swap", "500", FieldKind::natural(0, 128), "");
        assert!(matches!(result, Err(Error::InvalidDefault { .. })));
    }

    #[test]
    fn test_redact_only_text() {
        let mut secret = field(FieldKind::Password, "hunter2");
        secret.redact().unwrap();
        assert_eq!(secret.text(), REDACTED);
        assert!(secret.is_edited());

        let mut flag = field(FieldKind::Boolean, "true");
        assert!(matches!(flag.redact(), Err(Error::NotRedactable(_))));
    }

    #[test]
    fn test_redact_requires_sentinel_to_validate() {
        let mut choice = field(FieldKind::choice(["pi4b", "pi5"]), "pi5");
        assert!(matches!(choice.redact(), Err(Error::NotRedactable(_))));
        assert_eq!(choice.text(), "pi5");

        let mut lower = field(FieldKind::regex("[a-z]+").unwrap(), "kiosk");
        assert!(lower.redact().is_err());

        let mut name = field(FieldKind::optional_regex(".{1,32}").unwrap(), "");
        name.redact().unwrap();
        assert_eq!(name.text(), REDACTED);
    }

    #[test]
    fn test_text_kinds_reject_unstorable_values() {
        let kinds = [
            FieldKind::String,
            FieldKind::OptionalString,
            FieldKind::optional_regex(r#"[^|"]{1,128}"#).unwrap(),
            FieldKind::Password,
        ];
        for kind in kinds {
            let mut f = field(kind, "x");
            for raw in ["  padded  ", " lead", "trail\t", "line1\nline2", "cr\r"] {
                assert!(f.parse(raw).is_err(), "{raw:?}");
            }
            f.parse("inner spaces are fine").unwrap();
            assert_eq!(f.text(), "inner spaces are fine");
        }

        let mut f = field(FieldKind::String, "x");
        assert_eq!(
            f.parse("a\nb").unwrap_err().message,
            "Line breaks are not allowed in field 'test'"
        );
        assert_eq!(
            f.parse(" a").unwrap_err().message,
            "Leading or trailing whitespace is not allowed in field 'test'"
        );
    }

    #[test]
    fn test_time_requires_two_digit_parts() {
        let mut f = field(FieldKind::OptionalTime, "05:00");
        for raw in [" 1:00", "01: 5", "1 :00", "+1:00", "01:+5", "0x:00"] {
            assert!(f.parse(raw).is_err(), "{raw:?}");
        }
        assert_eq!(f.text(), "05:00");
    }
}
