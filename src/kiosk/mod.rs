//! The kiosk definition: every setting of one kiosk, loaded from and saved to
//! a `.kiosk` file.

mod settings;

pub use settings::Setting;

use clap::ValueEnum;
use fields::{Error, Field, FieldError, FieldValue, Fields, LoadPolicy, TextFileError, Version};
use rand::Rng;
use rand::distr::{Alphanumeric, SampleString};
use std::path::Path;

/// File extension every kiosk file carries.
pub const EXTENSION: &str = "kiosk";

/// Length of generated passwords.
const PASSWORD_LENGTH: usize = 32;

/// Which settings a redacted copy hides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RedactProfile {
    /// Secrets that must not be stored on the target machine
    Prepare,
    /// Everything identifying a person or a network, for bug reports
    Report,
}

impl RedactProfile {
    /// Settings hidden by this profile.
    pub fn settings(self) -> &'static [Setting] {
        match self {
            Self::Prepare => &[Setting::WifiCode],
            Self::Report => &[
                Setting::Comment,
                Setting::UserName,
                Setting::UserCode,
                Setting::WifiName,
                Setting::WifiCode,
                Setting::SshKey,
            ],
        }
    }
}

/// A random password for a new kiosk user.
pub fn password_create() -> String {
    Alphanumeric.sample_string(&mut rand::rng(), PASSWORD_LENGTH)
}

/// A random host name of the form `kiosk12345`.
pub fn hostname_create(prefix: &str) -> String {
    let suffix: u32 = rand::rng().random_range(0..100_000);
    format!("{prefix}{suffix:05}")
}

/// All settings of one kiosk.
#[derive(Debug, Clone)]
pub struct Kiosk {
    fields: Fields,
}

impl Kiosk {
    /// A kiosk with every setting at its default value.
    pub fn new(version: Version) -> fields::Result<Self> {
        let mut fields = Fields::new(version);
        for setting in Setting::ALL {
            fields.add(setting.declare()?)?;
        }
        Ok(Self { fields })
    }

    /// Load a kiosk file, reporting every problem found through `report`.
    pub fn load<F>(&mut self, path: &Path, report: F) -> fields::Result<()>
    where
        F: FnMut(&TextFileError),
    {
        self.fields.load_safe(path, LoadPolicy::strict(), report)
    }

    /// Write the kiosk to `path`.
    pub fn save(&mut self, path: &Path) -> fields::Result<()> {
        self.fields.save(path)
    }

    /// The underlying field set.
    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    /// The field holding `setting`.
    pub fn field(&self, setting: Setting) -> fields::Result<&Field> {
        self.fields.get(setting.name())
    }

    /// Text form of `setting`.
    pub fn text(&self, setting: Setting) -> fields::Result<String> {
        Ok(self.field(setting)?.text())
    }

    /// Value of a boolean setting.
    pub fn flag(&self, setting: Setting) -> fields::Result<bool> {
        self.field(setting)?
            .as_bool()
            .ok_or_else(|| mistyped(setting, "boolean"))
    }

    /// Value of a numeric setting.
    pub fn number(&self, setting: Setting) -> fields::Result<u64> {
        self.field(setting)?
            .as_natural()
            .ok_or_else(|| mistyped(setting, "natural"))
    }

    /// Parse `raw` into the named setting.
    pub fn assign(&mut self, name: &str, raw: &str) -> fields::Result<()> {
        self.fields.assign(name, raw)
    }

    /// Whether any setting changed since the last load or save.
    pub fn is_edited(&self) -> bool {
        self.fields.is_edited()
    }

    /// Hide the settings named by `profile`.
    pub fn redact(&mut self, profile: RedactProfile) -> fields::Result<()> {
        let names: Vec<&str> = profile.settings().iter().map(|s| s.name()).collect();
        self.fields.redact(&names)
    }

    /// Consistency problems that do not prevent setting up the kiosk.
    pub fn check(&self) -> fields::Result<Vec<String>> {
        let mut warnings = Vec::new();
        for setting in [Setting::Comment, Setting::Hostname, Setting::SshKey] {
            if self.text(setting)?.is_empty() {
                warnings.push(missing(setting));
            }
        }

        if !self.text(Setting::WifiName)?.is_empty() && self.text(Setting::WifiCode)?.is_empty() {
            warnings.push(missing(Setting::WifiCode));
        }

        if self.text(Setting::SoundCard)? == "none" && self.flag(Setting::ChromiumAutoplay)? {
            warnings.push(
                "Warning: 'chromium_autoplay' has no effect without a 'sound_card'".to_string(),
            );
        }

        let folder = self.text(Setting::UserFolder)?;
        if !folder.is_empty() && !Path::new(&folder).is_dir() {
            warnings.push(format!(
                "Warning: 'user_folder' does not name an existing folder: {folder}"
            ));
        }

        Ok(warnings)
    }

    /// The settings as a JSON object, with passwords masked unless `reveal`.
    pub fn to_json(&self, reveal: bool) -> serde_json::Value {
        let mut map = serde_json::Map::new();
        for field in self.fields.iter() {
            let value = match field.value() {
                _ if !reveal && is_secret(field) => serde_json::Value::from(fields::REDACTED),
                FieldValue::Boolean(value) => serde_json::Value::from(*value),
                FieldValue::Natural(value) => serde_json::Value::from(*value),
                FieldValue::Text(value) => serde_json::Value::from(value.as_str()),
            };
            map.insert(field.name().to_string(), value);
        }
        serde_json::Value::Object(map)
    }
}

/// Whether a field holds a password that is masked when shown.
pub fn is_secret(field: &Field) -> bool {
    let name = field.name();
    (name == Setting::UserCode.name() || name == Setting::WifiCode.name())
        && !field.text().is_empty()
}

fn missing(setting: Setting) -> String {
    format!(
        "Warning: '{}' value is missing from configuration",
        setting.name()
    )
}

fn mistyped(setting: Setting, expected: &str) -> Error {
    Error::Field(FieldError::new(
        setting.name(),
        format!("Field '{}' is not a {expected} field", setting.name()),
    ))
}
