//! The closed set of kiosk settings and their declarations.

use fields::{Field, FieldKind};

/// Every setting a kiosk file holds, in file order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Setting {
    Comment,
    Device,
    Type,
    Command,
    Hostname,
    Timezone,
    Keyboard,
    Locale,
    SoundCard,
    SoundLevel,
    Mouse,
    UserName,
    UserCode,
    SshKey,
    WifiName,
    WifiCode,
    WifiCountry,
    WifiHidden,
    WifiBoost,
    CpuBoost,
    WearReduction,
    SwapSize,
    VacuumSize,
    UpgradePost,
    UpgradeTime,
    PoweroffTime,
    IdleTimeout,
    ScreenRotation,
    UserFolder,
    UserPackages,
    ChromiumAutoplay,
}

impl Setting {
    /// All settings in file order.
    pub const ALL: [Self; 31] = [
        Self::Comment,
        Self::Device,
        Self::Type,
        Self::Command,
        Self::Hostname,
        Self::Timezone,
        Self::Keyboard,
        Self::Locale,
        Self::SoundCard,
        Self::SoundLevel,
        Self::Mouse,
        Self::UserName,
        Self::UserCode,
        Self::SshKey,
        Self::WifiName,
        Self::WifiCode,
        Self::WifiCountry,
        Self::WifiHidden,
        Self::WifiBoost,
        Self::CpuBoost,
        Self::WearReduction,
        Self::SwapSize,
        Self::VacuumSize,
        Self::UpgradePost,
        Self::UpgradeTime,
        Self::PoweroffTime,
        Self::IdleTimeout,
        Self::ScreenRotation,
        Self::UserFolder,
        Self::UserPackages,
        Self::ChromiumAutoplay,
    ];

    /// Name used in kiosk files.
    pub fn name(self) -> &'static str {
        match self {
            Self::Comment => "comment",
            Self::Device => "device",
            Self::Type => "type",
            Self::Command => "command",
            Self::Hostname => "hostname",
            Self::Timezone => "timezone",
            Self::Keyboard => "keyboard",
            Self::Locale => "locale",
            Self::SoundCard => "sound_card",
            Self::SoundLevel => "sound_level",
            Self::Mouse => "mouse",
            Self::UserName => "user_name",
            Self::UserCode => "user_code",
            Self::SshKey => "ssh_key",
            Self::WifiName => "wifi_name",
            Self::WifiCode => "wifi_code",
            Self::WifiCountry => "wifi_country",
            Self::WifiHidden => "wifi_hidden",
            Self::WifiBoost => "wifi_boost",
            Self::CpuBoost => "cpu_boost",
            Self::WearReduction => "wear_reduction",
            Self::SwapSize => "swap_size",
            Self::VacuumSize => "vacuum_size",
            Self::UpgradePost => "upgrade_post",
            Self::UpgradeTime => "upgrade_time",
            Self::PoweroffTime => "poweroff_time",
            Self::IdleTimeout => "idle_timeout",
            Self::ScreenRotation => "screen_rotation",
            Self::UserFolder => "user_folder",
            Self::UserPackages => "user_packages",
            Self::ChromiumAutoplay => "chromium_autoplay",
        }
    }

    /// Look a setting up by its file name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.name() == name)
    }

    /// Declare the field for this setting with its built-in default.
    pub fn declare(self) -> fields::Result<Field> {
        let (default, kind, hint): (String, FieldKind, &str) = match self {
            Self::Comment => (
                String::new(),
                FieldKind::optional_regex(r#"[^|"]{1,128}"#)?,
                "A short note describing this kiosk, for your own reference.\n\
                 It is never used by the kiosk itself.",
            ),
            Self::Device => (
                "pi4b".into(),
                FieldKind::choice(["pi4b", "pi5"]),
                "The kind of machine the kiosk runs on:\n\
                 \n\
                 pi4b: Raspberry Pi 4B.\n\
                 pi5: Raspberry Pi 5.",
            ),
            Self::Type => (
                "web".into(),
                FieldKind::choice(["cli", "x11", "web", "web-wayland"]),
                "The kind of kiosk to create:\n\
                 \n\
                 cli: Runs the command in 'command' on the console.\n\
                 x11: Runs the X11 program in 'command'.\n\
                 web: Shows the web page in 'command' in Chromium on X11.\n\
                 web-wayland: Shows the web page in 'command' in Chromium on Wayland.",
            ),
            Self::Command => (
                "https://google.com".into(),
                FieldKind::String,
                "The web address or command the kiosk runs after booting.",
            ),
            Self::Hostname => (
                String::new(),
                FieldKind::optional_regex("[A-Za-z0-9-]{1,63}")?,
                "The network name of the kiosk: letters, digits and dashes.\n\
                 Every kiosk on the same network needs a unique name.",
            ),
            Self::Timezone => (
                "America/Los_Angeles".into(),
                FieldKind::regex("UTC|[A-Za-z_]+(/[A-Za-z0-9_+-]+){1,2}")?,
                "The time zone of the kiosk, e.g. Europe/Copenhagen.\n\
                 Use 'timedatectl list-timezones' on Linux to see valid values.",
            ),
            Self::Keyboard => (
                "us".into(),
                FieldKind::regex("[a-z]{2,8}")?,
                "The keyboard layout, e.g. 'us' or 'dk'.",
            ),
            Self::Locale => (
                "en_US.UTF-8".into(),
                FieldKind::regex(r"[a-z]{2,3}_[A-Z]{2}\.UTF-8")?,
                "The locale used for dates, numbers and sorting, e.g. da_DK.UTF-8.\n\
                 System messages are kept in US English.",
            ),
            Self::SoundCard => (
                "none".into(),
                FieldKind::choice(["none", "jack", "hdmi1", "hdmi2"]),
                "The audio output to use, or 'none' to leave audio disabled.",
            ),
            Self::SoundLevel => (
                "80".into(),
                FieldKind::natural(0, 100),
                "The audio volume in percent (0 through 100).",
            ),
            Self::Mouse => (
                "false".into(),
                FieldKind::Boolean,
                "If true, the mouse pointer is shown; useful for kiosks without a\n\
                 touch screen.",
            ),
            Self::UserName => (
                "kiosk".into(),
                FieldKind::regex("[A-Za-z0-9_]{1,32}")?,
                "The name of the user account the kiosk runs as.",
            ),
            Self::UserCode => (
                super::password_create(),
                FieldKind::Password,
                "The password of the kiosk user.  A random password is generated\n\
                 when a new kiosk file is created.",
            ),
            Self::SshKey => (
                String::new(),
                FieldKind::OptionalString,
                "A public SSH key allowed to log in as the kiosk user.  When given,\n\
                 password logins and root logins over SSH are disabled.",
            ),
            Self::WifiName => (
                String::new(),
                FieldKind::optional_regex(".{1,32}")?,
                "The name (SSID) of the Wi-Fi network, or empty to use wired\n\
                 networking only.",
            ),
            Self::WifiCode => (
                String::new(),
                FieldKind::optional_regex("[\\x{20}-\\x{7e}\\x{a0}-\\x{ff}]{8,63}")?,
                "The password of the Wi-Fi network (8 through 63 characters).",
            ),
            Self::WifiCountry => (
                "US".into(),
                FieldKind::regex("[A-Z]{2}")?,
                "The two-letter country code used to select legal Wi-Fi channels.",
            ),
            Self::WifiHidden => (
                "false".into(),
                FieldKind::Boolean,
                "If true, the Wi-Fi network does not broadcast its name.",
            ),
            Self::WifiBoost => (
                "true".into(),
                FieldKind::Boolean,
                "If true, Wi-Fi power saving is disabled for a more stable connection.",
            ),
            Self::CpuBoost => (
                "true".into(),
                FieldKind::Boolean,
                "If true, the CPU is allowed to run at its highest clock speed.",
            ),
            Self::WearReduction => (
                "true".into(),
                FieldKind::Boolean,
                "If true, logs are kept in memory to reduce wear on the storage card.",
            ),
            Self::SwapSize => (
                "4".into(),
                FieldKind::natural(0, 128),
                "The size of the swap file in gigabytes, or 0 for no swap file.",
            ),
            Self::VacuumSize => (
                "256".into(),
                FieldKind::natural(0, 4096),
                "The largest size of the system journal in megabytes.",
            ),
            Self::UpgradePost => (
                "reboot".into(),
                FieldKind::choice(["poweroff", "reboot"]),
                "What to do after the daily upgrade: 'reboot' or 'poweroff'.",
            ),
            Self::UpgradeTime => (
                "05:00".into(),
                FieldKind::OptionalTime,
                "The time of day (HH:MM) of the daily upgrade, or empty to never\n\
                 upgrade automatically.",
            ),
            Self::PoweroffTime => (
                String::new(),
                FieldKind::OptionalTime,
                "The time of day (HH:MM) the kiosk powers off, or empty to keep it\n\
                 running.",
            ),
            Self::IdleTimeout => (
                "0".into(),
                FieldKind::natural(0, 86400),
                "Seconds without input before the browser is restarted, or 0 to\n\
                 never restart it.",
            ),
            Self::ScreenRotation => (
                "none".into(),
                FieldKind::choice(["none", "left", "flip", "right"]),
                "How to rotate the screen: none, left, flip (upside down) or right.",
            ),
            Self::UserFolder => (
                String::new(),
                FieldKind::OptionalString,
                "A folder on this machine copied into the kiosk user's home folder.",
            ),
            Self::UserPackages => (
                String::new(),
                FieldKind::OptionalString,
                "Extra packages to install, separated by spaces.",
            ),
            Self::ChromiumAutoplay => (
                "false".into(),
                FieldKind::Boolean,
                "If true, Chromium plays audio and video without user interaction.",
            ),
        };
        Field::new(self.name(), &default, kind, hint)
    }
}
