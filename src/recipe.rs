//! The provisioning recipe: every step that turns a fresh Ubuntu Server
//! install into a kiosk, in the order they run.
//!
//! The step list depends only on the kiosk settings, so building it twice
//! from the same kiosk yields the same numbering. That is what makes a
//! resume step printed by one run valid for the next.

use crate::kiosk::{Kiosk, RedactProfile, Setting};
use crate::error::AppError;
use anyhow::{Context, Result};
use chrono::NaiveTime;
use forge::actions::{
    self, AppendText, AptAction, CreateOwnedText, CreateText, External, RemoveFolder, ReplaceText,
};
use forge::{Logger, Script};
use std::path::{Path, PathBuf};

/// Owner read/write.
const MODE_PRIVATE: u32 = 0o600;
/// Owner read/write/execute.
const MODE_SCRIPT: u32 = 0o700;
/// Owner read/write, everyone else read.
const MODE_PUBLIC: u32 = 0o644;
/// Read-only for everyone.
const MODE_READONLY: u32 = 0o444;

const SWAP_FILE: &str = "/swapfile";

/// Where things live on the machine being provisioned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    /// Home folder of the kiosk user
    pub home: PathBuf,
    /// The kiosk file the settings were loaded from
    pub kiosk_file: PathBuf,
}

impl Layout {
    fn in_home(&self, relative: &str) -> PathBuf {
        self.home.join(relative)
    }
}

fn run<I, S>(title: &str, program: &str, args: I) -> External
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    External::new(title, program, args)
}

fn shell(title: &str, command: &str) -> External {
    External::new(title, "sh", ["-c", command])
}

/// Calibration matrix rotating an X11 touch panel.
fn touch_matrix(rotation: &str) -> &'static str {
    match rotation {
        "left" => "0 -1 1 1 0 0 0 0 1",
        "flip" => "-1 0 1 0 -1 1 0 0 1",
        "right" => "0 1 0 -1 0 1 0 0 1",
        _ => "1 0 0 0 1 0 0 0 1",
    }
}

/// Output orientation understood by Ubuntu Frame and `xrandr`.
fn wayland_orientation(rotation: &str) -> &'static str {
    match rotation {
        "left" => "left",
        "flip" => "inverted",
        "right" => "right",
        _ => "normal",
    }
}

fn wayland_display(rotation: &str) -> String {
    format!(
        "layouts:\n  default:\n    cards:\n    - card-id: 0\n      HDMI-A-1:\n         \
         state: enabled\n         position: [0, 0]\n         orientation: {}\n         \
         scale: 1\n         group: 0",
        wayland_orientation(rotation)
    )
}

/// Cron schedule fields (`MM HH * * *`) for a `HH:MM` time of day.
pub fn cron_schedule(time: &str) -> Result<String> {
    let parsed = NaiveTime::parse_from_str(time, "%H:%M")
        .with_context(|| format!("Invalid time of day: {time}"))?;
    Ok(format!("{} * * *", parsed.format("%M %H")))
}

/// Quote `text` for a POSIX shell.
fn quote(text: &str) -> String {
    format!("'{}'", text.replace('\'', r"'\''"))
}

fn chromium_command(kiosk: &Kiosk) -> Result<String> {
    let mut command = String::from("chromium --kiosk --noerrdialogs --disable-infobars");
    if kiosk.flag(Setting::ChromiumAutoplay)? {
        command.push_str(" --autoplay-policy=no-user-gesture-required");
    }
    command.push(' ');
    command.push_str(&quote(&kiosk.text(Setting::Command)?));
    Ok(command)
}

fn volume_command(kiosk: &Kiosk) -> Result<Option<String>> {
    if kiosk.text(Setting::SoundCard)? == "none" {
        return Ok(None);
    }
    Ok(Some(format!(
        "pactl set-sink-volume @DEFAULT_SINK@ {}%",
        kiosk.number(Setting::SoundLevel)?
    )))
}

fn openbox_autostart(kiosk: &Kiosk, kind: &str) -> Result<String> {
    let mut lines = vec!["#!/usr/bin/dash".to_string()];
    lines.push("xset s off".into());
    lines.push("xset s noblank".into());
    lines.push("xset -dpms".into());

    let rotation = kiosk.text(Setting::ScreenRotation)?;
    if rotation != "none" {
        lines.push(format!("xrandr -o {}", wayland_orientation(&rotation)));
    }
    if !kiosk.flag(Setting::Mouse)? {
        lines.push("unclutter -idle 0.1 -root &".into());
    }
    if let Some(volume) = volume_command(kiosk)? {
        lines.push(volume);
    }

    if kind == "web" {
        lines.push(chromium_command(kiosk)?);
    } else {
        lines.push(kiosk.text(Setting::Command)?);
    }
    Ok(lines.join("\n") + "\n")
}

fn bash_profile(kiosk: &Kiosk, kind: &str) -> Result<String> {
    let start = if kind == "cli" {
        kiosk.text(Setting::Command)?
    } else {
        "startx".to_string()
    };

    let mut lines = vec![
        String::new(),
        "# Start the kiosk once, on the automatically logged in console.".to_string(),
        "if [ ! -f /tmp/kiosk_started ]; then".to_string(),
        "\ttouch /tmp/kiosk_started".to_string(),
    ];
    if kind == "cli"
        && let Some(volume) = volume_command(kiosk)?
    {
        lines.push(format!("\t{volume}"));
    }
    lines.push(format!("\t{start}"));
    lines.push("\trm -f /tmp/kiosk_started".into());
    lines.push("\tclear".into());
    lines.push("\tsleep 1d".into());
    lines.push("fi".into());
    Ok(lines.join("\n") + "\n")
}

fn add_base(script: &mut Script, kiosk: &Kiosk, layout: &Layout) -> Result<()> {
    script.add(run("Enabling Network Time Protocol (NTP).", "timedatectl", ["set-ntp", "on"]))?;
    script.add(AppendText::new(
        "Configuring 'apt', 'dpkg', etc. to never interact with the user.",
        "/etc/environment",
        "DEBIAN_FRONTEND=\"noninteractive\"\n",
    ))?;
    script.add(ReplaceText::new(
        "Configuring 'needrestart' to NOT use interactive dialogues during upgrades.",
        "/etc/needrestart/needrestart.conf",
        "$nrconf{restart} = 'i';",
        "$nrconf{restart} = 'a';",
    ))?;
    script.add(ReplaceText::new(
        "Configuring 'apt' to never update package indices on its own.",
        "/etc/apt/apt.conf.d/10periodic",
        "APT::Periodic::Update-Package-Lists \"1\";",
        "APT::Periodic::Update-Package-Lists \"0\";",
    ))?;
    script.add(CreateOwnedText::new(
        "Creating 'apt' configuration file to keep existing configuration files during upgrades.",
        "/etc/apt/apt.conf.d/00local",
        "root",
        MODE_PUBLIC,
        "// Never replace existing local configuration files during upgrades.\n\
         Dpkg::Options {\n    \"--force-confdef\";\n    \"--force-confold\";\n}\n",
    ))?;
    script.add(AppendText::new(
        "Creating 'kiosklog' Bash function for easier debugging and status discovery.",
        layout.in_home(".bashrc"),
        "\n# Show all system log entries made by kioskforge.\n\
         kiosklog() {\n\
         \t# Use 'kiosklog -p 3' to only see errors.\n\
         \tjournalctl -o short-iso $* | grep -F kioskforge | grep -Fv systemd\\[\n\
         }\n",
    ))?;

    if !kiosk.text(Setting::WifiName)?.is_empty() && kiosk.flag(Setting::WifiBoost)? {
        script.add(actions::apt::install(
            "Installing network tools to disable Wi-Fi power-saving mode.",
            &["iw", "net-tools"],
        ))?;
    }
    Ok(())
}

fn add_ssh(script: &mut Script, kiosk: &Kiosk, layout: &Layout) -> Result<()> {
    script.add(actions::apt::install("Installing OpenSSH server.", &["openssh-server"]))?;

    let ssh_key = kiosk.text(Setting::SshKey)?;
    if !ssh_key.is_empty() {
        script.add(AppendText::new(
            "Installing public SSH key in user's home directory.",
            layout.in_home(".ssh/authorized_keys"),
            format!("{ssh_key}\n"),
        ))?;
        script.add(ReplaceText::new(
            "Disabling root login using SSH.",
            "/etc/ssh/sshd_config",
            "#PermitRootLogin prohibit-password",
            "PermitRootLogin no",
        ))?;
        script.add(ReplaceText::new(
            "Disabling password authentication (requiring private SSH key to log in).",
            "/etc/ssh/sshd_config",
            "#PasswordAuthentication yes",
            "PasswordAuthentication no",
        ))?;
    }

    script.add(ReplaceText::new(
        "Disabling empty SSH password login.",
        "/etc/ssh/sshd_config",
        "#PermitEmptyPasswords no",
        "PermitEmptyPasswords no",
    ))?;
    Ok(())
}

fn add_system(script: &mut Script, kiosk: &Kiosk) -> Result<()> {
    script.add(actions::apt::purge(
        "Purging package unattended-upgrades.",
        &["unattended-upgrades"],
    ))?;
    script.add(RemoveFolder::new(
        "Removing remains of package unattended-upgrades.",
        "/var/log/unattended-upgrades",
    ))?;

    let locale = kiosk.text(Setting::Locale)?;
    script.add(run(
        "Configuring system locales.",
        "locale-gen",
        ["--purge".to_string(), "en_US.UTF-8".to_string(), locale.clone()],
    ))?;
    script.add(run(
        "Setting system locale.",
        "update-locale",
        [format!("LANG={locale}"), "LC_MESSAGES=en_US.UTF-8".to_string()],
    ))?;
    script.add(run(
        "Setting timezone.",
        "timedatectl",
        ["set-timezone".to_string(), kiosk.text(Setting::Timezone)?],
    ))?;
    script.add(run(
        "Setting keyboard layout.",
        "localectl",
        ["set-x11-keymap".to_string(), kiosk.text(Setting::Keyboard)?],
    ))?;

    script.add(run("Disabling firewall log.", "ufw", ["logging", "off"]))?;
    script.add(run("Allowing SSH through firewall.", "ufw", ["allow", "ssh"]))?;
    script.add(run("Enabling firewall.", "ufw", ["--force", "enable"]))?;

    script.add(actions::apt::purge(
        "Purging unwanted packages.",
        &["modemmanager", "open-vm-tools", "needrestart"],
    ))?;
    script.add(run("Upgrading all snaps.", "snap", ["refresh"]))?;
    script.add(run(
        "Disabling automatic upgrades of snaps.",
        "snap",
        ["refresh", "--hold"],
    ))?;
    script.add(actions::apt::update())?;
    script.add(actions::apt::upgrade())?;

    if kiosk.text(Setting::SoundCard)? != "none" {
        script.add(actions::apt::install(
            "Installing Pipewire audio subsystem.",
            &["pipewire", "pulseaudio-utils"],
        ))?;
    }
    Ok(())
}

fn add_chromium_snap(script: &mut Script, kiosk: &Kiosk, layout: &Layout) -> Result<()> {
    script.add(run("Installing Chromium web browser.", "snap", ["install", "chromium"]))?;
    script.add(run(
        "Purging Common Unix Printing System (cups) installed automatically with Chromium.",
        "snap",
        ["remove", "--purge", "cups"],
    ))?;
    script.add(CreateOwnedText::new(
        "Disabling Translate feature in Chromium web browser.",
        layout.in_home("snap/chromium/common/chromium/Default/Preferences"),
        kiosk.text(Setting::UserName)?,
        MODE_PRIVATE,
        "{\"translate\":{\"enabled\":false}}\n",
    ))?;
    Ok(())
}

fn add_wayland(script: &mut Script, kiosk: &Kiosk, layout: &Layout) -> Result<()> {
    let user = kiosk.text(Setting::UserName)?;
    let command = kiosk.text(Setting::Command)?;

    script.add(run(
        "Installing Ubuntu Frame for Wayland.",
        "snap",
        ["install", "ubuntu-frame"],
    ))?;
    script.add(run(
        "Configuring Ubuntu Frame for kiosk use.",
        "snap",
        ["set", "ubuntu-frame", "daemon=true"],
    ))?;
    script.add(run("Installing Chromium web browser.", "snap", ["install", "chromium"]))?;
    script.add(run(
        "Configuring Chromium for Ubuntu Frame.",
        "snap",
        ["set", "chromium", "daemon=true"],
    ))?;
    script.add(run(
        "Connecting Chromium with Wayland.",
        "snap",
        ["connect", "chromium:wayland"],
    ))?;
    script.add(run(
        "Configuring starting page in Chromium.",
        "snap",
        ["set".to_string(), "chromium".to_string(), format!("url={command}")],
    ))?;
    script.add(run(
        "Purging Common Unix Printing System (cups) installed automatically with Chromium.",
        "snap",
        ["remove", "--purge", "cups"],
    ))?;
    script.add(CreateOwnedText::new(
        "Disabling Translate feature in Chromium web browser.",
        layout.in_home("snap/chromium/common/chromium/Default/Preferences"),
        user.clone(),
        MODE_PRIVATE,
        "{\"translate\":{\"enabled\":false}}\n",
    ))?;

    let rotation = kiosk.text(Setting::ScreenRotation)?;
    if rotation != "none" {
        script.add(run(
            "Configure Wayland to rotate the screen.",
            "snap",
            [
                "set".to_string(),
                "ubuntu-frame".to_string(),
                format!("display={}", wayland_display(&rotation)),
            ],
        ))?;
    }
    Ok(())
}

fn add_x11(script: &mut Script, kiosk: &Kiosk, layout: &Layout, kind: &str) -> Result<()> {
    let user = kiosk.text(Setting::UserName)?;

    script.add(actions::apt::install_no_recommends(
        "Installing X Windows and OpenBox window manager.",
        &["xserver-xorg", "x11-xserver-utils", "xinit", "openbox", "xdg-utils"],
    ))?;
    if !kiosk.flag(Setting::Mouse)? {
        script.add(actions::apt::install_no_recommends(
            "Installing 'unclutter' to hide the mouse pointer.",
            &["unclutter"],
        ))?;
    }

    if kiosk.text(Setting::Device)? == "pi5" {
        script.add(actions::apt::install_no_recommends(
            "Installing Raspberry Pi System Configuration tool.",
            &["raspi-config"],
        ))?;
        script.add(run(
            "Downloading X11 graphics driver for Pi5.",
            "wget",
            [
                "-q",
                "-O",
                "/tmp/gldriver-test_0.15_all.deb",
                "https://archive.raspberrypi.org/debian/pool/main/g/gldriver-test/gldriver-test_0.15_all.deb",
            ],
        ))?;
        script.add(AptAction::new(
            "Installing X11 graphics driver for Pi5.",
            ["install", "-y", "/tmp/gldriver-test_0.15_all.deb"],
        ))?;
        script.add(run(
            "Removing downloaded graphics driver for Pi5.",
            "rm",
            ["-f", "/tmp/gldriver-test_0.15_all.deb"],
        ))?;
        script.add(CreateOwnedText::new(
            "Creating X11 configuration file to use Pi5 graphics driver.",
            "/etc/X11/xorg.conf.d/99-v3d.conf",
            "root",
            MODE_READONLY,
            "Section \"OutputClass\"\n    Identifier \"vc4\"\n    MatchDriver \"vc4\"\n    \
             Driver \"modesetting\"\n    Option \"PrimaryGPU\" \"true\"\nEndSection\n",
        ))?;
    }

    let rotation = kiosk.text(Setting::ScreenRotation)?;
    if rotation != "none" {
        script.add(CreateOwnedText::new(
            "Creating X11 configuration file to rotate touch panel (if any).",
            "/etc/X11/xorg.conf.d/99-kiosk-set-touch-rotation.conf",
            "root",
            MODE_READONLY,
            format!(
                "Section \"InputClass\"\n\
                 \tIdentifier \"Coordinate Transformation Matrix\"\n\
                 \tMatchIsTouchscreen \"on\"\n\
                 \tMatchDevicePath \"/dev/input/event*\"\n\
                 \tMatchDriver \"libinput\"\n\
                 \tOption \"CalibrationMatrix\" \"{}\"\n\
                 EndSection\n",
                touch_matrix(&rotation)
            ),
        ))?;
    }

    script.add(CreateOwnedText::new(
        "Creating OpenBox startup script.",
        layout.in_home(".config/openbox/autostart"),
        user,
        MODE_SCRIPT,
        openbox_autostart(kiosk, kind)?,
    ))?;

    if kind == "web" {
        add_chromium_snap(script, kiosk, layout)?;
        script.add(actions::apt::install_no_recommends(
            "Installing 'xprintidle' used to restart browser whenever idle timeout expires.",
            &["xprintidle"],
        ))?;
    }
    Ok(())
}

fn add_display(script: &mut Script, kiosk: &Kiosk, layout: &Layout) -> Result<()> {
    let kind = kiosk.text(Setting::Type)?;
    match kind.as_str() {
        "web-wayland" => add_wayland(script, kiosk, layout),
        "x11" | "web" => add_x11(script, kiosk, layout, &kind),
        "cli" => Ok(()),
        other => Err(AppError::Internal(format!("Unknown kiosk type: {other}")).into()),
    }
}

fn add_packages_and_swap(script: &mut Script, kiosk: &Kiosk) -> Result<()> {
    let packages = kiosk.text(Setting::UserPackages)?;
    let packages: Vec<&str> = packages.split_whitespace().collect();
    if !packages.is_empty() {
        script.add(actions::apt::install(
            "Installing user-specified (custom) packages.",
            &packages,
        ))?;
    }

    let swap_size = kiosk.number(Setting::SwapSize)?;
    if swap_size > 0 {
        script.add(run(
            "Allocating swap file.",
            "fallocate",
            ["-l".to_string(), format!("{swap_size}G"), SWAP_FILE.to_string()],
        ))?;
        script.add(run("Setting permissions on new swap file.", "chmod", ["600", SWAP_FILE]))?;
        script.add(run("Formatting swap file.", "mkswap", [SWAP_FILE]))?;
        script.add(AppendText::new(
            "Creating '/etc/fstab' entry for the new swap file.",
            "/etc/fstab",
            format!("{SWAP_FILE}\tnone\tswap\tsw\t0\t0\n"),
        ))?;
    }
    Ok(())
}

fn add_wayland_session(script: &mut Script, kiosk: &Kiosk, layout: &Layout) -> Result<()> {
    let user = kiosk.text(Setting::UserName)?;

    script.add(CreateOwnedText::new(
        "Creating global systemd script to allocate a session for the user.",
        "/usr/lib/systemd/system/user-session.service",
        "root",
        MODE_PRIVATE,
        format!(
            "[Service]\nUser={user}\nPAMName=login\nTTYPath=/dev/tty1\n\
             ExecStart=/usr/bin/systemctl --user start --wait user-session.target\n"
        ),
    ))?;
    script.add(run(
        "Enabling global systemd user-session service.",
        "systemctl",
        ["enable", "user-session.service"],
    ))?;
    script.add(CreateOwnedText::new(
        "Creating user-specific systemd service to launch Ubuntu Frame.",
        layout.in_home(".config/systemd/user/ubuntu-frame.service"),
        user.clone(),
        MODE_PRIVATE,
        "[Unit]\nDescription=KioskForge (Ubuntu Frame launcher)\n\
         Before=xdg-desktop-autostart.target\nBindsTo=graphical-session.target\n\
         [Service]\n\
         ExecStartPre=/usr/bin/dbus-update-activation-environment --systemd WAYLAND_DISPLAY=wayland-0\n\
         ExecStart=/snap/bin/ubuntu-frame\n",
    ))?;
    script.add(run(
        "Enabling custom systemd Ubuntu Frame service.",
        "systemctl",
        ["enable", "ubuntu-frame.service"],
    ))?;
    script.add(CreateOwnedText::new(
        "Creating user-specific systemd service to launch Chromium.",
        layout.in_home(".config/systemd/user/chromium.service"),
        user.clone(),
        MODE_PRIVATE,
        format!(
            "[Unit]\nDescription=KioskForge (Chromium launcher)\nAfter=ubuntu-frame.service\n\
             [Service]\nExecStart=/snap/bin/{}\n",
            chromium_command(kiosk)?
        ),
    ))?;
    script.add(run(
        "Enabling custom systemd Chromium service.",
        "systemctl",
        ["enable", "chromium.service"],
    ))?;
    script.add(CreateOwnedText::new(
        "Creating user-specific systemd target to start the kiosk session.",
        layout.in_home(".config/systemd/user/user-session.target"),
        user,
        MODE_PRIVATE,
        "[Unit]\nDescription=KioskForge (kiosk session)\n\
         Wants=ubuntu-frame.service chromium.service\n",
    ))?;
    script.add(run(
        "Start Wayland and then Chromium when booting.",
        "systemctl",
        ["add-wants", "graphical.target", "user-session.service"],
    ))?;
    Ok(())
}

fn add_autologin(script: &mut Script, kiosk: &Kiosk, layout: &Layout, kind: &str) -> Result<()> {
    let user = kiosk.text(Setting::UserName)?;

    script.add(AppendText::new(
        "Appending lines to ~/.bash_profile to start up the kiosk.",
        layout.in_home(".bash_profile"),
        bash_profile(kiosk, kind)?,
    ))?;
    script.add(CreateOwnedText::new(
        "Creating systemd auto-login override.",
        "/etc/systemd/system/getty@tty1.service.d/override.conf",
        "root",
        MODE_PRIVATE,
        format!(
            "[Service]\nExecStart=\n\
             ExecStart=-/sbin/agetty --noissue --autologin {user} %I $TERM\nType=simple\n"
        ),
    ))?;
    Ok(())
}

fn add_cleanup(script: &mut Script, kiosk: &Kiosk, layout: &Layout) -> Result<()> {
    let user = kiosk.text(Setting::UserName)?;

    let mut redacted = kiosk.clone();
    redacted.redact(RedactProfile::Prepare)?;
    script.add(CreateOwnedText::new(
        "Removing secrets from the stored kiosk file.",
        layout.kiosk_file.clone(),
        user.clone(),
        MODE_PRIVATE,
        redacted.fields().render(),
    ))?;

    script.add(run(
        "Setting ownership of all files in user's home directory to that user.",
        "chown",
        [
            "-R".to_string(),
            format!("{user}:{user}"),
            layout.home.display().to_string(),
        ],
    ))?;
    script.add(actions::apt::purge(
        "Purging all unused packages to free disk space.",
        &[],
    ))?;
    script.add(actions::apt::clean())?;
    script.add(shell(
        "Purging snap cache to free disk space.",
        "rm -fr /var/lib/snapd/cache/*",
    ))?;
    script.add(run(
        "Limiting size of the system journal.",
        "journalctl",
        [format!("--vacuum-size={}M", kiosk.number(Setting::VacuumSize)?)],
    ))?;
    Ok(())
}

fn add_schedules(script: &mut Script, kiosk: &Kiosk) -> Result<()> {
    let upgrade_time = kiosk.text(Setting::UpgradeTime)?;
    if !upgrade_time.is_empty() {
        let post = kiosk.text(Setting::UpgradePost)?;
        script.add(CreateText::new(
            "Creating cron job to upgrade system once a day at the configured time.",
            "/etc/cron.d/kiosk-upgrade-system",
            format!(
                "# Cron job to upgrade, clean, and {post} the system every day.\n\
                 {}\troot\tapt-get update && apt-get dist-upgrade -y && \
                 apt-get autoremove --purge -y && apt-get clean && {post}\n",
                cron_schedule(&upgrade_time)?
            ),
        ))?;
    }

    let poweroff_time = kiosk.text(Setting::PoweroffTime)?;
    if !poweroff_time.is_empty() {
        script.add(CreateText::new(
            "Creating cron job to power off the system every day at the configured time.",
            "/etc/cron.d/kiosk-power-off",
            format!(
                "# Cron job to shut down the kiosk machine nicely every day.\n\
                 {}\troot\tpoweroff\n",
                cron_schedule(&poweroff_time)?
            ),
        ))?;
    }

    script.add(run(
        "Flushing disk buffers before rebooting (may take a while when using slow media).",
        "sync",
        std::iter::empty::<String>(),
    ))?;
    Ok(())
}

/// Build the provisioning script for `kiosk`.
pub fn build<'a>(
    kiosk: &Kiosk,
    layout: &Layout,
    logger: &'a dyn Logger,
    resume: usize,
) -> Result<Script<'a>> {
    let mut script = Script::new(logger, resume);

    add_base(&mut script, kiosk, layout)?;
    add_ssh(&mut script, kiosk, layout)?;
    add_system(&mut script, kiosk)?;
    add_display(&mut script, kiosk, layout)?;
    add_packages_and_swap(&mut script, kiosk)?;

    let kind = kiosk.text(Setting::Type)?;
    if kind == "web-wayland" {
        add_wayland_session(&mut script, kiosk, layout)?;
    } else {
        add_autologin(&mut script, kiosk, layout, &kind)?;
    }

    add_cleanup(&mut script, kiosk, layout)?;
    add_schedules(&mut script, kiosk)?;
    Ok(script)
}

/// Layout for a kiosk user whose home folder is `home`.
pub fn layout_for(home: &Path, kiosk_file: &Path) -> Layout {
    Layout {
        home: home.to_path_buf(),
        kiosk_file: kiosk_file.to_path_buf(),
    }
}
