use crate::Context;
use crate::commands::load_kiosk;
use crate::error::AppError;
use crate::kiosk::Kiosk;
use crate::ui;
use anyhow::{Context as _, Result};
use dialoguer::{Confirm, Input, Select};
use fields::FieldKind;
use std::io::IsTerminal;
use std::path::Path;

/// What the user picked in the main menu.
#[derive(Debug, PartialEq, Eq)]
enum MenuChoice {
    Field(usize),
    Save,
    Quit,
}

fn menu_items(kiosk: &Kiosk) -> Vec<String> {
    let mut items: Vec<String> = kiosk
        .fields()
        .iter()
        .map(|field| {
            let value = if crate::kiosk::is_secret(field) {
                fields::REDACTED.to_string()
            } else {
                field.text()
            };
            let marker = if field.is_edited() { "*" } else { " " };
            format!("{marker} {:<18} {value}", field.name())
        })
        .collect();
    items.push("Save changes".to_string());
    items.push("Quit".to_string());
    items
}

fn menu_choice(index: usize, field_count: usize) -> MenuChoice {
    if index < field_count {
        MenuChoice::Field(index)
    } else if index == field_count {
        MenuChoice::Save
    } else {
        MenuChoice::Quit
    }
}

/// Options offered for a field with a closed set of values.
fn fixed_options(kind: &FieldKind) -> Option<Vec<String>> {
    match kind {
        FieldKind::Boolean => Some(vec!["true".to_string(), "false".to_string()]),
        FieldKind::Choice { choices } => Some(choices.clone()),
        _ => None,
    }
}

fn edit_field(kiosk: &mut Kiosk, index: usize) -> Result<()> {
    let Some(field) = kiosk.fields().iter().nth(index) else {
        return Ok(());
    };
    let name = field.name().to_string();
    let current = field.text();

    ui::section(&format!("{name} ({})", field.description()));
    for line in field.hint().lines() {
        ui::hint(line);
    }
    println!();

    let raw = match fixed_options(field.kind()) {
        Some(options) => {
            let default = options.iter().position(|o| *o == current).unwrap_or(0);
            let picked = Select::new()
                .with_prompt(&name)
                .items(&options)
                .default(default)
                .interact()
                .context("Failed to read selection")?;
            options[picked].clone()
        }
        None => Input::<String>::new()
            .with_prompt(&name)
            .with_initial_text(&current)
            .allow_empty(true)
            .interact_text()
            .context("Failed to read value")?,
    };

    match kiosk.assign(&name, &raw) {
        Ok(()) => ui::success(&format!("{name} = {}", kiosk.fields().get(&name)?.text())),
        Err(e) => ui::error(&e.to_string()),
    }
    Ok(())
}

pub fn run(ctx: &Context, path: &Path) -> Result<()> {
    if !std::io::stdin().is_terminal() {
        return Err(AppError::Kiosk("Interactive editing requires a terminal".into()).into());
    }

    let mut kiosk = load_kiosk(ctx, path)?;
    let field_count = kiosk.fields().len();
    let mut selected = 0;

    loop {
        ui::banner(&ctx.version);
        ui::header(&path.display().to_string());
        let index = Select::new()
            .with_prompt("Select a setting to change")
            .items(&menu_items(&kiosk))
            .default(selected)
            .max_length(20)
            .interact()
            .context("Failed to read selection")?;
        selected = index;

        match menu_choice(index, field_count) {
            MenuChoice::Field(field) => edit_field(&mut kiosk, field)?,
            MenuChoice::Save => {
                kiosk.save(path)?;
                ui::success(&format!("Saved {}", path.display()));
            }
            MenuChoice::Quit => {
                if !kiosk.is_edited() {
                    return Ok(());
                }
                let discard = Confirm::new()
                    .with_prompt(discard_prompt(&kiosk))
                    .default(false)
                    .interact()
                    .context("Failed to read confirmation")?;
                if discard {
                    ui::warn("Changes discarded");
                    return Ok(());
                }
            }
        }
    }
}

fn discard_prompt(kiosk: &Kiosk) -> String {
    format!(
        "Discard unsaved changes to {}?",
        kiosk.fields().edited_names().join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kiosk() -> Kiosk {
        Kiosk::new(crate::version::current()).unwrap()
    }

    #[test]
    fn test_menu_choice() {
        assert_eq!(menu_choice(0, 31), MenuChoice::Field(0));
        assert_eq!(menu_choice(30, 31), MenuChoice::Field(30));
        assert_eq!(menu_choice(31, 31), MenuChoice::Save);
        assert_eq!(menu_choice(32, 31), MenuChoice::Quit);
    }

    #[test]
    fn test_menu_items_mark_edits_and_mask_passwords() {
        let mut kiosk = kiosk();
        kiosk.assign("swap_size", "2").unwrap();
        let items = menu_items(&kiosk);

        assert_eq!(items.len(), kiosk.fields().len() + 2);
        let swap = items.iter().find(|i| i.contains("swap_size")).unwrap();
        assert!(swap.starts_with('*'));
        let code = items.iter().find(|i| i.contains("user_code")).unwrap();
        assert!(code.ends_with(fields::REDACTED));
    }

    #[test]
    fn test_discard_prompt_names_edited_fields() {
        let mut kiosk = kiosk();
        kiosk.assign("mouse", "true").unwrap();
        kiosk.assign("swap_size", "2").unwrap();
        assert_eq!(
            discard_prompt(&kiosk),
            "Discard unsaved changes to mouse, swap_size?"
        );
    }

    #[test]
    fn test_fixed_options() {
        assert_eq!(
            fixed_options(&FieldKind::Boolean),
            Some(vec!["true".to_string(), "false".to_string()])
        );
        assert_eq!(
            fixed_options(&FieldKind::choice(["pi4b", "pi5"])),
            Some(vec!["pi4b".to_string(), "pi5".to_string()])
        );
        assert_eq!(fixed_options(&FieldKind::natural(0, 10)), None);
    }
}
