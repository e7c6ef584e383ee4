//! Writer for the flat kiosk file format.
//!
//! Every field is preceded by a comment block holding its type description
//! and help text, so the file documents itself for people editing it by hand.

use crate::field::Field;
use crate::set::Fields;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write kiosk file content to a file.
pub fn write_file(fields: &Fields, path: &Path) -> std::io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(write_string(fields).as_bytes())?;
    writer.flush()
}

/// Write kiosk file content to a string.
pub fn write_string(fields: &Fields) -> String {
    let version = fields.version();
    let mut output = String::new();

    output.push_str(&format!(
        "# {} v{} kiosk definition file.\n",
        version.product, version.version
    ));
    output.push_str("# Please edit this file using your favorite text editor such as Notepad.\n");
    output.push('\n');

    for field in fields.iter() {
        write_field(&mut output, field);
    }

    output
}

/// Write a single field with its comment block.
fn write_field(output: &mut String, field: &Field) {
    let rule = format!("#{}\n", "*".repeat(78));

    output.push_str(&rule);
    output.push_str(&format!(
        "# Option '{}' ({}):\n",
        field.name(),
        field.description()
    ));
    output.push_str("#\n");
    for line in field.hint().lines() {
        let line = line.trim_end();
        if line.is_empty() {
            output.push_str("#\n");
        } else {
            output.push_str(&format!("# {line}\n"));
        }
    }
    output.push_str(&rule);
    output.push_str(&format!("{}={}\n", field.name(), field.text()));
    output.push('\n');
}
