//! Output formatting for `--output`.
//!
//! Lists render as a rounded `tabled` table, one label per line (plain),
//! or serde JSON/YAML. Single records render as one line of text or one
//! JSON document, so `watch` output stays line-delimited.

use std::io::{self, IsTerminal, Write};

use serde::Serialize;
use tabled::{Table, Tabled, settings::Style};

use crate::cli::{ColorMode, OutputFormat};

/// Whether to emit ANSI colors. `NO_COLOR` only disables `auto`.
pub fn should_color(mode: &ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none(),
    }
}

/// Render a list. `to_row` feeds the table, `label` feeds plain output.
pub fn render_list<T, R>(
    format: &OutputFormat,
    data: &[T],
    to_row: impl Fn(&T) -> R,
    label: impl Fn(&T) -> String,
) -> String
where
    T: Serialize,
    R: Tabled,
{
    match format {
        OutputFormat::Table if data.is_empty() => String::new(),
        OutputFormat::Table => Table::new(data.iter().map(to_row))
            .with(Style::rounded())
            .to_string(),
        OutputFormat::Plain => data.iter().map(label).collect::<Vec<_>>().join("\n"),
        structured => render_structured(structured, data),
    }
}

/// Render one record: `text_fn` for table/plain, compact JSON for both JSON
/// formats, a `---`-prefixed document for YAML.
pub fn render_event<T: Serialize>(
    format: &OutputFormat,
    data: &T,
    text_fn: impl Fn(&T) -> String,
) -> String {
    match format {
        OutputFormat::Table | OutputFormat::Plain => text_fn(data),
        OutputFormat::Json | OutputFormat::JsonCompact => {
            render_structured(&OutputFormat::JsonCompact, data)
        }
        OutputFormat::Yaml => format!("---\n{}", render_structured(format, data)),
    }
}

/// Write `output` plus a newline to stdout unless quiet or empty.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let _ = writeln!(io::stdout().lock(), "{output}");
}

fn render_structured<T: Serialize + ?Sized>(format: &OutputFormat, data: &T) -> String {
    let rendered = match format {
        OutputFormat::JsonCompact => serde_json::to_string(data).map_err(|e| e.to_string()),
        OutputFormat::Yaml => serde_yaml::to_string(data).map_err(|e| e.to_string()),
        _ => serde_json::to_string_pretty(data).map_err(|e| e.to_string()),
    };
    rendered.unwrap_or_else(|e| format!("serialization failed: {e}"))
}
