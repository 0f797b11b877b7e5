//! # Wiki Table Renderer
//!
//! Turns a [`RunInfo`] into a markdown page holding an HTML table, suitable
//! for an Azure DevOps wiki. The raw run is embedded as JSON in a trailing
//! comment so the page can be reprocessed later.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use scorecard_core::RunInfo;
use scorecard_core::output::ScoreBand;
use scorecard_core::text::{LINE_BREAK, escape_html};
use tracing::info;

const AUTOGENERATION_NOTICE: &str = "<!-- !!! THIS FILE IS AUTOGENERATED - DO NOT EDIT IT MANUALLY !!! -->";
const USAGE_HINT: &str = "Hover over entries to show details like full service paths and score justifications.";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const HEADER_CELL: &str = "th";
const DATA_CELL: &str = "td";

/// One table cell; `content` is already HTML
struct Cell {
  content: String,
  colspan: usize,
}

impl Cell {
  fn new(content: impl Into<String>) -> Self {
    Self::spanning(content, 1)
  }

  fn spanning(content: impl Into<String>, colspan: usize) -> Self {
    Self {
      content: content.into(),
      colspan,
    }
  }
}

/// Builds table rows, alternating their background
struct TableWriter {
  rows: Vec<String>,
  row_index: usize,
}

impl TableWriter {
  fn new() -> Self {
    // The first row is index 2 so header rows land on the shaded, sticky styles
    Self {
      rows: Vec::new(),
      row_index: 1,
    }
  }

  fn row(&mut self, element: &str, cells: Vec<Cell>) {
    self.row_index += 1;
    let background = if self.row_index % 2 == 0 {
      "background-color: rgba(0, 0, 0, 0.5);"
    } else {
      ""
    };
    let style = cell_style(self.row_index, element);

    let cells: String = cells
      .into_iter()
      .map(|cell| {
        format!(
          "<{element} style=\"{style}\" colspan=\"{}\">{}</{element}>",
          cell.colspan, cell.content
        )
      })
      .collect();

    self.rows.push(format!("<tr style=\"{background}\">{cells}</tr>"));
  }

  fn finish(self) -> String {
    let mut table = String::from("<table style=\"height: 40vh\">");
    for row in self.rows {
      table.push('\n');
      table.push_str(&row);
    }
    table.push_str("</table>");
    table
  }
}

fn cell_style(row_index: usize, element: &str) -> String {
  let mut style = String::new();
  if row_index <= 3 {
    style.push_str("background-color: rgba(var(--palette-neutral-2),1);");
  }
  if element == HEADER_CELL {
    style.push_str("position: sticky; top: -2px;");
  }
  if row_index == 2 {
    style.push_str("top: 2.6em;");
  }
  style
}

fn colorize(score: u32, title: Option<&str>) -> String {
  let color = ScoreBand::of(score).css_color();
  match title {
    Some(title) => format!("<span style=\"color:{color}\" title=\"{title}\">{score}</span>"),
    None => format!("<span style=\"color:{color}\">{score}</span>"),
  }
}

/// Last component of a service path, without extension
fn display_name(service_path: &str) -> &str {
  Path::new(service_path)
    .file_stem()
    .and_then(|stem| stem.to_str())
    .unwrap_or(service_path)
}

/// Render the scorecard page for `run_info`
pub fn render(run_info: &RunInfo, generated_at: NaiveDateTime) -> Result<String> {
  let mut table = TableWriter::new();

  let mut group_cells = vec![Cell::new("   ")];
  group_cells.extend(
    run_info
      .groups()
      .iter()
      .filter(|group| !group.checks.is_empty())
      .map(|group| Cell::spanning(escape_html(&group.name), group.checks.len())),
  );
  group_cells.push(Cell::new("   "));
  table.row(HEADER_CELL, group_cells);

  let mut header_cells = vec![Cell::new("ServiceName")];
  header_cells.extend(run_info.checks().map(|check| {
    Cell::new(format!(
      "<span title=\"{}\">{}</span>",
      escape_html(&check.description),
      escape_html(&check.name)
    ))
  }));
  header_cells.push(Cell::new("Average"));
  table.row(HEADER_CELL, header_cells);

  for (service_path, scorecard) in run_info.service_scores() {
    let mut cells = vec![Cell::new(format!(
      "<span title=\"{}\">{}</span>",
      escape_html(service_path),
      escape_html(display_name(service_path))
    ))];

    for check in run_info.checks() {
      let content = match (scorecard.score_for(&check.name), scorecard.deductions_for(&check.name)) {
        (Some(score), Some(deductions)) => {
          let justification = deductions
            .iter()
            .map(|deduction| escape_html(deduction.message()))
            .collect::<Vec<_>>()
            .join(LINE_BREAK);
          colorize(score, Some(&justification))
        }
        _ => "-".to_string(),
      };
      cells.push(Cell::new(content));
    }

    cells.push(Cell::new(colorize(scorecard.average(), None)));
    table.row(DATA_CELL, cells);
  }

  let run_json = serde_json::to_string(run_info).context("Failed to serialize run info")?;
  let generated_at = generated_at.format(TIMESTAMP_FORMAT);

  info!("Generated scorecard at {generated_at}");

  Ok(format!(
    "{AUTOGENERATION_NOTICE}\n{AUTOGENERATION_NOTICE}\n{AUTOGENERATION_NOTICE}\n\n{USAGE_HINT}\n\n{}\n\nScorecard generated at: \
     {generated_at}\n\n<!-- {} -->\n",
    table.finish(),
    run_json.replace("-->", "--\\u003e")
  ))
}

/// Write a rendered report, creating parent directories as needed
pub fn write_report(path: &Path, contents: &str) -> Result<()> {
  if let Some(parent) = path.parent()
    && !parent.as_os_str().is_empty()
  {
    fs::create_dir_all(parent).with_context(|| format!("Failed to create directory {}", parent.display()))?;
  }

  fs::write(path, contents).with_context(|| format!("Failed to write report to {}", path.display()))
}
