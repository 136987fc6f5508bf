use crate::error::{Error, Result};
use crate::scoring::SponsorEffectiveness;
use serde::Serialize;

/// How rows are written to stdout or a file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// One JSON object per line
    JsonLines,
    /// A single pretty-printed JSON document
    Json,
    /// Fixed-width text table
    Table,
}

impl OutputFormat {
    pub fn parse(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "jsonl" => Ok(OutputFormat::JsonLines),
            "json" => Ok(OutputFormat::Json),
            "table" => Ok(OutputFormat::Table),
            other => Err(Error::Config(format!(
                "Invalid format '{}'. Allowed values are: jsonl, json, table",
                other
            ))),
        }
    }
}

/// Serialize rows as JSON lines
pub fn to_json_lines<T: Serialize>(rows: &[T]) -> Result<String> {
    let mut out = String::new();
    for row in rows {
        out.push_str(&serde_json::to_string(row)?);
        out.push('\n');
    }
    Ok(out)
}

/// Render the effectiveness table as aligned text
pub fn render_table(rows: &[SponsorEffectiveness]) -> String {
    let headers = [
        "sponsor",
        "bill",
        "aic",
        "pass",
        "pass_other_house",
        "law",
        "spons_house",
        "spons_party",
        "score",
    ];

    let cells: Vec<[String; 9]> = rows
        .iter()
        .map(|row| {
            [
                row.sponsor.clone(),
                row.counts.bill.to_string(),
                row.counts.aic.to_string(),
                row.counts.pass.to_string(),
                row.counts.pass_other_house.to_string(),
                row.counts.law.to_string(),
                row.spons_house.clone().unwrap_or_else(|| "-".to_string()),
                row.spons_party.clone().unwrap_or_else(|| "-".to_string()),
                format!("{:.4}", row.score),
            ]
        })
        .collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in &cells {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let mut write_line = |values: Vec<&str>| {
        let line: Vec<String> = values
            .iter()
            .enumerate()
            .map(|(i, v)| {
                // Text columns left-aligned, numbers right-aligned
                if i == 0 || i == 6 || i == 7 {
                    format!("{:<width$}", v, width = widths[i])
                } else {
                    format!("{:>width$}", v, width = widths[i])
                }
            })
            .collect();
        out.push_str(line.join("  ").trim_end());
        out.push('\n');
    };

    write_line(headers.to_vec());
    for row in &cells {
        write_line(row.iter().map(String::as_str).collect());
    }
    out
}

/// Render sponsor rows in the requested format
pub fn render_sponsors(rows: &[SponsorEffectiveness], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::JsonLines => to_json_lines(rows),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(rows)? + "\n"),
        OutputFormat::Table => Ok(render_table(rows)),
    }
}
