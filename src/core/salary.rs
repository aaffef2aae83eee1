use crate::core::{
    ColumnNames, Grouped, PivotRow, PivotTable, Record, Schema, Storage, PIVOT_HEADER,
};
use crate::utils::error::{ReportError, Result};
use crate::utils::validation::validate_delimiter;
use serde::{Deserialize, Serialize};
use std::io::Write;

pub const DEFAULT_SEPARATOR: char = ';';
pub const DISPLAY_COLUMN_WIDTH: usize = 25;

/// Department name -> one salary per record, departments in first-seen order.
pub type SalaryGroups = Grouped<Vec<f64>>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Rows joined by the separator, header first
    #[default]
    Delimited,
    /// Pretty-printed JSON array of pivot rows
    Json,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Destination {
    Display,
    File {
        path: String,
        separator: char,
        format: OutputFormat,
    },
}

pub fn build_salary_groups(
    schema: &Schema,
    records: &[Record],
    columns: &ColumnNames,
) -> Result<SalaryGroups> {
    let department_index = schema.index_of(&columns.department)?;
    let salary_index = schema.index_of(&columns.salary)?;

    let mut groups = SalaryGroups::new();
    for record in records {
        let department = record.get(department_index).unwrap_or_default();
        let salary = parse_salary(record, salary_index)?;
        groups.entry_or_default(department).push(salary);
    }

    tracing::debug!("Grouped salaries into {} departments", groups.len());
    Ok(groups)
}

fn parse_salary(record: &Record, index: usize) -> Result<f64> {
    let raw = record.get(index).unwrap_or_default();
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(ReportError::InvalidSalary {
            line: record.line(),
            value: raw.to_string(),
        }),
    }
}

pub fn build_pivot(groups: &SalaryGroups) -> PivotTable {
    let rows = groups
        .iter()
        .map(|(department, salaries)| {
            let min_salary = salaries.iter().copied().fold(f64::INFINITY, f64::min);
            let max_salary = salaries.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            let average = salaries.iter().sum::<f64>() / salaries.len() as f64;

            PivotRow {
                department: department.to_string(),
                employee_count: salaries.len(),
                min_salary,
                max_salary,
                average_salary: round_cents(average),
            }
        })
        .collect();

    PivotTable { rows }
}

/// Rounds the exact binary value to 2 decimals, so `2.675` (stored as
/// `2.67499...`) becomes `2.67`.
pub fn round_cents(value: f64) -> f64 {
    format!("{:.2}", value).parse().unwrap_or(value)
}

/// Fixed-width table, one line per row, header first.
pub fn render_table(pivot: &PivotTable) -> Vec<String> {
    let width = DISPLAY_COLUMN_WIDTH;
    pivot
        .to_rows()
        .iter()
        .map(|[department, count, range, average]| {
            format!(
                "{:<width$} {:<width$} {:<width$} {:<width$}",
                department, count, range, average
            )
        })
        .collect()
}

pub fn render_delimited(pivot: &PivotTable, separator: char) -> Result<Vec<u8>> {
    validate_delimiter("separator", separator)?;

    let mut writer = csv::WriterBuilder::new()
        .delimiter(separator as u8)
        .quote_style(csv::QuoteStyle::Never)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    for row in pivot.to_rows() {
        writer.write_record(&row)?;
    }

    writer
        .into_inner()
        .map_err(|e| ReportError::IoError(e.into_error()))
}

pub fn render_json(pivot: &PivotTable) -> Result<Vec<u8>> {
    let mut data = serde_json::to_vec_pretty(&pivot.rows)?;
    data.push(b'\n');
    Ok(data)
}

/// Prints the pivot to `out` or saves it through `storage`.
/// Returns the number of lines printed, or the number of data rows saved.
pub fn emit<S: Storage, W: Write>(
    pivot: &PivotTable,
    destination: &Destination,
    storage: &S,
    out: &mut W,
) -> Result<usize> {
    match destination {
        Destination::Display => {
            let lines = render_table(pivot);
            for line in &lines {
                writeln!(out, "{}", line)?;
            }
            out.flush()?;
            Ok(lines.len())
        }
        Destination::File {
            path,
            separator,
            format,
        } => {
            let data = match format {
                OutputFormat::Delimited => render_delimited(pivot, *separator)?,
                OutputFormat::Json => render_json(pivot)?,
            };
            tracing::debug!(
                "Writing {} bytes ({:?}, columns: {}) to {}",
                data.len(),
                format,
                PIVOT_HEADER.join(","),
                path
            );
            storage.write_file(path, &data)?;
            Ok(pivot.rows.len())
        }
    }
}
