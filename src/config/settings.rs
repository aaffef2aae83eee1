use crate::core::salary::{OutputFormat, DEFAULT_SEPARATOR};
use crate::core::ColumnNames;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_delimiter, validate_non_empty_string, validate_path, Validate,
};

pub const DEFAULT_INPUT_PATH: &str = "Corp_summary.csv";
pub const DEFAULT_OUTPUT_PATH: &str = "result_pivot.csv";
/// The bundled data set is `;`-delimited.
pub const DEFAULT_INPUT_DELIMITER: char = ';';

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportSettings {
    pub input_path: String,
    pub delimiter: char,
    pub columns: ColumnNames,
    pub output_path: String,
    pub separator: char,
    pub output_format: OutputFormat,
    pub verbose: bool,
    pub json_logs: bool,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            input_path: DEFAULT_INPUT_PATH.to_string(),
            delimiter: DEFAULT_INPUT_DELIMITER,
            columns: ColumnNames::default(),
            output_path: DEFAULT_OUTPUT_PATH.to_string(),
            separator: DEFAULT_SEPARATOR,
            output_format: OutputFormat::default(),
            verbose: false,
            json_logs: false,
        }
    }
}

impl Validate for ReportSettings {
    fn validate(&self) -> Result<()> {
        validate_path("input", &self.input_path)?;
        validate_path("output", &self.output_path)?;
        validate_delimiter("delimiter", self.delimiter)?;
        validate_delimiter("separator", self.separator)?;
        validate_non_empty_string("columns.department", &self.columns.department)?;
        validate_non_empty_string("columns.team", &self.columns.team)?;
        validate_non_empty_string("columns.salary", &self.columns.salary)?;
        Ok(())
    }
}
