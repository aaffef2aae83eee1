use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Input file '{path}' has no header line")]
    EmptyInput { path: String },

    #[error("Column '{column}' not found in header")]
    ColumnNotFound { column: String },

    #[error("Line {line}: expected {expected} fields, found {found}")]
    MalformedRow {
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("Line {line}: invalid salary value '{value}'")]
    InvalidSalary { line: u64, value: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Data,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ReportError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ReportError::IoError(_) => ErrorCategory::Io,
            ReportError::CsvError(e) if e.is_io_error() => ErrorCategory::Io,
            ReportError::CsvError(_)
            | ReportError::SerializationError(_)
            | ReportError::EmptyInput { .. }
            | ReportError::ColumnNotFound { .. }
            | ReportError::MalformedRow { .. }
            | ReportError::InvalidSalary { .. } => ErrorCategory::Data,
            ReportError::ConfigError { .. }
            | ReportError::ConfigValidationError { .. }
            | ReportError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Io => ErrorSeverity::Critical,
            ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::Medium,
        }
    }

    /// 給使用者的修正建議
    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ReportError::IoError(_) => "Check that the file exists and that its directory is readable/writable",
            ReportError::CsvError(_) => "Make sure the input file is UTF-8 encoded text",
            ReportError::SerializationError(_) => "Try the delimited output format instead",
            ReportError::EmptyInput { .. } => "The first line of the input file must list the column names",
            ReportError::ColumnNotFound { .. } => {
                "Check the header of the input file or pass the column name with --department-column/--team-column/--salary-column"
            }
            ReportError::MalformedRow { .. } => {
                "Every line must have as many fields as the header; check the --delimiter setting"
            }
            ReportError::InvalidSalary { .. } => "Salary values must be plain numbers such as 1200 or 1200.50",
            ReportError::ConfigError { .. }
            | ReportError::ConfigValidationError { .. }
            | ReportError::InvalidConfigValueError { .. } => "Review the command line flags and the TOML configuration file",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ReportError::IoError(e) => format!("Could not access file: {}", e),
            ReportError::ColumnNotFound { column } => {
                format!("The input file has no '{}' column", column)
            }
            ReportError::InvalidSalary { line, value } => {
                format!("Salary '{}' on line {} is not a number", value, line)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ReportError>;
