use crate::config::settings::ReportSettings;
use crate::core::salary::OutputFormat;
use crate::utils::error::{ReportError, Result};
use crate::utils::validation::{validate_delimiter, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Optional TOML configuration file. Every section and key may be omitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReportConfig {
    pub input: Option<InputConfig>,
    pub columns: Option<ColumnsConfig>,
    pub output: Option<OutputConfig>,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InputConfig {
    pub path: Option<String>,
    pub delimiter: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ColumnsConfig {
    pub department: Option<String>,
    pub team: Option<String>,
    pub salary: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    pub path: Option<String>,
    pub separator: Option<String>,
    pub format: Option<OutputFormat>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    pub verbose: Option<bool>,
    pub json: Option<bool>,
}

impl ReportConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ReportError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ReportError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${DATA_DIR})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ReportError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 將檔案中有設定的值覆蓋到 `settings`
    pub fn apply_to(&self, settings: &mut ReportSettings) -> Result<()> {
        if let Some(input) = &self.input {
            if let Some(path) = &input.path {
                settings.input_path = path.clone();
            }
            if let Some(delimiter) = &input.delimiter {
                settings.delimiter = single_char("input.delimiter", delimiter)?;
            }
        }

        if let Some(columns) = &self.columns {
            if let Some(department) = &columns.department {
                settings.columns.department = department.clone();
            }
            if let Some(team) = &columns.team {
                settings.columns.team = team.clone();
            }
            if let Some(salary) = &columns.salary {
                settings.columns.salary = salary.clone();
            }
        }

        if let Some(output) = &self.output {
            if let Some(path) = &output.path {
                settings.output_path = path.clone();
            }
            if let Some(separator) = &output.separator {
                settings.separator = single_char("output.separator", separator)?;
            }
            if let Some(format) = output.format {
                settings.output_format = format;
            }
        }

        if let Some(logging) = &self.logging {
            if let Some(verbose) = logging.verbose {
                settings.verbose = verbose;
            }
            if let Some(json) = logging.json {
                settings.json_logs = json;
            }
        }

        Ok(())
    }
}

impl Validate for ReportConfig {
    fn validate(&self) -> Result<()> {
        let mut settings = ReportSettings::default();
        self.apply_to(&mut settings)?;
        settings.validate()
    }
}

fn single_char(field: &str, value: &str) -> Result<char> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => {
            validate_delimiter(field, c)?;
            Ok(c)
        }
        _ => Err(ReportError::InvalidConfigValueError {
            field: field.to_string(),
            value: value.to_string(),
            reason: "Expected exactly one character".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_toml_config() {
        let toml_content = r#"
[input]
path = "data/Corp_summary.csv"
delimiter = ","

[columns]
department = "Департамент"
team = "Отдел"
salary = "Оклад"

[output]
path = "out/pivot.json"
separator = "\t"
format = "json"

[logging]
verbose = true
"#;

        let config = ReportConfig::from_toml_str(toml_content).unwrap();
        let mut settings = ReportSettings::default();
        config.apply_to(&mut settings).unwrap();

        assert_eq!(settings.input_path, "data/Corp_summary.csv");
        assert_eq!(settings.delimiter, ',');
        assert_eq!(settings.columns.team, "Отдел");
        assert_eq!(settings.output_path, "out/pivot.json");
        assert_eq!(settings.separator, '\t');
        assert_eq!(settings.output_format, OutputFormat::Json);
        assert!(settings.verbose);
        assert!(!settings.json_logs);
    }

    #[test]
    fn test_empty_config_keeps_defaults() {
        let config = ReportConfig::from_toml_str("").unwrap();
        let mut settings = ReportSettings::default();
        config.apply_to(&mut settings).unwrap();

        assert_eq!(settings, ReportSettings::default());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("DEPT_REPORT_TEST_DIR", "/srv/hr");

        let toml_content = r#"
[input]
path = "${DEPT_REPORT_TEST_DIR}/Corp_summary.csv"

[output]
path = "${DEPT_REPORT_TEST_UNSET}/pivot.csv"
"#;

        let config = ReportConfig::from_toml_str(toml_content).unwrap();
        let input = config.input.unwrap();
        assert_eq!(input.path.as_deref(), Some("/srv/hr/Corp_summary.csv"));
        let output = config.output.unwrap();
        assert_eq!(
            output.path.as_deref(),
            Some("${DEPT_REPORT_TEST_UNSET}/pivot.csv")
        );

        std::env::remove_var("DEPT_REPORT_TEST_DIR");
    }

    #[test]
    fn test_config_validation() {
        let config = ReportConfig::from_toml_str("[input]\ndelimiter = \";;\"\n").unwrap();
        assert!(matches!(
            config.validate(),
            Err(ReportError::InvalidConfigValueError { field, .. }) if field == "input.delimiter"
        ));

        let config = ReportConfig::from_toml_str("[output]\nformat = \"xml\"\n");
        assert!(matches!(
            config,
            Err(ReportError::ConfigValidationError { .. })
        ));

        let config = ReportConfig::from_toml_str("[input]\nencoding = \"cp1251\"\n");
        assert!(config.is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[output]\npath = \"file-test.csv\"\n")
            .unwrap();

        let config = ReportConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(
            config.output.unwrap().path.as_deref(),
            Some("file-test.csv")
        );
    }

    #[test]
    fn test_config_from_missing_file() {
        let result = ReportConfig::from_file("/nonexistent/dept-report.toml");
        assert!(matches!(result, Err(ReportError::IoError(_))));
    }
}
