pub mod cli;
pub mod settings;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use self::args::CliConfig;

#[cfg(feature = "cli")]
mod args {
    use super::settings::ReportSettings;
    use super::toml_config::ReportConfig;
    use crate::core::engine::Action;
    use crate::core::salary::OutputFormat;
    use crate::utils::error::Result;
    use clap::Parser;

    /// 命令列參數，未指定的值依序取自設定檔與預設值
    #[derive(Debug, Clone, Default, Parser)]
    #[command(name = "dept-report")]
    #[command(about = "Department hierarchy and salary reports from a delimited employee file")]
    pub struct CliConfig {
        /// Employee records file [default: Corp_summary.csv]
        #[arg(short, long)]
        pub input: Option<String>,

        /// Field delimiter of the input file [default: ;]
        #[arg(short, long)]
        pub delimiter: Option<char>,

        /// Where the salary report is saved [default: result_pivot.csv]
        #[arg(short, long)]
        pub output: Option<String>,

        /// Field separator of the saved report [default: ;]
        #[arg(short, long)]
        pub separator: Option<char>,

        /// Format of the saved report
        #[arg(long, value_enum)]
        pub format: Option<OutputFormat>,

        /// Name of the department column [default: Department]
        #[arg(long)]
        pub department_column: Option<String>,

        /// Name of the team column [default: Team]
        #[arg(long)]
        pub team_column: Option<String>,

        /// Name of the salary column [default: Salary]
        #[arg(long)]
        pub salary_column: Option<String>,

        /// Run one action and skip the interactive menu
        #[arg(short, long, value_enum)]
        pub action: Option<Action>,

        /// Path to TOML configuration file
        #[arg(short, long)]
        pub config: Option<String>,

        /// Enable verbose output
        #[arg(short, long)]
        pub verbose: bool,
    }

    impl CliConfig {
        /// 預設值 -> 設定檔 -> 命令列
        pub fn resolve(&self) -> Result<ReportSettings> {
            let mut settings = ReportSettings::default();

            if let Some(path) = &self.config {
                ReportConfig::from_file(path)?.apply_to(&mut settings)?;
            }
            self.apply_to(&mut settings);

            Ok(settings)
        }

        fn apply_to(&self, settings: &mut ReportSettings) {
            if let Some(input) = &self.input {
                settings.input_path = input.clone();
            }
            if let Some(delimiter) = self.delimiter {
                settings.delimiter = delimiter;
            }
            if let Some(output) = &self.output {
                settings.output_path = output.clone();
            }
            if let Some(separator) = self.separator {
                settings.separator = separator;
            }
            if let Some(format) = self.format {
                settings.output_format = format;
            }
            if let Some(department) = &self.department_column {
                settings.columns.department = department.clone();
            }
            if let Some(team) = &self.team_column {
                settings.columns.team = team.clone();
            }
            if let Some(salary) = &self.salary_column {
                settings.columns.salary = salary.clone();
            }
            if self.verbose {
                settings.verbose = true;
            }
        }
    }

}
