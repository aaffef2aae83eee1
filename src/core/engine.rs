use crate::config::settings::ReportSettings;
use crate::core::salary::{self, Destination};
use crate::core::{hierarchy, loader, Dataset, Storage};
use crate::utils::error::Result;
use std::fmt;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum Action {
    /// Print the department -> team hierarchy
    Hierarchy,
    /// Print the department salary report
    Pivot,
    /// Save the department salary report to the output file
    Save,
    /// Do nothing
    Exit,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::Hierarchy => "hierarchy",
            Action::Pivot => "pivot",
            Action::Save => "save",
            Action::Exit => "exit",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Printed { lines: usize },
    Saved { path: String, rows: usize },
    Exited,
}

pub struct ReportEngine<S: Storage> {
    storage: S,
    settings: ReportSettings,
}

impl<S: Storage> ReportEngine<S> {
    pub fn new(storage: S, settings: ReportSettings) -> Self {
        Self { storage, settings }
    }

    pub fn settings(&self) -> &ReportSettings {
        &self.settings
    }

    pub fn load_dataset(&self) -> Result<Dataset> {
        tracing::info!("📥 Loading records from {}", self.settings.input_path);
        let dataset = loader::load(
            &self.storage,
            &self.settings.input_path,
            self.settings.delimiter,
        )?;
        tracing::info!(
            "Loaded {} records ({} columns)",
            dataset.records.len(),
            dataset.schema.len()
        );
        Ok(dataset)
    }

    /// Runs one report over `dataset`. Groupings are rebuilt on every call.
    pub fn execute<W: Write>(
        &self,
        dataset: &Dataset,
        action: Action,
        out: &mut W,
    ) -> Result<Outcome> {
        tracing::debug!("Executing action: {}", action);
        let columns = &self.settings.columns;

        match action {
            Action::Hierarchy => {
                let teams = hierarchy::build_hierarchy(&dataset.schema, &dataset.records, columns)?;
                let lines = hierarchy::render(&teams);
                for line in &lines {
                    writeln!(out, "{}", line)?;
                }
                out.flush()?;
                Ok(Outcome::Printed { lines: lines.len() })
            }
            Action::Pivot => {
                let groups = salary::build_salary_groups(&dataset.schema, &dataset.records, columns)?;
                let pivot = salary::build_pivot(&groups);
                let lines = salary::emit(&pivot, &Destination::Display, &self.storage, out)?;
                Ok(Outcome::Printed { lines })
            }
            Action::Save => {
                let groups = salary::build_salary_groups(&dataset.schema, &dataset.records, columns)?;
                let pivot = salary::build_pivot(&groups);
                let destination = Destination::File {
                    path: self.settings.output_path.clone(),
                    separator: self.settings.separator,
                    format: self.settings.output_format,
                };
                let rows = salary::emit(&pivot, &destination, &self.storage, out)?;
                tracing::info!("💾 Saved {} departments to {}", rows, self.settings.output_path);
                Ok(Outcome::Saved {
                    path: self.settings.output_path.clone(),
                    rows,
                })
            }
            Action::Exit => Ok(Outcome::Exited),
        }
    }
}
