use crate::utils::error::{ReportError, Result};
use serde::Serialize;
use std::collections::HashMap;

/// Ordered column names of the input file. Reporters locate fields only
/// through [`Schema::index_of`], so the column order of the source is free.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    columns: Vec<String>,
}

impl Schema {
    pub fn new(columns: Vec<String>) -> Self {
        Self { columns }
    }

    pub fn index_of(&self, name: &str) -> Result<usize> {
        self.columns
            .iter()
            .position(|column| column == name)
            .ok_or_else(|| ReportError::ColumnNotFound {
                column: name.to_string(),
            })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// One data line of the input, split into fields aligned with the [`Schema`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    fields: Vec<String>,
    line: u64,
}

impl Record {
    pub fn new(fields: Vec<String>, line: u64) -> Self {
        Self { fields, line }
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(String::as_str)
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// 1-based line number in the source file.
    pub fn line(&self) -> u64 {
        self.line
    }
}

#[derive(Debug, Clone)]
pub struct Dataset {
    pub schema: Schema,
    pub records: Vec<Record>,
}

/// Names of the columns the reports read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnNames {
    pub department: String,
    pub team: String,
    pub salary: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            department: "Department".to_string(),
            team: "Team".to_string(),
            salary: "Salary".to_string(),
        }
    }
}

/// Map keyed by department name that iterates in first-insertion order.
#[derive(Debug, Clone)]
pub struct Grouped<V> {
    entries: Vec<(String, V)>,
    index: HashMap<String, usize>,
}

impl<V> Grouped<V> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.index.get(key).map(|&i| &self.entries[i].1)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V: Default> Grouped<V> {
    /// Returns the value for `key`, inserting `V::default()` at the end if absent.
    pub fn entry_or_default(&mut self, key: &str) -> &mut V {
        let i = match self.index.get(key) {
            Some(&i) => i,
            None => {
                let i = self.entries.len();
                self.entries.push((key.to_string(), V::default()));
                self.index.insert(key.to_string(), i);
                i
            }
        };
        &mut self.entries[i].1
    }
}

impl<V> Default for Grouped<V> {
    fn default() -> Self {
        Self::new()
    }
}

pub const PIVOT_HEADER: [&str; 4] = ["Department", "EmployeeCount", "SalaryRange", "AverageSalary"];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PivotRow {
    pub department: String,
    pub employee_count: usize,
    pub min_salary: f64,
    pub max_salary: f64,
    pub average_salary: f64,
}

impl PivotRow {
    pub fn salary_range(&self) -> String {
        format!(
            "{}-{}",
            format_amount(self.min_salary),
            format_amount(self.max_salary)
        )
    }

    pub fn to_fields(&self) -> [String; 4] {
        [
            self.department.clone(),
            self.employee_count.to_string(),
            self.salary_range(),
            format_amount(self.average_salary),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PivotTable {
    pub rows: Vec<PivotRow>,
}

impl PivotTable {
    /// Header row followed by one row per department.
    pub fn to_rows(&self) -> Vec<[String; 4]> {
        let mut rows = Vec::with_capacity(self.rows.len() + 1);
        rows.push(PIVOT_HEADER.map(String::from));
        rows.extend(self.rows.iter().map(PivotRow::to_fields));
        rows
    }
}

/// Shortest round-trip form that always keeps a fractional part:
/// `1000.0`, `100.5`, `0.1`.
pub fn format_amount(value: f64) -> String {
    format!("{:?}", value)
}
