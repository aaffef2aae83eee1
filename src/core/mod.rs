pub mod engine;
pub mod hierarchy;
pub mod loader;
pub mod salary;

pub use crate::domain::model::{
    format_amount, ColumnNames, Dataset, Grouped, PivotRow, PivotTable, Record, Schema,
    PIVOT_HEADER,
};
pub use crate::domain::ports::Storage;
pub use crate::utils::error::Result;
