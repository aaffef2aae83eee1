use crate::core::{Dataset, Record, Schema, Storage};
use crate::utils::error::{ReportError, Result};
use crate::utils::validation::validate_delimiter;

pub const DEFAULT_DELIMITER: char = ',';

/// Reads `path` through `storage` and splits it into a header and records.
pub fn load<S: Storage>(storage: &S, path: &str, delimiter: char) -> Result<Dataset> {
    tracing::debug!("Reading input file: {}", path);
    let data = storage.read_file(path)?;
    tracing::debug!("Read {} bytes from {}", data.len(), path);
    parse(&data, delimiter, path)
}

/// Parses delimited text. The first line is the header and must not be
/// blank. Lines end with `\n`, `\r\n` or `\r`; blank data lines are
/// skipped; fields are neither trimmed nor unquoted.
pub fn parse(data: &[u8], delimiter: char, source: &str) -> Result<Dataset> {
    validate_delimiter("delimiter", delimiter)?;

    // csv 會略過空行，首行空白時不能讓第二行頂替標題
    if data.is_empty() || matches!(data[0], b'\n' | b'\r') {
        return Err(ReportError::EmptyInput {
            path: source.to_string(),
        });
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .delimiter(delimiter as u8)
        .quoting(false)
        .flexible(true)
        .from_reader(data);

    let mut rows = reader.records();

    let header = match rows.next() {
        Some(row) => row?,
        None => {
            return Err(ReportError::EmptyInput {
                path: source.to_string(),
            })
        }
    };
    let schema = Schema::new(header.iter().map(str::to_string).collect());

    let mut records = Vec::new();
    for row in rows {
        let row = row?;
        let line = row.position().map(|p| p.line()).unwrap_or(0);

        // 欄位數必須與標題一致，否則欄位會錯位
        if row.len() != schema.len() {
            return Err(ReportError::MalformedRow {
                line,
                expected: schema.len(),
                found: row.len(),
            });
        }

        records.push(Record::new(row.iter().map(str::to_string).collect(), line));
    }

    tracing::debug!(
        "Parsed {} columns and {} records from {}",
        schema.len(),
        records.len(),
        source
    );

    Ok(Dataset { schema, records })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::test_support::MockStorage;

    #[test]
    fn test_load_splits_header_and_records() {
        let storage = MockStorage::with_file(
            "corp.csv",
            "Name;Department;Team;Salary\nAnna;Eng;Backend;1000\nBoris;Sales;Core;800\n",
        );

        let dataset = load(&storage, "corp.csv", ';').unwrap();

        assert_eq!(dataset.schema.columns(), ["Name", "Department", "Team", "Salary"]);
        assert_eq!(dataset.records.len(), 2);
        assert_eq!(dataset.records[0].fields(), ["Anna", "Eng", "Backend", "1000"]);
        assert_eq!(dataset.records[1].get(2), Some("Core"));
        assert_eq!(dataset.records[1].line(), 3);
    }

    #[test]
    fn test_load_rejoin_reproduces_data_lines() {
        let lines = [
            "Department,Team,Salary",
            "Eng,Backend,1000",
            "Eng, Frontend ,1200.5",
            "Sales,\"Core\",800",
            "Support,,0",
        ];
        let content = lines.join("\n") + "\n";

        let dataset = parse(content.as_bytes(), DEFAULT_DELIMITER, "inline").unwrap();

        let rejoined: Vec<String> = dataset
            .records
            .iter()
            .map(|record| record.fields().join(&DEFAULT_DELIMITER.to_string()))
            .collect();
        assert_eq!(rejoined, &lines[1..]);
    }

    #[test]
    fn test_load_handles_crlf_and_blank_lines() {
        let content = "Department;Team\r\nEng;Backend\r\n\r\nSales;Core";

        let dataset = parse(content.as_bytes(), ';', "inline").unwrap();

        assert_eq!(dataset.schema.columns(), ["Department", "Team"]);
        assert_eq!(dataset.records.len(), 2);
        assert_eq!(dataset.records[0].fields(), ["Eng", "Backend"]);
        assert_eq!(dataset.records[1].fields(), ["Sales", "Core"]);
    }

    #[test]
    fn test_load_keeps_non_ascii_fields() {
        let content = "Департамент;Отдел;Оклад\nФинансы;Бухгалтерия;50000\n";

        let dataset = parse(content.as_bytes(), ';', "inline").unwrap();

        assert_eq!(dataset.schema.index_of("Отдел").unwrap(), 1);
        assert_eq!(dataset.records[0].get(0), Some("Финансы"));
    }

    #[test]
    fn test_load_rejects_malformed_row() {
        let content = "Department;Team;Salary\nEng;Backend;1000\nSales;800\n";

        let result = parse(content.as_bytes(), ';', "inline");

        match result {
            Err(ReportError::MalformedRow {
                line,
                expected,
                found,
            }) => {
                assert_eq!(line, 3);
                assert_eq!(expected, 3);
                assert_eq!(found, 2);
            }
            other => panic!("expected MalformedRow, got {:?}", other),
        }
    }

    #[test]
    fn test_load_header_only_file() {
        let dataset = parse(b"Department;Team\n", ';', "inline").unwrap();
        assert_eq!(dataset.schema.len(), 2);
        assert!(dataset.records.is_empty());
    }

    #[test]
    fn test_load_empty_file() {
        let result = parse(b"", ';', "empty.csv");
        assert!(matches!(result, Err(ReportError::EmptyInput { path }) if path == "empty.csv"));
    }

    #[test]
    fn test_load_blank_first_line_is_not_skipped() {
        let result = parse(b"\nDepartment;Team\nEng;Backend\n", ';', "blank.csv");
        assert!(matches!(result, Err(ReportError::EmptyInput { path }) if path == "blank.csv"));

        let result = parse(b"\r\nDepartment;Team\r\n", ';', "blank.csv");
        assert!(matches!(result, Err(ReportError::EmptyInput { .. })));
    }

    #[test]
    fn test_load_missing_file() {
        let storage = MockStorage::new();
        let result = load(&storage, "missing.csv", ';');
        assert!(matches!(result, Err(ReportError::IoError(_))));
    }

    #[test]
    fn test_load_rejects_non_ascii_delimiter() {
        let result = parse(b"a\xc2\xa7b\n", '§', "inline");
        assert!(matches!(
            result,
            Err(ReportError::InvalidConfigValueError { .. })
        ));
    }
}
