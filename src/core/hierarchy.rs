use crate::core::{ColumnNames, Grouped, Record, Schema};
use crate::utils::error::Result;

/// Department name -> distinct team names, both in first-seen order.
pub type TeamHierarchy = Grouped<Vec<String>>;

pub fn build_hierarchy(
    schema: &Schema,
    records: &[Record],
    columns: &ColumnNames,
) -> Result<TeamHierarchy> {
    // 以欄位名稱找位置，來源檔欄位順序可任意
    let department_index = schema.index_of(&columns.department)?;
    let team_index = schema.index_of(&columns.team)?;

    let mut hierarchy = TeamHierarchy::new();
    for record in records {
        let department = record.get(department_index).unwrap_or_default();
        let team = record.get(team_index).unwrap_or_default();

        let teams = hierarchy.entry_or_default(department);
        if !teams.iter().any(|known| known == team) {
            teams.push(team.to_string());
        }
    }

    tracing::debug!("Grouped teams into {} departments", hierarchy.len());
    Ok(hierarchy)
}

pub fn render(hierarchy: &TeamHierarchy) -> Vec<String> {
    hierarchy
        .iter()
        .map(|(department, teams)| {
            format!(
                "Department '{}' includes teams - {}",
                department,
                teams.join(", ")
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::ReportError;

    fn schema(columns: &[&str]) -> Schema {
        Schema::new(columns.iter().map(|c| c.to_string()).collect())
    }

    fn records(rows: &[&[&str]]) -> Vec<Record> {
        rows.iter()
            .enumerate()
            .map(|(i, row)| {
                Record::new(row.iter().map(|f| f.to_string()).collect(), i as u64 + 2)
            })
            .collect()
    }

    #[test]
    fn test_build_hierarchy_dedupes_teams_in_first_seen_order() {
        let schema = schema(&["Department", "Team"]);
        let records = records(&[&["A", "T1"], &["A", "T2"], &["A", "T1"]]);

        let hierarchy = build_hierarchy(&schema, &records, &ColumnNames::default()).unwrap();

        assert_eq!(hierarchy.len(), 1);
        assert_eq!(hierarchy.get("A").unwrap(), &["T1", "T2"]);
    }

    #[test]
    fn test_build_hierarchy_each_department_once() {
        let schema = schema(&["Team", "Name", "Department"]);
        let records = records(&[
            &["Core", "Ivan", "Sales"],
            &["Backend", "Anna", "Eng"],
            &["Core", "Olga", "Sales"],
            &["Frontend", "Petr", "Eng"],
            &["Core", "Lena", "Eng"],
        ]);

        let hierarchy = build_hierarchy(&schema, &records, &ColumnNames::default()).unwrap();

        let departments: Vec<&str> = hierarchy.keys().collect();
        assert_eq!(departments, vec!["Sales", "Eng"]);
        assert_eq!(hierarchy.get("Sales").unwrap(), &["Core"]);
        assert_eq!(hierarchy.get("Eng").unwrap(), &["Backend", "Frontend", "Core"]);
    }

    #[test]
    fn test_render_hierarchy() {
        let schema = schema(&["Department", "Team", "Salary"]);
        let records = records(&[
            &["Eng", "Backend", "1000"],
            &["Eng", "Frontend", "1200"],
            &["Sales", "Core", "800"],
        ]);

        let hierarchy = build_hierarchy(&schema, &records, &ColumnNames::default()).unwrap();
        let lines = render(&hierarchy);

        assert_eq!(
            lines,
            vec![
                "Department 'Eng' includes teams - Backend, Frontend",
                "Department 'Sales' includes teams - Core",
            ]
        );
    }

    #[test]
    fn test_build_hierarchy_missing_column() {
        let schema = schema(&["Department", "Salary"]);
        let records = records(&[&["Eng", "1000"]]);

        let result = build_hierarchy(&schema, &records, &ColumnNames::default());

        assert!(matches!(
            result,
            Err(ReportError::ColumnNotFound { column }) if column == "Team"
        ));
    }

    #[test]
    fn test_build_hierarchy_custom_column_names() {
        let schema = schema(&["Департамент", "Отдел"]);
        let records = records(&[&["Финансы", "Бухгалтерия"], &["Финансы", "Аудит"]]);
        let columns = ColumnNames {
            department: "Департамент".to_string(),
            team: "Отдел".to_string(),
            salary: "Оклад".to_string(),
        };

        let hierarchy = build_hierarchy(&schema, &records, &columns).unwrap();

        assert_eq!(
            render(&hierarchy),
            vec!["Department 'Финансы' includes teams - Бухгалтерия, Аудит"]
        );
    }
}
