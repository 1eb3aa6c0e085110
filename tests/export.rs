#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use tareo::libs::export::{matrix_header, matrix_records, ExportData, ExportFormat, ExportSource, Exporter};
    use tareo::libs::fact::{DailyFact, DayType, Employee, FactTable};
    use tareo::libs::matrix::{build, Matrix};
    use tareo::libs::week::date_range;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    struct ExportTestContext {
        temp_dir: TempDir,
        matrix: Matrix,
        facts: FactTable,
    }

    impl TestContext for ExportTestContext {
        fn setup() -> Self {
            let employees = vec![
                Employee {
                    id: 1,
                    document_number: "40112233".to_string(),
                    name: "Ana Quispe".to_string(),
                    cost_center: Some("CC-10".to_string()),
                    ..Default::default()
                },
                Employee {
                    id: 2,
                    document_number: "70223344".to_string(),
                    name: "Luis Rojas".to_string(),
                    ..Default::default()
                },
            ];
            let mut facts = FactTable::new();
            facts.insert(1, ymd(2024, 1, 5), DailyFact {
                check_in_time: Some("08:00".to_string()),
                check_out_time: Some("17:30".to_string()),
                expected_check_in: Some("07:50".to_string()),
                ..Default::default()
            });
            facts.insert(1, ymd(2024, 1, 8), DailyFact {
                permission_code: Some("VAC".to_string()),
                ..Default::default()
            });
            facts.insert(2, ymd(2024, 1, 6), DailyFact {
                day_type: DayType::Rest,
                ..Default::default()
            });
            let matrix = build(&employees, &date_range(ymd(2024, 1, 5), ymd(2024, 1, 8)), &facts);

            ExportTestContext {
                temp_dir: tempfile::tempdir().unwrap(),
                matrix,
                facts,
            }
        }
    }

    impl ExportTestContext {
        fn source(&self) -> ExportSource<'_> {
            ExportSource {
                matrix: &self.matrix,
                facts: &self.facts,
                standard_workday_hours: 8.0,
            }
        }
    }

    #[test_context(ExportTestContext)]
    #[test]
    fn test_export_matrix_csv(ctx: &mut ExportTestContext) {
        let output_path = ctx.temp_dir.path().join("matrix.csv");
        let exporter = Exporter::new(ExportFormat::Csv, Some(output_path.clone()));
        let written = exporter.export(ExportData::Matrix, &ctx.source()).unwrap();
        assert_eq!(written, output_path);

        let mut reader = csv::Reader::from_path(&output_path).unwrap();
        let header: Vec<String> = reader.headers().unwrap().iter().map(str::to_string).collect();
        assert_eq!(header, matrix_header(&ctx.matrix));
        assert!(header.contains(&"2024-01-05 Entrada".to_string()));
        assert!(header.contains(&"S2 Horas".to_string()));

        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][0], "1");
        assert_eq!(&rows[0][6], "08:00");
        assert_eq!(&rows[0][7], "17:30");

        let last = rows[0].len() - 1;
        assert_eq!(&rows[0][last - 1], "9.50");
        assert_eq!(&rows[0][last], "1.50");
        assert!(rows[1].iter().any(|value| value == "Día de Descanso"));
    }

    #[test_context(ExportTestContext)]
    #[test]
    fn test_export_matrix_json(ctx: &mut ExportTestContext) {
        let output_path = ctx.temp_dir.path().join("matrix.json");
        let exporter = Exporter::new(ExportFormat::Json, Some(output_path.clone()));
        exporter.export(ExportData::Matrix, &ctx.source()).unwrap();

        let content = std::fs::read_to_string(&output_path).unwrap();
        let parsed: Matrix = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed, ctx.matrix);

        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value["rows"][0]["days"][0]["type"], "worked");
        assert_eq!(value["rows"][0]["days"][3]["displayEntry"], "Vacaciones");
        assert_eq!(value["weeks"][1]["weekNumber"], 2);
    }

    #[test_context(ExportTestContext)]
    #[test]
    fn test_export_weekly_csv(ctx: &mut ExportTestContext) {
        let output_path = ctx.temp_dir.path().join("weekly.csv");
        Exporter::new(ExportFormat::Csv, Some(output_path.clone()))
            .export(ExportData::Weekly, &ctx.source())
            .unwrap();

        let content = std::fs::read_to_string(&output_path).unwrap();
        // two weeks plus a period line for each of the two employees
        assert_eq!(content.lines().count(), 1 + 2 * 3);
        assert!(content.contains("Ana Quispe"));
        assert!(content.contains("9:30"));
    }

    #[test_context(ExportTestContext)]
    #[test]
    fn test_export_cost_centers_csv(ctx: &mut ExportTestContext) {
        let output_path = ctx.temp_dir.path().join("cost_centers.csv");
        Exporter::new(ExportFormat::Csv, Some(output_path.clone()))
            .export(ExportData::CostCenter, &ctx.source())
            .unwrap();

        let content = std::fs::read_to_string(&output_path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Centro de Costo,Empleados,S1 Horas"));
        assert!(lines[1].starts_with("CC-10,1,9.50,1.50"));
        assert!(lines[2].starts_with("Sin Centro de Costo,1,0.00"));
    }

    #[test_context(ExportTestContext)]
    #[test]
    fn test_export_markings_json(ctx: &mut ExportTestContext) {
        let output_path = ctx.temp_dir.path().join("markings.json");
        Exporter::new(ExportFormat::Json, Some(output_path.clone()))
            .export(ExportData::Markings, &ctx.source())
            .unwrap();

        let content = std::fs::read_to_string(&output_path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        let lines = value.as_array().unwrap();
        assert_eq!(lines.len(), 2 * 4);
        assert_eq!(lines[0]["lateMinutes"], 10);
        assert_eq!(lines[0]["expectedCheckOut"], "15:50");
        assert_eq!(lines[0]["worked"], "9:30");
    }

    #[test_context(ExportTestContext)]
    #[test]
    fn test_records_align_with_header(ctx: &mut ExportTestContext) {
        let header = matrix_header(&ctx.matrix);
        for record in matrix_records(&ctx.matrix) {
            assert_eq!(record.len(), header.len());
        }
        // 6 identity columns, 2 per date, 2 per week, 2 period totals
        assert_eq!(header.len(), 6 + 2 * 4 + 2 * 2 + 2);
    }
}
