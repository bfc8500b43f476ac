use super::*;
use crate::builder::BuilderOptions;
use crate::ids::AccountId;
use tempfile::TempDir;

const SCRIPT: &str = r#"
analysis:
  id: a1
  name: Sales Overview
datasets:
  - arn: "arn:ds:orders"
    identifier: orders
  - arn: "arn:ds:customers"
    identifier: customers
steps:
  - op: sheet
    sheet_id: s1
    name: Overview
  - op: visuals
    sheet_id: s1
    visuals:
      - visual_id: v1
        visual_type: bar
        title: Revenue by month
        x_field: order_date
        x_field_type: DATE
        x_dataset_identifier: orders
        x_date_granularity: MONTH
        y_field: revenue
        y_field_type: MEASURE
        y_dataset_identifier: orders
        y_aggregation_function: SUM
        width: 12
        height: 6
  - op: filters
    sheet_id: s1
    filters:
      - filter_id: f1
        column: order_date
        dataset_identifier: orders
        filter_type: TimeRangeFilter
        config:
          time_granularity: MONTH
    controls:
      - control_id: c1
        source_filter_id: f1
        title: Order date
        control_type: DateTimePicker
        config:
          date_time_format: YYYY/MM/DD
          type: DATE_RANGE
    groups:
      - group_id: g1
        dataset_identifier: orders
        filter_ids: [f1]
  - op: layout
    sheet_id: s1
    mode: FREE_FORM
"#;

fn builder() -> AnalysisBuilder {
    AnalysisBuilder::new(
        AnalysisId::new("a1"),
        AccountId::new("123456789012"),
        BuilderOptions::default(),
    )
}

#[test]
fn test_script_runs_every_step() {
    let script = Script::parse(SCRIPT).unwrap();
    assert_eq!(script.analysis.permission, PermissionMode::Select);

    let mut builder = builder();
    let report = script.run(&mut builder);
    assert!(report.is_success(), "{:?}", report.failure);

    let ops: Vec<&str> = report.completed.iter().map(|o| o.op).collect();
    assert_eq!(ops, vec!["setup", "sheet", "visuals", "filters", "layout"]);
    assert!(report.completed[2].message.starts_with("created 1 visual(s) [v1]"));

    assert_eq!(builder.sheet("s1").unwrap().layout_mode(), LayoutMode::FreeForm);
    assert_eq!(builder.filter_group("g1").unwrap().members().len(), 1);
    assert_eq!(builder.sheet("s1").unwrap().controls().len(), 1);

    let document = builder.build_document().unwrap();
    assert_eq!(document.definition.filter_groups.len(), 1);
}

#[test]
fn test_run_stops_at_first_failure() {
    let script = Script::parse(
        r#"
analysis: {id: a1, name: Sales}
datasets:
  - {arn: "arn:ds:orders", identifier: orders}
steps:
  - {op: sheet, sheet_id: s1, name: Overview}
  - {op: title, visual_id: v9, title: Missing}
  - {op: sheet, sheet_id: s2, name: Never}
"#,
    )
    .unwrap();

    let mut builder = builder();
    let report = script.run(&mut builder);
    let failure = report.failure.as_ref().unwrap();
    assert_eq!(failure.index, 2);
    assert_eq!(failure.op, "title");
    assert!(matches!(failure.error, CoreError::NotFound { .. }));
    assert_eq!(report.completed.len(), 2);
    assert!(builder.sheet("s2").is_none());
}

#[test]
fn test_setup_failure_reported() {
    let script = Script::parse("analysis: {id: a1, name: Sales, permission: CREATE}\n").unwrap();
    let mut builder = builder();
    let report = script.run(&mut builder);
    let failure = report.failure.unwrap();
    assert_eq!((failure.index, failure.op), (0, "setup"));
    assert!(report.completed.is_empty());
}

#[test]
fn test_group_mismatch_fails_step() {
    let script = Script::parse(
        r#"
analysis: {id: a1, name: Sales}
datasets:
  - {arn: "arn:ds:orders", identifier: orders}
  - {arn: "arn:ds:customers", identifier: customers}
steps:
  - {op: sheet, sheet_id: s1, name: Overview}
  - op: filters
    sheet_id: s1
    filters:
      - {filter_id: f1, column: region, dataset_identifier: orders, filter_type: CategoryFilter}
      - {filter_id: f2, column: segment, dataset_identifier: customers, filter_type: CategoryFilter}
    groups:
      - {group_id: g1, dataset_identifier: orders, filter_ids: [f1, f2]}
"#,
    )
    .unwrap();

    let mut builder = builder();
    let report = script.run(&mut builder);
    let failure = report.failure.unwrap();
    assert!(matches!(failure.error, CoreError::DatasetMismatch { .. }));
    assert!(builder.filter_group("g1").is_none());
    assert!(builder.filter("f1").is_none());
    assert!(builder.filter("f2").is_none());
}

#[test]
fn test_failed_filters_step_keeps_earlier_steps() {
    let script = Script::parse(
        r#"
analysis: {id: a1, name: Sales}
datasets:
  - {arn: "arn:ds:orders", identifier: orders}
steps:
  - {op: sheet, sheet_id: s1, name: Overview}
  - op: filters
    sheet_id: s1
    filters:
      - {filter_id: f1, column: region, dataset_identifier: orders, filter_type: CategoryFilter}
  - op: filters
    sheet_id: s1
    filters:
      - {filter_id: f2, column: segment, dataset_identifier: orders, filter_type: CategoryFilter}
    controls:
      - {control_id: c1, source_filter_id: f9, title: Missing, control_type: Dropdown}
"#,
    )
    .unwrap();

    let mut builder = builder();
    let report = script.run(&mut builder);
    let failure = report.failure.unwrap();
    assert_eq!((failure.index, failure.op), (3, "filters"));
    assert!(builder.filter("f1").is_some());
    assert!(builder.filter("f2").is_none());
    assert!(builder.filter_control("c1").is_none());
}

#[test]
fn test_place_step() {
    let script = Script::parse(
        r#"
analysis: {id: a1, name: Sales}
datasets:
  - {arn: "arn:ds:orders", identifier: orders}
steps:
  - {op: sheet, sheet_id: s1, name: Overview}
  - op: visuals
    sheet_id: s1
    visuals:
      - visual_id: p1
        visual_type: PIE
        x_field: region
        x_field_type: DIMENSION
        x_dataset_identifier: orders
        y_field: revenue
        y_field_type: MEASURE
        y_dataset_identifier: orders
        width: 6
        height: 6
  - {op: place, sheet_id: s1, visual_id: p1, x: 6, y: 2, width: 8, height: 4}
"#,
    )
    .unwrap();
    let mut builder = builder();
    assert!(script.run(&mut builder).is_success());
    let placement = builder
        .sheet("s1")
        .unwrap()
        .visual_placement(&VisualId::new("p1"))
        .copied()
        .unwrap();
    assert_eq!(placement, GridPlacement::new(6, 2, 8, 4));
}

#[test]
fn test_unknown_op_rejected() {
    assert!(Script::parse("analysis: {id: a1, name: S}\nsteps:\n  - {op: explode}\n").is_err());
}

#[test]
fn test_load_from_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("analysis.yml");
    std::fs::write(&path, SCRIPT).unwrap();
    let script = Script::load(&path).unwrap();
    assert_eq!(script.steps.len(), 4);

    let err = Script::load(&dir.path().join("missing.yml")).unwrap_err();
    assert!(err.to_string().starts_with("[E016]"));
}

#[test]
fn test_blank_step_id_rejected() {
    let err = Script::parse(
        "analysis: {id: a1, name: S}\nsteps:\n  - {op: sheet, sheet_id: \" \", name: Blank}\n",
    )
    .unwrap_err();
    assert!(err.to_string().contains("Sheet id must not be empty"));
}
