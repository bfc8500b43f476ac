//! Shared test builders

use sl_core::{AccountId, AnalysisBuilder, AnalysisId, BuilderOptions, Script};

pub(crate) const SALES_SCRIPT: &str = r#"
analysis: {id: a1, name: Sales Overview}
datasets:
  - {arn: "arn:ds:orders", identifier: orders}
steps:
  - {op: sheet, sheet_id: s1, name: Overview}
  - op: visuals
    sheet_id: s1
    visuals:
      - visual_id: v1
        visual_type: BAR
        x_field: region
        x_field_type: DIMENSION
        x_dataset_identifier: orders
        y_field: revenue
        y_field_type: MEASURE
        y_dataset_identifier: orders
        width: 12
        height: 6
"#;

pub(crate) fn empty_builder() -> AnalysisBuilder {
    AnalysisBuilder::new(
        AnalysisId::new("a1"),
        AccountId::new("123456789012"),
        BuilderOptions::default(),
    )
}

/// Builder with an analysis, one dataset, one sheet and one bar chart
pub(crate) fn sales_builder() -> AnalysisBuilder {
    let mut builder = empty_builder();
    let report = Script::parse(SALES_SCRIPT).unwrap().run(&mut builder);
    assert!(report.is_success(), "{:?}", report.failure);
    builder
}
