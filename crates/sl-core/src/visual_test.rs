use super::*;
use crate::ids::DatasetIdentifier;

fn orders() -> DatasetIdentifier {
    DatasetIdentifier::new("orders")
}

fn input(column: &str, semantic_type: &str) -> FieldInput {
    FieldInput::new(column, orders(), semantic_type)
}

#[test]
fn test_visual_type_capabilities() {
    assert!(VisualType::Bar.supports(Axis::Color));
    assert!(VisualType::Line.supports(Axis::Color));
    assert!(!VisualType::Pie.supports(Axis::Color));
    assert!(!VisualType::Table.supports(Axis::Color));
    assert!(VisualType::Table.is_multi_field());
    assert!(VisualType::Pie.is_chart());
}

#[test]
fn test_bar_binds_each_axis() {
    let mut visual = Visual::new(VisualId::new("v1"), VisualType::Bar);
    visual.bind_axis(Axis::X, &input("region", "DIMENSION")).unwrap();
    visual
        .bind_axis(Axis::Y, &input("revenue", "MEASURE").with_extra("SUM"))
        .unwrap();
    visual.bind_axis(Axis::Color, &input("units", "MEASURE")).unwrap();

    assert_eq!(visual.category().len(), 1);
    assert_eq!(visual.values().len(), 1);
    assert_eq!(visual.colors().len(), 1);
}

#[test]
fn test_chart_rebind_replaces_slot() {
    let mut visual = Visual::new(VisualId::new("v1"), VisualType::Line);
    visual.bind_axis(Axis::X, &input("region", "DIMENSION")).unwrap();
    visual.bind_axis(Axis::X, &input("country", "DIMENSION")).unwrap();
    assert_eq!(visual.category().len(), 1);
    assert_eq!(visual.category()[0].column().column, "country");
}

#[test]
fn test_second_categorical_rejected_on_color() {
    let mut visual = Visual::new(VisualId::new("v1"), VisualType::Bar);
    visual.bind_axis(Axis::X, &input("region", "DIMENSION")).unwrap();
    let before = visual.clone();

    let err = visual
        .bind_axis(Axis::Color, &input("order_date", "DATE"))
        .unwrap_err();
    match err {
        CoreError::CategoryConflict { axis, existing, .. } => {
            assert_eq!(axis, "color");
            assert_eq!(existing, "x");
        }
        other => panic!("unexpected error: {}", other),
    }
    assert_eq!(visual, before);
}

#[test]
fn test_categorical_color_blocks_categorical_x() {
    let mut visual = Visual::new(VisualId::new("v1"), VisualType::Bar);
    visual.bind_axis(Axis::Color, &input("segment", "DIMENSION")).unwrap();
    let err = visual.bind_axis(Axis::X, &input("region", "DIMENSION")).unwrap_err();
    assert!(matches!(err, CoreError::CategoryConflict { .. }));

    // A measure on x is not categorical
    visual.bind_axis(Axis::X, &input("units", "MEASURE")).unwrap();
}

#[test]
fn test_pie_has_no_color_axis() {
    let mut visual = Visual::new(VisualId::new("p1"), VisualType::Pie);
    let err = visual
        .bind_axis(Axis::Color, &input("segment", "DIMENSION"))
        .unwrap_err();
    assert!(matches!(err, CoreError::UnsupportedAxis { .. }));
    assert!(err.to_string().contains("[V011]"));
}

#[test]
fn test_table_appends_and_rejects_duplicates() {
    let mut visual = Visual::new(VisualId::new("t1"), VisualType::Table);
    visual.bind_axis(Axis::X, &input("region", "DIMENSION")).unwrap();
    visual.bind_axis(Axis::X, &input("units", "MEASURE")).unwrap();
    visual.bind_axis(Axis::Y, &input("revenue", "MEASURE")).unwrap();
    visual.bind_axis(Axis::Y, &input("profit", "MEASURE")).unwrap();
    assert_eq!(visual.category().len(), 2);
    assert_eq!(visual.values().len(), 2);

    let err = visual.bind_axis(Axis::Y, &input("revenue", "MEASURE")).unwrap_err();
    assert!(matches!(err, CoreError::DuplicateField { .. }));
    assert_eq!(visual.values().len(), 2);
}

#[test]
fn test_bar_definition_shape() {
    let mut visual = Visual::new(VisualId::new("v1"), VisualType::Bar);
    visual.bind_axis(Axis::X, &input("region", "DIMENSION")).unwrap();
    visual
        .bind_axis(Axis::Y, &input("revenue", "MEASURE").with_extra("SUM"))
        .unwrap();
    visual.set_title("Revenue by region", Visibility::Visible);

    let json = serde_json::to_value(visual.to_definition()).unwrap();
    let bar = &json["BarChartVisual"];
    assert_eq!(bar["VisualId"], "v1");
    assert_eq!(bar["Title"]["FormatText"]["PlainText"], "Revenue by region");
    assert_eq!(bar["ChartConfiguration"]["Orientation"], "VERTICAL");
    assert_eq!(bar["ChartConfiguration"]["BarsArrangement"], "CLUSTERED");

    let wells = &bar["ChartConfiguration"]["FieldWells"]["BarChartAggregatedFieldWells"];
    let category = &wells["Category"][0]["CategoricalDimensionField"];
    assert_eq!(category["FieldId"], "v1.x.region");
    assert_eq!(category["Column"]["DataSetIdentifier"], "orders");
    assert_eq!(category["Column"]["ColumnName"], "region");
    let value = &wells["Values"][0]["NumericalMeasureField"];
    assert_eq!(
        value["AggregationFunction"]["SimpleNumericalAggregation"],
        "SUM"
    );
    assert!(wells.get("Colors").is_none());
}

#[test]
fn test_line_and_table_definition_shape() {
    let mut line = Visual::new(VisualId::new("l1"), VisualType::Line);
    line.bind_axis(Axis::X, &input("order_date", "DATE").with_extra("MONTH"))
        .unwrap();
    let json = serde_json::to_value(line.to_definition()).unwrap();
    assert_eq!(json["LineChartVisual"]["ChartConfiguration"]["Type"], "LINE");
    let date = &json["LineChartVisual"]["ChartConfiguration"]["FieldWells"]
        ["LineChartAggregatedFieldWells"]["Category"][0]["DateDimensionField"];
    assert_eq!(date["DateGranularity"], "MONTH");

    let mut table = Visual::new(VisualId::new("t1"), VisualType::Table);
    table.bind_axis(Axis::X, &input("region", "DIMENSION")).unwrap();
    let json = serde_json::to_value(table.to_definition()).unwrap();
    let wells = &json["TableVisual"]["ChartConfiguration"]["FieldWells"]["TableAggregatedFieldWells"];
    assert_eq!(wells["GroupBy"].as_array().unwrap().len(), 1);
    assert!(json["TableVisual"].get("Title").is_none());
}
