use super::*;
use crate::builder::fixtures::ready_builder;

fn orders() -> DatasetIdentifier {
    DatasetIdentifier::new("orders")
}

fn bar_request(visual_id: &str) -> ChartVisualRequest {
    ChartVisualRequest {
        sheet_id: SheetId::new("s1"),
        visual_id: VisualId::new(visual_id),
        visual_type: VisualType::Bar,
        title: Some("Revenue by region".to_string()),
        x: FieldInput::new("region", orders(), "DIMENSION"),
        y: FieldInput::new("revenue", orders(), "MEASURE").with_extra("SUM"),
        color: None,
        placement: GridPlacement::new(0, 0, 12, 8),
    }
}

fn table_fields() -> TableFields {
    TableFields {
        x_fields: vec!["region".into(), "order_date".into()],
        x_field_types: vec!["DIMENSION".into(), "DATE".into()],
        x_dataset: orders(),
        x_date_granularity: Some("MONTH".into()),
        y_fields: vec!["revenue".into(), "units".into()],
        y_field_types: vec!["MEASURE".into(), "MEASURE".into()],
        y_dataset: orders(),
        y_aggregation: Some("SUM".into()),
    }
}

#[test]
fn test_create_visual_selects_same_type() {
    let mut builder = ready_builder();
    builder.create_visual(VisualId::new("v1"), VisualType::Bar).unwrap();
    builder
        .bind_axis("v1", Axis::X, &FieldInput::new("region", orders(), "DIMENSION"))
        .unwrap();

    let visual = builder.create_visual(VisualId::new("v1"), VisualType::Bar).unwrap();
    assert_eq!(visual.category().len(), 1);
}

#[test]
fn test_create_visual_rejects_type_change() {
    let mut builder = ready_builder();
    builder.create_visual(VisualId::new("v1"), VisualType::Bar).unwrap();
    let err = builder
        .create_visual(VisualId::new("v1"), VisualType::Pie)
        .unwrap_err();
    assert!(matches!(err, CoreError::ConflictingId { .. }));
    assert_eq!(builder.visual("v1").unwrap().visual_type(), VisualType::Bar);
}

#[test]
fn test_bind_axis_unknown_visual() {
    let mut builder = ready_builder();
    let err = builder
        .bind_axis("missing", Axis::X, &FieldInput::new("region", orders(), "DIMENSION"))
        .unwrap_err();
    assert!(err.to_string().contains("[V004]"));
}

#[test]
fn test_configure_chart_places_on_sheet() {
    let mut builder = ready_builder();
    builder.configure_chart_visual(&bar_request("v1")).unwrap();

    let visual = builder.visual("v1").unwrap();
    assert_eq!(visual.sheet().map(|s| s.as_str()), Some("s1"));
    assert_eq!(visual.title().unwrap().text, "Revenue by region");

    let sheet = builder.sheet("s1").unwrap();
    assert_eq!(sheet.visuals().len(), 1);
    assert_eq!(
        sheet.visual_placement(&VisualId::new("v1")),
        Some(&GridPlacement::new(0, 0, 12, 8))
    );
}

#[test]
fn test_configure_chart_with_dimension_on_y_is_rejected() {
    let mut builder = ready_builder();
    let mut request = bar_request("v1");
    request.y = FieldInput::new("region", orders(), "DIMENSION");

    let err = builder.configure_chart_visual(&request).unwrap_err();
    match err {
        CoreError::InvalidAxisType { axis, .. } => assert_eq!(axis, "y"),
        other => panic!("unexpected error: {}", other),
    }
    assert!(builder.visual("v1").is_none());
    assert!(builder.sheet("s1").unwrap().visuals().is_empty());
}

#[test]
fn test_configure_chart_rejects_table_type() {
    let mut builder = ready_builder();
    let mut request = bar_request("v1");
    request.visual_type = VisualType::Table;
    let err = builder.configure_chart_visual(&request).unwrap_err();
    assert!(matches!(err, CoreError::InvalidConfiguration { .. }));
}

#[test]
fn test_configure_chart_rejects_bad_placement() {
    let mut builder = ready_builder();
    let mut request = bar_request("v1");
    request.placement = GridPlacement::new(0, 0, 30, 8);
    let err = builder.configure_chart_visual(&request).unwrap_err();
    assert!(matches!(err, CoreError::LayoutOutOfRange { .. }));
    assert!(builder.visual("v1").is_none());
}

#[test]
fn test_reconfigure_replaces_wells_and_placement() {
    let mut builder = ready_builder();
    builder.configure_chart_visual(&bar_request("v1")).unwrap();

    let mut request = bar_request("v1");
    request.x = FieldInput::new("country", orders(), "DIMENSION");
    request.placement = GridPlacement::new(12, 0, 12, 8);
    builder.configure_chart_visual(&request).unwrap();

    let visual = builder.visual("v1").unwrap();
    assert_eq!(visual.category()[0].column().column, "country");
    let sheet = builder.sheet("s1").unwrap();
    assert_eq!(sheet.visuals().len(), 1);
    assert_eq!(
        sheet.visual_placement(&VisualId::new("v1")).map(|p| p.x),
        Some(12)
    );
}

#[test]
fn test_configure_chart_on_second_sheet_is_rejected() {
    let mut builder = ready_builder();
    builder.configure_chart_visual(&bar_request("v1")).unwrap();
    builder
        .create_or_select_sheet(SheetId::new("s2"), "Details")
        .unwrap();

    let mut request = bar_request("v1");
    request.sheet_id = SheetId::new("s2");
    let err = builder.configure_chart_visual(&request).unwrap_err();
    assert!(matches!(err, CoreError::AlreadyPlaced { .. }));
    assert!(builder.sheet("s2").unwrap().visuals().is_empty());
}

#[test]
fn test_configure_table_binds_lists_in_order() {
    let mut builder = ready_builder();
    let request = TableVisualRequest {
        sheet_id: SheetId::new("s1"),
        visual_id: VisualId::new("t1"),
        title: None,
        fields: table_fields(),
        placement: GridPlacement::new(0, 8, 24, 10),
    };
    builder.configure_table_visual(&request).unwrap();

    let visual = builder.visual("t1").unwrap();
    let group_by: Vec<&str> = visual
        .category()
        .iter()
        .map(|f| f.column().column.as_str())
        .collect();
    assert_eq!(group_by, vec!["region", "order_date"]);
    assert_eq!(visual.values().len(), 2);
    assert!(visual.title().is_none());
}

#[test]
fn test_bind_table_fields_length_mismatch_changes_nothing() {
    let mut builder = ready_builder();
    builder.create_visual(VisualId::new("t1"), VisualType::Table).unwrap();

    let mut fields = table_fields();
    fields.y_field_types.pop();
    let err = builder.bind_table_fields("t1", &fields).unwrap_err();
    match err {
        CoreError::FieldListMismatch {
            axis, fields, types, ..
        } => {
            assert_eq!(axis, "y");
            assert_eq!((fields, types), (2, 1));
        }
        other => panic!("unexpected error: {}", other),
    }
    assert!(builder.visual("t1").unwrap().category().is_empty());
}

#[test]
fn test_bind_table_fields_is_all_or_nothing() {
    let mut builder = ready_builder();
    builder.create_visual(VisualId::new("t1"), VisualType::Table).unwrap();

    let mut fields = table_fields();
    fields.y_field_types = vec!["MEASURE".into(), "DIMENSION".into()];
    assert!(builder.bind_table_fields("t1", &fields).is_err());

    let visual = builder.visual("t1").unwrap();
    assert!(visual.category().is_empty());
    assert!(visual.values().is_empty());
}

#[test]
fn test_bind_table_fields_rejects_chart() {
    let mut builder = ready_builder();
    builder.create_visual(VisualId::new("v1"), VisualType::Bar).unwrap();
    let err = builder.bind_table_fields("v1", &table_fields()).unwrap_err();
    assert!(matches!(err, CoreError::InvalidConfiguration { .. }));
}

#[test]
fn test_set_visual_title() {
    let mut builder = ready_builder();
    builder.create_visual(VisualId::new("v1"), VisualType::Pie).unwrap();
    builder
        .set_visual_title("v1", "Share", Visibility::Hidden)
        .unwrap();
    let title = builder.visual("v1").unwrap().title().unwrap();
    assert_eq!(title.text, "Share");
    assert_eq!(title.visibility, Visibility::Hidden);

    assert!(builder
        .set_visual_title("nope", "Share", Visibility::Visible)
        .is_err());
}
