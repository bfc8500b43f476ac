use super::*;

fn orders() -> DatasetIdentifier {
    DatasetIdentifier::new("orders")
}

fn visual() -> VisualId {
    VisualId::new("v1")
}

#[test]
fn test_semantic_type_parse_is_case_insensitive() {
    assert_eq!(SemanticType::parse("measure").unwrap(), SemanticType::Measure);
    assert_eq!(SemanticType::parse(" Date ").unwrap(), SemanticType::Date);
    assert!(SemanticType::parse("METRIC").is_err());
}

#[test]
fn test_x_axis_date_becomes_date_dimension() {
    let input = FieldInput::new("order_date", orders(), "date").with_extra("month");
    let field = resolve_field(&visual(), Axis::X, &input).unwrap();
    match field {
        BoundField::Dimension(DimensionField::Date {
            field_id,
            granularity,
            column,
        }) => {
            assert_eq!(field_id, "v1.x.order_date");
            assert_eq!(granularity, Some(DateGranularity::Month));
            assert_eq!(column.dataset, "orders");
        }
        other => panic!("unexpected field: {:?}", other),
    }
}

#[test]
fn test_x_axis_measure_becomes_numerical_dimension() {
    let input = FieldInput::new("quantity", orders(), "MEASURE");
    let field = resolve_field(&visual(), Axis::X, &input).unwrap();
    assert!(matches!(
        field,
        BoundField::Dimension(DimensionField::Numerical { .. })
    ));
    assert!(!field.is_categorical());
}

#[test]
fn test_y_axis_rejects_dimension() {
    let input = FieldInput::new("region", orders(), "DIMENSION");
    let err = resolve_field(&visual(), Axis::Y, &input).unwrap_err();
    assert!(err.is_validation());
    match err {
        CoreError::InvalidAxisType { axis, field_type, .. } => {
            assert_eq!(axis, "y");
            assert_eq!(field_type, "DIMENSION");
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_unknown_type_names_axis() {
    let input = FieldInput::new("region", orders(), "category");
    let err = resolve_field(&visual(), Axis::Color, &input).unwrap_err();
    assert!(err.to_string().contains("color-axis"));
}

#[test]
fn test_y_axis_measure_aggregation() {
    let input = FieldInput::new("revenue", orders(), "MEASURE").with_extra("sum");
    let field = resolve_field(&visual(), Axis::Y, &input).unwrap();
    assert_eq!(
        field,
        BoundField::Measure(MeasureField::Numerical {
            field_id: "v1.y.revenue".to_string(),
            column: ColumnRef::new(orders(), "revenue"),
            aggregation: Some(NumericAggregation::Sum),
        })
    );
}

#[test]
fn test_y_axis_date_limits_aggregation() {
    let ok = FieldInput::new("shipped_at", orders(), "DATE").with_extra("DISTINCT_COUNT");
    assert!(resolve_field(&visual(), Axis::Y, &ok).is_ok());

    let bad = FieldInput::new("shipped_at", orders(), "DATE").with_extra("SUM");
    let err = resolve_field(&visual(), Axis::Y, &bad).unwrap_err();
    assert!(matches!(err, CoreError::UnknownValue { .. }));
}

#[test]
fn test_unknown_granularity_rejected() {
    let input = FieldInput::new("order_date", orders(), "DATE").with_extra("FORTNIGHT");
    assert!(resolve_field(&visual(), Axis::X, &input).is_err());
}

#[test]
fn test_blank_extra_is_ignored() {
    let input = FieldInput::new("order_date", orders(), "DATE").with_extra("  ");
    let field = resolve_field(&visual(), Axis::X, &input).unwrap();
    assert!(matches!(
        field,
        BoundField::Dimension(DimensionField::Date {
            granularity: None,
            ..
        })
    ));
}

#[test]
fn test_empty_column_rejected() {
    let input = FieldInput::new("", orders(), "DIMENSION");
    assert!(resolve_field(&visual(), Axis::X, &input).is_err());
}
