//! Field binding: columns attached to a visual axis with a semantic type.
//!
//! [`resolve_field`] is the first half of the field binder. It turns loosely
//! typed input (a semantic type string plus an optional granularity or
//! aggregation keyword) into a typed dimension or measure field, enforcing the
//! per-axis type rules. The per-visual rules live on
//! [`Visual::bind_axis`](crate::visual::Visual::bind_axis).

use crate::error::{CoreError, CoreResult};
use crate::ids::{DatasetIdentifier, VisualId};
use crate::keyword::keyword_enum;
use serde::{Deserialize, Serialize};

keyword_enum! {
    /// How a column participates in a visual
    pub enum SemanticType("semantic type") {
        /// Discrete category
        Dimension => "DIMENSION",
        /// Date or timestamp
        Date => "DATE",
        /// Numeric value to aggregate
        Measure => "MEASURE",
    }
}

keyword_enum! {
    /// Visual axis a field is bound to
    pub enum Axis("axis") {
        /// Category axis (table group-by columns)
        X => "x",
        /// Value axis (table value columns)
        Y => "y",
        /// Color grouping
        Color => "color",
    }
}

keyword_enum! {
    /// Time bucket used for date dimensions and time range filters
    pub enum DateGranularity("date granularity") {
        Year => "YEAR",
        Quarter => "QUARTER",
        Month => "MONTH",
        Week => "WEEK",
        Day => "DAY",
        Hour => "HOUR",
        Minute => "MINUTE",
        Second => "SECOND",
        Millisecond => "MILLISECOND",
    }
}

keyword_enum! {
    /// Aggregation applied to a numeric measure
    pub enum NumericAggregation("aggregation function") {
        Sum => "SUM",
        Average => "AVERAGE",
        Min => "MIN",
        Max => "MAX",
        Count => "COUNT",
        DistinctCount => "DISTINCT_COUNT",
        Var => "VAR",
        Varp => "VARP",
        Stdev => "STDEV",
        Stdevp => "STDEVP",
        Median => "MEDIAN",
    }
}

keyword_enum! {
    /// Aggregation applied to a date used as a measure
    pub enum DateAggregation("date aggregation function") {
        Count => "COUNT",
        DistinctCount => "DISTINCT_COUNT",
        Min => "MIN",
        Max => "MAX",
    }
}

impl Axis {
    /// Semantic types this axis accepts
    pub fn accepted_types(&self) -> &'static [SemanticType] {
        match self {
            Axis::X | Axis::Color => SemanticType::ALL,
            Axis::Y => &[SemanticType::Measure, SemanticType::Date],
        }
    }

    fn accepted_list(&self) -> String {
        self.accepted_types()
            .iter()
            .map(|t| t.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// A dataset column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ColumnRef {
    /// Logical dataset identifier
    #[serde(rename = "DataSetIdentifier")]
    pub dataset: DatasetIdentifier,
    /// Column name as it appears in the dataset
    #[serde(rename = "ColumnName")]
    pub column: String,
}

impl ColumnRef {
    /// Create a column reference
    pub fn new(dataset: DatasetIdentifier, column: impl Into<String>) -> Self {
        Self {
            dataset,
            column: column.into(),
        }
    }
}

/// A field placed on a category or color well
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DimensionField {
    /// Discrete categorical column
    Categorical { field_id: String, column: ColumnRef },
    /// Date column bucketed by granularity
    Date {
        field_id: String,
        column: ColumnRef,
        granularity: Option<DateGranularity>,
    },
    /// Numeric column used as a dimension
    Numerical { field_id: String, column: ColumnRef },
}

impl DimensionField {
    /// True for fields that attribute a category (DIMENSION, or DATE used as a dimension)
    pub fn is_categorical(&self) -> bool {
        matches!(
            self,
            DimensionField::Categorical { .. } | DimensionField::Date { .. }
        )
    }

    /// The bound column
    pub fn column(&self) -> &ColumnRef {
        match self {
            DimensionField::Categorical { column, .. }
            | DimensionField::Date { column, .. }
            | DimensionField::Numerical { column, .. } => column,
        }
    }
}

/// A field placed on a value well
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MeasureField {
    /// Numeric column with an aggregation
    Numerical {
        field_id: String,
        column: ColumnRef,
        aggregation: Option<NumericAggregation>,
    },
    /// Date column counted or min/maxed
    Date {
        field_id: String,
        column: ColumnRef,
        aggregation: Option<DateAggregation>,
    },
}

impl MeasureField {
    /// The bound column
    pub fn column(&self) -> &ColumnRef {
        match self {
            MeasureField::Numerical { column, .. } | MeasureField::Date { column, .. } => column,
        }
    }
}

/// Output of [`resolve_field`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoundField {
    Dimension(DimensionField),
    Measure(MeasureField),
}

impl BoundField {
    /// The bound column
    pub fn column(&self) -> &ColumnRef {
        match self {
            BoundField::Dimension(d) => d.column(),
            BoundField::Measure(m) => m.column(),
        }
    }

    /// True for categorical dimensions
    pub fn is_categorical(&self) -> bool {
        matches!(self, BoundField::Dimension(d) if d.is_categorical())
    }
}

/// Caller input for one axis binding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldInput {
    /// Column name
    pub column: String,
    /// Logical dataset identifier of the column
    pub dataset: DatasetIdentifier,
    /// DIMENSION, DATE or MEASURE (any case)
    pub semantic_type: String,
    /// Date granularity for DATE dimensions, aggregation for measures
    #[serde(default)]
    pub extra: Option<String>,
}

impl FieldInput {
    /// Create an input without granularity or aggregation
    pub fn new(
        column: impl Into<String>,
        dataset: DatasetIdentifier,
        semantic_type: impl Into<String>,
    ) -> Self {
        Self {
            column: column.into(),
            dataset,
            semantic_type: semantic_type.into(),
            extra: None,
        }
    }

    /// Attach a granularity or aggregation keyword
    pub fn with_extra(mut self, extra: impl Into<String>) -> Self {
        self.extra = Some(extra.into());
        self
    }
}

/// Field ids are unique per visual, axis and column.
pub fn field_id(visual: &VisualId, axis: Axis, column: &str) -> String {
    format!("{}.{}.{}", visual, axis, column)
}

/// Validate an axis binding and build the typed field.
pub fn resolve_field(visual: &VisualId, axis: Axis, input: &FieldInput) -> CoreResult<BoundField> {
    let semantic = SemanticType::parse(&input.semantic_type).map_err(|_| invalid_axis(axis, input))?;
    if !axis.accepted_types().contains(&semantic) {
        return Err(invalid_axis(axis, input));
    }
    if input.column.trim().is_empty() {
        return Err(CoreError::InvalidConfiguration {
            kind: VisualId::KIND,
            id: visual.to_string(),
            message: format!("{}-axis column name must not be empty", axis),
        });
    }

    let column = ColumnRef::new(input.dataset.clone(), input.column.clone());
    let field_id = field_id(visual, axis, &input.column);
    let extra = input.extra.as_deref().filter(|e| !e.trim().is_empty());

    let field = match (axis, semantic) {
        (Axis::Y, SemanticType::Measure) => BoundField::Measure(MeasureField::Numerical {
            field_id,
            column,
            aggregation: extra.map(NumericAggregation::parse).transpose()?,
        }),
        (Axis::Y, SemanticType::Date) => BoundField::Measure(MeasureField::Date {
            field_id,
            column,
            aggregation: extra.map(DateAggregation::parse).transpose()?,
        }),
        (Axis::Y, SemanticType::Dimension) => return Err(invalid_axis(axis, input)),
        (_, SemanticType::Dimension) => {
            BoundField::Dimension(DimensionField::Categorical { field_id, column })
        }
        (_, SemanticType::Date) => BoundField::Dimension(DimensionField::Date {
            field_id,
            column,
            granularity: extra.map(DateGranularity::parse).transpose()?,
        }),
        (_, SemanticType::Measure) => {
            if extra.is_some() {
                log::debug!(
                    "Ignoring aggregation on {}-axis measure '{}' of visual '{}'",
                    axis,
                    input.column,
                    visual
                );
            }
            BoundField::Dimension(DimensionField::Numerical { field_id, column })
        }
    };
    Ok(field)
}

fn invalid_axis(axis: Axis, input: &FieldInput) -> CoreError {
    CoreError::InvalidAxisType {
        axis: axis.to_string(),
        field_type: input.semantic_type.to_uppercase(),
        allowed: axis.accepted_list(),
    }
}

#[cfg(test)]
#[path = "field_test.rs"]
mod tests;
