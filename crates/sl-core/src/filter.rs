//! Filters and their per-variant configuration.

use crate::document::{
    CategoryFilterConfiguration, CategoryFilterDefinition, FilterDefinition,
    FilterListConfiguration, TimeRangeFilterDefinition,
};
use crate::error::{CoreError, CoreResult};
use crate::field::{ColumnRef, DateGranularity};
use crate::ids::{DatasetIdentifier, FilterId};
use crate::keyword::keyword_enum;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

keyword_enum! {
    /// Filter variant
    pub enum FilterType("filter type") {
        Category => "CategoryFilter",
        TimeRange => "TimeRangeFilter",
    }
}

keyword_enum! {
    /// Match operator of a category filter list
    pub enum MatchOperator("match operator") {
        Equals => "EQUALS",
        DoesNotEqual => "DOES_NOT_EQUAL",
        Contains => "CONTAINS",
        DoesNotContain => "DOES_NOT_CONTAIN",
        StartsWith => "STARTS_WITH",
        EndsWith => "ENDS_WITH",
    }
}

keyword_enum! {
    /// Null handling of a filter
    pub enum NullOption("null option") {
        AllValues => "ALL_VALUES",
        NullsOnly => "NULLS_ONLY",
        NonNullsOnly => "NON_NULLS_ONLY",
    }
}

/// Wire value of `SelectAllOptions` on a category filter
pub const FILTER_ALL_VALUES: &str = "FILTER_ALL_VALUES";

/// Lower or upper bound of a time range filter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RangeBound {
    /// Fixed timestamp
    StaticValue(DateTime<Utc>),
    /// Name of an analysis parameter
    Parameter(String),
    /// Rolling date expression
    RollingDate {
        #[serde(rename = "Expression")]
        expression: String,
    },
}

impl RangeBound {
    fn from_timestamp(secs: i64) -> Self {
        RangeBound::StaticValue(DateTime::from_timestamp(secs, 0).unwrap_or_default())
    }

    /// 2001-01-01T00:00:00Z
    pub fn default_minimum() -> Self {
        Self::from_timestamp(978_307_200)
    }

    /// 2030-01-01T00:00:00Z
    pub fn default_maximum() -> Self {
        Self::from_timestamp(1_893_456_000)
    }
}

/// Configuration of a `CategoryFilter`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CategoryFilterConfig {
    /// Defaults to CONTAINS
    pub match_operator: MatchOperator,
    /// Values matched by the operator
    pub category_values: Vec<String>,
    /// Emit `SelectAllOptions = FILTER_ALL_VALUES`
    pub select_all: bool,
    pub null_option: Option<NullOption>,
}

impl Default for CategoryFilterConfig {
    fn default() -> Self {
        Self {
            match_operator: MatchOperator::Contains,
            category_values: Vec::new(),
            select_all: false,
            null_option: None,
        }
    }
}

/// Configuration of a `TimeRangeFilter`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TimeRangeFilterConfig {
    /// Defaults to ALL_VALUES
    pub null_option: NullOption,
    #[serde(alias = "min_value_parameter")]
    pub range_minimum: RangeBound,
    #[serde(alias = "max_value_parameter")]
    pub range_maximum: RangeBound,
    /// Defaults to DAY
    pub time_granularity: DateGranularity,
    pub include_minimum: Option<bool>,
    pub include_maximum: Option<bool>,
}

impl Default for TimeRangeFilterConfig {
    fn default() -> Self {
        Self {
            null_option: NullOption::AllValues,
            range_minimum: RangeBound::default_minimum(),
            range_maximum: RangeBound::default_maximum(),
            time_granularity: DateGranularity::Day,
            include_minimum: None,
            include_maximum: None,
        }
    }
}

/// Per-variant filter configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterConfig {
    Category(CategoryFilterConfig),
    TimeRange(TimeRangeFilterConfig),
}

impl FilterConfig {
    /// Build a configuration from a type keyword and an optional loose object.
    ///
    /// A missing or null object yields the variant defaults.
    pub fn from_parts(
        filter_type: &str,
        config: Option<serde_json::Value>,
        id: &FilterId,
    ) -> CoreResult<Self> {
        let filter_type = FilterType::parse(filter_type)?;
        let config = config.filter(|v| !v.is_null());
        let invalid = |e: serde_json::Error| CoreError::InvalidConfiguration {
            kind: FilterId::KIND,
            id: id.to_string(),
            message: e.to_string(),
        };

        let parsed = match (filter_type, config) {
            (FilterType::Category, None) => FilterConfig::Category(CategoryFilterConfig::default()),
            (FilterType::Category, Some(v)) => {
                FilterConfig::Category(serde_json::from_value(v).map_err(invalid)?)
            }
            (FilterType::TimeRange, None) => {
                FilterConfig::TimeRange(TimeRangeFilterConfig::default())
            }
            (FilterType::TimeRange, Some(v)) => {
                FilterConfig::TimeRange(serde_json::from_value(v).map_err(invalid)?)
            }
        };
        parsed.validate(id)?;
        Ok(parsed)
    }

    /// Variant keyword
    pub fn filter_type(&self) -> FilterType {
        match self {
            FilterConfig::Category(_) => FilterType::Category,
            FilterConfig::TimeRange(_) => FilterType::TimeRange,
        }
    }

    fn validate(&self, id: &FilterId) -> CoreResult<()> {
        if let FilterConfig::TimeRange(cfg) = self {
            if let (RangeBound::StaticValue(min), RangeBound::StaticValue(max)) =
                (&cfg.range_minimum, &cfg.range_maximum)
            {
                if min > max {
                    return Err(CoreError::InvalidConfiguration {
                        kind: FilterId::KIND,
                        id: id.to_string(),
                        message: format!("range minimum {} is after maximum {}", min, max),
                    });
                }
            }
        }
        Ok(())
    }
}

/// A predicate over one dataset column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    id: FilterId,
    column: ColumnRef,
    config: FilterConfig,
}

impl Filter {
    pub fn new(id: FilterId, column: ColumnRef, config: FilterConfig) -> Self {
        Self { id, column, config }
    }

    pub fn id(&self) -> &FilterId {
        &self.id
    }

    pub fn column(&self) -> &ColumnRef {
        &self.column
    }

    /// Logical dataset the filter reads from
    pub fn dataset(&self) -> &DatasetIdentifier {
        &self.column.dataset
    }

    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    pub fn to_definition(&self) -> FilterDefinition {
        match &self.config {
            FilterConfig::Category(cfg) => FilterDefinition::CategoryFilter(CategoryFilterDefinition {
                filter_id: self.id.to_string(),
                column: self.column.clone(),
                configuration: CategoryFilterConfiguration {
                    filter_list_configuration: FilterListConfiguration {
                        match_operator: cfg.match_operator,
                        category_values: cfg.category_values.clone(),
                        select_all_options: cfg.select_all.then(|| FILTER_ALL_VALUES.to_string()),
                        null_option: cfg.null_option,
                    },
                },
            }),
            FilterConfig::TimeRange(cfg) => {
                FilterDefinition::TimeRangeFilter(TimeRangeFilterDefinition {
                    filter_id: self.id.to_string(),
                    column: self.column.clone(),
                    null_option: cfg.null_option,
                    include_minimum: cfg.include_minimum,
                    include_maximum: cfg.include_maximum,
                    range_minimum_value: cfg.range_minimum.clone(),
                    range_maximum_value: cfg.range_maximum.clone(),
                    time_granularity: cfg.time_granularity,
                })
            }
        }
    }
}

#[cfg(test)]
#[path = "filter_test.rs"]
mod tests;
