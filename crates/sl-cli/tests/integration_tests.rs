//! Integration tests for Sightline

use sl_core::builder::VisualRequest;
use sl_core::document::{
    DimensionFieldDefinition, FieldWells, LayoutConfiguration, VisualDefinition,
};
use sl_core::{
    AccountId, AnalysisBuilder, AnalysisId, BuilderRegistry, Config, CoreError, Script,
    ServiceType, VisualSpec,
};
use sl_render::{AuditWriter, Compiler, InMemoryRenderingService, RenderError, RenderingService};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

const PROJECT: &str = "tests/fixtures/sample_project";

fn load_config() -> Config {
    Config::load_from_dir(Path::new(PROJECT)).unwrap()
}

fn script(name: &str) -> Script {
    Script::load(&Path::new(PROJECT).join("scripts").join(name)).unwrap()
}

/// Registry-owned builder with the script applied, as `sl apply` drives it
async fn applied(registry: &BuilderRegistry, config: &Config, script: &Script) -> AnalysisBuilder {
    let account = config.account_id(Some("123456789012")).unwrap();
    let handle = registry
        .get_or_create(&script.analysis.id, &account, &config.builder_options().unwrap())
        .await;
    let mut builder = handle.lock().await;
    let report = script.run(&mut builder);
    assert!(report.is_success(), "{:?}", report.failure);
    builder.clone()
}

/// Test loading the sample project configuration
#[test]
fn test_load_sample_config() {
    let config = load_config();
    assert_eq!(config.name, "sample_project");
    assert_eq!(config.service.service_type, ServiceType::Memory);
    assert_eq!(config.timeout(), Duration::from_secs(5));
    assert_eq!(config.idle_ttl(), Some(Duration::from_secs(3600)));
    assert_eq!(config.builder_options().unwrap().canvas_width_px, 1600);
    assert_eq!(
        config.account_id(None).unwrap(),
        AccountId::new("123456789012")
    );
}

/// Bar chart over a DATE/MEASURE pair compiles into one sheet with one bar visual
#[tokio::test]
async fn test_bar_chart_compiles_and_submits() {
    let config = load_config();
    let registry = BuilderRegistry::with_idle_ttl(config.idle_ttl());
    let script = script("bar_chart.yml");
    let account = config.account_id(None).unwrap();
    let handle = registry
        .get_or_create(&script.analysis.id, &account, &config.builder_options().unwrap())
        .await;

    let audit_dir = TempDir::new().unwrap();
    let service = Arc::new(InMemoryRenderingService::new());
    let compiler = Compiler::new(service.clone())
        .with_timeout(config.timeout())
        .with_audit(AuditWriter::new(audit_dir.path()));

    let outcome = {
        let mut builder = handle.lock().await;
        assert!(script.run(&mut builder).is_success());
        compiler.compile(&mut builder).await.unwrap()
    };
    assert_eq!(
        outcome.arn,
        "arn:sightline:memory:123456789012:analysis/sales-overview"
    );
    assert_eq!(
        outcome.audit_path.as_deref(),
        Some(audit_dir.path().join("sales-overview.json").as_path())
    );

    let submitted = &service.submissions()[0];
    assert_eq!(submitted.dataset_pairs(), vec![("arn:ds1", "orders")]);
    assert_eq!(submitted.permissions.len(), 1);
    assert_eq!(submitted.definition.sheets.len(), 1);

    let sheet = submitted.sheet("s1").unwrap();
    assert_eq!(sheet.visuals.len(), 1);
    let VisualDefinition::BarChartVisual(bar) = &sheet.visuals[0] else {
        panic!("expected a bar chart, got {:?}", sheet.visuals[0]);
    };
    assert_eq!(bar.visual_id, "v1");
    let FieldWells::BarChartAggregatedFieldWells(wells) = &bar.chart_configuration.field_wells
    else {
        panic!("expected bar field wells");
    };
    let DimensionFieldDefinition::DateDimensionField(x) = &wells.category[0] else {
        panic!("expected a date dimension on x");
    };
    assert_eq!(x.column.dataset.as_str(), "orders");
    assert_eq!(x.column.column, "order_date");
    assert_eq!(wells.values.len(), 1);

    let LayoutConfiguration::GridLayout(grid) = &sheet.layouts[0].configuration else {
        panic!("expected a grid layout");
    };
    let element = &grid.elements[0];
    assert_eq!(element.element_id, "v1");
    assert_eq!((element.column_index, element.row_index), (Some(0), Some(0)));
    assert_eq!((element.column_span, element.row_span), (12, 6));

    let published = service
        .describe_analysis(&account, &AnalysisId::new("sales-overview"))
        .await
        .unwrap();
    assert_eq!(published.sheet_ids(), vec!["s1"]);
}

/// A filter group rejects a batch containing a filter from another dataset
#[tokio::test]
async fn test_group_dataset_mismatch_leaves_group_empty() {
    let config = load_config();
    let registry = BuilderRegistry::new();
    let account = config.account_id(None).unwrap();
    let script = script("group_mismatch.yml");
    let handle = registry
        .get_or_create(&script.analysis.id, &account, &config.builder_options().unwrap())
        .await;
    let mut builder = handle.lock().await;

    let report = script.run(&mut builder);
    let failure = report.failure.as_ref().unwrap();
    assert_eq!((failure.index, failure.op), (3, "filters"));
    match &failure.error {
        CoreError::DatasetMismatch { filter, group, .. } => {
            assert_eq!(filter, "f2");
            assert_eq!(group, "g1");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(builder.filter_group("g1").unwrap().members().is_empty());
    assert!(builder.filter("f1").is_some());
    assert!(builder.filter("f2").is_some());
}

/// Binding a DIMENSION to the y axis of a bar chart names the y axis
#[tokio::test]
async fn test_bar_y_dimension_rejected() {
    let config = load_config();
    let registry = BuilderRegistry::new();
    let mut builder = applied(&registry, &config, &script("bar_chart.yml")).await;

    let spec: VisualSpec = serde_yaml::from_str(
        r#"
visual_id: v9
visual_type: BAR
x_field: region
x_field_type: DIMENSION
x_dataset_identifier: orders
y_field: segment
y_field_type: DIMENSION
y_dataset_identifier: orders
width: 12
height: 6
"#,
    )
    .unwrap();
    let sheet_id = builder.sheet("s1").unwrap().id().clone();
    let VisualRequest::Chart(request) = spec.to_request(&sheet_id).unwrap() else {
        panic!("expected a chart request");
    };
    let err = builder.configure_chart_visual(&request).unwrap_err();
    match err {
        CoreError::InvalidAxisType { axis, field_type, .. } => {
            assert_eq!(axis, "y");
            assert_eq!(field_type, "DIMENSION");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(builder.visual("v9").is_none());
}

/// An unsupported visual type is skipped without failing the batch
#[tokio::test]
async fn test_batch_with_unsupported_type_is_partial() {
    let config = load_config();
    let registry = BuilderRegistry::new();
    let builder = applied(&registry, &config, &script("batch.yml")).await;

    assert!(builder.visual("v1").is_some());
    assert!(builder.visual("v2").is_none());
    assert!(builder.visual("v3").is_some());
    assert_eq!(builder.sheet("s1").unwrap().visuals().len(), 2);

    let mut fresh = AnalysisBuilder::new(
        AnalysisId::new("sales-overview"),
        AccountId::new("123456789012"),
        config.builder_options().unwrap(),
    );
    let script = script("batch.yml");
    let report = script.run(&mut fresh);
    let outcome = report
        .completed
        .iter()
        .find(|o| o.op == "visuals")
        .unwrap();
    assert!(outcome
        .message
        .starts_with("created 2 visual(s) [v1, v3], skipped 1 [v2:"));
}

/// Compiling without any dataset writes nothing and submits nothing
#[tokio::test]
async fn test_compile_without_datasets_is_precondition() {
    let config = load_config();
    let registry = BuilderRegistry::new();
    let mut builder = applied(&registry, &config, &script("no_datasets.yml")).await;

    let audit_dir = TempDir::new().unwrap();
    let service = Arc::new(InMemoryRenderingService::new());
    let compiler = Compiler::new(service.clone()).with_audit(AuditWriter::new(audit_dir.path()));

    let err = compiler.compile(&mut builder).await.unwrap_err();
    assert!(matches!(err, RenderError::Core(CoreError::DefinitionMissing)));
    assert_eq!(service.submission_count(), 0);
    assert_eq!(std::fs::read_dir(audit_dir.path()).unwrap().count(), 0);
}

/// Re-running a script on the same registry key keeps one builder and one sheet
#[tokio::test]
async fn test_reapplying_script_reuses_builder() {
    let config = load_config();
    let registry = BuilderRegistry::new();
    let script = script("bar_chart.yml");
    applied(&registry, &config, &script).await;
    let mut builder = applied(&registry, &config, &script).await;

    assert_eq!(registry.len().await, 1);
    assert_eq!(builder.sheets().count(), 1);
    assert_eq!(builder.sheet("s1").unwrap().visuals().len(), 1);
    let document = builder.build_document().unwrap();
    assert_eq!(document.definition.sheets.len(), 1);
    assert_eq!(document.dataset_pairs().len(), 1);
}

/// A service rejection surfaces its message and leaves the builder usable
#[tokio::test]
async fn test_service_rejection_then_retry() {
    let config = load_config();
    let registry = BuilderRegistry::new();
    let mut builder = applied(&registry, &config, &script("bar_chart.yml")).await;

    let service = Arc::new(InMemoryRenderingService::new());
    service.fail_with(
        "InvalidParameterValueException",
        "Principal arn:aws:quicksight:us-east-1:123456789012:user/default/analyst does not exist",
    );
    let compiler = Compiler::new(service.clone());

    let err = compiler.compile(&mut builder).await.unwrap_err();
    assert_eq!(
        err.service_message(),
        Some("Principal arn:aws:quicksight:us-east-1:123456789012:user/default/analyst does not exist")
    );
    let outcome = compiler.compile(&mut builder).await.unwrap();
    assert!(!outcome.repeated);
    assert_eq!(service.submission_count(), 2);
}
