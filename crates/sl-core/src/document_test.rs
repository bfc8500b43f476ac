use super::*;
use crate::analysis::Definition;
use serde_json::json;

fn document() -> AnalysisDocument {
    AnalysisDocument {
        aws_account_id: "123456789012".to_string(),
        analysis_id: "a1".to_string(),
        name: "Sales".to_string(),
        permissions: Vec::new(),
        definition: AnalysisDefinition {
            data_set_identifier_declarations: vec![
                DataSetIdentifierDeclaration {
                    identifier: "orders".to_string(),
                    data_set_arn: "arn:ds:orders".to_string(),
                },
                DataSetIdentifierDeclaration {
                    identifier: "customers".to_string(),
                    data_set_arn: "arn:ds:customers".to_string(),
                },
            ],
            sheets: vec![SheetDefinition {
                sheet_id: "s1".to_string(),
                name: "Overview".to_string(),
                content_type: "INTERACTIVE".to_string(),
                visuals: Vec::new(),
                filter_controls: Vec::new(),
                layouts: Vec::new(),
                sheet_control_layouts: Vec::new(),
            }],
            filter_groups: Vec::new(),
            analysis_defaults: None,
        },
    }
}

#[test]
fn test_top_level_keys_are_pascal_case() {
    let value = serde_json::to_value(document()).unwrap();
    assert_eq!(value["AwsAccountId"], "123456789012");
    assert_eq!(value["AnalysisId"], "a1");
    assert_eq!(
        value["Definition"]["DataSetIdentifierDeclarations"][0],
        json!({"Identifier": "orders", "DataSetArn": "arn:ds:orders"})
    );
    assert!(value.get("Permissions").is_none());
    assert!(value["Definition"].get("FilterGroups").is_none());
    assert!(value["Definition"].get("AnalysisDefaults").is_none());
}

#[test]
fn test_dataset_pairs_keep_declaration_order() {
    assert_eq!(
        document().dataset_pairs(),
        vec![("arn:ds:orders", "orders"), ("arn:ds:customers", "customers")]
    );
}

#[test]
fn test_sheet_lookup() {
    let document = document();
    assert_eq!(document.sheet("s1").map(|s| s.name.as_str()), Some("Overview"));
    assert!(document.sheet("s2").is_none());
}

#[test]
fn test_checksum_tracks_content() {
    let a = document();
    let mut b = document();
    assert_eq!(a.checksum().unwrap(), b.checksum().unwrap());
    b.name = "Sales v2".to_string();
    assert_ne!(a.checksum().unwrap(), b.checksum().unwrap());
}

#[test]
fn test_analysis_defaults_shape() {
    let defaults = serde_json::to_value(Definition::analysis_defaults(1600)).unwrap();
    assert_eq!(
        defaults,
        json!({
            "DefaultNewSheetConfiguration": {
                "InteractiveLayoutConfiguration": {
                    "Grid": {
                        "CanvasSizeOptions": {
                            "ScreenCanvasSizeOptions": {
                                "ResizeOption": "FIXED",
                                "OptimizedViewPortWidth": "1600px"
                            }
                        }
                    }
                },
                "SheetContentType": "INTERACTIVE"
            }
        })
    );
}

#[test]
fn test_document_reads_back() {
    let text = document().to_pretty_json().unwrap();
    let parsed: AnalysisDocument = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed.sheet("s1").map(|s| s.visuals.len()), Some(0));
    assert_eq!(parsed.definition.data_set_identifier_declarations.len(), 2);
}
