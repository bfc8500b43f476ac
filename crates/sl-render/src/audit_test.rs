use super::*;
use crate::fixtures::sales_builder;
use tempfile::TempDir;

#[test]
fn test_path_keyed_by_analysis_id() {
    let writer = AuditWriter::new("target/audit");
    assert_eq!(
        writer.path_for("sales").unwrap(),
        PathBuf::from("target/audit/sales.json")
    );
}

#[test]
fn test_path_rejects_ids_leaving_dir() {
    let writer = AuditWriter::new("target/audit");
    for id in ["../escaped", "nested/a1", "..\\a1", "..", ""] {
        let err = writer.path_for(id).unwrap_err();
        assert!(matches!(err, RenderError::Audit { .. }), "{id}: {err}");
    }
}

#[test]
fn test_write_with_traversing_id_writes_nothing() {
    let root = TempDir::new().unwrap();
    let writer = AuditWriter::new(root.path().join("audit"));
    let mut document = sales_builder().build_document().unwrap();
    document.analysis_id = "../escaped".to_string();

    let err = writer.write(&document).unwrap_err();
    assert!(err.to_string().starts_with("[R005]"));
    assert!(err.to_string().contains("not a plain file name"));
    assert!(!root.path().join("escaped.json").exists());
    assert!(!root.path().join("audit").exists());
}

#[test]
fn test_write_creates_dir_and_record() {
    let dir = TempDir::new().unwrap();
    let writer = AuditWriter::new(dir.path().join("nested/audit"));
    let document = sales_builder().build_document().unwrap();

    let path = writer.write(&document).unwrap();
    assert_eq!(path, writer.path_for("a1").unwrap());
    assert!(!path.with_extension("json.tmp").exists());

    let content = std::fs::read_to_string(&path).unwrap();
    let read_back: AnalysisDocument = serde_json::from_str(&content).unwrap();
    assert_eq!(read_back, document);
    assert!(content.contains("\n  \"AwsAccountId\""));
}

#[test]
fn test_write_replaces_previous_record() {
    let dir = TempDir::new().unwrap();
    let writer = AuditWriter::new(dir.path());
    let mut builder = sales_builder();
    let first = builder.build_document().unwrap();
    writer.write(&first).unwrap();

    let mut second = first.clone();
    second.name = "Renamed".to_string();
    let path = writer.write(&second).unwrap();

    let content = std::fs::read_to_string(path).unwrap();
    assert!(content.contains("Renamed"));
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn test_write_into_file_fails() {
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("audit");
    std::fs::write(&blocker, "not a directory").unwrap();

    let writer = AuditWriter::new(&blocker);
    let document = sales_builder().build_document().unwrap();
    let err = writer.write(&document).unwrap_err();
    assert!(matches!(err, RenderError::Audit { .. }));
    assert!(err.to_string().starts_with("[R005]"));
}
