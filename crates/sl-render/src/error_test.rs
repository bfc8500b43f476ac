use super::*;

#[test]
fn test_service_message_verbatim() {
    let err = RenderError::Service {
        code: "InvalidParameterValueException".to_string(),
        message: "Visual v1 has an empty field well.".to_string(),
    };
    assert_eq!(err.service_message(), Some("Visual v1 has an empty field well."));
    assert_eq!(
        err.to_string(),
        "[R001] Rendering service error (InvalidParameterValueException): Visual v1 has an empty field well."
    );
}

#[test]
fn test_non_service_errors_have_no_service_message() {
    assert_eq!(RenderError::Timeout { seconds: 5 }.service_message(), None);
    assert!(RenderError::Timeout { seconds: 5 }.to_string().contains("5s"));
}

#[test]
fn test_core_errors_pass_through() {
    let err = RenderError::from(CoreError::DefinitionMissing);
    assert!(err.is_precondition());
    assert!(err.to_string().starts_with("[P002]"));
    assert!(!RenderError::Transport("refused".to_string()).is_precondition());
}
