//! Tests for db::repository::error module.

use stargate_api::db::repository::{ErrorContext, RepositoryError, RepositoryResult};

#[test]
fn test_error_context_new() {
    let ctx = ErrorContext::new("insert_person");
    assert_eq!(ctx.operation, Some("insert_person".to_string()));
    assert!(ctx.entity.is_none());
    assert!(ctx.entity_id.is_none());
    assert!(ctx.details.is_none());
}

#[test]
fn test_error_context_chaining() {
    let ctx = ErrorContext::new("rename_person")
        .with_entity("person")
        .with_entity_id(42)
        .with_details("name taken");

    assert_eq!(ctx.operation, Some("rename_person".to_string()));
    assert_eq!(ctx.entity, Some("person".to_string()));
    assert_eq!(ctx.entity_id, Some("42".to_string()));
    assert_eq!(ctx.details, Some("name taken".to_string()));
}

#[test]
fn test_error_context_display() {
    let ctx = ErrorContext::new("insert_astronaut_detail")
        .with_entity("astronaut_detail")
        .with_entity_id("7");

    let display = format!("{}", ctx);
    assert!(display.contains("operation=insert_astronaut_detail"));
    assert!(display.contains("entity=astronaut_detail"));
    assert!(display.contains("id=7"));
}

#[test]
fn test_empty_context_displays_nothing() {
    assert_eq!(ErrorContext::default().to_string(), "");
    assert_eq!(
        RepositoryError::not_found("Person not found").to_string(),
        "Not found: Person not found"
    );
}

#[test]
fn test_repository_error_connection_with_context() {
    let ctx = ErrorContext::new("connect").with_entity("database");
    let err = RepositoryError::connection_with_context("failed to connect", ctx);
    let err_str = err.to_string();
    assert!(err_str.contains("Connection error"));
    assert!(err_str.contains("failed to connect"));
    assert!(err_str.contains("operation=connect"));
}

#[test]
fn test_repository_error_prefixes() {
    let cases = [
        (RepositoryError::query("bad sql"), "Query error"),
        (RepositoryError::validation("bad fk"), "validation error"),
        (RepositoryError::conflict("dup"), "Conflict"),
        (RepositoryError::configuration("missing"), "Configuration error"),
        (RepositoryError::internal("oops"), "Internal error"),
        (RepositoryError::transaction("rollback"), "Transaction error"),
    ];
    for (err, prefix) in cases {
        assert!(
            err.to_string().contains(prefix),
            "{} should contain {}",
            err,
            prefix
        );
    }
}

#[test]
fn test_message_strips_prefix_and_context() {
    let err = RepositoryError::conflict_with_context(
        "Person with name 'Ann' already exists",
        ErrorContext::new("insert_person").with_entity("person"),
    );
    assert_eq!(err.message(), "Person with name 'Ann' already exists");
    assert_eq!(err.context().entity.as_deref(), Some("person"));
}

#[test]
fn test_repository_error_with_operation() {
    let err = RepositoryError::query("error").with_operation("list_people");
    assert!(err.to_string().contains("operation=list_people"));
    assert_eq!(err.context().operation.as_deref(), Some("list_people"));
}

#[test]
fn test_repository_result_err() {
    let result: RepositoryResult<i32> = Err(RepositoryError::not_found("test"));
    assert!(matches!(result, Err(RepositoryError::NotFound { .. })));
}
