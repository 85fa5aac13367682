use opcov_core::{run_check, AppError, AuditOptions, Corpus, DirectorySources};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;

const CONTRACT: &str = r#"
openapi: 3.0.3
info:
  title: Research API
  version: "5.28"
paths:
  /a:
    get:
      operationId: A_list
  /a/{id}:
    get:
      operationId: A_get
  /b:
    get:
      operationId: B_list
"#;

const REGISTRY: &str = r#"
import type { ServiceConfig } from '../types';

export const AServiceConfig: ServiceConfig = {
  basePath: '/a',
  operations: {
    list: {
      method: 'GET',
      path: '',
      operationId: 'A_list',
      parameters: { size: { in: 'query', schema: { type: 'integer' } } },
    },
    get: {
      method: 'GET',
      path: '/{id}',
      operationId: 'A_get',
    },
  },
};
"#;

fn write_layout(root: &Path, service_file: &str) {
    fs::create_dir_all(root.join("src/generated")).unwrap();
    fs::create_dir_all(root.join("src/services")).unwrap();
    fs::write(root.join("openapi.yaml"), CONTRACT).unwrap();
    fs::write(root.join("src/generated/operation-registry.ts"), REGISTRY).unwrap();
    fs::write(root.join("src/services/a.ts"), service_file).unwrap();
}

#[test]
fn test_end_to_end_scenario() {
    let dir = tempfile::tempdir().unwrap();
    write_layout(
        dir.path(),
        r#"
export class AService {
  list(params) { return this.http.get(this.config.operations.list, params); }
  get(id) { return this.http.get(this.config.operations.get, { id }); }
}
"#,
    );

    let corpus = Corpus::load(
        &dir.path().join("openapi.yaml"),
        &dir.path().join("src/generated/operation-registry.ts"),
    )
    .unwrap();
    let sources = DirectorySources::new(dir.path().join("src/services"), "ts");

    let report = run_check(&corpus, &sources, &AuditOptions::default());

    assert_eq!(
        report.reconciliation.missing_in_registry.iter().collect::<Vec<_>>(),
        vec!["B_list"]
    );
    assert!(report.reconciliation.extra_in_registry.is_empty());
    assert!(report.findings.is_empty());

    let expected = "\
Services: 1
  - A (/a)
Contract operations: 3
Registry operations: 2
Missing in registry: 1
  By prefix:
    B: 1
  - B_list
Extra in registry: 0
  None
Implementation audit:
  None
";
    assert_eq!(report.render(50), expected);
}

#[test]
fn test_end_to_end_missing_reference() {
    let dir = tempfile::tempdir().unwrap();
    write_layout(
        dir.path(),
        "export class AService { list() { return this.config.operations.list; } }",
    );

    let corpus = Corpus::load(
        &dir.path().join("openapi.yaml"),
        &dir.path().join("src/generated/operation-registry.ts"),
    )
    .unwrap();
    let sources = DirectorySources::new(dir.path().join("src/services"), ".ts");

    let report = run_check(&corpus, &sources, &AuditOptions::default());
    assert_eq!(report.findings.len(), 1);
    assert_eq!(report.findings[0].to_string(), "A: missing get");
    assert!(report.render(50).ends_with("Implementation audit:\n  - A: missing get\n"));
}

#[test]
fn test_missing_contract_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let err = Corpus::load(
        &dir.path().join("openapi.yaml"),
        &dir.path().join("registry.ts"),
    )
    .unwrap_err();

    assert!(matches!(err, AppError::MissingInput { .. }));
    assert!(err.to_string().contains("openapi.yaml"));
}
