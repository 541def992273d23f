use fedcheck_test_utils::{sdl, FakeComposer, SnapshotFixture, BROKEN_MARKER};
use fedcheck_validate::{validate_subgraphs, SubgraphFailure, Tenant, ValidationRequest};
use pretty_assertions::assert_eq;
use tempfile::tempdir;

const TENANT: Tenant = Tenant::FirstParty;

#[test]
fn modified_subgraph_composes_against_base_hybrid() {
    let base = SnapshotFixture::with_defaults(TENANT, &["a", "b"]);
    let current = SnapshotFixture::new(
        TENANT,
        &[
            ("a", "type Query { a: String a2: Int }\n"),
            ("b", "type Query { b: String b2: Int }\n"),
            ("c", "type Query { c: String }\n"),
        ],
    );
    let composer = FakeComposer::new();

    let report = validate_subgraphs(&["a"], base.path(), current.path(), TENANT, &composer);
    assert!(report.is_success());

    let calls = composer.calls();
    assert_eq!(calls.len(), 1);
    let call = &calls[0];
    assert_ne!(call.work_dir, current.path());
    assert_ne!(call.work_dir, base.path());
    assert_eq!(call.config, call.work_dir.join("FIRST_PARTY_rover.yaml"));
    assert_eq!(call.schemas["a"], "type Query { a: String a2: Int }\n");
    assert_eq!(call.schemas["b"], sdl("b"));
    assert!(!call.schemas.contains_key("c"));
    assert!(!call.work_dir.exists(), "scratch tree must be removed");
}

#[test]
fn new_subgraph_composes_against_current_tree() {
    let base = SnapshotFixture::with_defaults(TENANT, &["a", "b"]);
    let current = SnapshotFixture::with_defaults(TENANT, &["a", "b", "c"]);
    let composer = FakeComposer::new();

    let report = validate_subgraphs(&["c"], base.path(), current.path(), TENANT, &composer);
    assert!(report.is_success());

    let calls = composer.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].work_dir, current.path());
    assert_eq!(
        calls[0].schemas.keys().map(String::as_str).collect::<Vec<_>>(),
        vec!["a", "b", "c"]
    );
}

#[test]
fn removed_subgraph_composes_unchanged_base_copy() {
    let base = SnapshotFixture::with_defaults(TENANT, &["a", "b"]);
    let broken = format!("type Query {{ a: {BROKEN_MARKER} }}\n");
    let current = SnapshotFixture::new(TENANT, &[("a", broken.as_str())]);
    let composer = FakeComposer::new().failing_on(BROKEN_MARKER, "unrelated breakage");

    let report = validate_subgraphs(&["b"], base.path(), current.path(), TENANT, &composer);
    assert!(report.is_success());

    let calls = composer.calls();
    assert_eq!(calls.len(), 1);
    let call = &calls[0];
    assert_ne!(call.work_dir, current.path());
    assert_ne!(call.work_dir, base.path());
    assert_eq!(call.schemas["a"], sdl("a"));
    assert_eq!(call.schemas["b"], sdl("b"));
    assert!(!call.work_dir.exists(), "scratch tree must be removed");
}

#[test]
fn only_failing_subgraph_is_reported() {
    let base = SnapshotFixture::with_defaults(TENANT, &["a", "b", "c"]);
    let broken = format!("type Query {{ b: {BROKEN_MARKER} }}\n");
    let current = SnapshotFixture::new(
        TENANT,
        &[
            ("a", "type Query { a: ID }\n"),
            ("b", broken.as_str()),
            ("c", "type Query { c: ID }\n"),
        ],
    );
    let stderr = "error[E029]: Encountered 1 build error while trying to build a supergraph.\nUNKNOWN_TYPE: b";
    let composer = FakeComposer::new().failing_on(BROKEN_MARKER, stderr);

    let report = validate_subgraphs(&["a", "b", "c"], base.path(), current.path(), TENANT, &composer);

    assert_eq!(composer.calls().len(), 3);
    assert!(!report.is_success());
    assert_eq!(report.checked(), ["a", "b", "c"]);
    assert_eq!(report.failures().len(), 1);
    let failure = report.failure("b").unwrap();
    assert_eq!(failure.stderr(), Some(stderr));
    assert!(failure.to_string().contains("subgraph validation failed for b"));

    let rendered = report.render();
    assert!(rendered.starts_with("--- Subgraphs validation result: FAILED\n"));
    assert!(rendered.contains(stderr));
}

#[test]
fn all_passing_prints_success_once() {
    let base = SnapshotFixture::with_defaults(TENANT, &["a", "b"]);
    let current = SnapshotFixture::with_defaults(TENANT, &["a", "b"]);
    let composer = FakeComposer::new().failing_on(BROKEN_MARKER, "unused");

    let report = validate_subgraphs(&["a", "b"], base.path(), current.path(), TENANT, &composer);

    assert!(report.is_success());
    assert!(report.failures().is_empty());
    assert_eq!(report.render().matches("SUCCESS").count(), 1);
}

#[test]
fn unknown_subgraph_fails_without_composing() {
    let base = SnapshotFixture::with_defaults(TENANT, &["a"]);
    let current = SnapshotFixture::with_defaults(TENANT, &["a"]);
    let composer = FakeComposer::new();

    let report = validate_subgraphs(&["usres", "a"], base.path(), current.path(), TENANT, &composer);

    assert_eq!(composer.calls().len(), 1);
    assert!(matches!(
        report.failure("usres"),
        Some(SubgraphFailure::UnknownSubgraph { .. })
    ));
    assert!(report.failure("a").is_none());
}

#[test]
fn missing_current_schema_is_recorded_and_others_continue() {
    let base = SnapshotFixture::with_defaults(TENANT, &["a", "b"]);
    let current = SnapshotFixture::with_defaults(TENANT, &["a", "b"]);
    std::fs::remove_file(current.path().join(TENANT.schema_path("a"))).unwrap();
    let composer = FakeComposer::new();

    let report = validate_subgraphs(&["a", "b"], base.path(), current.path(), TENANT, &composer);

    assert!(matches!(report.failure("a"), Some(SubgraphFailure::Setup { .. })));
    assert!(report.failure("b").is_none());
    assert_eq!(composer.calls().len(), 1);
}

#[test]
fn trials_do_not_leak_into_each_other_or_the_base() {
    let base = SnapshotFixture::with_defaults(TENANT, &["a", "b"]);
    let current = SnapshotFixture::new(
        TENANT,
        &[("a", "type Query { a: Int }\n"), ("b", "type Query { b: Int }\n")],
    );
    let composer = FakeComposer::new();

    validate_subgraphs(&["a", "b"], base.path(), current.path(), TENANT, &composer);

    let calls = composer.calls();
    assert_eq!(calls[0].schemas["a"], "type Query { a: Int }\n");
    assert_eq!(calls[0].schemas["b"], sdl("b"));
    assert_eq!(calls[1].schemas["a"], sdl("a"));
    assert_eq!(calls[1].schemas["b"], "type Query { b: Int }\n");
    assert_eq!(
        std::fs::read_to_string(base.path().join(TENANT.schema_path("a"))).unwrap(),
        sdl("a")
    );
}

#[test]
fn request_runs_from_archives() {
    let work = tempdir().unwrap();
    let base = SnapshotFixture::with_defaults(Tenant::Admin, &["users", "orders"]);
    let current = SnapshotFixture::new(
        Tenant::Admin,
        &[
            ("users", "type Query { me: String }\n"),
            ("orders", "type Query { orders: [String] }\n"),
            ("billing", "type Query { invoices: [String] }\n"),
        ],
    );
    let base_tar = work.path().join("base.tar");
    let current_tar = work.path().join("current.tar");
    base.archive(&base_tar);
    current.archive(&current_tar);

    let request = ValidationRequest::parse(
        "ADMIN",
        base_tar.to_str().unwrap(),
        current_tar.to_str().unwrap(),
        "users,billing",
    )
    .unwrap();
    let composer = FakeComposer::new();
    let report = request.run(&composer).unwrap();

    assert!(report.is_success());
    let calls = composer.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].schemas["users"], "type Query { me: String }\n");
    assert_eq!(calls[0].schemas["orders"], sdl("orders"));
    assert!(!calls[0].schemas.contains_key("billing"));
    assert!(calls[1].schemas.contains_key("billing"));
    assert!(!calls[1].work_dir.exists(), "extracted snapshots must be removed");
}
