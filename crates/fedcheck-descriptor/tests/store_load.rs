use fedcheck_descriptor::{synthesize, DescriptorError, SupergraphDescriptor};
use pretty_assertions::assert_eq;
use tempfile::tempdir;

#[test]
fn store_then_load_preserves_descriptor() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("FIRST_PARTY_rover.yaml");

    let descriptor = synthesize(
        [
            "users=FIRST_PARTY/schemas/users/schema.sdl",
            "orders=FIRST_PARTY/schemas/orders/schema.sdl",
        ],
        "=2.9.0",
    )
    .unwrap();
    descriptor.store(&path).unwrap();

    let loaded = SupergraphDescriptor::load(&path).unwrap();
    assert_eq!(loaded, descriptor);
}

#[test]
fn store_overwrites_existing_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("ADMIN_rover.yaml");
    std::fs::write(&path, "stale: true\nmore: stuff\n").unwrap();

    let descriptor = synthesize(["a=a.sdl"], "=2.9.0").unwrap();
    descriptor.store(&path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(!text.contains("stale"));
    assert_eq!(SupergraphDescriptor::load(&path).unwrap(), descriptor);
}

#[test]
fn load_missing_file_reports_path() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("absent.yaml");

    let err = SupergraphDescriptor::load(&path).unwrap_err();
    assert!(matches!(err, DescriptorError::Io { .. }));
    assert!(err.to_string().contains("absent.yaml"));
}
