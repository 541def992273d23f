use fedcheck_archive::{create_archive, extract, ArchiveError, SchemaEntryNaming, FILE_MODE};
use fedcheck_descriptor::SubgraphSpec;
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use tar::{Builder, EntryType, Header};
use tempfile::tempdir;

fn write(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

#[test]
fn extract_reproduces_tree() {
    let work = tempdir().unwrap();
    let tree = work.path().join("sandbox");
    write(
        &tree.join("FIRST_PARTY/schemas/users/schema.sdl"),
        "type User @key(fields: \"id\") { id: ID! }\n",
    );
    write(
        &tree.join("FIRST_PARTY/schemas/orders/schema.sdl"),
        "type Order { id: ID! total: Int }\n",
    );
    let config = work.path().join("FIRST_PARTY_rover.yaml");
    write(&config, "federation_version: =2.9.0\nsubgraphs: {}\n");
    let archive = work.path().join("schemas.tar");

    let specs = SubgraphSpec::parse_all([
        "users=FIRST_PARTY/schemas/users/schema.sdl",
        "orders=FIRST_PARTY/schemas/orders/schema.sdl",
    ])
    .unwrap();
    create_archive(
        &archive,
        &config,
        &specs,
        Some(&tree),
        SchemaEntryNaming::RelativePath,
    )
    .unwrap();

    let dest = work.path().join("extracted");
    let summary = extract(&archive, &dest).unwrap();
    assert_eq!(summary.files, 3);
    assert_eq!(summary.directories, 4);
    assert!(summary.skipped.is_empty());

    for rel in [
        "FIRST_PARTY/schemas/users/schema.sdl",
        "FIRST_PARTY/schemas/orders/schema.sdl",
    ] {
        assert_eq!(
            fs::read(dest.join(rel)).unwrap(),
            fs::read(tree.join(rel)).unwrap()
        );
    }
    assert_eq!(
        fs::read(dest.join("FIRST_PARTY_rover.yaml")).unwrap(),
        fs::read(&config).unwrap()
    );
    assert!(dest.join("FIRST_PARTY/schemas").is_dir());

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = fs::metadata(dest.join("FIRST_PARTY/schemas/users/schema.sdl"))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o7777, FILE_MODE);
    }
}

#[test]
fn extract_skips_symlinks() {
    let work = tempdir().unwrap();
    let archive = work.path().join("mixed.tar");
    {
        let mut builder = Builder::new(fs::File::create(&archive).unwrap());

        let mut file = Header::new_ustar();
        file.set_entry_type(EntryType::Regular);
        file.set_mode(0o644);
        file.set_size(5);
        builder
            .append_data(&mut file, "real.sdl", &b"hello"[..])
            .unwrap();

        let mut link = Header::new_ustar();
        link.set_entry_type(EntryType::Symlink);
        link.set_mode(0o777);
        link.set_size(0);
        link.set_link_name("real.sdl").unwrap();
        builder
            .append_data(&mut link, "link.sdl", std::io::empty())
            .unwrap();

        builder.finish().unwrap();
    }

    let dest = work.path().join("out");
    let summary = extract(&archive, &dest).unwrap();
    assert_eq!(summary.files, 1);
    assert_eq!(summary.skipped, vec![Path::new("link.sdl").to_path_buf()]);
    assert_eq!(fs::read(dest.join("real.sdl")).unwrap(), b"hello");
    assert!(fs::symlink_metadata(dest.join("link.sdl")).is_err());
}

#[test]
fn extract_rejects_parent_escape() {
    let work = tempdir().unwrap();
    let archive = work.path().join("evil.tar");
    {
        let mut builder = Builder::new(fs::File::create(&archive).unwrap());
        let mut header = Header::new_old();
        let name = b"../escaped.sdl";
        header.as_old_mut().name[..name.len()].copy_from_slice(name);
        header.set_entry_type(EntryType::Regular);
        header.set_mode(0o644);
        header.set_size(4);
        header.set_cksum();
        builder.append(&header, &b"evil"[..]).unwrap();
        builder.finish().unwrap();
    }

    let dest = work.path().join("inner");
    fs::create_dir_all(&dest).unwrap();
    let err = extract(&archive, &dest).unwrap_err();
    assert!(matches!(err, ArchiveError::UnsafeEntryPath(_)));
    assert!(!work.path().join("escaped.sdl").exists());
}

#[test]
fn extract_rejects_absolute_entry() {
    let work = tempdir().unwrap();
    let archive = work.path().join("absolute.tar");
    let absolute = Path::new("/fedcheck-rooted/schema.sdl");
    {
        let mut builder = Builder::new(fs::File::create(&archive).unwrap());
        let mut header = Header::new_old();
        let name = absolute.to_str().unwrap().as_bytes();
        header.as_old_mut().name[..name.len()].copy_from_slice(name);
        header.set_entry_type(EntryType::Regular);
        header.set_mode(0o644);
        header.set_size(4);
        header.set_cksum();
        builder.append(&header, &b"evil"[..]).unwrap();
        builder.finish().unwrap();
    }

    let dest = work.path().join("inner");
    fs::create_dir_all(&dest).unwrap();
    let err = extract(&archive, &dest).unwrap_err();
    assert!(matches!(err, ArchiveError::UnsafeEntryPath(ref path) if path == absolute));
    assert!(!absolute.exists());
    assert!(!dest.join(absolute.strip_prefix("/").unwrap()).exists());
    assert_eq!(fs::read_dir(&dest).unwrap().count(), 0);
}

#[test]
fn extract_truncated_archive_fails() {
    let work = tempdir().unwrap();
    let config = work.path().join("supergraph.yaml");
    write(&config, &"x".repeat(4096));
    let archive = work.path().join("full.tar");
    create_archive(&archive, &config, &[], None, SchemaEntryNaming::BaseName).unwrap();

    let bytes = fs::read(&archive).unwrap();
    let truncated = work.path().join("truncated.tar");
    fs::write(&truncated, &bytes[..300]).unwrap();

    let err = extract(&truncated, &work.path().join("out")).unwrap_err();
    assert!(matches!(err, ArchiveError::Io { .. }));
}
