//! Snapshot files and snapshot handoff

use crate::integration::test_utils::{write_file, STAFF_SNAPSHOT};
use promptc::error::StoreError;
use promptc::store::{load_snapshot, SnapshotCell};
use promptc::{BlockScope, BlockStore, PromptEngine};
use tempfile::TempDir;

#[test]
fn test_load_toml_snapshot_from_disk() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "blocks.toml", STAFF_SNAPSHOT);

    let store = load_snapshot(&path).unwrap();
    assert_eq!(store.len(), 7);
    assert_eq!(store.shared_blocks()[0].file_path.as_deref(), Some("shared/tone.md"));
    assert_eq!(store.block("k2").unwrap().scope, BlockScope::Skillpack);
    assert_eq!(store.skillpack_ids(), &["incident-response".to_string()]);
}

#[test]
fn test_load_json_snapshot_from_disk() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "blocks.json",
        r#"{
            "shared": [{"id": "s1", "name": "Tone", "content": "Be concise."}],
            "agents": {"eli": [{"id": "a1", "name": "Inbox", "content": "You triage inbox threads.", "filePath": "eli.md"}]}
        }"#,
    );

    let store = load_snapshot(&path).unwrap();
    assert_eq!(store.agent_overlay("eli")[0].file_path.as_deref(), Some("eli.md"));
    let result = PromptEngine::new(&store).compile_agent("eli", None);
    assert_eq!(result.compiled_text, "Be concise.\n\nYou triage inbox threads.");
}

#[test]
fn test_duplicate_ids_across_files_sections_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "blocks.toml",
        r#"
[[shared]]
id = "dup"
content = "one"

[[skillpacks.x]]
id = "dup"
content = "two"
"#,
    );
    assert!(matches!(
        load_snapshot(&path),
        Err(StoreError::DuplicateBlockId { .. })
    ));
}

#[test]
fn test_missing_snapshot_is_io_error() {
    let dir = TempDir::new().unwrap();
    let result = load_snapshot(&dir.path().join("missing.toml"));
    assert!(matches!(result, Err(StoreError::Io(_))));
}

#[test]
fn test_published_snapshot_visible_to_new_readers_only() {
    let dir = TempDir::new().unwrap();
    let first = write_file(&dir, "v1.toml", "[[shared]]\nid = \"s1\"\ncontent = \"Be concise.\"\n");
    let second = write_file(&dir, "v2.toml", "[[shared]]\nid = \"s1\"\ncontent = \"Be brief.\"\n");

    let cell = SnapshotCell::new(load_snapshot(&first).unwrap());
    let before = cell.load();
    let fp_before = PromptEngine::new(before.as_ref()).compile_agent("eli", None).fingerprint;

    cell.publish(load_snapshot(&second).unwrap());

    let after = cell.load();
    let fp_after = PromptEngine::new(after.as_ref()).compile_agent("eli", None).fingerprint;
    assert_ne!(fp_before, fp_after);
    assert_eq!(
        PromptEngine::new(before.as_ref()).compile_agent("eli", None).fingerprint,
        fp_before
    );
}
