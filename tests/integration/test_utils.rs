//! Shared fixtures for integration tests

use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Snapshot used across scenarios: two shared blocks, two agents, one skillpack
pub const STAFF_SNAPSHOT: &str = r#"
[[shared]]
id = "s1"
name = "Tone"
content = "Be concise."
file_path = "shared/tone.md"

[[shared]]
id = "s2"
name = "Escalation"
content = "Escalate incidents you cannot resolve."

[[agents.eli]]
id = "a1"
name = "Inbox"
content = "You triage inbox threads."

[[agents.eli]]
id = "a2"
name = "Labels"
content = "Tag every thread with an urgency label."

[[agents.mara]]
id = "m1"
name = "Billing"
content = "You reconcile invoices against receipts."

[[skillpacks.incident-response]]
id = "k1"
name = "Severity"
content = "Classify incidents as SEV1, SEV2 or SEV3."

[[skillpacks.incident-response]]
id = "k2"
name = "Paging"
content = "Page the on-call owner for SEV1."
"#;

/// Write `contents` to `name` under the temp dir and return the path
pub fn write_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, contents).unwrap();
    path
}

/// Workspace with `prompts/blocks.toml` at the default snapshot location
pub fn staff_workspace() -> TempDir {
    let dir = TempDir::new().unwrap();
    write_file(&dir, "prompts/blocks.toml", STAFF_SNAPSHOT);
    dir
}

pub fn snapshot_path(workspace: &Path) -> PathBuf {
    workspace.join("prompts").join("blocks.toml")
}
