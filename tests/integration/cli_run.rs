//! Run context wiring: config layering, snapshot resolution, command output

use crate::integration::test_utils::{snapshot_path, staff_workspace, write_file};
use promptc::cli::{Commands, OutputFormat, RunContext};
use promptc::error::ApiError;

fn agent_json(agent_id: &str) -> Commands {
    Commands::Agent {
        agent_id: agent_id.to_string(),
        drafts: None,
        sectioned: false,
        format: OutputFormat::Json,
    }
}

#[test]
fn test_default_snapshot_location() {
    let workspace = staff_workspace();
    let ctx = RunContext::new(workspace.path().to_path_buf(), None, None).unwrap();
    assert_eq!(ctx.snapshot_path(), snapshot_path(workspace.path()).as_path());

    let out = ctx.execute(&agent_json("eli")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["orderedBlocks"].as_array().unwrap().len(), 4);
    assert_eq!(value["tokenCeiling"], 8192);
}

#[test]
fn test_config_file_sets_budget_and_snapshot() {
    let workspace = staff_workspace();
    let moved = write_file(
        &workspace,
        "elsewhere/blocks.toml",
        "[[shared]]\nid = \"s1\"\ncontent = \"Only shared.\"\n",
    );
    let config = write_file(
        &workspace,
        "promptc.toml",
        &format!(
            "[store]\nsnapshot_path = {:?}\n\n[budget]\ntoken_ceiling = 10\n",
            moved.to_string_lossy()
        ),
    );

    let ctx = RunContext::new(workspace.path().to_path_buf(), Some(config), None).unwrap();
    let out = ctx.execute(&agent_json("eli")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["compiledText"], "Only shared.");
    assert_eq!(value["tokenCeiling"], 10);
    assert_eq!(value["tokensRemaining"], 7);
}

#[test]
fn test_snapshot_override_wins() {
    let workspace = staff_workspace();
    let other = write_file(
        &workspace,
        "override.toml",
        "[[agents.eli]]\nid = \"a1\"\ncontent = \"Override.\"\n",
    );
    let ctx = RunContext::new(workspace.path().to_path_buf(), None, Some(other)).unwrap();
    let out = ctx.execute(&agent_json("eli")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["compiledText"], "Override.");
}

#[test]
fn test_invalid_config_is_rejected() {
    let workspace = staff_workspace();
    let config = write_file(&workspace, "promptc.toml", "[budget]\ntoken_ceiling = 0\n");
    let result = RunContext::new(workspace.path().to_path_buf(), Some(config), None);
    assert!(matches!(result, Err(ApiError::ConfigError(_))));
}

#[test]
fn test_missing_snapshot_is_store_error() {
    let workspace = tempfile::TempDir::new().unwrap();
    let result = RunContext::new(workspace.path().to_path_buf(), None, None);
    assert!(matches!(result, Err(ApiError::Store(_))));
}

#[test]
fn test_blocks_and_diff_commands() {
    let workspace = staff_workspace();
    let drafts = write_file(&workspace, "drafts.json", r#"{"s2": "Escalate everything."}"#);
    let ctx = RunContext::new(workspace.path().to_path_buf(), None, None).unwrap();

    let table = ctx
        .execute(&Commands::Blocks {
            agent_id: "mara".to_string(),
            drafts: Some(drafts.clone()),
            format: OutputFormat::Text,
        })
        .unwrap();
    assert!(table.contains("Escalation"));
    assert!(table.contains("Billing"));

    let diff = ctx
        .execute(&Commands::Diff {
            agent_id: "mara".to_string(),
            drafts,
            sectioned: true,
            format: OutputFormat::Json,
        })
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&diff).unwrap();
    assert_eq!(value["target"]["kind"], "agent-sectioned");
    assert_eq!(value["status"]["dirty"], true);
    assert_eq!(value["status"]["modifiedBlockIds"][0], "s2");
}

#[test]
fn test_skillpack_text_output() {
    let workspace = staff_workspace();
    let ctx = RunContext::new(workspace.path().to_path_buf(), None, None).unwrap();
    let out = ctx
        .execute(&Commands::Skillpack {
            skillpack_id: "incident-response".to_string(),
            drafts: None,
            format: OutputFormat::Text,
        })
        .unwrap();
    assert!(out.starts_with("# skillpack incident-response | blocks: 2"));
    assert!(out.ends_with("Page the on-call owner for SEV1."));

    let missing = ctx
        .execute(&Commands::Skillpack {
            skillpack_id: "nope".to_string(),
            drafts: None,
            format: OutputFormat::Text,
        })
        .unwrap();
    assert!(missing.ends_with("(empty prompt)"));
}
