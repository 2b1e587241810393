//! End-to-end compilation scenarios over a loaded snapshot

use crate::integration::test_utils::STAFF_SNAPSHOT;
use promptc::compiler::{BLOCK_SEPARATOR, SECTION_MARKER};
use promptc::store::{parse_snapshot, SnapshotFormat};
use promptc::{
    apply_drafts, estimate_tokens, fingerprint, resolve_for_agent, BlockStore, CompileTarget,
    DraftOverlay, InMemoryBlockStore, PromptBlock, PromptEngine,
};
use std::path::Path;

fn staff_store() -> InMemoryBlockStore {
    parse_snapshot(STAFF_SNAPSHOT, SnapshotFormat::Toml, Path::new("blocks.toml")).unwrap()
}

fn ids(blocks: &[PromptBlock]) -> Vec<&str> {
    blocks.iter().map(|b| b.id.as_str()).collect()
}

#[test]
fn test_two_block_scenario_with_draft() {
    let store = InMemoryBlockStore::builder()
        .shared_block(PromptBlock::shared("s1", "Tone", "Be concise."))
        .agent_block("eli", PromptBlock::agent("a1", "Inbox", "You triage inbox threads."))
        .build()
        .unwrap();
    let engine = PromptEngine::new(&store);

    let canonical = engine.compile_agent("eli", None);
    assert_eq!(ids(&canonical.ordered_blocks), vec!["s1", "a1"]);
    assert_eq!(
        canonical.compiled_text,
        ["Be concise.", "You triage inbox threads."].join(BLOCK_SEPARATOR)
    );

    let drafts = DraftOverlay::new().with_draft("a1", "You triage and tag inbox threads.");
    let drafted = engine.compile_agent("eli", Some(&drafts));
    let segments: Vec<&str> = drafted.compiled_text.split(BLOCK_SEPARATOR).collect();
    assert_eq!(segments, vec!["Be concise.", "You triage and tag inbox threads."]);
    assert_ne!(drafted.fingerprint, canonical.fingerprint);
}

#[test]
fn test_unknown_agent_resolves_to_shared_blocks() {
    let store = staff_store();
    let blocks = resolve_for_agent(&store, "unknown-agent-id");
    assert_eq!(blocks, store.shared_blocks().to_vec());
}

#[test]
fn test_full_agent_prompt_order() {
    let store = staff_store();
    let result = PromptEngine::new(&store).compile_agent("eli", None);
    assert_eq!(ids(&result.ordered_blocks), vec!["s1", "s2", "a1", "a2"]);
    assert_eq!(result.token_estimate, estimate_tokens(&result.compiled_text));
    assert_eq!(result.fingerprint, fingerprint(&result.compiled_text));
}

#[test]
fn test_sectioned_prompt_separates_agent_content() {
    let store = staff_store();
    let result = PromptEngine::new(&store).compile_agent_sectioned("mara", None);
    let (shared, agent) = result.compiled_text.split_once(SECTION_MARKER).unwrap();
    assert_eq!(
        shared,
        "Be concise.\n\nEscalate incidents you cannot resolve."
    );
    assert_eq!(agent, "You reconcile invoices against receipts.");
}

#[test]
fn test_sectioned_prompt_without_overlay_has_no_marker() {
    let store = staff_store();
    let result = PromptEngine::new(&store).compile_agent_sectioned("new-hire", None);
    assert!(!result.compiled_text.contains(SECTION_MARKER));
    assert_eq!(
        result.compiled_text,
        PromptEngine::new(&store).compile_agent("new-hire", None).compiled_text
    );
}

#[test]
fn test_skillpack_is_separate_axis() {
    let store = staff_store();
    let result = PromptEngine::new(&store).compile_skillpack("incident-response", None);
    assert_eq!(ids(&result.ordered_blocks), vec!["k1", "k2"]);
    assert!(!result.compiled_text.contains("Be concise."));
}

#[test]
fn test_unknown_skillpack_yields_empty_summary() {
    let store = staff_store();
    let result = PromptEngine::new(&store).compile_skillpack("does-not-exist", None);
    assert_eq!(result.compiled_text, "");
    assert_eq!(result.token_estimate, 0);
    assert_eq!(result.fingerprint, fingerprint(""));
}

#[test]
fn test_draft_on_shared_block_affects_every_agent() {
    let store = staff_store();
    let engine = PromptEngine::new(&store);
    let drafts = DraftOverlay::new().with_draft("s1", "Be brief.");

    for agent in ["eli", "mara"] {
        let result = engine.compile_agent(agent, Some(&drafts));
        assert!(result.compiled_text.starts_with("Be brief."));
    }
    assert_eq!(store.block("s1").unwrap().content, "Be concise.");
}

#[test]
fn test_dirty_indicator_flow() {
    let store = staff_store();
    let engine = PromptEngine::new(&store);
    let target = CompileTarget::Agent("eli".to_string());

    let clean = engine.draft_status(&target, &DraftOverlay::new());
    assert!(!clean.dirty);

    let drafts = DraftOverlay::new()
        .with_draft("a2", "Tag every thread with an urgency label and owner.")
        .with_draft("m1", "Belongs to another agent.");
    let status = engine.draft_status(&target, &drafts);
    assert!(status.dirty);
    assert_eq!(status.modified_block_ids, vec!["a2".to_string()]);
    assert_eq!(status.ignored_draft_ids, vec!["m1".to_string()]);
}

#[test]
fn test_empty_drafts_compile_like_canonical() {
    let store = staff_store();
    let blocks = resolve_for_agent(&store, "eli");
    assert_eq!(
        promptc::compiler::compile(&apply_drafts(&blocks, &DraftOverlay::new())),
        promptc::compiler::compile(&blocks)
    );
}

#[test]
fn test_concurrent_compilation_is_consistent() {
    let store = std::sync::Arc::new(staff_store());
    let expected = PromptEngine::new(store.as_ref()).compile_agent("eli", None);

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let store = std::sync::Arc::clone(&store);
            std::thread::spawn(move || {
                let engine = PromptEngine::new(store.as_ref());
                let drafts = DraftOverlay::new().with_draft("a1", format!("draft {}", i));
                let drafted = engine.compile_agent("eli", Some(&drafts));
                let canonical = engine.compile_agent("eli", None);
                (canonical, drafted.compiled_text.contains(&format!("draft {}", i)))
            })
        })
        .collect();

    for handle in handles {
        let (canonical, saw_own_draft) = handle.join().unwrap();
        assert_eq!(canonical, expected);
        assert!(saw_own_draft);
    }
}

#[test]
fn test_drafts_apply_to_skillpack_prompt() {
    let store = staff_store();
    let engine = PromptEngine::new(&store);
    let drafts = DraftOverlay::new()
        .with_draft("k2", "Page the on-call owner for SEV1 and SEV2.")
        .with_draft("s1", "Shared drafts do not reach skillpacks.");

    let result = engine.compile_skillpack("incident-response", Some(&drafts));
    assert_eq!(ids(&result.ordered_blocks), vec!["k1", "k2"]);
    assert_eq!(
        result.compiled_text,
        [
            "Classify incidents as SEV1, SEV2 or SEV3.",
            "Page the on-call owner for SEV1 and SEV2."
        ]
        .join(BLOCK_SEPARATOR)
    );
    assert_ne!(
        result.fingerprint,
        engine.compile_skillpack("incident-response", None).fingerprint
    );
}

#[test]
fn test_drafts_apply_per_section_in_sectioned_prompt() {
    let store = staff_store();
    let engine = PromptEngine::new(&store);
    let drafts = DraftOverlay::new()
        .with_draft("s2", "Escalate everything.")
        .with_draft("a2", "Tag threads by owner.");

    let result = engine.compile_agent_sectioned("eli", Some(&drafts));
    let (shared, agent) = result.compiled_text.split_once(SECTION_MARKER).unwrap();
    assert_eq!(shared, "Be concise.\n\nEscalate everything.");
    assert_eq!(agent, "You triage inbox threads.\n\nTag threads by owner.");
    assert_eq!(ids(&result.ordered_blocks), vec!["s1", "s2", "a1", "a2"]);
    assert_eq!(result.ordered_blocks[3].content, "Tag threads by owner.");
    assert_eq!(store.block("a2").unwrap().content, "Tag every thread with an urgency label.");
}
