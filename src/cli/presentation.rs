//! CLI presentation: text and json formatters per command family.

use crate::draft::DraftOverlay;
use crate::engine::{CompileTarget, CompiledPrompt, DraftStatus};
use crate::error::ApiError;
use crate::tokens::{estimate_tokens, TokenBudget};
use comfy_table::Table;
use owo_colors::OwoColorize;
use serde_json::json;

pub fn format_compiled_text(
    target: &CompileTarget,
    result: &CompiledPrompt,
    budget: &TokenBudget,
) -> String {
    let mut header = format!(
        "# {} {} | blocks: {} | tokens: {} | fingerprint: {}",
        target.kind(),
        target.id(),
        result.ordered_blocks.len(),
        budget.display(result.token_estimate),
        result.fingerprint
    );
    if budget.is_exceeded(result.token_estimate) {
        header.push_str(" | over budget");
    }
    if result.compiled_text.is_empty() {
        format!("{}\n\n(empty prompt)", header)
    } else {
        format!("{}\n\n{}", header, result.compiled_text)
    }
}

pub fn format_compiled_json(
    target: &CompileTarget,
    result: &CompiledPrompt,
    budget: &TokenBudget,
) -> Result<String, ApiError> {
    let out = json!({
        "target": { "kind": target.kind(), "id": target.id() },
        "orderedBlocks": result.ordered_blocks,
        "compiledText": result.compiled_text,
        "tokenEstimate": result.token_estimate,
        "tokenCeiling": budget.ceiling,
        "tokensRemaining": budget.remaining(result.token_estimate),
        "fingerprint": result.fingerprint,
    });
    Ok(serde_json::to_string_pretty(&out)?)
}

pub fn format_blocks_table(result: &CompiledPrompt, drafts: &DraftOverlay) -> String {
    if result.ordered_blocks.is_empty() {
        return "No blocks resolved.".to_string();
    }
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.set_header(vec!["#", "ID", "Name", "Scope", "Tokens", "Drafted", "Source"]);
    for (i, block) in result.ordered_blocks.iter().enumerate() {
        let drafted = if drafts.get(&block.id).is_some() { "yes" } else { "-" };
        table.add_row(vec![
            (i + 1).to_string(),
            block.id.clone(),
            block.name.clone(),
            block.scope.to_string(),
            estimate_tokens(&block.content).to_string(),
            drafted.to_string(),
            block.file_path.clone().unwrap_or_else(|| "-".to_string()),
        ]);
    }
    table.to_string()
}

pub fn format_blocks_json(result: &CompiledPrompt, drafts: &DraftOverlay) -> Result<String, ApiError> {
    let rows: Vec<serde_json::Value> = result
        .ordered_blocks
        .iter()
        .enumerate()
        .map(|(i, block)| {
            json!({
                "position": i,
                "id": block.id,
                "name": block.name,
                "scope": block.scope,
                "tokenEstimate": estimate_tokens(&block.content),
                "drafted": drafts.get(&block.id).is_some(),
                "filePath": block.file_path,
            })
        })
        .collect();
    Ok(serde_json::to_string_pretty(&rows)?)
}

pub fn format_draft_status_text(target: &CompileTarget, status: &DraftStatus) -> String {
    let state = if status.dirty {
        "unsaved changes".yellow().to_string()
    } else {
        "clean".green().to_string()
    };
    let mut s = format!(
        "{} {}: {}\n  Canonical: {}\n  Drafted:   {}",
        target.kind(),
        target.id(),
        state,
        status.canonical,
        status.drafted
    );
    if !status.modified_block_ids.is_empty() {
        s.push_str(&format!(
            "\n  Modified blocks: {}",
            status.modified_block_ids.join(", ")
        ));
    }
    if !status.ignored_draft_ids.is_empty() {
        s.push_str(&format!(
            "\n  Ignored drafts (not in this prompt): {}",
            status.ignored_draft_ids.join(", ")
        ));
    }
    s
}

pub fn format_draft_status_json(target: &CompileTarget, status: &DraftStatus) -> Result<String, ApiError> {
    let out = json!({
        "target": { "kind": target.kind(), "id": target.id() },
        "status": status,
    });
    Ok(serde_json::to_string_pretty(&out)?)
}
