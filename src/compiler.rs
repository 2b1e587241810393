//! Compiler
//!
//! Joins block contents into a single prompt. Output depends only on the
//! block contents and their order.

use crate::block::PromptBlock;

/// Separator between consecutive blocks
pub const BLOCK_SEPARATOR: &str = "\n\n";

/// Divider placed between the shared section and the agent-specific section
pub const SECTION_MARKER: &str = "\n\n---\n\n## Agent-specific instructions\n\n";

/// Join block contents with [`BLOCK_SEPARATOR`]
///
/// An empty list compiles to an empty string.
pub fn compile(blocks: &[PromptBlock]) -> String {
    join_contents(blocks)
}

/// Shared and agent sections joined by [`SECTION_MARKER`]
///
/// When the joined agent section is empty the shared section is returned
/// alone. Two or more empty overlay blocks still join to a separator, so
/// the marker is emitted for them.
pub fn compile_sectioned(shared: &[PromptBlock], agent: &[PromptBlock]) -> String {
    let shared_joined = join_contents(shared);
    let agent_joined = join_contents(agent);
    if agent_joined.is_empty() {
        return shared_joined;
    }

    let mut out =
        String::with_capacity(shared_joined.len() + SECTION_MARKER.len() + agent_joined.len());
    out.push_str(&shared_joined);
    out.push_str(SECTION_MARKER);
    out.push_str(&agent_joined);
    out
}

fn join_contents(blocks: &[PromptBlock]) -> String {
    blocks
        .iter()
        .map(|b| b.content.as_str())
        .collect::<Vec<_>>()
        .join(BLOCK_SEPARATOR)
}
