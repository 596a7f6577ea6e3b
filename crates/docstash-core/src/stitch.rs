//! Reassembles readable text from a flat list of blocks.

use std::collections::HashSet;

use crate::block::Block;

/// Joins line and standalone word text into one string.
///
/// `LINE` texts are emitted in input order, one per line. A line's text is
/// taken as already containing its child words, so `WORD` blocks referenced
/// by any line's `CHILD` relationship are skipped. The remaining words are
/// joined with single spaces and placed on a final line. Blocks of any other
/// kind are ignored, and a missing text counts as `""`.
pub fn stitch(blocks: &[Block]) -> String {
    let lines: Vec<&Block> = blocks.iter().filter(|block| block.is_line()).collect();
    let consumed: HashSet<&str> = lines.iter().flat_map(|line| line.child_ids()).collect();

    let line_text = lines
        .iter()
        .map(|line| line.text_or_empty())
        .collect::<Vec<_>>()
        .join("\n");

    let word_text = blocks
        .iter()
        .filter(|block| block.is_word())
        .filter(|word| word.id.as_deref().is_none_or(|id| !consumed.contains(id)))
        .map(|word| word.text_or_empty())
        .collect::<Vec<_>>()
        .join(" ");

    match (line_text.is_empty(), word_text.is_empty()) {
        (false, false) => format!("{line_text}\n{word_text}"),
        (false, true) => line_text,
        (true, _) => word_text,
    }
}

/// Same as [`stitch`], treating an absent block list as empty.
pub fn stitch_optional(blocks: Option<&[Block]>) -> String {
    blocks.map(stitch).unwrap_or_default()
}
