//! Flatten memo blocks into plain text for the email body.
//!
//! Each block renders on its own and the results are joined with newlines.
//! Blank paragraphs keep their line so the memo's spacing survives; every
//! other blank block is dropped. Unsupported kinds are skipped.

use crate::notion::ContentBlock;

const CHECKED: &str = "☑";
const UNCHECKED: &str = "☐";

/// Render a single block, or `None` if it contributes no line.
fn render(block: &ContentBlock) -> Option<String> {
    let text = block.plain_text();
    let blank = text.trim().is_empty();

    match block {
        ContentBlock::Paragraph(_) if blank => Some(String::new()),
        ContentBlock::Paragraph(_) => Some(text),
        ContentBlock::Unsupported(kind) => {
            log::debug!("Skipping unsupported block type '{}'", kind);
            None
        }
        _ if blank => None,
        ContentBlock::Heading { .. } => Some(format!("\n{}", text)),
        ContentBlock::BulletedItem(_) => Some(format!("• {}", text)),
        // Always "1." -- the list is not renumbered.
        ContentBlock::NumberedItem(_) => Some(format!("1. {}", text)),
        ContentBlock::ToDo { checked, .. } => {
            let glyph = if *checked { CHECKED } else { UNCHECKED };
            Some(format!("{} {}", glyph, text))
        }
        ContentBlock::Code(_) => Some(format!("```\n{}\n```", text)),
        ContentBlock::Quote(_) => Some(format!("> {}", text)),
    }
}

/// Flatten blocks to text. Never fails; an empty slice yields `""`.
pub fn flatten(blocks: &[ContentBlock]) -> String {
    blocks.iter().filter_map(render).collect::<Vec<_>>().join("\n")
}
