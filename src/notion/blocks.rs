//! Notion content blocks.
//!
//! Only the block kinds a daily memo is written with are modelled; anything
//! else comes back as [`ContentBlock::Unsupported`] so readers can skip it.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// One styled run of text. Only the rendered plain text is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RichText {
    #[serde(default)]
    pub plain_text: String,
}

impl RichText {
    pub fn new(text: &str) -> Self {
        Self {
            plain_text: text.to_string(),
        }
    }

    /// Request shape for writing a run back to the API.
    fn to_api(&self) -> Value {
        json!({
            "type": "text",
            "text": { "content": self.plain_text },
        })
    }
}

/// A direct child block of a memo page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentBlock {
    Paragraph(Vec<RichText>),
    /// Level is 1..=3; anything higher is written as a level-3 heading.
    Heading {
        level: u8,
        text: Vec<RichText>,
    },
    BulletedItem(Vec<RichText>),
    NumberedItem(Vec<RichText>),
    ToDo {
        checked: bool,
        text: Vec<RichText>,
    },
    Code(Vec<RichText>),
    Quote(Vec<RichText>),
    /// Block type we do not render (images, tables, dividers, ...).
    Unsupported(String),
}

#[derive(Debug, Default, Deserialize)]
struct BlockBody {
    #[serde(default)]
    rich_text: Vec<RichText>,
    #[serde(default)]
    checked: bool,
}

fn runs(text: &str) -> Vec<RichText> {
    if text.is_empty() {
        Vec::new()
    } else {
        vec![RichText::new(text)]
    }
}

impl ContentBlock {
    pub fn paragraph(text: &str) -> Self {
        ContentBlock::Paragraph(runs(text))
    }

    pub fn heading(level: u8, text: &str) -> Self {
        ContentBlock::Heading {
            level,
            text: runs(text),
        }
    }

    pub fn bulleted(text: &str) -> Self {
        ContentBlock::BulletedItem(runs(text))
    }

    pub fn numbered(text: &str) -> Self {
        ContentBlock::NumberedItem(runs(text))
    }

    pub fn to_do(text: &str, checked: bool) -> Self {
        ContentBlock::ToDo {
            checked,
            text: runs(text),
        }
    }

    pub fn code(text: &str) -> Self {
        ContentBlock::Code(runs(text))
    }

    pub fn quote(text: &str) -> Self {
        ContentBlock::Quote(runs(text))
    }

    /// Build a block from a Notion block object.
    ///
    /// The payload lives under a key named after the block's `type`, e.g.
    /// `{"type": "to_do", "to_do": {"rich_text": [...], "checked": true}}`.
    /// Missing or malformed payloads read as empty text.
    pub fn from_api(value: &Value) -> Self {
        let kind = value
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or_default();
        let body: BlockBody = value
            .get(kind)
            .cloned()
            .and_then(|b| serde_json::from_value(b).ok())
            .unwrap_or_default();

        match kind {
            "paragraph" => ContentBlock::Paragraph(body.rich_text),
            "heading_1" => ContentBlock::Heading {
                level: 1,
                text: body.rich_text,
            },
            "heading_2" => ContentBlock::Heading {
                level: 2,
                text: body.rich_text,
            },
            "heading_3" => ContentBlock::Heading {
                level: 3,
                text: body.rich_text,
            },
            "bulleted_list_item" => ContentBlock::BulletedItem(body.rich_text),
            "numbered_list_item" => ContentBlock::NumberedItem(body.rich_text),
            "to_do" => ContentBlock::ToDo {
                checked: body.checked,
                text: body.rich_text,
            },
            "code" => ContentBlock::Code(body.rich_text),
            "quote" => ContentBlock::Quote(body.rich_text),
            other => ContentBlock::Unsupported(other.to_string()),
        }
    }

    /// Request shape for `children` when creating a page.
    ///
    /// Returns `None` for unsupported blocks; they cannot be written back.
    pub fn to_api(&self) -> Option<Value> {
        let rich_text = |text: &[RichText]| -> Value {
            Value::Array(text.iter().map(RichText::to_api).collect())
        };

        let (kind, body) = match self {
            ContentBlock::Paragraph(text) => ("paragraph", json!({ "rich_text": rich_text(text) })),
            ContentBlock::Heading { level, text } => {
                let kind = match *level {
                    0 | 1 => "heading_1",
                    2 => "heading_2",
                    _ => "heading_3",
                };
                (kind, json!({ "rich_text": rich_text(text) }))
            }
            ContentBlock::BulletedItem(text) => {
                ("bulleted_list_item", json!({ "rich_text": rich_text(text) }))
            }
            ContentBlock::NumberedItem(text) => {
                ("numbered_list_item", json!({ "rich_text": rich_text(text) }))
            }
            ContentBlock::ToDo { checked, text } => (
                "to_do",
                json!({ "rich_text": rich_text(text), "checked": checked }),
            ),
            ContentBlock::Code(text) => (
                "code",
                json!({ "rich_text": rich_text(text), "language": "plain text" }),
            ),
            ContentBlock::Quote(text) => ("quote", json!({ "rich_text": rich_text(text) })),
            ContentBlock::Unsupported(_) => return None,
        };

        let mut block = Map::new();
        block.insert("object".to_string(), json!("block"));
        block.insert("type".to_string(), json!(kind));
        block.insert(kind.to_string(), body);
        Some(Value::Object(block))
    }

    /// Text runs carried by this block, `None` for unsupported kinds.
    pub fn runs(&self) -> Option<&[RichText]> {
        match self {
            ContentBlock::Paragraph(text)
            | ContentBlock::BulletedItem(text)
            | ContentBlock::NumberedItem(text)
            | ContentBlock::Code(text)
            | ContentBlock::Quote(text)
            | ContentBlock::Heading { text, .. }
            | ContentBlock::ToDo { text, .. } => Some(text),
            ContentBlock::Unsupported(_) => None,
        }
    }

    /// Concatenated plain text of every run, no separator.
    pub fn plain_text(&self) -> String {
        self.runs()
            .map(|text| text.iter().map(|r| r.plain_text.as_str()).collect())
            .unwrap_or_default()
    }
}
