//! Block type-conversion engine.
//!
//! The only legitimate path for changing a block's type. Conversion is
//! total: every category pair has a defined rule, and incompatible pairs
//! fall back to a documented lossy transform rather than an error.
//!
//! Joins drop empty items before concatenating (so a list with trailing
//! blank items does not grow blank lines), while splits keep every line.

use crate::model::{Block, CodeEntry, Payload};
use crate::types::{BlockType, Category, LangType};

/// Outcome of a [`Block::reassign_type`] call.
///
/// `discarded_entries` counts code-files entries dropped by the
/// `code-list -> code` rule (everything past the first tab). Hosts that
/// want to warn the user about the data loss can check it; the engine
/// itself stays silent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TypeChange {
    /// Whether the block's type tag changed.
    pub changed: bool,
    /// Number of code entries discarded by a lossy conversion.
    pub discarded_entries: usize,
}

impl Block {
    /// Change this block's type, re-shaping the payload per the conversion
    /// rules. A no-op when `new_type` equals the current type; a pure
    /// retag when both types share a category.
    pub fn reassign_type(&mut self, new_type: BlockType) -> TypeChange {
        if self.kind == new_type {
            return TypeChange::default();
        }

        let from = self.kind.category();
        let to = match new_type.category() {
            Some(cat) => cat,
            // Switching to an image block always resets: there is no
            // content mapping into a gallery.
            None => {
                self.kind = new_type;
                self.payload = Payload::Images(Vec::new());
                return TypeChange {
                    changed: true,
                    discarded_entries: 0,
                };
            }
        };
        self.kind = new_type;

        let mut discarded = 0;
        self.payload = match (std::mem::replace(&mut self.payload, Payload::Text(String::new())), from) {
            // Same category: the payload is reused as-is.
            (payload, Some(cat)) if cat == to => payload,

            (Payload::Text(text), _) => match to {
                Category::Text => Payload::Text(text),
                Category::TextList => Payload::List(split_lines(&text)),
                Category::Code => Payload::Code(text_to_code(text)),
                Category::CodeList => Payload::CodeFiles(vec![text_to_code(text)]),
            },

            (Payload::List(items), _) => match to {
                Category::Text => Payload::Text(join_nonempty(items.iter())),
                Category::TextList => Payload::List(items),
                Category::Code => Payload::Code(text_to_code(join_nonempty(items.iter()))),
                Category::CodeList => {
                    Payload::CodeFiles(vec![text_to_code(join_nonempty(items.iter()))])
                }
            },

            (Payload::Code(entry), _) => match to {
                Category::Text => Payload::Text(entry.code),
                Category::TextList => Payload::List(split_lines(&entry.code)),
                Category::Code => Payload::Code(entry),
                Category::CodeList => Payload::CodeFiles(vec![entry]),
            },

            (Payload::CodeFiles(entries), _) => match to {
                Category::Text => Payload::Text(join_nonempty(entries.iter().map(|e| &e.code))),
                Category::TextList => {
                    Payload::List(split_lines(&join_nonempty(entries.iter().map(|e| &e.code))))
                }
                Category::Code => {
                    discarded = entries.len().saturating_sub(1);
                    Payload::Code(entries.into_iter().next().unwrap_or_default())
                }
                Category::CodeList => Payload::CodeFiles(entries),
            },

            // A gallery has no content mapping out either; start the new
            // type from its empty default.
            (Payload::Images(_), _) => Payload::default_for(new_type),
        };

        TypeChange {
            changed: true,
            discarded_entries: discarded,
        }
    }
}

fn split_lines(text: &str) -> Vec<String> {
    text.split('\n').map(str::to_string).collect()
}

fn join_nonempty<'a, S: AsRef<str> + 'a>(items: impl Iterator<Item = &'a S>) -> String {
    items
        .map(|s| s.as_ref())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn text_to_code(text: String) -> CodeEntry {
    CodeEntry::new("untitled", text, LangType::Txt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BlockId;

    fn text_block(text: &str) -> Block {
        Block::with_payload(
            BlockId::new(),
            BlockType::Paragraph,
            Payload::Text(text.to_string()),
        )
        .unwrap()
    }

    #[test]
    fn test_same_type_is_noop() {
        let mut block = text_block("hello");
        let change = block.reassign_type(BlockType::Paragraph);
        assert_eq!(change, TypeChange::default());
        assert_eq!(block.payload(), &Payload::Text("hello".to_string()));
    }

    #[test]
    fn test_reassign_twice_is_idempotent() {
        let mut block = text_block("a\nb");
        block.reassign_type(BlockType::ListBullet);
        let after_first = block.payload().clone();

        let change = block.reassign_type(BlockType::ListBullet);
        assert!(!change.changed);
        assert_eq!(block.payload(), &after_first);
    }

    #[test]
    fn test_same_category_retags_without_touching_payload() {
        let mut block = Block::with_payload(
            BlockId::new(),
            BlockType::Warning,
            Payload::Text("careful".to_string()),
        )
        .unwrap();

        let change = block.reassign_type(BlockType::Tips);
        assert!(change.changed);
        assert_eq!(block.kind(), BlockType::Tips);
        assert_eq!(block.payload(), &Payload::Text("careful".to_string()));
    }

    #[test]
    fn test_paragraph_to_list_splits_lines() {
        // Example scenario: paragraph "Hello\nWorld" -> list-bullet.
        let mut block = text_block("Hello\nWorld");
        block.reassign_type(BlockType::ListBullet);
        assert_eq!(
            block.payload(),
            &Payload::List(vec!["Hello".to_string(), "World".to_string()])
        );
    }

    #[test]
    fn test_text_list_text_round_trip_preserves_lines() {
        let mut block = text_block("Hello\nWorld\nAgain");
        block.reassign_type(BlockType::ListNumber);
        block.reassign_type(BlockType::Paragraph);
        assert_eq!(block.payload(), &Payload::Text("Hello\nWorld\nAgain".to_string()));
    }

    #[test]
    fn test_join_drops_empty_items() {
        let mut block = Block::with_payload(
            BlockId::new(),
            BlockType::ListBullet,
            Payload::List(vec!["a".to_string(), String::new(), "b".to_string()]),
        )
        .unwrap();
        block.reassign_type(BlockType::Paragraph);
        assert_eq!(block.payload(), &Payload::Text("a\nb".to_string()));
    }

    #[test]
    fn test_text_to_code_wraps_as_plain_text() {
        let mut block = text_block("print('hi')");
        block.reassign_type(BlockType::Code);
        assert_eq!(
            block.payload(),
            &Payload::Code(CodeEntry::new("untitled", "print('hi')", LangType::Txt))
        );
    }

    #[test]
    fn test_code_to_code_list_keeps_entry() {
        let mut block = Block::with_payload(
            BlockId::new(),
            BlockType::Code,
            Payload::Code(CodeEntry::new("main.rs", "fn main() {}", LangType::Rs)),
        )
        .unwrap();
        block.reassign_type(BlockType::CodeFiles);
        assert_eq!(
            block.payload(),
            &Payload::CodeFiles(vec![CodeEntry::new("main.rs", "fn main() {}", LangType::Rs)])
        );
    }

    #[test]
    fn test_code_list_to_code_keeps_first_only() {
        // Example scenario: two files, conversion keeps "a.ts" and drops
        // everything else.
        let mut block = Block::with_payload(
            BlockId::new(),
            BlockType::CodeFiles,
            Payload::CodeFiles(vec![
                CodeEntry::new("a.ts", "x", LangType::Ts),
                CodeEntry::new("b.ts", "y", LangType::Ts),
            ]),
        )
        .unwrap();

        let change = block.reassign_type(BlockType::Code);
        assert_eq!(change.discarded_entries, 1);
        assert_eq!(
            block.payload(),
            &Payload::Code(CodeEntry::new("a.ts", "x", LangType::Ts))
        );
    }

    #[test]
    fn test_empty_code_list_to_code_yields_default() {
        let mut block = Block::with_payload(
            BlockId::new(),
            BlockType::CodeFiles,
            Payload::CodeFiles(Vec::new()),
        )
        .unwrap();

        let change = block.reassign_type(BlockType::Code);
        assert_eq!(change.discarded_entries, 0);
        assert_eq!(block.payload(), &Payload::Code(CodeEntry::default()));
    }

    #[test]
    fn test_code_list_to_text_list_joins_then_splits() {
        let mut block = Block::with_payload(
            BlockId::new(),
            BlockType::CodeFiles,
            Payload::CodeFiles(vec![
                CodeEntry::new("a", "x\ny", LangType::Txt),
                CodeEntry::new("b", "z", LangType::Txt),
            ]),
        )
        .unwrap();
        block.reassign_type(BlockType::ListNumber);
        assert_eq!(
            block.payload(),
            &Payload::List(vec!["x".to_string(), "y".to_string(), "z".to_string()])
        );
    }

    #[test]
    fn test_to_image_always_resets() {
        let mut block = text_block("will be gone");
        let change = block.reassign_type(BlockType::Image);
        assert!(change.changed);
        assert_eq!(block.payload(), &Payload::Images(Vec::new()));
    }

    #[test]
    fn test_from_image_starts_from_empty_default() {
        let mut block = Block::new(BlockType::Image);
        block.reassign_type(BlockType::Paragraph);
        assert_eq!(block.payload(), &Payload::Text(String::new()));

        let mut block = Block::new(BlockType::Image);
        block.reassign_type(BlockType::Code);
        assert_eq!(block.payload(), &Payload::Code(CodeEntry::default()));
    }
}
