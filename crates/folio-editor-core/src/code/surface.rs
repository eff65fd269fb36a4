//! Code-editing surface abstraction.
//!
//! The `CodeSurface` trait is the seam between code sessions and the
//! embedded editing widget (syntax highlighting, line numbers, folding,
//! completion all live behind it). Reconfiguration methods mutate the
//! running surface; none of them recreate it, so undo history and scroll
//! position survive language/indent/gutter changes.

use crate::types::{CursorPos, IndentWidth, LangType};

/// A live code-editing widget instance.
pub trait CodeSurface {
    /// Replace the whole document text.
    fn set_content(&mut self, text: &str);

    /// Current document text.
    fn content(&self) -> String;

    /// Reconfigure the language extension (highlighting/completion).
    fn set_language(&mut self, lang: LangType);

    /// Reconfigure the indent unit.
    fn set_indent_width(&mut self, width: IndentWidth);

    /// Show or hide the line-number gutter.
    fn set_gutter(&mut self, line_numbers: bool);

    /// Make the surface read-only or editable.
    fn set_read_only(&mut self, read_only: bool);

    /// Cursor position for status-bar display.
    fn cursor(&self) -> CursorPos;
}

/// String-backed surface with no real rendering.
///
/// The simple implementation, used in tests and headless contexts; UI
/// hosts provide their own backed by an actual widget.
#[derive(Debug, Clone, Default)]
pub struct PlainSurface {
    content: String,
    lang: LangType,
    indent: IndentWidth,
    line_numbers: bool,
    read_only: bool,
    cursor: CursorPos,
}

impl PlainSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn language(&self) -> LangType {
        self.lang
    }

    pub fn indent_width(&self) -> IndentWidth {
        self.indent
    }

    pub fn line_numbers(&self) -> bool {
        self.line_numbers
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Move the cursor (tests drive this directly; real surfaces report
    /// their own selection state).
    pub fn set_cursor(&mut self, line: usize, column: usize) {
        self.cursor = CursorPos { line, column };
    }

    /// Append text at the end of the document, as typing would.
    pub fn type_text(&mut self, text: &str) {
        if !self.read_only {
            self.content.push_str(text);
        }
    }
}

impl CodeSurface for PlainSurface {
    fn set_content(&mut self, text: &str) {
        self.content = text.to_string();
    }

    fn content(&self) -> String {
        self.content.clone()
    }

    fn set_language(&mut self, lang: LangType) {
        self.lang = lang;
    }

    fn set_indent_width(&mut self, width: IndentWidth) {
        self.indent = width;
    }

    fn set_gutter(&mut self, line_numbers: bool) {
        self.line_numbers = line_numbers;
    }

    fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    fn cursor(&self) -> CursorPos {
        self.cursor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reconfigure_preserves_content() {
        let mut surface = PlainSurface::new();
        surface.set_content("fn main() {}");
        surface.set_language(LangType::Rs);
        surface.set_indent_width(IndentWidth::Two);
        surface.set_gutter(true);
        assert_eq!(surface.content(), "fn main() {}");
        assert_eq!(surface.language(), LangType::Rs);
        assert_eq!(surface.indent_width(), IndentWidth::Two);
        assert!(surface.line_numbers());
    }

    #[test]
    fn test_read_only_blocks_typing() {
        let mut surface = PlainSurface::new();
        surface.set_read_only(true);
        surface.type_text("nope");
        assert_eq!(surface.content(), "");
    }
}
