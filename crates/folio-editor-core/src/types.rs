//! Core editor taxonomies: block types, conversion categories, languages.
//!
//! These types are framework-agnostic; everything the UI dispatches on is an
//! exhaustive match over one of these enums, so adding a block type or a
//! language is a compile-time-checked change.

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// The type tag of a [`Block`](crate::model::Block).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlockType {
    Title,
    #[serde(rename = "subtitle-1")]
    Subtitle1,
    #[serde(rename = "subtitle-2")]
    Subtitle2,
    Paragraph,
    Tips,
    Warning,
    Important,
    Image,
    ListNumber,
    ListBullet,
    Code,
    CodeFiles,
}

impl BlockType {
    /// Every block type, in the order the type-switcher menu lists them.
    pub const ALL: [BlockType; 12] = [
        BlockType::Title,
        BlockType::Subtitle1,
        BlockType::Subtitle2,
        BlockType::Paragraph,
        BlockType::Image,
        BlockType::Important,
        BlockType::Warning,
        BlockType::Tips,
        BlockType::Code,
        BlockType::CodeFiles,
        BlockType::ListNumber,
        BlockType::ListBullet,
    ];

    /// Human-readable name shown in the container label and type menu.
    pub fn display_name(&self) -> &'static str {
        match self {
            BlockType::Title => "Title",
            BlockType::Subtitle1 => "Subtitle 1",
            BlockType::Subtitle2 => "Subtitle 2",
            BlockType::Paragraph => "Paragraph",
            BlockType::Tips => "Tips",
            BlockType::Warning => "Warning",
            BlockType::Important => "Important",
            BlockType::Image => "Image",
            BlockType::ListNumber => "List Number",
            BlockType::ListBullet => "List Bullet",
            BlockType::Code => "Code",
            BlockType::CodeFiles => "Code Files",
        }
    }

    /// Conversion category of this type, or `None` for `Image`, which sits
    /// outside the conversion table (switching to it always resets the
    /// payload).
    pub fn category(&self) -> Option<Category> {
        match self {
            BlockType::Title
            | BlockType::Subtitle1
            | BlockType::Subtitle2
            | BlockType::Paragraph
            | BlockType::Tips
            | BlockType::Warning
            | BlockType::Important => Some(Category::Text),
            BlockType::ListNumber | BlockType::ListBullet => Some(Category::TextList),
            BlockType::Code => Some(Category::Code),
            BlockType::CodeFiles => Some(Category::CodeList),
            BlockType::Image => None,
        }
    }

    /// Whether this type renders with the callout accent (side icon and
    /// tinted background).
    pub fn accent(&self) -> Option<Accent> {
        match self {
            BlockType::Tips => Some(Accent::Tips),
            BlockType::Warning => Some(Accent::Warning),
            BlockType::Important => Some(Accent::Important),
            _ => None,
        }
    }
}

impl std::fmt::Display for BlockType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Payload shape family used by the type-conversion engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Category {
    Text,
    TextList,
    Code,
    CodeList,
}

/// Colored accent for callout blocks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Accent {
    Tips,
    Warning,
    Important,
}

/// Filter applied to the type-switcher menu based on the block's content.
///
/// A block whose payload has diverged past what other types can absorb
/// (a populated image gallery, a multi-file code block) locks its type.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FilterKind {
    #[default]
    All,
    ImageOnly,
    CodeOnly,
}

/// Language tag for code payloads.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LangType {
    C,
    Cpp,
    Css,
    Html,
    Java,
    Js,
    Json,
    Kt,
    Md,
    Php,
    Py,
    Rs,
    Sql,
    #[default]
    Txt,
    Ts,
    Xml,
}

impl LangType {
    /// Every language, in the order the language menu lists them.
    pub const ALL: [LangType; 16] = [
        LangType::C,
        LangType::Cpp,
        LangType::Css,
        LangType::Html,
        LangType::Java,
        LangType::Js,
        LangType::Json,
        LangType::Kt,
        LangType::Md,
        LangType::Php,
        LangType::Py,
        LangType::Rs,
        LangType::Sql,
        LangType::Txt,
        LangType::Ts,
        LangType::Xml,
    ];

    /// Short wire id ("rs", "txt", ...), as stored in code payloads.
    pub fn id(&self) -> &'static str {
        match self {
            LangType::C => "c",
            LangType::Cpp => "cpp",
            LangType::Css => "css",
            LangType::Html => "html",
            LangType::Java => "java",
            LangType::Js => "js",
            LangType::Json => "json",
            LangType::Kt => "kt",
            LangType::Md => "md",
            LangType::Php => "php",
            LangType::Py => "py",
            LangType::Rs => "rs",
            LangType::Sql => "sql",
            LangType::Txt => "txt",
            LangType::Ts => "ts",
            LangType::Xml => "xml",
        }
    }

    /// Display name for the status bar and language menu.
    pub fn display_name(&self) -> &'static str {
        match self {
            LangType::C => "C",
            LangType::Cpp => "C++",
            LangType::Css => "CSS",
            LangType::Html => "HTML",
            LangType::Java => "Java",
            LangType::Js => "Javascript",
            LangType::Json => "JSON",
            LangType::Kt => "Kotlin",
            LangType::Md => "Markdown",
            LangType::Php => "PHP",
            LangType::Py => "Python",
            LangType::Rs => "Rust",
            LangType::Sql => "SQL",
            LangType::Txt => "Text",
            LangType::Ts => "Typescript",
            LangType::Xml => "XML",
        }
    }

    /// Resolve a classifier/wire id, falling back to plain text for
    /// anything unrecognized (including empty and low-confidence results).
    pub fn from_id(id: &str) -> LangType {
        LangType::ALL
            .into_iter()
            .find(|lang| lang.id() == id)
            .unwrap_or(LangType::Txt)
    }
}

impl std::fmt::Display for LangType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

impl From<&str> for LangType {
    fn from(id: &str) -> Self {
        LangType::from_id(id)
    }
}

impl From<LangType> for SmolStr {
    fn from(lang: LangType) -> Self {
        SmolStr::new_static(lang.id())
    }
}

/// Indent width for code sessions. Toggles between the two values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum IndentWidth {
    Two,
    #[default]
    Four,
}

impl IndentWidth {
    pub fn spaces(&self) -> usize {
        match self {
            IndentWidth::Two => 2,
            IndentWidth::Four => 4,
        }
    }

    pub fn toggled(&self) -> IndentWidth {
        match self {
            IndentWidth::Two => IndentWidth::Four,
            IndentWidth::Four => IndentWidth::Two,
        }
    }

    /// Map a configured space count to a width, defaulting to four.
    pub fn from_spaces(spaces: u8) -> IndentWidth {
        if spaces == 2 {
            IndentWidth::Two
        } else {
            IndentWidth::Four
        }
    }
}

/// How a text surface enters edit mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EditMode {
    /// Editable whenever the parent allows it.
    #[default]
    Click,
    /// Starts read-only; the first double-click switches to editing, and
    /// blur switches back. Used for inline renames such as tab labels.
    DoubleClick,
}

/// Content alignment hint per block type.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Center,
    Right,
    #[default]
    Justify,
}

/// Cursor position in a code surface, for status-bar display.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CursorPos {
    /// 1-based line number.
    pub line: usize,
    /// 0-based column within the line.
    pub column: usize,
}
