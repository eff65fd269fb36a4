//! Document and block data model.
//!
//! A [`Document`] is an ordered list of [`Block`]s plus article/project
//! metadata. Each block pairs a [`BlockType`] tag with a [`Payload`] sum
//! type; the two always agree, and the only paths that change a block's
//! type or payload are the constructors here, [`Block::set_payload`], and
//! the conversion engine in [`crate::convert`].
//!
//! On the wire a block is `{ id, type, data }` with a type-specific `data`
//! shape. Strict decoding rejects a `data` that does not match `type`
//! ([`ModelError::MalformedPayload`]); the lenient path substitutes the
//! type's empty default and reports a [`PayloadWarning`] instead, so one
//! damaged block never takes down a whole document load.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use crate::types::{BlockType, Category, LangType};

/// Stable block identity, unique within a document and never reused.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(SmolStr);

impl BlockId {
    /// Generate a fresh random id.
    pub fn new() -> Self {
        Self(SmolStr::new(uuid::Uuid::new_v4().to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for BlockId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for BlockId {
    fn from(s: &str) -> Self {
        Self(SmolStr::new(s))
    }
}

impl std::fmt::Display for BlockId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One image in an image block.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageEntry {
    /// Reference URL (durable once uploaded, ephemeral preview before).
    #[serde(default)]
    pub url: String,
    /// Caption shown under the image, inline-rendered when read-only.
    #[serde(default)]
    pub caption: String,
}

impl ImageEntry {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            caption: String::new(),
        }
    }
}

/// One file in a code or code-files block.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeEntry {
    /// File name; doubles as the tab label and the editing-session
    /// reconciliation key for code-files blocks.
    #[serde(default = "CodeEntry::default_name")]
    pub name: SmolStr,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub lang: LangType,
}

impl CodeEntry {
    pub fn new(name: impl Into<SmolStr>, code: impl Into<String>, lang: LangType) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
            lang,
        }
    }

    fn default_name() -> SmolStr {
        SmolStr::new_static("untitled")
    }
}

impl Default for CodeEntry {
    fn default() -> Self {
        Self {
            name: Self::default_name(),
            code: String::new(),
            lang: LangType::Txt,
        }
    }
}

/// Type-specific content of a block.
#[derive(Clone, Debug, PartialEq)]
pub enum Payload {
    /// Title, subtitles, paragraph, callouts.
    Text(String),
    /// Ordered or bulleted list items.
    List(Vec<String>),
    /// Image gallery entries.
    Images(Vec<ImageEntry>),
    /// A single code sample.
    Code(CodeEntry),
    /// A multi-file code sample, one entry per tab.
    CodeFiles(Vec<CodeEntry>),
}

impl Payload {
    /// The empty default payload for a block type.
    pub fn default_for(kind: BlockType) -> Payload {
        match kind.category() {
            Some(Category::Text) => Payload::Text(String::new()),
            Some(Category::TextList) => Payload::List(Vec::new()),
            Some(Category::Code) => Payload::Code(CodeEntry::default()),
            Some(Category::CodeList) => Payload::CodeFiles(vec![CodeEntry::default()]),
            None => Payload::Images(Vec::new()),
        }
    }

    /// Whether this payload variant is the shape `kind` expects.
    pub fn matches(&self, kind: BlockType) -> bool {
        match (self, kind.category()) {
            (Payload::Text(_), Some(Category::Text)) => true,
            (Payload::List(_), Some(Category::TextList)) => true,
            (Payload::Code(_), Some(Category::Code)) => true,
            (Payload::CodeFiles(_), Some(Category::CodeList)) => true,
            (Payload::Images(_), None) => true,
            _ => false,
        }
    }

    /// Variant name for diagnostics.
    pub fn variant_name(&self) -> &'static str {
        match self {
            Payload::Text(_) => "text",
            Payload::List(_) => "list",
            Payload::Images(_) => "images",
            Payload::Code(_) => "code",
            Payload::CodeFiles(_) => "code-files",
        }
    }
}

/// Model-level errors.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    /// A block's `data` did not match the shape its `type` expects.
    #[error("malformed payload for block type {kind}: {detail}")]
    MalformedPayload { kind: BlockType, detail: String },

    /// A payload of the wrong variant was handed to a block.
    #[error("payload variant {found} does not fit block type {kind}")]
    PayloadMismatch { kind: BlockType, found: &'static str },
}

/// Non-fatal per-block warning produced by lenient document decoding.
#[derive(Clone, Debug, PartialEq)]
pub struct PayloadWarning {
    pub block_id: BlockId,
    pub kind: BlockType,
    pub detail: String,
}

/// One unit of content within a document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(into = "RawBlock", try_from = "RawBlock")]
pub struct Block {
    pub(crate) id: BlockId,
    pub(crate) kind: BlockType,
    pub(crate) payload: Payload,
}

impl Block {
    /// Create a block of the given type with its empty default payload and
    /// a fresh id.
    pub fn new(kind: BlockType) -> Self {
        Self {
            id: BlockId::new(),
            kind,
            payload: Payload::default_for(kind),
        }
    }

    /// Create a block from parts, validating that the payload fits.
    pub fn with_payload(id: BlockId, kind: BlockType, payload: Payload) -> Result<Self, ModelError> {
        if !payload.matches(kind) {
            return Err(ModelError::PayloadMismatch {
                kind,
                found: payload.variant_name(),
            });
        }
        Ok(Self { id, kind, payload })
    }

    pub fn id(&self) -> &BlockId {
        &self.id
    }

    pub fn kind(&self) -> BlockType {
        self.kind
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    /// Replace the payload, validating shape against the current type.
    ///
    /// This is the blur-event entry point: block editors emit a whole new
    /// payload value rather than mutating in place.
    pub fn set_payload(&mut self, payload: Payload) -> Result<(), ModelError> {
        if !payload.matches(self.kind) {
            return Err(ModelError::PayloadMismatch {
                kind: self.kind,
                found: payload.variant_name(),
            });
        }
        self.payload = payload;
        Ok(())
    }

    /// Decode a raw block strictly.
    fn decode(raw: RawBlock) -> Result<Self, ModelError> {
        let payload = decode_payload(raw.kind, raw.data)?;
        Ok(Self {
            id: raw.id,
            kind: raw.kind,
            payload,
        })
    }

    /// Decode a raw block, substituting the empty default payload (and
    /// reporting a warning) when `data` does not match `type`.
    fn decode_lenient(raw: RawBlock) -> (Self, Option<PayloadWarning>) {
        let id = raw.id.clone();
        let kind = raw.kind;
        match decode_payload(kind, raw.data) {
            Ok(payload) => (Self { id, kind, payload }, None),
            Err(err) => {
                let warning = PayloadWarning {
                    block_id: id.clone(),
                    kind,
                    detail: err.to_string(),
                };
                (
                    Self {
                        id,
                        kind,
                        payload: Payload::default_for(kind),
                    },
                    Some(warning),
                )
            }
        }
    }
}

/// Whether a document holds an article or a project page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DocumentKind {
    Article,
    Project,
}

/// The top-level authored entity.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub kind: DocumentKind,
    /// Always present, possibly empty. Rendered as the reserved title
    /// block, which is not part of the general block list.
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub thumbnails: Vec<String>,
    #[serde(default)]
    pub author_id: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub categories: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
    #[serde(default)]
    pub published: bool,
    #[serde(default)]
    pub blocks: Vec<Block>,
}

impl Document {
    /// Create an empty unpublished document.
    pub fn new(id: impl Into<String>, kind: DocumentKind) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            kind,
            title: String::new(),
            description: String::new(),
            url: String::new(),
            thumbnails: Vec::new(),
            author_id: String::new(),
            tags: Vec::new(),
            categories: Vec::new(),
            created_at: now,
            modified_at: now,
            published: false,
            blocks: Vec::new(),
        }
    }

    /// Decode a document from JSON, substituting empty defaults for blocks
    /// whose payload shape is malformed and reporting a warning per block.
    pub fn from_json_lenient(
        json: &str,
    ) -> Result<(Document, Vec<PayloadWarning>), serde_json::Error> {
        let raw: RawDocument = serde_json::from_str(json)?;
        Ok(Self::decode_lenient(raw))
    }

    fn decode_lenient(raw: RawDocument) -> (Document, Vec<PayloadWarning>) {
        let mut warnings = Vec::new();
        let blocks = raw
            .blocks
            .into_iter()
            .map(|raw_block| {
                let (block, warning) = Block::decode_lenient(raw_block);
                warnings.extend(warning);
                block
            })
            .collect();

        let doc = Document {
            id: raw.id,
            kind: raw.kind,
            title: raw.title,
            description: raw.description,
            url: raw.url,
            thumbnails: raw.thumbnails,
            author_id: raw.author_id,
            tags: raw.tags,
            categories: raw.categories,
            created_at: raw.created_at,
            modified_at: raw.modified_at,
            published: raw.published,
            blocks,
        };
        (doc, warnings)
    }
}

// === Wire shapes ===

#[derive(Serialize, Deserialize)]
struct RawBlock {
    id: BlockId,
    #[serde(rename = "type")]
    kind: BlockType,
    #[serde(default)]
    data: serde_json::Value,
}

impl From<Block> for RawBlock {
    fn from(block: Block) -> Self {
        Self {
            id: block.id,
            kind: block.kind,
            data: encode_payload(&block.payload),
        }
    }
}

impl TryFrom<RawBlock> for Block {
    type Error = ModelError;

    fn try_from(raw: RawBlock) -> Result<Self, Self::Error> {
        Block::decode(raw)
    }
}

#[derive(Serialize, Deserialize)]
struct RawDocument {
    id: String,
    kind: DocumentKind,
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    url: String,
    #[serde(default)]
    thumbnails: Vec<String>,
    #[serde(default)]
    author_id: String,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    categories: Vec<String>,
    created_at: DateTime<Utc>,
    modified_at: DateTime<Utc>,
    #[serde(default)]
    published: bool,
    #[serde(default)]
    blocks: Vec<RawBlock>,
}

#[derive(Serialize, Deserialize)]
struct TextData {
    #[serde(default)]
    text: String,
}

#[derive(Serialize, Deserialize)]
struct ListItemData {
    #[serde(default)]
    text: String,
}

fn encode_payload(payload: &Payload) -> serde_json::Value {
    let code_value = |entry: &CodeEntry| {
        serde_json::json!({
            "name": entry.name.as_str(),
            "code": entry.code,
            "lang": entry.lang.id(),
        })
    };

    match payload {
        Payload::Text(text) => serde_json::json!({ "text": text }),
        Payload::List(items) => serde_json::Value::Array(
            items
                .iter()
                .map(|text| serde_json::json!({ "text": text }))
                .collect(),
        ),
        Payload::Images(entries) => serde_json::Value::Array(
            entries
                .iter()
                .map(|entry| serde_json::json!({ "url": entry.url, "caption": entry.caption }))
                .collect(),
        ),
        Payload::Code(entry) => code_value(entry),
        Payload::CodeFiles(entries) => {
            serde_json::Value::Array(entries.iter().map(code_value).collect())
        }
    }
}

fn decode_payload(kind: BlockType, data: serde_json::Value) -> Result<Payload, ModelError> {
    let malformed = |err: serde_json::Error| ModelError::MalformedPayload {
        kind,
        detail: err.to_string(),
    };

    match kind.category() {
        Some(Category::Text) => {
            let text: TextData = serde_json::from_value(data).map_err(malformed)?;
            Ok(Payload::Text(text.text))
        }
        Some(Category::TextList) => {
            let items: Vec<ListItemData> = serde_json::from_value(data).map_err(malformed)?;
            Ok(Payload::List(items.into_iter().map(|v| v.text).collect()))
        }
        Some(Category::Code) => {
            let entry: CodeEntry = serde_json::from_value(data).map_err(malformed)?;
            Ok(Payload::Code(entry))
        }
        Some(Category::CodeList) => {
            let entries: Vec<CodeEntry> = serde_json::from_value(data).map_err(malformed)?;
            Ok(Payload::CodeFiles(entries))
        }
        None => {
            let entries: Vec<ImageEntry> = serde_json::from_value(data).map_err(malformed)?;
            Ok(Payload::Images(entries))
        }
    }
}
