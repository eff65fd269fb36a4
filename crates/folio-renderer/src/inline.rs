//! Inline markup substitution.
//!
//! A best-effort linear pass, not a markdown parser: each pattern is applied
//! once over the whole string, in a fixed order (bold+italic before bold
//! before italic, so greedy overlaps resolve to the most specific form).
//! Nothing beyond what a single substitution pass supports is promised.

use std::sync::LazyLock;

use regex::Regex;

static BOLD_ITALIC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*\*(.*)\*\*\*").unwrap());
static BOLD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*(.*)\*\*").unwrap());
static ITALIC_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*(.*)\*").unwrap());
static CODE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`(.*)`").unwrap());
static LINK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[(.*)\]\((.*)\)").unwrap());

/// Render a stored content string into inline HTML.
///
/// Recognized forms: `***x***` (bold italic), `**x**` (bold), `*x*`
/// (italic), `` `x` `` (inline code), `[url](label)` (link with bold
/// label). The captures are greedy and single-line.
pub fn render_inline(content: &str) -> String {
    if content.is_empty() {
        return String::new();
    }

    let out = BOLD_ITALIC_RE.replace_all(content, "<b><i>${1}</i></b>");
    let out = BOLD_RE.replace_all(&out, "<b>${1}</b>");
    let out = ITALIC_RE.replace_all(&out, "<i>${1}</i>");
    let out = CODE_RE.replace_all(&out, "<code>${1}</code>");
    let out = LINK_RE.replace_all(&out, "<a href=\"${1}\"><b>${2}</b></a>");
    out.into_owned()
}
