//! List item serialization.

use crate::inline::render_inline;

/// Render list items into `<li>` markup.
///
/// In editable mode items pass through as raw text (the surface edits the
/// stored syntax directly); in read-only mode each item goes through
/// [`render_inline`]. An empty item slice yields a single empty `<li>` so
/// the surface always has one editable line.
pub fn render_list<S: AsRef<str>>(items: &[S], editable: bool) -> String {
    if items.is_empty() {
        return "<li></li>".to_string();
    }

    items
        .iter()
        .map(|item| {
            let text = item.as_ref();
            if editable {
                format!("<li>{text}</li>")
            } else {
                format!("<li>{}</li>", render_inline(text))
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use insta::assert_snapshot;

    use super::*;

    #[test]
    fn test_empty_list_keeps_one_item() {
        let items: [&str; 0] = [];
        assert_eq!(render_list(&items, true), "<li></li>");
        assert_eq!(render_list(&items, false), "<li></li>");
    }

    #[test]
    fn test_editable_is_raw() {
        assert_snapshot!(
            render_list(&["**one**", "two"], true),
            @"<li>**one**</li><li>two</li>"
        );
    }

    #[test]
    fn test_read_only_renders_inline() {
        assert_snapshot!(
            render_list(&["**one**", "two"], false),
            @"<li><b>one</b></li><li>two</li>"
        );
    }
}
