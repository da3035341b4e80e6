// SPDX-FileCopyrightText: 2025 Mustofa Amami <amammustofa@gmail.com>
// SPDX-License-Identifier: MIT

//! HTML entity escaping for untrusted submission text.
//!
//! Applied to field values before they are embedded in the outbound message,
//! so the text stays inert if it is ever rendered as HTML downstream.

/// Escape `& < > " '` to their HTML entities.
///
/// `&` is handled by the same single pass as the rest, so already-escaped
/// input is escaped again rather than passed through.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_all_special_characters() {
        assert_eq!(
            escape_html(r#"<a href="x" onclick='y'>&</a>"#),
            "&lt;a href=&quot;x&quot; onclick=&#x27;y&#x27;&gt;&amp;&lt;/a&gt;"
        );
    }

    #[test]
    fn neutralizes_script_tags() {
        assert_eq!(
            escape_html("<script>alert(1)</script>"),
            "&lt;script&gt;alert(1)&lt;/script&gt;"
        );
    }

    #[test]
    fn leaves_plain_text_untouched() {
        assert_eq!(escape_html("Hello, world. Ça va?"), "Hello, world. Ça va?");
        assert_eq!(escape_html(""), "");
    }

    #[test]
    fn double_escapes_preescaped_input() {
        assert_eq!(escape_html("&lt;"), "&amp;lt;");
    }
}
