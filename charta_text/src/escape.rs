// Copyright 2025 the Charta Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;

/// Escapes the five XML special characters (`& < > " '`) as entities.
///
/// This is applied exactly once, at emission. It is not idempotent: escaping
/// `&amp;` again yields `&amp;amp;`.
pub fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn escapes_all_special_characters() {
        assert_eq!(
            escape_xml(r#"a & b < c > d "e" 'f'"#),
            "a &amp; b &lt; c &gt; d &quot;e&quot; &apos;f&apos;"
        );
    }

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(escape_xml("Revenue (μ$)"), "Revenue (μ$)");
    }

    #[test]
    fn escaping_twice_double_escapes() {
        let once = escape_xml("A&B");
        assert_eq!(once, "A&amp;B");
        assert_eq!(escape_xml(&once), "A&amp;amp;B");
    }
}
