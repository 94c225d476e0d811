//! Text cleanup for PDF embedding
//!
//! Typographic punctuation is folded to ASCII look-alikes, then anything
//! outside Latin-1 is dropped. Hindi and other non-Latin scripts do not
//! survive; the dashboard keeps the full text.

/// Fold common typographic characters and strip everything above U+00FF
pub fn sanitize_for_pdf(text: &str) -> String {
    let mut out = String::with_capacity(text.len());

    for ch in text.chars() {
        match ch {
            '\u{2013}' | '\u{2014}' => out.push('-'),
            '\u{2018}' | '\u{2019}' => out.push('\''),
            '\u{201c}' | '\u{201d}' => out.push('"'),
            '\u{2022}' => out.push('*'),
            '\u{2026}' => out.push_str("..."),
            c if u32::from(c) <= 0xFF => out.push(c),
            _ => {}
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_typographic_punctuation_folded() {
        assert_eq!(
            sanitize_for_pdf("\u{201c}Net 90\u{201d} \u{2014} vendor\u{2019}s terms\u{2026}"),
            "\"Net 90\" - vendor's terms..."
        );
        assert_eq!(sanitize_for_pdf("\u{2022} 2019\u{2013}2024"), "* 2019-2024");
    }

    #[test]
    fn test_latin1_kept() {
        assert_eq!(sanitize_for_pdf("Café £500 ©"), "Café £500 ©");
    }

    #[test]
    fn test_devanagari_dropped() {
        assert_eq!(sanitize_for_pdf("Risk: असीमित दायित्व"), "Risk:  ");
    }

    #[test]
    fn test_emoji_dropped() {
        assert_eq!(sanitize_for_pdf("ok 👍"), "ok ");
    }

    proptest! {
        #[test]
        fn sanitize_is_idempotent(text in any::<String>()) {
            let once = sanitize_for_pdf(&text);
            prop_assert_eq!(sanitize_for_pdf(&once), once);
        }

        #[test]
        fn sanitize_is_identity_on_ascii(text in "[ -~\\n\\t]*") {
            prop_assert_eq!(sanitize_for_pdf(&text), text);
        }

        #[test]
        fn sanitized_text_is_latin1(text in any::<String>()) {
            prop_assert!(sanitize_for_pdf(&text).chars().all(|c| u32::from(c) <= 0xFF));
        }
    }
}
