//! Embedded template text
//!
//! Templates are loaded from `templates/*.txt` at compile time.

/// Mutual NDA - loaded from templates/mutual_nda.txt
pub const MUTUAL_NDA: &str = include_str!("../templates/mutual_nda.txt");

/// Master service agreement - loaded from templates/service_agreement.txt
pub const SERVICE_AGREEMENT: &str = include_str!("../templates/service_agreement.txt");

/// Employment offer letter - loaded from templates/offer_letter.txt
pub const OFFER_LETTER: &str = include_str!("../templates/offer_letter.txt");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_templates_not_empty() {
        for text in [MUTUAL_NDA, SERVICE_AGREEMENT, OFFER_LETTER] {
            assert!(!text.trim().is_empty());
        }
    }

    #[test]
    fn test_templates_have_signature_blocks() {
        assert!(MUTUAL_NDA.contains("SIGNATURES:"));
        assert!(SERVICE_AGREEMENT.contains("SIGNATURES:"));
        assert!(OFFER_LETTER.contains("(Authorized Signatory)"));
    }

    #[test]
    fn test_jurisdiction_is_india() {
        assert!(MUTUAL_NDA.contains("governed by the laws of India"));
    }
}
