// SPDX-FileCopyrightText: 2026 InboxPilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Crude token estimate recorded with every audited response.

/// Roughly four characters per token, never less than one.
pub fn estimate_tokens(text: &str) -> u64 {
    (text.chars().count() as u64 / 4).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn empty_text_is_one_token() {
        assert_eq!(estimate_tokens(""), 1);
    }

    #[test]
    fn counts_characters_not_bytes() {
        assert_eq!(estimate_tokens("abcdefgh"), 2);
        // Eight two-byte characters.
        assert_eq!(estimate_tokens("éééééééé"), 2);
    }

    proptest! {
        #[test]
        fn estimate_is_at_least_one_and_quarter_of_chars(text in ".{0,400}") {
            let chars = text.chars().count() as u64;
            let estimate = estimate_tokens(&text);
            prop_assert!(estimate >= 1);
            prop_assert_eq!(estimate, (chars / 4).max(1));
        }
    }
}
