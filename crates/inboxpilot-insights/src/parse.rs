// SPDX-FileCopyrightText: 2026 InboxPilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

/// Split a "one item per line" answer into cleaned items.
///
/// Each line is trimmed, loses any leading `-` bullets, and is trimmed
/// again. Empty results are dropped. Duplicates are kept.
pub fn parse_item_lines(text: &str) -> Vec<String> {
    text.split(['\n', '\r'])
        .map(|line| line.trim().trim_start_matches('-').trim())
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn strips_bullets_and_blank_lines() {
        let text = "- Send the deck\n\n  -- Book a room  \n-\nCall Sam\r\n";
        assert_eq!(
            parse_item_lines(text),
            vec!["Send the deck", "Book a room", "Call Sam"]
        );
    }

    #[test]
    fn only_leading_dashes_are_removed() {
        assert_eq!(parse_item_lines("- follow-up with ops -"), vec!["follow-up with ops -"]);
    }

    #[test]
    fn duplicates_are_kept() {
        assert_eq!(parse_item_lines("a\na"), vec!["a", "a"]);
    }

    #[test]
    fn lone_carriage_returns_split() {
        assert_eq!(parse_item_lines("one\rtwo"), vec!["one", "two"]);
    }

    proptest! {
        #[test]
        fn items_are_trimmed_and_bounded_by_lines(text in "[-a-z \n]{0,80}") {
            let items = parse_item_lines(&text);
            prop_assert!(items.len() <= text.split('\n').count());
            for item in items {
                prop_assert!(!item.is_empty());
                prop_assert_eq!(item.trim(), item.as_str());
            }
        }
    }
}
