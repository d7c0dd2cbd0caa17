// SPDX-FileCopyrightText: 2026 InboxPilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Query modules for CRUD operations on storage entities.

pub mod ai_audit;
pub mod api_keys;
pub mod categories;
pub mod connections;
pub mod meetings;
pub mod messages;
pub mod notes;
pub mod stats;
pub mod tasks;
pub mod users;

use inboxpilot_core::ParentType;
use rusqlite::types::Type;

/// Read a `parent_type` column back into its enum.
pub(crate) fn parent_type_at(row: &rusqlite::Row<'_>, idx: usize) -> rusqlite::Result<ParentType> {
    let raw: String = row.get(idx)?;
    raw.parse()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// Wrap a search term for a literal substring match with `LIKE ... ESCAPE '\'`.
pub(crate) fn like_pattern(query: &str) -> String {
    let mut pattern = String::with_capacity(query.len() + 2);
    pattern.push('%');
    for c in query.trim().chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[cfg(test)]
mod tests {
    use super::like_pattern;

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern(" a_b "), "%a\\_b%");
        assert_eq!(like_pattern("50%"), "%50\\%%");
        assert_eq!(like_pattern(r"c:\x"), r"%c:\\x%");
        assert_eq!(like_pattern("plain"), "%plain%");
    }
}
