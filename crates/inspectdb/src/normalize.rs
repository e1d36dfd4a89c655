use inspectdb_core::Value;

use indexmap::IndexMap;
use std::collections::HashSet;

/// Separator Django uses between lookups in query keywords; a field name
/// must never contain it.
const LOOKUP_SEP: &str = "__";

/// Suffix of a conventional foreign key column, dropped from the field name.
const FOREIGN_KEY_SUFFIX: &str = "_id";

const PYTHON_KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global",
    "if", "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return",
    "try", "while", "with", "yield",
];

/// A column name turned into a field name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedName {
    /// The field name to declare.
    pub name: String,

    /// `db_column`, when the field name no longer matches the column.
    pub params: IndexMap<String, Value>,

    /// One note per rename rule that fired.
    pub notes: Vec<String>,
}

/// Turns `column` into a valid field name that is not yet in `used`.
///
/// `is_relation` is set for foreign key columns: their `_id` suffix is
/// dropped because the field itself adds it back.
pub fn normalize_column_name(
    column: &str,
    used: &HashSet<String>,
    is_relation: bool,
) -> NormalizedName {
    let mut params = IndexMap::new();
    let mut notes = vec![];

    let lowered = column.to_lowercase();
    let mut name = lowered.clone();
    if name != column {
        notes.push("Field name made lowercase.".to_string());
    }

    if is_relation {
        // A column named just `_id` keeps its name.
        match name.strip_suffix(FOREIGN_KEY_SUFFIX) {
            Some(stripped) if !stripped.is_empty() => name = stripped.to_string(),
            _ => {
                params.insert("db_column".to_string(), Value::from(column));
            }
        }
    }

    let mut replaced = 0;
    name = name
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '_' {
                c
            } else {
                replaced += 1;
                '_'
            }
        })
        .collect();
    if replaced > 0 {
        notes.push("Field renamed to remove unsuitable characters.".to_string());
    }

    if name.contains(LOOKUP_SEP) {
        while name.contains(LOOKUP_SEP) {
            name = name.replace(LOOKUP_SEP, "_");
        }
        // Underscores introduced by the replacement above are not worth a
        // second note.
        if lowered.contains(LOOKUP_SEP) {
            notes.push(
                "Field renamed because it contained more than one '_' in a row.".to_string(),
            );
        }
    }

    if name.starts_with('_') {
        name = format!("field{name}");
        notes.push("Field renamed because it started with '_'.".to_string());
    }

    if name.ends_with('_') {
        name = format!("{name}field");
        notes.push("Field renamed because it ended with '_'.".to_string());
    }

    if PYTHON_KEYWORDS.contains(&name.as_str()) {
        name.push_str("_field");
        notes.push("Field renamed because it was a Python reserved word.".to_string());
    }

    if name.chars().next().is_some_and(char::is_numeric) {
        name = format!("number_{name}");
        notes.push("Field renamed because it wasn't a valid Python identifier.".to_string());
    }

    if used.contains(&name) {
        let mut num = 0;
        while used.contains(&format!("{name}_{num}")) {
            num += 1;
        }
        name = format!("{name}_{num}");
        notes.push("Field renamed because of name conflict.".to_string());
    }

    if column != name && !notes.is_empty() {
        params.insert("db_column".to_string(), Value::from(column));
    }

    NormalizedName {
        name,
        params,
        notes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalize(column: &str) -> NormalizedName {
        normalize_column_name(column, &HashSet::new(), false)
    }

    fn db_column(normalized: &NormalizedName) -> Option<&str> {
        normalized.params.get("db_column").and_then(Value::as_str)
    }

    #[test]
    fn valid_names_are_untouched() {
        for column in ["id", "name", "created_at", "a1", "x_y_z"] {
            let normalized = normalize(column);
            assert_eq!(normalized.name, column);
            assert!(normalized.params.is_empty());
            assert!(normalized.notes.is_empty());
        }
    }

    #[test]
    fn normalizing_twice_changes_nothing() {
        for column in ["SKU", "first name", "__a", "b__", "class", "1st", "Wé!rd--Ñame"] {
            let once = normalize(column);
            let twice = normalize(&once.name);
            assert_eq!(twice.name, once.name, "column={column:?}");
            assert!(twice.notes.is_empty(), "column={column:?}");
            assert!(twice.params.is_empty(), "column={column:?}");
        }
    }

    #[test]
    fn lowercase() {
        let normalized = normalize("SKU");
        assert_eq!(normalized.name, "sku");
        assert_eq!(normalized.notes, ["Field name made lowercase."]);
        assert_eq!(db_column(&normalized), Some("SKU"));
    }

    #[test]
    fn unsuitable_characters() {
        let normalized = normalize("first name");
        assert_eq!(normalized.name, "first_name");
        assert_eq!(
            normalized.notes,
            ["Field renamed to remove unsuitable characters."]
        );
        assert_eq!(db_column(&normalized), Some("first name"));
    }

    #[test]
    fn replaced_runs_collapse_without_a_separator_note() {
        let normalized = normalize("a - b");
        assert_eq!(normalized.name, "a_b");
        assert_eq!(
            normalized.notes,
            ["Field renamed to remove unsuitable characters."]
        );
    }

    #[test]
    fn original_double_underscore_is_noted() {
        let normalized = normalize("a__b");
        assert_eq!(normalized.name, "a_b");
        assert_eq!(
            normalized.notes,
            ["Field renamed because it contained more than one '_' in a row."]
        );
        assert_eq!(db_column(&normalized), Some("a__b"));
    }

    #[test]
    fn leading_and_trailing_underscores() {
        let normalized = normalize("_hidden_");
        assert_eq!(normalized.name, "field_hidden_field");
        assert_eq!(
            normalized.notes,
            [
                "Field renamed because it started with '_'.",
                "Field renamed because it ended with '_'.",
            ]
        );
    }

    #[test]
    fn reserved_words() {
        let normalized = normalize("class");
        assert_eq!(normalized.name, "class_field");
        assert_eq!(
            normalized.notes,
            ["Field renamed because it was a Python reserved word."]
        );
        assert_eq!(db_column(&normalized), Some("class"));

        // Keywords are matched after lowercasing
        let normalized = normalize("None");
        assert_eq!(normalized.name, "none");
    }

    #[test]
    fn leading_digit() {
        let normalized = normalize("1st");
        assert_eq!(normalized.name, "number_1st");
        assert_eq!(
            normalized.notes,
            ["Field renamed because it wasn't a valid Python identifier."]
        );
    }

    #[test]
    fn conflicts_pick_the_smallest_free_suffix() {
        let mut used = HashSet::new();
        let mut names = vec![];

        for column in ["Name", "NAME", "nAmE", "name"] {
            let normalized = normalize_column_name(column, &used, false);
            used.insert(normalized.name.clone());
            names.push(normalized.name);
        }

        assert_eq!(names, ["name", "name_0", "name_1", "name_2"]);
    }

    #[test]
    fn conflict_note_and_db_column() {
        let used = HashSet::from(["name".to_string(), "name_0".to_string()]);
        let normalized = normalize_column_name("name", &used, false);
        assert_eq!(normalized.name, "name_1");
        assert_eq!(normalized.notes, ["Field renamed because of name conflict."]);
        assert_eq!(db_column(&normalized), Some("name"));
    }

    #[test]
    fn relation_suffix_is_stripped_silently() {
        let normalized = normalize_column_name("order_id", &HashSet::new(), true);
        assert_eq!(normalized.name, "order");
        assert!(normalized.notes.is_empty());
        assert!(normalized.params.is_empty());
    }

    #[test]
    fn relation_without_suffix_keeps_db_column() {
        let normalized = normalize_column_name("owner", &HashSet::new(), true);
        assert_eq!(normalized.name, "owner");
        assert!(normalized.notes.is_empty());
        assert_eq!(db_column(&normalized), Some("owner"));
    }

    #[test]
    fn relation_with_uppercase_suffix() {
        let normalized = normalize_column_name("Order_ID", &HashSet::new(), true);
        assert_eq!(normalized.name, "order");
        assert_eq!(normalized.notes, ["Field name made lowercase."]);
        assert_eq!(db_column(&normalized), Some("Order_ID"));
    }

    #[test]
    fn relation_named_only_suffix() {
        let normalized = normalize_column_name("_id", &HashSet::new(), true);
        assert_eq!(normalized.name, "field_id");
        assert_eq!(normalized.notes, ["Field renamed because it started with '_'."]);
        assert_eq!(db_column(&normalized), Some("_id"));

        let normalized = normalize_column_name("_ID", &HashSet::new(), true);
        assert_eq!(normalized.name, "field_id");
        assert_eq!(
            normalized.notes,
            [
                "Field name made lowercase.",
                "Field renamed because it started with '_'."
            ]
        );
        assert_eq!(db_column(&normalized), Some("_ID"));
    }

    #[test]
    fn db_column_only_accompanies_notes() {
        for column in ["SKU", "a b", "x__y", "_p", "q_", "def", "9", "ok", "snake_case"] {
            let normalized = normalize(column);
            let renamed = normalized.name != column;
            if renamed && !normalized.notes.is_empty() {
                assert_eq!(db_column(&normalized), Some(column), "column={column:?}");
            }
            if normalized.notes.is_empty() {
                assert_eq!(db_column(&normalized), None, "column={column:?}");
            }
        }
    }
}
