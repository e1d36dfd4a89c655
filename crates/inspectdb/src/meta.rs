use crate::repr::str_literal;

use inspectdb_core::driver::Constraints;

use std::collections::HashMap;

/// Builds the `Meta` class closing a model.
///
/// Unique constraints over several columns become `unique_together`, listing
/// field names in constraint column order. A unique constraint with a member
/// that cannot be tied to a field is left out and flagged with a comment.
pub(crate) fn meta_lines(
    table: &str,
    constraints: &Constraints,
    column_to_field_name: &HashMap<String, String>,
    is_view: bool,
) -> Vec<String> {
    let mut unique_together = vec![];
    let mut has_unsupported_constraint = false;

    for constraint in constraints.values().filter(|constraint| constraint.unique) {
        let fields: Option<Vec<&String>> = constraint
            .columns
            .iter()
            .map(|column| column.as_ref().and_then(|c| column_to_field_name.get(c)))
            .collect();

        let Some(fields) = fields else {
            has_unsupported_constraint = true;
            continue;
        };

        if fields.len() > 1 {
            let fields: Vec<_> = fields.iter().map(|field| str_literal(field)).collect();
            unique_together.push(format!("({})", fields.join(", ")));
        }
    }

    let managed_comment = if is_view {
        "  # Created from a view. Don't remove."
    } else {
        ""
    };

    let mut meta = vec![String::new()];
    if has_unsupported_constraint {
        meta.push("    # A unique constraint could not be introspected.".to_string());
    }
    meta.push("    class Meta:".to_string());
    meta.push(format!("        managed = False{managed_comment}"));
    meta.push(format!("        db_table = {}", str_literal(table)));

    if !unique_together.is_empty() {
        meta.push(format!(
            "        unique_together = ({},)",
            unique_together.join(", ")
        ));
    }

    meta
}
