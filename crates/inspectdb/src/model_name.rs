/// Derives a model class name from a table name.
///
/// The name is title-cased the way Python's `str.title()` does it, so every
/// letter that follows a non-letter starts a new word, and then everything
/// outside `[A-Za-z0-9]` is dropped. A table whose name has no ASCII
/// alphanumerics at all becomes `Model`.
pub fn table_to_model(table: &str) -> String {
    let model: String = title(table)
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect();

    if model.is_empty() {
        "Model".to_string()
    } else {
        model
    }
}

fn title(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut previous_is_cased = false;

    for c in s.chars() {
        if previous_is_cased {
            out.extend(c.to_lowercase());
        } else {
            out.extend(c.to_uppercase());
        }
        previous_is_cased = c.is_lowercase() || c.is_uppercase();
    }

    out
}
