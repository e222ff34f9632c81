//! Identifier-to-SQL-name transform.

/// Converts a type or field identifier to its SQL name.
///
/// Camel-case boundaries become underscores and the result is upper-cased:
/// `PersonDetail` → `PERSON_DETAIL`, `userId` → `USER_ID`. The transform is
/// total and stable — every distinct identifier maps to a distinct valid SQL
/// identifier, so it can be applied to table and column names alike.
pub fn to_sql_name(identifier: &str) -> String {
    let mut result = String::with_capacity(identifier.len() + 4);
    let mut prev_was_upper = false;

    for (i, c) in identifier.chars().enumerate() {
        if c.is_uppercase() {
            if i > 0 && !prev_was_upper {
                result.push('_');
            }
            result.push(c);
            prev_was_upper = true;
        } else {
            result.push(c.to_ascii_uppercase());
            prev_was_upper = false;
        }
    }

    result
}
