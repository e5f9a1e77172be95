/// Human-readable column name for a classroom identifier.
///
/// Identifiers look like `room-aurora@school.example`; the segment after the
/// first `-` and before the `@` is the name, capitalized. Returns `None` when
/// the identifier has no `-` or the segment is empty.
pub fn display_name(identifier: &str) -> Option<String> {
    let segment = identifier.split('-').nth(1)?;
    let name = segment.split('@').next()?;

    let mut chars = name.chars();
    let first = chars.next()?;
    Some(first.to_uppercase().chain(chars).collect())
}

/// Column header text, falling back to the raw identifier
pub fn column_label(identifier: &str) -> String {
    display_name(identifier).unwrap_or_else(|| identifier.to_string())
}
