pub mod cover_letter;
pub mod document;
pub mod resume;
pub mod user;

/// Returns the trimmed value if it is present and not blank.
pub fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}
