//! Activation token formatting. Users paste tokens from email with arbitrary
//! spacing; the backend expects characters in groups of three joined by single
//! spaces.

/// Characters per displayed group.
pub const TOKEN_GROUP_SIZE: usize = 3;

/// Strips all whitespace and re-chunks the remaining characters into groups of
/// [`TOKEN_GROUP_SIZE`] separated by a single space. Total and idempotent.
pub fn normalize_token(input: &str) -> String {
    let compact: Vec<char> = input.chars().filter(|c| !c.is_whitespace()).collect();

    compact
        .chunks(TOKEN_GROUP_SIZE)
        .map(|group| group.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join(" ")
}
