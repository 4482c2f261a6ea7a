use crate::error::ValidationError;

/// Longest ticker accepted from user input.
pub const MAX_SYMBOL_LEN: usize = 16;

/// Trims and uppercases a user-supplied ticker and checks its characters.
///
/// Accepts ASCII alphanumerics plus `.`, `-`, `^` and `=`, which covers share
/// classes (`BRK.B`), indices (`^GSPC`) and FX/futures (`EURUSD=X`). At least
/// one alphanumeric is required, so `.` and `..` never reach a URL path.
///
/// # Errors
/// Returns [`ValidationError::EmptySymbol`] for blank input and
/// [`ValidationError::MalformedSymbol`] for anything else that cannot be a ticker.
pub fn normalize_symbol(raw: &str) -> Result<String, ValidationError> {
    let symbol = raw.trim().to_uppercase();

    if symbol.is_empty() {
        return Err(ValidationError::EmptySymbol);
    }

    let valid_chars = symbol
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '^' | '='));

    let has_alphanumeric = symbol.chars().any(|c| c.is_ascii_alphanumeric());

    if !valid_chars || !has_alphanumeric || symbol.len() > MAX_SYMBOL_LEN {
        return Err(ValidationError::MalformedSymbol(symbol));
    }

    Ok(symbol)
}
