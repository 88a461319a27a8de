//! Actor identifier validation.

use crate::error::ResolveError;

pub const MAX_ID_LEN: usize = 64;

fn is_id_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | ':')
}

/// Trim and check one identifier. Returns the trimmed form.
pub fn validate_actor_id(raw: &str) -> Result<&str, ResolveError> {
    let id = raw.trim();

    if id.is_empty() {
        return Err(ResolveError::invalid("actor id is empty"));
    }
    if id.len() > MAX_ID_LEN {
        return Err(ResolveError::invalid(format!(
            "actor id is longer than {} bytes",
            MAX_ID_LEN
        )));
    }
    if id.chars().all(|c| c == '.') {
        return Err(ResolveError::invalid(format!(
            "actor id {:?} is a path segment, not an identifier",
            id
        )));
    }
    if let Some(bad) = id.chars().find(|c| !is_id_char(*c)) {
        return Err(ResolveError::invalid(format!(
            "actor id {:?} contains invalid character {:?}",
            id, bad
        )));
    }

    Ok(id)
}

/// Check both identifiers of a request; they must differ after trimming
pub fn validate_pair<'a>(first: &'a str, second: &'a str) -> Result<(&'a str, &'a str), ResolveError> {
    let first = validate_actor_id(first)?;
    let second = validate_actor_id(second)?;

    if first == second {
        return Err(ResolveError::invalid(format!(
            "both actor ids are {:?}; two different actors are required",
            first
        )));
    }

    Ok((first, second))
}
