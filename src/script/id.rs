//! Object id generation for script files.
//!
//! Ids are 28 lowercase hex digits grouped `xxxxxxxx-xxxx-xxxx-xxxxxxxxxxxx`.

use std::sync::LazyLock;

use regex::Regex;
use uuid::Uuid;

/// Hex digit groups of a generated id.
const GROUPS: [usize; 4] = [8, 4, 4, 12];

/// Positions of the version and variant nibbles in a v4 UUID's simple form.
const FIXED_NIBBLES: [usize; 2] = [12, 16];

#[allow(clippy::unwrap_used)]
static ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}$").unwrap());

/// Generate a new id in the format script files use.
///
/// Entropy comes from a v4 UUID with its fixed version/variant nibbles
/// skipped, so every emitted digit is uniform over `0-f`.
pub fn generate_id() -> String {
    let simple = Uuid::new_v4().simple().to_string();
    let mut digits = simple
        .char_indices()
        .filter(|(i, _)| !FIXED_NIBBLES.contains(i))
        .map(|(_, c)| c);

    let mut id = String::with_capacity(31);
    for (n, len) in GROUPS.iter().enumerate() {
        if n > 0 {
            id.push('-');
        }
        id.extend(digits.by_ref().take(*len));
    }
    id
}

/// Check whether `id` has the shape of a generated id.
///
/// Ids read from files are never validated against this; it is a
/// diagnostic for tools.
pub fn is_well_formed(id: &str) -> bool {
    ID_PATTERN.is_match(id)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_id_shape() {
        let id = generate_id();
        assert_eq!(id.len(), 31);
        assert_eq!(id.chars().filter(|&c| c == '-').count(), 3);
        assert!(is_well_formed(&id), "{id} should be well formed");
    }

    #[test]
    fn test_generated_ids_differ() {
        let ids: HashSet<String> = (0..256).map(|_| generate_id()).collect();
        assert_eq!(ids.len(), 256);
    }

    #[test]
    fn test_every_digit_position_varies() {
        // A fixed nibble leaking through would pin one position to one value.
        let ids: Vec<String> = (0..512).map(|_| generate_id()).collect();
        for pos in (0..31).filter(|p| ![8, 13, 18].contains(p)) {
            let seen: HashSet<u8> = ids.iter().map(|id| id.as_bytes()[pos]).collect();
            assert!(seen.len() > 1, "position {pos} never varied");
        }
    }

    #[test]
    fn test_is_well_formed_rejects_uuids_and_uppercase() {
        assert!(!is_well_formed("550e8400-e29b-41d4-a716-446655440000"));
        assert!(!is_well_formed("ABCDEF01-2345-6789-abcdef012345"));
        assert!(!is_well_formed(""));
        assert!(is_well_formed("abcdef01-2345-6789-abcdef012345"));
    }
}
