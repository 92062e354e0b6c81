//! Storage key naming convention for card images.
//!
//! Generates deterministic object-storage keys so an image can always
//! be located from the owning user, card, and side.

use crate::types::{CardSide, DbId};

/// Build the object-storage key for a card image.
///
/// Convention: `{user_email}/{card_id}/{side}.{ext}`
///
/// The extension is stored without its leading dot and lowercased so
/// re-uploads of the same side overwrite the previous object.
///
/// # Examples
///
/// ```
/// use cardfolio_core::naming::card_image_key;
/// use cardfolio_core::types::CardSide;
///
/// assert_eq!(
///     card_image_key("jane@acme.io", 42, CardSide::Front, "PNG"),
///     "jane@acme.io/42/front.png"
/// );
/// ```
pub fn card_image_key(user_email: &str, card_id: DbId, side: CardSide, ext: &str) -> String {
    let ext = ext.trim_start_matches('.').to_lowercase();
    format!("{user_email}/{card_id}/{side}.{ext}", side = side.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn front_key() {
        assert_eq!(
            card_image_key("jane@acme.io", 7, CardSide::Front, "jpg"),
            "jane@acme.io/7/front.jpg"
        );
    }

    #[test]
    fn back_key() {
        assert_eq!(
            card_image_key("jane@acme.io", 7, CardSide::Back, "webp"),
            "jane@acme.io/7/back.webp"
        );
    }

    #[test]
    fn extension_is_normalized() {
        assert_eq!(
            card_image_key("a@b.co", 1, CardSide::Front, ".PNG"),
            "a@b.co/1/front.png"
        );
    }
}
