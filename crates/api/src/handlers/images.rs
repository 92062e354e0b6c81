//! Handler for card image uploads.

use axum::extract::{Multipart, Path, State};
use axum::Json;
use cardfolio_core::error::CoreError;
use cardfolio_core::naming::card_image_key;
use cardfolio_core::types::{CardSide, DbId};
use cardfolio_db::models::card::BusinessCard;
use cardfolio_db::repositories::{CardRepo, UserRepo};
use image::ImageFormat;

use crate::error::{AppError, AppResult};
use crate::handlers::cards::find_owned;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// POST /api/v1/business-cards/{id}/images
///
/// Multipart body with `front` and/or `back` image fields. Each image
/// is format-sniffed (jpeg/png/webp), stored under
/// `{owner_email}/{card_id}/{side}.{ext}`, and the card row's URL
/// column is pointed at the stored object.
pub async fn upload_images(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(card_id): Path<DbId>,
    mut multipart: Multipart,
) -> AppResult<Json<BusinessCard>> {
    let mut card = find_owned(&state, card_id, auth.user_id).await?;

    // The storage key embeds the owner's email.
    let owner = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;

    let mut stored_any = false;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let side = match field.name() {
            Some("front") => CardSide::Front,
            Some("back") => CardSide::Back,
            _ => continue, // ignore unknown fields
        };

        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        let (mime, ext) = sniff_image(&bytes)?;

        let key = card_image_key(&owner.email, card_id, side, ext);
        let url = state.storage.put(&key, bytes.to_vec(), mime).await?;

        card = CardRepo::set_image_url(&state.pool, card_id, auth.user_id, side.as_str(), &url)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "BusinessCard",
                id: card_id,
            }))?;
        stored_any = true;

        tracing::info!(card_id, side = %side, key = %key, "Card image stored");
    }

    if !stored_any {
        return Err(AppError::BadRequest(
            "Multipart body must contain a 'front' or 'back' image field".into(),
        ));
    }

    Ok(Json(card))
}

/// Sniff the image format from the byte header and map it to
/// `(mime_type, extension)`. Only jpeg, png, and webp are accepted.
pub(crate) fn sniff_image(bytes: &[u8]) -> AppResult<(&'static str, &'static str)> {
    let format = image::guess_format(bytes)
        .map_err(|_| AppError::BadRequest("Upload is not a recognizable image".into()))?;

    match format {
        ImageFormat::Jpeg => Ok(("image/jpeg", "jpg")),
        ImageFormat::Png => Ok(("image/png", "png")),
        ImageFormat::WebP => Ok(("image/webp", "webp")),
        other => Err(AppError::BadRequest(format!(
            "Unsupported image format {other:?} (expected jpeg, png, or webp)"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sniffs_png_and_jpeg_headers() {
        let png_magic = b"\x89PNG\r\n\x1a\n";
        assert_eq!(sniff_image(png_magic).unwrap(), ("image/png", "png"));

        let jpeg_magic = b"\xFF\xD8\xFF\xE0";
        assert_eq!(sniff_image(jpeg_magic).unwrap(), ("image/jpeg", "jpg"));
    }

    #[test]
    fn rejects_unsupported_format() {
        // A valid GIF header is a recognizable image, just not one we accept.
        let gif_magic = b"GIF89a";
        assert!(sniff_image(gif_magic).is_err());
    }

    #[test]
    fn rejects_garbage() {
        assert!(sniff_image(b"definitely not an image").is_err());
    }
}
