//! Handler for dual-side OCR extraction.
//!
//! Uploads are forwarded to the vision API (both sides concurrently),
//! normalized, and merged front-wins. Nothing is persisted here: the
//! merged record goes back to the user for manual edit/confirm, and
//! only an explicit card save stores it.

use axum::extract::{Multipart, State};
use axum::Json;
use cardfolio_core::ocr::{merge_sides, normalize_fields, CardFields};
use cardfolio_core::types::CardSide;
use cardfolio_db::models::zone::CreateInteractiveZone;
use cardfolio_vision::{DualExtraction, ExtractionResponse};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::handlers::images::sniff_image;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Response body for the extraction endpoint.
#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    /// Merged, normalized contact fields (front wins per field).
    pub fields: CardFields,
    /// Per-field bounding boxes from both sides, ready to submit with
    /// the card create call.
    pub zones: Vec<CreateInteractiveZone>,
    /// Non-fatal problems, e.g. one side failing extraction.
    pub warnings: Vec<String>,
}

/// POST /api/v1/business-cards/extract
///
/// Multipart body: `front` image (required), `back` image (optional).
/// Both sides are extracted concurrently; one side failing does not
/// abort the other. Only a failure of every submitted side is an error
/// (502).
pub async fn extract_card(
    _auth: AuthUser,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Json<ExtractResponse>> {
    let mut front: Option<Vec<u8>> = None;
    let mut back: Option<Vec<u8>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "front" => {
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                front = Some(data.to_vec());
            }
            "back" => {
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                back = Some(data.to_vec());
            }
            _ => {} // ignore unknown fields
        }
    }

    let front = front.ok_or_else(|| {
        AppError::BadRequest("Multipart field 'front' with the card image is required".into())
    })?;

    let (front_mime, _) = sniff_image(&front)?;
    let back = back
        .map(|bytes| sniff_image(&bytes).map(|(mime, _)| (bytes, mime)))
        .transpose()?;

    let dual = state
        .vision
        .extract_both_sides(
            (front.as_slice(), front_mime),
            back.as_ref().map(|(bytes, mime)| (bytes.as_slice(), *mime)),
        )
        .await;

    // Every submitted side failing is the only fatal case; the front
    // error is the one reported.
    let DualExtraction { front, back } = dual;
    let (front, back) = match (front, back) {
        (Err(e), None) => return Err(e.into()),
        (Err(e), Some(Err(back_err))) => {
            tracing::warn!(error = %back_err, "Back side extraction also failed");
            return Err(e.into());
        }
        (front, back) => (front, back),
    };

    let mut warnings = Vec::new();
    let mut zones = Vec::new();

    let front_fields = match front {
        Ok(result) => collect_side(result, CardSide::Front, &mut zones),
        Err(e) => {
            tracing::warn!(error = %e, "Front side extraction failed");
            warnings.push("Front side extraction failed; fields come from the back side".into());
            CardFields::default()
        }
    };

    let back_fields = match back {
        Some(Ok(result)) => collect_side(result, CardSide::Back, &mut zones),
        Some(Err(e)) => {
            tracing::warn!(error = %e, "Back side extraction failed");
            warnings.push("Back side extraction failed; fields come from the front side".into());
            CardFields::default()
        }
        None => CardFields::default(),
    };

    Ok(Json(ExtractResponse {
        fields: merge_sides(front_fields, back_fields),
        zones,
        warnings,
    }))
}

/// Normalize one side's fields and append its zones.
fn collect_side(
    result: ExtractionResponse,
    side: CardSide,
    zones: &mut Vec<CreateInteractiveZone>,
) -> CardFields {
    zones.extend(result.zones.into_iter().map(|z| CreateInteractiveZone {
        side: side.as_str().to_string(),
        field_name: z.field_name,
        field_value: z.field_value,
        x: z.x,
        y: z.y,
        width: z.width,
        height: z.height,
    }));
    normalize_fields(result.fields)
}
