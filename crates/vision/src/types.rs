//! Wire types for the extraction endpoint.

use cardfolio_core::ocr::CardFields;
use serde::{Deserialize, Serialize};

use crate::client::VisionError;

/// Request body for `POST {base}/v1/extract`.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionRequest {
    /// Model identifier the endpoint should run.
    pub model: String,
    /// MIME type of the encoded image (e.g. `image/jpeg`).
    pub mime_type: String,
    /// Base64-encoded image bytes.
    pub image: String,
}

/// One detected field region on the card image.
///
/// Coordinates are normalized to the image dimensions (0.0 .. 1.0).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedZone {
    pub field_name: String,
    pub field_value: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Response body of the extraction endpoint.
///
/// Both members default so a sparse response (model found nothing)
/// still parses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExtractionResponse {
    #[serde(default)]
    pub fields: CardFields,
    #[serde(default)]
    pub zones: Vec<ExtractedZone>,
}

/// Outcome of a dual-side extraction.
///
/// Mirrors a "wait for all, tolerate individual failure" join: each
/// side carries its own `Result`, and `back` is absent when no back
/// image was submitted.
#[derive(Debug)]
pub struct DualExtraction {
    pub front: Result<ExtractionResponse, VisionError>,
    pub back: Option<Result<ExtractionResponse, VisionError>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_parses_full_payload() {
        let json = serde_json::json!({
            "fields": {
                "full_name": "Jane Doe",
                "job_title": "CTO",
                "company": "Acme",
                "phone": "+1 555 0100",
                "email": "jane@acme.io",
                "website": "acme.io",
                "address": null,
                "qr_code_url": null
            },
            "zones": [
                { "field_name": "full_name", "field_value": "Jane Doe",
                  "x": 0.1, "y": 0.2, "width": 0.5, "height": 0.08 }
            ]
        });

        let parsed: ExtractionResponse = serde_json::from_value(json).unwrap();
        assert_eq!(parsed.fields.full_name.as_deref(), Some("Jane Doe"));
        assert_eq!(parsed.zones.len(), 1);
        assert_eq!(parsed.zones[0].field_name, "full_name");
    }

    #[test]
    fn response_parses_sparse_payload() {
        // A model that found nothing returns an empty object.
        let parsed: ExtractionResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed.fields, CardFields::default());
        assert!(parsed.zones.is_empty());
    }

    #[test]
    fn response_tolerates_missing_zones() {
        let json = serde_json::json!({ "fields": { "company": "Acme" } });
        let parsed: ExtractionResponse = serde_json::from_value(json).unwrap();
        assert_eq!(parsed.fields.company.as_deref(), Some("Acme"));
        assert!(parsed.zones.is_empty());
    }
}
