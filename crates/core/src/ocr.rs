//! OCR field normalization and dual-side merging.
//!
//! The vision model returns one partial record per card side. This
//! module cleans each record field-by-field and merges the two sides
//! into the single record presented to the user for confirmation.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// The contact fields extracted from a card image.
///
/// Every field is optional: a side may carry any subset, and an empty
/// or unusable value normalizes to `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardFields {
    pub full_name: Option<String>,
    pub job_title: Option<String>,
    pub company: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub address: Option<String>,
    pub qr_code_url: Option<String>,
}

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"))
}

/// Trim a raw value, mapping empty results to `None`.
fn clean(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Drop an email that does not look like an address.
fn clean_email(value: Option<String>) -> Option<String> {
    clean(value).filter(|v| email_regex().is_match(v))
}

/// Prefix `https://` onto a URL that lacks a scheme.
fn clean_url(value: Option<String>) -> Option<String> {
    clean(value).map(|v| {
        if v.starts_with("http://") || v.starts_with("https://") {
            v
        } else {
            format!("https://{v}")
        }
    })
}

/// Normalize one side's raw extraction.
///
/// Strings are trimmed (empty becomes `None`), the email must match the
/// address shape or is dropped, and website/QR URLs get a scheme.
pub fn normalize_fields(raw: CardFields) -> CardFields {
    CardFields {
        full_name: clean(raw.full_name),
        job_title: clean(raw.job_title),
        company: clean(raw.company),
        phone: clean(raw.phone),
        email: clean_email(raw.email),
        website: clean_url(raw.website),
        address: clean(raw.address),
        qr_code_url: clean_url(raw.qr_code_url),
    }
}

/// Merge two normalized sides into one record.
///
/// Per field the front value wins when present, otherwise the back
/// value is used. No confidence weighting, no conflict reporting; the
/// user confirms the result before anything is persisted.
pub fn merge_sides(front: CardFields, back: CardFields) -> CardFields {
    CardFields {
        full_name: front.full_name.or(back.full_name),
        job_title: front.job_title.or(back.job_title),
        company: front.company.or(back.company),
        phone: front.phone.or(back.phone),
        email: front.email.or(back.email),
        website: front.website.or(back.website),
        address: front.address.or(back.address),
        qr_code_url: front.qr_code_url.or(back.qr_code_url),
    }
}
