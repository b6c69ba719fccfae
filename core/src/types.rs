//! Records mirroring the FHRS API's JSON schema.
//!
//! # Design
//! Field names on the wire are case-sensitive and inconsistent (PascalCase on
//! establishments, camelCase on metadata and ratings, lowercase wrapper keys),
//! so every record states its renames explicitly. Keys missing from a payload
//! leave the field at its default. Nullable scores and distances are `Option`
//! so `null` stays distinct from `0`.

use serde::{Deserialize, Deserializer, Serialize};

use crate::temporal::Timestamp;

/// A food business with its rating and location metadata.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Establishment {
    #[serde(rename = "FHRSID")]
    pub fhrs_id: i64,
    #[serde(rename = "LocalAuthorityBusinessID", deserialize_with = "null_as_default")]
    pub local_authority_business_id: String,
    pub business_name: String,
    pub business_type: String,
    #[serde(rename = "BusinessTypeID")]
    pub business_type_id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub address_line1: String,
    #[serde(deserialize_with = "null_as_default")]
    pub address_line2: String,
    #[serde(deserialize_with = "null_as_default")]
    pub address_line3: String,
    #[serde(deserialize_with = "null_as_default")]
    pub address_line4: String,
    #[serde(deserialize_with = "null_as_default")]
    pub post_code: String,
    #[serde(deserialize_with = "null_as_default")]
    pub phone: String,
    pub rating_value: String,
    pub rating_key: String,
    pub rating_date: Timestamp,
    pub local_authority_code: String,
    pub local_authority_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub local_authority_web_site: String,
    #[serde(deserialize_with = "null_as_default")]
    pub local_authority_email_address: String,
    #[serde(rename = "scores", deserialize_with = "null_as_default")]
    pub scores: Scores,
    pub scheme_type: String,
    #[serde(rename = "geocode", deserialize_with = "null_as_default")]
    pub geocode: Geocode,
    #[serde(deserialize_with = "null_as_default")]
    pub right_to_reply: String,
    pub distance: Option<f64>,
    pub new_rating_pending: bool,
    #[serde(rename = "meta", deserialize_with = "null_as_default")]
    pub meta: Meta,
    #[serde(rename = "links", deserialize_with = "null_as_default")]
    pub links: Vec<Link>,
}

/// Inspection scores; `None` when the API reports `null`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Scores {
    pub hygiene: Option<i32>,
    pub structural: Option<i32>,
    pub confidence_in_management: Option<i32>,
}

/// Coordinates, kept as the decimal strings the API sends.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Geocode {
    #[serde(deserialize_with = "null_as_default")]
    pub longitude: String,
    #[serde(deserialize_with = "null_as_default")]
    pub latitude: String,
}

/// Pagination and extraction metadata.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Meta {
    pub data_source: String,
    pub extract_date: Timestamp,
    pub item_count: i64,
    pub returncode: String,
    pub total_count: i64,
    pub total_pages: i64,
    pub page_size: i64,
    pub page_number: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Link {
    pub rel: String,
    pub href: String,
}

/// A page of establishments returned by a search.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Establishments {
    #[serde(deserialize_with = "null_as_default")]
    pub establishments: Vec<Establishment>,
    pub meta: Meta,
    #[serde(deserialize_with = "null_as_default")]
    pub links: Vec<Link>,
}

/// A hygiene rating value the API can award.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Rating {
    pub rating_id: i64,
    pub rating_name: String,
    pub rating_key: String,
    pub rating_key_name: String,
    pub scheme_type_id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Ratings {
    #[serde(deserialize_with = "null_as_default")]
    pub ratings: Vec<Rating>,
    pub meta: Meta,
    #[serde(deserialize_with = "null_as_default")]
    pub links: Vec<Link>,
}

/// Body of a JSON error response.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ErrorBody {
    #[serde(rename = "Message", deserialize_with = "null_as_default")]
    pub message: String,
}

/// The API writes `null` where it means "empty".
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
