//! In-process imitation of the FHRS API for tests and local runs.
//!
//! Serves `/Establishments/{id}`, `/Establishments` and `/Ratings` from
//! seeded fixtures. Like the real service it requires `x-api-version`,
//! answers in the language named by `Accept-Language`, reports bad input as
//! JSON `{ "Message": ... }` and outages as an HTML page.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

pub const UNAVAILABLE_PAGE: &str = "The service is unavailable.";
pub const INVALID_REQUEST: &str = "The request is invalid.";
pub const MISSING_VERSION: &str = "The x-api-version header is required.";

const ZERO_DATE: &str = "0001-01-01T00:00:00";
const RATINGS_EXTRACT_DATE: &str = "2020-02-03T22:32:34.2688747+00:00";

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Scores {
    #[serde(rename = "Hygiene")]
    pub hygiene: Option<i32>,
    #[serde(rename = "Structural")]
    pub structural: Option<i32>,
    #[serde(rename = "ConfidenceInManagement")]
    pub confidence_in_management: Option<i32>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Geocode {
    pub longitude: String,
    pub latitude: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meta {
    pub data_source: String,
    pub extract_date: String,
    pub item_count: usize,
    pub returncode: String,
    pub total_count: usize,
    pub total_pages: usize,
    pub page_size: usize,
    pub page_number: usize,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Link {
    pub rel: String,
    pub href: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Establishment {
    #[serde(rename = "FHRSID")]
    pub fhrs_id: i64,
    #[serde(rename = "LocalAuthorityBusinessID")]
    pub local_authority_business_id: String,
    pub business_name: String,
    pub business_type: String,
    #[serde(rename = "BusinessTypeID")]
    pub business_type_id: i64,
    pub address_line1: String,
    pub address_line2: String,
    pub address_line3: String,
    pub address_line4: String,
    pub post_code: String,
    pub phone: String,
    pub rating_value: String,
    pub rating_key: String,
    pub rating_date: String,
    pub local_authority_code: String,
    pub local_authority_name: String,
    pub local_authority_web_site: String,
    pub local_authority_email_address: String,
    #[serde(rename = "scores")]
    pub scores: Scores,
    pub scheme_type: String,
    #[serde(rename = "geocode")]
    pub geocode: Geocode,
    pub right_to_reply: String,
    pub distance: Option<f64>,
    pub new_rating_pending: bool,
    #[serde(rename = "meta")]
    pub meta: Meta,
    #[serde(rename = "links")]
    pub links: Vec<Link>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Establishments {
    pub establishments: Vec<Establishment>,
    pub meta: Meta,
    pub links: Vec<Link>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rating {
    pub rating_id: i64,
    pub rating_name: String,
    pub rating_key: String,
    pub rating_key_name: String,
    pub scheme_type_id: i64,
    pub links: Vec<Link>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Ratings {
    pub ratings: Vec<Rating>,
    pub meta: Meta,
    pub links: Vec<Link>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(rename = "Message")]
    pub message: String,
}

/// Query parameters understood by the search endpoint; others are ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchQuery {
    pub name: Option<String>,
    pub address: Option<String>,
    pub page_number: Option<usize>,
    pub page_size: Option<usize>,
}

/// Data the server answers from.
#[derive(Clone, Debug)]
pub struct Fixtures {
    pub establishments: Vec<Establishment>,
    /// When set, every route answers 503 with an HTML page.
    pub unavailable: bool,
}

impl Default for Fixtures {
    fn default() -> Self {
        Self {
            establishments: seed_establishments(),
            unavailable: false,
        }
    }
}

impl Fixtures {
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }
}

type Db = Arc<Fixtures>;

pub fn app() -> Router {
    app_with(Fixtures::default())
}

pub fn app_with(fixtures: Fixtures) -> Router {
    Router::new()
        .route("/Establishments", get(search_establishments))
        .route("/Establishments/{id}", get(get_establishment))
        .route("/Ratings", get(list_ratings))
        .with_state(Arc::new(fixtures))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    serve(listener, app()).await
}

pub async fn serve(listener: TcpListener, router: Router) -> Result<(), std::io::Error> {
    axum::serve(listener, router).await
}

fn error_json(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorBody {
            message: message.into(),
        }),
    )
        .into_response()
}

/// Outage and version checks shared by every route. Returns the language
/// suffix used in rating keys.
fn preflight(db: &Fixtures, headers: &HeaderMap) -> Result<&'static str, Response> {
    if db.unavailable {
        return Err((StatusCode::SERVICE_UNAVAILABLE, Html(UNAVAILABLE_PAGE)).into_response());
    }
    let version = headers
        .get("x-api-version")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u32>().ok());
    if version.is_none() {
        return Err(error_json(StatusCode::BAD_REQUEST, MISSING_VERSION));
    }
    let welsh = headers
        .get(header::ACCEPT_LANGUAGE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.eq_ignore_ascii_case("cy-GB"));
    Ok(if welsh { "cy-gb" } else { "en-gb" })
}

async fn get_establishment(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<Establishment>, Response> {
    preflight(&db, &headers)?;
    let Ok(id) = id.parse::<i64>() else {
        return Err(error_json(StatusCode::BAD_REQUEST, INVALID_REQUEST));
    };
    db.establishments
        .iter()
        .find(|e| e.fhrs_id == id)
        .cloned()
        .map(Json)
        .ok_or_else(|| {
            error_json(
                StatusCode::NOT_FOUND,
                format!("No establishment found with EstablishmentId: {id}"),
            )
        })
}

async fn search_establishments(
    State(db): State<Db>,
    headers: HeaderMap,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Establishments>, Response> {
    preflight(&db, &headers)?;

    let contains = |haystack: &str, needle: &str| haystack.to_lowercase().contains(&needle.to_lowercase());
    let matches: Vec<&Establishment> = db
        .establishments
        .iter()
        .filter(|e| query.name.as_deref().map_or(true, |n| contains(&e.business_name, n)))
        .filter(|e| {
            query.address.as_deref().map_or(true, |a| {
                [&e.address_line1, &e.address_line2, &e.address_line3, &e.address_line4, &e.post_code]
                    .iter()
                    .any(|line| contains(line, a))
            })
        })
        .collect();

    let total = matches.len();
    let page_size = query.page_size.filter(|&s| s > 0).unwrap_or(total.max(1));
    let page_number = query.page_number.filter(|&n| n > 0).unwrap_or(1);
    let page: Vec<Establishment> = matches
        .into_iter()
        .skip((page_number - 1).saturating_mul(page_size))
        .take(page_size)
        .cloned()
        .collect();

    Ok(Json(Establishments {
        meta: Meta {
            data_source: "Lucene".to_string(),
            extract_date: ZERO_DATE.to_string(),
            item_count: page.len(),
            returncode: "OK".to_string(),
            total_count: total,
            total_pages: total.div_ceil(page_size),
            page_size,
            page_number,
        },
        establishments: page,
        links: vec![link("self", "http://api.ratings.food.gov.uk/establishments")],
    }))
}

async fn list_ratings(
    State(db): State<Db>,
    headers: HeaderMap,
) -> Result<Json<Ratings>, Response> {
    let lang = preflight(&db, &headers)?;
    let ratings: Vec<Rating> = (0..=5)
        .rev()
        .map(|value: i64| {
            let id = value + 7;
            Rating {
                rating_id: id,
                rating_name: value.to_string(),
                rating_key: format!("fhrs_{value}_{lang}"),
                rating_key_name: value.to_string(),
                scheme_type_id: 1,
                links: vec![link("self", &format!("http://api.ratings.food.gov.uk/ratings/{id}"))],
            }
        })
        .collect();

    Ok(Json(Ratings {
        meta: Meta {
            data_source: "API".to_string(),
            extract_date: RATINGS_EXTRACT_DATE.to_string(),
            item_count: ratings.len(),
            returncode: "OK".to_string(),
            total_count: ratings.len(),
            total_pages: 1,
            page_size: ratings.len(),
            page_number: 1,
        },
        ratings,
        links: vec![link("self", "http://api.ratings.food.gov.uk/ratings")],
    }))
}

fn link(rel: &str, href: &str) -> Link {
    Link {
        rel: rel.to_string(),
        href: href.to_string(),
    }
}

fn single_meta() -> Meta {
    Meta {
        data_source: "Lucene".to_string(),
        extract_date: ZERO_DATE.to_string(),
        item_count: 0,
        returncode: "OK".to_string(),
        total_count: 1,
        total_pages: 1,
        page_size: 1,
        page_number: 1,
    }
}

/// Three Portsmouth/Cardiff establishments; FHRSID 82940 matches the API's
/// published sample.
pub fn seed_establishments() -> Vec<Establishment> {
    let base = Establishment {
        fhrs_id: 82940,
        local_authority_business_id: "2019".to_string(),
        business_name: "Ali's".to_string(),
        business_type: "Restaurant/Cafe/Canteen".to_string(),
        business_type_id: 1,
        address_line1: "89 Commercial Road".to_string(),
        address_line2: "Portsmouth".to_string(),
        address_line3: String::new(),
        address_line4: String::new(),
        post_code: "PO1 1BA".to_string(),
        phone: String::new(),
        rating_value: "3".to_string(),
        rating_key: "fhrs_3_en-gb".to_string(),
        rating_date: "2019-08-06T00:00:00".to_string(),
        local_authority_code: "876".to_string(),
        local_authority_name: "Portsmouth".to_string(),
        local_authority_web_site: "http://www.portsmouth.gov.uk".to_string(),
        local_authority_email_address: "public.protection@portsmouthcc.gov.uk".to_string(),
        scores: Scores::default(),
        scheme_type: "FHRS".to_string(),
        geocode: Geocode {
            longitude: "-1.09159100055695".to_string(),
            latitude: "50.7984199523926".to_string(),
        },
        right_to_reply: String::new(),
        distance: None,
        new_rating_pending: false,
        meta: single_meta(),
        links: vec![link("self", "http://api.ratings.food.gov.uk/establishments/82940")],
    };

    let harbour = Establishment {
        fhrs_id: 1_045_123,
        local_authority_business_id: "PI/000123456".to_string(),
        business_name: "Harbour Kitchen".to_string(),
        address_line1: "2 Gunwharf Quays".to_string(),
        post_code: "PO1 3TZ".to_string(),
        rating_value: "5".to_string(),
        rating_key: "fhrs_5_en-gb".to_string(),
        rating_date: "2022-11-14T00:00:00".to_string(),
        scores: Scores {
            hygiene: Some(0),
            structural: Some(5),
            confidence_in_management: Some(0),
        },
        distance: Some(0.0),
        links: vec![link("self", "http://api.ratings.food.gov.uk/establishments/1045123")],
        ..base.clone()
    };

    let caffi = Establishment {
        fhrs_id: 530_871,
        local_authority_business_id: "CAR/530871".to_string(),
        business_name: "Caffi'r Bae".to_string(),
        business_type: "Takeaway/sandwich shop".to_string(),
        business_type_id: 7844,
        address_line1: "14 Stryd Bute".to_string(),
        address_line2: "Caerdydd".to_string(),
        post_code: "CF10 5AJ".to_string(),
        rating_value: "4".to_string(),
        rating_key: "fhrs_4_cy-gb".to_string(),
        rating_date: "2023-03-02T00:00:00".to_string(),
        local_authority_code: "556".to_string(),
        local_authority_name: "Cardiff".to_string(),
        local_authority_web_site: "http://www.cardiff.gov.uk".to_string(),
        local_authority_email_address: "foodsafety@cardiff.gov.uk".to_string(),
        scores: Scores {
            hygiene: Some(5),
            structural: Some(5),
            confidence_in_management: Some(10),
        },
        geocode: Geocode {
            longitude: "-3.16585".to_string(),
            latitude: "51.46337".to_string(),
        },
        links: vec![link("self", "http://api.ratings.food.gov.uk/establishments/530871")],
        ..base.clone()
    };

    vec![base, harbour, caffi]
}
