//! `Establishments` endpoints: lookup by FHRSID and search.

use crate::client::FhrsClient;
use crate::error::Error;
use crate::transport::Transport;
use crate::types::{Establishment, Establishments};

/// Filters for `EstablishmentsService::search`. Unset fields are not sent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchParams {
    pub name: Option<String>,
    pub address: Option<String>,
    pub longitude: Option<f64>,
    pub latitude: Option<f64>,
    /// Miles from `longitude`/`latitude`.
    pub max_distance_limit: Option<f64>,
    pub business_type_id: Option<i64>,
    pub scheme_type_key: Option<String>,
    pub rating_key: Option<String>,
    /// One of `Equal`, `GreaterThanOrEqual`, `LessThanOrEqual`.
    pub rating_operator_key: Option<String>,
    pub local_authority_id: Option<i64>,
    pub country_id: Option<i64>,
    pub sort_option_key: Option<String>,
    pub page_number: Option<u32>,
    pub page_size: Option<u32>,
}

impl SearchParams {
    /// Query pairs under the API's parameter names. Floats use the shortest
    /// representation that round-trips (`1` rather than `1.0`).
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        let mut push = |key: &'static str, value: Option<String>| {
            if let Some(value) = value {
                query.push((key, value));
            }
        };

        push("name", self.name.clone());
        push("address", self.address.clone());
        push("longitude", self.longitude.map(|v| v.to_string()));
        push("latitude", self.latitude.map(|v| v.to_string()));
        push("maxDistanceLimit", self.max_distance_limit.map(|v| v.to_string()));
        push("businessTypeId", self.business_type_id.map(|v| v.to_string()));
        push("schemeTypeKey", self.scheme_type_key.clone());
        push("ratingKey", self.rating_key.clone());
        push("ratingOperatorKey", self.rating_operator_key.clone());
        push("localAuthorityId", self.local_authority_id.map(|v| v.to_string()));
        push("countryId", self.country_id.map(|v| v.to_string()));
        push("sortOptionKey", self.sort_option_key.clone());
        push("pageNumber", self.page_number.map(|v| v.to_string()));
        push("pageSize", self.page_size.map(|v| v.to_string()));
        query
    }
}

/// Borrowed view of a client for the `Establishments` resource.
#[derive(Debug)]
pub struct EstablishmentsService<'a, T> {
    client: &'a FhrsClient<T>,
}

impl<'a, T: Transport> EstablishmentsService<'a, T> {
    pub(crate) fn new(client: &'a FhrsClient<T>) -> Self {
        Self { client }
    }

    /// Fetch one establishment. `Ok(None)` when the API has no such FHRSID.
    pub fn get_by_id(&self, id: &str) -> Result<Option<Establishment>, Error> {
        self.client.execute(&format!("Establishments/{id}"), &[])
    }

    /// Whether an establishment with this FHRSID exists.
    pub fn exists(&self, id: &str) -> Result<bool, Error> {
        self.client.probe(&format!("Establishments/{id}"), &[])
    }

    pub fn search(&self, params: &SearchParams) -> Result<Option<Establishments>, Error> {
        self.client.execute("Establishments", &params.to_query())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_set_fields_are_sent() {
        let params = SearchParams {
            name: Some("Ali's".to_string()),
            ..Default::default()
        };
        assert_eq!(params.to_query(), vec![("name", "Ali's".to_string())]);
    }

    #[test]
    fn empty_params_send_nothing() {
        assert!(SearchParams::default().to_query().is_empty());
    }

    #[test]
    fn every_field_maps_to_its_query_name() {
        let params = SearchParams {
            name: Some("Ali's".to_string()),
            address: Some("Portsmouth".to_string()),
            longitude: Some(-1.09159100055695),
            latitude: Some(50.7984199523926),
            max_distance_limit: Some(1.0),
            business_type_id: Some(1),
            scheme_type_key: Some("FHRS".to_string()),
            rating_key: Some("3".to_string()),
            rating_operator_key: Some("GreaterThanOrEqual".to_string()),
            local_authority_id: Some(876),
            country_id: Some(1),
            sort_option_key: Some("rating".to_string()),
            page_number: Some(2),
            page_size: Some(10),
        };
        let query = params.to_query();
        let keys: Vec<&str> = query.iter().map(|(k, _)| *k).collect();
        assert_eq!(
            keys,
            vec![
                "name",
                "address",
                "longitude",
                "latitude",
                "maxDistanceLimit",
                "businessTypeId",
                "schemeTypeKey",
                "ratingKey",
                "ratingOperatorKey",
                "localAuthorityId",
                "countryId",
                "sortOptionKey",
                "pageNumber",
                "pageSize",
            ]
        );
        assert_eq!(query[2].1, "-1.09159100055695");
        assert_eq!(query[3].1, "50.7984199523926");
        assert_eq!(query[4].1, "1");
    }

    #[test]
    fn floats_use_shortest_form() {
        let params = SearchParams {
            latitude: Some(0.5),
            max_distance_limit: Some(25.0),
            ..Default::default()
        };
        assert_eq!(
            params.to_query(),
            vec![("latitude", "0.5".to_string()), ("maxDistanceLimit", "25".to_string())]
        );
    }
}
