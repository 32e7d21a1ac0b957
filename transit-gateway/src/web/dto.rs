//! Data transfer objects for web requests and responses.

use serde::Serialize;

use crate::domain::SiteId;
use crate::sl::{ResponseData, StopLookupResult};

use super::error::ValidationIssue;

/// Response for `GET /times/:stationId`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeparturesResponse {
    /// The requested site, as a number
    pub station_id: SiteId,

    /// Upstream `ResponseData`, unchanged
    pub results: ResponseData,
}

/// Response for `GET /stations`.
#[derive(Debug, Serialize)]
pub struct StationsResponse {
    /// The query exactly as received
    pub query: String,

    /// Matching stations
    pub results: Vec<StopLookupResult>,
}

/// Body of a 422 response.
#[derive(Debug, Serialize)]
pub struct ValidationErrorResponse {
    /// Summary of all issues
    pub message: String,

    /// One entry per failed parameter
    pub errors: Vec<ValidationIssue>,

    /// Same list as `errors`
    pub cause: Vec<ValidationIssue>,
}

/// Error response for everything other than validation.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn departures_response_uses_camel_case() {
        let response = DeparturesResponse {
            station_id: SiteId::parse("1002").unwrap(),
            results: serde_json::from_str(r#"{"LatestUpdate": null, "DataAge": 5}"#).unwrap(),
        };
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["stationId"], 1002);
        assert_eq!(value["results"]["DataAge"], 5);
        assert_eq!(value["results"]["Metros"], serde_json::json!([]));
    }
}
