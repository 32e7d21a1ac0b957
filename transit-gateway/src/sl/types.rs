//! SL API response DTOs.
//!
//! These types map directly to the `realtimedeparturesV4.json` and
//! `typeahead.json` responses. They serialize back out with the same
//! PascalCase field names, so the gateway passes `ResponseData` through
//! to its own clients unchanged in shape.
//!
//! Fields the gateway does not model are kept in `extra` and written back
//! verbatim. Departure fields are all optional: SL omits some of them for
//! some modes, and a gap in one departure must not fail the whole board.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::error::SlError;

/// Status code the SL API uses for a successful call.
const STATUS_OK: i32 = 0;

/// Envelope shared by every SL API response.
///
/// SL reports some failures (invalid key, quota exceeded) with HTTP 200
/// and a non-zero `StatusCode`, leaving `ResponseData` null.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Envelope<T> {
    pub status_code: Option<i32>,

    pub message: Option<String>,

    /// Server-side processing time in milliseconds.
    pub execution_time: Option<i64>,

    pub response_data: Option<T>,
}

impl<T> Envelope<T> {
    /// Unwrap the payload, turning a non-zero status code into an error.
    ///
    /// A missing status code is treated as success; a null payload on a
    /// successful response is returned as `None`.
    pub fn into_data(self) -> Result<Option<T>, SlError> {
        match self.status_code {
            Some(code) if code != STATUS_OK => Err(SlError::Upstream {
                code,
                message: self.message.unwrap_or_default(),
            }),
            _ => Ok(self.response_data),
        }
    }
}

/// Response from `realtimedeparturesV4.json`.
pub type StationInfo = Envelope<ResponseData>;

/// Response from `typeahead.json`.
pub type StopResponse = Envelope<Vec<StopLookupResult>>;

/// Departures at a site, grouped by transport mode.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResponseData {
    /// When SL last refreshed this data.
    pub latest_update: Option<NaiveDateTime>,

    /// Age of the data in seconds.
    pub data_age: Option<i64>,

    #[serde(default)]
    pub metros: Vec<TransportInfo>,

    #[serde(default)]
    pub buses: Vec<TransportInfo>,

    #[serde(default)]
    pub trains: Vec<TransportInfo>,

    #[serde(default)]
    pub trams: Vec<TransportInfo>,

    #[serde(default)]
    pub ships: Vec<TransportInfo>,

    /// Disruptions affecting the stop itself rather than a single departure.
    #[serde(default)]
    pub stop_point_deviations: Vec<StopPointDeviation>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One scheduled or real-time departure.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TransportInfo {
    pub group_of_line: Option<String>,

    /// e.g. "METRO", "BUS", "TRAIN".
    pub transport_mode: Option<String>,

    pub line_number: Option<String>,

    pub destination: Option<String>,

    pub journey_direction: Option<i32>,

    pub stop_area_name: Option<String>,

    pub stop_area_number: Option<i64>,

    pub stop_point_number: Option<i64>,

    pub stop_point_designation: Option<String>,

    pub time_tabled_date_time: Option<NaiveDateTime>,

    pub expected_date_time: Option<NaiveDateTime>,

    /// Human-readable countdown, e.g. "3 min" or "Nu".
    pub display_time: Option<String>,

    pub journey_number: Option<i64>,

    pub deviations: Option<Vec<Deviation>>,

    pub secondary_destination_name: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A service disruption or information notice.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Deviation {
    pub text: Option<String>,

    pub consequence: Option<Consequence>,

    pub importance_level: Option<i32>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// What a deviation means for the departure.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Consequence {
    Cancelled,
    Information,
    /// Any value SL adds later, kept as sent.
    #[serde(untagged)]
    Other(String),
}

/// A deviation attached to a stop area.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct StopPointDeviation {
    pub stop_info: Option<StopInfo>,

    pub deviation: Option<Deviation>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct StopInfo {
    pub stop_area_number: Option<i64>,

    pub stop_area_name: Option<String>,

    pub transport_mode: Option<String>,

    pub group_of_line: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One station matching a typeahead search.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct StopLookupResult {
    pub name: String,

    pub site_id: String,

    #[serde(rename = "Type")]
    pub kind: StopKind,

    /// Coordinates are sent as strings.
    pub x: String,

    pub y: String,

    /// e.g. `Products`.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Kind of stop returned by the typeahead endpoint.
///
/// With `stationsonly=true` SL only ever returns `Station`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub enum StopKind {
    Station,
    #[serde(untagged)]
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEPARTURES_JSON: &str = r#"{
        "StatusCode": 0,
        "Message": null,
        "ExecutionTime": 114,
        "ResponseData": {
            "LatestUpdate": "2024-03-15T10:01:12",
            "DataAge": 23,
            "Metros": [{
                "GroupOfLine": "tunnelbanans gröna linje",
                "DisplayTime": "3 min",
                "TransportMode": "METRO",
                "LineNumber": "19",
                "Destination": "Hässelby strand",
                "JourneyDirection": 1,
                "StopAreaName": "T-Centralen",
                "StopAreaNumber": 1051,
                "StopPointNumber": 3051,
                "StopPointDesignation": "3",
                "TimeTabledDateTime": "2024-03-15T10:04:00",
                "ExpectedDateTime": "2024-03-15T10:04:30",
                "JourneyNumber": 20143,
                "Deviations": [{
                    "Text": "Inställd",
                    "Consequence": "CANCELLED",
                    "ImportanceLevel": 5
                }],
                "SecondaryDestinationName": null
            }],
            "Buses": [],
            "Trains": [],
            "Trams": [],
            "Ships": [],
            "StopPointDeviations": [{
                "StopInfo": {
                    "StopAreaNumber": 1051,
                    "StopAreaName": "T-Centralen",
                    "TransportMode": "METRO",
                    "GroupOfLine": "tunnelbanans gröna linje"
                },
                "Deviation": {
                    "Text": "Hissen ur funktion",
                    "Consequence": null,
                    "ImportanceLevel": 2
                }
            }]
        }
    }"#;

    #[test]
    fn deserialize_departures() {
        let info: StationInfo = serde_json::from_str(DEPARTURES_JSON).unwrap();
        let data = info.into_data().unwrap().unwrap();

        assert_eq!(data.data_age, Some(23));
        assert_eq!(data.metros.len(), 1);
        assert!(data.buses.is_empty());

        let metro = &data.metros[0];
        assert_eq!(metro.line_number.as_deref(), Some("19"));
        assert_eq!(metro.stop_area_number, Some(1051));
        assert!(metro.secondary_destination_name.is_none());
        assert!(metro.extra.is_empty());

        let deviations = metro.deviations.as_ref().unwrap();
        assert_eq!(deviations[0].consequence, Some(Consequence::Cancelled));

        let stop_deviation = &data.stop_point_deviations[0];
        assert_eq!(stop_deviation.deviation.as_ref().unwrap().consequence, None);
        assert_eq!(
            stop_deviation.stop_info.as_ref().unwrap().stop_area_name.as_deref(),
            Some("T-Centralen")
        );
    }

    #[test]
    fn departures_serialize_with_upstream_names() {
        let info: StationInfo = serde_json::from_str(DEPARTURES_JSON).unwrap();
        let data = info.into_data().unwrap().unwrap();
        let value = serde_json::to_value(&data).unwrap();

        assert_eq!(value["LatestUpdate"], "2024-03-15T10:01:12");
        assert_eq!(value["Metros"][0]["LineNumber"], "19");
        assert_eq!(value["Metros"][0]["Deviations"][0]["Consequence"], "CANCELLED");
        assert_eq!(
            value["StopPointDeviations"][0]["Deviation"]["Consequence"],
            Value::Null
        );
    }

    #[test]
    fn response_data_round_trips_unchanged() {
        let original: Value = serde_json::json!({
            "LatestUpdate": "2024-03-15T10:01:12",
            "DataAge": 23,
            "Metros": [],
            "Buses": [{
                "GroupOfLine": null,
                "TransportMode": "BUS",
                "LineNumber": "53",
                "Destination": "Karolinska institutet",
                "JourneyDirection": 2,
                "StopAreaName": "Slussen",
                "StopAreaNumber": 1011,
                "StopPointNumber": 10511,
                "StopPointDesignation": "G",
                "TimeTabledDateTime": "2024-03-15T10:06:00",
                "ExpectedDateTime": "2024-03-15T10:07:00",
                "DisplayTime": "6 min",
                "JourneyNumber": 31201,
                "Deviations": [{
                    "Text": "Försenad",
                    "Consequence": "DELAYED",
                    "ImportanceLevel": 3,
                    "Url": "https://sl.se/storningar"
                }],
                "SecondaryDestinationName": "Odenplan",
                "PredictionState": "NORMAL"
            }],
            "Trains": [],
            "Trams": [],
            "Ships": [],
            "StopPointDeviations": [],
            "StopAreaGroup": {"Id": 7}
        });

        let data: ResponseData = serde_json::from_value(original.clone()).unwrap();
        assert_eq!(
            data.buses[0].deviations.as_ref().unwrap()[0].consequence,
            Some(Consequence::Other("DELAYED".to_string()))
        );
        assert_eq!(data.buses[0].extra["PredictionState"], "NORMAL");

        assert_eq!(serde_json::to_value(&data).unwrap(), original);
    }

    #[test]
    fn sparse_departure_is_accepted() {
        let json = r#"{"Ships": [{"TransportMode": "SHIP", "LineNumber": "80"}]}"#;
        let data: ResponseData = serde_json::from_str(json).unwrap();

        let ship = &data.ships[0];
        assert_eq!(ship.line_number.as_deref(), Some("80"));
        assert!(ship.destination.is_none());
        assert!(ship.time_tabled_date_time.is_none());
    }

    #[test]
    fn missing_mode_lists_default_to_empty() {
        let json = r#"{"StatusCode": 0, "ResponseData": {"LatestUpdate": null, "DataAge": null}}"#;
        let info: StationInfo = serde_json::from_str(json).unwrap();
        let data = info.into_data().unwrap().unwrap();
        assert!(data.metros.is_empty());
        assert!(data.stop_point_deviations.is_empty());
    }

    #[test]
    fn deserialize_typeahead() {
        let json = r#"{
            "StatusCode": 0,
            "Message": null,
            "ExecutionTime": 0,
            "ResponseData": [{
                "Name": "T-Centralen (Stockholm)",
                "SiteId": "9001",
                "Type": "Station",
                "X": "18061046",
                "Y": "59331332",
                "Products": null
            }]
        }"#;
        let response: StopResponse = serde_json::from_str(json).unwrap();
        let stops = response.into_data().unwrap().unwrap();

        assert_eq!(stops.len(), 1);
        assert_eq!(stops[0].site_id, "9001");
        assert_eq!(stops[0].kind, StopKind::Station);

        let value = serde_json::to_value(&stops[0]).unwrap();
        assert_eq!(value["Type"], "Station");
        assert_eq!(value["SiteId"], "9001");
        assert_eq!(value["Products"], Value::Null);
        assert!(value.as_object().unwrap().contains_key("Products"));
    }

    #[test]
    fn unknown_stop_kind_is_kept() {
        let json = r#"{"Name": "Sergels torg", "SiteId": "1", "Type": "Address", "X": "0", "Y": "0"}"#;
        let stop: StopLookupResult = serde_json::from_str(json).unwrap();

        assert_eq!(stop.kind, StopKind::Other("Address".to_string()));
        assert_eq!(serde_json::to_value(&stop).unwrap()["Type"], "Address");
    }

    #[test]
    fn non_zero_status_is_an_error() {
        let json = r#"{"StatusCode": 1002, "Message": "Key is invalid", "ResponseData": null}"#;
        let response: StopResponse = serde_json::from_str(json).unwrap();

        match response.into_data() {
            Err(SlError::Upstream { code, message }) => {
                assert_eq!(code, 1002);
                assert_eq!(message, "Key is invalid");
            }
            other => panic!("expected upstream error, got {other:?}"),
        }
    }

    #[test]
    fn null_payload_on_success_is_none() {
        let json = r#"{"StatusCode": 0, "Message": null, "ResponseData": null}"#;
        let response: StopResponse = serde_json::from_str(json).unwrap();
        assert!(response.into_data().unwrap().is_none());
    }
}
