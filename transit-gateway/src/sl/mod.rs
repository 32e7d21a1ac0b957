//! SL (Storstockholms Lokaltrafik) open API client.
//!
//! Two endpoints are used:
//! - `realtimedeparturesV4.json`: departures at a site, grouped by mode
//! - `typeahead.json`: station search by name
//!
//! Both wrap their payload in a `{StatusCode, Message, ResponseData}`
//! envelope; a non-zero status code is a failure even on HTTP 200.

mod client;
mod error;
mod types;

pub use client::{SlClient, SlConfig};
pub use error::SlError;
pub use types::{
    Consequence, Deviation, Envelope, ResponseData, StationInfo, StopInfo, StopKind,
    StopLookupResult, StopPointDeviation, StopResponse, TransportInfo,
};
