//! Transit departures gateway.
//!
//! A small HTTP service in front of the SL real-time API: departure times
//! for a site, and a cached station-name lookup.

pub mod cache;
pub mod config;
pub mod domain;
pub mod sl;
pub mod web;
