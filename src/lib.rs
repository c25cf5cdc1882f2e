//! Extraction job for the Heureka catalog API.
//!
//! Downloads the complete category listing and the top products of every
//! category over JSON-RPC, then serializes both to flat CSV tables. One run
//! produces two files and exits; this is a scheduled job, not a service.

pub mod client;
pub mod domain;
pub mod models;
pub mod services;
