//! Extraction pipeline between `zhone-api` and the exporter binary.
//!
//! The gateway publishes its telemetry only as HTML pages with data tucked
//! into tables and JavaScript string literals. This crate turns those pages
//! into typed records and the records into Prometheus samples:
//!
//! - **[`parse`]**: One pure parser per page. Delimited payloads are read
//!   through named [`RecordLayout`](parse::RecordLayout)s, so a firmware
//!   change to a field order only touches a layout table.
//!
//! - **[`Collector`]**: Runs one collection cycle: fetches the baseline
//!   pages concurrently, joins statistics to link status by interface ID,
//!   attaches the GPON record to the uplink, then fetches and merges the two
//!   wireless pages of every radio it found. Produces a [`Snapshot`].
//!
//! - **[`metrics`]**: Static descriptor table for every `cpe_*` gauge and
//!   the text-format encoder.
//!
//! Any fetch or parse error aborts the cycle with a [`CoreError`]; partial
//! snapshots are never produced.

pub mod collector;
pub mod error;
pub mod metrics;
pub mod model;
pub mod parse;

pub use collector::{Collector, GPON_INTERFACE_ID, Snapshot, attach_gpon, radio_ids};
pub use error::{CoreError, ParseError};
pub use metrics::{Sample, encode, snapshot_samples};
pub use model::{
    AttachedGpon, GponRecord, InterfaceCounters, InterfaceRecord, InterfaceRow, LinkStatus,
    MacAddress, SignalQuality, SignalSample, TrafficSample, TrafficStats, WifiClientRecord,
};
