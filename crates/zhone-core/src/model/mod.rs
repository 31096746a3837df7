// ── Record model ──
//
// Typed records produced by the page parsers. Everything is rebuilt from
// scratch on each collection cycle.

pub mod interface;
pub mod mac;
pub mod wireless;

pub use interface::{
    AttachedGpon, GponRecord, InterfaceCounters, InterfaceRecord, InterfaceRow, LinkStatus,
};
pub use mac::MacAddress;
pub use wireless::{SignalQuality, SignalSample, TrafficSample, TrafficStats, WifiClientRecord};
