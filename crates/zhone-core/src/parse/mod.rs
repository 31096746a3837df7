// ── Page parsers ──
//
// One module per gateway page. Every parser takes the raw page text and
// returns typed records or a `ParseError`; none of them touch the network.

pub mod extract;
pub mod gpon;
pub(crate) mod html;
pub mod stats;
pub mod status;
pub mod wireless;

pub use extract::{BoundRecord, PayloadMarker, RecordLayout, parse_number, records};
pub use gpon::{parse_gpon_status, parse_power};
pub use stats::{join_status, parse_interface_stats, parse_label};
pub use status::{StatusMap, parse_interface_status, parse_port_list};
pub use wireless::{
    merge_clients, parse_signal_page, parse_signal_payload, parse_traffic_page,
    parse_traffic_payload,
};
