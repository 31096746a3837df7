// ── Wireless client types ──
//
// A client's data arrives from two pages per radio. Each page parser yields
// its own partial sample type; `parse::wireless::merge_clients` unions them
// into `WifiClientRecord`s keyed by hardware address.

use super::mac::MacAddress;

/// Signal quality fields (from the wireless status page).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SignalQuality {
    pub rssi: f64,
    pub noise: f64,
    pub snr: f64,
    pub quality: f64,
}

/// Traffic and timing fields (from the wireless info page).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TrafficStats {
    pub associated_secs: f64,
    pub tx_frames: f64,
    pub tx_unicast_frames: f64,
    pub tx_errors: f64,
    pub tx_retries: f64,
    pub tx_retry_rate: f64,
    pub rx_unicast_frames: f64,
    pub rx_broadcast_frames: f64,
    pub tx_rate: f64,
    pub rx_rate: f64,
}

/// One client as seen on a radio's status page.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalSample {
    pub radio: String,
    pub mac: MacAddress,
    pub signal: SignalQuality,
}

/// One client as seen on a radio's info page.
#[derive(Debug, Clone, PartialEq)]
pub struct TrafficSample {
    pub radio: String,
    pub mac: MacAddress,
    pub traffic: TrafficStats,
}

/// A wireless client after merging both pages.
///
/// Fields that no page supplied stay at zero.
#[derive(Debug, Clone, PartialEq)]
pub struct WifiClientRecord {
    /// Numeric radio ID, e.g. `0`.
    pub radio: String,
    pub mac: MacAddress,
    pub signal: SignalQuality,
    pub traffic: TrafficStats,
}

impl WifiClientRecord {
    /// The radio's interface name as the gateway reports it (`wl0`, `wl1`, ...).
    pub fn interface(&self) -> String {
        format!("wl{}", self.radio)
    }
}

impl From<SignalSample> for WifiClientRecord {
    fn from(sample: SignalSample) -> Self {
        Self {
            radio: sample.radio,
            mac: sample.mac,
            signal: sample.signal,
            traffic: TrafficStats::default(),
        }
    }
}

impl From<TrafficSample> for WifiClientRecord {
    fn from(sample: TrafficSample) -> Self {
        Self {
            radio: sample.radio,
            mac: sample.mac,
            signal: SignalQuality::default(),
            traffic: sample.traffic,
        }
    }
}
