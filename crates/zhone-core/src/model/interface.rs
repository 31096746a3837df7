// ── Interface and optical link types ──

/// Link state and speed for one interface, from the port list payload.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LinkStatus {
    pub up: bool,
    /// Device-reported speed, passed through unit-less. 0 when not reported.
    pub speed: f64,
}

/// Traffic counters for one interface, in the order the stats table lists them.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InterfaceCounters {
    pub rx_bytes: f64,
    pub rx_frames: f64,
    pub rx_errors: f64,
    pub rx_drops: f64,
    pub tx_bytes: f64,
    pub tx_frames: f64,
    pub tx_errors: f64,
    pub tx_drops: f64,
}

/// One row of the interface statistics table, before the status join.
#[derive(Debug, Clone, PartialEq)]
pub struct InterfaceRow {
    pub id: String,
    pub name: String,
    pub counters: InterfaceCounters,
}

/// A fully joined interface: counters plus link state.
#[derive(Debug, Clone, PartialEq)]
pub struct InterfaceRecord {
    /// Short interface token, e.g. `eth0` or `wl1`.
    pub id: String,
    /// Human label from the stats table, e.g. `LAN Port 1`.
    pub name: String,
    pub up: bool,
    pub link_speed: f64,
    pub counters: InterfaceCounters,
}

impl InterfaceRecord {
    /// Join a stats row with its port-list entry. A missing entry means the
    /// two pages disagree transiently, not an error: the link reads as down
    /// with speed 0.
    pub fn from_row(row: InterfaceRow, status: Option<&LinkStatus>) -> Self {
        let status = status.copied().unwrap_or_default();
        Self {
            id: row.id,
            name: row.name,
            up: status.up,
            link_speed: status.speed,
            counters: row.counters,
        }
    }
}

/// Optical line status snapshot from the GPON status page.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GponRecord {
    pub up: bool,
    pub rx_power_dbm: f64,
    pub tx_power_dbm: f64,
    pub up_transitions: f64,
}

/// A GPON record together with the interface it describes.
#[derive(Debug, Clone, PartialEq)]
pub struct AttachedGpon {
    pub interface_id: String,
    pub interface_name: String,
    pub record: GponRecord,
}
