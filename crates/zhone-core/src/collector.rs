// ── Collection cycle ──
//
// One call to `Collector::collect` fetches every page it needs, parses them
// and correlates the results into a `Snapshot`. Nothing is cached between
// calls. The first fetch or parse error aborts the cycle.

use std::sync::LazyLock;

use futures_util::future::try_join_all;
use regex::Regex;
use tracing::debug;
use zhone_api::{GatewayClient, pages};

use crate::error::CoreError;
use crate::model::{
    AttachedGpon, GponRecord, InterfaceRecord, SignalSample, TrafficSample, WifiClientRecord,
};
use crate::parse::{
    join_status, merge_clients, parse_gpon_status, parse_interface_stats, parse_interface_status,
    parse_signal_page, parse_traffic_page,
};

/// The interface the optical uplink is reported against.
pub const GPON_INTERFACE_ID: &str = "eth0";

static RADIO_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"wl(\d+)$").expect("radio ID regex is valid"));

/// Everything one collection cycle produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub interfaces: Vec<InterfaceRecord>,
    pub gpon: Option<AttachedGpon>,
    pub clients: Vec<WifiClientRecord>,
}

/// Numeric radio IDs of the wireless interfaces, deduplicated, in the order
/// the interfaces were listed.
pub fn radio_ids(interfaces: &[InterfaceRecord]) -> Vec<String> {
    let mut radios: Vec<String> = Vec::new();
    for caps in interfaces.iter().filter_map(|i| RADIO_ID.captures(&i.id)) {
        let id = &caps[1];
        if !radios.iter().any(|r| r == id) {
            radios.push(id.to_owned());
        }
    }
    radios
}

/// Attach the GPON record to the uplink interface.
///
/// The optical link state is authoritative for the uplink, so it replaces
/// that interface's port-list status. Without an uplink interface the record
/// is dropped.
pub fn attach_gpon(
    interfaces: &mut [InterfaceRecord],
    gpon: Option<GponRecord>,
) -> Option<AttachedGpon> {
    let record = gpon?;
    let Some(uplink) = interfaces.iter_mut().find(|i| i.id == GPON_INTERFACE_ID) else {
        debug!(
            interface = GPON_INTERFACE_ID,
            "uplink interface not listed, dropping GPON record"
        );
        return None;
    };
    uplink.up = record.up;
    Some(AttachedGpon {
        interface_id: uplink.id.clone(),
        interface_name: uplink.name.clone(),
        record,
    })
}

/// Runs collection cycles against one gateway.
#[derive(Debug, Clone)]
pub struct Collector {
    client: GatewayClient,
}

impl Collector {
    pub fn new(client: GatewayClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &GatewayClient {
        &self.client
    }

    /// Run one full cycle.
    pub async fn collect(&self) -> Result<Snapshot, CoreError> {
        let (stats_page, status_page, gpon_page) = tokio::try_join!(
            self.client.interface_stats(),
            self.client.ethernet_status(),
            self.client.gpon_status(),
        )?;

        let status = parse_interface_status(&status_page)
            .map_err(|e| CoreError::parse(pages::ETHERNET_STATUS, e))?;
        let rows = parse_interface_stats(&stats_page)
            .map_err(|e| CoreError::parse(pages::INTERFACE_STATS, e))?;
        let gpon =
            parse_gpon_status(&gpon_page).map_err(|e| CoreError::parse(pages::GPON_STATUS, e))?;

        let mut interfaces = join_status(rows, &status);
        let gpon = attach_gpon(&mut interfaces, gpon);

        let radios = radio_ids(&interfaces);
        debug!(
            interfaces = interfaces.len(),
            radios = ?radios,
            gpon = gpon.is_some(),
            "baseline pages parsed"
        );

        let per_radio = try_join_all(radios.iter().map(|radio| self.collect_radio(radio))).await?;
        let mut signal = Vec::new();
        let mut traffic = Vec::new();
        for (radio_signal, radio_traffic) in per_radio {
            signal.extend(radio_signal);
            traffic.extend(radio_traffic);
        }
        let clients = merge_clients(signal, traffic);
        debug!(clients = clients.len(), "wireless clients merged");

        Ok(Snapshot {
            interfaces,
            gpon,
            clients,
        })
    }

    async fn collect_radio(
        &self,
        radio: &str,
    ) -> Result<(Vec<SignalSample>, Vec<TrafficSample>), CoreError> {
        let (status_page, info_page) = tokio::try_join!(
            self.client.wireless_status(radio),
            self.client.wireless_info(radio),
        )?;

        let signal = parse_signal_page(radio, &status_page).map_err(|e| {
            CoreError::parse(format!("{}?curRadio={radio}", pages::WIRELESS_STATUS), e)
        })?;
        let traffic = parse_traffic_page(radio, &info_page).map_err(|e| {
            CoreError::parse(format!("{}?curRadio={radio}", pages::WIRELESS_INFO), e)
        })?;
        debug!(
            radio,
            signal = signal.len(),
            traffic = traffic.len(),
            "radio pages parsed"
        );
        Ok((signal, traffic))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::InterfaceCounters;

    fn iface(id: &str, name: &str, up: bool) -> InterfaceRecord {
        InterfaceRecord {
            id: id.into(),
            name: name.into(),
            up,
            link_speed: 0.0,
            counters: InterfaceCounters::default(),
        }
    }

    #[test]
    fn radio_ids_are_deduplicated_in_order() {
        let interfaces = [
            iface("eth0", "GPON", true),
            iface("wl1", "Wireless 5G", true),
            iface("wl0", "Wireless", true),
            iface("wl1", "Wireless 5G again", true),
            iface("wlan", "Not a radio", true),
        ];
        assert_eq!(radio_ids(&interfaces), vec!["1".to_owned(), "0".to_owned()]);
    }

    #[test]
    fn radio_id_must_end_the_interface_id() {
        let interfaces = [iface("wl0.1", "Guest", true), iface("br-wl2", "Bridge", true)];
        assert_eq!(radio_ids(&interfaces), vec!["2".to_owned()]);
    }

    #[test]
    fn gpon_attaches_to_uplink_and_overrides_status() {
        let mut interfaces = vec![iface("eth0", "GPON", true), iface("eth1", "LAN 1", true)];
        let record = GponRecord {
            up: false,
            rx_power_dbm: -20.0,
            tx_power_dbm: 2.0,
            up_transitions: 3.0,
        };

        let attached = attach_gpon(&mut interfaces, Some(record)).unwrap();
        assert_eq!(
            attached,
            AttachedGpon {
                interface_id: "eth0".into(),
                interface_name: "GPON".into(),
                record,
            }
        );
        assert!(!interfaces[0].up);
        assert!(interfaces[1].up);
    }

    #[test]
    fn gpon_without_uplink_is_dropped() {
        let mut interfaces = vec![iface("eth1", "LAN 1", true)];
        assert_eq!(attach_gpon(&mut interfaces, Some(GponRecord::default())), None);
        assert!(interfaces[0].up);
    }

    #[test]
    fn missing_gpon_leaves_uplink_status() {
        let mut interfaces = vec![iface("eth0", "GPON", true)];
        assert_eq!(attach_gpon(&mut interfaces, None), None);
        assert!(interfaces[0].up);
    }
}
