// ── Wireless client parser ──
//
// Each radio has two pages listing its associated clients in a `wlClients`
// script variable, `#` between clients and `|` between fields:
//
// - `zhnwlstatus.cmd` (inside the second <tbody> of `#clientTable`):
//   signal quality per client.
// - `zhnwlinfo.cmd` (anywhere in the page): traffic counters per client.
//
// No payload on a page means no clients on that radio. A bad MAC address is
// fatal: it means the fields are misaligned and nothing after it can be
// trusted.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::LazyLock;

use scraper::{Html, Selector};
use tracing::{debug, trace};

use super::extract::{PayloadMarker, RecordLayout, records};
use super::html::selector;
use crate::error::ParseError;
use crate::model::{
    MacAddress, SignalQuality, SignalSample, TrafficSample, TrafficStats, WifiClientRecord,
};

static WL_CLIENTS: LazyLock<PayloadMarker> = LazyLock::new(|| PayloadMarker::new("wlClients"));
static CLIENT_TABLE: LazyLock<Selector> = LazyLock::new(|| selector("#clientTable"));
static TBODY: LazyLock<Selector> = LazyLock::new(|| selector("tbody"));

pub static SIGNAL_LAYOUT: RecordLayout = RecordLayout {
    name: "wlstatus",
    fields: &["reserved", "mac", "rssi", "noise", "snr", "quality"],
    exact: false,
};

pub static TRAFFIC_LAYOUT: RecordLayout = RecordLayout {
    name: "wlinfo",
    fields: &[
        "mac",
        "associated_secs",
        "tx_frames",
        "tx_unicast_frames",
        "tx_errors",
        "tx_retries",
        "tx_retry_rate",
        "rx_unicast_frames",
        "rx_broadcast_frames",
        "tx_rate",
        "rx_rate",
    ],
    exact: false,
};

/// The `wlClients` payload within `text`, or `None` if the radio has no clients.
fn client_payload(text: &str) -> Result<Option<&str>, ParseError> {
    match WL_CLIENTS.find(text) {
        Ok(payload) => Ok(Some(payload)),
        Err(ParseError::PatternNotFound { .. }) => {
            trace!(marker = WL_CLIENTS.name(), "no payload");
            Ok(None)
        }
        Err(err) => Err(err),
    }
}

/// Parse a radio's wireless status page into signal samples.
pub fn parse_signal_page(radio: &str, document: &str) -> Result<Vec<SignalSample>, ParseError> {
    let html = Html::parse_document(document);
    let scope = html
        .select(&CLIENT_TABLE)
        .next()
        .and_then(|table| table.select(&TBODY).nth(1))
        .map(|body| body.text().collect::<String>())
        .unwrap_or_default();

    let Some(payload) = client_payload(&scope)? else {
        debug!(radio, "no clients on wireless status page");
        return Ok(Vec::new());
    };
    parse_signal_payload(radio, payload)
}

/// Parse the inner `wlClients` payload of a status page.
pub fn parse_signal_payload(radio: &str, payload: &str) -> Result<Vec<SignalSample>, ParseError> {
    records(payload, '#')
        .enumerate()
        .map(|(i, raw)| {
            let record = SIGNAL_LAYOUT.bind(i, raw, '|')?;
            Ok(SignalSample {
                radio: radio.to_owned(),
                mac: record.mac("mac")?,
                signal: SignalQuality {
                    rssi: record.number("rssi")?,
                    noise: record.number("noise")?,
                    snr: record.number("snr")?,
                    quality: record.number("quality")?,
                },
            })
        })
        .collect()
}

/// Parse a radio's wireless info page into traffic samples.
pub fn parse_traffic_page(radio: &str, document: &str) -> Result<Vec<TrafficSample>, ParseError> {
    let Some(payload) = client_payload(document)? else {
        debug!(radio, "no clients on wireless info page");
        return Ok(Vec::new());
    };
    parse_traffic_payload(radio, payload)
}

/// Parse the inner `wlClients` payload of an info page.
pub fn parse_traffic_payload(radio: &str, payload: &str) -> Result<Vec<TrafficSample>, ParseError> {
    records(payload, '#')
        .enumerate()
        .map(|(i, raw)| {
            let record = TRAFFIC_LAYOUT.bind(i, raw, '|')?;
            Ok(TrafficSample {
                radio: radio.to_owned(),
                mac: record.mac("mac")?,
                traffic: TrafficStats {
                    associated_secs: record.number("associated_secs")?,
                    tx_frames: record.number("tx_frames")?,
                    tx_unicast_frames: record.number("tx_unicast_frames")?,
                    tx_errors: record.number("tx_errors")?,
                    tx_retries: record.number("tx_retries")?,
                    tx_retry_rate: record.number("tx_retry_rate")?,
                    rx_unicast_frames: record.number("rx_unicast_frames")?,
                    rx_broadcast_frames: record.number("rx_broadcast_frames")?,
                    tx_rate: record.number("tx_rate")?,
                    rx_rate: record.number("rx_rate")?,
                },
            })
        })
        .collect()
}

/// Union signal and traffic samples into one record per MAC address.
///
/// Signal samples are applied first. Traffic samples then update the
/// matching record or create one of their own; an address seen on only one
/// page still yields a record, with the other page's fields at zero. The
/// output order is unspecified.
pub fn merge_clients(
    signal: Vec<SignalSample>,
    traffic: Vec<TrafficSample>,
) -> Vec<WifiClientRecord> {
    let mut clients: HashMap<MacAddress, WifiClientRecord> = HashMap::new();

    for sample in signal {
        clients.insert(sample.mac.clone(), sample.into());
    }

    for sample in traffic {
        match clients.entry(sample.mac.clone()) {
            Entry::Occupied(mut entry) => entry.get_mut().traffic = sample.traffic,
            Entry::Vacant(entry) => {
                entry.insert(sample.into());
            }
        }
    }

    clients.into_values().collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const MAC_A: &str = "AA:BB:CC:00:11:22";
    const MAC_B: &str = "aa:bb:cc:33:44:55";

    fn status_page(payload: &str) -> String {
        format!(
            r#"<html><body><table id="clientTable">
<tbody><tr><td class="hd">MAC</td><td class="hd">RSSI</td></tr></tbody>
<tbody><script language="javascript">
var wlClients = '{payload}';
</script></tbody>
</table></body></html>"#
        )
    }

    fn info_page(payload: &str) -> String {
        format!("<html><head><script>\nvar wlClients = '{payload}';\n</script></head></html>")
    }

    fn mac(raw: &str) -> MacAddress {
        MacAddress::parse(raw).unwrap()
    }

    #[test]
    fn signal_page_parses_clients() {
        let html = status_page(&format!("1|{MAC_A}|-47|-90|43|100#2|{MAC_B}|-70|-91|21|60#"));
        let samples = parse_signal_page("0", &html).unwrap();

        assert_eq!(samples.len(), 2);
        assert_eq!(
            samples[0],
            SignalSample {
                radio: "0".into(),
                mac: mac("aa:bb:cc:00:11:22"),
                signal: SignalQuality {
                    rssi: -47.0,
                    noise: -90.0,
                    snr: 43.0,
                    quality: 100.0,
                },
            }
        );
    }

    #[test]
    fn signal_page_only_reads_client_table() {
        // A payload outside #clientTable does not count.
        let html = format!(
            "<html><script>var wlClients = '1|{MAC_A}|-47|-90|43|100';</script></html>"
        );
        assert!(parse_signal_page("0", &html).unwrap().is_empty());
    }

    #[test]
    fn empty_client_list_is_not_an_error() {
        assert!(parse_signal_page("1", &status_page("")).unwrap().is_empty());
        assert!(parse_traffic_page("1", &info_page("")).unwrap().is_empty());
    }

    #[test]
    fn traffic_page_parses_clients() {
        let html = info_page(&format!("{MAC_B}|3600|100|90|1|5|0.5|80|7|866|780"));
        let samples = parse_traffic_page("1", &html).unwrap();

        assert_eq!(
            samples,
            vec![TrafficSample {
                radio: "1".into(),
                mac: mac(MAC_B),
                traffic: TrafficStats {
                    associated_secs: 3600.0,
                    tx_frames: 100.0,
                    tx_unicast_frames: 90.0,
                    tx_errors: 1.0,
                    tx_retries: 5.0,
                    tx_retry_rate: 0.5,
                    rx_unicast_frames: 80.0,
                    rx_broadcast_frames: 7.0,
                    tx_rate: 866.0,
                    rx_rate: 780.0,
                },
            }]
        );
    }

    #[test]
    fn invalid_mac_in_status_aborts() {
        let err = parse_signal_payload("0", "1|not-a-mac|-47|-90|43|100").unwrap_err();
        assert_eq!(
            err,
            ParseError::InvalidAddress {
                field: "wlstatus[0].mac".into(),
                value: "not-a-mac".into()
            }
        );
    }

    #[test]
    fn invalid_mac_in_info_aborts() {
        let payload = format!("{MAC_A}|1|1|1|1|1|1|1|1|1|1#zz:zz|1|1|1|1|1|1|1|1|1|1");
        let err = parse_traffic_payload("0", &payload).unwrap_err();
        assert!(matches!(err, ParseError::InvalidAddress { .. }));
    }

    #[test]
    fn short_record_is_shape_mismatch() {
        let err = parse_signal_payload("0", &format!("1|{MAC_A}|-47")).unwrap_err();
        assert_eq!(err, ParseError::shape("wlstatus[0] field count", 6, 3));
    }

    #[test]
    fn merge_keeps_disjoint_addresses_apart() {
        let signal = vec![SignalSample {
            radio: "0".into(),
            mac: mac(MAC_A),
            signal: SignalQuality {
                rssi: -50.0,
                noise: -90.0,
                snr: 40.0,
                quality: 90.0,
            },
        }];
        let traffic = vec![TrafficSample {
            radio: "1".into(),
            mac: mac(MAC_B),
            traffic: TrafficStats {
                associated_secs: 12.0,
                ..TrafficStats::default()
            },
        }];

        let mut merged = merge_clients(signal, traffic);
        merged.sort_by(|a, b| a.mac.cmp(&b.mac));

        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].mac, mac(MAC_A));
        assert_eq!(merged[0].radio, "0");
        assert_eq!(merged[0].traffic, TrafficStats::default());
        assert_eq!(merged[1].mac, mac(MAC_B));
        assert_eq!(merged[1].radio, "1");
        assert_eq!(merged[1].signal, SignalQuality::default());
        assert!((merged[1].traffic.associated_secs - 12.0).abs() < f64::EPSILON);
    }

    #[test]
    fn merge_combines_same_address() {
        let signal = parse_signal_payload("0", &format!("1|{MAC_A}|-47|-90|43|100")).unwrap();
        let traffic = parse_traffic_payload(
            "0",
            "aa:bb:cc:00:11:22|3600|100|90|1|5|0.5|80|7|866|780",
        )
        .unwrap();

        let merged = merge_clients(signal, traffic);
        assert_eq!(merged.len(), 1);
        let client = &merged[0];
        assert_eq!(client.interface(), "wl0");
        assert!((client.signal.rssi + 47.0).abs() < f64::EPSILON);
        assert!((client.signal.quality - 100.0).abs() < f64::EPSILON);
        assert!((client.traffic.associated_secs - 3600.0).abs() < f64::EPSILON);
        assert!((client.traffic.rx_rate - 780.0).abs() < f64::EPSILON);
    }
}
