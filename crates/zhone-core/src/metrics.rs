// ── Metric descriptors and exposition ──
//
// The metric set is a static table: each descriptor names a gauge and its
// label schema, and knows nothing about the pages its value comes from.
// `snapshot_samples` maps a `Snapshot` onto the table and `encode` renders
// the samples through a throwaway `prometheus::Registry`, so overlapping
// scrapes never share metric state.

use prometheus::{Encoder, GaugeVec, Opts, Registry, TextEncoder};
use tracing::trace;

use crate::collector::Snapshot;
use crate::error::CoreError;

pub const NAMESPACE: &str = "cpe";

/// Content type of the encoded output.
pub const TEXT_FORMAT: &str = prometheus::TEXT_FORMAT;

/// The label names a metric carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelSchema {
    /// Interface and GPON metrics.
    Interface,
    /// Per-client wireless metrics.
    WirelessClient,
}

impl LabelSchema {
    pub const fn names(self) -> &'static [&'static str] {
        match self {
            Self::Interface => &["instance", "interface", "interface_name"],
            Self::WirelessClient => &["instance", "wlan_interface", "client_mac"],
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct MetricDesc {
    pub subsystem: &'static str,
    pub name: &'static str,
    pub help: &'static str,
    pub labels: LabelSchema,
}

impl MetricDesc {
    const fn interface(name: &'static str, help: &'static str) -> Self {
        Self {
            subsystem: "",
            name,
            help,
            labels: LabelSchema::Interface,
        }
    }

    const fn gpon(name: &'static str, help: &'static str) -> Self {
        Self {
            subsystem: "gpon",
            name,
            help,
            labels: LabelSchema::Interface,
        }
    }

    const fn wifi(name: &'static str, help: &'static str) -> Self {
        Self {
            subsystem: "wifi",
            name,
            help,
            labels: LabelSchema::WirelessClient,
        }
    }

    /// Fully qualified name, e.g. `cpe_gpon_receive_power`.
    pub fn fq_name(&self) -> String {
        if self.subsystem.is_empty() {
            format!("{NAMESPACE}_{}", self.name)
        } else {
            format!("{NAMESPACE}_{}_{}", self.subsystem, self.name)
        }
    }

    fn opts(&self) -> Opts {
        Opts::new(self.name, self.help)
            .namespace(NAMESPACE)
            .subsystem(self.subsystem)
    }
}

// ── Interface metrics ───────────────────────────────────────────────

pub static RECEIVE_BYTES: MetricDesc =
    MetricDesc::interface("receive_bytes", "Received bytes per interface.");
pub static TRANSMIT_BYTES: MetricDesc =
    MetricDesc::interface("transmit_bytes", "Transmitted bytes per interface.");
pub static RECEIVE_FRAMES: MetricDesc =
    MetricDesc::interface("receive_frames", "Received frames per interface.");
pub static TRANSMIT_FRAMES: MetricDesc =
    MetricDesc::interface("transmit_frames", "Transmitted frames per interface.");
pub static RECEIVE_ERRORS: MetricDesc =
    MetricDesc::interface("receive_errors", "Received errors per interface.");
pub static TRANSMIT_ERRORS: MetricDesc =
    MetricDesc::interface("transmit_errors", "Transmitted errors per interface.");
pub static RECEIVE_DROPS: MetricDesc =
    MetricDesc::interface("receive_drops", "Received drops per interface.");
pub static TRANSMIT_DROPS: MetricDesc =
    MetricDesc::interface("transmit_drops", "Transmitted drops per interface.");
pub static IF_SPEED: MetricDesc = MetricDesc::interface("if_speed", "Interface Speed.");
pub static IF_STATUS: MetricDesc = MetricDesc::interface("if_status", "Interface Status.");

// ── GPON metrics ────────────────────────────────────────────────────

pub static GPON_RECEIVE_POWER: MetricDesc =
    MetricDesc::gpon("receive_power", "GPON Receive Power.");
pub static GPON_TRANSMIT_POWER: MetricDesc =
    MetricDesc::gpon("transmit_power", "GPON Transmit Power.");
pub static GPON_UP_TRANSITIONS: MetricDesc =
    MetricDesc::gpon("up_transitions", "GPON Link Up Transitions.");

// ── Wireless client metrics ─────────────────────────────────────────

pub static WIFI_TIME_ASSOCIATED: MetricDesc = MetricDesc::wifi("time_associated", "Time Associated");
pub static WIFI_TRANSMIT_FRAMES: MetricDesc = MetricDesc::wifi("transmit_frames", "Transmit Frames");
pub static WIFI_TRANSMIT_UNICAST_FRAMES: MetricDesc =
    MetricDesc::wifi("transmit_unicast_frames", "Transmit Unicast Frames");
pub static WIFI_TRANSMIT_ERRORS: MetricDesc =
    MetricDesc::wifi("transmit_errors", "Transmit Failures");
pub static WIFI_TRANSMIT_RETRIES: MetricDesc =
    MetricDesc::wifi("transmit_retries", "Transmit Retries");
pub static WIFI_TRANSMIT_RETRY_RATE: MetricDesc =
    MetricDesc::wifi("transmit_retry_rate", "Transmit Retry Rate");
pub static WIFI_RECEIVE_UNICAST_FRAMES: MetricDesc =
    MetricDesc::wifi("receive_unicast_frames", "Receive Unicast Frames");
pub static WIFI_RECEIVE_BROADCAST_FRAMES: MetricDesc =
    MetricDesc::wifi("receive_broadcast_frames", "Receive Multicast/Broadcast Frames");
pub static WIFI_TRANSMIT_RATE: MetricDesc = MetricDesc::wifi("transmit_rate", "Transmit Rate");
pub static WIFI_RECEIVE_RATE: MetricDesc = MetricDesc::wifi("receive_rate", "Receive Rate");
pub static WIFI_RSSI: MetricDesc = MetricDesc::wifi("rssi", "RSSI");
pub static WIFI_NOISE: MetricDesc = MetricDesc::wifi("noise", "Noise");
pub static WIFI_SNR: MetricDesc = MetricDesc::wifi("snr", "SNR");
pub static WIFI_QUALITY: MetricDesc = MetricDesc::wifi("quality", "Quality");

/// Every metric the exporter can emit, in exposition order.
pub static DESCRIPTORS: [&MetricDesc; 27] = [
    &RECEIVE_BYTES,
    &TRANSMIT_BYTES,
    &RECEIVE_FRAMES,
    &TRANSMIT_FRAMES,
    &RECEIVE_ERRORS,
    &TRANSMIT_ERRORS,
    &RECEIVE_DROPS,
    &TRANSMIT_DROPS,
    &IF_SPEED,
    &IF_STATUS,
    &GPON_RECEIVE_POWER,
    &GPON_TRANSMIT_POWER,
    &GPON_UP_TRANSITIONS,
    &WIFI_TIME_ASSOCIATED,
    &WIFI_TRANSMIT_FRAMES,
    &WIFI_TRANSMIT_UNICAST_FRAMES,
    &WIFI_TRANSMIT_ERRORS,
    &WIFI_TRANSMIT_RETRIES,
    &WIFI_TRANSMIT_RETRY_RATE,
    &WIFI_RECEIVE_UNICAST_FRAMES,
    &WIFI_RECEIVE_BROADCAST_FRAMES,
    &WIFI_TRANSMIT_RATE,
    &WIFI_RECEIVE_RATE,
    &WIFI_RSSI,
    &WIFI_NOISE,
    &WIFI_SNR,
    &WIFI_QUALITY,
];

// ── Samples ─────────────────────────────────────────────────────────

/// One gauge value with its label values, in `desc.labels` order.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub desc: &'static MetricDesc,
    pub labels: Vec<String>,
    pub value: f64,
}

fn flag(value: bool) -> f64 {
    f64::from(u8::from(value))
}

/// Map a snapshot onto the descriptor table.
///
/// `instance` is the value of the `instance` label on every sample.
pub fn snapshot_samples(snapshot: &Snapshot, instance: &str) -> Vec<Sample> {
    let mut samples = Vec::new();
    let mut push = |desc: &'static MetricDesc, labels: &[&str], value: f64| {
        samples.push(Sample {
            desc,
            labels: labels.iter().map(|l| (*l).to_owned()).collect(),
            value,
        });
    };

    for iface in &snapshot.interfaces {
        let labels = [instance, iface.id.as_str(), iface.name.as_str()];
        let c = &iface.counters;
        push(&RECEIVE_BYTES, &labels, c.rx_bytes);
        push(&TRANSMIT_BYTES, &labels, c.tx_bytes);
        push(&RECEIVE_FRAMES, &labels, c.rx_frames);
        push(&TRANSMIT_FRAMES, &labels, c.tx_frames);
        push(&RECEIVE_ERRORS, &labels, c.rx_errors);
        push(&TRANSMIT_ERRORS, &labels, c.tx_errors);
        push(&RECEIVE_DROPS, &labels, c.rx_drops);
        push(&TRANSMIT_DROPS, &labels, c.tx_drops);
        push(&IF_SPEED, &labels, iface.link_speed);
        push(&IF_STATUS, &labels, flag(iface.up));
    }

    if let Some(gpon) = &snapshot.gpon {
        let labels = [
            instance,
            gpon.interface_id.as_str(),
            gpon.interface_name.as_str(),
        ];
        push(&GPON_RECEIVE_POWER, &labels, gpon.record.rx_power_dbm);
        push(&GPON_TRANSMIT_POWER, &labels, gpon.record.tx_power_dbm);
        push(&GPON_UP_TRANSITIONS, &labels, gpon.record.up_transitions);
    }

    for client in &snapshot.clients {
        let interface = client.interface();
        let labels = [instance, interface.as_str(), client.mac.as_str()];
        let (s, t) = (&client.signal, &client.traffic);
        push(&WIFI_TIME_ASSOCIATED, &labels, t.associated_secs);
        push(&WIFI_TRANSMIT_FRAMES, &labels, t.tx_frames);
        push(&WIFI_TRANSMIT_UNICAST_FRAMES, &labels, t.tx_unicast_frames);
        push(&WIFI_TRANSMIT_ERRORS, &labels, t.tx_errors);
        push(&WIFI_TRANSMIT_RETRIES, &labels, t.tx_retries);
        push(&WIFI_TRANSMIT_RETRY_RATE, &labels, t.tx_retry_rate);
        push(&WIFI_RECEIVE_UNICAST_FRAMES, &labels, t.rx_unicast_frames);
        push(&WIFI_RECEIVE_BROADCAST_FRAMES, &labels, t.rx_broadcast_frames);
        push(&WIFI_TRANSMIT_RATE, &labels, t.tx_rate);
        push(&WIFI_RECEIVE_RATE, &labels, t.rx_rate);
        push(&WIFI_RSSI, &labels, s.rssi);
        push(&WIFI_NOISE, &labels, s.noise);
        push(&WIFI_SNR, &labels, s.snr);
        push(&WIFI_QUALITY, &labels, s.quality);
    }

    samples
}

/// Render samples in the Prometheus text exposition format.
///
/// Metrics without samples are omitted entirely.
pub fn encode(samples: &[Sample]) -> Result<String, CoreError> {
    let registry = Registry::new();

    for desc in DESCRIPTORS {
        let mut family = samples.iter().filter(|s| std::ptr::eq(s.desc, desc)).peekable();
        if family.peek().is_none() {
            continue;
        }
        let gauge = GaugeVec::new(desc.opts(), desc.labels.names())?;
        registry.register(Box::new(gauge.clone()))?;
        let mut series = 0usize;
        for sample in family {
            let values: Vec<&str> = sample.labels.iter().map(String::as_str).collect();
            gauge.get_metric_with_label_values(&values)?.set(sample.value);
            series += 1;
        }
        trace!(metric = %desc.fq_name(), series, "encoded family");
    }

    let mut buffer = Vec::new();
    TextEncoder::new().encode(&registry.gather(), &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| CoreError::Exposition(e.to_string()))
}
