// ── Interface statistics parser ──
//
// `statsifc.html` renders one table (`#table`) whose first <tbody> is the
// header and whose next two hold logical and physical interfaces. Each row
// is a `Name (id)` label followed by eight counters. Cells with
// `valign="middle"` are group captions spanning rows, not data.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};
use tracing::debug;

use super::extract::RecordLayout;
use super::html::{first, selector, text_of};
use super::status::StatusMap;
use crate::error::ParseError;
use crate::model::{InterfaceCounters, InterfaceRecord, InterfaceRow};

const TABLE_CSS: &str = "#table";

static TABLE: LazyLock<Selector> = LazyLock::new(|| selector(TABLE_CSS));
static TBODY: LazyLock<Selector> = LazyLock::new(|| selector("tbody"));
static ROW: LazyLock<Selector> = LazyLock::new(|| selector("tr"));
static DATA_CELL: LazyLock<Selector> =
    LazyLock::new(|| selector("td:not([valign='middle'])"));

static LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+) \((.+)\)$").expect("label regex is valid"));

static INTERFACE_ROW: RecordLayout = RecordLayout {
    name: "statsifc",
    fields: &[
        "label",
        "rx_bytes",
        "rx_frames",
        "rx_errors",
        "rx_drops",
        "tx_bytes",
        "tx_frames",
        "tx_errors",
        "tx_drops",
    ],
    exact: true,
};

/// Split a `Name (id)` label cell into `(name, id)`.
pub fn parse_label(label: &str) -> Result<(String, String), ParseError> {
    let caps = LABEL
        .captures(label.trim())
        .ok_or_else(|| ParseError::LabelFormatError {
            label: label.into(),
        })?;
    Ok((caps[1].to_owned(), caps[2].to_owned()))
}

/// Parse the statistics table into rows, in page order.
pub fn parse_interface_stats(document: &str) -> Result<Vec<InterfaceRow>, ParseError> {
    let html = Html::parse_document(document);
    let table = first(&html, &TABLE, TABLE_CSS)?;

    let mut rows = Vec::new();
    for group in table.select(&TBODY).skip(1).take(2) {
        for tr in group.select(&ROW) {
            let cells: Vec<String> = tr.select(&DATA_CELL).map(text_of).collect();
            if cells.is_empty() {
                continue;
            }
            let index = rows.len();
            let record =
                INTERFACE_ROW.bind_fields(index, cells.iter().map(String::as_str).collect())?;
            let (name, id) = parse_label(record.text("label")?)?;
            rows.push(InterfaceRow {
                id,
                name,
                counters: InterfaceCounters {
                    rx_bytes: record.number("rx_bytes")?,
                    rx_frames: record.number("rx_frames")?,
                    rx_errors: record.number("rx_errors")?,
                    rx_drops: record.number("rx_drops")?,
                    tx_bytes: record.number("tx_bytes")?,
                    tx_frames: record.number("tx_frames")?,
                    tx_errors: record.number("tx_errors")?,
                    tx_drops: record.number("tx_drops")?,
                },
            });
        }
    }

    debug!(rows = rows.len(), "parsed interface statistics");
    Ok(rows)
}

/// Attach link status to each row by interface ID.
pub fn join_status(rows: Vec<InterfaceRow>, status: &StatusMap) -> Vec<InterfaceRecord> {
    rows.into_iter()
        .map(|row| {
            let link = status.get(&row.id);
            InterfaceRecord::from_row(row, link)
        })
        .collect()
}
