// ── GPON status parser ──
//
// `zhngponstatus.html` is a two-column label/value table (`#table1`); the
// data rows live in its second <tbody>. Cells of class `hd` are headings.

use std::sync::LazyLock;

use scraper::{Html, Selector};
use tracing::debug;

use super::extract::parse_number;
use super::html::{selector, text_of};
use crate::error::ParseError;
use crate::model::GponRecord;

static TABLE: LazyLock<Selector> = LazyLock::new(|| selector("#table1"));
static TBODY: LazyLock<Selector> = LazyLock::new(|| selector("tbody"));
static ROW: LazyLock<Selector> = LazyLock::new(|| selector("tr"));
static DATA_CELL: LazyLock<Selector> = LazyLock::new(|| selector("td:not(.hd)"));

const LINK_STATE: &str = "Current Link State";
const LINK_UP_TRANSITIONS: &str = "Link Up Transitions";
const RECEIVE_LEVEL: &str = "Receive Level";
const TRANSMIT_POWER: &str = "Transmit Power";

/// Parse a power reading such as `-21.3 dBm`.
pub fn parse_power(field: &str, raw: &str) -> Result<f64, ParseError> {
    let trimmed = raw.trim();
    let number = trimmed.strip_suffix("dBm").unwrap_or(trimmed).trim();
    parse_number(field, number).map_err(|_| ParseError::MalformedField {
        field: field.into(),
        value: raw.into(),
    })
}

/// Parse the GPON status page.
///
/// Returns `None` when the page has no status table or the table has no data
/// rows (units without an optical module). Unknown labels are ignored; a
/// repeated label overwrites the earlier value.
pub fn parse_gpon_status(document: &str) -> Result<Option<GponRecord>, ParseError> {
    let html = Html::parse_document(document);
    let Some(table) = html.select(&TABLE).next() else {
        debug!("no GPON status table on page");
        return Ok(None);
    };

    let Some(body) = table
        .select(&TBODY)
        .nth(1)
        .filter(|body| body.select(&ROW).next().is_some())
    else {
        debug!("GPON status table has no data rows");
        return Ok(None);
    };

    let mut gpon = GponRecord::default();

    for tr in body.select(&ROW) {
        let cells: Vec<String> = tr.select(&DATA_CELL).map(text_of).collect();
        let [label, value, ..] = cells.as_slice() else {
            continue;
        };
        match label.as_str() {
            LINK_STATE => gpon.up = value == "Up",
            LINK_UP_TRANSITIONS => gpon.up_transitions = parse_number(LINK_UP_TRANSITIONS, value)?,
            RECEIVE_LEVEL => gpon.rx_power_dbm = parse_power(RECEIVE_LEVEL, value)?,
            TRANSMIT_POWER => gpon.tx_power_dbm = parse_power(TRANSMIT_POWER, value)?,
            _ => {}
        }
    }

    Ok(Some(gpon))
}
