// ── Interface status (port list) parser ──
//
// The ethernet status page embeds every interface's link state and speed in
// one script variable:
//
//     var portlistAll = 'eth0|eth1|wl0|/...#State|Up|Down|Up/Speed|1000|-|-';
//
// Before `#`: the ID list (first `/` part), `|`-separated with a trailing
// empty token. After `#`: the state list and the speed list (first two `/`
// parts), each starting with a header token.

use std::collections::HashMap;
use std::sync::LazyLock;

use tracing::trace;

use super::extract::{PayloadMarker, parse_number};
use crate::error::ParseError;
use crate::model::LinkStatus;

static PORT_LIST: LazyLock<PayloadMarker> = LazyLock::new(|| PayloadMarker::new("portlistAll"));

/// Interface ID → link status.
pub type StatusMap = HashMap<String, LinkStatus>;

/// Parse the ethernet status page. A missing payload is an error here: the
/// page always carries one.
pub fn parse_interface_status(document: &str) -> Result<StatusMap, ParseError> {
    let payload = PORT_LIST.find(document)?;
    trace!(marker = PORT_LIST.name(), payload, "payload found");
    parse_port_list(payload)
}

/// Parse the inner `portlistAll` payload.
pub fn parse_port_list(payload: &str) -> Result<StatusMap, ParseError> {
    let mut sections = payload.split('#');
    let id_section = sections.next().unwrap_or_default();
    let value_section = sections
        .next()
        .ok_or_else(|| ParseError::shape("portlistAll sections", 2, 1))?;

    let mut ids: Vec<&str> = id_section
        .split('/')
        .next()
        .unwrap_or_default()
        .split('|')
        .collect();
    if ids.last().is_some_and(|last| last.is_empty()) {
        ids.pop();
    }

    let mut lists = value_section.split('/');
    let states: Vec<&str> = lists
        .next()
        .unwrap_or_default()
        .split('|')
        .skip(1)
        .collect();
    let speeds: Vec<&str> = lists
        .next()
        .ok_or_else(|| ParseError::shape("portlistAll value lists", 2, 1))?
        .split('|')
        .skip(1)
        .collect();

    if states.len() != ids.len() {
        return Err(ParseError::shape("portlistAll states", ids.len(), states.len()));
    }
    if speeds.len() != ids.len() {
        return Err(ParseError::shape("portlistAll speeds", ids.len(), speeds.len()));
    }

    let mut map = StatusMap::with_capacity(ids.len());
    for (i, ((id, state), speed)) in ids.iter().zip(&states).zip(&speeds).enumerate() {
        let speed = speed.trim();
        let speed = if speed == "-" {
            0.0
        } else {
            parse_number(&format!("portlistAll.speed[{i}]"), speed)?
        };
        map.insert(
            (*id).to_owned(),
            LinkStatus {
                up: state.trim() == "Up",
                speed,
            },
        );
    }
    Ok(map)
}
