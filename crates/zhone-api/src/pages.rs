// Gateway management pages
//
// One method per page the exporter reads. Paths and query keys are what the
// ZNID web UI itself requests.

use crate::client::GatewayClient;
use crate::error::Error;

/// Per-interface traffic counters table.
pub const INTERFACE_STATS: &str = "statsifc.html";
/// Port list with link state and speed, embedded as a script variable.
pub const ETHERNET_STATUS: &str = "zhnethernetstatus.html";
/// Optical (GPON) link status table.
pub const GPON_STATUS: &str = "zhngponstatus.html";
/// Associated wireless clients with signal quality, per radio.
pub const WIRELESS_STATUS: &str = "zhnwlstatus.cmd";
/// Associated wireless clients with traffic counters, per radio.
pub const WIRELESS_INFO: &str = "zhnwlinfo.cmd";

impl GatewayClient {
    pub async fn interface_stats(&self) -> Result<String, Error> {
        self.get_page(INTERFACE_STATS, &[]).await
    }

    pub async fn ethernet_status(&self) -> Result<String, Error> {
        self.get_page(ETHERNET_STATUS, &[]).await
    }

    pub async fn gpon_status(&self) -> Result<String, Error> {
        self.get_page(GPON_STATUS, &[]).await
    }

    /// Signal-quality client list for one radio.
    pub async fn wireless_status(&self, radio: &str) -> Result<String, Error> {
        self.get_page(WIRELESS_STATUS, &[("curRadio", radio)]).await
    }

    /// Traffic-counter client list for one radio.
    pub async fn wireless_info(&self, radio: &str) -> Result<String, Error> {
        self.get_page(WIRELESS_INFO, &[("action", "view"), ("curRadio", radio)])
            .await
    }
}
