// Wire types served by the bridget service.
//
// Every field is optional on the wire and unknown fields are kept in
// `extra`, so a record survives a decode/encode pass unchanged even when
// the service grows new fields.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A serial-to-UDP bridge as reported by `GET /bridges`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Bridge {
    /// Serial device backing the bridge (e.g. `/dev/ttyUSB0`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serial_path: Option<String>,

    /// Serial baudrate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub baud: Option<u32>,

    /// Address the UDP side binds to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub udp_port: Option<u16>,

    /// Fields this client does not model explicitly.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Bridge {
    /// Best-effort display label: the serial path, then an `id` field, then `?`.
    pub fn label(&self) -> String {
        self.serial_path
            .clone()
            .or_else(|| {
                self.extra
                    .get("id")
                    .and_then(Value::as_str)
                    .map(str::to_owned)
            })
            .unwrap_or_else(|| "?".into())
    }
}

/// Serial ports are served as bare device path strings.
pub type SerialPort = String;
