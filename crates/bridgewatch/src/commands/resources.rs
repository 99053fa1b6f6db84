//! One-shot listing of bridges and serial ports.

use std::sync::Arc;

use tabled::Tabled;

use bridgewatch_core::{Bridge, Bridges, Engine, LogSink, SerialPort, SerialPorts};

use crate::cli::GlobalOpts;
use crate::config;
use crate::error::CliError;
use crate::output;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct BridgeRow {
    #[tabled(rename = "Serial")]
    serial: String,
    #[tabled(rename = "Baud")]
    baud: String,
    #[tabled(rename = "Address")]
    ip: String,
    #[tabled(rename = "UDP Port")]
    udp_port: String,
}

impl From<&Bridge> for BridgeRow {
    fn from(b: &Bridge) -> Self {
        Self {
            serial: b.serial_path.clone().unwrap_or_default(),
            baud: b.baud.map(|v| v.to_string()).unwrap_or_default(),
            ip: b.ip.clone().unwrap_or_default(),
            udp_port: b.udp_port.map(|v| v.to_string()).unwrap_or_default(),
        }
    }
}

#[derive(Tabled)]
struct PortRow {
    #[tabled(rename = "Port")]
    path: String,
}

// ── Handlers ────────────────────────────────────────────────────────

fn engine(global: &GlobalOpts) -> Result<Engine, CliError> {
    let config = config::resolve_engine_config(global, None)?;
    Ok(Engine::new(config, Arc::new(LogSink))?)
}

pub async fn handle_bridges(global: &GlobalOpts) -> Result<(), CliError> {
    let bridges = engine(global)?.fetch::<Bridges>().await?;
    let out = output::render_list(&global.output, &bridges, |b| BridgeRow::from(b), Bridge::label);
    output::print_output(&out, global.quiet);
    Ok(())
}

pub async fn handle_ports(global: &GlobalOpts) -> Result<(), CliError> {
    let ports = engine(global)?.fetch::<SerialPorts>().await?;
    let out = output::render_list(
        &global.output,
        &ports,
        |p: &SerialPort| PortRow { path: p.clone() },
        String::clone,
    );
    output::print_output(&out, global.quiet);
    Ok(())
}
