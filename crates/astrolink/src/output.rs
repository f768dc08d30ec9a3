use std::io::{IsTerminal, Write};
use std::time::{SystemTime, UNIX_EPOCH};

use astrolink_frame::DecodedFrame;
use astrolink_iface::{StatsSnapshot, NUM_MODULES};
use astrolink_transport::Packet;
use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
    Raw,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

#[derive(Serialize)]
struct DecodedOutput<'a> {
    schema_id: &'a str,
    header: Option<HeaderOutput>,
    id: u32,
    id_hex: String,
    payload_size: usize,
    payload: String,
    payload_hex: String,
}

#[derive(Serialize)]
struct HeaderOutput {
    destination: String,
    source: String,
}

pub fn print_decoded(frame: &DecodedFrame<'_>, format: OutputFormat) {
    let header = frame.header.map(|h| HeaderOutput {
        destination: h.destination().to_string(),
        source: h.source().to_string(),
    });
    match format {
        OutputFormat::Json => {
            let out = DecodedOutput {
                schema_id: "https://schemas.3leaps.dev/astrolink/cli/v1/frame-decoded.schema.json",
                header,
                id: frame.id,
                id_hex: format!("{:#010x}", frame.id),
                payload_size: frame.payload.len(),
                payload: payload_preview(frame.payload),
                payload_hex: hex::encode(frame.payload),
            };
            print_json(&out);
        }
        OutputFormat::Table => {
            let (dst, src) = header
                .map(|h| (h.destination, h.source))
                .unwrap_or_else(|| ("-".to_string(), "-".to_string()));
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["DEST", "SOURCE", "ID", "SIZE", "PAYLOAD"])
                .add_row(vec![
                    dst,
                    src,
                    format!("{:#010x}", frame.id),
                    frame.payload.len().to_string(),
                    payload_preview(frame.payload),
                ]);
            println!("{table}");
        }
        OutputFormat::Pretty => {
            if let Some(h) = header {
                println!("header dst={} src={}", h.destination, h.source);
            }
            println!(
                "id={:#010x} size={} payload={}",
                frame.id,
                frame.payload.len(),
                payload_preview(frame.payload)
            );
        }
        OutputFormat::Raw => print_raw(frame.payload),
    }
}

#[derive(Serialize)]
struct EncodedOutput<'a> {
    schema_id: &'a str,
    id: u32,
    wire_size: usize,
    wire_hex: String,
}

pub fn print_encoded(id: u32, wire: &[u8], format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(&EncodedOutput {
            schema_id: "https://schemas.3leaps.dev/astrolink/cli/v1/frame-encoded.schema.json",
            id,
            wire_size: wire.len(),
            wire_hex: hex::encode(wire),
        }),
        OutputFormat::Table | OutputFormat::Pretty => {
            println!("id={id:#010x} size={} wire={}", wire.len(), hex::encode(wire));
        }
        OutputFormat::Raw => print_raw(wire),
    }
}

#[derive(Serialize)]
struct PacketOutput<'a> {
    schema_id: &'a str,
    iface: &'a str,
    id: u32,
    id_hex: String,
    payload_size: usize,
    payload: String,
    timestamp: String,
}

pub fn print_packet(packet: &Packet, iface: &str, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(&PacketOutput {
            schema_id: "https://schemas.3leaps.dev/astrolink/cli/v1/packet-received.schema.json",
            iface,
            id: packet.id,
            id_hex: format!("{:#010x}", packet.id),
            payload_size: packet.len(),
            payload: payload_preview(packet.payload()),
            timestamp: now_unix_seconds(),
        }),
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["IFACE", "ID", "SIZE", "PAYLOAD"])
                .add_row(vec![
                    iface.to_string(),
                    format!("{:#010x}", packet.id),
                    packet.len().to_string(),
                    payload_preview(packet.payload()),
                ]);
            println!("{table}");
        }
        OutputFormat::Pretty => {
            println!(
                "iface={} id={:#010x} size={} payload={}",
                iface,
                packet.id,
                packet.len(),
                payload_preview(packet.payload())
            );
        }
        OutputFormat::Raw => print_raw(packet.payload()),
    }
}

#[derive(Serialize)]
struct StatsOutput<'a> {
    schema_id: &'a str,
    iface: &'a str,
    stats: &'a StatsSnapshot,
    channels: &'a [u32; NUM_MODULES],
}

pub fn print_stats(
    iface: &str,
    stats: &StatsSnapshot,
    channels: &[u32; NUM_MODULES],
    format: OutputFormat,
) {
    match format {
        OutputFormat::Json => print_json(&StatsOutput {
            schema_id: "https://schemas.3leaps.dev/astrolink/cli/v1/interface-stats.schema.json",
            iface,
            stats,
            channels,
        }),
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["COUNTER", "VALUE"]);
            for (name, value) in [
                ("rx", stats.rx),
                ("rx_bytes", stats.rx_bytes),
                ("rx_dropped", stats.rx_dropped),
                ("tx", stats.tx),
                ("tx_bytes", stats.tx_bytes),
                ("tx_error", stats.tx_error),
            ] {
                table.add_row(vec![name.to_string(), value.to_string()]);
            }
            for (module, id) in channels.iter().enumerate() {
                table.add_row(vec![format!("module[{module}]"), format!("{id:#010x}")]);
            }
            println!("{iface}\n{table}");
        }
        OutputFormat::Pretty => {
            println!(
                "iface={} rx={} rx_dropped={} tx={} tx_error={}",
                iface, stats.rx, stats.rx_dropped, stats.tx, stats.tx_error
            );
        }
        // Raw output carries payload bytes only.
        OutputFormat::Raw => {}
    }
}

pub fn print_raw(data: &[u8]) {
    let mut out = std::io::stdout();
    let _ = out.write_all(data);
    let _ = out.flush();
}

fn print_json(value: &impl Serialize) {
    println!(
        "{}",
        serde_json::to_string(value).unwrap_or_else(|_| "{}".to_string())
    );
}

fn payload_preview(payload: &[u8]) -> String {
    match std::str::from_utf8(payload) {
        Ok(text) => text.to_string(),
        Err(_) => format!("<binary {} bytes>", payload.len()),
    }
}

fn now_unix_seconds() -> String {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs().to_string())
        .unwrap_or_else(|_| "0".to_string())
}
