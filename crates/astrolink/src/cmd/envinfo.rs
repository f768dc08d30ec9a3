use std::collections::BTreeMap;

use astrolink_frame::{DEFAULT_MTU, HEADER_SIZE, IDENTIFIER_SIZE, TRAILER_SIZE};
use astrolink_iface::{DEFAULT_INTERFACE_NAME, NUM_MODULES};
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;

use crate::cmd::EnvinfoArgs;
use crate::exit::{CliResult, SUCCESS};
use crate::output::OutputFormat;

/// Environment variables the CLI reads.
const ENV_KEYS: [&str; 4] = [
    "ASTROLINK_HEADER_MODE",
    "ASTROLINK_LOG_LEVEL",
    "ASTROLINK_MODULE",
    "ASTROLINK_NAME",
];

#[derive(Serialize)]
struct Framing {
    header_size: usize,
    identifier_size: usize,
    trailer_size: usize,
    mtu: usize,
    modules: usize,
    default_name: &'static str,
}

impl Framing {
    fn current() -> Self {
        Self {
            header_size: HEADER_SIZE,
            identifier_size: IDENTIFIER_SIZE,
            trailer_size: TRAILER_SIZE,
            mtu: DEFAULT_MTU,
            modules: NUM_MODULES,
            default_name: DEFAULT_INTERFACE_NAME,
        }
    }
}

#[derive(Serialize)]
struct EnvInfo {
    schema_id: &'static str,
    version: &'static str,
    target: String,
    os: &'static str,
    arch: &'static str,
    datagram_radio: bool,
    framing: Framing,
    environment: BTreeMap<&'static str, Option<String>>,
}

impl EnvInfo {
    fn collect() -> Self {
        Self {
            schema_id: "https://schemas.3leaps.dev/astrolink/cli/v1/envinfo.schema.json",
            version: env!("CARGO_PKG_VERSION"),
            target: target_triple(),
            os: std::env::consts::OS,
            arch: std::env::consts::ARCH,
            datagram_radio: cfg!(unix),
            framing: Framing::current(),
            environment: ENV_KEYS
                .iter()
                .map(|key| (*key, std::env::var(key).ok()))
                .collect(),
        }
    }
}

pub fn run(_args: EnvinfoArgs, format: OutputFormat) -> CliResult<i32> {
    let info = EnvInfo::collect();
    match format {
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string(&info).unwrap_or_else(|_| "{}".to_string())
        ),
        OutputFormat::Table | OutputFormat::Pretty => println!("{}", render_table(&info)),
        OutputFormat::Raw => println!("{}", info.version),
    }
    Ok(SUCCESS)
}

fn render_table(info: &EnvInfo) -> Table {
    let f = &info.framing;
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["KEY", "VALUE"])
        .add_row(vec!["version".to_string(), info.version.to_string()])
        .add_row(vec!["target".to_string(), info.target.clone()])
        .add_row(vec![
            "platform".to_string(),
            format!("{} ({})", info.os, info.arch),
        ])
        .add_row(vec![
            "datagram radio".to_string(),
            info.datagram_radio.to_string(),
        ])
        .add_row(vec![
            "framing".to_string(),
            format!(
                "header={}B id={}B trailer={}B mtu={}",
                f.header_size, f.identifier_size, f.trailer_size, f.mtu
            ),
        ])
        .add_row(vec![
            "modules".to_string(),
            format!("{} (default iface {})", f.modules, f.default_name),
        ]);
    for (key, value) in &info.environment {
        table.add_row(vec![
            key.to_string(),
            value.clone().unwrap_or_else(|| "(not set)".to_string()),
        ]);
    }
    table
}

fn target_triple() -> String {
    option_env!("ASTROLINK_BUILD_TARGET")
        .map(str::to_string)
        .unwrap_or_else(|| format!("{}-unknown-{}", std::env::consts::ARCH, std::env::consts::OS))
}
