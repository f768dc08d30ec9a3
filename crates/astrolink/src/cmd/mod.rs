use clap::{Args, Subcommand};
use std::path::PathBuf;

use astrolink_frame::DEFAULT_MTU;
use astrolink_iface::AdapterConfig;

use crate::exit::{iface_error, io_error, CliError, CliResult, USAGE};
use crate::output::OutputFormat;

pub mod decode;
pub mod encode;
pub mod envinfo;
pub mod listen;
pub mod send;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Decode an inbound radio frame given as hex.
    Decode(DecodeArgs),
    /// Encode an outbound radio frame and print it as hex.
    Encode(EncodeArgs),
    /// Transmit one packet through an interface bound to a radio socket.
    Send(SendArgs),
    /// Receive radio frames on a socket and print delivered packets.
    Listen(ListenArgs),
    /// Show version information.
    Version(VersionArgs),
    /// Print build and environment diagnostics.
    Envinfo(EnvinfoArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Decode(args) => decode::run(args, format),
        Command::Encode(args) => encode::run(args, format),
        Command::Send(args) => send::run(args, format),
        Command::Listen(args) => listen::run(args, format),
        Command::Version(args) => version::run(args),
        Command::Envinfo(args) => envinfo::run(args, format),
    }
}

/// Interface settings shared by commands that build an adapter.
#[derive(Args, Debug, Default)]
pub struct AdapterArgs {
    /// JSON adapter configuration file; flags override its fields.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
    /// Interface name.
    #[arg(long, env = "ASTROLINK_NAME")]
    pub name: Option<String>,
    /// Inbound frames carry a 14-byte link header.
    #[arg(
        long,
        env = "ASTROLINK_HEADER_MODE",
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    pub header_mode: Option<bool>,
    /// Radio module index for channel bookkeeping.
    #[arg(long, env = "ASTROLINK_MODULE")]
    pub module: Option<usize>,
}

impl AdapterArgs {
    pub fn resolve(&self) -> CliResult<AdapterConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let text = std::fs::read_to_string(path).map_err(|err| {
                    io_error(&format!("failed reading {}", path.display()), err)
                })?;
                AdapterConfig::from_json(&text)
                    .map_err(|err| iface_error(&format!("invalid {}", path.display()), err))?
            }
            None => AdapterConfig::default(),
        };

        if let Some(name) = &self.name {
            config.name.clone_from(name);
        }
        if let Some(header_mode) = self.header_mode {
            config.header_mode = header_mode;
        }
        if let Some(module) = self.module {
            config.module = module;
        }

        config
            .validate()
            .map_err(|err| iface_error("invalid adapter settings", err))?;
        Ok(config)
    }
}

/// Payload sources for outbound packets.
#[derive(Args, Debug, Default)]
pub struct PayloadArgs {
    /// Raw string payload.
    #[arg(long, conflicts_with_all = ["hex", "file"])]
    pub data: Option<String>,
    /// Hex-encoded payload.
    #[arg(long, conflicts_with_all = ["data", "file"])]
    pub hex: Option<String>,
    /// Read payload from file.
    #[arg(long, conflicts_with_all = ["data", "hex"])]
    pub file: Option<PathBuf>,
}

impl PayloadArgs {
    pub fn resolve(&self) -> CliResult<Vec<u8>> {
        if let Some(data) = &self.data {
            return Ok(data.as_bytes().to_vec());
        }
        if let Some(text) = &self.hex {
            return parse_hex(text);
        }
        if let Some(path) = &self.file {
            return std::fs::read(path)
                .map_err(|err| io_error(&format!("failed reading {}", path.display()), err));
        }
        Ok(Vec::new())
    }
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Frame bytes as hex (spaces and colons ignored), trailer included.
    pub frame: String,
    /// Inbound frames carry a 14-byte link header.
    #[arg(long, env = "ASTROLINK_HEADER_MODE")]
    pub header_mode: bool,
    /// Maximum payload size.
    #[arg(long, default_value_t = DEFAULT_MTU)]
    pub mtu: usize,
}

#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Network identifier (decimal or 0x-prefixed hex).
    #[arg(long, value_parser = parse_id)]
    pub id: u32,
    #[command(flatten)]
    pub payload: PayloadArgs,
}

#[derive(Args, Debug)]
pub struct SendArgs {
    /// Radio socket path to transmit to.
    pub path: PathBuf,
    /// Network identifier (decimal or 0x-prefixed hex).
    #[arg(long, value_parser = parse_id)]
    pub id: u32,
    #[command(flatten)]
    pub payload: PayloadArgs,
    /// Transmit timeout handed to the radio (e.g. 1s, 500ms).
    #[arg(long, default_value = "1s")]
    pub timeout: String,
    /// Append the 2-byte link trailer a transceiver adds on the air, so a
    /// `listen` peer can decode the frame.
    #[arg(long)]
    pub trailer: bool,
    #[command(flatten)]
    pub adapter: AdapterArgs,
}

#[derive(Args, Debug)]
pub struct ListenArgs {
    /// Radio socket path to bind.
    pub path: PathBuf,
    /// Exit after delivering N packets.
    #[arg(long)]
    pub count: Option<usize>,
    #[command(flatten)]
    pub adapter: AdapterArgs,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}

#[derive(Args, Debug, Default)]
pub struct EnvinfoArgs {}

pub fn parse_id(input: &str) -> Result<u32, String> {
    let input = input.trim();
    let parsed = match input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
    {
        Some(digits) => u32::from_str_radix(digits, 16),
        None => input.parse(),
    };
    parsed.map_err(|err| format!("invalid identifier {input:?}: {err}"))
}

pub fn parse_hex(input: &str) -> CliResult<Vec<u8>> {
    let cleaned: String = input
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ':')
        .collect();
    hex::decode(&cleaned).map_err(|err| CliError::new(USAGE, format!("invalid hex: {err}")))
}

pub fn parse_duration(input: &str) -> CliResult<std::time::Duration> {
    let input = input.trim();
    if input.is_empty() {
        return Err(CliError::new(USAGE, "duration must not be empty"));
    }

    let (number, millis) = if let Some(num) = input.strip_suffix("ms") {
        (num, true)
    } else if let Some(num) = input.strip_suffix('s') {
        (num, false)
    } else {
        (input, false)
    };

    let value: u64 = number
        .parse()
        .map_err(|_| CliError::new(USAGE, format!("invalid duration value: {input}")))?;
    if value == 0 {
        return Err(CliError::new(USAGE, "duration must be greater than zero"));
    }

    Ok(if millis {
        std::time::Duration::from_millis(value)
    } else {
        std::time::Duration::from_secs(value)
    })
}
