use astrolink_frame::{decode_frame, FrameConfig};

use crate::cmd::{parse_hex, DecodeArgs};
use crate::exit::{frame_error, CliResult, SUCCESS};
use crate::output::{print_decoded, OutputFormat};

pub fn run(args: DecodeArgs, format: OutputFormat) -> CliResult<i32> {
    let raw = parse_hex(&args.frame)?;
    let config = FrameConfig {
        header_mode: args.header_mode,
        mtu: args.mtu,
    };

    let frame = decode_frame(&raw, &config).map_err(|err| frame_error("decode failed", err))?;
    print_decoded(&frame, format);
    Ok(SUCCESS)
}
