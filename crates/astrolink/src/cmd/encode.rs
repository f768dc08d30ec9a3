use astrolink_frame::{encode_frame, wire_len, DEFAULT_MTU};

use crate::cmd::EncodeArgs;
use crate::exit::{CliError, CliResult, DATA_INVALID, SUCCESS};
use crate::output::{print_encoded, OutputFormat};

pub fn run(args: EncodeArgs, format: OutputFormat) -> CliResult<i32> {
    let payload = args.payload.resolve()?;
    if payload.len() > DEFAULT_MTU {
        return Err(CliError::new(
            DATA_INVALID,
            format!(
                "payload of {} bytes exceeds MTU {DEFAULT_MTU}",
                payload.len()
            ),
        ));
    }

    let mut wire = Vec::with_capacity(wire_len(payload.len()));
    encode_frame(args.id, &payload, &mut wire);
    print_encoded(args.id, &wire, format);
    Ok(SUCCESS)
}
