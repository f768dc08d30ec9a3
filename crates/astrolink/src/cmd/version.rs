use astrolink_frame::{DEFAULT_MTU, HEADER_SIZE, IDENTIFIER_SIZE, TRAILER_SIZE};
use astrolink_iface::NUM_MODULES;

use crate::cmd::VersionArgs;
use crate::exit::{CliResult, SUCCESS};

pub fn run(args: VersionArgs) -> CliResult<i32> {
    if !args.extended {
        println!("astrolink {}", env!("CARGO_PKG_VERSION"));
        return Ok(SUCCESS);
    }

    println!("name: astrolink");
    println!("version: {}", env!("CARGO_PKG_VERSION"));
    println!("target_os: {}", std::env::consts::OS);
    println!("target_arch: {}", std::env::consts::ARCH);
    println!(
        "rustc: {}",
        option_env!("RUSTC_VERSION").unwrap_or("unknown")
    );
    println!("git_hash: {}", option_env!("GIT_HASH").unwrap_or("unknown"));
    println!(
        "framing: header={HEADER_SIZE}B id={IDENTIFIER_SIZE}B trailer={TRAILER_SIZE}B mtu={DEFAULT_MTU}"
    );
    println!("modules: {NUM_MODULES}");

    Ok(SUCCESS)
}
