use crate::cmd::SendArgs;
use crate::exit::CliResult;
use crate::output::OutputFormat;

#[cfg(unix)]
pub fn run(args: SendArgs, format: OutputFormat) -> CliResult<i32> {
    use std::sync::Arc;

    use astrolink_iface::{AstrodevInterface, Collaborators};
    use astrolink_transport::{DatagramRadio, HeapPool, PacketPool, DEFAULT_POOL_BUFFERS};
    use tracing::info;

    use crate::cmd::parse_duration;
    use crate::exit::{iface_error, transport_error, tx_error, CliError, DATA_INVALID, SUCCESS};
    use crate::host::{HostStack, TrailingRadio};
    use crate::output::print_stats;

    let timeout = parse_duration(&args.timeout)?;
    let config = args.adapter.resolve()?;
    let payload = args.payload.resolve()?;

    let radio = DatagramRadio::connect(&args.path)
        .map_err(|err| transport_error("connect failed", err))?;
    let pool = Arc::new(HeapPool::new(DEFAULT_POOL_BUFFERS, astrolink_frame::DEFAULT_MTU));
    let collaborators = Collaborators::new(pool.clone(), Arc::new(HostStack::default()));
    let iface = if args.trailer {
        AstrodevInterface::from_config(&config, TrailingRadio::new(radio), collaborators)
    } else {
        AstrodevInterface::from_config(&config, radio, collaborators)
    }
    .map_err(|err| iface_error("interface setup failed", err))?;

    let mut packet = pool.acquire(payload.len()).ok_or_else(|| {
        CliError::new(
            DATA_INVALID,
            format!(
                "payload of {} bytes exceeds interface MTU {}",
                payload.len(),
                iface.mtu()
            ),
        )
    })?;
    packet
        .set_payload(&payload)
        .map_err(|err| transport_error("packet setup failed", err))?;
    packet.id = args.id;

    iface
        .transmit(packet, timeout)
        .map_err(|err| tx_error("transmit failed", err))?;
    info!(
        iface = iface.name(),
        id = args.id,
        len = payload.len(),
        path = %args.path.display(),
        "packet sent"
    );

    print_stats(
        iface.name(),
        &iface.stats(),
        &iface.channels().snapshot(),
        format,
    );
    Ok(SUCCESS)
}

#[cfg(not(unix))]
pub fn run(_args: SendArgs, _format: OutputFormat) -> CliResult<i32> {
    Err(crate::exit::CliError::new(
        crate::exit::USAGE,
        "send requires Unix datagram sockets",
    ))
}
