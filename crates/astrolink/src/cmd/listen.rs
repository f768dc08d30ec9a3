use crate::cmd::ListenArgs;
use crate::exit::CliResult;
use crate::output::OutputFormat;

#[cfg(unix)]
pub fn run(args: ListenArgs, format: OutputFormat) -> CliResult<i32> {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use astrolink_iface::{AstrodevInterface, Collaborators};
    use astrolink_transport::{
        DatagramRadio, HeapPool, PacketPool, TaskWoken, TransportError, DEFAULT_POOL_BUFFERS,
    };
    use tracing::{debug, info};

    use crate::exit::{iface_error, transport_error, SUCCESS};
    use crate::host::HostStack;
    use crate::output::{print_packet, print_stats};

    const POLL_INTERVAL: Duration = Duration::from_millis(200);

    let config = args.adapter.resolve()?;
    let radio =
        DatagramRadio::bind(&args.path).map_err(|err| transport_error("bind failed", err))?;
    radio
        .set_read_timeout(Some(POLL_INTERVAL))
        .map_err(|err| transport_error("socket setup failed", err))?;

    let (stack, deliveries) = HostStack::channel();
    let pool = Arc::new(HeapPool::new(DEFAULT_POOL_BUFFERS, astrolink_frame::DEFAULT_MTU));
    let receive_only = |_: &[u8]| -> astrolink_transport::Result<()> {
        Err(TransportError::Radio("listener is receive-only".to_string()))
    };
    let collaborators = Collaborators::new(pool.clone(), stack);
    let iface = AstrodevInterface::from_config(&config, receive_only, collaborators)
        .map_err(|err| iface_error("interface setup failed", err))?;
    info!(iface = iface.name(), path = %args.path.display(), "listening");

    let running = Arc::new(AtomicBool::new(true));
    install_ctrlc_handler(running.clone())?;

    let mut buf = [0u8; DatagramRadio::MAX_FRAME_LEN];
    let mut printed = 0usize;

    'outer: while running.load(Ordering::SeqCst) {
        let len = match radio.recv_frame(&mut buf) {
            Ok(len) => len,
            Err(err) if err.is_timeout() => continue,
            Err(err) => return Err(transport_error("receive failed", err)),
        };
        debug!(len, "radio frame received");

        let mut woken = TaskWoken::new();
        iface.receive(&buf[..len], &mut woken);

        for (packet, name) in deliveries.try_iter() {
            print_packet(&packet, &name, format);
            pool.release(packet);
            printed = printed.saturating_add(1);
            if args.count.is_some_and(|count| printed >= count) {
                break 'outer;
            }
        }
    }

    print_stats(
        iface.name(),
        &iface.stats(),
        &iface.channels().snapshot(),
        format,
    );
    Ok(SUCCESS)
}

#[cfg(unix)]
fn install_ctrlc_handler(
    running: std::sync::Arc<std::sync::atomic::AtomicBool>,
) -> CliResult<()> {
    ctrlc::set_handler(move || {
        running.store(false, std::sync::atomic::Ordering::SeqCst);
    })
    .map_err(|err| {
        crate::exit::CliError::new(
            crate::exit::INTERNAL,
            format!("signal handler setup failed: {err}"),
        )
    })
}

#[cfg(not(unix))]
pub fn run(_args: ListenArgs, _format: OutputFormat) -> CliResult<i32> {
    Err(crate::exit::CliError::new(
        crate::exit::USAGE,
        "listen requires Unix datagram sockets",
    ))
}
