//! Waiting for the kiosk to get online before provisioning.

use forge::{Logger, PollConfig, WaitCallback, poll_until};
use std::net::{IpAddr, SocketAddr, TcpStream, UdpSocket};
use std::time::Duration;

/// Well-known public endpoint used to probe connectivity.
const PROBE: ([u8; 4], u16) = ([1, 1, 1, 1], 443);

/// Time allowed for one connection attempt.
const PROBE_TIMEOUT: Duration = Duration::from_secs(3);

/// Time between connectivity checks.
pub const POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Number of connectivity checks before giving up.
pub const POLL_ATTEMPTS: u32 = 6;

/// Whether a TCP connection to `addr` succeeds within `timeout`.
pub fn reachable(addr: &SocketAddr, timeout: Duration) -> bool {
    TcpStream::connect_timeout(addr, timeout).is_ok()
}

/// Whether the internet can be reached.
pub fn internet_active() -> bool {
    reachable(&SocketAddr::from(PROBE), PROBE_TIMEOUT)
}

/// Address of the interface that routes to the internet.
///
/// No packets are sent; connecting a UDP socket only selects a route.
pub fn lan_ip_address() -> std::io::Result<IpAddr> {
    let socket = UdpSocket::bind(("0.0.0.0", 0))?;
    socket.connect(SocketAddr::from(PROBE))?;
    Ok(socket.local_addr()?.ip())
}

struct NetworkWaitLog<'a> {
    logger: &'a dyn Logger,
}

impl WaitCallback for NetworkWaitLog<'_> {
    fn on_wait(&self, _attempt: u32, delay: Duration) {
        self.logger.write(&format!(
            "*** NETWORK DOWN: Waiting {} seconds for the kiosk to come online",
            delay.as_secs()
        ));
    }
}

/// Wait until `online` reports true, logging each wait.
///
/// Returns false if the kiosk never came online.
pub fn wait_until<F>(logger: &dyn Logger, config: &PollConfig, online: F) -> bool
where
    F: FnMut() -> bool,
{
    let callback = NetworkWaitLog { logger };
    poll_until(config, Some(&callback), online)
}

/// Wait up to thirty seconds for internet access.
pub fn wait_online(logger: &dyn Logger) -> bool {
    let config = PollConfig::bounded(POLL_INTERVAL, POLL_ATTEMPTS);
    wait_until(logger, &config, internet_active)
}
