//! TCP reachability probe.

use std::net::{Shutdown, SocketAddr, TcpStream, ToSocketAddrs};

use crate::core::config::ServiceTarget;
use crate::core::health_monitor::{Reading, SensorError, SensorKind};

/// Connect to `target` and close the connection straight away.
///
/// A completed handshake only means something is listening; it says nothing
/// about application health. Each resolved address gets at most
/// `target.connect_timeout`. Name resolution failures are reported as an
/// unavailable reading rather than as "unreachable".
pub fn probe_tcp(target: &ServiceTarget) -> Reading<bool> {
    let addrs: Vec<SocketAddr> = (target.host.as_str(), target.port)
        .to_socket_addrs()
        .map_err(|e| {
            SensorError::new(
                SensorKind::Reachability,
                format!("cannot resolve {}: {}", target, e),
            )
        })?
        .collect();

    if addrs.is_empty() {
        return Err(SensorError::new(
            SensorKind::Reachability,
            format!("{} resolved to no addresses", target),
        ));
    }

    Ok(addrs.iter().any(|addr| connect_once(addr, target)))
}

fn connect_once(addr: &SocketAddr, target: &ServiceTarget) -> bool {
    match TcpStream::connect_timeout(addr, target.connect_timeout) {
        Ok(stream) => {
            let _ = stream.shutdown(Shutdown::Both);
            true
        }
        Err(e) => {
            log::debug!("Connect to {} ({}) failed: {}", target, addr, e);
            false
        }
    }
}
