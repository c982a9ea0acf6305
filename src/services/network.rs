use crate::domain::constants::{LAN_FALLBACK_HOST, LAN_PROBE_TARGET};
use std::net::{IpAddr, UdpSocket};

/// Local address the OS would route `target` through. Connecting a UDP
/// socket sends no packets; it only selects a route.
pub fn probe_local_ip(target: &str) -> std::io::Result<IpAddr> {
    let socket = UdpSocket::bind(("0.0.0.0", 0))?;
    socket.connect(target)?;
    Ok(socket.local_addr()?.ip())
}

/// Address other devices on the LAN can reach, or `localhost`.
pub fn lan_ip() -> String {
    lan_ip_via(LAN_PROBE_TARGET)
}

pub fn lan_ip_via(target: &str) -> String {
    match probe_local_ip(target) {
        Ok(ip) => ip.to_string(),
        Err(e) => {
            tracing::debug!(error = %e, "LAN address probe failed");
            LAN_FALLBACK_HOST.to_string()
        }
    }
}
