//! Best-effort UDP frame sender.

use crate::error::{Result, TelemetryError};
use crate::telemetry::wire;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr, ToSocketAddrs, UdpSocket};
use tracing::debug;

/// Delivery counters for the otherwise silent best-effort transport.
///
/// Losing a frame is acceptable; these make the loss observable without
/// changing delivery semantics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransportStats {
    /// Datagrams handed to the network stack successfully
    pub frames_sent: u64,
    /// Send calls that failed and were swallowed
    pub frames_failed: u64,
}

/// Sends encoded frames to a fixed destination as single UDP datagrams.
///
/// One unconnected socket is bound at startup and reused for every send.
/// Send failures are expected, recoverable, and non-fatal: they are counted,
/// traced at debug level, and never surface to the caller.
pub struct UdpSender {
    socket: UdpSocket,
    destination: SocketAddr,
    buffer: Vec<u8>,
    stats: TransportStats,
}

impl UdpSender {
    /// Resolve the destination and bind the local endpoint.
    ///
    /// This is the only fallible part of the transport; a bad destination or
    /// bind failure is a startup error.
    pub fn new(host: &str, port: u16) -> Result<Self> {
        let destination = (host, port)
            .to_socket_addrs()
            .map_err(|e| {
                TelemetryError::transport_error(format!(
                    "cannot resolve destination {}:{}: {}",
                    host, port, e
                ))
            })?
            .next()
            .ok_or_else(|| {
                TelemetryError::transport_error(format!(
                    "destination {}:{} resolved to no address",
                    host, port
                ))
            })?;

        // Bind in the destination's address family so send_to works for both.
        let bind_addr: SocketAddr = if destination.is_ipv4() {
            (Ipv4Addr::UNSPECIFIED, 0).into()
        } else {
            (Ipv6Addr::UNSPECIFIED, 0).into()
        };
        let socket = UdpSocket::bind(bind_addr)?;

        Ok(Self {
            socket,
            destination,
            buffer: Vec::new(),
            stats: TransportStats::default(),
        })
    }

    /// Serialize and send one frame as a single datagram, best-effort.
    pub fn send_frame(&mut self, frame: &[f32]) {
        self.buffer.clear();
        wire::write_frame(&mut self.buffer, frame);

        match self.socket.send_to(&self.buffer, self.destination) {
            Ok(_) => self.stats.frames_sent += 1,
            Err(e) => {
                self.stats.frames_failed += 1;
                debug!("UDP send to {} failed: {}", self.destination, e);
            }
        }
    }

    /// The resolved destination address.
    pub fn destination(&self) -> SocketAddr {
        self.destination
    }

    /// Delivery counters so far.
    pub fn stats(&self) -> TransportStats {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sender_creation_and_destination() {
        let sender = UdpSender::new("127.0.0.1", 35432).unwrap();
        assert_eq!(sender.destination().port(), 35432);
        assert_eq!(sender.stats(), TransportStats::default());
    }

    #[test]
    fn test_unresolvable_destination_is_a_startup_error() {
        assert!(UdpSender::new("definitely-not-a-real-host.invalid", 35432).is_err());
    }

    #[test]
    fn test_send_counts_success() {
        let receiver = UdpSocket::bind("127.0.0.1:0").unwrap();
        let port = receiver.local_addr().unwrap().port();

        let mut sender = UdpSender::new("127.0.0.1", port).unwrap();
        sender.send_frame(&[1.5, -2.25, 0.0]);

        assert_eq!(sender.stats().frames_sent, 1);
        assert_eq!(sender.stats().frames_failed, 0);

        let mut buf = [0u8; 64];
        let (len, _) = receiver.recv_from(&mut buf).unwrap();
        assert_eq!(len, 12);
        assert_eq!(
            wire::bytes_to_frame(&buf[..len]).unwrap(),
            vec![1.5, -2.25, 0.0]
        );
    }

    #[test]
    fn test_send_failure_is_swallowed_and_counted() {
        let mut sender = UdpSender::new("127.0.0.1", 35432).unwrap();

        // An oversized datagram fails synchronously in the network stack;
        // send_frame must swallow it and keep going.
        let oversized = vec![0.0f32; 20_000];
        sender.send_frame(&oversized);

        assert_eq!(sender.stats().frames_failed, 1);

        sender.send_frame(&[1.0]);
        assert_eq!(sender.stats().frames_sent, 1);
    }
}
