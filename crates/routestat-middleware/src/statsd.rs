//! UDP StatsD client.
//!
//! One datagram per call, written with a non-blocking `try_send` on a
//! connected socket. Delivery is best-effort: a full send buffer, an
//! unreachable collector, or any other socket error drops the sample and
//! logs at `debug`. Nothing is ever returned to the request path.

use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr, ToSocketAddrs};

use tokio::net::UdpSocket;

use routestat_core::client::MetricsClient;
use routestat_core::error::{Result, RouteStatError};

/// `<name>:1|c`
pub fn counter_line(name: &str) -> String {
    format!("{name}:1|c")
}

/// `<name>:<ms>|ms`
pub fn timing_line(name: &str, millis: u64) -> String {
    format!("{name}:{millis}|ms")
}

#[derive(Debug)]
pub struct StatsdClient {
    socket: UdpSocket,
    target: SocketAddr,
}

impl StatsdClient {
    /// Resolve the collector and open a socket connected to it.
    ///
    /// Must be called from within a tokio runtime (normally once, at startup).
    pub fn connect(host: &str, port: u16) -> Result<Self> {
        if tokio::runtime::Handle::try_current().is_err() {
            return Err(RouteStatError::Transport(
                "statsd client must be created inside a tokio runtime".into(),
            ));
        }

        let target = (host, port)
            .to_socket_addrs()
            .map_err(|e| RouteStatError::Transport(format!("resolve {host}:{port} failed: {e}")))?
            .next()
            .ok_or_else(|| RouteStatError::Transport(format!("no address for {host}:{port}")))?;

        let local: SocketAddr = if target.is_ipv4() {
            (Ipv4Addr::UNSPECIFIED, 0).into()
        } else {
            (Ipv6Addr::UNSPECIFIED, 0).into()
        };

        let std_socket = std::net::UdpSocket::bind(local)
            .map_err(|e| RouteStatError::Transport(format!("bind {local} failed: {e}")))?;
        std_socket
            .set_nonblocking(true)
            .map_err(|e| RouteStatError::Transport(format!("set_nonblocking failed: {e}")))?;
        std_socket
            .connect(target)
            .map_err(|e| RouteStatError::Transport(format!("connect {target} failed: {e}")))?;
        let socket = UdpSocket::from_std(std_socket)
            .map_err(|e| RouteStatError::Transport(format!("register socket failed: {e}")))?;

        tracing::info!(collector = %target, "statsd client ready");
        Ok(Self { socket, target })
    }

    pub fn target(&self) -> SocketAddr {
        self.target
    }

    fn send(&self, line: &str) {
        if let Err(e) = self.socket.try_send(line.as_bytes()) {
            tracing::debug!(collector = %self.target, error = %e, "statsd sample dropped");
        }
    }
}

impl MetricsClient for StatsdClient {
    fn increment(&self, name: &str) {
        self.send(&counter_line(name));
    }

    fn timing(&self, name: &str, millis: u64) {
        self.send(&timing_line(name, millis));
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::expect_used)]

    use std::time::Duration;

    use super::*;

    async fn recv_line(socket: &UdpSocket) -> String {
        let mut buf = [0u8; 512];
        let n = tokio::time::timeout(Duration::from_secs(2), socket.recv(&mut buf))
            .await
            .expect("timed out waiting for datagram")
            .unwrap();
        String::from_utf8(buf[..n].to_vec()).unwrap()
    }

    #[test]
    fn line_format() {
        assert_eq!(counter_line("a.b.status_code.200"), "a.b.status_code.200:1|c");
        assert_eq!(timing_line("a.b.response_time", 42), "a.b.response_time:42|ms");
    }

    #[test]
    fn connect_outside_runtime_is_an_error() {
        let err = StatsdClient::connect("127.0.0.1", 8125).expect_err("must fail");
        assert_eq!(err.kind(), "TRANSPORT");
    }

    #[tokio::test]
    async fn sends_one_datagram_per_call() {
        let collector = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let port = collector.local_addr().unwrap().port();

        let client = StatsdClient::connect("127.0.0.1", port).unwrap();
        assert_eq!(client.target().port(), port);

        client.increment("express.http.get.pixel.status_code.200");
        assert_eq!(recv_line(&collector).await, "express.http.get.pixel.status_code.200:1|c");

        client.timing("express.http.get.pixel.response_time", 7);
        assert_eq!(recv_line(&collector).await, "express.http.get.pixel.response_time:7|ms");
    }

    #[tokio::test]
    async fn unreachable_collector_never_panics() {
        // Nothing listens here; ICMP errors surface on later sends and must be swallowed.
        let probe = std::net::UdpSocket::bind("127.0.0.1:0").unwrap();
        let port = probe.local_addr().unwrap().port();
        drop(probe);

        let client = StatsdClient::connect("127.0.0.1", port).unwrap();
        for _ in 0..8 {
            client.increment("x.status_code.200");
            client.timing("x.response_time", 1);
        }
    }
}
