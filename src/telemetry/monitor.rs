//! The update loop driving refresh → encode → send.

use crate::error::Result;
use crate::selection::encoder::FrameEncoder;
use crate::selection::spec::SelectionSpec;
use crate::sensors::traits::SensorSource;
use crate::telemetry::config::TelemetryConfig;
use crate::telemetry::udp::{TransportStats, UdpSender};
use futures_util::stream::{self, BoxStream};
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Ties a sensor source, frame encoder, and UDP sender into the telemetry
/// loop: refresh the tree, encode the frame, send it, sleep out the period.
///
/// The loop is sequential, not a fixed-rate timer: when a cycle overruns the
/// period the next one starts immediately, with no overlap and no catch-up
/// bursts.
pub struct Monitor<S: SensorSource> {
    source: S,
    encoder: FrameEncoder,
    sender: UdpSender,
    period: Duration,
}

impl<S: SensorSource> Monitor<S> {
    /// Build a monitor from a source, a validated spec, and the destination
    /// configuration. Fails fast on a bad spec or destination.
    pub fn new(source: S, spec: SelectionSpec, config: &TelemetryConfig) -> Result<Self> {
        spec.validate()?;
        let sender = UdpSender::new(&config.host, config.port)?;
        let monitor = Self {
            source,
            encoder: FrameEncoder::new(spec),
            sender,
            period: Duration::from_millis(config.interval_ms),
        };
        monitor.warn_on_spec_drift();
        Ok(monitor)
    }

    /// Warn when the spec references sensors the discovered tree does not
    /// have. Drift is not an error — the affected slots simply transmit
    /// their miss value — but it is almost never what the operator wanted.
    fn warn_on_spec_drift(&self) {
        let tree = self.source.tree();
        match self.encoder.spec() {
            SelectionSpec::SlotMap { slots } => {
                for identifier in slots.keys() {
                    if tree.find(identifier).is_none() {
                        warn!("mapped sensor {} not found in the discovered tree", identifier);
                    }
                }
            }
            SelectionSpec::AllowList { identifiers } => {
                for identifier in identifiers {
                    if tree.find(identifier).is_none() {
                        warn!(
                            "allow-listed sensor {} not found in the discovered tree",
                            identifier
                        );
                    }
                }
            }
            SelectionSpec::Positional { positions } => {
                let count = tree.sensor_count();
                for &position in positions {
                    if position >= count {
                        warn!(
                            "position {} is beyond the {} discovered sensors",
                            position, count
                        );
                    }
                }
            }
        }
    }

    /// Run one cycle: refresh, encode, send.
    ///
    /// A refresh failure skips the cycle; a send failure is swallowed by the
    /// transport. Neither terminates the loop.
    pub fn cycle(&mut self) {
        if let Err(e) = self.source.refresh() {
            warn!("sensor refresh failed, skipping cycle: {}", e);
            return;
        }
        let frame = self.encoder.encode(self.source.tree());
        self.sender.send_frame(frame);
    }

    /// Run the loop until the process is told to stop (Ctrl-C).
    ///
    /// Sleeps for the remainder of the period after each cycle, or restarts
    /// immediately when the cycle took longer than the period.
    pub async fn run(mut self) -> Result<()> {
        info!(
            "Streaming {}-slot frames to {} every {}ms",
            self.encoder.frame_len(),
            self.sender.destination(),
            self.period.as_millis()
        );

        loop {
            let started = Instant::now();
            self.cycle();
            let wait = self.period.saturating_sub(started.elapsed());

            tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    info!("Shutdown requested");
                    break;
                }
                _ = tokio::time::sleep(wait) => {}
            }
        }

        let stats = self.sender.stats();
        info!(
            "Stopped after {} frames sent, {} failed",
            stats.frames_sent, stats.frames_failed
        );
        Ok(())
    }

    /// Delivery counters from the underlying transport.
    pub fn stats(&self) -> TransportStats {
        self.sender.stats()
    }

    /// The fixed output frame length.
    pub fn frame_len(&self) -> usize {
        self.encoder.frame_len()
    }

    /// Turn the monitor into a stream of encoded frames, one per period.
    ///
    /// The stream refreshes and encodes but does not transmit; it is the
    /// library-side surface for consumers that want the frames themselves.
    /// Ends if the source fails to refresh.
    pub fn into_stream(self) -> BoxStream<'static, Vec<f32>>
    where
        S: Send + 'static,
    {
        Box::pin(stream::unfold(self, |mut monitor| async move {
            tokio::time::sleep(monitor.period).await;
            match monitor.source.refresh() {
                Ok(()) => {
                    let frame = monitor.encoder.encode(monitor.source.tree()).to_vec();
                    Some((frame, monitor))
                }
                Err(e) => {
                    tracing::error!("Sensor refresh failed, ending frame stream: {}", e);
                    None
                }
            }
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensors::tree::{HardwareNode, Sensor, SensorKind, SensorTree};
    use futures_util::StreamExt;

    struct StaticSource {
        tree: SensorTree,
        refreshes: usize,
    }

    impl StaticSource {
        fn new() -> Self {
            let mut node = HardwareNode::new("cpu");
            node.sensors
                .push(Sensor::new("/cpu/load/0", SensorKind::Load, 42.0));
            Self {
                tree: SensorTree { nodes: vec![node] },
                refreshes: 0,
            }
        }
    }

    impl SensorSource for StaticSource {
        fn refresh(&mut self) -> Result<()> {
            self.refreshes += 1;
            Ok(())
        }

        fn tree(&self) -> &SensorTree {
            &self.tree
        }
    }

    fn test_spec() -> SelectionSpec {
        let mut slots = std::collections::HashMap::new();
        slots.insert("/cpu/load/0".to_string(), 0);
        SelectionSpec::SlotMap { slots }
    }

    #[test]
    fn test_cycle_refreshes_then_sends() {
        // Nothing listens on the destination port; fire-and-forget still
        // counts as sent and the loop must keep going.
        let config = TelemetryConfig::new("127.0.0.1", 35432).with_interval_ms(10);
        let mut monitor = Monitor::new(StaticSource::new(), test_spec(), &config).unwrap();

        monitor.cycle();
        monitor.cycle();
        monitor.cycle();

        assert_eq!(monitor.source.refreshes, 3);
        assert_eq!(monitor.stats().frames_sent, 3);
        assert_eq!(monitor.stats().frames_failed, 0);
    }

    #[test]
    fn test_invalid_spec_fails_at_construction() {
        let config = TelemetryConfig::default();
        let empty = SelectionSpec::SlotMap {
            slots: std::collections::HashMap::new(),
        };
        assert!(Monitor::new(StaticSource::new(), empty, &config).is_err());
    }

    #[tokio::test]
    async fn test_stream_yields_fixed_width_frames() {
        let config = TelemetryConfig::new("127.0.0.1", 35432).with_interval_ms(1);
        let monitor = Monitor::new(StaticSource::new(), test_spec(), &config).unwrap();

        let mut stream = monitor.into_stream();
        let first = stream.next().await.expect("stream should yield");
        let second = stream.next().await.expect("stream should yield");

        assert_eq!(first, vec![42.0]);
        assert_eq!(first.len(), second.len());
    }
}
