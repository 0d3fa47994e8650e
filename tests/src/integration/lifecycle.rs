//! # Pipeline Lifecycle
//!
//! Backpressure and shutdown, epoch changes, and metrics exposition through
//! the telemetry handle.

#[cfg(test)]
mod tests {
    use crate::integration::support::{node, wait_until, Network};
    use dag_telemetry::{init_telemetry, MetricsHandle, TelemetryConfig};
    use dg_01_event_checks::{EventCheckError, HeavyCheckConfig};
    use dg_02_event_ordering::{BufferLimit, PipelineConfig, PipelineMetrics};
    use shared_types::testing::validator_set;
    use shared_types::NodeId;
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    // =============================================================================
    // BACKPRESSURE
    // =============================================================================

    #[test]
    fn test_blocked_ingest_returns_terminated_on_stop() {
        let network = Network::new(4, 1);
        let events = network.build_dag(1, 3);
        let config = PipelineConfig {
            heavy: HeavyCheckConfig {
                threads: 1,
                max_queued_tasks: 1,
            },
            ..Default::default()
        };
        let node = node(&network, config, None);

        // Not started: the first batch fills the queue, the second blocks.
        let pipeline = Arc::clone(&node.pipeline);
        let producer = thread::spawn(move || pipeline.ingest_from_peer(NodeId([1u8; 32]), events));

        wait_until(|| node.pipeline.overloaded());
        thread::sleep(Duration::from_millis(50));
        assert!(!producer.is_finished());

        node.pipeline.stop();
        assert_eq!(producer.join().unwrap(), Err(EventCheckError::Terminated));
        assert_eq!(node.dag.len(), 0);
    }

    #[test]
    fn test_restart_accepts_new_work() {
        let network = Network::new(4, 1);
        let events = network.build_dag(1, 2);
        let node = node(&network, PipelineConfig::default(), None);

        node.pipeline.start().unwrap();
        node.pipeline.stop();
        node.pipeline.start().unwrap();

        node.pipeline
            .ingest_from_peer(NodeId([1u8; 32]), events.clone())
            .unwrap();
        wait_until(|| node.dag.len() == events.len());
        node.pipeline.stop();
    }

    // =============================================================================
    // EPOCH CHANGE
    // =============================================================================

    #[test]
    fn test_events_from_past_epoch_dropped_without_ban() {
        let network = Network::new(4, 1);
        let events = network.build_dag(1, 2);
        let (genesis, round_two) = events.split_at(4);
        let node = node(&network, PipelineConfig::default(), None);
        node.pipeline.start().unwrap();

        let peer = NodeId([2u8; 32]);
        node.pipeline.ingest_from_peer(peer, round_two.to_vec()).unwrap();
        wait_until(|| node.pipeline.buffer().len() == 4);

        network
            .reader
            .advance(validator_set(2, &network.validators));
        node.pipeline.ingest_from_peer(peer, genesis.to_vec()).unwrap();
        wait_until(|| node.recorder.drops.lock().len() == 4);

        assert!(node
            .recorder
            .drops
            .lock()
            .iter()
            .all(|(_, _, err)| matches!(err, EventCheckError::NotRelevant { event: 1, current: 2 })));
        assert!(node.recorder.reports.lock().is_empty());
        assert_eq!(node.dag.len(), 0);

        // Round-two events can never resolve now; clearing discards them.
        node.pipeline.clear();
        assert!(node.pipeline.buffer().is_empty());
        node.pipeline.stop();
    }

    #[test]
    fn test_local_events_skip_heavy_checks() {
        let network = Network::new(4, 1);
        let events = network.build_dag(1, 2);
        let node = node(&network, PipelineConfig::default(), None);

        // Never started: local ingestion does not touch the pool.
        for event in events.iter().rev() {
            node.pipeline.ingest_local(event.clone()).unwrap();
        }
        assert_eq!(node.dag.len(), events.len());
        assert!(node.recorder.drops.lock().is_empty());
    }

    // =============================================================================
    // TELEMETRY
    // =============================================================================

    #[test]
    fn test_metrics_rendered_through_telemetry_handle() {
        let network = Network::new(4, 1);
        let events = network.build_dag(1, 2);
        let handle = MetricsHandle::new("dag-itest").unwrap();
        let metrics = PipelineMetrics::register(handle.registry()).unwrap();
        let config = PipelineConfig {
            buffer: BufferLimit {
                max_events: 2,
                max_bytes: usize::MAX,
            },
            ..Default::default()
        };
        let node = node(&network, config, Some(metrics));
        node.pipeline.start().unwrap();

        let peer = NodeId([3u8; 32]);
        node.pipeline.ingest_from_peer(peer, events.clone()).unwrap();
        wait_until(|| {
            node.dag.len() + node.recorder.evicted.lock().len() + node.pipeline.buffer().len()
                == events.len()
                && node.pipeline.buffer().is_empty()
        });
        node.pipeline.ingest_from_peer(peer, events[..1].to_vec()).unwrap();
        node.pipeline.stop();

        let connected = node.dag.len();
        let evicted = node.recorder.evicted.lock().len();
        let text = handle.gather_text().unwrap();
        assert!(text.contains(&format!(
            "dag_events_processed_total{{service=\"dag-itest\"}} {connected}"
        )));
        assert!(text.contains(&format!(
            "dag_events_evicted_total{{service=\"dag-itest\"}} {evicted}"
        )));
        assert!(text.contains(
            "dag_events_dropped_total{kind=\"already_connected\",service=\"dag-itest\"} 1"
        ));
        assert!(text.contains("dag_heavy_batch_seconds_count"));
    }

    #[test]
    fn test_telemetry_installs_subscriber_once() {
        let config = TelemetryConfig {
            log_level: "warn".to_string(),
            ..Default::default()
        };
        let guard = init_telemetry(config.clone()).unwrap();
        assert_eq!(guard.config().log_level, "warn");
        assert!(guard.metrics().gather_text().unwrap().is_empty());

        assert!(init_telemetry(config).is_err());
    }
}
