//! # Admission Flows
//!
//! Real signed events from a four-validator network pushed through the full
//! pipeline: basic checks on the receive path, heavy checks on the pool,
//! epoch and parents checks once parents are resolved.

#[cfg(test)]
mod tests {
    use crate::integration::support::{assert_topological, node, seal, wait_until, Network};
    use dg_01_event_checks::{validate_all, EcdsaTxSigner, EventCheckError, HeavyCheckConfig};
    use dg_02_event_ordering::{BufferLimit, EventStore, PipelineConfig};
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::SeedableRng;
    use shared_types::testing::TEST_CHAIN_ID;
    use shared_types::{Event, EventHeader, Hash, NodeId};
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::thread;

    fn config(buffer: BufferLimit) -> PipelineConfig {
        PipelineConfig {
            heavy: HeavyCheckConfig {
                threads: 3,
                max_queued_tasks: 16,
            },
            buffer,
            ..Default::default()
        }
    }

    // =============================================================================
    // GOSSIP IN ANY ORDER
    // =============================================================================

    #[test]
    fn test_shuffled_gossip_from_many_peers_connects_everything() {
        let network = Network::new(4, 1);
        let mut events = network.build_dag(1, 6);
        events.shuffle(&mut StdRng::seed_from_u64(7));
        let total = events.len();

        let node = node(&network, config(BufferLimit::default()), None);
        node.pipeline.start().unwrap();

        let handles: Vec<_> = events
            .chunks(5)
            .enumerate()
            .map(|(i, chunk)| {
                let pipeline = Arc::clone(&node.pipeline);
                let chunk = chunk.to_vec();
                thread::spawn(move || pipeline.ingest_from_peer(NodeId([i as u8 + 1; 32]), chunk))
            })
            .collect();
        for handle in handles {
            handle.join().unwrap().unwrap();
        }

        wait_until(|| node.dag.len() == total);
        assert_topological(&node.dag);
        assert!(node.recorder.drops.lock().is_empty());
        assert!(node.pipeline.buffer().is_empty());
        node.pipeline.stop();
    }

    #[test]
    fn test_duplicate_gossip_is_benign() {
        let network = Network::new(4, 1);
        let events = network.build_dag(1, 2);
        let node = node(&network, config(BufferLimit::default()), None);
        node.pipeline.start().unwrap();

        node.pipeline
            .ingest_from_peer(NodeId([1u8; 32]), events.clone())
            .unwrap();
        wait_until(|| node.dag.len() == events.len());

        node.pipeline
            .ingest_from_peer(NodeId([2u8; 32]), events.clone())
            .unwrap();
        let drops = node.recorder.drops.lock();
        assert_eq!(drops.len(), events.len());
        assert!(drops
            .iter()
            .all(|(_, _, err)| *err == EventCheckError::AlreadyConnected));
        assert!(node.recorder.reports.lock().is_empty());
        drop(drops);
        node.pipeline.stop();
    }

    // =============================================================================
    // BAN-WORTHY EVENTS
    // =============================================================================

    #[test]
    fn test_malformed_tx_signature_bans_relayer_and_strands_descendants() {
        let network = Network::new(4, 1);
        let events = network.build_dag(1, 2);
        let (genesis, round_two) = events.split_at(4);
        let alice = &network.validators[0];

        // Alice's round-two event with a corrupted recovery id on its tx.
        let mut bad = round_two[0].clone();
        bad.transactions[0].sig[64] = 5;
        let bad = seal(alice, bad);
        let child = seal(alice, alice.next_event(&bad, &[], 3));

        let node = node(&network, config(BufferLimit::default()), None);
        node.pipeline.start().unwrap();

        let honest = NodeId([1u8; 32]);
        let liar = NodeId([2u8; 32]);
        node.pipeline
            .ingest_from_peer(honest, vec![child.clone()])
            .unwrap();
        node.pipeline.ingest_from_peer(honest, genesis.to_vec()).unwrap();
        node.pipeline.ingest_from_peer(liar, vec![bad.clone()]).unwrap();

        wait_until(|| !node.recorder.reports.lock().is_empty() && node.dag.len() == 4);

        let reports = node.recorder.reports.lock();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].0, liar);
        assert!(matches!(
            reports[0].1,
            EventCheckError::MalformedTxSig { index: 0, .. }
        ));
        assert!(!node.dag.exists(&bad.hash()));
        assert!(node.pipeline.is_buffered(&child.hash()));
        drop(reports);
        node.pipeline.stop();
    }

    #[test]
    fn test_wrong_lamport_rejected_after_parents_resolve() {
        let network = Network::new(4, 1);
        let events = network.build_dag(1, 1);
        let alice = &network.validators[0];
        let mut skewed = alice.next_event(&events[0], &[events[1].hash()], 9);
        skewed.transactions = vec![alice.transfer(0, network.validators[1].id, 1)];
        let skewed = seal(alice, skewed);

        let node = node(&network, config(BufferLimit::default()), None);
        node.pipeline.start().unwrap();
        let peer = NodeId([3u8; 32]);
        node.pipeline.ingest_from_peer(peer, vec![skewed.clone()]).unwrap();
        wait_until(|| node.pipeline.is_buffered(&skewed.hash()));

        node.pipeline.ingest_from_peer(peer, events.clone()).unwrap();
        wait_until(|| !node.recorder.drops.lock().is_empty());

        assert_eq!(
            node.recorder.drops.lock()[0],
            (
                skewed.hash(),
                peer,
                EventCheckError::WrongLamport {
                    declared: 9,
                    expected: 2
                }
            )
        );
        wait_until(|| node.dag.len() == events.len());
        node.pipeline.stop();
    }

    // =============================================================================
    // EVICTION AND RECOVERY
    // =============================================================================

    #[test]
    fn test_evicted_events_can_be_recovered_by_host() {
        let network = Network::new(4, 1);
        let events = network.build_dag(1, 2);
        let (genesis, round_two) = events.split_at(4);
        let limit = BufferLimit {
            max_events: 2,
            max_bytes: usize::MAX,
        };
        let node = node(&network, config(limit), None);
        node.pipeline.start().unwrap();

        let peer = NodeId([4u8; 32]);
        node.pipeline.ingest_from_peer(peer, round_two.to_vec()).unwrap();
        wait_until(|| node.recorder.evicted.lock().len() == 2);
        assert_eq!(node.pipeline.buffer().len(), 2);

        node.pipeline.ingest_from_peer(peer, genesis.to_vec()).unwrap();
        wait_until(|| node.dag.len() == 6);

        let evicted: Vec<Event> = node
            .recorder
            .evicted
            .lock()
            .iter()
            .map(|(event, from)| {
                assert_eq!(*from, peer);
                (**event).clone()
            })
            .collect();
        for event in &evicted {
            assert!(!node.dag.exists(&event.hash()));
        }

        node.pipeline.ingest_from_peer(peer, evicted).unwrap();
        wait_until(|| node.dag.len() == events.len());
        assert_topological(&node.dag);
        node.pipeline.stop();
    }

    // =============================================================================
    // ONE-SHOT VALIDATION
    // =============================================================================

    #[test]
    fn test_validate_all_over_connected_headers() {
        let network = Network::new(4, 1);
        let events = network.build_dag(1, 3);
        let signer = Arc::new(EcdsaTxSigner::new(TEST_CHAIN_ID));
        let rules = PipelineConfig::default().rules;

        let mut headers: HashMap<Hash, EventHeader> = HashMap::new();
        for event in &events {
            let parents: Vec<_> = event.parents.iter().map(|p| headers[p].clone()).collect();
            assert_eq!(
                validate_all(&rules, network.reader.clone(), signer.clone(), event, &parents),
                Ok(())
            );
            headers.insert(event.hash(), event.header());
        }

        // Re-signed by someone else: the recovered signer no longer matches.
        let last = events.last().unwrap();
        let mut forged = last.clone();
        network.validators[1].seal(&mut forged);
        let parents: Vec<_> = forged.parents.iter().map(|p| headers[p].clone()).collect();
        assert_eq!(
            validate_all(&rules, network.reader.clone(), signer, &forged, &parents),
            Err(EventCheckError::WrongEventSig)
        );
    }
}
