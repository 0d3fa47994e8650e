//! Shared fixtures: a validator network that authors a real signed DAG, and
//! a host that records every callback.

use dg_01_event_checks::{
    calc_gas_power_used, EcdsaTxSigner, EventCheckError, EventRules, StaticEpochReader,
};
use dg_02_event_ordering::{
    AdmissionPipeline, DropSink, EvictionHook, InMemoryDag, PeerReporter, PipelineConfig,
    PipelineHost, PipelineMetrics,
};
use parking_lot::Mutex;
use shared_types::testing::{validator_set, TestValidator, TEST_CHAIN_ID};
use shared_types::{Event, Hash, PeerId};
use std::sync::Arc;
use std::time::{Duration, Instant};

// =============================================================================
// RECORDING HOST
// =============================================================================

#[derive(Default)]
pub struct Recorder {
    pub drops: Mutex<Vec<(Hash, PeerId, EventCheckError)>>,
    pub reports: Mutex<Vec<(PeerId, EventCheckError)>>,
    pub evicted: Mutex<Vec<(Arc<Event>, PeerId)>>,
}

impl DropSink for Recorder {
    fn on_dropped(&self, event: &Arc<Event>, peer: &PeerId, err: &EventCheckError) {
        self.drops.lock().push((event.hash(), *peer, err.clone()));
    }
}

impl PeerReporter for Recorder {
    fn misbehaved(&self, peer: &PeerId, err: &EventCheckError) {
        self.reports.lock().push((*peer, err.clone()));
    }
}

impl EvictionHook for Recorder {
    fn on_evicted(&self, event: &Arc<Event>, peer: &PeerId) {
        self.evicted.lock().push((Arc::clone(event), *peer));
    }
}

// =============================================================================
// VALIDATOR NETWORK
// =============================================================================

pub struct Network {
    pub validators: Vec<TestValidator>,
    pub reader: Arc<StaticEpochReader>,
}

impl Network {
    pub fn new(size: u8, epoch: u32) -> Self {
        let validators: Vec<_> = (1..=size).map(TestValidator::from_seed).collect();
        let reader = Arc::new(StaticEpochReader::new(validator_set(epoch, &validators)));
        Self { validators, reader }
    }

    /// `rounds` rounds where every validator's event references its own
    /// previous event first and then every other validator's previous event.
    /// Returned in a valid topological order.
    pub fn build_dag(&self, epoch: u32, rounds: u32) -> Vec<Event> {
        let mut all = Vec::new();
        let mut previous: Vec<Event> = self
            .validators
            .iter()
            .map(|v| seal(v, v.genesis_event(epoch, vec![], 1)))
            .collect();
        all.extend(previous.iter().cloned());

        for round in 2..=rounds {
            let current: Vec<Event> = self
                .validators
                .iter()
                .enumerate()
                .map(|(i, v)| {
                    let others: Vec<Hash> = previous
                        .iter()
                        .enumerate()
                        .filter(|(j, _)| *j != i)
                        .map(|(_, e)| e.hash())
                        .collect();
                    let mut event = v.next_event(&previous[i], &others, round);
                    let payee = self.validators[(i + 1) % self.validators.len()].id;
                    event.transactions = vec![v.transfer(round as u64, payee, 1)];
                    seal(v, event)
                })
                .collect();
            all.extend(current.iter().cloned());
            previous = current;
        }
        all
    }
}

/// Fill in gas accounting, then fix `tx_hash` and sign.
pub fn seal(v: &TestValidator, mut event: Event) -> Event {
    event.gas_power_used = calc_gas_power_used(&event, &EventRules::default());
    v.seal(&mut event);
    event
}

// =============================================================================
// PIPELINE
// =============================================================================

pub struct Node {
    pub dag: Arc<InMemoryDag>,
    pub recorder: Arc<Recorder>,
    pub pipeline: Arc<AdmissionPipeline>,
}

pub fn node(network: &Network, config: PipelineConfig, metrics: Option<PipelineMetrics>) -> Node {
    let dag = Arc::new(InMemoryDag::new());
    let recorder = Arc::new(Recorder::default());
    let pipeline = AdmissionPipeline::new(
        config,
        network.reader.clone(),
        Arc::new(EcdsaTxSigner::new(TEST_CHAIN_ID)),
        PipelineHost {
            store: dag.clone(),
            processor: dag.clone(),
            drops: recorder.clone(),
            reporter: recorder.clone(),
            evicted: Some(recorder.clone()),
        },
        metrics,
    );
    Node {
        dag,
        recorder,
        pipeline: Arc::new(pipeline),
    }
}

/// Poll `cond` until it holds or five seconds pass.
pub fn wait_until(cond: impl Fn() -> bool) {
    let deadline = Instant::now() + Duration::from_secs(5);
    while !cond() {
        assert!(Instant::now() < deadline, "condition not reached in time");
        std::thread::sleep(Duration::from_millis(5));
    }
}

/// Every parent of every connected event was connected before it.
pub fn assert_topological(dag: &InMemoryDag) {
    let order = dag.connected_order();
    for (position, hash) in order.iter().enumerate() {
        let event = dag.get_event(hash).expect("connected event is stored");
        for parent in &event.parents {
            let parent_position = order
                .iter()
                .position(|h| h == parent)
                .expect("parent connected");
            assert!(parent_position < position);
        }
    }
}
