//! # DAG Admission Benchmarks
//!
//! | Stage | Measures |
//! |-------|----------|
//! | Basic checks | Structural and gas checks per event |
//! | Heavy checks | Event and transaction signature recovery, cold and cached |
//! | Ordering buffer | Reverse-order release of a self-parent chain |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use dg_01_event_checks::{
    calc_gas_power_used, BasicChecker, EcdsaTxSigner, EventCheckError, EventRules, HeavyChecker,
};
use dg_02_event_ordering::{BufferLimit, DropSink, EventsBuffer, InMemoryDag, OrderingCallbacks};
use shared_types::testing::{TestValidator, TEST_CHAIN_ID};
use shared_types::{Event, PeerId};
use std::sync::Arc;
use std::time::Duration;

struct Discard;

impl DropSink for Discard {
    fn on_dropped(&self, _event: &Arc<Event>, _peer: &PeerId, _err: &EventCheckError) {}
}

fn event_with_txs(v: &TestValidator, txs: usize) -> Event {
    let mut event = v.genesis_event(1, vec![], 1);
    event.transactions = (0..txs as u64).map(|n| v.transfer(n, [0x22; 20], 1)).collect();
    event.gas_power_used = calc_gas_power_used(&event, &EventRules::default());
    v.seal(&mut event);
    event
}

fn chain(v: &TestValidator, len: usize) -> Vec<Arc<Event>> {
    let mut events = Vec::with_capacity(len);
    let mut last = v.genesis_event(1, vec![], 1);
    v.seal(&mut last);
    events.push(Arc::new(last.clone()));
    for lamport in 2..=len as u32 {
        let mut next = v.next_event(&last, &[], lamport);
        v.seal(&mut next);
        events.push(Arc::new(next.clone()));
        last = next;
    }
    events
}

// ============================================================================
// CHECKS
// ============================================================================

fn bench_basic_checks(c: &mut Criterion) {
    let mut group = c.benchmark_group("dg-01-basic");
    let v = TestValidator::from_seed(1);
    let checker = BasicChecker::new(EventRules::default());

    for txs in [0usize, 16, 128] {
        let event = event_with_txs(&v, txs);
        group.bench_with_input(BenchmarkId::new("validate", txs), &event, |b, event| {
            b.iter(|| black_box(checker.validate(event)))
        });
    }
    group.finish();
}

fn bench_heavy_checks(c: &mut Criterion) {
    let mut group = c.benchmark_group("dg-01-heavy");
    group.measurement_time(Duration::from_secs(10));
    let v = TestValidator::from_seed(1);
    let checker = HeavyChecker::new(Arc::new(EcdsaTxSigner::new(TEST_CHAIN_ID)));

    for txs in [1usize, 16] {
        let event = event_with_txs(&v, txs);
        group.throughput(Throughput::Elements(txs as u64 + 1));

        group.bench_with_input(BenchmarkId::new("cold", txs), &event, |b, event| {
            b.iter_batched(
                || {
                    let fresh = event.clone();
                    for tx in &fresh.transactions {
                        tx.sender.clear();
                    }
                    fresh
                },
                |fresh| black_box(checker.validate(&fresh)),
                criterion::BatchSize::SmallInput,
            )
        });

        checker.validate(&event).ok();
        group.bench_with_input(BenchmarkId::new("cached", txs), &event, |b, event| {
            b.iter(|| black_box(checker.validate(event)))
        });
    }
    group.finish();
}

// ============================================================================
// ORDERING
// ============================================================================

fn bench_reverse_release(c: &mut Criterion) {
    let mut group = c.benchmark_group("dg-02-buffer");
    let v = TestValidator::from_seed(1);

    for len in [16usize, 256] {
        let events = chain(&v, len);
        group.throughput(Throughput::Elements(len as u64));
        group.bench_with_input(BenchmarkId::new("reverse_release", len), &events, |b, events| {
            b.iter(|| {
                let dag = Arc::new(InMemoryDag::new());
                let buffer = EventsBuffer::new(
                    BufferLimit::default(),
                    OrderingCallbacks {
                        store: dag.clone(),
                        processor: dag.clone(),
                        drops: Arc::new(Discard),
                        check: None,
                        evicted: None,
                    },
                );
                for event in events.iter().rev() {
                    buffer.push_event(Arc::clone(event), PeerId::default());
                }
                black_box(dag.len())
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_basic_checks, bench_heavy_checks, bench_reverse_release);
criterion_main!(benches);
