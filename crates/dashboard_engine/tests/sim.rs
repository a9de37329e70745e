use std::sync::{mpsc, Arc};
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use dashboard_engine::{ChannelEventSink, EventSink, ProgressSimulator, RunEvent};

fn channel_sink() -> (Arc<dyn EventSink>, mpsc::Receiver<RunEvent>) {
    let (tx, rx) = mpsc::channel();
    (Arc::new(ChannelEventSink::new(tx)), rx)
}

#[tokio::test]
async fn emits_ticks_on_cadence_until_stopped() {
    let (sink, rx) = channel_sink();
    let parent = CancellationToken::new();
    let mut sim = ProgressSimulator::start(Duration::from_millis(10), sink, &parent);

    tokio::time::sleep(Duration::from_millis(55)).await;
    sim.stop().await;

    let ticks = rx.try_iter().count();
    assert!(ticks >= 2, "expected several ticks, got {ticks}");

    // Nothing may arrive once stop has returned.
    tokio::time::sleep(Duration::from_millis(40)).await;
    assert_eq!(rx.try_iter().count(), 0);
}

#[tokio::test]
async fn stop_is_idempotent() {
    let (sink, _rx) = channel_sink();
    let parent = CancellationToken::new();
    let mut sim = ProgressSimulator::start(Duration::from_millis(10), sink, &parent);

    sim.stop().await;
    sim.stop().await;
}

#[tokio::test]
async fn parent_cancellation_stops_the_ticks() {
    let (sink, rx) = channel_sink();
    let parent = CancellationToken::new();
    let mut sim = ProgressSimulator::start(Duration::from_millis(10), sink, &parent);

    parent.cancel();
    // Give the task a moment to observe the cancellation.
    tokio::time::sleep(Duration::from_millis(30)).await;
    let _ = rx.try_iter().count();

    tokio::time::sleep(Duration::from_millis(40)).await;
    assert_eq!(rx.try_iter().count(), 0);

    sim.stop().await;
}
