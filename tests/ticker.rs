// PeriodicTicker start/stop behaviour on a real tokio runtime.

use design_patterns::config::ObserverConfig;
use design_patterns::observer::{
    run_weather_station, ChangeNotifier, Observer, ObserverSlot, PeriodicTicker, SharedObserver,
    Subject, SubjectLink, WeatherApp,
};
use design_patterns::{FailurePolicy, ObserverError};
use std::time::Duration;
use tokio::sync::mpsc::{self, error::TryRecvError};
use tokio::time::{sleep, timeout};

const PERIOD: Duration = Duration::from_millis(10);
const WAIT: Duration = Duration::from_secs(2);

/// Forwards every state it sees into a channel.
struct Forwarder {
    tx: mpsc::UnboundedSender<i64>,
}

impl Observer<i64> for Forwarder {
    fn update(&mut self, subject: &SubjectLink<i64>) -> Result<(), ObserverError> {
        let state = subject.state()?;
        self.tx
            .send(state)
            .map_err(|_| ObserverError::failed("receiver closed"))
    }
}

struct Broken;

impl Observer<i64> for Broken {
    fn update(&mut self, _subject: &SubjectLink<i64>) -> Result<(), ObserverError> {
        Err(ObserverError::failed("always broken"))
    }
}

fn forwarder() -> (SharedObserver<i64>, mpsc::UnboundedReceiver<i64>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (ObserverSlot::new(Forwarder { tx }), rx)
}

#[tokio::test]
async fn test_ticks_increment_and_notify() {
    let notifier = ChangeNotifier::new(20_i64);
    let (observer, mut rx) = forwarder();
    notifier.register_observer(observer);

    let ticker = PeriodicTicker::start(&notifier, PERIOD, |t| t + 1);

    for expected in [21, 22, 23] {
        let seen = timeout(WAIT, rx.recv()).await.unwrap();
        assert_eq!(seen, Some(expected));
    }

    let ticks = ticker.stop().await.unwrap();
    assert!(ticks >= 3);
}

#[tokio::test]
async fn test_sub_millisecond_period_still_ticks() {
    let notifier = ChangeNotifier::new(0_i64);
    let (observer, mut rx) = forwarder();
    notifier.register_observer(observer);

    let ticker = PeriodicTicker::start(&notifier, Duration::from_micros(400), |t| t + 1);

    let seen = timeout(WAIT, rx.recv()).await.unwrap();
    assert_eq!(seen, Some(1));
    assert!(ticker.stop().await.unwrap() >= 1);
}

#[tokio::test]
async fn test_stop_halts_notifications() {
    let notifier = ChangeNotifier::new(0_i64);
    let (observer, mut rx) = forwarder();
    notifier.register_observer(observer);

    let ticker = PeriodicTicker::start(&notifier, PERIOD, |t| t + 1);
    timeout(WAIT, rx.recv()).await.unwrap();
    ticker.stop().await.unwrap();

    while rx.try_recv().is_ok() {}
    let frozen = notifier.get_state();

    sleep(PERIOD * 5).await;
    assert_eq!(rx.try_recv(), Err(TryRecvError::Empty));
    assert_eq!(notifier.get_state(), frozen);
}

#[tokio::test]
async fn test_dropping_notifier_ends_ticker() {
    let notifier = ChangeNotifier::new(0_i64);
    let ticker = PeriodicTicker::start(&notifier, PERIOD, |t| t + 1);
    assert!(ticker.is_running());

    drop(notifier);

    timeout(WAIT, async {
        while ticker.is_running() {
            sleep(PERIOD).await;
        }
    })
    .await
    .unwrap();
    assert_eq!(ticker.ticks(), 0);
}

#[tokio::test]
async fn test_dropping_handle_aborts_ticker() {
    let notifier = ChangeNotifier::new(0_i64);
    let ticker = PeriodicTicker::start(&notifier, PERIOD, |t| t + 1);
    drop(ticker);

    sleep(PERIOD * 2).await;
    let frozen = notifier.get_state();
    sleep(PERIOD * 5).await;
    assert_eq!(notifier.get_state(), frozen);
}

#[tokio::test]
async fn test_failing_observer_does_not_stop_ticker() {
    let notifier = ChangeNotifier::with_policy(0_i64, FailurePolicy::FailFast);
    notifier.register_observer(ObserverSlot::new(Broken));
    let (observer, mut rx) = forwarder();
    notifier.register_observer(observer);

    let ticker = PeriodicTicker::start(&notifier, PERIOD, |t| t + 1);

    // Fail-fast starves the forwarder, but the ticker keeps changing state.
    timeout(WAIT, async {
        while notifier.get_state() < 3 {
            sleep(PERIOD).await;
        }
    })
    .await
    .unwrap();
    ticker.stop().await.unwrap();

    assert_eq!(rx.try_recv(), Err(TryRecvError::Empty));
}

#[tokio::test]
async fn test_weather_station_demo() {
    let config = ObserverConfig {
        initial_temperature: 20,
        tick_interval_ms: 10,
        ticks: 3,
        failure_policy: FailurePolicy::IsolateAndContinue,
    };

    let readings = timeout(WAIT, run_weather_station(&config, WeatherApp::silent("test")))
        .await
        .unwrap()
        .unwrap();

    assert!(readings.len() >= 3);
    assert_eq!(&readings[..3], &[21, 22, 23]);
}
