use salescope_dashboard::wait_for_shutdown;
use std::io;
use tokio::time::{timeout, Duration};

#[tokio::test]
async fn shutdown_completes_when_signal_fires() {
    let signal = async { Ok::<(), io::Error>(()) };
    let done = timeout(Duration::from_secs(1), wait_for_shutdown(signal)).await;
    assert!(done.is_ok(), "shutdown should resolve after the signal");
}

#[tokio::test]
async fn failed_signal_listener_keeps_serving() {
    let signal = async { Err::<(), _>(io::Error::new(io::ErrorKind::Other, "no signal handler")) };
    let done = timeout(Duration::from_millis(200), wait_for_shutdown(signal)).await;
    assert!(done.is_err(), "a failed listener must not trigger shutdown");
}
