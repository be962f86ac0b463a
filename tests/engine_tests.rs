//! Integration tests for the progress tracker through the public API

use ac3_remux_cli::engine::progress::ProgressTracker;
use ac3_remux_cli::{Percent, RemuxError};

fn status_line(clock: &str) -> String {
    format!(
        "frame= 4321 fps=310 q=-1.0 size=  204800kB time={} bitrate=12000.0kbits/s speed=12.9x",
        clock
    )
}

fn run(total: f64, lines: &[String]) -> (Vec<Percent>, Percent) {
    let mut session = ProgressTracker::new().begin(total).unwrap();
    let emitted = lines.iter().filter_map(|l| session.observe(l)).collect();
    (emitted, session.finish())
}

#[test]
fn test_two_minute_remux_log() {
    let lines = vec![
        "Input #0, matroska,webm, from 'movie.mkv':".to_string(),
        "  Duration: 00:02:00.00, start: 0.000000, bitrate: 12000 kb/s".to_string(),
        "Stream mapping:".to_string(),
        "  Stream #0:1 -> #0:1 (dts (dca) -> ac3 (native))".to_string(),
        status_line("00:00:30.00"),
        status_line("00:01:00.00"),
        status_line("00:02:00.00"),
        "video:1000kB audio:9000kB subtitle:0kB other streams:0kB".to_string(),
    ];

    let (emitted, finished) = run(120.0, &lines);
    assert_eq!(emitted, vec![25, 50, 100]);
    assert_eq!(finished, 100);
}

#[test]
fn test_jittery_log_never_regresses() {
    let clocks = [
        "00:00:10.00",
        "00:00:09.50",
        "00:00:20.00",
        "00:00:19.99",
        "00:00:20.00",
        "00:00:25.00",
    ];
    let lines: Vec<String> = clocks.iter().map(|c| status_line(c)).collect();

    let (emitted, _) = run(100.0, &lines);
    assert_eq!(emitted, vec![10, 20, 25]);
}

#[test]
fn test_truncated_log_still_finishes_at_100() {
    let lines = vec![status_line("00:00:12.00"), "Conversion failed!".to_string()];
    let (emitted, finished) = run(60.0, &lines);
    assert_eq!(emitted, vec![20]);
    assert_eq!(finished, 100);
}

#[test]
fn test_empty_log_finishes_at_100() {
    let (emitted, finished) = run(42.0, &[]);
    assert!(emitted.is_empty());
    assert_eq!(finished, 100);
}

#[test]
fn test_sessions_are_independent() {
    let tracker = ProgressTracker::new();
    let mut first = tracker.begin(100.0).unwrap();
    let mut second = tracker.begin(100.0).unwrap();

    assert_eq!(first.observe("time=00:01:20.00"), Some(80));
    assert_eq!(second.observe("time=00:00:10.00"), Some(10));
    assert_eq!(first.last_reported(), 80);
    assert_eq!(second.last_reported(), 10);
}

#[test]
fn test_invalid_durations_fail_before_streaming() {
    let tracker = ProgressTracker::new();
    assert!(matches!(
        tracker.begin(0.0),
        Err(RemuxError::InvalidDuration { .. })
    ));
    assert!(matches!(
        tracker.begin(-5.0),
        Err(RemuxError::InvalidDuration { .. })
    ));
}

#[test]
fn test_long_running_hours_marker() {
    let (emitted, _) = run(7200.0, &[status_line("01:00:00.00"), status_line("101:00:00.00")]);
    assert_eq!(emitted, vec![50, 100]);
}
