use std::path::Path;
use std::process::Command as StdCommand;

use assert_cmd::Command;
use tempfile::TempDir;

/// Test utilities for driving the binary
mod test_utils {
    use super::*;

    /// Build an `ac3remux` command isolated from the caller's config
    pub fn ac3remux(dir: &TempDir) -> Command {
        let mut cmd = Command::cargo_bin("ac3remux").unwrap();
        cmd.current_dir(dir.path())
            .env_remove("AC3REMUX_CONFIG")
            .env_remove("AC3REMUX_AUDIO_CODEC")
            .env_remove("AC3REMUX_AUDIO_BITRATE")
            .env_remove("AC3REMUX_OVERWRITE")
            .env_remove("AC3REMUX_PROGRESS_PATTERN")
            .env_remove("AC3REMUX_FFMPEG")
            .env_remove("AC3REMUX_FFPROBE")
            .env_remove("XDG_CONFIG_HOME")
            .env_remove("RUST_LOG")
            .env("HOME", dir.path());
        cmd
    }

    pub fn tool_available(name: &str) -> bool {
        StdCommand::new(name)
            .arg("-version")
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    }

    /// Create a short clip with one video and one AAC audio stream
    pub fn create_test_video(output_path: &Path, seconds: u32) -> bool {
        let duration = seconds.to_string();
        StdCommand::new("ffmpeg")
            .args(["-nostdin", "-y", "-f", "lavfi", "-i"])
            .arg(format!("testsrc=duration={}:size=160x120:rate=15", duration))
            .args(["-f", "lavfi", "-i"])
            .arg(format!("sine=frequency=1000:duration={}", duration))
            .args(["-c:v", "mpeg4", "-c:a", "aac", "-t", &duration])
            .arg(output_path)
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    }
}

use test_utils::*;

#[test]
fn test_help_lists_commands() {
    let dir = TempDir::new().unwrap();
    let output = ac3remux(&dir).arg("--help").output().unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("remux"));
    assert!(stdout.contains("probe"));
}

#[test]
fn test_probe_missing_file_fails() {
    let dir = TempDir::new().unwrap();
    let output = ac3remux(&dir)
        .args(["probe", "--input", "does-not-exist.mkv"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("not found"), "stderr: {}", stderr);
}

#[test]
fn test_remux_missing_input_fails() {
    let dir = TempDir::new().unwrap();
    let output = ac3remux(&dir)
        .args(["remux", "--input", "missing.mkv", "--progress", "none"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("not found"), "stderr: {}", stderr);
    assert!(!dir.path().join("missing.ac3.mkv").exists());
}

#[test]
fn test_missing_config_file_fails() {
    let dir = TempDir::new().unwrap();
    let output = ac3remux(&dir)
        .args(["--config", "nowhere.toml", "probe", "--input", "x.mkv"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("does not exist"), "stderr: {}", stderr);
}

#[test]
fn test_config_sources_are_logged() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("ac3remux.toml"),
        "[remux]\naudio_bitrate = \"448k\"\n",
    )
    .unwrap();

    let output = ac3remux(&dir)
        .env("AC3REMUX_AUDIO_CODEC", "eac3")
        .args(["--log-level", "debug", "--log-format", "compact"])
        .args(["probe", "--input", "missing.mkv"])
        .output()
        .unwrap();

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Using configuration from"), "stderr: {}", stderr);
    assert!(
        stderr.contains("Environment override from AC3REMUX_AUDIO_CODEC"),
        "stderr: {}",
        stderr
    );
}

#[test]
fn test_invalid_bitrate_is_rejected() {
    let dir = TempDir::new().unwrap();
    let output = ac3remux(&dir)
        .args(["remux", "--input", "in.mkv", "--audio-bitrate", "loud"])
        .output()
        .unwrap();

    assert!(!output.status.success());
}

#[test]
fn test_remux_real_file_reports_progress() {
    if !tool_available("ffmpeg") || !tool_available("ffprobe") {
        eprintln!("Skipping: ffmpeg/ffprobe not available");
        return;
    }

    let dir = TempDir::new().unwrap();
    let input = dir.path().join("clip.mkv");
    if !create_test_video(&input, 3) {
        eprintln!("Skipping: could not generate test clip");
        return;
    }

    let output = ac3remux(&dir)
        .args(["remux", "--input"])
        .arg(&input)
        .args(["--progress", "json"])
        .output()
        .unwrap();

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let events: Vec<serde_json::Value> = stdout
        .lines()
        .filter_map(|l| serde_json::from_str(l).ok())
        .collect();
    assert_eq!(events.first().unwrap()["event"], "start");
    assert_eq!(events.last().unwrap()["event"], "complete");

    let percents: Vec<u64> = events
        .iter()
        .filter(|e| e["event"] == "progress")
        .filter_map(|e| e["percent"].as_u64())
        .collect();
    assert!(percents.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(percents.last(), Some(&100));

    assert!(dir.path().join("clip.ac3.mkv").exists());
}

#[test]
fn test_probe_real_file_json() {
    if !tool_available("ffmpeg") || !tool_available("ffprobe") {
        eprintln!("Skipping: ffmpeg/ffprobe not available");
        return;
    }

    let dir = TempDir::new().unwrap();
    let input = dir.path().join("clip.mkv");
    if !create_test_video(&input, 2) {
        eprintln!("Skipping: could not generate test clip");
        return;
    }

    let output = ac3remux(&dir)
        .args(["probe", "--json", "--input"])
        .arg(&input)
        .output()
        .unwrap();

    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let seconds = report["duration_seconds"].as_f64().unwrap();
    assert!(seconds > 1.5 && seconds < 2.5, "duration {}", seconds);
}
