// Unit tests for domain models

use std::path::PathBuf;

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::error::RemuxError;

#[test]
fn test_timestamp_parse_clock() {
    let ts = Timestamp::parse_clock("01:02:03.50").unwrap();
    assert_eq!(ts.seconds, 3723.5);
}

#[test]
fn test_timestamp_display() {
    let ts = Timestamp::from_seconds(90.25);
    assert_eq!(format!("{}", ts), "00:01:30.25");
}

#[test]
fn test_media_duration_rejects_non_positive() {
    for bad in [0.0, -5.0, f64::NAN, f64::INFINITY] {
        assert!(matches!(
            MediaDuration::from_seconds(bad),
            Err(RemuxError::InvalidDuration { .. })
        ));
    }
    assert_eq!(MediaDuration::from_seconds(12.5).unwrap().as_seconds(), 12.5);
}

#[test]
fn test_media_duration_from_probe_output() {
    let duration = MediaDuration::from_probe_output("  5012.480000\n").unwrap();
    assert_eq!(duration.as_seconds(), 5012.48);

    assert!(matches!(
        MediaDuration::from_probe_output("N/A\n"),
        Err(DomainError::DurationUnavailable(_))
    ));
    assert!(matches!(
        MediaDuration::from_probe_output(""),
        Err(DomainError::DurationUnavailable(_))
    ));
    assert!(matches!(
        MediaDuration::from_probe_output("0.000000"),
        Err(DomainError::DurationUnavailable(_))
    ));
}

#[test]
fn test_audio_settings_validation() {
    assert!(AudioSettings::new("ac3", "640k").is_ok());
    assert!(AudioSettings::new("eac3", "1536000").is_ok());
    assert!(AudioSettings::new("ac3", "1M").is_ok());
    assert!(AudioSettings::new("", "640k").is_err());
    assert!(AudioSettings::new("ac3", "k").is_err());
    assert!(AudioSettings::new("ac3", "fast").is_err());
}

#[test]
fn test_audio_settings_default() {
    let audio = AudioSettings::default();
    assert_eq!(audio.codec, "ac3");
    assert_eq!(audio.bitrate, "640k");
}

#[test]
fn test_remux_plan_ffmpeg_args() {
    let plan = RemuxPlan {
        input: PathBuf::from("/media/in.mkv"),
        output: PathBuf::from("/media/out.mkv"),
        audio: AudioSettings::default(),
        overwrite: false,
    };

    let args: Vec<String> = plan
        .ffmpeg_args()
        .iter()
        .map(|a| a.to_string_lossy().into_owned())
        .collect();

    assert_eq!(
        args,
        vec![
            "-nostdin", "-n", "-i", "/media/in.mkv", "-map", "0", "-c:v", "copy", "-c:a", "ac3",
            "-b:a", "640k", "-c:s", "copy", "/media/out.mkv",
        ]
    );
}

#[test]
fn test_remux_plan_overwrite_flag() {
    let plan = RemuxPlan {
        input: PathBuf::from("a.mkv"),
        output: PathBuf::from("b.mkv"),
        audio: AudioSettings::new("eac3", "768k").unwrap(),
        overwrite: true,
    };
    let args = plan.ffmpeg_args();
    assert_eq!(args[1], "-y");
    assert!(args.iter().any(|a| a == "eac3"));
    assert!(args.iter().any(|a| a == "768k"));
}

#[test]
fn test_remux_request_builders() {
    let request = RemuxRequest::new("in.mkv", None).with_overwrite(true);
    assert!(request.overwrite);
    assert_eq!(request.audio, AudioSettings::default());
}
