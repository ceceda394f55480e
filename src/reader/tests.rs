use super::*;
use crate::fixtures::WdqBuilder;
use crate::header::{SampleCoding, FIXED_HEADER_LEN, FLAG_PACKED};
use tempfile::tempdir;

fn two_channel_file() -> Vec<u8> {
    // Legacy coding stores code << 2
    WdqBuilder::new()
        .channel("Load", "lbf\0\0\0", 2.0, 1.0)
        .channel("Torque", "Nm", 0.5, -1.0)
        .interval(0.002)
        .frames(vec![vec![0, 40], vec![4, 80], vec![8, 120]])
        .trailer(vec![0xAA; 8])
        .build()
}

#[test]
fn test_calibration_linearity() -> Result<(), Box<dyn std::error::Error>> {
    let file = WdqFile::from_bytes(two_channel_file())?;

    assert_eq!(file.raw_codes(0)?, vec![0.0, 1.0, 2.0]);
    assert_eq!(file.samples(0)?, vec![1.0, 3.0, 5.0]);
    assert_eq!(file.samples(1)?, vec![4.0, 9.0, 14.0]);

    Ok(())
}

#[test]
fn test_open_from_path() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("run.wdq");
    std::fs::write(&path, two_channel_file())?;

    let file = WdqFile::open(&path)?;
    assert_eq!(file.channel_count(), 2);
    assert_eq!(file.samples_per_channel(), 3);
    assert_eq!(file.channel(0)?.annotation, "Load");
    assert_eq!(file.channel(0)?.unit, "lbf");
    assert_eq!(file.channel(1)?.column_label(), "Torque (Nm)");
    assert_eq!(file.samples(0)?, vec![1.0, 3.0, 5.0]);

    let preloaded = WdqFile::open_with_config(&path, ReaderConfig::preloaded())?;
    assert_eq!(preloaded.header(), file.header());
    assert_eq!(preloaded.channels(), file.channels());
    assert_eq!(preloaded.samples(1)?, file.samples(1)?);

    Ok(())
}

#[test]
fn test_time_axis() -> Result<(), Box<dyn std::error::Error>> {
    let file = WdqFile::from_bytes(two_channel_file())?;

    let time = file.time();
    assert_eq!(time.len(), 3);
    assert_eq!(time[0], 0.0);
    assert!((time[2] - 0.004).abs() < 1e-12);
    assert!((file.sample_rate() - 500.0).abs() < 1e-9);
    assert!((file.duration() - 0.006).abs() < 1e-12);

    Ok(())
}

#[test]
fn test_out_of_range_channel() -> Result<(), Box<dyn std::error::Error>> {
    let file = WdqFile::from_bytes(two_channel_file())?;

    let err = file.channel(file.channel_count()).unwrap_err();
    assert!(matches!(
        err,
        ReaderError::OutOfRange {
            index: 2,
            channel_count: 2
        }
    ));
    assert!(matches!(
        file.samples(usize::MAX),
        Err(ReaderError::OutOfRange { .. })
    ));
    assert!(matches!(file.raw_codes(7), Err(ReaderError::OutOfRange { .. })));

    Ok(())
}

#[test]
fn test_hires_coding() -> Result<(), Box<dyn std::error::Error>> {
    let bytes = WdqBuilder::new()
        .channel("Strain", "ue", 1.0, 0.0)
        .flags(0x0002)
        .frames(vec![vec![1], vec![2], vec![-4]])
        .build();
    let file = WdqFile::from_bytes(bytes)?;

    assert_eq!(file.header().coding, SampleCoding::HiRes16Bit);
    assert_eq!(file.samples(0)?, vec![0.25, 0.5, -1.0]);

    Ok(())
}

#[test]
fn test_packed_file_rejected() {
    // Two channels at divisor 2; decoding per frame would double their sample count
    let bytes = WdqBuilder::new()
        .channel("Fast", "V", 1.0, 0.0)
        .channel("Slow", "V", 1.0, 0.0)
        .flags(FLAG_PACKED)
        .frames(vec![vec![8, 8], vec![16, 16], vec![24, 24], vec![32, 32]])
        .build();

    let err = WdqFile::from_bytes(bytes).unwrap_err();
    assert!(err.is_format_error());
    assert!(matches!(
        err,
        ReaderError::InvalidFormat(FormatError::InvalidHeader { field: "flags", .. })
    ));
}

#[test]
fn test_zero_samples() -> Result<(), Box<dyn std::error::Error>> {
    let bytes = WdqBuilder::new().channel("Idle", "V", 1.0, 0.0).build();
    let file = WdqFile::from_bytes(bytes)?;

    assert_eq!(file.samples_per_channel(), 0);
    assert!(file.samples(0)?.is_empty());
    assert!(file.time().is_empty());

    Ok(())
}

#[test]
fn test_no_channels() -> Result<(), Box<dyn std::error::Error>> {
    let file = WdqFile::from_bytes(WdqBuilder::new().build())?;

    assert_eq!(file.channel_count(), 0);
    assert!(file.channels().is_empty());
    assert!(matches!(file.channel(0), Err(ReaderError::OutOfRange { .. })));

    Ok(())
}

#[test]
fn test_truncated_header() {
    let err = WdqFile::from_bytes(vec![0u8; 40]).unwrap_err();
    assert!(err.is_format_error());
    assert!(matches!(
        err,
        ReaderError::InvalidFormat(FormatError::TruncatedHeader { actual: 40, .. })
    ));
}

#[test]
fn test_truncated_sample_region_fails_open() {
    let mut bytes = WdqBuilder::new()
        .channel("A", "V", 1.0, 0.0)
        .frames(vec![vec![1], vec![2], vec![3], vec![4]])
        .build();
    bytes.truncate(FIXED_HEADER_LEN + 36 + 5);

    let err = WdqFile::from_bytes(bytes).unwrap_err();
    assert!(matches!(
        err,
        ReaderError::InvalidFormat(FormatError::TruncatedSampleData { .. })
    ));
}

#[test]
fn test_missing_annotation_block() {
    let bytes = WdqBuilder::new()
        .channel("Load", "lbf", 1.0, 0.0)
        .frames(vec![vec![1]])
        .build();
    let short = bytes[..bytes.len() - 2].to_vec();

    let err = WdqFile::from_bytes(short).unwrap_err();
    assert!(matches!(
        err,
        ReaderError::InvalidFormat(FormatError::RegionOutOfBounds {
            region: "annotation block",
            ..
        })
    ));
}

#[test]
fn test_file_truncated_after_open() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("shrinking.wdq");
    let bytes = two_channel_file();
    std::fs::write(&path, &bytes)?;

    let file = WdqFile::open(&path)?;
    std::fs::write(&path, &bytes[..FIXED_HEADER_LEN + 2 * 36 + 6])?;

    assert!(matches!(
        file.samples(0),
        Err(ReaderError::InvalidFormat(FormatError::TruncatedSampleData { .. }))
    ));

    Ok(())
}

#[cfg(unix)]
#[test]
fn test_replaced_path_keeps_reading_opened_file() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("run.wdq");
    std::fs::write(&path, two_channel_file())?;

    let file = WdqFile::open(&path)?;
    let before = file.samples(0)?;

    // Same length, different samples, swapped in under the same name
    let replacement = dir.path().join("replacement.wdq");
    let other = WdqBuilder::new()
        .channel("Load", "lbf\0\0\0", 2.0, 1.0)
        .channel("Torque", "Nm", 0.5, -1.0)
        .interval(0.002)
        .frames(vec![vec![400, 40], vec![404, 80], vec![408, 120]])
        .trailer(vec![0xAA; 8])
        .build();
    assert_eq!(other.len(), two_channel_file().len());
    std::fs::write(&replacement, other)?;
    std::fs::rename(&replacement, &path)?;

    assert_eq!(file.samples(0)?, before);
    assert_eq!(WdqFile::open(&path)?.samples(0)?, vec![201.0, 203.0, 205.0]);

    Ok(())
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempdir().unwrap();
    let err = WdqFile::open(dir.path().join("absent.wdq")).unwrap_err();
    match err {
        ReaderError::IoError(e) => assert_eq!(e.kind(), std::io::ErrorKind::NotFound),
        other => panic!("expected I/O error, got {other:?}"),
    }
}

#[test]
fn test_summary() -> Result<(), Box<dyn std::error::Error>> {
    let bytes = WdqBuilder::new()
        .channel("Load", "lbf", 2.0, 1.0)
        .frames(vec![vec![0], vec![4]])
        .timestamps(1_700_000_000, 1_700_000_002)
        .build();
    let file = WdqFile::from_bytes(bytes)?;
    let summary = file.summary();

    assert_eq!(summary.channel_count, 1);
    assert_eq!(summary.samples_per_channel, 2);
    assert_eq!(summary.channels[0].annotation, "Load");
    assert!(summary.created.is_some());

    let text = summary.to_string();
    assert!(text.contains("Channels: 1"));
    assert!(text.contains("Load (lbf)"));

    let json = serde_json::to_value(&summary)?;
    assert_eq!(json["channel_count"], 1);
    assert_eq!(json["coding"], "legacy_14bit");

    Ok(())
}
