use std::path::Path;

use crate::reader::{FormatError, ReaderError, WdqFile};

use super::{ValidationCheck, ValidationError, ValidationReport};

const FIXED_HEADER: &str = "Fixed header";
const HEADER_FIELDS: &str = "Header fields";
const CHANNEL_TABLE: &str = "Channel table";
const SAMPLE_REGION: &str = "Sample region";
const ANNOTATION_BLOCK: &str = "Annotation block";

/// Open the file and record one check per layout region.
///
/// Returns `None` when the layout is broken and channel checks cannot run.
pub(super) fn check_structure(
    path: &Path,
    report: &mut ValidationReport,
) -> Result<Option<WdqFile>, ValidationError> {
    let source_len = std::fs::metadata(path)?.len();

    let file = match WdqFile::open(path) {
        Ok(file) => file,
        Err(ReaderError::InvalidFormat(e)) => {
            report.add_check(ValidationCheck::failed(region_of(&e), e.to_string()));
            return Ok(None);
        }
        Err(ReaderError::IoError(e)) => return Err(e.into()),
        Err(other) => {
            report.add_check(ValidationCheck::failed(FIXED_HEADER, other.to_string()));
            return Ok(None);
        }
    };
    let header = file.header();

    report.add_check(ValidationCheck::ok(FIXED_HEADER));
    report.add_check(ValidationCheck::ok(HEADER_FIELDS));
    report.add_check(ValidationCheck::ok(format!(
        "{} ({} channels)",
        CHANNEL_TABLE,
        file.channel_count()
    )));
    report.add_check(ValidationCheck::ok(format!(
        "{} ({} samples per channel)",
        SAMPLE_REGION,
        file.samples_per_channel()
    )));

    let unlabelled: Vec<String> = file
        .channels()
        .iter()
        .filter(|c| c.annotation.is_empty())
        .map(|c| c.number().to_string())
        .collect();
    if unlabelled.is_empty() {
        report.add_check(ValidationCheck::ok(ANNOTATION_BLOCK));
    } else {
        report.add_check(ValidationCheck::warning(
            ANNOTATION_BLOCK,
            format!("channels without annotation: {}", unlabelled.join(", ")),
        ));
    }

    let annotation_end = header.annotation_offset() + header.annotation_bytes as u64;
    if source_len > annotation_end {
        report.add_check(ValidationCheck::warning(
            "Trailing bytes",
            format!("{} bytes after the annotation block", source_len - annotation_end),
        ));
    }

    match (header.created(), header.written()) {
        (Some(created), Some(written)) if written < created => {
            report.add_check(ValidationCheck::warning(
                "Timestamps",
                format!("file written ({}) before it was opened ({})", written, created),
            ));
        }
        (Some(_), Some(_)) => report.add_check(ValidationCheck::ok("Timestamps")),
        _ => report.add_check(ValidationCheck::warning(
            "Timestamps",
            "acquisition timestamps not recorded",
        )),
    }

    Ok(Some(file))
}

fn region_of(error: &FormatError) -> &'static str {
    match error {
        FormatError::TruncatedHeader { .. } => FIXED_HEADER,
        FormatError::InvalidHeader { field, .. } if field.starts_with("channel_") => CHANNEL_TABLE,
        FormatError::InvalidHeader { field, .. } if field.starts_with("calibration_") => {
            CHANNEL_TABLE
        }
        FormatError::InvalidHeader { .. } => HEADER_FIELDS,
        FormatError::TruncatedSampleData { .. } => SAMPLE_REGION,
        FormatError::RegionOutOfBounds { .. } => ANNOTATION_BLOCK,
    }
}
