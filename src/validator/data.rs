use crate::reader::{ReaderError, WdqFile};

use super::{ValidationCheck, ValidationError, ValidationReport};

/// Decode every channel and check length and finiteness.
pub(super) fn check_channels(
    file: &WdqFile,
    report: &mut ValidationReport,
) -> Result<(), ValidationError> {
    let expected = file.samples_per_channel();

    for channel in file.channels() {
        let name = format!("Channel {} ({})", channel.number(), channel.display_name());

        let values = match file.samples(channel.index) {
            Ok(values) => values,
            Err(ReaderError::IoError(e)) => return Err(e.into()),
            Err(e) => {
                report.add_check(ValidationCheck::failed(name, e.to_string()));
                continue;
            }
        };

        let check = if values.len() != expected {
            ValidationCheck::failed(
                name,
                format!("decoded {} samples, header declares {}", values.len(), expected),
            )
        } else if values.iter().any(|v| !v.is_finite()) {
            ValidationCheck::failed(name, "calibration produces non-finite values")
        } else if channel.calibration.slope == 0.0 {
            ValidationCheck::warning(name, "calibration slope is zero")
        } else {
            ValidationCheck::ok(name)
        };
        report.add_check(check);
    }

    Ok(())
}
