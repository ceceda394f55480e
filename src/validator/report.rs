use std::fmt;

#[cfg(feature = "colorized_output")]
use console::style;

/// Outcome of one validation check
#[derive(Debug, Clone, PartialEq)]
pub enum CheckStatus {
    /// Check passed
    Ok,
    /// File is readable but something is unusual
    Warning(String),
    /// File violates the layout
    Failed(String),
}

/// One named check and its outcome
#[derive(Debug, Clone)]
pub struct ValidationCheck {
    /// Name of the check
    pub name: String,
    /// Outcome
    pub status: CheckStatus,
}

impl ValidationCheck {
    pub(crate) fn ok(name: impl Into<String>) -> Self {
        Self::with_status(name, CheckStatus::Ok)
    }

    pub(crate) fn warning(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::with_status(name, CheckStatus::Warning(message.into()))
    }

    pub(crate) fn failed(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::with_status(name, CheckStatus::Failed(message.into()))
    }

    fn with_status(name: impl Into<String>, status: CheckStatus) -> Self {
        Self {
            name: name.into(),
            status,
        }
    }

    fn symbol(&self) -> &'static str {
        match self.status {
            CheckStatus::Ok => "✓",
            CheckStatus::Warning(_) => "⚠",
            CheckStatus::Failed(_) => "✗",
        }
    }
}

/// Validation report for one WinDAQ file
#[derive(Debug)]
pub struct ValidationReport {
    /// Checks in the order they ran
    pub checks: Vec<ValidationCheck>,
    /// File that was validated
    pub file_path: String,
}

impl ValidationReport {
    /// Start an empty report for `file_path`
    pub fn new(file_path: impl Into<String>) -> Self {
        Self {
            checks: Vec::new(),
            file_path: file_path.into(),
        }
    }

    /// Record a check
    pub fn add_check(&mut self, check: ValidationCheck) {
        self.checks.push(check);
    }

    /// Counts of (passed, warnings, failed) checks
    pub fn counts(&self) -> (usize, usize, usize) {
        self.checks
            .iter()
            .fold((0, 0, 0), |(ok, warn, fail), check| match check.status {
                CheckStatus::Ok => (ok + 1, warn, fail),
                CheckStatus::Warning(_) => (ok, warn + 1, fail),
                CheckStatus::Failed(_) => (ok, warn, fail + 1),
            })
    }

    /// Whether any check failed
    pub fn has_failures(&self) -> bool {
        self.counts().2 > 0
    }

    /// Whether any check produced a warning
    pub fn has_warnings(&self) -> bool {
        self.counts().1 > 0
    }

    fn verdict(&self) -> &'static str {
        if self.has_failures() {
            "Validation FAILED"
        } else if self.has_warnings() {
            "Validation PASSED with warnings"
        } else {
            "Validation PASSED"
        }
    }

    /// Render the report with terminal colors when the `colorized_output` feature is on
    pub fn format_colored(&self) -> String {
        #[cfg(feature = "colorized_output")]
        {
            let mut output = String::new();
            output.push_str(&format!("{}\n", style("WinDAQ Validation Report").bold().cyan()));
            output.push_str(&format!("{}: {}\n\n", style("File").bold(), self.file_path));

            for check in &self.checks {
                let line = match &check.status {
                    CheckStatus::Ok => format!("{} {}", style(check.symbol()).green(), check.name),
                    CheckStatus::Warning(msg) => format!(
                        "{} {} - {}",
                        style(check.symbol()).yellow(),
                        check.name,
                        style(msg).yellow()
                    ),
                    CheckStatus::Failed(msg) => format!(
                        "{} {} - {}",
                        style(check.symbol()).red(),
                        check.name,
                        style(msg).red()
                    ),
                };
                output.push_str(&line);
                output.push('\n');
            }

            let (ok, warn, fail) = self.counts();
            output.push_str(&format!(
                "\n{}: {} passed, {} warnings, {} failed\n",
                style("Summary").bold(),
                style(ok).green(),
                style(warn).yellow(),
                style(fail).red()
            ));
            let verdict = if self.has_failures() {
                style(self.verdict()).red().bold()
            } else if self.has_warnings() {
                style(self.verdict()).yellow().bold()
            } else {
                style(self.verdict()).green().bold()
            };
            output.push_str(&format!("{}\n", verdict));
            output
        }

        #[cfg(not(feature = "colorized_output"))]
        {
            self.to_string()
        }
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "WinDAQ Validation Report")?;
        writeln!(f, "File: {}", self.file_path)?;
        writeln!(f)?;

        for check in &self.checks {
            match &check.status {
                CheckStatus::Ok => writeln!(f, "{} {}", check.symbol(), check.name)?,
                CheckStatus::Warning(msg) | CheckStatus::Failed(msg) => {
                    writeln!(f, "{} {} - {}", check.symbol(), check.name, msg)?
                }
            }
        }

        let (ok, warn, fail) = self.counts();
        writeln!(f)?;
        writeln!(f, "Summary: {} passed, {} warnings, {} failed", ok, warn, fail)?;
        writeln!(f, "{}", self.verdict())
    }
}
