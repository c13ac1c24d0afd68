//! Assembly report types.
//!
//! Image problems never abort a build, so they are collected here and shown
//! to the user afterwards, in the same shape as the other CLI reports.

use std::fmt;

use serde::Serialize;

/// Summary of one deck assembly.
#[derive(Clone, Debug, Default, Serialize)]
pub struct AssemblyReport {
    /// Number of slides produced.
    pub slide_count: usize,
    /// Number of slides that received a picture.
    pub picture_count: usize,
    /// Issues discovered while attaching images.
    pub issues: Vec<AssemblyIssue>,
}

impl AssemblyReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, issue: AssemblyIssue) {
        self.issues.push(issue);
    }

    pub fn warning_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Warning)
            .count()
    }

    pub fn info_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Info)
            .count()
    }

    /// Issues recorded for one slide position.
    pub fn issues_for(&self, slide: usize) -> impl Iterator<Item = &AssemblyIssue> {
        self.issues
            .iter()
            .filter(move |issue| issue.slide == slide)
    }
}

impl fmt::Display for AssemblyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "  {} slides, {} pictures",
            self.slide_count, self.picture_count
        )?;

        for (label, severity) in [("Warnings", Severity::Warning), ("Notes", Severity::Info)] {
            let count = self
                .issues
                .iter()
                .filter(|i| i.severity == severity)
                .count();
            if count == 0 {
                continue;
            }

            writeln!(f)?;
            writeln!(f, "{} ({}):", label, count)?;
            for issue in self.issues.iter().filter(|i| i.severity == severity) {
                writeln!(f, "  - {}", issue)?;
            }
        }

        Ok(())
    }
}

/// A single issue found while assembling a slide.
#[derive(Clone, Debug, Serialize)]
pub struct AssemblyIssue {
    pub severity: Severity,
    pub code: IssueCode,
    /// 0-based slide position the issue belongs to.
    pub slide: usize,
    pub message: String,
}

impl AssemblyIssue {
    pub fn warning(code: IssueCode, slide: usize, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            slide,
            message: message.into(),
        }
    }

    pub fn info(code: IssueCode, slide: usize, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            code,
            slide,
            message: message.into(),
        }
    }
}

impl fmt::Display for AssemblyIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}] slide {}: {}", self.code, self.slide, self.message)
    }
}

/// Severity of an assembly issue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// The slide was produced without its picture.
    Warning,
    /// Informational: something non-obvious happened but nothing was lost.
    Info,
}

/// Stable code identifying the type of issue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCode {
    /// Neither the exact path nor a fallback candidate exists.
    ImageMissing,
    /// The image file exists but could not be read or embedded.
    ImageAttachFailed,
    /// The exact path was missing and a similarly named file was used.
    ImageFallbackUsed,
    /// The image index names a slide position past the end of the deck.
    ImageIndexOutOfRange,
}
