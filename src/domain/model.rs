use serde::{Deserialize, Serialize};

/// One line of the input document. Numbering is 1-based, terminators stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    pub number: usize,
    pub text: String,
}

/// Ordered attribute-name → raw-value mapping parsed from a single markup line.
///
/// Entries keep document order. Lookups resolve duplicated names to the *last*
/// occurrence, and absence is an explicit `None` rather than an index panic.
#[derive(Debug, Clone, Default)]
pub struct AttributeMap {
    entries: Vec<(String, String)>,
}

impl AttributeMap {
    pub fn new(entries: Vec<(String, String)>) -> Self {
        Self { entries }
    }

    /// Raw value of `name`, last occurrence wins.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// What happened to a line during the transform phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOutcome {
    /// No marker substring; emitted byte-identical to the input.
    Passed,
    /// Marker line rewritten (coordinates scaled, fill suffix mutated).
    Rewritten,
    /// Marker line that failed to parse, emitted unchanged under the skip policy.
    Recovered,
}

#[derive(Debug, Clone)]
pub struct RewrittenLine {
    pub number: usize,
    pub text: String,
    pub outcome: LineOutcome,
}

/// Counters for one run, serialized as the optional JSON report.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RunStats {
    pub total_lines: usize,
    pub rewritten: usize,
    pub passed: usize,
    pub recovered: usize,
}

#[derive(Debug, Clone)]
pub struct TransformResult {
    pub lines: Vec<RewrittenLine>,
    pub stats: RunStats,
}

/// Policy for marker lines that are missing an expected attribute or marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum MalformedPolicy {
    /// Fail the whole run on the first malformed line.
    Abort,
    /// Log a warning, emit the line unchanged, keep going.
    Skip,
}

impl Default for MalformedPolicy {
    fn default() -> Self {
        MalformedPolicy::Abort
    }
}

impl std::fmt::Display for MalformedPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MalformedPolicy::Abort => write!(f, "abort"),
            MalformedPolicy::Skip => write!(f, "skip"),
        }
    }
}
