use crate::error::{FlexverError, Result};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

pub mod numeric;
pub mod parser;

pub use numeric::NumericCapabilities;
pub use parser::FlexibleVersionParser;

/// Number of numeric components a version can hold.
pub const MAX_COMPONENTS: usize = 4;

/// Sentinel stored in a component that carries no value.
pub const UNSET: i32 = -1;

/// Position of a numeric component inside a version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Component {
    Major,
    Minor,
    Build,
    Revision,
}

impl Component {
    pub const ALL: [Component; MAX_COMPONENTS] = [
        Component::Major,
        Component::Minor,
        Component::Build,
        Component::Revision,
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Zero-based position.
    pub fn index(self) -> usize {
        self as usize
    }

    /// One-based position, as reported in partial-success outcomes.
    pub fn number(self) -> u8 {
        self as u8 + 1
    }

    pub fn name(self) -> &'static str {
        match self {
            Component::Major => "major",
            Component::Minor => "minor",
            Component::Build => "build",
            Component::Revision => "revision",
        }
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Four ordered `i32` components where [`UNSET`] marks a missing value.
///
/// Once a component is unset every component to its right is unset too. The
/// derived ordering compares major, minor, build and revision in turn, so an
/// unset component sorts below any present one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct VersionComponents {
    major: i32,
    minor: i32,
    build: i32,
    revision: i32,
}

impl VersionComponents {
    pub fn unset() -> Self {
        Self {
            major: UNSET,
            minor: UNSET,
            build: UNSET,
            revision: UNSET,
        }
    }

    /// Strict conversion of one to four dot-separated segments.
    ///
    /// Every segment must be a non-empty run of ASCII digits that fits in a
    /// non-negative `i32`.
    pub fn from_segments(segments: &[&str]) -> Option<Self> {
        if segments.is_empty() || segments.len() > MAX_COMPONENTS {
            return None;
        }

        let mut components = Self::unset();
        for segment in segments {
            components = components.with_appended(parse_component(segment)?)?;
        }
        Some(components)
    }

    /// Strict conversion of a whole version string with two to four components.
    pub fn parse_strict(input: &str) -> Option<Self> {
        let segments: Vec<&str> = input.split('.').collect();
        if segments.len() < 2 {
            return None;
        }
        Self::from_segments(&segments)
    }

    /// Returns a copy with `value` stored in the first unset component.
    ///
    /// Fails when all four components are already present or `value` is negative.
    pub fn with_appended(self, value: i32) -> Option<Self> {
        if value < 0 {
            return None;
        }

        let mut values = self.to_array();
        let slot = values.iter().position(|&v| v == UNSET)?;
        values[slot] = value;
        Some(Self::from_array(values))
    }

    pub fn major(&self) -> i32 {
        self.major
    }

    pub fn minor(&self) -> i32 {
        self.minor
    }

    pub fn build(&self) -> i32 {
        self.build
    }

    pub fn revision(&self) -> i32 {
        self.revision
    }

    pub fn get(&self, component: Component) -> i32 {
        self.to_array()[component.index()]
    }

    /// Present components, left to right.
    pub fn values(&self) -> Vec<i32> {
        self.to_array().into_iter().take_while(|&v| v != UNSET).collect()
    }

    /// Number of present components.
    pub fn len(&self) -> usize {
        self.values().len()
    }

    pub fn is_empty(&self) -> bool {
        self.major == UNSET
    }

    pub fn to_array(self) -> [i32; MAX_COMPONENTS] {
        [self.major, self.minor, self.build, self.revision]
    }

    fn from_array(values: [i32; MAX_COMPONENTS]) -> Self {
        let [major, minor, build, revision] = values;
        Self {
            major,
            minor,
            build,
            revision,
        }
    }
}

impl Default for VersionComponents {
    fn default() -> Self {
        Self::unset()
    }
}

impl FromStr for VersionComponents {
    type Err = FlexverError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_strict(s).ok_or_else(|| FlexverError::InvalidVersionFormat(s.to_string()))
    }
}

impl fmt::Display for VersionComponents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, value) in self.values().iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            write!(f, "{value}")?;
        }
        Ok(())
    }
}

fn parse_component(segment: &str) -> Option<i32> {
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    segment.parse::<i32>().ok()
}

/// Text that could not be folded into the numeric components.
///
/// One slot per component plus `excess` for the dot-joined segments past the
/// fourth. Once a component's slot is written, every later component slot holds
/// its original segment verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LeftoverRecord {
    pub major: String,
    pub minor: String,
    pub build: String,
    pub revision: String,
    pub excess: String,
}

impl LeftoverRecord {
    pub fn get(&self, component: Component) -> &str {
        match component {
            Component::Major => &self.major,
            Component::Minor => &self.minor,
            Component::Build => &self.build,
            Component::Revision => &self.revision,
        }
    }

    pub(crate) fn set(&mut self, component: Component, text: impl Into<String>) {
        let slot = match component {
            Component::Major => &mut self.major,
            Component::Minor => &mut self.minor,
            Component::Build => &mut self.build,
            Component::Revision => &mut self.revision,
        };
        *slot = text.into();
    }

    pub fn is_empty(&self) -> bool {
        Component::ALL.iter().all(|&c| self.get(c).is_empty()) && self.excess.is_empty()
    }
}

/// How much of the input made it into the components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "component", rename_all = "snake_case")]
pub enum ParseOutcome {
    /// Exact conversion, nothing left over.
    FullSuccess,
    /// Usable version; this component was the first one cleaned up or dropped.
    PartialSuccess(Component),
    /// Four clean components followed by extra dot-separated segments.
    ExcessOnly,
    /// No usable version.
    Failure,
}

impl ParseOutcome {
    /// Stable numeric code: 0 full, 1-4 partial, 5 excess only, -1 failure.
    pub fn code(&self) -> i8 {
        match self {
            ParseOutcome::FullSuccess => 0,
            ParseOutcome::PartialSuccess(component) => component.number() as i8,
            ParseOutcome::ExcessOnly => 5,
            ParseOutcome::Failure => -1,
        }
    }

    pub fn is_usable(&self) -> bool {
        !matches!(self, ParseOutcome::Failure)
    }
}

impl fmt::Display for ParseOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseOutcome::FullSuccess => write!(f, "full success"),
            ParseOutcome::PartialSuccess(component) => {
                write!(f, "partial success (from {component})")
            }
            ParseOutcome::ExcessOnly => write!(f, "excess components only"),
            ParseOutcome::Failure => write!(f, "failure"),
        }
    }
}

/// A conversion that had to succeed by construction but did not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConsistencyViolation {
    pub message: String,
}

impl ConsistencyViolation {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for ConsistencyViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedVersion {
    pub components: VersionComponents,
    pub leftovers: LeftoverRecord,
    pub outcome: ParseOutcome,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub violations: Vec<ConsistencyViolation>,
}

impl ParsedVersion {
    pub fn failure() -> Self {
        Self {
            components: VersionComponents::unset(),
            leftovers: LeftoverRecord::default(),
            outcome: ParseOutcome::Failure,
            violations: Vec::new(),
        }
    }

    /// Components suitable for ordering, or `None` when parsing failed.
    pub fn comparable(&self) -> Option<&VersionComponents> {
        self.outcome.is_usable().then_some(&self.components)
    }

    /// One line per non-empty leftover slot.
    pub fn anomalies(&self) -> Vec<String> {
        let mut anomalies: Vec<String> = Component::ALL
            .iter()
            .filter(|&&c| !self.leftovers.get(c).is_empty())
            .map(|&c| format!("{c} component left '{}' unparsed", self.leftovers.get(c)))
            .collect();

        if !self.leftovers.excess.is_empty() {
            anomalies.push(format!(
                "excess components '{}' ignored",
                self.leftovers.excess
            ));
        } else if self.outcome == ParseOutcome::ExcessOnly {
            // "1.2.3.4." splits into a fifth, empty segment
            anomalies.push("empty trailing component ignored".to_string());
        }
        anomalies
    }
}
