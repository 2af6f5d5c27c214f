// Copyright 2025 dentsusoken
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::config::FlexverConfig;
use crate::version::numeric::{
    NumericCapabilities, TieredValue, split_leading_digits, tiered_parse,
};
use crate::version::{
    Component, ConsistencyViolation, LeftoverRecord, MAX_COMPONENTS, ParseOutcome, ParsedVersion,
    VersionComponents,
};

/// Best-effort parser for version strings that a strict parser rejects.
///
/// Malformed input never produces an error. The result carries whatever
/// components could be recovered, the text that could not, and a
/// [`ParseOutcome`] describing how much was lost.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlexibleVersionParser {
    capabilities: NumericCapabilities,
}

impl FlexibleVersionParser {
    pub fn new(capabilities: NumericCapabilities) -> Self {
        Self { capabilities }
    }

    pub fn from_config(config: &FlexverConfig) -> Self {
        Self::new(config.numeric_capabilities())
    }

    pub fn capabilities(&self) -> NumericCapabilities {
        self.capabilities
    }

    pub fn parse(&self, input: &str) -> ParsedVersion {
        if let Some(components) = VersionComponents::parse_strict(input) {
            log::trace!("'{input}' parsed strictly as {components}");
            return ParsedVersion {
                components,
                leftovers: LeftoverRecord::default(),
                outcome: ParseOutcome::FullSuccess,
                violations: Vec::new(),
            };
        }

        let segments: Vec<&str> = input.split('.').collect();
        if segments.len() < 2 {
            log::debug!("'{input}' has fewer than two dot-separated segments");
            return ParsedVersion::failure();
        }

        let mut leftovers = LeftoverRecord::default();
        if segments.len() > MAX_COMPONENTS {
            leftovers.excess = segments[MAX_COMPONENTS..].join(".");

            if let Some(components) = VersionComponents::from_segments(&segments[..MAX_COMPONENTS])
            {
                log::debug!(
                    "'{input}' is a clean version followed by excess '{}'",
                    leftovers.excess
                );
                return ParsedVersion {
                    components,
                    leftovers,
                    outcome: ParseOutcome::ExcessOnly,
                    violations: Vec::new(),
                };
            }
        }

        // Walk right to left until the segments before `index` form a clean version,
        // then salvage what we can from the segment at `index`.
        let start = (segments.len() - 1).min(MAX_COMPONENTS - 1);
        for index in (1..=start).rev() {
            let Some(prefix) = VersionComponents::from_segments(&segments[..index]) else {
                continue;
            };
            let Some(component) = Component::from_index(index) else {
                continue;
            };

            let mut violations = Vec::new();
            let components =
                self.repair(prefix, component, &segments, &mut leftovers, &mut violations);
            log::debug!("'{input}' recovered as {components}, cleanup started at {component}");

            return ParsedVersion {
                components,
                leftovers,
                outcome: ParseOutcome::PartialSuccess(component),
                violations,
            };
        }

        log::debug!("'{input}' has no major component that fits a non-negative i32");
        ParsedVersion::failure()
    }

    /// Folds the leading digits of the segment at `component` into `prefix` and
    /// records the rest, plus every later segment, as leftovers.
    fn repair(
        &self,
        prefix: VersionComponents,
        component: Component,
        segments: &[&str],
        leftovers: &mut LeftoverRecord,
        violations: &mut Vec<ConsistencyViolation>,
    ) -> VersionComponents {
        let segment = segments[component.index()];
        let (digits, remainder) = split_leading_digits(segment);

        let (value, leftover) = if digits.is_empty() {
            (None, segment.to_string())
        } else {
            match tiered_parse(digits, self.capabilities) {
                Ok(TieredValue::Fits(value)) => (Some(value), remainder.to_string()),
                Ok(TieredValue::Saturated { tier, excess }) => {
                    log::debug!("{component} '{digits}' saturated at {tier:?} tier");
                    (Some(i32::MAX), format!("{excess}{remainder}"))
                }
                Ok(TieredValue::Unrepresentable) => (None, segment.to_string()),
                Err(violation) => {
                    report(violations, violation);
                    (None, segment.to_string())
                }
            }
        };

        let components = match value {
            Some(value) => match prefix.with_appended(value) {
                Some(components) => components,
                None => {
                    report(
                        violations,
                        ConsistencyViolation::new(format!(
                            "appending {value} to clean prefix {prefix} was rejected"
                        )),
                    );
                    prefix
                }
            },
            None => prefix,
        };

        leftovers.set(component, leftover);
        for later in Component::ALL.iter().skip(component.index() + 1) {
            if let Some(original) = segments.get(later.index()) {
                leftovers.set(*later, *original);
            }
        }

        components
    }
}

fn report(violations: &mut Vec<ConsistencyViolation>, violation: ConsistencyViolation) {
    log::warn!("Flexible version parser inconsistency (this is a bug): {violation}");
    violations.push(violation);
}
