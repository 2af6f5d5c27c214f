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
use crate::error::{ErrorContext, FlexverError, Result};
use crate::version::{FlexibleVersionParser, ParsedVersion, VersionComponents};
use colored::*;
use serde::Serialize;
use std::cmp::Ordering;

#[derive(Serialize)]
struct CompareOutput<'a> {
    left: &'a str,
    right: &'a str,
    left_version: String,
    right_version: String,
    ordering: &'static str,
}

pub struct CompareCommand<'a> {
    config: &'a FlexverConfig,
}

impl<'a> CompareCommand<'a> {
    pub fn new(config: &'a FlexverConfig) -> Result<Self> {
        Ok(Self { config })
    }

    pub fn execute(&self, left: &str, right: &str, json: bool) -> Result<()> {
        let parser = FlexibleVersionParser::from_config(self.config);
        let left_parsed = parser.parse(left);
        let right_parsed = parser.parse(right);

        let left_version = comparable(left, &left_parsed)?;
        let right_version = comparable(right, &right_parsed)?;
        let ordering = left_version.cmp(right_version);

        for (input, parsed) in [(left, &left_parsed), (right, &right_parsed)] {
            for anomaly in parsed.anomalies() {
                log::info!("'{input}': {anomaly}");
            }
        }

        if json {
            let output = CompareOutput {
                left,
                right,
                left_version: left_version.to_string(),
                right_version: right_version.to_string(),
                ordering: ordering_name(ordering),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            println!(
                "{} {} {}",
                left_version.to_string().bold(),
                ordering_symbol(ordering).cyan(),
                right_version.to_string().bold()
            );
        }

        Ok(())
    }
}

/// Compares two inputs with the flexible parser; `None` if either is unusable.
pub fn compare_versions(
    parser: &FlexibleVersionParser,
    left: &str,
    right: &str,
) -> Option<Ordering> {
    let left = parser.parse(left);
    let right = parser.parse(right);
    Some(left.comparable()?.cmp(right.comparable()?))
}

fn comparable<'p>(input: &str, parsed: &'p ParsedVersion) -> Result<&'p VersionComponents> {
    parsed.comparable().ok_or_else(|| {
        let error = FlexverError::ValidationError(format!(
            "cannot compare '{input}': it is not a usable version"
        ));
        log::debug!("{}", ErrorContext::new(&error));
        error
    })
}

fn ordering_symbol(ordering: Ordering) -> &'static str {
    match ordering {
        Ordering::Less => "<",
        Ordering::Equal => "=",
        Ordering::Greater => ">",
    }
}

fn ordering_name(ordering: Ordering) -> &'static str {
    match ordering {
        Ordering::Less => "less",
        Ordering::Equal => "equal",
        Ordering::Greater => "greater",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compare_versions() {
        let parser = FlexibleVersionParser::default();
        assert_eq!(
            compare_versions(&parser, "1.2.3.4", "1.2.3.5"),
            Some(Ordering::Less)
        );
        assert_eq!(
            compare_versions(&parser, "1.2", "1.2.0"),
            Some(Ordering::Less)
        );
        assert_eq!(
            compare_versions(&parser, "1.2.3.4-beta3", "1.2.3.4"),
            Some(Ordering::Equal)
        );
        assert_eq!(
            compare_versions(&parser, "1.2.3.4.5", "1.2.3.3"),
            Some(Ordering::Greater)
        );
        assert_eq!(compare_versions(&parser, "5", "1.0"), None);
    }

    #[test]
    fn test_execute_rejects_unusable_side() {
        let config = FlexverConfig::default();
        let command = CompareCommand::new(&config).unwrap();
        match command.execute("1.0", "nope", false) {
            Err(FlexverError::ValidationError(msg)) => assert!(msg.contains("nope")),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_ordering_labels() {
        assert_eq!(ordering_symbol(Ordering::Less), "<");
        assert_eq!(ordering_name(Ordering::Greater), "greater");
    }
}
