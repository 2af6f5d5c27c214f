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
use crate::error::{FlexverError, Result};
use crate::version::{
    Component, FlexibleVersionParser, LeftoverRecord, NumericCapabilities, ParseOutcome,
    ParsedVersion, UNSET, VersionComponents,
};
use colored::*;
use comfy_table::{Table, presets::UTF8_FULL};
use serde::Serialize;

#[derive(Serialize)]
struct ParseOutput<'a> {
    input: &'a str,
    version: String,
    code: i8,
    outcome: ParseOutcome,
    components: VersionComponents,
    leftovers: &'a LeftoverRecord,
    anomalies: Vec<String>,
}

pub struct ParseCommand<'a> {
    config: &'a FlexverConfig,
}

impl<'a> ParseCommand<'a> {
    pub fn new(config: &'a FlexverConfig) -> Result<Self> {
        Ok(Self { config })
    }

    pub fn execute(&self, input: &str, json: bool, no_big_integer: bool) -> Result<()> {
        let parser = if no_big_integer {
            FlexibleVersionParser::new(NumericCapabilities::without_big_integer())
        } else {
            FlexibleVersionParser::from_config(self.config)
        };
        log::debug!("Parsing '{input}' with {:?}", parser.capabilities());

        let parsed = parser.parse(input);

        if json {
            print_json_output(input, &parsed)?;
        } else {
            print_standard_output(input, &parsed);
        }

        if parsed.outcome == ParseOutcome::Failure {
            return Err(FlexverError::InvalidVersionFormat(input.to_string()));
        }
        Ok(())
    }
}

fn print_json_output(input: &str, parsed: &ParsedVersion) -> Result<()> {
    let output = ParseOutput {
        input,
        version: parsed.components.to_string(),
        code: parsed.outcome.code(),
        outcome: parsed.outcome,
        components: parsed.components,
        leftovers: &parsed.leftovers,
        anomalies: parsed.anomalies(),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_standard_output(input: &str, parsed: &ParsedVersion) {
    if parsed.outcome == ParseOutcome::Failure {
        eprintln!("{} '{input}' is not a usable version", "✗".red().bold());
        return;
    }

    println!(
        "{} {} ({})",
        outcome_marker(parsed.outcome),
        parsed.components.to_string().bold(),
        parsed.outcome
    );
    println!();
    println!("{}", component_table(parsed));

    for violation in &parsed.violations {
        eprintln!("{} internal parser inconsistency: {violation}", "⚠".yellow());
    }
}

fn outcome_marker(outcome: ParseOutcome) -> ColoredString {
    match outcome {
        ParseOutcome::FullSuccess => "✓".green(),
        ParseOutcome::PartialSuccess(_) | ParseOutcome::ExcessOnly => "⚠".yellow(),
        ParseOutcome::Failure => "✗".red(),
    }
}

fn component_table(parsed: &ParsedVersion) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Component", "Value", "Leftover"]);

    for component in Component::ALL {
        let value = parsed.components.get(component);
        let value = if value == UNSET {
            "-".to_string()
        } else {
            value.to_string()
        };
        table.add_row(vec![
            component.to_string(),
            value,
            parsed.leftovers.get(component).to_string(),
        ]);
    }

    if !parsed.leftovers.excess.is_empty() {
        table.add_row(vec![
            "excess".to_string(),
            "-".to_string(),
            parsed.leftovers.excess.clone(),
        ]);
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_execute_success() {
        let config = FlexverConfig::default();
        let command = ParseCommand::new(&config).unwrap();
        assert!(command.execute("1.2.3.4-beta3", true, false).is_ok());
    }

    #[test]
    fn test_execute_failure_is_invalid_format() {
        let config = FlexverConfig::default();
        let command = ParseCommand::new(&config).unwrap();
        match command.execute("5", false, false) {
            Err(FlexverError::InvalidVersionFormat(input)) => assert_eq!(input, "5"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_component_table_rows() {
        let parsed = FlexibleVersionParser::default().parse("1.2.2147483700-beta5.4.9");
        let rendered = component_table(&parsed).to_string();

        assert!(rendered.contains("2147483647"));
        assert!(rendered.contains("53-beta5"));
        assert!(rendered.contains("excess"));
        assert_eq!(parsed.leftovers.excess, "9");
    }

    #[test]
    fn test_component_table_without_excess() {
        let parsed = FlexibleVersionParser::default().parse("1.2");
        let rendered = component_table(&parsed).to_string();

        assert!(rendered.contains("revision"));
        assert!(!rendered.contains("excess"));
    }
}
