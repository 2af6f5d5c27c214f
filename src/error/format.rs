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

use crate::error::{ErrorContext, FlexverError};
use colored::*;

pub fn format_error_chain(error: &FlexverError) -> String {
    ErrorContext::new(error).to_string()
}

/// Renders an error with its details and suggestions for the terminal.
///
/// Coloring follows `colored`'s global switch, which the binary turns off when
/// `output.color` is disabled.
pub fn format_error_with_color(error: &FlexverError) -> String {
    let context = ErrorContext::new(error);
    let mut lines = vec![format!("{} {error}", "Error:".red().bold())];

    if let Some(details) = &context.details {
        lines.push(String::new());
        lines.push(details.clone());
    }

    if let Some(suggestion) = &context.suggestion {
        lines.push(String::new());
        lines.push("Suggestions:".yellow().bold().to_string());
        lines.extend(
            suggestion
                .lines()
                .filter(|line| !line.trim().is_empty())
                .map(|line| format!("• {line}").cyan().to_string()),
        );
    }

    lines.join("\n") + "\n"
}
