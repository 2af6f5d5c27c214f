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

use crate::error::FlexverError;
use std::fmt;

pub struct ErrorContext<'a> {
    pub error: &'a FlexverError,
    pub suggestion: Option<String>,
    pub details: Option<String>,
}

impl<'a> ErrorContext<'a> {
    pub fn new(error: &'a FlexverError) -> Self {
        let (suggestion, details) = match error {
            FlexverError::InvalidVersionFormat(msg) => {
                let suggestion = Some(
                    "A version needs at least a numeric major and minor component separated by \
                     '.' (e.g., '1.2' or '10.0.19041.1')."
                        .to_string(),
                );
                let details = Some(format!("Unparseable input: {msg}"));
                (suggestion, details)
            }
            FlexverError::ConfigFile(msg) => {
                let suggestion = Some(
                    "Check the syntax of config.toml in your flexver home (FLEXVER_HOME or \
                     ~/.flexver)."
                        .to_string(),
                );
                let details = Some(msg.clone());
                (suggestion, details)
            }
            FlexverError::InvalidConfig(msg) => {
                let suggestion = Some(
                    "Boolean settings accept 'true', 'false', '1' or '0'. Check \
                     FLEXVER_NUMERIC__BIG_INTEGER and FLEXVER_OUTPUT__COLOR."
                        .to_string(),
                );
                let details = Some(format!("Rejected value: {msg}"));
                (suggestion, details)
            }
            FlexverError::Io(io_err) => {
                let suggestion = match io_err.kind() {
                    std::io::ErrorKind::PermissionDenied => {
                        if cfg!(unix) {
                            Some("Check file permissions of the flexver home directory.".to_string())
                        } else {
                            Some("Run as Administrator or check file permissions.".to_string())
                        }
                    }
                    std::io::ErrorKind::NotFound => Some(
                        "Ensure the file or directory exists and the path is correct.".to_string(),
                    ),
                    _ => None,
                };
                let details = Some(format!("I/O error: {io_err}"));
                (suggestion, details)
            }
            _ => (None, None),
        };

        ErrorContext {
            error,
            suggestion,
            details,
        }
    }

    pub fn with_suggestion(mut self, suggestion: String) -> Self {
        self.suggestion = Some(suggestion);
        self
    }

    pub fn with_details(mut self, details: String) -> Self {
        self.details = Some(details);
        self
    }
}

impl<'a> fmt::Display for ErrorContext<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error: {}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\n\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\n\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}
