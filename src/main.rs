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

use clap::{Parser, Subcommand};
use flexver::commands::compare::CompareCommand;
use flexver::commands::parse::ParseCommand;
use flexver::config::new_flexver_config;
use flexver::error::{Result, format_error_chain, format_error_with_color, get_exit_code};
use flexver::logging;

#[derive(Parser)]
#[command(name = "flexver")]
#[command(author, version, about = "Best-effort version string parser", long_about = None)]
struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a version string and show what was recovered
    #[command(visible_alias = "p")]
    Parse {
        /// Version string (e.g., "1.2.3.4-beta3", "10.0.19041.1.2")
        input: String,

        /// Output in JSON format
        #[arg(long)]
        json: bool,

        /// Skip the arbitrary-precision tier and fall back to doubles
        #[arg(long)]
        no_big_integer: bool,
    },

    /// Compare two version strings by major, minor, build and revision
    #[command(visible_alias = "c")]
    Compare {
        left: String,
        right: String,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },
}

fn setup_logger(cli: &Cli) {
    logging::setup_logger(cli.verbose);
}

fn main() {
    let cli = Cli::parse();

    // Initialize logger based on CLI flags and environment
    setup_logger(&cli);

    // Load configuration once at startup
    let config = match new_flexver_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", format_error_chain(&e));
            std::process::exit(get_exit_code(&e));
        }
    };

    if !config.output.color {
        colored::control::set_override(false);
    }

    let result: Result<()> = (|| match cli.command {
        Commands::Parse {
            input,
            json,
            no_big_integer,
        } => {
            let command = ParseCommand::new(&config)?;
            command.execute(&input, json, no_big_integer)
        }
        Commands::Compare { left, right, json } => {
            let command = CompareCommand::new(&config)?;
            command.execute(&left, &right, json)
        }
    })();

    if let Err(e) = result {
        eprint!("{}", format_error_with_color(&e));
        std::process::exit(get_exit_code(&e));
    }
}
