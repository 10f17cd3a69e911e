// This file is part of skein, an embeddable scripting language.
// Copyright 2022 Jeffrey Sharp
//
// SPDX-License-Identifier: GPL-3.0-or-later
//
// skein is free software: you can redistribute it and/or modify it
// under the terms of the GNU General Public License as published
// by the Free Software Foundation, either version 3 of the License,
// or (at your option) any later version.
//
// skein is distributed in the hope that it will be useful, but
// WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See
// the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with skein.  If not, see <http://www.gnu.org/licenses/>.

//! Command-line front end.

use std::process::ExitCode;
use clap::Parser as ClapParser;

use skein::Session;

/// Parses skein source files and prints their tokens or syntax graphs.
#[derive(ClapParser, Debug)]
#[command(name = skein::PROGRAM_NAME, version)]
struct Cli {
    /// Print the token stream of each input
    #[arg(short, long)]
    tokens: bool,

    /// Print the syntax graph of each input (the default)
    #[arg(short, long)]
    graph: bool,

    /// Print syntax graphs as JSON
    #[arg(short, long)]
    json: bool,

    /// Read keyword overrides from a JSON file
    #[arg(short, long, value_name = "FILE")]
    keywords: Option<String>,

    /// Input files; `-` reads standard input
    #[arg(required = true, value_name = "FILES")]
    files: Vec<String>,
}

fn main() -> ExitCode {
    let cli         = Cli::parse();
    let mut session = Session::new();

    if let Some(ref path) = cli.keywords {
        if session.load_keywords(path).is_err() {
            return ExitCode::FAILURE;
        }
    }

    let graph = cli.graph || cli.json || !cli.tokens;

    for path in &cli.files {
        let source = match session.read(path) {
            Some(source) => source,
            None         => continue,
        };

        if cli.tokens {
            session.print_tokens(path, &source);
        }

        if graph {
            if let Some(g) = session.parse(path, &source) {
                session.print_graph(path, &g, cli.json);
            }
        }
    }

    if session.succeeded() { ExitCode::SUCCESS } else { ExitCode::FAILURE }
}
