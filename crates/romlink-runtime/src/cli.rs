// Copyright 2025 eraflo
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

//! Command-line interface of the `romlink` binary.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Host runtime for an embedded program interpreter.
#[derive(Parser, Debug)]
#[command(name = "romlink", version, about)]
pub struct Cli {
    /// Path to the manifest registering the available programs.
    #[arg(long, short, global = true, default_value = "Roms.toml")]
    pub manifest: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Print the registered program names, one per line.
    List,
    /// Load one program and print its bytes as a hex dump.
    Load {
        /// The program name, as registered.
        name: String,
    },
    /// Bridge an interpreter speaking JSON lines over stdin/stdout.
    Serve {
        /// Do not open an audio output device.
        #[arg(long)]
        mute: bool,
    },
}
