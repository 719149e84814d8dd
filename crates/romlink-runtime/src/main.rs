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

//! The `romlink` host binary.

mod cli;
mod host;
mod stdio;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use host::Host;
use romlink_core::ProgramName;
use std::fmt::Write as _;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match cli.command {
        Command::List => {
            let host = Host::from_manifest(&cli.manifest, false).await?;
            for name in host.registry.names() {
                println!("{name}");
            }
        }
        Command::Load { name } => {
            let host = Host::from_manifest(&cli.manifest, false).await?;
            let name = ProgramName::from(name);
            if !host.registry.contains(&name) {
                log::warn!("'{name}' is not registered.");
            }
            let bytes = host.loader.load_program(&host.registry, &name).await;
            log::info!("'{name}': {} byte(s).", bytes.len());
            print!("{}", hex_dump(bytes.as_slice()));
        }
        Command::Serve { mute } => {
            let host = Host::from_manifest(&cli.manifest, !mute).await?;
            let input = tokio::io::BufReader::new(tokio::io::stdin());
            let (summary, _) = stdio::serve(&host, input, tokio::io::stdout()).await?;
            let stats = host.loader.stats();
            log::info!(
                "Served {} fetch(es), {} sound request(s); {} loaded, {} unknown, {} failed.",
                summary.fetches,
                summary.sounds,
                stats.loaded,
                stats.not_found,
                stats.failed
            );
        }
    }
    Ok(())
}

/// Formats bytes as offset-prefixed rows of sixteen.
fn hex_dump(bytes: &[u8]) -> String {
    let mut out = String::new();
    for (row, chunk) in bytes.chunks(16).enumerate() {
        let _ = write!(out, "{:04x}:", row * 16);
        for byte in chunk {
            let _ = write!(out, " {byte:02x}");
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_dump_rows() {
        let bytes: Vec<u8> = (0..18).collect();
        assert_eq!(
            hex_dump(&bytes),
            "0000: 00 01 02 03 04 05 06 07 08 09 0a 0b 0c 0d 0e 0f\n0010: 10 11\n"
        );
        assert_eq!(hex_dump(&[]), "");
    }
}
