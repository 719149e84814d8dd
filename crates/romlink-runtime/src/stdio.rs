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

//! JSON-lines adapter between an external interpreter process and the bridge.
//!
//! Input (one event per line):
//! `{"topic":"fetch","name":"Missile"}` or `{"topic":"playSound"}`.
//!
//! Output: one `{"topic":"init","programs":[...]}` line at startup, then one
//! `{"topic":"deliver","bytes":[...]}` line per fetch.

use crate::host::Host;
use anyhow::{Context, Result};
use romlink_agents::{BridgeSummary, MessageBridge};
use romlink_core::channel::{message_channel, EventEmitter, OutboundEvent, ReplyReceiver};
use romlink_core::{ProgramName, StartupConfig};
use serde::Serialize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

#[derive(Serialize)]
#[serde(tag = "topic", rename = "init")]
struct InitLine<'a> {
    programs: &'a [ProgramName],
}

/// Runs the bridge until `input` reaches end of file and every answer is written.
///
/// Returns the output sink so callers can inspect what was written.
pub async fn serve<R, W>(host: &Host, input: R, mut output: W) -> Result<(BridgeSummary, W)>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let (endpoint, interpreter) = message_channel();
    let bridge = MessageBridge::new(
        host.registry.clone(),
        host.loader.clone(),
        host.audio.clone(),
        endpoint,
    );

    let StartupConfig { programs } = bridge.startup_config();
    write_line(&mut output, &InitLine { programs: &programs }).await?;

    let (emitter, replies) = interpreter.split();
    let (read, summary, written) = tokio::join!(
        read_events(input, emitter),
        bridge.run(),
        write_replies(replies, output),
    );
    read?;
    Ok((summary, written?))
}

async fn read_events<R>(mut input: R, emitter: EventEmitter) -> Result<()>
where
    R: AsyncBufRead + Unpin,
{
    // Raw bytes: a line that is not UTF-8 is skipped like any malformed line.
    let mut buf = Vec::new();
    loop {
        buf.clear();
        let read = input
            .read_until(b'\n', &mut buf)
            .await
            .context("Failed to read interpreter input")?;
        if read == 0 {
            break;
        }
        let line = buf.trim_ascii();
        if line.is_empty() {
            continue;
        }
        match serde_json::from_slice::<OutboundEvent>(line) {
            Ok(event) => {
                if emitter.emit(event).is_err() {
                    log::warn!("Bridge is gone; ignoring further input.");
                    break;
                }
            }
            Err(err) => log::warn!("Skipping malformed event line: {err}"),
        }
    }
    log::debug!("Interpreter input closed.");
    Ok(())
}

async fn write_replies<W>(replies: ReplyReceiver, mut output: W) -> Result<W>
where
    W: AsyncWrite + Unpin,
{
    while let Some(message) = replies.next_message().await {
        write_line(&mut output, &message).await?;
    }
    Ok(output)
}

async fn write_line<W, T>(output: &mut W, value: &T) -> Result<()>
where
    W: AsyncWrite + Unpin,
    T: Serialize,
{
    let mut line = serde_json::to_vec(value).context("Failed to encode message")?;
    line.push(b'\n');
    output
        .write_all(&line)
        .await
        .context("Failed to write to interpreter")?;
    output.flush().await.context("Failed to flush interpreter output")?;
    Ok(())
}
