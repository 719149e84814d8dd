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

//! The typed, bidirectional message channel between host and interpreter.
//!
//! The channel carries two directions with fixed topics:
//!
//! | Direction | Topic | Payload |
//! |---|---|---|
//! | interpreter → host | `fetch` | [`ProgramName`] |
//! | interpreter → host | `playSound` | none |
//! | host → interpreter | `deliver` | [`ProgramBytes`] |
//!
//! Every `fetch` is answered by exactly one `deliver`. Messages carry no
//! correlation identifier, so an interpreter should keep at most one `fetch`
//! outstanding: concurrent answers arrive in completion order.
//!
//! [`message_channel`] creates a connected pair of endpoints backed by
//! unbounded `flume` channels.

mod endpoint;

use crate::program::{ProgramBytes, ProgramName};
use serde::{Deserialize, Serialize};

pub use self::endpoint::{
    message_channel, DeliverHandle, EventEmitter, HostEndpoint, InterpreterEndpoint, ReplyReceiver,
};

/// An event emitted by the interpreter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "topic", rename_all = "camelCase")]
pub enum OutboundEvent {
    /// The interpreter wants the bytes of a program.
    Fetch {
        /// The requested program.
        name: ProgramName,
    },
    /// The interpreter wants the sound clip played.
    PlaySound,
}

/// A message sent by the host to the interpreter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "topic", rename_all = "camelCase")]
pub enum InboundMessage {
    /// The answer to a `fetch`. Empty bytes mean "nothing to run".
    Deliver {
        /// The program content.
        bytes: ProgramBytes,
    },
}
