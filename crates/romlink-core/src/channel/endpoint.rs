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

use super::{InboundMessage, OutboundEvent};
use crate::error::ChannelClosed;
use crate::program::{ProgramBytes, ProgramName};

/// Creates a connected pair of endpoints.
///
/// Both directions are unbounded: neither side can block the other.
pub fn message_channel() -> (HostEndpoint, InterpreterEndpoint) {
    let (event_tx, event_rx) = flume::unbounded();
    let (reply_tx, reply_rx) = flume::unbounded();
    log::debug!("Message channel initialized.");
    (
        HostEndpoint {
            events: event_rx,
            replies: reply_tx,
        },
        InterpreterEndpoint {
            emitter: EventEmitter { events: event_tx },
            replies: ReplyReceiver { replies: reply_rx },
        },
    )
}

/// The host's end: receives interpreter events, sends deliveries.
#[derive(Debug)]
pub struct HostEndpoint {
    events: flume::Receiver<OutboundEvent>,
    replies: flume::Sender<InboundMessage>,
}

impl HostEndpoint {
    /// Waits for the next interpreter event.
    ///
    /// Returns `None` once every interpreter-side sender is gone and the
    /// queue is drained.
    pub async fn next_event(&self) -> Option<OutboundEvent> {
        self.events.recv_async().await.ok()
    }

    /// Returns a cloneable handle for answering fetches from other tasks.
    pub fn deliver_handle(&self) -> DeliverHandle {
        DeliverHandle {
            replies: self.replies.clone(),
        }
    }
}

/// A cloneable sender for `deliver` messages.
#[derive(Debug, Clone)]
pub struct DeliverHandle {
    replies: flume::Sender<InboundMessage>,
}

impl DeliverHandle {
    /// Sends a `deliver` to the interpreter.
    ///
    /// A torn-down interpreter is not an error: the message is dropped and
    /// `false` is returned.
    pub fn deliver(&self, bytes: ProgramBytes) -> bool {
        log::trace!("Delivering {} bytes.", bytes.len());
        match self.replies.send(InboundMessage::Deliver { bytes }) {
            Ok(()) => true,
            Err(_) => {
                log::debug!("Interpreter is no longer listening; delivery dropped.");
                false
            }
        }
    }
}

/// The interpreter's end: emits events, receives deliveries.
#[derive(Debug, Clone)]
pub struct InterpreterEndpoint {
    emitter: EventEmitter,
    replies: ReplyReceiver,
}

impl InterpreterEndpoint {
    /// Emits a raw event.
    pub fn emit(&self, event: OutboundEvent) -> Result<(), ChannelClosed> {
        self.emitter.emit(event)
    }

    /// Emits a `fetch` for `name`.
    pub fn fetch(&self, name: impl Into<ProgramName>) -> Result<(), ChannelClosed> {
        self.emitter.fetch(name)
    }

    /// Emits a `playSound`.
    pub fn play_sound(&self) -> Result<(), ChannelClosed> {
        self.emitter.play_sound()
    }

    /// Waits for the next message from the host.
    pub async fn next_message(&self) -> Option<InboundMessage> {
        self.replies.next_message().await
    }

    /// Returns a pending message without waiting, if there is one.
    pub fn try_next_message(&self) -> Option<InboundMessage> {
        self.replies.try_next_message()
    }

    /// Separates the sending and receiving halves.
    ///
    /// Dropping every [`EventEmitter`] tells the host the interpreter is done,
    /// while the [`ReplyReceiver`] keeps collecting the answers still in flight.
    pub fn split(self) -> (EventEmitter, ReplyReceiver) {
        (self.emitter, self.replies)
    }
}

/// The sending half of an interpreter endpoint.
#[derive(Debug, Clone)]
pub struct EventEmitter {
    events: flume::Sender<OutboundEvent>,
}

impl EventEmitter {
    /// Emits a raw event.
    pub fn emit(&self, event: OutboundEvent) -> Result<(), ChannelClosed> {
        log::trace!("Emitting {event:?}.");
        self.events.send(event).map_err(|_| ChannelClosed)
    }

    /// Emits a `fetch` for `name`.
    pub fn fetch(&self, name: impl Into<ProgramName>) -> Result<(), ChannelClosed> {
        self.emit(OutboundEvent::Fetch { name: name.into() })
    }

    /// Emits a `playSound`.
    pub fn play_sound(&self) -> Result<(), ChannelClosed> {
        self.emit(OutboundEvent::PlaySound)
    }
}

/// The receiving half of an interpreter endpoint.
#[derive(Debug, Clone)]
pub struct ReplyReceiver {
    replies: flume::Receiver<InboundMessage>,
}

impl ReplyReceiver {
    /// Waits for the next message from the host.
    ///
    /// Returns `None` once the host and all of its delivery handles are gone.
    pub async fn next_message(&self) -> Option<InboundMessage> {
        self.replies.recv_async().await.ok()
    }

    /// Returns a pending message without waiting, if there is one.
    pub fn try_next_message(&self) -> Option<InboundMessage> {
        self.replies.try_recv().ok()
    }
}
