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

//! The error taxonomy of the host.
//!
//! None of these errors ever crosses the message channel: the loader and the
//! bridge convert them to an empty [`ProgramBytes`](crate::ProgramBytes) or a
//! no-op before anything is sent to the interpreter.

use thiserror::Error;

/// A failure while retrieving the raw bytes behind a locator.
#[derive(Debug, Error)]
pub enum RetrievalError {
    /// The server answered, but not with a success status.
    #[error("'{locator}' answered with status {status}")]
    Status {
        /// The locator that was requested.
        locator: String,
        /// The HTTP status code received.
        status: u16,
    },
    /// The request never completed (unreachable host, reset, timeout...).
    #[error("transport error while fetching '{locator}': {message}")]
    Transport {
        /// The locator that was requested.
        locator: String,
        /// Human-readable cause reported by the transport.
        message: String,
    },
    /// A local file could not be read.
    #[error("failed to read '{locator}'")]
    Io {
        /// The locator that was requested.
        locator: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// No fetcher knows how to handle this locator's scheme.
    #[error("unsupported locator scheme '{scheme}' in '{locator}'")]
    UnsupportedScheme {
        /// The locator that was requested.
        locator: String,
        /// The scheme that was not recognized.
        scheme: String,
    },
}

/// Why a playback attempt could not start.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlaybackError {
    /// No sound clip was configured for this host.
    #[error("no sound clip is configured")]
    NoClip,
    /// The output device has not been started or the clip holds no samples.
    #[error("audio output is not ready")]
    NotReady,
    /// The playback state was poisoned by a panicking audio callback.
    #[error("playback state is unavailable")]
    StateUnavailable,
}

/// An invalid entry offered to the registry at construction time.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The same program name was registered twice.
    #[error("program '{0}' is registered more than once")]
    DuplicateName(String),
    /// A program was registered with an empty name.
    #[error("program names must not be empty")]
    EmptyName,
    /// A program was registered without a locator.
    #[error("program '{0}' has an empty locator")]
    EmptyLocator(String),
}

/// The other side of the message channel is gone.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("the other end of the message channel is closed")]
pub struct ChannelClosed;
