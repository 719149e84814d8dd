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

//! # Romlink Core
//!
//! Foundational crate containing the program data model, the registry, the
//! message-channel topics, and the interface contracts shared by the host
//! crates. It has no knowledge of how programs are retrieved or how sound
//! reaches the speakers.

#![warn(missing_docs)]

pub mod audio;
pub mod channel;
pub mod error;
pub mod fetch;
pub mod program;
pub mod registry;

pub use error::{ChannelClosed, PlaybackError, RegistryError, RetrievalError};
pub use fetch::AssetFetcher;
pub use program::{LoadOutcome, Locator, ProgramBytes, ProgramName};
pub use registry::{AssetRegistry, StartupConfig};
