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

//! Defines the abstract `AssetFetcher` trait.

use crate::error::RetrievalError;
use crate::program::Locator;
use async_trait::async_trait;

/// The contract for a retrieval back-end.
///
/// A fetcher turns a [`Locator`] into the complete raw payload behind it.
/// Implementations report every failure through [`RetrievalError`]; deciding
/// what the interpreter sees on failure is the loader's job, not theirs.
#[async_trait]
pub trait AssetFetcher: Send + Sync {
    /// Retrieves the full content addressed by `locator`.
    ///
    /// This is the only suspension point of a program load.
    async fn fetch(&self, locator: &Locator) -> Result<Vec<u8>, RetrievalError>;
}
