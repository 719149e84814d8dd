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

use async_trait::async_trait;
use romlink_core::{AssetFetcher, Locator, RetrievalError};
use std::path::PathBuf;

/// Reads program images from the local filesystem.
///
/// Accepts `file://` URIs and bare paths.
#[derive(Debug, Clone, Default)]
pub struct FileFetcher;

impl FileFetcher {
    /// Creates a new file fetcher.
    pub fn new() -> Self {
        Self
    }

    fn path_of(locator: &Locator) -> PathBuf {
        let raw = locator.as_str();
        match locator.scheme().as_deref() {
            // "file://" is seven bytes whatever the casing.
            Some("file") => PathBuf::from(&raw["file://".len()..]),
            _ => PathBuf::from(raw),
        }
    }
}

#[async_trait]
impl AssetFetcher for FileFetcher {
    async fn fetch(&self, locator: &Locator) -> Result<Vec<u8>, RetrievalError> {
        let path = Self::path_of(locator);
        tokio::fs::read(&path)
            .await
            .map_err(|source| RetrievalError::Io {
                locator: locator.to_string(),
                source,
            })
    }
}
