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

//! Retrieval back-ends implementing [`AssetFetcher`].

mod file;
mod http;

pub use self::file::FileFetcher;
pub use self::http::HttpFetcher;

use async_trait::async_trait;
use romlink_core::{AssetFetcher, Locator, RetrievalError};

/// Routes each locator to the back-end matching its scheme.
///
/// `http`/`https` go over the network, `file` and bare paths are read from
/// disk. Any other scheme is a retrieval failure.
#[derive(Debug, Clone)]
pub struct SchemeFetcher {
    http: HttpFetcher,
    file: FileFetcher,
}

impl SchemeFetcher {
    /// Combines the two back-ends.
    pub fn new(http: HttpFetcher, file: FileFetcher) -> Self {
        Self { http, file }
    }
}

#[async_trait]
impl AssetFetcher for SchemeFetcher {
    async fn fetch(&self, locator: &Locator) -> Result<Vec<u8>, RetrievalError> {
        match locator.scheme().as_deref() {
            Some("http") | Some("https") => self.http.fetch(locator).await,
            Some("file") | None => self.file.fetch(locator).await,
            Some(other) => Err(RetrievalError::UnsupportedScheme {
                locator: locator.to_string(),
                scheme: other.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn fetcher() -> SchemeFetcher {
        let http = HttpFetcher::new(Duration::from_secs(1)).expect("client builds");
        SchemeFetcher::new(http, FileFetcher::new())
    }

    #[tokio::test]
    async fn unknown_scheme_is_a_retrieval_failure() {
        let err = fetcher()
            .fetch(&Locator::from("gopher://example.org/PONG"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            RetrievalError::UnsupportedScheme { ref scheme, .. } if scheme == "gopher"
        ));
    }

    #[tokio::test]
    async fn bare_paths_are_read_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("PUZZLE");
        std::fs::write(&path, [0x6A, 0x12]).unwrap();

        let bytes = fetcher()
            .fetch(&Locator::new(path.to_string_lossy()))
            .await
            .unwrap();
        assert_eq!(bytes, vec![0x6A, 0x12]);
    }
}
