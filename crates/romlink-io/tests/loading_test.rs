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

use romlink_core::{AssetRegistry, LoadOutcome, Locator, ProgramName, RetrievalError};
use romlink_io::{AssetLoader, FileFetcher, HttpFetcher, LoadStats, SchemeFetcher};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

// --- Test Setup: a loopback HTTP server serving fixed routes ---

struct Route {
    status: &'static str,
    body: Vec<u8>,
}

async fn serve(routes: HashMap<&'static str, Route>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let routes = Arc::new(routes);

    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                return;
            };
            let routes = routes.clone();
            tokio::spawn(async move {
                let mut request = Vec::new();
                let mut chunk = [0u8; 1024];
                while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                    match socket.read(&mut chunk).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => request.extend_from_slice(&chunk[..n]),
                    }
                }
                let head = String::from_utf8_lossy(&request);
                let path = head.split_whitespace().nth(1).unwrap_or("/").to_string();

                let (status, body) = match routes.get(path.as_str()) {
                    Some(route) => (route.status, route.body.clone()),
                    None => ("404 Not Found", Vec::new()),
                };
                let header = format!(
                    "HTTP/1.1 {status}\r\nContent-Type: application/octet-stream\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                    body.len()
                );
                let _ = socket.write_all(header.as_bytes()).await;
                let _ = socket.write_all(&body).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    format!("http://{addr}")
}

async fn unreachable_base() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

fn loader() -> AssetLoader {
    let http = HttpFetcher::new(Duration::from_secs(5)).expect("client builds");
    AssetLoader::new(SchemeFetcher::new(http, FileFetcher::new()))
}

fn missile() -> Vec<u8> {
    (0x00..=0x0B).collect()
}

// ---

#[tokio::test]
async fn registered_program_loads_over_http() {
    let base = serve(HashMap::from([(
        "/MISSILE",
        Route {
            status: "200 OK",
            body: missile(),
        },
    )]))
    .await;
    let registry = AssetRegistry::from_entries([("Missile", format!("{base}/MISSILE").as_str())])
        .unwrap();
    let loader = loader();

    let bytes = loader.load_program(&registry, &"Missile".into()).await;

    assert_eq!(bytes.into_vec(), vec![0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11]);
}

#[tokio::test]
async fn non_success_status_resolves_to_empty() {
    let base = serve(HashMap::new()).await;
    let loader = loader();
    let locator = Locator::new(format!("{base}/PONG"));

    match loader.try_load(&locator).await {
        LoadOutcome::Failed(RetrievalError::Status { status, .. }) => assert_eq!(status, 404),
        other => panic!("expected a status failure, got {other:?}"),
    }
    assert!(loader.load(&locator).await.is_empty());
}

#[tokio::test]
async fn unreachable_locator_resolves_to_empty_and_is_counted() {
    let base = unreachable_base().await;
    let registry =
        AssetRegistry::from_entries([("Missile", format!("{base}/MISSILE").as_str())]).unwrap();
    let loader = loader();

    let bytes = loader.load_program(&registry, &"Missile".into()).await;

    assert!(bytes.is_empty());
    assert_eq!(
        loader.stats(),
        LoadStats {
            failed: 1,
            ..Default::default()
        }
    );
}

#[tokio::test]
async fn concurrent_loads_do_not_mix_content() {
    let base = serve(HashMap::from([
        (
            "/MISSILE",
            Route {
                status: "200 OK",
                body: missile(),
            },
        ),
        (
            "/PUZZLE",
            Route {
                status: "200 OK",
                body: vec![0x6A, 0x12, 0x6B, 0x01],
            },
        ),
    ]))
    .await;
    let registry = AssetRegistry::from_entries([
        ("Missile", format!("{base}/MISSILE")),
        ("Puzzle", format!("{base}/PUZZLE")),
    ])
    .unwrap();
    let loader = loader();
    let missile_name = ProgramName::from("Missile");
    let puzzle_name = ProgramName::from("Puzzle");

    let (missile_bytes, puzzle_bytes) = tokio::join!(
        loader.load_program(&registry, &missile_name),
        loader.load_program(&registry, &puzzle_name),
    );

    assert_eq!(missile_bytes.into_vec(), missile());
    assert_eq!(puzzle_bytes.into_vec(), vec![0x6A, 0x12, 0x6B, 0x01]);
    assert_eq!(loader.stats().loaded, 2);
}

#[tokio::test]
async fn files_and_http_share_one_loader() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("PUZZLE");
    std::fs::write(&path, [0xF0, 0x0D]).unwrap();
    let base = unreachable_base().await;

    let registry = AssetRegistry::from_entries([
        ("Puzzle", path.to_string_lossy().into_owned()),
        ("Missile", format!("{base}/MISSILE")),
    ])
    .unwrap();
    let loader = loader();

    assert_eq!(
        loader
            .load_program(&registry, &"Puzzle".into())
            .await
            .as_slice(),
        &[0xF0, 0x0D]
    );
    assert!(loader
        .load_program(&registry, &"Missile".into())
        .await
        .is_empty());
    assert!(loader
        .load_program(&registry, &"Unknown".into())
        .await
        .is_empty());
    assert_eq!(
        loader.stats(),
        LoadStats {
            loaded: 1,
            not_found: 1,
            failed: 1,
        }
    );
}
