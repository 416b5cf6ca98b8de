/*
 * Copyright (c) 2025 the bloomz-rs Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
mod helpers;

use bloomz::{BloomzError, Client, DuplicatePolicy, Photo};
use futures::{StreamExt, pin_mut};
use mockito::Matcher;
use serde_json::json;
use std::fs;
use tempfile::TempDir;

// Mounts album A1 holding photos p1 and p2 in a single page, plus the
// download endpoints serving their bytes with header-derived filenames.
async fn mount_album_a1(server: &mut mockito::Server) -> Vec<mockito::Mock> {
    let page = server
        .mock("GET", "/api/v2/A1/photos")
        .match_query(Matcher::Missing)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(helpers::collection_page(
            json!([{"id": "p1"}, {"id": "p2"}]),
        ))
        .create_async()
        .await;
    let terminal = server
        .mock("GET", "/api/v2/A1/photos")
        .match_query(Matcher::UrlEncoded("id".into(), "p2".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(helpers::collection_page(json!([])))
        .create_async()
        .await;
    let p1 = server
        .mock("GET", "/download/p1")
        .with_status(200)
        .with_header("content-disposition", "attachment; filename=\"photo1.jpg\"")
        .with_body("p1 bytes")
        .create_async()
        .await;
    let p2 = server
        .mock("GET", "/download/p2")
        .with_status(200)
        .with_header("content-disposition", "attachment; filename=photo2.jpg")
        .with_body("p2 bytes")
        .create_async()
        .await;
    vec![page, terminal, p1, p2]
}

#[tokio::test]
async fn downloading_an_album_renames_around_an_existing_file() {
    let mut server = mockito::Server::new_async().await;
    let _handshake = helpers::mount_login(&mut server, "user42").await;
    let _album = mount_album_a1(&mut server).await;

    let out = TempDir::new().unwrap();
    fs::write(out.path().join("photo1.jpg"), "already here").unwrap();

    let mut client = Client::with_origin(&server.url()).unwrap();
    client.login("someone", "hunter2").await.unwrap();

    let mut written = Vec::new();
    let photos = Photo::in_album(&client, "A1");
    pin_mut!(photos);
    while let Some(photo) = photos.next().await {
        let path = photo
            .unwrap()
            .download(&client, Some(out.path()), DuplicatePolicy::Rename)
            .await
            .unwrap();
        written.push(path);
    }

    assert_eq!(
        written,
        [
            Some(out.path().join("photo1_1.jpg")),
            Some(out.path().join("photo2.jpg")),
        ]
    );
    assert_eq!(
        fs::read_to_string(out.path().join("photo1_1.jpg")).unwrap(),
        "p1 bytes"
    );
    assert_eq!(
        fs::read_to_string(out.path().join("photo2.jpg")).unwrap(),
        "p2 bytes"
    );
    // The colliding file is untouched
    assert_eq!(
        fs::read_to_string(out.path().join("photo1.jpg")).unwrap(),
        "already here"
    );
}

#[tokio::test]
async fn skip_policy_writes_nothing_for_an_existing_file() {
    let mut server = mockito::Server::new_async().await;
    let _download = server
        .mock("GET", "/download/p1")
        .with_status(200)
        .with_header("content-disposition", "attachment; filename=\"photo1.jpg\"")
        .with_body("p1 bytes")
        .create_async()
        .await;

    let out = TempDir::new().unwrap();
    fs::write(out.path().join("photo1.jpg"), "already here").unwrap();

    let client = Client::with_origin(&server.url()).unwrap();
    let photo = Photo {
        id: "p1".to_string(),
    };
    let path = photo
        .download(&client, Some(out.path()), DuplicatePolicy::Skip)
        .await
        .unwrap();

    assert_eq!(path, None);
    assert_eq!(
        fs::read_to_string(out.path().join("photo1.jpg")).unwrap(),
        "already here"
    );
    assert_eq!(fs::read_dir(out.path()).unwrap().count(), 1);
}

#[tokio::test]
async fn overwrite_policy_replaces_an_existing_file() {
    let mut server = mockito::Server::new_async().await;
    let _download = server
        .mock("GET", "/download/p1")
        .with_status(200)
        .with_header("content-disposition", "attachment; filename=\"photo1.jpg\"")
        .with_body("p1 bytes")
        .create_async()
        .await;

    let out = TempDir::new().unwrap();
    fs::write(out.path().join("photo1.jpg"), "already here").unwrap();

    let client = Client::with_origin(&server.url()).unwrap();
    let photo = Photo {
        id: "p1".to_string(),
    };
    let path = photo
        .download(&client, Some(out.path()), DuplicatePolicy::Overwrite)
        .await
        .unwrap();

    assert_eq!(path, Some(out.path().join("photo1.jpg")));
    assert_eq!(
        fs::read_to_string(out.path().join("photo1.jpg")).unwrap(),
        "p1 bytes"
    );
}

#[tokio::test]
async fn download_without_content_disposition_fails() {
    let mut server = mockito::Server::new_async().await;
    let _download = server
        .mock("GET", "/download/p9")
        .with_status(200)
        .with_body("mystery bytes")
        .create_async()
        .await;

    let out = TempDir::new().unwrap();
    let client = Client::with_origin(&server.url()).unwrap();
    let photo = Photo {
        id: "p9".to_string(),
    };
    let err = photo
        .download(&client, Some(out.path()), DuplicatePolicy::Rename)
        .await
        .unwrap_err();

    assert!(matches!(err, BloomzError::ContentDispositionMissing(ref id) if id == "p9"));
    assert_eq!(fs::read_dir(out.path()).unwrap().count(), 0);
}
