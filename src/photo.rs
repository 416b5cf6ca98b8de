/*
 * Copyright (c) 2025 the bloomz-rs Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::client::{Client, CollectionItem};
use crate::download::{self, DuplicatePolicy};
use crate::errors::BloomzError;
use futures::Stream;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// A photo record from an album's collection endpoint.
///
/// The collection only carries the id; the filename and bytes come from the
/// download endpoint.
#[derive(Deserialize, Debug)]
pub struct Photo {
    pub id: String,
}

impl Photo {
    /// Retrieves the photos of the given album as a paginated stream
    pub fn in_album<'a>(
        client: &'a Client,
        album_id: &str,
    ) -> impl Stream<Item = Result<Photo, BloomzError>> + 'a {
        client.collection(format!("api/v2/{album_id}/photos"))
    }

    /// Downloads this photo to disk; see [`download::fetch_photo`]
    pub async fn download(
        &self,
        client: &Client,
        out_dir: Option<&Path>,
        policy: DuplicatePolicy,
    ) -> Result<Option<PathBuf>, BloomzError> {
        download::fetch_photo(client, &self.id, out_dir, policy).await
    }

    /// Returns the raw media details for this photo.
    ///
    /// This endpoint does not use the `{status, data}` envelope.
    pub async fn details(&self, client: &Client) -> Result<serde_json::Value, BloomzError> {
        let resp = client
            .get_raw(&format!("api/v3/media/{}/details", self.id))
            .await?;
        Ok(resp.json().await?)
    }
}

impl CollectionItem for Photo {
    fn id(&self) -> &str {
        &self.id
    }
}
