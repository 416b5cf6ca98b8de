/*
 * Copyright (c) 2025 the bloomz-rs Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::client::{Client, CollectionItem};
use crate::errors::BloomzError;
use futures::Stream;
use serde::Deserialize;

/// Holds information returned from the albums collection endpoint.
#[derive(Deserialize, Debug)]
pub struct Album {
    pub id: String,

    pub title: String,

    #[serde(rename = "albumGroupCategory")]
    pub group_category: String,

    // Not every album reports a picture count
    #[serde(default, rename = "numPictures")]
    pub num_pictures: Option<u64>,
}

impl Album {
    /// Returns the first page of albums for the given user.
    ///
    /// One page is all the listing shows; use [`Album::all_for_user`] to page
    /// through the full collection.
    pub async fn for_user(client: &Client, user_id: &str) -> Result<Vec<Album>, BloomzError> {
        client
            .collection_page(&format!("api/{user_id}/albums"), None)
            .await
    }

    /// Retrieves every album for the given user as a paginated stream
    pub fn all_for_user<'a>(
        client: &'a Client,
        user_id: &str,
    ) -> impl Stream<Item = Result<Album, BloomzError>> + 'a {
        client.collection(format!("api/{user_id}/albums"))
    }

    /// Formats albums as the fixed-width listing table.
    ///
    /// Header row, a dashed separator, then one row per album: id (36 cols),
    /// group category (15 cols), title with an optional picture-count suffix.
    pub fn listing(albums: &[Album]) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "{:<36} {:<15} {}\n",
            "Album ID", "Group", "Description"
        ));
        out.push_str(&format!(
            "{:<36} {:<15} {}\n",
            "-".repeat(36),
            "-".repeat(15),
            "-".repeat(15)
        ));

        for album in albums {
            let extra = album
                .num_pictures
                .map(|n| format!(" ({n} pictures)"))
                .unwrap_or_default();
            out.push_str(&format!(
                "{:<36} {:<15} {}{}\n",
                album.id, album.group_category, album.title, extra
            ));
        }
        out
    }
}

impl CollectionItem for Album {
    fn id(&self) -> &str {
        &self.id
    }
}

impl std::fmt::Display for Album {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "title: {}, id: {}", self.title, self.id)
    }
}
