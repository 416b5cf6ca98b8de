/*
 * Copyright (c) 2025 the bloomz-rs Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

//! # Bloomz
//!
//! Client library for the Bloomz photo-sharing web service: it logs in,
//! lists a user's albums, and downloads the photos of one or more albums to
//! local disk with collision-safe filenames.
//!
//! ## Features
//!
//! - Session login via the `_xsrf` cookie / `X-Xsrftoken` header handshake
//! - Album listing, with the fixed-width table the CLI prints
//! - Cursor-paginated photo collections exposed as streams
//! - Streamed photo downloads with an overwrite/rename/skip duplicate policy
//!
//! Everything runs sequentially; there is no retry, resume, or caching
//! layer. Errors propagate to the caller, partial progress stays on disk.
//!
//! ## Usage
//!
//! ```no_run
//! use bloomz::{Client, DuplicatePolicy, Photo};
//! use futures::{StreamExt, pin_mut};
//!
//! async fn download_album(album_id: &str) -> Result<(), bloomz::BloomzError> {
//!     let mut client = Client::new()?;
//!     let login = client.login("user@example.com", "hunter2").await?;
//!     println!("logged in as {}", login.profile.id);
//!
//!     let photos = Photo::in_album(&client, album_id);
//!     pin_mut!(photos);
//!     while let Some(photo) = photos.next().await {
//!         photo?.download(&client, None, DuplicatePolicy::Rename).await?;
//!     }
//!     Ok(())
//! }
//! ```

pub mod album;
pub mod client;
pub mod download;
pub mod errors;
pub mod photo;

pub use album::*;
pub use client::*;
pub use download::*;
pub use errors::*;
pub use photo::*;
