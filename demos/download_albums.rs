/*
 * Copyright (c) 2025 the bloomz-rs Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

extern crate bloomz;

use anyhow::Result;
use bloomz::{Album, Client, DuplicatePolicy, Photo};
use clap::Parser;
use futures::{StreamExt, pin_mut};
use std::path::PathBuf;

/// Download tool for photo albums on Bloomz
#[derive(Parser, Debug)]
struct Args {
    /// Username
    #[arg(short, long, value_name = "USER")]
    username: String,

    /// Password (default: prompt)
    #[arg(short, long, value_name = "PASS")]
    password: Option<String>,

    /// Directory to write images (default: CWD)
    #[arg(short, long, value_name = "DIR")]
    outdir: Option<PathBuf>,

    /// What to do with duplicate filenames
    #[arg(long, default_value = "rename")]
    dups: DuplicatePolicy,

    /// Album(s) to download; if none, a listing is printed
    #[arg(value_name = "ID")]
    album_ids: Vec<String>,
}

// main
#[tokio::main]
async fn main() -> Result<()> {
    // Show the library's save/skip log lines by default
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let password = match args.password {
        Some(password) => password,
        None => rpassword::prompt_password("Password: ")?,
    };

    let mut client = Client::new()?;
    let login = client.login(&args.username, &password).await?;

    // With no album ids, print the listing for the authenticated user
    if args.album_ids.is_empty() {
        let albums = Album::for_user(&client, &login.profile.id).await?;
        print!("{}", Album::listing(&albums));
        return Ok(());
    }

    // Albums in argument order, photos in server order, one at a time
    for album_id in &args.album_ids {
        let photos = Photo::in_album(&client, album_id);
        pin_mut!(photos);
        while let Some(photo) = photos.next().await {
            photo?
                .download(&client, args.outdir.as_deref(), args.dups)
                .await?;
        }
    }
    Ok(())
}
