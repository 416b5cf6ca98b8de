/*
 * Copyright (c) 2025 the bloomz-rs Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

use std::io;
use thiserror::Error;

/// Error conditions that can be returned
#[derive(Error, Debug)]
pub enum BloomzError {
    #[error("I/O error")]
    Io(#[from] io::Error),

    #[error("Request network error")]
    Request(#[from] reqwest::Error),

    #[error("Deserialization error")]
    Deserialization(#[from] serde_json::Error),

    #[error("URL Parse error")]
    UrlParsing(#[from] url::ParseError),

    #[error("API call failed: {0}")]
    Api(String),

    #[error("Expected response data missing")]
    ResponseMissing(),

    #[error("No _xsrf cookie in login handshake response")]
    XsrfCookieMissing(),

    #[error("No filename in Content-Disposition header for: {0}")]
    ContentDispositionMissing(String),
}
