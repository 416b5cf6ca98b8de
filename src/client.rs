/*
 * Copyright (c) 2025 the bloomz-rs Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::errors::BloomzError;
use async_stream::try_stream;
use futures::Stream;
use reqwest::Method;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;

// Root of the Bloomz web service
pub const API_ORIGIN: &str = "https://app.bloomz.net";

// Session cookie carrying the CSRF token, echoed back as a header
const XSRF_COOKIE: &str = "_xsrf";
const XSRF_HEADER: &str = "X-Xsrftoken";

/// Query parameters the specific API expects
pub type ApiParams<'a> = [(&'a str, &'a str)];

/// Implemented by records that appear in a paginated `collection` array.
///
/// The `id` of the last record on a page is the cursor for the next page.
pub trait CollectionItem {
    fn id(&self) -> &str;
}

/// Directly communicates with the API.
///
/// Holds the session cookie jar and, after [`Client::login`], the CSRF header
/// value. Login is the only mutation of session state; everything afterwards
/// uses the client read-only.
#[derive(Clone)]
pub struct Client {
    origin: String,
    https_client: reqwest::Client,
    xsrf_token: Option<String>,
}

impl Client {
    /// Creates a client instance against the production service
    pub fn new() -> Result<Self, BloomzError> {
        Self::with_origin(API_ORIGIN)
    }

    /// Creates a client instance against the given origin
    pub fn with_origin(origin: &str) -> Result<Self, BloomzError> {
        let https_client = reqwest::Client::builder().cookie_store(true).build()?;
        Ok(Self {
            origin: origin.trim_end_matches('/').to_string(),
            https_client,
            xsrf_token: None,
        })
    }

    /// Performs the two-step login handshake and returns the session identity.
    ///
    /// A GET of the site root seeds the session cookie jar and yields the
    /// `_xsrf` cookie, which is echoed as the `X-Xsrftoken` header on every
    /// subsequent request, the login POST included.
    pub async fn login(
        &mut self,
        username: &str,
        password: &str,
    ) -> Result<LoginResult, BloomzError> {
        let root = reqwest::Url::parse(&self.origin)?;
        let resp = self.https_client.get(root).send().await?.error_for_status()?;
        let token = resp
            .cookies()
            .find(|c| c.name() == XSRF_COOKIE)
            .map(|c| c.value().to_string())
            .ok_or(BloomzError::XsrfCookieMissing())?;
        self.xsrf_token = Some(token);

        let req_url = reqwest::Url::parse(&self.origin)?.join("api/user/login?authType=bloomz")?;
        let body = json!({"username": username, "password": password});
        let resp = self
            .request(Method::POST, req_url)
            .json(&body)
            .send()
            .await?
            .error_for_status()?;
        unwrap_envelope(resp.json::<Envelope<LoginResult>>().await?)
    }

    /// Performs a get request to the API and unwraps the response envelope
    pub async fn get<T: DeserializeOwned>(
        &self,
        url: &str,
        params: Option<&ApiParams<'_>>,
    ) -> Result<T, BloomzError> {
        let req_url = params.map_or(reqwest::Url::parse(url), |v| {
            reqwest::Url::parse_with_params(url, v)
        })?;
        let resp = self
            .request(Method::GET, req_url)
            .send()
            .await?
            .error_for_status()?;
        unwrap_envelope(resp.json::<Envelope<T>>().await?)
    }

    /// Fetches a single page of a paginated collection endpoint.
    ///
    /// `last_id` is the cursor; when absent the server returns the first page.
    pub async fn collection_page<T: DeserializeOwned>(
        &self,
        path: &str,
        last_id: Option<&str>,
    ) -> Result<Vec<T>, BloomzError> {
        let req_url = reqwest::Url::parse(&self.origin)?.join(path)?;
        let params = last_id.map(|id| vec![("id", id)]);
        let resp: CollectionResponse<T> = self.get(req_url.as_str(), params.as_deref()).await?;
        Ok(resp.collection)
    }

    /// Pages through a collection endpoint and returns the records as a stream.
    ///
    /// The cursor starts absent and advances to the `id` of the last record of
    /// each page; an empty page ends the stream. Termination therefore depends
    /// on the server eventually returning an empty page. Any HTTP or envelope
    /// failure ends the stream with that error; records already yielded stand.
    pub fn collection<'a, T>(
        &'a self,
        path: String,
    ) -> impl Stream<Item = Result<T, BloomzError>> + 'a
    where
        T: DeserializeOwned + CollectionItem + 'a,
    {
        try_stream! {
            let mut last_id: Option<String> = None;

            loop {
                let items = self.collection_page::<T>(&path, last_id.as_deref()).await?;
                if items.is_empty() {
                    break;
                }
                last_id = items.last().map(|item| item.id().to_string());
                for item in items {
                    yield item
                }
            }
        }
    }

    /// Performs a get request without envelope handling, for binary endpoints
    pub(crate) async fn get_raw(&self, path: &str) -> Result<reqwest::Response, BloomzError> {
        let req_url = reqwest::Url::parse(&self.origin)?.join(path)?;
        Ok(self
            .request(Method::GET, req_url)
            .send()
            .await?
            .error_for_status()?)
    }

    fn request(&self, method: Method, url: reqwest::Url) -> reqwest::RequestBuilder {
        let req = self.https_client.request(method, url);
        match &self.xsrf_token {
            Some(token) => req.header(XSRF_HEADER, token),
            None => req,
        }
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("origin", &self.origin)
            .field("xsrf_token", &"xxx")
            .finish()
    }
}

/// Identity returned from a successful login
#[derive(Deserialize, Debug)]
pub struct LoginResult {
    pub profile: Profile,
}

/// The authenticated user's profile
#[derive(Deserialize, Debug)]
pub struct Profile {
    pub id: String,
}

// Base expected response body to be returned from the API
#[derive(Deserialize, Debug)]
struct Envelope<T> {
    status: String,
    data: Option<T>,
}

// Expected envelope payload for paginated collection endpoints
#[derive(Deserialize, Debug)]
struct CollectionResponse<T> {
    collection: Vec<T>,
}

// The envelope status must be the literal "success"; anything else is
// surfaced as an API failure carrying the server-reported status string.
fn unwrap_envelope<T>(body: Envelope<T>) -> Result<T, BloomzError> {
    if body.status != "success" {
        return Err(BloomzError::Api(body.status));
    }
    body.data.ok_or(BloomzError::ResponseMissing())
}
