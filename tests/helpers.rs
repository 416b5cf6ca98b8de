/*
 * Copyright (c) 2025 the bloomz-rs Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use serde_json::{Value, json};

// Wraps a payload in the {status, data} envelope every API response shares
#[allow(dead_code)]
pub(crate) fn envelope(data: Value) -> String {
    json!({"status": "success", "data": data}).to_string()
}

// A successful envelope holding one page of a paginated collection
#[allow(dead_code)]
pub(crate) fn collection_page(items: Value) -> String {
    envelope(json!({"collection": items}))
}

// Mounts the two-step login handshake on the mock server: the site root
// setting the _xsrf cookie, and the login endpoint requiring it echoed back
// as the X-Xsrftoken header. The returned mocks must stay in scope for the
// duration of the test.
#[allow(dead_code)]
pub(crate) async fn mount_login(server: &mut mockito::Server, user_id: &str) -> Vec<mockito::Mock> {
    let root = server
        .mock("GET", "/")
        .with_status(200)
        .with_header("set-cookie", "_xsrf=csrf-token-1; Path=/")
        .create_async()
        .await;
    let login = server
        .mock("POST", "/api/user/login")
        .match_query(mockito::Matcher::UrlEncoded(
            "authType".into(),
            "bloomz".into(),
        ))
        .match_header("x-xsrftoken", "csrf-token-1")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(envelope(json!({"profile": {"id": user_id}})))
        .create_async()
        .await;
    vec![root, login]
}
