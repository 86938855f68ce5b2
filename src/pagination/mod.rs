//! Token-based pagination support.
//!
//! Collection endpoints return one page at a time together with a
//! `nextPageToken`. [`fetch_all_pages`] drives a page-fetching closure until
//! the token runs out and merges everything into a single response.

use std::future::Future;

use serde_json::{json, Value};
use tracing::debug;

use crate::errors::KineticResult;
use crate::http::KineticResponse;

/// Replaces any existing `pageToken` parameter with the given token.
pub(crate) fn set_page_token(params: &mut Vec<(String, String)>, token: String) {
    params.retain(|(key, _)| key != "pageToken");
    params.push(("pageToken".to_string(), token));
}

/// Fetches every page of a collection-bearing endpoint and merges the pages
/// into one response.
///
/// `fetch` is called once with the initial parameters, then repeatedly with
/// the `pageToken` parameter replaced by each page's `nextPageToken` until a
/// page carries none. Elements of the named collection and of the optional
/// `messages` collection are concatenated in arrival order.
///
/// The merged response keeps the final page's status line; its content holds
/// the combined collections plus a null `nextPageToken`, and its raw body is
/// re-serialized from that same content. A page with a non-success status
/// stops the aggregation and is returned as-is.
pub async fn fetch_all_pages<F, Fut>(
    collection: &str,
    mut params: Vec<(String, String)>,
    mut fetch: F,
) -> KineticResult<KineticResponse>
where
    F: FnMut(Vec<(String, String)>) -> Fut,
    Fut: Future<Output = KineticResult<KineticResponse>>,
{
    let mut response = fetch(params.clone()).await?;
    if response.status() != 200 {
        return Ok(response);
    }

    let mut items = collection_items(response.content(), collection);
    let mut messages = collection_items(response.content(), "messages");

    loop {
        let token = match response.content()["nextPageToken"].as_str() {
            Some(token) => token.to_string(),
            None => break,
        };
        debug!(token = %token, "following continuation token");
        set_page_token(&mut params, token);

        response = fetch(params.clone()).await?;
        if response.status() != 200 {
            return Ok(response);
        }
        items.extend(collection_items(response.content(), collection));
        messages.extend(collection_items(response.content(), "messages"));
    }

    response.with_content(json!({
        "messages": messages,
        collection: items,
        "nextPageToken": null,
    }))
}

fn collection_items(content: &Value, key: &str) -> Vec<Value> {
    content[key].as_array().cloned().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::VecDeque;

    use bytes::Bytes;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::http::RawResponse;

    fn page(status: u16, body: Value) -> KineticResponse {
        KineticResponse::from_raw(RawResponse {
            status,
            message: String::new(),
            body: Bytes::from(body.to_string()),
        })
    }

    #[test]
    fn set_page_token_replaces_rather_than_accumulates() {
        let mut params = vec![
            ("limit".to_string(), "2".to_string()),
            ("pageToken".to_string(), "old".to_string()),
        ];

        set_page_token(&mut params, "new".to_string());

        assert_eq!(
            params,
            vec![
                ("limit".to_string(), "2".to_string()),
                ("pageToken".to_string(), "new".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn pages_are_concatenated_in_arrival_order() {
        let pages = RefCell::new(VecDeque::from([
            page(
                200,
                json!({ "messages": ["m1"], "submissions": [1, 2], "nextPageToken": "abc" }),
            ),
            page(
                200,
                json!({ "messages": [], "submissions": [3], "nextPageToken": "def" }),
            ),
            page(
                200,
                json!({ "messages": ["m2"], "submissions": [4, 5], "nextPageToken": null }),
            ),
        ]));
        let calls = RefCell::new(Vec::new());

        let merged = fetch_all_pages(
            "submissions",
            vec![("limit".to_string(), "2".to_string())],
            |params| {
                calls.borrow_mut().push(params);
                let next = pages.borrow_mut().pop_front().unwrap();
                async move { Ok(next) }
            },
        )
        .await
        .unwrap();

        assert_eq!(
            merged.content(),
            &json!({
                "messages": ["m1", "m2"],
                "submissions": [1, 2, 3, 4, 5],
                "nextPageToken": null
            })
        );
        // The raw body is rebuilt from the merged content.
        assert_eq!(
            serde_json::from_str::<Value>(merged.content_string()).unwrap(),
            *merged.content()
        );

        let calls = calls.borrow();
        assert_eq!(calls.len(), 3);
        assert!(!calls[0].iter().any(|(k, _)| k == "pageToken"));
        assert_eq!(
            calls[1].iter().filter(|(k, _)| k == "pageToken").count(),
            1
        );
        assert!(calls[1].contains(&("pageToken".to_string(), "abc".to_string())));
        assert!(calls[2].contains(&("pageToken".to_string(), "def".to_string())));
    }

    #[tokio::test]
    async fn a_single_page_is_still_normalized() {
        let pages = RefCell::new(VecDeque::from([page(
            200,
            json!({ "messages": [], "submissions": [1], "nextPageToken": null }),
        )]));

        let merged = fetch_all_pages("submissions", Vec::new(), |_| {
            let next = pages.borrow_mut().pop_front().unwrap();
            async move { Ok(next) }
        })
        .await
        .unwrap();

        assert_eq!(
            merged.content(),
            &json!({ "messages": [], "submissions": [1], "nextPageToken": null })
        );
    }

    #[tokio::test]
    async fn a_failing_first_page_is_returned_untouched() {
        let pages = RefCell::new(VecDeque::from([page(403, json!({ "error": "Forbidden" }))]));

        let response = fetch_all_pages("submissions", Vec::new(), |_| {
            let next = pages.borrow_mut().pop_front().unwrap();
            async move { Ok(next) }
        })
        .await
        .unwrap();

        assert_eq!(response.status(), 403);
        assert_eq!(response.content(), &json!({ "error": "Forbidden" }));
    }

    #[tokio::test]
    async fn a_failing_later_page_stops_the_aggregation() {
        let pages = RefCell::new(VecDeque::from([
            page(200, json!({ "submissions": [1], "nextPageToken": "abc" })),
            page(500, json!({ "error": "boom" })),
        ]));

        let response = fetch_all_pages("submissions", Vec::new(), |_| {
            let next = pages.borrow_mut().pop_front().unwrap();
            async move { Ok(next) }
        })
        .await
        .unwrap();

        assert_eq!(response.status(), 500);
        assert_eq!(response.content(), &json!({ "error": "boom" }));
    }
}
