//! Verify endpoint templates and response normalization against the JSON
//! vectors stored in `test-vectors/`.
//!
//! Each endpoint case names a wrapper, its arguments and the request it must
//! produce; each response case gives a raw response and the payload or error
//! it must normalize to. Bodies are compared as parsed JSON so field order
//! does not matter.

use std::sync::{Arc, Mutex};

use bookmarkd_core::{
    positions_in_order, ApiClient, ApiError, BookQuery, FeedType, HttpMethod, HttpRequest, HttpResponse, NewRating,
    Payload, RatingSort, ReadingStatus, Result, Session, Transport,
};
use serde_json::Value;

/// Records every request and answers each with `204 No Content`.
#[derive(Default)]
struct Recorder {
    sent: Mutex<Vec<HttpRequest>>,
}

impl Recorder {
    fn last(&self) -> HttpRequest {
        self.sent.lock().unwrap().last().cloned().expect("no request was sent")
    }
}

impl Transport for Recorder {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse> {
        self.sent.lock().unwrap().push(request.clone());
        Ok(HttpResponse {
            status: 204,
            headers: Vec::new(),
            body: String::new(),
        })
    }
}

fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "PUT" => HttpMethod::Put,
        "PATCH" => HttpMethod::Patch,
        "DELETE" => HttpMethod::Delete,
        other => panic!("unknown method: {other}"),
    }
}

fn int(args: &Value, key: &str) -> i64 {
    args[key].as_i64().unwrap_or_else(|| panic!("missing integer arg {key}"))
}

fn text<'a>(args: &'a Value, key: &str) -> &'a str {
    args[key].as_str().unwrap_or_else(|| panic!("missing string arg {key}"))
}

/// Invoke the wrapper named `call`. Responses are always 204, so typed
/// wrappers fail to decode; only the outgoing request matters here.
fn dispatch(c: &ApiClient, call: &str, args: &Value) {
    let _ = match call {
        "login" => c.login(text(args, "email"), text(args, "password")).map(drop),
        "signup" => c
            .signup(text(args, "username"), text(args, "email"), text(args, "password"))
            .map(drop),
        "get_books" => {
            let query: BookQuery = serde_json::from_value(args.clone()).unwrap();
            c.get_books(&query).map(drop)
        }
        "create_rating" => {
            let rating = NewRating {
                rating: int(args, "rating") as i32,
                review: text(args, "review").to_string(),
                status: text(args, "status").parse().unwrap(),
            };
            c.create_rating(int(args, "book_id"), &rating).map(drop)
        }
        "update_rating" => c
            .update_rating(int(args, "rating_id"), int(args, "rating") as i32, text(args, "review"))
            .map(drop),
        "like_rating" => c.like_rating(int(args, "rating_id")),
        "get_my_ratings" => {
            let status: ReadingStatus = text(args, "status").parse().unwrap();
            c.get_my_ratings(Some(status)).map(drop)
        }
        "get_year_stats" => c.get_year_stats(int(args, "user_id"), int(args, "year") as i32).map(drop),
        "get_feed" => {
            let feed: FeedType = serde_json::from_value(args["type"].clone()).unwrap();
            c.get_feed(feed, int(args, "limit") as u32, int(args, "offset") as u32)
                .map(drop)
        }
        "get_ratings" => {
            let sort: Option<RatingSort> = args.get("sort_by").map(|v| serde_json::from_value(v.clone()).unwrap());
            c.get_ratings(int(args, "book_id"), sort).map(drop)
        }
        "get_embed_user_books" => c
            .get_embed_user_books(int(args, "user_id"), int(args, "count") as u32)
            .map(drop),
        "get_embed_list" => c.get_embed_list(int(args, "list_id"), int(args, "count") as u32).map(drop),
        "get_my_lists" => c.get_my_lists().map(drop),
        "reorder_list_books" => {
            let ids: Vec<i64> = serde_json::from_value(args["book_ids"].clone()).unwrap();
            c.reorder_list_books(int(args, "list_id"), &positions_in_order(&ids))
        }
        "remove_book_from_list" => c.remove_book_from_list(int(args, "list_id"), int(args, "book_id")),
        other => panic!("no dispatcher for {other}"),
    };
}

#[test]
fn endpoint_test_vectors() {
    let raw = include_str!("../../test-vectors/endpoints.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();
    let base_url = vectors["base_url"].as_str().unwrap();
    let token = vectors["token"].as_str().unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let recorder = Arc::new(Recorder::default());
        let c = ApiClient::new(base_url, Session::in_memory(), recorder.clone());
        if case["authenticated"].as_bool().unwrap() {
            c.session().set_token(token).unwrap();
        }

        dispatch(&c, case["call"].as_str().unwrap(), &case["args"]);

        let expected = &case["expected_request"];
        let req = recorder.last();
        assert_eq!(req.method, parse_method(expected["method"].as_str().unwrap()), "{name}: method");
        assert_eq!(
            req.url,
            format!("{base_url}{}", expected["path"].as_str().unwrap()),
            "{name}: url"
        );

        let expected_headers: Vec<(String, String)> = serde_json::from_value(expected["headers"].clone()).unwrap();
        assert_eq!(req.headers, expected_headers, "{name}: headers");

        let body = req
            .body
            .as_deref()
            .map(|b| serde_json::from_str::<Value>(b).unwrap())
            .unwrap_or(Value::Null);
        assert_eq!(body, expected["body"], "{name}: body");
    }
}

#[test]
fn response_test_vectors() {
    let raw = include_str!("../../test-vectors/responses.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();
    let c = ApiClient::new(
        "http://localhost:8080/api",
        Session::in_memory(),
        Arc::new(Recorder::default()),
    );

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let raw_response = &case["response"];
        let headers = match raw_response["content_type"].as_str() {
            Some(ct) => vec![("content-type".to_string(), ct.to_string())],
            None => Vec::new(),
        };
        let response = HttpResponse {
            status: raw_response["status"].as_u64().unwrap() as u16,
            headers,
            body: raw_response["body"].as_str().unwrap().to_string(),
        };

        let expected = &case["expected"];
        let result = c.parse_response(response);

        if let Some(kind) = expected["payload"].as_str() {
            let payload = result.unwrap_or_else(|e| panic!("{name}: unexpected error {e:?}"));
            match (kind, payload) {
                ("empty", Payload::Empty) => {}
                ("json", Payload::Json(value)) => assert_eq!(value, expected["value"], "{name}: json"),
                ("text", Payload::Text(body)) => assert_eq!(body, expected["value"], "{name}: text"),
                (kind, other) => panic!("{name}: expected {kind}, got {other:?}"),
            }
        } else if let Some(error) = expected.get("error") {
            match result {
                Err(ApiError::Server { status, message }) => {
                    assert_eq!(u64::from(status), error["status"].as_u64().unwrap(), "{name}: status");
                    assert_eq!(message, error["message"].as_str().unwrap(), "{name}: message");
                }
                other => panic!("{name}: expected server error, got {other:?}"),
            }
        } else {
            assert!(matches!(result, Err(ApiError::Decode(_))), "{name}: expected decode error");
        }
    }
}
