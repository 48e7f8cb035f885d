//! Endpoint wrappers, one method per backend operation.
//!
//! Each wrapper fixes a URL template and method, interpolates its arguments
//! and serializes a JSON body where one is needed. Nothing here inspects
//! status codes or bodies; that is `ApiClient::request`'s job.

mod auth;
mod books;
mod embed;
mod feed;
mod lists;
mod ratings;
mod users;

pub use embed::DEFAULT_EMBED_COUNT;
pub use feed::DEFAULT_FEED_LIMIT;
pub use lists::positions_in_order;

use url::form_urlencoded;

/// Append `pairs` to `path` as a query string. Empty `pairs` leave the path as is.
pub(crate) fn with_query<'a, I>(path: &str, pairs: I) -> String
where
    I: IntoIterator<Item = (&'a str, String)>,
{
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    let mut any = false;
    for (key, value) in pairs {
        serializer.append_pair(key, &value);
        any = true;
    }
    if any {
        format!("{path}?{}", serializer.finish())
    } else {
        path.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_query_leaves_path() {
        assert_eq!(with_query("/books", Vec::new()), "/books");
    }

    #[test]
    fn query_values_are_encoded() {
        let path = with_query("/books", vec![("search", "war & peace".to_string()), ("limit", "5".to_string())]);
        assert_eq!(path, "/books?search=war+%26+peace&limit=5");
    }
}
