use crate::client::{ApiClient, RequestOptions};
use crate::error::Result;
use crate::types::{FeedItem, FeedType};

/// Page size the web front end requests.
pub const DEFAULT_FEED_LIMIT: u32 = 20;

impl ApiClient {
    /// `GET /feed?type=&limit=&offset=`. Works signed out; `following` then
    /// falls back to the global feed server-side.
    pub fn get_feed(&self, feed: FeedType, limit: u32, offset: u32) -> Result<Vec<FeedItem>> {
        let endpoint = format!("/feed?type={}&limit={limit}&offset={offset}", feed.as_str());
        self.request_json(&endpoint, RequestOptions::get())
    }
}
