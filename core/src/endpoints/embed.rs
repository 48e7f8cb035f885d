//! Read-only endpoints behind the embeddable reading widget. They need no
//! token; a stored one is still sent like on every other call.

use crate::client::{ApiClient, RequestOptions};
use crate::error::Result;
use crate::types::{EmbedList, EmbedUserBooks};

/// Books the widget shows when the page does not choose. The server clamps
/// `count` to 1..=20 and falls back to this value outside that range.
pub const DEFAULT_EMBED_COUNT: u32 = 5;

impl ApiClient {
    /// `GET /embed/users/{id}/books?count=`: the user's best scored books.
    pub fn get_embed_user_books(&self, user_id: i64, count: u32) -> Result<EmbedUserBooks> {
        self.request_json(&format!("/embed/users/{user_id}/books?count={count}"), RequestOptions::get())
    }

    /// `GET /embed/lists/{id}?count=`: the first books of a public list.
    pub fn get_embed_list(&self, list_id: i64, count: u32) -> Result<EmbedList> {
        self.request_json(&format!("/embed/lists/{list_id}?count={count}"), RequestOptions::get())
    }
}
