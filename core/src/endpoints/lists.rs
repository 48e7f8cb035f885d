use crate::client::{ApiClient, RequestOptions};
use crate::error::{ApiError, Result};
use crate::types::{BookPosition, List, ListInput, ListWithBooks, ReorderBooks};

impl ApiClient {
    pub fn create_list(&self, input: &ListInput) -> Result<List> {
        self.request_json("/lists", RequestOptions::post().json(input)?)
    }

    pub fn get_list(&self, list_id: i64) -> Result<ListWithBooks> {
        self.request_json(&format!("/lists/{list_id}"), RequestOptions::get())
    }

    pub fn update_list(&self, list_id: i64, input: &ListInput) -> Result<List> {
        self.request_json(&format!("/lists/{list_id}"), RequestOptions::put().json(input)?)
    }

    pub fn delete_list(&self, list_id: i64) -> Result<()> {
        self.request_unit(&format!("/lists/{list_id}"), RequestOptions::delete())
    }

    pub fn get_user_lists(&self, user_id: i64) -> Result<Vec<List>> {
        self.request_json(&format!("/users/{user_id}/lists"), RequestOptions::get())
    }

    /// Lists owned by the signed-in user, resolved from the token payload.
    ///
    /// Fails with `NotAuthenticated` without sending anything when no user id
    /// can be read from the stored token.
    pub fn get_my_lists(&self) -> Result<Vec<List>> {
        let user_id = self.session().current_user_id().ok_or(ApiError::NotAuthenticated)?;
        self.get_user_lists(user_id)
    }

    pub fn add_book_to_list(&self, list_id: i64, book_id: i64, position: i64) -> Result<()> {
        let body = BookPosition { book_id, position };
        self.request_unit(&format!("/lists/{list_id}/books"), RequestOptions::post().json(&body)?)
    }

    pub fn remove_book_from_list(&self, list_id: i64, book_id: i64) -> Result<()> {
        self.request_unit(&format!("/lists/{list_id}/books/{book_id}"), RequestOptions::delete())
    }

    /// Replace the ordering of a list's books.
    pub fn reorder_list_books(&self, list_id: i64, positions: &[BookPosition]) -> Result<()> {
        let body = ReorderBooks {
            books: positions.to_vec(),
        };
        self.request_unit(&format!("/lists/{list_id}/books"), RequestOptions::put().json(&body)?)
    }

    pub fn bookmark_list(&self, list_id: i64) -> Result<()> {
        self.request_unit(&format!("/lists/{list_id}/bookmark"), RequestOptions::post())
    }

    pub fn unbookmark_list(&self, list_id: i64) -> Result<()> {
        self.request_unit(&format!("/lists/{list_id}/bookmark"), RequestOptions::delete())
    }

    pub fn get_bookmarked_lists(&self) -> Result<Vec<List>> {
        self.request_json("/users/me/bookmarked-lists", RequestOptions::get())
    }

    pub fn get_popular_lists(&self, limit: u32) -> Result<Vec<List>> {
        self.request_json(&format!("/lists/popular?limit={limit}"), RequestOptions::get())
    }
}

/// Positions `1..=n` in the order given, as the drag-and-drop editor saves them.
pub fn positions_in_order(book_ids: &[i64]) -> Vec<BookPosition> {
    book_ids
        .iter()
        .zip(1..)
        .map(|(&book_id, position)| BookPosition { book_id, position })
        .collect()
}
