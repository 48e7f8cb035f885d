use crate::client::{ApiClient, RequestOptions};
use crate::endpoints::with_query;
use crate::error::Result;
use crate::types::{
    BookRatingStats, Comment, NewComment, NewRating, Rating, RatingSort, RatingUpdate, ReadingStatus,
};

impl ApiClient {
    /// All ratings for a book with aggregate stats. `None` leaves the order to
    /// the server, which puts the newest first.
    pub fn get_ratings(&self, book_id: i64, sort: Option<RatingSort>) -> Result<BookRatingStats> {
        let pairs = sort.map(|s| ("sort_by", s.as_str().to_string()));
        self.request_json(&with_query(&format!("/books/{book_id}/ratings"), pairs), RequestOptions::get())
    }

    pub fn create_rating(&self, book_id: i64, rating: &NewRating) -> Result<Rating> {
        self.request_json(&format!("/books/{book_id}/ratings"), RequestOptions::post().json(rating)?)
    }

    pub fn update_rating(&self, rating_id: i64, rating: i32, review: &str) -> Result<Rating> {
        let body = RatingUpdate {
            rating,
            review: review.to_string(),
        };
        self.request_json(&format!("/ratings/{rating_id}"), RequestOptions::patch().json(&body)?)
    }

    /// Removes the caller's own rating of `book_id`.
    pub fn delete_rating(&self, book_id: i64) -> Result<()> {
        self.request_unit(&format!("/books/{book_id}/ratings"), RequestOptions::delete())
    }

    pub fn get_my_ratings(&self, status: Option<ReadingStatus>) -> Result<Vec<Rating>> {
        let pairs = status.map(|s| ("status", s.as_str().to_string()));
        self.request_json(&with_query("/users/me/ratings", pairs), RequestOptions::get())
    }

    pub fn get_my_rating_for_book(&self, book_id: i64) -> Result<Rating> {
        self.request_json(&format!("/books/{book_id}/ratings/me"), RequestOptions::get())
    }

    pub fn like_rating(&self, rating_id: i64) -> Result<()> {
        self.request_unit(&format!("/ratings/{rating_id}/like"), RequestOptions::post())
    }

    pub fn unlike_rating(&self, rating_id: i64) -> Result<()> {
        self.request_unit(&format!("/ratings/{rating_id}/like"), RequestOptions::delete())
    }

    pub fn get_comments(&self, rating_id: i64) -> Result<Vec<Comment>> {
        self.request_json(&format!("/ratings/{rating_id}/comments"), RequestOptions::get())
    }

    pub fn create_comment(&self, rating_id: i64, text: &str) -> Result<Comment> {
        let body = NewComment { text: text.to_string() };
        self.request_json(&format!("/ratings/{rating_id}/comments"), RequestOptions::post().json(&body)?)
    }

    pub fn delete_comment(&self, comment_id: i64) -> Result<()> {
        self.request_unit(&format!("/comments/{comment_id}"), RequestOptions::delete())
    }
}
