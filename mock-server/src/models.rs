//! Wire schema served by the mock API.
//!
//! Defined independently of `bookmarkd-core`; the core integration tests
//! catch drift between the two.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Genre {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub isbn: String,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub published_year: Option<i32>,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub cover_url: String,
    pub genres: Vec<Genre>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BookSummary {
    pub book_id: i64,
    pub title: String,
    pub author: String,
    pub cover_url: String,
    pub avg_rating: f64,
    pub rating_count: i64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Rating {
    pub id: i64,
    pub user_id: i64,
    pub book_id: i64,
    pub rating: i32,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub review: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RatingWithLikes {
    #[serde(flatten)]
    pub rating: Rating,
    pub username: String,
    pub like_count: i64,
    pub liked_by_user: bool,
    pub comment_count: i64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BookRatingStats {
    pub book_id: i64,
    pub average_rating: f64,
    pub total_ratings: i64,
    pub ratings: Vec<RatingWithLikes>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FeedItem {
    #[serde(flatten)]
    pub rating: Rating,
    pub username: String,
    pub book_title: String,
    pub book_author: String,
    pub book_cover: String,
    pub like_count: i64,
    pub liked_by_user: bool,
    pub comment_count: i64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub user_id: i64,
    pub rating_id: i64,
    pub text: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(flatten)]
    pub user: User,
    pub total_books: i64,
    pub average_rating: f64,
    pub to_read_count: i64,
    pub currently_reading: i64,
    pub finished_reading: i64,
    pub followers_count: i64,
    pub following_count: i64,
    pub is_following: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GenreCount {
    pub genre: String,
    pub count: i64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AuthorCount {
    pub author: String,
    pub count: i64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MonthlyBookCount {
    pub month: u32,
    pub count: i64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UserYearStats {
    pub year: i32,
    pub books_read: i64,
    pub average_rating: f64,
    pub top_genres: Vec<GenreCount>,
    pub favourite_authors: Vec<AuthorCount>,
    pub reading_streak: i64,
    pub monthly_activity: Vec<MonthlyBookCount>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct List {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub description: String,
    pub public: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ListBook {
    pub book_id: i64,
    pub title: String,
    pub author: String,
    pub cover_url: String,
    pub position: i64,
    pub added_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ListWithBooks {
    #[serde(flatten)]
    pub list: List,
    pub username: String,
    pub books: Vec<ListBook>,
}

/// One book in a user's embeddable shelf.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EmbedBook {
    pub rating_id: i64,
    pub book_id: i64,
    pub title: String,
    pub author: String,
    pub cover_url: String,
    pub rating: i32,
    /// Review cut to 150 characters, with `...` appended when cut.
    pub review_snippet: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EmbedUserBooks {
    pub user_id: i64,
    pub username: String,
    pub books: Vec<EmbedBook>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EmbedList {
    pub list_id: i64,
    pub list_name: String,
    pub description: String,
    pub username: String,
    pub user_id: i64,
    pub books: Vec<ListBook>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

#[derive(Deserialize)]
pub struct SignupRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Deserialize)]
pub struct CreateRating {
    pub rating: i32,
    #[serde(default)]
    pub review: String,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateRating {
    pub rating: i32,
    #[serde(default)]
    pub review: String,
}

#[derive(Deserialize)]
pub struct CreateComment {
    #[serde(default)]
    pub text: String,
}

#[derive(Deserialize)]
pub struct ListInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub public: bool,
}

/// `position` 0 (or absent) on insert means "append".
#[derive(Clone, Copy, Deserialize)]
pub struct BookPosition {
    pub book_id: i64,
    #[serde(default)]
    pub position: i64,
}

#[derive(Deserialize)]
pub struct ReorderBooks {
    pub books: Vec<BookPosition>,
}
