//! Response schemas and request payloads for the bookmarkd API.
//!
//! # Design
//! Every endpoint parses into one of these records at the client boundary,
//! so rendering code never handles raw JSON. Fields the server omits when
//! empty (`omitempty`) carry `#[serde(default)]`. The mock-server crate
//! defines its own copies; integration tests catch schema drift.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered account. The email is only present on some endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub email: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Body of a successful login.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

/// Signup answers either with a ready session or with the bare account.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum SignupResponse {
    Session(AuthResponse),
    Account(User),
}

/// Claims echoed back by `GET /profile`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Profile {
    pub user_id: i64,
    #[serde(default)]
    pub email: String,
    pub username: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Genre {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub isbn: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub published_year: Option<i32>,
    #[serde(default)]
    pub cover_url: String,
    #[serde(default)]
    pub genres: Vec<Genre>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Compact book row used by trending, popular and similar listings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookSummary {
    pub book_id: i64,
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub cover_url: String,
    #[serde(default)]
    pub avg_rating: f64,
    #[serde(default)]
    pub rating_count: i64,
}

/// Filters for `GET /books`. `None` fields are left out of the query.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BookQuery {
    pub search: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

/// Shelf a rating sits on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadingStatus {
    ToRead,
    CurrentlyReading,
    #[default]
    FinishedReading,
}

impl ReadingStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ReadingStatus::ToRead => "to_read",
            ReadingStatus::CurrentlyReading => "currently_reading",
            ReadingStatus::FinishedReading => "finished_reading",
        }
    }
}

impl std::str::FromStr for ReadingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "to_read" => Ok(ReadingStatus::ToRead),
            "currently_reading" => Ok(ReadingStatus::CurrentlyReading),
            "finished_reading" => Ok(ReadingStatus::FinishedReading),
            other => Err(format!("unknown reading status: {other}")),
        }
    }
}

/// Order of the ratings on a book page. The server defaults to newest first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatingSort {
    #[default]
    Newest,
    MostLiked,
    HighestRating,
}

impl RatingSort {
    pub fn as_str(self) -> &'static str {
        match self {
            RatingSort::Newest => "newest",
            RatingSort::MostLiked => "most_liked",
            RatingSort::HighestRating => "highest_rating",
        }
    }
}

impl std::str::FromStr for RatingSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "newest" => Ok(RatingSort::Newest),
            "most_liked" => Ok(RatingSort::MostLiked),
            "highest_rating" => Ok(RatingSort::HighestRating),
            other => Err(format!("unknown rating sort: {other}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Rating {
    pub id: i64,
    pub user_id: i64,
    pub book_id: i64,
    pub rating: i32,
    #[serde(default)]
    pub review: String,
    #[serde(default)]
    pub status: ReadingStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for `POST /books/{id}/ratings`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewRating {
    pub rating: i32,
    pub review: String,
    #[serde(default)]
    pub status: ReadingStatus,
}

/// Payload for `PATCH /ratings/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RatingUpdate {
    pub rating: i32,
    pub review: String,
}

/// A rating as shown on a book page, with its social counters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RatingWithLikes {
    #[serde(flatten)]
    pub rating: Rating,
    pub username: String,
    #[serde(default)]
    pub like_count: i64,
    #[serde(default)]
    pub liked_by_user: bool,
    #[serde(default)]
    pub comment_count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookRatingStats {
    pub book_id: i64,
    pub average_rating: f64,
    pub total_ratings: i64,
    #[serde(default)]
    pub ratings: Vec<RatingWithLikes>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Comment {
    pub id: i64,
    pub user_id: i64,
    pub rating_id: i64,
    pub text: String,
    #[serde(default)]
    pub username: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewComment {
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    #[serde(flatten)]
    pub user: User,
    #[serde(default)]
    pub total_books: i64,
    #[serde(default)]
    pub average_rating: f64,
    #[serde(default)]
    pub to_read_count: i64,
    #[serde(default, rename = "currently_reading")]
    pub currently_reading_count: i64,
    #[serde(default, rename = "finished_reading")]
    pub finished_reading_count: i64,
    #[serde(default)]
    pub followers_count: i64,
    #[serde(default)]
    pub following_count: i64,
    #[serde(default)]
    pub is_following: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GenreCount {
    pub genre: String,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthorCount {
    pub author: String,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MonthlyBookCount {
    pub month: u32,
    pub count: i64,
}

/// Reading summary for one calendar year.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserYearStats {
    pub year: i32,
    pub books_read: i64,
    pub average_rating: f64,
    #[serde(default)]
    pub top_genres: Vec<GenreCount>,
    #[serde(default)]
    pub favourite_authors: Vec<AuthorCount>,
    #[serde(default)]
    pub reading_streak: i64,
    #[serde(default)]
    pub monthly_activity: Vec<MonthlyBookCount>,
}

/// Which slice of the activity feed to read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedType {
    #[default]
    All,
    Following,
}

impl FeedType {
    pub fn as_str(self) -> &'static str {
        match self {
            FeedType::All => "all",
            FeedType::Following => "following",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeedItem {
    #[serde(flatten)]
    pub rating: Rating,
    pub username: String,
    pub book_title: String,
    #[serde(default)]
    pub book_author: String,
    #[serde(default)]
    pub book_cover: String,
    #[serde(default)]
    pub like_count: i64,
    #[serde(default)]
    pub liked_by_user: bool,
    #[serde(default)]
    pub comment_count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct List {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub public: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ListBook {
    pub book_id: i64,
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub cover_url: String,
    pub position: i64,
    pub added_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ListWithBooks {
    #[serde(flatten)]
    pub list: List,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub books: Vec<ListBook>,
}

/// Payload for creating or replacing a list's metadata.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ListInput {
    pub name: String,
    pub description: String,
    pub public: bool,
}

/// A book's slot within a list.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct BookPosition {
    pub book_id: i64,
    pub position: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReorderBooks {
    pub books: Vec<BookPosition>,
}

/// A scored book on a user's embeddable shelf.
///
/// Timestamps are kept as the server formats them; the widget only displays them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmbedBook {
    pub rating_id: i64,
    pub book_id: i64,
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub cover_url: String,
    pub rating: i32,
    #[serde(default)]
    pub review_snippet: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

/// `GET /embed/users/{id}/books`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmbedUserBooks {
    pub user_id: i64,
    pub username: String,
    #[serde(default)]
    pub books: Vec<EmbedBook>,
}

/// `GET /embed/lists/{id}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmbedList {
    pub list_id: i64,
    pub list_name: String,
    #[serde(default)]
    pub description: String,
    pub username: String,
    pub user_id: i64,
    #[serde(default)]
    pub books: Vec<ListBook>,
}
