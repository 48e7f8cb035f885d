//! In-memory backing store for the mock API.
//!
//! Every operation is synchronous and runs under the router's `RwLock`; the
//! handlers only translate between HTTP and these methods.

use std::collections::{BTreeSet, HashMap};

use chrono::{DateTime, Datelike, Duration, TimeZone, Utc};

use axum::http::StatusCode;

use crate::error::{Failure, Reply};
use crate::models::{
    AuthorCount, Book, BookPosition, BookRatingStats, BookSummary, Comment, EmbedBook, EmbedList, EmbedUserBooks,
    FeedItem, Genre, GenreCount, List, ListBook, ListInput, ListWithBooks, MonthlyBookCount, Rating,
    RatingWithLikes, User, UserProfile, UserYearStats,
};

pub const DEFAULT_PAGE: usize = 20;
const TRENDING_WINDOW_DAYS: i64 = 7;
const TOP_N: usize = 5;

pub const STATUSES: [&str; 3] = ["to_read", "currently_reading", "finished_reading"];

pub const EMBED_DEFAULT_COUNT: usize = 5;
pub const EMBED_MAX_COUNT: usize = 20;
const SNIPPET_CHARS: usize = 150;

/// Ordering of a book's ratings. Ties fall back to newest first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RatingOrder {
    #[default]
    Newest,
    MostLiked,
    HighestRating,
}

impl RatingOrder {
    /// `None` or an empty value is `Newest`; anything unknown is a 400.
    pub fn parse(raw: Option<&str>) -> Reply<Self> {
        match raw.unwrap_or_default() {
            "" | "newest" => Ok(Self::Newest),
            "most_liked" => Ok(Self::MostLiked),
            "highest_rating" => Ok(Self::HighestRating),
            _ => Err(Failure::bad_request("Invalid sort_by parameter")),
        }
    }
}

/// Clamp a widget's `count`: anything outside `1..=20` falls back to the default.
pub fn embed_count(raw: Option<usize>) -> usize {
    raw.filter(|c| (1..=EMBED_MAX_COUNT).contains(c)).unwrap_or(EMBED_DEFAULT_COUNT)
}

struct Account {
    user: User,
    password: String,
}

struct Membership {
    list_id: i64,
    book_id: i64,
    position: i64,
    added_at: DateTime<Utc>,
}

#[derive(Default)]
pub struct Db {
    accounts: Vec<Account>,
    books: Vec<Book>,
    genres: Vec<Genre>,
    ratings: Vec<Rating>,
    /// (user_id, rating_id)
    likes: BTreeSet<(i64, i64)>,
    comments: Vec<Comment>,
    /// (follower_id, followee_id)
    follows: BTreeSet<(i64, i64)>,
    lists: Vec<List>,
    memberships: Vec<Membership>,
    /// (user_id, list_id)
    bookmarks: BTreeSet<(i64, i64)>,
    next_id: i64,
}

impl Db {
    /// A store holding a small fixed catalogue and no users.
    pub fn seeded() -> Self {
        let mut db = Self::default();
        let epoch = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single().unwrap_or_else(Utc::now);
        for name in ["Science Fiction", "Fantasy", "Literary Fiction"] {
            let id = db.next_id();
            db.genres.push(Genre {
                id,
                name: name.to_string(),
                created_at: epoch,
            });
        }
        let catalogue: [(&str, &str, &str, i32, &[usize]); 4] = [
            ("Dune", "Frank Herbert", "9780441172719", 1965, &[0]),
            ("The Left Hand of Darkness", "Ursula K. Le Guin", "9780441478125", 1969, &[0]),
            ("Piranesi", "Susanna Clarke", "9781635575637", 2020, &[1, 2]),
            ("A Wizard of Earthsea", "Ursula K. Le Guin", "9780547722023", 1968, &[1]),
        ];
        for (title, author, isbn, year, genres) in catalogue {
            let id = db.next_id();
            let genres = genres.iter().map(|&g| db.genres[g].clone()).collect();
            db.books.push(Book {
                id,
                title: title.to_string(),
                author: author.to_string(),
                isbn: isbn.to_string(),
                description: String::new(),
                published_year: Some(year),
                cover_url: String::new(),
                genres,
                created_at: epoch,
                updated_at: epoch,
            });
        }
        db
    }

    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    // --- accounts ---

    pub fn create_user(&mut self, username: &str, email: &str, password: &str) -> Reply<User> {
        if self.accounts.iter().any(|a| a.user.email.eq_ignore_ascii_case(email)) {
            return Err(Failure::conflict("Email already exists"));
        }
        if self.accounts.iter().any(|a| a.user.username == username) {
            return Err(Failure::conflict("Username already exists"));
        }
        let now = Utc::now();
        let user = User {
            id: self.next_id(),
            email: email.to_string(),
            username: username.to_string(),
            created_at: now,
            updated_at: now,
        };
        self.accounts.push(Account {
            user: user.clone(),
            password: password.to_string(),
        });
        Ok(user)
    }

    pub fn check_credentials(&self, email: &str, password: &str) -> Option<User> {
        self.accounts
            .iter()
            .find(|a| a.user.email.eq_ignore_ascii_case(email) && a.password == password)
            .map(|a| a.user.clone())
    }

    pub fn user(&self, user_id: i64) -> Option<&User> {
        self.accounts.iter().map(|a| &a.user).find(|u| u.id == user_id)
    }

    fn username(&self, user_id: i64) -> String {
        self.user(user_id).map(|u| u.username.clone()).unwrap_or_default()
    }

    // --- books ---

    pub fn books(&self, search: Option<&str>, limit: usize, offset: usize) -> Vec<Book> {
        let needle = search.map(str::to_lowercase).filter(|s| !s.is_empty());
        self.books
            .iter()
            .filter(|b| match &needle {
                Some(n) => b.title.to_lowercase().contains(n) || b.author.to_lowercase().contains(n),
                None => true,
            })
            .skip(offset)
            .take(limit)
            .cloned()
            .collect()
    }

    pub fn book(&self, book_id: i64) -> Option<&Book> {
        self.books.iter().find(|b| b.id == book_id)
    }

    fn require_book(&self, book_id: i64) -> Reply<&Book> {
        self.book(book_id).ok_or_else(|| Failure::not_found("Book not found"))
    }

    pub fn genres(&self) -> Vec<Genre> {
        self.genres.clone()
    }

    fn summary(&self, book: &Book, since: Option<DateTime<Utc>>) -> BookSummary {
        let ratings: Vec<i32> = self
            .ratings
            .iter()
            .filter(|r| r.book_id == book.id && since.map_or(true, |s| r.created_at >= s))
            .map(|r| r.rating)
            .collect();
        BookSummary {
            book_id: book.id,
            title: book.title.clone(),
            author: book.author.clone(),
            cover_url: book.cover_url.clone(),
            avg_rating: average(&ratings),
            rating_count: ratings.len() as i64,
        }
    }

    /// Books with the most ratings in the last week.
    pub fn trending(&self, limit: usize) -> Vec<BookSummary> {
        let since = Utc::now() - Duration::days(TRENDING_WINDOW_DAYS);
        let mut summaries: Vec<_> = self
            .books
            .iter()
            .map(|b| self.summary(b, Some(since)))
            .filter(|s| s.rating_count > 0)
            .collect();
        summaries.sort_by(|a, b| b.rating_count.cmp(&a.rating_count).then(a.book_id.cmp(&b.book_id)));
        summaries.truncate(limit);
        summaries
    }

    /// Highest average rating first, ties broken by rating count.
    pub fn popular(&self, limit: usize) -> Vec<BookSummary> {
        let mut summaries: Vec<_> = self
            .books
            .iter()
            .map(|b| self.summary(b, None))
            .filter(|s| s.rating_count > 0)
            .collect();
        summaries.sort_by(|a, b| {
            b.avg_rating
                .total_cmp(&a.avg_rating)
                .then(b.rating_count.cmp(&a.rating_count))
                .then(a.book_id.cmp(&b.book_id))
        });
        summaries.truncate(limit);
        summaries
    }

    /// Other books sharing at least one genre with `book_id`.
    pub fn similar(&self, book_id: i64, limit: usize) -> Reply<Vec<BookSummary>> {
        let book = self.require_book(book_id)?;
        let genre_ids: BTreeSet<i64> = book.genres.iter().map(|g| g.id).collect();
        Ok(self
            .books
            .iter()
            .filter(|b| b.id != book_id && b.genres.iter().any(|g| genre_ids.contains(&g.id)))
            .take(limit)
            .map(|b| self.summary(b, None))
            .collect())
    }

    // --- ratings ---

    fn decorate(&self, rating: &Rating, viewer: Option<i64>) -> RatingWithLikes {
        RatingWithLikes {
            rating: rating.clone(),
            username: self.username(rating.user_id),
            like_count: self.likes.iter().filter(|(_, r)| *r == rating.id).count() as i64,
            liked_by_user: viewer.is_some_and(|v| self.likes.contains(&(v, rating.id))),
            comment_count: self.comments.iter().filter(|c| c.rating_id == rating.id).count() as i64,
        }
    }

    pub fn book_ratings(&self, book_id: i64, viewer: Option<i64>, order: RatingOrder) -> Reply<BookRatingStats> {
        self.require_book(book_id)?;
        let ratings: Vec<&Rating> = self.ratings.iter().filter(|r| r.book_id == book_id).collect();
        let scores: Vec<i32> = ratings.iter().map(|r| r.rating).collect();
        let mut decorated: Vec<RatingWithLikes> = ratings.into_iter().map(|r| self.decorate(r, viewer)).collect();
        decorated.sort_by(|a, b| {
            let newest = b.rating.created_at.cmp(&a.rating.created_at).then(b.rating.id.cmp(&a.rating.id));
            match order {
                RatingOrder::Newest => newest,
                RatingOrder::MostLiked => b.like_count.cmp(&a.like_count).then(newest),
                RatingOrder::HighestRating => b.rating.rating.cmp(&a.rating.rating).then(newest),
            }
        });
        Ok(BookRatingStats {
            book_id,
            average_rating: average(&scores),
            total_ratings: scores.len() as i64,
            ratings: decorated,
        })
    }

    /// Create the caller's rating for a book, or overwrite the existing one.
    pub fn upsert_rating(&mut self, user_id: i64, book_id: i64, score: i32, review: &str, status: &str) -> Reply<Rating> {
        self.require_book(book_id)?;
        let now = Utc::now();
        if let Some(existing) = self.ratings.iter_mut().find(|r| r.user_id == user_id && r.book_id == book_id) {
            existing.rating = score;
            existing.review = review.to_string();
            existing.status = status.to_string();
            existing.updated_at = now;
            return Ok(existing.clone());
        }
        let rating = Rating {
            id: self.next_id(),
            user_id,
            book_id,
            rating: score,
            review: review.to_string(),
            status: status.to_string(),
            created_at: now,
            updated_at: now,
        };
        self.ratings.push(rating.clone());
        Ok(rating)
    }

    pub fn update_rating(&mut self, user_id: i64, rating_id: i64, score: i32, review: &str) -> Reply<Rating> {
        let rating = self
            .ratings
            .iter_mut()
            .find(|r| r.id == rating_id)
            .ok_or_else(|| Failure::not_found("Rating not found"))?;
        if rating.user_id != user_id {
            return Err(Failure::forbidden());
        }
        check_score(score, &rating.status)?;
        rating.rating = score;
        rating.review = review.to_string();
        rating.updated_at = Utc::now();
        Ok(rating.clone())
    }

    pub fn delete_rating(&mut self, user_id: i64, book_id: i64) -> Reply<()> {
        let index = self
            .ratings
            .iter()
            .position(|r| r.user_id == user_id && r.book_id == book_id)
            .ok_or_else(|| Failure::not_found("Rating not found"))?;
        let removed = self.ratings.remove(index);
        self.likes.retain(|(_, r)| *r != removed.id);
        self.comments.retain(|c| c.rating_id != removed.id);
        Ok(())
    }

    pub fn rating_for(&self, user_id: i64, book_id: i64) -> Reply<Rating> {
        self.ratings
            .iter()
            .find(|r| r.user_id == user_id && r.book_id == book_id)
            .cloned()
            .ok_or_else(|| Failure::not_found("Rating not found"))
    }

    pub fn user_ratings(&self, user_id: i64, status: Option<&str>) -> Vec<Rating> {
        let mut ratings: Vec<Rating> = self
            .ratings
            .iter()
            .filter(|r| r.user_id == user_id && status.map_or(true, |s| r.status == s))
            .cloned()
            .collect();
        ratings.sort_by(|a, b| b.updated_at.cmp(&a.updated_at).then(b.id.cmp(&a.id)));
        ratings
    }

    fn require_rating(&self, rating_id: i64) -> Reply<&Rating> {
        self.ratings
            .iter()
            .find(|r| r.id == rating_id)
            .ok_or_else(|| Failure::not_found("Rating not found"))
    }

    pub fn like(&mut self, user_id: i64, rating_id: i64) -> Reply<()> {
        self.require_rating(rating_id)?;
        self.likes.insert((user_id, rating_id));
        Ok(())
    }

    pub fn unlike(&mut self, user_id: i64, rating_id: i64) -> Reply<()> {
        self.require_rating(rating_id)?;
        self.likes.remove(&(user_id, rating_id));
        Ok(())
    }

    // --- comments ---

    pub fn comments(&self, rating_id: i64) -> Reply<Vec<Comment>> {
        self.require_rating(rating_id)?;
        Ok(self.comments.iter().filter(|c| c.rating_id == rating_id).cloned().collect())
    }

    pub fn add_comment(&mut self, user_id: i64, rating_id: i64, text: &str) -> Reply<Comment> {
        self.require_rating(rating_id)?;
        let comment = Comment {
            id: self.next_id(),
            user_id,
            rating_id,
            text: text.to_string(),
            username: self.username(user_id),
            created_at: Utc::now(),
        };
        self.comments.push(comment.clone());
        Ok(comment)
    }

    pub fn delete_comment(&mut self, user_id: i64, comment_id: i64) -> Reply<()> {
        let index = self
            .comments
            .iter()
            .position(|c| c.id == comment_id)
            .ok_or_else(|| Failure::not_found("Comment not found"))?;
        if self.comments[index].user_id != user_id {
            return Err(Failure::forbidden());
        }
        self.comments.remove(index);
        Ok(())
    }

    // --- users ---

    fn require_user(&self, user_id: i64) -> Reply<&User> {
        self.user(user_id).ok_or_else(|| Failure::not_found("User not found"))
    }

    pub fn profile(&self, user_id: i64, viewer: Option<i64>) -> Reply<UserProfile> {
        let user = self.require_user(user_id)?.clone();
        let ratings: Vec<&Rating> = self.ratings.iter().filter(|r| r.user_id == user_id).collect();
        let count = |status: &str| ratings.iter().filter(|r| r.status == status).count() as i64;
        let scores: Vec<i32> = ratings.iter().map(|r| r.rating).collect();
        Ok(UserProfile {
            user,
            total_books: ratings.len() as i64,
            average_rating: average(&scores),
            to_read_count: count("to_read"),
            currently_reading: count("currently_reading"),
            finished_reading: count("finished_reading"),
            followers_count: self.follows.iter().filter(|(_, f)| *f == user_id).count() as i64,
            following_count: self.follows.iter().filter(|(f, _)| *f == user_id).count() as i64,
            is_following: viewer.is_some_and(|v| self.follows.contains(&(v, user_id))),
        })
    }

    pub fn follow(&mut self, follower: i64, followee: i64) -> Reply<()> {
        if follower == followee {
            return Err(Failure::bad_request("Cannot follow yourself"));
        }
        self.require_user(followee)?;
        self.follows.insert((follower, followee));
        Ok(())
    }

    pub fn unfollow(&mut self, follower: i64, followee: i64) -> Reply<()> {
        self.require_user(followee)?;
        self.follows.remove(&(follower, followee));
        Ok(())
    }

    pub fn followers(&self, user_id: i64) -> Reply<Vec<User>> {
        self.require_user(user_id)?;
        Ok(self
            .follows
            .iter()
            .filter(|(_, f)| *f == user_id)
            .filter_map(|(follower, _)| self.user(*follower).cloned())
            .collect())
    }

    pub fn following(&self, user_id: i64) -> Reply<Vec<User>> {
        self.require_user(user_id)?;
        Ok(self
            .follows
            .iter()
            .filter(|(f, _)| *f == user_id)
            .filter_map(|(_, followee)| self.user(*followee).cloned())
            .collect())
    }

    /// Reading summary of the books a user finished during `year`.
    pub fn year_stats(&self, user_id: i64, year: i32) -> Reply<UserYearStats> {
        self.require_user(user_id)?;
        let finished: Vec<&Rating> = self
            .ratings
            .iter()
            .filter(|r| r.user_id == user_id && r.status == "finished_reading" && r.updated_at.year() == year)
            .collect();

        let mut genres: HashMap<String, i64> = HashMap::new();
        let mut authors: HashMap<String, i64> = HashMap::new();
        let mut months = [0i64; 12];
        for rating in &finished {
            if let Some(book) = self.book(rating.book_id) {
                *authors.entry(book.author.clone()).or_default() += 1;
                for genre in &book.genres {
                    *genres.entry(genre.name.clone()).or_default() += 1;
                }
            }
            months[rating.updated_at.month0() as usize] += 1;
        }

        let scores: Vec<i32> = finished.iter().map(|r| r.rating).collect();
        Ok(UserYearStats {
            year,
            books_read: finished.len() as i64,
            average_rating: average(&scores),
            top_genres: top(genres).into_iter().map(|(genre, count)| GenreCount { genre, count }).collect(),
            favourite_authors: top(authors)
                .into_iter()
                .map(|(author, count)| AuthorCount { author, count })
                .collect(),
            reading_streak: longest_run(&months),
            monthly_activity: (1..)
                .zip(months)
                .map(|(month, count)| MonthlyBookCount { month, count })
                .collect(),
        })
    }

    // --- feed ---

    pub fn feed(&self, viewer: Option<i64>, following_only: bool, limit: usize, offset: usize) -> Vec<FeedItem> {
        let mut ratings: Vec<&Rating> = self
            .ratings
            .iter()
            .filter(|r| !following_only || viewer.is_some_and(|v| self.follows.contains(&(v, r.user_id))))
            .collect();
        ratings.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        ratings
            .into_iter()
            .skip(offset)
            .take(limit)
            .map(|r| {
                let decorated = self.decorate(r, viewer);
                let book = self.book(r.book_id);
                FeedItem {
                    rating: decorated.rating,
                    username: decorated.username,
                    book_title: book.map(|b| b.title.clone()).unwrap_or_default(),
                    book_author: book.map(|b| b.author.clone()).unwrap_or_default(),
                    book_cover: book.map(|b| b.cover_url.clone()).unwrap_or_default(),
                    like_count: decorated.like_count,
                    liked_by_user: decorated.liked_by_user,
                    comment_count: decorated.comment_count,
                }
            })
            .collect()
    }

    // --- lists ---

    pub fn create_list(&mut self, user_id: i64, input: &ListInput) -> List {
        let now = Utc::now();
        let list = List {
            id: self.next_id(),
            user_id,
            name: input.name.clone(),
            description: input.description.clone(),
            public: input.public,
            created_at: now,
            updated_at: now,
        };
        self.lists.push(list.clone());
        list
    }

    /// A list visible to `viewer`: public lists to everyone, private ones to the owner only.
    fn visible_list(&self, list_id: i64, viewer: Option<i64>) -> Reply<&List> {
        self.lists
            .iter()
            .find(|l| l.id == list_id && (l.public || viewer == Some(l.user_id)))
            .ok_or_else(|| Failure::not_found("List not found"))
    }

    fn owned_list_mut(&mut self, list_id: i64, user_id: i64) -> Reply<&mut List> {
        let list = self
            .lists
            .iter_mut()
            .find(|l| l.id == list_id)
            .ok_or_else(|| Failure::not_found("List not found"))?;
        if list.user_id != user_id {
            return Err(Failure::forbidden());
        }
        Ok(list)
    }

    pub fn list_with_books(&self, list_id: i64, viewer: Option<i64>) -> Reply<ListWithBooks> {
        let list = self.visible_list(list_id, viewer)?.clone();
        Ok(ListWithBooks {
            username: self.username(list.user_id),
            books: self.list_books(list_id),
            list,
        })
    }

    /// Books of a list in position order.
    fn list_books(&self, list_id: i64) -> Vec<ListBook> {
        let mut entries: Vec<&Membership> = self.memberships.iter().filter(|m| m.list_id == list_id).collect();
        entries.sort_by_key(|m| (m.position, m.added_at));
        entries
            .into_iter()
            .filter_map(|m| {
                self.book(m.book_id).map(|b| ListBook {
                    book_id: b.id,
                    title: b.title.clone(),
                    author: b.author.clone(),
                    cover_url: b.cover_url.clone(),
                    position: m.position,
                    added_at: m.added_at,
                })
            })
            .collect()
    }

    pub fn update_list(&mut self, user_id: i64, list_id: i64, input: &ListInput) -> Reply<List> {
        let list = self.owned_list_mut(list_id, user_id)?;
        list.name = input.name.clone();
        list.description = input.description.clone();
        list.public = input.public;
        list.updated_at = Utc::now();
        Ok(list.clone())
    }

    pub fn delete_list(&mut self, user_id: i64, list_id: i64) -> Reply<()> {
        self.owned_list_mut(list_id, user_id)?;
        self.lists.retain(|l| l.id != list_id);
        self.memberships.retain(|m| m.list_id != list_id);
        self.bookmarks.retain(|(_, l)| *l != list_id);
        Ok(())
    }

    pub fn user_lists(&self, owner: i64, viewer: Option<i64>) -> Vec<List> {
        self.lists
            .iter()
            .filter(|l| l.user_id == owner && (l.public || viewer == Some(owner)))
            .cloned()
            .collect()
    }

    /// Position `0` appends after the current last book. Re-adding a book moves it.
    pub fn add_book(&mut self, user_id: i64, list_id: i64, book_id: i64, position: i64) -> Reply<()> {
        self.owned_list_mut(list_id, user_id)?;
        self.require_book(book_id)?;
        let position = if position == 0 {
            self.memberships
                .iter()
                .filter(|m| m.list_id == list_id)
                .map(|m| m.position)
                .max()
                .unwrap_or(0)
                + 1
        } else {
            position
        };
        self.memberships.retain(|m| !(m.list_id == list_id && m.book_id == book_id));
        self.memberships.push(Membership {
            list_id,
            book_id,
            position,
            added_at: Utc::now(),
        });
        Ok(())
    }

    pub fn remove_book(&mut self, user_id: i64, list_id: i64, book_id: i64) -> Reply<()> {
        self.owned_list_mut(list_id, user_id)?;
        let before = self.memberships.len();
        self.memberships.retain(|m| !(m.list_id == list_id && m.book_id == book_id));
        if self.memberships.len() == before {
            return Err(Failure::not_found("Book not found in list"));
        }
        Ok(())
    }

    pub fn reorder(&mut self, user_id: i64, list_id: i64, positions: &[BookPosition]) -> Reply<()> {
        self.owned_list_mut(list_id, user_id)?;
        for slot in positions {
            if let Some(m) = self
                .memberships
                .iter_mut()
                .find(|m| m.list_id == list_id && m.book_id == slot.book_id)
            {
                m.position = slot.position;
            }
        }
        Ok(())
    }

    pub fn bookmark(&mut self, user_id: i64, list_id: i64) -> Reply<()> {
        self.visible_list(list_id, Some(user_id))?;
        self.bookmarks.insert((user_id, list_id));
        Ok(())
    }

    pub fn unbookmark(&mut self, user_id: i64, list_id: i64) -> Reply<()> {
        if !self.bookmarks.remove(&(user_id, list_id)) {
            return Err(Failure::not_found("Bookmark not found"));
        }
        Ok(())
    }

    pub fn bookmarked_lists(&self, user_id: i64) -> Vec<List> {
        self.bookmarks
            .iter()
            .filter(|(u, _)| *u == user_id)
            .filter_map(|(_, list_id)| self.visible_list(*list_id, Some(user_id)).ok().cloned())
            .collect()
    }

    // --- embed widget ---

    /// A user's `count` best scored books, unscored shelf entries left out.
    pub fn embed_user_books(&self, user_id: i64, count: usize) -> Reply<EmbedUserBooks> {
        let user = self
            .user(user_id)
            .ok_or_else(|| Failure::bad_request("User not found"))?;
        let mut ratings: Vec<&Rating> = self.ratings.iter().filter(|r| r.user_id == user_id && r.rating > 0).collect();
        ratings.sort_by(|a, b| b.rating.cmp(&a.rating).then(b.created_at.cmp(&a.created_at)));
        let books = ratings
            .into_iter()
            .filter_map(|r| {
                self.book(r.book_id).map(|b| EmbedBook {
                    rating_id: r.id,
                    book_id: b.id,
                    title: b.title.clone(),
                    author: b.author.clone(),
                    cover_url: b.cover_url.clone(),
                    rating: r.rating,
                    review_snippet: snippet(&r.review),
                    created_at: r.created_at,
                    updated_at: r.updated_at,
                })
            })
            .take(count)
            .collect();
        Ok(EmbedUserBooks {
            user_id,
            username: user.username.clone(),
            books,
        })
    }

    /// The first `count` books of a public list. Private lists are 403 for everyone.
    pub fn embed_list(&self, list_id: i64, count: usize) -> Reply<EmbedList> {
        let list = self
            .lists
            .iter()
            .find(|l| l.id == list_id)
            .ok_or_else(|| Failure::not_found("List not found"))?;
        if !list.public {
            return Err(Failure::text(StatusCode::FORBIDDEN, "List is not public"));
        }
        let mut books = self.list_books(list_id);
        books.truncate(count);
        Ok(EmbedList {
            list_id,
            list_name: list.name.clone(),
            description: list.description.clone(),
            username: self.username(list.user_id),
            user_id: list.user_id,
            books,
        })
    }

    /// Public lists ordered by bookmark count.
    pub fn popular_lists(&self, limit: usize) -> Vec<List> {
        let mut lists: Vec<(usize, &List)> = self
            .lists
            .iter()
            .filter(|l| l.public)
            .map(|l| (self.bookmarks.iter().filter(|(_, id)| *id == l.id).count(), l))
            .collect();
        lists.sort_by(|(a_count, a), (b_count, b)| b_count.cmp(a_count).then(a.id.cmp(&b.id)));
        lists.into_iter().take(limit).map(|(_, l)| l.clone()).collect()
    }
}

fn snippet(review: &str) -> String {
    match review.char_indices().nth(SNIPPET_CHARS) {
        Some((cut, _)) => format!("{}...", &review[..cut]),
        None => review.to_string(),
    }
}

fn average(scores: &[i32]) -> f64 {
    if scores.is_empty() {
        return 0.0;
    }
    f64::from(scores.iter().sum::<i32>()) / scores.len() as f64
}

fn top(counts: HashMap<String, i64>) -> Vec<(String, i64)> {
    let mut entries: Vec<_> = counts.into_iter().collect();
    entries.sort_by(|(a_name, a), (b_name, b)| b.cmp(a).then(a_name.cmp(b_name)));
    entries.truncate(TOP_N);
    entries
}

/// Longest run of consecutive months with at least one book.
fn longest_run(months: &[i64]) -> i64 {
    let mut best = 0;
    let mut current = 0;
    for &count in months {
        current = if count > 0 { current + 1 } else { 0 };
        best = best.max(current);
    }
    best
}

/// Finished books need a score of 1 to 10; the other shelves also allow 0 (unscored).
pub fn check_score(score: i32, status: &str) -> Reply<()> {
    if status == "finished_reading" {
        if !(1..=10).contains(&score) {
            return Err(Failure::invalid("Rating must be between 1 and 10 for finished books"));
        }
    } else if !(0..=10).contains(&score) {
        return Err(Failure::invalid("Invalid rating"));
    }
    Ok(())
}

pub fn validate_status(status: &str) -> Reply<()> {
    if STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(Failure::invalid(format!("Invalid status: {status}")))
    }
}
