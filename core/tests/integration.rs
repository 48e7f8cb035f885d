//! End-to-end tests against the live mock server.
//!
//! # Design
//! Each test starts the mock server on a random port, then drives the client
//! over real HTTP with `UreqTransport`. This checks request building and
//! response normalization against the same status codes and error bodies
//! the production backend emits.

use std::net::SocketAddr;
use std::sync::Arc;

use bookmarkd_core::{
    positions_in_order, ApiClient, ApiError, BookQuery, FeedType, ListInput, Navigation, NewRating, RatingSort,
    ReadingStatus, Session, UreqTransport, DEFAULT_EMBED_COUNT,
};

/// Boot a fresh mock server on `127.0.0.1:0` and return its address.
fn start_server() -> SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
    });

    addr
}

fn client(addr: SocketAddr) -> ApiClient {
    ApiClient::new(
        &format!("http://{addr}/api"),
        Session::in_memory(),
        Arc::new(UreqTransport::new()),
    )
}

/// Sign up and log in `username`, returning the logged-in client and user id.
fn logged_in(addr: SocketAddr, username: &str) -> (ApiClient, i64) {
    let c = client(addr);
    let email = format!("{username}@example.com");
    c.signup(username, &email, "correct horse").unwrap();
    let auth = c.login(&email, "correct horse").unwrap();
    (c, auth.user.id)
}

fn server_message(err: ApiError) -> (u16, String) {
    match err {
        ApiError::Server { status, message } => (status, message),
        other => panic!("expected a server error, got {other:?}"),
    }
}

#[test]
fn login_stores_token_and_logout_clears_it() {
    let addr = start_server();
    let c = client(addr);

    let user = c.signup("ann", "ann@example.com", "correct horse").unwrap();
    assert_eq!(user.username, "ann");
    assert!(!c.session().is_logged_in(), "signup alone does not log in");

    let auth = c.login("ann@example.com", "correct horse").unwrap();
    assert!(c.session().is_logged_in());
    assert_eq!(c.session().token().unwrap().as_deref(), Some(auth.token.as_str()));
    assert_eq!(c.session().current_user_id(), Some(auth.user.id));

    let profile = c.get_profile().unwrap();
    assert_eq!(profile.user_id, auth.user.id);
    assert_eq!(profile.username, "ann");

    assert_eq!(c.session().logout().unwrap(), Navigation::Home);
    assert!(!c.session().is_logged_in());
    assert_eq!(c.session().current_user_id(), None);
}

#[test]
fn text_errors_surface_verbatim() {
    let addr = start_server();
    let c = client(addr);

    let (status, message) = server_message(c.login("nobody@example.com", "whatever1").unwrap_err());
    assert_eq!(status, 401);
    assert_eq!(message, "Invalid credentials\n");
    assert!(!c.session().is_logged_in());

    let (status, message) = server_message(c.get_profile().unwrap_err());
    assert_eq!(status, 401);
    assert_eq!(message, "Authorization header required\n");
}

#[test]
fn json_errors_use_error_field() {
    let addr = start_server();
    let c = client(addr);

    let (status, message) = server_message(c.signup("ann", "ann@example.com", "short").unwrap_err());
    assert_eq!(status, 400);
    assert_eq!(message, "Password must be at least 8 characters");
}

#[test]
fn stale_token_is_rejected() {
    let addr = start_server();
    let c = client(addr);
    c.session().set_token("not.a.jwt").unwrap();

    let err = c.get_profile().unwrap_err();
    assert!(err.is_unauthorized());
    assert_eq!(err.to_string(), "Invalid or expired token\n");
    // the client never clears the token on its own
    assert!(c.session().is_logged_in());
}

#[test]
fn catalogue_browsing() {
    let addr = start_server();
    let c = client(addr);

    let all = c.get_books(&BookQuery::default()).unwrap();
    assert_eq!(all.len(), 4);

    let query = BookQuery {
        search: Some("le guin".to_string()),
        ..BookQuery::default()
    };
    let found = c.get_books(&query).unwrap();
    assert_eq!(found.len(), 2);

    let book = c.get_book(found[0].id).unwrap();
    assert_eq!(book.author, "Ursula K. Le Guin");
    assert!(!book.genres.is_empty());

    assert_eq!(c.get_genres().unwrap().len(), 3);
    assert!(c.get_trending_books(5).unwrap().is_empty());

    let (status, _) = server_message(c.get_book(9999).unwrap_err());
    assert_eq!(status, 404);
}

#[test]
fn rating_round_trip() {
    let addr = start_server();
    let (ann, _) = logged_in(addr, "ann");
    let (bob, _) = logged_in(addr, "bob");
    let dune = ann.get_books(&BookQuery {
        search: Some("Dune".to_string()),
        ..BookQuery::default()
    })
    .unwrap()
    .remove(0);

    let created = ann
        .create_rating(
            dune.id,
            &NewRating {
                rating: 5,
                review: "Great".to_string(),
                status: ReadingStatus::FinishedReading,
            },
        )
        .unwrap();

    let mine = ann.get_my_rating_for_book(dune.id).unwrap();
    assert_eq!(mine.rating, 5);
    assert_eq!(mine.review, "Great");
    assert_eq!(mine.id, created.id);

    let updated = ann.update_rating(created.id, 4, "Still great").unwrap();
    assert_eq!(updated.rating, 4);

    let shelf = ann.get_my_ratings(Some(ReadingStatus::FinishedReading)).unwrap();
    assert_eq!(shelf.len(), 1);
    assert!(ann.get_my_ratings(Some(ReadingStatus::ToRead)).unwrap().is_empty());

    // bob may not edit ann's rating
    let (status, message) = server_message(bob.update_rating(created.id, 1, "").unwrap_err());
    assert_eq!(status, 403);
    assert_eq!(message, "Forbidden\n");

    bob.like_rating(created.id).unwrap();
    let stats = bob.get_ratings(dune.id, None).unwrap();
    assert_eq!(stats.total_ratings, 1);
    assert_eq!(stats.ratings[0].like_count, 1);
    assert!(stats.ratings[0].liked_by_user);
    bob.unlike_rating(created.id).unwrap();
    assert_eq!(bob.get_ratings(dune.id, None).unwrap().ratings[0].like_count, 0);

    let comment = bob.create_comment(created.id, "Agreed").unwrap();
    assert_eq!(comment.username, "bob");
    assert_eq!(ann.get_comments(created.id).unwrap().len(), 1);
    bob.delete_comment(comment.id).unwrap();
    assert!(ann.get_comments(created.id).unwrap().is_empty());

    ann.delete_rating(dune.id).unwrap();
    let (status, _) = server_message(ann.get_my_rating_for_book(dune.id).unwrap_err());
    assert_eq!(status, 404);
}

#[test]
fn follows_and_feed() {
    let addr = start_server();
    let (ann, ann_id) = logged_in(addr, "ann");
    let (bob, bob_id) = logged_in(addr, "bob");
    let book = ann.get_books(&BookQuery::default()).unwrap().remove(0);
    ann.create_rating(
        book.id,
        &NewRating {
            rating: 4,
            review: String::new(),
            status: ReadingStatus::FinishedReading,
        },
    )
    .unwrap();

    assert!(bob.get_feed(FeedType::Following, 20, 0).unwrap().is_empty());
    bob.follow_user(ann_id).unwrap();

    let feed = bob.get_feed(FeedType::Following, 20, 0).unwrap();
    assert_eq!(feed.len(), 1);
    assert_eq!(feed[0].username, "ann");
    assert_eq!(feed[0].book_title, book.title);

    let profile = bob.get_user_profile(ann_id).unwrap();
    assert!(profile.is_following);
    assert_eq!(profile.followers_count, 1);
    assert_eq!(profile.total_books, 1);

    assert_eq!(ann.get_followers(ann_id).unwrap()[0].id, bob_id);
    assert_eq!(ann.get_following(bob_id).unwrap()[0].id, ann_id);

    bob.unfollow_user(ann_id).unwrap();
    assert!(bob.get_feed(FeedType::Following, 20, 0).unwrap().is_empty());
    assert_eq!(bob.get_feed(FeedType::All, 20, 0).unwrap().len(), 1);
}

#[test]
fn list_lifecycle() {
    let addr = start_server();
    let (ann, ann_id) = logged_in(addr, "ann");
    let (bob, _) = logged_in(addr, "bob");
    let books = ann.get_books(&BookQuery::default()).unwrap();

    let list = ann
        .create_list(&ListInput {
            name: "Favourites".to_string(),
            description: "All time".to_string(),
            public: true,
        })
        .unwrap();
    assert_eq!(list.user_id, ann_id);

    ann.add_book_to_list(list.id, books[0].id, 1).unwrap();
    ann.add_book_to_list(list.id, books[1].id, 2).unwrap();
    ann.reorder_list_books(list.id, &positions_in_order(&[books[1].id, books[0].id]))
        .unwrap();

    let full = bob.get_list(list.id).unwrap();
    assert_eq!(full.username, "ann");
    let order: Vec<i64> = full.books.iter().map(|b| b.book_id).collect();
    assert_eq!(order, vec![books[1].id, books[0].id]);

    ann.remove_book_from_list(list.id, books[0].id).unwrap();
    assert_eq!(ann.get_list(list.id).unwrap().books.len(), 1);

    let mine = ann.get_my_lists().unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].name, "Favourites");

    bob.bookmark_list(list.id).unwrap();
    assert_eq!(bob.get_bookmarked_lists().unwrap()[0].id, list.id);
    assert_eq!(bob.get_popular_lists(5).unwrap()[0].id, list.id);
    bob.unbookmark_list(list.id).unwrap();
    assert!(bob.get_bookmarked_lists().unwrap().is_empty());

    let renamed = ann
        .update_list(
            list.id,
            &ListInput {
                name: "Private favourites".to_string(),
                description: String::new(),
                public: false,
            },
        )
        .unwrap();
    assert!(!renamed.public);
    let (status, _) = server_message(bob.get_list(list.id).unwrap_err());
    assert_eq!(status, 404);

    ann.delete_list(list.id).unwrap();
    assert!(ann.get_my_lists().unwrap().is_empty());
}

#[test]
fn ten_point_scale_and_sorting() {
    let addr = start_server();
    let (ann, _) = logged_in(addr, "ann");
    let (bob, _) = logged_in(addr, "bob");
    let books = ann.get_books(&BookQuery::default()).unwrap();
    let rate = |c: &ApiClient, rating: i32, status: ReadingStatus| {
        c.create_rating(
            books[0].id,
            &NewRating {
                rating,
                review: String::new(),
                status,
            },
        )
    };

    let shelved = rate(&ann, 0, ReadingStatus::ToRead).unwrap();
    assert_eq!(shelved.rating, 0);
    assert_eq!(rate(&ann, 8, ReadingStatus::FinishedReading).unwrap().rating, 8);
    rate(&bob, 10, ReadingStatus::FinishedReading).unwrap();
    let (status, _) = server_message(rate(&bob, 11, ReadingStatus::FinishedReading).unwrap_err());
    assert_eq!(status, 400);

    let best = ann.get_ratings(books[0].id, Some(RatingSort::HighestRating)).unwrap();
    let scores: Vec<i32> = best.ratings.iter().map(|r| r.rating.rating).collect();
    assert_eq!(scores, vec![10, 8]);
}

#[test]
fn embed_widget_reads_shelves_and_public_lists() {
    let addr = start_server();
    let (ann, ann_id) = logged_in(addr, "ann");
    let books = ann.get_books(&BookQuery::default()).unwrap();
    for (book, score) in books.iter().zip([6, 9]) {
        ann.create_rating(
            book.id,
            &NewRating {
                rating: score,
                review: String::new(),
                status: ReadingStatus::FinishedReading,
            },
        )
        .unwrap();
    }

    // the widget runs on third-party pages without a session
    let anonymous = client(addr);
    let shelf = anonymous.get_embed_user_books(ann_id, DEFAULT_EMBED_COUNT).unwrap();
    assert_eq!(shelf.username, "ann");
    let scores: Vec<i32> = shelf.books.iter().map(|b| b.rating).collect();
    assert_eq!(scores, vec![9, 6]);

    let list = ann
        .create_list(&ListInput {
            name: "Picks".to_string(),
            description: String::new(),
            public: false,
        })
        .unwrap();
    ann.add_book_to_list(list.id, books[0].id, 0).unwrap();
    let (status, message) = server_message(anonymous.get_embed_list(list.id, 5).unwrap_err());
    assert_eq!((status, message.as_str()), (403, "List is not public\n"));

    ann.update_list(
        list.id,
        &ListInput {
            name: "Picks".to_string(),
            description: String::new(),
            public: true,
        },
    )
    .unwrap();
    let embed = anonymous.get_embed_list(list.id, 5).unwrap();
    assert_eq!(embed.list_name, "Picks");
    assert_eq!(embed.books[0].book_id, books[0].id);

    let (status, _) = server_message(anonymous.get_embed_list(9999, 5).unwrap_err());
    assert_eq!(status, 404);
}

#[test]
fn my_lists_without_login_sends_nothing() {
    let addr = start_server();
    let c = client(addr);
    assert!(matches!(c.get_my_lists(), Err(ApiError::NotAuthenticated)));
}

#[test]
fn unreachable_server_is_network_error() {
    // bind then drop to get a port nobody listens on
    let addr = std::net::TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap();
    let c = client(addr);
    assert!(matches!(c.get_genres(), Err(ApiError::Network(_))));
}
