use crate::client::{ApiClient, RequestOptions};
use crate::endpoints::with_query;
use crate::error::Result;
use crate::types::{Book, BookQuery, BookSummary, Genre};

impl ApiClient {
    /// `GET /books?search=&limit=&offset=` with unset filters left out.
    pub fn get_books(&self, query: &BookQuery) -> Result<Vec<Book>> {
        let mut pairs = Vec::new();
        if let Some(search) = &query.search {
            pairs.push(("search", search.clone()));
        }
        if let Some(limit) = query.limit {
            pairs.push(("limit", limit.to_string()));
        }
        if let Some(offset) = query.offset {
            pairs.push(("offset", offset.to_string()));
        }
        self.request_json(&with_query("/books", pairs), RequestOptions::get())
    }

    pub fn get_book(&self, id: i64) -> Result<Book> {
        self.request_json(&format!("/books/{id}"), RequestOptions::get())
    }

    pub fn get_trending_books(&self, limit: u32) -> Result<Vec<BookSummary>> {
        self.request_json(&format!("/books/trending?limit={limit}"), RequestOptions::get())
    }

    pub fn get_popular_books(&self, limit: u32) -> Result<Vec<BookSummary>> {
        self.request_json(&format!("/books/popular?limit={limit}"), RequestOptions::get())
    }

    pub fn get_similar_books(&self, id: i64, limit: u32) -> Result<Vec<BookSummary>> {
        self.request_json(&format!("/books/{id}/similar?limit={limit}"), RequestOptions::get())
    }

    pub fn get_genres(&self) -> Result<Vec<Genre>> {
        self.request_json("/genres", RequestOptions::get())
    }
}

#[cfg(test)]
mod tests {
    use crate::client::tests::{client_with, json_response, StubTransport};
    use crate::http::HttpMethod;
    use crate::types::BookQuery;

    #[test]
    fn get_books_without_filters() {
        let stub = StubTransport::replying(json_response(200, "[]"));
        let c = client_with(stub.clone());
        assert!(c.get_books(&BookQuery::default()).unwrap().is_empty());
        assert_eq!(stub.last().url, "http://localhost:8080/api/books");
        assert_eq!(stub.last().method, HttpMethod::Get);
    }

    #[test]
    fn get_books_with_filters() {
        let stub = StubTransport::replying(json_response(200, "[]"));
        let c = client_with(stub.clone());
        let query = BookQuery {
            search: Some("le guin".to_string()),
            limit: Some(10),
            offset: Some(20),
        };
        c.get_books(&query).unwrap();
        assert_eq!(stub.last().url, "http://localhost:8080/api/books?search=le+guin&limit=10&offset=20");
    }

    #[test]
    fn get_book_parses_genres() {
        let stub = StubTransport::replying(json_response(
            200,
            r#"{"id":3,"title":"Dune","author":"Frank Herbert","published_year":1965,
                "genres":[{"id":1,"name":"Science Fiction"}],
                "created_at":"2024-01-02T03:04:05Z","updated_at":"2024-01-02T03:04:05Z"}"#,
        ));
        let c = client_with(stub.clone());
        let book = c.get_book(3).unwrap();
        assert_eq!(book.published_year, Some(1965));
        assert_eq!(book.genres[0].name, "Science Fiction");
        assert_eq!(stub.last().url, "http://localhost:8080/api/books/3");
    }

    #[test]
    fn discovery_paths() {
        let stub = StubTransport::replying(json_response(200, "[]"));
        let c = client_with(stub.clone());

        c.get_trending_books(6).unwrap();
        assert_eq!(stub.last().url, "http://localhost:8080/api/books/trending?limit=6");
        c.get_popular_books(12).unwrap();
        assert_eq!(stub.last().url, "http://localhost:8080/api/books/popular?limit=12");
        c.get_similar_books(9, 6).unwrap();
        assert_eq!(stub.last().url, "http://localhost:8080/api/books/9/similar?limit=6");
        c.get_genres().unwrap();
        assert_eq!(stub.last().url, "http://localhost:8080/api/genres");
    }
}
