//! Read access to the book catalog.
//!
//! The recommenders only ever read; writes happen in the seeding step.

use futures::{future, StreamExt, TryStreamExt};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crate::{
    error::AppResult,
    models::{Book, CatalogFilter},
};

const BOOK_COLUMNS: &str = "id, title, author, genre, description, rating, rating_count";

/// Query capability over the stored books
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogStore: Send + Sync {
    /// Books matching `filter`, ordered by rating then rating count (both
    /// descending, missing counts last), at most `filter.limit` of them
    async fn top_rated(&self, filter: &CatalogFilter) -> AppResult<Vec<Book>>;

    /// Books with the given ids, in no particular order; unknown ids are skipped
    async fn find_by_ids(&self, ids: &[i64]) -> AppResult<Vec<Book>>;
}

/// SQLite-backed catalog
#[derive(Clone)]
pub struct SqlCatalog {
    pool: SqlitePool,
}

impl SqlCatalog {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

/// Case-insensitive substring match on the genre
///
/// SQLite's `LIKE` only folds ASCII case; genres such as "Fantasía" need
/// Unicode lowercasing.
fn genre_matches(genre: &str, needle: Option<&str>) -> bool {
    match needle {
        Some(needle) => genre.to_lowercase().contains(needle),
        None => true,
    }
}

#[async_trait::async_trait]
impl CatalogStore for SqlCatalog {
    async fn top_rated(&self, filter: &CatalogFilter) -> AppResult<Vec<Book>> {
        let needle = filter.genre.as_deref().map(str::to_lowercase);
        let sql = format!(
            r#"
            SELECT {BOOK_COLUMNS}
            FROM books
            WHERE ?1 IS NULL OR rating >= ?1
            ORDER BY rating DESC, rating_count DESC NULLS LAST, id ASC
            "#
        );

        let books: Vec<Book> = sqlx::query_as::<_, Book>(&sql)
            .bind(filter.min_rating)
            .fetch(&self.pool)
            .try_filter(|book| future::ready(genre_matches(&book.genre, needle.as_deref())))
            .take(filter.limit as usize)
            .try_collect()
            .await?;

        tracing::debug!(
            genre = ?filter.genre,
            min_rating = ?filter.min_rating,
            limit = filter.limit,
            results = books.len(),
            "Catalog query completed"
        );

        Ok(books)
    }

    async fn find_by_ids(&self, ids: &[i64]) -> AppResult<Vec<Book>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder: QueryBuilder<Sqlite> =
            QueryBuilder::new(format!("SELECT {BOOK_COLUMNS} FROM books WHERE id IN ("));
        let mut separated = builder.separated(", ");
        for id in ids {
            separated.push_bind(*id);
        }
        separated.push_unseparated(")");

        let books = builder
            .build_query_as::<Book>()
            .fetch_all(&self.pool)
            .await?;

        Ok(books)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_memory_pool, seed};
    use crate::models::NewBook;

    async fn create_test_catalog(books: &[NewBook]) -> SqlCatalog {
        let pool = create_memory_pool().await.unwrap();
        seed::insert_books(&pool, books).await.unwrap();
        SqlCatalog::new(pool)
    }

    fn titles(books: &[Book]) -> Vec<&str> {
        books.iter().map(|b| b.title.as_str()).collect()
    }

    #[tokio::test]
    async fn test_top_rated_orders_by_rating_then_count() {
        let catalog = create_test_catalog(&[
            NewBook::new("Low", "A", "Misterio", 3.9).with_rating_count(10),
            NewBook::new("Tied few", "B", "Misterio", 4.5).with_rating_count(100),
            NewBook::new("Best", "C", "Misterio", 4.9).with_rating_count(5),
            NewBook::new("Tied many", "D", "Misterio", 4.5).with_rating_count(1_000),
        ])
        .await;

        let books = catalog.top_rated(&CatalogFilter::top(10)).await.unwrap();
        assert_eq!(titles(&books), vec!["Best", "Tied many", "Tied few", "Low"]);
    }

    #[tokio::test]
    async fn test_missing_rating_count_sorts_last_among_ties() {
        let catalog = create_test_catalog(&[
            NewBook::new("Unknown count", "A", "Histórica", 4.4),
            NewBook::new("Known count", "B", "Histórica", 4.4).with_rating_count(1),
        ])
        .await;

        let books = catalog.top_rated(&CatalogFilter::top(10)).await.unwrap();
        assert_eq!(titles(&books), vec!["Known count", "Unknown count"]);
    }

    #[tokio::test]
    async fn test_genre_filter_is_case_insensitive_for_accented_text() {
        let catalog = create_test_catalog(&[
            NewBook::new("Dune", "Frank Herbert", "Ciencia ficción", 4.6),
            NewBook::new("1984", "George Orwell", "Distopía", 4.5),
            NewBook::new("Cien años", "García Márquez", "FICCIÓN", 4.4),
        ])
        .await;

        let filter = CatalogFilter {
            genre: Some("Ficción".to_string()),
            min_rating: None,
            limit: 10,
        };
        let books = catalog.top_rated(&filter).await.unwrap();
        assert_eq!(titles(&books), vec!["Dune", "Cien años"]);
    }

    #[tokio::test]
    async fn test_limit_applies_after_genre_filter() {
        let catalog = create_test_catalog(&[
            NewBook::new("Top other", "A", "Thriller", 5.0),
            NewBook::new("Fantasy one", "B", "Fantasía", 4.8),
            NewBook::new("Fantasy two", "C", "Fantasía", 4.7),
            NewBook::new("Fantasy three", "D", "Fantasía", 4.6),
        ])
        .await;

        let filter = CatalogFilter {
            genre: Some("fantas".to_string()),
            min_rating: None,
            limit: 2,
        };
        let books = catalog.top_rated(&filter).await.unwrap();
        assert_eq!(titles(&books), vec!["Fantasy one", "Fantasy two"]);
    }

    #[tokio::test]
    async fn test_min_rating_is_inclusive() {
        let catalog = create_test_catalog(&[
            NewBook::new("Exact", "A", "Romántica", 4.0),
            NewBook::new("Below", "B", "Romántica", 3.99),
        ])
        .await;

        let filter = CatalogFilter {
            genre: None,
            min_rating: Some(4.0),
            limit: 10,
        };
        let books = catalog.top_rated(&filter).await.unwrap();
        assert_eq!(titles(&books), vec!["Exact"]);
    }

    #[tokio::test]
    async fn test_find_by_ids_skips_unknown() {
        let catalog = create_test_catalog(&[
            NewBook::new("One", "A", "Misterio", 4.0),
            NewBook::new("Two", "B", "Misterio", 4.1),
        ])
        .await;

        let mut books = catalog.find_by_ids(&[2, 1, 42]).await.unwrap();
        books.sort_by_key(|b| b.id);
        assert_eq!(titles(&books), vec!["One", "Two"]);
    }

    #[tokio::test]
    async fn test_find_by_ids_empty_input() {
        let catalog = create_test_catalog(&[]).await;
        assert!(catalog.find_by_ids(&[]).await.unwrap().is_empty());
    }

    #[test]
    fn test_genre_matches() {
        assert!(genre_matches("Ciencia ficción", Some("ficción")));
        assert!(genre_matches("Ciencia ficción", None));
        assert!(!genre_matches("Distopía", Some("ficción")));
    }
}
