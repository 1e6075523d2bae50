use sqlx::{SqliteConnection, SqlitePool};

use crate::{error::AppResult, models::NewBook};

/// Inserts `books` in a single transaction, in order
pub async fn insert_books(pool: &SqlitePool, books: &[NewBook]) -> AppResult<()> {
    let mut tx = pool.begin().await?;
    insert_all(&mut *tx, books).await?;
    tx.commit().await?;
    Ok(())
}

async fn insert_all(conn: &mut SqliteConnection, books: &[NewBook]) -> AppResult<()> {
    for book in books {
        sqlx::query(
            r#"
            INSERT INTO books (title, author, genre, description, rating, rating_count)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.genre)
        .bind(&book.description)
        .bind(book.rating)
        .bind(book.rating_count)
        .execute(&mut *conn)
        .await?;
    }

    Ok(())
}

/// Replaces the whole catalog with `books`
///
/// Ids restart from 1, so the first book inserted gets id 1. Runs as one
/// transaction: a failed insert leaves the previous catalog in place.
pub async fn reseed(pool: &SqlitePool, books: &[NewBook]) -> AppResult<u64> {
    let mut tx = pool.begin().await?;

    let removed = sqlx::query("DELETE FROM books")
        .execute(&mut *tx)
        .await?
        .rows_affected();
    sqlx::query("DELETE FROM sqlite_sequence WHERE name = 'books'")
        .execute(&mut *tx)
        .await?;

    insert_all(&mut *tx, books).await?;
    tx.commit().await?;

    tracing::info!(
        removed = removed,
        inserted = books.len(),
        "Catalog reseeded"
    );

    Ok(books.len() as u64)
}

/// Number of books currently stored
pub async fn count_books(pool: &SqlitePool) -> AppResult<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

/// The sample catalog loaded by the `seed` binary
pub fn sample_catalog() -> Vec<NewBook> {
    vec![
        NewBook::new("Dune", "Frank Herbert", "Ciencia ficción", 4.6)
            .with_description("Intriga política y aventuras en el planeta desértico Arrakis.")
            .with_rating_count(120_000),
        NewBook::new("1984", "George Orwell", "Distopía", 4.5)
            .with_description("Un clásico sobre la vigilancia y los regímenes totalitarios.")
            .with_rating_count(200_000),
        NewBook::new("El nombre del viento", "Patrick Rothfuss", "Fantasía", 4.7)
            .with_description(
                "La historia de Kvothe, un mago legendario, narrada en primera persona.",
            )
            .with_rating_count(180_000),
        NewBook::new("Orgullo y prejuicio", "Jane Austen", "Romántica", 4.4)
            .with_description(
                "Relaciones, prejuicios y crítica social en la Inglaterra del siglo XIX.",
            )
            .with_rating_count(150_000),
        NewBook::new("Fundación", "Isaac Asimov", "Ciencia ficción", 4.3)
            .with_description("Una saga sobre el colapso y renacimiento de un imperio galáctico.")
            .with_rating_count(95_000),
        NewBook::new("El Señor de los Anillos", "J. R. R. Tolkien", "Fantasía", 4.9)
            .with_description("La comunidad del anillo y la lucha contra Sauron.")
            .with_rating_count(250_000),
        NewBook::new(
            "Crónica de una muerte anunciada",
            "Gabriel García Márquez",
            "Ficción",
            4.2,
        )
        .with_description("La historia de un crimen anunciado desde el principio.")
        .with_rating_count(80_000),
        NewBook::new("El código Da Vinci", "Dan Brown", "Thriller", 3.8)
            .with_description(
                "Un profesor de simbología se ve envuelto en una conspiración religiosa.",
            )
            .with_rating_count(300_000),
        NewBook::new("Los pilares de la Tierra", "Ken Follett", "Histórica", 4.4)
            .with_description(
                "La construcción de una catedral en la Edad Media y sus conspiraciones.",
            )
            .with_rating_count(210_000),
        NewBook::new("La sombra del viento", "Carlos Ruiz Zafón", "Misterio", 4.5)
            .with_description(
                "Un niño encuentra un libro maldito en el Cementerio de los Libros Olvidados.",
            )
            .with_rating_count(175_000),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_memory_pool;

    #[tokio::test]
    async fn test_insert_books_assigns_sequential_ids() {
        let pool = create_memory_pool().await.unwrap();
        insert_books(&pool, &sample_catalog()).await.unwrap();

        let first: String = sqlx::query_scalar("SELECT title FROM books WHERE id = 1")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(first, "Dune");
        assert_eq!(count_books(&pool).await.unwrap(), 10);
    }

    #[tokio::test]
    async fn test_reseed_replaces_existing_rows() {
        let pool = create_memory_pool().await.unwrap();
        insert_books(&pool, &sample_catalog()).await.unwrap();

        let books = vec![NewBook::new("Solo", "Autor", "Misterio", 4.0)];
        let inserted = reseed(&pool, &books).await.unwrap();

        assert_eq!(inserted, 1);
        assert_eq!(count_books(&pool).await.unwrap(), 1);
        let id: i64 = sqlx::query_scalar("SELECT id FROM books WHERE title = 'Solo'")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(id, 1);
    }

    #[tokio::test]
    async fn test_failed_reseed_keeps_previous_catalog() {
        let pool = create_memory_pool().await.unwrap();
        insert_books(&pool, &sample_catalog()).await.unwrap();

        let books = vec![
            NewBook::new("Nueva", "Autor", "Misterio", 4.0),
            NewBook::new("Rota", "Autor", "Misterio", f64::NAN),
        ];
        assert!(reseed(&pool, &books).await.is_err());

        assert_eq!(count_books(&pool).await.unwrap(), 10);
        let first: String = sqlx::query_scalar("SELECT title FROM books WHERE id = 1")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(first, "Dune");
    }

    #[test]
    fn test_sample_catalog_ratings_in_range() {
        let books = sample_catalog();
        assert_eq!(books.len(), 10);
        assert!(books.iter().all(|b| (0.0..=5.0).contains(&b.rating)));
    }
}
