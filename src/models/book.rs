/// A catalog entry as stored in the `books` table
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub genre: String,
    pub description: Option<String>,
    /// Average rating on a 0-5 scale
    pub rating: f64,
    /// Number of ratings behind `rating`, when known
    pub rating_count: Option<i64>,
}

/// A book prior to insertion; the store assigns the id
#[derive(Debug, Clone, PartialEq)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub genre: String,
    pub description: Option<String>,
    pub rating: f64,
    pub rating_count: Option<i64>,
}

impl NewBook {
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        genre: impl Into<String>,
        rating: f64,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            genre: genre.into(),
            description: None,
            rating,
            rating_count: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_rating_count(mut self, rating_count: i64) -> Self {
        self.rating_count = Some(rating_count);
        self
    }
}
