use std::ops::RangeInclusive;

/// Accepted range for a minimum rating
pub const MIN_RATING_RANGE: RangeInclusive<f64> = 0.0..=5.0;

/// Accepted range for a result limit
pub const LIMIT_RANGE: RangeInclusive<u32> = 1..=50;

/// Values applied when a recommendation request omits a field
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecommendationDefaults {
    /// Minimum rating, within [`MIN_RATING_RANGE`]
    pub min_rating: f64,
    /// Result limit, within [`LIMIT_RANGE`]
    pub limit: u32,
}

impl Default for RecommendationDefaults {
    fn default() -> Self {
        Self {
            min_rating: 4.0,
            limit: 5,
        }
    }
}

/// Validated parameters for the filter recommender
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationQuery {
    /// Case-insensitive substring matched against the stored genre
    pub genre: Option<String>,
    pub min_rating: f64,
    pub limit: u32,
}

impl Default for RecommendationQuery {
    fn default() -> Self {
        let defaults = RecommendationDefaults::default();
        Self {
            genre: None,
            min_rating: defaults.min_rating,
            limit: defaults.limit,
        }
    }
}

impl RecommendationQuery {
    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = Some(genre.into());
        self
    }

    pub fn with_min_rating(mut self, min_rating: f64) -> Self {
        self.min_rating = min_rating;
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }
}

/// Filter handed to the catalog store
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogFilter {
    pub genre: Option<String>,
    pub min_rating: Option<f64>,
    pub limit: u32,
}

impl CatalogFilter {
    /// Highest rated books with no other constraint
    pub fn top(limit: u32) -> Self {
        Self {
            genre: None,
            min_rating: None,
            limit,
        }
    }
}

impl From<&RecommendationQuery> for CatalogFilter {
    fn from(query: &RecommendationQuery) -> Self {
        Self {
            genre: query.genre.clone(),
            min_rating: Some(query.min_rating),
            limit: query.limit,
        }
    }
}
