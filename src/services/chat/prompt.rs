use crate::models::{Book, ChatTurn};

/// Fixed instruction block sent with every chat request
pub const SYSTEM_PROMPT: &str = "Eres un asistente que recomienda libros basándote en un catálogo \
predefinido. Solo puedes recomendar libros que estén en la lista que te proporciono.\n\n\
DEBES responder en castellano.\n\n\
Tu salida SIEMPRE debe ser un JSON con la siguiente estructura:\n\
{\n  \"answer\": \"<texto que le dirías al usuario>\",\n  \"book_ids\": [1, 5, 7]\n}\n\
Donde book_ids es una lista de IDs de los libros recomendados. \
Si no puedes recomendar nada, usa una lista vacía.\n\
No añadas texto fuera del JSON, ni explicaciones adicionales.";

/// One catalog line per candidate, keyed by id
///
/// Ratings always carry a decimal point (`4.0`, not `4`).
pub fn describe_book(book: &Book) -> String {
    format!(
        "ID {}: '{}' de {} ({}, rating={:?}). Descripción: {}",
        book.id,
        book.title,
        book.author,
        book.genre,
        book.rating,
        book.description.as_deref().unwrap_or("sin descripción")
    )
}

/// Renders the transcript as `Usuario:` / `Asistente:` lines
pub fn render_history(history: &[ChatTurn]) -> String {
    history
        .iter()
        .map(|turn| format!("{}: {}", turn.role, turn.content))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Builds the user content block: transcript followed by the candidate catalog
pub fn build_user_prompt(history: &[ChatTurn], candidates: &[Book]) -> String {
    let catalog = candidates
        .iter()
        .map(describe_book)
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Historial de la conversación:\n{}\n\nCatálogo de libros disponibles (con IDs):\n{}",
        render_history(history),
        catalog
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dune() -> Book {
        Book {
            id: 1,
            title: "Dune".to_string(),
            author: "Frank Herbert".to_string(),
            genre: "Ciencia ficción".to_string(),
            description: Some("Arrakis.".to_string()),
            rating: 4.6,
            rating_count: Some(120_000),
        }
    }

    #[test]
    fn test_describe_book() {
        assert_eq!(
            describe_book(&dune()),
            "ID 1: 'Dune' de Frank Herbert (Ciencia ficción, rating=4.6). Descripción: Arrakis."
        );
    }

    #[test]
    fn test_describe_book_keeps_decimal_point() {
        let whole = Book {
            rating: 4.0,
            ..dune()
        };
        assert!(describe_book(&whole).contains("(Ciencia ficción, rating=4.0)."));

        let precise = Book {
            rating: 4.25,
            ..dune()
        };
        assert!(describe_book(&precise).contains("rating=4.25)"));
    }

    #[test]
    fn test_describe_book_without_description() {
        let book = Book {
            description: None,
            ..dune()
        };
        assert!(describe_book(&book).ends_with("Descripción: sin descripción"));
    }

    #[test]
    fn test_render_history_labels_roles() {
        let history = vec![
            ChatTurn::user("Hola"),
            ChatTurn::assistant("¿Qué te gusta leer?"),
            ChatTurn::user("Ciencia ficción"),
        ];
        assert_eq!(
            render_history(&history),
            "Usuario: Hola\nAsistente: ¿Qué te gusta leer?\nUsuario: Ciencia ficción"
        );
    }

    #[test]
    fn test_user_prompt_layout() {
        let prompt = build_user_prompt(&[ChatTurn::user("Algo épico")], &[dune()]);
        assert_eq!(
            prompt,
            "Historial de la conversación:\nUsuario: Algo épico\n\n\
             Catálogo de libros disponibles (con IDs):\n\
             ID 1: 'Dune' de Frank Herbert (Ciencia ficción, rating=4.6). Descripción: Arrakis."
        );
    }

    #[test]
    fn test_system_prompt_demands_json_contract() {
        assert!(SYSTEM_PROMPT.contains("\"answer\""));
        assert!(SYSTEM_PROMPT.contains("\"book_ids\""));
        assert!(SYSTEM_PROMPT.contains("castellano"));
        assert!(SYSTEM_PROMPT.contains("No añadas texto fuera del JSON"));
    }
}
