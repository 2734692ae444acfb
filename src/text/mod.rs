//! Text extraction and tokenization
//!
//! Turns raw page markup into the weighted token stream consumed by the
//! inverted index, plus display metadata (title, snippet).

mod extract;
mod tokenize;

pub use extract::{build_snippet, decode_entities, extract_text, extract_title};
pub use extract::{MAX_SNIPPET_LEN, MAX_TITLE_LEN};
pub use tokenize::tokenize;
