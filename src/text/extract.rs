//! Tolerant text extraction from raw page markup
//!
//! Extraction is regex-driven rather than DOM-driven on purpose: real pages
//! frequently carry unterminated blocks, and a best-effort pass that leaves a
//! malformed tag in place degrades to slightly noisier text instead of
//! failing the page. The output is "weighted text": headings appear twice and
//! the title three times, so those tokens get proportionally more
//! representation in the inverted index without a separate weight field.

use regex::Regex;
use std::sync::OnceLock;

/// Maximum title length stored in page metadata.
pub const MAX_TITLE_LEN: usize = 100;

/// Maximum snippet length stored in page metadata.
pub const MAX_SNIPPET_LEN: usize = 200;

struct Patterns {
    strip_blocks: Vec<Regex>,
    title: Regex,
    body: Regex,
    boilerplate: Vec<Regex>,
    headings: Vec<Regex>,
    sections: Vec<Regex>,
    paragraph: Regex,
    list_item: Regex,
    tag: Regex,
    whitespace: Regex,
    numeric_entity: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        let block = |tag: &str| {
            Regex::new(&format!(r"(?is)<{tag}[^>]*>.*?</{tag}>")).expect("valid block pattern")
        };
        Patterns {
            strip_blocks: ["script", "style", "noscript", "svg"]
                .iter()
                .map(|t| block(t))
                .collect(),
            title: Regex::new(r"(?is)<title[^>]*>(.*?)</title>").expect("valid title pattern"),
            body: Regex::new(r"(?is)<body[^>]*>(.*?)</body>").expect("valid body pattern"),
            boilerplate: ["nav", "header", "footer", "aside"]
                .iter()
                .map(|t| block(t))
                .collect(),
            headings: (1..=6)
                .map(|level| {
                    Regex::new(&format!(r"(?is)<h{level}[^>]*>(.*?)</h{level}>"))
                        .expect("valid heading pattern")
                })
                .collect(),
            sections: ["main", "article", "section"]
                .iter()
                .map(|tag| {
                    Regex::new(&format!(r"(?is)<{tag}[^>]*>(.*?)</{tag}>"))
                        .expect("valid section pattern")
                })
                .collect(),
            paragraph: Regex::new(r"(?is)<p[^>]*>(.*?)</p>").expect("valid paragraph pattern"),
            list_item: Regex::new(r"(?is)<li[^>]*>(.*?)</li>").expect("valid list pattern"),
            tag: Regex::new(r"<[^>]+>").expect("valid tag pattern"),
            whitespace: Regex::new(r"\s+").expect("valid whitespace pattern"),
            numeric_entity: Regex::new(r"&#(x[0-9a-fA-F]+|[0-9]+);").expect("valid entity pattern"),
        }
    })
}

/// Decodes numeric character references and the common named HTML entities.
pub fn decode_entities(text: &str) -> String {
    let p = patterns();
    let decoded = p.numeric_entity.replace_all(text, |caps: &regex::Captures| {
        let body = &caps[1];
        let code = if let Some(hex) = body.strip_prefix('x') {
            u32::from_str_radix(hex, 16).ok()
        } else {
            body.parse::<u32>().ok()
        };
        match code.and_then(char::from_u32) {
            Some(c) => c.to_string(),
            None => caps[0].to_string(),
        }
    });
    decoded
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

fn collapse_whitespace(text: &str) -> String {
    patterns().whitespace.replace_all(text, " ").trim().to_string()
}

fn strip_tags(text: &str, replacement: &str) -> String {
    patterns().tag.replace_all(text, replacement).to_string()
}

fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

/// Extracts the page title: first `<title>` element, inner tags stripped,
/// entities decoded, whitespace collapsed, truncated to 100 characters.
pub fn extract_title(markup: &str) -> Option<String> {
    let raw = raw_title(markup)?;
    if raw.is_empty() {
        return None;
    }
    Some(truncate_chars(&raw, MAX_TITLE_LEN))
}

fn raw_title(markup: &str) -> Option<String> {
    patterns()
        .title
        .captures(markup)
        .map(|caps| collapse_whitespace(&decode_entities(&strip_tags(&caps[1], ""))))
}

/// Extracts weighted text from raw markup.
///
/// Script/style/noscript/svg blocks are removed (best effort: an unclosed
/// block is left in place), body content is restricted to `<body>` when
/// present, boilerplate nav/header/footer/aside blocks are dropped, headings
/// are emitted twice, and the title is prepended three times. When no
/// semantic element matches, all tags are stripped from the body and the
/// remaining text is used verbatim.
pub fn extract_text(markup: &str) -> String {
    if markup.is_empty() {
        return String::new();
    }

    let p = patterns();

    let mut cleaned = markup.to_string();
    for pattern in &p.strip_blocks {
        cleaned = pattern.replace_all(&cleaned, "").to_string();
    }

    let title = raw_title(&cleaned).unwrap_or_default();

    let mut body = match p.body.captures(&cleaned) {
        Some(caps) => caps[1].to_string(),
        None => cleaned.clone(),
    };
    for pattern in &p.boilerplate {
        body = pattern.replace_all(&body, "").to_string();
    }

    let mut parts: Vec<String> = Vec::new();

    // Headings are emitted twice for extra weight.
    for heading in &p.headings {
        for caps in heading.captures_iter(&body) {
            let text = decode_entities(strip_tags(&caps[1], "").trim());
            if !text.is_empty() {
                parts.push(text.clone());
                parts.push(text);
            }
        }
    }

    for section in &p.sections {
        for caps in section.captures_iter(&body) {
            let text = decode_entities(strip_tags(&caps[1], " ").trim());
            if !text.is_empty() {
                parts.push(text);
            }
        }
    }

    for caps in p.paragraph.captures_iter(&body) {
        let text = decode_entities(strip_tags(&caps[1], " ").trim());
        if !text.is_empty() {
            parts.push(text);
        }
    }

    for caps in p.list_item.captures_iter(&body) {
        let text = decode_entities(strip_tags(&caps[1], " ").trim());
        if !text.is_empty() {
            parts.push(text);
        }
    }

    if parts.is_empty() {
        let fallback = decode_entities(strip_tags(&body, " ").trim());
        if !fallback.is_empty() {
            parts.push(fallback);
        }
    }

    let body_text = collapse_whitespace(&parts.join(" "));

    if title.is_empty() {
        body_text
    } else {
        collapse_whitespace(&format!("{title} {title} {title} {body_text}"))
    }
}

/// Builds a display snippet from extracted text: the first stretch of text,
/// whitespace-normalized and truncated at a word boundary to at most 200
/// characters, with a trailing ellipsis when cut.
pub fn build_snippet(text: &str) -> String {
    let head: String = text.chars().take(300).collect();
    let snippet = collapse_whitespace(&head);
    if snippet.chars().count() <= MAX_SNIPPET_LEN {
        return snippet;
    }
    let cut = truncate_chars(&snippet, MAX_SNIPPET_LEN);
    match cut.rsplit_once(' ') {
        Some((left, _)) => format!("{left}..."),
        None => format!("{cut}..."),
    }
}
