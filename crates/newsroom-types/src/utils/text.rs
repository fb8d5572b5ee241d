use std::sync::OnceLock;

use regex::Regex;

pub const MAX_SLUG_LEN: usize = 200;

/// Derives a URL safe identifier from free text.
///
/// Lowercases and trims the input, collapses every maximal run of characters
/// outside `[a-z0-9]` into a single `-`, strips leading and trailing hyphens
/// and truncates the result to [MAX_SLUG_LEN]. Idempotent on its own output.
pub fn slugify(input: &str) -> String {
    let lower = input.to_lowercase();
    let mut slug = String::with_capacity(lower.len());
    let mut gap = false;
    for c in lower.trim().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if gap && !slug.is_empty() {
                slug.push('-');
            }
            gap = false;
            slug.push(c);
        } else {
            gap = true;
        }
    }
    slug.truncate(MAX_SLUG_LEN);
    if slug.ends_with('-') {
        slug.pop();
    }
    slug
}

static SCRIPT_BLOCK: OnceLock<Regex> = OnceLock::new();
static STYLE_BLOCK: OnceLock<Regex> = OnceLock::new();
static HTML_COMMENT: OnceLock<Regex> = OnceLock::new();
static HTML_TAG: OnceLock<Regex> = OnceLock::new();
static ACTIVE_SCHEME: OnceLock<Regex> = OnceLock::new();
static EVENT_HANDLER: OnceLock<Regex> = OnceLock::new();

fn script_block() -> &'static Regex {
    SCRIPT_BLOCK.get_or_init(|| Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>").unwrap())
}

fn style_block() -> &'static Regex {
    STYLE_BLOCK.get_or_init(|| Regex::new(r"(?is)<style\b[^>]*>.*?</style\s*>").unwrap())
}

fn html_comment() -> &'static Regex {
    HTML_COMMENT.get_or_init(|| Regex::new(r"(?s)<!--.*?-->").unwrap())
}

fn html_tag() -> &'static Regex {
    HTML_TAG.get_or_init(|| Regex::new(r"(?s)</?[a-zA-Z][^>]*>").unwrap())
}

fn active_scheme() -> &'static Regex {
    ACTIVE_SCHEME.get_or_init(|| Regex::new(r"(?i)(javascript|vbscript):|data:text/html").unwrap())
}

fn event_handler() -> &'static Regex {
    EVENT_HANDLER.get_or_init(|| Regex::new(r"(?i)\bon[a-z]+\s*=").unwrap())
}

/// Strips executable and markup content from user supplied free text.
///
/// Script and style elements are removed together with their bodies, any
/// remaining tags and comments are dropped, and scriptable URI schemes and
/// inline event handlers are neutralized. Plain text passes through
/// unchanged apart from surrounding whitespace.
pub fn sanitize(input: &str) -> String {
    let text = script_block().replace_all(input, "");
    let text = style_block().replace_all(&text, "");
    let text = html_comment().replace_all(&text, "");
    let text = html_tag().replace_all(&text, "");
    let text = active_scheme().replace_all(&text, "");
    let text = event_handler().replace_all(&text, "");
    text.trim().to_string()
}
