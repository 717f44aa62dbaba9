// Body classification for req2postman
//
// Maps a Content-Type value onto the body language hint Postman shows in its editor.
// The hint never changes the body itself.

use crate::models::Language;

/// Content-Type assumed when a request has none
pub const DEFAULT_CONTENT_TYPE: &str = "text/plain";

/// Checked in order, first substring hit wins
const LANGUAGE_MARKERS: [(&str, Language); 4] = [
    ("json", Language::Json),
    ("xml", Language::Xml),
    ("javascript", Language::Javascript),
    ("html", Language::Html),
];

/// Classify a Content-Type value; `None` is treated as `text/plain`
pub fn classify_body(content_type: Option<&str>) -> Language {
    let content_type = content_type.unwrap_or(DEFAULT_CONTENT_TYPE);
    LANGUAGE_MARKERS
        .iter()
        .find(|(marker, _)| content_type.contains(marker))
        .map(|(_, language)| *language)
        .unwrap_or(Language::Text)
}
