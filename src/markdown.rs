//! Renders the constrained markdown dialect used by blog articles into
//! HTML. The dialect covers headings, emphasis, links, one-line
//! blockquotes, and flat unordered lists; everything else passes
//! through as literal text. Rendering is a single forward pass over
//! input lines driven by a small state machine ([`State`]), producing
//! an ordered sequence of HTML fragments joined by blank lines.
//!
//! Inline spans are ordered, non-greedy pattern substitutions: bold
//! before italic, links last. With both `**` and stray `*` on one line
//! the pairing can surprise; that ordering is long-standing behavior
//! and is pinned by the tests below.

use std::sync::LazyLock;

use deunicode::deunicode;
use regex::Regex;

static BOLD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").unwrap());
static ITALIC: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*(.+?)\*").unwrap());
static LINK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").unwrap());

/// Fragments starting with one of these are already block-level HTML
/// and must not be wrapped in `<p>`.
const BLOCK_OPENERS: [&str; 6] = ["<h2", "<h3", "<ul", "<ol", "<blockquote", "<aside"];

/// Raw lines starting with one of these close the current block and
/// pass through as their own fragment.
const FLUSH_PREFIXES: [&str; 5] = ["<h", "<ul", "<ol", "<blockquote", "</"];

/// Converts an article body to HTML. Empty input yields empty output.
pub fn to_html(markdown: &str) -> String {
    let mut renderer = Renderer::new();
    for line in markdown.lines() {
        renderer.on_line(line);
    }
    renderer.finish()
}

/// Derives the anchor id for an `h2` heading: diacritics stripped,
/// characters outside `[A-Za-z0-9 ]` dropped, lowercased, spaces
/// hyphenated. The visible heading text keeps its accents and casing.
pub fn anchor_id(text: &str) -> String {
    deunicode(text)
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == ' ')
        .map(|c| c.to_ascii_lowercase())
        .collect::<String>()
        .replace(' ', "-")
}

/// Applies the inline span substitutions to a single line.
fn inline(text: &str) -> String {
    let text = BOLD.replace_all(text, "<strong>${1}</strong>");
    let text = ITALIC.replace_all(&text, "<em>${1}</em>");
    LINK.replace_all(
        &text,
        r#"<a href="${2}" target="_blank" rel="noopener">${1}</a>"#,
    )
    .into_owned()
}

#[derive(Copy, Clone, PartialEq)]
enum State {
    Idle,
    Paragraph,
    List,
}

/// Accumulates fragments line by line. Paragraph lines buffer until a
/// boundary; list items buffer until the list closes.
struct Renderer {
    state: State,
    fragments: Vec<String>,
    paragraph: Vec<String>,
    items: Vec<String>,
}

impl Renderer {
    fn new() -> Self {
        Renderer {
            state: State::Idle,
            fragments: Vec::new(),
            paragraph: Vec::new(),
            items: Vec::new(),
        }
    }

    fn on_line(&mut self, line: &str) {
        // The post title renders through the template, not the body.
        // Dropping the line must not flush: its neighbors still join
        // into one paragraph.
        if let Some(rest) = line.strip_prefix("# ") {
            if !rest.is_empty() {
                return;
            }
        }

        if let Some(rest) = line.strip_prefix("## ") {
            if !rest.is_empty() {
                self.flush();
                self.fragments.push(format!(
                    r#"<h2 id="{}">{}</h2>"#,
                    anchor_id(rest),
                    inline(rest)
                ));
                return;
            }
        }

        if let Some(rest) = line.strip_prefix("### ") {
            if !rest.is_empty() {
                self.flush();
                self.fragments.push(format!("<h3>{}</h3>", inline(rest)));
                return;
            }
        }

        // One blockquote per line; consecutive quote lines do not
        // merge.
        if let Some(rest) = line.strip_prefix("> ") {
            if !rest.is_empty() {
                self.flush();
                self.fragments
                    .push(format!("<blockquote>{}</blockquote>", inline(rest)));
                return;
            }
        }

        let trimmed = line.trim();

        if let Some(rest) = trimmed.strip_prefix("- ") {
            if self.state != State::List {
                self.flush();
                self.state = State::List;
            }
            self.items.push(format!("<li>{}</li>", inline(rest)));
            return;
        }

        if trimmed.is_empty() {
            self.flush();
            return;
        }

        if FLUSH_PREFIXES
            .iter()
            .any(|prefix| trimmed.starts_with(prefix))
        {
            self.flush();
            self.fragments.push(inline(trimmed));
            return;
        }

        if self.state != State::Paragraph {
            self.flush();
            self.state = State::Paragraph;
        }
        self.paragraph.push(inline(trimmed));
    }

    /// Closes the open block, if any, and returns to [`State::Idle`].
    fn flush(&mut self) {
        match self.state {
            State::Paragraph => {
                if !self.paragraph.is_empty() {
                    let text = self.paragraph.join(" ");
                    self.fragments.push(wrap_paragraph(text));
                    self.paragraph.clear();
                }
            }
            State::List => {
                self.fragments
                    .push(format!("<ul>{}</ul>", self.items.join("")));
                self.items.clear();
            }
            State::Idle => {}
        }
        self.state = State::Idle;
    }

    fn finish(mut self) -> String {
        self.flush();
        self.fragments.join("\n\n")
    }
}

fn wrap_paragraph(text: String) -> String {
    if BLOCK_OPENERS.iter().any(|tag| text.starts_with(tag)) {
        text
    } else {
        format!("<p>{}</p>", text)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert_eq!(to_html(""), "");
    }

    #[test]
    fn test_single_paragraph_joins_lines() {
        assert_eq!(
            to_html("une ligne\nune autre ligne"),
            "<p>une ligne une autre ligne</p>"
        );
    }

    #[test]
    fn test_title_line_is_dropped() {
        let html = to_html("# Ignored\n\nHello **world**.");
        assert_eq!(html, "<p>Hello <strong>world</strong>.</p>");
        assert!(!html.contains("Ignored"));
    }

    #[test]
    fn test_title_line_does_not_split_a_paragraph() {
        assert_eq!(to_html("avant\n# Titre\naprès"), "<p>avant après</p>");
    }

    #[test]
    fn test_h2_gets_ascii_anchor() {
        assert_eq!(to_html("## Café"), r#"<h2 id="cafe">Café</h2>"#);
        assert_eq!(
            to_html("## Les Quartiers de New York"),
            r#"<h2 id="les-quartiers-de-new-york">Les Quartiers de New York</h2>"#
        );
    }

    #[test]
    fn test_anchor_id_drops_punctuation() {
        assert_eq!(anchor_id("Où ça ?"), "ou-ca-");
        assert_eq!(anchor_id("Déjà-vu"), "dejavu");
    }

    #[test]
    fn test_h3_has_no_anchor() {
        assert_eq!(to_html("### Détails"), "<h3>Détails</h3>");
    }

    #[test]
    fn test_heading_flushes_running_paragraph() {
        assert_eq!(
            to_html("intro\n## Suite"),
            "<p>intro</p>\n\n<h2 id=\"suite\">Suite</h2>"
        );
    }

    #[test]
    fn test_bold_then_italic() {
        assert_eq!(
            to_html("du **gras** et de l'*italique*"),
            "<p>du <strong>gras</strong> et de l'<em>italique</em></p>"
        );
    }

    #[test]
    fn test_unclosed_bold_stays_literal() {
        assert_eq!(
            to_html("an **unclosed marker"),
            "<p>an **unclosed marker</p>"
        );
    }

    #[test]
    fn test_links_open_in_new_tab() {
        assert_eq!(
            to_html("voir [la carte](https://example.com/map)"),
            r#"<p>voir <a href="https://example.com/map" target="_blank" rel="noopener">la carte</a></p>"#
        );
    }

    #[test]
    fn test_blockquotes_do_not_merge() {
        assert_eq!(
            to_html("> premier\n> second"),
            "<blockquote>premier</blockquote>\n\n<blockquote>second</blockquote>"
        );
    }

    #[test]
    fn test_list_closes_before_next_paragraph() {
        assert_eq!(
            to_html("- A\n- B\n\nensuite"),
            "<ul><li>A</li><li>B</li></ul>\n\n<p>ensuite</p>"
        );
    }

    #[test]
    fn test_list_closes_at_end_of_input() {
        assert_eq!(
            to_html("texte\n\n- seul"),
            "<p>texte</p>\n\n<ul><li>seul</li></ul>"
        );
    }

    #[test]
    fn test_indented_items_join_the_list() {
        assert_eq!(to_html("- un\n  - deux"), "<ul><li>un</li><li>deux</li></ul>");
    }

    #[test]
    fn test_list_items_take_inline_formatting() {
        assert_eq!(
            to_html("- du **gras**"),
            "<ul><li>du <strong>gras</strong></li></ul>"
        );
    }

    #[test]
    fn test_raw_aside_is_not_wrapped() {
        assert_eq!(to_html("<aside>une note</aside>"), "<aside>une note</aside>");
    }

    #[test]
    fn test_raw_block_tag_flushes_paragraph() {
        assert_eq!(
            to_html("texte\n<blockquote>cité</blockquote>"),
            "<p>texte</p>\n\n<blockquote>cité</blockquote>"
        );
    }

    #[test]
    fn test_full_article() {
        let article = "# Titre\n\n## Première partie\n\nBonjour **New York**, ville *lumineuse*.\nSuite de la phrase.\n\n- un point\n- deux points\n\n> une citation\n\nVoir [ici](https://example.com).";
        let html = to_html(article);
        assert_eq!(
            html,
            "<h2 id=\"premiere-partie\">Première partie</h2>\n\n<p>Bonjour <strong>New York</strong>, ville <em>lumineuse</em>. Suite de la phrase.</p>\n\n<ul><li>un point</li><li>deux points</li></ul>\n\n<blockquote>une citation</blockquote>\n\n<p>Voir <a href=\"https://example.com\" target=\"_blank\" rel=\"noopener\">ici</a>.</p>"
        );
    }
}
