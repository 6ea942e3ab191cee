//! Loads the external page template and substitutes its placeholder
//! tokens. The template file is owned by the site theme; this module
//! only promises literal find-and-replace of the eight known tokens.
//! Tokens absent from the template are ignored, and every occurrence
//! of a present token is replaced.

use std::fmt;
use std::fs::File;
use std::io;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::post::Post;

/// A loaded template document.
#[derive(Debug)]
pub struct Template {
    contents: String,
}

impl Template {
    /// Reads the template file. The error keeps the path so the
    /// message names the file that was expected.
    pub fn load(path: &Path) -> Result<Template> {
        let mut contents = String::new();
        File::open(path)
            .map_err(|err| Error::Open {
                path: path.to_owned(),
                err,
            })?
            .read_to_string(&mut contents)?;
        Ok(Template { contents })
    }

    /// Renders a [`Post`] into the template.
    pub fn render(&self, post: &Post) -> String {
        self.contents
            .replace("{{TITLE}}", &post.title)
            .replace("{{DESCRIPTION}}", &post.description)
            .replace("{{SLUG}}", &post.slug)
            .replace("{{DATE}}", &post.date)
            .replace("{{DATE_FORMATTED}}", &post.date_formatted)
            .replace("{{CATEGORY}}", &post.category)
            .replace("{{KEYWORD}}", &post.keyword)
            .replace("{{CONTENT}}", &post.body)
    }
}

/// The result of a fallible template operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error loading a template.
#[derive(Debug)]
pub enum Error {
    /// Returned when the template file cannot be opened.
    Open { path: PathBuf, err: io::Error },

    /// Returned for other I/O errors.
    Io(io::Error),
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Open { path, err } => {
                write!(f, "Opening template file '{}': {}", path.display(), err)
            }
            Error::Io(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Open { path: _, err } => Some(err),
            Error::Io(err) => Some(err),
        }
    }
}

impl From<io::Error> for Error {
    /// Converts an [`io::Error`] into an [`Error`]. This allows us to
    /// use the `?` operator for fallible I/O operations.
    fn from(err: io::Error) -> Error {
        Error::Io(err)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::post::{Payload, Post};
    use std::io::Write;

    fn sample_post() -> Post {
        Post::from_payload(&Payload {
            frontmatter: "title: Essai\nslug: essai\ndate: 2026-03-01\ndescription: Un essai"
                .to_owned(),
            article: "Texte.".to_owned(),
            keyword: None,
        })
    }

    #[test]
    fn test_render_substitutes_all_tokens() {
        let template = Template {
            contents: "<title>{{TITLE}} — {{CATEGORY}}</title>\n\
                       <meta name=\"description\" content=\"{{DESCRIPTION}}\">\n\
                       <link rel=\"canonical\" href=\"/blog/{{SLUG}}/\">\n\
                       <time datetime=\"{{DATE}}\">{{DATE_FORMATTED}}</time>\n\
                       <main data-keyword=\"{{KEYWORD}}\">{{CONTENT}}</main>"
                .to_owned(),
        };
        let html = template.render(&sample_post());
        assert!(html.contains("<title>Essai — Général</title>"));
        assert!(html.contains("content=\"Un essai\""));
        assert!(html.contains("href=\"/blog/essai/\""));
        assert!(html.contains("<time datetime=\"2026-03-01\">1 mars 2026</time>"));
        assert!(html.contains("data-keyword=\"Essai\""));
        assert!(html.contains("<main data-keyword=\"Essai\"><p>Texte.</p></main>"));
    }

    #[test]
    fn test_repeated_tokens_are_all_replaced() {
        let template = Template {
            contents: "{{TITLE}} / {{TITLE}}".to_owned(),
        };
        assert_eq!(template.render(&sample_post()), "Essai / Essai");
    }

    #[test]
    fn test_unknown_tokens_are_left_alone() {
        let template = Template {
            contents: "{{TITLE}} {{MYSTERY}}".to_owned(),
        };
        assert_eq!(template.render(&sample_post()), "Essai {{MYSTERY}}");
    }

    #[test]
    fn test_load_keeps_the_path_in_the_error() {
        let err = Template::load(Path::new("/nonexistent/_template.html")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/_template.html"));
    }

    #[test]
    fn test_load_reads_the_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "<h1>{{{{TITLE}}}}</h1>").unwrap();
        let template = Template::load(file.path()).unwrap();
        assert_eq!(template.render(&sample_post()), "<h1>Essai</h1>");
    }
}
