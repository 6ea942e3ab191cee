//! Compiles the per-chapter manuscript drafts into one reviewable
//! document. Chapters come from an ordered, configured list; each
//! draft is appended verbatim with rule separators, and the document
//! closes with aggregate word-count statistics. A missing draft is
//! reported, not fatal, so the manuscript can be compiled while
//! chapters are still being written.

use std::fmt;
use std::fs;
use std::io;
use std::path::PathBuf;

use chrono::Local;
use serde::Deserialize;

use crate::config::ManuscriptConfig;

/// Name of the draft file inside each chapter's directory.
pub const CHAPTER_FILE: &str = "CHAPTER_DRAFT.md";

/// Words per page used for the page estimate.
const WORDS_PER_PAGE: usize = 250;

/// One chapter of the manuscript.
#[derive(Deserialize, Clone, Debug)]
pub struct Chapter {
    /// Directory under the chapters root holding the draft.
    pub directory: String,

    /// Label used in reporting, e.g. `Chapitre 4`.
    pub label: String,
}

/// The built-in chapter list, used when the project file doesn't
/// override it.
pub fn default_chapters() -> Vec<Chapter> {
    const CHAPTERS: [(&str, &str); 13] = [
        ("00_prologue", "Prologue"),
        ("01_arrivee", "Chapitre 1"),
        ("02_premiers_pas", "Chapitre 2"),
        ("03_sens", "Chapitre 3"),
        ("04_faim", "Chapitre 4"),
        ("05_quartiers", "Chapitre 5"),
        ("06_monuments", "Chapitre 6"),
        ("07_se_perdre", "Chapitre 7"),
        ("08_nuit", "Chapitre 8"),
        ("09_rencontres", "Chapitre 9"),
        ("10_devenir", "Chapitre 10"),
        ("11_secrets", "Chapitre 11"),
        ("12_apres", "Chapitre 12"),
    ];

    CHAPTERS
        .iter()
        .map(|(directory, label)| Chapter {
            directory: (*directory).to_owned(),
            label: (*label).to_owned(),
        })
        .collect()
}

/// Word count for one included chapter.
pub struct ChapterStat {
    pub label: String,
    pub words: usize,
}

/// A chapter whose draft file was absent: its label and the path that
/// was tried.
pub type Missing = (String, PathBuf);

/// The outcome of a compilation, for reporting.
pub struct Compiled {
    pub output_path: PathBuf,
    pub included: Vec<ChapterStat>,
    pub missing: Vec<Missing>,
    pub total_words: usize,
}

impl Compiled {
    pub fn estimated_pages(&self) -> usize {
        self.total_words / WORDS_PER_PAGE
    }
}

/// Concatenates all chapter drafts into the output document and
/// returns the statistics.
pub fn compile(config: &ManuscriptConfig) -> Result<Compiled> {
    let mut lines: Vec<String> = Vec::new();

    // Title page.
    lines.push(format!("# {}", config.title));
    lines.push(String::new());
    if let Some(author) = &config.author {
        lines.push(format!("**{}**", author));
        lines.push(String::new());
    }
    lines.push("---".to_owned());
    lines.push(String::new());
    lines.push(format!(
        "*First Draft - Compiled {}*",
        Local::now().format("%B %d, %Y")
    ));
    lines.push(String::new());
    lines.push("---".to_owned());
    lines.push(String::new());
    lines.push(String::new());

    let mut included = Vec::new();
    let mut missing = Vec::new();
    let mut total_words = 0;

    for chapter in &config.chapters {
        let path = config
            .chapters_directory
            .join(&chapter.directory)
            .join(CHAPTER_FILE);
        if !path.is_file() {
            missing.push((chapter.label.clone(), path));
            continue;
        }

        let content = fs::read_to_string(&path).map_err(|err| Error::Read {
            path: path.clone(),
            err,
        })?;

        // Whitespace-split is a rough count, but consistent across
        // drafts.
        let words = content.split_whitespace().count();
        total_words += words;
        included.push(ChapterStat {
            label: chapter.label.clone(),
            words,
        });

        lines.push(content);
        lines.push(String::new());
        lines.push(String::new());
        lines.push("---".to_owned());
        lines.push(String::new());
        lines.push(String::new());
    }

    lines.push(String::new());
    lines.push("---".to_owned());
    lines.push(String::new());
    lines.push("## Manuscript Statistics".to_owned());
    lines.push(String::new());
    lines.push(format!("- **Total Chapters:** {}", included.len()));
    lines.push(format!(
        "- **Total Words:** ~{}",
        group_thousands(total_words)
    ));
    lines.push(format!(
        "- **Estimated Pages:** ~{}",
        total_words / WORDS_PER_PAGE
    ));
    lines.push(String::new());
    lines.push("---".to_owned());
    lines.push(String::new());
    lines.push("*Fin*".to_owned());

    fs::write(&config.output_file, lines.join("\n")).map_err(|err| Error::Write {
        path: config.output_file.clone(),
        err,
    })?;

    Ok(Compiled {
        output_path: config.output_file.clone(),
        included,
        missing,
        total_words,
    })
}

/// Formats a count with `,` thousands separators, e.g. `12,345`.
pub fn group_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

/// The result of a fallible compilation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error compiling the manuscript.
#[derive(Debug)]
pub enum Error {
    /// Returned when a chapter draft exists but cannot be read.
    Read { path: PathBuf, err: io::Error },

    /// Returned when the output document cannot be written.
    Write { path: PathBuf, err: io::Error },
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Read { path, err } => {
                write!(f, "Reading chapter draft '{}': {}", path.display(), err)
            }
            Error::Write { path, err } => {
                write!(f, "Writing manuscript '{}': {}", path.display(), err)
            }
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Read { path: _, err } => Some(err),
            Error::Write { path: _, err } => Some(err),
        }
    }
}
