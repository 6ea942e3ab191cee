//! Project configuration. A `billet.json` file marks the project root
//! and may override any path or the manuscript chapter list; it is
//! searched for in the working directory and its parents, so the tool
//! can be invoked from anywhere inside the project. Without one, the
//! built-in layout resolves against the invocation directory.

use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;

use crate::manuscript::{default_chapters, Chapter};

pub const CONFIG_FILE: &str = "billet.json";

/// The raw on-disk shape of `billet.json`. Everything is optional;
/// [`Config`] fills in defaults and resolves relative paths against
/// the project root.
#[derive(Deserialize, Default)]
#[serde(default)]
struct Project {
    blog_directory: Option<PathBuf>,
    template_file: Option<PathBuf>,
    posts_file: Option<PathBuf>,
    manuscript: ProjectManuscript,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct ProjectManuscript {
    title: Option<String>,
    author: Option<String>,
    chapters_directory: Option<PathBuf>,
    output_file: Option<PathBuf>,
    chapters: Option<Vec<Chapter>>,
}

/// Fully-resolved configuration: every path is absolute-or-rooted and
/// every default has been applied.
pub struct Config {
    /// Directory receiving one subdirectory per post slug.
    pub blog_directory: PathBuf,

    /// The page template with the `{{...}}` placeholder tokens.
    pub template_file: PathBuf,

    /// The JSON post index.
    pub posts_file: PathBuf,

    pub manuscript: ManuscriptConfig,
}

pub struct ManuscriptConfig {
    pub title: String,
    pub author: Option<String>,
    pub chapters_directory: PathBuf,
    pub output_file: PathBuf,
    pub chapters: Vec<Chapter>,
}

impl Config {
    /// Searches `dir` and its parents for [`CONFIG_FILE`]. A project
    /// file pins the project root to its own directory; when none
    /// exists anywhere up the tree, the defaults resolve against `dir`
    /// itself.
    pub fn from_directory(dir: &Path) -> Result<Config> {
        let mut current = dir;
        loop {
            let path = current.join(CONFIG_FILE);
            if path.exists() {
                return Config::from_project_file(&path)
                    .with_context(|| format!("loading configuration `{}`", path.display()));
            }
            current = match current.parent() {
                Some(parent) => parent,
                None => return Ok(Config::resolve(dir, Project::default())),
            };
        }
    }

    pub fn from_project_file(path: &Path) -> Result<Config> {
        let file = File::open(path)
            .with_context(|| format!("opening project file `{}`", path.display()))?;
        let project: Project = serde_json::from_reader(file)?;
        match path.parent() {
            None => Err(anyhow!(
                "can't get parent directory for project file path '{:?}'",
                path
            )),
            Some(project_root) => Ok(Config::resolve(project_root, project)),
        }
    }

    fn resolve(root: &Path, project: Project) -> Config {
        let blog_directory = root.join(
            project
                .blog_directory
                .unwrap_or_else(|| PathBuf::from("blog")),
        );
        let template_file = match project.template_file {
            Some(path) => root.join(path),
            None => blog_directory.join("_template.html"),
        };
        let posts_file = match project.posts_file {
            Some(path) => root.join(path),
            None => blog_directory.join("posts.json"),
        };

        let manuscript = project.manuscript;
        Config {
            template_file,
            posts_file,
            manuscript: ManuscriptConfig {
                title: manuscript.title.unwrap_or_else(|| "Manuscrit".to_owned()),
                author: manuscript.author,
                chapters_directory: root.join(
                    manuscript
                        .chapters_directory
                        .unwrap_or_else(|| PathBuf::from("manuscript/chapters")),
                ),
                output_file: root.join(
                    manuscript
                        .output_file
                        .unwrap_or_else(|| PathBuf::from("MANUSCRIPT_DRAFT.md")),
                ),
                chapters: manuscript.chapters.unwrap_or_else(default_chapters),
            },
            blog_directory,
        }
    }
}
