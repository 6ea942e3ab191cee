//! Exports the [`build_post`] function which stitches together the
//! steps of publishing one post: extracting a [`Post`] from the
//! payload, rendering it through the template, writing the page under
//! its slug directory, and updating the post index.

use std::fmt;
use std::fs;
use std::path::PathBuf;

use log::debug;

use crate::config::Config;
use crate::index;
use crate::post::{Payload, Post};
use crate::template::{self, Template};

/// What a successful build produced; the binary reports these paths.
#[derive(Debug)]
pub struct Report {
    /// The page written under `{blog_directory}/{slug}/index.html`.
    pub page_path: PathBuf,

    /// The rewritten post index.
    pub index_path: PathBuf,

    pub slug: String,
}

/// Builds one post from a [`Payload`]. Side effects, in order: the
/// slug directory is created (fine if it already exists), the page is
/// written over any previous version, then the index is loaded,
/// updated, and rewritten. A failure between the two writes leaves
/// the page published without an index entry; rerunning the build
/// repairs it.
pub fn build_post(config: &Config, payload: &Payload) -> Result<Report> {
    let post = Post::from_payload(payload);
    let template = Template::load(&config.template_file)?;
    let page = template.render(&post);

    let post_directory = config.blog_directory.join(&post.slug);
    fs::create_dir_all(&post_directory)?;
    let page_path = post_directory.join("index.html");
    fs::write(&page_path, page)?;
    debug!("wrote page for `{}` to {}", post.slug, page_path.display());

    let mut entries = index::load(&config.posts_file)?;
    index::upsert(&mut entries, index::Entry::from(&post));
    index::store(&config.posts_file, &entries)?;
    debug!("index now holds {} posts", entries.len());

    Ok(Report {
        page_path,
        index_path: config.posts_file.clone(),
        slug: post.slug,
    })
}

/// The result of a fallible build operation.
pub type Result<T> = std::result::Result<T, Error>;

/// The error type for building a post. Errors can come from the
/// template, the index, or page I/O.
#[derive(Debug)]
pub enum Error {
    /// Returned for errors loading the template.
    Template(template::Error),

    /// Returned for errors reading or writing the post index.
    Index(index::Error),

    /// Returned for other I/O errors.
    Io(std::io::Error),
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Template(err) => err.fmt(f),
            Error::Index(err) => err.fmt(f),
            Error::Io(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Template(err) => Some(err),
            Error::Index(err) => Some(err),
            Error::Io(err) => Some(err),
        }
    }
}

impl From<template::Error> for Error {
    /// Converts a [`template::Error`] into an [`Error`]. This allows
    /// us to use the `?` operator around template loading.
    fn from(err: template::Error) -> Error {
        Error::Template(err)
    }
}

impl From<index::Error> for Error {
    /// Converts an [`index::Error`] into an [`Error`]. This allows us
    /// to use the `?` operator around index operations.
    fn from(err: index::Error) -> Error {
        Error::Index(err)
    }
}

impl From<std::io::Error> for Error {
    /// Converts a [`std::io::Error`] into an [`Error`]. This allows us
    /// to use the `?` operator for fallible I/O operations.
    fn from(err: std::io::Error) -> Error {
        Error::Io(err)
    }
}
