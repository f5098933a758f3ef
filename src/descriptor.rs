//! File descriptors: a document path plus an optional page list
//!
//! A descriptor is written `path` or `path[selector,selector,...]`, where each
//! selector is a single page (`5`) or an inclusive ascending range (`3-10`).
//! Pages are 1-based. Selector order and repetition are kept exactly as
//! written, so `f.pdf[2,1,1]` yields page 2 followed by page 1 twice.

use std::fmt;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use glob::glob;
use tracing::debug;

use crate::error::{Error, Result};

/// One item of a descriptor's page list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSelector {
    /// A single 1-based page number
    Single(u32),
    /// An inclusive range of 1-based page numbers, `start <= end`
    Range(u32, u32),
}

impl PageSelector {
    /// The 1-based page numbers this selector stands for, ascending
    pub fn pages(&self) -> RangeInclusive<u32> {
        match *self {
            PageSelector::Single(n) => n..=n,
            PageSelector::Range(start, end) => start..=end,
        }
    }

    /// Highest 1-based page number this selector refers to
    pub fn last_page(&self) -> u32 {
        match *self {
            PageSelector::Single(n) => n,
            PageSelector::Range(_, end) => end,
        }
    }
}

impl fmt::Display for PageSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageSelector::Single(n) => write!(f, "{}", n),
            PageSelector::Range(start, end) => write!(f, "{}-{}", start, end),
        }
    }
}

/// A parsed input reference: which document, and which of its pages
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDescriptor {
    /// Location of the source document; only checked when it is opened
    pub path: PathBuf,
    /// Page list in user order; empty means every page in natural order
    pub selectors: Vec<PageSelector>,
}

impl FileDescriptor {
    /// Descriptor selecting every page of `path`
    pub fn whole<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            selectors: Vec::new(),
        }
    }

    /// Parse a raw `path` or `path[selector-list]` string
    ///
    /// # Example
    ///
    /// ```
    /// use pdfextract::descriptor::{FileDescriptor, PageSelector};
    ///
    /// let d = FileDescriptor::parse("notes.pdf[1,3-5,2]").unwrap();
    /// assert_eq!(d.path.to_str(), Some("notes.pdf"));
    /// assert_eq!(
    ///     d.selectors,
    ///     vec![PageSelector::Single(1), PageSelector::Range(3, 5), PageSelector::Single(2)]
    /// );
    /// ```
    pub fn parse(raw: &str) -> Result<Self> {
        let Some((path, list)) = split_bracket_suffix(raw) else {
            return Ok(Self::whole(raw));
        };

        let selectors = parse_selector_list(raw, list)?;
        debug!("Descriptor {} selects {:?}", raw, selectors);

        Ok(Self {
            path: PathBuf::from(path),
            selectors,
        })
    }

    /// True when no page list was given (or it was empty)
    pub fn is_whole_document(&self) -> bool {
        self.selectors.is_empty()
    }
}

impl FromStr for FileDescriptor {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for FileDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())?;
        if self.selectors.is_empty() {
            return Ok(());
        }
        let list: Vec<String> = self.selectors.iter().map(|s| s.to_string()).collect();
        write!(f, "[{}]", list.join(","))
    }
}

/// Split `path[list]` into `("path", "list")`
///
/// Only a trailing bracket group counts, and the path in front of it must be
/// non-empty. The group opens at the last `[` so paths may contain brackets.
fn split_bracket_suffix(raw: &str) -> Option<(&str, &str)> {
    let inner = raw.strip_suffix(']')?;
    let open = inner.rfind('[')?;
    if open == 0 {
        return None;
    }
    Some((&inner[..open], &inner[open + 1..]))
}

fn parse_selector_list(raw: &str, list: &str) -> Result<Vec<PageSelector>> {
    let compact: String = list.chars().filter(|c| !c.is_whitespace()).collect();

    // "", " " and "," all mean the whole document
    if compact.chars().all(|c| c == ',') {
        return Ok(Vec::new());
    }

    compact
        .split(',')
        .enumerate()
        .map(|(i, item)| {
            parse_selector(item).ok_or_else(|| Error::InvalidSelectorSyntax {
                descriptor: raw.to_string(),
                item: item.to_string(),
                position: i + 1,
            })
        })
        .collect()
}

fn parse_selector(item: &str) -> Option<PageSelector> {
    match item.split_once('-') {
        None => parse_page_number(item).map(PageSelector::Single),
        Some((start, end)) => {
            let start = parse_page_number(start)?;
            let end = parse_page_number(end)?;
            (start <= end).then_some(PageSelector::Range(start, end))
        }
    }
}

/// `[1-9][0-9]*`, fitting in a u32
fn parse_page_number(s: &str) -> Option<u32> {
    let first = s.chars().next()?;
    if first == '0' || !s.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Expand descriptors whose path contains `*` or `?`
///
/// Each match inherits the descriptor's page list. Matches of one pattern are
/// sorted; the order of the descriptors themselves is kept. `[` is not treated
/// as a wildcard because it opens the page list.
pub fn expand_wildcards(descriptors: Vec<FileDescriptor>) -> Result<Vec<FileDescriptor>> {
    let mut expanded = Vec::with_capacity(descriptors.len());

    for descriptor in descriptors {
        let pattern = descriptor.path.to_string_lossy().into_owned();
        if !has_wildcard(&descriptor.path) {
            expanded.push(descriptor);
            continue;
        }

        let entries = glob(&pattern).map_err(|e| Error::InvalidGlob(format!("{}: {}", pattern, e)))?;
        let mut matches: Vec<PathBuf> = entries.filter_map(|entry| entry.ok()).collect();
        if matches.is_empty() {
            return Err(Error::NoFilesMatched(pattern));
        }
        matches.sort();
        debug!("Pattern {} matched {} file(s)", pattern, matches.len());

        expanded.extend(matches.into_iter().map(|path| FileDescriptor {
            path,
            selectors: descriptor.selectors.clone(),
        }));
    }

    Ok(expanded)
}

fn has_wildcard(path: &Path) -> bool {
    let s = path.to_string_lossy();
    s.contains('*') || s.contains('?')
}
