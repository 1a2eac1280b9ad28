use reelboard_core::error::{CoreError, Result};
use reelboard_core::types::{CatalogEntry, MovieId};
use std::collections::{HashMap, HashSet};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Header line on the initial catalog file; appended rows carry no header
pub const CATALOG_HEADER: &str = "movie_id,title,genre";

/// In-memory movie table, owned by the process for its lifetime.
///
/// Loaded once at startup; a malformed file is fatal rather than yielding a
/// silent empty catalog. Entries are never mutated or deleted, only appended.
///
/// The row codec does no quoting: fields split by position (id off the
/// front, genre off the back, the remainder is the title), so a title may
/// contain commas but any quote characters are kept verbatim.
///
/// Identifier assignment (`next_movie_id`) is a read-then-append against a
/// shared file with no cross-process lock. That is acceptable for the
/// single-submitter deployment this targets; concurrent submitters would need
/// assignment serialized externally.
#[derive(Debug)]
pub struct Catalog {
    path: PathBuf,
    entries: Vec<CatalogEntry>,
    by_id: HashMap<MovieId, usize>,
}

impl Catalog {
    /// Load the catalog file. Any IO or parse failure is returned as an error
    /// with the offending line number.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let data = std::fs::read_to_string(&path)?;

        let mut lines = data.lines().enumerate();
        match lines.next() {
            Some((_, header)) if header.trim() == CATALOG_HEADER => {}
            Some((_, other)) => {
                return Err(parse_error(&path, 1, format!("expected header, got {:?}", other)));
            }
            None => {
                return Err(parse_error(&path, 1, "empty catalog file".into()));
            }
        }

        let mut entries = Vec::new();
        let mut by_id = HashMap::new();
        for (idx, line) in lines {
            if line.trim().is_empty() {
                continue;
            }
            let entry = parse_entry(&path, idx + 1, line)?;
            if by_id.insert(entry.movie_id, entries.len()).is_some() {
                return Err(parse_error(
                    &path,
                    idx + 1,
                    format!("duplicate movie_id {}", entry.movie_id),
                ));
            }
            entries.push(entry);
        }

        tracing::info!(path = %path.display(), movies = entries.len(), "loaded catalog");

        Ok(Self { path, entries, by_id })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, movie_id: MovieId) -> Option<&CatalogEntry> {
        self.by_id.get(&movie_id).map(|&i| &self.entries[i])
    }

    /// Highest movie id currently in the table
    pub fn max_movie_id(&self) -> Option<MovieId> {
        self.entries.iter().map(|e| e.movie_id).max()
    }

    /// Id for the next submitted movie: max + 1, or 1 on an empty catalog
    pub fn next_movie_id(&self) -> MovieId {
        self.max_movie_id().map_or(1, |max| max + 1)
    }

    /// Distinct verbatim genre strings, first-appearance order.
    ///
    /// Compound strings are kept whole (`"Horror|Drama"` is one value); this
    /// feeds the genre-selection control.
    pub fn distinct_genres(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.entries
            .iter()
            .filter(|e| seen.insert(e.genre.clone()))
            .map(|e| e.genre.clone())
            .collect()
    }

    /// Append one entry to the catalog file and the in-memory table.
    ///
    /// The row is written with a single write on a handle opened in append
    /// mode, then closed, so it cannot interleave with a concurrent append.
    pub fn append(&mut self, entry: CatalogEntry) -> Result<()> {
        if self.by_id.contains_key(&entry.movie_id) {
            return Err(CoreError::Catalog(format!(
                "movie_id {} already exists",
                entry.movie_id
            )));
        }

        let line = format!("{},{},{}\n", entry.movie_id, entry.title, entry.genre);
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())?;

        self.by_id.insert(entry.movie_id, self.entries.len());
        self.entries.push(entry);
        Ok(())
    }
}

fn parse_error(path: &Path, line: usize, message: String) -> CoreError {
    CoreError::Parse {
        path: path.display().to_string(),
        line,
        message,
    }
}

fn parse_entry(path: &Path, line_no: usize, line: &str) -> Result<CatalogEntry> {
    // Titles may contain commas: take the id off the front and the genre off
    // the back, the remainder is the title.
    let (id_part, rest) = line
        .split_once(',')
        .ok_or_else(|| parse_error(path, line_no, "expected 3 fields".into()))?;
    let (title, genre) = rest
        .rsplit_once(',')
        .ok_or_else(|| parse_error(path, line_no, "expected 3 fields".into()))?;

    let movie_id: MovieId = id_part
        .trim()
        .parse()
        .map_err(|e| parse_error(path, line_no, format!("bad movie_id: {}", e)))?;

    Ok(CatalogEntry {
        movie_id,
        title: title.trim().to_string(),
        genre: genre.trim().to_string(),
    })
}
