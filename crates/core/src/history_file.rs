//! File-backed results history: JSONL with a SHA-256 hash chain.
//!
//! The file format is line-delimited JSON (`.jsonl`):
//! - Line 1: header with `format_version` and `app`.
//! - Lines 2+: one record per finished game, each carrying a SHA-256 hash chain
//!   (`prev_sha256_hex`, `sha256_hex`) so edits and deletions are detected.
//!
//! Writing flushes each record immediately. Loading validates every line's JSON shape and
//! the chain, stopping at the first invalid or incomplete line.

use std::error::Error;
use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::history::{GameResult, ResultStore, newest_first};

const FORMAT_VERSION: u16 = 1;
const APP_TAG: &str = "treasure-hunt";

/// The previous-hash used for the first record in a chain.
const INITIAL_HASH: &str = "0000000000000000000000000000000000000000000000000000000000000000";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
struct FileHeader {
    format_version: u16,
    app: String,
}

/// Hash input for one record, concatenated with `prev_sha256_hex`.
#[derive(Serialize)]
struct RecordBody<'a> {
    seq: u64,
    result: &'a GameResult,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
struct FileRecord {
    seq: u64,
    result: GameResult,
    prev_sha256_hex: String,
    sha256_hex: String,
}

/// `hex(SHA-256(body_json || prev_sha256_hex))`.
fn compute_record_sha256(body_json: &str, prev_sha256_hex: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(body_json.as_bytes());
    hasher.update(prev_sha256_hex.as_bytes());
    let result = hasher.finalize();
    format!("{result:064x}")
}

/// Results history backed by an append-only file, with every record also held in memory.
pub struct HistoryFile {
    path: PathBuf,
    writer: BufWriter<File>,
    last_sha256_hex: String,
    next_seq: u64,
    results: Vec<GameResult>,
}

impl HistoryFile {
    /// Opens the history at `path`, creating it (and its parent directories) when the file is
    /// missing or empty. An existing file must pass validation before anything is appended.
    pub fn open(path: &Path) -> Result<Self, HistoryLoadError> {
        let is_blank = match fs::metadata(path) {
            Ok(metadata) => metadata.len() == 0,
            Err(err) if err.kind() == io::ErrorKind::NotFound => true,
            Err(err) => return Err(HistoryLoadError::Io(err)),
        };
        if is_blank {
            return Self::create(path).map_err(HistoryLoadError::Io);
        }

        let loaded = load_history_file(path)?;
        let file = OpenOptions::new().append(true).open(path).map_err(HistoryLoadError::Io)?;
        Ok(Self {
            path: path.to_path_buf(),
            writer: BufWriter::new(file),
            last_sha256_hex: loaded.last_sha256_hex,
            next_seq: loaded.next_seq,
            results: loaded.results,
        })
    }

    /// Starts a new history file, writing the header line immediately.
    pub fn create(path: &Path) -> io::Result<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);

        let header = FileHeader { format_version: FORMAT_VERSION, app: APP_TAG.to_string() };
        let header_json = serde_json::to_string(&header).map_err(io::Error::other)?;
        writeln!(writer, "{header_json}")?;
        writer.flush()?;

        Ok(Self {
            path: path.to_path_buf(),
            writer,
            last_sha256_hex: INITIAL_HASH.to_string(),
            next_seq: 0,
            results: Vec::new(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every recorded result in recording order.
    pub fn results(&self) -> &[GameResult] {
        &self.results
    }
}

impl ResultStore for HistoryFile {
    type Error = io::Error;

    fn record_result(&mut self, result: &GameResult) -> io::Result<()> {
        let body = RecordBody { seq: self.next_seq, result };
        let body_json = serde_json::to_string(&body).map_err(io::Error::other)?;
        let sha256_hex = compute_record_sha256(&body_json, &self.last_sha256_hex);

        let record = FileRecord {
            seq: self.next_seq,
            result: result.clone(),
            prev_sha256_hex: self.last_sha256_hex.clone(),
            sha256_hex: sha256_hex.clone(),
        };

        let record_json = serde_json::to_string(&record).map_err(io::Error::other)?;
        writeln!(self.writer, "{record_json}")?;
        self.writer.flush()?;

        self.last_sha256_hex = sha256_hex;
        self.next_seq += 1;
        self.results.push(record.result);
        tracing::debug!(path = %self.path.display(), seq = record.seq, "recorded game result");

        Ok(())
    }

    fn fetch_history(&self, player: &str) -> Vec<GameResult> {
        newest_first(&self.results, player)
    }
}

/// Validated contents of a history file.
#[derive(Debug)]
pub struct LoadedHistory {
    pub results: Vec<GameResult>,
    /// SHA-256 hex of the last valid record (or the initial hash if empty).
    pub last_sha256_hex: String,
    /// Sequence number for the next record to be appended.
    pub next_seq: u64,
}

/// Describes why a history file could not be fully loaded.
#[derive(Debug)]
pub enum HistoryLoadError {
    Io(io::Error),
    EmptyFile,
    /// The header line is not valid JSON or names an unsupported format.
    InvalidHeader { line: usize, message: String },
    /// A record line could not be parsed or its sequence number is out of order.
    InvalidRecord { line: usize, message: String },
    /// The file ended without a trailing newline.
    IncompleteLine { line: usize },
    /// A stored hash does not match its predecessor or its recomputed value.
    HashChainBroken { line: usize },
}

impl fmt::Display for HistoryLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "history I/O error: {e}"),
            Self::EmptyFile => write!(f, "history file is empty"),
            Self::InvalidHeader { line, message } => {
                write!(f, "invalid history header at line {line}: {message}")
            }
            Self::InvalidRecord { line, message } => {
                write!(f, "invalid history record at line {line}: {message}")
            }
            Self::IncompleteLine { line } => {
                write!(f, "incomplete history line at line {line}")
            }
            Self::HashChainBroken { line } => {
                write!(f, "SHA-256 hash chain broken at line {line}")
            }
        }
    }
}

impl Error for HistoryLoadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

/// Loads and validates a JSONL history file, stopping at the first invalid, incomplete, or
/// hash-broken line.
pub fn load_history_file(path: &Path) -> Result<LoadedHistory, HistoryLoadError> {
    let content = fs::read_to_string(path).map_err(HistoryLoadError::Io)?;
    if content.is_empty() {
        return Err(HistoryLoadError::EmptyFile);
    }
    let has_trailing_newline = content.ends_with('\n');
    let lines: Vec<&str> = content.lines().collect();
    if lines.is_empty() {
        return Err(HistoryLoadError::EmptyFile);
    }
    if !has_trailing_newline {
        return Err(HistoryLoadError::IncompleteLine { line: lines.len() });
    }

    let header: FileHeader = serde_json::from_str(lines[0])
        .map_err(|e| HistoryLoadError::InvalidHeader { line: 1, message: e.to_string() })?;
    if header.format_version != FORMAT_VERSION {
        return Err(HistoryLoadError::InvalidHeader {
            line: 1,
            message: format!("unsupported format version {}", header.format_version),
        });
    }

    let mut results = Vec::new();
    let mut prev_sha256_hex = INITIAL_HASH.to_string();
    let mut next_seq: u64 = 0;

    for (line_index, line) in lines.iter().skip(1).enumerate() {
        let line_number = line_index + 2; // 1-indexed; header is line 1

        if line.is_empty() {
            return Err(HistoryLoadError::InvalidRecord {
                line: line_number,
                message: "empty line".to_string(),
            });
        }

        let record: FileRecord = serde_json::from_str(line).map_err(|e| {
            HistoryLoadError::InvalidRecord { line: line_number, message: e.to_string() }
        })?;

        if record.seq != next_seq {
            return Err(HistoryLoadError::InvalidRecord {
                line: line_number,
                message: format!("expected seq {next_seq}, found {}", record.seq),
            });
        }

        if record.prev_sha256_hex != prev_sha256_hex {
            return Err(HistoryLoadError::HashChainBroken { line: line_number });
        }

        let body = RecordBody { seq: record.seq, result: &record.result };
        let body_json = serde_json::to_string(&body).map_err(|e| {
            HistoryLoadError::InvalidRecord { line: line_number, message: e.to_string() }
        })?;
        if record.sha256_hex != compute_record_sha256(&body_json, &prev_sha256_hex) {
            return Err(HistoryLoadError::HashChainBroken { line: line_number });
        }

        results.push(record.result);
        prev_sha256_hex = record.sha256_hex;
        next_seq += 1;
    }

    Ok(LoadedHistory { results, last_sha256_hex: prev_sha256_hex, next_seq })
}
