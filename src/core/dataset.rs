//! Dataset persistence
//!
//! Flat directory layout:
//! - `<label>_<NNNNN>.png`  artifact
//! - `<label>_<NNNNN>.txt`  JSON sidecar
//! - `index.csv`            one row per saved sample, accumulates forever
//!
//! Sequence numbers are recovered from the files on disk, so a writer can be
//! restarted at any time. Artifacts are claimed with `create_new`, so two
//! writers racing on the same label never overwrite each other's artifact;
//! the index rewrite is still read-modify-write and assumes a single writer.

use std::collections::BTreeMap;
use std::fs::{self, OpenOptions};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::Utc;
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, info};

use crate::core::prompt::prompt_digest;
use crate::core::renderer::Artifact;
use crate::types::{
    ArtifactSpec, DatasetRecord, Emotion, IndexRow, PersistStep, PersistenceError, SidecarMeta,
};
use crate::{ARTIFACT_EXT, INDEX_FILE_NAME, SEQUENCE_DIGITS, SIDECAR_EXT};

lazy_static! {
    static ref RE_ARTIFACT_NAME: Regex = Regex::new(r"(?i)^([a-z]+)_(\d+)\.png$").unwrap();
}

/// How many consecutive taken names to skip before giving up
const MAX_CLAIM_ATTEMPTS: u32 = 64;

/// File stem for a sample: `joy_00042`
pub fn sample_stem(label: Emotion, n: u32) -> String {
    format!("{}_{:0width$}", label, n, width = SEQUENCE_DIGITS)
}

/// Next free sequence number for `label` in `dir` (1 when none exist)
pub fn next_index(dir: &Path, label: Emotion) -> Result<u32, PersistenceError> {
    if !dir.exists() {
        return Ok(1);
    }

    let entries =
        fs::read_dir(dir).map_err(|e| PersistenceError::new(PersistStep::ScanDir, dir, e))?;

    let mut max = 0u32;
    for entry in entries {
        let entry = entry.map_err(|e| PersistenceError::new(PersistStep::ScanDir, dir, e))?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else { continue };
        let Some(caps) = RE_ARTIFACT_NAME.captures(name) else { continue };
        if !caps[1].eq_ignore_ascii_case(label.name()) {
            continue;
        }
        if let Ok(n) = caps[2].parse::<u32>() {
            max = max.max(n);
        }
    }
    max.checked_add(1).ok_or_else(|| {
        PersistenceError::new(
            PersistStep::ScanDir,
            dir,
            format!("sequence for {} exhausted at {}", label, max),
        )
    })
}

/// Read every row of `<dir>/index.csv`; empty when the file does not exist
pub fn read_index(dir: &Path) -> Result<Vec<IndexRow>, PersistenceError> {
    read_index_file(&dir.join(INDEX_FILE_NAME))
}

fn read_index_file(path: &Path) -> Result<Vec<IndexRow>, PersistenceError> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let err = |e: csv::Error| PersistenceError::new(PersistStep::ReadIndex, path, e);
    let mut reader = csv::Reader::from_path(path).map_err(err)?;
    reader
        .deserialize::<IndexRow>()
        .collect::<Result<Vec<_>, _>>()
        .map_err(err)
}

fn write_index_file(path: &Path, rows: &[IndexRow]) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Appends samples to one dataset directory
#[derive(Debug, Clone)]
pub struct DatasetWriter {
    dir: PathBuf,
}

impl DatasetWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn index_path(&self) -> PathBuf {
        self.dir.join(INDEX_FILE_NAME)
    }

    /// Save one sample: artifact, sidecar, index row.
    ///
    /// If the index step fails the artifact and sidecar stay on disk but are
    /// not referenced by the index.
    pub fn persist(
        &self,
        label: Emotion,
        phrase: &str,
        prompt: &str,
        seed: u64,
        artifact: &Artifact,
    ) -> Result<DatasetRecord, PersistenceError> {
        fs::create_dir_all(&self.dir)
            .map_err(|e| PersistenceError::new(PersistStep::CreateDir, &self.dir, e))?;

        let n = next_index(&self.dir, label)?;
        let (n, artifact_path) = self.write_artifact(label, n, artifact)?;
        let stem = sample_stem(label, n);
        debug!(path = %artifact_path.display(), "artifact written");

        let timestamp = Utc::now().timestamp();
        let meta = SidecarMeta {
            emotion: label,
            n,
            timestamp,
            seed,
            phrase: phrase.to_string(),
            prompt: prompt.to_string(),
            prompt_sha256: prompt_digest(prompt),
            spec: ArtifactSpec {
                width: artifact.width(),
                height: artifact.height(),
            },
        };
        let sidecar_path = self.dir.join(format!("{}.{}", stem, SIDECAR_EXT));
        let json = serde_json::to_string_pretty(&meta)
            .map_err(|e| PersistenceError::new(PersistStep::WriteSidecar, &sidecar_path, e))?;
        fs::write(&sidecar_path, json)
            .map_err(|e| PersistenceError::new(PersistStep::WriteSidecar, &sidecar_path, e))?;

        let record = DatasetRecord {
            emotion: label,
            n,
            seed,
            phrase: phrase.to_string(),
            prompt: prompt.to_string(),
            timestamp,
            width: artifact.width(),
            height: artifact.height(),
            artifact_file: file_name(&artifact_path),
            sidecar_file: file_name(&sidecar_path),
        };

        self.append_index(&record.index_row())?;
        info!(emotion = %label, n, file = %record.artifact_file, "sample saved");
        Ok(record)
    }

    /// Claim `<label>_<n>.png` with `create_new`, bumping `n` past names
    /// taken since the scan, and encode the artifact into it.
    fn write_artifact(
        &self,
        label: Emotion,
        mut n: u32,
        artifact: &Artifact,
    ) -> Result<(u32, PathBuf), PersistenceError> {
        for _ in 0..MAX_CLAIM_ATTEMPTS {
            let path = self.dir.join(format!("{}.{}", sample_stem(label, n), ARTIFACT_EXT));
            let file = match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(file) => file,
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    debug!(path = %path.display(), "name taken, trying next index");
                    n = n.checked_add(1).ok_or_else(|| {
                        PersistenceError::new(
                            PersistStep::WriteArtifact,
                            &path,
                            format!("sequence for {} exhausted", label),
                        )
                    })?;
                    continue;
                }
                Err(e) => return Err(PersistenceError::new(PersistStep::WriteArtifact, &path, e)),
            };

            let mut writer = BufWriter::new(file);
            let written = artifact
                .write_png(&mut writer)
                .map_err(|e| e.to_string())
                .and_then(|_| writer.flush().map_err(|e| e.to_string()));
            drop(writer);
            if let Err(e) = written {
                let _ = fs::remove_file(&path);
                return Err(PersistenceError::new(PersistStep::WriteArtifact, &path, e));
            }
            return Ok((n, path));
        }

        Err(PersistenceError::new(
            PersistStep::WriteArtifact,
            &self.dir,
            format!("no free name for {} after {} attempts", label, MAX_CLAIM_ATTEMPTS),
        ))
    }

    /// Read, append, write to a temp file, rename over the index
    fn append_index(&self, row: &IndexRow) -> Result<(), PersistenceError> {
        let path = self.index_path();
        let mut rows = read_index_file(&path)?;
        rows.push(row.clone());

        let tmp = path.with_extension("csv.tmp");
        write_index_file(&tmp, &rows)
            .map_err(|e| PersistenceError::new(PersistStep::WriteIndex, &tmp, e))?;
        fs::rename(&tmp, &path)
            .map_err(|e| PersistenceError::new(PersistStep::WriteIndex, &path, e))?;
        Ok(())
    }

    /// All rows of this directory's index
    pub fn read_index(&self) -> Result<Vec<IndexRow>, PersistenceError> {
        read_index_file(&self.index_path())
    }

    /// Number of indexed samples per label
    pub fn label_counts(&self) -> Result<BTreeMap<Emotion, usize>, PersistenceError> {
        let mut counts = BTreeMap::new();
        for row in self.read_index()? {
            *counts.entry(row.emotion).or_insert(0) += 1;
        }
        Ok(counts)
    }

    /// Next sequence number `persist` would try for `label`
    pub fn next_index(&self, label: Emotion) -> Result<u32, PersistenceError> {
        next_index(&self.dir, label)
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

// =============================================================================
// TESTS
// =============================================================================
