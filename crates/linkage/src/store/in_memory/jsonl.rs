//! JSONL persistence for the in-memory store.
//!
//! A snapshot file holds one JSON record per line: a `meta` header with the
//! format version and save timestamp, followed by one record per edge.
//! Loading is resilient - malformed lines, invalid edge data, and duplicate
//! edge ids are skipped with structured warnings rather than failing the
//! load. Dangling node references are not even a warning: nodes exist only
//! as endpoints of edges, and an edge whose node was deleted from the
//! diagram still contributes to adjacency and counts exactly as written.

use super::inner::InMemoryStoreInner;
use crate::error::{Error, Result, StorageError};
use crate::store::DiagramStore;
use chrono::{DateTime, Utc};
use linkage_engine::{Edge, EdgeId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tokio::sync::Mutex;
use tracing::debug;

/// Current snapshot format version.
const FORMAT_VERSION: u32 = 1;

/// One line of a snapshot file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "record", rename_all = "kebab-case")]
enum SnapshotRecord {
    /// Header record, written first.
    Meta {
        /// Snapshot format version.
        #[serde(rename = "format-version")]
        format_version: u32,
        /// When the snapshot was written.
        #[serde(rename = "saved-at")]
        saved_at: DateTime<Utc>,
    },
    /// One connector.
    Edge(Edge),
}

/// Warnings that can occur during snapshot loading.
///
/// These are non-fatal: the load continues and problematic records are
/// skipped. Applications should surface them, since they indicate a
/// corrupted or hand-edited snapshot that may need attention.
#[derive(Debug, Clone)]
pub enum LoadWarning {
    /// A line could not be parsed as a snapshot record.
    ///
    /// **Effect**: line skipped entirely.
    /// **Common causes**: file corruption, manual editing, incomplete writes.
    MalformedLine {
        /// 1-based line number of the bad line.
        line_number: usize,
        /// Parser error text.
        error: String,
    },

    /// An edge record failed structural validation (empty ids, oversized ids).
    ///
    /// **Effect**: the edge is skipped and not loaded.
    InvalidEdge {
        /// Id of the offending edge.
        edge_id: EdgeId,
        /// 1-based line number of the record.
        line_number: usize,
        /// Validation error text.
        error: String,
    },

    /// Two records carried the same edge id.
    ///
    /// **Effect**: the second record is skipped; the first wins.
    DuplicateEdgeId {
        /// The repeated id.
        edge_id: EdgeId,
        /// 1-based line number of the duplicate.
        line_number: usize,
    },

    /// The header declares a newer format than this build understands.
    ///
    /// **Effect**: loading continues on a best-effort basis.
    UnknownFormatVersion {
        /// Version found in the header.
        found: u32,
    },
}

impl LoadWarning {
    /// One-line description for logs and stderr.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            LoadWarning::MalformedLine { line_number, error } => {
                format!("skipped malformed line {line_number}: {error}")
            }
            LoadWarning::InvalidEdge {
                edge_id,
                line_number,
                error,
            } => format!("skipped invalid edge {edge_id} at line {line_number}: {error}"),
            LoadWarning::DuplicateEdgeId {
                edge_id,
                line_number,
            } => format!("skipped duplicate edge id {edge_id} at line {line_number}"),
            LoadWarning::UnknownFormatVersion { found } => {
                format!("snapshot format version {found} is newer than this build")
            }
        }
    }
}

/// Load a store from a JSONL snapshot file.
///
/// Malformed lines, invalid edges, and duplicate ids are skipped with
/// warnings; everything else - cycles, self-references, duplicate
/// connectors between the same pair, dangling node ids - loads exactly as
/// written.
///
/// # Returns
///
/// A tuple of `(store, warnings)` where warnings lists all non-fatal
/// problems encountered.
pub async fn load_from_jsonl(
    path: &Path,
    prefix: String,
) -> Result<(Box<dyn DiagramStore>, Vec<LoadWarning>)> {
    let content = tokio::fs::read_to_string(path).await.map_err(Error::Io)?;

    let mut warnings = Vec::new();
    let mut edges: Vec<Edge> = Vec::new();
    let mut seen_ids: HashSet<EdgeId> = HashSet::new();

    for (index, line) in content.lines().enumerate() {
        let line_number = index + 1;
        if line.trim().is_empty() {
            continue;
        }

        let record: SnapshotRecord = match serde_json::from_str(line) {
            Ok(record) => record,
            Err(e) => {
                warnings.push(LoadWarning::MalformedLine {
                    line_number,
                    error: e.to_string(),
                });
                continue;
            }
        };

        match record {
            SnapshotRecord::Meta { format_version, .. } => {
                if format_version > FORMAT_VERSION {
                    warnings.push(LoadWarning::UnknownFormatVersion {
                        found: format_version,
                    });
                }
            }
            SnapshotRecord::Edge(edge) => {
                if let Err(validation_error) = edge.validate() {
                    warnings.push(LoadWarning::InvalidEdge {
                        edge_id: edge.id.clone(),
                        line_number,
                        error: validation_error,
                    });
                    continue;
                }
                if !seen_ids.insert(edge.id.clone()) {
                    warnings.push(LoadWarning::DuplicateEdgeId {
                        edge_id: edge.id.clone(),
                        line_number,
                    });
                    continue;
                }
                edges.push(edge);
            }
        }
    }

    let store = Arc::new(Mutex::new(InMemoryStoreInner::new(prefix)));
    {
        let mut inner = store.lock().await;
        for edge in &edges {
            inner.id_generator.register_id(edge.id.as_str().to_string());
        }
        inner.edges = edges;
        inner.rebuild_derived();

        debug!(
            edges = inner.edges.len(),
            warnings = warnings.len(),
            path = %path.display(),
            "loaded snapshot"
        );
    }

    Ok((Box::new(store), warnings))
}

/// Save a store to a JSONL snapshot file with atomic writes.
///
/// Writes a `meta` header followed by one record per edge. The write is
/// atomic: a temporary file is written and flushed, then renamed over the
/// destination, so an interrupted save leaves the original file intact.
pub async fn save_to_jsonl(store: &dyn DiagramStore, path: &Path) -> Result<()> {
    let temp_path = path.with_extension("tmp");

    let file = File::create(&temp_path).await.map_err(Error::Io)?;
    let mut writer = BufWriter::new(file);

    let header = SnapshotRecord::Meta {
        format_version: FORMAT_VERSION,
        saved_at: Utc::now(),
    };
    write_record(&mut writer, &header).await?;

    let edges = store.export_all().await?;
    for edge in edges {
        write_record(&mut writer, &SnapshotRecord::Edge(edge)).await?;
    }

    writer.flush().await.map_err(Error::Io)?;

    // Atomic rename
    tokio::fs::rename(&temp_path, path).await.map_err(Error::Io)?;

    Ok(())
}

/// Serialize one record as a JSON line.
async fn write_record(
    writer: &mut BufWriter<File>,
    record: &SnapshotRecord,
) -> Result<()> {
    let json = serde_json::to_string(record).map_err(StorageError::Serialization)?;
    writer.write_all(json.as_bytes()).await.map_err(Error::Io)?;
    writer.write_all(b"\n").await.map_err(Error::Io)?;
    Ok(())
}
