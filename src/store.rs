//! Document store and its builder.

use crate::document::Document;
use crate::error::{Error, Result};
use crate::persist::{atomic_write, load};
use crate::serializer::{JsonSerializer, Serializer};
use log::{debug, error, info};
use parking_lot::{Mutex, RwLock};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Owns the on-disk document and the in-memory copy of it.
///
/// Reads hand out `Arc<Document>` snapshots, so a reader never observes a
/// half-applied change and never holds a lock while it looks at the data.
/// Writes go through [`mutate`](Self::mutate) / [`try_mutate`](Self::try_mutate),
/// which run read-modify-persist under a single writer lock: two mutations
/// never interleave and each one sees every mutation before it.
///
/// **Single-process only.** The atomic rename keeps readers safe, but two
/// processes writing the same file will overwrite each other's changes.
pub struct DocumentStore {
    path: PathBuf,
    serializer: JsonSerializer,
    current: RwLock<Arc<Document>>,
    writer: Mutex<()>,
}

impl DocumentStore {
    /// Open (or create) the document at `path` with pretty JSON.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::builder(path).build()
    }

    /// Start configuring a store. Call [`.build()`](DocumentStoreBuilder::build)
    /// when ready.
    pub fn builder(path: impl AsRef<Path>) -> DocumentStoreBuilder {
        DocumentStoreBuilder::new(path)
    }

    /// Current document snapshot.
    #[must_use]
    pub fn load(&self) -> Arc<Document> {
        Arc::clone(&self.current.read())
    }

    /// Path to the backing JSON file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Apply `f` to the latest document and persist the result.
    ///
    /// `f` should be a pure transformation. If persisting fails the store
    /// keeps the previous document and returns [`Error::PersistenceFailed`].
    pub fn mutate<F>(&self, f: F) -> Result<Arc<Document>>
    where
        F: FnOnce(Document) -> Document,
    {
        let _guard = self.writer.lock();
        let next = f(Document::clone(&self.load()));
        self.commit(next)
    }

    /// Like [`mutate`](Self::mutate), but `f` edits a working copy in place
    /// and may bail out. When `f` returns an error nothing is written and the
    /// document is unchanged.
    pub fn try_mutate<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Document) -> Result<T>,
    {
        let _guard = self.writer.lock();
        let mut next = Document::clone(&self.load());
        let out = f(&mut next)?;
        self.commit(next)?;
        Ok(out)
    }

    // Caller must hold the writer lock.
    fn commit(&self, next: Document) -> Result<Arc<Document>> {
        if let Err(e) = self.persist(&next) {
            error!("{}: mutation rolled back: {e}", self.path.display());
            return Err(e);
        }
        let next = Arc::new(next);
        *self.current.write() = Arc::clone(&next);
        debug!("{}: persisted", self.path.display());
        Ok(next)
    }

    fn persist(&self, doc: &Document) -> Result<()> {
        let bytes = self
            .serializer
            .serialize(doc)
            .map_err(Error::PersistenceFailed)?;
        atomic_write(&self.path, &bytes)
    }
}

impl std::fmt::Debug for DocumentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentStore")
            .field("path", &self.path)
            .field("pretty", &self.serializer.is_pretty())
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Configures and opens a [`DocumentStore`].
///
/// ```rust,no_run
/// use content_store::DocumentStore;
///
/// let store = DocumentStore::builder("data.json")
///     .pretty(false)
///     .build()
///     .unwrap();
/// ```
pub struct DocumentStoreBuilder {
    path: PathBuf,
    pretty: bool,
}

impl DocumentStoreBuilder {
    fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            pretty: true,
        }
    }

    /// Write human-readable JSON with indentation (default: pretty).
    pub fn pretty(mut self, yes: bool) -> Self {
        self.pretty = yes;
        self
    }

    /// Load the document, creating an empty one on disk if the file is absent.
    ///
    /// Fails with [`Error::StorageUnavailable`] if the file exists but can't
    /// be read or parsed, or if a fresh document can't be written.
    pub fn build(self) -> Result<DocumentStore> {
        let serializer = if self.pretty {
            JsonSerializer::pretty()
        } else {
            JsonSerializer::new()
        };

        let doc = match load(&self.path, &serializer)? {
            Some(doc) => {
                info!(
                    "{}: loaded {} team, {} faqs, {} projects",
                    self.path.display(),
                    doc.team.len(),
                    doc.faqs.len(),
                    doc.projects.len()
                );
                doc
            }
            None => {
                let doc = Document::default();
                let bytes = serializer
                    .serialize(&doc)
                    .map_err(Error::StorageUnavailable)?;
                atomic_write(&self.path, &bytes).map_err(|e| {
                    Error::StorageUnavailable(format!("cannot initialize document: {e}"))
                })?;
                info!("{}: initialized empty document", self.path.display());
                doc
            }
        };

        Ok(DocumentStore {
            path: self.path,
            serializer,
            current: RwLock::new(Arc::new(doc)),
            writer: Mutex::new(()),
        })
    }
}

impl std::fmt::Debug for DocumentStoreBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentStoreBuilder")
            .field("path", &self.path)
            .field("pretty", &self.pretty)
            .finish()
    }
}
