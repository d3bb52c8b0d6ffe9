use std::fs::{self, DirBuilder, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::trace;

use super::definition_allows;
use crate::engine::{Leaf, LocalFile, Parameter, Resolvable, ResolvableKind, Strategy, Value};
use crate::error::{PayloadError, Result};
use crate::store::{BackingStore, Payload};

const FILENAME_DETAIL: &str = "filename";

pub struct FileStrategy {
    store: Arc<dyn BackingStore>,
    download_dir: PathBuf,
}

impl FileStrategy {
    pub fn new(store: Arc<dyn BackingStore>, download_dir: impl Into<PathBuf>) -> Self {
        Self {
            store,
            download_dir: download_dir.into(),
        }
    }

    fn accepts(definition: Option<&Parameter>) -> bool {
        definition_allows(definition, |d| d.kind.is_file())
    }
}

/// Reduce a remote-supplied name to a single path component.
fn path_component(name: &str) -> Option<String> {
    let component = Path::new(name).file_name()?.to_str()?;
    if component.is_empty() || component == ".." {
        return None;
    }
    Some(component.to_string())
}

/// Create `dir` (owner-only on unix) or accept it if it is already a real
/// directory. Symlinks are refused.
fn ensure_private_dir(dir: &Path) -> Result<()> {
    match fs::symlink_metadata(dir) {
        Ok(meta) if meta.file_type().is_symlink() => {
            Err(PayloadError::unsafe_path(dir, "is a symlink").into())
        }
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(PayloadError::unsafe_path(dir, "is not a directory").into()),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            let mut builder = DirBuilder::new();
            builder.recursive(true);
            #[cfg(unix)]
            {
                use std::os::unix::fs::DirBuilderExt;
                builder.mode(0o700);
            }
            builder
                .create(dir)
                .map_err(|e| PayloadError::file_write(dir, e).into())
        }
        Err(e) => Err(PayloadError::file_write(dir, e).into()),
    }
}

/// Write `content` to a fresh file at `path`, replacing a previous regular
/// file but never following a symlink.
fn write_new_file(path: &Path, content: &[u8]) -> Result<()> {
    match fs::symlink_metadata(path) {
        Ok(meta) if meta.file_type().is_symlink() => {
            return Err(PayloadError::unsafe_path(path, "is a symlink").into());
        }
        Ok(_) => fs::remove_file(path).map_err(|e| PayloadError::file_write(path, e))?,
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => return Err(PayloadError::file_write(path, e).into()),
    }

    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| PayloadError::file_write(path, e))?;
    file.write_all(content)
        .map_err(|e| PayloadError::file_write(path, e))?;
    Ok(())
}

impl Strategy for FileStrategy {
    fn name(&self) -> &'static str {
        "file"
    }

    fn claims_for_upload(&self, value: &Leaf, definition: Option<&Parameter>) -> bool {
        matches!(value, Leaf::File(_) | Leaf::InlineFile(_)) && Self::accepts(definition)
    }

    fn claims_for_download(&self, value: &Leaf, definition: Option<&Parameter>) -> bool {
        matches!(value, Leaf::Reference(r) if r.kind == ResolvableKind::File)
            && Self::accepts(definition)
    }

    fn upload(&self, value: &Leaf, _definition: Option<&Parameter>) -> Result<Value> {
        let (filename, content) = match value {
            Leaf::File(file) => {
                let content =
                    fs::read(file.path()).map_err(|e| PayloadError::file_read(file.path(), e))?;
                (&file.filename, content)
            }
            Leaf::InlineFile(file) => (&file.filename, file.content.clone()),
            other => {
                return Err(
                    PayloadError::unexpected_shape(self.name(), "file", other.kind_name()).into(),
                )
            }
        };

        let id = self
            .store
            .store(Payload::new(content).with_filename(filename.clone()))?;

        Ok(Value::reference(
            Resolvable::new(id, ResolvableKind::File, self.store.name())
                .with_detail(FILENAME_DETAIL, filename.clone()),
        ))
    }

    fn download(&self, value: &Leaf, _definition: Option<&Parameter>) -> Result<Value> {
        let reference = match value {
            Leaf::Reference(r) if r.kind == ResolvableKind::File => r,
            other => {
                return Err(PayloadError::unexpected_shape(
                    self.name(),
                    "file reference",
                    other.kind_name(),
                )
                .into())
            }
        };

        let id_dir = path_component(&reference.id)
            .filter(|c| *c == reference.id)
            .ok_or_else(|| {
                PayloadError::unexpected_shape(self.name(), "plain reference id", reference.id.clone())
            })?;

        let payload = self.store.fetch(&reference.id)?;
        let filename = reference
            .detail(FILENAME_DETAIL)
            .or(payload.filename.as_deref())
            .and_then(path_component)
            .unwrap_or_else(|| id_dir.clone());

        ensure_private_dir(&self.download_dir)?;
        let dir = self.download_dir.join(&id_dir);
        ensure_private_dir(&dir)?;
        let path = dir.join(&filename);
        write_new_file(&path, &payload.content)?;

        trace!(id = %reference.id, path = %path.display(), "materialized file");
        Ok(Value::file(LocalFile::new(filename, path)))
    }
}
