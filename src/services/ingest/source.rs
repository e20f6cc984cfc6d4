//! # Source Adaptation
//!
//! Turns the different upload shapes produced by the front-ends into a display
//! name and a fully materialized byte buffer. Nothing here touches the filesystem
//! or looks at the extension.

use std::fmt;

use bytes::Bytes;
use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::trace;

use crate::error::IngestError;
use crate::utils::constant::FALLBACK_FILENAME;

/// Readable byte source backing an upload.
pub type UploadReader = Box<dyn AsyncRead + Send + Unpin>;

/// A web-framework upload: a reported filename plus a nested readable file.
pub struct FrameworkUpload {
    pub filename: Option<String>,
    pub content_type: Option<String>,
    pub file: UploadReader,
}

/// A generic readable object, such as a browser-session upload.
pub struct StreamUpload {
    pub name: Option<String>,
    pub reader: UploadReader,
}

/// An in-memory buffer with an optional name.
pub struct BufferUpload {
    pub name: Option<String>,
    pub buffer: Bytes,
}

/// An upload whose shape the pipeline cannot read.
#[derive(Debug, Clone)]
pub struct UnrecognizedUpload {
    pub kind: String,
}

/// One uploaded item as handed over by a front-end.
///
/// Variants are listed in detection priority order.
pub enum UploadHandle {
    Framework(FrameworkUpload),
    Stream(StreamUpload),
    Buffer(BufferUpload),
    Unrecognized(UnrecognizedUpload),
}

/// The adapted form of an [`UploadHandle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedUpload {
    pub name: String,
    pub data: Bytes,
}

impl UploadHandle {
    pub fn framework<R>(filename: Option<String>, content_type: Option<String>, file: R) -> Self
    where
        R: AsyncRead + Send + Unpin + 'static,
    {
        UploadHandle::Framework(FrameworkUpload {
            filename,
            content_type,
            file: Box::new(file),
        })
    }

    pub fn stream<R>(name: Option<String>, reader: R) -> Self
    where
        R: AsyncRead + Send + Unpin + 'static,
    {
        UploadHandle::Stream(StreamUpload {
            name,
            reader: Box::new(reader),
        })
    }

    pub fn buffer(name: Option<String>, buffer: impl Into<Bytes>) -> Self {
        UploadHandle::Buffer(BufferUpload {
            name,
            buffer: buffer.into(),
        })
    }

    pub fn unrecognized(kind: impl Into<String>) -> Self {
        UploadHandle::Unrecognized(UnrecognizedUpload { kind: kind.into() })
    }

    /// Short label of the handle shape, for logs.
    pub fn kind(&self) -> &str {
        match self {
            UploadHandle::Framework(_) => "framework",
            UploadHandle::Stream(_) => "stream",
            UploadHandle::Buffer(_) => "buffer",
            UploadHandle::Unrecognized(u) => &u.kind,
        }
    }

    /// The name reported by the handle, if any.
    pub fn reported_name(&self) -> Option<&str> {
        match self {
            UploadHandle::Framework(u) => u.filename.as_deref(),
            UploadHandle::Stream(u) => u.name.as_deref(),
            UploadHandle::Buffer(u) => u.name.as_deref(),
            UploadHandle::Unrecognized(_) => None,
        }
    }

    /// Resolves the display name and drains the whole byte source.
    ///
    /// The handle is consumed; its reader is dropped once fully read.
    ///
    /// # Errors
    ///
    /// - [`IngestError::UnsupportedHandle`] for an unrecognized shape
    /// - [`IngestError::Read`] if the underlying reader fails
    pub async fn resolve(self) -> Result<ResolvedUpload, IngestError> {
        let name = self
            .reported_name()
            .unwrap_or(FALLBACK_FILENAME)
            .to_string();

        let data = match self {
            UploadHandle::Framework(FrameworkUpload {
                file, content_type, ..
            }) => {
                trace!(name = %name, content_type = ?content_type, "Reading framework upload");
                drain(&name, file).await?
            }
            UploadHandle::Stream(StreamUpload { reader, .. }) => {
                trace!(name = %name, "Reading stream upload");
                drain(&name, reader).await?
            }
            UploadHandle::Buffer(BufferUpload { buffer, .. }) => buffer,
            UploadHandle::Unrecognized(UnrecognizedUpload { kind }) => {
                return Err(IngestError::UnsupportedHandle { kind });
            }
        };

        Ok(ResolvedUpload { name, data })
    }
}

async fn drain(name: &str, mut reader: UploadReader) -> Result<Bytes, IngestError> {
    let mut data = Vec::new();
    reader
        .read_to_end(&mut data)
        .await
        .map_err(|source| IngestError::Read {
            name: name.to_string(),
            source,
        })?;
    Ok(Bytes::from(data))
}

impl fmt::Debug for UploadHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadHandle")
            .field("kind", &self.kind())
            .field("name", &self.reported_name())
            .finish()
    }
}
