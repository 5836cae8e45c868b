//! Build artifacts and the per-cycle manifest

use crate::{PackError, PackResult};
use bundlezip_archive::EntrySource;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;

/// Kind of build output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    /// Generated code chunk; may carry a source map
    Code,
    /// Copied or emitted asset
    Asset,
}

/// Where an artifact's bytes come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtifactSource {
    /// Buffer held by the pipeline
    Bytes(Vec<u8>),
    /// File already written by the pipeline
    File(PathBuf),
}

impl From<ArtifactSource> for EntrySource {
    fn from(source: ArtifactSource) -> Self {
        match source {
            ArtifactSource::Bytes(bytes) => EntrySource::Bytes(bytes),
            ArtifactSource::File(path) => EntrySource::File(path),
        }
    }
}

/// A single named unit of build output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildArtifact {
    name: String,
    kind: ArtifactKind,
    source: ArtifactSource,
    source_map: Option<Vec<u8>>,
}

impl BuildArtifact {
    /// Create an in-memory code chunk
    pub fn code(name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self::new(name, ArtifactKind::Code, ArtifactSource::Bytes(content.into()))
    }

    /// Create an in-memory asset
    pub fn asset(name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self::new(name, ArtifactKind::Asset, ArtifactSource::Bytes(content.into()))
    }

    /// Create an artifact backed by a file on disk
    pub fn on_disk(name: impl Into<String>, kind: ArtifactKind, path: impl Into<PathBuf>) -> Self {
        Self::new(name, kind, ArtifactSource::File(path.into()))
    }

    fn new(name: impl Into<String>, kind: ArtifactKind, source: ArtifactSource) -> Self {
        Self {
            name: name.into(),
            kind,
            source,
            source_map: None,
        }
    }

    /// Attach a source map
    ///
    /// Only code artifacts keep the map; it is dropped for assets.
    #[must_use]
    pub fn with_source_map(mut self, map: impl Into<Vec<u8>>) -> Self {
        if self.kind == ArtifactKind::Code {
            self.source_map = Some(map.into());
        }
        self
    }

    /// Archive-relative entry name
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ArtifactKind {
        self.kind
    }

    pub fn source(&self) -> &ArtifactSource {
        &self.source
    }

    pub fn source_map(&self) -> Option<&[u8]> {
        self.source_map.as_deref()
    }

    /// Name of the companion `.map` entry, if this artifact produces one
    pub fn map_entry_name(&self) -> Option<String> {
        match (self.kind, self.source_map()) {
            (ArtifactKind::Code, Some(map)) if !map.is_empty() => Some(format!("{}.map", self.name)),
            _ => None,
        }
    }

    pub(crate) fn into_parts(self) -> (String, ArtifactSource, Option<Vec<u8>>) {
        (self.name, self.source, self.source_map)
    }
}

/// Ordered collection of artifacts produced in one build cycle
///
/// Names are unique; iteration follows insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    artifacts: Vec<BuildArtifact>,
    names: HashSet<String>,
}

impl Manifest {
    /// Create an empty manifest
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a manifest, rejecting duplicate names
    pub fn try_from_artifacts(
        artifacts: impl IntoIterator<Item = BuildArtifact>,
    ) -> PackResult<Self> {
        let mut manifest = Self::new();
        for artifact in artifacts {
            manifest.push(artifact)?;
        }
        Ok(manifest)
    }

    /// Append an artifact
    pub fn push(&mut self, artifact: BuildArtifact) -> PackResult<()> {
        if !self.names.insert(artifact.name.clone()) {
            return Err(PackError::DuplicateArtifact(artifact.name));
        }
        self.artifacts.push(artifact);
        Ok(())
    }

    /// Builder-style append
    pub fn with(mut self, artifact: BuildArtifact) -> PackResult<Self> {
        self.push(artifact)?;
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BuildArtifact> {
        self.artifacts.iter()
    }
}

impl TryFrom<Vec<BuildArtifact>> for Manifest {
    type Error = PackError;

    fn try_from(artifacts: Vec<BuildArtifact>) -> PackResult<Self> {
        Self::try_from_artifacts(artifacts)
    }
}

impl IntoIterator for Manifest {
    type Item = BuildArtifact;
    type IntoIter = std::vec::IntoIter<BuildArtifact>;

    fn into_iter(self) -> Self::IntoIter {
        self.artifacts.into_iter()
    }
}

impl<'a> IntoIterator for &'a Manifest {
    type Item = &'a BuildArtifact;
    type IntoIter = std::slice::Iter<'a, BuildArtifact>;

    fn into_iter(self) -> Self::IntoIter {
        self.artifacts.iter()
    }
}
