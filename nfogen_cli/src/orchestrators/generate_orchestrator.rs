//! Generate command orchestrator
//!
//! Walks the media tree and produces one descriptor per video file,
//! coordinating discovery with the core classifier, identifier deriver,
//! descriptor builder and serializer.

use crate::config::AppConfig;
use crate::file_discovery::{
    DirectoryWalker, DiscoveredDirectory, FileDiscoveryOptions, FileFilter, FileVerdict,
};
use anyhow::{Context, Result};
use log::{debug, info, trace, warn};
use nfogen_core::{
    DescriptorBuilder, DescriptorSerializer, DescriptorSink, IdentifierDeriver, NameClassifier,
};
use serde::Serialize;
use std::collections::HashSet;
use std::io::Write;
use std::path::{Path, PathBuf};

/// A file for which no descriptor could be produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// Outcome of one generate run
///
/// `skipped` and `written` hold descriptor paths and never share one.
/// `failed` holds the descriptor path, except when two videos in one
/// directory map to the same descriptor name: the later video is recorded
/// under its own path and its descriptor is not produced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Descriptors were built but not persisted
    pub dry_run: bool,
    /// Existing descriptors left untouched
    pub skipped: Vec<PathBuf>,
    /// Descriptors persisted (or that would be, in a dry run)
    pub written: Vec<PathBuf>,
    /// Descriptors that could not be built or persisted
    pub failed: Vec<FailedFile>,
}

impl RunSummary {
    /// Files for which a descriptor was attempted
    pub fn total(&self) -> usize {
        self.written.len() + self.failed.len()
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    pub fn written_count(&self) -> usize {
        self.written.len()
    }

    pub fn failed_count(&self) -> usize {
        self.failed.len()
    }

    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }

    fn fail(&mut self, path: PathBuf, reason: String) {
        self.failed.push(FailedFile { path, reason });
    }
}

/// Run-wide settings that are not part of descriptor content
#[derive(Debug, Clone, Default)]
struct GenerateSettings {
    root: PathBuf,
    overwrite: bool,
    dry_run: bool,
    /// Echo every rendered descriptor
    print: bool,
}

/// Orchestrator for the generate command
pub struct GenerateOrchestrator {
    classifier: NameClassifier,
    deriver: IdentifierDeriver,
    builder: DescriptorBuilder,
    serializer: DescriptorSerializer,
    filter: FileFilter,
    discovery: FileDiscoveryOptions,
    settings: GenerateSettings,
}

impl GenerateOrchestrator {
    /// Create an orchestrator from resolved configuration
    pub fn from_config(config: &AppConfig, dry_run: bool, print: bool) -> Result<Self> {
        config.validate()?;

        let filter = FileFilter::new(
            &config.scan.containers,
            &config.descriptor.extension,
            &config.scan.exclude,
        )
        .context("Invalid exclude pattern")?;

        let discovery = FileDiscoveryOptions::new()
            .with_exclude_patterns(config.scan.exclude.clone())
            .with_follow_links(config.scan.follow_links)
            .with_max_depth(config.scan.max_depth);

        let settings = GenerateSettings {
            root: config.scan.root.clone(),
            overwrite: config.scan.overwrite,
            dry_run,
            print,
        };

        debug!(
            "Generate orchestrator: root={}, overwrite={}, dry_run={dry_run}, id={}/{}",
            settings.root.display(),
            settings.overwrite,
            config.identifier.source,
            config.identifier.algorithm
        );

        Ok(Self {
            classifier: NameClassifier::new(),
            deriver: config.identifier_deriver(),
            builder: DescriptorBuilder::new(config.descriptor_options()),
            serializer: DescriptorSerializer::new(),
            filter,
            discovery,
            settings,
        })
    }

    /// Walk the root and produce descriptors
    ///
    /// Per-file failures are logged and collected in the summary; only
    /// setup errors (missing root, bad patterns) and echo failures abort.
    pub fn run(&self, sink: &mut dyn DescriptorSink, echo: &mut dyn Write) -> Result<RunSummary> {
        let walker = DirectoryWalker::new(&self.settings.root, self.discovery.clone())?;
        let mut summary = RunSummary {
            dry_run: self.settings.dry_run,
            ..Default::default()
        };

        for directory in walker {
            self.process_directory(&directory, sink, echo, &mut summary)?;
        }

        info!(
            "Generate finished: total={}, skipped={}, written={}, failed={}",
            summary.total(),
            summary.skipped_count(),
            summary.written_count(),
            summary.failed_count()
        );
        Ok(summary)
    }

    fn directory_season(&self, directory: &DiscoveredDirectory) -> Option<u32> {
        match self.classifier.season_for_directory(&directory.name) {
            Ok(season) => {
                debug!(
                    "Directory {} season: {season:?}",
                    directory.path.display()
                );
                season
            }
            Err(e) => {
                warn!(
                    "Ignoring season of directory {}: {e}",
                    directory.path.display()
                );
                None
            }
        }
    }

    fn process_directory(
        &self,
        directory: &DiscoveredDirectory,
        sink: &mut dyn DescriptorSink,
        echo: &mut dyn Write,
        summary: &mut RunSummary,
    ) -> Result<()> {
        let season = self.directory_season(directory);
        let descriptor_extension = self.filter.descriptor_extension();
        let mut claimed: HashSet<String> = HashSet::new();

        for name in &directory.files {
            let file_path = directory.path.join(name);
            let relative = file_path
                .strip_prefix(&self.settings.root)
                .unwrap_or(&file_path);

            let (base, extension) = match self.filter.check(relative, name) {
                FileVerdict::Candidate { base, extension } => (base, extension),
                FileVerdict::Descriptor => continue,
                FileVerdict::NoExtension => {
                    debug!("No extension, not processed: {}", file_path.display());
                    continue;
                }
                FileVerdict::Unsupported => {
                    debug!("File type not supported: {}", file_path.display());
                    continue;
                }
                FileVerdict::Excluded => {
                    debug!("Excluded by pattern: {}", file_path.display());
                    continue;
                }
            };

            let descriptor_name = format!("{base}.{descriptor_extension}");
            let descriptor_path = directory.path.join(&descriptor_name);

            if !claimed.insert(descriptor_name.clone()) {
                warn!(
                    "Descriptor {} already claimed by another file, not processed: {}",
                    descriptor_path.display(),
                    file_path.display()
                );
                summary.fail(
                    file_path,
                    format!(
                        "descriptor {} is already produced from another file",
                        descriptor_path.display()
                    ),
                );
                continue;
            }

            if !self.settings.overwrite && directory.contains_file(&descriptor_name) {
                debug!("Descriptor already exists: {}", descriptor_path.display());
                summary.skipped.push(descriptor_path);
                continue;
            }

            let document = match self.build_document(&directory.path, base, &extension, season) {
                Ok(document) => document,
                Err(e) => {
                    warn!("Cannot build descriptor {}: {e}", descriptor_path.display());
                    summary.fail(descriptor_path, e.to_string());
                    continue;
                }
            };

            if self.settings.print {
                writeln!(echo, "{document}").context("Failed to echo descriptor")?;
            }

            if self.settings.dry_run {
                debug!("Dry run, not writing: {}", descriptor_path.display());
                summary.written.push(descriptor_path);
                continue;
            }

            match sink.persist(&descriptor_path, &document) {
                Ok(()) => summary.written.push(descriptor_path),
                Err(e) => {
                    warn!("Descriptor export failure: {}: {e}", descriptor_path.display());
                    summary.fail(descriptor_path, e.to_string());
                }
            }
        }

        Ok(())
    }

    /// Classify, identify, build and render one file's descriptor
    fn build_document(
        &self,
        directory: &Path,
        base: &str,
        extension: &str,
        season: Option<u32>,
    ) -> nfogen_core::Result<String> {
        // The base name doubles as the title when no pattern matches.
        let record = self.classifier.resolve_episode(base, season, Some(base))?;
        trace!("Resolved {base:?} to {record:?}");

        let identifier = self
            .deriver
            .derive(directory, base, &format!(".{extension}"));
        let tree = self.builder.build(&record, &identifier);
        self.serializer.render(&tree)
    }
}
