//! Proxy list generator turning input files into one grouped document

use crate::error::GeneratorError;
use crate::proxy::codec;
use crate::proxy::models::{ProxyGroup, ProxyGroups};
use crate::proxy::parser::ProxyParser;
use crate::Result;
use log::{debug, info};
use std::io::{self, ErrorKind, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Default number of proxies a consumer selects from each group
const DEFAULT_SELECT_PER_GROUP: u32 = 2;

/// Default connection count attached to every proxy
const DEFAULT_CONN_NUM: u32 = 3;

/// Configuration for proxy list generation
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Written to the document root as `selectPerGroup`
    pub select_per_group: u32,
    /// Written to every record as `connNum`
    pub conn_num: u32,
    /// Key to obfuscate the rendered document with
    pub key: Option<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            select_per_group: DEFAULT_SELECT_PER_GROUP,
            conn_num: DEFAULT_CONN_NUM,
            key: None,
        }
    }
}

impl GeneratorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_select_per_group(mut self, select_per_group: u32) -> Self {
        self.select_per_group = select_per_group;
        self
    }

    pub fn with_conn_num(mut self, conn_num: u32) -> Self {
        self.conn_num = conn_num;
        self
    }

    pub fn with_key(mut self, key: String) -> Self {
        self.key = Some(key);
        self
    }
}

/// Generator building a proxy list document from definition files
pub struct ProxyListGenerator {
    config: GeneratorConfig,
}

impl Default for ProxyListGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl ProxyListGenerator {
    /// Create a new generator with default configuration
    pub fn new() -> Self {
        Self::with_config(GeneratorConfig::default())
    }

    /// Create a new generator with custom configuration
    pub fn with_config(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Refuse to go on when something already exists at the output path
    pub fn check_output<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        // symlink_metadata so that a dangling link also counts as present
        match path.symlink_metadata() {
            Ok(_) => Err(GeneratorError::OutputExists {
                path: path.to_path_buf(),
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(GeneratorError::io(path, e)),
        }
    }

    /// Build the group for one input file
    ///
    /// Returns `Ok(None)` when the file contains no proxy blocks.
    pub fn build_group<P: AsRef<Path>>(&self, path: P) -> Result<Option<ProxyGroup>> {
        let path = path.as_ref();
        // The group name is the path verbatim, so it has to be valid UTF-8
        let Some(name) = path.to_str() else {
            return Err(GeneratorError::NonUtf8Path {
                path: path.to_path_buf(),
            });
        };

        let records = ProxyParser::parse_file(path, self.config.conn_num)?;
        if records.is_empty() {
            return Ok(None);
        }

        let group = ProxyGroup::new(name.to_string(), records);
        info!("Built group {} with {} proxies", group.name, group.len());
        Ok(Some(group))
    }

    /// Build one group per input, in order, stopping at the first failure
    pub fn generate<P: AsRef<Path>>(&self, inputs: &[P]) -> Result<ProxyGroups> {
        let mut document = ProxyGroups::new(self.config.select_per_group);

        for input in inputs {
            let path = input.as_ref();
            let group = self
                .build_group(path)?
                .ok_or_else(|| GeneratorError::EmptyGroup {
                    path: path.to_path_buf(),
                })?;
            document.groups.push(group);
        }

        Ok(document)
    }

    /// Render a document with this generator's key
    pub fn render(&self, document: &ProxyGroups) -> Result<Vec<u8>> {
        codec::encode_document(document, self.config.key.as_deref())
    }

    /// Write a document to a path that must not exist yet
    pub fn write_document<P: AsRef<Path>>(&self, document: &ProxyGroups, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = self.render(document)?;

        persist_with(path, |file| file.write_all(&content))?;

        debug!("Wrote {} bytes to {}", content.len(), path.display());
        Ok(())
    }

    /// Check the output path, build every group, then write the document
    ///
    /// Nothing is written unless every input produced a group.
    pub fn run<O, P>(&self, output: O, inputs: &[P]) -> Result<ProxyGroups>
    where
        O: AsRef<Path>,
        P: AsRef<Path>,
    {
        let output = output.as_ref();
        self.check_output(output)?;

        let document = self.generate(inputs)?;
        self.write_document(&document, output)?;

        info!(
            "Saved {} groups with {} proxies to {}",
            document.groups.len(),
            document.record_count(),
            output.display()
        );
        Ok(document)
    }
}

/// Fill a temporary file next to `path` and move it into place
///
/// The temporary file is removed if `write` fails, and the final rename never
/// replaces an existing file, so `path` either holds the complete content or
/// does not exist.
fn persist_with<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut NamedTempFile) -> io::Result<()>,
{
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir)
        .map_err(|e| GeneratorError::io(dir, e))?;
    write(&mut file).map_err(|e| GeneratorError::io(path, e))?;
    file.as_file()
        .sync_all()
        .map_err(|e| GeneratorError::io(path, e))?;

    if let Err(e) = file.persist_noclobber(path) {
        return Err(match e.error.kind() {
            ErrorKind::AlreadyExists => GeneratorError::OutputExists {
                path: path.to_path_buf(),
            },
            _ => GeneratorError::io(path, e.error),
        });
    }
    Ok(())
}
