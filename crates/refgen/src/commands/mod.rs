//! CLI command implementations.

pub(crate) mod build;
pub(crate) mod menu;
pub(crate) mod paths;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use refgen_config::{CliSettings, Config, LibraryConfig};
use refgen_site::{LibraryRegistry, RefSite};
use refgen_source::{FsSource, SpecSource};

pub(crate) use build::BuildArgs;
pub(crate) use menu::MenuArgs;
pub(crate) use paths::PathsArgs;

use crate::error::CliError;

/// Arguments shared by every command that reads the inputs.
#[derive(Args)]
pub(crate) struct SiteArgs {
    /// Path to configuration file (default: auto-discover refgen.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Spec directory (overrides config).
    #[arg(short, long, env = "REFGEN_SPEC_DIR")]
    spec_dir: Option<PathBuf>,
}

impl SiteArgs {
    /// Load the configuration, applying `output_dir` as an override.
    pub(crate) fn load_config(&self, output_dir: Option<PathBuf>) -> Result<Config, CliError> {
        let cli_settings = CliSettings {
            spec_dir: self.spec_dir.clone(),
            output_dir,
        };
        Ok(Config::load(self.config.as_deref(), Some(&cli_settings))?)
    }
}

/// Build a reference site over the filesystem layout of `config`.
pub(crate) fn open_site(config: &Config) -> RefSite {
    let docs = &config.docs_resolved;
    let source: Arc<dyn SpecSource> = Arc::new(
        FsSource::new(docs.spec_dir.clone())
            .with_sections_file(docs.sections_file())
            .with_typespec_file(docs.typespec_file())
            .with_markdown_dir(docs.markdown_dir.clone()),
    );
    RefSite::new(source, library_registry(&config.libraries))
}

/// Register configured libraries, latest version first.
fn library_registry(libraries: &[LibraryConfig]) -> LibraryRegistry {
    libraries.iter().fold(LibraryRegistry::new(), |registry, library| {
        registry.with_library(
            library.id.clone(),
            library
                .versions
                .iter()
                .map(|v| (v.version.clone(), v.spec.clone())),
        )
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use refgen_config::VersionConfig;

    use super::*;

    #[test]
    fn test_library_registry_from_config() {
        let libraries = vec![
            LibraryConfig {
                id: "javascript".to_owned(),
                versions: vec![
                    VersionConfig {
                        version: "v2".to_owned(),
                        spec: "supabase_js_v2.yml".to_owned(),
                    },
                    VersionConfig {
                        version: "v1".to_owned(),
                        spec: "supabase_js_v1.yml".to_owned(),
                    },
                ],
            },
            LibraryConfig {
                id: "csharp".to_owned(),
                versions: vec![VersionConfig {
                    version: "v0".to_owned(),
                    spec: "supabase_csharp_v0.yml".to_owned(),
                }],
            },
        ];

        let registry = library_registry(&libraries);

        assert_eq!(
            registry
                .iter()
                .map(|v| (v.library_path(), v.spec_file.as_str()))
                .collect::<Vec<_>>(),
            vec![
                ("/javascript".to_owned(), "supabase_js_v2.yml"),
                ("/javascript/v1".to_owned(), "supabase_js_v1.yml"),
                ("/csharp".to_owned(), "supabase_csharp_v0.yml"),
            ]
        );
    }
}
