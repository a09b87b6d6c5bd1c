//! `refgen build` command implementation.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use rayon::prelude::*;
use refgen_site::{LibraryVersion, RefSite, StaticPath, StaticPaths};
use serde::Serialize;

use super::{SiteArgs, open_site};
use crate::error::CliError;
use crate::output::Output;

/// Name of the path list written next to the pages.
const PATHS_FILE: &str = "paths.json";

/// Directory holding the library-wide payloads.
const LIBRARIES_DIR: &str = "_libraries";

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    #[command(flatten)]
    site: SiteArgs,

    /// Output directory for the page payloads (default: .refgen/build/).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Only build the pages of this library.
    #[arg(short, long)]
    library: Option<String>,
}

impl BuildArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let start = Instant::now();

        let config = self.site.load_config(self.output_dir.clone())?;
        if config.libraries.is_empty() {
            output.warning("No libraries configured, nothing to build");
            return Ok(());
        }

        if let Some(id) = &self.library
            && config.library(id).is_none()
        {
            return Err(CliError::Validation(format!("Library not configured: {id}")));
        }

        let output_dir = config.docs_resolved.output_dir.clone();
        output.config_source(config.config_path.as_deref());
        output.info(format_args!("Spec: {}", config.docs_resolved.spec_dir.display()));
        output.info(format_args!("Output: {}", output_dir.display()));

        let site = open_site(&config);

        let libraries: Vec<&LibraryVersion> = site
            .libraries()
            .iter()
            .filter(|v| self.library.as_ref().is_none_or(|id| &v.library == id))
            .collect();

        let paths = StaticPaths {
            paths: site
                .static_paths()?
                .paths
                .into_iter()
                .filter(|p| {
                    self.library
                        .as_ref()
                        .is_none_or(|id| p.slug().first() == Some(id))
                })
                .collect(),
        };

        fs::create_dir_all(&output_dir)?;

        paths
            .paths
            .par_iter()
            .try_for_each(|path| write_page(&site, &output_dir, path))?;

        for library in &libraries {
            let props = site.static_props(library)?;
            let file = output_dir
                .join(LIBRARIES_DIR)
                .join(&library.library)
                .join(format!("{}.json", library.version));
            write_json_file(&file, &props)?;
            tracing::info!(
                library = %library.library,
                version = %library.version,
                docs = props.docs.len(),
                "Library props written"
            );
        }

        write_json_file(&output_dir.join(PATHS_FILE), &paths)?;

        output.success(format_args!(
            "Built {} pages for {} library versions in {:.1}s",
            paths.paths.len(),
            libraries.len(),
            start.elapsed().as_secs_f64()
        ));
        Ok(())
    }
}

/// Render one page and write it under `output_dir`.
fn write_page(site: &RefSite, output_dir: &Path, path: &StaticPath) -> Result<(), CliError> {
    let file = page_file(output_dir, path.slug())?;
    let props = site.page_props(path.slug())?;
    write_json_file(&file, &props)?;
    tracing::debug!(path = %file.display(), "Page written");
    Ok(())
}

/// Output file of the page at `slug`.
///
/// Rejects slugs that would escape `output_dir`.
fn page_file(output_dir: &Path, slug: &[String]) -> Result<PathBuf, CliError> {
    if slug.is_empty() {
        return Err(CliError::Validation("Empty page path".to_owned()));
    }

    let mut file = output_dir.to_path_buf();
    for segment in slug {
        for part in segment.split('/') {
            if part.is_empty() || part == "." || part == ".." {
                return Err(CliError::Validation(format!(
                    "Invalid page path: {}",
                    slug.join("/")
                )));
            }
        }
        file.push(segment);
    }

    let mut name = file.into_os_string();
    name.push(".json");
    Ok(PathBuf::from(name))
}

fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), CliError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_vec_pretty(value)?;
    fs::write(path, json)?;
    Ok(())
}
