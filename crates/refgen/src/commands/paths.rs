//! `refgen paths` command implementation.

use clap::Args;

use super::{SiteArgs, open_site};
use crate::error::CliError;
use crate::output::{Output, write_json};

/// Arguments for the paths command.
#[derive(Args)]
pub(crate) struct PathsArgs {
    #[command(flatten)]
    site: SiteArgs,
}

impl PathsArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let config = self.site.load_config(None)?;
        Output::new().config_source(config.config_path.as_deref());
        let site = open_site(&config);
        let paths = site.static_paths()?;
        tracing::info!(count = paths.paths.len(), "Static paths enumerated");
        write_json(&paths)
    }
}
