//! `refgen menu` command implementation.

use clap::Args;

use super::{SiteArgs, open_site};
use crate::error::CliError;
use crate::output::{Output, write_json};

/// Arguments for the menu command.
#[derive(Args)]
pub(crate) struct MenuArgs {
    #[command(flatten)]
    site: SiteArgs,

    /// Library id (e.g. javascript).
    library: String,

    /// Library version (default: latest).
    #[arg(long)]
    version: Option<String>,
}

impl MenuArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.site.load_config(None)?;
        output.config_source(config.config_path.as_deref());
        let site = open_site(&config);

        let library = site.library(&self.library, self.version.as_deref())?;
        output.heading(format_args!(
            "{} {} ({})",
            library.library,
            library.version,
            library.library_path()
        ));

        let menu = site.menu(library)?;
        if menu.leaves().next().is_none() {
            output.warning("Menu is empty");
        }
        write_json(&menu)
    }
}
