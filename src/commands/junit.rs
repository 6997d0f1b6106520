// JUnit command - bridge a JUnit XML report into the selected transport

use anyhow::{Context, Result};
use tracing::info;

use crate::cli::JunitArgs;
use crate::config::Config;
use crate::model::EntryParam;
use crate::transport::{create_reporter, create_reporter_from_entry};

pub fn handle_junit(args: &JunitArgs, config: &Config) -> Result<()> {
    let mut reporter = match (&args.output, &args.entry) {
        (Some(output), _) => create_reporter(Some(output.as_path()), config),
        (None, Some(entry)) => {
            let param = EntryParam::load(entry)
                .with_context(|| format!("Failed to load entry param: {}", entry.display()))?;
            create_reporter_from_entry(&param, config)
        }
        (None, None) => create_reporter(config.file.report_path.as_deref(), config),
    }
    .context("Failed to create reporter")?;

    reporter
        .report_junit_xml(&args.xml)
        .with_context(|| format!("Failed to report JUnit XML: {}", args.xml.display()))?;
    reporter.close().context("Failed to close reporter")?;

    info!("Reported JUnit XML {}", args.xml.display());
    Ok(())
}
