use anyhow::{Context, bail};
use df_extract::{DataExtractor, ParsedData, dataextraction_factory};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ExtractArgs;
use crate::output::output;

/// Handle `dfx extract`.
pub async fn handle(args: &ExtractArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let extractor = dataextraction_factory(&args.path)
        .await
        .with_context(|| format!("failed to extract {}", args.path.display()))?;

    match (args.select.as_deref(), extractor.parsed_data()) {
        (None, data) => output(&data, flags.format),
        (Some(expr), ParsedData::Xml(document)) => {
            let matches = document.find_all(expr)?;
            tracing::debug!(expr, matches = matches.len(), "evaluated element path");
            output(&matches, flags.format)
        }
        (Some(_), data) => bail!(
            "--select only applies to XML documents; {} is {}",
            args.path.display(),
            data.format()
        ),
    }
}
