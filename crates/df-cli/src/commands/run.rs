use std::io::Write;

use anyhow::{Context, bail};
use df_config::{DfxConfig, SampleConfig};
use df_extract::{
    DataExtractor, ParsedData, TableRows, XmlDocument, XmlElement, extract_data_from,
};
use serde_json::Value;

use crate::cli::root_commands::RunArgs;
use crate::output::{is_truthy, value_to_text};

/// Persons reported by the XML sample.
const LIARS_PATH: &str = ".//person[lastName='Liar']";

/// Handle `dfx run`.
pub async fn handle(args: &RunArgs, config: &DfxConfig) -> anyhow::Result<()> {
    let samples = args.resolve(&config.samples);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    execute(&samples, &mut out).await
}

/// Extract the database, movies and people samples in that order.
///
/// A database error is printed and stops the run before the other samples.
pub async fn execute(samples: &SampleConfig, out: &mut impl Write) -> anyhow::Result<()> {
    for path in [&samples.database, &samples.movies, &samples.people] {
        let extractor = match extract_data_from(path, out).await {
            Ok(Some(extractor)) => extractor,
            Ok(None) => {
                tracing::warn!(path = %path.display(), "skipping sample without an extractor");
                continue;
            }
            Err(err) if err.is_database() => {
                writeln!(out, "Connection error: {err}")?;
                writeln!(out, "The SQLite connection is closed")?;
                return Err(anyhow::Error::new(err)
                    .context(format!("failed to query {}", path.display())));
            }
            Err(err) => {
                return Err(
                    anyhow::Error::new(err).context(format!("failed to extract {}", path.display()))
                );
            }
        };

        match extractor.parsed_data() {
            ParsedData::Table(rows) => report_table(rows, out)?,
            ParsedData::Json(value) => report_movies(value, out)?,
            ParsedData::Xml(document) => report_liars(document, out)?,
        }
    }
    Ok(())
}

fn report_table(rows: &TableRows, out: &mut impl Write) -> anyhow::Result<()> {
    writeln!(out, "Data from table: {rows}")?;
    writeln!(out, "The SQLite connection is closed")?;
    writeln!(out)?;
    Ok(())
}

fn report_movies(value: &Value, out: &mut impl Write) -> anyhow::Result<()> {
    let Value::Array(movies) = value else {
        bail!("expected a top-level JSON array of movies");
    };

    writeln!(out, "Found: {} movies", movies.len())?;
    for (index, movie) in movies.iter().enumerate() {
        let Value::Object(fields) = movie else {
            bail!("movie #{index} is not a JSON object");
        };
        let title = fields
            .get("title")
            .with_context(|| format!("movie #{index} has no title"))?;
        writeln!(out, "Title: {}", value_to_text(title))?;

        for (key, label) in [("year", "Year"), ("director", "Director"), ("genre", "Genre")] {
            if let Some(field) = fields.get(key).filter(|v| is_truthy(v)) {
                writeln!(out, "{label}: {}", value_to_text(field))?;
            }
        }
    }
    writeln!(out)?;
    Ok(())
}

fn report_liars(document: &XmlDocument, out: &mut impl Write) -> anyhow::Result<()> {
    let liars = document.find_all(LIARS_PATH)?;

    writeln!(out, "found: {} persons", liars.len())?;
    for liar in liars {
        writeln!(out, "first name: {}", child_text(liar, "firstName")?)?;
        writeln!(out, "last name: {}", child_text(liar, "lastName")?)?;

        let phones = liar
            .child("phoneNumbers")
            .context("person has no <phoneNumbers> element")?;
        for phone in phones.children() {
            let kind = phone
                .attr("type")
                .with_context(|| format!("<{}> has no type attribute", phone.name()))?;
            writeln!(
                out,
                "phone number ({kind}): {}",
                phone.text().unwrap_or_default()
            )?;
        }
        writeln!(out)?;
    }
    Ok(())
}

fn child_text<'a>(element: &'a XmlElement, name: &str) -> anyhow::Result<&'a str> {
    let child = element
        .child(name)
        .with_context(|| format!("<{}> has no <{name}> element", element.name()))?;
    Ok(child.text().unwrap_or_default())
}
