use anyhow::{Context, Result};
use charmatrix::cli::{Cli, OutputFormat};
use charmatrix::config::{AnalysisConfig, DEFAULT_CONFIG_PATH};
use charmatrix::csv_output::CsvMatrixOutput;
use charmatrix::html_output::{HtmlHighlightOutput, HtmlMatrixOutput};
use charmatrix::json_output::JsonOutput;
use charmatrix::report::Report;
use charmatrix::text_output::TextMatrixOutput;
use charmatrix::{analyze, NgramAnalysis};
use clap::Parser;
use std::fs;
use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber; `--debug` turns on everything, otherwise RUST_LOG
/// decides and defaults to warnings only
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into())
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Load the config named on the command line, or ./config.json when it exists
fn load_config(args: &Cli) -> Result<AnalysisConfig> {
    if let Some(path) = &args.config {
        return AnalysisConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()));
    }

    let default_path = Path::new(DEFAULT_CONFIG_PATH);
    if default_path.exists() {
        AnalysisConfig::from_file(default_path)
            .with_context(|| format!("Failed to load config {}", default_path.display()))
    } else {
        tracing::debug!("no config file, using defaults");
        Ok(AnalysisConfig::default())
    }
}

/// Render a report and write it to `path`
fn write_report(
    path: &Path,
    report: &dyn Report,
    analysis: &NgramAnalysis,
    label: &str,
) -> Result<()> {
    let contents = report.render(analysis)?;
    fs::write(path, contents).with_context(|| format!("Failed to write {}", path.display()))?;

    tracing::info!(path = %path.display(), "{} written", label);
    eprintln!("{} written to {}", label, path.display());
    Ok(())
}

fn main() -> Result<()> {
    let args = Cli::parse();

    init_tracing(args.debug);

    let mut config = load_config(&args)?;
    args.apply_overrides(&mut config);
    config.validate()?;

    let Some(input) = config.paths.input_file.clone() else {
        anyhow::bail!(
            "No input file. Usage: charmatrix --input FILE or set input_file in {}",
            DEFAULT_CONFIG_PATH
        );
    };

    let text = fs::read_to_string(&input)
        .with_context(|| format!("Failed to read input file {}", input.display()))?;

    let analysis = analyze(&text, &config)?;

    let paths = &config.paths;
    if let Some(path) = &paths.output_file {
        write_report(
            path,
            &CsvMatrixOutput::new(),
            &analysis,
            "N-gram / M-gram CSV matrix",
        )?;
    }
    if let Some(path) = &paths.output_html_file {
        write_report(
            path,
            &HtmlMatrixOutput::new(),
            &analysis,
            "N-gram / M-gram HTML matrix",
        )?;
    }
    if let Some(path) = &paths.output_highlight_file {
        write_report(path, &HtmlHighlightOutput::new(), &analysis, "Highlighted text")?;
    }
    if let Some(path) = &paths.output_json_file {
        write_report(path, &JsonOutput, &analysis, "JSON report")?;
    }

    let stdout = match args.format {
        OutputFormat::Text => Some(TextMatrixOutput::new(args.color).render(&analysis)?),
        OutputFormat::Csv => Some(CsvMatrixOutput::new().render(&analysis)?),
        OutputFormat::Json => Some(JsonOutput.render(&analysis)?),
        OutputFormat::Quiet => None,
    };

    if let Some(output) = stdout {
        if output.ends_with('\n') {
            print!("{}", output);
        } else {
            println!("{}", output);
        }
    }

    Ok(())
}
