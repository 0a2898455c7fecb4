use std::io::Read;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use notetaker_core::{
    analyse_transcript, extract_entities, extract_keywords, generate_soap_note, summarise,
    AppContext, CoreConfig,
};

#[derive(Parser)]
#[command(name = "notetaker")]
#[command(about = "Extract clinical information from consultation transcripts")]
struct Cli {
    /// Read the text from this file instead of stdin
    #[arg(long, short, global = true)]
    file: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Json, global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Clone, Copy, Debug, PartialEq, Eq)]
enum Commands {
    /// Extract symptoms, diagnosis, treatment, current status and prognosis
    Entities,
    /// Structured summary including the patient name
    Summary,
    /// Sorted keyword list
    Keywords,
    /// SOAP note
    Soap,
    /// Entities, summary, keywords and SOAP note together
    Analyse,
    /// Sentiment and intent of a patient's dialogue
    Sentiment,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    Json,
    Yaml,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let Some(command) = cli.command else {
        println!("Use 'notetaker --help' for commands");
        return Ok(());
    };

    let text = read_input(cli.file.as_deref(), std::io::stdin().lock())?;
    println!("{}", run(command, &text, cli.format)?);

    Ok(())
}

/// Reads the whole input text from `file`, or from `stdin` when no file is given.
fn read_input(file: Option<&Path>, mut stdin: impl Read) -> std::io::Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path),
        None => {
            let mut text = String::new();
            stdin.read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

fn run(
    command: Commands,
    text: &str,
    format: OutputFormat,
) -> Result<String, Box<dyn std::error::Error>> {
    tracing::debug!(?command, ?format, chars = text.len(), "running command");
    match command {
        Commands::Entities => render(&extract_entities(text), format),
        Commands::Summary => render(&summarise(text), format),
        Commands::Keywords => render(&extract_keywords(text), format),
        Commands::Soap => render(&generate_soap_note(text), format),
        Commands::Analyse => render(&analyse_transcript(text), format),
        Commands::Sentiment => {
            let ctx = AppContext::initialise(CoreConfig::from_env()?)?;
            render(&ctx.analyse_sentiment(text), format)
        }
    }
}

fn render<T: Serialize>(
    value: &T,
    format: OutputFormat,
) -> Result<String, Box<dyn std::error::Error>> {
    let rendered = match format {
        OutputFormat::Json => serde_json::to_string_pretty(value)?,
        OutputFormat::Yaml => serde_yaml::to_string(value)?,
    };
    Ok(rendered.trim_end().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const TRANSCRIPT: &str =
        "Janet Jones has neck pain after a whiplash injury. Painkillers and advice given.";

    #[test]
    fn reads_input_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, "{}", TRANSCRIPT).expect("write transcript");

        let text = read_input(Some(file.path()), std::io::empty()).expect("read");
        assert_eq!(text, TRANSCRIPT);
    }

    #[test]
    fn reads_input_from_stdin_without_file() {
        let text = read_input(None, std::io::Cursor::new("nothing to report")).expect("read");
        assert_eq!(text, "nothing to report");
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let err = read_input(Some(dir.path().join("absent.txt").as_path()), std::io::empty())
            .expect_err("missing file");
        assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
    }

    #[test]
    fn renders_summary_as_json() {
        let output = run(Commands::Summary, TRANSCRIPT, OutputFormat::Json).expect("run");
        let value: serde_json::Value = serde_json::from_str(&output).expect("json");
        assert_eq!(value["Patient_Name"], "Janet Jones");
        assert_eq!(value["Treatment"], serde_json::json!(["Painkillers", "Advice"]));
    }

    #[test]
    fn renders_keywords_as_yaml() {
        let output = run(Commands::Keywords, TRANSCRIPT, OutputFormat::Yaml).expect("run");
        assert_eq!(output, "- Neck pain\n- Painkillers\n- Whiplash injury");
    }

    #[test]
    fn renders_soap_note_with_section_keys() {
        let output = run(Commands::Soap, "", OutputFormat::Json).expect("run");
        assert!(output.contains("\"Chief_Complaint\": \"Routine checkup\""));
        assert!(output.contains("\"Follow-Up\""));
    }

    #[test]
    fn parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["notetaker", "keywords", "--format", "yaml", "-f", "t.txt"])
            .expect("parse");
        assert_eq!(cli.command, Some(Commands::Keywords));
        assert_eq!(cli.format, OutputFormat::Yaml);
        assert_eq!(cli.file.as_deref(), Some(Path::new("t.txt")));
    }
}
