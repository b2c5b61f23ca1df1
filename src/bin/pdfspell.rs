//! CLI binary for pdfspell.
//!
//! A thin shim over the library crate: resolves the input/output paths
//! (arguments or interactive prompts), maps flags to `PipelineConfig`, runs
//! the pipeline and prints one status line.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use pdfspell::{run, PipelineConfig, PipelineProgressCallback, ProgressCallback, RunOutcome};
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn paint(code: &str, s: &str) -> String {
    if io::stdout().is_terminal() {
        format!("\x1b[{code}m{s}\x1b[0m")
    } else {
        s.to_string()
    }
}
fn green(s: &str) -> String {
    paint("32", s)
}
fn red(s: &str) -> String {
    paint("31", s)
}
fn bold(s: &str) -> String {
    paint("1", s)
}

// ── CLI progress callback using indicatif ────────────────────────────────────

const TICKS: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"];

/// Terminal progress: a spinner while the PDF opens, then a bar over pages,
/// then a bar over tokens.
struct CliProgressCallback {
    bar: ProgressBar,
}

impl CliProgressCallback {
    fn new() -> Arc<Self> {
        let bar = ProgressBar::new(0);
        let spinner_style = ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(TICKS);
        bar.set_style(spinner_style);
        bar.set_prefix("Preparing");
        bar.set_message("Opening PDF…");
        bar.enable_steady_tick(Duration::from_millis(80));
        Arc::new(Self { bar })
    }

    fn activate_bar(&self, prefix: &'static str, unit: &str, total: usize) {
        let template = format!(
            "{{spinner:.cyan}} {{prefix:.bold}}  [{{bar:42.green/238}}] {{pos:>5}}/{{len}} {unit}  ⏱ {{elapsed_precise}}"
        );
        let style = ProgressStyle::with_template(&template)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▉▊▋▌▍▎▏  ")
            .tick_strings(TICKS);
        self.bar.set_style(style);
        self.bar.set_length(total as u64);
        self.bar.set_position(0);
        self.bar.set_prefix(prefix);
        self.bar.reset_eta();
    }
}

impl PipelineProgressCallback for CliProgressCallback {
    fn on_extraction_start(&self, total_pages: usize) {
        self.activate_bar("Extracting", "pages", total_pages);
    }

    fn on_page_extracted(&self, _page_num: usize, _total_pages: usize, _chars: usize) {
        self.bar.inc(1);
    }

    fn on_correction_start(&self, total_tokens: usize) {
        self.activate_bar("Correcting", "words", total_tokens);
    }

    fn on_tokens_corrected(&self, done: usize, _total_tokens: usize) {
        self.bar.set_position(done as u64);
    }

    fn on_write_complete(&self, _bytes: usize) {
        self.bar.finish_and_clear();
    }
}

impl Drop for CliProgressCallback {
    fn drop(&mut self) {
        if !self.bar.is_finished() {
            self.bar.finish_and_clear();
        }
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Prompt for both paths
  pdfspell

  # Portuguese (default) correction
  pdfspell relatorio.pdf relatorio.txt

  # English, with an explicit dictionary file
  pdfspell --language en --dictionary en.json.gz paper.pdf paper.txt

  # Faster, distance-1 corrections only
  pdfspell --max-edit-distance 1 book.pdf book.txt

  # Machine-readable run statistics
  pdfspell --json doc.pdf doc.txt

DICTIONARIES:
  For --language pt the first of pt.json.gz, pt.json, pt.txt found in the
  dictionary directories is used. Directories are searched in order:
    --dictionary-dir DIR (repeatable), else
    $PDFSPELL_DICTIONARY_DIR entries, then ./dictionaries
  JSON files map words to frequencies ({"casa": 1234, ...}); the language
  files shipped with pyspellchecker work as-is. Text files hold one
  "word [frequency]" entry per line.

ENVIRONMENT VARIABLES:
  PDFSPELL_LANGUAGE        Default for --language
  PDFSPELL_DICTIONARY      Default for --dictionary
  PDFSPELL_DICTIONARY_DIR  Extra dictionary directories (path list)
  PDFIUM_LIB_PATH          Path to an existing libpdfium
  RUST_LOG                 Override log filter (e.g. pdfspell=debug)
"#;

/// Extract text from a PDF, correct its spelling, and save it as UTF-8 text.
#[derive(Parser, Debug)]
#[command(
    name = "pdfspell",
    version,
    about = "Extract text from a PDF, correct its spelling, and save it as UTF-8 text",
    long_about = "Extract the text of every page of a PDF (via pdfium), replace misspelled \
words using a frequency dictionary for the chosen language, and write the result to a \
plain UTF-8 text file. Paths not given as arguments are asked for interactively.",
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// PDF file to read (prompted for when omitted).
    input: Option<PathBuf>,

    /// Text file to write (prompted for when omitted).
    output: Option<PathBuf>,

    /// Correction language: pt, en, es, pt-BR, …
    #[arg(short, long, env = "PDFSPELL_LANGUAGE", default_value = "pt")]
    language: String,

    /// Dictionary file to use instead of searching dictionary directories.
    #[arg(long, env = "PDFSPELL_DICTIONARY")]
    dictionary: Option<PathBuf>,

    /// Directory to search for <lang>.json.gz / <lang>.json / <lang>.txt (repeatable).
    #[arg(long = "dictionary-dir", value_name = "DIR")]
    dictionary_dirs: Vec<PathBuf>,

    /// Maximum edit distance for corrections (1 or 2).
    #[arg(long, env = "PDFSPELL_MAX_EDIT_DISTANCE", default_value_t = 2,
          value_parser = clap::value_parser!(u8).range(1..=2))]
    max_edit_distance: u8,

    /// Emit corrections in dictionary (lower) case instead of the original word's case.
    #[arg(long, env = "PDFSPELL_NO_PRESERVE_CASE")]
    no_preserve_case: bool,

    /// PDF user password for encrypted documents.
    #[arg(long, env = "PDFSPELL_PASSWORD")]
    password: Option<String>,

    /// Print run statistics as JSON instead of a status line.
    #[arg(long, env = "PDFSPELL_JSON")]
    json: bool,

    /// Disable progress bar.
    #[arg(long, env = "PDFSPELL_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "PDFSPELL_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "PDFSPELL_QUIET")]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // Keep INFO logs out of the way of the progress bar.
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json && io::stderr().is_terminal();
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Paths ────────────────────────────────────────────────────────────
    let input = match cli.input.clone() {
        Some(p) => p,
        None => prompt_path("Path of the PDF file")?,
    };
    let output = match cli.output.clone() {
        Some(p) => p,
        None => prompt_path("Path to save the TXT file")?,
    };

    // ── Build config ─────────────────────────────────────────────────────
    let progress_cb: Option<ProgressCallback> = if show_progress {
        Some(CliProgressCallback::new() as ProgressCallback)
    } else {
        None
    };
    let config = build_config(&cli, progress_cb)?;

    // ── Run ──────────────────────────────────────────────────────────────
    // A missing dictionary is the only error that aborts with a non-zero exit.
    let outcome = run(&input, &output, &config).context("Spelling correction could not start")?;
    drop(config);

    match outcome {
        RunOutcome::Saved { path, stats } => {
            if cli.json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&stats).context("Failed to serialise stats")?
                );
            } else if !cli.quiet {
                println!(
                    "{} Text saved to '{}'  ({} pages, {}/{} words corrected, {}ms)",
                    green("✔"),
                    bold(&path.display().to_string()),
                    stats.page_count,
                    stats.corrected_tokens,
                    stats.token_count,
                    stats.total_duration_ms,
                );
            }
        }
        RunOutcome::ExtractionFailed(e) => {
            println!("{} Could not extract text from the PDF: {}", red("✘"), e);
        }
        RunOutcome::WriteFailed(e) => {
            println!("{} Could not save the text file: {}", red("✘"), e);
        }
    }

    Ok(())
}

/// Map CLI args to `PipelineConfig`.
fn build_config(cli: &Cli, progress: Option<ProgressCallback>) -> Result<PipelineConfig> {
    let mut builder = PipelineConfig::builder()
        .language(cli.language.clone())
        .dictionary_dirs(cli.dictionary_dirs.iter().cloned())
        .max_edit_distance(cli.max_edit_distance)
        .preserve_case(!cli.no_preserve_case);

    if let Some(ref file) = cli.dictionary {
        builder = builder.dictionary_file(file.clone());
    }
    if let Some(ref pwd) = cli.password {
        builder = builder.password(pwd.clone());
    }
    if let Some(cb) = progress {
        builder = builder.progress_callback(cb);
    }

    builder.build().context("Invalid configuration")
}

/// Ask for a path on stdout and read one line from stdin.
fn prompt_path(label: &str) -> Result<PathBuf> {
    let mut stdout = io::stdout();
    write!(stdout, "{label}: ").context("Failed to write prompt")?;
    stdout.flush().context("Failed to write prompt")?;

    let mut line = String::new();
    let n = io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read from stdin")?;
    if n == 0 {
        anyhow::bail!("No answer for '{label}': stdin is closed");
    }

    let path = clean_path_answer(&line);
    if path.is_empty() {
        anyhow::bail!("No answer for '{label}': empty path");
    }
    Ok(PathBuf::from(path))
}

/// Strip the newline and the quotes terminals add to dragged-in paths.
fn clean_path_answer(line: &str) -> &str {
    line.trim().trim_matches(|c| c == '"' || c == '\'')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_path_answer_strips_newline_and_quotes() {
        assert_eq!(clean_path_answer("doc.pdf\n"), "doc.pdf");
        assert_eq!(clean_path_answer("'/tmp/my doc.pdf'\r\n"), "/tmp/my doc.pdf");
        assert_eq!(clean_path_answer("\"a.txt\""), "a.txt");
        assert_eq!(clean_path_answer("   \n"), "");
    }

    #[test]
    fn cli_defaults_to_portuguese() {
        let cli = Cli::try_parse_from(["pdfspell", "in.pdf", "out.txt"]).unwrap();
        assert_eq!(cli.language, "pt");
        assert_eq!(cli.max_edit_distance, 2);
        let config = build_config(&cli, None).unwrap();
        assert_eq!(config.language.as_str(), "pt");
        assert!(config.preserve_case);
    }

    #[test]
    fn cli_rejects_out_of_range_edit_distance() {
        assert!(Cli::try_parse_from(["pdfspell", "--max-edit-distance", "3", "a", "b"]).is_err());
    }

    #[test]
    fn cli_paths_are_optional() {
        let cli = Cli::try_parse_from(["pdfspell"]).unwrap();
        assert!(cli.input.is_none());
        assert!(cli.output.is_none());
    }

    #[test]
    fn cli_collects_dictionary_dirs() {
        let cli = Cli::try_parse_from([
            "pdfspell",
            "--dictionary-dir",
            "a",
            "--dictionary-dir",
            "b",
            "in.pdf",
            "out.txt",
        ])
        .unwrap();
        let config = build_config(&cli, None).unwrap();
        assert_eq!(
            config.dictionary_dirs,
            vec![PathBuf::from("a"), PathBuf::from("b")]
        );
    }

    #[test]
    fn invalid_language_is_config_error() {
        let cli = Cli::try_parse_from(["pdfspell", "-l", "!!", "in.pdf", "out.txt"]).unwrap();
        assert!(build_config(&cli, None).is_err());
    }
}
