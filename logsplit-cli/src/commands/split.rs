//! Split command implementation

use crate::{
    config::CliConfig,
    error::CliError,
    input::resolve_patterns,
    output::{JsonFormatter, OutputFormatter, RecordEntry, TextFormatter},
    progress::ProgressReporter,
};
use anyhow::{Context, Result};
use clap::Args;
use logsplit_engine::{Input, LogProcessor, MultilineConfig, Output};
use rayon::prelude::*;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Arguments for the split command
#[derive(Debug, Args)]
pub struct SplitArgs {
    /// Input files or patterns (supports glob)
    #[arg(short, long, value_name = "FILE/PATTERN", required = true)]
    pub input: Vec<String>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Encoding of the input files
    #[arg(short, long, value_name = "NAME")]
    pub encoding: Option<String>,

    /// Records begin at each match of this pattern
    #[arg(long, value_name = "REGEX", conflicts_with = "line_end_pattern")]
    pub line_start_pattern: Option<String>,

    /// Records end at each match of this pattern
    #[arg(long, value_name = "REGEX")]
    pub line_end_pattern: Option<String>,

    /// Keep whitespace at the start of each record
    #[arg(long)]
    pub preserve_leading: bool,

    /// Keep whitespace at the end of each record
    #[arg(long)]
    pub preserve_trailing: bool,

    /// Largest record in bytes; longer records are truncated
    #[arg(long, value_name = "BYTES")]
    pub max_log_size: Option<usize>,

    /// Drop an unterminated record at the end of each file
    #[arg(long)]
    pub no_flush_at_eof: bool,

    /// Idle period in milliseconds before a partial record is flushed
    #[arg(long, value_name = "MS")]
    pub force_flush_period_ms: Option<u64>,

    /// Also output records that are empty after trimming
    #[arg(long)]
    pub keep_empty: bool,

    /// Number of worker threads (default: all cores)
    #[arg(short, long, value_name = "N")]
    pub threads: Option<usize>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Records separated by newlines
    Text,
    /// JSON array of records with metadata
    Json,
}

impl SplitArgs {
    /// Execute the split command
    pub fn execute(&self) -> Result<()> {
        self.init_logging()?;

        log::info!("Starting log splitting");
        log::debug!("Arguments: {:?}", self);

        let config = self.effective_config()?;
        let processor = config.processor()?;
        let files = resolve_patterns(&self.input)?;

        let mut progress = ProgressReporter::new(self.quiet);
        progress.init_files(files.len() as u64);

        let results = match self.threads {
            Some(threads) => rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .context("Failed to build thread pool")?
                .install(|| split_files(&processor, &files, &progress)),
            None => split_files(&processor, &files, &progress),
        };
        progress.finish();

        let mut formatter = self.formatter()?;
        let mut total = 0;
        for (path, output) in files.iter().zip(results) {
            let output = output?;
            total += self.write_records(formatter.as_mut(), &processor, path, &output)?;
        }
        formatter.finish()?;

        log::info!("Wrote {} records from {} files", total, files.len());
        Ok(())
    }

    /// Configuration file (or defaults) with command-line overrides applied
    pub fn effective_config(&self) -> Result<CliConfig> {
        let mut config = match &self.config {
            Some(path) => CliConfig::load(path)?,
            None => CliConfig::default(),
        };

        let splitter = &mut config.splitter;
        if let Some(encoding) = &self.encoding {
            splitter.encoding = encoding.clone();
        }
        if let Some(pattern) = &self.line_start_pattern {
            splitter.multiline = MultilineConfig::line_start(pattern.clone());
        }
        if let Some(pattern) = &self.line_end_pattern {
            splitter.multiline = MultilineConfig::line_end(pattern.clone());
        }
        if let Some(period) = self.force_flush_period_ms {
            splitter.flusher.period = Duration::from_millis(period);
        }
        splitter.preserve_leading_whitespaces |= self.preserve_leading;
        splitter.preserve_trailing_whitespaces |= self.preserve_trailing;

        if let Some(size) = self.max_log_size {
            config.reader.max_log_size = size;
        }
        if self.no_flush_at_eof {
            config.reader.flush_at_eof = false;
        }

        Ok(config)
    }

    fn formatter(&self) -> Result<Box<dyn OutputFormatter>> {
        let writer: Box<dyn Write + Send + Sync> = match &self.output {
            Some(path) => Box::new(BufWriter::new(File::create(path).with_context(|| {
                format!("Failed to create output file {}", path.display())
            })?)),
            None => Box::new(io::stdout()),
        };

        let formatter: Box<dyn OutputFormatter> = match self.format {
            OutputFormat::Text => Box::new(TextFormatter::new(writer)),
            OutputFormat::Json => Box::new(JsonFormatter::new(writer)),
        };
        Ok(formatter)
    }

    fn write_records(
        &self,
        formatter: &mut dyn OutputFormatter,
        processor: &LogProcessor,
        path: &Path,
        output: &Output,
    ) -> Result<usize> {
        let file = path.to_string_lossy();
        let mut written = 0;

        for (index, (record, text)) in output
            .records
            .iter()
            .zip(output.texts(processor.encoding()))
            .enumerate()
        {
            if text.is_empty() && !self.keep_empty {
                continue;
            }
            formatter.format_record(&RecordEntry {
                file: &file,
                index,
                offset: record.offset,
                text: &text,
                truncated: record.truncated,
            })?;
            written += 1;
        }

        Ok(written)
    }

    /// Initialize logging based on verbosity level
    fn init_logging(&self) -> Result<()> {
        let log_level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        if !self.quiet {
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
                .init();
        }

        Ok(())
    }
}

/// Split every file in parallel; results keep the order of `files`
fn split_files(
    processor: &LogProcessor,
    files: &[PathBuf],
    progress: &ProgressReporter,
) -> Vec<Result<Output>> {
    files
        .par_iter()
        .map(|path| -> Result<Output> {
            let output = processor.process(Input::from_file(path)).map_err(|e| {
                CliError::ProcessingError(format!("{}: {}", path.display(), e))
            })?;
            progress.file_completed(&path.to_string_lossy(), output.records.len());
            Ok(output)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;
    use tempfile::NamedTempFile;

    fn args(input: &str) -> SplitArgs {
        SplitArgs {
            input: vec![input.to_string()],
            output: None,
            format: OutputFormat::Text,
            config: None,
            encoding: None,
            line_start_pattern: None,
            line_end_pattern: None,
            preserve_leading: false,
            preserve_trailing: false,
            max_log_size: None,
            no_flush_at_eof: false,
            force_flush_period_ms: None,
            keep_empty: false,
            threads: None,
            quiet: true,
            verbose: 0,
        }
    }

    #[test]
    fn test_defaults_without_config() {
        let config = args("app.log").effective_config().unwrap();
        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn test_flags_override_config_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[splitter]\nencoding = \"latin1\"\nforce_flush_period_ms = 100\n\n[splitter.multiline]\nline_end_pattern = \";\""
        )
        .unwrap();

        let mut split = args("app.log");
        split.config = Some(file.path().to_path_buf());
        split.line_start_pattern = Some("^START".to_string());
        split.preserve_trailing = true;
        split.max_log_size = Some(128);
        split.no_flush_at_eof = true;

        let config = split.effective_config().unwrap();
        assert_eq!(config.splitter.encoding, "latin1");
        assert_eq!(config.splitter.flusher.period, Duration::from_millis(100));
        assert_eq!(config.splitter.multiline, MultilineConfig::line_start("^START"));
        assert!(config.splitter.preserve_trailing_whitespaces);
        assert!(!config.splitter.preserve_leading_whitespaces);
        assert_eq!(config.reader.max_log_size, 128);
        assert!(!config.reader.flush_at_eof);
    }

    #[test]
    fn test_write_records_skips_empty() {
        let processor = CliConfig::default().processor().unwrap();
        let output = processor.process(Input::from("a\n\n  \nb\n")).unwrap();
        let mut buffer = Vec::new();

        let mut split = args("app.log");
        let written = {
            let mut formatter = TextFormatter::new(&mut buffer);
            split
                .write_records(&mut formatter, &processor, Path::new("app.log"), &output)
                .unwrap()
        };
        assert_eq!(written, 2);
        assert_eq!(buffer, b"a\nb\n");

        split.keep_empty = true;
        let mut formatter = TextFormatter::new(Vec::new());
        let written = split
            .write_records(&mut formatter, &processor, Path::new("app.log"), &output)
            .unwrap();
        assert_eq!(written, 4);
    }
}
