use crate::error::{NfResult, NgramForgeError};
use crate::pipeline::source::InputKind;
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const LISTING_DIR: &str = "best_n";
pub const FREQUENCY_DIR: &str = "frequencies";

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    #[command(flatten)]
    pub extraction: ExtractionParams,
    #[command(flatten)]
    pub stopwords: StopwordParams,
    #[command(flatten)]
    pub output: OutputParams,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionParams {
    /// N-gram orders, e.g. "1-20" or "1,2,5-7"
    #[arg(long, default_value = "1-20")]
    pub orders: String,
    #[arg(long, default_value_t = 20)]
    pub top_k: usize,
    #[arg(long, default_value = "auto")]
    pub input_kind: InputKind,
    /// External program each document is piped through before tokenizing
    #[arg(long)]
    pub normalizer_cmd: Option<String>,
    /// Analysis threads (0 = all cores)
    #[arg(long, default_value_t = 0)]
    pub jobs: usize,
}

impl Default for ExtractionParams {
    fn default() -> Self {
        Self {
            orders: "1-20".to_string(),
            top_k: 20,
            input_kind: InputKind::Auto,
            normalizer_cmd: None,
            jobs: 0,
        }
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StopwordParams {
    /// Extra stopword corpus, one word per line
    #[arg(long)]
    pub stopwords_file: Option<PathBuf>,
    #[arg(long, default_value_t = false)]
    pub no_builtin_stopwords: bool,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputParams {
    #[arg(long, default_value = "result_ngramms")]
    pub output_dir: PathBuf,
}

impl Default for OutputParams {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("result_ngramms"),
        }
    }
}

impl OutputParams {
    pub fn listing_dir(&self) -> PathBuf {
        self.output_dir.join(LISTING_DIR)
    }

    pub fn frequency_dir(&self) -> PathBuf {
        self.output_dir.join(FREQUENCY_DIR)
    }
}

impl ExtractionParams {
    pub fn get_orders(&self) -> NfResult<Vec<usize>> {
        parse_orders(&self.orders)
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> NfResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            NgramForgeError::Config(format!("Failed to read config '{}': {}", path.display(), e))
        })?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Checks the values the pipeline relies on.
    pub fn validate(&self) -> NfResult<()> {
        self.extraction.get_orders()?;
        if self.extraction.top_k == 0 {
            return Err(NgramForgeError::Config("--top-k must be at least 1".into()));
        }
        Ok(())
    }

    /// Copies every flag the user typed explicitly onto `self`.
    pub fn merge_from_cli(&mut self, cli: &Config, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($group:ident . $field:ident) => {
                if matches.value_source(stringify!($field)) == Some(ValueSource::CommandLine) {
                    self.$group.$field = cli.$group.$field.clone();
                }
            };
        }

        update_if_present!(extraction.orders);
        update_if_present!(extraction.top_k);
        update_if_present!(extraction.input_kind);
        update_if_present!(extraction.normalizer_cmd);
        update_if_present!(extraction.jobs);

        update_if_present!(stopwords.stopwords_file);
        update_if_present!(stopwords.no_builtin_stopwords);

        update_if_present!(output.output_dir);
    }
}

/// Parses "1-3,5" into `[1, 2, 3, 5]`, keeping first-mention order.
pub fn parse_orders(s: &str) -> NfResult<Vec<usize>> {
    let mut orders = Vec::new();

    for part in s.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }

        let (lo, hi) = match part.split_once('-') {
            Some((a, b)) => (parse_order(a)?, parse_order(b)?),
            None => {
                let n = parse_order(part)?;
                (n, n)
            }
        };

        if lo > hi {
            return Err(NgramForgeError::Config(format!(
                "Order range '{}' is reversed",
                part
            )));
        }

        for n in lo..=hi {
            if !orders.contains(&n) {
                orders.push(n);
            }
        }
    }

    if orders.is_empty() {
        return Err(NgramForgeError::Config("No n-gram orders given".into()));
    }
    Ok(orders)
}

fn parse_order(s: &str) -> NfResult<usize> {
    let n: usize = s
        .trim()
        .parse()
        .map_err(|_| NgramForgeError::Config(format!("Invalid order '{}'", s.trim())))?;
    if n == 0 {
        return Err(NgramForgeError::Config("Order 0 is not a valid n-gram width".into()));
    }
    Ok(n)
}
