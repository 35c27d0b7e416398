use crate::reports;
use clap::Args;
use ngramforge::config::Config;
use ngramforge::error::NfResult;
use ngramforge::pipeline::Pipeline;
use ngramforge::store::{CorpusStore, FrequencyKind};
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct ExtractArgs {
    /// Directory of .txt files or a CSV file whose first column is the text
    pub input: PathBuf,

    #[command(flatten)]
    pub config: Config,

    /// Print the run summary as JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

pub fn run(args: ExtractArgs, config: Config) -> NfResult<()> {
    let pipeline = Pipeline::from_config(&config)?;
    info!(
        "🚀 Orders {:?}, top {} per order",
        pipeline.orders(),
        pipeline.top_k()
    );

    let freq_dir = config.output.frequency_dir();
    let fresh = !freq_dir.join(FrequencyKind::Absolute.file_name()).exists();
    let mut store = CorpusStore::open(&freq_dir)?;
    if fresh {
        store.persist()?;
    }

    let summary = pipeline.run(&args.input, &mut store)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        reports::print_run_summary(&summary, &store);
    }
    Ok(())
}
