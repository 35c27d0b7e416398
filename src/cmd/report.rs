use crate::reports;
use clap::Args;
use ngramforge::config::OutputParams;
use ngramforge::error::{NfResult, NgramForgeError};
use ngramforge::store::{CorpusStore, FrequencyKind};

#[derive(Args, Debug, Clone)]
pub struct ReportArgs {
    #[command(flatten)]
    pub output: OutputParams,

    #[arg(short, long, default_value_t = 20)]
    pub limit: usize,

    /// Only show n-grams of this order
    #[arg(short, long)]
    pub order: Option<usize>,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}

pub fn run(args: ReportArgs) -> NfResult<()> {
    let dir = args.output.frequency_dir();
    let table = dir.join(FrequencyKind::Absolute.file_name());
    if !table.exists() {
        return Err(NgramForgeError::InputNotFound(table));
    }

    let store = CorpusStore::open(&dir)?;
    let top = store.top_columns(args.limit, args.order);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&top)?);
    } else {
        reports::print_corpus_report(&store, &top);
    }
    Ok(())
}
