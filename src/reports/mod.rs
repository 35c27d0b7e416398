use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use ngramforge::pipeline::RunSummary;
use ngramforge::store::{ColumnTotal, CorpusStore, FrequencyKind};
use strum::IntoEnumIterator;

pub fn print_run_summary(summary: &RunSummary, store: &CorpusStore) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("Found").add_attribute(Attribute::Bold),
        Cell::new("Processed").fg(Color::Green),
        Cell::new("Skipped").fg(Color::Yellow),
        Cell::new("Failed").fg(Color::Red),
        Cell::new("New Cols"),
        Cell::new("Docs"),
        Cell::new("Cols"),
    ]);
    table.add_row(vec![
        Cell::new(summary.discovered),
        Cell::new(summary.processed),
        Cell::new(summary.skipped_duplicates.len()),
        Cell::new(summary.failed.len()),
        Cell::new(summary.new_columns),
        Cell::new(store.document_count()),
        Cell::new(store.column_count()),
    ]);
    for i in 0..7 {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    println!("\n📊 === RUN SUMMARY === 📊");
    println!("{}", table);

    if !summary.failed.is_empty() {
        let mut failed = Table::new();
        failed.load_preset(ASCII_FULL);
        failed.add_row(vec![
            Cell::new("Document").add_attribute(Attribute::Bold),
            Cell::new("Reason").fg(Color::Red),
        ]);
        for f in &summary.failed {
            failed.add_row(vec![Cell::new(&f.id), Cell::new(&f.reason)]);
        }
        println!("{}", failed);
    }

    if !summary.listing_collisions.is_empty() {
        println!(
            "⚠️  Listings overwritten by: {}",
            summary.listing_collisions.join(", ")
        );
    }

    if let Some(dir) = store.dir() {
        for kind in FrequencyKind::iter() {
            println!("💾 {}", dir.join(kind.file_name()).display());
        }
    }
}

pub fn print_corpus_report(store: &CorpusStore, top: &[ColumnTotal]) {
    println!(
        "\n📚 === CORPUS: {} documents, {} n-grams === 📚",
        store.document_count(),
        store.column_count()
    );

    if top.is_empty() {
        println!("No n-grams recorded.");
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("#"),
        Cell::new("N-gram").add_attribute(Attribute::Bold),
        Cell::new("n"),
        Cell::new("Total").fg(Color::Cyan),
        Cell::new("Docs"),
        Cell::new("Share"),
    ]);

    for (rank, t) in top.iter().enumerate() {
        table.add_row(vec![
            Cell::new(rank + 1),
            Cell::new(&t.key),
            Cell::new(t.order),
            Cell::new(t.total),
            Cell::new(t.documents),
            Cell::new(format!("{:.2}%", t.share * 100.0)),
        ]);
    }

    for i in [0, 2, 3, 4, 5] {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }
    println!("{}", table);
}
