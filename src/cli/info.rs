use anyhow::{Context, Result};
use std::path::PathBuf;

use windaq::reader::WdqFile;

/// Display information about a WinDAQ file
pub fn run(file: PathBuf, json: bool) -> Result<()> {
    if !file.exists() {
        anyhow::bail!("File does not exist: {}", file.display());
    }

    let wdq = WdqFile::open(&file)
        .with_context(|| format!("Failed to open WinDAQ file: {}", file.display()))?;
    let summary = wdq.summary();

    if json {
        let text = serde_json::to_string_pretty(&summary).context("Failed to serialize summary")?;
        println!("{}", text);
        return Ok(());
    }

    println!("File: {}", file.display());
    println!();
    print!("{}", summary);

    let header = wdq.header();
    println!();
    println!("Layout:");
    println!("  Header size: {} bytes", header.data_offset);
    println!(
        "  Channel table: {} x {} bytes at offset {}",
        header.channel_count, header.channel_entry_size, header.channel_table_offset
    );
    println!("  Sample data: {} bytes", header.data_bytes);
    println!("  Trailer: {} bytes", header.trailer_bytes);
    println!(
        "  Annotations: {} bytes at offset {}",
        header.annotation_bytes,
        header.annotation_offset()
    );

    Ok(())
}
