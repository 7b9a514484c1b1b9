//! List command

use crate::app::OutputFormat;
use anyhow::Result;
use stringly_core::Store;

pub async fn run(store: &Store, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let docs = store.list()?;
            println!("{}", serde_json::to_string_pretty(&docs)?);
        }
        OutputFormat::Cli => {
            for id in store.list_ids()? {
                println!("{}", id);
            }
        }
    }
    Ok(())
}
