//! Get document command

use crate::app::{IdArgs, OutputFormat};
use anyhow::Result;
use stringly_core::Store;

pub async fn run(args: IdArgs, store: &Store, format: OutputFormat) -> Result<()> {
    let doc = store.get(&args.id)?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string(&doc)?);
        }
        OutputFormat::Cli => {
            println!("{}", serde_json::to_string_pretty(&doc)?);
        }
    }
    Ok(())
}
