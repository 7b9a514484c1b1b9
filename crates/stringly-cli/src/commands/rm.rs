//! Delete document command

use crate::app::IdArgs;
use anyhow::Result;
use stringly_core::{Store, StringlyError};

pub async fn run(args: IdArgs, store: &Store) -> Result<()> {
    if !store.delete(&args.id)? {
        return Err(StringlyError::NotFound(args.id).into());
    }
    println!("Deleted {}", args.id);
    Ok(())
}
