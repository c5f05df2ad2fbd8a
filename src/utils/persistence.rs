use std::{path::Path, sync::Arc};

use crate::{
    errors::LedgerError,
    ledger::{Clock, PeriodLedger},
    storage::JsonFileStore,
};

/// Opens the ledger persisted under `data_dir`, creating the directory when
/// it does not exist yet.
pub fn open_ledger(data_dir: &Path, clock: Arc<dyn Clock>) -> Result<PeriodLedger, LedgerError> {
    let store = JsonFileStore::new(data_dir)?;
    tracing::info!(path = %data_dir.display(), "opening expense ledger");
    Ok(PeriodLedger::load(Box::new(store), clock))
}
