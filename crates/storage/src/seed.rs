//! Seeding the `tours` collection.

use std::collections::HashSet;

use tracing::{debug, info, warn};

use tourseed_core::{Tour, TourFields};

use crate::batch::WriteBatch;
use crate::client::DocumentStore;
use crate::error::StorageError;
use crate::value::encode_fields;

/// Collection every tour is written to.
pub const TOURS_COLLECTION: &str = "tours";

/// What a seeding pass did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub tours_written: usize,
    pub commits: usize,
    /// Ids that appeared more than once; the last record for each won.
    pub duplicate_ids: Vec<i64>,
}

/// Upsert `tours` into the tours collection, in order, committing every
/// [`MAX_BATCH_WRITES`](crate::MAX_BATCH_WRITES) writes.
///
/// Stops at the first invalid record or failed commit. Batches committed
/// before the failure stay written.
pub async fn batch_write_tours<S>(
    store: &S,
    tours: Vec<TourFields>,
) -> Result<SeedReport, StorageError>
where
    S: DocumentStore + ?Sized,
{
    let mut report = SeedReport::default();
    let mut seen = HashSet::new();
    let mut batch = WriteBatch::new();

    for (index, fields) in tours.into_iter().enumerate() {
        let tour = Tour::normalize(index, fields)?;
        if !seen.insert(tour.id) {
            warn!(id = tour.id, index, "Duplicate tour id, later record overwrites earlier one");
            report.duplicate_ids.push(tour.id);
        }

        let name = store.document_name(TOURS_COLLECTION, &tour.doc_id());
        batch.set(name, encode_fields(&tour.fields)?)?;
        report.tours_written += 1;

        if batch.is_full() {
            let full = std::mem::take(&mut batch);
            debug!(writes = full.len(), "Flushing full batch");
            full.commit(store).await?;
            report.commits += 1;
        }
    }

    if !batch.is_empty() {
        debug!(writes = batch.len(), "Flushing final batch");
        batch.commit(store).await?;
        report.commits += 1;
    }

    info!(
        tours = report.tours_written,
        commits = report.commits,
        duplicates = report.duplicate_ids.len(),
        "Seeded tours collection"
    );
    Ok(report)
}
