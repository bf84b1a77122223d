use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

use crate::data::loader;
use crate::data::model::{PerformanceTable, SummaryTable};
use crate::error::DataLoadError;

// ---------------------------------------------------------------------------
// Tables – one consistent snapshot of both loaded tables
// ---------------------------------------------------------------------------

/// Both loaded tables as one immutable unit, so a reader never sees a
/// performance table from one load paired with a summary table from another.
#[derive(Debug)]
pub struct Tables {
    pub performance: PerformanceTable,
    pub summary: SummaryTable,
}

// ---------------------------------------------------------------------------
// TableStore – shared snapshot holder with atomic reload
// ---------------------------------------------------------------------------

/// Holds the current [`Tables`] snapshot behind an `Arc`.
///
/// `snapshot()` clones the `Arc`, so every pipeline call runs against one
/// consistent view regardless of concurrent reloads. `reload()` parses both
/// files fully before swapping the `Arc` in: in-flight readers keep the old
/// snapshot, and a failed reload leaves the previous snapshot in place.
pub struct TableStore {
    current: RwLock<Arc<Tables>>,
}

impl TableStore {
    /// Load both tables and build the initial snapshot.
    pub fn open(performance_path: &Path, summary_path: &Path) -> Result<Self, DataLoadError> {
        let (performance, summary) = loader::load(performance_path, summary_path)?;
        Ok(TableStore {
            current: RwLock::new(Arc::new(Tables {
                performance,
                summary,
            })),
        })
    }

    /// The current snapshot. Cheap: one `Arc` clone.
    pub fn snapshot(&self) -> Arc<Tables> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Re-read both files and swap the snapshot in atomically.
    pub fn reload(
        &self,
        performance_path: &Path,
        summary_path: &Path,
    ) -> Result<(), DataLoadError> {
        let (performance, summary) = loader::load(performance_path, summary_path)?;
        let next = Arc::new(Tables {
            performance,
            summary,
        });
        *self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner) = next;
        Ok(())
    }
}
