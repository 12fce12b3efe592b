use std::sync::Arc;

use foundation::SpatialReference;
use streaming::{FeatureQuery, FeatureQueryError, FeatureQueryErrorKind, FeatureSource};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::config::OverlayConfig;
use crate::layer::OBJECTS_LAYER_ID;
use crate::markers::map_feature;
use crate::overlay::{FetchStatus, Overlay};

pub const OBJECTS_TITLE: &str = "3D Objects";

/// Completion of a 3D overlay's population.
///
/// Awaiting it is optional. Dropping it does not stop population.
#[derive(Debug)]
pub struct PopulateHandle {
    task: PopulateTask,
}

#[derive(Debug)]
enum PopulateTask {
    Spawned(JoinHandle<Result<usize, FeatureQueryError>>),
    /// Population never started.
    Refused(FeatureQueryError),
}

impl PopulateHandle {
    pub fn is_finished(&self) -> bool {
        match &self.task {
            PopulateTask::Spawned(task) => task.is_finished(),
            PopulateTask::Refused(_) => true,
        }
    }

    /// Number of markers inserted, or why the fetch failed.
    pub async fn join(self) -> Result<usize, FeatureQueryError> {
        match self.task {
            PopulateTask::Spawned(task) => match task.await {
                Ok(outcome) => outcome,
                Err(e) => Err(FeatureQueryError::with_source(
                    FeatureQueryErrorKind::Interrupted,
                    "overlay population stopped",
                    e,
                )),
            },
            PopulateTask::Refused(e) => Err(e),
        }
    }
}

/// Builds the "3D Objects" overlay.
///
/// Returns the overlay immediately, still empty, and spawns the one query
/// for its records on the current Tokio runtime. The task marks the overlay
/// `Populating` before it waits on the query. When the query resolves, each
/// record is mapped to a marker and inserted in the order received. A failed
/// query leaves the overlay empty; the error is reported through the
/// overlay's [`FetchStatus`] and the returned handle, never to the caller.
/// Called outside a Tokio runtime, no query is issued and the overlay is
/// rejected the same way.
pub fn build_3d_overlay(
    source: Arc<dyn FeatureSource>,
    config: &OverlayConfig,
) -> (Overlay, PopulateHandle) {
    let overlay = Overlay::with_id(OBJECTS_LAYER_ID, OBJECTS_TITLE);

    let runtime = match Handle::try_current() {
        Ok(runtime) => runtime,
        Err(e) => {
            let err = FeatureQueryError::with_source(
                FeatureQueryErrorKind::Interrupted,
                "no Tokio runtime to run the object query on",
                e,
            );
            warn!(source = source.name(), "3D object fetch not started: {err}");
            overlay.abandon_population(err.to_string());
            let task = PopulateTask::Refused(err);
            return (overlay, PopulateHandle { task });
        }
    };

    overlay.set_fetch_status(FetchStatus::Pending);
    let task = runtime.spawn(populate(
        overlay.clone(),
        source,
        config.objects_query(),
        config.spatial_reference,
        config.asset_root.clone(),
    ));

    (
        overlay,
        PopulateHandle {
            task: PopulateTask::Spawned(task),
        },
    )
}

async fn populate(
    overlay: Overlay,
    source: Arc<dyn FeatureSource>,
    query: FeatureQuery,
    spatial_reference: SpatialReference,
    asset_root: String,
) -> Result<usize, FeatureQueryError> {
    overlay.begin_population();
    let fetched = match source.query_all(&query).await {
        Ok(set) => set.ensure_spatial_reference(spatial_reference).map(|_| set),
        Err(e) => Err(e),
    };
    let set = match fetched {
        Ok(set) => set,
        Err(e) => {
            warn!(source = source.name(), locator = %query.locator, "3D object fetch failed: {e}");
            overlay.abandon_population(e.to_string());
            return Err(e);
        }
    };

    let mut unresolvable = 0usize;
    for record in &set.features {
        let marker = map_feature(record, spatial_reference, &asset_root);
        if !marker.is_resolvable() {
            unresolvable += 1;
        }
        overlay.add(marker.into());
    }
    overlay.finish_population(set.len());

    if unresolvable > 0 {
        warn!(
            source = source.name(),
            "{unresolvable} of {} markers reference no usable model",
            set.len()
        );
    }
    info!(source = source.name(), markers = set.len(), "3D object overlay populated");
    Ok(set.len())
}
