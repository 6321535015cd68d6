use serde::Serialize;

use crate::models::Coordinates;

/// Handle to a marker in one applied frame
///
/// Ids from an earlier frame do not resolve once a new frame is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct MarkerId {
    pub(crate) generation: u64,
    pub(crate) index: usize,
}

/// Interactions raised by the map
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapEvent {
    MarkerClicked(MarkerId),
    DetailsRequested(MarkerId),
    ResetClicked,
}

/// Actions the map asks the surrounding application to perform
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum MapAction {
    FocusReport {
        #[serde(rename = "reportId")]
        report_id: String,
        center: Coordinates,
        zoom: u8,
    },
    OpenReport {
        #[serde(rename = "reportId")]
        report_id: String,
    },
    ResetSearch,
}

/// Consumer of map actions
pub trait ActionHandler {
    fn handle(&mut self, action: MapAction);
}

impl<F> ActionHandler for F
where
    F: FnMut(MapAction),
{
    fn handle(&mut self, action: MapAction) {
        self(action)
    }
}
