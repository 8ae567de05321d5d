//! Presentation sink trait.
//!
//! Rendering — markers, popups, route lines, layer toggles — lives
//! outside the core. The orchestrator talks to it through this
//! interface and nothing else.

use crate::facility::FacilityPoint;

use super::LookupResult;

/// Interface the core calls outward when there is something to show.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` so a sink can be shared with
/// background loaders.
pub trait PresentationSink: Send + Sync {
    /// The registries finished populating; render the facility markers.
    fn on_facilities_loaded(&self, shelters: &[FacilityPoint], bunkers: &[FacilityPoint]);

    /// A lookup completed; render its result.
    ///
    /// Partial results are valid terminal states: an absent facility or
    /// an absent route must be rendered as an explicit "none found" /
    /// "route unavailable" indication, never left looking like a pending
    /// lookup.
    fn on_lookup_result(&self, result: &LookupResult);
}

/// A sink that discards all output.
///
/// Useful for headless registry loads and for tests where rendering
/// would be noise.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl PresentationSink for NoopSink {
    #[inline]
    fn on_facilities_loaded(&self, _shelters: &[FacilityPoint], _bunkers: &[FacilityPoint]) {}

    #[inline]
    fn on_lookup_result(&self, _result: &LookupResult) {}
}

/// Format a distance for display: meters below one kilometer, one
/// decimal of kilometers above.
pub fn format_distance(meters: f64) -> String {
    if meters >= 1000.0 {
        format!("{:.1} km", meters / 1000.0)
    } else {
        format!("{} m", meters.round() as i64)
    }
}
