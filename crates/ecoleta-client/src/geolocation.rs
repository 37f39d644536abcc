use ecoleta_shared::LatLng;

/// Source of the device position used to centre the map.
///
/// `None` means the position is unavailable or was denied; the page then
/// keeps its default centre.
pub trait Geolocator: Send + Sync + 'static {
    fn current_position(&self) -> Option<LatLng>;
}

/// A geolocator that always reports the same answer.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedGeolocator(pub Option<LatLng>);

impl Geolocator for FixedGeolocator {
    fn current_position(&self) -> Option<LatLng> {
        self.0
    }
}
