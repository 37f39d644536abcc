//! State of the "register a collection point" page.
//!
//! [`CreatePointForm`] holds everything the page displays and edits.  It does
//! no IO: loads are started by [`CreatePointPage`](crate::page::CreatePointPage)
//! and their results handed back through the `set_*` / `apply_*` methods.

use ecoleta_shared::constants::UNSELECTED;
use ecoleta_shared::{City, LatLng, NewPoint, SerializedItem, Uf};

use crate::error::{ClientError, Result};
use crate::request::{RequestToken, RequestTracker};
use crate::selection::ItemSelection;

/// Free-text fields of the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    pub name: String,
    pub email: String,
    pub whatsapp: String,
}

/// A city list fetch the page must perform for the newly selected state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityRequest {
    pub uf: String,
    pub token: RequestToken,
}

/// Central page state.
#[derive(Debug, Default)]
pub struct CreatePointForm {
    /// Item catalog from the backend.
    items: Vec<SerializedItem>,

    /// States offered by the UF selector.
    ufs: Vec<Uf>,

    /// Cities of the selected state.
    cities: Vec<City>,

    /// `None` while the placeholder option is selected.
    selected_uf: Option<String>,
    selected_city: Option<String>,

    selected_items: ItemSelection,

    /// Marker placed by the last map click.
    selected_position: LatLng,

    /// Map centre, from geolocation when available.
    initial_position: LatLng,

    form_data: FormData,

    city_requests: RequestTracker,
}

impl CreatePointForm {
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------
    // Loads
    // ------------------------------------------------------------------

    pub fn set_items(&mut self, items: Vec<SerializedItem>) {
        self.items = items;
    }

    pub fn set_ufs(&mut self, ufs: Vec<Uf>) {
        self.ufs = ufs;
    }

    pub fn set_initial_position(&mut self, position: LatLng) {
        self.initial_position = position;
    }

    /// Store a city list if `token` belongs to the latest state selection.
    /// Returns `false` when the result was stale and has been dropped.
    pub(crate) fn apply_cities(&mut self, token: RequestToken, cities: Vec<City>) -> bool {
        if !self.city_requests.is_current(token) {
            return false;
        }
        self.cities = cities;
        true
    }

    /// Whether a city fetch carrying `token` is still wanted.
    pub(crate) fn is_current_city_request(&self, token: RequestToken) -> bool {
        self.city_requests.is_current(token)
    }

    // ------------------------------------------------------------------
    // User input
    // ------------------------------------------------------------------

    /// Change the UF selector.  Hosts go through
    /// [`CreatePointPage::select_uf`](crate::page::CreatePointPage::select_uf),
    /// which performs the returned fetch.
    ///
    /// Returns the city fetch to perform when the selection moved to a real
    /// state.  Re-selecting the current value does nothing.  Any change
    /// clears the city list and the selected city and invalidates pending
    /// city fetches.
    pub(crate) fn select_uf(&mut self, value: &str) -> Option<CityRequest> {
        let next = selector_value(value);
        if next == self.selected_uf {
            return None;
        }

        self.selected_uf = next;
        self.selected_city = None;
        self.cities.clear();

        match self.selected_uf {
            Some(ref uf) => Some(CityRequest {
                uf: uf.clone(),
                token: self.city_requests.issue(),
            }),
            None => {
                self.city_requests.cancel();
                None
            }
        }
    }

    pub fn select_city(&mut self, value: &str) {
        self.selected_city = selector_value(value);
    }

    /// Toggle an item in the selection; returns whether it is now selected.
    pub fn toggle_item(&mut self, id: i64) -> bool {
        self.selected_items.toggle(id)
    }

    pub fn click_map(&mut self, position: LatLng) {
        self.selected_position = position;
    }

    /// Update one text field by its input name.
    pub fn set_field(&mut self, name: &str, value: &str) -> Result<()> {
        let slot = match name {
            "name" => &mut self.form_data.name,
            "email" => &mut self.form_data.email,
            "whatsapp" => &mut self.form_data.whatsapp,
            other => return Err(ClientError::UnknownField(other.to_string())),
        };
        *slot = value.to_string();
        Ok(())
    }

    // ------------------------------------------------------------------
    // Submission
    // ------------------------------------------------------------------

    /// Assemble the registration body from the current state.
    ///
    /// Unselected selectors are sent as the placeholder value, leaving the
    /// backend to reject them.
    pub fn payload(&self) -> NewPoint {
        NewPoint {
            name: self.form_data.name.clone(),
            email: self.form_data.email.clone(),
            whatsapp: self.form_data.whatsapp.clone(),
            city: self
                .selected_city
                .clone()
                .unwrap_or_else(|| UNSELECTED.to_string()),
            uf: self
                .selected_uf
                .clone()
                .unwrap_or_else(|| UNSELECTED.to_string()),
            latitude: self.selected_position.lat,
            longitude: self.selected_position.lng,
            items: self.selected_items.to_vec(),
        }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn items(&self) -> &[SerializedItem] {
        &self.items
    }

    pub fn ufs(&self) -> &[Uf] {
        &self.ufs
    }

    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    pub fn selected_uf(&self) -> Option<&str> {
        self.selected_uf.as_deref()
    }

    pub fn selected_city(&self) -> Option<&str> {
        self.selected_city.as_deref()
    }

    pub fn selected_items(&self) -> &ItemSelection {
        &self.selected_items
    }

    pub fn selected_position(&self) -> LatLng {
        self.selected_position
    }

    pub fn initial_position(&self) -> LatLng {
        self.initial_position
    }

    pub fn form_data(&self) -> &FormData {
        &self.form_data
    }
}

fn selector_value(value: &str) -> Option<String> {
    if value.is_empty() || value == UNSELECTED {
        None
    } else {
        Some(value.to_string())
    }
}
