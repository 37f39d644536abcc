use ecoleta_shared::{City, LatLng, SerializedItem, Uf};

use crate::error::ClientError;
use crate::request::RequestToken;

pub const ALERT_POINT_CREATED: &str = "Ponto de coleta criado.";
pub const ALERT_POINT_FAILED: &str = "Não foi possível criar o ponto de coleta.";

/// Completion of one background load started by the page.
#[derive(Debug)]
pub enum PageEvent {
    Items(Result<Vec<SerializedItem>, ClientError>),
    Ufs(Result<Vec<Uf>, ClientError>),
    Cities {
        uf: String,
        token: RequestToken,
        result: Result<Vec<City>, ClientError>,
    },
    Position(Option<LatLng>),
}

/// Side effects the page asks of its host UI.
pub trait PageView {
    /// Show a blocking message to the user.
    fn alert(&mut self, message: &str);

    /// Move to another route.
    fn navigate(&mut self, route: &str);
}
