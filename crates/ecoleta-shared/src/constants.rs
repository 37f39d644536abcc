/// Application name
pub const APP_NAME: &str = "Ecoleta";

/// Path prefix under which uploaded images are served
pub const UPLOADS_PATH: &str = "/uploads";

/// Default HTTP API port (server)
pub const DEFAULT_HTTP_PORT: u16 = 3333;

/// Base URL of the IBGE "localidades" API (states and municipalities)
pub const IBGE_LOCALIDADES_URL: &str = "https://servicodados.ibge.gov.br/api/v1/localidades";

/// Value of the state/city selectors before the user picks anything
pub const UNSELECTED: &str = "0";

/// Route the create-point page returns to after submitting
pub const HOME_ROUTE: &str = "/";

/// Valid latitude range in degrees
pub const LATITUDE_RANGE: std::ops::RangeInclusive<f64> = -90.0..=90.0;

/// Valid longitude range in degrees
pub const LONGITUDE_RANGE: std::ops::RangeInclusive<f64> = -180.0..=180.0;
