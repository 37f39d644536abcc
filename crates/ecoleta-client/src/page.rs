//! Async driver of the "register a collection point" page.
//!
//! Every load runs in its own task of a [`JoinSet`] and yields exactly one
//! [`PageEvent`].  The page applies events in completion order; city lists
//! are accepted only when their request token is still current, so quick
//! successive state selections settle on the last one.  A load that panics
//! is recorded as a failure and never blocks [`CreatePointPage::settle`].

use std::sync::Arc;

use reqwest::StatusCode;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use ecoleta_shared::constants::HOME_ROUTE;

use crate::api::{EcoletaApi, GeographyApi};
use crate::config::ClientConfig;
use crate::events::{PageEvent, PageView, ALERT_POINT_CREATED, ALERT_POINT_FAILED};
use crate::geolocation::Geolocator;
use crate::state::CreatePointForm;

/// Result of submitting the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The backend answered `200`.
    Created,
    /// The backend answered with another status.
    Rejected(u16),
    /// The request never got an answer.
    Unreachable,
}

impl SubmitOutcome {
    pub fn is_success(self) -> bool {
        self == SubmitOutcome::Created
    }
}

pub struct CreatePointPage {
    form: CreatePointForm,
    api: EcoletaApi,
    geography: GeographyApi,
    geolocator: Arc<dyn Geolocator>,
    /// Spawned loads whose event has not been applied yet.
    loads: JoinSet<PageEvent>,
    last_error: Option<String>,
}

impl CreatePointPage {
    pub fn new(config: &ClientConfig, geolocator: Arc<dyn Geolocator>) -> Self {
        let http = reqwest::Client::new();
        Self::with_clients(
            EcoletaApi::new(http.clone(), &config.api_url),
            GeographyApi::new(http, &config.geography_url),
            geolocator,
        )
    }

    pub fn with_clients(
        api: EcoletaApi,
        geography: GeographyApi,
        geolocator: Arc<dyn Geolocator>,
    ) -> Self {
        Self {
            form: CreatePointForm::new(),
            api,
            geography,
            geolocator,
            loads: JoinSet::new(),
            last_error: None,
        }
    }

    pub fn form(&self) -> &CreatePointForm {
        &self.form
    }

    /// Direct access for the synchronous inputs: item toggles, map clicks,
    /// city selection and text fields.  State changes go through
    /// [`CreatePointPage::select_uf`].
    pub fn form_mut(&mut self) -> &mut CreatePointForm {
        &mut self.form
    }

    /// Message of the most recent failed load or submission.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn in_flight(&self) -> usize {
        self.loads.len()
    }

    // ------------------------------------------------------------------
    // Loads
    // ------------------------------------------------------------------

    /// Start the three independent loads: position, item catalog, states.
    pub fn mount(&mut self) {
        let geolocator = self.geolocator.clone();
        self.spawn(async move {
            let position = tokio::task::spawn_blocking(move || geolocator.current_position())
                .await
                .ok()
                .flatten();
            PageEvent::Position(position)
        });

        let api = self.api.clone();
        self.spawn(async move { PageEvent::Items(api.list_items().await) });

        let geography = self.geography.clone();
        self.spawn(async move { PageEvent::Ufs(geography.list_ufs().await) });
    }

    /// Change the UF selector, fetching that state's cities when needed.
    pub fn select_uf(&mut self, value: &str) {
        let Some(request) = self.form.select_uf(value) else {
            return;
        };

        debug!(uf = %request.uf, "Loading cities");

        let geography = self.geography.clone();
        self.spawn(async move {
            let result = geography.list_cities(&request.uf).await;
            PageEvent::Cities {
                uf: request.uf,
                token: request.token,
                result,
            }
        });
    }

    fn spawn<F>(&mut self, load: F)
    where
        F: std::future::Future<Output = PageEvent> + Send + 'static,
    {
        self.loads.spawn(load);
    }

    /// Wait for the next load to finish and apply it.  Returns `None` when
    /// nothing is in flight.
    pub async fn next_event(&mut self) -> Option<&CreatePointForm> {
        match self.loads.join_next().await? {
            Ok(event) => self.apply(event),
            Err(e) => self.record_error("task", e.to_string()),
        }
        Some(&self.form)
    }

    /// Apply every outstanding load.
    pub async fn settle(&mut self) {
        while self.next_event().await.is_some() {}
    }

    fn apply(&mut self, event: PageEvent) {
        match event {
            PageEvent::Position(Some(position)) => self.form.set_initial_position(position),
            PageEvent::Position(None) => debug!("Geolocation unavailable, keeping default centre"),
            PageEvent::Items(Ok(items)) => self.form.set_items(items),
            PageEvent::Ufs(Ok(ufs)) => self.form.set_ufs(ufs),
            PageEvent::Cities {
                uf,
                token,
                result: Ok(cities),
            } => {
                if !self.form.apply_cities(token, cities) {
                    debug!(uf = %uf, "Dropping stale city list");
                }
            }
            PageEvent::Cities {
                uf,
                token,
                result: Err(e),
            } => {
                if self.form.is_current_city_request(token) {
                    self.record_error("cities", e.to_string());
                } else {
                    debug!(uf = %uf, "Ignoring failure of superseded city request");
                }
            }
            PageEvent::Items(Err(e)) => self.record_error("items", e.to_string()),
            PageEvent::Ufs(Err(e)) => self.record_error("ufs", e.to_string()),
        }
    }

    fn record_error(&mut self, load: &'static str, message: String) {
        warn!(load, error = %message, "Load failed");
        self.last_error = Some(message);
    }

    // ------------------------------------------------------------------
    // Submission
    // ------------------------------------------------------------------

    /// POST the form, alert the outcome, then go home whatever happened.
    pub async fn submit(&mut self, view: &mut dyn PageView) -> SubmitOutcome {
        let payload = self.form.payload();

        let outcome = match self.api.create_point(&payload).await {
            Ok(StatusCode::OK) => SubmitOutcome::Created,
            Ok(status) => {
                warn!(status = status.as_u16(), "Point registration rejected");
                SubmitOutcome::Rejected(status.as_u16())
            }
            Err(e) => {
                self.record_error("submit", e.to_string());
                SubmitOutcome::Unreachable
            }
        };

        if outcome.is_success() {
            info!(items = payload.items.len(), "Point registered");
            view.alert(ALERT_POINT_CREATED);
        } else {
            view.alert(ALERT_POINT_FAILED);
        }
        view.navigate(HOME_ROUTE);

        outcome
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::time::Duration;

    use axum::extract::{Path, State};
    use axum::http::StatusCode as AxumStatus;
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use serde_json::{json, Value};

    use ecoleta_shared::{City, LatLng};

    use super::*;
    use crate::geolocation::FixedGeolocator;

    #[derive(Default)]
    struct Recorded {
        city_requests: Vec<String>,
        posted: Option<Value>,
    }

    type Shared = Arc<Mutex<Recorded>>;

    #[derive(Default)]
    struct RecordingView {
        alerts: Vec<String>,
        routes: Vec<String>,
    }

    impl PageView for RecordingView {
        fn alert(&mut self, message: &str) {
            self.alerts.push(message.to_string());
        }

        fn navigate(&mut self, route: &str) {
            self.routes.push(route.to_string());
        }
    }

    async fn spawn(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    /// Fake backend: fixed catalog, `/points` answers `status`.
    async fn backend(recorded: Shared, status: AxumStatus) -> String {
        let router = Router::new()
            .route(
                "/items",
                get(|| async {
                    Json(json!([
                        { "id": 1, "name": "Lâmpadas", "image_url": "http://x/uploads/lamp.svg" },
                        { "id": 3, "name": "Papéis e Papelão", "image_url": "http://x/uploads/pp.svg" },
                    ]))
                }),
            )
            .route(
                "/points",
                post(
                    move |State(recorded): State<Shared>, Json(body): Json<Value>| async move {
                        recorded.lock().unwrap().posted = Some(body);
                        (status, Json(json!({ "id": 1 })))
                    },
                ),
            )
            .with_state(recorded);
        spawn(router).await
    }

    /// Fake IBGE: `AC` cities answer slowly so they arrive after later requests.
    async fn geography(recorded: Shared) -> String {
        let router = Router::new()
            .route(
                "/estados",
                get(|| async {
                    Json(json!([
                        { "sigla": "AC", "nome": "Acre" },
                        { "sigla": "SP", "nome": "São Paulo" },
                    ]))
                }),
            )
            .route(
                "/estados/:uf/municipios",
                get(
                    |State(recorded): State<Shared>, Path(uf): Path<String>| async move {
                        recorded.lock().unwrap().city_requests.push(uf.clone());
                        if uf == "AC" {
                            tokio::time::sleep(Duration::from_millis(300)).await;
                            Json(json!([{ "nome": "Rio Branco" }]))
                        } else {
                            Json(json!([{ "nome": "Campinas" }, { "nome": "São Paulo" }]))
                        }
                    },
                ),
            )
            .with_state(recorded);
        spawn(router).await
    }

    async fn page_with(status: AxumStatus, position: Option<LatLng>) -> (CreatePointPage, Shared) {
        let recorded = Shared::default();
        let config = ClientConfig {
            api_url: backend(recorded.clone(), status).await,
            geography_url: geography(recorded.clone()).await,
        };
        let page = CreatePointPage::new(&config, Arc::new(FixedGeolocator(position)));
        (page, recorded)
    }

    #[tokio::test]
    async fn test_mount_loads_everything() {
        let (mut page, _) = page_with(AxumStatus::OK, Some(LatLng::new(-23.5, -46.6))).await;

        page.mount();
        assert_eq!(page.in_flight(), 3);
        page.settle().await;

        let form = page.form();
        assert_eq!(form.items().len(), 2);
        assert_eq!(form.ufs()[0].uf, "AC");
        assert_eq!(form.ufs()[1].name, "São Paulo");
        assert_eq!(form.initial_position(), LatLng::new(-23.5, -46.6));
        assert!(page.last_error().is_none());
    }

    #[tokio::test]
    async fn test_geolocation_unavailable_keeps_default() {
        let (mut page, _) = page_with(AxumStatus::OK, None).await;

        page.mount();
        page.settle().await;

        assert_eq!(page.form().initial_position(), LatLng::default());
    }

    struct PanickingGeolocator;

    impl Geolocator for PanickingGeolocator {
        fn current_position(&self) -> Option<LatLng> {
            panic!("location service crashed")
        }
    }

    #[tokio::test]
    async fn test_panicking_geolocator_does_not_block_mount() {
        let recorded = Shared::default();
        let config = ClientConfig {
            api_url: backend(recorded.clone(), AxumStatus::OK).await,
            geography_url: geography(recorded).await,
        };
        let mut page = CreatePointPage::new(&config, Arc::new(PanickingGeolocator));

        page.mount();
        page.settle().await;

        assert_eq!(page.in_flight(), 0);
        assert_eq!(page.form().initial_position(), LatLng::default());
        assert_eq!(page.form().items().len(), 2);
        assert_eq!(page.form().ufs().len(), 2);
    }

    fn crash() -> PageEvent {
        panic!("load crashed")
    }

    #[tokio::test]
    async fn test_panicking_load_is_recorded() {
        let (mut page, _) = page_with(AxumStatus::OK, None).await;

        page.spawn(async { crash() });
        page.spawn(async { PageEvent::Position(Some(LatLng::new(1.0, 2.0))) });
        tokio::time::timeout(Duration::from_secs(5), page.settle())
            .await
            .expect("settle returns after a panicking load");

        assert_eq!(page.in_flight(), 0);
        assert!(page.last_error().is_some());
        assert_eq!(page.form().initial_position(), LatLng::new(1.0, 2.0));
    }

    #[tokio::test]
    async fn test_latest_state_selection_wins() {
        let (mut page, recorded) = page_with(AxumStatus::OK, None).await;

        page.select_uf("AC");
        page.select_uf("SP");
        page.settle().await;

        let mut requested = recorded.lock().unwrap().city_requests.clone();
        requested.sort();
        assert_eq!(requested, vec!["AC", "SP"]);
        assert_eq!(page.form().selected_uf(), Some("SP"));
        assert_eq!(
            page.form().cities(),
            &[
                City { name: "Campinas".into() },
                City { name: "São Paulo".into() },
            ]
        );
    }

    #[tokio::test]
    async fn test_geography_failure_leaves_lists_empty() {
        let recorded = Shared::default();
        let config = ClientConfig {
            api_url: backend(recorded, AxumStatus::OK).await,
            // nothing listens on the discard port
            geography_url: "http://127.0.0.1:9".to_string(),
        };
        let mut page = CreatePointPage::new(&config, Arc::new(FixedGeolocator(None)));

        page.mount();
        page.select_uf("SP");
        page.settle().await;

        assert!(page.form().ufs().is_empty());
        assert!(page.form().cities().is_empty());
        assert_eq!(page.form().items().len(), 2);
        assert!(page.last_error().is_some());
    }

    fn fill(page: &mut CreatePointPage) {
        let form = page.form_mut();
        form.set_field("name", "Ecoponto").unwrap();
        form.set_field("email", "eco@ponto.org").unwrap();
        form.set_field("whatsapp", "11999990000").unwrap();
        form.select_city("São Paulo");
        form.toggle_item(1);
        form.toggle_item(3);
        form.click_map(LatLng::new(10.0, 20.0));
    }

    #[tokio::test]
    async fn test_submit_success() {
        let (mut page, recorded) = page_with(AxumStatus::OK, None).await;
        page.select_uf("SP");
        page.settle().await;
        fill(&mut page);

        let mut view = RecordingView::default();
        let outcome = page.submit(&mut view).await;

        assert_eq!(outcome, SubmitOutcome::Created);
        assert_eq!(view.alerts, vec![ALERT_POINT_CREATED]);
        assert_eq!(view.routes, vec!["/"]);
        assert_eq!(
            recorded.lock().unwrap().posted,
            Some(json!({
                "name": "Ecoponto",
                "email": "eco@ponto.org",
                "whatsapp": "11999990000",
                "city": "São Paulo",
                "uf": "SP",
                "latitude": 10.0,
                "longitude": 20.0,
                "items": [1, 3],
            }))
        );
    }

    #[tokio::test]
    async fn test_submit_rejected_still_navigates_home() {
        let (mut page, _) = page_with(AxumStatus::BAD_REQUEST, None).await;
        page.select_uf("SP");
        page.settle().await;
        fill(&mut page);

        let mut view = RecordingView::default();
        let outcome = page.submit(&mut view).await;

        assert_eq!(outcome, SubmitOutcome::Rejected(400));
        assert_eq!(view.alerts, vec![ALERT_POINT_FAILED]);
        assert_eq!(view.routes, vec!["/"]);
    }

    #[tokio::test]
    async fn test_submit_unreachable() {
        let config = ClientConfig::new("http://127.0.0.1:9");
        let mut page = CreatePointPage::new(&config, Arc::new(FixedGeolocator(None)));

        let mut view = RecordingView::default();
        let outcome = page.submit(&mut view).await;

        assert_eq!(outcome, SubmitOutcome::Unreachable);
        assert_eq!(view.alerts, vec![ALERT_POINT_FAILED]);
        assert_eq!(view.routes, vec!["/"]);
        assert!(page.last_error().is_some());
    }
}
