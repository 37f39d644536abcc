//! HTTP clients for the Ecoleta backend and the IBGE geography service.

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::debug;

use ecoleta_shared::{City, NewPoint, SerializedItem, Uf};

use crate::error::{ClientError, Result};

/// Client for the Ecoleta REST API.
#[derive(Debug, Clone)]
pub struct EcoletaApi {
    http: Client,
    base_url: String,
}

impl EcoletaApi {
    pub fn new(http: Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// `GET /items`
    pub async fn list_items(&self) -> Result<Vec<SerializedItem>> {
        let url = self.url("items");
        let resp = self.http.get(&url).send().await?;

        if !resp.status().is_success() {
            return Err(ClientError::Status {
                status: resp.status().as_u16(),
                url,
            });
        }

        let items: Vec<SerializedItem> = resp.json().await?;
        debug!(count = items.len(), "Loaded item catalog");
        Ok(items)
    }

    /// `POST /points`.  Any response is returned as its status; only a
    /// transport failure is an error.
    pub async fn create_point(&self, point: &NewPoint) -> Result<StatusCode> {
        let resp = self.http.post(self.url("points")).json(point).send().await?;
        Ok(resp.status())
    }
}

#[derive(Debug, Deserialize)]
struct IbgeUf {
    sigla: String,
    nome: String,
}

#[derive(Debug, Deserialize)]
struct IbgeCity {
    nome: String,
}

/// Client for the IBGE "localidades" API.
#[derive(Debug, Clone)]
pub struct GeographyApi {
    http: Client,
    base_url: String,
}

impl GeographyApi {
    pub fn new(http: Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// All states, ordered by name.
    pub async fn list_ufs(&self) -> Result<Vec<Uf>> {
        let url = format!("{}/estados", self.base_url);
        let resp = self
            .http
            .get(&url)
            .query(&[("orderBy", "nome")])
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(ClientError::Status {
                status: resp.status().as_u16(),
                url,
            });
        }

        let states: Vec<IbgeUf> = resp.json().await?;
        Ok(states
            .into_iter()
            .map(|s| Uf {
                uf: s.sigla,
                name: s.nome,
            })
            .collect())
    }

    /// Municipalities of the state `uf`.
    pub async fn list_cities(&self, uf: &str) -> Result<Vec<City>> {
        let url = format!("{}/estados/{}/municipios", self.base_url, uf);
        let resp = self.http.get(&url).send().await?;

        if !resp.status().is_success() {
            return Err(ClientError::Status {
                status: resp.status().as_u16(),
                url,
            });
        }

        let cities: Vec<IbgeCity> = resp.json().await?;
        debug!(uf, count = cities.len(), "Loaded cities");
        Ok(cities.into_iter().map(|c| City { name: c.nome }).collect())
    }
}
