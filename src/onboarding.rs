//! Store onboarding form.
//!
//! The submitted profile is kept in the local store under [`FORM_DATA_KEY`] and restored
//! on the next visit. The country picker is filled from a remote list fetched once;
//! a failed fetch leaves it empty.

use crate::persistence::LocalStore;
use log::{error, info, warn};

/// Local storage key for the saved profile.
pub const FORM_DATA_KEY: &str = "formData";
/// Placeholder value of the category and country pickers.
pub const UNSELECTED: &str = "Select";
pub const DEFAULT_COUNTRIES_URL: &str = "https://restcountries.com/v3.1/all";

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoreProfile {
    pub store_name: String,
    pub product_category: String,
    pub store_description: String,
    pub address_line1: String,
    pub address_line2: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
    pub country: String,
}

impl Default for StoreProfile {
    fn default() -> Self {
        Self {
            store_name: String::new(),
            product_category: UNSELECTED.to_string(),
            store_description: String::new(),
            address_line1: String::new(),
            address_line2: String::new(),
            city: String::new(),
            state: String::new(),
            pincode: String::new(),
            country: UNSELECTED.to_string(),
        }
    }
}

/// Form state bound to a local store.
#[derive(Clone, Debug)]
pub struct OnboardingForm {
    store: LocalStore,
    pub profile: StoreProfile,
}

impl OnboardingForm {
    /// Opens the form, restoring the last submitted profile if one was saved.
    /// Missing fields take their defaults; an unreadable record starts a blank form.
    pub fn load(store: LocalStore) -> Self {
        let profile = match store.get::<StoreProfile>(FORM_DATA_KEY) {
            Ok(saved) => saved.unwrap_or_default(),
            Err(e) => {
                warn!("saved store profile ignored key={}: {}", FORM_DATA_KEY, e);
                StoreProfile::default()
            }
        };
        Self { store, profile }
    }

    /// Saves the current profile and resets the form to its defaults.
    pub fn submit(&mut self) -> Result<StoreProfile, String> {
        self.store.set(FORM_DATA_KEY, &self.profile)?;
        let submitted = std::mem::take(&mut self.profile);
        info!(
            "store profile submitted store_name={:?} category={:?} city={:?} country={:?}",
            submitted.store_name, submitted.product_category, submitted.city, submitted.country
        );
        Ok(submitted)
    }
}

#[derive(serde::Deserialize)]
struct CountryRecord {
    name: CountryName,
}

#[derive(serde::Deserialize)]
struct CountryName {
    common: String,
}

/// Fetches country names, sorted. Any failure is logged and yields an empty list.
pub async fn fetch_country_names(client: &reqwest::Client, url: &str) -> Vec<String> {
    match try_fetch_country_names(client, url).await {
        Ok(names) => {
            info!("fetched {} countries", names.len());
            names
        }
        Err(e) => {
            error!("error fetching countries from {}: {}", url, e);
            Vec::new()
        }
    }
}

async fn try_fetch_country_names(client: &reqwest::Client, url: &str) -> Result<Vec<String>, String> {
    let response = client
        .get(url)
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|e| e.to_string())?;
    let records: Vec<CountryRecord> = response.json().await.map_err(|e| e.to_string())?;
    let mut names: Vec<String> = records.into_iter().map(|r| r.name.common).collect();
    names.sort();
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{routing::get, Json, Router};

    fn sample_profile() -> StoreProfile {
        StoreProfile {
            store_name: "ClothBuddy".into(),
            product_category: "Shirts".into(),
            store_description: "Everyday wear".into(),
            address_line1: "12 MG Road".into(),
            address_line2: String::new(),
            city: "Pune".into(),
            state: "Maharashtra".into(),
            pincode: "411001".into(),
            country: "India".into(),
        }
    }

    #[test]
    fn first_visit_starts_from_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let form = OnboardingForm::load(LocalStore::new(dir.path().join("ls.json")));
        assert_eq!(form.profile, StoreProfile::default());
        assert_eq!(form.profile.product_category, "Select");
    }

    #[test]
    fn submit_saves_resets_and_reloads() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path().join("ls.json"));
        let mut form = OnboardingForm::load(store.clone());
        form.profile = sample_profile();
        let submitted = form.submit().unwrap();
        assert_eq!(submitted, sample_profile());
        assert_eq!(form.profile, StoreProfile::default());

        let reopened = OnboardingForm::load(store.clone());
        assert_eq!(reopened.profile, sample_profile());
        let raw: serde_json::Value = store.get(FORM_DATA_KEY).unwrap().unwrap();
        assert_eq!(raw["storeName"], "ClothBuddy");
        assert_eq!(raw["addressLine1"], "12 MG Road");
    }

    #[test]
    fn partial_saved_profile_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ls.json");
        std::fs::write(&path, r#"{"formData": {"storeName": "x"}}"#).unwrap();
        let form = OnboardingForm::load(LocalStore::new(&path));
        assert_eq!(form.profile.store_name, "x");
        assert_eq!(form.profile.product_category, "Select");
        assert_eq!(form.profile.country, "Select");
    }

    #[test]
    fn unreadable_saved_profile_starts_blank() {
        let _ = env_logger::try_init();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ls.json");
        std::fs::write(&path, r#"{"formData": ["not", "a", "profile"]}"#).unwrap();
        let mut form = OnboardingForm::load(LocalStore::new(&path));
        assert_eq!(form.profile, StoreProfile::default());

        form.profile = sample_profile();
        form.submit().unwrap();
        assert_eq!(OnboardingForm::load(LocalStore::new(&path)).profile, sample_profile());

        std::fs::write(&path, "{ truncated").unwrap();
        assert_eq!(OnboardingForm::load(LocalStore::new(&path)).profile, StoreProfile::default());
    }

    #[tokio::test]
    async fn fetch_sorts_common_names() {
        let app = Router::new().route(
            "/all",
            get(|| async {
                Json(serde_json::json!([
                    { "name": { "common": "India", "official": "Republic of India" } },
                    { "name": { "common": "Bhutan" } },
                    { "name": { "common": "Nepal" } }
                ]))
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app.into_make_service()).await.unwrap();
        });
        let names = fetch_country_names(&reqwest::Client::new(), &format!("http://{}/all", addr)).await;
        assert_eq!(names, vec!["Bhutan", "India", "Nepal"]);
    }

    #[tokio::test]
    async fn fetch_failure_degrades_to_empty_list() {
        let names = fetch_country_names(&reqwest::Client::new(), "http://127.0.0.1:9/all").await;
        assert!(names.is_empty());
    }
}
