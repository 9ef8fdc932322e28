use std::{
    collections::HashMap,
    time::{Duration, Instant},
};

use entity::MasterRecord;
use tokio::sync::RwLock;
use tracing::warn;

use crate::master::MasterDataService;

/// Resource plus the bearer the list was loaded with.
type CacheKey = (&'static str, String);

struct CachedNames {
    loaded_at: Instant,
    names: HashMap<i64, String>,
}

/// Resolves master-data ids to display names, one cached list per resource
/// and credential.
///
/// A cached list is only served back to callers presenting the same bearer
/// it was fetched with, so the backend's access rules still decide who sees
/// which names. Calls without any credential always go to the backend.
///
/// Lookups never fail: an unknown id or a backend error yields the id
/// rendered as a string.
pub struct NameCache {
    ttl: Duration,
    entries: RwLock<HashMap<CacheKey, CachedNames>>,
}

impl NameCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub async fn display_name<T: MasterRecord>(
        &self,
        service: &MasterDataService<T>,
        id: i64,
        token: Option<&str>,
    ) -> String {
        let credential = service.credential(token).map(str::to_owned);
        if let Some(credential) = &credential {
            if let Some(name) = self.fresh::<T>(credential, id).await {
                return name;
            }
        }
        match service.list(token).await {
            Ok(records) => {
                let names = records
                    .iter()
                    .map(|r| (r.id(), r.display_name().to_string()))
                    .collect::<HashMap<_, _>>();
                let name = names.get(&id).cloned();
                if let Some(credential) = credential {
                    let mut entries = self.entries.write().await;
                    entries.retain(|_, cached| cached.loaded_at.elapsed() < self.ttl);
                    entries.insert(
                        (T::RESOURCE, credential),
                        CachedNames {
                            loaded_at: Instant::now(),
                            names,
                        },
                    );
                }
                name.unwrap_or_else(|| id.to_string())
            }
            Err(err) => {
                warn!(resource = T::RESOURCE, id, error = %err, "name lookup failed");
                id.to_string()
            }
        }
    }

    async fn fresh<T: MasterRecord>(&self, credential: &str, id: i64) -> Option<String> {
        let entries = self.entries.read().await;
        let cached = entries.get(&(T::RESOURCE, credential.to_owned()))?;
        if cached.loaded_at.elapsed() >= self.ttl {
            return None;
        }
        Some(
            cached
                .names
                .get(&id)
                .cloned()
                .unwrap_or_else(|| id.to_string()),
        )
    }

    /// Drop every cached list for a resource after it was modified.
    pub async fn invalidate(&self, resource: &str) {
        self.entries
            .write()
            .await
            .retain(|(cached, _), _| *cached != resource);
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::{BackendClient, BackendConfig, DepartmentService, mock::MockBackend};

    async fn departments() -> MockBackend {
        let mock = MockBackend::start().await;
        mock.seed(
            "department",
            vec![
                json!({"id": 1, "code": "ENG", "name": "Engineering"}),
                json!({"id": 2, "code": "FIN", "name": "Finance"}),
            ],
        );
        mock
    }

    #[tokio::test]
    async fn resolves_and_caches_names() {
        let mock = departments().await;
        let service: DepartmentService = MasterDataService::new(mock.client());
        let cache = NameCache::new(Duration::from_secs(60));

        assert_eq!(cache.display_name(&service, 1, Some("tok")).await, "Engineering");
        assert_eq!(cache.display_name(&service, 2, Some("tok")).await, "Finance");
        assert_eq!(cache.display_name(&service, 99, Some("tok")).await, "99");
        assert_eq!(mock.calls().len(), 1);

        cache.invalidate("department").await;
        cache.display_name(&service, 1, Some("tok")).await;
        assert_eq!(mock.calls().len(), 2);
    }

    #[tokio::test]
    async fn cached_names_stay_with_their_credential() {
        let mock = departments().await;
        let service: DepartmentService = MasterDataService::new(mock.client());
        let cache = NameCache::new(Duration::from_secs(60));

        assert_eq!(cache.display_name(&service, 1, Some("asha")).await, "Engineering");
        // No credential: the backend refuses and nothing cached leaks out.
        assert_eq!(cache.display_name(&service, 1, None).await, "1");
        assert_eq!(cache.display_name(&service, 1, None).await, "1");
        assert_eq!(mock.calls().len(), 3);

        // Another user gets their own load.
        assert_eq!(cache.display_name(&service, 1, Some("ravi")).await, "Engineering");
        assert_eq!(mock.calls().len(), 4);
        assert_eq!(mock.calls()[3].authorization.as_deref(), Some("Bearer ravi"));
    }

    #[tokio::test]
    async fn service_token_entries_serve_anonymous_callers() {
        let mock = departments().await;
        let service: DepartmentService =
            MasterDataService::new(mock.client_with_service_token("svc"));
        let cache = NameCache::new(Duration::from_secs(60));

        assert_eq!(cache.display_name(&service, 2, None).await, "Finance");
        assert_eq!(cache.display_name(&service, 1, None).await, "Engineering");
        assert_eq!(mock.calls().len(), 1);
    }

    #[tokio::test]
    async fn backend_failure_falls_back_to_id() {
        let client = BackendClient::new(&BackendConfig::new("http://127.0.0.1:9")).unwrap();
        let service: DepartmentService = MasterDataService::new(client);
        let cache = NameCache::new(Duration::from_secs(60));
        assert_eq!(cache.display_name(&service, 42, Some("tok")).await, "42");
    }

    #[tokio::test]
    async fn zero_ttl_always_reloads() {
        let mock = departments().await;
        let service: DepartmentService = MasterDataService::new(mock.client());
        let cache = NameCache::new(Duration::ZERO);
        cache.display_name(&service, 1, Some("tok")).await;
        cache.display_name(&service, 1, Some("tok")).await;
        assert_eq!(mock.calls().len(), 2);
    }
}
