//! Integration tests for userlink

mod flow_tests {
    use std::sync::{Arc, Mutex};

    use userlink::api::{HttpUserApi, UserApi};
    use userlink::cache::{build_cache_client, keys, CacheClient};
    use userlink::config::{ApiConfig, CacheConfig};
    use userlink::model::User;
    use userlink::mutation::UpdateFlow;
    use userlink::notify::{Notice, Notifier, Status};
    use userlink::session::{AuthToken, Session};
    use wiremock::matchers::{body_partial_json, header, header_exists, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[derive(Default)]
    struct RecordingNotifier {
        notices: Mutex<Vec<Notice>>,
    }

    impl RecordingNotifier {
        fn titles(&self) -> Vec<(Status, String)> {
            self.notices
                .lock()
                .unwrap()
                .iter()
                .map(|n| (n.status, n.title.clone()))
                .collect()
        }
    }

    impl Notifier for RecordingNotifier {
        fn push(&self, notice: Notice) {
            self.notices.lock().unwrap().push(notice);
        }

        fn dismiss(&self, _id: &str) {}
    }

    fn ann() -> User {
        User::new(1, "Ann")
    }

    fn anne() -> User {
        User::new(1, "Anne")
    }

    fn server_record() -> User {
        let mut user = anne();
        user.email = Some("anne@example.com".to_string());
        user
    }

    struct Harness {
        flow: UpdateFlow,
        cache: Arc<CacheClient>,
        notifier: Arc<RecordingNotifier>,
    }

    fn harness(base_url: &str, cached_user: Option<User>) -> Harness {
        let notifier = Arc::new(RecordingNotifier::default());
        let cache = build_cache_client(&CacheConfig::default(), notifier.clone());
        if let Some(user) = cached_user {
            cache.set_user(keys::USER, user);
        }

        let session = Arc::new(Session::new());
        session.sign_in(AuthToken::new("token-123"));

        let api_config = ApiConfig {
            base_url: base_url.to_string(),
            timeout_secs: 5,
        };
        let api: Arc<dyn UserApi> = Arc::new(HttpUserApi::new(&api_config).unwrap());

        let flow = UpdateFlow::new(
            Arc::clone(&cache),
            api,
            session,
            notifier.clone() as Arc<dyn Notifier>,
        );

        Harness {
            flow,
            cache,
            notifier,
        }
    }

    #[tokio::test]
    async fn successful_update_adopts_server_record() {
        let server = MockServer::start().await;

        Mock::given(method("PATCH"))
            .and(path("/user/1"))
            .and(header("authorization", "Bearer token-123"))
            .and(header_exists("x-request-id"))
            .and(body_partial_json(serde_json::json!({
                "patch": [{"op": "replace", "path": "/name", "value": "Anne"}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "user": {"id": 1, "name": "Anne", "email": "anne@example.com"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let h = harness(&server.uri(), Some(ann()));
        let result = h.flow.submit_update(anne()).await.unwrap();

        // The cache ends at the server's record, which carries a field the
        // optimistic candidate never had
        assert_eq!(result, Some(server_record()));
        assert_eq!(h.cache.get_user(keys::USER), Some(server_record()));
        assert!(h.cache.is_stale(keys::USER));

        assert_eq!(
            h.notifier.titles(),
            vec![(Status::Success, "User updated!".to_string())]
        );
    }

    #[tokio::test]
    async fn rejected_update_rolls_back() {
        let server = MockServer::start().await;

        Mock::given(method("PATCH"))
            .and(path("/user/1"))
            .respond_with(ResponseTemplate::new(500).set_body_string("database offline"))
            .expect(1)
            .mount(&server)
            .await;

        let h = harness(&server.uri(), Some(ann()));
        let result = h.flow.submit_update(anne()).await.unwrap();

        assert!(result.is_none());
        // Cache reverted to the pre-mutation snapshot, then marked stale
        assert_eq!(h.cache.get_user(keys::USER), Some(ann()));
        assert!(h.cache.is_stale(keys::USER));

        assert_eq!(
            h.notifier.titles(),
            vec![(
                Status::Warning,
                "Update failed; restoring previous values".to_string()
            )]
        );
    }

    #[tokio::test]
    async fn no_signed_in_user_sends_nothing() {
        let server = MockServer::start().await;

        let h = harness(&server.uri(), None);
        let result = h.flow.submit_update(anne()).await.unwrap();

        assert!(result.is_none());
        assert!(h.cache.get_user(keys::USER).is_none());
        assert!(h.notifier.titles().is_empty());
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn identical_snapshots_skip_the_request() {
        let server = MockServer::start().await;

        let h = harness(&server.uri(), Some(ann()));
        let result = h.flow.submit_update(ann()).await.unwrap();

        // Empty diff short-circuits the network call but still settles
        assert_eq!(result, Some(ann()));
        assert!(h.cache.is_stale(keys::USER));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn expired_credential_takes_failure_path() {
        let server = MockServer::start().await;

        let notifier = Arc::new(RecordingNotifier::default());
        let cache = build_cache_client(&CacheConfig::default(), notifier.clone());
        cache.set_user(keys::USER, ann());

        let session = Arc::new(Session::new());
        session.sign_in(AuthToken::with_expiry(
            "stale-token",
            chrono::Utc::now() - chrono::Duration::hours(1),
        ));

        let api: Arc<dyn UserApi> = Arc::new(
            HttpUserApi::new(&ApiConfig {
                base_url: server.uri(),
                timeout_secs: 5,
            })
            .unwrap(),
        );
        let flow = UpdateFlow::new(
            Arc::clone(&cache),
            api,
            session,
            notifier.clone() as Arc<dyn Notifier>,
        );

        let result = flow.submit_update(anne()).await.unwrap();

        assert!(result.is_none());
        assert_eq!(cache.get_user(keys::USER), Some(ann()));
        assert_eq!(
            notifier.titles(),
            vec![(
                Status::Warning,
                "Update failed; restoring previous values".to_string()
            )]
        );
        assert!(server.received_requests().await.unwrap().is_empty());
    }
}

mod query_tests {
    use std::sync::Arc;

    use userlink::cache::{CacheClient, RefetchTrigger};
    use userlink::config::CacheConfig;
    use userlink::error::UserlinkError;
    use userlink::model::User;

    #[tokio::test]
    async fn query_populates_and_then_serves_from_cache() {
        let cache = Arc::new(CacheClient::new(CacheConfig::default()));

        let first = cache
            .query("user", RefetchTrigger::Explicit, async {
                Ok(User::new(1, "Ann"))
            })
            .await
            .unwrap();
        assert_eq!(first, User::new(1, "Ann"));

        // Second read must not hit the fetcher: a failing one proves it
        let second = cache
            .query("user", RefetchTrigger::Explicit, async {
                Err(UserlinkError::Internal("fetcher must not run".to_string()))
            })
            .await
            .unwrap();
        assert_eq!(second, User::new(1, "Ann"));
    }

    #[tokio::test]
    async fn invalidated_entry_refetches_once() {
        let cache = Arc::new(CacheClient::new(CacheConfig::default()));
        cache.set_user("user", User::new(1, "Ann"));
        cache.invalidate("user");
        assert!(cache.is_stale("user"));

        let refreshed = cache
            .query("user", RefetchTrigger::Explicit, async {
                Ok(User::new(1, "Anne"))
            })
            .await
            .unwrap();

        assert_eq!(refreshed, User::new(1, "Anne"));
        assert!(!cache.is_stale("user"));
    }
}
