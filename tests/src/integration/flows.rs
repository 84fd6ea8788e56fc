//! # Integration Test Flows
//!
//! Tests that the core crates work together:
//!
//! 1. **Session control → item store**: a client connects, publishes into its
//!    scope and a subscriber sees the item
//! 2. **Scope registry → item store**: removing a scope stops publishing to it
//! 3. **Settings tracker → item store**: settings survive a new tracker
//! 4. **Item model → item store**: signed items and persisted records

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::time::timeout;

    use cc_01_item_model::{CommonItem, HmacItemSigner, ItemRecord, HMAC_SHA256_ALG};
    use cc_02_scope_registry::{ScopeConfig, ScopeManager, ScopeRegistry};
    use cc_03_session_control::{
        AssemblyInfo, ClientInfo, ClientSession, SessionControl, SessionError, SessionServer,
        SessionServerConfig, SessionState, UserInfo,
    };
    use cc_04_item_store::{InMemoryItemStore, ItemQuery, ItemStore, ItemStoreConfig, StoreError};
    use cc_05_settings_tracker::{
        SettingsClient, SettingsConfig, SettingsTracker, StoreSettingsClient,
    };
    use core_runtime::{CoreContainer, RuntimeConfig};
    use shared_types::{sys_prop, EnvId, ItemKind};
    use uuid::Uuid;

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    fn client_info(env: EnvId, component_version: &str) -> ClientInfo {
        ClientInfo {
            node_id: Uuid::new_v4(),
            config_env: env,
            build_env: env,
            host_name: "trader-pc".to_string(),
            user_info: UserInfo::new("corp\\trader", Some("A Trader")).unwrap(),
            component: AssemblyInfo::new("Core.Client", component_version),
            application: AssemblyInfo::new("Blotter", "1.0.0.0"),
            ..ClientInfo::default()
        }
    }

    fn scopes() -> Arc<ScopeManager> {
        Arc::new(ScopeManager::from_config(&ScopeConfig::for_testing()).unwrap())
    }

    fn store(scopes: &Arc<ScopeManager>) -> Arc<InMemoryItemStore> {
        Arc::new(InMemoryItemStore::with_scope_registry(
            ItemStoreConfig::for_testing(),
            Arc::clone(scopes) as Arc<dyn ScopeRegistry>,
        ))
    }

    fn curve(name: &str, scope: &str, rate: f64) -> CommonItem {
        let mut item = CommonItem::new(ItemKind::Object, false, name, Some(scope));
        item.set_app_prop("Currency", "AUD").unwrap();
        item.set_json_data(&rate).unwrap();
        item
    }

    // =============================================================================
    // SESSION CONTROL → ITEM STORE
    // =============================================================================

    #[tokio::test]
    async fn test_connected_client_publishes_to_subscriber() {
        let server = Arc::new(SessionServer::new(SessionServerConfig::for_testing()));
        let scopes = scopes();
        let store = store(&scopes);

        let mut session = ClientSession::new(
            Arc::clone(&server) as Arc<dyn SessionControl>,
            client_info(EnvId::Utt, "1.0.1900.0"),
        );
        let session_id = session.connect().unwrap();
        assert!(!session_id.is_nil());
        assert_eq!(server.session_count(), 1);

        scopes.add_scope("Pricing").unwrap();
        let mut subscription = store.subscribe(ItemQuery::all().in_scope("PRICING"));

        let publisher = Arc::clone(&store);
        tokio::spawn(async move {
            publisher.save_item(curve("AUD.Swap", "Pricing", 0.0425)).unwrap();
        });

        let received = timeout(Duration::from_secs(2), subscription.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(received.name(), "AUD.Swap");
        assert_eq!(received.json_data::<f64>().unwrap(), Some(0.0425));

        session.close();
        assert_eq!(session.state(), SessionState::Closed);
        assert_eq!(server.session_count(), 0);
    }

    #[test]
    fn test_rejected_client_cannot_connect() {
        let server = Arc::new(SessionServer::new(SessionServerConfig::for_testing()));

        let mut wrong_env = ClientSession::new(
            Arc::clone(&server) as Arc<dyn SessionControl>,
            client_info(EnvId::Dev, "1.0.1900.0"),
        );
        match wrong_env.connect() {
            Err(SessionError::Rejected(message)) => assert!(message.contains("environment")),
            other => panic!("expected rejection, got {other:?}"),
        }

        let mut too_old = ClientSession::new(
            Arc::clone(&server) as Arc<dyn SessionControl>,
            client_info(EnvId::Utt, "0.9.1900.0"),
        );
        assert!(matches!(too_old.connect(), Err(SessionError::Rejected(_))));
        assert_eq!(too_old.state(), SessionState::Unconnected);
        assert_eq!(server.session_count(), 0);
    }

    #[test]
    fn test_dropped_client_releases_session() {
        let server = Arc::new(SessionServer::new(SessionServerConfig::for_testing()));
        {
            let mut session = ClientSession::new(
                Arc::clone(&server) as Arc<dyn SessionControl>,
                client_info(EnvId::Utt, "1.0.1900.0"),
            );
            session.connect().unwrap();
            assert_eq!(server.session_count(), 1);
        }
        assert_eq!(server.session_count(), 0);
    }

    // =============================================================================
    // SCOPE REGISTRY → ITEM STORE
    // =============================================================================

    #[test]
    fn test_removed_scope_refuses_items() {
        let scopes = scopes();
        let store = store(&scopes);

        store.save_item(curve("a", "Test", 1.0)).unwrap();
        scopes.set_scopes(&["SYSTEM"]).unwrap();

        assert_eq!(
            store.save_item(curve("b", "Test", 2.0)).unwrap_err(),
            StoreError::UnknownScope("Test".to_string())
        );
        // Items already stored stay readable.
        assert!(store
            .load_item(ItemKind::Object, Some("Test"), "a")
            .unwrap()
            .is_some());
    }

    // =============================================================================
    // SETTINGS TRACKER → ITEM STORE
    // =============================================================================

    #[test]
    fn test_settings_visible_to_fresh_tracker() {
        let scopes = scopes();
        let store = store(&scopes);
        let client: Arc<dyn SettingsClient> = Arc::new(StoreSettingsClient::new(
            Arc::clone(&store) as Arc<dyn ItemStore>,
            SettingsConfig::default(),
        ));

        let tracker = SettingsTracker::new(Arc::clone(&client), "Blotter").unwrap();
        assert_eq!(tracker.get_set_value("x", 5), 5);
        assert_eq!(tracker.get_set_value("x", 6), 5);
        tracker.commit(false).unwrap();
        assert_eq!(tracker.get_set_value("x", 6), 5);

        let fresh = SettingsTracker::new(Arc::clone(&client), "Blotter").unwrap();
        assert_eq!(fresh.get_set_value("x", 6), 5);

        let other_app = SettingsTracker::new(client, "Other").unwrap();
        assert_eq!(other_app.get_set_value("x", 6), 6);
    }

    #[test]
    fn test_settings_through_runtime_container() {
        let container = CoreContainer::new(RuntimeConfig::default()).unwrap();
        {
            let tracker = container.settings_tracker("Blotter").unwrap();
            tracker.set_new_value("theme", "dark");
            // Dropped without commit.
        }
        let tracker = container.settings_tracker("Blotter").unwrap();
        assert_eq!(
            tracker.get_all_values(false).get_value::<String>("theme").as_deref(),
            Some("dark")
        );
    }

    // =============================================================================
    // ITEM MODEL → ITEM STORE
    // =============================================================================

    #[test]
    fn test_signed_item_verifies_after_load() {
        let scopes = scopes();
        let store = store(&scopes);
        let signer = HmacItemSigner::new().with_key("desk-key", b"secret".to_vec());

        let mut item = curve("signed", "Test", 3.5);
        item.sign(&signer, "desk-key").unwrap();
        store.save_item(item).unwrap();

        let loaded = store
            .load_item(ItemKind::Object, Some("Test"), "signed")
            .unwrap()
            .unwrap();
        assert!(loaded.is_signed(&signer));
        assert_eq!(
            loaded.sys_props().get_value::<i32>(sys_prop::Y_ALG),
            Some(HMAC_SHA256_ALG)
        );

        let stranger = HmacItemSigner::new().with_key("desk-key", b"other".to_vec());
        assert!(!loaded.is_signed(&stranger));
    }

    #[test]
    fn test_record_survives_json_and_reload() {
        let scopes = scopes();
        let source = store(&scopes);
        let saved = source.save_item(curve("rec", "Test", 9.0)).unwrap();

        let json = serde_json::to_string(&saved.to_record()).unwrap();
        let record: ItemRecord = serde_json::from_str(&json).unwrap();
        let restored = CommonItem::from_record(record);

        assert!(restored.is_frozen());
        assert_eq!(restored.id(), saved.id());
        assert_eq!(restored.unique_name(), saved.unique_name());
        assert_eq!(restored.y_data_hash(), saved.y_data_hash());
        assert_eq!(restored.app_props(), saved.app_props());

        let republished = restored.clone_for_republish(false, false);
        let target = store(&scopes);
        let copy = target.save_item(republished).unwrap();
        assert_ne!(copy.id(), saved.id());
        assert_eq!(copy.json_data::<f64>().unwrap(), Some(9.0));
    }

    #[test]
    fn test_deleted_item_seen_only_by_tombstone_subscribers() {
        let scopes = scopes();
        let store = store(&scopes);
        let mut live = store.subscribe(ItemQuery::all());
        let mut audit = store.subscribe(ItemQuery::all().including_expired());

        store.save_item(curve("gone", "Test", 1.0)).unwrap();
        assert!(store.delete_item(ItemKind::Object, Some("TEST"), "GONE").unwrap());

        assert_eq!(live.drain().unwrap().len(), 1);
        let audited = audit.drain().unwrap();
        assert_eq!(audited.len(), 2);
        assert!(!audited[1].is_current());
        assert_eq!(store.purge_expired(chrono::Utc::now()), 1);
    }
}
