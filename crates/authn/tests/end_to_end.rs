//! End-to-end scenarios across parsing, registry resolution, schemes, and
//! the ticket store.

use std::sync::Arc;

use tessera_authn::{
    AccessToken, AuthError, AuthenticationService, AuthorizationRegistry, AuthorizationService,
    ClaimsOptions, ClaimsTicketService, CustomTicketService, SCHEME_CLAIMS, SCHEME_CUSTOM,
};
use tessera_store::{AuthorizationIdentity, IdentityRole, MemoryTicketStore, TicketStore};

fn custom_service() -> Arc<CustomTicketService> {
    Arc::new(CustomTicketService::new(Arc::new(MemoryTicketStore::default())))
}

#[test]
fn custom_scheme_sign_in_then_authorize() {
    let service = custom_service();

    let ticket = service.sign_in("u1", Vec::new(), None).unwrap();
    assert_eq!(ticket.split('.').count(), 3, "wire ticket must be C.S.ticket_id");

    let identity = service.authorization_identity(&ticket).unwrap().unwrap();
    assert_eq!(identity.identity, "u1");
    assert!(identity.roles.is_empty());
    assert!(identity.payload.is_none());
}

#[test]
fn custom_scheme_corrupt_ticket_id_is_unauthenticated() {
    let service = custom_service();
    let ticket = service.sign_in("u1", Vec::new(), None).unwrap();

    let mut segments: Vec<String> = ticket.split('.').map(str::to_owned).collect();
    segments[2] = "deadbeefdeadbeefdeadbeefdeadbeef".to_owned();
    let corrupted = segments.join(".");

    // Wrong key material: whether decryption fails outright or yields
    // garbage that misses every later check, no identity comes back.
    assert!(!matches!(service.authorization_identity(&corrupted), Ok(Some(_))));
}

#[test]
fn header_parsing_through_registry() {
    let service = custom_service();
    let registry = AuthorizationRegistry::new("authorization");
    registry.register(SCHEME_CUSTOM, service.clone());

    let token = AccessToken::parse("maydear abc123").unwrap();
    assert_eq!(token.scheme, "maydear");
    assert_eq!(token.credentials, "abc123");

    assert!(AccessToken::parse("malformed").is_none());

    // The parsed credentials are not a valid ticket; resolution succeeds,
    // authorization does not.
    let resolved = registry.resolve(&token.scheme).unwrap();
    assert!(!matches!(resolved.authorization_identity(&token.credentials), Ok(Some(_))));
}

#[test]
fn registry_falls_back_to_first_registered_scheme() {
    let custom = custom_service();
    let claims_store = Arc::new(MemoryTicketStore::default());
    let claims = Arc::new(ClaimsTicketService::new(ClaimsOptions::default(), claims_store));

    let registry = AuthorizationRegistry::new("authorization");
    registry.register(SCHEME_CUSTOM, custom);
    registry.register(SCHEME_CLAIMS, claims);

    let fallback = registry.resolve("Negotiate").unwrap();
    assert_eq!(fallback.scheme(), SCHEME_CUSTOM);

    let named = registry.resolve(SCHEME_CLAIMS).unwrap();
    assert_eq!(named.scheme(), SCHEME_CLAIMS);
}

#[test]
fn empty_registry_reports_not_implemented() {
    let registry = AuthorizationRegistry::new("authorization");
    assert!(matches!(registry.resolve(SCHEME_CUSTOM), Err(AuthError::NotImplemented(_))));
}

#[test]
fn schemes_sharing_one_store_do_not_collide() {
    // Both stateful schemes write entries keyed by identity into the same
    // store; distinct identities stay independent.
    let store: Arc<MemoryTicketStore> = Arc::new(MemoryTicketStore::default());
    let custom = CustomTicketService::new(store.clone());
    let claims = ClaimsTicketService::new(ClaimsOptions::default(), store.clone());

    let custom_ticket = custom.sign_in("alice", Vec::new(), None).unwrap();
    claims.sign_in("bob", Vec::new(), None).unwrap();

    let alice = custom.authorization_identity(&custom_ticket).unwrap().unwrap();
    assert_eq!(alice.identity, "alice");
    assert!(store.retrieve("bob").unwrap().is_some());

    claims.sign_out("bob").unwrap();
    assert!(store.retrieve("bob").unwrap().is_none());
    assert!(custom.authorization_identity(&custom_ticket).unwrap().is_some());
}

#[test]
fn roles_and_payload_survive_the_full_trip() {
    let service = custom_service();
    let roles = vec![
        IdentityRole::new("admin", "Administrator", "Full access"),
        IdentityRole::new("auditor", "Auditor", "Read-only access"),
    ];
    let payload = Some(serde_json::json!({"tenant": "acme", "region": "eu"}));

    let ticket = service.sign_in("u1", roles.clone(), payload.clone()).unwrap();
    let identity = service.authorization_identity(&ticket).unwrap().unwrap();

    assert_eq!(identity.role_names(), vec!["admin", "auditor"]);
    assert_eq!(identity.payload, payload);
}

#[test]
fn store_failure_surfaces_as_store_error() {
    struct FailingStore;

    impl TicketStore for FailingStore {
        fn store(&self, _identity: &AuthorizationIdentity) -> tessera_store::StoreResult<()> {
            Err(tessera_store::StoreError::connection("backend down"))
        }

        fn retrieve(
            &self,
            _key: &str,
        ) -> tessera_store::StoreResult<Option<AuthorizationIdentity>> {
            Err(tessera_store::StoreError::connection("backend down"))
        }

        fn remove(&self, _key: &str) -> tessera_store::StoreResult<()> {
            Err(tessera_store::StoreError::connection("backend down"))
        }
    }

    let service = CustomTicketService::new(Arc::new(FailingStore));
    assert!(matches!(service.sign_in("u1", Vec::new(), None), Err(AuthError::Store(_))));
}
