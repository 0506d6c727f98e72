//! Scheme-to-service registries.
//!
//! A [`ServiceRegistry`] maps scheme names to service instances and is
//! built once at startup, then shared by reference across request threads.
//! Resolution is deliberately forgiving: an unknown scheme name falls back
//! to the first service registered, so a deployment with a single scheme
//! accepts any header its parser lets through.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::{
    error::{AuthError, Result},
    service::{AuthenticationService, AuthorizationService},
};

/// Registry of authentication services, keyed by scheme name.
pub type AuthenticationRegistry = ServiceRegistry<dyn AuthenticationService>;

/// Registry of authorization services, keyed by scheme name.
pub type AuthorizationRegistry = ServiceRegistry<dyn AuthorizationService>;

/// An ordered, thread-safe map from scheme name to service.
///
/// Registration is first-wins: a second `register` under an existing name
/// is ignored. Insertion order is preserved so that the fallback service
/// is deterministic.
pub struct ServiceRegistry<S: ?Sized> {
    label: &'static str,
    services: RwLock<Vec<(String, Arc<S>)>>,
}

impl<S: ?Sized> ServiceRegistry<S> {
    /// Creates an empty registry. `label` names the service kind in error
    /// messages, e.g. `"authorization"`.
    #[must_use]
    pub fn new(label: &'static str) -> Self {
        Self { label, services: RwLock::new(Vec::new()) }
    }

    /// Registers `service` under `scheme`.
    ///
    /// First registration for a name wins; later registrations under the
    /// same name are ignored and logged.
    pub fn register(&self, scheme: impl Into<String>, service: Arc<S>) {
        let scheme = scheme.into();
        let mut services = self.services.write();
        if services.iter().any(|(name, _)| *name == scheme) {
            tracing::warn!(scheme = %scheme, kind = self.label, "scheme already registered, ignoring");
            return;
        }
        services.push((scheme, service));
    }

    /// Resolves a service for `scheme`.
    ///
    /// Returns the service registered under `scheme` when one exists,
    /// otherwise the first service ever registered.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::NotImplemented`] when the registry is empty.
    pub fn resolve(&self, scheme: &str) -> Result<Arc<S>> {
        let services = self.services.read();
        if let Some((_, service)) = services.iter().find(|(name, _)| name == scheme) {
            return Ok(Arc::clone(service));
        }
        match services.first() {
            Some((fallback, service)) => {
                tracing::debug!(
                    scheme,
                    fallback = %fallback,
                    kind = self.label,
                    "unknown scheme, falling back to first registered service"
                );
                Ok(Arc::clone(service))
            },
            None => Err(AuthError::NotImplemented(format!(
                "no {} service registered",
                self.label
            ))),
        }
    }

    /// Number of registered services.
    #[must_use]
    pub fn len(&self) -> usize {
        self.services.read().len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.services.read().is_empty()
    }
}
