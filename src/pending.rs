//! Pending-request registry: at most one in-flight request per identity.

use crate::transport::Method;
use futures::future::AbortHandle;
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::debug;

/// Deduplication key for an in-flight request, derived from path and verb.
///
/// Deliberately coarse: query-parameter variants of the same path and verb share
/// one identity and therefore one registry slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct Identity(String);

impl Identity {
    pub(crate) fn new(path: &str, method: Method) -> Self {
        Identity(format!("{path}&{method}"))
    }
}

impl std::fmt::Display for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

struct PendingEntry {
    /// Per-client call sequence number; ties the entry to the call that created it.
    call: u64,
    abort: AbortHandle,
}

/// Registry of abort handles for in-flight requests, keyed by identity.
///
/// Mutations are read-modify-write under one lock acquisition each; nothing is
/// awaited while the lock is held. Owned by a single `RequestClient`, never shared
/// across instances.
#[derive(Default)]
pub(crate) struct PendingRegistry {
    inflight: Mutex<HashMap<Identity, PendingEntry>>,
}

impl PendingRegistry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Cancel and discard any in-flight request under `identity`.
    ///
    /// Best-effort: the abort is advisory to the transport, while the superseded
    /// caller deterministically observes the cancellation error.
    pub(crate) fn supersede(&self, identity: &Identity) {
        let entry = self.inflight.lock().unwrap().remove(identity);
        if let Some(entry) = entry {
            debug!(%identity, call = entry.call, "superseding in-flight request");
            entry.abort.abort();
        }
    }

    /// Record a newly dispatched request. Callers supersede first, so this never
    /// displaces a live entry.
    pub(crate) fn register(&self, identity: Identity, call: u64, abort: AbortHandle) {
        self.inflight
            .lock()
            .unwrap()
            .insert(identity, PendingEntry { call, abort });
    }

    /// Remove the entry for `identity` once its response has been observed,
    /// without aborting anything.
    ///
    /// Guarded by the call number: a late resolution path must never evict the
    /// entry of a newer request that reused the same identity.
    pub(crate) fn complete(&self, identity: &Identity, call: u64) {
        let mut inflight = self.inflight.lock().unwrap();
        if inflight.get(identity).is_some_and(|entry| entry.call == call) {
            inflight.remove(identity);
        }
    }

    #[cfg(test)]
    pub(crate) fn contains(&self, identity: &Identity) -> bool {
        self.inflight.lock().unwrap().contains_key(identity)
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.inflight.lock().unwrap().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::future::{AbortHandle, Abortable};

    #[test]
    fn identity_is_stable_for_path_and_verb() {
        assert_eq!(
            Identity::new("/users", Method::Get),
            Identity::new("/users", Method::Get)
        );
        assert_ne!(
            Identity::new("/users", Method::Get),
            Identity::new("/users", Method::Post)
        );
        assert_ne!(
            Identity::new("/users", Method::Get),
            Identity::new("/orders", Method::Get)
        );
    }

    #[tokio::test]
    async fn supersede_aborts_and_removes_the_prior_entry() {
        let registry = PendingRegistry::new();
        let identity = Identity::new("/users", Method::Get);

        let (abort, registration) = AbortHandle::new_pair();
        let pending = Abortable::new(futures::future::pending::<()>(), registration);
        registry.register(identity.clone(), 0, abort);

        registry.supersede(&identity);
        assert!(!registry.contains(&identity));
        assert!(pending.await.is_err());
    }

    #[test]
    fn supersede_without_an_entry_is_a_no_op() {
        let registry = PendingRegistry::new();
        registry.supersede(&Identity::new("/users", Method::Get));
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn complete_only_removes_the_matching_call() {
        let registry = PendingRegistry::new();
        let identity = Identity::new("/users", Method::Get);

        let (abort, _reg) = AbortHandle::new_pair();
        registry.register(identity.clone(), 7, abort);

        // A stale resolution path must leave the newer entry alone.
        registry.complete(&identity, 6);
        assert!(registry.contains(&identity));

        registry.complete(&identity, 7);
        assert!(!registry.contains(&identity));
    }
}
