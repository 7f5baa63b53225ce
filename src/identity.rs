//! Identity - The acting user behind create and update operations.

/// Looks up the currently authenticated actor, if any.
///
/// Injected into the model base explicitly rather than read from ambient
/// global state, so tests and embedders control exactly whose identity gets
/// stamped into provenance fields.
pub trait IdentityProvider: Send + Sync {
    fn current_identity(&self) -> Option<String>;
}

/// No authenticated actor. Provenance fields are stamped null.
#[derive(Clone, Copy, Debug, Default)]
pub struct Anonymous;

impl IdentityProvider for Anonymous {
    fn current_identity(&self) -> Option<String> {
        None
    }
}

/// A fixed actor identity.
#[derive(Clone, Debug)]
pub struct StaticIdentity(pub String);

impl IdentityProvider for StaticIdentity {
    fn current_identity(&self) -> Option<String> {
        Some(self.0.clone())
    }
}
