mod changes;
mod clock;
mod error;
mod identity;
mod model;
mod record;
mod store;

pub use changes::ChangeSignal;
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::ModelError;
pub use identity::{Anonymous, IdentityProvider, StaticIdentity};
pub use model::ModelBase;
pub use record::{
    Record, CREATED_BY, CREATED_ON, DERIVED_PREFIX, KEY_FIELD, UPDATED_BY, UPDATED_ON,
};
pub use store::{InMemoryStore, StoreClient, StoreError};
