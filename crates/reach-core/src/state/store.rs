use super::events::Event;
use super::types::Command;

/// Trait for applying state commands.
///
/// # Semantics
///
/// - **Ordering**: Commands apply in the order received, one at a time.
/// - **Atomicity**: A command either applies completely or not at all. A
///   rejected command leaves the store untouched.
/// - **Idempotency**: `UpsertBusinesses` is idempotent per `place_id`; the
///   replace commands are idempotent for equal input. Log and counter
///   commands are not.
/// - **Events**: On success, dispatch returns the events describing what
///   changed, in order. An empty vector means nothing changed.
pub trait Store {
    type Error;
    fn dispatch(&mut self, cmd: Command) -> Result<Vec<Event>, Self::Error>;
}
