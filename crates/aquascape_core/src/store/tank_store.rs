//! Observable tank store.
//!
//! # Responsibility
//! - Own the authoritative tank collection for the application lifetime.
//! - Expose the only sanctioned mutation surface (add/update/remove).
//! - Notify subscribers synchronously after every add/update/remove call.
//!
//! # Invariants
//! - Ids are unique for the process lifetime; an issued id is never reused,
//!   even after its tank is removed.
//! - `created_at_ms` and `id` are never touched by `update`.
//! - Records are validated before they are written; a rejected write leaves
//!   state unchanged and notifies nobody.
//! - Unknown ids on `remove`/`update` leave state unchanged but still notify.

use crate::model::tank::{CreateTankInput, Tank, TankId, TankUpdate, TankValidationError};
use crate::repo::tank_repo::{InMemoryTankRepository, TankRepository};
use log::{debug, warn};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

const MAX_ID_ATTEMPTS: usize = 8;

pub type StoreResult<T> = Result<T, StoreError>;

/// Store-level write failures.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreError {
    Validation(TankValidationError),
    /// The id generator kept returning ids that were already issued.
    IdCollision { attempts: usize },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::IdCollision { attempts } => {
                write!(f, "no unused tank id after {attempts} attempts")
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::IdCollision { .. } => None,
        }
    }
}

impl From<TankValidationError> for StoreError {
    fn from(value: TankValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Handle returned by `subscribe*`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&[Tank])>;
type IdGenerator = Box<dyn FnMut() -> TankId>;

/// In-memory tank collection with change subscriptions.
pub struct TankStore<R: TankRepository = InMemoryTankRepository> {
    repo: R,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
    issued_ids: HashSet<TankId>,
    id_generator: IdGenerator,
}

impl TankStore<InMemoryTankRepository> {
    /// Creates an empty store backed by the in-memory repository.
    pub fn new() -> Self {
        Self::with_repository(InMemoryTankRepository::new())
    }
}

impl Default for TankStore<InMemoryTankRepository> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: TankRepository> TankStore<R> {
    /// Creates a store over the provided repository, using v4 UUIDs.
    pub fn with_repository(repo: R) -> Self {
        Self {
            repo,
            listeners: Vec::new(),
            next_subscription: 0,
            issued_ids: HashSet::new(),
            id_generator: Box::new(Uuid::new_v4),
        }
    }

    /// Replaces the id source. Used by tests to force collisions.
    pub fn with_id_generator(mut self, generator: impl FnMut() -> TankId + 'static) -> Self {
        self.id_generator = Box::new(generator);
        self
    }

    /// Validates `input`, stores a new tank and returns its id.
    ///
    /// # Errors
    /// - `StoreError::Validation` when a field breaks the tank invariants.
    /// - `StoreError::IdCollision` when no unused id could be generated.
    pub fn add(&mut self, input: CreateTankInput) -> StoreResult<TankId> {
        if let Err(err) = input.validate() {
            warn!("event=tank_add module=store status=rejected reason=\"{err}\"");
            return Err(err.into());
        }

        let id = self.fresh_id()?;
        let tank = Tank::from_input(id, now_epoch_ms(), input);
        self.repo.insert(tank);
        debug!(
            "event=tank_add module=store status=ok tank_id={id} count={}",
            self.repo.list().len()
        );
        self.notify();
        Ok(id)
    }

    /// Removes the tank with `id`. Returns `false` when no such tank exists.
    ///
    /// Subscribers are notified either way; the collection is unchanged on
    /// a miss.
    pub fn remove(&mut self, id: TankId) -> bool {
        if self.repo.remove(id).is_none() {
            debug!("event=tank_remove module=store status=noop tank_id={id}");
            self.notify();
            return false;
        }

        debug!(
            "event=tank_remove module=store status=ok tank_id={id} count={}",
            self.repo.list().len()
        );
        self.notify();
        true
    }

    /// Merges `updates` into the tank with `id`.
    ///
    /// Returns `Ok(false)` when the id is unknown; subscribers are still
    /// notified. The merged record is validated before it replaces the stored
    /// one, and a rejected merge notifies nobody.
    pub fn update(&mut self, id: TankId, updates: TankUpdate) -> StoreResult<bool> {
        let Some(next) = self.repo.get(id).map(|current| current.merged(&updates)) else {
            debug!("event=tank_update module=store status=noop tank_id={id}");
            self.notify();
            return Ok(false);
        };

        if let Err(err) = next.validate() {
            warn!("event=tank_update module=store status=rejected tank_id={id} reason=\"{err}\"");
            return Err(err.into());
        }

        self.repo.replace(next);
        debug!("event=tank_update module=store status=ok tank_id={id}");
        self.notify();
        Ok(true)
    }

    /// Looks up one tank. Pure read; never notifies.
    pub fn get_by_id(&self, id: TankId) -> Option<&Tank> {
        self.repo.get(id)
    }

    /// All tanks in insertion order.
    pub fn tanks(&self) -> &[Tank] {
        self.repo.list()
    }

    /// Number of stored tanks.
    pub fn len(&self) -> usize {
        self.repo.list().len()
    }

    /// Whether the store holds no tanks.
    pub fn is_empty(&self) -> bool {
        self.repo.list().is_empty()
    }

    /// Registers a listener called with the full collection after each
    /// add/update/remove call, including no-op ones.
    pub fn subscribe(&mut self, listener: impl FnMut(&[Tank]) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Registers a listener that only fires when `selector`'s output changes.
    ///
    /// The selected value is captured at subscription time, so the first call
    /// happens on the first change after subscribing.
    pub fn subscribe_selected<T, S, L>(&mut self, selector: S, mut listener: L) -> SubscriptionId
    where
        T: PartialEq + 'static,
        S: Fn(&[Tank]) -> T + 'static,
        L: FnMut(&T) + 'static,
    {
        let mut last = selector(self.repo.list());
        self.subscribe(move |tanks| {
            let next = selector(tanks);
            if next != last {
                listener(&next);
                last = next;
            }
        })
    }

    /// Drops a listener. Returns `false` for unknown handles.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    /// Number of registered listeners.
    pub fn subscriber_count(&self) -> usize {
        self.listeners.len()
    }

    fn fresh_id(&mut self) -> StoreResult<TankId> {
        for _ in 0..MAX_ID_ATTEMPTS {
            let candidate = (self.id_generator)();
            if !candidate.is_nil() && self.issued_ids.insert(candidate) {
                return Ok(candidate);
            }
            warn!("event=tank_id_collision module=store status=retry tank_id={candidate}");
        }
        Err(StoreError::IdCollision {
            attempts: MAX_ID_ATTEMPTS,
        })
    }

    fn notify(&mut self) {
        let tanks = self.repo.list();
        for (_, listener) in self.listeners.iter_mut() {
            listener(tanks);
        }
    }
}

fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::{StoreError, TankStore};
    use crate::model::tank::CreateTankInput;
    use uuid::Uuid;

    fn input(name: &str) -> CreateTankInput {
        CreateTankInput {
            name: name.to_string(),
            size_liters: 30.0,
            filter_type: "HOB".to_string(),
            lighting_hours: 7.0,
            has_co2: true,
        }
    }

    #[test]
    fn regenerates_on_collision() {
        let fixed = Uuid::parse_str("11111111-2222-4333-8444-555555555555").unwrap();
        let other = Uuid::parse_str("66666666-7777-4888-9999-aaaaaaaaaaaa").unwrap();
        let mut sequence = vec![fixed, fixed, other].into_iter();
        let mut store = TankStore::new().with_id_generator(move || sequence.next().unwrap());

        assert_eq!(store.add(input("first")).unwrap(), fixed);
        assert_eq!(store.add(input("second")).unwrap(), other);
    }

    #[test]
    fn removed_ids_are_not_reissued() {
        let fixed = Uuid::parse_str("11111111-2222-4333-8444-555555555555").unwrap();
        let mut store = TankStore::new().with_id_generator(move || fixed);

        let id = store.add(input("first")).unwrap();
        assert!(store.remove(id));

        let err = store.add(input("second")).unwrap_err();
        assert_eq!(err, StoreError::IdCollision { attempts: 8 });
        assert!(store.is_empty());
    }

    #[test]
    fn nil_ids_are_never_issued() {
        let mut ids = vec![Uuid::nil(), Uuid::new_v4()].into_iter();
        let mut store = TankStore::new().with_id_generator(move || ids.next().unwrap());

        let id = store.add(input("first")).unwrap();
        assert!(!id.is_nil());
    }
}
