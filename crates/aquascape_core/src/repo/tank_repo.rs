//! Tank repository contract and in-memory implementation.
//!
//! # Responsibility
//! - Hold tank records in insertion order.
//! - Keep storage details out of the store's notification logic.
//!
//! # Invariants
//! - `list()` returns tanks in the order they were inserted.
//! - Repositories do not validate; the store checks records before writing.

use crate::model::tank::{Tank, TankId};

/// Storage interface used by [`crate::TankStore`].
pub trait TankRepository {
    fn insert(&mut self, tank: Tank);
    /// Replaces the record with the same id. Returns `false` when absent.
    fn replace(&mut self, tank: Tank) -> bool;
    fn remove(&mut self, id: TankId) -> Option<Tank>;
    fn get(&self, id: TankId) -> Option<&Tank>;
    fn list(&self) -> &[Tank];

    fn contains(&self, id: TankId) -> bool {
        self.get(id).is_some()
    }
}

/// Vec-backed repository that keeps insertion order.
#[derive(Debug, Default)]
pub struct InMemoryTankRepository {
    tanks: Vec<Tank>,
}

impl InMemoryTankRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, id: TankId) -> Option<usize> {
        self.tanks.iter().position(|tank| tank.id == id)
    }
}

impl TankRepository for InMemoryTankRepository {
    fn insert(&mut self, tank: Tank) {
        self.tanks.push(tank);
    }

    fn replace(&mut self, tank: Tank) -> bool {
        match self.position(tank.id) {
            Some(index) => {
                self.tanks[index] = tank;
                true
            }
            None => false,
        }
    }

    fn remove(&mut self, id: TankId) -> Option<Tank> {
        let index = self.position(id)?;
        Some(self.tanks.remove(index))
    }

    fn get(&self, id: TankId) -> Option<&Tank> {
        self.tanks.iter().find(|tank| tank.id == id)
    }

    fn list(&self) -> &[Tank] {
        &self.tanks
    }
}
