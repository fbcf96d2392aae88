//! Tank list component.
//!
//! Renders the store's tanks as cards and dispatches deletes. Every store
//! notification marks the list stale; the next page render clears it.

use aquascape_core::{SubscriptionId, Tank, TankId, TankRepository, TankStore};
use std::cell::Cell;
use std::fmt::Write as _;
use std::rc::Rc;

pub const EMPTY_MESSAGE: &str = "No tanks yet. Create your first tank above!";

/// Card list over the store's tank collection.
#[derive(Debug)]
pub struct TankList {
    subscription: SubscriptionId,
    stale: Rc<Cell<bool>>,
}

impl TankList {
    /// Subscribes to `store` and starts out needing a render.
    pub fn mount<R: TankRepository>(store: &mut TankStore<R>) -> Self {
        let stale = Rc::new(Cell::new(true));
        let flag = Rc::clone(&stale);
        let subscription = store.subscribe(move |_| flag.set(true));
        Self {
            subscription,
            stale,
        }
    }

    pub fn unmount<R: TankRepository>(self, store: &mut TankStore<R>) {
        store.unsubscribe(self.subscription);
    }

    /// Whether the store notified since the last render.
    pub fn needs_render(&self) -> bool {
        self.stale.get()
    }

    /// Renders `tanks` and clears the stale flag.
    pub fn render(&self, tanks: &[Tank]) -> String {
        self.stale.set(false);
        render_cards(tanks)
    }

    /// Delete button handler. Unknown ids are ignored by the store.
    pub fn delete<R: TankRepository>(&self, store: &mut TankStore<R>, id: TankId) -> bool {
        store.remove(id)
    }
}

fn render_cards(tanks: &[Tank]) -> String {
    if tanks.is_empty() {
        return format!("{EMPTY_MESSAGE}\n");
    }

    let mut out = String::new();
    for (index, tank) in tanks.iter().enumerate() {
        let _ = writeln!(out, "+-- #{} {}", index + 1, tank.name);
        let _ = writeln!(out, "| id: {}", tank.id);
        let _ = writeln!(out, "| Size: {}L", tank.size_liters);
        let _ = writeln!(out, "| Filter: {}", tank.filter_type);
        let _ = writeln!(out, "| Lighting: {}h/day", tank.lighting_hours);
        let _ = writeln!(out, "| CO₂: {}", if tank.has_co2 { "Yes" } else { "No" });
        out.push_str("| [Delete]\n");
    }
    out
}
