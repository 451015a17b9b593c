use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use crate::audit::{hydrate, Aggregate, AuditLog, TransitionRecord};
use crate::order::{Order, OrderLine};

use super::error::StoreError;
use super::traits::{OrderLineStore, OrderStore};

/// In-memory order store: audit trails keyed by order id, a flat line table,
/// and an atomic id sequence. Clones share the same underlying storage.
#[derive(Clone)]
pub struct MemoryOrderStore {
    orders: Arc<RwLock<HashMap<String, Vec<TransitionRecord>>>>,
    lines: Arc<RwLock<Vec<OrderLine>>>,
    order_seq: Arc<AtomicU64>,
}

impl Default for MemoryOrderStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryOrderStore {
    pub fn new() -> Self {
        MemoryOrderStore {
            orders: Arc::new(RwLock::new(HashMap::new())),
            lines: Arc::new(RwLock::new(Vec::new())),
            order_seq: Arc::new(AtomicU64::new(1)),
        }
    }

    fn hydrate_order(id: &str, records: Vec<TransitionRecord>) -> Result<Order, StoreError> {
        let mut log = AuditLog::with_id(id);
        log.load_from_history(records);
        Ok(hydrate::<Order>(log)?)
    }
}

impl OrderStore for MemoryOrderStore {
    fn next_order_id(&self) -> String {
        format!("ord-{}", self.order_seq.fetch_add(1, Ordering::SeqCst))
    }

    fn commit_placed(&self, order: &mut Order, lines: &[OrderLine]) -> Result<(), StoreError> {
        let mut orders = self
            .orders
            .write()
            .map_err(|_| StoreError::LockPoisoned("order write"))?;
        let mut line_table = self
            .lines
            .write()
            .map_err(|_| StoreError::LockPoisoned("line write"))?;

        orders.insert(order.id().to_string(), order.audit().records().to_vec());
        line_table.extend_from_slice(lines);
        order.audit_mut().mark_committed();
        Ok(())
    }

    fn commit(&self, order: &mut Order) -> Result<(), StoreError> {
        let mut orders = self
            .orders
            .write()
            .map_err(|_| StoreError::LockPoisoned("order write"))?;
        orders.insert(order.id().to_string(), order.audit().records().to_vec());
        order.audit_mut().mark_committed();
        Ok(())
    }

    fn get(&self, id: &str) -> Result<Option<Order>, StoreError> {
        let orders = self
            .orders
            .read()
            .map_err(|_| StoreError::LockPoisoned("order read"))?;
        match orders.get(id) {
            Some(records) => Ok(Some(Self::hydrate_order(id, records.clone())?)),
            None => Ok(None),
        }
    }

    fn all(&self) -> Result<Vec<Order>, StoreError> {
        let snapshot: Vec<(String, Vec<TransitionRecord>)> = {
            let orders = self
                .orders
                .read()
                .map_err(|_| StoreError::LockPoisoned("order read"))?;
            orders
                .iter()
                .map(|(id, records)| (id.clone(), records.clone()))
                .collect()
        };

        let mut hydrated = Vec::with_capacity(snapshot.len());
        for (id, records) in snapshot {
            hydrated.push(Self::hydrate_order(&id, records)?);
        }
        hydrated.sort_by(|a, b| {
            a.placed_at()
                .cmp(&b.placed_at())
                .then_with(|| a.id().cmp(b.id()))
        });
        Ok(hydrated)
    }
}

impl OrderLineStore for MemoryOrderStore {
    fn append(&self, line: OrderLine) -> Result<(), StoreError> {
        let mut line_table = self
            .lines
            .write()
            .map_err(|_| StoreError::LockPoisoned("line write"))?;
        line_table.push(line);
        Ok(())
    }

    fn for_order(&self, order_id: &str) -> Result<Vec<OrderLine>, StoreError> {
        let line_table = self
            .lines
            .read()
            .map_err(|_| StoreError::LockPoisoned("line read"))?;
        Ok(line_table
            .iter()
            .filter(|line| line.order_id == order_id)
            .cloned()
            .collect())
    }
}
