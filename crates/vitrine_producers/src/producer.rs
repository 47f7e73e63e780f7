//! The producer contract and per-event driver.
//!
//! Producers receive the current event's store as an explicit `&mut`
//! argument rather than through an ambient service lookup; exclusive
//! access for the duration of each `produce` call is what enforces the
//! single-writer-at-a-time model. Missing input is recorded as data in
//! the conventional errors table and never aborts the event; only
//! configuration errors (no store available at all) propagate.

use vitrine_foundation::{Error, Result, ValueKind};
use vitrine_store::Store;

use crate::event::Event;

/// Conventional table recording which collections each producer found.
pub const PRODUCTS_TABLE: &str = "Products_V1";

/// Conventional table collecting human-readable producer errors.
pub const ERRORS_TABLE: &str = "Errors_V1";

/// A per-collection mapper: reads one event's input and writes rows and
/// associations into the store.
///
/// Producers for one event run sequentially in no particular order; any
/// producer may be the one that first creates a shared table, so every
/// producer declares the columns it needs and tolerates declarations
/// already made by others (identical shapes merge, conflicting shapes
/// fail loudly).
pub trait Producer {
    /// Name used in product lines and configuration errors.
    fn label(&self) -> &str;

    /// Maps this producer's collections into the store.
    ///
    /// # Errors
    ///
    /// Only contract violations and configuration errors; missing input
    /// must be recorded via [`record_error`] instead.
    fn produce(&self, event: &Event, store: &mut Store) -> Result<()>;
}

/// Appends one line to the conventional products table.
///
/// Producers call this for every collection they find, even when the
/// collection is empty, so the renderer can show what was looked at.
///
/// # Errors
///
/// Propagates store contract violations.
pub fn record_product(store: &mut Store, product: &str) -> Result<()> {
    let products = store.table(PRODUCTS_TABLE);
    let column = store.add_column(products, "Product", ValueKind::Str, "")?;
    let item = store.create_row(products)?;
    store.set(item, column, product)
}

/// Appends one message to the conventional errors table.
///
/// Errors are data: recording one never blocks other producers sharing
/// the store.
///
/// # Errors
///
/// Propagates store contract violations.
pub fn record_error(store: &mut Store, message: &str) -> Result<()> {
    let errors = store.table(ERRORS_TABLE);
    let column = store.add_column(errors, "Error", ValueKind::Str, "")?;
    let item = store.create_row(errors)?;
    store.set(item, column, message)
}

/// Per-process accessor for the current event's store.
///
/// The store may be unavailable when the surrounding framework was
/// configured without one; in that case every producer fails fast with a
/// configuration error naming itself and the missing service.
#[derive(Debug, Default)]
pub struct StoreService {
    store: Option<Store>,
}

impl StoreService {
    /// Creates a service owning a fresh store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            store: Some(Store::new()),
        }
    }

    /// Creates a service with no store configured.
    #[must_use]
    pub fn unavailable() -> Self {
        Self { store: None }
    }

    /// Resolves the current event's store for a producer.
    ///
    /// # Errors
    ///
    /// [`Error::MissingService`] naming the producer when no store is
    /// configured.
    pub fn storage(&mut self, producer: &str) -> Result<&mut Store> {
        self.store
            .as_mut()
            .ok_or_else(|| Error::missing_service(producer, "Store"))
    }

    /// Read access for the downstream renderer.
    #[must_use]
    pub fn store(&self) -> Option<&Store> {
        self.store.as_ref()
    }

    fn store_mut(&mut self) -> Option<&mut Store> {
        self.store.as_mut()
    }
}

/// Drives one event through a set of producers.
///
/// The store is reset at the start of each event, then every producer
/// runs in turn against it. After `process` returns, the store holds the
/// complete event and stays readable until the next event begins.
#[derive(Debug, Default)]
pub struct EventProcessor {
    service: StoreService,
}

impl EventProcessor {
    /// Creates a processor with its own store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            service: StoreService::new(),
        }
    }

    /// Creates a processor over an existing service.
    #[must_use]
    pub fn with_service(service: StoreService) -> Self {
        Self { service }
    }

    /// Processes one event: reset, then run every producer sequentially.
    ///
    /// # Errors
    ///
    /// Configuration errors and store contract violations propagate; a
    /// failing producer aborts the event. Missing input does not reach
    /// this level.
    pub fn process(&mut self, event: &Event, producers: &[&dyn Producer]) -> Result<()> {
        if let Some(store) = self.service.store_mut() {
            store.reset();
        }
        for producer in producers {
            let store = self.service.storage(producer.label())?;
            producer.produce(event, store)?;
        }
        Ok(())
    }

    /// Read access to the current event's store, for the renderer.
    #[must_use]
    pub fn store(&self) -> Option<&Store> {
        self.service.store()
    }
}
