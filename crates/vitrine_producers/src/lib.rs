//! Producers: the glue between typed event collections and the store.
//!
//! This crate provides:
//! - [`Event`] - Typed per-event input collections, keyed by [`InputTag`]
//! - [`Producer`] - The per-collection mapper contract
//! - [`EventProcessor`] / [`StoreService`] - The per-event driver
//! - [`TrackProducer`], [`SuperClusterProducer`] - Concrete mappers

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod clusters;
mod event;
mod producer;
mod tracks;

pub use clusters::SuperClusterProducer;
pub use event::{ClusterAlgo, Event, HitFraction, InputTag, SuperCluster, Track, TrackExtra};
pub use producer::{
    ERRORS_TABLE, EventProcessor, PRODUCTS_TABLE, Producer, StoreService, record_error,
    record_product,
};
pub use tracks::TrackProducer;
