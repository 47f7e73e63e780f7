//! Track mapper: reconstructed tracks and their refitted endpoint states.

use vitrine_foundation::{Result, ValueKind, Vec3};
use vitrine_store::Store;

use crate::event::{Event, InputTag};
use crate::producer::{Producer, record_error, record_product};

/// Maps one track collection into `Tracks_V4`, with refitted endpoint
/// states in `Extras_V1` joined through the `TrackExtras_V1` association.
#[derive(Clone, Debug)]
pub struct TrackProducer {
    input: InputTag,
}

impl TrackProducer {
    /// Creates a producer reading the collection under `input`.
    #[must_use]
    pub fn new(input: InputTag) -> Self {
        Self { input }
    }

    /// The tag this producer reads.
    #[must_use]
    pub fn input(&self) -> &InputTag {
        &self.input
    }
}

impl Producer for TrackProducer {
    fn label(&self) -> &str {
        "TrackProducer"
    }

    fn produce(&self, event: &Event, store: &mut Store) -> Result<()> {
        let Some(tracks) = event.tracks(&self.input) else {
            record_error(
                store,
                &format!("### Error: Tracks {} are not found.", self.input),
            )?;
            return Ok(());
        };

        record_product(store, &format!("Tracks {}", self.input))?;

        let table = store.table("Tracks_V4");
        let pos = store.add_column(table, "pos", ValueKind::Vec3, Vec3::default())?;
        let dir = store.add_column(table, "dir", ValueKind::Vec3, Vec3::default())?;
        let pt = store.add_column(table, "pt", ValueKind::Double, 0.0)?;
        let phi = store.add_column(table, "phi", ValueKind::Double, 0.0)?;
        let eta = store.add_column(table, "eta", ValueKind::Double, 0.0)?;
        let charge = store.add_column(table, "charge", ValueKind::Int, 0)?;
        let chi2 = store.add_column(table, "chi2", ValueKind::Double, 0.0)?;
        let ndof = store.add_column(table, "ndof", ValueKind::Double, 0.0)?;

        let extras = store.table("Extras_V1");
        let pos_1 = store.add_column(extras, "pos_1", ValueKind::Vec3, Vec3::default())?;
        let dir_1 = store.add_column(extras, "dir_1", ValueKind::Vec3, Vec3::default())?;
        let pos_2 = store.add_column(extras, "pos_2", ValueKind::Vec3, Vec3::default())?;
        let dir_2 = store.add_column(extras, "dir_2", ValueKind::Vec3, Vec3::default())?;

        let track_extras = store.association("TrackExtras_V1");

        for track in tracks {
            let row = store.create_row(table)?;
            store.set(row, pos, track.pos)?;
            store.set(row, dir, track.dir.normalized())?;
            store.set(row, pt, track.pt)?;
            store.set(row, phi, track.phi)?;
            store.set(row, eta, track.eta)?;
            store.set(row, charge, track.charge)?;
            store.set(row, chi2, track.chi2)?;
            store.set(row, ndof, track.ndof)?;

            if let Some(extra) = &track.extra {
                let erow = store.create_row(extras)?;
                store.set(erow, pos_1, extra.inner_pos)?;
                store.set(erow, dir_1, extra.inner_dir.normalized())?;
                store.set(erow, pos_2, extra.outer_pos)?;
                store.set(erow, dir_2, extra.outer_dir.normalized())?;
                store.associate(track_extras, row, erow)?;
            }
        }

        Ok(())
    }
}
