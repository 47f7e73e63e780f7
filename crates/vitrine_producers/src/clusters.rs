//! Supercluster mapper: calorimeter clusters and their constituent
//! crystal hits.

use vitrine_foundation::{Result, ValueKind, Vec3};
use vitrine_store::Store;

use crate::event::{Event, InputTag};
use crate::producer::{Producer, record_error, record_product};

/// Maps one supercluster collection into `SuperClusters_V1`, with each
/// cluster's crystals in `RecHitFractions_V1` joined through the
/// `SuperClusterRecHitFractions_V1` association group.
#[derive(Clone, Debug)]
pub struct SuperClusterProducer {
    input: InputTag,
}

impl SuperClusterProducer {
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

impl Producer for SuperClusterProducer {
    fn label(&self) -> &str {
        "SuperClusterProducer"
    }

    fn produce(&self, event: &Event, store: &mut Store) -> Result<()> {
        let Some(clusters) = event.clusters(&self.input) else {
            record_error(
                store,
                &format!("### Error: SuperClusters {} are not found.", self.input),
            )?;
            return Ok(());
        };

        record_product(store, &format!("SuperClusters {}", self.input))?;

        let table = store.table("SuperClusters_V1");
        let energy = store.add_column(table, "energy", ValueKind::Double, 0.0)?;
        let pos = store.add_column(table, "pos", ValueKind::Vec3, Vec3::default())?;
        let eta = store.add_column(table, "eta", ValueKind::Double, 0.0)?;
        let phi = store.add_column(table, "phi", ValueKind::Double, 0.0)?;
        let algo = store.add_column(table, "algo", ValueKind::Str, "")?;
        let eta_width = store.add_column(table, "etaWidth", ValueKind::Double, 0.0)?;
        let phi_width = store.add_column(table, "phiWidth", ValueKind::Double, 0.0)?;
        let raw_energy = store.add_column(table, "rawEnergy", ValueKind::Double, 0.0)?;
        let preshower = store.add_column(table, "preshowerEnergy", ValueKind::Double, 0.0)?;

        let fractions = store.table("RecHitFractions_V1");
        let detid = store.add_column(fractions, "detid", ValueKind::Int, 0)?;
        let fraction = store.add_column(fractions, "fraction", ValueKind::Double, 0.0)?;
        let front: Vec<_> = (1..=4)
            .map(|i| {
                store.add_column(fractions, &format!("front_{i}"), ValueKind::Vec3, Vec3::default())
            })
            .collect::<Result<_>>()?;
        let back: Vec<_> = (1..=4)
            .map(|i| {
                store.add_column(fractions, &format!("back_{i}"), ValueKind::Vec3, Vec3::default())
            })
            .collect::<Result<_>>()?;

        let cluster_hits = store.association_group("SuperClusterRecHitFractions_V1");

        for cluster in clusters {
            let row = store.create_row(table)?;
            store.set(row, energy, cluster.energy)?;
            store.set(row, pos, cluster.pos)?;
            store.set(row, eta, cluster.eta)?;
            store.set(row, phi, cluster.phi)?;
            store.set(row, algo, cluster.algo.name())?;
            store.set(row, eta_width, cluster.eta_width)?;
            store.set(row, phi_width, cluster.phi_width)?;
            store.set(row, raw_energy, cluster.raw_energy)?;
            store.set(row, preshower, cluster.preshower_energy)?;

            for hit in &cluster.hits {
                let hrow = store.create_row(fractions)?;
                store.set(hrow, detid, hit.detid)?;
                store.set(hrow, fraction, hit.fraction)?;
                for (column, corner) in front.iter().zip(hit.front) {
                    store.set(hrow, *column, corner)?;
                }
                for (column, corner) in back.iter().zip(hit.back) {
                    store.set(hrow, *column, corner)?;
                }
                store.associate_child(cluster_hits, row, hrow)?;
            }
        }

        Ok(())
    }
}
