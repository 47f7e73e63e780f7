//! Typed event input collections.
//!
//! One [`Event`] is one discrete unit of input, processed end-to-end
//! before the store is reset. Collections are identified by an
//! [`InputTag`] and are either present or absent; absence is reported
//! into the conventional errors table by the producer that wanted the
//! collection, never treated as a crash.
//!
//! Field extraction (unit conversions, geometry lookups) happens upstream;
//! the values here are already in the renderer's units.

use std::collections::HashMap;
use std::fmt;

use vitrine_foundation::Vec3;

/// Identifies one collection within an event: module label, instance
/// label, and process label.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct InputTag {
    /// Module label of the producer that made the collection.
    pub label: String,
    /// Instance label, often empty.
    pub instance: String,
    /// Process label, often empty.
    pub process: String,
}

impl InputTag {
    /// Creates a tag from its three labels.
    pub fn new(
        label: impl Into<String>,
        instance: impl Into<String>,
        process: impl Into<String>,
    ) -> Self {
        Self {
            label: label.into(),
            instance: instance.into(),
            process: process.into(),
        }
    }

    /// Creates a tag with only a module label.
    pub fn labelled(label: impl Into<String>) -> Self {
        Self::new(label, "", "")
    }
}

impl fmt::Display for InputTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.label, self.instance, self.process)
    }
}

/// Innermost/outermost state of a refitted track.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TrackExtra {
    /// Innermost measurement position.
    pub inner_pos: Vec3,
    /// Direction at the innermost position.
    pub inner_dir: Vec3,
    /// Outermost measurement position.
    pub outer_pos: Vec3,
    /// Direction at the outermost position.
    pub outer_dir: Vec3,
}

/// One reconstructed track.
#[derive(Clone, Debug, PartialEq)]
pub struct Track {
    /// Vertex position.
    pub pos: Vec3,
    /// Momentum direction (not necessarily normalized).
    pub dir: Vec3,
    /// Transverse momentum.
    pub pt: f64,
    /// Pseudorapidity.
    pub eta: f64,
    /// Azimuthal angle.
    pub phi: f64,
    /// Electric charge.
    pub charge: i64,
    /// Vertex fit chi-square.
    pub chi2: f64,
    /// Degrees of freedom of the vertex fit.
    pub ndof: f64,
    /// Refitted innermost/outermost states, when available.
    pub extra: Option<TrackExtra>,
}

/// Clustering algorithm that built a supercluster.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ClusterAlgo {
    /// Island clustering.
    Island,
    /// Hybrid clustering.
    Hybrid,
    /// Fixed-matrix clustering.
    FixedMatrix,
    /// Dynamic hybrid clustering.
    DynamicHybrid,
    /// 5x5 sliding-window clustering.
    Multi5x5,
    /// Particle-flow clustering.
    ParticleFlow,
    /// Unknown algorithm.
    Undefined,
}

impl ClusterAlgo {
    /// The algorithm name as rendered in the store.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Island => "island",
            Self::Hybrid => "hybrid",
            Self::FixedMatrix => "fixedMatrix",
            Self::DynamicHybrid => "dynamicHybrid",
            Self::Multi5x5 => "multi5x5",
            Self::ParticleFlow => "particleFlow",
            Self::Undefined => "undefined",
        }
    }
}

impl fmt::Display for ClusterAlgo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One crystal's contribution to a supercluster, with its cell geometry
/// already resolved to the eight corner points of the cell.
#[derive(Clone, Debug, PartialEq)]
pub struct HitFraction {
    /// Detector id of the crystal.
    pub detid: i64,
    /// Fraction of the hit's energy assigned to the cluster.
    pub fraction: f64,
    /// Front face corners, render order.
    pub front: [Vec3; 4],
    /// Back face corners, render order.
    pub back: [Vec3; 4],
}

/// One supercluster.
#[derive(Clone, Debug, PartialEq)]
pub struct SuperCluster {
    /// Cluster energy.
    pub energy: f64,
    /// Cluster position.
    pub pos: Vec3,
    /// Pseudorapidity.
    pub eta: f64,
    /// Azimuthal angle.
    pub phi: f64,
    /// Clustering algorithm.
    pub algo: ClusterAlgo,
    /// Width in eta.
    pub eta_width: f64,
    /// Width in phi.
    pub phi_width: f64,
    /// Uncorrected energy.
    pub raw_energy: f64,
    /// Preshower energy.
    pub preshower_energy: f64,
    /// Constituent hits and fractions, in collection order.
    pub hits: Vec<HitFraction>,
}

/// Typed input collections for one event.
#[derive(Clone, Debug, Default)]
pub struct Event {
    /// Event number, for diagnostics only.
    pub number: u64,
    tracks: HashMap<InputTag, Vec<Track>>,
    clusters: HashMap<InputTag, Vec<SuperCluster>>,
}

impl Event {
    /// Creates an event with no collections.
    #[must_use]
    pub fn new(number: u64) -> Self {
        Self {
            number,
            tracks: HashMap::new(),
            clusters: HashMap::new(),
        }
    }

    /// Adds a track collection under a tag.
    pub fn insert_tracks(&mut self, tag: InputTag, tracks: Vec<Track>) {
        self.tracks.insert(tag, tracks);
    }

    /// Adds a supercluster collection under a tag.
    pub fn insert_clusters(&mut self, tag: InputTag, clusters: Vec<SuperCluster>) {
        self.clusters.insert(tag, clusters);
    }

    /// Looks up a track collection. `None` means absent, which is data,
    /// not an error.
    #[must_use]
    pub fn tracks(&self, tag: &InputTag) -> Option<&[Track]> {
        self.tracks.get(tag).map(Vec::as_slice)
    }

    /// Looks up a supercluster collection.
    #[must_use]
    pub fn clusters(&self, tag: &InputTag) -> Option<&[SuperCluster]> {
        self.clusters.get(tag).map(Vec::as_slice)
    }
}
