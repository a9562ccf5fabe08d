// src/graph/mod.rs
pub mod labels;
pub mod load;
pub mod model;
pub mod paths;

pub use labels::{ALL_PROPS, ATTR_SLOT, FRAME_PROPS, HYPER_PROPS, SLOT_PROPS};
pub use load::{load_graph, parse_graph, GraphDocument};
pub use model::{Edge, GraphKind, OntologyGraph};
pub use paths::ShortestPathTree;
