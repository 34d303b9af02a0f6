//! # Error Module
//!
//! Error types surfaced by the engine. The core itself performs no I/O;
//! the only runtime failure worth a dedicated variant is a voxel store
//! handing the renderer inconsistent data, which is a precondition
//! violation that should be diagnosed rather than silently skipped.

use thiserror::Error;

/// Errors produced by the spatial engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A render chunk listed a node that the store lookup could not find.
    ///
    /// This indicates the voxel store collaborator broke its contract:
    /// every node offered through `chunks_near` must also be reachable
    /// through `node_at`.
    #[error(
        "inconsistent voxel store: chunk ({chunk_x}, {chunk_z}) lists a node at \
         ({x}, {y}, {z}) that node lookup cannot find"
    )]
    InconsistentStore {
        /// X coordinate of the offending chunk, in chunk units.
        chunk_x: i32,
        /// Z coordinate of the offending chunk, in chunk units.
        chunk_z: i32,
        /// World X coordinate of the missing node.
        x: i32,
        /// World Y coordinate of the missing node.
        y: i32,
        /// World Z coordinate of the missing node.
        z: i32,
    },

    /// The engine configuration could not be deserialized.
    #[error("invalid engine configuration: {0}")]
    Config(#[from] serde_json::Error),
}
