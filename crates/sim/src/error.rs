use thiserror::Error;

/// Errors surfaced by the simulation API.
///
/// Chamber-program misbehavior never reaches this type; it is logged and
/// absorbed inside the tick (see [`crate::chamber::ChamberError`]).
#[derive(Error, Debug)]
pub enum SimError {
    /// A chamber registration would exceed the deployment limit. The
    /// simulation state is unchanged.
    #[error("chamber capacity reached: {limit} chambers already registered")]
    ChamberCapacity {
        /// The deployment's chamber limit.
        limit: usize,
    },
}
