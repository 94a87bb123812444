//! Synthetic circus dataset generation.
//!
//! Produces related cities, shows, tickets and viewers with random values and
//! writes each table as header-less CSV. Ticket batches run on a rayon pool.

pub mod batch;
pub mod engine;
pub mod errors;
pub mod foreign;
pub mod generators;
pub mod ids;
pub mod model;
pub mod output;
pub mod records;

pub use engine::{
    GenerationEngine, TableOutput, generate_cities, generate_shows, generate_tickets,
    generate_viewers, modify_cities,
};
pub use errors::GenerationError;
pub use model::{GenerationReport, RunConfig, TableReport};
pub use records::{City, Show, Ticket, TicketRefs, Viewer};
