// Adapters layer: bulk input/output around the core hooks.

pub mod csv_batch;
