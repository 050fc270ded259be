//! Download registration: looking up the record and bumping its counter is
//! a single `UPDATE .. RETURNING`, so simultaneous downloads of the same
//! record can never lose an increment.

pub mod episode;
pub mod movie;
