//! Operator input: whitespace-separated integers and per-road demand.

use crate::core::{Intersection, Road, LANES};
use std::collections::VecDeque;
use std::io::{self, BufRead};
use thiserror::Error;

/// Input that could not be read as the integer the loop asked for.
///
/// Any of these ends the control loop.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("expected {expected}, got {got:?}")]
    Malformed { expected: &'static str, got: String },

    #[error("input ended while waiting for {expected}")]
    Eof { expected: &'static str },

    #[error("failed to read operator input: {0}")]
    Io(#[from] io::Error),
}

/// Token reader over a buffered source.
///
/// Integers may arrive one per line or several on one line.
#[derive(Debug)]
pub struct OperatorInput<R: BufRead> {
    reader: R,
    pending: VecDeque<String>,
}

impl<R: BufRead> OperatorInput<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            pending: VecDeque::new(),
        }
    }

    /// Next whitespace-separated token parsed as an integer.
    pub fn read_integer(&mut self, expected: &'static str) -> Result<i64, InputError> {
        let token = self.next_token(expected)?;
        token
            .parse()
            .map_err(|_| InputError::Malformed { expected, got: token })
    }

    fn next_token(&mut self, expected: &'static str) -> Result<String, InputError> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Ok(token);
            }
            let mut line = String::new();
            if self.reader.read_line(&mut line)? == 0 {
                return Err(InputError::Eof { expected });
            }
            self.pending
                .extend(line.split_whitespace().map(str::to_owned));
        }
    }
}

/// Supplies vehicles waiting per road.
///
/// Values may be negative; [`collect_demand`] clamps them.
pub trait DemandSource {
    fn vehicles_for(&mut self, index: usize, road: &Road) -> Result<i64, InputError>;
}

/// Fixed demand, one entry per road in canonical order.
///
/// Asking past the last entry reads as exhausted input.
impl DemandSource for [i64; LANES] {
    fn vehicles_for(&mut self, index: usize, _road: &Road) -> Result<i64, InputError> {
        self.get(index).copied().ok_or(InputError::Eof {
            expected: "vehicles waiting",
        })
    }
}

/// Ask `source` for every road's demand, in canonical index order, and store
/// it clamped to zero.
pub fn collect_demand<D: DemandSource>(
    junction: &mut Intersection,
    source: &mut D,
) -> Result<(), InputError> {
    for index in 0..LANES {
        let vehicles = source.vehicles_for(index, &junction.roads()[index])?;
        junction.set_demand(index, vehicles);
    }
    Ok(())
}
