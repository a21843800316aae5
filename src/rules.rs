//! The life rule.
//!
//! Neighbor counts are represented as bit sets: bit `i` is on if a count of
//! `i` is in the set. This board only ever plays b3s23, so both sets are
//! fixed.
//!
//! See: https://conwaylife.com/wiki/Rulestring

/// Neighbor counts that bring a dead cell to life.
const BIRTHS: u16 = 0b1000;

/// Neighbor counts that keep a live cell alive.
const SURVIVALS: u16 = 0b1100;

/// The next state of a single cell, given its current state and the number of
/// live cells among its (at most 8) neighbors.
pub fn next_state(alive: bool, live_neighbors: u8) -> u8 {
    debug_assert!(live_neighbors <= 8);

    let mask = 1u16 << live_neighbors;
    let set = if alive { SURVIVALS } else { BIRTHS };

    u8::from(set & mask == mask)
}
