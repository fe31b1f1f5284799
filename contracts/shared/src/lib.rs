//! Shared outcome types and sequence validation for Tenflip contracts.
#![no_std]
#![allow(unexpected_cfgs)]

use soroban_sdk::{contracttype, Vec};

/// Number of coin outcomes in every prediction and result.
pub const SEQUENCE_LEN: u32 = 10;

/// Structural validation failures for an outcome sequence.
#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum SequenceError {
    InvalidLength = 1,
    InvalidSymbol = 2,
}

/// One coin outcome. Callers encode Heads as `0` and Tails as `1`.
#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum Side {
    Heads = 0,
    Tails = 1,
}

impl Side {
    pub fn from_u32(value: u32) -> Option<Side> {
        match value {
            0 => Some(Side::Heads),
            1 => Some(Side::Tails),
            _ => None,
        }
    }
}

/// Check that `seq` holds exactly `SEQUENCE_LEN` symbols, each Heads or Tails.
///
/// Length is checked first, so a short sequence with a bad symbol reports
/// `InvalidLength`.
pub fn validate_sequence(seq: &Vec<u32>) -> Result<(), SequenceError> {
    if seq.len() != SEQUENCE_LEN {
        return Err(SequenceError::InvalidLength);
    }
    if seq.iter().any(|v| Side::from_u32(v).is_none()) {
        return Err(SequenceError::InvalidSymbol);
    }
    Ok(())
}

/// Validate `seq` and convert it into typed sides.
pub fn parse_sequence(seq: &Vec<u32>) -> Result<Vec<Side>, SequenceError> {
    validate_sequence(seq)?;

    let mut sides = Vec::new(seq.env());
    for raw in seq.iter() {
        let side = Side::from_u32(raw).ok_or(SequenceError::InvalidSymbol)?;
        sides.push_back(side);
    }
    Ok(sides)
}

/// Element-wise equality over every position; stops at the first mismatch.
pub fn sequences_match(prediction: &Vec<Side>, result: &Vec<Side>) -> bool {
    if prediction.len() != result.len() {
        return false;
    }
    prediction
        .iter()
        .zip(result.iter())
        .all(|(predicted, actual)| predicted == actual)
}
