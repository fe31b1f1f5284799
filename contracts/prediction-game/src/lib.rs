//! Tenflip Prediction Game Contract
//!
//! Players predict ten coin outcomes in a row; the admin later supplies the
//! real sequence for each game. An exact match wins a single prize that the
//! admin escrowed at initialization.
//!
//! ## Game Flow
//! 1. Admin calls `init` → the prize moves from the admin into the contract.
//! 2. Players call `submit_prediction` → a game is stored under the next id.
//! 3. Admin calls `submit_result` → the result is recorded and compared.
//! 4. The first exact match across all games is paid the prize and the
//!    contract closes: every later submission fails with `PrizeAlreadyClaimed`.
//!
//! ## Prize
//! There is one prize for the whole contract, not one per game. A correct
//! prediction resolved after another game has already won receives nothing.
#![no_std]
#![allow(unexpected_cfgs)]

use soroban_sdk::{contract, contracterror, contractimpl, contracttype, Address, Env, Map, Vec};
use tenflip_shared::{parse_sequence, SequenceError};

mod events;
mod registry;
mod treasury;

pub use events::{Initialized, PredictionSubmitted, PrizeClaimed, ResultSubmitted};
pub use registry::{Game, MAX_PAGE_SIZE, PERSISTENT_BUMP_LEDGERS};
pub use tenflip_shared::{Side, SEQUENCE_LEN};
pub use treasury::PRIZE_AMOUNT;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized   = 1,
    NotInitialized       = 2,
    NotAdmin             = 3,
    InsufficientFunds    = 4,
    InvalidLength        = 5,
    InvalidSymbol        = 6,
    GameNotFound         = 7,
    AlreadyResolved      = 8,
    ResultNotYetProvided = 9,
    PrizeAlreadyClaimed  = 10,
    Overflow             = 11,
}

impl From<SequenceError> for Error {
    fn from(err: SequenceError) -> Self {
        match err {
            SequenceError::InvalidLength => Error::InvalidLength,
            SequenceError::InvalidSymbol => Error::InvalidSymbol,
        }
    }
}

// ---------------------------------------------------------------------------
// Views
// ---------------------------------------------------------------------------

/// Registry header and escrow snapshot returned by `get_state`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RegistryState {
    pub admin: Address,
    pub token: Address,
    pub prize_amount: i128,
    pub next_id: u128,
    pub prize_claimed: bool,
    pub escrow_balance: i128,
}

// ---------------------------------------------------------------------------
// Contract
// ---------------------------------------------------------------------------

#[contract]
pub struct PredictionGame;

#[contractimpl]
impl PredictionGame {
    /// Initialize the game and escrow the prize. May only be called once.
    ///
    /// `token` is the SEP-41 contract the prize is paid in (the native
    /// Stellar Asset Contract in production). `admin` must hold at least
    /// `PRIZE_AMOUNT`; otherwise nothing is written.
    pub fn init(env: Env, admin: Address, token: Address) -> Result<(), Error> {
        if registry::is_initialized(&env) {
            return Err(Error::AlreadyInitialized);
        }

        admin.require_auth();

        treasury::fund(&env, &admin, &token)?;
        registry::open(&env, &admin, &token);

        Initialized {
            admin,
            token,
            prize_amount: PRIZE_AMOUNT,
        }
        .publish(&env);

        Ok(())
    }

    /// Register a ten-outcome prediction for `player` and return its game id.
    ///
    /// Ids start at 0 and increase by one per successful call.
    pub fn submit_prediction(
        env: Env,
        player: Address,
        prediction: Vec<u32>,
    ) -> Result<u128, Error> {
        registry::require_initialized(&env)?;
        player.require_auth();

        registry::require_prize_open(&env)?;
        let prediction = parse_sequence(&prediction)?;

        let game_id = registry::allocate_and_insert(&env, &player, prediction.clone())?;

        PredictionSubmitted {
            game_id,
            player,
            prediction,
            timestamp: env.ledger().timestamp(),
        }
        .publish(&env);

        Ok(game_id)
    }

    /// Record the real outcome for `game_id`. Admin only.
    ///
    /// Returns whether the prediction matched. The result is stored and
    /// `ResultSubmitted` is published on a loss too. A match pays the prize
    /// to the game's player and closes the contract.
    pub fn submit_result(
        env: Env,
        admin: Address,
        game_id: u128,
        result: Vec<u32>,
    ) -> Result<bool, Error> {
        registry::require_initialized(&env)?;
        require_admin(&env, &admin)?;
        registry::require_prize_open(&env)?;

        let resolution = registry::resolve(&env, game_id, &result)?;
        let timestamp = env.ledger().timestamp();

        ResultSubmitted {
            game_id,
            result: resolution.result,
            timestamp,
        }
        .publish(&env);

        if resolution.matched {
            // Close the registry before funds leave escrow.
            registry::mark_prize_claimed(&env);
            let amount = treasury::payout(&env, &resolution.player)?;

            PrizeClaimed {
                game_id,
                recipient: resolution.player,
                amount,
                timestamp,
            }
            .publish(&env);
        }

        Ok(resolution.matched)
    }

    /// Every game recorded so far, keyed by id.
    pub fn get_games(env: Env) -> Map<u128, Game> {
        registry::read_all(&env)
    }

    /// One page of games in id order, at most `MAX_PAGE_SIZE` entries.
    ///
    /// An empty map means `start` is past the last id.
    pub fn get_games_page(env: Env, start: u128, limit: u32) -> Map<u128, Game> {
        registry::read_page(&env, start, limit)
    }

    pub fn get_game(env: Env, game_id: u128) -> Result<Game, Error> {
        registry::read_game(&env, game_id)
    }

    /// Whether a resolved game's prediction matched its result.
    ///
    /// Derived from the stored sequences on every call; the outcome itself
    /// is never stored.
    pub fn get_match(env: Env, game_id: u128) -> Result<bool, Error> {
        registry::read_match(&env, game_id)
    }

    pub fn get_state(env: Env) -> Result<RegistryState, Error> {
        registry::require_initialized(&env)?;

        Ok(RegistryState {
            admin: registry::get_admin(&env),
            token: registry::get_token(&env),
            prize_amount: PRIZE_AMOUNT,
            next_id: registry::next_id(&env),
            prize_claimed: registry::is_prize_claimed(&env),
            escrow_balance: treasury::escrow_balance(&env),
        })
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn require_admin(env: &Env, caller: &Address) -> Result<(), Error> {
    let admin = registry::get_admin(env);
    caller.require_auth();
    if &admin != caller {
        return Err(Error::NotAdmin);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
