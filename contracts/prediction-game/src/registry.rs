//! Game registry: the id counter, the game table and the global claim flag.
//!
//! ## Storage Strategy
//! - `instance()`: Admin, Token, NextId, PrizeClaimed. Small fixed-size
//!   registry header sharing one ledger entry and TTL.
//! - `persistent()`: one `Game(id)` entry per game plus the treasury's
//!   `Escrowed` counter, each bumped on every write.

use soroban_sdk::{contracttype, Address, Env, Map, Vec};
use tenflip_shared::{parse_sequence, sequences_match, Side};

use crate::Error;

/// Persistent storage TTL in ledgers (~30 days at 5 s/ledger).
pub const PERSISTENT_BUMP_LEDGERS: u32 = 518_400;

/// Maximum number of games returned by one `read_page` call.
/// Bounds the ledger reads of a single query.
pub const MAX_PAGE_SIZE: u32 = 100;

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    // --- instance() ---
    Admin,
    Token,
    NextId,
    PrizeClaimed,
    // --- persistent() ---
    /// Prize amount currently held by the contract for the winner.
    Escrowed,
    Game(u128),
}

/// A single prediction and, once the admin has supplied it, its outcome.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Game {
    pub player: Address,
    pub prediction: Vec<Side>,
    /// `None` until resolved; written exactly once.
    pub result: Option<Vec<Side>>,
}

impl Game {
    /// Match outcome derived from the stored sequences, `None` while unresolved.
    pub fn outcome(&self) -> Option<bool> {
        self.result
            .as_ref()
            .map(|result| sequences_match(&self.prediction, result))
    }
}

/// Outcome of recording a result against a game.
pub struct Resolution {
    pub player: Address,
    pub result: Vec<Side>,
    pub matched: bool,
}

// ---------------------------------------------------------------------------
// Registry header
// ---------------------------------------------------------------------------

pub fn open(env: &Env, admin: &Address, token: &Address) {
    env.storage().instance().set(&DataKey::Admin, admin);
    env.storage().instance().set(&DataKey::Token, token);
    env.storage().instance().set(&DataKey::NextId, &0u128);
    env.storage().instance().set(&DataKey::PrizeClaimed, &false);
    extend_instance_ttl(env);
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Admin)
}

pub fn require_initialized(env: &Env) -> Result<(), Error> {
    if !is_initialized(env) {
        return Err(Error::NotInitialized);
    }
    Ok(())
}

pub fn get_admin(env: &Env) -> Address {
    env.storage()
        .instance()
        .get(&DataKey::Admin)
        .expect("PredictionGame: admin not set")
}

pub fn get_token(env: &Env) -> Address {
    env.storage()
        .instance()
        .get(&DataKey::Token)
        .expect("PredictionGame: token not set")
}

pub fn next_id(env: &Env) -> u128 {
    env.storage()
        .instance()
        .get(&DataKey::NextId)
        .unwrap_or(0)
}

pub fn is_prize_claimed(env: &Env) -> bool {
    env.storage()
        .instance()
        .get(&DataKey::PrizeClaimed)
        .unwrap_or(false)
}

pub fn require_prize_open(env: &Env) -> Result<(), Error> {
    if is_prize_claimed(env) {
        return Err(Error::PrizeAlreadyClaimed);
    }
    Ok(())
}

/// Close the registry for good. There is no path back to `false`.
pub fn mark_prize_claimed(env: &Env) {
    env.storage().instance().set(&DataKey::PrizeClaimed, &true);
    extend_instance_ttl(env);
}

// ---------------------------------------------------------------------------
// Game table
// ---------------------------------------------------------------------------

/// Store a new unresolved game under the next free id and return that id.
///
/// `prediction` arrives already validated and the caller has checked the
/// claim flag. The only failure left is counter overflow, raised before
/// any write.
pub fn allocate_and_insert(
    env: &Env,
    player: &Address,
    prediction: Vec<Side>,
) -> Result<u128, Error> {
    let game_id = next_id(env);
    let following = game_id.checked_add(1).ok_or(Error::Overflow)?;

    let game = Game {
        player: player.clone(),
        prediction,
        result: None,
    };
    store_game(env, game_id, &game);

    env.storage().instance().set(&DataKey::NextId, &following);
    extend_instance_ttl(env);

    Ok(game_id)
}

/// Record `result` against `game_id` and report whether it matches the
/// prediction. The result is stored whether or not it matches.
///
/// The caller has checked the claim flag.
pub fn resolve(env: &Env, game_id: u128, result: &Vec<u32>) -> Result<Resolution, Error> {
    let mut game = read_game(env, game_id)?;
    let result = parse_sequence(result)?;

    if game.result.is_some() {
        return Err(Error::AlreadyResolved);
    }

    let matched = sequences_match(&game.prediction, &result);
    game.result = Some(result.clone());
    store_game(env, game_id, &game);

    Ok(Resolution {
        player: game.player,
        result,
        matched,
    })
}

pub fn read_game(env: &Env, game_id: u128) -> Result<Game, Error> {
    env.storage()
        .persistent()
        .get(&DataKey::Game(game_id))
        .ok_or(Error::GameNotFound)
}

/// Snapshot of every game keyed by id. Ids are dense below `NextId`.
///
/// One ledger read per game; large registries should page with `read_page`.
pub fn read_all(env: &Env) -> Map<u128, Game> {
    read_range(env, 0, next_id(env))
}

/// Up to `limit` games starting at `start`, capped at `MAX_PAGE_SIZE`.
pub fn read_page(env: &Env, start: u128, limit: u32) -> Map<u128, Game> {
    let limit = limit.min(MAX_PAGE_SIZE);
    let end = start.saturating_add(limit as u128).min(next_id(env));
    read_range(env, start, end)
}

fn read_range(env: &Env, start: u128, end: u128) -> Map<u128, Game> {
    let mut games = Map::new(env);
    let mut game_id = start;
    while game_id < end {
        if let Some(game) = env
            .storage()
            .persistent()
            .get::<DataKey, Game>(&DataKey::Game(game_id))
        {
            games.set(game_id, game);
        }
        game_id += 1;
    }
    games
}

/// Recompute the match for a resolved game from its stored sequences.
pub fn read_match(env: &Env, game_id: u128) -> Result<bool, Error> {
    read_game(env, game_id)?
        .outcome()
        .ok_or(Error::ResultNotYetProvided)
}

// ---------------------------------------------------------------------------
// Storage helpers
// ---------------------------------------------------------------------------

fn store_game(env: &Env, game_id: u128, game: &Game) {
    let key = DataKey::Game(game_id);
    env.storage().persistent().set(&key, game);
    extend_persistent_ttl(env, &key);
}

pub fn extend_persistent_ttl(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_BUMP_LEDGERS, PERSISTENT_BUMP_LEDGERS);
}

fn extend_instance_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(PERSISTENT_BUMP_LEDGERS, PERSISTENT_BUMP_LEDGERS);
}
