//! Prize escrow held at the contract's own address.
//!
//! The prize is deposited once by `init` and leaves at most once through
//! `payout`. The `Escrowed` counter mirrors what the contract holds for the
//! winner; direct transfers to the contract address are not counted.

use soroban_sdk::{token::TokenClient, Address, Env};

use crate::registry::{extend_persistent_ttl, get_token, DataKey};
use crate::Error;

/// Fixed prize: 10 units of a 7-decimal asset (10 XLM in stroops).
pub const PRIZE_AMOUNT: i128 = 100_000_000;

/// Move the prize from `from` into escrow.
///
/// The balance is checked before the transfer so an underfunded admin gets
/// `InsufficientFunds` rather than a token-contract trap.
pub fn fund(env: &Env, from: &Address, token: &Address) -> Result<(), Error> {
    let client = TokenClient::new(env, token);
    if client.balance(from) < PRIZE_AMOUNT {
        return Err(Error::InsufficientFunds);
    }

    client.transfer(from, &env.current_contract_address(), &PRIZE_AMOUNT);
    set_escrowed(env, PRIZE_AMOUNT);

    Ok(())
}

/// Pay the whole prize to `recipient` and return the amount paid.
///
/// The one-time guard is the registry's claim flag; this only refuses when
/// the escrow no longer covers the prize.
pub fn payout(env: &Env, recipient: &Address) -> Result<i128, Error> {
    let escrowed = escrow_balance(env);
    if escrowed < PRIZE_AMOUNT {
        return Err(Error::InsufficientFunds);
    }

    // Debit before the external transfer.
    let remaining = escrowed.checked_sub(PRIZE_AMOUNT).ok_or(Error::Overflow)?;
    set_escrowed(env, remaining);

    let token = get_token(env);
    TokenClient::new(env, &token).transfer(
        &env.current_contract_address(),
        recipient,
        &PRIZE_AMOUNT,
    );

    Ok(PRIZE_AMOUNT)
}

pub fn escrow_balance(env: &Env) -> i128 {
    env.storage()
        .persistent()
        .get(&DataKey::Escrowed)
        .unwrap_or(0)
}

fn set_escrowed(env: &Env, amount: i128) {
    env.storage().persistent().set(&DataKey::Escrowed, &amount);
    extend_persistent_ttl(env, &DataKey::Escrowed);
}
