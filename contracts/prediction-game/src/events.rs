use soroban_sdk::{contractevent, Address, Vec};
use tenflip_shared::Side;

#[contractevent]
pub struct Initialized {
    #[topic]
    pub admin: Address,
    pub token: Address,
    pub prize_amount: i128,
}

#[contractevent]
pub struct PredictionSubmitted {
    #[topic]
    pub game_id: u128,
    #[topic]
    pub player: Address,
    pub prediction: Vec<Side>,
    pub timestamp: u64,
}

/// Published for every recorded result, winning or not.
#[contractevent]
pub struct ResultSubmitted {
    #[topic]
    pub game_id: u128,
    pub result: Vec<Side>,
    pub timestamp: u64,
}

/// Published at most once over the contract's lifetime.
#[contractevent]
pub struct PrizeClaimed {
    #[topic]
    pub game_id: u128,
    #[topic]
    pub recipient: Address,
    pub amount: i128,
    pub timestamp: u64,
}
