mod ledger;

pub use ledger::{Popup, Reward, RewardLedger, RewardRules};
