pub mod highlight;
pub mod stat_cards;
