/// Matchmaking configuration constants.
/// 
/// This module defines parameters applied when two waiting players are paired.
pub const DEFAULT_MAX_ROUNDS: u32 = 3; // Rounds per match; the first to win a majority takes it.

/// Round number every new match starts at.
pub const FIRST_ROUND: u32 = 1;
