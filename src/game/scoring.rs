/// Points a correct guess earns while `hint_count` hints are visible:
/// five on the first hint, one less per extra hint, never below one.
pub fn points_for_hint(hint_count: u32) -> u32 {
    6u32.saturating_sub(hint_count).max(1)
}

/// Case-insensitive exact match. Callers trim before this point.
pub fn is_correct_guess(guess: &str, word: &str) -> bool {
    guess.to_uppercase() == word.to_uppercase()
}
