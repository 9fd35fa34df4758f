use super::models::GameOutcome;

/// Upstream result codes and the canonical outcome each one collapses into.
/// Review whenever chess.com adds a result code.
const RESULT_CODES: &[(&str, GameOutcome)] = &[
    ("win", GameOutcome::Win),
    ("checkmated", GameOutcome::Loss),
    ("timeout", GameOutcome::Loss),
    ("resigned", GameOutcome::Loss),
    ("lose", GameOutcome::Loss),
    ("abandoned", GameOutcome::Loss),
    ("kingofthehill", GameOutcome::Loss),
    ("threecheck", GameOutcome::Loss),
    ("bughousepartnerlose", GameOutcome::Loss),
    ("agreed", GameOutcome::Draw),
    ("repetition", GameOutcome::Draw),
    ("stalemate", GameOutcome::Draw),
    ("insufficient", GameOutcome::Draw),
    ("50move", GameOutcome::Draw),
    ("timevsinsufficient", GameOutcome::Draw),
];

/// Map an upstream result code to a canonical outcome.
///
/// Returns `None` for codes missing from the table.
pub fn map_result_code(code: &str) -> Option<GameOutcome> {
    RESULT_CODES
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, outcome)| *outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_win_code() {
        assert_eq!(map_result_code("win"), Some(GameOutcome::Win));
    }

    #[test]
    fn test_loss_codes() {
        for code in ["checkmated", "timeout", "resigned", "abandoned", "lose"] {
            assert_eq!(map_result_code(code), Some(GameOutcome::Loss), "{code}");
        }
    }

    #[test]
    fn test_draw_codes() {
        for code in ["agreed", "repetition", "stalemate", "insufficient", "50move", "timevsinsufficient"] {
            assert_eq!(map_result_code(code), Some(GameOutcome::Draw), "{code}");
        }
    }

    #[test]
    fn test_unknown_code() {
        assert_eq!(map_result_code("flagged"), None);
        assert_eq!(map_result_code("WIN"), None);
    }
}
