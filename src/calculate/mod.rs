//! Elo rating calculation engine.
//!
//! Pure functions, no state:
//! - Expected score of one player against another
//! - Rating update after a single result

/// How far a single result can move a rating.
pub const K_FACTOR: f64 = 32.0;

/// Score for a won game.
pub const WIN: f64 = 1.0;

/// Score for a lost game.
pub const LOSS: f64 = 0.0;

/// Expected score of a player rated `rating_a` against one rated `rating_b`.
///
/// Always in (0, 1); `expected_score(a, b) + expected_score(b, a)` is 1.
pub fn expected_score(rating_a: i32, rating_b: i32) -> f64 {
    1.0 / (1.0 + 10f64.powf((f64::from(rating_b) - f64::from(rating_a)) / 400.0))
}

/// New rating after a result with the given expected and actual score.
///
/// Halves round upward, so 1500.5 becomes 1501 and -0.5 becomes 0.
pub fn update_rating(rating: i32, expected: f64, actual: f64) -> i32 {
    round_half_up(f64::from(rating) + K_FACTOR * (actual - expected))
}

/// Score for the given outcome.
pub fn actual_score(won: bool) -> f64 {
    if won {
        WIN
    } else {
        LOSS
    }
}

fn round_half_up(value: f64) -> i32 {
    (value + 0.5).floor() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    const RATINGS: [i32; 7] = [0, 800, 1200, 1500, 1516, 2100, 2850];

    #[test]
    fn test_expected_score_equal_ratings() {
        for r in RATINGS {
            assert_eq!(expected_score(r, r), 0.5);
        }
    }

    #[test]
    fn test_expected_score_complements() {
        for a in RATINGS {
            for b in RATINGS {
                let sum = expected_score(a, b) + expected_score(b, a);
                assert!((sum - 1.0).abs() < 1e-12, "{} vs {}: {}", a, b, sum);
            }
        }
    }

    #[test]
    fn test_expected_score_favours_higher_rating() {
        let e = expected_score(1600, 1400);
        assert!(e > 0.5 && e < 1.0);
        assert!((e - 0.7597).abs() < 0.001);
    }

    #[test]
    fn test_expected_score_extreme_ratings() {
        let low = expected_score(i32::MIN, i32::MAX);
        let high = expected_score(i32::MAX, i32::MIN);

        assert!((0.0..=1.0).contains(&low));
        assert!((0.0..=1.0).contains(&high));
        assert!(low < high);
        assert!(expected_score(i32::MIN, 1500) < 0.5);
    }

    #[test]
    fn test_update_rating_equal_players() {
        assert_eq!(update_rating(1500, 0.5, WIN), 1516);
        assert_eq!(update_rating(1500, 0.5, LOSS), 1484);
    }

    #[test]
    fn test_update_rating_upset() {
        let e_low = expected_score(1400, 1600);
        let e_high = expected_score(1600, 1400);

        assert_eq!(update_rating(1400, e_low, WIN), 1424);
        assert_eq!(update_rating(1600, e_high, LOSS), 1576);
    }

    #[test]
    fn test_update_rating_favourite_gains_less() {
        let e = expected_score(1800, 1400);
        let gain = update_rating(1800, e, WIN) - 1800;
        assert!(gain > 0 && gain < 16);
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(1500.5), 1501);
        assert_eq!(round_half_up(1500.49), 1500);
        assert_eq!(round_half_up(-0.5), 0);
        assert_eq!(round_half_up(-1.5), -1);
    }

    #[test]
    fn test_actual_score() {
        assert_eq!(actual_score(true), 1.0);
        assert_eq!(actual_score(false), 0.0);
    }
}
