use gin_rummy::hand::CardSet;
use gin_rummy::scoring::{score_round, RoundEnd, Winner, BIG_GIN_BONUS, GIN_BONUS, UNDERCUT_BONUS};

fn set(s: &str) -> CardSet {
    s.parse().unwrap()
}

const NO_MELDS: &str = "2h 4h 6h 8h 10h 3d 5d 7d 9d Jd";

#[test]
fn knock_scores_the_difference() {
    let score = score_round(
        set("2c 3c 4c 8s 8h 8d Jh Qh Kh 4d"),
        set("5s 6s 7s 10c 10s 10d Ad 2s 3h 9c"),
    );
    assert_eq!(score.end, RoundEnd::Knock);
    assert_eq!(score.winner, Winner::Ender);
    assert_eq!((score.ender_score, score.opponent_score), (4, 15));
    assert_eq!(score.points, 11);
    assert_eq!(score.bonus, 0);
}

#[test]
fn undercut_pays_the_difference_plus_bonus() {
    let score = score_round(
        set("2c 3c 4c 8s 8h 8d Ad 2s 4h 5d"),
        set("10c 10s 10h 10d Js Qs Ks Ah 3s 4s"),
    );
    assert_eq!(score.end, RoundEnd::Undercut);
    assert_eq!(score.winner, Winner::Opponent);
    assert_eq!((score.ender_score, score.opponent_score), (12, 8));
    assert_eq!(score.points, 4);
    assert_eq!(score.bonus, UNDERCUT_BONUS);
    assert_eq!(score.total(), 29);
}

#[test]
fn gin_takes_all_opponent_deadwood_plus_bonus() {
    let score = score_round(set("Ac 2c 3c 4c 5s 6s 7s Kh Kd Kc"), set(NO_MELDS));
    assert_eq!(score.end, RoundEnd::Gin);
    assert_eq!(score.winner, Winner::Ender);
    assert_eq!(score.points, 64);
    assert_eq!(score.total(), 64 + GIN_BONUS);
}

#[test]
fn eleven_card_gin_is_big_gin() {
    let score = score_round(set("Ac 2c 3c 4c 5s 6s 7s 8s Kh Kd Kc"), set(NO_MELDS));
    assert_eq!(score.end, RoundEnd::BigGin);
    assert_eq!(score.total(), 64 + BIG_GIN_BONUS);
}

#[test]
fn ender_pair_offs_can_save_a_knock() {
    // ender's 9s extends the opponent's 6s-8s run
    let score = score_round(
        set("2c 3c 4c 8h 8d 8c Jh Qh Kh 9s"),
        set("6s 7s 8s 10c 10s 10d Ad 2s 3h 9c"),
    );
    assert_eq!(score.ender_deadwood, 9);
    assert_eq!(score.ender_pair_offs, set("9s"));
    assert_eq!(score.ender_score, 0);
    assert_eq!(score.opponent_score, 15);
    assert_eq!(score.end, RoundEnd::Knock);
    assert_eq!(score.points, 15);
}
