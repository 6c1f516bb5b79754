use gin_rummy::hand::CardSet;
use gin_rummy::melds::{find_melds, find_runs, find_sets, MeldKind};

fn set(s: &str) -> CardSet {
    s.parse().unwrap()
}

#[test]
fn four_of_a_kind_yields_the_group_and_every_triple() {
    let melds = find_melds(set("7c 7s 7h 7d"));
    assert_eq!(melds.len(), 5);
    assert!(melds.iter().all(|m| m.kind() == MeldKind::Set));
    assert_eq!(melds.iter().filter(|m| m.len() == 4).count(), 1);
    assert_eq!(melds.iter().filter(|m| m.len() == 3).count(), 4);
}

#[test]
fn four_card_run_yields_every_sub_run() {
    let runs = find_runs(set("4h 5h 6h 7h"));
    let got: Vec<CardSet> = runs.iter().map(|m| m.cards()).collect();
    assert_eq!(got.len(), 3);
    assert!(got.contains(&set("4h 5h 6h")));
    assert!(got.contains(&set("5h 6h 7h")));
    assert!(got.contains(&set("4h 5h 6h 7h")));
}

#[test]
fn runs_do_not_wrap_around_the_king() {
    assert!(find_runs(set("Qh Kh Ah")).is_empty());
    assert!(find_runs(set("Kh Ah 2h")).is_empty());
    assert_eq!(find_runs(set("Ah 2h 3h")).len(), 1);
}

#[test]
fn runs_need_a_single_suit() {
    assert!(find_runs(set("4h 5d 6h")).is_empty());
}

#[test]
fn pairs_are_not_melds() {
    assert!(find_sets(set("9c 9d Kh Ks")).is_empty());
    assert!(find_melds(set("9c 9d")).is_empty());
}

#[test]
fn overlapping_candidates_are_all_reported() {
    // 7h belongs to both the run and the set
    let melds = find_melds(set("5h 6h 7h 7c 7s"));
    assert_eq!(melds.len(), 2);
    assert_eq!(melds[0].kind(), MeldKind::Run);
    assert_eq!(melds[1].kind(), MeldKind::Set);
}

#[test]
fn empty_hand_has_no_melds() {
    assert!(find_melds(CardSet::EMPTY).is_empty());
}
