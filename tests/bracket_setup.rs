//! Integration tests for bracket setup: entrant parsing, round layout, and byes.

use bracket_manager_web::{
    init_bracket, init_bracket_with, parse_entrants, randomise_entrants, select_winner,
    BracketEngine, BracketError, ByePlacement, MatchStatus, Slot, SlotPosition,
};

fn entrants(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("P{i}")).collect()
}

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn decided_in_first_round(engine: &BracketEngine) -> usize {
    engine.bracket.rounds[0]
        .iter()
        .filter(|m| m.status() == MatchStatus::Decided)
        .count()
}

#[test]
fn parse_trims_and_drops_blank_lines() {
    let parsed = parse_entrants("  Alice \r\n\r\nBob\n   \n\tCarol\n");
    assert_eq!(parsed, names(&["Alice", "Bob", "Carol"]));
    assert!(parse_entrants("\n \n").is_empty());
}

#[test]
fn randomise_is_a_permutation() {
    let shuffled = randomise_entrants("A\nB\n\nC\nD\n").unwrap();
    let mut got = parse_entrants(&shuffled);
    got.sort();
    assert_eq!(got, names(&["A", "B", "C", "D"]));
}

#[test]
fn randomise_requires_two_names() {
    assert_eq!(
        randomise_entrants("Solo\n\n"),
        Err(BracketError::InsufficientEntrants)
    );
}

#[test]
fn init_requires_at_least_2_entrants() {
    let mut engine = BracketEngine::new();
    assert_eq!(
        init_bracket(&mut engine, &entrants(1)),
        Err(BracketError::InsufficientEntrants)
    );
    assert_eq!(
        init_bracket(&mut engine, &[]),
        Err(BracketError::InsufficientEntrants)
    );
    assert!(engine.bracket.is_empty());
}

#[test]
fn failed_init_keeps_previous_bracket_and_history() {
    let mut engine = BracketEngine::new();
    init_bracket(&mut engine, &entrants(4)).unwrap();
    select_winner(&mut engine, 0, 0, SlotPosition::P1).unwrap();
    let before = engine.bracket.clone();

    assert!(init_bracket(&mut engine, &entrants(1)).is_err());
    assert_eq!(engine.bracket, before);
    assert_eq!(engine.history.len(), 1);
}

#[test]
fn round_layout_halves_down_to_a_single_final() {
    for n in 2..=33 {
        let mut engine = BracketEngine::new();
        init_bracket(&mut engine, &entrants(n)).unwrap();
        let size = n.next_power_of_two();
        let rounds = &engine.bracket.rounds;
        assert_eq!(rounds.len(), size.trailing_zeros() as usize, "n = {n}");
        assert_eq!(rounds[0].len(), size / 2, "n = {n}");
        for (r, round) in rounds.iter().enumerate() {
            assert_eq!(round.len(), size >> (r + 1), "n = {n}, round {r}");
        }
        assert_eq!(rounds.last().unwrap().len(), 1);
    }
}

#[test]
fn first_round_fills_pairwise_in_order() {
    let mut engine = BracketEngine::new();
    init_bracket(&mut engine, &names(&["A", "B", "C"])).unwrap();
    let r0 = &engine.bracket.rounds[0];
    assert_eq!(r0[0].p1, Slot::filled("A"));
    assert_eq!(r0[0].p2, Slot::filled("B"));
    assert_eq!(r0[1].p1, Slot::filled("C"));
    assert_eq!(r0[1].p2, Slot::Empty);
}

#[test]
fn bye_advances_into_parent_slot() {
    let mut engine = BracketEngine::new();
    init_bracket(&mut engine, &names(&["A", "B", "C"])).unwrap();
    let r0 = &engine.bracket.rounds[0];
    assert_eq!(r0[0].winner, Slot::Empty);
    assert_eq!(r0[1].winner, Slot::filled("C"));

    let final_match = &engine.bracket.rounds[1][0];
    assert_eq!(final_match.p1, Slot::Empty);
    assert_eq!(final_match.p2, Slot::filled("C"));
    assert_eq!(final_match.winner, Slot::Empty);
    assert!(!engine.can_undo());
}

#[test]
fn spread_byes_resolve_one_match_per_empty_slot() {
    for n in 2..=33 {
        let mut engine = BracketEngine::new();
        init_bracket_with(&mut engine, &entrants(n), ByePlacement::Spread).unwrap();
        let byes = n.next_power_of_two() - n;
        assert_eq!(decided_in_first_round(&engine), byes, "n = {n}");
        assert!(engine.history.is_empty());
    }
}

#[test]
fn trailing_byes_resolve_only_single_occupant_matches() {
    let mut engine = BracketEngine::new();
    init_bracket(&mut engine, &entrants(5)).unwrap();
    // P0-P1, P2-P3, P4-(bye), (empty)
    assert_eq!(decided_in_first_round(&engine), 1);
    assert_eq!(engine.bracket.rounds[0][3].status(), MatchStatus::Empty);
    assert_eq!(engine.bracket.rounds[1][1].p1, Slot::filled("P4"));
    assert_eq!(engine.bracket.rounds[1][1].p2, Slot::Empty);
}

#[test]
fn power_of_two_has_no_byes() {
    let mut engine = BracketEngine::new();
    init_bracket(&mut engine, &entrants(8)).unwrap();
    assert_eq!(decided_in_first_round(&engine), 0);
    assert!(engine.bracket.rounds[1]
        .iter()
        .all(|m| m.status() == MatchStatus::Empty));
}

#[test]
fn restart_discards_progress_and_history() {
    let mut engine = BracketEngine::new();
    init_bracket(&mut engine, &entrants(4)).unwrap();
    select_winner(&mut engine, 0, 0, SlotPosition::P1).unwrap();
    select_winner(&mut engine, 0, 1, SlotPosition::P1).unwrap();

    init_bracket(&mut engine, &names(&["X", "Y"])).unwrap();
    assert_eq!(engine.bracket.round_count(), 1);
    assert!(!engine.can_undo());
    assert_eq!(engine.champion(), None);
}
