//! End-to-end battle lifecycle through the public API.

use battle_escrow::escrow::{BattleEventKind, MAX_FEE};
use battle_escrow::host::TransferError;
use battle_escrow::{
    Address, EscrowError, EscrowEvent, InMemoryHost, RoundId, RoundStatus, ScoreOutcome,
    Settlement,
};

const FEE: u64 = 2_500;

struct Arena {
    host: InMemoryHost,
    owner: Address,
    players: [Address; 4],
}

impl Arena {
    fn new() -> Self {
        let owner = Address::derive("arena-owner");
        let players = ["alpha", "bravo", "charlie", "delta"].map(Address::derive);
        let mut host = InMemoryHost::new();
        host.deploy(owner).unwrap();
        for p in players {
            host.ledger.fund(p, 10 * FEE);
        }
        Self { host, owner, players }
    }

    fn open_full_round(&mut self) -> RoundId {
        let id = self.host.start_round(self.owner, FEE).unwrap();
        for p in self.players {
            self.host.join(p, id, FEE).unwrap();
        }
        id
    }

    fn score_all(&mut self, id: RoundId, scores: [u32; 4]) -> ScoreOutcome {
        let mut outcome = None;
        for (p, s) in self.players.iter().zip(scores) {
            outcome = Some(self.host.end_round(self.owner, *p, id, s).unwrap());
        }
        outcome.unwrap()
    }
}

#[test]
fn winner_takes_three_fees_owner_takes_one() {
    let mut arena = Arena::new();
    let [a, b, c, d] = arena.players;
    let id = arena.open_full_round();

    let outcome = arena.score_all(id, [10, 20, 15, 5]);
    match outcome {
        ScoreOutcome::Settled(settlement @ Settlement::Paid { .. }) => {
            assert_eq!(settlement.total(), 4 * FEE);
        }
        other => panic!("expected payout, got {:?}", other),
    }

    assert_eq!(arena.host.winner(id).unwrap(), b);
    assert_eq!(arena.host.ledger.balance(&b), 10 * FEE - FEE + 3 * FEE);
    for loser in [a, c, d] {
        assert_eq!(arena.host.ledger.balance(&loser), 9 * FEE);
    }
    assert_eq!(arena.host.ledger.balance(&arena.owner), FEE);
    assert_eq!(arena.host.ledger.escrow_balance(), 0);
}

#[test]
fn tie_at_top_refunds_everyone() {
    let mut arena = Arena::new();
    let [_, b, c, _] = arena.players;
    let id = arena.open_full_round();

    arena.score_all(id, [10, 20, 20, 5]);

    let highest = arena.host.highest_scorer(id).unwrap();
    assert_eq!(highest.holders, vec![b, c]);
    assert_eq!(arena.host.round_status(id).unwrap(), RoundStatus::Cancelled);
    assert!(arena.host.winner(id).unwrap().is_zero());
    for p in arena.players {
        assert_eq!(arena.host.ledger.balance(&p), 10 * FEE);
    }
    assert_eq!(arena.host.ledger.balance(&arena.owner), 0);
}

#[test]
fn winner_reads_zero_until_settled() {
    let mut arena = Arena::new();
    let id = arena.open_full_round();
    let [a, b, c, d] = arena.players;

    for (p, s) in [(a, 1), (b, 2), (c, 3)] {
        arena.host.end_round(arena.owner, p, id, s).unwrap();
        assert!(arena.host.winner(id).unwrap().is_zero());
    }
    arena.host.end_round(arena.owner, d, id, 0).unwrap();
    assert_eq!(arena.host.winner(id).unwrap(), c);
}

#[test]
fn event_log_tells_the_story() {
    let mut arena = Arena::new();
    let id = arena.open_full_round();
    arena.score_all(id, [4, 3, 2, 1]);

    let kinds: Vec<BattleEventKind> = arena
        .host
        .log
        .for_round(id)
        .iter()
        .filter_map(|e| match e {
            EscrowEvent::Battle { kind, .. } => Some(*kind),
            _ => None,
        })
        .collect();

    let mut expected = vec![BattleEventKind::Start];
    expected.extend([BattleEventKind::Enter; 4]);
    expected.extend([BattleEventKind::End; 4]);
    assert_eq!(kinds, expected);
}

#[test]
fn rounds_are_independent() {
    let mut arena = Arena::new();
    let first = arena.open_full_round();
    let second = arena.open_full_round();
    assert_eq!((first, second), (1, 2));

    arena.score_all(second, [1, 1, 1, 1]);
    assert_eq!(arena.host.round_status(second).unwrap(), RoundStatus::Cancelled);
    assert_eq!(arena.host.round_status(first).unwrap(), RoundStatus::Full);

    arena.score_all(first, [0, 0, 9, 0]);
    assert_eq!(arena.host.winner(first).unwrap(), arena.players[2]);
}

#[test]
fn failing_payout_reverts_the_fourth_score() {
    let mut arena = Arena::new();
    let [a, b, c, d] = arena.players;
    let id = arena.open_full_round();
    arena.host.end_round(arena.owner, a, id, 1).unwrap();
    arena.host.end_round(arena.owner, b, id, 9).unwrap();
    arena.host.end_round(arena.owner, c, id, 2).unwrap();

    arena.host.ledger.reject_transfers_to(arena.owner);
    let digest_before = arena.host.round_digest(id).unwrap();
    let events_before = arena.host.log.len();

    assert_eq!(
        arena.host.end_round(arena.owner, d, id, 3),
        Err(EscrowError::Transfer(TransferError::Rejected(arena.owner)))
    );
    assert_eq!(arena.host.round_digest(id).unwrap(), digest_before);
    assert_eq!(arena.host.log.len(), events_before);
    assert!(arena.host.winner(id).unwrap().is_zero());
    assert_eq!(arena.host.submitted_count(id).unwrap(), 3);
    assert_eq!(arena.host.ledger.balance(&b), 9 * FEE);

    // Once the owner accepts funds again the same call goes through
    arena.host.ledger.accept_transfers_to(&arena.owner);
    arena.host.end_round(arena.owner, d, id, 3).unwrap();
    assert_eq!(arena.host.winner(id).unwrap(), b);
}

#[test]
fn handed_over_owner_collects_commission() {
    let mut arena = Arena::new();
    let heir = Address::derive("heir");
    let id = arena.open_full_round();

    arena.host.nominate_successor(arena.owner, heir).unwrap();
    arena.host.accept_ownership(heir).unwrap();

    let a = arena.players[0];
    assert_eq!(
        arena.host.end_round(arena.owner, a, id, 5),
        Err(EscrowError::Unauthorized)
    );
    for (p, s) in arena.players.iter().zip([5, 1, 1, 1]) {
        arena.host.end_round(heir, *p, id, s).unwrap();
    }
    assert_eq!(arena.host.ledger.balance(&heir), FEE);
    assert_eq!(arena.host.ledger.balance(&arena.owner), 0);
}

#[test]
fn oversized_fee_creates_nothing() {
    let mut arena = Arena::new();
    assert_eq!(
        arena.host.start_round(arena.owner, MAX_FEE),
        Err(EscrowError::InvalidFee(MAX_FEE))
    );
    assert_eq!(arena.host.next_round_id().unwrap(), 1);
    assert_eq!(arena.host.round_status(1).unwrap(), RoundStatus::Unknown);
}
