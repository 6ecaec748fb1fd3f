use fairsplit_core::{DomainError, UserId};
use fairsplit_events::EventEnvelope;
use fairsplit_ledger::{
    Debt, DuplicateUserPolicy, Expense, LedgerConfig, LedgerEvent, SplitService, SplitStrategy,
};
use proptest::prelude::*;

fn uid(s: &str) -> UserId {
    s.parse().unwrap()
}

fn session() -> SplitService {
    let mut service = SplitService::new(LedgerConfig::default());
    service.register_user("A", "Alice").unwrap();
    service.register_user("B", "Bob").unwrap();
    service.register_user("C", "Carol").unwrap();
    service
}

#[test]
fn debts_in_opposite_directions_stay_separate() {
    let mut service = session();
    service.record_expense("Dinner", 90.0, "A", ["A", "B", "C"]).unwrap();
    service.record_expense("Cab", 30.0, "B", ["A", "B"]).unwrap();

    assert_eq!(service.balance(&uid("B"), &uid("A")), 30.0);
    assert_eq!(service.balance(&uid("C"), &uid("A")), 30.0);
    assert_eq!(service.balance(&uid("A"), &uid("B")), 15.0);

    let listed: Vec<(String, String, f64)> = service
        .list_balances()
        .into_iter()
        .map(|b| (b.debtor_name, b.creditor_name, b.amount))
        .collect();
    assert_eq!(
        listed,
        vec![
            ("Alice".to_string(), "Bob".to_string(), 15.0),
            ("Bob".to_string(), "Alice".to_string(), 30.0),
            ("Carol".to_string(), "Alice".to_string(), 30.0),
        ]
    );
}

#[test]
fn expenses_are_listed_in_recording_order() {
    let mut service = session();
    for title in ["one", "two", "three"] {
        service.record_expense(title, 10.0, "A", ["B"]).unwrap();
    }
    let titles: Vec<String> = service.list_expenses().into_iter().map(|e| e.title).collect();
    assert_eq!(titles, vec!["one", "two", "three"]);
}

#[test]
fn replayed_journal_rebuilds_identical_state() {
    let mut service = session();
    service.record_expense("Dinner", 90.0, "A", ["A", "B", "C"]).unwrap();
    service.register_user("A", "Alex").unwrap();
    service.record_expense("Cab", 31.0, "C", ["A", "B", "C"]).unwrap();

    let rebuilt =
        SplitService::replay(LedgerConfig::default(), service.journal().to_vec()).unwrap();

    assert_eq!(rebuilt.list_balances(), service.list_balances());
    assert_eq!(rebuilt.list_expenses(), service.list_expenses());
    assert_eq!(rebuilt.version(), service.version());
    assert_eq!(rebuilt.user(&uid("A")).unwrap().name(), "Alex");
}

#[test]
fn journal_survives_a_json_round_trip_into_replay() {
    let mut service = session();
    service.record_expense("Dinner", 90.0, "A", ["A", "B", "C"]).unwrap();

    let json = serde_json::to_string(service.journal()).unwrap();
    let journal = serde_json::from_str(&json).unwrap();
    let rebuilt = SplitService::replay(LedgerConfig::default(), journal).unwrap();

    assert_eq!(rebuilt.list_balances(), service.list_balances());
}

fn renumbered(
    envelope: &EventEnvelope<LedgerEvent>,
    sequence_number: u64,
) -> EventEnvelope<LedgerEvent> {
    EventEnvelope::new(envelope.event_id(), sequence_number, envelope.payload().clone())
}

#[test]
fn recording_after_replaying_a_journal_with_gaps_is_projected() {
    let mut service = session();
    service.record_expense("Lunch", 10.0, "A", ["B"]).unwrap();

    let mut journal = service.journal().to_vec();
    let last = journal.len() - 1;
    journal[last] = renumbered(&journal[last], 40);

    let mut rebuilt = SplitService::replay(LedgerConfig::default(), journal).unwrap();
    rebuilt.record_expense("Dinner", 20.0, "A", ["B"]).unwrap();

    assert_eq!(rebuilt.list_expenses().len(), 2);
    assert_eq!(rebuilt.balance(&uid("B"), &uid("A")), 30.0);
    let seqs: Vec<u64> = rebuilt.journal().iter().map(|e| e.sequence_number()).collect();
    assert_eq!(seqs, vec![1, 2, 3, 40, 41]);
}

#[test]
fn journal_with_repeated_entries_is_refused() {
    let mut service = session();
    service.record_expense("Lunch", 10.0, "A", ["B"]).unwrap();

    let mut journal = service.journal().to_vec();
    journal.extend(service.journal().iter().cloned());

    match SplitService::replay(LedgerConfig::default(), journal) {
        Err(DomainError::InvariantViolation(msg)) => assert!(msg.contains("does not follow")),
        other => panic!("expected invariant violation, got {other:?}"),
    }
}

#[test]
fn journal_with_unappliable_entry_is_refused() {
    let mut service = session();
    service.record_expense("Lunch", 10.0, "A", ["B"]).unwrap();

    let mut journal = service.journal().to_vec();
    let mut blank = match journal[0].payload() {
        LedgerEvent::UserRegistered(e) => e.clone(),
        other => panic!("expected a registration first, got {other:?}"),
    };
    blank.name = " ".to_string();
    journal[0] = EventEnvelope::new(journal[0].event_id(), 1, LedgerEvent::UserRegistered(blank));

    assert!(matches!(
        SplitService::replay(LedgerConfig::default(), journal),
        Err(DomainError::InvariantViolation(_))
    ));
}

#[test]
fn reject_policy_keeps_the_first_registration() {
    let mut service = SplitService::new(LedgerConfig {
        duplicate_users: DuplicateUserPolicy::Reject,
    });
    service.register_user("A", "Alice").unwrap();

    assert_eq!(
        service.register_user("A", "Impostor"),
        Err(DomainError::DuplicateUser(uid("A")))
    );
    assert_eq!(service.user(&uid("A")).unwrap().name(), "Alice");
    assert_eq!(service.journal().len(), 1);
}

/// Payer pays nothing back; the first listed participant owes everything.
#[derive(Debug)]
struct FirstParticipantPays;

impl SplitStrategy for FirstParticipantPays {
    fn name(&self) -> &'static str {
        "first-pays"
    }

    fn split(&self, expense: &Expense) -> Vec<Debt> {
        expense
            .participants()
            .first()
            .filter(|p| *p != expense.payer())
            .map(|p| Debt {
                debtor: p.clone(),
                creditor: expense.payer().clone(),
                amount: expense.amount().value(),
            })
            .into_iter()
            .collect()
    }
}

#[test]
fn alternative_strategy_plugs_into_the_same_accumulator() {
    let mut service =
        SplitService::with_strategy(LedgerConfig::default(), Box::new(FirstParticipantPays));
    service.register_user("A", "Alice").unwrap();
    service.register_user("B", "Bob").unwrap();
    service.register_user("C", "Carol").unwrap();

    service.record_expense("Concert", 60.0, "A", ["B", "C"]).unwrap();
    service.record_expense("Snacks", 6.0, "A", ["B"]).unwrap();

    assert_eq!(service.balance(&uid("B"), &uid("A")), 66.0);
    assert_eq!(service.balance(&uid("C"), &uid("A")), 0.0);
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        ..ProptestConfig::default()
    })]

    /// Property: each non-payer participant's balance towards the payer grows
    /// by exactly amount / |participants| per expense, additively.
    #[test]
    fn shares_accumulate_additively(
        expenses in prop::collection::vec(
            (1.0f64..10_000.0, 0usize..3, prop::sample::subsequence(vec![0usize, 1, 2], 1..=3)),
            1..20,
        )
    ) {
        let ids = ["A", "B", "C"];
        let mut service = session();
        let mut expected = [[0.0f64; 3]; 3];

        for (amount, payer, participants) in &expenses {
            let names: Vec<&str> = participants.iter().map(|i| ids[*i]).collect();
            service.record_expense("p", *amount, ids[*payer], &names).unwrap();

            let share = amount / participants.len() as f64;
            for p in participants {
                if p != payer {
                    expected[*p][*payer] += share;
                }
            }
        }

        prop_assert_eq!(service.list_expenses().len(), expenses.len());
        for d in 0..3 {
            for c in 0..3 {
                let got = service.balance(&uid(ids[d]), &uid(ids[c]));
                prop_assert!((got - expected[d][c]).abs() <= 1e-6);
            }
        }
        for b in service.list_balances() {
            prop_assert!(b.amount > 0.0);
        }
    }

    /// Property: a non-positive amount is rejected and leaves the session untouched.
    #[test]
    fn non_positive_amounts_never_mutate(amount in -1_000.0f64..=0.0) {
        let mut service = session();
        service.record_expense("ok", 10.0, "A", ["B"]).unwrap();
        let before = service.list_balances();

        let result = service.record_expense("bad", amount, "A", ["B", "C"]);
        prop_assert!(matches!(result, Err(DomainError::Validation(_))));
        prop_assert_eq!(service.list_balances(), before);
        prop_assert_eq!(service.list_expenses().len(), 1);
    }
}
