//! Randomized greedy pairing with bounded retry.

use std::collections::BTreeSet;

use santa_types::{Assignment, ParticipantId, ParticipantSet};

use crate::error::{AttemptFailure, PairingError};
use crate::random::{shuffle, RandomSource};

/// Total attempts (one initial pass plus ten retries) before giving up.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 11;

/// Draws gifter → giftee assignments.
///
/// Each attempt visits the gifters in a freshly shuffled order and gives
/// each one a giftee drawn uniformly from the still-available identities
/// that are neither the gifter nor excluded as a partner. An attempt that
/// reaches a gifter with no eligible giftee is thrown away whole and the
/// next attempt starts from the full pool.
///
/// The greedy pass can fail on groups that do have a valid assignment, so
/// [`PairingError::Exhausted`] is an expected outcome, not a bug.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PairingEngine {
    max_attempts: u32,
}

/// A gifter together with every identity it must not draw.
type Constraint<'a> = (&'a ParticipantId, BTreeSet<&'a ParticipantId>);

impl PairingEngine {
    pub fn new() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Use a custom attempt budget. A budget of zero is raised to one.
    pub fn with_max_attempts(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Pair every participant with exactly one giftee.
    ///
    /// An empty group yields an empty assignment. A group of one can never
    /// be paired and always exhausts the budget.
    pub fn pair(
        &self,
        random: &dyn RandomSource,
        participants: &ParticipantSet,
    ) -> Result<Assignment, PairingError> {
        if participants.is_empty() {
            return Ok(Assignment::empty());
        }

        let constraints: Vec<Constraint<'_>> = participants
            .ids()
            .map(|id| (id, participants.excluded_for(id)))
            .collect();

        let mut attempt = 1;
        loop {
            match attempt_pairing(random, participants, &constraints) {
                Ok(assignment) => {
                    tracing::info!(
                        participants = participants.len(),
                        attempts = attempt,
                        source = random.name(),
                        "participants paired"
                    );
                    return Ok(assignment);
                }
                Err(cause) if attempt >= self.max_attempts => {
                    tracing::warn!(attempts = attempt, %cause, "pairing attempts exhausted");
                    return Err(PairingError::Exhausted {
                        attempts: attempt,
                        cause,
                    });
                }
                Err(cause) => {
                    tracing::debug!(attempt, %cause, "pairing attempt failed, retrying");
                    attempt += 1;
                }
            }
        }
    }
}

impl Default for PairingEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// One greedy pass over the group.
fn attempt_pairing(
    random: &dyn RandomSource,
    participants: &ParticipantSet,
    constraints: &[Constraint<'_>],
) -> Result<Assignment, AttemptFailure> {
    let mut order: Vec<usize> = (0..constraints.len()).collect();
    shuffle(random, &mut order);

    let mut available: Vec<&ParticipantId> = participants.ids().collect();
    let mut pairs = Vec::with_capacity(constraints.len());

    for index in order {
        let (gifter, excluded) = &constraints[index];
        let eligible: Vec<usize> = available
            .iter()
            .enumerate()
            .filter_map(|(slot, candidate)| (!excluded.contains(candidate)).then_some(slot))
            .collect();

        if eligible.is_empty() {
            return Err(AttemptFailure::NoEligibleGiftee {
                gifter: (*gifter).clone(),
            });
        }

        let slot = eligible[random.next_index(eligible.len())];
        let giftee = available.swap_remove(slot);
        pairs.push(((*gifter).clone(), giftee.clone()));
    }

    Ok(Assignment::from_pairs(pairs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::SeededRandom;
    use santa_types::Participant;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Always takes the first option.
    struct FirstChoice;

    impl RandomSource for FirstChoice {
        fn next_index(&self, _bound: usize) -> usize {
            0
        }
        fn name(&self) -> &str {
            "first-choice"
        }
    }

    /// Replays a script of draws, then falls back to zero.
    struct Scripted(Mutex<VecDeque<usize>>);

    impl Scripted {
        fn new(draws: &[usize]) -> Self {
            Self(Mutex::new(draws.iter().copied().collect()))
        }
    }

    impl RandomSource for Scripted {
        fn next_index(&self, bound: usize) -> usize {
            self.0.lock().unwrap().pop_front().unwrap_or(0) % bound
        }
        fn name(&self) -> &str {
            "scripted"
        }
    }

    fn p(name: &str) -> Participant {
        Participant::new(name, format!("{}@example.com", name.to_lowercase()))
    }

    fn id(name: &str) -> ParticipantId {
        ParticipantId::new(name)
    }

    fn set(participants: Vec<Participant>) -> ParticipantSet {
        ParticipantSet::new(participants).unwrap()
    }

    fn bedrock() -> ParticipantSet {
        set(vec![
            p("Barney").with_partner("Betty"),
            p("Fred").with_partner("Wilma"),
            p("Wilma").with_partner("Fred"),
            p("Betty").with_partner("Barney"),
            p("Pebbles"),
            p("BamBam"),
        ])
    }

    fn no_eligible(name: &str) -> AttemptFailure {
        AttemptFailure::NoEligibleGiftee { gifter: id(name) }
    }

    #[test]
    fn empty_group_pairs_to_empty_assignment() {
        let assignment = PairingEngine::new()
            .pair(&FirstChoice, &ParticipantSet::empty())
            .unwrap();
        assert!(assignment.is_empty());
    }

    #[test]
    fn single_participant_exhausts_budget() {
        let err = PairingEngine::new()
            .pair(&FirstChoice, &set(vec![p("A")]))
            .unwrap_err();
        assert_eq!(
            err,
            PairingError::Exhausted {
                attempts: DEFAULT_MAX_ATTEMPTS,
                cause: no_eligible("A"),
            }
        );
    }

    #[test]
    fn mutual_partners_cannot_be_paired() {
        let group = set(vec![p("A").with_partner("B"), p("B").with_partner("A")]);
        let err = PairingEngine::new().pair(&FirstChoice, &group).unwrap_err();
        assert_eq!(err.attempts(), DEFAULT_MAX_ATTEMPTS);
        assert!(err.to_string().contains("no eligible giftee found"));
    }

    #[test]
    fn one_sided_partner_declaration_still_excludes() {
        // Only A names B, yet B → A is just as forbidden.
        let group = set(vec![p("A").with_partner("B"), p("B")]);
        assert!(PairingEngine::new().pair(&FirstChoice, &group).is_err());
    }

    #[test]
    fn two_unconstrained_participants_swap() {
        let group = set(vec![p("A"), p("B")]);
        for seed in 0..20 {
            let assignment = PairingEngine::new()
                .pair(&SeededRandom::new(seed), &group)
                .unwrap();
            assert_eq!(assignment.giftee_of(&id("A")), Some(&id("B")));
            assert_eq!(assignment.giftee_of(&id("B")), Some(&id("A")));
        }
    }

    #[test]
    fn failed_attempt_is_discarded_and_retried() {
        // Attempt 1: order [A, B, C]; A → B, B → A, C is left with itself.
        // Attempt 2: order [A, B, C]; A → B, B → C, C → A.
        let group = set(vec![p("A"), p("B"), p("C")]);
        let random = Scripted::new(&[2, 1, 0, 0, 2, 1, 0, 1, 0]);

        let assignment = PairingEngine::new().pair(&random, &group).unwrap();
        assert_eq!(assignment.giftee_of(&id("A")), Some(&id("B")));
        assert_eq!(assignment.giftee_of(&id("B")), Some(&id("C")));
        assert_eq!(assignment.giftee_of(&id("C")), Some(&id("A")));
        assert!(assignment.validate(&group).is_ok());
    }

    #[test]
    fn budget_of_one_reports_first_failure() {
        let group = set(vec![p("A"), p("B"), p("C")]);
        let random = Scripted::new(&[2, 1, 0, 0]);

        let err = PairingEngine::with_max_attempts(1)
            .pair(&random, &group)
            .unwrap_err();
        assert_eq!(
            err,
            PairingError::Exhausted {
                attempts: 1,
                cause: no_eligible("C"),
            }
        );
    }

    #[test]
    fn zero_budget_is_raised_to_one() {
        let engine = PairingEngine::with_max_attempts(0);
        assert_eq!(engine.max_attempts(), 1);
        let err = engine.pair(&FirstChoice, &set(vec![p("A")])).unwrap_err();
        assert_eq!(err.attempts(), 1);
    }

    #[test]
    fn bedrock_assignments_are_always_valid() {
        let group = bedrock();
        for seed in 0..200 {
            let assignment = PairingEngine::new()
                .pair(&SeededRandom::new(seed), &group)
                .unwrap();
            assert_eq!(assignment.len(), group.len());
            assert!(
                assignment.validate(&group).is_ok(),
                "seed {seed} produced an invalid assignment"
            );
        }
    }

    #[test]
    fn couples_ring_with_free_participant_is_solved() {
        let group = set(vec![
            p("A").with_partner("B"),
            p("B").with_partner("A"),
            p("C").with_partner("D"),
            p("D").with_partner("C"),
            p("E"),
        ]);
        for seed in 0..200 {
            let assignment = PairingEngine::new()
                .pair(&SeededRandom::new(seed), &group)
                .unwrap();
            assert!(assignment.validate(&group).is_ok());
        }
    }

    #[test]
    fn odd_ring_where_everyone_has_a_partner_is_unsolvable() {
        // A names B, B names C, C names A: everyone excludes everyone.
        let group = set(vec![
            p("A").with_partner("B"),
            p("B").with_partner("C"),
            p("C").with_partner("A"),
        ]);
        for seed in 0..20 {
            let err = PairingEngine::new()
                .pair(&SeededRandom::new(seed), &group)
                .unwrap_err();
            assert_eq!(err.attempts(), DEFAULT_MAX_ATTEMPTS);
        }
    }

    #[test]
    fn same_seed_same_assignment() {
        let group = bedrock();
        let a = PairingEngine::new().pair(&SeededRandom::new(42), &group).unwrap();
        let b = PairingEngine::new().pair(&SeededRandom::new(42), &group).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn pairing_does_not_touch_input() {
        let group = bedrock();
        let before = group.clone();
        let _ = PairingEngine::new().pair(&SeededRandom::new(1), &group);
        assert_eq!(group, before);
    }

    #[test]
    fn thread_random_convenience_pairs_valid() {
        let group = bedrock();
        for _ in 0..50 {
            let assignment = crate::pair(&group).unwrap();
            assert!(assignment.validate(&group).is_ok());
        }
    }
}
