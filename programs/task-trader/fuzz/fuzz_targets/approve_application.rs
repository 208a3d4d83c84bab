//! Fuzz target for approve_application
//!
//! Tests invariants:
//! - approved_num never exceeds taker_num, in any approval order
//! - exactly min(applicants, free slots) approvals succeed
//!
//! Run with: cargo test --release -p task-trader-fuzz approve_application

use crate::*;
use proptest::prelude::*;

fn applications(count: usize) -> Vec<SimulatedApplication> {
    (0..count)
        .map(|i| SimulatedApplication {
            applicant: [i as u8; 32],
            inviter: None,
            state: ApplicationState::Applied,
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    /// Approving a batch of applications never overfills the task
    #[test]
    fn fuzz_approve_application(input in any::<ApproveApplicationInput>()) {
        let mut task = SimulatedTask {
            task_amount: 1_000_000,
            taker_num: input.taker_num,
            approved_num: input.approved_num,
            ..Default::default()
        };
        let mut apps = applications(input.applicants);

        let results = simulate_concurrent_approvals(&mut task, &mut apps);

        prop_assert!(results.iter().all(|r| !r.is_invariant_violation()),
            "Invariant violation: {:?}\nInput: {:?}", results, input);
        prop_assert!(task.approved_num <= task.taker_num);

        let free = (input.taker_num - input.approved_num) as usize;
        let succeeded = results.iter().filter(|r| r.is_success()).count();
        prop_assert_eq!(succeeded, free.min(input.applicants));
    }

    /// Approval order does not change how many slots get filled
    #[test]
    fn fuzz_approve_application_order(
        taker_num in 1u64..=8u64,
        apps in Just(applications(12)).prop_shuffle(),
    ) {
        let mut task = SimulatedTask {
            taker_num,
            ..Default::default()
        };
        let mut apps = apps;

        simulate_concurrent_approvals(&mut task, &mut apps);

        let accepted = apps.iter().filter(|a| a.state == ApplicationState::Accepted).count();
        prop_assert_eq!(accepted as u64, taker_num);
        prop_assert_eq!(task.approved_num, taker_num);
    }

    /// Approving anything but an Applied application fails without side effects
    #[test]
    fn fuzz_approve_requires_applied(state_index in 1usize..7usize) {
        let states = [
            ApplicationState::Applied,
            ApplicationState::Accepted,
            ApplicationState::Rejected,
            ApplicationState::WaitingForAcceptance,
            ApplicationState::RejectedByAcceptance,
            ApplicationState::AcceptedByAcceptance,
            ApplicationState::Withdrawed,
        ];
        let mut task = SimulatedTask {
            taker_num: 5,
            ..Default::default()
        };
        let mut app = SimulatedApplication {
            state: states[state_index],
            ..Default::default()
        };

        let result = simulate_approve_application(&mut task, &mut app);

        prop_assert!(result.is_error());
        prop_assert_eq!(task.approved_num, 0);
        prop_assert_eq!(app.state, states[state_index]);
    }
}
