//! Fuzz target for whole application lifecycles
//!
//! Drives random sequences of apply / approve / reject / submit / verify /
//! withdraw / open / close against one funded task and checks after each
//! step that:
//! - every state change is an allowed edge and terminal states never move
//! - approved_num equals the number of slot-holding applications
//! - the pool balance equals escrowed minus distributed
//!
//! Run with: cargo test --release -p task-trader-fuzz application_lifecycle

use crate::*;
use proptest::prelude::*;

fn run(input: &LifecycleInput) -> (SimulatedTask, SimulatedPool, SimulatedPayouts, Vec<SimulationResult>) {
    let mut task = SimulatedTask {
        task_amount: input.task_amount,
        taker_num: input.taker_num,
        rewards: input.rewards,
        acceptance_flow: input.acceptance_flow,
        ..Default::default()
    };
    let mut pool = SimulatedPool::default();
    let mut balance = u64::MAX;
    simulate_create_task(&mut task, &mut balance, &mut pool);

    let config = SimulatedConfig { fee_ratio: input.fee_ratio };
    let mut payouts = SimulatedPayouts::default();
    let mut applications: [Option<SimulatedApplication>; MAX_APPLICANTS] = Default::default();

    let results = simulate_lifecycle(
        &mut task,
        &mut applications,
        &input.ops,
        &config,
        &mut pool,
        &mut payouts,
    );
    (task, pool, payouts, results)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn fuzz_application_lifecycle(input in any::<LifecycleInput>()) {
        let (task, pool, payouts, results) = run(&input);

        prop_assert!(results.iter().all(|r| !r.is_invariant_violation()),
            "Invariant violation: {:?}\nInput: {:?}", results, input);
        prop_assert!(task.withdrawn_num <= task.approved_num);
        prop_assert!(task.approved_num <= task.taker_num);
        prop_assert_eq!(pool.balance + task.distributed, task.escrowed);
        prop_assert_eq!(payouts.total(), task.distributed);
    }

    /// Settled amounts never depend on the order of unrelated operations
    #[test]
    fn fuzz_lifecycle_settlement_bound(input in any::<LifecycleInput>()) {
        let (task, _, payouts, _) = run(&input);

        let max_per_taker = task.amount_per_task + task.rewards;
        prop_assert!(payouts.total() <= max_per_taker * task.withdrawn_num);
        prop_assert!(payouts.applicants + payouts.fee_receiver == task.amount_per_task * task.withdrawn_num);
    }

    /// A closed task never gains applications
    #[test]
    fn fuzz_closed_task_rejects_applications(
        ops in prop::collection::vec(arb_lifecycle_op(), 1..32),
    ) {
        let mut task = SimulatedTask {
            task_amount: 1_000,
            taker_num: MAX_APPLICANTS as u64,
            ..Default::default()
        };
        let mut pool = SimulatedPool::default();
        let mut balance = u64::MAX;
        simulate_create_task(&mut task, &mut balance, &mut pool);
        simulate_set_task_state(&mut task, TaskState::Close);

        let ops: Vec<_> = ops
            .into_iter()
            .filter(|op| *op != LifecycleOp::OpenTask)
            .collect();
        let mut applications: [Option<SimulatedApplication>; MAX_APPLICANTS] = Default::default();
        let mut payouts = SimulatedPayouts::default();

        simulate_lifecycle(
            &mut task,
            &mut applications,
            &ops,
            &SimulatedConfig::default(),
            &mut pool,
            &mut payouts,
        );

        prop_assert!(applications.iter().all(|a| a.is_none()));
        prop_assert_eq!(task.approved_num, 0);
    }
}
