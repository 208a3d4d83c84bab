//! Fuzz target for withdraw
//!
//! Tests invariants:
//! - applicant + fee equals the per-taker share
//! - the inviter receives the full reward or nothing
//! - the pool never pays out more than the task escrowed
//! - a settled application cannot be settled again
//!
//! Run with: cargo test --release -p task-trader-fuzz withdraw

use crate::*;
use proptest::prelude::*;

fn funded_task(input: &WithdrawInput, pool: &mut SimulatedPool) -> SimulatedTask {
    let mut task = SimulatedTask {
        task_amount: input.task_amount,
        taker_num: input.taker_num,
        rewards: input.rewards,
        acceptance_flow: AcceptanceFlow::DirectVerify,
        ..Default::default()
    };
    let mut balance = u64::MAX;
    simulate_create_task(&mut task, &mut balance, pool);
    task
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    /// Settlement of one accepted application
    #[test]
    fn fuzz_withdraw(input in any::<WithdrawInput>()) {
        let mut pool = SimulatedPool::default();
        let mut task = funded_task(&input, &mut pool);
        let config = SimulatedConfig { fee_ratio: input.fee_ratio };
        let mut payouts = SimulatedPayouts::default();

        // Earlier takers already settled without an inviter.
        for i in 0..input.prior_withdrawals {
            let mut earlier = SimulatedApplication {
                applicant: [i as u8; 32],
                ..Default::default()
            };
            prop_assert!(simulate_verify_application(&mut task, &mut earlier, true).is_success());
            prop_assert!(simulate_withdraw(&mut task, &mut earlier, &config, &mut pool, &mut payouts, false)
                .is_success());
        }

        let mut app = SimulatedApplication {
            applicant: [0xAA; 32],
            inviter: input.inviter,
            state: ApplicationState::Applied,
        };
        prop_assert!(simulate_verify_application(&mut task, &mut app, true).is_success());

        let inviters_before = payouts.inviters;
        let result = simulate_withdraw(
            &mut task, &mut app, &config, &mut pool, &mut payouts, input.inviter_account_supplied,
        );

        prop_assert!(result.is_success(), "Unexpected result {:?}\nInput: {:?}", result, input);
        prop_assert_eq!(app.state, ApplicationState::Withdrawed);
        prop_assert!(task.distributed <= task.escrowed);
        prop_assert_eq!(pool.balance, task.escrowed - task.distributed);

        let inviter_paid = payouts.inviters - inviters_before;
        if input.inviter.is_some() && input.inviter_account_supplied {
            prop_assert_eq!(inviter_paid, input.rewards);
        } else {
            prop_assert_eq!(inviter_paid, 0);
        }
    }

    /// Every taker can settle with an inviter and the escrow still covers it
    #[test]
    fn fuzz_withdraw_all_takers(
        task_amount in 1u64..1_000_000_000u64,
        taker_num in 1u64..=20u64,
        rewards in 0u64..1_000_000u64,
        fee_ratio in arb_valid_fee_ratio(),
    ) {
        let mut pool = SimulatedPool::default();
        let input = WithdrawInput {
            task_amount,
            taker_num,
            rewards,
            fee_ratio,
            inviter: Some([9u8; 32]),
            inviter_account_supplied: true,
            prior_withdrawals: 0,
        };
        let mut task = funded_task(&input, &mut pool);
        let config = SimulatedConfig { fee_ratio };
        let mut payouts = SimulatedPayouts::default();

        for i in 0..taker_num {
            let mut app = SimulatedApplication {
                applicant: [i as u8; 32],
                inviter: Some([9u8; 32]),
                state: ApplicationState::Applied,
            };
            simulate_verify_application(&mut task, &mut app, true);
            let result = simulate_withdraw(&mut task, &mut app, &config, &mut pool, &mut payouts, true);
            prop_assert!(result.is_success(), "taker {} failed: {:?}", i, result);
        }

        prop_assert_eq!(task.withdrawn_num, taker_num);
        prop_assert_eq!(pool.balance, task.escrowed - task.distributed);
        // Escrow reserves the full task amount per slot but each taker is paid
        // one share, so all but one share's worth of principal stays locked.
        prop_assert_eq!(
            pool.balance,
            task_amount * (taker_num - 1) + task_amount % taker_num
        );
        prop_assert_eq!(payouts.total(), task.distributed);
    }

    /// A second withdraw always fails
    #[test]
    fn fuzz_double_withdraw(input in any::<WithdrawInput>()) {
        let mut pool = SimulatedPool::default();
        let mut task = funded_task(&input, &mut pool);
        let config = SimulatedConfig { fee_ratio: input.fee_ratio };
        let mut payouts = SimulatedPayouts::default();
        let mut app = SimulatedApplication {
            inviter: input.inviter,
            ..Default::default()
        };
        simulate_verify_application(&mut task, &mut app, true);

        let (first, second) =
            simulate_double_withdraw(&mut task, &mut app, &config, &mut pool, &mut payouts);

        prop_assert!(first.is_success());
        prop_assert!(second.is_error());
        prop_assert_eq!(task.withdrawn_num, 1);
    }
}
