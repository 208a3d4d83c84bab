//! Fuzz test runner for the Task Trader program
//!
//! Run with: cargo run --release
//! Or: cargo test (for property-based tests)

use proptest::prelude::*;
use std::time::Instant;
use task_trader_fuzz::*;

fn main() {
    println!("=== Task Trader Fuzz Testing ===\n");

    let start = Instant::now();
    let mut total_tests = 0;
    let mut passed = 0;
    let mut failed = 0;

    println!("Running create_task fuzz tests...");
    let (p, f) = run_create_task_fuzz(200);
    passed += p;
    failed += f;
    total_tests += p + f;

    println!("Running withdraw fuzz tests...");
    let (p, f) = run_withdraw_fuzz(200);
    passed += p;
    failed += f;
    total_tests += p + f;

    println!("Running lifecycle fuzz tests...");
    let (p, f) = run_lifecycle_fuzz(200);
    passed += p;
    failed += f;
    total_tests += p + f;

    println!("Running edge case tests...");
    let (p, f) = run_edge_case_tests();
    passed += p;
    failed += f;
    total_tests += p + f;

    println!("Running race condition tests...");
    let (p, f) = run_race_condition_tests(50);
    passed += p;
    failed += f;
    total_tests += p + f;

    let duration = start.elapsed();

    println!("\n=== Fuzz Testing Complete ===");
    println!("Total tests: {}", total_tests);
    println!("Passed: {}", passed);
    println!("Failed: {}", failed);
    println!("Duration: {:?}", duration);

    if failed > 0 {
        std::process::exit(1);
    }
}

fn run_create_task_fuzz(iterations: usize) -> (usize, usize) {
    let mut passed = 0;
    let mut failed = 0;

    let mut runner = proptest::test_runner::TestRunner::default();

    for i in 0..iterations {
        let input = any::<CreateTaskInput>()
            .new_tree(&mut runner)
            .expect("Failed to generate CreateTaskInput")
            .current();

        let mut task = SimulatedTask {
            task_amount: input.task_amount,
            taker_num: input.taker_num,
            rewards: input.rewards,
            acceptance_flow: input.acceptance_flow,
            ..Default::default()
        };
        let mut balance = input.requester_balance;
        let mut pool = SimulatedPool::default();

        let result = simulate_create_task(&mut task, &mut balance, &mut pool);

        let conserved = balance.checked_add(pool.balance) == Some(input.requester_balance);
        if result.is_invariant_violation() || !conserved {
            println!("  [FAIL] Iteration {}: {:?}", i, result);
            failed += 1;
        } else {
            passed += 1;
        }
    }

    println!("  create_task: {} passed, {} failed", passed, failed);
    (passed, failed)
}

fn run_withdraw_fuzz(iterations: usize) -> (usize, usize) {
    let mut passed = 0;
    let mut failed = 0;

    let mut runner = proptest::test_runner::TestRunner::default();

    for i in 0..iterations {
        let input = any::<WithdrawInput>()
            .new_tree(&mut runner)
            .expect("Failed to generate WithdrawInput")
            .current();

        let mut task = SimulatedTask {
            task_amount: input.task_amount,
            taker_num: input.taker_num,
            rewards: input.rewards,
            acceptance_flow: AcceptanceFlow::DirectVerify,
            ..Default::default()
        };
        let mut balance = u64::MAX;
        let mut pool = SimulatedPool::default();
        simulate_create_task(&mut task, &mut balance, &mut pool);

        let config = SimulatedConfig {
            fee_ratio: input.fee_ratio,
        };
        let mut payouts = SimulatedPayouts::default();
        let mut app = SimulatedApplication {
            inviter: input.inviter,
            ..Default::default()
        };
        simulate_verify_application(&mut task, &mut app, true);

        let result = simulate_withdraw(
            &mut task,
            &mut app,
            &config,
            &mut pool,
            &mut payouts,
            input.inviter_account_supplied,
        );

        if !result.is_success() || pool.balance + task.distributed != task.escrowed {
            println!("  [FAIL] Iteration {}: {:?}", i, result);
            failed += 1;
        } else {
            passed += 1;
        }
    }

    println!("  withdraw: {} passed, {} failed", passed, failed);
    (passed, failed)
}

fn run_lifecycle_fuzz(iterations: usize) -> (usize, usize) {
    let mut passed = 0;
    let mut failed = 0;

    let mut runner = proptest::test_runner::TestRunner::default();

    for i in 0..iterations {
        let input = any::<LifecycleInput>()
            .new_tree(&mut runner)
            .expect("Failed to generate LifecycleInput")
            .current();

        let mut task = SimulatedTask {
            task_amount: input.task_amount,
            taker_num: input.taker_num,
            rewards: input.rewards,
            acceptance_flow: input.acceptance_flow,
            ..Default::default()
        };
        let mut balance = u64::MAX;
        let mut pool = SimulatedPool::default();
        simulate_create_task(&mut task, &mut balance, &mut pool);

        let config = SimulatedConfig {
            fee_ratio: input.fee_ratio,
        };
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

        if let Some(violation) = results.iter().find(|r| r.is_invariant_violation()) {
            println!("  [FAIL] Iteration {}: {:?}", i, violation);
            failed += 1;
        } else {
            passed += 1;
        }
    }

    println!("  lifecycle: {} passed, {} failed", passed, failed);
    (passed, failed)
}

fn run_edge_case_tests() -> (usize, usize) {
    let mut passed = 0;
    let mut failed = 0;

    // Escrow overflow must be rejected, not wrapped
    {
        let mut task = SimulatedTask {
            task_amount: u64::MAX,
            taker_num: 2,
            ..Default::default()
        };
        let mut balance = u64::MAX;
        let mut pool = SimulatedPool::default();
        let result = simulate_create_task(&mut task, &mut balance, &mut pool);

        if result.is_error() && pool.balance == 0 {
            passed += 1;
        } else {
            println!("  [FAIL] escrow overflow: {:?}", result);
            failed += 1;
        }
    }

    // 100% fee leaves the applicant nothing but still settles
    {
        let mut task = SimulatedTask {
            task_amount: 1_000,
            taker_num: 1,
            acceptance_flow: AcceptanceFlow::DirectVerify,
            ..Default::default()
        };
        let mut balance = u64::MAX;
        let mut pool = SimulatedPool::default();
        simulate_create_task(&mut task, &mut balance, &mut pool);
        let mut app = SimulatedApplication::default();
        simulate_verify_application(&mut task, &mut app, true);
        let mut payouts = SimulatedPayouts::default();
        let config = SimulatedConfig { fee_ratio: 1000 };

        let result = simulate_withdraw(&mut task, &mut app, &config, &mut pool, &mut payouts, false);

        if result.is_success() && payouts.applicants == 0 && payouts.fee_receiver == 1_000 {
            passed += 1;
        } else {
            println!("  [FAIL] full fee: {:?} {:?}", result, payouts);
            failed += 1;
        }
    }

    // Share smaller than the fee granularity pays no fee
    {
        let mut task = SimulatedTask {
            task_amount: 999,
            taker_num: 1,
            acceptance_flow: AcceptanceFlow::DirectVerify,
            ..Default::default()
        };
        let mut balance = u64::MAX;
        let mut pool = SimulatedPool::default();
        simulate_create_task(&mut task, &mut balance, &mut pool);
        let mut app = SimulatedApplication::default();
        simulate_verify_application(&mut task, &mut app, true);
        let mut payouts = SimulatedPayouts::default();
        let config = SimulatedConfig { fee_ratio: 1 };

        let result = simulate_withdraw(&mut task, &mut app, &config, &mut pool, &mut payouts, false);

        if result.is_success() && payouts.applicants == 999 && payouts.fee_receiver == 0 {
            passed += 1;
        } else {
            println!("  [FAIL] truncated fee: {:?} {:?}", result, payouts);
            failed += 1;
        }
    }

    println!("  edge_cases: {} passed, {} failed", passed, failed);
    (passed, failed)
}

fn run_race_condition_tests(iterations: usize) -> (usize, usize) {
    let mut passed = 0;
    let mut failed = 0;

    for i in 0..iterations {
        let taker_num = ((i % 5) + 1) as u64;
        let num_applicants = (i % 10) + 1;

        let mut task = SimulatedTask {
            task_amount: 1_000_000,
            taker_num,
            ..Default::default()
        };

        let mut applications: Vec<_> = (0..num_applicants)
            .map(|j| SimulatedApplication {
                applicant: [j as u8; 32],
                ..Default::default()
            })
            .collect();

        let results = simulate_concurrent_approvals(&mut task, &mut applications);

        let has_violation = results.iter().any(|r| r.is_invariant_violation());

        if has_violation || task.approved_num > task.taker_num {
            println!(
                "  [FAIL] Race condition test {}: approved={}/{}",
                i, task.approved_num, taker_num
            );
            failed += 1;
        } else {
            passed += 1;
        }
    }

    println!("  race_conditions: {} passed, {} failed", passed, failed);
    (passed, failed)
}
