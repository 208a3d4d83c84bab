//! Fuzz testing scenarios that simulate instruction execution
//!
//! These scenarios mirror the handler checks without the Solana runtime.
//! State transitions and settlement math come straight from the program
//! crate so the simulation cannot drift from the on-chain rules.

use task_trader::instructions::settlement_helpers::{
    calculate_amount_per_task, calculate_escrow_amount, calculate_settlement,
};
use task_trader::state::{AcceptanceFlow, ApplicationState, SlotChange, TaskState};

use crate::arbitrary::{LifecycleOp, MAX_APPLICANTS};
use crate::invariants::*;

/// Simulated task state for testing
#[derive(Debug, Clone, Default)]
pub struct SimulatedTask {
    pub task_id: u64,
    pub task_amount: u64,
    pub taker_num: u64,
    pub amount_per_task: u64,
    pub rewards: u64,
    pub approved_num: u64,
    pub withdrawn_num: u64,
    pub escrowed: u64,
    pub distributed: u64,
    pub state: TaskState,
    pub acceptance_flow: AcceptanceFlow,
}

/// Simulated application state for testing
#[derive(Debug, Clone, Default)]
pub struct SimulatedApplication {
    pub applicant: [u8; 32],
    pub inviter: Option<[u8; 32]>,
    pub state: ApplicationState,
}

/// Pool token balance for a single mint
#[derive(Debug, Clone, Default)]
pub struct SimulatedPool {
    pub balance: u64,
}

/// Tokens received by each settlement party
#[derive(Debug, Clone, Default)]
pub struct SimulatedPayouts {
    pub applicants: u64,
    pub fee_receiver: u64,
    pub inviters: u64,
}

impl SimulatedPayouts {
    pub fn total(&self) -> u64 {
        self.applicants
            .saturating_add(self.fee_receiver)
            .saturating_add(self.inviters)
    }
}

/// Simulated admin configuration
#[derive(Debug, Clone)]
pub struct SimulatedConfig {
    pub fee_ratio: u64,
}

impl Default for SimulatedConfig {
    fn default() -> Self {
        Self { fee_ratio: 1 }
    }
}

/// Result of a simulated instruction execution
#[derive(Debug, Clone)]
pub enum SimulationResult {
    Success,
    Error(String),
    InvariantViolation(String),
}

impl SimulationResult {
    pub fn is_success(&self) -> bool {
        matches!(self, SimulationResult::Success)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, SimulationResult::Error(_))
    }

    pub fn is_invariant_violation(&self) -> bool {
        matches!(self, SimulationResult::InvariantViolation(_))
    }
}

fn error(name: &str) -> SimulationResult {
    SimulationResult::Error(name.to_string())
}

// ============================================================================
// Task Simulation
// ============================================================================

/// Simulate create_task. `task` carries the requested amounts; derived
/// fields are filled in on success.
pub fn simulate_create_task(
    task: &mut SimulatedTask,
    requester_balance: &mut u64,
    pool: &mut SimulatedPool,
) -> SimulationResult {
    if task.task_amount == 0 || task.taker_num == 0 {
        return error("InvalidAmount");
    }

    let escrowed = match calculate_escrow_amount(task.task_amount, task.rewards, task.taker_num) {
        Some(v) => v,
        None => return error("ArithmeticOverflow"),
    };
    let amount_per_task = match calculate_amount_per_task(task.task_amount, task.taker_num) {
        Some(v) => v,
        None => return error("ArithmeticOverflow"),
    };

    if *requester_balance < escrowed {
        return error("InsufficientFunds");
    }
    let new_pool = match pool.balance.checked_add(escrowed) {
        Some(v) => v,
        None => return error("Overflow"),
    };

    *requester_balance -= escrowed;
    pool.balance = new_pool;

    task.amount_per_task = amount_per_task;
    task.escrowed = escrowed;
    task.distributed = 0;
    task.approved_num = 0;
    task.withdrawn_num = 0;
    task.state = TaskState::Open;

    // Payouts for every taker must fit the escrow.
    if let Some(s) = calculate_settlement(amount_per_task, 1000, task.rewards, true) {
        if let Some(per_taker) = s.total() {
            if per_taker.checked_mul(task.taker_num).map_or(true, |t| t > escrowed) {
                return SimulationResult::InvariantViolation(format!(
                    "Escrow {} cannot cover {} takers at {}",
                    escrowed, task.taker_num, per_taker
                ));
            }
        }
    }

    SimulationResult::Success
}

/// Simulate open_task / close_task (idempotent)
pub fn simulate_set_task_state(task: &mut SimulatedTask, new_state: TaskState) -> SimulationResult {
    task.state = new_state;
    SimulationResult::Success
}

// ============================================================================
// Application Simulation
// ============================================================================

/// Simulate apply_task. `slot` is `None` until the application PDA exists.
pub fn simulate_apply_task(
    task: &SimulatedTask,
    slot: &mut Option<SimulatedApplication>,
    applicant: [u8; 32],
    inviter: Option<[u8; 32]>,
) -> SimulationResult {
    if slot.is_some() {
        return error("AccountAlreadyInUse");
    }
    if task.state != TaskState::Open {
        return error("InvalidTaskState");
    }
    if task.approved_num >= task.taker_num {
        return error("TakerNumExceeded");
    }
    if inviter == Some(applicant) {
        return error("InvalidInviter");
    }

    *slot = Some(SimulatedApplication {
        applicant,
        inviter,
        state: ApplicationState::Applied,
    });
    SimulationResult::Success
}

/// Simulate approve_application
pub fn simulate_approve_application(
    task: &mut SimulatedTask,
    application: &mut SimulatedApplication,
) -> SimulationResult {
    if application.state != ApplicationState::Applied {
        return error("InvalidApplicationState");
    }
    if task.approved_num >= task.taker_num {
        return error("TakerNumExceeded");
    }

    task.approved_num += 1;
    application.state = ApplicationState::Accepted;

    if let QuotaInvariantResult::ApprovedExceedsTakers { approved, taker_num } =
        check_approved_within_quota(task.approved_num, task.taker_num)
    {
        return SimulationResult::InvariantViolation(format!(
            "approved_num {} > taker_num {}",
            approved, taker_num
        ));
    }

    SimulationResult::Success
}

/// Simulate reject_application
pub fn simulate_reject_application(application: &mut SimulatedApplication) -> SimulationResult {
    if !application.state.can_transition_to(ApplicationState::Rejected) {
        return error("InvalidApplicationState");
    }
    application.state = ApplicationState::Rejected;
    SimulationResult::Success
}

/// Simulate submit_acceptance
pub fn simulate_submit_acceptance(application: &mut SimulatedApplication) -> SimulationResult {
    if !application.state.can_submit_acceptance() {
        return error("InvalidApplicationState");
    }
    application.state = ApplicationState::WaitingForAcceptance;
    SimulationResult::Success
}

/// Simulate verify_task_application
pub fn simulate_verify_application(
    task: &mut SimulatedTask,
    application: &mut SimulatedApplication,
    is_accepted: bool,
) -> SimulationResult {
    let (new_state, slot_change) = match application
        .state
        .verify(task.acceptance_flow, is_accepted)
    {
        Some(outcome) => outcome,
        None => return error("InvalidApplicationState"),
    };

    match slot_change {
        SlotChange::Claim => {
            if task.approved_num >= task.taker_num {
                return error("TakerNumExceeded");
            }
            task.approved_num += 1;
        }
        SlotChange::Release => match task.approved_num.checked_sub(1) {
            Some(v) => task.approved_num = v,
            None => {
                return SimulationResult::InvariantViolation(
                    "Slot released with approved_num == 0".to_string(),
                )
            }
        },
        SlotChange::Keep => {}
    }

    let old_state = application.state;
    application.state = new_state;

    if let ApplicationInvariantResult::InvalidStateTransition { from, to } =
        check_application_transition(old_state, new_state)
    {
        return SimulationResult::InvariantViolation(format!(
            "verify produced invalid transition {} -> {}",
            from, to
        ));
    }

    SimulationResult::Success
}

/// Simulate withdraw. The inviter token account, when supplied, is owned by
/// the recorded inviter.
pub fn simulate_withdraw(
    task: &mut SimulatedTask,
    application: &mut SimulatedApplication,
    config: &SimulatedConfig,
    pool: &mut SimulatedPool,
    payouts: &mut SimulatedPayouts,
    inviter_account_supplied: bool,
) -> SimulationResult {
    if application.state != ApplicationState::AcceptedByAcceptance {
        return error("InvalidApplicationState");
    }

    let pay_inviter = application.inviter.is_some() && inviter_account_supplied;
    let settlement = match calculate_settlement(
        task.amount_per_task,
        config.fee_ratio,
        task.rewards,
        pay_inviter,
    ) {
        Some(s) => s,
        None => return error("ArithmeticOverflow"),
    };

    let split_check =
        check_settlement_split(task.amount_per_task, config.fee_ratio, task.rewards, &settlement);
    if split_check != SettlementInvariantResult::Valid {
        return SimulationResult::InvariantViolation(format!("{:?}", split_check));
    }

    let total = match settlement.total() {
        Some(t) => t,
        None => return error("ArithmeticOverflow"),
    };
    let remaining = match task.escrowed.checked_sub(task.distributed) {
        Some(r) => r,
        None => return error("InsufficientEscrowBalance"),
    };
    if total > remaining {
        return error("InsufficientEscrowBalance");
    }
    if pool.balance < total {
        return SimulationResult::InvariantViolation(format!(
            "Pool balance {} below payout {}",
            pool.balance, total
        ));
    }

    let old_distributed = task.distributed;
    pool.balance -= total;
    task.distributed += total;
    task.withdrawn_num += 1;
    payouts.applicants += settlement.applicant_amount;
    payouts.fee_receiver += settlement.fee_amount;
    payouts.inviters += settlement.inviter_amount;
    application.state = ApplicationState::Withdrawed;

    if let EscrowInvariantResult::MonotonicityViolation { .. } =
        check_monotonic_distribution(old_distributed, task.distributed)
    {
        return SimulationResult::InvariantViolation("distributed decreased".to_string());
    }
    if let QuotaInvariantResult::WithdrawnExceedsApproved { withdrawn, approved } =
        check_withdrawn_within_approved(task.withdrawn_num, task.approved_num)
    {
        return SimulationResult::InvariantViolation(format!(
            "withdrawn_num {} > approved_num {}",
            withdrawn, approved
        ));
    }

    SimulationResult::Success
}

// ============================================================================
// Race Condition Scenarios
// ============================================================================

/// Approve every application in the given order against the same task.
/// The runtime serializes writes to the task, so this is the worst case.
pub fn simulate_concurrent_approvals(
    task: &mut SimulatedTask,
    applications: &mut [SimulatedApplication],
) -> Vec<SimulationResult> {
    let mut results = Vec::new();

    for application in applications.iter_mut() {
        results.push(simulate_approve_application(task, application));
    }

    if task.approved_num > task.taker_num {
        results.push(SimulationResult::InvariantViolation(format!(
            "Race condition: approved_num {} > taker_num {}",
            task.approved_num, task.taker_num
        )));
    }

    results
}

/// Test double withdraw attempt
pub fn simulate_double_withdraw(
    task: &mut SimulatedTask,
    application: &mut SimulatedApplication,
    config: &SimulatedConfig,
    pool: &mut SimulatedPool,
    payouts: &mut SimulatedPayouts,
) -> (SimulationResult, SimulationResult) {
    let first = simulate_withdraw(task, application, config, pool, payouts, true);
    let second = simulate_withdraw(task, application, config, pool, payouts, true);
    (first, second)
}

// ============================================================================
// Lifecycle Scenario
// ============================================================================

/// Applicant identity for a lifecycle index
pub fn applicant_id(index: usize) -> [u8; 32] {
    [index as u8 + 1; 32]
}

/// Inviter identity for a lifecycle index
pub fn inviter_id(index: usize) -> [u8; 32] {
    [index as u8 + 101; 32]
}

/// Run a sequence of operations against one funded task and check the
/// global invariants after every step.
pub fn simulate_lifecycle(
    task: &mut SimulatedTask,
    applications: &mut [Option<SimulatedApplication>; MAX_APPLICANTS],
    ops: &[LifecycleOp],
    config: &SimulatedConfig,
    pool: &mut SimulatedPool,
    payouts: &mut SimulatedPayouts,
) -> Vec<SimulationResult> {
    let mut results = Vec::with_capacity(ops.len());

    for op in ops {
        let before: Vec<Option<ApplicationState>> = applications
            .iter()
            .map(|a| a.as_ref().map(|a| a.state))
            .collect();

        let result = match *op {
            LifecycleOp::Apply {
                applicant,
                with_inviter,
            } => {
                let inviter = with_inviter.then(|| inviter_id(applicant));
                simulate_apply_task(task, &mut applications[applicant], applicant_id(applicant), inviter)
            }
            LifecycleOp::Approve { applicant } => match applications[applicant].as_mut() {
                Some(app) => simulate_approve_application(task, app),
                None => error("AccountNotInitialized"),
            },
            LifecycleOp::Reject { applicant } => match applications[applicant].as_mut() {
                Some(app) => simulate_reject_application(app),
                None => error("AccountNotInitialized"),
            },
            LifecycleOp::Submit { applicant } => match applications[applicant].as_mut() {
                Some(app) => simulate_submit_acceptance(app),
                None => error("AccountNotInitialized"),
            },
            LifecycleOp::Verify {
                applicant,
                is_accepted,
            } => match applications[applicant].as_mut() {
                Some(app) => simulate_verify_application(task, app, is_accepted),
                None => error("AccountNotInitialized"),
            },
            LifecycleOp::Withdraw {
                applicant,
                inviter_account_supplied,
            } => match applications[applicant].as_mut() {
                Some(app) => {
                    simulate_withdraw(task, app, config, pool, payouts, inviter_account_supplied)
                }
                None => error("AccountNotInitialized"),
            },
            LifecycleOp::CloseTask => simulate_set_task_state(task, TaskState::Close),
            LifecycleOp::OpenTask => simulate_set_task_state(task, TaskState::Open),
        };
        results.push(result);

        for (old, new) in before.iter().zip(applications.iter()) {
            if let (Some(old), Some(new)) = (old, new.as_ref()) {
                let check = check_application_transition(*old, new.state);
                if check != ApplicationInvariantResult::Valid {
                    results.push(SimulationResult::InvariantViolation(format!("{:?}", check)));
                }
            }
        }

        let states: Vec<ApplicationState> =
            applications.iter().flatten().map(|a| a.state).collect();
        for check in [
            check_approved_within_quota(task.approved_num, task.taker_num),
            check_withdrawn_within_approved(task.withdrawn_num, task.approved_num),
            check_slot_accounting(task.approved_num, &states),
        ] {
            if check != QuotaInvariantResult::Valid {
                results.push(SimulationResult::InvariantViolation(format!("{:?}", check)));
            }
        }

        let escrow_check = check_pool_conservation(task.escrowed, task.distributed, pool.balance);
        if escrow_check != EscrowInvariantResult::Valid {
            results.push(SimulationResult::InvariantViolation(format!("{:?}", escrow_check)));
        }
        if payouts.total() != task.distributed {
            results.push(SimulationResult::InvariantViolation(format!(
                "Payouts {} differ from distributed {}",
                payouts.total(),
                task.distributed
            )));
        }
    }

    results
}
