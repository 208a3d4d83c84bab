//! Arbitrary input generators for fuzz testing
//!
//! Generates random but plausible inputs for the task trader instructions.

use proptest::prelude::*;
use task_trader::state::AcceptanceFlow;

/// Number of distinct applicants a lifecycle sequence can address
pub const MAX_APPLICANTS: usize = 6;

/// Arbitrary 32-byte identity
pub fn arb_id() -> impl Strategy<Value = [u8; 32]> {
    prop::array::uniform32(any::<u8>())
}

/// Arbitrary task amount with edge cases
pub fn arb_task_amount() -> impl Strategy<Value = u64> {
    prop_oneof![
        Just(0u64),
        Just(1u64),
        Just(999u64),
        Just(1000u64),
        Just(u64::MAX),
        Just(u64::MAX / 2),
        1u64..1_000_000u64,
        1_000_000u64..1_000_000_000_000u64,
    ]
}

/// Arbitrary referral reward, usually small relative to the task amount
pub fn arb_rewards() -> impl Strategy<Value = u64> {
    prop_oneof![
        Just(0u64),
        Just(1u64),
        Just(u64::MAX),
        0u64..10_000u64,
        10_000u64..1_000_000_000u64,
    ]
}

/// Arbitrary taker count
pub fn arb_taker_num() -> impl Strategy<Value = u64> {
    prop_oneof![
        Just(0u64),
        Just(1u64),
        Just(u64::MAX),
        1u64..=MAX_APPLICANTS as u64,
        1u64..1_000u64,
    ]
}

/// Arbitrary fee ratio over 1000, including out-of-range values
pub fn arb_fee_ratio() -> impl Strategy<Value = u64> {
    prop_oneof![
        Just(0u64),
        Just(1u64),
        Just(999u64),
        Just(1000u64),
        Just(1001u64),
        0u64..=1000u64,
    ]
}

/// Arbitrary fee ratio within the accepted range
pub fn arb_valid_fee_ratio() -> impl Strategy<Value = u64> {
    prop_oneof![Just(0u64), Just(1u64), Just(1000u64), 0u64..=1000u64,]
}

pub fn arb_acceptance_flow() -> impl Strategy<Value = AcceptanceFlow> {
    prop_oneof![
        Just(AcceptanceFlow::SubmitThenVerify),
        Just(AcceptanceFlow::DirectVerify),
    ]
}

/// Arbitrary requester token balance
pub fn arb_balance() -> impl Strategy<Value = u64> {
    prop_oneof![
        Just(0u64),
        Just(u64::MAX),
        0u64..1_000_000u64,
        1_000_000u64..u64::MAX,
    ]
}

/// Input for create_task fuzzing
#[derive(Debug, Clone)]
pub struct CreateTaskInput {
    pub task_amount: u64,
    pub taker_num: u64,
    pub rewards: u64,
    pub requester_balance: u64,
    pub acceptance_flow: AcceptanceFlow,
}

impl Arbitrary for CreateTaskInput {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (
            arb_task_amount(),
            arb_taker_num(),
            arb_rewards(),
            arb_balance(),
            arb_acceptance_flow(),
        )
            .prop_map(
                |(task_amount, taker_num, rewards, requester_balance, acceptance_flow)| {
                    CreateTaskInput {
                        task_amount,
                        taker_num,
                        rewards,
                        requester_balance,
                        acceptance_flow,
                    }
                },
            )
            .boxed()
    }
}

/// Input for approve_application fuzzing
#[derive(Debug, Clone)]
pub struct ApproveApplicationInput {
    pub taker_num: u64,
    pub approved_num: u64,
    pub applicants: usize,
}

impl Arbitrary for ApproveApplicationInput {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (1u64..=10u64, 0u64..=10u64, 1usize..=20usize)
            .prop_map(|(taker_num, approved_num, applicants)| ApproveApplicationInput {
                taker_num,
                approved_num: approved_num.min(taker_num),
                applicants,
            })
            .boxed()
    }
}

/// Input for withdraw fuzzing
#[derive(Debug, Clone)]
pub struct WithdrawInput {
    pub task_amount: u64,
    pub taker_num: u64,
    pub rewards: u64,
    pub fee_ratio: u64,
    pub inviter: Option<[u8; 32]>,
    pub inviter_account_supplied: bool,
    pub prior_withdrawals: u64,
}

impl Arbitrary for WithdrawInput {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (
            1u64..1_000_000_000_000u64,
            1u64..=50u64,
            arb_rewards(),
            arb_valid_fee_ratio(),
            proptest::option::of(arb_id()),
            any::<bool>(),
            0u64..50u64,
        )
            .prop_map(
                |(
                    task_amount,
                    taker_num,
                    rewards,
                    fee_ratio,
                    inviter,
                    inviter_account_supplied,
                    prior_withdrawals,
                )| {
                    WithdrawInput {
                        task_amount,
                        taker_num,
                        // Keep escrow computable so the task could have been created
                        rewards: rewards.min(1_000_000_000),
                        fee_ratio,
                        inviter,
                        inviter_account_supplied,
                        prior_withdrawals: prior_withdrawals % taker_num,
                    }
                },
            )
            .boxed()
    }
}

/// One step of an application lifecycle, addressed by applicant index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleOp {
    Apply { applicant: usize, with_inviter: bool },
    Approve { applicant: usize },
    Reject { applicant: usize },
    Submit { applicant: usize },
    Verify { applicant: usize, is_accepted: bool },
    Withdraw { applicant: usize, inviter_account_supplied: bool },
    CloseTask,
    OpenTask,
}

pub fn arb_lifecycle_op() -> impl Strategy<Value = LifecycleOp> {
    let applicant = 0usize..MAX_APPLICANTS;
    prop_oneof![
        3 => (applicant.clone(), any::<bool>())
            .prop_map(|(applicant, with_inviter)| LifecycleOp::Apply { applicant, with_inviter }),
        3 => applicant.clone().prop_map(|applicant| LifecycleOp::Approve { applicant }),
        1 => applicant.clone().prop_map(|applicant| LifecycleOp::Reject { applicant }),
        2 => applicant.clone().prop_map(|applicant| LifecycleOp::Submit { applicant }),
        3 => (applicant.clone(), any::<bool>())
            .prop_map(|(applicant, is_accepted)| LifecycleOp::Verify { applicant, is_accepted }),
        2 => (applicant, any::<bool>()).prop_map(|(applicant, inviter_account_supplied)| {
            LifecycleOp::Withdraw { applicant, inviter_account_supplied }
        }),
        1 => Just(LifecycleOp::CloseTask),
        1 => Just(LifecycleOp::OpenTask),
    ]
}

/// Input for whole-lifecycle fuzzing
#[derive(Debug, Clone)]
pub struct LifecycleInput {
    pub task_amount: u64,
    pub taker_num: u64,
    pub rewards: u64,
    pub fee_ratio: u64,
    pub acceptance_flow: AcceptanceFlow,
    pub ops: Vec<LifecycleOp>,
}

impl Arbitrary for LifecycleInput {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (
            1u64..10_000_000u64,
            1u64..=MAX_APPLICANTS as u64,
            0u64..100_000u64,
            arb_valid_fee_ratio(),
            arb_acceptance_flow(),
            prop::collection::vec(arb_lifecycle_op(), 1..64),
        )
            .prop_map(
                |(task_amount, taker_num, rewards, fee_ratio, acceptance_flow, ops)| {
                    LifecycleInput {
                        task_amount,
                        taker_num,
                        rewards,
                        fee_ratio,
                        acceptance_flow,
                        ops,
                    }
                },
            )
            .boxed()
    }
}
