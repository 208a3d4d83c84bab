//! In-process harness for Task Trader instruction tests
//!
//! Runs the program natively inside `solana-program-test` with the SPL token
//! and associated token programs loaded alongside it.

#![allow(dead_code)]

use anchor_lang::prelude::Pubkey;
use anchor_lang::solana_program::account_info::AccountInfo;
use anchor_lang::solana_program::entrypoint::ProgramResult;
use anchor_lang::solana_program::instruction::Instruction;
use solana_sdk::instruction::InstructionError;
use anchor_lang::{AccountDeserialize, InstructionData, ToAccountMetas};
use anchor_spl::associated_token::get_associated_token_address;
use anchor_spl::token::{spl_token, TokenAccount};
use solana_program_test::{processor, BanksClientError, ProgramTest, ProgramTestContext};
use solana_sdk::signature::{Keypair, Signer};
use solana_sdk::system_instruction;
use solana_sdk::transaction::{Transaction, TransactionError};

use task_trader::errors::TaskTraderError;
use task_trader::state::{AcceptanceFlow, Admin, TaskApplication, TaskInfo};

const MINT_LEN: u64 = 82;
const TOKEN_ACCOUNT_LEN: u64 = 165;
const FUNDING_LAMPORTS: u64 = 1_000_000_000;

fn process_instruction(program_id: &Pubkey, accounts: &[AccountInfo], data: &[u8]) -> ProgramResult {
    let accounts = Box::leak(Box::new(accounts.to_vec()));
    task_trader::entry(program_id, accounts, data)
}

pub fn admin_pda() -> Pubkey {
    Pubkey::find_program_address(&[b"admin"], &task_trader::ID).0
}

pub fn support_coin_pda() -> Pubkey {
    Pubkey::find_program_address(&[b"support_coin"], &task_trader::ID).0
}

pub fn task_pda(task_id: u64) -> Pubkey {
    Pubkey::find_program_address(&[b"task_info", task_id.to_le_bytes().as_ref()], &task_trader::ID).0
}

pub fn application_pda(task_id: u64, applicant: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(
        &[b"task_application", task_pda(task_id).as_ref(), applicant.as_ref()],
        &task_trader::ID,
    )
    .0
}

pub fn pool_authority_pda() -> Pubkey {
    Pubkey::find_program_address(&[b"pool_authority"], &task_trader::ID).0
}

pub fn pool_token_account(mint: &Pubkey) -> Pubkey {
    get_associated_token_address(&pool_authority_pda(), mint)
}

fn program_ix(accounts: impl ToAccountMetas, data: impl InstructionData) -> Instruction {
    Instruction {
        program_id: task_trader::ID,
        accounts: accounts.to_account_metas(None),
        data: data.data(),
    }
}

/// Assert that a transaction failed with the given program error.
pub fn assert_task_error(result: Result<(), BanksClientError>, expected: TaskTraderError) {
    let expected_code = anchor_lang::error::ERROR_CODE_OFFSET + expected as u32;
    match result {
        Err(BanksClientError::TransactionError(TransactionError::InstructionError(
            _,
            InstructionError::Custom(code),
        ))) => assert_eq!(code, expected_code, "unexpected error code"),
        other => panic!("expected custom error {}, got {:?}", expected_code, other),
    }
}

/// Parameters of a task created through the harness
#[derive(Debug, Clone, Copy)]
pub struct TaskParams {
    pub task_id: u64,
    pub task_amount: u64,
    pub taker_num: u64,
    pub rewards: u64,
}

impl TaskParams {
    pub fn escrow(&self) -> u64 {
        (self.task_amount + self.rewards) * self.taker_num
    }
}

pub struct TaskTraderTest {
    pub ctx: ProgramTestContext,
    pub admin_signer: Keypair,
    pub fee_receiver: Keypair,
    /// Allowlisted funding mint; the context payer is its mint authority
    pub mint: Pubkey,
}

impl TaskTraderTest {
    /// Start the program, initialize the admin record and allowlist one mint.
    pub async fn start(fee_ratio: u64) -> Self {
        let mut program_test =
            ProgramTest::new("task_trader", task_trader::ID, processor!(process_instruction));
        program_test.prefer_bpf(false);
        let ctx = program_test.start_with_context().await;

        let mut test = TaskTraderTest {
            ctx,
            admin_signer: Keypair::new(),
            fee_receiver: Keypair::new(),
            mint: Pubkey::default(),
        };
        let admin_signer = test.admin_signer.pubkey();
        test.fund(&admin_signer).await;
        test.mint = test.create_mint().await;

        let fee_receiver = test.fee_receiver.pubkey();
        let payer = test.ctx.payer.pubkey();
        test.send(&[test.initialize_ix(&payer, admin_signer, fee_receiver, fee_ratio)], &[])
            .await
            .unwrap();
        let mint = test.mint;
        let signer = test.admin_signer.insecure_clone();
        test.send(&[test.update_support_coin_ix(&signer.pubkey(), vec![mint])], &[&signer])
            .await
            .unwrap();
        test
    }

    /// Submit `ixs` paid by the context payer and signed by `signers`.
    pub async fn send(
        &mut self,
        ixs: &[Instruction],
        signers: &[&Keypair],
    ) -> Result<(), BanksClientError> {
        let mut all: Vec<&Keypair> = vec![&self.ctx.payer];
        all.extend_from_slice(signers);
        let tx = Transaction::new_signed_with_payer(
            ixs,
            Some(&self.ctx.payer.pubkey()),
            &all,
            self.ctx.last_blockhash,
        );
        self.ctx.banks_client.process_transaction(tx).await
    }

    /// Move to a fresh blockhash so a repeated instruction is not deduplicated.
    pub async fn refresh_blockhash(&mut self) {
        self.ctx.last_blockhash = self.ctx.get_new_latest_blockhash().await.unwrap();
    }

    pub async fn fund(&mut self, to: &Pubkey) {
        let ix = system_instruction::transfer(&self.ctx.payer.pubkey(), to, FUNDING_LAMPORTS);
        self.send(&[ix], &[]).await.unwrap();
    }

    pub async fn funded_keypair(&mut self) -> Keypair {
        let keypair = Keypair::new();
        self.fund(&keypair.pubkey()).await;
        keypair
    }

    pub async fn create_mint(&mut self) -> Pubkey {
        let mint = Keypair::new();
        let payer = self.ctx.payer.pubkey();
        let rent = self.ctx.banks_client.get_rent().await.unwrap();
        let ixs = [
            system_instruction::create_account(
                &payer,
                &mint.pubkey(),
                rent.minimum_balance(MINT_LEN as usize),
                MINT_LEN,
                &spl_token::ID,
            ),
            spl_token::instruction::initialize_mint2(&spl_token::ID, &mint.pubkey(), &payer, None, 0)
                .unwrap(),
        ];
        self.send(&ixs, &[&mint]).await.unwrap();
        mint.pubkey()
    }

    pub async fn create_token_account(&mut self, mint: &Pubkey, owner: &Pubkey) -> Pubkey {
        let account = Keypair::new();
        let payer = self.ctx.payer.pubkey();
        let rent = self.ctx.banks_client.get_rent().await.unwrap();
        let ixs = [
            system_instruction::create_account(
                &payer,
                &account.pubkey(),
                rent.minimum_balance(TOKEN_ACCOUNT_LEN as usize),
                TOKEN_ACCOUNT_LEN,
                &spl_token::ID,
            ),
            spl_token::instruction::initialize_account3(&spl_token::ID, &account.pubkey(), mint, owner)
                .unwrap(),
        ];
        self.send(&ixs, &[&account]).await.unwrap();
        account.pubkey()
    }

    pub async fn mint_tokens(&mut self, mint: &Pubkey, account: &Pubkey, amount: u64) {
        let payer = self.ctx.payer.pubkey();
        let ix = spl_token::instruction::mint_to(&spl_token::ID, mint, account, &payer, &[], amount)
            .unwrap();
        self.send(&[ix], &[]).await.unwrap();
    }

    pub async fn token_balance(&mut self, account: &Pubkey) -> u64 {
        let account = self
            .ctx
            .banks_client
            .get_account(*account)
            .await
            .unwrap()
            .expect("token account missing");
        TokenAccount::try_deserialize(&mut account.data.as_slice())
            .unwrap()
            .amount
    }

    async fn fetch<T: AccountDeserialize>(&mut self, address: Pubkey) -> T {
        let account = self
            .ctx
            .banks_client
            .get_account(address)
            .await
            .unwrap()
            .expect("account missing");
        T::try_deserialize(&mut account.data.as_slice()).unwrap()
    }

    pub async fn admin(&mut self) -> Admin {
        self.fetch(admin_pda()).await
    }

    pub async fn task(&mut self, task_id: u64) -> TaskInfo {
        self.fetch(task_pda(task_id)).await
    }

    pub async fn application(&mut self, task_id: u64, applicant: &Pubkey) -> TaskApplication {
        self.fetch(application_pda(task_id, applicant)).await
    }

    /// Fund `requester` with exactly the task's escrow and create the task.
    /// Returns the requester's token account.
    pub async fn create_funded_task(&mut self, requester: &Keypair, params: TaskParams) -> Pubkey {
        let mint = self.mint;
        let source = self.create_token_account(&mint, &requester.pubkey()).await;
        self.mint_tokens(&mint, &source, params.escrow()).await;
        let ix = self.create_task_ix(&requester.pubkey(), &mint, &source, mint, params);
        self.send(&[ix], &[requester]).await.unwrap();
        source
    }

    // ------------------------------------------------------------------
    // Instruction builders
    // ------------------------------------------------------------------

    pub fn initialize_ix(
        &self,
        payer: &Pubkey,
        signer: Pubkey,
        fee_receiver: Pubkey,
        fee_ratio: u64,
    ) -> Instruction {
        program_ix(
            task_trader::accounts::Initialize {
                admin: admin_pda(),
                payer: *payer,
                system_program: anchor_lang::system_program::ID,
            },
            task_trader::instruction::Initialize {
                signer,
                fee_receiver,
                fee_ratio,
            },
        )
    }

    pub fn update_admin_ix(
        &self,
        authority: &Pubkey,
        signer: Pubkey,
        fee_receiver: Pubkey,
        fee_ratio: u64,
    ) -> Instruction {
        program_ix(
            task_trader::accounts::UpdateAdmin {
                admin: admin_pda(),
                authority: *authority,
            },
            task_trader::instruction::UpdateAdmin {
                signer,
                fee_receiver,
                fee_ratio,
            },
        )
    }

    pub fn update_acceptance_flow_ix(&self, authority: &Pubkey, flow: AcceptanceFlow) -> Instruction {
        program_ix(
            task_trader::accounts::UpdateAcceptanceFlow {
                admin: admin_pda(),
                authority: *authority,
            },
            task_trader::instruction::UpdateAcceptanceFlow {
                acceptance_flow: flow,
            },
        )
    }

    pub fn update_support_coin_ix(&self, authority: &Pubkey, coin_mints: Vec<Pubkey>) -> Instruction {
        program_ix(
            task_trader::accounts::UpdateTaskSupportCoin {
                admin: admin_pda(),
                support_coin: support_coin_pda(),
                authority: *authority,
                system_program: anchor_lang::system_program::ID,
            },
            task_trader::instruction::UpdateTaskSupportCoin { coin_mints },
        )
    }

    pub fn create_task_ix(
        &self,
        requester: &Pubkey,
        mint: &Pubkey,
        requester_token_account: &Pubkey,
        coin_mint: Pubkey,
        params: TaskParams,
    ) -> Instruction {
        program_ix(
            task_trader::accounts::CreateTask {
                admin: admin_pda(),
                support_coin: support_coin_pda(),
                task_info: task_pda(params.task_id),
                mint: *mint,
                requester: *requester,
                requester_token_account: *requester_token_account,
                pool_authority: pool_authority_pda(),
                pool_token_account: pool_token_account(mint),
                token_program: spl_token::ID,
                associated_token_program: anchor_spl::associated_token::ID,
                system_program: anchor_lang::system_program::ID,
            },
            task_trader::instruction::CreateTask {
                task_id: params.task_id,
                task_amount: params.task_amount,
                taker_num: params.taker_num,
                coin_mint,
                rewards: params.rewards,
                expire_time: 0,
            },
        )
    }

    pub fn apply_task_ix(&self, task_id: u64, applicant: &Pubkey, inviter: Option<Pubkey>) -> Instruction {
        program_ix(
            task_trader::accounts::ApplyTask {
                task_info: task_pda(task_id),
                task_application: application_pda(task_id, applicant),
                applicant: *applicant,
                system_program: anchor_lang::system_program::ID,
            },
            task_trader::instruction::ApplyTask { inviter },
        )
    }

    pub fn approve_ix(&self, task_id: u64, applicant: &Pubkey, requester: &Pubkey) -> Instruction {
        program_ix(
            task_trader::accounts::ApproveApplication {
                task_info: task_pda(task_id),
                task_application: application_pda(task_id, applicant),
                requester: *requester,
            },
            task_trader::instruction::ApproveApplication {},
        )
    }

    pub fn submit_ix(&self, task_id: u64, application_of: &Pubkey, signer: &Pubkey) -> Instruction {
        program_ix(
            task_trader::accounts::SubmitAcceptance {
                task_info: task_pda(task_id),
                task_application: application_pda(task_id, application_of),
                applicant: *signer,
            },
            task_trader::instruction::SubmitAcceptance {},
        )
    }

    pub fn verify_ix(
        &self,
        task_id: u64,
        applicant: &Pubkey,
        requester: &Pubkey,
        is_accepted: bool,
    ) -> Instruction {
        program_ix(
            task_trader::accounts::VerifyTaskApplication {
                task_info: task_pda(task_id),
                task_application: application_pda(task_id, applicant),
                requester: *requester,
            },
            task_trader::instruction::VerifyTaskApplication { is_accepted },
        )
    }

    pub fn close_task_ix(&self, task_id: u64, authority: &Pubkey) -> Instruction {
        program_ix(
            task_trader::accounts::SetTaskState {
                admin: admin_pda(),
                task_info: task_pda(task_id),
                authority: *authority,
            },
            task_trader::instruction::CloseTask {},
        )
    }

    pub fn open_task_ix(&self, task_id: u64, authority: &Pubkey) -> Instruction {
        program_ix(
            task_trader::accounts::SetTaskState {
                admin: admin_pda(),
                task_info: task_pda(task_id),
                authority: *authority,
            },
            task_trader::instruction::OpenTask {},
        )
    }

    pub fn withdraw_ix(
        &self,
        task_id: u64,
        applicant: &Pubkey,
        fee_receiver_token_account: &Pubkey,
        inviter_token_account: Option<Pubkey>,
    ) -> Instruction {
        let mint = self.mint;
        program_ix(
            task_trader::accounts::Withdraw {
                admin: admin_pda(),
                task_info: task_pda(task_id),
                task_application: application_pda(task_id, applicant),
                applicant: *applicant,
                mint,
                pool_authority: pool_authority_pda(),
                pool_token_account: pool_token_account(&mint),
                applicant_token_account: get_associated_token_address(applicant, &mint),
                fee_receiver_token_account: *fee_receiver_token_account,
                inviter_token_account,
                token_program: spl_token::ID,
                associated_token_program: anchor_spl::associated_token::ID,
                system_program: anchor_lang::system_program::ID,
            },
            task_trader::instruction::Withdraw {},
        )
    }
}
