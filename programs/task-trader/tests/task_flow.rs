mod common;

use common::*;
use solana_sdk::signature::Signer;
use task_trader::errors::TaskTraderError;
use task_trader::state::{ApplicationState, TaskState};

const TASK: TaskParams = TaskParams {
    task_id: 7,
    task_amount: 1000,
    taker_num: 2,
    rewards: 100,
};

#[tokio::test]
async fn test_create_task_escrows_full_amount() {
    let mut test = TaskTraderTest::start(1).await;
    let requester = test.funded_keypair().await;

    let source = test.create_funded_task(&requester, TASK).await;

    let mint = test.mint;
    assert_eq!(test.token_balance(&source).await, 0);
    assert_eq!(test.token_balance(&pool_token_account(&mint)).await, 2200);

    let task = test.task(TASK.task_id).await;
    assert_eq!(task.requester, requester.pubkey());
    assert_eq!(task.coin_mint, mint);
    assert_eq!(task.escrowed, 2200);
    assert_eq!(task.amount_per_task, 500);
    assert_eq!(task.distributed, 0);
    assert_eq!(task.state, TaskState::Open);
    assert_eq!(test.admin().await.total_tasks, 1);
}

#[tokio::test]
async fn test_create_task_rejects_mint_mismatch() {
    let mut test = TaskTraderTest::start(0).await;
    let requester = test.funded_keypair().await;
    let allowed = test.mint;
    let other = test.create_mint().await;
    let source = test.create_token_account(&other, &requester.pubkey()).await;
    test.mint_tokens(&other, &source, TASK.escrow()).await;

    // Allowlisted coin_mint argument, but the accounts carry another mint
    let ix = test.create_task_ix(&requester.pubkey(), &other, &source, allowed, TASK);
    assert_task_error(
        test.send(&[ix], &[&requester]).await,
        TaskTraderError::InvalidMint,
    );
    assert_eq!(test.token_balance(&source).await, TASK.escrow());
}

#[tokio::test]
async fn test_create_task_rejects_unsupported_coin() {
    let mut test = TaskTraderTest::start(0).await;
    let requester = test.funded_keypair().await;
    let other = test.create_mint().await;
    let source = test.create_token_account(&other, &requester.pubkey()).await;
    test.mint_tokens(&other, &source, TASK.escrow()).await;

    let ix = test.create_task_ix(&requester.pubkey(), &other, &source, other, TASK);
    assert_task_error(
        test.send(&[ix], &[&requester]).await,
        TaskTraderError::UnsupportedCoin,
    );
}

#[tokio::test]
async fn test_closed_task_rejects_applications_until_reopened() {
    let mut test = TaskTraderTest::start(0).await;
    let requester = test.funded_keypair().await;
    let applicant = test.funded_keypair().await;
    test.create_funded_task(&requester, TASK).await;

    let ix = test.close_task_ix(TASK.task_id, &requester.pubkey());
    test.send(&[ix], &[&requester]).await.unwrap();
    assert_eq!(test.task(TASK.task_id).await.state, TaskState::Close);

    let ix = test.apply_task_ix(TASK.task_id, &applicant.pubkey(), None);
    assert_task_error(
        test.send(&[ix], &[&applicant]).await,
        TaskTraderError::InvalidTaskState,
    );

    // Admin signer can reopen on the requester's behalf
    let signer = test.admin_signer.insecure_clone();
    let ix = test.open_task_ix(TASK.task_id, &signer.pubkey());
    test.send(&[ix], &[&signer]).await.unwrap();

    test.refresh_blockhash().await;
    let ix = test.apply_task_ix(TASK.task_id, &applicant.pubkey(), None);
    test.send(&[ix], &[&applicant]).await.unwrap();
    let application = test.application(TASK.task_id, &applicant.pubkey()).await;
    assert_eq!(application.state, ApplicationState::Applied);
    assert_eq!(application.inviter, None);
}

#[tokio::test]
async fn test_task_state_change_rejects_stranger() {
    let mut test = TaskTraderTest::start(0).await;
    let requester = test.funded_keypair().await;
    let stranger = test.funded_keypair().await;
    test.create_funded_task(&requester, TASK).await;

    let ix = test.close_task_ix(TASK.task_id, &stranger.pubkey());
    assert_task_error(
        test.send(&[ix], &[&stranger]).await,
        TaskTraderError::Unauthorized,
    );
    assert_eq!(test.task(TASK.task_id).await.state, TaskState::Open);
}

#[tokio::test]
async fn test_apply_rejects_self_invite() {
    let mut test = TaskTraderTest::start(0).await;
    let requester = test.funded_keypair().await;
    let applicant = test.funded_keypair().await;
    test.create_funded_task(&requester, TASK).await;

    let ix = test.apply_task_ix(TASK.task_id, &applicant.pubkey(), Some(applicant.pubkey()));
    assert_task_error(
        test.send(&[ix], &[&applicant]).await,
        TaskTraderError::InvalidInviter,
    );
}

#[tokio::test]
async fn test_only_requester_approves() {
    let mut test = TaskTraderTest::start(0).await;
    let requester = test.funded_keypair().await;
    let applicant = test.funded_keypair().await;
    let stranger = test.funded_keypair().await;
    test.create_funded_task(&requester, TASK).await;
    let ix = test.apply_task_ix(TASK.task_id, &applicant.pubkey(), None);
    test.send(&[ix], &[&applicant]).await.unwrap();

    let ix = test.approve_ix(TASK.task_id, &applicant.pubkey(), &stranger.pubkey());
    assert_task_error(
        test.send(&[ix], &[&stranger]).await,
        TaskTraderError::InvalidRequester,
    );

    let ix = test.approve_ix(TASK.task_id, &applicant.pubkey(), &requester.pubkey());
    test.send(&[ix], &[&requester]).await.unwrap();
    let application = test.application(TASK.task_id, &applicant.pubkey()).await;
    assert_eq!(application.state, ApplicationState::Accepted);
    assert_eq!(test.task(TASK.task_id).await.approved_num, 1);
}

#[tokio::test]
async fn test_only_applicant_submits() {
    let mut test = TaskTraderTest::start(0).await;
    let requester = test.funded_keypair().await;
    let applicant = test.funded_keypair().await;
    test.create_funded_task(&requester, TASK).await;
    let ix = test.apply_task_ix(TASK.task_id, &applicant.pubkey(), None);
    test.send(&[ix], &[&applicant]).await.unwrap();
    let ix = test.approve_ix(TASK.task_id, &applicant.pubkey(), &requester.pubkey());
    test.send(&[ix], &[&requester]).await.unwrap();

    let ix = test.submit_ix(TASK.task_id, &applicant.pubkey(), &requester.pubkey());
    assert_task_error(
        test.send(&[ix], &[&requester]).await,
        TaskTraderError::InvalidApplicant,
    );

    let ix = test.submit_ix(TASK.task_id, &applicant.pubkey(), &applicant.pubkey());
    test.send(&[ix], &[&applicant]).await.unwrap();
    let application = test.application(TASK.task_id, &applicant.pubkey()).await;
    assert_eq!(application.state, ApplicationState::WaitingForAcceptance);
}

#[tokio::test]
async fn test_approvals_stop_at_taker_num() {
    let mut test = TaskTraderTest::start(0).await;
    let requester = test.funded_keypair().await;
    let first = test.funded_keypair().await;
    let second = test.funded_keypair().await;
    let third = test.funded_keypair().await;
    test.create_funded_task(&requester, TASK).await;

    for applicant in [&first, &second, &third] {
        let ix = test.apply_task_ix(TASK.task_id, &applicant.pubkey(), None);
        test.send(&[ix], &[applicant]).await.unwrap();
    }
    for applicant in [&first, &second] {
        let ix = test.approve_ix(TASK.task_id, &applicant.pubkey(), &requester.pubkey());
        test.send(&[ix], &[&requester]).await.unwrap();
    }

    let ix = test.approve_ix(TASK.task_id, &third.pubkey(), &requester.pubkey());
    assert_task_error(
        test.send(&[ix], &[&requester]).await,
        TaskTraderError::TakerNumExceeded,
    );

    let late = test.funded_keypair().await;
    let ix = test.apply_task_ix(TASK.task_id, &late.pubkey(), None);
    assert_task_error(
        test.send(&[ix], &[&late]).await,
        TaskTraderError::TakerNumExceeded,
    );
    assert_eq!(test.task(TASK.task_id).await.approved_num, TASK.taker_num);
}
