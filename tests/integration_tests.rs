//! Integration tests for transfer-core

use std::sync::Arc;

use transfer_core::utils::MemoryStore;
use transfer_core::{LedgerError, LedgerTx, Store, TransferStorage, TransferTxParams};

fn params(from: i64, to: i64, amount: i64) -> TransferTxParams {
    TransferTxParams {
        from_account_id: from,
        to_account_id: to,
        amount,
    }
}

#[tokio::test]
async fn transfer_moves_money_and_records_audit_trail() {
    let backend = MemoryStore::new();
    let alice = backend.create_account("alice", 100, "USD");
    let bob = backend.create_account("bob", 50, "USD");
    let store = Store::new(backend.clone());

    let result = store
        .transfer_tx(params(alice.id, bob.id, 30))
        .await
        .unwrap();

    assert_eq!(result.transfer.from_account_id, alice.id);
    assert_eq!(result.transfer.to_account_id, bob.id);
    assert_eq!(result.transfer.amount, 30);

    assert_eq!(result.from_entry.account_id, alice.id);
    assert_eq!(result.from_entry.amount, -30);
    assert_eq!(result.to_entry.account_id, bob.id);
    assert_eq!(result.to_entry.amount, 30);
    assert_eq!(result.from_entry.amount + result.to_entry.amount, 0);

    assert_eq!(result.from_account.balance, 70);
    assert_eq!(result.to_account.balance, 80);

    // Committed state matches the returned rows.
    assert_eq!(backend.get_account(alice.id).await.unwrap().balance, 70);
    assert_eq!(backend.get_account(bob.id).await.unwrap().balance, 80);
    assert_eq!(backend.transfers().len(), 1);
    assert_eq!(backend.entries().len(), 2);
}

#[tokio::test]
async fn repeated_transfers_conserve_value() {
    let backend = MemoryStore::new();
    let alice = backend.create_account("alice", 500, "USD");
    let bob = backend.create_account("bob", 0, "USD");
    let store = Store::new(backend.clone());

    for _ in 0..5 {
        store
            .transfer_tx(params(alice.id, bob.id, 40))
            .await
            .unwrap();
    }

    assert_eq!(backend.get_account(alice.id).await.unwrap().balance, 300);
    assert_eq!(backend.get_account(bob.id).await.unwrap().balance, 200);

    let entry_sum: i64 = backend.entries().iter().map(|e| e.amount).sum();
    assert_eq!(entry_sum, 0);
    assert_eq!(backend.transfers().len(), 5);
    assert_eq!(backend.entries().len(), 10);
}

#[tokio::test]
async fn failed_transfer_leaves_no_trace() {
    let backend = MemoryStore::new();
    let alice = backend.create_account("alice", 100, "USD");
    let store = Store::new(backend.clone());

    let err = store
        .transfer_tx(params(alice.id, alice.id + 1, 30))
        .await
        .unwrap_err();
    assert!(matches!(err, LedgerError::AccountNotFound(_)));

    // Rollback: no transfer, no entries, no balance change.
    assert!(backend.transfers().is_empty());
    assert!(backend.entries().is_empty());
    assert_eq!(backend.get_account(alice.id).await.unwrap().balance, 100);
}

#[tokio::test]
async fn malformed_params_are_rejected_before_any_side_effect() {
    let backend = MemoryStore::new();
    let alice = backend.create_account("alice", 100, "USD");
    let bob = backend.create_account("bob", 50, "USD");
    let store = Store::new(backend.clone());

    for bad in [
        params(alice.id, bob.id, 0),
        params(alice.id, bob.id, -5),
        params(alice.id, alice.id, 10),
    ] {
        let err = store.transfer_tx(bad).await.unwrap_err();
        assert!(matches!(err, LedgerError::Validation(_)));
    }

    assert!(backend.transfers().is_empty());
    assert!(backend.entries().is_empty());
}

#[tokio::test]
async fn overdraft_is_permitted_at_this_layer() {
    let backend = MemoryStore::new();
    let alice = backend.create_account("alice", 100, "USD");
    let bob = backend.create_account("bob", 0, "USD");
    let store = Store::new(backend.clone());

    let result = store
        .transfer_tx(params(alice.id, bob.id, 1000))
        .await
        .unwrap();

    // No balance floor here; overdraft policy belongs to the caller.
    assert_eq!(result.from_account.balance, -900);
    assert_eq!(result.to_account.balance, 1000);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_transfers_do_not_lose_updates() {
    let backend = MemoryStore::new();
    let alice = backend.create_account("alice", 1000, "USD");
    let bob = backend.create_account("bob", 1000, "USD");
    let store = Arc::new(Store::new(backend.clone()));

    let n = 10;
    let mut handles = Vec::new();
    for _ in 0..n {
        let store = Arc::clone(&store);
        let p = params(alice.id, bob.id, 10);
        handles.push(tokio::spawn(async move { store.transfer_tx(p).await }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(
        backend.get_account(alice.id).await.unwrap().balance,
        1000 - n * 10
    );
    assert_eq!(
        backend.get_account(bob.id).await.unwrap().balance,
        1000 + n * 10
    );
    assert_eq!(backend.transfers().len(), n as usize);
    assert_eq!(backend.entries().len(), 2 * n as usize);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn opposite_direction_transfers_complete_without_deadlock() {
    let backend = MemoryStore::new();
    let alice = backend.create_account("alice", 500, "USD");
    let bob = backend.create_account("bob", 500, "USD");
    let store = Arc::new(Store::new(backend.clone()));

    // Interleaved A->B and B->A over the same pair is the classic deadlock
    // shape; identifier-ordered locking must let all of them finish.
    let n = 6;
    let mut handles = Vec::new();
    for i in 0..2 * n {
        let store = Arc::clone(&store);
        let p = if i % 2 == 0 {
            params(alice.id, bob.id, 10)
        } else {
            params(bob.id, alice.id, 10)
        };
        handles.push(tokio::spawn(async move { store.transfer_tx(p).await }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    // Equal counts in both directions: balances end where they started.
    assert_eq!(backend.get_account(alice.id).await.unwrap().balance, 500);
    assert_eq!(backend.get_account(bob.id).await.unwrap().balance, 500);

    let entry_sum: i64 = backend.entries().iter().map(|e| e.amount).sum();
    assert_eq!(entry_sum, 0);
    assert_eq!(backend.transfers().len(), 2 * n as usize);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn disjoint_pairs_transfer_independently() {
    let backend = MemoryStore::new();
    let store = Arc::new(Store::new(backend.clone()));

    let pairs: Vec<_> = (0..8)
        .map(|i| {
            (
                backend.create_account(&format!("from{i}"), 100, "USD"),
                backend.create_account(&format!("to{i}"), 100, "USD"),
            )
        })
        .collect();

    let mut handles = Vec::new();
    for (from, to) in &pairs {
        let store = Arc::clone(&store);
        let p = params(from.id, to.id, 25);
        handles.push(tokio::spawn(async move { store.transfer_tx(p).await }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    for (from, to) in &pairs {
        assert_eq!(backend.get_account(from.id).await.unwrap().balance, 75);
        assert_eq!(backend.get_account(to.id).await.unwrap().balance, 125);
    }
}

#[tokio::test]
async fn dropped_transaction_leaves_no_partial_state() {
    let backend = MemoryStore::new();
    let alice = backend.create_account("alice", 100, "USD");

    // A unit of work abandoned mid-flight (caller cancellation) must behave
    // exactly like a rollback.
    {
        let mut tx = backend.begin().await.unwrap();
        tx.add_account_balance(alice.id, -60).await.unwrap();
    }

    assert_eq!(backend.get_account(alice.id).await.unwrap().balance, 100);
    assert!(backend.entries().is_empty());
}

#[tokio::test]
async fn transfer_result_serializes_to_json() {
    let backend = MemoryStore::new();
    let alice = backend.create_account("alice", 100, "USD");
    let bob = backend.create_account("bob", 50, "USD");
    let store = Store::new(backend);

    let result = store
        .transfer_tx(params(alice.id, bob.id, 30))
        .await
        .unwrap();

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["transfer"]["amount"], 30);
    assert_eq!(json["from_entry"]["amount"], -30);
    assert_eq!(json["to_account"]["balance"], 80);
}
