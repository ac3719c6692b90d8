//! Basic transfer usage example

use transfer_core::utils::MemoryStore;
use transfer_core::{Store, TransferTxParams};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("🏦 Transfer Core - Basic Transfer Example\n");

    // Seed two accounts; account creation belongs to the surrounding system
    let backend = MemoryStore::new();
    let alice = backend.create_account("alice", 100, "USD");
    let bob = backend.create_account("bob", 50, "USD");
    println!("📊 Seeded accounts:");
    println!("  ✓ {} (id {}) balance {}", alice.owner, alice.id, alice.balance);
    println!("  ✓ {} (id {}) balance {}\n", bob.owner, bob.id, bob.balance);

    // 1. A successful transfer
    println!("💸 Transferring 30 from {} to {}...", alice.owner, bob.owner);
    let store = Store::new(backend.clone());
    let result = store
        .transfer_tx(TransferTxParams {
            from_account_id: alice.id,
            to_account_id: bob.id,
            amount: 30,
        })
        .await?;

    println!("  ✓ Transfer #{} recorded", result.transfer.id);
    println!(
        "  ✓ Entries: {} on account {}, {} on account {}",
        result.from_entry.amount,
        result.from_entry.account_id,
        result.to_entry.amount,
        result.to_entry.account_id
    );
    println!(
        "  ✓ Balances: {} = {}, {} = {}\n",
        alice.owner, result.from_account.balance, bob.owner, result.to_account.balance
    );

    // 2. A rejected transfer (validation happens before any transaction)
    println!("🚫 Attempting a transfer with a non-positive amount...");
    match store
        .transfer_tx(TransferTxParams {
            from_account_id: alice.id,
            to_account_id: bob.id,
            amount: 0,
        })
        .await
    {
        Err(err) => println!("  ✓ Rejected: {err}\n"),
        Ok(_) => unreachable!("zero-amount transfer must not succeed"),
    }

    // 3. A failed transfer rolls everything back
    println!("🚫 Attempting a transfer to a missing account...");
    match store
        .transfer_tx(TransferTxParams {
            from_account_id: alice.id,
            to_account_id: 999,
            amount: 10,
        })
        .await
    {
        Err(err) => println!("  ✓ Rolled back: {err}"),
        Ok(_) => unreachable!("transfer to missing account must not succeed"),
    }
    println!(
        "  ✓ {} balance unchanged at {}\n",
        alice.owner,
        backend.get_account(alice.id).await?.balance
    );

    // 4. The audit trail survives
    println!("🧾 Committed ledger state:");
    println!("  {} transfer(s), {} entries", backend.transfers().len(), backend.entries().len());
    let conserved: i64 = backend.entries().iter().map(|e| e.amount).sum();
    println!("  Entry amounts sum to {conserved} (value is conserved)");

    Ok(())
}
