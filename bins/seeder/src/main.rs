//! Database seeder for Voltra development and testing.
//!
//! Seeds a demo activated account with one assigned and one activated card,
//! plus a loose unassigned card, for local development.
//!
//! Usage: cargo run --bin seeder

use voltra_core::lifecycle::CardStatus;
use voltra_db::repositories::account::CreateAccountInput;
use voltra_db::repositories::card::CreateCardInput;
use voltra_db::{AccountRepository, CardRepository};

/// Demo account (consistent for all seeds)
const DEMO_EMAIL: &str = "driver@voltra.dev";
/// Demo contract id (EMAID-shaped)
const DEMO_CONTRACT_ID: &str = "DE1A2B3C4D5E6F";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    println!("Connecting to database...");
    let db = voltra_db::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    let accounts = AccountRepository::new(db.clone());
    let cards = CardRepository::new(db);

    println!("Seeding demo account...");
    if accounts
        .find_by_email(DEMO_EMAIL)
        .await
        .expect("Failed to query demo account")
        .is_some()
    {
        println!("Demo account already present, nothing to do.");
        return;
    }

    accounts
        .create(CreateAccountInput {
            email: DEMO_EMAIL.to_string(),
            contract_id: None,
        })
        .await
        .expect("Failed to create demo account");
    accounts
        .activate(DEMO_EMAIL, Some(DEMO_CONTRACT_ID))
        .await
        .expect("Failed to activate demo account");

    println!("Seeding demo cards...");
    for (visible_number, status) in [
        ("1000-0000-0000-0001", Some(CardStatus::Assigned)),
        ("1000-0000-0000-0002", Some(CardStatus::Activated)),
        ("1000-0000-0000-0003", None),
    ] {
        let account_email = status.map(|_| DEMO_EMAIL.to_string());
        cards
            .create(CreateCardInput {
                rfid_uid: None,
                visible_number: visible_number.to_string(),
                status,
                account_email,
            })
            .await
            .expect("Failed to create demo card");
    }

    println!("Done.");
}
