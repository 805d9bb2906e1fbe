use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{Postgres, Transaction};

use crate::accounts;
use crate::auth::password;
use crate::db;
use crate::error::AppError;
use crate::models::{DepositStatus, KycStatus, Role, UserProfile};
use crate::service::deposits::{self, DepositPatch, OpenDeposit};

struct DemoUser {
    name: &'static str,
    email: &'static str,
    password: &'static str,
    kyc_status: KycStatus,
    street: &'static str,
    postal_code: &'static str,
    city: &'static str,
    reference: Option<(&'static str, &'static str, &'static str)>,
}

struct DemoDeposit {
    principal: i64,
    /// Rate in thousandths of a percent.
    rate_milli: i64,
    term_months: i64,
    start: (i32, u32, u32),
    end_status: Option<DepositStatus>,
}

const DEMO_USERS: [DemoUser; 2] = [
    DemoUser {
        name: "Anna Beispiel",
        email: "user@onlinekonto.de",
        password: "user123",
        kyc_status: KycStatus::Verified,
        street: "Beispielweg 456",
        postal_code: "80331",
        city: "München",
        reference: Some(("DE12345678901234567890", "BYLADEM1001", "Bayerische Landesbank")),
    },
    DemoUser {
        name: "Thomas Müller",
        email: "thomas@onlinekonto.de",
        password: "demo123",
        kyc_status: KycStatus::Pending,
        street: "Hauptstraße 789",
        postal_code: "20095",
        city: "Hamburg",
        reference: None,
    },
];

const DEMO_DEPOSITS: [DemoDeposit; 3] = [
    DemoDeposit {
        principal: 10_000,
        rate_milli: 3_500,
        term_months: 12,
        start: (2024, 1, 15),
        end_status: None,
    },
    DemoDeposit {
        principal: 5_000,
        rate_milli: 4_200,
        term_months: 24,
        start: (2024, 3, 1),
        end_status: None,
    },
    DemoDeposit {
        principal: 19_992,
        rate_milli: 12_000,
        term_months: 24,
        start: (2025, 3, 14),
        end_status: Some(DepositStatus::TerminatedEarly),
    },
];

/// Insert the demo customers, their deposits and ledger entries. The first
/// demo customer owns all demo deposits.
pub async fn demo_data(tx: &mut Transaction<'_, Postgres>) -> Result<(), AppError> {
    let mut first_customer = None;

    for demo in &DEMO_USERS {
        let pw_hash = password::hash(demo.password).map_err(AppError::Internal)?;
        let profile = UserProfile {
            street: Some(demo.street.to_string()),
            postal_code: Some(demo.postal_code.to_string()),
            city: Some(demo.city.to_string()),
            country: Some("Deutschland".to_string()),
            reference_iban: demo.reference.map(|r| r.0.to_string()),
            reference_bic: demo.reference.map(|r| r.1.to_string()),
            reference_bank_name: demo.reference.map(|r| r.2.to_string()),
        };
        let account_number = accounts::generate_account_number();

        let user = db::users::create(
            &mut **tx,
            &db::users::NewUser {
                name: demo.name,
                email: demo.email,
                password_hash: &pw_hash,
                role: Role::User,
                account_number: &account_number,
                kyc_status: demo.kyc_status,
                profile: &profile,
            },
        )
        .await?;

        first_customer.get_or_insert(user.id);
    }

    let Some(owner) = first_customer else {
        return Ok(());
    };

    for demo in &DEMO_DEPOSITS {
        let (y, m, d) = demo.start;
        let start_date = NaiveDate::from_ymd_opt(y, m, d)
            .ok_or_else(|| AppError::Internal(format!("Invalid demo date {y}-{m}-{d}")))?;

        let (deposit, _) = deposits::open(
            &mut **tx,
            &OpenDeposit {
                user_id: owner,
                principal: Decimal::from(demo.principal),
                interest_rate: Decimal::new(demo.rate_milli, 3),
                term_months: demo.term_months,
                start_date,
            },
        )
        .await?;

        if let Some(status) = demo.end_status {
            let patch = DepositPatch {
                status: Some(status),
                ..DepositPatch::default()
            };
            deposits::amend(&mut **tx, deposit.id, &patch).await?;
        }
    }

    tracing::info!("Demo data seeded");
    Ok(())
}
