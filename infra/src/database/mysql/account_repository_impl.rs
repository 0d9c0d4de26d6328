//! MySQL implementation of the AccountRepository trait.
//!
//! Accounts live in the `cafe_owners` table. Writes are conditional on the
//! step and version the caller read, so two requests racing on the same
//! account cannot both win.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{mysql::MySqlRow, MySqlPool, Row};
use uuid::Uuid;

use cafe_core::domain::entities::{Account, AccountParts, RegistrationStep};
use cafe_core::domain::value_objects::CafeProfile;
use cafe_core::errors::DomainError;
use cafe_core::repositories::AccountRepository;

const SELECT_COLUMNS: &str = r#"
    SELECT id, email, phone, password_hash,
           owner_name, cafe_name, address, city, state, pincode,
           registration_step, is_verified, is_phone_verified,
           verify_code, verify_code_expiry,
           created_at, updated_at, version
    FROM cafe_owners
"#;

/// MySQL implementation of [`AccountRepository`]
pub struct MySqlAccountRepository {
    pool: MySqlPool,
}

impl MySqlAccountRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn storage_error(context: &str, e: sqlx::Error) -> DomainError {
        tracing::error!(error = %e, context = context, "Account store query failed");
        DomainError::Storage {
            message: format!("{}: {}", context, e),
        }
    }

    fn column<'r, T>(row: &'r MySqlRow, name: &str) -> Result<T, DomainError>
    where
        T: sqlx::Decode<'r, sqlx::MySql> + sqlx::Type<sqlx::MySql>,
    {
        row.try_get(name).map_err(|e| DomainError::Storage {
            message: format!("Failed to get {}: {}", name, e),
        })
    }

    /// Convert a `cafe_owners` row into an [`Account`]
    fn row_to_account(row: &MySqlRow) -> Result<Account, DomainError> {
        let id: String = Self::column(row, "id")?;
        let step: String = Self::column(row, "registration_step")?;

        Ok(Account::restore(AccountParts {
            id: Uuid::parse_str(&id).map_err(|e| DomainError::Storage {
                message: format!("Invalid UUID: {}", e),
            })?,
            email: Self::column(row, "email")?,
            phone: Self::column(row, "phone")?,
            password_hash: Self::column(row, "password_hash")?,
            profile: CafeProfile {
                owner_name: Self::column(row, "owner_name")?,
                cafe_name: Self::column(row, "cafe_name")?,
                address: Self::column(row, "address")?,
                city: Self::column(row, "city")?,
                state: Self::column(row, "state")?,
                pincode: Self::column(row, "pincode")?,
            },
            registration_step: step
                .parse()
                .map_err(|message| DomainError::Storage { message })?,
            is_verified: Self::column(row, "is_verified")?,
            is_phone_verified: Self::column(row, "is_phone_verified")?,
            verify_code: Self::column(row, "verify_code")?,
            verify_code_expiry: Self::column::<Option<DateTime<Utc>>>(row, "verify_code_expiry")?,
            created_at: Self::column::<DateTime<Utc>>(row, "created_at")?,
            updated_at: Self::column::<DateTime<Utc>>(row, "updated_at")?,
            version: Self::column(row, "version")?,
        }))
    }

    async fn fetch_one_where(
        &self,
        clause: &str,
        value: String,
    ) -> Result<Option<Account>, DomainError> {
        let query = format!("{} WHERE {} = ? LIMIT 1", SELECT_COLUMNS, clause);

        let row = sqlx::query(&query)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| Self::storage_error("find account", e))?;

        row.as_ref().map(Self::row_to_account).transpose()
    }

    async fn stored_step(&self, id: Uuid) -> Result<Option<RegistrationStep>, DomainError> {
        let step: Option<String> =
            sqlx::query_scalar("SELECT registration_step FROM cafe_owners WHERE id = ?")
                .bind(id.to_string())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| Self::storage_error("read registration step", e))?;

        step.map(|s| s.parse().map_err(|message| DomainError::Storage { message }))
            .transpose()
    }
}

#[async_trait]
impl AccountRepository for MySqlAccountRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError> {
        self.fetch_one_where("email", email.to_string()).await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError> {
        self.fetch_one_where("id", id.to_string()).await
    }

    async fn create(&self, account: Account) -> Result<Account, DomainError> {
        let query = r#"
            INSERT INTO cafe_owners (
                id, email, phone, password_hash,
                owner_name, cafe_name, address, city, state, pincode,
                registration_step, is_verified, is_phone_verified,
                verify_code, verify_code_expiry,
                created_at, updated_at, version
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        let result = sqlx::query(query)
            .bind(account.id.to_string())
            .bind(&account.email)
            .bind(&account.phone)
            .bind(&account.password_hash)
            .bind(&account.profile.owner_name)
            .bind(&account.profile.cafe_name)
            .bind(&account.profile.address)
            .bind(&account.profile.city)
            .bind(&account.profile.state)
            .bind(&account.profile.pincode)
            .bind(account.registration_step().as_str())
            .bind(account.is_verified())
            .bind(account.is_phone_verified())
            .bind(account.verify_code())
            .bind(account.verify_code_expiry())
            .bind(account.created_at)
            .bind(account.updated_at)
            .bind(account.version())
            .execute(&self.pool)
            .await;

        match result {
            Ok(_) => {
                tracing::debug!(account_id = %account.id, "Account row inserted");
                Ok(account)
            }
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(DomainError::Conflict {
                    resource: format!("account with email {}", account.email),
                })
            }
            Err(e) => Err(Self::storage_error("insert account", e)),
        }
    }

    async fn update(
        &self,
        account: Account,
        expected_step: RegistrationStep,
    ) -> Result<Account, DomainError> {
        let query = r#"
            UPDATE cafe_owners
            SET phone = ?, password_hash = ?,
                owner_name = ?, cafe_name = ?, address = ?, city = ?, state = ?, pincode = ?,
                registration_step = ?, is_verified = ?, is_phone_verified = ?,
                verify_code = ?, verify_code_expiry = ?,
                updated_at = ?, version = version + 1
            WHERE id = ? AND registration_step = ? AND version = ?
        "#;

        let result = sqlx::query(query)
            .bind(&account.phone)
            .bind(&account.password_hash)
            .bind(&account.profile.owner_name)
            .bind(&account.profile.cafe_name)
            .bind(&account.profile.address)
            .bind(&account.profile.city)
            .bind(&account.profile.state)
            .bind(&account.profile.pincode)
            .bind(account.registration_step().as_str())
            .bind(account.is_verified())
            .bind(account.is_phone_verified())
            .bind(account.verify_code())
            .bind(account.verify_code_expiry())
            .bind(account.updated_at)
            .bind(account.id.to_string())
            .bind(expected_step.as_str())
            .bind(account.version())
            .execute(&self.pool)
            .await
            .map_err(|e| Self::storage_error("update account", e))?;

        // The version bump changes every matched row, so zero rows means the
        // precondition failed or the account is gone
        if result.rows_affected() > 0 {
            let mut account = account;
            account.mark_stored();
            return Ok(account);
        }

        match self.stored_step(account.id).await? {
            None => Err(DomainError::NotFound {
                resource: format!("account {}", account.id),
            }),
            Some(step) => {
                tracing::debug!(
                    account_id = %account.id,
                    expected = %expected_step,
                    stored = %step,
                    version = account.version(),
                    "Account update lost a race"
                );
                Err(DomainError::Conflict {
                    resource: format!("account {}", account.id),
                })
            }
        }
    }
}
