use crate::db::Database;
use crate::error::Result;
use crate::platform::AccountService;
use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use common::model::permission::{
    AccountPermission, PermissionQuery, PermissionState, PermissionType,
};
use rusqlite::{params, Connection};
use std::future::{ready, Ready};

/// Header the authentication layer in front of this server sets to the account id.
pub const ACCOUNT_HEADER: &str = "X-Account";

/// The account a request acts as. Missing or malformed headers yield the null account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountId(pub i64);

impl AccountId {
    pub fn is_null(self) -> bool {
        self.0 == 0
    }
}

impl FromRequest for AccountId {
    type Error = actix_web::Error;
    type Future = Ready<std::result::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let id = req
            .headers()
            .get(ACCOUNT_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.trim().parse::<i64>().ok())
            .filter(|id| *id > 0)
            .unwrap_or(0);
        ready(Ok(AccountId(id)))
    }
}

const TABLES: &str = "
    CREATE TABLE IF NOT EXISTS account_permission (
        account_permission_id INTEGER PRIMARY KEY AUTOINCREMENT,
        account_permission_account INTEGER NOT NULL,
        account_permission_unit INTEGER NOT NULL,
        account_permission_app TEXT,
        account_permission_module TEXT NOT NULL,
        account_permission_from TEXT NOT NULL,
        account_permission_category INTEGER,
        account_permission_element INTEGER,
        account_permission_permission INTEGER NOT NULL
    );
    CREATE INDEX IF NOT EXISTS account_permission_lookup
        ON account_permission (account_permission_account, account_permission_module);
";

pub fn install_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(TABLES)?;
    Ok(())
}

/// Permissions stored in the `account_permission` table.
pub struct SqliteAccountService {
    db: Database,
}

impl SqliteAccountService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    fn permissions(
        &self,
        conn: &Connection,
        account: i64,
        module: &str,
    ) -> Result<Vec<AccountPermission>> {
        let mut stmt = conn.prepare(
            "SELECT account_permission_account, account_permission_unit, account_permission_app,
                    account_permission_module, account_permission_from, account_permission_category,
                    account_permission_element, account_permission_permission
             FROM account_permission
             WHERE account_permission_account = ?1 AND account_permission_module = ?2",
        )?;
        let rows = stmt.query_map(params![account, module], |row| {
            let category: Option<i32> = row.get(5)?;
            Ok(AccountPermission {
                account: row.get(0)?,
                unit: row.get(1)?,
                app: row.get(2)?,
                module: row.get(3)?,
                from: row.get(4)?,
                category: category.and_then(|c| PermissionState::try_from(c).ok()),
                element: row.get(6)?,
                permission: PermissionType::from_bits(row.get(7)?),
            })
        })?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }
}

impl AccountService for SqliteAccountService {
    fn has_permission(&self, query: &PermissionQuery) -> Result<bool> {
        if query.account == 0 {
            return Ok(false);
        }
        let conn = self.db.connect()?;
        let granted = self
            .permissions(&conn, query.account, &query.module)?
            .iter()
            .any(|permission| permission.satisfies(query));
        Ok(granted)
    }

    fn grant(&self, permission: &AccountPermission) -> Result<()> {
        let conn = self.db.connect()?;
        conn.execute(
            "INSERT INTO account_permission (
                account_permission_account, account_permission_unit, account_permission_app,
                account_permission_module, account_permission_from, account_permission_category,
                account_permission_element, account_permission_permission
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                permission.account,
                permission.unit,
                permission.app,
                permission.module,
                permission.from,
                permission.category.map(i32::from),
                permission.element,
                permission.permission.bits(),
            ],
        )?;
        Ok(())
    }
}
