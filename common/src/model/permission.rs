//! Permission values understood by the platform's account service.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::BitOr;

/// Bit set of permission types. Values match the platform's account service.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionType(u32);

impl PermissionType {
    pub const NONE: PermissionType = PermissionType(1);
    pub const READ: PermissionType = PermissionType(2);
    pub const CREATE: PermissionType = PermissionType(4);
    pub const MODIFY: PermissionType = PermissionType(8);
    pub const DELETE: PermissionType = PermissionType(16);
    pub const PERMISSION: PermissionType = PermissionType(32);

    /// Everything an owner receives on an entity they created.
    pub const OWNER: PermissionType = PermissionType(2 | 8 | 16 | 32);

    pub const ALL: PermissionType = PermissionType(2 | 4 | 8 | 16 | 32);

    pub const fn from_bits(bits: u32) -> Self {
        PermissionType(bits)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    /// True when every bit of `other` is set in `self`.
    pub const fn contains(self, other: PermissionType) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for PermissionType {
    type Output = PermissionType;

    fn bitor(self, rhs: Self) -> Self::Output {
        PermissionType(self.0 | rhs.0)
    }
}

impl fmt::Debug for PermissionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PermissionType({:#07b})", self.0)
    }
}

/// Module-specific permission categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i32", try_from = "i32")]
pub enum PermissionState {
    Template = 1,
    Report = 2,
    Export = 3,
}

impl From<PermissionState> for i32 {
    fn from(state: PermissionState) -> Self {
        state as i32
    }
}

impl TryFrom<i32> for PermissionState {
    type Error = String;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(PermissionState::Template),
            2 => Ok(PermissionState::Report),
            3 => Ok(PermissionState::Export),
            other => Err(format!("unknown permission state {}", other)),
        }
    }
}

/// A permission held by an account. `None` fields apply to every app, category or element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountPermission {
    pub account: i64,
    pub unit: i64,
    pub app: Option<String>,
    pub module: String,
    /// Module that issued the grant.
    pub from: String,
    pub category: Option<PermissionState>,
    pub element: Option<i64>,
    pub permission: PermissionType,
}

/// The capability being asked for. `None` fields match any stored value.
#[derive(Debug, Clone, PartialEq)]
pub struct PermissionQuery {
    pub account: i64,
    pub permission: PermissionType,
    pub unit: i64,
    pub app: Option<String>,
    pub module: String,
    pub category: Option<PermissionState>,
    pub element: Option<i64>,
}

impl AccountPermission {
    /// Whether this grant satisfies `query`.
    pub fn satisfies(&self, query: &PermissionQuery) -> bool {
        fn either_open<T: PartialEq>(stored: &Option<T>, asked: &Option<T>) -> bool {
            match (stored, asked) {
                (Some(s), Some(a)) => s == a,
                _ => true,
            }
        }

        self.account == query.account
            && self.unit == query.unit
            && self.module == query.module
            && either_open(&self.app, &query.app)
            && either_open(&self.category, &query.category)
            && either_open(&self.element, &query.element)
            && self.permission.contains(query.permission)
    }
}
