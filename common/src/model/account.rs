use crate::model::reference::Identified;
use serde::{Deserialize, Serialize};

/// A platform account. Only its id travels through this module.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Account {
    pub id: i64,
    pub login: String,
}

/// An organizational unit that owns templates.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Unit {
    pub id: i64,
    pub name: String,
}

impl Identified for Account {
    fn id(&self) -> i64 {
        self.id
    }
}

impl Identified for Unit {
    fn id(&self) -> i64 {
        self.id
    }
}
