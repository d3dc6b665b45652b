use crate::model::reference::Identified;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Tag {
    pub id: i64,
    pub title: String,
    pub color: String,
    pub icon: Option<String>,
    pub language: String,
}

impl Identified for Tag {
    fn id(&self) -> i64 {
        self.id
    }
}
