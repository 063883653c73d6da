use crate::storage::{DataContext, Entity, StorageError};
use rusqlite::types::Value;
use rusqlite::Row;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct Category {
    pub id: i64, // 0 until stored
    pub name: String,
}

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
        }
    }
}

impl Entity for Category {
    const TABLE: &'static str = "categories";
    const COLUMNS: &'static [&'static str] = &["name"];

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
        })
    }

    fn values(&self) -> Vec<Value> {
        vec![self.name.clone().into()]
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct Todo {
    pub id: i64,
    pub category_id: i64,
    pub title: String,
    pub is_completed: bool,
    /// Owning category, present only after [`Entity::load_references`].
    #[serde(skip)]
    pub category: Option<Category>,
}

impl Todo {
    pub fn new(category_id: i64, title: impl Into<String>, is_completed: bool) -> Self {
        Self {
            id: 0,
            category_id,
            title: title.into(),
            is_completed,
            category: None,
        }
    }
}

impl Entity for Todo {
    const TABLE: &'static str = "todos";
    const COLUMNS: &'static [&'static str] = &["category_id", "title", "is_completed"];

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            category_id: row.get(1)?,
            title: row.get(2)?,
            is_completed: row.get(3)?,
            category: None,
        })
    }

    fn values(&self) -> Vec<Value> {
        vec![
            self.category_id.into(),
            self.title.clone().into(),
            self.is_completed.into(),
        ]
    }

    fn load_references(&mut self, context: &DataContext) -> Result<(), StorageError> {
        self.category = context.set::<Category>().find(self.category_id)?;
        Ok(())
    }
}
