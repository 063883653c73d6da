//! Transfer shapes passed into and out of the services. None of these are
//! persisted.

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct CategoryCreateDto {
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct CategoryReadDto {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct CategoryUpdateDto {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct TodoCreateDto {
    pub category_id: i64,
    pub title: String,
    #[serde(default)]
    pub is_completed: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct TodoReadDto {
    pub id: i64,
    pub category_id: i64,
    pub title: String,
    pub is_completed: bool,
    /// Empty when the owning category was not loaded.
    pub category_name: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct TodoUpdateDto {
    pub id: i64,
    pub category_id: i64,
    pub title: String,
    pub is_completed: bool,
}
