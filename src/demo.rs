//! Seeds the sample data and prints every category with its todos.

use crate::dto::{CategoryCreateDto, TodoCreateDto};
use crate::error::AppError;
use crate::service::{CategoryService, TodoService};
use crate::storage::DataContext;
use log::info;
use std::io::Write;

pub const SEED_CATEGORIES: [&str; 3] = ["Home", "Work", "Leisure"];

/// Todo titles paired with the index of their category in [`SEED_CATEGORIES`].
pub const SEED_TODOS: [(&str, usize); 5] = [
    ("Clean the house", 0),
    ("Buy groceries", 0),
    ("Finish the report", 1),
    ("Email the client", 1),
    ("Go for a walk", 2),
];

pub fn run_demo<W: Write>(context: &DataContext, out: &mut W) -> Result<(), AppError> {
    if context.ensure_created()? {
        info!("event=schema_created");
    }

    let category_service = CategoryService::new(context);
    let mut category_ids = Vec::with_capacity(SEED_CATEGORIES.len());
    for name in SEED_CATEGORIES {
        let category = category_service.create(CategoryCreateDto {
            name: name.to_string(),
        })?;
        category_ids.push(category.id);
    }

    // Listed before the todos exist; the todos are looked up per category below.
    let categories = category_service.get_all()?;

    let todo_service = TodoService::new(context);
    for (title, category) in SEED_TODOS {
        todo_service.create(TodoCreateDto {
            category_id: category_ids[category],
            title: title.to_string(),
            is_completed: false,
        })?;
    }
    info!(
        "event=seeded categories={} todos={}",
        SEED_CATEGORIES.len(),
        SEED_TODOS.len()
    );

    for category in categories {
        writeln!(out, "Category: {}", category.name)?;
        for todo in todo_service.get_todo_by_category_id(category.id)? {
            writeln!(out, "\tTodo: {}", todo.title)?;
        }
    }
    out.flush()?;
    Ok(())
}
