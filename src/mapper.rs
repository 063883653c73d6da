//! Field-by-field conversions between entities and DTOs.

use crate::dto::{
    CategoryCreateDto, CategoryReadDto, CategoryUpdateDto, TodoCreateDto, TodoReadDto,
    TodoUpdateDto,
};
use crate::models::{Category, Todo};

impl From<CategoryCreateDto> for Category {
    fn from(dto: CategoryCreateDto) -> Self {
        Category::new(dto.name)
    }
}

impl From<&Category> for CategoryReadDto {
    fn from(entity: &Category) -> Self {
        Self {
            id: entity.id,
            name: entity.name.clone(),
        }
    }
}

impl CategoryUpdateDto {
    /// Copies the mutable fields onto `entity`. The entity keeps its id.
    pub fn apply_to(self, mut entity: Category) -> Category {
        entity.name = self.name;
        entity
    }
}

impl From<TodoCreateDto> for Todo {
    fn from(dto: TodoCreateDto) -> Self {
        Todo::new(dto.category_id, dto.title, dto.is_completed)
    }
}

impl From<&Todo> for TodoReadDto {
    fn from(entity: &Todo) -> Self {
        Self {
            id: entity.id,
            category_id: entity.category_id,
            title: entity.title.clone(),
            is_completed: entity.is_completed,
            category_name: entity
                .category
                .as_ref()
                .map(|category| category.name.clone())
                .unwrap_or_default(),
        }
    }
}

impl TodoUpdateDto {
    /// Copies the mutable fields onto `entity`. The entity keeps its id.
    ///
    /// A moved todo drops its loaded category. `RecordService` reloads
    /// references before every read anyway; the clear keeps this mapping
    /// correct when it is used on its own, without a store round trip.
    pub fn apply_to(self, mut entity: Todo) -> Todo {
        if entity.category_id != self.category_id {
            entity.category = None;
        }
        entity.category_id = self.category_id;
        entity.title = self.title;
        entity.is_completed = self.is_completed;
        entity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_todo_read_without_category_has_empty_name() {
        let todo = Todo {
            id: 4,
            ..Todo::new(2, "Email the client", false)
        };

        let dto = TodoReadDto::from(&todo);
        assert_eq!(dto.id, 4);
        assert_eq!(dto.category_id, 2);
        assert_eq!(dto.category_name, "");
    }

    #[test]
    fn test_todo_read_with_category_copies_name() {
        let todo = Todo {
            id: 1,
            category: Some(Category {
                id: 2,
                name: "Work".to_string(),
            }),
            ..Todo::new(2, "Finish the report", true)
        };

        let dto = TodoReadDto::from(&todo);
        assert_eq!(dto.category_name, "Work");
        assert!(dto.is_completed);
    }

    #[test]
    fn test_update_keeps_entity_id() {
        let entity = Category {
            id: 9,
            name: "Home".to_string(),
        };
        let dto = CategoryUpdateDto {
            id: 1234,
            name: "House".to_string(),
        };

        let updated = dto.apply_to(entity);
        assert_eq!(updated.id, 9);
        assert_eq!(updated.name, "House");
    }

    #[test]
    fn test_todo_update_to_new_category_clears_loaded_category() {
        let entity = Todo {
            id: 3,
            category: Some(Category {
                id: 1,
                name: "Home".to_string(),
            }),
            ..Todo::new(1, "Buy groceries", false)
        };
        let dto = TodoUpdateDto {
            id: 3,
            category_id: 2,
            title: "Buy groceries".to_string(),
            is_completed: true,
        };

        let updated = dto.apply_to(entity);
        assert_eq!(updated.id, 3);
        assert_eq!(updated.category_id, 2);
        assert!(updated.is_completed);
        assert!(updated.category.is_none());
    }

    #[test]
    fn test_create_dto_maps_to_unsaved_entity() {
        let todo = Todo::from(TodoCreateDto {
            category_id: 1,
            title: "Clean the house".to_string(),
            is_completed: false,
        });
        assert_eq!(todo.id, 0);
        assert_eq!(todo.title, "Clean the house");
    }
}
