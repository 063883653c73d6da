use super::{Mappers, RecordService};
use crate::dto::{TodoCreateDto, TodoReadDto, TodoUpdateDto};
use crate::models::Todo;
use crate::storage::{DataContext, StorageError};

pub type TodoService<'ctx> = RecordService<'ctx, Todo, TodoCreateDto, TodoReadDto, TodoUpdateDto>;

impl<'ctx> TodoService<'ctx> {
    pub fn new(context: &'ctx DataContext) -> Self {
        Self::with_mappers(
            context,
            Mappers {
                create_to_entity: |dto: TodoCreateDto| Todo::from(dto),
                entity_to_read: |entity: &Todo| TodoReadDto::from(entity),
                update_onto_entity: |dto: TodoUpdateDto, entity: Todo| dto.apply_to(entity),
            },
        )
    }

    /// Returns the todos belonging to `category_id`, empty if there are none.
    pub fn get_todo_by_category_id(
        &self,
        category_id: i64,
    ) -> Result<Vec<TodoReadDto>, StorageError> {
        self.set()
            .where_eq("category_id", category_id)?
            .into_iter()
            .map(|todo| self.to_read(todo))
            .collect()
    }
}
