use super::{Mappers, RecordService};
use crate::dto::{CategoryCreateDto, CategoryReadDto, CategoryUpdateDto};
use crate::models::Category;
use crate::storage::DataContext;

pub type CategoryService<'ctx> =
    RecordService<'ctx, Category, CategoryCreateDto, CategoryReadDto, CategoryUpdateDto>;

impl<'ctx> CategoryService<'ctx> {
    pub fn new(context: &'ctx DataContext) -> Self {
        Self::with_mappers(
            context,
            Mappers {
                create_to_entity: |dto: CategoryCreateDto| Category::from(dto),
                entity_to_read: |entity: &Category| CategoryReadDto::from(entity),
                update_onto_entity: |dto: CategoryUpdateDto, entity: Category| dto.apply_to(entity),
            },
        )
    }
}
