//! CRUD services over the persistence context.
//!
//! [`RecordService`] implements create/read/update/delete once for any
//! [`Entity`]. Everything type-specific is supplied through [`Mappers`]; the
//! concrete services in [`category`] and [`todo`] only pick the types and the
//! mapping functions.
//!
//! "Not found" is a normal outcome (`Ok(None)` or `Ok(false)`). Store errors
//! are returned to the caller untouched.

use crate::storage::{DataContext, Entity, StorageError, Table};

pub mod category;
pub mod todo;

pub use category::CategoryService;
pub use todo::TodoService;

/// Translation functions between an entity `E` and its create (`C`),
/// read (`R`) and update (`U`) shapes.
pub struct Mappers<E, C, R, U> {
    pub create_to_entity: fn(C) -> E,
    pub entity_to_read: fn(&E) -> R,
    pub update_onto_entity: fn(U, E) -> E,
}

pub struct RecordService<'ctx, E, C, R, U> {
    context: &'ctx DataContext,
    mappers: Mappers<E, C, R, U>,
}

impl<'ctx, E: Entity, C, R, U> RecordService<'ctx, E, C, R, U> {
    pub fn with_mappers(context: &'ctx DataContext, mappers: Mappers<E, C, R, U>) -> Self {
        Self { context, mappers }
    }

    pub fn context(&self) -> &'ctx DataContext {
        self.context
    }

    /// Inserts a new record, commits, and returns it in read shape.
    pub fn create(&self, dto: C) -> Result<R, StorageError> {
        let mut entity = (self.mappers.create_to_entity)(dto);
        self.set().add(&mut entity)?;
        self.context.save_changes()?;
        self.to_read(entity)
    }

    pub fn get_by_id(&self, id: i64) -> Result<Option<R>, StorageError> {
        match self.set().find(id)? {
            Some(entity) => self.to_read(entity).map(Some),
            None => Ok(None),
        }
    }

    pub fn get_all(&self) -> Result<Vec<R>, StorageError> {
        self.set()
            .to_list()?
            .into_iter()
            .map(|entity| self.to_read(entity))
            .collect()
    }

    /// Applies `dto` to the stored record with `id` and commits.
    ///
    /// Returns `Ok(None)` when there is no such record.
    pub fn update(&self, id: i64, dto: U) -> Result<Option<R>, StorageError> {
        let Some(entity) = self.set().find(id)? else {
            return Ok(None);
        };

        let mut entity = (self.mappers.update_onto_entity)(dto, entity);
        entity.set_id(id);
        if !self.set().update(&entity)? {
            return Ok(None);
        }
        self.context.save_changes()?;
        self.to_read(entity).map(Some)
    }

    /// Removes the record with `id` and commits. Returns `false` if it did not exist.
    pub fn delete(&self, id: i64) -> Result<bool, StorageError> {
        let Some(entity) = self.set().find(id)? else {
            return Ok(false);
        };

        self.set().remove(&entity)?;
        self.context.save_changes()?;
        Ok(true)
    }

    pub(crate) fn set(&self) -> Table<'ctx, E> {
        self.context.set::<E>()
    }

    /// Loads the entity's references, then maps it to read shape.
    pub(crate) fn to_read(&self, mut entity: E) -> Result<R, StorageError> {
        entity.load_references(self.context)?;
        Ok((self.mappers.entity_to_read)(&entity))
    }
}
