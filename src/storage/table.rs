use super::{DataContext, Entity, StorageError};
use log::trace;
use rusqlite::types::ToSql;
use rusqlite::{params, params_from_iter, OptionalExtension};
use std::marker::PhantomData;

/// Typed access to the table backing one entity kind.
pub struct Table<'ctx, E> {
    context: &'ctx DataContext,
    _entity: PhantomData<E>,
}

impl<'ctx, E: Entity> Table<'ctx, E> {
    pub(crate) fn new(context: &'ctx DataContext) -> Self {
        Self {
            context,
            _entity: PhantomData,
        }
    }

    fn select_sql() -> String {
        format!("SELECT id, {} FROM {}", E::COLUMNS.join(", "), E::TABLE)
    }

    /// Inserts the entity and stores the generated id back into it.
    pub fn add(&self, entity: &mut E) -> Result<(), StorageError> {
        let placeholders = (1..=E::COLUMNS.len())
            .map(|i| format!("?{i}"))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            E::TABLE,
            E::COLUMNS.join(", "),
            placeholders
        );
        trace!("event=insert table={}", E::TABLE);

        self.context
            .execute_write(&sql, params_from_iter(entity.values()))?;
        entity.set_id(self.context.connection().last_insert_rowid());
        Ok(())
    }

    pub fn find(&self, id: i64) -> Result<Option<E>, StorageError> {
        let sql = format!("{} WHERE id = ?1", Self::select_sql());
        let entity = self
            .context
            .connection()
            .query_row(&sql, params![id], E::from_row)
            .optional()?;
        Ok(entity)
    }

    /// Reads every row in store order.
    pub fn to_list(&self) -> Result<Vec<E>, StorageError> {
        let mut stmt = self.context.connection().prepare(&Self::select_sql())?;
        let entities = stmt
            .query_map([], E::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(entities)
    }

    /// Reads the rows whose `column` equals `value`.
    pub fn where_eq<V: ToSql>(&self, column: &str, value: V) -> Result<Vec<E>, StorageError> {
        if column != "id" && !E::COLUMNS.contains(&column) {
            return Err(StorageError::InvalidColumn {
                table: E::TABLE,
                column: column.to_string(),
            });
        }

        let sql = format!("{} WHERE {} = ?1", Self::select_sql(), column);
        let mut stmt = self.context.connection().prepare(&sql)?;
        let entities = stmt
            .query_map(params![value], E::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(entities)
    }

    /// Overwrites every column of the stored row. Returns `false` if the row is gone.
    pub fn update(&self, entity: &E) -> Result<bool, StorageError> {
        let assignments = E::COLUMNS
            .iter()
            .enumerate()
            .map(|(i, column)| format!("{} = ?{}", column, i + 1))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "UPDATE {} SET {} WHERE id = ?{}",
            E::TABLE,
            assignments,
            E::COLUMNS.len() + 1
        );
        trace!("event=update table={} id={}", E::TABLE, entity.id());

        let mut values = entity.values();
        values.push(entity.id().into());

        let changed = self
            .context
            .execute_write(&sql, params_from_iter(values))?;
        Ok(changed > 0)
    }

    pub fn remove(&self, entity: &E) -> Result<bool, StorageError> {
        let sql = format!("DELETE FROM {} WHERE id = ?1", E::TABLE);
        trace!("event=delete table={} id={}", E::TABLE, entity.id());

        let changed = self.context.execute_write(&sql, params![entity.id()])?;
        Ok(changed > 0)
    }

    pub fn count(&self) -> Result<usize, StorageError> {
        let sql = format!("SELECT COUNT(*) FROM {}", E::TABLE);
        let count: i64 = self
            .context
            .connection()
            .query_row(&sql, [], |row| row.get(0))?;
        Ok(count as usize)
    }
}
