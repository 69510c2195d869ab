use super::{Entity, EntityDescriptor};
use rowmap_core::driver::Rows;
use rowmap_core::{Error, Result, Value};

use std::collections::HashMap;
use std::ops::{Deref, DerefMut};

/// An entity instance with change tracking.
///
/// The wrapper holds a lazily captured snapshot of the instance's field
/// values. Nothing is copied until the first mutable access: dereferencing
/// mutably materializes the baseline from the current values, and every
/// later read of dirty state compares current values against it. A freshly
/// wrapped instance therefore reports itself new, clean, and not yet
/// baselined.
///
/// Hydrating from a row ([`from_current_row`](Tracked::from_current_row))
/// baselines with the loaded values and clears the new flag. After a
/// persist, call [`mark_persisted`](Tracked::mark_persisted) to re-baseline
/// at the just-written values and clear every dirty flag.
pub struct Tracked<T: Entity> {
    entity: T,
    descriptor: &'static EntityDescriptor,
    baseline: Option<HashMap<&'static str, Value>>,
    is_new: bool,
}

impl<T: Entity> Tracked<T> {
    /// Wraps a freshly constructed, never-persisted instance.
    pub fn new(entity: T) -> Result<Self> {
        Ok(Self {
            descriptor: EntityDescriptor::get::<T>()?,
            entity,
            baseline: None,
            is_new: true,
        })
    }

    pub fn descriptor(&self) -> &'static EntityDescriptor {
        self.descriptor
    }

    pub fn into_inner(self) -> T {
        self.entity
    }

    /// `true` until the instance has been loaded from or persisted to
    /// storage.
    pub fn is_new(&self) -> bool {
        self.is_new
    }

    /// `true` once the snapshot baseline has been materialized.
    pub fn baseline_initialized(&self) -> bool {
        self.baseline.is_some()
    }

    /// `true` if any field differs from the snapshot baseline. Trivially
    /// `false` while the baseline is uninitialized.
    pub fn is_dirty(&self) -> bool {
        let Some(baseline) = &self.baseline else {
            return false;
        };
        self.descriptor
            .fields()
            .iter()
            .any(|field| self.field_differs(field.name, baseline))
    }

    /// Per-field dirty state. Unknown field names are a usage error.
    pub fn is_dirty_field(&self, name: &str) -> Result<bool> {
        let descriptor = self.descriptor;
        let field = descriptor.field(name).ok_or_else(|| {
            Error::usage(format!(
                "{} has no mapped field {name}",
                descriptor.entity_name()
            ))
        })?;

        match &self.baseline {
            Some(baseline) => Ok(self.field_differs(field.name, baseline)),
            None => Ok(false),
        }
    }

    /// The names of the fields currently dirty; recomputed on each call.
    pub fn dirty_fields(&self) -> Vec<&'static str> {
        let Some(baseline) = &self.baseline else {
            return Vec::new();
        };
        self.descriptor
            .fields()
            .iter()
            .filter(|field| self.field_differs(field.name, baseline))
            .map(|field| field.name)
            .collect()
    }

    /// Writes the primary-key field directly, bypassing dirty marking.
    ///
    /// Primary keys are identity, not mutable business state: the baseline
    /// entry is rewritten along with the field, so the write never shows up
    /// as a dirty field.
    pub fn set_primary_key(&mut self, value: impl Into<Value>) -> Result<()> {
        let descriptor = self.descriptor;
        let key = descriptor
            .primary_key()
            .ok_or_else(|| Error::usage(format!("{} has no primary key", descriptor.entity_name())))?;

        let value = value.into();
        self.entity.write_field(key.name, value.clone())?;
        if let Some(baseline) = &mut self.baseline {
            baseline.insert(key.name, value);
        }
        Ok(())
    }

    /// Re-baselines the snapshot at the current field values and clears the
    /// new flag. Call after a successful insert or update.
    pub fn mark_persisted(&mut self) {
        self.capture_baseline();
        self.is_new = false;
    }

    /// Maps the cursor's current row onto a default-constructed instance,
    /// baselines it with the loaded values, and clears the new flag.
    ///
    /// Columns are matched to mapped fields case-insensitively; columns
    /// without a writable mapped field are skipped.
    pub fn from_current_row(rows: &dyn Rows) -> Result<Self>
    where
        T: Default,
    {
        let mut tracked = Self::new(T::default())?;
        let descriptor = tracked.descriptor;

        for index in 0..rows.column_count() {
            let Some(column) = rows.column_name(index) else {
                continue;
            };
            let Some(field) = descriptor.field_ignore_case(column) else {
                continue;
            };
            if !field.writable {
                continue;
            }
            let value = rows.get(index)?;
            tracked.entity.write_field(field.name, value)?;
        }

        tracked.capture_baseline();
        tracked.is_new = false;
        Ok(tracked)
    }

    /// Advances the cursor and maps the next row; `None` at the end.
    pub fn hydrate_next(rows: &mut dyn Rows) -> Result<Option<Self>>
    where
        T: Default,
    {
        if rows.advance()? {
            Ok(Some(Self::from_current_row(rows)?))
        } else {
            Ok(None)
        }
    }

    fn capture_baseline(&mut self) {
        let mut baseline = HashMap::new();
        for field in self.descriptor.fields() {
            if let Some(value) = self.entity.read_field(field.name) {
                baseline.insert(field.name, value);
            }
        }
        self.baseline = Some(baseline);
    }

    fn field_differs(&self, name: &'static str, baseline: &HashMap<&'static str, Value>) -> bool {
        match (self.entity.read_field(name), baseline.get(name)) {
            (Some(current), Some(original)) => current != *original,
            _ => false,
        }
    }
}

impl<T: Entity> Deref for Tracked<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.entity
    }
}

impl<T: Entity> DerefMut for Tracked<T> {
    /// Hands out mutable access, materializing the snapshot baseline first
    /// so the upcoming writes are tracked against the pre-write values.
    fn deref_mut(&mut self) -> &mut T {
        if self.baseline.is_none() {
            self.capture_baseline();
        }
        &mut self.entity
    }
}
