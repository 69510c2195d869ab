use super::{Entity, FieldSpec};
use rowmap_core::{Error, Result};

use std::any::TypeId;
use std::collections::HashMap;
use std::sync::{OnceLock, RwLock};

/// Type-level metadata for one mapped field.
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    pub name: &'static str,

    /// The member exposes a public-equivalent read. `false` for members
    /// that were opted into the mapping despite being non-public.
    pub readable: bool,

    pub writable: bool,

    /// Outcome of the inclusion policy. Fields the policy excludes are not
    /// materialized at all, so this is `true` for every descriptor field.
    pub included: bool,
}

/// Static, type-level metadata for a mapped type: the primary key and the
/// ordered list of mapped fields.
///
/// Built at most once per type and cached for the process lifetime; safe
/// for concurrent reads from any thread.
#[derive(Debug)]
pub struct EntityDescriptor {
    entity_name: &'static str,
    primary_key: Option<usize>,
    fields: Vec<FieldDescriptor>,
}

static REGISTRY: OnceLock<RwLock<HashMap<TypeId, &'static EntityDescriptor>>> = OnceLock::new();

impl EntityDescriptor {
    /// Returns the cached descriptor for `T`, building it on first access.
    ///
    /// The build runs under the registry write lock, so concurrent first
    /// accesses produce exactly one descriptor; later readers only take the
    /// read lock. Zero or multiple primary-key marks, or a primary key the
    /// inclusion policy excludes, fail the build with a usage error.
    pub fn get<T: Entity>() -> Result<&'static EntityDescriptor> {
        let registry = REGISTRY.get_or_init(|| RwLock::new(HashMap::new()));

        if let Some(descriptor) = registry.read().unwrap().get(&TypeId::of::<T>()) {
            return Ok(descriptor);
        }

        let mut map = registry.write().unwrap();
        if let Some(descriptor) = map.get(&TypeId::of::<T>()) {
            return Ok(descriptor);
        }
        let descriptor: &'static EntityDescriptor =
            Box::leak(Box::new(Self::build(T::entity_name(), T::field_specs())?));
        map.insert(TypeId::of::<T>(), descriptor);
        Ok(descriptor)
    }

    fn build(entity_name: &'static str, specs: Vec<FieldSpec>) -> Result<EntityDescriptor> {
        let mut fields = Vec::new();
        let mut primary_key = None;
        let mut key_marks = 0usize;

        for spec in &specs {
            let included = !spec.ignored && (spec.public_read || spec.opt_in);

            if spec.primary_key {
                key_marks += 1;
                if !included {
                    return Err(Error::usage(format!(
                        "primary key field {}.{} is excluded from the mapping",
                        entity_name, spec.name
                    )));
                }
            }

            if !included {
                continue;
            }

            if spec.primary_key {
                primary_key = Some(fields.len());
            }
            fields.push(FieldDescriptor {
                name: spec.name,
                readable: spec.public_read,
                writable: spec.writable,
                included: true,
            });
        }

        match key_marks {
            0 => Err(Error::usage(format!(
                "no primary key declared for {entity_name}"
            ))),
            1 => Ok(EntityDescriptor {
                entity_name,
                primary_key,
                fields,
            }),
            n => Err(Error::usage(format!(
                "{n} fields declared as primary key for {entity_name}; exactly one is required"
            ))),
        }
    }

    pub fn entity_name(&self) -> &'static str {
        self.entity_name
    }

    pub fn primary_key(&self) -> Option<&FieldDescriptor> {
        self.primary_key.map(|index| &self.fields[index])
    }

    /// The mapped fields, in declaration order.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|field| field.name)
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Case-insensitive field lookup, used for column-to-field matching
    /// when hydrating from a row.
    pub fn field_ignore_case(&self, name: &str) -> Option<&FieldDescriptor> {
        self.field(name)
            .or_else(|| {
                self.fields
                    .iter()
                    .find(|field| field.name.eq_ignore_ascii_case(name))
            })
    }
}
