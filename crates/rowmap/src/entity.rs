//! Entity metadata and per-instance change tracking.
//!
//! A mapped type implements [`Entity`] to declare its members and provide
//! by-name field access; [`EntityDescriptor`] is the memoized, type-level
//! view of that declaration, and [`Tracked`] wraps an instance to compute
//! field-level dirtiness against a lazily captured snapshot.

mod descriptor;
pub use descriptor::{EntityDescriptor, FieldDescriptor};

mod tracked;
pub use tracked::Tracked;

use rowmap_core::{Result, Value};

/// Capability description and field access for a mapped type.
///
/// This is the pluggable stand-in for reflection: a host supplies it by
/// hand, through code generation, or however it likes; the mapper only
/// consumes the declarations. Field names are the mapping names used for
/// column matching and tracking.
pub trait Entity: 'static {
    fn entity_name() -> &'static str;

    /// Declares the type's members and their mapping attributes. Read once
    /// per type; the derived [`EntityDescriptor`] is cached after that.
    fn field_specs() -> Vec<FieldSpec>;

    /// Reads a field by mapping name. `None` for names this type does not
    /// serve.
    fn read_field(&self, name: &str) -> Option<Value>;

    /// Writes a field by mapping name.
    fn write_field(&mut self, name: &str, value: Value) -> Result<()>;
}

/// A member declaration handed to the descriptor builder.
///
/// Visibility is declared, not discovered: `public_read` states that the
/// member exposes a public-equivalent read. A member is mapped by default
/// only when it does; `opt_in` pulls a non-public member into the mapping,
/// `ignored` keeps a member out regardless of anything else.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub name: &'static str,
    pub public_read: bool,
    pub writable: bool,
    pub ignored: bool,
    pub opt_in: bool,
    pub primary_key: bool,
}

impl FieldSpec {
    /// A public, writable member.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            public_read: true,
            writable: true,
            ignored: false,
            opt_in: false,
            primary_key: false,
        }
    }

    /// A public, writable member marked as the primary key.
    pub fn primary_key(name: &'static str) -> Self {
        Self {
            primary_key: true,
            ..Self::new(name)
        }
    }

    pub fn ignored(mut self) -> Self {
        self.ignored = true;
        self
    }

    pub fn non_public(mut self) -> Self {
        self.public_read = false;
        self
    }

    pub fn opt_in(mut self) -> Self {
        self.opt_in = true;
        self
    }

    pub fn read_only(mut self) -> Self {
        self.writable = false;
        self
    }
}
