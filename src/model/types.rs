//! Schema-mapping types: one static `EntityDef` per record kind.

use crate::service::WriteHook;

/// Column type. Drives DDL, SQL casts, input coercion and row decoding.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ColumnType {
    Serial,
    Integer,
    Varchar(u32),
    Text,
    Decimal(u8, u8),
    Boolean,
    Date,
    Time,
    /// Local date-time as supplied by clients (stored in UTC).
    Timestamp,
    /// Audit timestamps maintained by the store.
    TimestampTz,
    Enum(&'static [&'static str]),
    Json,
}

impl ColumnType {
    /// DDL type. Enum columns use the per-column type created by migration.
    pub fn ddl(&self, enum_type: &str) -> String {
        match self {
            ColumnType::Serial => "SERIAL".into(),
            ColumnType::Integer => "INTEGER".into(),
            ColumnType::Varchar(n) => format!("VARCHAR({})", n),
            ColumnType::Text => "TEXT".into(),
            ColumnType::Decimal(p, s) => format!("NUMERIC({}, {})", p, s),
            ColumnType::Boolean => "BOOLEAN".into(),
            ColumnType::Date => "DATE".into(),
            ColumnType::Time => "TIME".into(),
            ColumnType::Timestamp => "TIMESTAMP".into(),
            ColumnType::TimestampTz => "TIMESTAMPTZ".into(),
            ColumnType::Enum(_) => enum_type.to_string(),
            ColumnType::Json => "JSONB".into(),
        }
    }

    /// Type used for `$n::<cast>` on bound parameters. Length-free so casts never truncate.
    pub fn cast(&self, enum_type: &str) -> String {
        match self {
            ColumnType::Serial | ColumnType::Integer => "integer".into(),
            ColumnType::Varchar(_) | ColumnType::Text => "text".into(),
            ColumnType::Decimal(..) => "numeric".into(),
            ColumnType::Boolean => "boolean".into(),
            ColumnType::Date => "date".into(),
            ColumnType::Time => "time".into(),
            ColumnType::Timestamp => "timestamp".into(),
            ColumnType::TimestampTz => "timestamptz".into(),
            ColumnType::Enum(_) => enum_type.to_string(),
            ColumnType::Json => "jsonb".into(),
        }
    }

    /// Selected as text and decoded from the string form.
    pub fn selects_as_text(&self) -> bool {
        matches!(self, ColumnType::Enum(_) | ColumnType::Decimal(..))
    }
}

/// Who may write a column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    /// Accepted from request bodies.
    Client,
    /// Maintained by the store (serial ids, audit timestamps, soft-delete marker).
    Generated,
    /// Set only by an entity's write hook.
    Server,
}

#[derive(Clone, Copy, Debug)]
pub struct ColumnDef {
    pub name: &'static str,
    pub ty: ColumnType,
    pub nullable: bool,
    /// SQL default expression.
    pub default: Option<&'static str>,
    pub unique: bool,
    /// Referenced table; the referenced column is always `id`.
    pub references: Option<&'static str>,
    pub access: Access,
    /// Never selected or returned.
    pub sensitive: bool,
}

impl ColumnDef {
    pub const fn new(name: &'static str, ty: ColumnType) -> Self {
        ColumnDef {
            name,
            ty,
            nullable: true,
            default: None,
            unique: false,
            references: None,
            access: Access::Client,
            sensitive: false,
        }
    }

    pub const fn required(mut self) -> Self {
        self.nullable = false;
        self
    }

    pub const fn defaults_to(mut self, expr: &'static str) -> Self {
        self.default = Some(expr);
        self
    }

    pub const fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    pub const fn references(mut self, table: &'static str) -> Self {
        self.references = Some(table);
        self
    }

    pub const fn generated(mut self) -> Self {
        self.access = Access::Generated;
        self
    }

    pub const fn server(mut self) -> Self {
        self.access = Access::Server;
        self
    }

    pub const fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }

    pub fn has_default(&self) -> bool {
        self.default.is_some() || matches!(self.ty, ColumnType::Serial)
    }

    pub fn is_client_writable(&self) -> bool {
        self.access == Access::Client && !self.sensitive
    }

    /// Exact-match list filters apply to scalar, visible columns.
    pub fn is_filterable(&self) -> bool {
        !self.sensitive && !matches!(self.ty, ColumnType::Json)
    }
}

/// How records of an entity are addressed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyDef {
    /// Store-generated integer id.
    Serial(&'static str),
    /// Client-supplied single integer key.
    Natural(&'static str),
    /// Two foreign ids (association records).
    Composite(&'static str, &'static str),
}

impl KeyDef {
    pub fn columns(&self) -> Vec<&'static str> {
        match *self {
            KeyDef::Serial(c) | KeyDef::Natural(c) => vec![c],
            KeyDef::Composite(a, b) => vec![a, b],
        }
    }

    pub fn is_composite(&self) -> bool {
        matches!(self, KeyDef::Composite(..))
    }

    /// True when `key` has the shape this definition expects.
    pub fn accepts(&self, key: &EntityKey) -> bool {
        matches!(
            (self, key),
            (KeyDef::Serial(_) | KeyDef::Natural(_), EntityKey::Single(_))
                | (KeyDef::Composite(..), EntityKey::Composite(..))
        )
    }
}

/// Concrete key value for one record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntityKey {
    Single(i64),
    Composite(i64, i64),
}

impl EntityKey {
    pub fn values(&self) -> Vec<i64> {
        match *self {
            EntityKey::Single(a) => vec![a],
            EntityKey::Composite(a, b) => vec![a, b],
        }
    }
}

pub struct EntityDef {
    /// Human-readable name used in "<name> not found".
    pub name: &'static str,
    pub table: &'static str,
    /// URL path segment of the resource collection.
    pub path: &'static str,
    pub key: KeyDef,
    pub columns: &'static [ColumnDef],
    pub hook: Option<&'static dyn WriteHook>,
}

impl EntityDef {
    pub fn column(&self, name: &str) -> Option<&ColumnDef> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Columns that may appear in responses.
    pub fn visible_columns(&self) -> impl Iterator<Item = &ColumnDef> {
        self.columns.iter().filter(|c| !c.sensitive)
    }

    pub fn is_key_column(&self, name: &str) -> bool {
        self.key.columns().contains(&name)
    }

    pub fn soft_deletes(&self) -> bool {
        self.column(DELETED_AT).is_some()
    }

    pub fn tracks_updates(&self) -> bool {
        self.column(UPDATED_AT).is_some()
    }

    /// Name of the PostgreSQL enum type backing `column`.
    pub fn enum_type_name(&self, column: &str) -> String {
        format!("{}_{}", self.table, column)
    }
}

impl std::fmt::Debug for EntityDef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityDef")
            .field("name", &self.name)
            .field("table", &self.table)
            .field("path", &self.path)
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

pub const CREATED_AT: &str = "created_at";
pub const UPDATED_AT: &str = "updated_at";
pub const DELETED_AT: &str = "deleted_at";
