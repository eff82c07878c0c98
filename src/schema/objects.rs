use serde::{Deserialize, Serialize};
use std::fmt;

/// The kinds of catalog objects pgdrift can compare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SchemaObjectKind {
    Table,
    Function,
    Procedure,
    Aggregate,
    Window,
    Sequence,
    View,
    MaterializedView,
    Index,
}

impl fmt::Display for SchemaObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaObjectKind::Table => write!(f, "TABLE"),
            SchemaObjectKind::Function => write!(f, "FUNCTION"),
            SchemaObjectKind::Procedure => write!(f, "PROCEDURE"),
            SchemaObjectKind::Aggregate => write!(f, "AGGREGATE"),
            SchemaObjectKind::Window => write!(f, "WINDOW"),
            SchemaObjectKind::Sequence => write!(f, "SEQUENCE"),
            SchemaObjectKind::View => write!(f, "VIEW"),
            SchemaObjectKind::MaterializedView => write!(f, "MATERIALIZED VIEW"),
            SchemaObjectKind::Index => write!(f, "INDEX"),
        }
    }
}

impl SchemaObjectKind {
    /// All comparable kinds, in dispatch order
    pub const ALL: [SchemaObjectKind; 9] = [
        SchemaObjectKind::Table,
        SchemaObjectKind::Function,
        SchemaObjectKind::Procedure,
        SchemaObjectKind::Aggregate,
        SchemaObjectKind::Window,
        SchemaObjectKind::Sequence,
        SchemaObjectKind::View,
        SchemaObjectKind::MaterializedView,
        SchemaObjectKind::Index,
    ];

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "table" => Some(SchemaObjectKind::Table),
            "function" => Some(SchemaObjectKind::Function),
            "procedure" => Some(SchemaObjectKind::Procedure),
            "aggregate" => Some(SchemaObjectKind::Aggregate),
            "window" => Some(SchemaObjectKind::Window),
            "sequence" => Some(SchemaObjectKind::Sequence),
            "view" => Some(SchemaObjectKind::View),
            "materialized_view" | "materialized view" => Some(SchemaObjectKind::MaterializedView),
            "index" => Some(SchemaObjectKind::Index),
            _ => None,
        }
    }
}

/// The tuple that uniquely names an object within one snapshot side.
///
/// `identity_args` disambiguates overloaded callables; it is `None` for
/// non-callable kinds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectIdentity {
    pub kind: SchemaObjectKind,
    pub schema: String,
    pub name: String,
    pub identity_args: Option<String>,
}

impl ObjectIdentity {
    pub fn new(kind: SchemaObjectKind, schema: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind,
            schema: schema.into(),
            name: name.into(),
            identity_args: None,
        }
    }

    pub fn with_args(mut self, args: impl Into<String>) -> Self {
        self.identity_args = Some(args.into());
        self
    }

    /// schema.name, with the identity argument list appended for callables
    pub fn fully_qualified_name(&self) -> String {
        match &self.identity_args {
            Some(args) => format!("{}.{}({})", self.schema, self.name, args),
            None => format!("{}.{}", self.schema, self.name),
        }
    }
}

impl fmt::Display for ObjectIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.fully_qualified_name())
    }
}

/// Provolatile classification of a callable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Volatility {
    Immutable,
    Stable,
    Volatile,
}

impl Volatility {
    /// Decode the single-character pg_proc.provolatile flag
    pub fn from_flag(flag: char) -> Option<Self> {
        match flag {
            'i' => Some(Volatility::Immutable),
            's' => Some(Volatility::Stable),
            'v' => Some(Volatility::Volatile),
            _ => None,
        }
    }
}

impl fmt::Display for Volatility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Volatility::Immutable => write!(f, "IMMUTABLE"),
            Volatility::Stable => write!(f, "STABLE"),
            Volatility::Volatile => write!(f, "VOLATILE"),
        }
    }
}

/// The callable subset of `SchemaObjectKind` (pg_proc.prokind)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CallableKind {
    Function,
    Procedure,
    Aggregate,
    Window,
}

impl CallableKind {
    /// Decode the single-character pg_proc.prokind flag
    pub fn from_flag(flag: char) -> Option<Self> {
        match flag {
            'f' => Some(CallableKind::Function),
            'p' => Some(CallableKind::Procedure),
            'a' => Some(CallableKind::Aggregate),
            'w' => Some(CallableKind::Window),
            _ => None,
        }
    }

    pub fn object_kind(&self) -> SchemaObjectKind {
        match self {
            CallableKind::Function => SchemaObjectKind::Function,
            CallableKind::Procedure => SchemaObjectKind::Procedure,
            CallableKind::Aggregate => SchemaObjectKind::Aggregate,
            CallableKind::Window => SchemaObjectKind::Window,
        }
    }
}

/// A function, procedure, aggregate, or window function
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionSchema {
    pub schema_name: String,
    pub function_name: String,
    /// Identity argument list as reported by pg_get_function_identity_arguments
    pub identity_arguments: String,
    pub kind: CallableKind,
    pub owner: String,
    pub comment: Option<String>,
    /// Source text of the body (or full definition for SQL-bodied callables)
    pub definition: String,
    pub return_type: String,
    pub language: String,
    pub volatility: Volatility,
    pub strict: bool,
    pub security_definer: bool,
    pub returns_set: bool,
    pub cost: f64,
    pub estimated_rows: f64,
    /// proconfig entries, in catalog order
    pub config_params: Vec<String>,
}

/// One column of a table, in attnum order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSchema {
    pub name: String,
    pub data_type: String,
    pub nullable: bool,
    pub default: Option<String>,
    pub comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSchema {
    pub schema_name: String,
    pub table_name: String,
    pub owner: String,
    pub comment: Option<String>,
    /// Columns in declaration order
    pub columns: Vec<ColumnSchema>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequenceSchema {
    pub schema_name: String,
    pub sequence_name: String,
    pub owner: String,
    pub comment: Option<String>,
    pub data_type: String,
    pub start_value: i64,
    pub increment: i64,
    pub min_value: i64,
    pub max_value: i64,
    pub cache_size: i64,
    pub cycle: bool,
}

/// A view or materialized view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewSchema {
    pub schema_name: String,
    pub view_name: String,
    pub owner: String,
    pub comment: Option<String>,
    pub definition: String,
    pub materialized: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexSchema {
    pub schema_name: String,
    pub index_name: String,
    pub table_name: String,
    pub comment: Option<String>,
    pub definition: String,
    pub unique: bool,
    pub primary: bool,
    pub tablespace: Option<String>,
}

/// One comparable catalog object, built fresh per run and never mutated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "object", rename_all = "snake_case")]
pub enum SchemaObject {
    Callable(FunctionSchema),
    Table(TableSchema),
    Sequence(SequenceSchema),
    View(ViewSchema),
    Index(IndexSchema),
}

impl SchemaObject {
    pub fn kind(&self) -> SchemaObjectKind {
        match self {
            SchemaObject::Callable(f) => f.kind.object_kind(),
            SchemaObject::Table(_) => SchemaObjectKind::Table,
            SchemaObject::Sequence(_) => SchemaObjectKind::Sequence,
            SchemaObject::View(v) => {
                if v.materialized {
                    SchemaObjectKind::MaterializedView
                } else {
                    SchemaObjectKind::View
                }
            }
            SchemaObject::Index(_) => SchemaObjectKind::Index,
        }
    }

    pub fn schema_name(&self) -> &str {
        match self {
            SchemaObject::Callable(f) => &f.schema_name,
            SchemaObject::Table(t) => &t.schema_name,
            SchemaObject::Sequence(s) => &s.schema_name,
            SchemaObject::View(v) => &v.schema_name,
            SchemaObject::Index(i) => &i.schema_name,
        }
    }

    pub fn object_name(&self) -> &str {
        match self {
            SchemaObject::Callable(f) => &f.function_name,
            SchemaObject::Table(t) => &t.table_name,
            SchemaObject::Sequence(s) => &s.sequence_name,
            SchemaObject::View(v) => &v.view_name,
            SchemaObject::Index(i) => &i.index_name,
        }
    }

    /// Body or defining query, for kinds that have one
    pub fn definition_text(&self) -> Option<&str> {
        match self {
            SchemaObject::Callable(f) => Some(&f.definition),
            SchemaObject::View(v) => Some(&v.definition),
            SchemaObject::Index(i) => Some(&i.definition),
            SchemaObject::Table(_) | SchemaObject::Sequence(_) => None,
        }
    }

    pub fn identity(&self) -> ObjectIdentity {
        let mut identity =
            ObjectIdentity::new(self.kind(), self.schema_name(), self.object_name());
        if let SchemaObject::Callable(f) = self {
            identity = identity.with_args(f.identity_arguments.clone());
        }
        identity
    }
}
