pub mod objects;

pub use objects::{
    CallableKind, ColumnSchema, FunctionSchema, IndexSchema, ObjectIdentity, SchemaObject,
    SchemaObjectKind, SequenceSchema, TableSchema, ViewSchema, Volatility,
};
