#![allow(dead_code)]

use pgdrift::schema::{
    CallableKind, ColumnSchema, FunctionSchema, IndexSchema, SchemaObject, SequenceSchema,
    TableSchema, ViewSchema, Volatility,
};

pub fn function(schema: &str, name: &str, args: &str, definition: &str) -> FunctionSchema {
    FunctionSchema {
        schema_name: schema.to_string(),
        function_name: name.to_string(),
        identity_arguments: args.to_string(),
        kind: CallableKind::Function,
        owner: "postgres".to_string(),
        comment: None,
        definition: definition.to_string(),
        return_type: "numeric".to_string(),
        language: "plpgsql".to_string(),
        volatility: Volatility::Volatile,
        strict: false,
        security_definer: false,
        returns_set: false,
        cost: 100.0,
        estimated_rows: 0.0,
        config_params: vec![],
    }
}

pub fn column(name: &str, data_type: &str) -> ColumnSchema {
    ColumnSchema {
        name: name.to_string(),
        data_type: data_type.to_string(),
        nullable: true,
        default: None,
        comment: None,
    }
}

pub fn table(schema: &str, name: &str, columns: Vec<ColumnSchema>) -> TableSchema {
    TableSchema {
        schema_name: schema.to_string(),
        table_name: name.to_string(),
        owner: "postgres".to_string(),
        comment: None,
        columns,
    }
}

pub fn sequence(schema: &str, name: &str) -> SequenceSchema {
    SequenceSchema {
        schema_name: schema.to_string(),
        sequence_name: name.to_string(),
        owner: "postgres".to_string(),
        comment: None,
        data_type: "bigint".to_string(),
        start_value: 1,
        increment: 1,
        min_value: 1,
        max_value: i64::MAX,
        cache_size: 1,
        cycle: false,
    }
}

pub fn view(schema: &str, name: &str, definition: &str) -> ViewSchema {
    ViewSchema {
        schema_name: schema.to_string(),
        view_name: name.to_string(),
        owner: "postgres".to_string(),
        comment: None,
        definition: definition.to_string(),
        materialized: false,
    }
}

pub fn index(schema: &str, name: &str, table: &str, definition: &str) -> IndexSchema {
    IndexSchema {
        schema_name: schema.to_string(),
        index_name: name.to_string(),
        table_name: table.to_string(),
        comment: None,
        definition: definition.to_string(),
        unique: false,
        primary: false,
        tablespace: None,
    }
}
