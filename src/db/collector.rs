use tokio_postgres::Client;
use tracing::debug;

use crate::error::{PgDriftError, Result};
use crate::schema::{
    CallableKind, ColumnSchema, FunctionSchema, IndexSchema, SchemaObject, SequenceSchema,
    TableSchema, ViewSchema, Volatility,
};

/// Materializes typed schema-object snapshots from a live connection.
///
/// The collector is the only component that queries the catalog; the
/// comparison engine consumes its output and performs no I/O of its own.
pub struct CatalogCollector<'a> {
    client: &'a Client,
}

impl<'a> CatalogCollector<'a> {
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Collect every comparable object in one schema
    pub async fn collect_schema(&self, schema: &str) -> Result<Vec<SchemaObject>> {
        let mut objects = Vec::new();
        objects.extend(self.collect_callables(schema).await?);
        objects.extend(self.collect_tables(schema).await?);
        objects.extend(self.collect_sequences(schema).await?);
        objects.extend(self.collect_views(schema).await?);
        objects.extend(self.collect_indexes(schema).await?);
        debug!(schema = schema, objects = objects.len(), "snapshot collected");
        Ok(objects)
    }

    /// Functions, procedures, aggregates, and window functions from pg_proc
    pub async fn collect_callables(&self, schema: &str) -> Result<Vec<SchemaObject>> {
        let rows = self
            .client
            .query(
                r#"
                SELECT p.proname,
                       pg_get_function_identity_arguments(p.oid),
                       p.prokind::text,
                       pg_get_userbyid(p.proowner),
                       obj_description(p.oid, 'pg_proc'),
                       p.prosrc,
                       pg_get_function_result(p.oid),
                       l.lanname,
                       p.provolatile::text,
                       p.proisstrict,
                       p.prosecdef,
                       p.proretset,
                       p.procost::float8,
                       p.prorows::float8,
                       p.proconfig
                FROM pg_proc p
                JOIN pg_namespace n ON n.oid = p.pronamespace
                JOIN pg_language l ON l.oid = p.prolang
                WHERE n.nspname = $1
                ORDER BY p.proname, 2
                "#,
                &[&schema],
            )
            .await
            .map_err(|e| collection_error("callable", schema, e))?;

        let mut objects = Vec::with_capacity(rows.len());
        for row in rows {
            let prokind: String = row.get(2);
            let kind = prokind
                .chars()
                .next()
                .and_then(CallableKind::from_flag)
                .ok_or_else(|| PgDriftError::Collection {
                    kind: "callable".to_string(),
                    schema: schema.to_string(),
                    message: format!("unexpected prokind '{}'", prokind),
                    source: None,
                })?;
            let provolatile: String = row.get(8);
            let volatility = provolatile
                .chars()
                .next()
                .and_then(Volatility::from_flag)
                .ok_or_else(|| PgDriftError::Collection {
                    kind: "callable".to_string(),
                    schema: schema.to_string(),
                    message: format!("unexpected provolatile '{}'", provolatile),
                    source: None,
                })?;

            objects.push(SchemaObject::Callable(FunctionSchema {
                schema_name: schema.to_string(),
                function_name: row.get(0),
                identity_arguments: row.get(1),
                kind,
                owner: row.get(3),
                comment: row.get(4),
                definition: row.get(5),
                return_type: row.get::<_, Option<String>>(6).unwrap_or_default(),
                language: row.get(7),
                volatility,
                strict: row.get(9),
                security_definer: row.get(10),
                returns_set: row.get(11),
                cost: row.get(12),
                estimated_rows: row.get(13),
                config_params: row.get::<_, Option<Vec<String>>>(14).unwrap_or_default(),
            }));
        }
        Ok(objects)
    }

    /// Ordinary tables with their columns in attnum order
    pub async fn collect_tables(&self, schema: &str) -> Result<Vec<SchemaObject>> {
        let rows = self
            .client
            .query(
                r#"
                SELECT c.relname,
                       pg_get_userbyid(c.relowner),
                       obj_description(c.oid, 'pg_class'),
                       a.attname,
                       format_type(a.atttypid, a.atttypmod),
                       NOT a.attnotnull,
                       pg_get_expr(d.adbin, d.adrelid),
                       col_description(a.attrelid, a.attnum)
                FROM pg_class c
                JOIN pg_namespace n ON n.oid = c.relnamespace
                JOIN pg_attribute a ON a.attrelid = c.oid
                LEFT JOIN pg_attrdef d ON d.adrelid = a.attrelid AND d.adnum = a.attnum
                WHERE n.nspname = $1
                  AND c.relkind = 'r'
                  AND a.attnum > 0
                  AND NOT a.attisdropped
                ORDER BY c.relname, a.attnum
                "#,
                &[&schema],
            )
            .await
            .map_err(|e| collection_error("table", schema, e))?;

        // Rows arrive grouped by table name; fold consecutive rows into one
        // TableSchema each
        let mut objects: Vec<SchemaObject> = Vec::new();
        let mut current: Option<TableSchema> = None;
        for row in rows {
            let table_name: String = row.get(0);
            let column = ColumnSchema {
                name: row.get(3),
                data_type: row.get(4),
                nullable: row.get(5),
                default: row.get(6),
                comment: row.get(7),
            };

            match current.as_mut() {
                Some(table) if table.table_name == table_name => table.columns.push(column),
                _ => {
                    if let Some(finished) = current.take() {
                        objects.push(SchemaObject::Table(finished));
                    }
                    current = Some(TableSchema {
                        schema_name: schema.to_string(),
                        table_name,
                        owner: row.get(1),
                        comment: row.get(2),
                        columns: vec![column],
                    });
                }
            }
        }
        if let Some(finished) = current.take() {
            objects.push(SchemaObject::Table(finished));
        }
        Ok(objects)
    }

    pub async fn collect_sequences(&self, schema: &str) -> Result<Vec<SchemaObject>> {
        let rows = self
            .client
            .query(
                r#"
                SELECT s.sequencename,
                       s.sequenceowner,
                       (SELECT obj_description(c.oid, 'pg_class')
                        FROM pg_class c
                        JOIN pg_namespace n ON n.oid = c.relnamespace
                        WHERE c.relname = s.sequencename AND n.nspname = s.schemaname),
                       s.data_type::text,
                       s.start_value,
                       s.increment_by,
                       s.min_value,
                       s.max_value,
                       s.cache_size,
                       s.cycle
                FROM pg_sequences s
                WHERE s.schemaname = $1
                ORDER BY s.sequencename
                "#,
                &[&schema],
            )
            .await
            .map_err(|e| collection_error("sequence", schema, e))?;

        Ok(rows
            .iter()
            .map(|row| {
                SchemaObject::Sequence(SequenceSchema {
                    schema_name: schema.to_string(),
                    sequence_name: row.get(0),
                    owner: row.get(1),
                    comment: row.get(2),
                    data_type: row.get(3),
                    start_value: row.get(4),
                    increment: row.get(5),
                    min_value: row.get(6),
                    max_value: row.get(7),
                    cache_size: row.get(8),
                    cycle: row.get(9),
                })
            })
            .collect())
    }

    /// Views and materialized views
    pub async fn collect_views(&self, schema: &str) -> Result<Vec<SchemaObject>> {
        let rows = self
            .client
            .query(
                r#"
                SELECT c.relname,
                       pg_get_userbyid(c.relowner),
                       obj_description(c.oid, 'pg_class'),
                       pg_get_viewdef(c.oid),
                       c.relkind = 'm'
                FROM pg_class c
                JOIN pg_namespace n ON n.oid = c.relnamespace
                WHERE n.nspname = $1
                  AND c.relkind IN ('v', 'm')
                ORDER BY c.relname
                "#,
                &[&schema],
            )
            .await
            .map_err(|e| collection_error("view", schema, e))?;

        Ok(rows
            .iter()
            .map(|row| {
                SchemaObject::View(ViewSchema {
                    schema_name: schema.to_string(),
                    view_name: row.get(0),
                    owner: row.get(1),
                    comment: row.get(2),
                    definition: row.get(3),
                    materialized: row.get(4),
                })
            })
            .collect())
    }

    pub async fn collect_indexes(&self, schema: &str) -> Result<Vec<SchemaObject>> {
        let rows = self
            .client
            .query(
                r#"
                SELECT i.indexname,
                       i.tablename,
                       obj_description(c.oid, 'pg_class'),
                       i.indexdef,
                       x.indisunique,
                       x.indisprimary,
                       i.tablespace
                FROM pg_indexes i
                JOIN pg_namespace n ON n.nspname = i.schemaname
                JOIN pg_class c ON c.relname = i.indexname AND c.relnamespace = n.oid
                JOIN pg_index x ON x.indexrelid = c.oid
                WHERE i.schemaname = $1
                ORDER BY i.indexname
                "#,
                &[&schema],
            )
            .await
            .map_err(|e| collection_error("index", schema, e))?;

        Ok(rows
            .iter()
            .map(|row| {
                SchemaObject::Index(IndexSchema {
                    schema_name: schema.to_string(),
                    index_name: row.get(0),
                    table_name: row.get(1),
                    comment: row.get(2),
                    definition: row.get(3),
                    unique: row.get(4),
                    primary: row.get(5),
                    tablespace: row.get(6),
                })
            })
            .collect())
    }
}

fn collection_error(kind: &str, schema: &str, err: tokio_postgres::Error) -> PgDriftError {
    PgDriftError::Collection {
        kind: kind.to_string(),
        schema: schema.to_string(),
        message: err.to_string(),
        source: Some(err),
    }
}
