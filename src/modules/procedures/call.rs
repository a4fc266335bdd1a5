use sqlx::postgres::PgArguments;
use sqlx::query::Query;
use sqlx::{PgConnection, Postgres};
use tracing::debug;

use super::decode::record_from_row;
use super::record::Record;

/// Typed value bound to a named procedure parameter
#[derive(Debug, Clone, PartialEq)]
pub enum ProcedureParam {
    Text(Option<String>),
    Int(i32),
    Bool(bool),
}

/// A stored procedure invocation with named parameters.
///
/// Renders to PostgreSQL named-argument notation, e.g.
/// `SELECT * FROM "AssetManagement_GetAttachmentPathByMasterID"("MasterID" => $1, "InstanceID" => $2)`.
/// Parameters are bound in the order they were added.
#[derive(Debug, Clone)]
pub struct ProcedureCall {
    name: &'static str,
    params: Vec<(&'static str, ProcedureParam)>,
}

impl ProcedureCall {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            params: Vec::new(),
        }
    }

    pub fn text(mut self, param: &'static str, value: impl Into<Option<String>>) -> Self {
        self.params.push((param, ProcedureParam::Text(value.into())));
        self
    }

    pub fn int(mut self, param: &'static str, value: i32) -> Self {
        self.params.push((param, ProcedureParam::Int(value)));
        self
    }

    pub fn boolean(mut self, param: &'static str, value: bool) -> Self {
        self.params.push((param, ProcedureParam::Bool(value)));
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    #[allow(dead_code)]
    pub fn params(&self) -> &[(&'static str, ProcedureParam)] {
        &self.params
    }

    pub fn sql(&self) -> String {
        let arguments = self
            .params
            .iter()
            .enumerate()
            .map(|(i, (param, _))| format!("{} => ${}", quote_ident(param), i + 1))
            .collect::<Vec<_>>()
            .join(", ");

        format!("SELECT * FROM {}({})", quote_ident(self.name), arguments)
    }

    fn bind<'q>(&self, sql: &'q str) -> Query<'q, Postgres, PgArguments> {
        let mut query = sqlx::query(sql);
        for (_, param) in &self.params {
            query = match param {
                ProcedureParam::Text(value) => query.bind(value.clone()),
                ProcedureParam::Int(value) => query.bind(*value),
                ProcedureParam::Bool(value) => query.bind(*value),
            };
        }
        query
    }

    /// Execute and normalize every result row
    pub async fn fetch_records(&self, conn: &mut PgConnection) -> Result<Vec<Record>, sqlx::Error> {
        let sql = self.sql();
        debug!("Executing procedure {}: {}", self.name, sql);

        let rows = self.bind(&sql).fetch_all(&mut *conn).await?;
        rows.iter().map(record_from_row).collect()
    }

    /// Execute and normalize the first result row, if any
    pub async fn fetch_first(&self, conn: &mut PgConnection) -> Result<Option<Record>, sqlx::Error> {
        let sql = self.sql();
        debug!("Executing procedure {}: {}", self.name, sql);

        let row = self.bind(&sql).fetch_optional(&mut *conn).await?;
        row.as_ref().map(record_from_row).transpose()
    }
}

/// Quote an identifier for PostgreSQL, doubling embedded quotes
fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sql_uses_named_arguments_in_bind_order() {
        let call = ProcedureCall::new("AssetManagement_GetAttachmentPathByMasterID")
            .text("MasterID", "A100".to_string())
            .text("InstanceID", "I-7".to_string());

        assert_eq!(
            call.sql(),
            r#"SELECT * FROM "AssetManagement_GetAttachmentPathByMasterID"("MasterID" => $1, "InstanceID" => $2)"#
        );
    }

    #[test]
    fn test_sql_quotes_names_with_spaces() {
        let call = ProcedureCall::new("Asset Management_GetAssetDataByMasterID")
            .text("InstanceID", "42".to_string());

        assert_eq!(
            call.sql(),
            r#"SELECT * FROM "Asset Management_GetAssetDataByMasterID"("InstanceID" => $1)"#
        );
    }

    #[test]
    fn test_sql_without_params() {
        let call = ProcedureCall::new("Ping");
        assert_eq!(call.sql(), r#"SELECT * FROM "Ping"()"#);
    }

    #[test]
    fn test_quote_ident_escapes_quotes() {
        assert_eq!(quote_ident(r#"we"ird"#), r#""we""ird""#);
    }

    #[test]
    fn test_params_keep_types() {
        let call = ProcedureCall::new("AssetManagement_UpdateAssetData")
            .boolean("PhysicalVerification", true)
            .int("Status", 2)
            .text("Comments", None);

        assert_eq!(
            call.params(),
            &[
                ("PhysicalVerification", ProcedureParam::Bool(true)),
                ("Status", ProcedureParam::Int(2)),
                ("Comments", ProcedureParam::Text(None)),
            ]
        );
    }
}
