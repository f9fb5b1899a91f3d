//! SQL text for the non-workday table.

use infra_config::{DatabaseConfig, TableDialect};

/// Statements for one configured table.
///
/// The table name is interpolated; `Settings::validate` restricts it to a
/// plain identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSql {
    pub create: String,
    pub delete_year: String,
    pub insert_prefix: String,
    pub select_year: String,
}

impl TableSql {
    pub fn new(config: &DatabaseConfig) -> Self {
        let table = &config.table;

        let create = match config.dialect {
            TableDialect::Mysql => format!(
                "CREATE TABLE IF NOT EXISTS {table} (\n    \
                 non_work_date DATE NOT NULL COMMENT 'non-working date',\n    \
                 description VARCHAR(255) COMMENT 'holiday name or weekend',\n    \
                 PRIMARY KEY (non_work_date)\n\
                 )"
            ),
            TableDialect::Doris => format!(
                "CREATE TABLE IF NOT EXISTS {table} (\n    \
                 non_work_date DATE NOT NULL COMMENT 'non-working date',\n    \
                 description VARCHAR(255) COMMENT 'holiday name or weekend'\n\
                 )\n\
                 UNIQUE KEY(non_work_date)\n\
                 DISTRIBUTED BY HASH(non_work_date) BUCKETS {buckets}\n\
                 PROPERTIES (\n    \
                 \"replication_num\" = \"{replicas}\",\n    \
                 \"enable_unique_key_merge_on_write\" = \"true\"\n\
                 )",
                buckets = config.buckets,
                replicas = config.replication_num,
            ),
        };

        Self {
            create,
            delete_year: format!("DELETE FROM {table} WHERE YEAR(non_work_date) = ?"),
            insert_prefix: format!("INSERT INTO {table} (non_work_date, description) "),
            select_year: format!(
                "SELECT non_work_date, description FROM {table} \
                 WHERE YEAR(non_work_date) = ? ORDER BY non_work_date"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mysql_statements() {
        let sql = TableSql::new(&DatabaseConfig::default());
        assert!(sql.create.starts_with("CREATE TABLE IF NOT EXISTS non_workdays ("));
        assert!(sql.create.contains("PRIMARY KEY (non_work_date)"));
        assert!(!sql.create.contains("DISTRIBUTED"));
        assert_eq!(
            sql.delete_year,
            "DELETE FROM non_workdays WHERE YEAR(non_work_date) = ?"
        );
        assert_eq!(
            sql.insert_prefix,
            "INSERT INTO non_workdays (non_work_date, description) "
        );
        assert!(sql.select_year.ends_with("ORDER BY non_work_date"));
    }

    #[test]
    fn test_doris_statements() {
        let config = DatabaseConfig {
            table: "cn_non_workdays".to_string(),
            dialect: TableDialect::Doris,
            buckets: 4,
            replication_num: 1,
            ..DatabaseConfig::default()
        };
        let sql = TableSql::new(&config);
        assert!(sql.create.contains("CREATE TABLE IF NOT EXISTS cn_non_workdays"));
        assert!(sql.create.contains("UNIQUE KEY(non_work_date)"));
        assert!(sql.create.contains("BUCKETS 4"));
        assert!(sql.create.contains("\"replication_num\" = \"1\""));
        assert!(sql.delete_year.contains("cn_non_workdays"));
    }
}
