//! DDL for the supply-chain tables.

pub const CREATE_SUPPLIERS: &str = r#"
create table if not exists suppliers (
  supplier_id integer generated by default as identity primary key,
  company_name varchar(255) not null,
  contact_person varchar(255) not null,
  phone varchar(20),
  account_number varchar(20)
)
"#;

pub const CREATE_MATERIALS: &str = r#"
create table if not exists materials (
  material_id integer generated by default as identity primary key,
  material_name varchar(255) not null,
  price numeric(10, 2) not null check (price >= 0)
)
"#;

pub const CREATE_DELIVERIES: &str = r#"
create table if not exists deliveries (
  delivery_id integer generated by default as identity primary key,
  delivery_date date not null,
  supplier_id integer not null references suppliers (supplier_id),
  material_id integer not null references materials (material_id),
  delivery_days integer not null check (delivery_days > 0),
  quantity integer not null check (quantity > 0)
)
"#;

/// Statements in dependency order: parents before `deliveries`.
pub const TABLE_STATEMENTS: &[&str] = &[CREATE_SUPPLIERS, CREATE_MATERIALS, CREATE_DELIVERIES];

/// `create schema` for a validated namespace name.
pub fn create_schema_statement(schema: &str) -> String {
    format!("create schema if not exists \"{schema}\"")
}

/// `set search_path` for a validated namespace name.
pub fn search_path_statement(schema: &str) -> String {
    format!("set search_path to \"{schema}\"")
}

/// Namespace names are interpolated into DDL, so only plain identifiers pass.
pub fn is_plain_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first == '_' || first.is_ascii_alphabetic() => {}
        _ => return false,
    }
    name.len() <= 63 && chars.all(|ch| ch == '_' || ch.is_ascii_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_statements_are_idempotent() {
        for statement in TABLE_STATEMENTS {
            assert!(statement.contains("create table if not exists"));
        }
    }

    #[test]
    fn deliveries_reference_both_parents() {
        assert!(CREATE_DELIVERIES.contains("references suppliers (supplier_id)"));
        assert!(CREATE_DELIVERIES.contains("references materials (material_id)"));
    }

    #[test]
    fn accepts_only_plain_identifiers() {
        assert!(is_plain_identifier("supply_chain"));
        assert!(is_plain_identifier("_scratch2"));
        assert!(!is_plain_identifier("2fast"));
        assert!(!is_plain_identifier("bad\"name"));
        assert!(!is_plain_identifier(""));
    }
}
