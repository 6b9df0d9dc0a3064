use channelfinder_query::{Dialect, Fragment, SqlParam};
use pretty_assertions::assert_eq;

fn sample() -> Fragment {
    Fragment::sql("SELECT id FROM t WHERE ")
        .push_like("name", "a%")
        .push_sql(" AND n = ")
        .push_param(3_i64)
}

#[test]
fn sqlite_rendering() {
    let query = sample().render(Dialect::Sqlite);
    assert_eq!(
        query.sql,
        r"SELECT id FROM t WHERE name LIKE ? ESCAPE '\' AND n = ?"
    );
    assert_eq!(query.params, vec![SqlParam::from("a%"), SqlParam::Int(3)]);
}

#[test]
fn postgres_numbers_placeholders() {
    let query = sample().render(Dialect::Postgres);
    assert_eq!(
        query.sql,
        r"SELECT id FROM t WHERE name LIKE $1 ESCAPE '\' AND n = $2"
    );
}

#[test]
fn mysql_doubles_escape_backslash() {
    let query = sample().render(Dialect::MySql);
    assert_eq!(
        query.sql,
        r"SELECT id FROM t WHERE name LIKE ? ESCAPE '\\' AND n = ?"
    );
}

#[test]
fn params_are_the_same_in_every_dialect() {
    let fragment = sample();
    let expected: Vec<SqlParam> = fragment.params().cloned().collect();
    for dialect in [Dialect::Sqlite, Dialect::Postgres, Dialect::MySql] {
        assert_eq!(fragment.render(dialect).params, expected);
    }
}

#[test]
fn default_dialect_is_sqlite() {
    assert_eq!(Dialect::default(), Dialect::Sqlite);
}

#[test]
fn join_places_separator_between_fragments_only() {
    let joined = Fragment::join(
        ["a", "b", "c"].map(|v| Fragment::sql("x = ").push_param(v)),
        " OR ",
    );
    assert_eq!(
        joined.render(Dialect::Sqlite).sql,
        "x = ? OR x = ? OR x = ?"
    );
    assert_eq!(joined.params().count(), 3);
}

#[test]
fn join_of_nothing_is_empty() {
    let joined = Fragment::join(std::iter::empty(), " AND ");
    assert!(joined.is_empty());
    assert_eq!(joined.render(Dialect::Sqlite).sql, "");
}

#[test]
fn parenthesized_wraps_whole_fragment() {
    let fragment = Fragment::sql("a = ").push_param(1_i64).parenthesized();
    assert_eq!(fragment.render(Dialect::Postgres).sql, "(a = $1)");
}

#[test]
fn push_keeps_parameter_order() {
    let left = Fragment::sql("a = ").push_param("x");
    let right = Fragment::sql(" AND b = ").push_param("y");
    let query = left.push(right).render(Dialect::Postgres);
    assert_eq!(query.sql, "a = $1 AND b = $2");
    assert_eq!(query.params, vec![SqlParam::from("x"), SqlParam::from("y")]);
}

#[test]
fn folded_like_lowers_both_sides() {
    let query = Fragment::new()
        .push_like_folded("p.property", "grp-%")
        .render(Dialect::Postgres);
    assert_eq!(query.sql, r"LOWER(p.property) LIKE LOWER($1) ESCAPE '\'");
    assert_eq!(query.params, vec![SqlParam::from("grp-%")]);
}

#[test]
fn id_set_is_one_logical_param() {
    let fragment = Fragment::sql("SELECT 1 WHERE ")
        .push_in_list("id", [5, 6, 7])
        .push_sql(" AND n = ")
        .push_param(1_i64);
    let expected = vec![SqlParam::IntList(vec![5, 6, 7]), SqlParam::Int(1)];
    assert_eq!(fragment.params().cloned().collect::<Vec<_>>(), expected);
    assert_eq!(
        fragment.render(Dialect::Sqlite).sql,
        "SELECT 1 WHERE id IN rarray(?) AND n = ?"
    );
    assert_eq!(fragment.render(Dialect::Postgres).params, expected);
    assert_eq!(
        fragment.render(Dialect::Postgres).sql,
        "SELECT 1 WHERE id = ANY($1) AND n = $2"
    );
}

#[test]
fn mysql_id_set_uses_one_slot_per_value() {
    let query = Fragment::new()
        .push_in_list("id", [5, 6])
        .push_sql(" AND n = ")
        .push_param(1_i64)
        .render(Dialect::MySql);
    assert_eq!(query.sql, "id IN (?,?) AND n = ?");
    assert_eq!(
        query.params,
        vec![SqlParam::Int(5), SqlParam::Int(6), SqlParam::Int(1)]
    );
}

#[test]
fn empty_sql_is_ignored() {
    assert!(Fragment::sql("").is_empty());
    assert!(Fragment::new().push_sql(String::new()).is_empty());
}

#[test]
fn sql_param_conversions() {
    assert_eq!(SqlParam::from(7_i64), SqlParam::Int(7));
    assert_eq!(SqlParam::from("v"), SqlParam::Text("v".into()));
    assert_eq!(SqlParam::from(String::from("v")), SqlParam::Text("v".into()));
}
